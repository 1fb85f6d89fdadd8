//! Identifier and geometry types shared by slides and elements.

use crate::common::id::generate_id;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(generate_id())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

string_id!(
    /// Identifier of a slide, unique within a presentation.
    SlideId
);

string_id!(
    /// Identifier of an element, unique within its slide.
    ElementId
);

/// Element bounds in logical canvas units (96 per inch, 960 x 540 canvas).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Position {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same bounds moved by `(dx, dy)`.
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = ElementId::generate();
        let b = ElementId::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 36);
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = SlideId::from("slide-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"slide-1\"");
        let back: SlideId = serde_json::from_str("\"slide-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_position_offset() {
        let p = Position::new(10.0, 20.0, 30.0, 40.0).offset(5.0, -5.0);
        assert_eq!(p, Position::new(15.0, 15.0, 30.0, 40.0));
    }
}
