//! Slide transition effects for PowerPoint presentations.
//!
//! Only the effects the editor can produce are modeled. Timing is expressed
//! through the `spd` attribute; `dur` lives in the 2010 extension namespace
//! and is not written.

use crate::ooxml::error::Result;
use std::fmt::Write as _;

/// Slide transition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionType {
    /// Fade through black
    Fade,
    /// Push the previous slide out
    Push { direction: TransitionDirection },
    /// Zoom in from the center
    Zoom,
}

/// Transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionDirection {
    Left,
    Right,
    Up,
    Down,
}

impl TransitionDirection {
    fn to_xml_value(self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Right => "r",
            Self::Up => "u",
            Self::Down => "d",
        }
    }
}

/// Transition speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionSpeed {
    Slow,
    Medium,
    Fast,
}

impl TransitionSpeed {
    /// Create from duration in milliseconds.
    ///
    /// ```
    /// use slidecraft::ooxml::pptx::TransitionSpeed;
    ///
    /// assert_eq!(TransitionSpeed::from_duration_ms(300), TransitionSpeed::Fast);
    /// assert_eq!(TransitionSpeed::from_duration_ms(800), TransitionSpeed::Medium);
    /// assert_eq!(TransitionSpeed::from_duration_ms(1500), TransitionSpeed::Slow);
    /// ```
    pub fn from_duration_ms(ms: u32) -> Self {
        if ms <= 500 {
            TransitionSpeed::Fast
        } else if ms <= 1000 {
            TransitionSpeed::Medium
        } else {
            TransitionSpeed::Slow
        }
    }

    /// Convert to OOXML speed value.
    pub(crate) fn to_xml_value(self) -> &'static str {
        match self {
            TransitionSpeed::Slow => "slow",
            TransitionSpeed::Medium => "med",
            TransitionSpeed::Fast => "fast",
        }
    }
}

/// Complete slide transition configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideTransition {
    pub transition_type: TransitionType,
    pub speed: TransitionSpeed,
}

impl SlideTransition {
    pub fn new(transition_type: TransitionType) -> Self {
        Self {
            transition_type,
            speed: TransitionSpeed::Medium,
        }
    }

    pub fn with_speed(mut self, speed: TransitionSpeed) -> Self {
        self.speed = speed;
        self
    }

    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        write!(xml, r#"<p:transition spd="{}">"#, self.speed.to_xml_value())?;
        match self.transition_type {
            TransitionType::Fade => xml.push_str("<p:fade/>"),
            TransitionType::Push { direction } => {
                write!(xml, r#"<p:push dir="{}"/>"#, direction.to_xml_value())?;
            },
            TransitionType::Zoom => xml.push_str(r#"<p:zoom dir="in"/>"#),
        }
        xml.push_str("</p:transition>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(transition: SlideTransition) -> String {
        let mut xml = String::new();
        transition.write_xml(&mut xml).unwrap();
        xml
    }

    #[test]
    fn test_speed_boundaries() {
        assert_eq!(TransitionSpeed::from_duration_ms(0), TransitionSpeed::Fast);
        assert_eq!(TransitionSpeed::from_duration_ms(500), TransitionSpeed::Fast);
        assert_eq!(TransitionSpeed::from_duration_ms(501), TransitionSpeed::Medium);
        assert_eq!(TransitionSpeed::from_duration_ms(1000), TransitionSpeed::Medium);
        assert_eq!(TransitionSpeed::from_duration_ms(1001), TransitionSpeed::Slow);
    }

    #[test]
    fn test_fade_xml() {
        let xml = render(SlideTransition::new(TransitionType::Fade).with_speed(TransitionSpeed::Fast));
        assert_eq!(xml, r#"<p:transition spd="fast"><p:fade/></p:transition>"#);
    }

    #[test]
    fn test_push_and_zoom_xml() {
        let push = render(SlideTransition::new(TransitionType::Push {
            direction: TransitionDirection::Up,
        }));
        assert_eq!(push, r#"<p:transition spd="med"><p:push dir="u"/></p:transition>"#);

        let zoom = render(SlideTransition::new(TransitionType::Zoom).with_speed(TransitionSpeed::Slow));
        assert!(zoom.contains(r#"spd="slow""#));
        assert!(zoom.contains("<p:zoom"));
        assert!(!zoom.contains("dur="));
    }
}
