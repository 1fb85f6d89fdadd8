use std::fmt;

/// RGB color representation.
///
/// Represents a color using red, green, and blue components, each in the range 0-255.
///
/// # Examples
///
/// ```rust
/// use slidecraft::common::RGBColor;
///
/// // Create a red color
/// let red = RGBColor::new(255, 0, 0);
///
/// // Create from hex string
/// let blue = RGBColor::from_hex("#0000FF").unwrap();
/// assert_eq!(blue.to_hex(), "0000FF");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
}

impl RGBColor {
    pub const WHITE: RGBColor = RGBColor::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: RGBColor = RGBColor::new(0x00, 0x00, 0x00);

    /// Create a new RGB color.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create an RGB color from a hex string.
    ///
    /// Accepts six-digit (`FF0000`) and three-digit (`F00`) forms, with or
    /// without a leading `#`. Surrounding whitespace is ignored.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidecraft::common::RGBColor;
    ///
    /// let red = RGBColor::from_hex("FF0000").unwrap();
    /// let short = RGBColor::from_hex("#f00").unwrap();
    /// assert_eq!(red, short);
    /// assert!(RGBColor::from_hex("red").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::new(r, g, b))
            },
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok();
                let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
                Some(Self::new(r * 17, g * 17, b * 17))
            },
            _ => None,
        }
    }

    /// Convert to hex string (without # prefix), the form DrawingML `srgbClr` expects.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use slidecraft::common::RGBColor;
    ///
    /// let color = RGBColor::new(255, 0, 0);
    /// assert_eq!(color.to_hex(), "FF0000");
    /// ```
    pub fn to_hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RGBColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_variants() {
        assert_eq!(RGBColor::from_hex("#38BDF8"), Some(RGBColor::new(0x38, 0xBD, 0xF8)));
        assert_eq!(RGBColor::from_hex("38bdf8"), Some(RGBColor::new(0x38, 0xBD, 0xF8)));
        assert_eq!(RGBColor::from_hex(" #fff "), Some(RGBColor::WHITE));
        assert_eq!(RGBColor::from_hex("#000"), Some(RGBColor::BLACK));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(RGBColor::from_hex("").is_none());
        assert!(RGBColor::from_hex("#12345").is_none());
        assert!(RGBColor::from_hex("#GGGGGG").is_none());
        assert!(RGBColor::from_hex("rgb(0,0,0)").is_none());
        assert!(RGBColor::from_hex("#+1+1+1").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(RGBColor::new(0x1e, 0x29, 0x3b).to_string(), "#1E293B");
    }
}
