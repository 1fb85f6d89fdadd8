//! Slide background fills.

use crate::common::RGBColor;
use crate::common::style::LinearGradient;
use crate::ooxml::error::Result;
use std::fmt::Write as _;

/// Slide background configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideBackground {
    /// Solid color background
    Solid(RGBColor),
    /// Linear gradient background
    Gradient {
        /// DrawingML angle in 1/60000 degree, 0 running left to right
        angle: i64,
        /// Stops as (position in 1/1000 percent, color)
        stops: Vec<(u32, RGBColor)>,
    },
}

impl SlideBackground {
    pub fn solid(color: RGBColor) -> Self {
        Self::Solid(color)
    }

    /// Gradient fill from a parsed CSS gradient.
    pub fn from_gradient(gradient: &LinearGradient) -> Self {
        Self::Gradient {
            angle: gradient.drawingml_angle(),
            stops: gradient
                .stops
                .iter()
                .map(|stop| ((stop.position * 100_000.0).round() as u32, stop.color))
                .collect(),
        }
    }

    /// Write the `p:bg` element.
    pub(crate) fn write_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<p:bg><p:bgPr>");
        match self {
            Self::Solid(color) => {
                write!(
                    xml,
                    r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                    color.to_hex()
                )?;
            },
            Self::Gradient { angle, stops } => {
                xml.push_str(r#"<a:gradFill rotWithShape="1"><a:gsLst>"#);
                for (pos, color) in stops {
                    write!(
                        xml,
                        r#"<a:gs pos="{}"><a:srgbClr val="{}"/></a:gs>"#,
                        pos,
                        color.to_hex()
                    )?;
                }
                write!(xml, r#"</a:gsLst><a:lin ang="{}" scaled="0"/></a:gradFill>"#, angle)?;
            },
        }
        xml.push_str("<a:effectLst/></p:bgPr></p:bg>");
        Ok(())
    }
}
