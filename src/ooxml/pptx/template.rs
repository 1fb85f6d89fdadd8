//! Package scaffolding for new presentations.
//!
//! Every slide needs a layout, every layout a master and the master a theme.
//! These parts are generated here with a single blank layout, along with the
//! presentation-level property parts and the document properties.

use crate::common::RGBColor;
use crate::common::xml::escape_xml;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::namespace;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write as _;

/// Id of the only slide master in `p:sldMasterIdLst`.
pub const SLIDE_MASTER_ID: u32 = 2_147_483_648;
/// Id of the blank layout in `p:sldLayoutIdLst`.
pub const SLIDE_LAYOUT_ID: u32 = 2_147_483_649;
/// Default table style (Medium Style 2 - Accent 1).
pub const DEFAULT_TABLE_STYLE_ID: &str = "{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Root of an empty shape tree, shared by slides, layouts and the master.
pub(crate) const SHAPE_TREE_ROOT: &str = concat!(
    r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#,
    r#"<p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#,
    r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
);

fn pml_root(xml: &mut String, tag: &str, attrs: &str) -> Result<()> {
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<p:{} xmlns:a="{}" xmlns:r="{}" xmlns:p="{}"{}>"#,
        tag,
        namespace::DML_MAIN,
        namespace::OFC_RELATIONSHIPS,
        namespace::PML_MAIN,
        attrs
    )?;
    Ok(())
}

/// Colors the theme is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeColors {
    pub background: RGBColor,
    pub text: RGBColor,
    pub accent: RGBColor,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            background: RGBColor::new(0x1E, 0x29, 0x3B),
            text: RGBColor::WHITE,
            accent: RGBColor::new(0x38, 0xBD, 0xF8),
        }
    }
}

/// The slide master with one blank layout (`rId1`) and the theme (`rId2`).
pub fn slide_master_xml(colors: &ThemeColors) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    pml_root(&mut xml, "sldMaster", "")?;
    xml.push_str("<p:cSld>");
    write!(
        xml,
        r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
        colors.background.to_hex()
    )?;
    write!(xml, "<p:spTree>{}</p:spTree>", SHAPE_TREE_ROOT)?;
    xml.push_str("</p:cSld>");
    xml.push_str(concat!(
        r#"<p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" "#,
        r#"accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" "#,
        r#"hlink="hlink" folHlink="folHlink"/>"#,
    ));
    write!(
        xml,
        r#"<p:sldLayoutIdLst><p:sldLayoutId id="{}" r:id="rId1"/></p:sldLayoutIdLst>"#,
        SLIDE_LAYOUT_ID
    )?;
    xml.push_str("</p:sldMaster>");
    Ok(xml)
}

/// The blank layout every slide uses.
pub fn blank_layout_xml() -> Result<String> {
    let mut xml = String::with_capacity(768);
    pml_root(&mut xml, "sldLayout", r#" type="blank" preserve="1""#)?;
    write!(
        xml,
        r#"<p:cSld name="Blank"><p:spTree>{}</p:spTree></p:cSld>"#,
        SHAPE_TREE_ROOT
    )?;
    xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
    xml.push_str("</p:sldLayout>");
    Ok(xml)
}

/// A theme whose color scheme follows the presentation template.
pub fn theme_xml(name: &str, colors: &ThemeColors) -> Result<String> {
    let mut xml = String::with_capacity(4096);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<a:theme xmlns:a="{}" name="{}"><a:themeElements>"#,
        namespace::DML_MAIN,
        escape_xml(name)
    )?;

    write!(xml, r#"<a:clrScheme name="{}">"#, escape_xml(name))?;
    let scheme = [
        ("dk1", colors.text),
        ("lt1", colors.background),
        ("dk2", RGBColor::new(0x0F, 0x17, 0x2A)),
        ("lt2", RGBColor::new(0xCB, 0xD5, 0xE1)),
        ("accent1", colors.accent),
        ("accent2", RGBColor::new(0x34, 0xD3, 0x99)),
        ("accent3", RGBColor::new(0xFB, 0xBF, 0x24)),
        ("accent4", RGBColor::new(0xF4, 0x72, 0xB6)),
        ("accent5", RGBColor::new(0xA7, 0x8B, 0xFA)),
        ("accent6", RGBColor::new(0x64, 0x74, 0x8B)),
        ("hlink", colors.accent),
        ("folHlink", RGBColor::new(0xA7, 0x8B, 0xFA)),
    ];
    for (slot, color) in scheme {
        write!(xml, r#"<a:{slot}><a:srgbClr val="{}"/></a:{slot}>"#, color.to_hex())?;
    }
    xml.push_str("</a:clrScheme>");

    xml.push_str(concat!(
        r#"<a:fontScheme name="Office">"#,
        r#"<a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>"#,
        r#"<a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>"#,
        r#"</a:fontScheme>"#,
    ));

    let solid = r#"<a:solidFill><a:schemeClr val="phClr"/></a:solidFill>"#;
    xml.push_str(r#"<a:fmtScheme name="Office"><a:fillStyleLst>"#);
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:fillStyleLst><a:lnStyleLst>");
    for width in [6350, 12700, 19050] {
        write!(xml, r#"<a:ln w="{}">{}</a:ln>"#, width, solid)?;
    }
    xml.push_str("</a:lnStyleLst><a:effectStyleLst>");
    for _ in 0..3 {
        xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
    }
    xml.push_str("</a:effectStyleLst><a:bgFillStyleLst>");
    for _ in 0..3 {
        xml.push_str(solid);
    }
    xml.push_str("</a:bgFillStyleLst></a:fmtScheme>");

    xml.push_str("</a:themeElements></a:theme>");
    Ok(xml)
}

pub fn pres_props_xml() -> Result<String> {
    let mut xml = String::with_capacity(256);
    pml_root(&mut xml, "presentationPr", "")?;
    xml.push_str("</p:presentationPr>");
    Ok(xml)
}

pub fn view_props_xml() -> Result<String> {
    let mut xml = String::with_capacity(512);
    pml_root(&mut xml, "viewPr", "")?;
    xml.push_str(r#"<p:normalViewPr><p:restoredLeft sz="15620"/><p:restoredTop sz="94660"/></p:normalViewPr>"#);
    xml.push_str(r#"<p:gridSpacing cx="76200" cy="76200"/>"#);
    xml.push_str("</p:viewPr>");
    Ok(xml)
}

pub fn table_styles_xml() -> Result<String> {
    let mut xml = String::with_capacity(256);
    xml.push_str(XML_DECLARATION);
    write!(
        xml,
        r#"<a:tblStyleLst xmlns:a="{}" def="{}"/>"#,
        namespace::DML_MAIN,
        DEFAULT_TABLE_STYLE_ID
    )?;
    Ok(xml)
}

/// Values written to `docProps/core.xml`.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentProperties {
    pub title: String,
    pub subject: Option<String>,
    pub creator: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Default for DocumentProperties {
    fn default() -> Self {
        Self {
            title: String::new(),
            subject: None,
            creator: String::new(),
            created: DateTime::UNIX_EPOCH,
            modified: DateTime::UNIX_EPOCH,
        }
    }
}

pub fn core_props_xml(props: &DocumentProperties) -> Result<String> {
    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<cp:coreProperties "#,
        r#"xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" "#,
        r#"xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" "#,
        r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    write!(xml, "<dc:title>{}</dc:title>", escape_xml(&props.title))?;
    if let Some(subject) = &props.subject {
        write!(xml, "<dc:subject>{}</dc:subject>", escape_xml(subject))?;
    }
    write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(&props.creator))?;
    write!(
        xml,
        "<cp:lastModifiedBy>{}</cp:lastModifiedBy>",
        escape_xml(&props.creator)
    )?;
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
        props.created.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    write!(
        xml,
        r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{}</dcterms:modified>"#,
        props.modified.to_rfc3339_opts(SecondsFormat::Secs, true)
    )?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

pub fn app_props_xml(slide_count: usize) -> Result<String> {
    let mut xml = String::with_capacity(512);
    xml.push_str(XML_DECLARATION);
    xml.push_str(concat!(
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
        r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
    ));
    write!(xml, "<Application>{}</Application>", env!("CARGO_PKG_NAME"))?;
    write!(xml, "<Slides>{}</Slides>", slide_count)?;
    xml.push_str("<PresentationFormat>Custom</PresentationFormat>");
    xml.push_str("</Properties>");
    Ok(xml)
}
