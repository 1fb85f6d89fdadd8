//! Package writer for OPC packages.
//!
//! Serializes an [`OpcPackage`] into a ZIP container: `[Content_Types].xml`
//! first, then the package relationships, then every part followed by its
//! `.rels` part.

use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::{content_type as ct, namespace};
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::package::OpcPackage;
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::{Compression, PhysPkgWriter};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Package writer that serializes an OPC package to a ZIP archive.
///
/// # Example
///
/// ```no_run
/// use slidecraft::ooxml::opc::{Compression, OpcPackage, PackageWriter};
///
/// let pkg = OpcPackage::new();
/// // ... add parts to package ...
/// PackageWriter::write("output.pptx", &pkg, Compression::Deflated)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write an OPC package to a file.
    ///
    /// The package is written to a temporary file next to `path` and renamed
    /// into place, so `path` is either the complete package or untouched.
    pub fn write<P: AsRef<Path>>(path: P, package: &OpcPackage, compression: Compression) -> Result<()> {
        let bytes = Self::to_bytes(package, compression)?;
        Self::write_bytes_atomic(path.as_ref(), &bytes)
    }

    /// Atomically place `bytes` at `path`.
    ///
    /// A failed rename is reported as [`OpcError::Persist`]; the temporary
    /// file is removed either way.
    pub fn write_bytes_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| OpcError::Persist {
            path: path.display().to_string(),
            source: e.error,
        })?;
        Ok(())
    }

    /// Write an OPC package to a stream.
    pub fn write_to_stream<W: Write>(mut writer: W, package: &OpcPackage, compression: Compression) -> Result<()> {
        let bytes = Self::to_bytes(package, compression)?;
        writer.write_all(&bytes)?;
        writer.flush()?;
        Ok(())
    }

    /// Serialize an OPC package to bytes.
    pub fn to_bytes(package: &OpcPackage, compression: Compression) -> Result<Vec<u8>> {
        let mut phys_writer = PhysPkgWriter::new(compression);

        Self::write_content_types(&mut phys_writer, package)?;
        Self::write_pkg_rels(&mut phys_writer, package)?;
        Self::write_parts(&mut phys_writer, package)?;

        phys_writer.finish()
    }

    fn write_content_types(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let cti = ContentTypesItem::from_package(package);
        let blob = cti.to_xml()?;

        let content_types_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        phys_writer.write(&content_types_uri, blob.as_bytes())
    }

    fn write_pkg_rels(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        let package_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels_uri = package_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        let rels_xml = package.rels().to_xml()?;
        phys_writer.write(&rels_uri, rels_xml.as_bytes())
    }

    fn write_parts(phys_writer: &mut PhysPkgWriter, package: &OpcPackage) -> Result<()> {
        for part in package.iter_parts() {
            phys_writer.write(part.partname(), part.blob())?;

            if !part.rels().is_empty() {
                let rels_uri = part.partname().rels_uri().map_err(OpcError::InvalidPackUri)?;
                let rels_xml = part.rels().to_xml()?;
                phys_writer.write(&rels_uri, rels_xml.as_bytes())?;
            }
        }
        Ok(())
    }
}

/// Helper for building [Content_Types].xml content.
///
/// Well-known extensions get a `Default` entry; everything else an
/// `Override` for its partname. Both lists are written sorted.
struct ContentTypesItem {
    defaults: BTreeMap<String, &'static str>,
    overrides: BTreeMap<String, String>,
}

impl ContentTypesItem {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), ct::OPC_RELATIONSHIPS);
        defaults.insert("xml".to_string(), ct::XML);

        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn from_package(package: &OpcPackage) -> Self {
        let mut cti = Self::new();
        for part in package.iter_parts() {
            cti.add_content_type(part.partname(), part.content_type());
        }
        cti
    }

    fn add_content_type(&mut self, partname: &PackURI, content_type: &str) {
        let ext = partname.ext().to_ascii_lowercase();
        match Self::default_content_type(&ext, content_type) {
            Some(known) => {
                self.defaults.insert(ext, known);
            },
            None => {
                self.overrides
                    .insert(partname.to_string(), content_type.to_string());
            },
        }
    }

    /// The standard default for an extension/content-type pair, if it is one.
    fn default_content_type(ext: &str, content_type: &str) -> Option<&'static str> {
        [
            ("rels", ct::OPC_RELATIONSHIPS),
            ("xml", ct::XML),
            ("png", ct::PNG),
            ("jpg", ct::JPEG),
            ("jpeg", ct::JPEG),
            ("gif", ct::GIF),
            ("bmp", ct::BMP),
            ("tif", ct::TIFF),
            ("tiff", ct::TIFF),
            ("xlsx", ct::SML_SHEET),
        ]
        .into_iter()
        .find(|&(e, c)| e == ext && c == content_type)
        .map(|(_, c)| c)
    }

    fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512 + self.overrides.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(xml, r#"<Types xmlns="{}">"#, namespace::OPC_CONTENT_TYPES)?;

        for (ext, content_type) in &self.defaults {
            write!(
                xml,
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            )?;
        }

        for (partname, content_type) in &self.overrides {
            write!(
                xml,
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(partname),
                escape_xml(content_type)
            )?;
        }

        xml.push_str("</Types>");
        Ok(xml)
    }
}
