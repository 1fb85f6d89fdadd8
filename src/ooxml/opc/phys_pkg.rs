//! Physical package writer: the ZIP container under an OPC package.
//!
//! Every entry gets the same fixed timestamp so that identical packages
//! produce identical bytes.

use crate::ooxml::opc::error::Result;
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// How part data is stored in the ZIP container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Deflate every part (what Office writes)
    #[default]
    Deflated,
    /// Store parts uncompressed
    Stored,
}

impl Compression {
    fn method(self) -> zip::CompressionMethod {
        match self {
            Self::Deflated => zip::CompressionMethod::Deflated,
            Self::Stored => zip::CompressionMethod::Stored,
        }
    }
}

/// Physical package writer for creating OPC packages in memory.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl PhysPkgWriter {
    /// Create a new package writer that writes to memory.
    pub fn new(compression: Compression) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(compression.method())
            .last_modified_time(zip::DateTime::default());
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
            options,
        }
    }

    /// Write a part to the package under its membername.
    pub fn write(&mut self, pack_uri: &PackURI, blob: &[u8]) -> Result<()> {
        self.archive.start_file(pack_uri.membername(), self.options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Finish writing and return the package bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new(Compression::default())
    }
}
