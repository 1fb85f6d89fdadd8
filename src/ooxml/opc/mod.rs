/// Open Packaging Conventions (OPC) implementation.
///
/// Builds packages in memory and serializes them to ZIP:
///
/// - Package structure (parts, relationships)
/// - Content type management
/// - ZIP-based physical packaging with fixed timestamps
///
/// Uses `atoi_simd` for rId parsing and `memchr` for reference scanning.

pub mod constants;
pub mod error;
pub mod package;
pub mod packuri;
pub mod part;
pub mod phys_pkg;
pub mod pkgwriter;
pub mod rel;

// Re-export commonly used types
pub use package::OpcPackage;
pub use packuri::PackURI;
pub use part::{BlobPart, Part};
pub use phys_pkg::Compression;
pub use pkgwriter::PackageWriter;
pub use rel::{Relationship, Relationships};
