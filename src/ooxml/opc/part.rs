use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::rel::Relationships;
/// Open Packaging Convention (OPC) objects related to package parts.
///
/// Parts are the units of content in an OPC package, each with a unique
/// partname, a content type and optional relationships to other parts.
use memchr::memmem;

/// Trait representing a part in an OPC package.
pub trait Part {
    /// Get the partname of this part.
    fn partname(&self) -> &PackURI;

    /// Get the content type of this part.
    fn content_type(&self) -> &str;

    /// Get the binary content of this part.
    fn blob(&self) -> &[u8];

    /// Get the relationships for this part.
    fn rels(&self) -> &Relationships;

    /// Get mutable access to the relationships for this part.
    fn rels_mut(&mut self) -> &mut Relationships;

    /// Add or get a relationship to another part.
    ///
    /// The target is stored relative to this part's directory. Returns the rId.
    fn relate_to(&mut self, target: &PackURI, reltype: &str) -> String {
        let target_ref = target.relative_ref(self.partname().base_uri());
        self.rels_mut().get_or_add(reltype, &target_ref)
    }

    /// Add or get an external relationship.
    fn relate_to_ext(&mut self, target_url: &str, reltype: &str) -> String {
        self.rels_mut().get_or_add_ext_rel(reltype, target_url)
    }

    /// Get the target reference for a relationship ID.
    fn target_ref(&self, r_id: &str) -> Result<&str> {
        self.rels()
            .get(r_id)
            .map(|rel| rel.target_ref())
            .ok_or_else(|| OpcError::RelationshipNotFound(format!("rId: {}", r_id)))
    }

    /// Count `r:id`, `r:embed` and `r:link` references to a relationship ID
    /// in the part content.
    fn rel_ref_count(&self, r_id: &str) -> usize {
        let blob = self.blob();
        ["r:id", "r:embed", "r:link"]
            .iter()
            .map(|attr| {
                let pattern = format!(r#"{}="{}""#, attr, r_id);
                memmem::Finder::new(pattern.as_bytes())
                    .find_iter(blob)
                    .count()
            })
            .sum()
    }
}

/// A part holding its serialized content as bytes.
///
/// Generated XML and binary media are both stored this way.
#[derive(Debug, Clone)]
pub struct BlobPart {
    partname: PackURI,
    content_type: String,
    blob: Vec<u8>,
    rels: Relationships,
}

impl BlobPart {
    pub fn new(partname: PackURI, content_type: impl Into<String>, blob: Vec<u8>) -> Self {
        let rels = Relationships::new(partname.base_uri().to_string());
        Self {
            partname,
            content_type: content_type.into(),
            blob,
            rels,
        }
    }

    /// Create a part from generated XML text.
    pub fn from_xml(partname: PackURI, content_type: impl Into<String>, xml: String) -> Self {
        Self::new(partname, content_type, xml.into_bytes())
    }

    /// Replace the part content, keeping its relationships.
    pub fn set_blob(&mut self, blob: Vec<u8>) {
        self.blob = blob;
    }
}

impl Part for BlobPart {
    fn partname(&self) -> &PackURI {
        &self.partname
    }

    fn content_type(&self) -> &str {
        &self.content_type
    }

    fn blob(&self) -> &[u8] {
        &self.blob
    }

    fn rels(&self) -> &Relationships {
        &self.rels
    }

    fn rels_mut(&mut self) -> &mut Relationships {
        &mut self.rels
    }
}
