/// In-memory OPC package assembled before serialization.
///
/// Parts are kept in insertion order so that the written ZIP has a stable
/// member order.
use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{PACKAGE_URI, PackURI};
use crate::ooxml::opc::part::{BlobPart, Part};
use crate::ooxml::opc::rel::Relationships;
use std::collections::HashMap;

/// An Open Packaging Convention package: package-level relationships plus a
/// set of parts.
pub struct OpcPackage {
    /// Package-level relationships
    rels: Relationships,

    /// All parts, in insertion order
    parts: Vec<Box<dyn Part + Send>>,

    /// Partname to index into `parts`
    index: HashMap<String, usize>,
}

impl OpcPackage {
    /// Create a new empty OPC package.
    pub fn new() -> Self {
        Self {
            rels: Relationships::new(PACKAGE_URI.to_string()),
            parts: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Get the main document part (the target of the officeDocument relationship).
    pub fn main_document_part(&self) -> Result<&dyn Part> {
        self.part_by_reltype(relationship_type::OFFICE_DOCUMENT)
    }

    /// Get a part by its partname.
    pub fn get_part(&self, partname: &PackURI) -> Result<&dyn Part> {
        self.index
            .get(partname.as_str())
            .map(|&i| &*self.parts[i] as &dyn Part)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Get a part by relationship type from the package level.
    pub fn part_by_reltype(&self, reltype: &str) -> Result<&dyn Part> {
        let rel = self.rels.part_with_reltype(reltype)?;
        let partname = rel.target_partname()?;
        self.get_part(&partname)
    }

    /// Add a new part to the package.
    ///
    /// Fails when a part with the same partname already exists.
    pub fn add_part(&mut self, part: Box<dyn Part + Send>) -> Result<()> {
        let partname = part.partname().to_string();
        if self.index.contains_key(&partname) {
            return Err(OpcError::DuplicatePart(partname));
        }
        self.index.insert(partname, self.parts.len());
        self.parts.push(part);
        Ok(())
    }

    /// Convenience for adding a [`BlobPart`].
    pub fn add_blob_part(&mut self, part: BlobPart) -> Result<()> {
        self.add_part(Box::new(part))
    }

    /// Iterate over all parts in insertion order.
    pub fn iter_parts(&self) -> impl Iterator<Item = &dyn Part> {
        self.parts.iter().map(|b| &**b as &dyn Part)
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Relate the package to a part. Returns the rId.
    pub fn relate_to(&mut self, partname: &PackURI, reltype: &str) -> String {
        self.rels
            .get_or_add(reltype, &partname.relative_ref(PACKAGE_URI))
    }

    /// Find the next free partname for a numbered template.
    ///
    /// ```
    /// use slidecraft::ooxml::opc::OpcPackage;
    ///
    /// let pkg = OpcPackage::new();
    /// let next = pkg.next_partname("/ppt/media/image%d.png").unwrap();
    /// assert_eq!(next.as_str(), "/ppt/media/image1.png");
    /// ```
    pub fn next_partname(&self, template: &str) -> Result<PackURI> {
        let mut buffer = itoa::Buffer::new();
        (1u32..=10_000)
            .map(|n| template.replace("%d", buffer.format(n)))
            .find(|candidate| !self.index.contains_key(candidate))
            .ok_or_else(|| {
                OpcError::InvalidPackUri("Too many parts, cannot find next partname".to_string())
            })
            .and_then(|name| PackURI::new(name).map_err(OpcError::InvalidPackUri))
    }

    pub fn contains_part(&self, partname: &PackURI) -> bool {
        self.index.contains_key(partname.as_str())
    }
}

impl Default for OpcPackage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::content_type as ct;

    #[test]
    fn test_main_document_part() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/presentation.xml").unwrap();
        pkg.add_blob_part(BlobPart::from_xml(
            uri.clone(),
            ct::PML_PRESENTATION_MAIN,
            "<p:presentation/>".into(),
        ))
        .unwrap();
        assert_eq!(pkg.relate_to(&uri, relationship_type::OFFICE_DOCUMENT), "rId1");

        let main = pkg.main_document_part().unwrap();
        assert_eq!(main.content_type(), ct::PML_PRESENTATION_MAIN);
    }

    #[test]
    fn test_duplicate_part_rejected() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        pkg.add_blob_part(BlobPart::new(uri.clone(), ct::PML_SLIDE, Vec::new()))
            .unwrap();
        assert!(matches!(
            pkg.add_blob_part(BlobPart::new(uri, ct::PML_SLIDE, Vec::new())),
            Err(OpcError::DuplicatePart(_))
        ));
    }

    #[test]
    fn test_next_partname_skips_existing() {
        let mut pkg = OpcPackage::new();
        let uri = PackURI::new("/ppt/media/image1.png").unwrap();
        pkg.add_blob_part(BlobPart::new(uri, ct::PNG, vec![0]))
            .unwrap();
        let next = pkg.next_partname("/ppt/media/image%d.png").unwrap();
        assert_eq!(next.as_str(), "/ppt/media/image2.png");
    }

    #[test]
    fn test_parts_keep_insertion_order() {
        let mut pkg = OpcPackage::new();
        for name in ["/b.xml", "/a.xml", "/c.xml"] {
            pkg.add_blob_part(BlobPart::new(PackURI::new(name).unwrap(), ct::XML, Vec::new()))
                .unwrap();
        }
        let names: Vec<&str> = pkg.iter_parts().map(|p| p.partname().as_str()).collect();
        assert_eq!(names, ["/b.xml", "/a.xml", "/c.xml"]);
        assert_eq!(pkg.part_count(), 3);
        assert!(pkg.contains_part(&PackURI::new("/a.xml").unwrap()));
        assert!(!pkg.contains_part(&PackURI::new("/d.xml").unwrap()));
    }
}
