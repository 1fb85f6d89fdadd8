use crate::common::xml::escape_xml;
use crate::ooxml::opc::constants::namespace;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
/// Relationship-related objects for OPC packages.
///
/// Relationships connect a source (a part or the package itself) to internal
/// parts or to external targets such as linked pictures.
use std::fmt::Write as _;

/// A single relationship from a source part to a target.
///
/// Identified by an rId. Internal relationships point at another part by a
/// reference relative to the source's base URI; external ones carry an
/// absolute URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1", "rId2")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference - either a relative part reference or an external URL
    target_ref: String,

    /// Base URI for resolving relative references
    base_uri: String,

    /// Whether this is an external relationship
    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: String,
        reltype: String,
        target_ref: String,
        base_uri: String,
        is_external: bool,
    ) -> Self {
        Self {
            r_id,
            reltype,
            target_ref,
            base_uri,
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    /// Get the target reference.
    ///
    /// For internal relationships, this is a relative part reference.
    /// For external relationships, this is an absolute URL.
    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(
                "Cannot get target_partname for external relationship".to_string(),
            ));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }

    /// Numeric suffix of the rId, used for ordering.
    fn r_id_number(&self) -> Option<u32> {
        self.r_id
            .strip_prefix("rId")
            .and_then(|n| atoi_simd::parse::<u32, false, false>(n.as_bytes()).ok())
    }
}

/// Collection of relationships from a single source.
///
/// Kept in insertion order so that the serialized `.rels` part is stable.
#[derive(Debug, Clone)]
pub struct Relationships {
    /// Base URI for resolving relative references
    base_uri: String,

    rels: Vec<Relationship>,
}

impl Relationships {
    /// Create a new empty relationships collection for a source whose
    /// directory is `base_uri`.
    pub fn new(base_uri: String) -> Self {
        Self {
            base_uri,
            rels: Vec::new(),
        }
    }

    /// Add a relationship with an explicit rId.
    ///
    /// Fails when the rId is already taken.
    pub fn add_relationship(
        &mut self,
        reltype: String,
        target_ref: String,
        r_id: String,
        is_external: bool,
    ) -> Result<&Relationship> {
        if self.get(&r_id).is_some() {
            return Err(OpcError::InvalidRelationship(format!(
                "duplicate relationship id '{}'",
                r_id
            )));
        }
        self.rels.push(Relationship::new(
            r_id,
            reltype,
            target_ref,
            self.base_uri.clone(),
            is_external,
        ));
        Ok(&self.rels[self.rels.len() - 1])
    }

    #[inline]
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// Get or add an internal relationship to a target part.
    ///
    /// An existing relationship of the same type and target is reused;
    /// otherwise a new one gets the next free rId. Returns the rId.
    pub fn get_or_add(&mut self, reltype: &str, target_ref: &str) -> String {
        self.get_or_add_inner(reltype, target_ref, false)
    }

    /// Get or add an external relationship. Returns the rId.
    pub fn get_or_add_ext_rel(&mut self, reltype: &str, target_ref: &str) -> String {
        self.get_or_add_inner(reltype, target_ref, true)
    }

    fn get_or_add_inner(&mut self, reltype: &str, target_ref: &str, external: bool) -> String {
        if let Some(rel) = self.rels.iter().find(|rel| {
            rel.reltype() == reltype && rel.target_ref() == target_ref && rel.is_external() == external
        }) {
            return rel.r_id().to_string();
        }

        let r_id = self.next_r_id();
        self.rels.push(Relationship::new(
            r_id.clone(),
            reltype.to_string(),
            target_ref.to_string(),
            self.base_uri.clone(),
            external,
        ));
        r_id
    }

    /// Get the next available relationship ID.
    ///
    /// Generates IDs in the format "rId1", "rId2", etc., filling in gaps
    /// if any exist.
    fn next_r_id(&self) -> String {
        let mut used_numbers: Vec<u32> =
            self.rels.iter().filter_map(Relationship::r_id_number).collect();
        used_numbers.sort_unstable();

        let mut next_num = 1u32;
        for &num in &used_numbers {
            match num.cmp(&next_num) {
                std::cmp::Ordering::Equal => next_num += 1,
                std::cmp::Ordering::Greater => break,
                std::cmp::Ordering::Less => {},
            }
        }

        format!("rId{}", next_num)
    }

    /// Get the single relationship of a specific type.
    ///
    /// Returns an error if no relationship of the type is found,
    /// or if multiple relationships of the type exist.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<&Relationship> {
        let mut matching = self.rels.iter().filter(|rel| rel.reltype() == reltype);
        match (matching.next(), matching.next()) {
            (None, _) => Err(OpcError::RelationshipNotFound(format!(
                "No relationship of type '{}'",
                reltype
            ))),
            (Some(rel), None) => Ok(rel),
            (Some(_), Some(_)) => Err(OpcError::InvalidRelationship(format!(
                "Multiple relationships of type '{}'",
                reltype
            ))),
        }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    /// Serialize relationships to XML format.
    ///
    /// Relationships are sorted by the numeric part of their rId
    /// (`rId2` before `rId10`).
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.rels.len() * 160);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        write!(xml, r#"<Relationships xmlns="{}">"#, namespace::OPC_RELATIONSHIPS)?;

        let mut rels: Vec<&Relationship> = self.rels.iter().collect();
        rels.sort_by(|a, b| {
            a.r_id_number()
                .cmp(&b.r_id_number())
                .then_with(|| a.r_id().cmp(b.r_id()))
        });

        for rel in rels {
            let target_mode = if rel.is_external() {
                r#" TargetMode="External""#
            } else {
                ""
            };

            write!(
                xml,
                r#"<Relationship Id="{}" Type="{}" Target="{}"{}/>"#,
                escape_xml(rel.r_id()),
                escape_xml(rel.reltype()),
                escape_xml(rel.target_ref()),
                target_mode
            )?;
        }

        xml.push_str("</Relationships>");
        Ok(xml)
    }
}

impl Default for Relationships {
    fn default() -> Self {
        Self::new("/".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_r_id_fills_gaps() {
        let mut rels = Relationships::new("/ppt".to_string());
        assert_eq!(rels.next_r_id(), "rId1");

        rels.add_relationship("t".into(), "a".into(), "rId1".into(), false)
            .unwrap();
        rels.add_relationship("t".into(), "b".into(), "rId3".into(), false)
            .unwrap();
        assert_eq!(rels.next_r_id(), "rId2");
    }

    #[test]
    fn test_duplicate_r_id_rejected() {
        let mut rels = Relationships::new("/ppt".to_string());
        rels.add_relationship("t".into(), "a".into(), "rId1".into(), false)
            .unwrap();
        assert!(rels
            .add_relationship("t".into(), "b".into(), "rId1".into(), false)
            .is_err());
    }

    #[test]
    fn test_get_or_add_reuses_matching() {
        let mut rels = Relationships::new("/ppt/slides".to_string());

        assert_eq!(rels.get_or_add("type1", "target1"), "rId1");
        assert_eq!(rels.get_or_add("type1", "target1"), "rId1");
        assert_eq!(rels.get_or_add("type1", "target2"), "rId2");
        // same target but external is a different relationship
        assert_eq!(rels.get_or_add_ext_rel("type1", "target1"), "rId3");
    }

    #[test]
    fn test_target_partname() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        let r_id = rels.get_or_add("layout", "../slideLayouts/slideLayout1.xml");
        let rel = rels.get(&r_id).unwrap();
        assert_eq!(
            rel.target_partname().unwrap().as_str(),
            "/ppt/slideLayouts/slideLayout1.xml"
        );

        let ext = rels.get_or_add_ext_rel("image", "https://example.com/a.png");
        assert!(rels.get(&ext).unwrap().target_partname().is_err());
    }

    #[test]
    fn test_to_xml_numeric_order_and_external_mode() {
        let mut rels = Relationships::new("/ppt/slides".to_string());
        for i in 0..11 {
            rels.get_or_add("t", &format!("part{}.xml", i));
        }
        rels.get_or_add_ext_rel("img", "https://example.com/?a=1&b=2");

        let xml = rels.to_xml().unwrap();
        let pos2 = xml.find(r#"Id="rId2""#).unwrap();
        let pos10 = xml.find(r#"Id="rId10""#).unwrap();
        assert!(pos2 < pos10);
        assert!(xml.contains(r#"Target="https://example.com/?a=1&amp;b=2" TargetMode="External""#));
    }
}
