/// Relationship ID mapper for tracking relationships during presentation generation.
///
/// Relationships are created before any slide XML is generated, so that the
/// XML can reference the actual ids.
use std::collections::HashMap;

/// Maps shapes to the relationship id of their target (media or chart part).
///
/// Keys are `(slide_index, shape_index)`; each slide has its own set of
/// relationships, so equal ids on different slides are expected.
#[derive(Debug, Default)]
pub(crate) struct RelationshipMapper {
    shape_ids: HashMap<(usize, usize), String>,
}

impl RelationshipMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the relationship id of a shape.
    pub fn add_shape(&mut self, slide_index: usize, shape_index: usize, rel_id: String) {
        self.shape_ids.insert((slide_index, shape_index), rel_id);
    }

    /// Relationship id of a shape, if it has one.
    pub fn get_shape_id(&self, slide_index: usize, shape_index: usize) -> Option<&str> {
        self.shape_ids
            .get(&(slide_index, shape_index))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_per_slide() {
        let mut mapper = RelationshipMapper::new();
        mapper.add_shape(0, 1, "rId2".into());
        mapper.add_shape(1, 1, "rId2".into());
        mapper.add_shape(1, 3, "rId3".into());

        assert_eq!(mapper.get_shape_id(0, 1), Some("rId2"));
        assert_eq!(mapper.get_shape_id(1, 3), Some("rId3"));
        assert_eq!(mapper.get_shape_id(0, 3), None);
    }
}
