//! `Tag` <-> `TagEntity` mapping.

use crate::entity::tag_entity::TagEntity;
use crate::mapper::Mapper;
use crate::model::tag::Tag;

/// Maps tags. Rows with blank names have no domain form.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagMapper;

impl Mapper<Tag, TagEntity> for TagMapper {
    fn to_domain(&self, entity: &TagEntity) -> Option<Tag> {
        Tag::new(&entity.name)
    }

    fn to_entity(&self, domain: &Tag) -> TagEntity {
        TagEntity::unsaved(domain.name())
    }
}

#[cfg(test)]
mod tests {
    use super::TagMapper;
    use crate::entity::tag_entity::TagEntity;
    use crate::mapper::Mapper;
    use crate::model::tag::Tag;

    #[test]
    fn to_domain_drops_row_id_and_normalizes_name() {
        let entity = TagEntity {
            id: Some(12),
            name: "Inbox".to_string(),
        };
        let tag = TagMapper.to_domain(&entity).expect("tag should map");
        assert_eq!(tag.name(), "inbox");
    }

    #[test]
    fn blank_rows_have_no_domain_form() {
        let entity = TagEntity::unsaved("   ");
        assert_eq!(TagMapper.to_domain(&entity), None);
    }

    #[test]
    fn to_entity_is_unsaved() {
        let tag = Tag::new("later").expect("tag should be valid");
        assert_eq!(TagMapper.to_entity(&tag), TagEntity::unsaved("later"));
    }
}
