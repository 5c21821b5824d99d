use serde::Serialize;

use crate::error::Result;
use crate::model::{ComponentRecord, ComponentTable};
use crate::naming::TagNaming;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Relationship {
    ReferencedInDocs,
    UsedInExamples,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedComponent {
    pub name: String,
    pub tag: String,
    pub relationship: Relationship,
    pub action: String,
}

/// Target components that the anchor's documentation or storybook examples mention.
///
/// Documentation hits come first (table order), then example tags (example order, then
/// occurrence order). The list is de-duplicated by simple name, first occurrence wins, and
/// never contains the anchor itself.
pub fn detect_related(
    anchor_name: &str,
    anchor: &ComponentRecord,
    table: &ComponentTable,
    naming: &TagNaming,
) -> Result<Vec<RelatedComponent>> {
    let anchor_tag = naming.tag_for(anchor_name);
    let mut related: Vec<RelatedComponent> = Vec::new();

    if !anchor.documentation.is_empty() {
        for key in table.keys() {
            let tag = naming.tag_of_key(key);
            if tag.is_empty() || tag == anchor_tag {
                continue;
            }
            if anchor.documentation.contains(tag) {
                let name = naming.simple_name(key);
                push_related(
                    &mut related,
                    (anchor_name, anchor_tag.as_str()),
                    name,
                    tag,
                    Relationship::ReferencedInDocs,
                );
            }
        }
    }

    for example in anchor.examples() {
        for tag in modus_migrate_markup::extract_prefixed_tags(example, naming.prefix())? {
            if tag == anchor_tag {
                continue;
            }
            let name = naming.simple_name(&tag).to_string();
            push_related(
                &mut related,
                (anchor_name, anchor_tag.as_str()),
                &name,
                &tag,
                Relationship::UsedInExamples,
            );
        }
    }

    log::debug!("{} related components for {anchor_tag}", related.len());
    Ok(related)
}

fn push_related(
    related: &mut Vec<RelatedComponent>,
    (anchor_name, anchor_tag): (&str, &str),
    name: &str,
    tag: &str,
    relationship: Relationship,
) {
    if name.is_empty() || name == anchor_name || related.iter().any(|r| r.name == name) {
        return;
    }
    let action = match relationship {
        Relationship::ReferencedInDocs => {
            format!("Review '{tag}'; the '{anchor_tag}' documentation refers to it")
        }
        Relationship::UsedInExamples => {
            format!("Migrate '{tag}' alongside '{anchor_tag}'; they are used together in examples")
        }
    };
    related.push(RelatedComponent {
        name: name.to_string(),
        tag: tag.to_string(),
        relationship,
        action,
    });
}
