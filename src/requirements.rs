//! Requirements table extraction

use indexmap::IndexMap;
use log::{debug, info};

use crate::model::{Model, RequirementAnnotation};

/// Collect the requirement annotations of a model, one per id
///
/// Owned annotations are visited in document order regardless of the depth
/// of their owner, followed by annotations found outside any identifiable
/// element. When an id occurs more than once the last occurrence's content
/// wins while the entry keeps the position of the first occurrence.
pub fn extract(model: &Model) -> Vec<RequirementAnnotation> {
    let mut owned: Vec<&RequirementAnnotation> = model
        .index
        .values()
        .flat_map(|entity| entity.annotations.iter())
        .collect();
    owned.sort_by_key(|annotation| annotation.position);
    let annotations = owned.into_iter().chain(model.unowned_annotations.iter());

    let mut table: IndexMap<&str, &RequirementAnnotation> = IndexMap::new();

    let mut total = 0usize;
    for annotation in annotations {
        total += 1;
        if let Some(previous) = table.insert(annotation.id.as_str(), annotation) {
            debug!(
                id = annotation.id.as_str(),
                replaced:% = previous.owner,
                owner:% = annotation.owner;
                "Duplicate requirement id, keeping the later one"
            );
        }
    }

    info!(requirements = table.len(), annotations = total; "Extracted requirements");
    table.into_values().cloned().collect()
}
