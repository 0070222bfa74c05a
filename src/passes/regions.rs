//! Marked-region (QR code) removal.
//!
//! Pipeline: walk the direct children of the root `Pages` node's `Kids`
//! array; for each page with a `Resources/XObject` dictionary, delete the
//! first entry whose name is on the configured allow-list; compact.
//!
//! The walk does not recurse into nested page-tree intermediate nodes. That
//! is a known scope limitation of the behavior being preserved, not a bug.

use crate::config::RedactConfig;
use crate::engine::Optimizer;
use crate::error::{Error, Result};
use crate::graph::DocumentGraph;
use crate::object::Object;

/// Remove allow-listed XObject entries from the document's top-level pages.
///
/// Per page, only the first allow-list name found in the `Resources/XObject`
/// dictionary is deleted, even if more than one could match. A page without
/// `Resources` or `XObject`, or a kid that is not an indirect reference, is
/// logged and skipped.
pub fn remove_marked_regions(
    graph: &mut DocumentGraph,
    config: &RedactConfig,
    optimizer: &dyn Optimizer,
) -> Result<()> {
    let kids = match page_kids(graph) {
        Ok(kids) => kids,
        Err(err) => {
            log::warn!("page tree unavailable, nothing to scan: {}", err);
            Vec::new()
        },
    };

    for kid in kids {
        let page = match kid.as_reference() {
            Some(r) => r,
            None => {
                log::warn!("skipping page-tree child that is not an indirect reference");
                continue;
            },
        };

        match graph.dict_path_mut(page, &["Resources", "XObject"]) {
            Ok(Some(xobjects)) => {
                for name in &config.region_xobject_names {
                    if xobjects.contains_key(name) {
                        log::info!("removing marked-region XObject /{} from page {}", name, page);
                        xobjects.delete(name);
                        break;
                    }
                }
            },
            Ok(None) => {
                log::debug!("page {} has no Resources/XObject dictionary", page);
            },
            Err(err) => {
                log::warn!("skipping page {}: {}", page, err);
            },
        }
    }

    optimizer.compact(graph)
}

/// The direct children of the root `Pages` node.
fn page_kids(graph: &DocumentGraph) -> Result<Vec<Object>> {
    let catalog = graph.catalog()?;
    let pages = catalog
        .get("Pages")
        .ok_or_else(|| Error::NotFound("Pages".to_string()))?;
    let pages_dict = graph.dereference_dict(pages)?;
    let kids = pages_dict
        .get("Kids")
        .ok_or_else(|| Error::NotFound("Kids".to_string()))?;
    Ok(graph.dereference_array(kids)?.to_vec())
}
