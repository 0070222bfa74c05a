//! Signature-field removal.
//!
//! Pipeline: locate AcroForm, locate Fields, partition fields by the
//! presence of a `V` entry, cascade-delete the signature fields, rebuild the
//! `Fields` array with the survivors, strip `SigFlags`, strip a
//! signature-typed `Perms/DocMDP`, then compact.
//!
//! This pass aborts on the first error; the locate/validate steps run before
//! any mutation, so a missing AcroForm or Fields leaves the graph untouched.

use crate::engine::Optimizer;
use crate::error::{Error, Result};
use crate::graph::DocumentGraph;
use crate::object::Object;

/// Remove every signature field from the document.
///
/// A field counts as a signature field iff its dictionary has a `V` (value)
/// entry; no signature sub-dictionary is inspected. Signature fields are
/// cascade-deleted together with their `V` subgraph and any annotation
/// wrapper object; the remaining fields are placed into a freshly built
/// `Fields` array.
pub fn remove_signatures(graph: &mut DocumentGraph, optimizer: &dyn Optimizer) -> Result<()> {
    let root = graph.catalog_ref()?;
    let catalog = graph.catalog()?;

    let acroform = catalog
        .get("AcroForm")
        .cloned()
        .ok_or(Error::AcroFormNotFound)?;
    let acroform_dict = graph.dereference_dict(&acroform)?;

    let fields = acroform_dict
        .get("Fields")
        .cloned()
        .ok_or(Error::FieldsNotFound)?;
    let fields = graph.dereference_array(&fields)?.to_vec();

    let mut kept = Vec::new();
    let mut doomed = Vec::new();
    for field in fields {
        let field_dict = graph.dereference_dict(&field)?;
        if field_dict.contains_key("V") {
            doomed.push(field);
        } else {
            kept.push(field);
        }
    }

    log::debug!(
        "removing {} signature field(s), keeping {}",
        doomed.len(),
        kept.len()
    );
    for field in &doomed {
        graph.delete_object_graph(field)?;
    }

    graph.replace_collection(root, &["AcroForm"], "Fields", kept)?;
    if let Some(acroform_dict) = graph.dict_path_mut(root, &["AcroForm"])? {
        acroform_dict.delete("SigFlags");
    }

    strip_doc_mdp(graph)?;

    optimizer.compact(graph)
}

/// Remove a signature-typed `DocMDP` sub-entry from the catalog's `Perms`.
///
/// Sealed documents carry the certification signature under
/// `Perms/DocMDP`; when its dictionary's `Type` is `/Sig`, the target
/// object is cascade-deleted and the `DocMDP` key stripped. A missing
/// `Perms` or `DocMDP` is not an error.
fn strip_doc_mdp(graph: &mut DocumentGraph) -> Result<()> {
    let root = graph.catalog_ref()?;
    let catalog = graph.catalog()?;

    let perms = match catalog.get("Perms") {
        Some(obj) => obj.clone(),
        None => return Ok(()),
    };
    let perms_dict = graph.dereference_dict(&perms)?;

    let doc_mdp = match perms_dict.get("DocMDP") {
        Some(obj) => obj.clone(),
        None => return Ok(()),
    };
    let doc_mdp_dict = graph.dereference_dict(&doc_mdp)?;

    let is_signature = matches!(
        doc_mdp_dict.get("Type"),
        Some(Object::Name(n)) if n == "Sig"
    );
    if !is_signature {
        return Ok(());
    }

    log::debug!("stripping signature-typed DocMDP from Perms");
    graph.delete_object_graph(&doc_mdp)?;
    if let Some(perms_dict) = graph.dict_path_mut(root, &["Perms"])? {
        perms_dict.delete("DocMDP");
    }
    Ok(())
}
