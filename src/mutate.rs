//! Structural edits on the document graph.
//!
//! Entry edits, collection rebuilds, and object deletion. Deletion here is
//! deliberately unchecked: [`DocumentGraph::delete_object`] and the cascade
//! in [`DocumentGraph::delete_object_graph`] free slots without scanning for
//! other live references, matching the source behavior. Callers that cannot
//! guarantee exclusive ownership of a subgraph either accept dangling
//! references (which fail loudly on the next resolve) or opt into
//! [`DocumentGraph::delete_object_checked`].
//!
//! Nothing in this module is transactional. A cascade that fails partway
//! leaves earlier deletions in place; the caller must treat the whole
//! document as suspect rather than retry the pass.

use crate::error::{Error, Result};
use crate::graph::{type_mismatch, DocumentGraph, Slot};
use crate::object::{Dict, Object, ObjectRef};
use std::collections::HashSet;

impl DocumentGraph {
    /// Resolve `r` to its payload, mutably.
    pub fn resolve_mut(&mut self, r: ObjectRef) -> Result<&mut Object> {
        match self.table_mut().get_mut(&r) {
            Some(Slot::Occupied(obj)) => Ok(&mut obj.object),
            _ => Err(Error::UnresolvedReference(r)),
        }
    }

    /// Resolve `r` and require a dictionary (or a stream's dictionary), mutably.
    pub fn resolve_dict_mut(&mut self, r: ObjectRef) -> Result<&mut Dict> {
        match self.resolve_mut(r)? {
            Object::Dictionary(d) => Ok(d),
            Object::Stream(s) => Ok(&mut s.dict),
            other => Err(type_mismatch("Dictionary", other)),
        }
    }

    /// Walk a chain of dictionary-valued entries, read-only.
    ///
    /// Starting from the dictionary in slot `owner`, follows `path` one key
    /// at a time; each hop may be an inline dictionary or an indirect
    /// reference to one. Returns `None` if any key along the path is absent;
    /// fails with `TypeMismatch` if a present hop is not dictionary-shaped.
    pub fn dict_path<'a>(&'a self, owner: ObjectRef, path: &[&str]) -> Result<Option<&'a Dict>> {
        let mut cur = self.resolve_dict(owner)?;
        for key in path {
            cur = match cur.get(key) {
                None => return Ok(None),
                Some(Object::Reference(r)) => self.resolve_dict(*r)?,
                Some(Object::Dictionary(d)) => d,
                Some(other) => return Err(type_mismatch("Dictionary", other)),
            };
        }
        Ok(Some(cur))
    }

    /// Walk a chain of dictionary-valued entries and return the terminal
    /// dictionary mutably.
    ///
    /// Same traversal rules as [`DocumentGraph::dict_path`]. The walk is
    /// resolved read-only first, then re-entered mutably from the deepest
    /// indirect hop.
    pub fn dict_path_mut(&mut self, owner: ObjectRef, path: &[&str]) -> Result<Option<&mut Dict>> {
        // phase 1: locate the deepest indirect anchor and the inline tail
        let mut anchor = owner;
        let mut tail_start = 0;
        {
            let mut cur = self.resolve_dict(anchor)?;
            for (i, key) in path.iter().enumerate() {
                match cur.get(key) {
                    None => return Ok(None),
                    Some(Object::Reference(r)) => {
                        anchor = *r;
                        tail_start = i + 1;
                        cur = self.resolve_dict(anchor)?;
                    },
                    Some(Object::Dictionary(d)) => cur = d,
                    Some(other) => return Err(type_mismatch("Dictionary", other)),
                }
            }
        }

        // phase 2: re-enter mutably along the inline tail
        let mut dict = self.resolve_dict_mut(anchor)?;
        for key in &path[tail_start..] {
            dict = match dict.get_mut(key) {
                Some(Object::Dictionary(d)) => d,
                _ => return Err(Error::NotFound((*key).to_string())),
            };
        }
        Ok(Some(dict))
    }

    /// Atomically swap an array-valued entry for a freshly built array.
    ///
    /// `path` addresses the dictionary holding the entry (as in
    /// [`DocumentGraph::dict_path`]); `key` names the collection. If the
    /// entry is an indirect reference, the referenced array object's payload
    /// is replaced in its slot; if inline, the entry is replaced in place.
    /// A half-updated collection is never observable.
    pub fn replace_collection(
        &mut self,
        owner: ObjectRef,
        path: &[&str],
        key: &str,
        items: Vec<Object>,
    ) -> Result<()> {
        let target = {
            let dict = self
                .dict_path(owner, path)?
                .ok_or_else(|| Error::NotFound(path.join("/")))?;
            match dict.get(key) {
                None => return Err(Error::NotFound(key.to_string())),
                Some(Object::Reference(r)) => Some(*r),
                Some(Object::Array(_)) => None,
                Some(other) => return Err(type_mismatch("Array", other)),
            }
        };
        match target {
            Some(r) => {
                let obj = self.resolve_mut(r)?;
                if !matches!(obj, Object::Array(_)) {
                    return Err(type_mismatch("Array", obj));
                }
                *obj = Object::Array(items);
            },
            None => {
                let dict = self
                    .dict_path_mut(owner, path)?
                    .ok_or_else(|| Error::NotFound(path.join("/")))?;
                dict.set(key, Object::Array(items));
            },
        }
        Ok(())
    }

    /// Free the slot for `r` unconditionally.
    ///
    /// Does NOT check for other live references to the same slot. Any other
    /// owner is left holding a dangling reference that fails on its next
    /// resolve. Freeing an unknown slot still marks the pair invalid for the
    /// rest of the session.
    pub fn delete_object(&mut self, r: ObjectRef) {
        self.table_mut().insert(r, Slot::Free);
    }

    /// Free the slot for `r` only if nothing else references it.
    ///
    /// Opt-in safety mode: scans the live table and the trailer for in-edges
    /// to `r` and fails with [`Error::SharedReference`] instead of creating
    /// dangling pointers.
    pub fn delete_object_checked(&mut self, r: ObjectRef) -> Result<()> {
        let trailer_edge = self
            .trailer()
            .iter()
            .any(|(_, v)| references_contain(v, r));
        let shared = trailer_edge
            || self.occupied().any(|obj| {
                obj.own_ref != r && references_contain(&obj.object, r)
            });
        if shared {
            return Err(Error::SharedReference(r));
        }
        self.delete_object(r);
        Ok(())
    }

    /// Cascading delete: free every slot reachable from `value`.
    ///
    /// Resolves `value` if it is a reference, then walks dict entries and
    /// array elements depth-first, freeing each reachable slot exactly once
    /// (a visited set scoped to this call makes cyclic graphs terminate).
    /// The starting slot is freed last.
    ///
    /// Fails with [`Error::DanglingReference`] if a nested reference cannot
    /// be resolved; deletions already performed are NOT rolled back.
    pub fn delete_object_graph(&mut self, value: &Object) -> Result<()> {
        let mut visited = HashSet::new();
        self.delete_reachable(value, &mut visited)
    }

    fn delete_reachable(&mut self, value: &Object, visited: &mut HashSet<ObjectRef>) -> Result<()> {
        match value {
            Object::Reference(r) => {
                let r = *r;
                if !visited.insert(r) {
                    return Ok(());
                }
                let payload = match self.resolve(r) {
                    Ok(obj) => obj.clone(),
                    Err(_) => return Err(Error::DanglingReference(r)),
                };
                self.delete_reachable(&payload, visited)?;
                self.delete_object(r);
                Ok(())
            },
            Object::Array(items) => {
                for item in items {
                    self.delete_reachable(item, visited)?;
                }
                Ok(())
            },
            Object::Dictionary(dict) => {
                for (_, v) in dict.iter() {
                    self.delete_reachable(v, visited)?;
                }
                Ok(())
            },
            Object::Stream(stream) => {
                for (_, v) in stream.dict.iter() {
                    self.delete_reachable(v, visited)?;
                }
                Ok(())
            },
            _ => Ok(()),
        }
    }
}

/// Whether `target` appears as a reference anywhere inside `value`.
fn references_contain(value: &Object, target: ObjectRef) -> bool {
    match value {
        Object::Reference(r) => *r == target,
        Object::Array(items) => items.iter().any(|v| references_contain(v, target)),
        Object::Dictionary(dict) => dict.iter().any(|(_, v)| references_contain(v, target)),
        Object::Stream(stream) => stream
            .dict
            .iter()
            .any(|(_, v)| references_contain(v, target)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::IndirectObject;

    fn r(id: u32) -> ObjectRef {
        ObjectRef::new(id, 0)
    }

    fn insert_dict(graph: &mut DocumentGraph, id: u32, entries: Vec<(&str, Object)>) {
        let mut dict = Dict::new();
        for (k, v) in entries {
            dict.set(k, v);
        }
        graph
            .insert(IndirectObject::new(Object::Dictionary(dict), r(id)))
            .unwrap();
    }

    fn base_graph() -> DocumentGraph {
        let mut trailer = Dict::new();
        trailer.set("Root", Object::Reference(r(1)));
        let mut graph = DocumentGraph::new(trailer);
        insert_dict(&mut graph, 1, vec![("Type", Object::name("Catalog"))]);
        graph
    }

    #[test]
    fn test_delete_object_unconditional() {
        let mut graph = base_graph();
        insert_dict(&mut graph, 2, vec![("Holds", Object::Reference(r(3)))]);
        graph
            .insert(IndirectObject::new(Object::Integer(9), r(3)))
            .unwrap();

        // unchecked: 2 still references 3, delete anyway
        graph.delete_object(r(3));
        assert!(graph.is_freed(r(3)));
        assert!(matches!(
            graph.resolve(r(3)),
            Err(Error::UnresolvedReference(_))
        ));
    }

    #[test]
    fn test_delete_object_checked_refuses_shared() {
        let mut graph = base_graph();
        insert_dict(&mut graph, 2, vec![("Holds", Object::Reference(r(3)))]);
        graph
            .insert(IndirectObject::new(Object::Integer(9), r(3)))
            .unwrap();

        assert!(matches!(
            graph.delete_object_checked(r(3)),
            Err(Error::SharedReference(_))
        ));
        assert!(graph.contains(r(3)));

        // nothing references 2, so checked deletion succeeds
        graph.delete_object_checked(r(2)).unwrap();
        assert!(graph.is_freed(r(2)));
    }

    #[test]
    fn test_delete_object_checked_sees_trailer_edge() {
        let mut graph = base_graph();
        assert!(matches!(
            graph.delete_object_checked(r(1)),
            Err(Error::SharedReference(_))
        ));
    }

    #[test]
    fn test_cascade_frees_exactly_reachable_set() {
        let mut graph = base_graph();
        // 10 -> {11, [12]}, 20 unrelated
        insert_dict(
            &mut graph,
            10,
            vec![
                ("A", Object::Reference(r(11))),
                ("B", Object::Array(vec![Object::Reference(r(12))])),
            ],
        );
        graph
            .insert(IndirectObject::new(Object::Integer(1), r(11)))
            .unwrap();
        graph
            .insert(IndirectObject::new(Object::string("x"), r(12)))
            .unwrap();
        graph
            .insert(IndirectObject::new(Object::Integer(2), r(20)))
            .unwrap();

        graph
            .delete_object_graph(&Object::Reference(r(10)))
            .unwrap();

        for id in [10, 11, 12] {
            assert!(graph.is_freed(r(id)), "object {} should be freed", id);
        }
        assert!(graph.contains(r(20)));
        assert!(graph.contains(r(1)));
    }

    #[test]
    fn test_cascade_terminates_on_cycle() {
        let mut graph = base_graph();
        insert_dict(&mut graph, 10, vec![("Next", Object::Reference(r(11)))]);
        insert_dict(&mut graph, 11, vec![("Prev", Object::Reference(r(10)))]);

        graph
            .delete_object_graph(&Object::Reference(r(10)))
            .unwrap();
        assert!(graph.is_freed(r(10)));
        assert!(graph.is_freed(r(11)));
    }

    #[test]
    fn test_cascade_dangling_is_not_rolled_back() {
        let mut graph = base_graph();
        // array cascades left to right: 11 is freed before 99 fails
        insert_dict(
            &mut graph,
            10,
            vec![(
                "Kids",
                Object::Array(vec![Object::Reference(r(11)), Object::Reference(r(99))]),
            )],
        );
        graph
            .insert(IndirectObject::new(Object::Integer(1), r(11)))
            .unwrap();

        let err = graph.delete_object_graph(&Object::Reference(r(10)));
        assert!(matches!(err, Err(Error::DanglingReference(p)) if p == r(99)));
        assert!(graph.is_freed(r(11)));
        assert!(!graph.is_freed(r(10)));
    }

    #[test]
    fn test_cascade_from_inline_value() {
        let mut graph = base_graph();
        graph
            .insert(IndirectObject::new(Object::Integer(5), r(30)))
            .unwrap();
        let inline = Object::Array(vec![Object::Reference(r(30)), Object::Integer(0)]);
        graph.delete_object_graph(&inline).unwrap();
        assert!(graph.is_freed(r(30)));
    }

    #[test]
    fn test_dict_path_inline_and_indirect_hops() {
        let mut graph = base_graph();
        // page 5: Resources inline, XObject indirect
        let mut xobjects = Dict::new();
        xobjects.set("X0", Object::Reference(r(7)));
        graph
            .insert(IndirectObject::new(Object::Dictionary(xobjects), r(6)))
            .unwrap();
        graph
            .insert(IndirectObject::new(Object::Integer(0), r(7)))
            .unwrap();

        let mut resources = Dict::new();
        resources.set("XObject", Object::Reference(r(6)));
        insert_dict(
            &mut graph,
            5,
            vec![("Resources", Object::Dictionary(resources))],
        );

        let dict = graph
            .dict_path(r(5), &["Resources", "XObject"])
            .unwrap()
            .unwrap();
        assert!(dict.contains_key("X0"));

        let dict = graph
            .dict_path_mut(r(5), &["Resources", "XObject"])
            .unwrap()
            .unwrap();
        dict.delete("X0");
        assert!(!graph
            .resolve_dict(r(6))
            .unwrap()
            .contains_key("X0"));
    }

    #[test]
    fn test_dict_path_absent_key_is_none() {
        let graph = base_graph();
        assert!(graph.dict_path(r(1), &["Missing"]).unwrap().is_none());
    }

    #[test]
    fn test_dict_path_wrong_kind_is_type_mismatch() {
        let mut graph = base_graph();
        insert_dict(&mut graph, 2, vec![("Resources", Object::Integer(4))]);
        assert!(matches!(
            graph.dict_path(r(2), &["Resources", "XObject"]),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_replace_collection_indirect_array() {
        let mut graph = base_graph();
        graph
            .insert(IndirectObject::new(
                Object::Array(vec![Object::Integer(1), Object::Integer(2)]),
                r(4),
            ))
            .unwrap();
        insert_dict(&mut graph, 3, vec![("Fields", Object::Reference(r(4)))]);
        // AcroForm lives inline in the catalog
        let catalog = graph.resolve_dict_mut(r(1)).unwrap();
        catalog.set("AcroForm", Object::Reference(r(3)));

        graph
            .replace_collection(r(1), &["AcroForm"], "Fields", vec![Object::Integer(9)])
            .unwrap();

        let fields_value = Object::Reference(r(4));
        let arr = graph.dereference_array(&fields_value).unwrap();
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0].as_integer(), Some(9));
    }

    #[test]
    fn test_replace_collection_inline_array() {
        let mut graph = base_graph();
        let catalog = graph.resolve_dict_mut(r(1)).unwrap();
        catalog.set("Order", Object::Array(vec![Object::Integer(1)]));

        graph
            .replace_collection(r(1), &[], "Order", vec![])
            .unwrap();
        let catalog = graph.catalog().unwrap();
        assert_eq!(catalog.get("Order").unwrap().as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_replace_collection_absent_key() {
        let mut graph = base_graph();
        assert!(matches!(
            graph.replace_collection(r(1), &[], "Fields", vec![]),
            Err(Error::NotFound(_))
        ));
    }
}
