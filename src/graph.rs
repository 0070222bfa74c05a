//! Document object graph.
//!
//! The graph is an arena keyed by `(object number, generation)` with explicit
//! free-slot marking: "deleted" is a first-class, inspectable state rather
//! than an object becoming unreachable by chance. A reader populates the
//! graph at load time; the mutation operations live in [`crate::mutate`];
//! the external optimizer/writer compacts and flushes it.
//!
//! All operations in this module are read-only on the table and safe to call
//! concurrently from multiple read-only passes. Interleaving them with a
//! mutation elsewhere is the caller's responsibility to avoid.

use crate::error::{Error, Result};
use crate::object::{Dict, IndirectObject, Object, ObjectRef};
use std::collections::HashMap;
use std::fmt::Write as _;

/// A table slot: occupied by a live object, or freed earlier in this session.
///
/// Freed slots are marked, never reused, within a processing session.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    /// Slot holds a live object.
    Occupied(IndirectObject),
    /// Slot was freed; the pair is invalid for the rest of the session.
    Free,
}

/// The table of live objects for one document, plus its trailer.
///
/// One graph is owned exclusively by one processing session (one input
/// document). There is no internal locking; mutating passes must be
/// serialized by the caller.
#[derive(Debug, Clone, Default)]
pub struct DocumentGraph {
    table: HashMap<ObjectRef, Slot>,
    trailer: Dict,
}

impl DocumentGraph {
    /// Create an empty graph with the given trailer dictionary.
    pub fn new(trailer: Dict) -> Self {
        Self {
            table: HashMap::new(),
            trailer,
        }
    }

    /// Register an indirect object under its own slot.
    ///
    /// Used by readers while populating the graph. Inserting into a slot that
    /// was freed earlier in the session fails with [`Error::FreedSlotReuse`];
    /// the pair must not be silently reused as a different object.
    pub fn insert(&mut self, obj: IndirectObject) -> Result<()> {
        let r = obj.own_ref;
        if matches!(self.table.get(&r), Some(Slot::Free)) {
            return Err(Error::FreedSlotReuse(r));
        }
        self.table.insert(r, Slot::Occupied(obj));
        Ok(())
    }

    /// The trailer dictionary.
    pub fn trailer(&self) -> &Dict {
        &self.trailer
    }

    /// The trailer dictionary, mutably.
    pub fn trailer_mut(&mut self) -> &mut Dict {
        &mut self.trailer
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.table
            .values()
            .filter(|s| matches!(s, Slot::Occupied(_)))
            .count()
    }

    /// Whether the graph has no occupied slots.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the slot for `r` is occupied.
    pub fn contains(&self, r: ObjectRef) -> bool {
        matches!(self.table.get(&r), Some(Slot::Occupied(_)))
    }

    /// Whether the slot for `r` was freed in this session.
    pub fn is_freed(&self, r: ObjectRef) -> bool {
        matches!(self.table.get(&r), Some(Slot::Free))
    }

    /// Iterate occupied slots in unspecified order.
    pub fn occupied(&self) -> impl Iterator<Item = &IndirectObject> {
        self.table.values().filter_map(|s| match s {
            Slot::Occupied(obj) => Some(obj),
            Slot::Free => None,
        })
    }

    pub(crate) fn table_mut(&mut self) -> &mut HashMap<ObjectRef, Slot> {
        &mut self.table
    }

    /// Follow one level of indirection.
    ///
    /// Fails with [`Error::UnresolvedReference`] if the slot is empty, freed,
    /// or unknown. Nested references inside the returned value are not
    /// resolved.
    pub fn resolve(&self, r: ObjectRef) -> Result<&Object> {
        match self.table.get(&r) {
            Some(Slot::Occupied(obj)) => Ok(&obj.object),
            _ => Err(Error::UnresolvedReference(r)),
        }
    }

    /// Resolve `r` and require a dictionary (or a stream's dictionary).
    pub fn resolve_dict(&self, r: ObjectRef) -> Result<&Dict> {
        let obj = self.resolve(r)?;
        obj.as_dict().ok_or_else(|| type_mismatch("Dictionary", obj))
    }

    /// Resolve a value to a dictionary.
    ///
    /// If `value` is a reference it is resolved first; the result must be a
    /// dictionary or a stream (whose dictionary is returned).
    pub fn dereference_dict<'a>(&'a self, value: &'a Object) -> Result<&'a Dict> {
        let obj = match value {
            Object::Reference(r) => self.resolve(*r)?,
            other => other,
        };
        obj.as_dict().ok_or_else(|| type_mismatch("Dictionary", obj))
    }

    /// Resolve a value to an array.
    pub fn dereference_array<'a>(&'a self, value: &'a Object) -> Result<&'a [Object]> {
        let obj = match value {
            Object::Reference(r) => self.resolve(*r)?,
            other => other,
        };
        obj.as_array().ok_or_else(|| type_mismatch("Array", obj))
    }

    /// The slot of the document catalog, from the trailer's `Root` entry.
    pub fn catalog_ref(&self) -> Result<ObjectRef> {
        match self.trailer.get("Root") {
            Some(Object::Reference(r)) => Ok(*r),
            _ => Err(Error::MissingRoot),
        }
    }

    /// The document catalog dictionary.
    pub fn catalog(&self) -> Result<&Dict> {
        self.resolve_dict(self.catalog_ref()?)
    }

    /// Human-readable dump of the whole graph, for diagnostics.
    ///
    /// Uses the debug forms only, never the exact lexical form. Slots are
    /// listed in `(id, gen)` order; freed slots are shown as `free`.
    pub fn debug_dump(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "trailer: {}", self.trailer);
        let _ = writeln!(
            out,
            "{} objects, {} freed",
            self.len(),
            self.table.len() - self.len()
        );
        let mut refs: Vec<_> = self.table.keys().copied().collect();
        refs.sort();
        for r in refs {
            match &self.table[&r] {
                Slot::Occupied(obj) => {
                    let _ = writeln!(out, "{} {} obj: {}", r.id, r.gen, obj.object);
                },
                Slot::Free => {
                    let _ = writeln!(out, "{} {} obj: free", r.id, r.gen);
                },
            }
        }
        out
    }
}

pub(crate) fn type_mismatch(expected: &str, found: &Object) -> Error {
    Error::TypeMismatch {
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_with_catalog() -> DocumentGraph {
        let mut trailer = Dict::new();
        trailer.set("Root", Object::Reference(ObjectRef::new(1, 0)));
        let mut graph = DocumentGraph::new(trailer);

        let mut catalog = Dict::new();
        catalog.set("Type", Object::name("Catalog"));
        graph
            .insert(IndirectObject::new(
                Object::Dictionary(catalog),
                ObjectRef::new(1, 0),
            ))
            .unwrap();
        graph
    }

    #[test]
    fn test_resolve_known_object() {
        let graph = graph_with_catalog();
        let obj = graph.resolve(ObjectRef::new(1, 0)).unwrap();
        assert_eq!(obj.kind(), "Dictionary");
    }

    #[test]
    fn test_resolve_unknown_slot() {
        let graph = graph_with_catalog();
        match graph.resolve(ObjectRef::new(99, 0)) {
            Err(Error::UnresolvedReference(r)) => assert_eq!(r, ObjectRef::new(99, 0)),
            other => panic!("expected UnresolvedReference, got {:?}", other),
        }
    }

    #[test]
    fn test_resolve_is_one_level() {
        let mut graph = graph_with_catalog();
        graph
            .insert(IndirectObject::new(
                Object::Reference(ObjectRef::new(1, 0)),
                ObjectRef::new(2, 0),
            ))
            .unwrap();
        // a reference payload comes back as-is, not chased
        let obj = graph.resolve(ObjectRef::new(2, 0)).unwrap();
        assert_eq!(obj.as_reference(), Some(ObjectRef::new(1, 0)));
    }

    #[test]
    fn test_dereference_dict_direct_and_via_reference() {
        let graph = graph_with_catalog();
        let via_ref = Object::Reference(ObjectRef::new(1, 0));
        assert!(graph.dereference_dict(&via_ref).is_ok());

        let mut inline = Dict::new();
        inline.set("K", Object::Integer(1));
        let direct = Object::Dictionary(inline);
        assert_eq!(graph.dereference_dict(&direct).unwrap().len(), 1);
    }

    #[test]
    fn test_dereference_dict_type_mismatch() {
        let graph = graph_with_catalog();
        match graph.dereference_dict(&Object::Integer(3)) {
            Err(Error::TypeMismatch { expected, found }) => {
                assert_eq!(expected, "Dictionary");
                assert_eq!(found, "Integer");
            },
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_dereference_array() {
        let mut graph = graph_with_catalog();
        graph
            .insert(IndirectObject::new(
                Object::Array(vec![Object::Integer(1), Object::Integer(2)]),
                ObjectRef::new(5, 0),
            ))
            .unwrap();
        let value = Object::Reference(ObjectRef::new(5, 0));
        let arr = graph.dereference_array(&value).unwrap();
        assert_eq!(arr.len(), 2);
    }

    #[test]
    fn test_catalog() {
        let graph = graph_with_catalog();
        let catalog = graph.catalog().unwrap();
        assert_eq!(catalog.get("Type").unwrap().as_name(), Some("Catalog"));
    }

    #[test]
    fn test_missing_root() {
        let graph = DocumentGraph::new(Dict::new());
        assert!(matches!(graph.catalog(), Err(Error::MissingRoot)));
    }

    #[test]
    fn test_stream_dict_through_dereference() {
        use crate::object::Stream;
        let mut graph = graph_with_catalog();
        let stream = Stream::new(&b"data"[..], ObjectRef::new(8, 0));
        graph
            .insert(IndirectObject::new(Object::Stream(stream), ObjectRef::new(8, 0)))
            .unwrap();
        let value = Object::Reference(ObjectRef::new(8, 0));
        let dict = graph.dereference_dict(&value).unwrap();
        assert_eq!(dict.get("Length").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn test_freed_slot_not_reusable() {
        let mut graph = graph_with_catalog();
        graph.delete_object(ObjectRef::new(1, 0));
        assert!(graph.is_freed(ObjectRef::new(1, 0)));
        let err = graph.insert(IndirectObject::new(Object::Null, ObjectRef::new(1, 0)));
        assert!(matches!(err, Err(Error::FreedSlotReuse(_))));
    }

    #[test]
    fn test_debug_dump_lists_slots() {
        let mut graph = graph_with_catalog();
        graph
            .insert(IndirectObject::new(Object::Integer(7), ObjectRef::new(3, 0)))
            .unwrap();
        graph.delete_object(ObjectRef::new(3, 0));
        let dump = graph.debug_dump();
        assert!(dump.contains("trailer:"));
        assert!(dump.contains("1 0 obj:"));
        assert!(dump.contains("3 0 obj: free"));
    }
}
