//! PDF object types.
//!
//! The closed set of primitive value kinds, the insertion-ordered dictionary,
//! and the indirect-object wrapper registered in the document graph.
//!
//! Every kind has two textual forms that are deliberately independent:
//! [`std::fmt::Display`] is a human-readable debug form used by diagnostics
//! and the graph dump, while [`Object::write_syntax`] is the byte-exact
//! lexical form of the PDF grammar. Streams and indirect objects never inline
//! their definition in the exact form; at point of use they are written as
//! `<id> <gen> R` and the external writer emits the full definition once when
//! flushing the object table.

use crate::error::{Error, Result};
use crate::syntax;
use bytes::Bytes;
use indexmap::IndexMap;
use std::fmt;
use std::io::Write;

/// Reference to an indirect object, by identity.
///
/// Two references with the same `(id, gen)` pair denote the same live object
/// only while that slot is occupied in the document graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectRef {
    /// Object number
    pub id: u32,
    /// Generation number
    pub gen: u16,
}

impl ObjectRef {
    /// Create a new object reference.
    pub fn new(id: u32, gen: u16) -> Self {
        Self { id, gen }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} R", self.id, self.gen)
    }
}

/// PDF object representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Null object
    Null,
    /// Boolean value
    Boolean(bool),
    /// Integer value
    Integer(i64),
    /// Real (floating-point) value
    Real(f64),
    /// String (byte array), literal or hex-encoded
    String {
        /// Raw string bytes
        bytes: Vec<u8>,
        /// Whether the exact form uses hex syntax `<...>` instead of `(...)`
        hex: bool,
    },
    /// Name (written with a leading `/`)
    Name(String),
    /// Array of objects
    Array(Vec<Object>),
    /// Dictionary (insertion-ordered key-value pairs)
    Dictionary(Dict),
    /// Stream (dictionary + raw payload), always indirect
    Stream(Stream),
    /// Indirect object reference
    Reference(ObjectRef),
}

impl Object {
    /// Create a literal string object.
    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        Object::String {
            bytes: s.into(),
            hex: false,
        }
    }

    /// Create a hex string object.
    pub fn hex_string(s: impl Into<Vec<u8>>) -> Self {
        Object::String {
            bytes: s.into(),
            hex: true,
        }
    }

    /// Create a name object.
    pub fn name(s: impl Into<String>) -> Self {
        Object::Name(s.into())
    }

    /// Get the kind name of this object (without data).
    pub fn kind(&self) -> &'static str {
        match self {
            Object::Null => "Null",
            Object::Boolean(_) => "Boolean",
            Object::Integer(_) => "Integer",
            Object::Real(_) => "Real",
            Object::String { .. } => "String",
            Object::Name(_) => "Name",
            Object::Array(_) => "Array",
            Object::Dictionary(_) => "Dictionary",
            Object::Stream(_) => "Stream",
            Object::Reference(_) => "Reference",
        }
    }

    /// Try to cast to integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to cast to name.
    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(s) => Some(s),
            _ => None,
        }
    }

    /// Try to cast to dictionary. Works for both Dictionary and Stream objects.
    pub fn as_dict(&self) -> Option<&Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&s.dict),
            _ => None,
        }
    }

    /// Try to cast to a mutable dictionary. Works for Dictionary and Stream objects.
    pub fn as_dict_mut(&mut self) -> Option<&mut Dict> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream(s) => Some(&mut s.dict),
            _ => None,
        }
    }

    /// Try to cast to array.
    pub fn as_array(&self) -> Option<&[Object]> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to cast to reference.
    pub fn as_reference(&self) -> Option<ObjectRef> {
        match self {
            Object::Reference(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to cast to real number.
    pub fn as_real(&self) -> Option<f64> {
        match self {
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    /// Try to cast to string bytes.
    pub fn as_string_bytes(&self) -> Option<&[u8]> {
        match self {
            Object::String { bytes, .. } => Some(bytes),
            _ => None,
        }
    }

    /// Check if object is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    /// Write the byte-exact lexical form of this object.
    ///
    /// Streams are written purely as a reference to their own slot.
    pub fn write_syntax<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        match self {
            Object::Null => write!(w, "null"),
            Object::Boolean(b) => write!(w, "{}", if *b { "true" } else { "false" }),
            Object::Integer(i) => write!(w, "{}", i),
            Object::Real(r) => write_real(w, *r),
            Object::String { bytes, hex } => {
                if *hex {
                    write!(w, "<")?;
                    for b in bytes {
                        write!(w, "{:02x}", b)?;
                    }
                    write!(w, ">")
                } else {
                    write!(w, "(")?;
                    w.write_all(&syntax::escape_string_literal(bytes))?;
                    write!(w, ")")
                }
            },
            Object::Name(n) => write!(w, "/{}", syntax::escape_name(n.as_bytes())),
            Object::Array(arr) => {
                write!(w, "[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(w, " ")?;
                    }
                    obj.write_syntax(w)?;
                }
                write!(w, "]")
            },
            Object::Dictionary(dict) => dict.write_syntax(w),
            Object::Stream(s) => write!(w, "{}", s.own_ref),
            Object::Reference(r) => write!(w, "{}", r),
        }
    }

    /// The byte-exact lexical form as a string.
    pub fn syntax_string(&self) -> String {
        let mut buf = Vec::new();
        // writing into a Vec cannot fail
        self.write_syntax(&mut buf).unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// Write a real number so that it re-parses to the same value.
///
/// Integral values print without a fraction; others use the shortest
/// round-trippable decimal form.
fn write_real<W: Write>(w: &mut W, value: f64) -> std::io::Result<()> {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        write!(w, "{}", value as i64)
    } else {
        write!(w, "{}", value)
    }
}

impl fmt::Display for Object {
    /// Human-readable debug form. Never used for serialization.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::Integer(i) => write!(f, "{}", i),
            Object::Real(r) => write!(f, "{}", r),
            Object::String { bytes, .. } => {
                write!(f, "{}", String::from_utf8_lossy(bytes))
            },
            Object::Name(n) => write!(f, "/{}", n),
            Object::Array(arr) => {
                write!(f, "[")?;
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", obj)?;
                }
                write!(f, "]")
            },
            Object::Dictionary(dict) => write!(f, "{}", dict),
            Object::Stream(s) => write!(f, "Stream({} bytes)", s.data.len()),
            Object::Reference(r) => write!(f, "Ref({} {})", r.id, r.gen),
        }
    }
}

/// Insertion-ordered PDF dictionary.
///
/// Key iteration yields first-insertion order; re-setting an existing key
/// updates the value in place without reordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dict {
    entries: IndexMap<String, Object>,
}

impl Dict {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update the value for a key, preserving key order.
    pub fn set(&mut self, key: impl Into<String>, value: Object) {
        self.entries.insert(key.into(), value);
    }

    /// Remove a key if present. Absent keys are a no-op, not an error.
    ///
    /// The order of the remaining keys is preserved.
    pub fn delete(&mut self, key: &str) -> Option<Object> {
        self.entries.shift_remove(key)
    }

    /// Look up the value for a key.
    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    /// Look up the value for a key, mutably.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Object)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the byte-exact lexical form, entries in insertion order.
    pub fn write_syntax<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "<<")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(w, " ")?;
            }
            write!(w, "/{} ", syntax::escape_name(key.as_bytes()))?;
            value.write_syntax(w)?;
        }
        write!(w, ">>")
    }
}

impl fmt::Display for Dict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dict(")?;
        for (key, value) in self.iter() {
            write!(f, "\"/{}\": {}, ", key, value)?;
        }
        write!(f, ")")
    }
}

impl FromIterator<(String, Object)> for Dict {
    fn from_iter<T: IntoIterator<Item = (String, Object)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Stream object: a dictionary that owns a raw payload.
///
/// The declared `Length` entry always equals the payload's byte length;
/// constructors enforce this.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    /// Stream dictionary
    pub dict: Dict,
    /// Raw payload bytes
    pub data: Bytes,
    /// The slot this stream occupies in the document graph
    pub own_ref: ObjectRef,
}

impl Stream {
    /// Create a stream with a fresh dictionary carrying the payload length.
    pub fn new(data: impl Into<Bytes>, own_ref: ObjectRef) -> Self {
        let data = data.into();
        let mut dict = Dict::new();
        dict.set("Length", Object::Integer(data.len() as i64));
        Self {
            dict,
            data,
            own_ref,
        }
    }

    /// Create a stream from an existing dictionary, validating `Length`.
    ///
    /// A missing `Length` entry is filled in; a present one must be a
    /// non-negative integer equal to the payload length.
    pub fn with_dict(mut dict: Dict, data: impl Into<Bytes>, own_ref: ObjectRef) -> Result<Self> {
        let data = data.into();
        match dict.get("Length") {
            None => dict.set("Length", Object::Integer(data.len() as i64)),
            Some(Object::Integer(n)) if *n < 0 => {
                return Err(Error::InvalidStream(format!("negative Length {}", n)));
            },
            Some(Object::Integer(n)) if *n as u64 != data.len() as u64 => {
                return Err(Error::InvalidStream(format!(
                    "declared Length {} does not match payload of {} bytes",
                    n,
                    data.len()
                )));
            },
            Some(Object::Integer(_)) => {},
            Some(other) => {
                return Err(Error::TypeMismatch {
                    expected: "Integer".to_string(),
                    found: other.kind().to_string(),
                });
            },
        }
        Ok(Self {
            dict,
            data,
            own_ref,
        })
    }
}

/// The table-registered wrapper around any object.
///
/// At point of use an indirect object serializes purely as `<id> <gen> R`;
/// the full definition is emitted once by the external writer.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    /// The wrapped payload
    pub object: Object,
    /// The slot this object occupies in the document graph
    pub own_ref: ObjectRef,
}

impl IndirectObject {
    /// Wrap an object for registration under the given slot.
    pub fn new(object: Object, own_ref: ObjectRef) -> Self {
        Self { object, own_ref }
    }

    /// Write the point-of-use form (`<id> <gen> R`).
    pub fn write_syntax<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        write!(w, "{}", self.own_ref)
    }
}

impl fmt::Display for IndirectObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Indirect({})", self.object)
    }
}
