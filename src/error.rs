//! Error types for the redaction library.
//!
//! This module defines all error types that can occur while resolving and
//! mutating the document object graph or running a redaction pass.

/// Result type alias for redaction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during PDF redaction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The trailer has no usable `Root` entry
    #[error("Document catalog not found: trailer has no Root reference")]
    MissingRoot,

    /// The catalog has no `AcroForm` entry
    #[error("AcroForm dictionary not found in document catalog")]
    AcroFormNotFound,

    /// The AcroForm dictionary has no `Fields` entry
    #[error("Fields array not found in AcroForm dictionary")]
    FieldsNotFound,

    /// A dictionary entry the caller required is absent
    #[error("Entry not found: {0}")]
    NotFound(String),

    /// Reference points at an empty, freed, or unknown slot
    #[error("Unresolved reference: {0}")]
    UnresolvedReference(crate::object::ObjectRef),

    /// A nested reference inside a cascading delete could not be resolved.
    ///
    /// Slots already freed by the same cascade stay freed; the graph is left
    /// partially mutated and the caller must treat the document as suspect.
    #[error("Dangling reference during cascade: {0}")]
    DanglingReference(crate::object::ObjectRef),

    /// Attempt to register an object into a slot freed earlier in the session
    #[error("Slot {0} was freed in this session and cannot be reused")]
    FreedSlotReuse(crate::object::ObjectRef),

    /// Checked deletion refused to free a slot that other objects still reference
    #[error("Object {0} is still referenced elsewhere in the graph")]
    SharedReference(crate::object::ObjectRef),

    /// Dereference target has the wrong object kind
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected object kind
        expected: String,
        /// Actual object kind found
        found: String,
    },

    /// Stream dictionary is inconsistent with its payload
    #[error("Invalid stream: {0}")]
    InvalidStream(String),

    /// Image encoding error from the raster containment step
    #[error("Image error: {0}")]
    Image(String),

    /// Opaque failure surfaced from a reader/writer/optimizer collaborator
    #[error("External collaborator error: {0}")]
    External(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
