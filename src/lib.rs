//! # pdf_redact
//!
//! Structural PDF redaction: remove signature fields, watermarks, and
//! marked regions (QR codes and similar producer stamps) by editing the
//! document's object graph directly.
//!
//! ## What lives here
//!
//! - **Object model** ([`object`]): the closed set of PDF value kinds with a
//!   byte-exact lexical form and an independent debug form.
//! - **Document graph** ([`graph`]): an arena of indirect objects keyed by
//!   `(object number, generation)` with explicit free-slot marking, plus
//!   reference resolution that never silently hands back a freed object.
//! - **Graph mutation** ([`mutate`]): entry edits, collection rebuilds, and
//!   cascading subgraph deletion with shared-reference awareness.
//! - **Redaction passes** ([`passes`]): signature-field removal, watermark
//!   removal, and marked-region removal, each ending in a compaction request.
//!
//! Byte-stream parsing, cross-reference rebuilding, serialization,
//! encryption, and raster codecs are external collaborators behind the
//! traits in [`engine`].
//!
//! ## Quick start
//!
//! ```ignore
//! use pdf_redact::{Processor, RedactConfig};
//!
//! # fn run(reader: &dyn pdf_redact::DocumentReader,
//! #        optimizer: Box<dyn pdf_redact::Optimizer>,
//! #        watermarks: Box<dyn pdf_redact::WatermarkEngine>,
//! #        raster: Box<dyn pdf_redact::RasterEngine>,
//! #        bytes: &[u8]) -> pdf_redact::Result<()> {
//! let config = RedactConfig::new().with_password("secret");
//! let mut processor = Processor::load(reader, bytes, config, optimizer, watermarks, raster)?;
//! processor.remove_watermarks()?;
//! processor.remove_signatures()?;
//! processor.remove_marked_regions()?;
//! processor.write_file("out.pdf")?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Object model and lexical helpers
pub mod object;
pub mod syntax;

// Document graph: read side and mutation side
pub mod graph;
pub mod mutate;

// Session configuration
pub mod config;

// External collaborator interfaces
pub mod engine;

// Redaction passes
pub mod passes;

// Per-document session
pub mod processor;

// Re-exports
pub use config::{RedactConfig, REGION_XOBJECT_NAMES, WATERMARK_IMAGE_NAMES};
pub use engine::{
    DocumentReader, ImageResource, Optimizer, PageSelector, RasterEngine, ReadOptions,
    WatermarkEngine,
};
pub use error::{Error, Result};
pub use graph::{DocumentGraph, Slot};
pub use object::{Dict, IndirectObject, Object, ObjectRef, Stream};
pub use processor::Processor;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
