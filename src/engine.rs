//! Collaborator interfaces.
//!
//! The core edits the object graph; tokenizing raw bytes into a graph,
//! rebuilding the cross-reference table, serializing, and raster work are
//! performed by external collaborators behind these traits. The passes only
//! ever see the narrow surface defined here.

use crate::error::Result;
use crate::graph::DocumentGraph;
use crate::object::ObjectRef;
use std::path::Path;

/// Options handed to the reader when loading a document.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Optional decryption password, opaque to the core.
    pub password: Option<String>,
}

/// Page selection for collaborator queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSelector {
    /// Every page of the document.
    All,
    /// The last page only.
    Last,
}

/// An image resource visible on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    /// Local resource name within the page's XObject dictionary.
    pub local_name: String,
    /// Pixel width.
    pub width: u32,
    /// Pixel height.
    pub height: u32,
    /// Slot of the image object in the graph.
    pub object_ref: ObjectRef,
}

/// Parses raw document bytes into an object graph.
pub trait DocumentReader {
    /// Load a document graph from raw bytes.
    fn load(&self, bytes: &[u8], options: &ReadOptions) -> Result<DocumentGraph>;
}

/// Rebuilds the cross-reference table and serializes the graph.
pub trait Optimizer {
    /// Recompute numbering and drop unreachable slots after structural edits.
    ///
    /// Must run after every mutating pass, before the next pass or the final
    /// serialization.
    fn compact(&self, graph: &mut DocumentGraph) -> Result<()>;

    /// Serialize the graph to a file.
    fn write_file(&self, graph: &DocumentGraph, path: &Path) -> Result<()>;
}

/// Detects and strips watermark annotations and content.
pub trait WatermarkEngine {
    /// Heuristic over page content streams: is this a watermarked document?
    fn detect(&self, graph: &DocumentGraph) -> Result<bool>;

    /// Strip watermark annotations/content on the selected pages.
    fn remove(&self, graph: &mut DocumentGraph, pages: PageSelector) -> Result<()>;
}

/// Lists and overwrites raster image resources.
pub trait RasterEngine {
    /// Enumerate the image resources of the selected pages.
    fn list_page_images(
        &self,
        graph: &DocumentGraph,
        pages: PageSelector,
    ) -> Result<Vec<ImageResource>>;

    /// Overwrite an image object's payload with newly encoded bytes.
    fn replace_image(
        &self,
        graph: &mut DocumentGraph,
        target: ObjectRef,
        encoded: &[u8],
    ) -> Result<()>;
}
