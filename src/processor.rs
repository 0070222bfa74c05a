//! Per-document processing session.
//!
//! A [`Processor`] owns one document graph, the session configuration, and
//! the collaborator implementations, and exposes the three redaction passes
//! to the driver. Sessions are single-threaded; mutating passes must run one
//! after another.

use crate::config::RedactConfig;
use crate::engine::{DocumentReader, Optimizer, RasterEngine, ReadOptions, WatermarkEngine};
use crate::error::Result;
use crate::graph::DocumentGraph;
use crate::passes;
use std::path::Path;

/// A redaction session over one document.
pub struct Processor {
    config: RedactConfig,
    graph: DocumentGraph,
    optimizer: Box<dyn Optimizer>,
    watermarks: Box<dyn WatermarkEngine>,
    raster: Box<dyn RasterEngine>,
}

impl std::fmt::Debug for Processor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Processor")
            .field("objects", &self.graph.len())
            .field("optimize", &self.config.optimize)
            .finish_non_exhaustive()
    }
}

impl Processor {
    /// Create a session over an already loaded graph.
    pub fn new(
        graph: DocumentGraph,
        config: RedactConfig,
        optimizer: Box<dyn Optimizer>,
        watermarks: Box<dyn WatermarkEngine>,
        raster: Box<dyn RasterEngine>,
    ) -> Self {
        Self {
            config,
            graph,
            optimizer,
            watermarks,
            raster,
        }
    }

    /// Load a document through the reader and open a session over it.
    ///
    /// The configured password is handed to the reader opaquely. The graph
    /// is compacted once right after loading, before any pass runs.
    pub fn load(
        reader: &dyn DocumentReader,
        bytes: &[u8],
        config: RedactConfig,
        optimizer: Box<dyn Optimizer>,
        watermarks: Box<dyn WatermarkEngine>,
        raster: Box<dyn RasterEngine>,
    ) -> Result<Self> {
        let options = ReadOptions {
            password: config.password.clone(),
        };
        let mut graph = reader.load(bytes, &options)?;
        optimizer.compact(&mut graph)?;
        Ok(Self::new(graph, config, optimizer, watermarks, raster))
    }

    /// Remove all signature fields (see [`passes::signatures`]).
    pub fn remove_signatures(&mut self) -> Result<()> {
        passes::signatures::remove_signatures(&mut self.graph, self.optimizer.as_ref())
    }

    /// Remove watermarks (see [`passes::watermark`]).
    pub fn remove_watermarks(&mut self) -> Result<()> {
        passes::watermark::remove_watermarks(
            &mut self.graph,
            &self.config,
            self.watermarks.as_ref(),
            self.raster.as_ref(),
            self.optimizer.as_ref(),
        )
    }

    /// Remove allow-listed marked regions (see [`passes::regions`]).
    pub fn remove_marked_regions(&mut self) -> Result<()> {
        passes::regions::remove_marked_regions(&mut self.graph, &self.config, self.optimizer.as_ref())
    }

    /// Compact the graph through the optimizer.
    pub fn optimize(&mut self) -> Result<()> {
        self.optimizer.compact(&mut self.graph)
    }

    /// Serialize the (optionally re-optimized) graph to a file.
    pub fn write_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        if self.config.optimize {
            self.optimize()?;
        }
        self.optimizer.write_file(&self.graph, path.as_ref())
    }

    /// Human-readable dump of the whole graph.
    pub fn debug_dump(&self) -> String {
        self.graph.debug_dump()
    }

    /// The session's document graph.
    pub fn graph(&self) -> &DocumentGraph {
        &self.graph
    }

    /// The session's document graph, mutably.
    pub fn graph_mut(&mut self) -> &mut DocumentGraph {
        &mut self.graph
    }

    /// The session configuration.
    pub fn config(&self) -> &RedactConfig {
        &self.config
    }
}
