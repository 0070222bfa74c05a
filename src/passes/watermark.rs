//! Watermark removal.
//!
//! Pipeline: ask the watermark engine whether the document is flagged as
//! watermarked; if not, run a containment fallback that whites out known
//! watermark images on the last page; then strip watermark annotations and
//! content across all pages; always compact.

use crate::config::RedactConfig;
use crate::engine::{Optimizer, PageSelector, RasterEngine, WatermarkEngine};
use crate::error::{Error, Result};
use crate::graph::DocumentGraph;
use image::ImageEncoder;

/// Remove watermarks from the document.
///
/// Detection failures are logged and treated as "not watermarked" rather
/// than aborting the pass.
pub fn remove_watermarks(
    graph: &mut DocumentGraph,
    config: &RedactConfig,
    watermarks: &dyn WatermarkEngine,
    raster: &dyn RasterEngine,
    optimizer: &dyn Optimizer,
) -> Result<()> {
    let flagged = match watermarks.detect(graph) {
        Ok(flag) => flag,
        Err(err) => {
            log::warn!("watermark detection failed, treating document as unwatermarked: {}", err);
            false
        },
    };

    if !flagged {
        whiteout_known_images(graph, config, raster)?;
    }

    watermarks.remove(graph, PageSelector::All)?;
    optimizer.compact(graph)
}

/// Containment fallback for rasterized watermarks the structural removal
/// would miss: overwrite the first allow-listed image resource of the last
/// page with an opaque white bitmap of identical pixel dimensions.
fn whiteout_known_images(
    graph: &mut DocumentGraph,
    config: &RedactConfig,
    raster: &dyn RasterEngine,
) -> Result<()> {
    let images = match raster.list_page_images(graph, PageSelector::Last) {
        Ok(images) => images,
        Err(err) => {
            log::warn!("could not list last-page images, skipping fallback: {}", err);
            return Ok(());
        },
    };

    for img in images {
        if !config
            .watermark_image_names
            .iter()
            .any(|name| name == &img.local_name)
        {
            continue;
        }
        log::info!(
            "overwriting suspected watermark image /{} ({}x{}) at {}",
            img.local_name,
            img.width,
            img.height,
            img.object_ref
        );
        let png = white_png(img.width, img.height)?;
        raster.replace_image(graph, img.object_ref, &png)?;
        break;
    }
    Ok(())
}

/// PNG-encode an opaque white RGBA bitmap of the given dimensions.
fn white_png(width: u32, height: u32) -> Result<Vec<u8>> {
    let bitmap = image::RgbaImage::from_pixel(width, height, image::Rgba([255, 255, 255, 255]));
    let mut buf = Vec::new();
    image::codecs::png::PngEncoder::new(&mut buf)
        .write_image(bitmap.as_raw(), width, height, image::ColorType::Rgba8)
        .map_err(|e| Error::Image(e.to_string()))?;
    Ok(buf)
}
