//! Loading target and tile images from disk and saving the finished mosaic

use crate::io::error::{MosaicError, Result};
use crate::math::resample::zoom;
use image::{ImageError, RgbImage};
use log::debug;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::path::{Path, PathBuf};

/// Open an image file and convert it to 8-bit RGB, dropping alpha
///
/// # Errors
///
/// Returns `UnsupportedFormat` if the contents cannot be decoded and
/// `ImageLoad` if the file cannot be read
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| match source {
        ImageError::Decoding(_) | ImageError::Unsupported(_) => MosaicError::UnsupportedFormat {
            path: Some(path.to_path_buf()),
            source,
        },
        _ => MosaicError::ImageLoad {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Ok(img.to_rgb8())
}

/// Load the target image and apply `zoom_factor`
///
/// # Errors
///
/// Returns the errors of [`load_rgb`] for the file and those of
/// [`zoom`] for invalid factors
pub fn load_target(path: &Path, zoom_factor: f64) -> Result<RgbImage> {
    let target = load_rgb(path)?;
    if (zoom_factor - 1.0).abs() < f64::EPSILON {
        return Ok(target);
    }

    let zoomed = zoom(&target, zoom_factor)?;
    debug!(
        "Zoomed target {}x{} -> {}x{}",
        target.width(),
        target.height(),
        zoomed.width(),
        zoomed.height()
    );
    Ok(zoomed)
}

/// Load every tile image in parallel, preserving order
///
/// # Errors
///
/// Returns `EmptyTileSet` if `paths` is empty and the first error of
/// [`load_rgb`] otherwise
pub fn load_tiles(paths: &[PathBuf]) -> Result<Vec<RgbImage>> {
    load_tiles_with(paths, || {})
}

/// [`load_tiles`], calling `on_loaded` from the worker after each image
///
/// # Errors
///
/// See [`load_tiles`]
pub fn load_tiles_with<F>(paths: &[PathBuf], on_loaded: F) -> Result<Vec<RgbImage>>
where
    F: Fn() + Sync,
{
    if paths.is_empty() {
        return Err(MosaicError::EmptyTileSet);
    }

    paths
        .par_iter()
        .map(|path| {
            let image = load_rgb(path)?;
            on_loaded();
            Ok(image)
        })
        .collect()
}

/// Save the mosaic, creating the parent directory if needed
///
/// The format follows the file extension.
///
/// # Errors
///
/// Returns `FileSystem` if the directory cannot be created and
/// `ImageExport` if encoding or writing fails
pub fn save_image(mosaic: &RgbImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    mosaic
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
