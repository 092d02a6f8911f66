//! File naming, encoding, and saving of generated surfaces.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::configuration::ImageFormat;
use crate::error::ImageError;

/// Append the format's extension to a resolved image name.
#[must_use]
pub fn file_name(name: &str, format: ImageFormat) -> String {
    format!("{name}.{}", format.extension())
}

/// Resolve where an image is written: `target_folder/name.ext`.
#[must_use]
pub fn output_path(target_folder: &str, name: &str, format: ImageFormat) -> PathBuf {
    Path::new(target_folder).join(file_name(name, format))
}

fn codec(format: ImageFormat) -> image::ImageFormat {
    match format {
        ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        ImageFormat::Png => image::ImageFormat::Png,
    }
}

/// Encode a surface into the bytes of the requested format.
///
/// # Errors
///
/// Returns an error if the encoder rejects the surface.
pub fn encode(surface: &RgbImage, format: ImageFormat) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    surface
        .write_to(&mut buf, codec(format))
        .map_err(|e| ImageError::Encode(format!("Failed to encode as {}: {e}", format.mime())))?;
    Ok(buf.into_inner())
}

/// Encode a surface and write it to `output_path`, creating parent folders.
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written.
pub fn save_image(
    surface: &RgbImage,
    format: ImageFormat,
    output_path: &Path,
) -> Result<(), ImageError> {
    let bytes = encode(surface, format)?;
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, bytes).map_err(ImageError::Io)
}
