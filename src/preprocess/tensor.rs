//! Image preprocessing for classifier input.
//!
//! Decodes PNG/JPEG/BMP/GIF data, resizes to the model's spatial size,
//! converts to 8-bit RGB, scales to [0, 1] and adds a batch axis, giving an
//! array of shape (1, height, width, 3).
use std::io::Cursor;
use std::path::Path;

use image::imageops::FilterType;
use image::io::Reader as ImageReader;
use image::DynamicImage;
use ndarray::Array4;
use thiserror::Error;

/// Normalized NHWC tensor fed to the classifier.
pub type ImageTensor = Array4<f64>;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("could not read image: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("decoded image has no pixels")]
    Empty,
    #[error("target size must be non-zero, got {width}x{height}")]
    ZeroTarget { width: u32, height: u32 },
}

/// Reads the file at `path` and runs the full pipeline.
///
/// The format is sniffed from the file contents, so a mislabelled extension
/// still decodes.
pub fn preprocess_image(path: &Path, width: u32, height: u32) -> Result<ImageTensor, PreprocessError> {
    let img = ImageReader::open(path)?.with_guessed_format()?.decode()?;
    to_tensor(img, width, height)
}

/// Same pipeline over an in-memory buffer.
pub fn preprocess_bytes(bytes: &[u8], width: u32, height: u32) -> Result<ImageTensor, PreprocessError> {
    let img = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?.decode()?;
    to_tensor(img, width, height)
}

fn to_tensor(img: DynamicImage, width: u32, height: u32) -> Result<ImageTensor, PreprocessError> {
    if width == 0 || height == 0 {
        return Err(PreprocessError::ZeroTarget { width, height });
    }
    if img.width() == 0 || img.height() == 0 {
        return Err(PreprocessError::Empty);
    }

    let rgb = img.resize_exact(width, height, FilterType::Triangle).to_rgb8();

    let mut tensor = Array4::<f64>::zeros((1, height as usize, width as usize, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for c in 0..3 {
            tensor[[0, y as usize, x as usize, c]] = pixel[c] as f64 / 255.0;
        }
    }
    Ok(tensor)
}
