/// JPEG re-encoding at a user-chosen quality
///
/// Decoding and encoding are CPU-bound, so the public entry point
/// offloads to a blocking thread and awaits the result.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use chrono::Utc;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;

use crate::compress::quality::Quality;
use crate::error::{CompressorError, CompressorResult};

/// An encoded JPEG waiting to be moved into permanent storage.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    /// Temporary location of the encoded file
    pub path: PathBuf,
    /// Encoded size in bytes
    pub size_bytes: u64,
}

/// Re-encode an image as JPEG at the given quality.
///
/// The output lands in the system temp directory under a
/// timestamp-based name; the caller is expected to move it to its
/// permanent location.
pub async fn encode_jpeg(
    source: PathBuf,
    width: u32,
    height: u32,
    quality: Quality,
) -> CompressorResult<EncodedImage> {
    let out_dir = std::env::temp_dir();
    tokio::task::spawn_blocking(move || {
        encode_jpeg_blocking(&source, width, height, quality, &out_dir)
    })
    .await
    .map_err(|e| CompressorError::Task(format!("{}", e)))?
}

/// Blocking implementation of the re-encode.
fn encode_jpeg_blocking(
    source: &Path,
    width: u32,
    height: u32,
    quality: Quality,
    out_dir: &Path,
) -> CompressorResult<EncodedImage> {
    let img = image::open(source)
        .map_err(|e| CompressorError::image(format!("Failed to open {}: {}", source.display(), e)))?;

    // The caller normally passes the source's own dimensions, making
    // this a pure re-encode; anything else resizes to fit.
    let img = if (img.width(), img.height()) != (width, height) {
        img.resize(width, height, FilterType::Lanczos3)
    } else {
        img
    };

    // JPEG has no alpha channel
    let img = DynamicImage::ImageRgb8(img.to_rgb8());

    // Encode into memory first so the reported size is the encoder's
    // own byte count, not a later stat of the file.
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
    img.write_with_encoder(encoder)
        .map_err(|e| CompressorError::image(format!("Failed to encode JPEG: {}", e)))?;
    let bytes = buffer.into_inner();

    let out_path = out_dir.join(format!(
        "compressed-image-{}.jpg",
        Utc::now().timestamp_millis()
    ));
    fs::write(&out_path, &bytes)
        .map_err(|e| CompressorError::io(format!("Failed to write {}: {}", out_path.display(), e)))?;

    Ok(EncodedImage {
        path: out_path,
        size_bytes: bytes.len() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    /// A gradient with enough detail that quality visibly changes the
    /// encoded size.
    fn test_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                (x * 255 / width) as u8,
                (y * 255 / height) as u8,
                ((x ^ y) % 256) as u8,
            ])
        });
        img.save(path).unwrap();
    }

    #[test]
    fn test_reencode_keeps_dimensions_and_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        test_image(&source, 64, 48);

        let encoded =
            encode_jpeg_blocking(&source, 64, 48, Quality::new(80).unwrap(), dir.path()).unwrap();

        assert!(encoded.path.exists());
        assert_eq!(encoded.size_bytes, fs::metadata(&encoded.path).unwrap().len());

        let decoded = image::open(&encoded.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (64, 48));
    }

    #[test]
    fn test_lower_quality_encodes_smaller() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        test_image(&source, 128, 96);

        let low =
            encode_jpeg_blocking(&source, 128, 96, Quality::new(5).unwrap(), dir.path()).unwrap();
        let high =
            encode_jpeg_blocking(&source, 128, 96, Quality::new(95).unwrap(), dir.path()).unwrap();

        assert!(low.size_bytes < high.size_bytes);
    }

    #[test]
    fn test_smaller_target_resizes() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("source.png");
        test_image(&source, 64, 48);

        let encoded =
            encode_jpeg_blocking(&source, 32, 24, Quality::new(80).unwrap(), dir.path()).unwrap();

        let decoded = image::open(&encoded.path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 24));
    }

    #[test]
    fn test_missing_source_is_an_image_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.png");

        let result =
            encode_jpeg_blocking(&missing, 10, 10, Quality::new(50).unwrap(), dir.path());
        assert!(matches!(result, Err(CompressorError::Image(_))));
    }
}
