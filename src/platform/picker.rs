/// Image selection via the native file dialog
///
/// Cancelling the dialog is a normal outcome, not an error, so the
/// picker returns `Ok(None)` for it and the workflow stays put.

use std::fs;
use std::path::Path;

use rfd::AsyncFileDialog;

use crate::error::{CompressorError, CompressorResult};
use crate::state::data::SelectedImage;

/// Extensions offered in the dialog filter.
const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "bmp", "webp"];

/// Show the file dialog and probe whatever the user picked.
pub async fn pick_image() -> CompressorResult<Option<SelectedImage>> {
    let handle = AsyncFileDialog::new()
        .set_title("Select an Image")
        .add_filter("Images", &IMAGE_EXTENSIONS)
        .pick_file()
        .await;

    match handle {
        Some(handle) => probe_image(handle.path()).map(Some),
        None => Ok(None),
    }
}

/// Read the descriptor the workflow needs: dimensions from the image
/// header and the file size from the filesystem.
pub fn probe_image(path: &Path) -> CompressorResult<SelectedImage> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| CompressorError::image(format!("Failed to read {}: {}", path.display(), e)))?;

    let file_size_bytes = fs::metadata(path)
        .map_err(|e| CompressorError::io(format!("Failed to stat {}: {}", path.display(), e)))?
        .len();

    Ok(SelectedImage {
        path: path.to_path_buf(),
        width,
        height,
        file_size_bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_probe_reads_dimensions_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbImage::from_pixel(320, 200, Rgb([10, 20, 30]))
            .save(&path)
            .unwrap();

        let probed = probe_image(&path).unwrap();
        assert_eq!(probed.width, 320);
        assert_eq!(probed.height, 200);
        assert_eq!(probed.file_size_bytes, fs::metadata(&path).unwrap().len());
        assert_eq!(probed.path, path);
    }

    #[test]
    fn test_probe_rejects_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"not an image").unwrap();

        assert!(matches!(
            probe_image(&path),
            Err(CompressorError::Image(_))
        ));
    }
}
