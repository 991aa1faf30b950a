/// Permanent storage for compressed images
///
/// Saved files land in the user's Pictures directory under a
/// timestamp-based unique name. Writing there is gated behind a
/// confirmation prompt; a granted prompt flushes the file so other
/// applications and indexers see it immediately.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use rfd::{AsyncMessageDialog, MessageButtons, MessageDialogResult, MessageLevel};

use crate::error::{CompressorError, CompressorResult};

/// Outcome of the storage-write prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WritePermission {
    Granted,
    Denied,
}

/// Move an encoded temp file into the Pictures directory.
///
/// The move is destructive: on success the temporary file is gone and
/// only the returned destination remains.
pub fn save_to_pictures(encoded: &Path) -> CompressorResult<PathBuf> {
    let dir = pictures_dir()?;
    save_into(encoded, &dir)
}

/// Ask the user to confirm the storage write.
pub async fn request_write_permission() -> WritePermission {
    let result = AsyncMessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title("Storage Permission Required")
        .set_description("App needs storage permission to store the compressed image.")
        .set_buttons(MessageButtons::YesNo)
        .show()
        .await;

    match result {
        MessageDialogResult::Yes => WritePermission::Granted,
        _ => WritePermission::Denied,
    }
}

/// Flush a saved file to disk so it is durable and visible to other
/// applications.
pub fn sync_saved_file(path: &Path) -> CompressorResult<()> {
    File::open(path)
        .and_then(|f| f.sync_all())
        .map_err(|e| CompressorError::io(format!("Failed to flush {}: {}", path.display(), e)))
}

/// The user's Pictures directory, falling back to the home directory
/// on systems without one.
fn pictures_dir() -> CompressorResult<PathBuf> {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .ok_or_else(|| CompressorError::io("Could not determine the Pictures directory"))
}

fn save_into(encoded: &Path, dir: &Path) -> CompressorResult<PathBuf> {
    fs::create_dir_all(dir)
        .map_err(|e| CompressorError::io(format!("Failed to create {}: {}", dir.display(), e)))?;

    let destination = destination_path(dir);
    move_file(encoded, &destination)?;
    Ok(destination)
}

/// Destination pattern: `compressed-image-<unix-millis>.jpg`.
fn destination_path(dir: &Path) -> PathBuf {
    dir.join(format!(
        "compressed-image-{}.jpg",
        Utc::now().timestamp_millis()
    ))
}

/// Rename where possible; the temp directory is often on a different
/// filesystem than Pictures, in which case fall back to copy + remove.
fn move_file(from: &Path, to: &Path) -> CompressorResult<()> {
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    fs::copy(from, to)
        .map_err(|e| CompressorError::io(format!("Failed to copy to {}: {}", to.display(), e)))?;
    fs::remove_file(from)
        .map_err(|e| CompressorError::io(format!("Failed to remove {}: {}", from.display(), e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_name_pattern() {
        let dir = PathBuf::from("/pictures");
        let path = destination_path(&dir);

        assert_eq!(path.parent(), Some(dir.as_path()));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("compressed-image-"));
        assert!(name.ends_with(".jpg"));

        // The middle part is a unix-millis timestamp
        let millis = name
            .trim_start_matches("compressed-image-")
            .trim_end_matches(".jpg");
        assert!(millis.parse::<i64>().is_ok());
    }

    #[test]
    fn test_save_moves_the_file() {
        let temp = tempfile::tempdir().unwrap();
        let pictures = tempfile::tempdir().unwrap();

        let encoded = temp.path().join("compressed-image-0.jpg");
        fs::write(&encoded, b"jpeg bytes").unwrap();

        let saved = save_into(&encoded, pictures.path()).unwrap();

        assert!(!encoded.exists(), "temporary file must not be preserved");
        assert!(saved.exists());
        assert_eq!(fs::read(&saved).unwrap(), b"jpeg bytes");
        assert_eq!(saved.parent(), Some(pictures.path()));
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let encoded = temp.path().join("compressed-image-0.jpg");
        fs::write(&encoded, b"jpeg bytes").unwrap();

        let nested = temp.path().join("does").join("not").join("exist");
        let saved = save_into(&encoded, &nested).unwrap();
        assert!(saved.exists());
    }

    #[test]
    fn test_sync_saved_file_needs_an_existing_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("file.jpg");

        assert!(matches!(
            sync_saved_file(&path),
            Err(CompressorError::Io(_))
        ));

        fs::write(&path, b"data").unwrap();
        assert!(sync_saved_file(&path).is_ok());
    }
}
