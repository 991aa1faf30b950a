/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the platform layer and the UI layer.

use std::path::PathBuf;

/// An image the user picked, as reported by the file dialog probe
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage {
    /// Full path to the original file
    pub path: PathBuf,
    /// Pixel width of the original image
    pub width: u32,
    /// Pixel height of the original image
    pub height: u32,
    /// Size of the original file on disk, in bytes
    pub file_size_bytes: u64,
}

/// The result of a compress-and-save run
#[derive(Debug, Clone, PartialEq)]
pub struct CompressedImage {
    /// Where the compressed JPEG was saved
    pub path: PathBuf,
    /// Encoded size in bytes, as reported by the encoder
    pub size_bytes: u64,
}

impl SelectedImage {
    /// File size in whole kilobytes, as shown in the UI
    pub fn size_kb(&self) -> u64 {
        self.file_size_bytes / 1024
    }
}

impl CompressedImage {
    /// Encoded size in whole kilobytes, as shown in the UI
    pub fn size_kb(&self) -> u64 {
        self.size_bytes / 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_kb_floors() {
        let compressed = CompressedImage {
            path: PathBuf::from("/tmp/compressed-image-0.jpg"),
            size_bytes: 512_000,
        };
        assert_eq!(compressed.size_kb(), 500);

        let selected = SelectedImage {
            path: PathBuf::from("/tmp/photo.png"),
            width: 800,
            height: 600,
            file_size_bytes: 2_048_000,
        };
        assert_eq!(selected.size_kb(), 2000);

        // Partial kilobytes are floored, not rounded
        let almost = CompressedImage {
            path: PathBuf::from("/tmp/compressed-image-1.jpg"),
            size_bytes: 2047,
        };
        assert_eq!(almost.size_kb(), 1);
    }
}
