/// Hand a saved file to the operating system
///
/// Desktop equivalent of a share action: open the file with whatever
/// the OS considers its default handler.

use std::path::Path;

use crate::error::{CompressorError, CompressorResult};

pub fn share_file(path: &Path) -> CompressorResult<()> {
    opener::open(path)
        .map_err(|e| CompressorError::share(format!("Failed to open {}: {}", path.display(), e)))
}
