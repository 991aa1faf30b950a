/// JPEG compression module
///
/// This module handles:
/// - Parsing and validating the user-entered quality value (quality.rs)
/// - Re-encoding the selected image as JPEG at that quality (encoder.rs)

pub mod encoder;
pub mod quality;
