/// Platform capability module
///
/// Thin wrappers over the native capabilities the workflow depends on:
/// - File selection dialog and image probe (picker.rs)
/// - Pictures-directory storage, permission prompt, flush (storage.rs)
/// - Hand-off to the OS default handler (share.rs)

pub mod picker;
pub mod share;
pub mod storage;
