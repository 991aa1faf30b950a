/// The select / compress / share workflow
///
/// All workflow state lives in [`Workflow`] and is mutated only through
/// its action methods. The current [`Stage`] is derived from which
/// image fields are present; it is never stored on its own, so the two
/// can't drift apart.

use super::data::{CompressedImage, SelectedImage};

/// Where the user is in the workflow.
///
/// A compressed result can only exist alongside a selection, so the
/// three stages cover every representable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing selected yet
    Idle,
    /// An image is selected, not yet compressed
    Selected,
    /// The selected image has a compressed result
    Compressed,
}

/// Owns the selection and the compressed result.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Workflow {
    selected: Option<SelectedImage>,
    compressed: Option<CompressedImage>,
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the current stage from field presence.
    pub fn stage(&self) -> Stage {
        match (&self.selected, &self.compressed) {
            (Some(_), Some(_)) => Stage::Compressed,
            (Some(_), None) => Stage::Selected,
            (None, _) => Stage::Idle,
        }
    }

    pub fn selected(&self) -> Option<&SelectedImage> {
        self.selected.as_ref()
    }

    pub fn compressed(&self) -> Option<&CompressedImage> {
        self.compressed.as_ref()
    }

    /// Replace the selection. Any earlier compressed result belongs to
    /// the old selection and is dropped with it.
    pub fn select(&mut self, image: SelectedImage) {
        self.selected = Some(image);
        self.compressed = None;
    }

    /// Clear everything and return to [`Stage::Idle`]. Safe to call
    /// from any stage, any number of times.
    pub fn deselect(&mut self) {
        self.selected = None;
        self.compressed = None;
    }

    /// Attach a compressed result to the current selection.
    ///
    /// Ignored when nothing is selected (the selection was cleared
    /// while the operation was in flight); a compressed result must
    /// never exist on its own. Returns whether the result was kept.
    pub fn finish_compression(&mut self, result: CompressedImage) -> bool {
        if self.selected.is_none() {
            return false;
        }
        self.compressed = Some(result);
        true
    }
}
