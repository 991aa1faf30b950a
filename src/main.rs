use iced::widget::{button, column, container, image, text, text_input, Column, Space};
use iced::{Alignment, Element, Length, Task, Theme};
use tracing::{debug, error, info, warn};

// Declare the application modules
mod compress;
mod error;
mod platform;
mod state;

use compress::encoder;
use compress::quality::Quality;
use error::CompressorResult;
use platform::storage::WritePermission;
use platform::{picker, share, storage};
use state::data::{CompressedImage, SelectedImage};
use state::workflow::{Stage, Workflow};

/// Main application state
struct ImageCompressor {
    /// The select / compress / share workflow
    workflow: Workflow,
    /// Raw contents of the quality text field
    quality_input: String,
    /// An operation chain is in flight; workflow actions are hidden
    /// until it completes so nothing can overlap
    busy: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the image placeholder
    SelectImage,
    /// The file dialog resolved (picked, cancelled, or failed)
    ImageSelected(CompressorResult<Option<SelectedImage>>),
    /// User edited the quality field
    QualityChanged(String),
    /// User clicked "Compress It"
    Compress,
    /// The compress-and-save chain resolved
    CompressComplete(CompressorResult<CompressedImage>),
    /// User clicked the back arrow
    Deselect,
    /// User clicked "Share"
    Share,
}

impl ImageCompressor {
    fn new() -> (Self, Task<Message>) {
        info!("Image compressor started");

        (
            ImageCompressor {
                workflow: Workflow::new(),
                quality_input: String::new(),
                busy: false,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectImage => {
                if self.busy {
                    return Task::none();
                }
                self.busy = true;

                Task::perform(picker::pick_image(), Message::ImageSelected)
            }
            Message::ImageSelected(result) => {
                self.busy = false;

                match result {
                    Ok(Some(selected)) => {
                        info!(
                            "Selected {} ({}x{}, {} KB)",
                            selected.path.display(),
                            selected.width,
                            selected.height,
                            selected.size_kb()
                        );
                        self.workflow.select(selected);
                    }
                    Ok(None) => debug!("User did not select an image."),
                    Err(e) => error!("Error: {}", e),
                }

                Task::none()
            }
            Message::QualityChanged(value) => {
                self.quality_input = value;
                Task::none()
            }
            Message::Compress => {
                if self.busy {
                    return Task::none();
                }
                // The button is only reachable with a valid quality and
                // a selection, but the checks stay cheap
                let Some(quality) = Quality::parse(&self.quality_input) else {
                    return Task::none();
                };
                let Some(selected) = self.workflow.selected().cloned() else {
                    return Task::none();
                };
                self.busy = true;

                Task::perform(
                    compress_and_save(selected, quality),
                    Message::CompressComplete,
                )
            }
            Message::CompressComplete(result) => {
                self.busy = false;

                match result {
                    Ok(compressed) => {
                        info!(
                            "Compressed to {} ({} KB)",
                            compressed.path.display(),
                            compressed.size_kb()
                        );
                        self.workflow.finish_compression(compressed);
                    }
                    Err(e) => error!("Error: {}", e),
                }

                Task::none()
            }
            Message::Deselect => {
                self.workflow.deselect();
                Task::none()
            }
            Message::Share => {
                if let Some(compressed) = self.workflow.compressed() {
                    if let Err(e) = share::share_file(&compressed.path) {
                        error!("Error: {}", e);
                    }
                }
                Task::none()
            }
        }
    }

    /// Build the user interface for the current workflow stage
    fn view(&self) -> Element<Message> {
        let content: Column<Message> = match self.workflow.stage() {
            Stage::Idle => self.view_idle(),
            Stage::Selected => self.view_selected(),
            Stage::Compressed => self.view_compressed(),
        };

        container(content.spacing(10).align_x(Alignment::Center))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Nothing selected: a heading and a placeholder that opens the picker
    fn view_idle(&self) -> Column<Message> {
        column![
            text("Select an Image").size(20),
            button(Space::new(300.0, 300.0))
                .on_press_maybe((!self.busy).then_some(Message::SelectImage)),
        ]
    }

    /// Image selected: preview, size, quality input, compress button
    fn view_selected(&self) -> Column<Message> {
        let Some(selected) = self.workflow.selected() else {
            return self.view_idle();
        };

        let compress = (!self.busy)
            .then(|| Quality::parse(&self.quality_input))
            .flatten()
            .map(|_| Message::Compress);

        column![
            self.back_button(),
            self.preview(selected),
            text(format!("File Size: {} KB", selected.size_kb())).size(16),
            text("Enter Quality Percentage:").size(16),
            text_input("Quality (0 - 100)", &self.quality_input)
                .on_input(Message::QualityChanged)
                .width(120.0),
            button(text("Compress It")).on_press_maybe(compress).padding(10),
        ]
    }

    /// Compressed: preview, result size and location, share button
    fn view_compressed(&self) -> Column<Message> {
        let (Some(selected), Some(compressed)) =
            (self.workflow.selected(), self.workflow.compressed())
        else {
            return self.view_idle();
        };

        column![
            self.back_button(),
            self.preview(selected),
            text(format!("File Size: {} KB", compressed.size_kb())).size(16),
            text(compressed.path.display().to_string()).size(14),
            button(text("Share"))
                .on_press_maybe((!self.busy).then_some(Message::Share))
                .padding(10),
        ]
    }

    fn back_button(&self) -> Element<Message> {
        button(text("◀").size(30))
            .on_press_maybe((!self.busy).then_some(Message::Deselect))
            .into()
    }

    fn preview(&self, selected: &SelectedImage) -> Element<Message> {
        image(image::Handle::from_path(&selected.path))
            .width(300.0)
            .height(300.0)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    iced::application(
        "Image Compressor",
        ImageCompressor::update,
        ImageCompressor::view,
    )
    .theme(ImageCompressor::theme)
    .centered()
    .run_with(ImageCompressor::new)
}

/// Compress the selected image and save the result permanently.
///
/// Encode at the chosen quality, move the encoded file into the
/// Pictures directory, then ask for the storage write. A grant
/// flushes the file; a denial only skips the flush, leaving the saved
/// file in place. The result is kept either way.
async fn compress_and_save(
    selected: SelectedImage,
    quality: Quality,
) -> CompressorResult<CompressedImage> {
    let encoded = encoder::encode_jpeg(
        selected.path,
        selected.width,
        selected.height,
        quality,
    )
    .await?;

    let destination = storage::save_to_pictures(&encoded.path)?;

    match storage::request_write_permission().await {
        WritePermission::Granted => {
            storage::sync_saved_file(&destination)?;
            info!("File Saved.");
        }
        WritePermission::Denied => warn!("Permission Denied"),
    }

    Ok(CompressedImage {
        path: destination,
        size_bytes: encoded.size_bytes,
    })
}
