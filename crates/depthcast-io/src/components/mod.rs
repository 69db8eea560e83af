//! Dioxus UI components for depthcast.
//!
//! Provides the image picker, export form with its selects and
//! sliders, status banner, download link, and the grayscale / depth
//! preview pair.

mod controls;
mod download;
mod export;
mod preview;
mod status;
mod upload;

pub use download::DownloadLink;
pub use export::ExportForm;
pub use preview::DepthPreview;
pub use status::StatusBanner;
pub use upload::FileUpload;
