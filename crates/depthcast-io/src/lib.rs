//! depthcast-io: Browser I/O and Dioxus component library.
//!
//! Sends the requests built by the `depthcast-api` controllers with the
//! browser `fetch` API, and provides the UI components that render a
//! [`ViewState`](depthcast_api::ViewState): file picker, export form,
//! status banner, download link and the two preview images.

pub mod components;
pub mod http;

pub use components::{DepthPreview, DownloadLink, ExportForm, FileUpload, StatusBanner};
pub use http::{HttpError, send};
