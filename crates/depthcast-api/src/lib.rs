//! depthcast-api: Wire contract and form controllers (sans-IO).
//!
//! Describes the two backend endpoints (preview and export), their
//! request and response bodies, and the client-side controllers that
//! turn user actions into requests and responses into visible state.
//!
//! This crate performs **no I/O**. The browser transport lives in
//! `depthcast-io`; the backend implementation in `depthcast-server`
//! shares the same wire types.

pub mod controller;
pub mod endpoint;
pub mod multipart;
pub mod params;
pub mod wire;

pub use controller::{
    ApiRequest, FormController, Phase, PreviewController, PreviewImages, RequestError,
    SelectedFile, StatusMessage, StatusTone, ViewState, decode_response,
};
pub use endpoint::{ApiBase, DEFAULT_API_BASE};
pub use multipart::{FieldValue, FormField, MultipartForm};
pub use params::{ExportParams, OutOfRange, ToneParams};
pub use wire::{
    BackgroundColor, ErrorDetail, ExportFormat, ExportResponse, FIELD_BG_THRESHOLD,
    FIELD_CRYSTAL_SIZE, FIELD_DEPTH_INTENSITY, FIELD_FILE, PreviewResponse, UnknownValue,
};
