//! Sans-IO controllers for the preview and export flows.
//!
//! Each user action is turned into at most one [`ApiRequest`]; the
//! caller performs the HTTP round trip and feeds the outcome back.
//! Both controllers mutate a shared [`ViewState`] that the UI renders
//! verbatim, so every visible change is observable in plain unit
//! tests without a browser.

use serde::de::DeserializeOwned;

use crate::endpoint::ApiBase;
use crate::multipart::MultipartForm;
use crate::params::ExportParams;
use crate::wire::{
    BackgroundColor, ErrorDetail, ExportFormat, ExportResponse, FIELD_BG_THRESHOLD,
    FIELD_CRYSTAL_SIZE, FIELD_DEPTH_INTENSITY, FIELD_FILE, PreviewResponse,
};

/// Submit button label while idle.
pub const SUBMIT_LABEL_IDLE: &str = "Generate 3D Model";
/// Submit button label while an export is in flight.
pub const SUBMIT_LABEL_BUSY: &str = "Processing…";
/// Success message used when the backend omits one.
pub const DEFAULT_EXPORT_MESSAGE: &str = "3D model ready!";

/// Colour class of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    /// Neutral progress (blue).
    Info,
    /// Completed action (green).
    Success,
    /// Failed action (red).
    Error,
}

/// Text shown in the status box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    /// Message text.
    pub text: String,
    /// Colour class.
    pub tone: StatusTone,
}

/// Absolute image URLs shown in the two preview containers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImages {
    /// Composited grayscale image.
    pub grayscale_src: String,
    /// Rendered depth map.
    pub depth_src: String,
}

/// Whether an export is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Ready to submit.
    #[default]
    Idle,
    /// Waiting for the export response.
    Submitting,
}

/// Everything the page shows that the controllers can change.
///
/// `None` fields correspond to hidden elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    /// Status box contents; `None` hides the box.
    pub status: Option<StatusMessage>,
    /// Preview images; `None` hides both containers.
    pub previews: Option<PreviewImages>,
    /// Download link target; `None` hides the link.
    pub download_href: Option<String>,
    /// Submit phase.
    pub phase: Phase,
}

impl ViewState {
    /// Text of the submit button.
    #[must_use]
    pub const fn submit_label(&self) -> &'static str {
        match self.phase {
            Phase::Idle => SUBMIT_LABEL_IDLE,
            Phase::Submitting => SUBMIT_LABEL_BUSY,
        }
    }

    /// Whether the submit button is disabled.
    #[must_use]
    pub const fn submit_disabled(&self) -> bool {
        matches!(self.phase, Phase::Submitting)
    }

    fn show(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.status = Some(StatusMessage {
            text: text.into(),
            tone,
        });
    }
}

/// An image the user picked, read fully into memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the browser.
    pub name: String,
    /// MIME type as reported by the browser (may be empty).
    pub content_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// Image extensions the picker offers and the MIME type sent for each.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
];

/// MIME type for a known image filename, or `None` for any other name.
fn image_mime(name: &str) -> Option<&'static str> {
    let (_, ext) = name.rsplit_once('.')?;
    IMAGE_TYPES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(ext))
        .map(|(_, mime)| *mime)
}

impl SelectedFile {
    /// Wrap a file read from the picker, taking the MIME type from its
    /// extension.
    ///
    /// Unknown extensions keep an empty type and are still sent; the
    /// backend reports whether it can decode them.
    #[must_use]
    pub fn from_picker(name: String, bytes: Vec<u8>) -> Self {
        let content_type = image_mime(&name).unwrap_or_default().to_owned();
        Self {
            name,
            content_type,
            bytes,
        }
    }

    /// MIME type to send, falling back to `application/octet-stream`.
    #[must_use]
    pub fn mime(&self) -> &str {
        if self.content_type.is_empty() {
            "application/octet-stream"
        } else {
            &self.content_type
        }
    }
}

/// A single `POST` with a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Absolute request URL.
    pub url: String,
    /// Request body.
    pub form: MultipartForm,
}

/// Why a request did not produce the expected JSON body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    /// The request never completed (offline, CORS, DNS, ...).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("{detail}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Error detail, or the raw body when it was not an error object.
        detail: String,
    },

    /// A 2xx body could not be parsed.
    #[error("invalid response: {0}")]
    Decode(String),
}

/// Interpret a completed HTTP exchange.
///
/// # Errors
///
/// Returns [`RequestError::Status`] for non-2xx codes and
/// [`RequestError::Decode`] when a 2xx body is not the expected JSON.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, RequestError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_str::<ErrorDetail>(body)
            .map_or_else(|_| body.to_owned(), |e| e.detail);
        return Err(RequestError::Status { status, detail });
    }
    serde_json::from_str(body).map_err(|e| RequestError::Decode(e.to_string()))
}

/// Issues a preview request whenever a file is selected.
#[derive(Debug, Clone, Default)]
pub struct PreviewController {
    api: ApiBase,
}

impl PreviewController {
    /// Create a controller talking to `api`.
    #[must_use]
    pub const fn new(api: ApiBase) -> Self {
        Self { api }
    }

    /// Handle a change of the file input.
    ///
    /// Returns the single preview request to send, or `None` when the
    /// selection was cleared.
    pub fn file_selected(
        &self,
        view: &mut ViewState,
        file: Option<&SelectedFile>,
        background: BackgroundColor,
    ) -> Option<ApiRequest> {
        let file = file?;
        view.show("Generating depth-map preview…", StatusTone::Info);
        Some(ApiRequest {
            url: self.api.preview_url(background),
            form: MultipartForm::new().file(
                FIELD_FILE,
                file.name.clone(),
                file.mime(),
                file.bytes.clone(),
            ),
        })
    }

    /// Apply the outcome of a preview request.
    pub fn finish(&self, view: &mut ViewState, outcome: Result<PreviewResponse, RequestError>) {
        match outcome {
            Ok(resp) => {
                view.previews = Some(PreviewImages {
                    grayscale_src: self.api.resolve(&resp.grayscale_url),
                    depth_src: self.api.resolve(&resp.depth_url),
                });
                view.status = None;
            }
            Err(e) => {
                view.show(format!("Preview error: {e}"), StatusTone::Error);
                view.previews = None;
            }
        }
    }
}

/// Issues the export request when the form is submitted.
#[derive(Debug, Clone, Default)]
pub struct FormController {
    api: ApiBase,
}

impl FormController {
    /// Create a controller talking to `api`.
    #[must_use]
    pub const fn new(api: ApiBase) -> Self {
        Self { api }
    }

    /// Handle a form submission.
    ///
    /// Returns `None` (and sends nothing) when no file is selected or
    /// an export is already running.
    pub fn submit(
        &self,
        view: &mut ViewState,
        file: Option<&SelectedFile>,
        format: ExportFormat,
        params: &ExportParams,
    ) -> Option<ApiRequest> {
        if view.phase == Phase::Submitting {
            return None;
        }
        let Some(file) = file else {
            view.show("Choose an image", StatusTone::Error);
            return None;
        };

        view.phase = Phase::Submitting;
        view.show("Exporting…", StatusTone::Info);

        let form = MultipartForm::new()
            .file(FIELD_FILE, file.name.clone(), file.mime(), file.bytes.clone())
            .text(FIELD_DEPTH_INTENSITY, params.depth_intensity.to_string())
            .text(FIELD_BG_THRESHOLD, params.bg_threshold.to_string())
            .text(FIELD_CRYSTAL_SIZE, params.crystal_size.to_string());

        Some(ApiRequest {
            url: self.api.export_url(format),
            form,
        })
    }

    /// Apply the outcome of an export request.
    pub fn finish(&self, view: &mut ViewState, outcome: Result<ExportResponse, RequestError>) {
        match outcome {
            Ok(resp) => {
                view.download_href = Some(self.api.resolve(&resp.file));
                let message = resp
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_EXPORT_MESSAGE.to_owned());
                view.show(message, StatusTone::Success);
            }
            Err(e) => {
                view.show(format!("Export error: {e}"), StatusTone::Error);
                view.download_href = None;
            }
        }
        view.phase = Phase::Idle;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::multipart::FieldValue;

    fn png() -> SelectedFile {
        SelectedFile {
            name: "portrait.png".into(),
            content_type: "image/png".into(),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    fn api() -> ApiBase {
        ApiBase::new("http://backend.test")
    }

    // ─────── preview ─────────────────────────────────────────────

    #[test]
    fn selecting_a_file_issues_one_preview_request() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();

        let req = ctl
            .file_selected(&mut view, Some(&png()), BackgroundColor::White)
            .unwrap();

        assert_eq!(
            req.url,
            "http://backend.test/preview-depthmap?bg_color=white"
        );
        assert_eq!(req.form.fields().len(), 1);
        let field = &req.form.fields()[0];
        assert_eq!(field.name, "file");
        assert_eq!(
            field.value,
            FieldValue::File {
                filename: "portrait.png".into(),
                content_type: "image/png".into(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            }
        );
        assert_eq!(view.status.unwrap().tone, StatusTone::Info);
    }

    #[test]
    fn picker_infers_mime_from_extension() {
        assert_eq!(image_mime("photo.PNG"), Some("image/png"));
        assert_eq!(image_mime("a.b.jpeg"), Some("image/jpeg"));
        assert_eq!(image_mime("scan.webp"), Some("image/webp"));
        assert_eq!(image_mime("notes.txt"), None);
        assert_eq!(image_mime("png"), None);

        let file = SelectedFile::from_picker("Photo.JPG".into(), vec![1]);
        assert_eq!(file.mime(), "image/jpeg");
    }

    #[test]
    fn unknown_extension_still_requests_a_preview() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();

        for name in ["IMG_0012", "anim.gif"] {
            let file = SelectedFile::from_picker(name.into(), vec![0, 1, 2]);
            let req = ctl
                .file_selected(&mut view, Some(&file), BackgroundColor::White)
                .unwrap();
            assert_eq!(req.form.fields().len(), 1);
            assert_eq!(
                req.form.fields()[0].value,
                FieldValue::File {
                    filename: name.into(),
                    content_type: "application/octet-stream".into(),
                    bytes: vec![0, 1, 2],
                }
            );
        }
    }

    #[test]
    fn clearing_the_selection_sends_nothing() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();
        assert!(
            ctl.file_selected(&mut view, None, BackgroundColor::Black)
                .is_none()
        );
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn preview_uses_selected_background() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();
        let req = ctl
            .file_selected(&mut view, Some(&png()), BackgroundColor::Black)
            .unwrap();
        assert!(req.url.ends_with("?bg_color=black"));
    }

    #[test]
    fn missing_mime_falls_back_to_octet_stream() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();
        let file = SelectedFile {
            content_type: String::new(),
            ..png()
        };
        let req = ctl
            .file_selected(&mut view, Some(&file), BackgroundColor::White)
            .unwrap();
        let FieldValue::File { content_type, .. } = &req.form.fields()[0].value else {
            unreachable!("preview form carries a file field");
        };
        assert_eq!(content_type, "application/octet-stream");
    }

    #[test]
    fn preview_success_shows_resolved_images_and_hides_status() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState::default();
        ctl.file_selected(&mut view, Some(&png()), BackgroundColor::White);

        ctl.finish(
            &mut view,
            Ok(PreviewResponse {
                grayscale_url: "/download/a.gray.png".into(),
                depth_url: "/download/a.depth.png".into(),
            }),
        );

        assert_eq!(
            view.previews,
            Some(PreviewImages {
                grayscale_src: "http://backend.test/download/a.gray.png".into(),
                depth_src: "http://backend.test/download/a.depth.png".into(),
            })
        );
        assert_eq!(view.status, None);
    }

    #[test]
    fn preview_failure_hides_images_and_shows_error() {
        let ctl = PreviewController::new(api());
        let mut view = ViewState {
            previews: Some(PreviewImages {
                grayscale_src: "old".into(),
                depth_src: "old".into(),
            }),
            ..ViewState::default()
        };

        ctl.finish(
            &mut view,
            Err(RequestError::Network("Failed to fetch".into())),
        );

        assert_eq!(view.previews, None);
        assert_eq!(
            view.status,
            Some(StatusMessage {
                text: "Preview error: Failed to fetch".into(),
                tone: StatusTone::Error,
            })
        );
    }

    // ─────── export ──────────────────────────────────────────────

    #[test]
    fn submitting_without_a_file_shows_error_and_sends_nothing() {
        let ctl = FormController::new(api());
        let mut view = ViewState::default();

        let req = ctl.submit(
            &mut view,
            None,
            ExportFormat::Stl,
            &ExportParams::default(),
        );

        assert!(req.is_none());
        assert_eq!(
            view.status,
            Some(StatusMessage {
                text: "Choose an image".into(),
                tone: StatusTone::Error,
            })
        );
        assert_eq!(view.phase, Phase::Idle);
        assert!(!view.submit_disabled());
    }

    #[test]
    fn submit_sends_fields_in_order_and_disables_button() {
        let ctl = FormController::new(api());
        let mut view = ViewState::default();
        let params = ExportParams {
            depth_intensity: 2.5,
            bg_threshold: 200,
            crystal_size: 80.0,
        };

        let req = ctl
            .submit(&mut view, Some(&png()), ExportFormat::Dxf, &params)
            .unwrap();

        assert_eq!(req.url, "http://backend.test/upload-and-export/dxf/");
        assert_eq!(
            req.form.names().collect::<Vec<_>>(),
            ["file", "depth_intensity", "bg_threshold", "crystal_size"]
        );
        assert_eq!(req.form.text_value("depth_intensity"), Some("2.5"));
        assert_eq!(req.form.text_value("bg_threshold"), Some("200"));
        assert_eq!(req.form.text_value("crystal_size"), Some("80"));
        assert!(view.submit_disabled());
        assert_eq!(view.submit_label(), SUBMIT_LABEL_BUSY);
    }

    #[test]
    fn second_submit_while_busy_sends_nothing() {
        let ctl = FormController::new(api());
        let mut view = ViewState::default();
        let params = ExportParams::default();
        assert!(
            ctl.submit(&mut view, Some(&png()), ExportFormat::Stl, &params)
                .is_some()
        );
        assert!(
            ctl.submit(&mut view, Some(&png()), ExportFormat::Stl, &params)
                .is_none()
        );
    }

    #[test]
    fn export_success_reenables_button_and_reveals_link() {
        let ctl = FormController::new(api());
        let mut view = ViewState::default();
        ctl.submit(
            &mut view,
            Some(&png()),
            ExportFormat::Stl,
            &ExportParams::default(),
        );

        ctl.finish(
            &mut view,
            Ok(ExportResponse {
                message: Some("STL exported".into()),
                file: "/download/abc_portrait.stl".into(),
            }),
        );

        assert!(!view.submit_disabled());
        assert_eq!(view.submit_label(), SUBMIT_LABEL_IDLE);
        assert_eq!(
            view.download_href.as_deref(),
            Some("http://backend.test/download/abc_portrait.stl")
        );
        assert_eq!(
            view.status,
            Some(StatusMessage {
                text: "STL exported".into(),
                tone: StatusTone::Success,
            })
        );
    }

    #[test]
    fn export_success_without_message_uses_default() {
        let ctl = FormController::new(api());
        let mut view = ViewState::default();
        ctl.finish(
            &mut view,
            Ok(ExportResponse {
                message: None,
                file: "/download/x.obj".into(),
            }),
        );
        assert_eq!(view.status.unwrap().text, DEFAULT_EXPORT_MESSAGE);
    }

    #[test]
    fn export_failure_hides_link_and_shows_detail() {
        let ctl = FormController::new(api());
        let mut view = ViewState {
            download_href: Some("http://backend.test/download/old.stl".into()),
            ..ViewState::default()
        };
        ctl.submit(
            &mut view,
            Some(&png()),
            ExportFormat::Stl,
            &ExportParams::default(),
        );

        let outcome = decode_response::<ExportResponse>(400, r#"{"detail":"Unsupported format"}"#);
        ctl.finish(&mut view, outcome);

        assert_eq!(view.download_href, None);
        assert_eq!(
            view.status,
            Some(StatusMessage {
                text: "Export error: Unsupported format".into(),
                tone: StatusTone::Error,
            })
        );
        assert!(!view.submit_disabled());
    }

    // ─────── decode_response ─────────────────────────────────────

    #[test]
    fn decode_non_json_error_keeps_raw_body() {
        let err = decode_response::<PreviewResponse>(502, "Bad Gateway").unwrap_err();
        assert_eq!(
            err,
            RequestError::Status {
                status: 502,
                detail: "Bad Gateway".into(),
            }
        );
        assert_eq!(err.to_string(), "Bad Gateway");
    }

    #[test]
    fn decode_malformed_success_body() {
        let err = decode_response::<PreviewResponse>(200, "{}").unwrap_err();
        assert!(matches!(err, RequestError::Decode(_)));
    }

    #[test]
    fn decode_success_body() {
        let resp = decode_response::<PreviewResponse>(
            200,
            r#"{"grayscale_url":"/download/g.png","depth_url":"/download/d.png"}"#,
        )
        .unwrap();
        assert_eq!(resp.depth_url, "/download/d.png");
    }
}
