//! Request transport via the browser `fetch` API.
//!
//! Copies an [`ApiRequest`]'s multipart form into a `FormData` object,
//! POSTs it, and hands the status code and body text to
//! [`decode_response`]. The browser picks the multipart boundary.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use depthcast_api::{ApiRequest, FieldValue, RequestError, decode_response};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, FormData, Request, RequestInit, RequestMode, Response};

/// Errors raised by the browser APIs before a response is available.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    /// A browser API call threw or a required object was missing.
    #[error("{0}")]
    JsError(String),
}

impl From<JsValue> for HttpError {
    fn from(value: JsValue) -> Self {
        // `fetch` rejects with a `TypeError`; show its message like a
        // thrown error would, not the debug form of the JS value.
        let text = value
            .dyn_ref::<js_sys::Error>()
            .map_or_else(|| format!("{value:?}"), |e| String::from(e.message()));
        Self::JsError(text)
    }
}

impl From<HttpError> for RequestError {
    fn from(err: HttpError) -> Self {
        Self::Network(err.to_string())
    }
}

/// Send `request` and decode the JSON response.
///
/// Failures are also logged to the developer console.
///
/// # Errors
///
/// Returns [`RequestError::Network`] if the request could not be sent
/// or the body could not be read, and the errors of
/// [`decode_response`] otherwise.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn send<T: DeserializeOwned>(request: &ApiRequest) -> Result<T, RequestError> {
    let result = match exchange(request).await {
        Ok((status, body)) => decode_response(status, &body),
        Err(e) => Err(e.into()),
    };
    if let Err(ref e) = result {
        web_sys::console::error_1(&format!("POST {} failed: {e}", request.url).into());
    }
    result
}

/// Perform the POST and return the status code and body text.
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
async fn exchange(request: &ApiRequest) -> Result<(u16, String), HttpError> {
    let window = web_sys::window().ok_or_else(|| HttpError::JsError("no global window".into()))?;

    let body = form_data(request)?;
    let init = RequestInit::new();
    init.set_method("POST");
    init.set_mode(RequestMode::Cors);
    init.set_body(&body);

    let req = Request::new_with_str_and_init(&request.url, &init)?;
    let value = JsFuture::from(window.fetch_with_request(&req)).await?;
    let response: Response = value
        .dyn_into()
        .map_err(|v| HttpError::JsError(format!("fetch did not return a Response: {v:?}")))?;

    let text = JsFuture::from(response.text()?).await?;
    let text = text
        .as_string()
        .ok_or_else(|| HttpError::JsError("response body is not text".into()))?;

    Ok((response.status(), text))
}

/// Build a `FormData` object with the request's fields in order.
fn form_data(request: &ApiRequest) -> Result<FormData, HttpError> {
    let data = FormData::new()?;
    for field in request.form.fields() {
        match &field.value {
            FieldValue::Text(text) => data.append_with_str(&field.name, text)?,
            FieldValue::File {
                filename,
                content_type,
                bytes,
            } => {
                let parts = js_sys::Array::new();
                parts.push(&js_sys::Uint8Array::from(bytes.as_slice()));

                let opts = BlobPropertyBag::new();
                opts.set_type(content_type);

                let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;
                data.append_with_blob_and_filename(&field.name, &blob, filename)?;
            }
        }
    }
    Ok(data)
}
