//! Reading the multipart upload form.

use std::collections::HashMap;
use std::str::FromStr;

use axum::extract::Multipart;
use depthcast_api::{
    ExportParams, FIELD_BG_THRESHOLD, FIELD_CRYSTAL_SIZE, FIELD_DEPTH_INTENSITY, FIELD_FILE,
};

use crate::error::ApiError;

/// The uploaded image.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// File name as sent by the client.
    pub filename: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

/// All fields of an upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    file: Option<UploadedFile>,
    text: HashMap<String, String>,
}

impl UploadForm {
    /// Drain `multipart` into memory.
    ///
    /// The `file` field is kept as bytes; every other named field is
    /// read as text. A later field with the same name replaces an
    /// earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if the body is not valid
    /// multipart data or exceeds the body limit.
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            if name == FIELD_FILE {
                let filename = field.file_name().unwrap_or("upload").to_owned();
                let bytes = field.bytes().await?.to_vec();
                form.file = Some(UploadedFile { filename, bytes });
            } else {
                let value = field.text().await?;
                form.text.insert(name, value);
            }
        }
        Ok(form)
    }

    /// Take the uploaded image.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if no `file` field was sent.
    pub fn into_file(self) -> Result<UploadedFile, ApiError> {
        self.file
            .ok_or_else(|| ApiError::Validation(format!("missing form field `{FIELD_FILE}`")))
    }

    /// Relief parameters from the text fields, defaulting any that are
    /// absent or blank.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] if a field does not parse or
    /// is out of range.
    pub fn export_params(&self) -> Result<ExportParams, ApiError> {
        let defaults = ExportParams::default();
        let params = ExportParams {
            depth_intensity: self
                .parse(FIELD_DEPTH_INTENSITY)?
                .unwrap_or(defaults.depth_intensity),
            bg_threshold: self
                .parse(FIELD_BG_THRESHOLD)?
                .unwrap_or(defaults.bg_threshold),
            crystal_size: self
                .parse(FIELD_CRYSTAL_SIZE)?
                .unwrap_or(defaults.crystal_size),
        };
        params.validate()?;
        Ok(params)
    }

    fn parse<T: FromStr>(&self, name: &str) -> Result<Option<T>, ApiError> {
        let Some(raw) = self.text.get(name).map(|s| s.trim()).filter(|s| !s.is_empty()) else {
            return Ok(None);
        };
        raw.parse()
            .map(Some)
            .map_err(|_| ApiError::Validation(format!("{name} must be a number, got {raw:?}")))
    }
}
