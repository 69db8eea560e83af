//! `multipart/form-data` request bodies.
//!
//! A [`MultipartForm`] is an ordered list of fields. The browser
//! transport copies it into a `FormData` object; native callers (and
//! the backend's tests) use [`MultipartForm::encode`] to produce the
//! RFC 7578 wire bytes directly.

use std::fmt::Write;

/// Value of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Plain text value.
    Text(String),
    /// File upload.
    File {
        /// Original file name reported to the server.
        filename: String,
        /// MIME type of the file contents.
        content_type: String,
        /// Raw file contents.
        bytes: Vec<u8>,
    },
}

/// A named form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Field name.
    pub name: String,
    /// Field value.
    pub value: FieldValue,
}

/// Ordered collection of form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    fields: Vec<FormField>,
}

impl MultipartForm {
    /// Create an empty form.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a text field.
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        });
        self
    }

    /// Append a file field.
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::File {
                filename: filename.into(),
                content_type: content_type.into(),
                bytes,
            },
        });
        self
    }

    /// All fields in insertion order.
    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Value of the first text field called `name`.
    #[must_use]
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Text(v) if f.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// `Content-Type` header value for a body encoded with `boundary`.
    #[must_use]
    pub fn content_type(boundary: &str) -> String {
        format!("multipart/form-data; boundary={boundary}")
    }

    /// Encode the form as a `multipart/form-data` body.
    ///
    /// `boundary` must not occur inside any field value; callers pick
    /// a sufficiently random string.
    #[must_use]
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut body = Vec::new();
        for field in &self.fields {
            let mut head = String::new();
            let _ = write!(head, "--{boundary}\r\n");
            match &field.value {
                FieldValue::Text(value) => {
                    let _ = write!(
                        head,
                        "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                        escape_quoted(&field.name)
                    );
                    body.extend_from_slice(head.as_bytes());
                    body.extend_from_slice(value.as_bytes());
                }
                FieldValue::File {
                    filename,
                    content_type,
                    bytes,
                } => {
                    let _ = write!(
                        head,
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: {content_type}\r\n\r\n",
                        escape_quoted(&field.name),
                        escape_quoted(filename),
                    );
                    body.extend_from_slice(head.as_bytes());
                    body.extend_from_slice(bytes);
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        body
    }
}

/// Percent-encode the characters that would break a quoted header
/// parameter, as browsers do for `FormData` names.
fn escape_quoted(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn text_lookup_returns_first_match() {
        let form = MultipartForm::new().text("a", "1").text("a", "2");
        assert_eq!(form.text_value("a"), Some("1"));
        assert_eq!(form.text_value("b"), None);
    }

    #[test]
    fn text_lookup_skips_files() {
        let form = MultipartForm::new().file("file", "x.png", "image/png", vec![1]);
        assert_eq!(form.text_value("file"), None);
    }

    #[test]
    fn encodes_text_and_file_parts() {
        let form = MultipartForm::new()
            .file("file", "cat.png", "image/png", vec![0x89, b'P'])
            .text("crystal_size", "50");
        let body = form.encode("XyZ");
        let expected: &[u8] = b"--XyZ\r\n\
Content-Disposition: form-data; name=\"file\"; filename=\"cat.png\"\r\n\
Content-Type: image/png\r\n\r\n\x89P\r\n\
--XyZ\r\n\
Content-Disposition: form-data; name=\"crystal_size\"\r\n\r\n50\r\n\
--XyZ--\r\n";
        assert_eq!(body, expected);
    }

    #[test]
    fn empty_form_is_just_the_closing_boundary() {
        assert_eq!(MultipartForm::new().encode("b"), b"--b--\r\n");
    }

    #[test]
    fn quotes_in_filenames_are_escaped() {
        let form = MultipartForm::new().file("file", "a\"b.png", "image/png", Vec::new());
        let body = String::from_utf8(form.encode("b")).unwrap();
        assert!(body.contains("filename=\"a%22b.png\""));
    }

    #[test]
    fn content_type_names_boundary() {
        assert_eq!(
            MultipartForm::content_type("abc"),
            "multipart/form-data; boundary=abc"
        );
    }
}
