//! Multipart form decoding shared by the upload-accepting routes.

use std::collections::HashMap;

use axum::extract::multipart::Multipart;

use crate::common::{Error, Result};
use crate::kernel::FileUpload;

/// A decoded multipart form: text fields by name plus at most one file.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub file: Option<FileUpload>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Drain a multipart body into a [`MultipartForm`].
///
/// Any part carrying a filename is treated as the form's file; later file
/// parts replace earlier ones. Malformed bodies surface as validation errors.
pub async fn collect_multipart(mut multipart: Multipart) -> Result<MultipartForm> {
    let mut form = MultipartForm::default();

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name() {
            let file_name = file_name.to_string();
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(bad_multipart)?;

            form.file = Some(FileUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

fn bad_multipart(e: axum::extract::multipart::MultipartError) -> Error {
    Error::validation(format!("invalid multipart body: {}", e))
}
