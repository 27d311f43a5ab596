// Minimal client for the Cloudinary upload API.
// https://cloudinary.com/documentation/upload_images#uploading_with_a_direct_call_to_the_rest_api

pub mod models;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use sha2::{Digest, Sha256};

use crate::models::UploadResponse;

#[derive(Debug, Clone)]
pub struct CloudinaryOptions {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryService {
    options: CloudinaryOptions,
}

impl CloudinaryService {
    pub fn new(options: CloudinaryOptions) -> Self {
        Self { options }
    }

    /// Uploads a file with a signed request. Uses the `auto` resource type so
    /// images, videos and plain documents all land on the same endpoint.
    pub async fn upload(
        &self,
        bytes: Vec<u8>,
        file_name: &str,
    ) -> Result<UploadResponse, &'static str> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let public_id = public_id_for(file_name, &timestamp);

        let signature = sign_request(
            &[("public_id", &public_id), ("timestamp", &timestamp)],
            &self.options.api_secret,
        );

        let url = format!(
            "https://api.cloudinary.com/v1_1/{cloud}/auto/upload",
            cloud = self.options.cloud_name
        );

        let part = Part::bytes(bytes).file_name(file_name.to_string());
        let form = Form::new()
            .text("api_key", self.options.api_key.clone())
            .text("timestamp", timestamp)
            .text("public_id", public_id)
            .text("signature", signature)
            .part("file", part);

        let client = Client::new();
        let res = client.post(url).multipart(form).send().await;

        match res {
            Ok(response) => {
                let status = response.status();
                if !status.is_success() {
                    // Log the error response from Cloudinary
                    let error_body = response.text().await.unwrap_or_default();
                    eprintln!("Cloudinary error ({}): {}", status, error_body);
                    return Err("Cloudinary returned an error");
                }

                let result = response.json::<UploadResponse>().await;
                match result {
                    Ok(data) => Ok(data),
                    Err(e) => {
                        eprintln!("Failed to parse Cloudinary response: {}", e);
                        Err("Error parsing upload response")
                    }
                }
            }
            Err(e) => {
                eprintln!("Request to Cloudinary failed: {}", e);
                Err("Error uploading file")
            }
        }
    }
}

/// Hex SHA-256 signature Cloudinary expects: all request parameters except
/// `file` and `api_key`, sorted by key, joined as a query string, with the
/// API secret appended.
pub fn sign_request(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<(&str, &str)> = params.to_vec();
    sorted.sort_by_key(|(key, _)| *key);

    let joined = sorted
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha256::new();
    hasher.update(joined.as_bytes());
    hasher.update(api_secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Timestamped public id derived from the original file name, with the
/// extension dropped and anything outside `[A-Za-z0-9]` squashed to `_`.
fn public_id_for(file_name: &str, timestamp: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(file_name);
    let safe: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}", timestamp, safe)
}
