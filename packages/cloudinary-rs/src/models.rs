use serde::Deserialize;

/// Subset of the Cloudinary upload response the server cares about.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub public_id: String,
    pub secure_url: String,
    pub url: Option<String>,
    pub resource_type: Option<String>,
    pub format: Option<String>,
    pub bytes: Option<u64>,
}
