use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
    pub cloudinary_api_secret: String,
    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub admin_emails: Vec<String>,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET must be set")?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "lectern".to_string()),
            cloudinary_cloud_name: env::var("CLOUDINARY_CLOUD_NAME")
                .context("CLOUDINARY_CLOUD_NAME must be set")?,
            cloudinary_api_key: env::var("CLOUDINARY_API_KEY")
                .context("CLOUDINARY_API_KEY must be set")?,
            cloudinary_api_secret: env::var("CLOUDINARY_API_SECRET")
                .context("CLOUDINARY_API_SECRET must be set")?,
            resend_api_key: env::var("RESEND_API_KEY").ok(),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Lectern <noreply@lectern.app>".to_string()),
            admin_emails: split_csv(&env::var("ADMIN_EMAILS").unwrap_or_default()),
            allowed_origins: {
                let origins = split_csv(&env::var("ALLOWED_ORIGINS").unwrap_or_default());
                if origins.is_empty() {
                    vec!["http://localhost:5173".to_string()]
                } else {
                    origins
                }
            },
        })
    }
}

/// Splits a comma-separated environment value, trimming whitespace and
/// dropping empty entries.
fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
