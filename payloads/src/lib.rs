pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};

use derive_more::Display;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Largest logo the admin screen will upload (5 MiB).
pub const MAX_LOGO_SIZE: usize = 5 * 1024 * 1024;

/// Backend identifier of a company record.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
)]
#[serde(transparent)]
pub struct CompanyId(pub String);

impl From<&str> for CompanyId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// A company as stored by the backend.
///
/// Text fields the backend leaves out come through as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    #[serde(rename = "_id")]
    pub id: CompanyId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub location: String,
    /// URL of the logo currently on file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(
        default,
        rename = "updatedAt",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<Timestamp>,
}

/// An image picked by the user, read into memory for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoFile {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LogoRejection {
    #[error("Please upload an image file.")]
    NotAnImage,
    #[error("File size must be less than 5MB.")]
    TooLarge,
}

impl LogoFile {
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Check the file is an image no larger than [`MAX_LOGO_SIZE`].
    pub fn check(&self) -> Result<(), LogoRejection> {
        if !self.mime_type.starts_with("image/") {
            return Err(LogoRejection::NotAnImage);
        }
        if self.size() > MAX_LOGO_SIZE {
            return Err(LogoRejection::TooLarge);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logo(mime_type: &str, size: usize) -> LogoFile {
        LogoFile {
            file_name: "logo".into(),
            mime_type: mime_type.into(),
            data: vec![0; size],
        }
    }

    #[test]
    fn logo_size_boundary() {
        assert_eq!(logo("image/png", MAX_LOGO_SIZE).check(), Ok(()));
        assert_eq!(
            logo("image/png", MAX_LOGO_SIZE + 1).check(),
            Err(LogoRejection::TooLarge)
        );
    }

    #[test]
    fn logo_must_be_an_image() {
        assert_eq!(
            logo("application/pdf", 10).check(),
            Err(LogoRejection::NotAnImage)
        );
        assert_eq!(logo("", 10).check(), Err(LogoRejection::NotAnImage));
        assert_eq!(logo("image/svg+xml", 10).check(), Ok(()));
    }

    #[test]
    fn company_tolerates_missing_fields() {
        let company: Company = serde_json::from_str(
            r#"{"_id":"c1","name":"Acme","updatedAt":"2024-05-01T10:00:00.000Z"}"#,
        )
        .unwrap();
        assert_eq!(company.id, CompanyId::from("c1"));
        assert_eq!(company.name, "Acme");
        assert_eq!(company.website, "");
        assert_eq!(company.logo, None);
        assert!(company.updated_at.is_some());
    }
}
