use reqwest::multipart::{Form, Part};

use crate::LogoFile;

/// Replacement details for a company, sent as a multipart form.
///
/// Without a file the backend keeps the existing logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCompany {
    pub name: String,
    pub description: String,
    pub website: String,
    pub location: String,
    pub file: Option<LogoFile>,
}

impl UpdateCompany {
    /// Encode as `multipart/form-data` with parts `name`, `description`,
    /// `website`, `location` and, when a logo was picked, `file`.
    pub fn into_form(self) -> Result<Form, reqwest::Error> {
        let form = Form::new()
            .text("name", self.name)
            .text("description", self.description)
            .text("website", self.website)
            .text("location", self.location);

        match self.file {
            Some(file) => {
                let part = Part::bytes(file.data)
                    .file_name(file.file_name)
                    .mime_str(&file.mime_type)?;
                Ok(form.part("file", part))
            }
            None => Ok(form),
        }
    }
}
