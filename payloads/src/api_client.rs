use crate::{Company, CompanyId, requests, responses};
use reqwest::StatusCode;
use reqwest::multipart::Form;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for the company endpoints of the job portal backend.
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    fn format_url(&self, path: &str) -> String {
        format!("{}/api/v1/company/{path}", &self.address)
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn put_multipart(&self, path: &str, form: Form) -> ReqwestResult {
        // reqwest (or the browser, on wasm) sets the multipart content type
        // along with its boundary.
        let request = self.inner_client.put(self.format_url(path)).multipart(form);

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Fetch a single company by id.
    pub async fn get_company(
        &self,
        company_id: &CompanyId,
    ) -> Result<Company, ClientError> {
        let response = self.empty_get(&format!("get/{company_id}")).await?;
        let body: responses::CompanyResponse = ok_body(response).await?;
        Ok(body.company)
    }

    /// List the companies registered by the current user.
    pub async fn list_companies(&self) -> Result<Vec<Company>, ClientError> {
        let response = self.empty_get("get").await?;
        let body: responses::CompaniesResponse = ok_body(response).await?;
        Ok(body.companies)
    }

    /// Replace a company's details, optionally uploading a new logo.
    ///
    /// A response whose envelope reports `success: false` is returned as
    /// [`ClientError::Rejected`].
    pub async fn update_company(
        &self,
        company_id: &CompanyId,
        details: requests::UpdateCompany,
    ) -> Result<responses::SuccessEnvelope, ClientError> {
        let form = details.into_form()?;
        let response = self
            .put_multipart(&format!("update/{company_id}"), form)
            .await?;
        ok_envelope(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing the server's message
    /// (or the raw response text when it sent no envelope).
    #[error("{1}")]
    APIError(StatusCode, String),
    /// The request went through but the backend refused the change.
    #[error("{0}")]
    Rejected(String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    /// The human readable message sent by the backend, if there was one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::APIError(_, message) | Self::Rejected(message)
                if !message.is_empty() =>
            {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

/// Read a success envelope, turning `success: false` into an error.
pub async fn ok_envelope(
    response: reqwest::Response,
) -> Result<responses::SuccessEnvelope, ClientError> {
    let envelope: responses::SuccessEnvelope = ok_body(response).await?;
    if !envelope.success {
        return Err(ClientError::Rejected(envelope.message));
    }
    Ok(envelope)
}

/// Build an [`ClientError::APIError`] from a non-2xx response, preferring the
/// `message` of a JSON envelope over the raw body.
async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return e.into(),
    };
    let message = match serde_json::from_str::<responses::SuccessEnvelope>(&text)
    {
        Ok(envelope) => envelope.message,
        Err(_) => text,
    };
    ClientError::APIError(status, message)
}
