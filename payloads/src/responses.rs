use crate::Company;
use serde::{Deserialize, Serialize};

/// Outcome envelope the company endpoints answer with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuccessEnvelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyResponse {
    #[serde(default)]
    pub success: bool,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompaniesResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub companies: Vec<Company>,
}
