//! Sample companies shared by the integration tests and the dev-server.

use crate::StubState;
use payloads::{Company, requests};
use tracing::info;

pub fn company_details(
    name: &str,
    description: &str,
    website: &str,
    location: &str,
) -> requests::UpdateCompany {
    requests::UpdateCompany {
        name: name.to_string(),
        description: description.to_string(),
        website: website.to_string(),
        location: location.to_string(),
        file: None,
    }
}

pub fn acme() -> requests::UpdateCompany {
    company_details("Acme", "Widgets", "acme.co", "NYC")
}

pub fn globex() -> requests::UpdateCompany {
    company_details(
        "Globex",
        "Industrial automation",
        "https://globex.example",
        "Springfield",
    )
}

pub fn initech() -> requests::UpdateCompany {
    company_details(
        "Initech",
        "Enterprise software consulting",
        "https://initech.example",
        "Austin",
    )
}

/// A handful of companies to edit while developing the UI.
pub struct DevDataset {
    pub companies: Vec<Company>,
}

impl DevDataset {
    pub fn create(stub: &StubState) -> Self {
        let companies = [acme(), globex(), initech()]
            .iter()
            .map(|details| {
                stub.insert_company(
                    &details.name,
                    &details.description,
                    &details.website,
                    &details.location,
                )
            })
            .collect();
        Self { companies }
    }

    pub fn print_summary(&self) {
        info!("📇 Seeded companies:");
        for company in &self.companies {
            info!(
                "   {} ({}): /admin/companies/{}",
                company.name, company.location, company.id
            );
        }
    }
}
