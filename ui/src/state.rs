use payloads::{Company, CompanyId};
use yewdux::prelude::*;

use crate::hooks::FetchState;

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    // === Company being edited (managed by use_company_by_id) ===
    pub single_company: Option<Company>,

    // === Company listing (managed by use_companies) ===
    pub companies: FetchState<Vec<Company>>,
}

impl State {
    /// The loaded company, if it is the one with this id.
    pub fn get_company(&self, company_id: &CompanyId) -> Option<&Company> {
        self.single_company
            .as_ref()
            .filter(|company| &company.id == company_id)
    }

    pub fn set_single_company(&mut self, company: Company) {
        // Keep the listing consistent with the freshly fetched record
        if let FetchState::Fetched(companies) = &mut self.companies {
            if let Some(listed) =
                companies.iter_mut().find(|listed| listed.id == company.id)
            {
                *listed = company.clone();
            }
        }
        self.single_company = Some(company);
    }

    pub fn set_companies(&mut self, companies: Vec<Company>) {
        self.companies = FetchState::Fetched(companies);
    }
}
