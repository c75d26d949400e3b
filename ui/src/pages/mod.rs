pub mod companies;
pub mod company_setup;

pub use companies::CompaniesPage;
pub use company_setup::CompanySetupPage;
