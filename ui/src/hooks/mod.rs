pub mod use_companies;
pub mod use_company_by_id;
pub mod use_fetch;

pub use use_companies::use_companies;
pub use use_company_by_id::use_company_by_id;
pub use use_fetch::{FetchHookReturn, use_fetch_with_cache};

/// Distinguishes "never fetched" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::Fetched(data) => Some(data),
            Self::NotFetched => None,
        }
    }
}
