use payloads::{Company, CompanyId};
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State, get_api_client,
    hooks::{FetchHookReturn, use_fetch_with_cache},
};

/// Fetch a company and make it the store's `single_company`.
///
/// The request is made once per mount for each id, even when the store
/// already holds that company, so the edit screen always starts from the
/// backend's current record. Failures are reported through the returned
/// `error`; callers read the record from the store.
#[hook]
pub fn use_company_by_id(company_id: CompanyId) -> FetchHookReturn<Company> {
    let (state, dispatch) = use_store::<State>();

    let cached_id = company_id.clone();
    let fetch_id = company_id.clone();

    use_fetch_with_cache(
        company_id,
        move || state.get_company(&cached_id).cloned(),
        || true,
        move || {
            let dispatch = dispatch.clone();
            let company_id = fetch_id.clone();
            async move {
                let api_client = get_api_client();
                let company = api_client
                    .get_company(&company_id)
                    .await
                    .map_err(|e| e.to_string())?;
                tracing::debug!(%company_id, "company loaded");
                dispatch.reduce_mut(|s| s.set_single_company(company.clone()));
                Ok(company)
            }
        },
    )
}
