use payloads::Company;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{
    State, get_api_client,
    hooks::{FetchHookReturn, use_fetch_with_cache},
};

/// Hook for the company listing, cached in global state.
///
/// Refetches on every mount so edits made on the setup screen show up; the
/// cached list is displayed in the meantime.
#[hook]
pub fn use_companies() -> FetchHookReturn<Vec<Company>> {
    let (state, dispatch) = use_store::<State>();

    use_fetch_with_cache(
        (),
        move || state.companies.as_ref().cloned(),
        || true,
        move || {
            let dispatch = dispatch.clone();
            async move {
                let api_client = get_api_client();
                let companies = api_client
                    .list_companies()
                    .await
                    .map_err(|e| e.to_string())?;
                dispatch.reduce_mut(|s| s.set_companies(companies.clone()));
                Ok(companies)
            }
        },
    )
}
