use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

pub mod company_form;
mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;

use components::ToastContainer;
use contexts::toast::ToastProvider;
use pages::{CompaniesPage, CompanySetupPage};
pub(crate) use state::State;

/// Backend used when the page origin can't be read.
const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

// Global API client - configurable via environment or same-origin fallback
pub fn get_api_client() -> APIClient {
    // Try environment variable first (set at build time)
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .or_else(|| {
            // Fallback to same origin
            web_sys::window().and_then(|window| window.location().origin().ok())
        })
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    html! {
        <BrowserRouter>
            <ToastProvider>
                <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
                    <Switch<Route> render={switch} />
                </div>
                <ToastContainer />
            </ToastProvider>
        </BrowserRouter>
    }
}

#[derive(Debug, Clone, Routable, PartialEq, Eq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/admin/companies")]
    Companies,
    #[at("/admin/companies/:id")]
    CompanySetup { id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Home => html! { <Redirect<Route> to={Route::Companies} /> },
        Route::Companies => html! { <CompaniesPage /> },
        Route::CompanySetup { id } => html! {
            <CompanySetupPage company_id={payloads::CompanyId(id)} />
        },
        Route::NotFound => html! {
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <div class="text-center">
                    <h1 class="text-4xl font-bold text-gray-900 dark:text-white">{"404"}</h1>
                    <p class="text-gray-600 dark:text-gray-300">{"Page not found"}</p>
                </div>
            </main>
        },
    }
}
