use payloads::Company;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{Route, hooks::use_companies};

/// Company listing; the way back from (and into) the setup screen.
#[function_component]
pub fn CompaniesPage() -> Html {
    let companies_hook = use_companies();

    html! {
        <main class="max-w-3xl mx-auto px-4 sm:px-6 lg:px-8 py-8 space-y-6">
            <h1 class="text-2xl font-bold text-neutral-900 dark:text-neutral-100">
                {"Companies"}
            </h1>
            {companies_hook.render("companies", |companies, is_loading, _| {
                if companies.is_empty() {
                    return html! {
                        <p class="text-neutral-600 dark:text-neutral-400">
                            {"You haven't registered any companies yet."}
                        </p>
                    };
                }
                html! {
                    <>
                        if is_loading {
                            <p class="text-xs text-neutral-500">{"Refreshing..."}</p>
                        }
                        <ul class="divide-y divide-neutral-200 dark:divide-neutral-700">
                            {for companies.iter().map(company_row)}
                        </ul>
                    </>
                }
            })}
        </main>
    }
}

fn company_row(company: &Company) -> Html {
    html! {
        <li key={company.id.to_string()} class="flex items-center justify-between py-3">
            <div>
                <p class="font-medium text-neutral-900 dark:text-neutral-100">
                    {&company.name}
                </p>
                <p class="text-sm text-neutral-500 dark:text-neutral-400">
                    {&company.location}
                </p>
            </div>
            <Link<Route>
                to={Route::CompanySetup { id: company.id.to_string() }}
                classes="text-sm font-medium text-neutral-700 dark:text-neutral-300 hover:underline"
            >
                {"Edit"}
            </Link<Route>>
        </li>
    }
}
