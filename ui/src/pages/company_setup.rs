use std::rc::Rc;

use payloads::{APIClient, CompanyId, LogoFile};
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::{
    Route, State,
    company_form::{CompanyField, CompanySetup, SetupCallbacks},
    components::LogoPreview,
    contexts::toast::use_toast,
    get_api_client,
    hooks::use_company_by_id,
};

#[derive(Properties, PartialEq)]
pub struct Props {
    pub company_id: CompanyId,
}

#[function_component]
pub fn CompanySetupPage(props: &Props) -> Html {
    let navigator = use_navigator();
    let toasts = use_toast();
    let trigger = use_force_update();
    let company_hook = use_company_by_id(props.company_id.clone());
    let (state, _) = use_store::<State>();

    let controller: Rc<CompanySetup<APIClient>> = {
        let navigator = navigator.clone();
        use_memo(props.company_id.clone(), move |company_id| {
            CompanySetup::new(
                company_id.clone(),
                get_api_client(),
                SetupCallbacks {
                    notify: Callback::from(move |n| toasts.notify(n)),
                    navigate: Callback::from(move |route: Route| {
                        if let Some(navigator) = &navigator {
                            navigator.push(&route);
                        }
                    }),
                    on_change: Callback::from(move |_| trigger.force_update()),
                },
            )
        })
    };

    let remote = state.get_company(&props.company_id).cloned();

    // One-way sync from the store into the form
    {
        let controller = controller.clone();
        use_effect_with(remote.clone(), move |remote| {
            controller.on_remote_company_change(remote.as_ref());
        });
    }

    // Late responses are dropped once the screen is gone
    {
        let controller = controller.clone();
        use_effect_with(props.company_id.clone(), move |_| {
            move || controller.dispose()
        });
    }

    let on_submit = {
        let controller = controller.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let controller = controller.clone();
            yew::platform::spawn_local(async move {
                controller.submit().await;
            });
        })
    };

    let on_back = {
        let navigator = navigator.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(navigator) = &navigator {
                navigator.push(&Route::Companies);
            }
        })
    };

    let on_file_change = {
        let controller = controller.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            let controller = controller.clone();
            yew::platform::spawn_local(async move {
                match read_logo(file).await {
                    Ok(logo) => controller.on_file_change(Some(logo)),
                    Err(e) => tracing::error!("failed to read logo: {e:?}"),
                }
            });
        })
    };

    let is_loading = controller.is_loading();

    let text_input = |field: CompanyField| {
        let oninput = {
            let controller = controller.clone();
            Callback::from(move |e: InputEvent| {
                let input: HtmlInputElement = e.target_unchecked_into();
                controller.on_field_change(field, input.value());
            })
        };
        let id = format!("company-{}", field.input_name());
        html! {
            <div>
                <label for={id.clone()} class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                    {field.label()}
                </label>
                <input
                    id={id}
                    type="text"
                    name={field.input_name()}
                    value={controller.field(field)}
                    oninput={oninput}
                    class="w-full px-3 py-2 border border-neutral-300 dark:border-neutral-600
                           rounded-md shadow-sm bg-white dark:bg-neutral-700
                           text-neutral-900 dark:text-neutral-100
                           focus:outline-none focus:ring-2 focus:ring-neutral-500 focus:border-neutral-500"
                />
            </div>
        }
    };

    let fetch_status = if company_hook.is_loading && remote.is_none() {
        html! {
            <p class="text-sm text-neutral-500 dark:text-neutral-400">
                {"Loading company..."}
            </p>
        }
    } else if let Some(error) = &company_hook.error {
        html! {
            <p class="text-sm text-red-700 dark:text-red-400">
                {format!("Error loading company: {error}")}
            </p>
        }
    } else {
        html! {}
    };

    let last_updated = remote.as_ref().and_then(|c| c.updated_at).map(|at| {
        html! {
            <p class="text-xs text-neutral-500 dark:text-neutral-400">
                {format!("Last updated {}", at.strftime("%Y-%m-%d %H:%M UTC"))}
            </p>
        }
    });

    html! {
        <div class="max-w-xl mx-auto my-10">
            <form onsubmit={on_submit}>
                <div class="flex items-center gap-5 p-8">
                    <button
                        type="button"
                        onclick={on_back}
                        class="flex items-center gap-2 px-3 py-2 border border-neutral-300
                               dark:border-neutral-600 rounded-md text-neutral-500 font-semibold
                               hover:bg-neutral-50 dark:hover:bg-neutral-700"
                    >
                        <span>{"←"}</span>
                        <span>{"Back"}</span>
                    </button>
                    <h1 class="font-bold text-xl">{"Company Setup"}</h1>
                </div>

                {fetch_status}

                <div class="grid grid-cols-2 gap-4">
                    {for CompanyField::ALL.into_iter().map(text_input)}
                    <div>
                        <label for="company-logo" class="block text-sm font-medium text-neutral-700 dark:text-neutral-300 mb-2">
                            {"Logo"}
                        </label>
                        <input
                            id="company-logo"
                            type="file"
                            accept="image/*"
                            onchange={on_file_change}
                            class="w-full text-sm text-neutral-700 dark:text-neutral-300"
                        />
                    </div>
                    <div>
                        <LogoPreview
                            pending={controller.logo_preview()}
                            current={remote.as_ref().and_then(|c| c.logo.clone())}
                        />
                    </div>
                </div>

                {for last_updated}

                if let Some(error) = controller.error() {
                    <div class="text-red-500 text-sm mt-2">{error}</div>
                }

                <button
                    type="submit"
                    disabled={is_loading}
                    class="w-full my-4 flex justify-center items-center py-2 px-4 rounded-md
                           text-sm font-medium text-white bg-neutral-900 hover:bg-neutral-800
                           dark:bg-neutral-100 dark:text-neutral-900 dark:hover:bg-neutral-200
                           disabled:opacity-50 disabled:cursor-not-allowed"
                >
                    if is_loading {
                        <span class="mr-2 h-4 w-4 animate-spin rounded-full border-2 border-current border-t-transparent"></span>
                        {"Please wait"}
                    } else {
                        {"Update"}
                    }
                </button>
            </form>
        </div>
    }
}

/// Read a picked file into memory.
async fn read_logo(file: File) -> Result<LogoFile, JsValue> {
    let buffer = JsFuture::from(file.array_buffer()).await?;
    let data = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(LogoFile {
        file_name: file.name(),
        mime_type: file.type_(),
        data,
    })
}
