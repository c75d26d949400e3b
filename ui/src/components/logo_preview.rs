use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    /// Logo picked on this screen but not uploaded yet.
    #[prop_or_default]
    pub pending: Option<String>,
    /// Logo the backend already has.
    #[prop_or_default]
    pub current: Option<String>,
}

/// Thumbnail of the logo that will be on file after saving.
#[function_component]
pub fn LogoPreview(props: &Props) -> Html {
    let (src, caption) = match (&props.pending, &props.current) {
        (Some(pending), _) => (pending.clone(), "New logo (not saved yet)"),
        (None, Some(current)) => (current.clone(), "Current logo"),
        (None, None) => {
            return html! {
                <div class="w-24 h-24 flex items-center justify-center rounded
                            border border-dashed border-neutral-300
                            dark:border-neutral-600 text-xs text-neutral-500">
                    {"No logo"}
                </div>
            };
        }
    };

    html! {
        <figure class="space-y-1">
            <img
                src={src}
                alt="Company logo"
                class="w-24 h-24 object-contain rounded border
                       border-neutral-200 dark:border-neutral-700
                       bg-neutral-50 dark:bg-neutral-800"
            />
            <figcaption class="text-xs text-neutral-500 dark:text-neutral-400">
                {caption}
            </figcaption>
        </figure>
    }
}
