use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingIndicatorProps {
    pub visible: bool,
    #[prop_or_default]
    pub text: Option<String>,
}

/// Spinner shown while a pricing request is in flight.
#[function_component(LoadingIndicator)]
pub fn loading_indicator(props: &LoadingIndicatorProps) -> Html {
    html! {
        <div
            id="loadingIndicator"
            class={classes!("flex", "flex-col", "justify-center", "items-center", "py-12", "gap-4", (!props.visible).then_some("hidden"))}
        >
            <span class="loading loading-spinner loading-lg"></span>
            {if let Some(text) = &props.text {
                html! { <p class="text-sm text-gray-500">{text}</p> }
            } else {
                html! {}
            }}
        </div>
    }
}
