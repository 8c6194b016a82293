use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub visible: bool,
    pub message: String,
}

#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    if props.visible {
        log::warn!("Displaying error to user: {}", props.message);
    }

    html! {
        <div id="errorContainer" class={classes!("py-6", (!props.visible).then_some("hidden"))}>
            <div class="alert alert-error">
                <i class="fas fa-exclamation-circle text-2xl"></i>
                <div class="flex flex-col gap-2">
                    <span class="font-semibold">{"Something went wrong"}</span>
                    <span id="errorMessage" class="text-sm">{&props.message}</span>
                </div>
            </div>
        </div>
    }
}
