use common::CustomerField;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::form_state::PricingForm;

#[derive(Properties, PartialEq)]
pub struct CustomerFormProps {
    pub form: PricingForm,
    pub on_input: Callback<(CustomerField, String)>,
    pub on_submit: Callback<()>,
    pub on_self_test: Callback<()>,
    pub on_sample: Callback<()>,
    pub on_reset: Callback<()>,
}

#[function_component(CustomerForm)]
pub fn customer_form(props: &CustomerFormProps) -> Html {
    let onsubmit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };

    let button = |label: &'static str, icon: &'static str, class: &'static str, action: &Callback<()>| {
        let action = action.clone();
        html! {
            <button
                type="button"
                class={classes!("btn", class)}
                onclick={Callback::from(move |_| action.emit(()))}
            >
                <i class={icon}></i>
                {format!(" {}", label)}
            </button>
        }
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-lg">{"Customer Profile"}</h3>
                <p class="text-sm text-gray-500 mb-4">{"Enter customer attributes to get a personalised price"}</p>

                <form id="customerForm" onsubmit={onsubmit} novalidate={true} class="space-y-4">
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        { for CustomerField::ALL.into_iter().map(|field| {
                            let on_input = props.on_input.clone();
                            let oninput = Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                on_input.emit((field, input.value()));
                            });

                            // Re-keyed per fill so the input is rebuilt from the preset;
                            // between fills the browser owns the text.
                            html! {
                                <div class="form-control" key={format!("{}-{}", field.key(), props.form.fill_revision())}>
                                    <label class="label" for={field.key()}>
                                        <span class="label-text">{field.label()}</span>
                                    </label>
                                    <input
                                        type="number"
                                        step="any"
                                        id={field.key()}
                                        name={field.key()}
                                        class="input input-bordered w-full"
                                        value={props.form.preset(field).to_string()}
                                        oninput={oninput}
                                    />
                                </div>
                            }
                        }) }
                    </div>

                    <div class="flex flex-wrap gap-2 pt-2">
                        <button type="submit" class="btn btn-primary">
                            <i class="fas fa-calculator"></i>
                            {" Calculate Price"}
                        </button>
                        { button("Load Sample Data", "fas fa-user", "btn-secondary", &props.on_sample) }
                        { button("Test Model", "fas fa-vial", "btn-accent", &props.on_self_test) }
                        { button("Reset", "fas fa-undo", "btn-ghost", &props.on_reset) }
                    </div>
                </form>
            </div>
        </div>
    }
}
