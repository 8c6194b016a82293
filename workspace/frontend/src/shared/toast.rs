use std::rc::Rc;

use yew::prelude::*;

use crate::settings;

#[derive(Debug, Clone, PartialEq)]
pub enum ToastType {
    Success,
    Error,
}

impl ToastType {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastType::Success => "alert-success",
            ToastType::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastType::Success => "fas fa-check-circle",
            ToastType::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub message: String,
    pub toast_type: ToastType,
}

/// Toasts currently on screen.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastList {
    toasts: Vec<Toast>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ToastAction {
    Add(Toast),
    Remove(usize),
}

impl ToastList {
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn apply(&mut self, action: ToastAction) {
        match action {
            ToastAction::Add(toast) => self.toasts.push(toast),
            ToastAction::Remove(id) => self.toasts.retain(|t| t.id != id),
        }
    }
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Handle for raising toasts. Every callback acts on the current list, so a
/// handle captured before an `await` stays valid.
#[derive(Clone, PartialEq)]
pub struct ToastContext {
    pub add_toast: Callback<(String, ToastType)>,
    pub remove_toast: Callback<usize>,
}

impl ToastContext {
    pub fn show_success(&self, message: String) {
        self.add_toast.emit((message, ToastType::Success));
    }

    pub fn show_error(&self, message: String) {
        self.add_toast.emit((message, ToastType::Error));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id = use_mut_ref(|| 0usize);

    let context = use_memo((), {
        let dispatcher = list.dispatcher();
        move |_| {
            let add_toast = {
                let dispatcher = dispatcher.clone();
                Callback::from(move |(message, toast_type): (String, ToastType)| {
                    let id = {
                        let mut next_id = next_id.borrow_mut();
                        *next_id += 1;
                        *next_id
                    };
                    dispatcher.dispatch(ToastAction::Add(Toast { id, message, toast_type }));

                    let dispatcher = dispatcher.clone();
                    let duration = settings::get_settings().toast_duration_ms;
                    gloo_timers::callback::Timeout::new(duration, move || {
                        dispatcher.dispatch(ToastAction::Remove(id));
                    })
                    .forget();
                })
            };

            let remove_toast = Callback::from(move |id: usize| {
                dispatcher.dispatch(ToastAction::Remove(id));
            });

            ToastContext { add_toast, remove_toast }
        }
    });
    let remove_toast = context.remove_toast.clone();

    html! {
        <ContextProvider<ToastContext> context={(*context).clone()}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for list.toasts().iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let remove_toast = remove_toast.clone();
                        Callback::from(move |_| remove_toast.emit(id))
                    };

                    html! {
                        <div key={id} class={classes!("alert", toast.toast_type.alert_class(), "shadow-lg")}>
                            <i class={toast.toast_type.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: usize, message: &str) -> Toast {
        Toast {
            id,
            message: message.to_string(),
            toast_type: ToastType::Success,
        }
    }

    #[test]
    fn expiring_toast_leaves_later_ones() {
        let mut list = ToastList::default();
        list.apply(ToastAction::Add(toast(1, "Failed to render price chart")));
        list.apply(ToastAction::Add(toast(2, "Model test successful!")));

        list.apply(ToastAction::Remove(1));

        assert_eq!(list.toasts(), &[toast(2, "Model test successful!")]);
    }

    #[test]
    fn overlapping_adds_are_all_kept() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Add(toast(1, "first")));
        let list = list.reduce(ToastAction::Add(toast(2, "second")));

        let ids: Vec<usize> = list.toasts().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn removing_unknown_or_closed_toast_is_a_no_op() {
        let mut list = ToastList::default();
        list.apply(ToastAction::Add(toast(3, "kept")));
        list.apply(ToastAction::Remove(3));
        list.apply(ToastAction::Remove(3));
        list.apply(ToastAction::Remove(9));

        assert!(list.toasts().is_empty());
    }
}
