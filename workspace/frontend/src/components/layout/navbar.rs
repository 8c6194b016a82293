use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none px-4">
                <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content text-xl">
                    <i class="fas fa-tags"></i>
                </div>
            </div>
            <div class="flex-1">
                <h1 class="text-xl font-bold" id="page-title">{ &props.title }</h1>
            </div>
            <div class="flex-none px-4">
                <a class="btn btn-ghost btn-sm" href="/swagger-ui" target="_blank">
                    <i class="fas fa-book"></i>
                    {" API Docs"}
                </a>
            </div>
        </div>
    }
}
