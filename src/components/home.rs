use yew::prelude::*;

#[function_component(Home)]
pub fn home() -> Html {
    html! {
        <div class="flex-1 max-w-4xl mx-auto p-6 text-center">
            <h1 class="text-3xl font-bold text-gray-900 dark:text-white">{"Quill"}</h1>
        </div>
    }
}
