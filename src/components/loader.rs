use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    #[prop_or_default]
    pub text: String,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    html! {
        <div class="flex flex-col items-center justify-center py-12">
            <div class="w-10 h-10 border-4 border-blue-500 border-t-transparent rounded-full animate-spin"></div>
            if !props.text.is_empty() {
                <p class="mt-4 text-gray-500 dark:text-gray-400">{props.text.clone()}</p>
            }
        </div>
    }
}
