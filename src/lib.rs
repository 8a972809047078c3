#![recursion_limit = "512"]

pub mod components;
pub mod config;
pub mod models;
pub mod services;

use log::{debug, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;
use yew_router::prelude::*;

use components::{follow_list::FollowList, home::Home, user_page::UserPage};
use models::{Connections, Session};
use services::{ApiHandle, HttpApi};

// Use `wee_alloc` as the global allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[derive(Debug, Clone, PartialEq, Routable)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/user/:user_id")]
    User { user_id: String },
    #[at("/user/:user_id/followers")]
    Followers { user_id: String },
    #[at("/user/:user_id/following")]
    Following { user_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}

impl Route {
    pub fn connections(user_id: &str, connections: Connections) -> Self {
        let user_id = user_id.to_string();
        match connections {
            Connections::Followers => Route::Followers { user_id },
            Connections::Following => Route::Following { user_id },
        }
    }
}

fn switch(route: &Route) -> Html {
    match route {
        Route::Home => html! { <Home/> },
        Route::User { user_id } => html! { <UserPage user_id={user_id.clone()}/> },
        Route::Followers { user_id } => html! {
            <FollowList user_id={user_id.clone()} connections={Connections::Followers}/>
        },
        Route::Following { user_id } => html! {
            <FollowList user_id={user_id.clone()} connections={Connections::Following}/>
        },
        Route::NotFound => html! {
            <div class="flex-1 max-w-4xl mx-auto p-6 text-center">
                <h1 class="text-2xl font-bold">{"404"}</h1>
            </div>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    let api = use_state(|| ApiHandle::new(HttpApi::from_config(&config::Config::load())));
    let session = use_state(Session::anonymous);

    {
        let api = (*api).clone();
        let session = session.clone();
        use_effect_with_deps(
            move |_| {
                spawn_local(async move {
                    match api.current_principal().await {
                        Ok(Some(principal)) => {
                            info!("signed in as {}", principal.id);
                            session.set(Session::signed_in(principal));
                        }
                        Ok(None) => debug!("no active session"),
                        Err(e) => warn!("could not restore session: {}", e),
                    }
                });
                || ()
            },
            (),
        );
    }

    html! {
        <ContextProvider<ApiHandle> context={(*api).clone()}>
            <ContextProvider<Session> context={(*session).clone()}>
                <BrowserRouter>
                    <Switch<Route> render={Switch::render(switch)}/>
                </BrowserRouter>
            </ContextProvider<Session>>
        </ContextProvider<ApiHandle>>
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    wasm_logger::init(wasm_logger::Config::default());
    yew::start_app::<App>();
}
