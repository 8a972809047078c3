use log::warn;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::{
    components::loader::Loader,
    config::Config,
    models::{Connections, UserProfile},
    services::{ApiHandle, ApiResult, HttpApi},
    Route,
};

pub enum Msg {
    Loaded(String, Connections, ApiResult<Vec<UserProfile>>),
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub user_id: String,
    pub connections: Connections,
}

enum Listing {
    Loading,
    Ready(Vec<UserProfile>),
    Failed(String),
}

/// Followers or followed accounts of one user.
pub struct FollowList {
    listing: Listing,
    api: ApiHandle,
}

impl FollowList {
    fn load(&mut self, ctx: &Context<Self>) {
        let Props { user_id, connections } = ctx.props();
        let (user_id, connections) = (user_id.clone(), *connections);
        let request = self.api.fetch_connections(&user_id, connections);

        self.listing = Listing::Loading;
        ctx.link()
            .send_future(async move { Msg::Loaded(user_id, connections, request.await) });
    }

    fn view_users(&self, users: &[UserProfile]) -> Html {
        if users.is_empty() {
            return html! {
                <p class="text-center py-12 text-gray-500 dark:text-gray-400">{"کاربری برای نمایش وجود ندارد."}</p>
            };
        }

        html! {
            <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                { for users.iter().map(|user| html! {
                    <li key={user.id.clone()}>
                        <Link<Route> to={Route::User { user_id: user.id.clone() }}>
                            <div class="flex items-center space-x-4 space-x-reverse py-4">
                                <img
                                    src={user.avatar.clone().unwrap_or_default()}
                                    alt={user.display_name().to_string()}
                                    class="w-12 h-12 rounded-full"
                                />
                                <div>
                                    <p class="font-medium text-gray-900 dark:text-white">{user.display_name().to_string()}</p>
                                    <p class="text-sm text-gray-500 dark:text-gray-400">{format!("@{}", user.handle())}</p>
                                </div>
                            </div>
                        </Link<Route>>
                    </li>
                }) }
            </ul>
        }
    }
}

impl Component for FollowList {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let api = ctx
            .link()
            .context::<ApiHandle>(Callback::noop())
            .map(|(api, _)| api)
            .unwrap_or_else(|| ApiHandle::new(HttpApi::from_config(&Config::load())));

        let mut list = Self {
            listing: Listing::Loading,
            api,
        };
        list.load(ctx);
        list
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Loaded(user_id, connections, result) => {
                let props = ctx.props();
                if user_id != props.user_id || connections != props.connections {
                    return false;
                }

                self.listing = match result {
                    Ok(users) => Listing::Ready(users),
                    Err(e) => {
                        warn!("could not load {} of {}: {}", connections.path_segment(), user_id, e);
                        Listing::Failed(e.user_message().to_string())
                    }
                };
                true
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>) -> bool {
        self.load(ctx);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let Props { user_id, connections } = ctx.props();

        html! {
            <div class="flex-1 max-w-4xl mx-auto p-6">
                <div class="flex items-center justify-between mb-6">
                    <h1 class="text-2xl font-bold text-gray-900 dark:text-white">{connections.title()}</h1>
                    <Link<Route> to={Route::User { user_id: user_id.clone() }}>
                        <span class="text-blue-500 hover:text-blue-600 transition-colors">{"بازگشت به پروفایل"}</span>
                    </Link<Route>>
                </div>
                <div class="bg-white dark:bg-gray-800 rounded-xl px-6">
                    {
                        match &self.listing {
                            Listing::Loading => html! { <Loader/> },
                            Listing::Ready(users) => self.view_users(users),
                            Listing::Failed(message) => html! {
                                <p class="text-center py-12 text-red-500">{message.clone()}</p>
                            },
                        }
                    }
                </div>
            </div>
        }
    }
}
