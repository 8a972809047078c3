pub mod state;

use yew::{context::ContextHandle, prelude::*};
use yew_router::{history::History, prelude::*};

use self::state::{FollowAction, Loaded, LoadTicket, Phase, ProfileState, Tab};
use crate::{
    components::{article_card::ArticleCard, loader::Loader},
    config::Config,
    models::{Connections, ProfilePayload, Session},
    services::{notify, ApiHandle, ApiResult, HttpApi},
    Route,
};

pub enum Msg {
    SessionChanged(Session),
    Loaded(LoadTicket, ApiResult<ProfilePayload>),
    ToggleFollow,
    FollowFinished(FollowAction, ApiResult<()>),
    SelectTab(Tab),
    ShowConnections(Connections),
    GoHome,
}

#[derive(Properties, PartialEq)]
pub struct Props {
    pub user_id: String,
}

pub struct UserPage {
    state: ProfileState,
    session: Session,
    api: ApiHandle,
    _session_listener: Option<ContextHandle<Session>>,
}

impl UserPage {
    fn load(&mut self, ctx: &Context<Self>) {
        let ticket = self.state.begin_load(&ctx.props().user_id);
        let request = self.api.fetch_user_profile(ticket.user_id());

        ctx.link()
            .send_future(async move { Msg::Loaded(ticket, request.await) });
    }

    fn view_not_found(&self, ctx: &Context<Self>) -> Html {
        html! {
            <div class="flex-1 max-w-4xl mx-auto p-6">
                <div class="text-center py-12">
                    <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-4">{"کاربر یافت نشد"}</h2>
                    <button
                        onclick={ctx.link().callback(|_| Msg::GoHome)}
                        class="bg-blue-500 hover:bg-blue-600 text-white px-6 py-3 rounded-lg transition-colors"
                    >
                        {"بازگشت به صفحه اصلی"}
                    </button>
                </div>
            </div>
        }
    }

    fn view_header(&self, ctx: &Context<Self>, loaded: &Loaded) -> Html {
        let profile = &loaded.profile;
        let viewer = self.session.principal();

        let follow_class = if loaded.is_following {
            "bg-gray-200 dark:bg-gray-700 text-gray-700 dark:text-gray-300 hover:bg-gray-300 dark:hover:bg-gray-600"
        } else {
            "bg-blue-500 hover:bg-blue-600 text-white"
        };

        html! {
            <div class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700">
                <div class="p-6">
                    <div class="h-32 md:h-48 bg-gradient-to-r from-blue-500 to-purple-600 rounded-xl mb-6"></div>

                    <div class="flex flex-col md:flex-row md:items-end md:justify-between -mt-16 md:-mt-20">
                        <div class="flex flex-col md:flex-row md:items-end space-y-4 md:space-y-0 md:space-x-6 md:space-x-reverse">
                            <img
                                src={profile.avatar.clone().unwrap_or_default()}
                                alt={profile.display_name().to_string()}
                                class="w-24 h-24 md:w-32 md:h-32 rounded-full border-4 border-white dark:border-gray-800 shadow-lg"
                            />
                            <div class="text-center md:text-right">
                                <div class="flex items-center justify-center md:justify-start space-x-2 space-x-reverse mb-2">
                                    <h1 class="text-2xl md:text-3xl font-bold text-gray-900 dark:text-white">
                                        {profile.display_name().to_string()}
                                    </h1>
                                    if profile.verified {
                                        <span class="w-6 h-6 bg-blue-500 text-white rounded-full flex items-center justify-center">{"✓"}</span>
                                    }
                                </div>
                                <p class="text-gray-600 dark:text-gray-400 mb-2">{format!("@{}", profile.handle())}</p>
                                if let Some(bio) = profile.bio() {
                                    <p class="text-gray-700 dark:text-gray-300 max-w-md">{bio.to_string()}</p>
                                }
                            </div>
                        </div>

                        if self.state.shows_follow_control(viewer) {
                            <div class="flex items-center space-x-3 space-x-reverse mt-4 md:mt-0">
                                <button
                                    onclick={ctx.link().callback(|_| Msg::ToggleFollow)}
                                    disabled={self.state.follow_pending()}
                                    class={format!("px-6 py-2 rounded-lg font-medium transition-colors {}", follow_class)}
                                >
                                    <span>{self.state.follow_label()}</span>
                                </button>
                            </div>
                        }
                    </div>

                    <div class="flex items-center justify-center md:justify-start space-x-8 space-x-reverse mt-6 pt-6 border-t border-gray-200 dark:border-gray-700">
                        { stat(profile.posts_count, "مقاله") }
                        { stat_button(
                            profile.followers_count,
                            "دنبال‌کننده",
                            ctx.link().callback(|_| Msg::ShowConnections(Connections::Followers)),
                        ) }
                        { stat_button(
                            profile.following_count,
                            "دنبال شده",
                            ctx.link().callback(|_| Msg::ShowConnections(Connections::Following)),
                        ) }
                    </div>

                    <div class="flex flex-wrap items-center justify-center md:justify-start gap-4 mt-4 text-sm text-gray-500 dark:text-gray-400">
                        if let Some(location) = profile.location() {
                            <span>{location.to_string()}</span>
                        }
                        if let Some(joined_on) = profile.joined_on() {
                            <span>{format!("عضو از {joined_on}")}</span>
                        }
                        if let Some(website) = profile.website() {
                            <a href={website.to_string()} target="_blank" rel="noopener noreferrer" class="text-blue-500 hover:text-blue-600 transition-colors">
                                {"وبسایت شخصی"}
                            </a>
                        }
                    </div>
                </div>
            </div>
        }
    }

    fn view_tabs(&self, ctx: &Context<Self>, loaded: &Loaded) -> Html {
        let tab_class = |tab: Tab| {
            if self.state.tab() == tab {
                "border-blue-500 text-blue-600 dark:text-blue-400"
            } else {
                "border-transparent text-gray-500 hover:text-gray-700 dark:hover:text-gray-300"
            }
        };

        html! {
            <div class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700">
                <div class="px-6 flex space-x-8 space-x-reverse">
                    <button
                        onclick={ctx.link().callback(|_| Msg::SelectTab(Tab::Posts))}
                        class={format!("py-4 border-b-2 font-medium text-sm transition-colors {}", tab_class(Tab::Posts))}
                    >
                        <span>{"مقالات"}</span>
                        <span class="bg-gray-100 dark:bg-gray-700 text-gray-600 dark:text-gray-400 px-2 py-1 rounded-full text-xs mr-2">
                            {loaded.posts.len()}
                        </span>
                    </button>
                    <button
                        onclick={ctx.link().callback(|_| Msg::SelectTab(Tab::About))}
                        class={format!("py-4 border-b-2 font-medium text-sm transition-colors {}", tab_class(Tab::About))}
                    >
                        {"درباره"}
                    </button>
                </div>
            </div>
        }
    }

    fn view_posts(&self, loaded: &Loaded) -> Html {
        if loaded.posts.is_empty() {
            return html! {
                <div class="text-center py-12">
                    <h3 class="text-xl font-medium text-gray-900 dark:text-white mb-2">{"هنوز مقاله‌ای منتشر نشده"}</h3>
                    <p class="text-gray-500 dark:text-gray-400">
                        {format!("{} هنوز مقاله‌ای منتشر نکرده است.", loaded.profile.display_name())}
                    </p>
                </div>
            };
        }

        html! {
            <div class="space-y-6">
                { for loaded.posts.iter().map(|article| html! {
                    <ArticleCard key={article.id.clone()} article={article.clone()}/>
                }) }
            </div>
        }
    }

    fn view_about(&self, loaded: &Loaded) -> Html {
        let profile = &loaded.profile;
        let (verified_class, verified_text) = if profile.verified {
            ("text-green-600", "تایید شده")
        } else {
            ("text-gray-500", "تایید نشده")
        };

        html! {
            <div class="bg-white dark:bg-gray-800 rounded-xl p-6">
                <h3 class="text-xl font-bold text-gray-900 dark:text-white mb-4">
                    {format!("درباره {}", profile.display_name())}
                </h3>
                {
                    match profile.bio() {
                        Some(bio) => html! { <p class="text-gray-700 dark:text-gray-300 leading-relaxed mb-6">{bio.to_string()}</p> },
                        None => html! { <p class="text-gray-500 dark:text-gray-400 mb-6">{"این کاربر هنوز بیوگرافی ننوشته است."}</p> },
                    }
                }
                <div class="grid grid-cols-1 md:grid-cols-2 gap-6 text-sm">
                    <div class="space-y-2">
                        <h4 class="font-semibold text-gray-900 dark:text-white mb-3">{"اطلاعات کلی"}</h4>
                        if let Some(joined_on) = profile.joined_on() {
                            { row("تاریخ عضویت:", joined_on.to_string(), "text-gray-900 dark:text-white") }
                        }
                        if let Some(location) = profile.location() {
                            { row("موقعیت:", location.to_string(), "text-gray-900 dark:text-white") }
                        }
                        { row("وضعیت تایید:", verified_text.to_string(), verified_class) }
                    </div>
                    <div class="space-y-2">
                        <h4 class="font-semibold text-gray-900 dark:text-white mb-3">{"آمار فعالیت"}</h4>
                        { row("تعداد مقالات:", profile.posts_count.to_string(), "text-gray-900 dark:text-white") }
                        { row("دنبال‌کنندگان:", profile.followers_count.to_string(), "text-gray-900 dark:text-white") }
                        { row("دنبال شده‌ها:", profile.following_count.to_string(), "text-gray-900 dark:text-white") }
                    </div>
                </div>
                if let Some(website) = profile.website() {
                    <div class="mt-6 pt-6 border-t border-gray-200 dark:border-gray-700">
                        <h4 class="font-semibold text-gray-900 dark:text-white mb-3">{"لینک‌ها"}</h4>
                        <a href={website.to_string()} target="_blank" rel="noopener noreferrer" class="text-blue-500 hover:text-blue-600 transition-colors">
                            {"وبسایت شخصی"}
                        </a>
                    </div>
                }
            </div>
        }
    }
}

fn stat(value: i64, label: &'static str) -> Html {
    html! {
        <div class="text-center">
            <div class="text-xl font-bold text-gray-900 dark:text-white">{value}</div>
            <div class="text-sm text-gray-500 dark:text-gray-400">{label}</div>
        </div>
    }
}

fn stat_button(value: i64, label: &'static str, onclick: Callback<MouseEvent>) -> Html {
    html! {
        <button onclick={onclick} class="text-center hover:bg-gray-50 dark:hover:bg-gray-700 px-3 py-2 rounded-lg transition-colors">
            <div class="text-xl font-bold text-gray-900 dark:text-white">{value}</div>
            <div class="text-sm text-gray-500 dark:text-gray-400">{label}</div>
        </button>
    }
}

fn row(label: &'static str, value: String, value_class: &'static str) -> Html {
    html! {
        <div class="flex justify-between">
            <span class="text-gray-500 dark:text-gray-400">{label}</span>
            <span class={value_class}>{value}</span>
        </div>
    }
}

impl Component for UserPage {
    type Message = Msg;
    type Properties = Props;

    fn create(ctx: &Context<Self>) -> Self {
        let (session, session_listener) = match ctx
            .link()
            .context::<Session>(ctx.link().callback(Msg::SessionChanged))
        {
            Some((session, handle)) => (session, Some(handle)),
            None => (Session::anonymous(), None),
        };

        let api = ctx
            .link()
            .context::<ApiHandle>(Callback::noop())
            .map(|(api, _)| api)
            .unwrap_or_else(|| ApiHandle::new(HttpApi::from_config(&Config::load())));

        let mut page = Self {
            state: ProfileState::default(),
            session,
            api,
            _session_listener: session_listener,
        };
        page.load(ctx);
        page
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::SessionChanged(session) => {
                self.session = session;
                self.state.refresh_viewer(self.session.principal());
                true
            }
            Msg::Loaded(ticket, result) => {
                self.state
                    .finish_load(ticket, result, self.session.principal())
            }
            Msg::ToggleFollow => match self.state.begin_follow(self.session.principal()) {
                Ok(action) => {
                    let request = action.send(&*self.api);
                    ctx.link()
                        .send_future(async move { Msg::FollowFinished(action, request.await) });
                    true
                }
                Err(refusal) => {
                    if let Some(notice) = refusal.into_notice() {
                        notify::show(&notice);
                    }
                    false
                }
            },
            Msg::FollowFinished(action, result) => {
                if let Some(notice) = self.state.finish_follow(action, result) {
                    notify::show(&notice);
                }
                true
            }
            Msg::SelectTab(tab) => {
                if self.state.tab() == tab {
                    return false;
                }
                self.state.select_tab(tab);
                true
            }
            Msg::ShowConnections(connections) => {
                if let Some(history) = ctx.link().history() {
                    history.push(Route::connections(self.state.user_id(), connections));
                }
                false
            }
            Msg::GoHome => {
                if let Some(history) = ctx.link().history() {
                    history.push(Route::Home);
                }
                false
            }
        }
    }

    fn changed(&mut self, ctx: &Context<Self>) -> bool {
        if ctx.props().user_id == self.state.user_id() {
            return false;
        }
        self.load(ctx);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        match self.state.phase() {
            Phase::Loading => html! {
                <div class="flex-1 max-w-4xl mx-auto p-6">
                    <Loader text="در حال بارگذاری پروفایل..."/>
                </div>
            },
            Phase::NotFound => self.view_not_found(ctx),
            Phase::Loaded(loaded) => html! {
                <div class="flex-1 max-w-4xl mx-auto">
                    { self.view_header(ctx, loaded) }
                    { self.view_tabs(ctx, loaded) }
                    <div class="bg-gray-50 dark:bg-gray-900 min-h-screen p-6">
                        {
                            match self.state.tab() {
                                Tab::Posts => self.view_posts(loaded),
                                Tab::About => self.view_about(loaded),
                            }
                        }
                    </div>
                </div>
            },
        }
    }
}
