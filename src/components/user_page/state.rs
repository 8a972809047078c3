//! State behind the user profile page.
//!
//! Everything here is synchronous. The component starts a request with one of
//! the `begin_*` calls, awaits the API, then hands the result back through the
//! matching `finish_*` call.
//!
//! - Loads carry a generation number; a reply for anything but the latest load
//!   is dropped, so fast navigation between profiles never shows a stale one.
//! - Only one follow/unfollow may be outstanding per page.
//! - Nothing changes until the server confirms a follow/unfollow, so a failed
//!   call needs no rollback.
use futures::future::LocalBoxFuture;
use log::{debug, warn};

use crate::{
    models::{ArticleSummary, Principal, ProfilePayload, UserProfile},
    services::{ApiResult, Notice, ProfileApi},
};

pub const FOLLOWING_LABEL: &str = "دنبال می‌کنید";
pub const FOLLOW_LABEL: &str = "دنبال کردن";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Posts,
    About,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Loaded {
    pub profile: UserProfile,
    pub posts: Vec<ArticleSummary>,
    pub is_following: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Loading,
    Loaded(Loaded),
    NotFound,
}

/// Identifies one profile load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    user_id: String,
}

impl LoadTicket {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowKind {
    Follow,
    Unfollow,
}

/// A confirmed intent to follow or unfollow, waiting on the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FollowAction {
    pub kind: FollowKind,
    pub target_id: String,
    pub viewer_id: String,
    generation: u64,
}

impl FollowAction {
    pub fn send(&self, api: &dyn ProfileApi) -> LocalBoxFuture<'static, ApiResult<()>> {
        match self.kind {
            FollowKind::Follow => api.follow_user(&self.target_id),
            FollowKind::Unfollow => api.unfollow_user(&self.target_id),
        }
    }
}

/// Why a follow toggle did not reach the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowRefusal {
    LoginRequired(Notice),
    NotReady,
    InFlight,
}

impl FollowRefusal {
    /// Only a signed-out visitor is told anything; the other refusals are silent.
    pub fn into_notice(self) -> Option<Notice> {
        match self {
            FollowRefusal::LoginRequired(notice) => Some(notice),
            FollowRefusal::NotReady | FollowRefusal::InFlight => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ProfileState {
    user_id: String,
    phase: Phase,
    tab: Tab,
    generation: u64,
    pending_follow: Option<FollowAction>,
}

impl Default for ProfileState {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            phase: Phase::Loading,
            tab: Tab::default(),
            generation: 0,
            pending_follow: None,
        }
    }
}

impl ProfileState {
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn loaded(&self) -> Option<&Loaded> {
        match &self.phase {
            Phase::Loaded(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn is_following(&self) -> bool {
        self.loaded().is_some_and(|l| l.is_following)
    }

    pub fn follow_pending(&self) -> bool {
        self.pending_follow.is_some()
    }

    pub fn begin_load(&mut self, user_id: &str) -> LoadTicket {
        self.generation += 1;
        self.user_id = user_id.to_string();
        self.phase = Phase::Loading;
        self.tab = Tab::Posts;
        self.pending_follow = None;

        LoadTicket {
            generation: self.generation,
            user_id: self.user_id.clone(),
        }
    }

    /// Returns `false` when the reply belongs to a superseded load.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: ApiResult<ProfilePayload>,
        viewer: Option<&Principal>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!("dropping stale profile for {}", ticket.user_id);
            return false;
        }

        self.phase = match result {
            Ok(ProfilePayload { user, posts }) => {
                let is_following = viewer.is_some_and(|v| user.is_followed_by(&v.id));
                Phase::Loaded(Loaded {
                    profile: user,
                    posts,
                    is_following,
                })
            }
            Err(e) => {
                warn!("profile {} unavailable: {}", ticket.user_id, e);
                Phase::NotFound
            }
        };

        true
    }

    /// Re-derives follow status after a sign-in or sign-out.
    pub fn refresh_viewer(&mut self, viewer: Option<&Principal>) {
        if let Phase::Loaded(loaded) = &mut self.phase {
            loaded.is_following = viewer.is_some_and(|v| loaded.profile.is_followed_by(&v.id));
        }
    }

    pub fn begin_follow(&mut self, viewer: Option<&Principal>) -> Result<FollowAction, FollowRefusal> {
        let viewer = viewer.ok_or_else(|| FollowRefusal::LoginRequired(Notice::login_required()))?;
        let loaded = self.loaded().ok_or(FollowRefusal::NotReady)?;

        if self.pending_follow.is_some() {
            return Err(FollowRefusal::InFlight);
        }

        let action = FollowAction {
            kind: if loaded.is_following {
                FollowKind::Unfollow
            } else {
                FollowKind::Follow
            },
            target_id: self.user_id.clone(),
            viewer_id: viewer.id.clone(),
            generation: self.generation,
        };

        self.pending_follow = Some(action.clone());
        Ok(action)
    }

    /// Applies a confirmed follow/unfollow. A failure comes back as a notice
    /// for the user and leaves the page as it was.
    pub fn finish_follow(&mut self, action: FollowAction, result: ApiResult<()>) -> Option<Notice> {
        if action.generation != self.generation {
            debug!("ignoring follow result for {}", action.target_id);
            return None;
        }
        self.pending_follow = None;

        let loaded = match &mut self.phase {
            Phase::Loaded(loaded) => loaded,
            _ => return None,
        };

        if let Err(e) = result {
            return Some(Notice::from(&e));
        }

        let profile = &mut loaded.profile;
        match action.kind {
            FollowKind::Follow => {
                loaded.is_following = true;
                profile.followers_count += 1;
                if !profile.is_followed_by(&action.viewer_id) {
                    profile.followers.push(action.viewer_id);
                }
            }
            FollowKind::Unfollow => {
                loaded.is_following = false;
                profile.followers_count = (profile.followers_count - 1).max(0);
                profile.followers.retain(|id| *id != action.viewer_id);
            }
        }

        None
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Nobody follows themselves, and signed-out visitors get no button.
    pub fn shows_follow_control(&self, viewer: Option<&Principal>) -> bool {
        viewer.is_some_and(|v| v.id != self.user_id)
    }

    pub fn follow_label(&self) -> &'static str {
        if self.is_following() {
            FOLLOWING_LABEL
        } else {
            FOLLOW_LABEL
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use futures::{executor::block_on, future};

    use super::*;
    use crate::{
        models::Connections,
        services::{notify::LOGIN_REQUIRED, ApiError},
    };

    fn principal(id: &str, role: &str) -> Principal {
        Principal {
            id: id.to_string(),
            role: role.to_string(),
            name: None,
            username: None,
            email: None,
        }
    }

    fn profile(id: &str, followers: &[&str], followers_count: i64) -> UserProfile {
        UserProfile {
            id: id.to_string(),
            name: Some("Sara".to_string()),
            username: Some("sara".to_string()),
            email: None,
            avatar: None,
            bio: None,
            location: None,
            website: None,
            verified: false,
            created_at: Some("2024-03-01T10:20:00.000Z".to_string()),
            posts_count: 0,
            followers_count,
            following_count: 0,
            followers: followers.iter().map(|f| f.to_string()).collect(),
        }
    }

    fn payload(user: UserProfile) -> ApiResult<ProfilePayload> {
        Ok(ProfilePayload { user, posts: vec![] })
    }

    fn loaded_state(followers: &[&str], count: i64, viewer: Option<&Principal>) -> ProfileState {
        let mut state = ProfileState::default();
        let ticket = state.begin_load("u2");
        assert!(state.finish_load(ticket, payload(profile("u2", followers, count)), viewer));
        state
    }

    #[derive(Default)]
    struct MockApi {
        follows: Cell<usize>,
        unfollows: Cell<usize>,
        reply: RefCell<Option<ApiResult<()>>>,
    }

    impl MockApi {
        fn replying(reply: ApiResult<()>) -> Self {
            Self {
                reply: RefCell::new(Some(reply)),
                ..Self::default()
            }
        }

        fn next_reply(&self) -> ApiResult<()> {
            self.reply.borrow_mut().take().unwrap_or(Ok(()))
        }
    }

    impl ProfileApi for MockApi {
        fn current_principal(&self) -> LocalBoxFuture<'static, ApiResult<Option<Principal>>> {
            Box::pin(future::ready(Ok(None)))
        }

        fn fetch_user_profile(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<ProfilePayload>> {
            Box::pin(future::ready(payload(profile(user_id, &[], 0))))
        }

        fn follow_user(&self, _user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>> {
            self.follows.set(self.follows.get() + 1);
            Box::pin(future::ready(self.next_reply()))
        }

        fn unfollow_user(&self, _user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>> {
            self.unfollows.set(self.unfollows.get() + 1);
            Box::pin(future::ready(self.next_reply()))
        }

        fn fetch_connections(
            &self,
            _user_id: &str,
            _connections: Connections,
        ) -> LocalBoxFuture<'static, ApiResult<Vec<UserProfile>>> {
            Box::pin(future::ready(Ok(vec![])))
        }
    }

    /// Drives a toggle the way the page does.
    fn toggle(state: &mut ProfileState, api: &MockApi, viewer: Option<&Principal>) -> Option<Notice> {
        match state.begin_follow(viewer) {
            Ok(action) => {
                let result = block_on(action.send(api));
                state.finish_follow(action, result)
            }
            Err(refusal) => refusal.into_notice(),
        }
    }

    #[test]
    fn follower_membership_sets_is_following() {
        let viewer = principal("u1", "user");
        let state = loaded_state(&["u1"], 1, Some(&viewer));

        assert!(state.is_following());
        assert_eq!(state.follow_label(), "دنبال می‌کنید");
    }

    #[test]
    fn viewer_outside_follower_list_is_not_following() {
        let viewer = principal("u3", "user");
        let state = loaded_state(&["u1"], 1, Some(&viewer));

        assert!(!state.is_following());
        assert_eq!(state.follow_label(), FOLLOW_LABEL);
    }

    #[test]
    fn anonymous_viewer_is_never_following() {
        let state = loaded_state(&["u1"], 1, None);

        assert!(!state.is_following());
    }

    #[test]
    fn toggle_while_signed_out_makes_no_call() {
        let api = MockApi::default();
        let mut state = loaded_state(&[], 0, None);

        let notice = toggle(&mut state, &api, None).expect("a blocking notice");

        assert_eq!(notice.text, LOGIN_REQUIRED);
        assert_eq!(api.follows.get() + api.unfollows.get(), 0);
        assert_eq!(state.loaded().unwrap().profile.followers_count, 0);
    }

    #[test]
    fn follow_flips_state_and_increments_count() {
        let viewer = principal("u1", "user");
        let api = MockApi::default();
        let mut state = loaded_state(&[], 4, Some(&viewer));

        assert_eq!(toggle(&mut state, &api, Some(&viewer)), None);

        let loaded = state.loaded().unwrap();
        assert!(loaded.is_following);
        assert_eq!(loaded.profile.followers_count, 5);
        assert_eq!(api.follows.get(), 1);
        assert_eq!(api.unfollows.get(), 0);
    }

    #[test]
    fn unfollow_flips_state_and_decrements_count() {
        let viewer = principal("u1", "user");
        let api = MockApi::default();
        let mut state = loaded_state(&["u1"], 4, Some(&viewer));

        assert_eq!(toggle(&mut state, &api, Some(&viewer)), None);

        let loaded = state.loaded().unwrap();
        assert!(!loaded.is_following);
        assert_eq!(loaded.profile.followers_count, 3);
        assert!(loaded.profile.followers.is_empty());
        assert_eq!(api.unfollows.get(), 1);
    }

    #[test]
    fn unfollow_never_drops_count_below_zero() {
        let viewer = principal("u1", "user");
        let api = MockApi::default();
        let mut state = loaded_state(&["u1"], 0, Some(&viewer));

        toggle(&mut state, &api, Some(&viewer));

        assert_eq!(state.loaded().unwrap().profile.followers_count, 0);
    }

    #[test]
    fn drifted_negative_count_settles_at_zero_on_unfollow() {
        let viewer = principal("u1", "user");
        let api = MockApi::default();
        let mut state = loaded_state(&["u1"], -3, Some(&viewer));

        toggle(&mut state, &api, Some(&viewer));

        assert_eq!(state.loaded().unwrap().profile.followers_count, 0);
    }

    #[test]
    fn failed_follow_leaves_state_and_surfaces_message() {
        let viewer = principal("u1", "user");
        let api = MockApi::replying(Err(ApiError::rejected(400, Some("limit reached".to_string()))));
        let mut state = loaded_state(&[], 2, Some(&viewer));

        let notice = toggle(&mut state, &api, Some(&viewer)).expect("error notice");

        assert_eq!(notice, Notice::error("limit reached"));
        let loaded = state.loaded().unwrap();
        assert!(!loaded.is_following);
        assert_eq!(loaded.profile.followers_count, 2);
        assert!(!state.follow_pending());
    }

    #[test]
    fn second_toggle_is_refused_while_first_is_pending() {
        let viewer = principal("u1", "user");
        let mut state = loaded_state(&[], 0, Some(&viewer));

        let first = state.begin_follow(Some(&viewer)).unwrap();
        assert_eq!(state.begin_follow(Some(&viewer)), Err(FollowRefusal::InFlight));

        state.finish_follow(first, Ok(()));
        assert_eq!(
            state.begin_follow(Some(&viewer)).map(|a| a.kind),
            Ok(FollowKind::Unfollow)
        );
    }

    #[test]
    fn toggle_before_load_is_not_ready() {
        let viewer = principal("u1", "user");
        let mut state = ProfileState::default();
        state.begin_load("u2");

        assert_eq!(state.begin_follow(Some(&viewer)), Err(FollowRefusal::NotReady));
    }

    #[test]
    fn missing_profile_is_not_found() {
        let mut state = ProfileState::default();
        let ticket = state.begin_load("ghost");

        state.finish_load(ticket, Err(ApiError::rejected(404, None)), None);

        assert_eq!(state.phase(), &Phase::NotFound);
        assert!(state.loaded().is_none());
    }

    #[test]
    fn stale_load_does_not_overwrite_latest() {
        let mut state = ProfileState::default();
        let first = state.begin_load("u2");
        let second = state.begin_load("u3");

        assert!(state.finish_load(second, payload(profile("u3", &[], 0)), None));
        assert!(!state.finish_load(first, payload(profile("u2", &[], 0)), None));

        assert_eq!(state.loaded().unwrap().profile.id, "u3");
        assert_eq!(state.user_id(), "u3");
    }

    #[test]
    fn follow_result_after_navigation_is_ignored() {
        let viewer = principal("u1", "user");
        let mut state = loaded_state(&[], 0, Some(&viewer));
        let action = state.begin_follow(Some(&viewer)).unwrap();

        let ticket = state.begin_load("u3");
        state.finish_load(ticket, payload(profile("u3", &[], 7)), Some(&viewer));

        assert_eq!(state.finish_follow(action, Ok(())), None);
        let loaded = state.loaded().unwrap();
        assert!(!loaded.is_following);
        assert_eq!(loaded.profile.followers_count, 7);
    }

    #[test]
    fn own_profile_hides_follow_control() {
        let state = loaded_state(&[], 0, None);

        assert!(state.shows_follow_control(Some(&principal("u1", "user"))));
        assert!(!state.shows_follow_control(Some(&principal("u2", "user"))));
        assert!(!state.shows_follow_control(None));
    }

    #[test]
    fn signing_in_rederives_follow_status() {
        let mut state = loaded_state(&["u1"], 1, None);
        assert!(!state.is_following());

        state.refresh_viewer(Some(&principal("u1", "user")));
        assert!(state.is_following());

        state.refresh_viewer(None);
        assert!(!state.is_following());
    }

    #[test]
    fn tabs_switch_locally_and_reset_on_load() {
        let mut state = loaded_state(&[], 0, None);

        state.select_tab(Tab::About);
        assert_eq!(state.tab(), Tab::About);

        state.begin_load("u3");
        assert_eq!(state.tab(), Tab::Posts);
    }
}
