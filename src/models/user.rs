use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// The authenticated actor, as reported by the API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Principal {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub role: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Who is looking at the page. Handed down through a `ContextProvider`
/// instead of living in a global.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    principal: Option<Rc<Principal>>,
}

impl Session {
    pub fn signed_in(principal: Principal) -> Self {
        Self {
            principal: Some(Rc::new(principal)),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub verified: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub posts_count: i64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub followers_count: i64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub following_count: i64,
    /// Ids of everyone following this user.
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub followers: Vec<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.username))
            .unwrap_or_default()
    }

    pub fn handle(&self) -> &str {
        non_empty(&self.username)
            .or_else(|| non_empty(&self.email))
            .unwrap_or_default()
    }

    pub fn bio(&self) -> Option<&str> {
        non_empty(&self.bio)
    }

    pub fn location(&self) -> Option<&str> {
        non_empty(&self.location)
    }

    pub fn website(&self) -> Option<&str> {
        non_empty(&self.website)
    }

    /// Calendar date of `createdAt`, e.g. `2024-03-01` out of an ISO timestamp.
    pub fn joined_on(&self) -> Option<&str> {
        let created_at = non_empty(&self.created_at)?;
        Some(created_at.split('T').next().unwrap_or(created_at))
    }

    pub fn is_followed_by(&self, principal_id: &str) -> bool {
        self.followers.iter().any(|id| id == principal_id)
    }
}

/// One side of a user's follow graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connections {
    Followers,
    Following,
}

impl Connections {
    pub fn path_segment(self) -> &'static str {
        match self {
            Connections::Followers => "followers",
            Connections::Following => "following",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Connections::Followers => "دنبال‌کنندگان",
            Connections::Following => "دنبال شده‌ها",
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
