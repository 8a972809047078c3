pub mod article;
pub mod user;

use serde::{Deserialize, Deserializer};

pub use article::{ArticleAuthor, ArticleStats, ArticleSummary};
pub use user::{Connections, Principal, Session, UserProfile};

/// Body of a successful profile fetch.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProfilePayload {
    pub user: UserProfile,
    #[serde(default, deserialize_with = "null_as_default")]
    pub posts: Vec<ArticleSummary>,
}

/// Treats an explicit `null` like a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
