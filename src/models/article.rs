use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleAuthor {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct ArticleStats {
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub comments: u64,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub views: u64,
}

/// A published article as listed on a profile. Read-only on the client.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub excerpt: String,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub author: ArticleAuthor,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub stats: ArticleStats,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "crate::models::null_as_default")]
    pub featured: bool,
}
