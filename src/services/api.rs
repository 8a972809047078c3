use std::rc::Rc;

use futures::future::LocalBoxFuture;
use log::debug;
use reqwasm::http::{Request, Response};
use serde::{de::DeserializeOwned, Deserialize};
use web_sys::RequestCredentials;

use super::error::{ApiError, ApiResult};
use crate::{
    config::Config,
    models::{Connections, Principal, ProfilePayload, UserProfile},
};

const UNAUTHORIZED: u16 = 401;

/// The remote service the profile page talks to.
pub trait ProfileApi {
    /// `Ok(None)` when nobody is signed in.
    fn current_principal(&self) -> LocalBoxFuture<'static, ApiResult<Option<Principal>>>;

    fn fetch_user_profile(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<ProfilePayload>>;

    fn follow_user(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>>;

    fn unfollow_user(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>>;

    fn fetch_connections(
        &self,
        user_id: &str,
        connections: Connections,
    ) -> LocalBoxFuture<'static, ApiResult<Vec<UserProfile>>>;
}

/// Lets an API implementation travel through a `ContextProvider`.
#[derive(Clone)]
pub struct ApiHandle(pub Rc<dyn ProfileApi>);

impl ApiHandle {
    pub fn new(api: impl ProfileApi + 'static) -> Self {
        Self(Rc::new(api))
    }
}

impl PartialEq for ApiHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ApiHandle {
    type Target = dyn ProfileApi;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// `{ success, data?, message? }`, the shape of every API reply.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    message: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self, status: u16) -> ApiResult<T> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Decode("missing data".to_string())),
            (false, _) => Err(ApiError::rejected(status, self.message)),
        }
    }

    fn into_ack(self, status: u16) -> ApiResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::rejected(status, self.message))
        }
    }
}

fn decode<T: DeserializeOwned>(status: u16, body: &str) -> ApiResult<Envelope<T>> {
    serde_json::from_str(body).map_err(|e| {
        if (200..300).contains(&status) {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::rejected(status, None)
        }
    })
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: Rc<str>,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_url)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Percent-encodes one path segment. `.` and `..` survive plain encoding, so
/// their dots are escaped by hand.
fn segment(value: &str) -> String {
    let encoded = urlencoding::encode(value);
    match encoded.as_ref() {
        "." | ".." => encoded.replace('.', "%2E"),
        _ => encoded.into_owned(),
    }
}

async fn send(request: Request) -> ApiResult<(u16, String)> {
    let response: Response = request
        .credentials(RequestCredentials::Include)
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let status = response.status();
    debug!("{} {}", status, response.url());

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    Ok((status, body))
}

async fn acknowledge(request: Request) -> ApiResult<()> {
    let (status, body) = send(request).await?;
    decode::<serde_json::Value>(status, &body)?.into_ack(status)
}

impl ProfileApi for HttpApi {
    fn current_principal(&self) -> LocalBoxFuture<'static, ApiResult<Option<Principal>>> {
        let url = self.url("/auth/me");

        Box::pin(async move {
            let (status, body) = send(Request::get(&url)).await?;
            if status == UNAUTHORIZED {
                return Ok(None);
            }

            decode::<Principal>(status, &body)?.into_data(status).map(Some)
        })
    }

    fn fetch_user_profile(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<ProfilePayload>> {
        let url = self.url(&format!("/users/{}", segment(user_id)));

        Box::pin(async move {
            let (status, body) = send(Request::get(&url)).await?;
            decode::<ProfilePayload>(status, &body)?.into_data(status)
        })
    }

    fn follow_user(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>> {
        let url = self.url(&format!("/users/{}/follow", segment(user_id)));
        Box::pin(async move { acknowledge(Request::post(&url)).await })
    }

    fn unfollow_user(&self, user_id: &str) -> LocalBoxFuture<'static, ApiResult<()>> {
        let url = self.url(&format!("/users/{}/unfollow", segment(user_id)));
        Box::pin(async move { acknowledge(Request::post(&url)).await })
    }

    fn fetch_connections(
        &self,
        user_id: &str,
        connections: Connections,
    ) -> LocalBoxFuture<'static, ApiResult<Vec<UserProfile>>> {
        let url = self.url(&format!(
            "/users/{}/{}",
            segment(user_id),
            connections.path_segment()
        ));

        Box::pin(async move {
            let (status, body) = send(Request::get(&url)).await?;
            decode::<Vec<UserProfile>>(status, &body)?.into_data(status)
        })
    }
}
