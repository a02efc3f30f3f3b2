//! HTTP plumbing shared by all endpoint groups.

use std::sync::{Arc, RwLock};

use log::debug;
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::envelope::Envelope;
use crate::error::Error;

/// Client for the TaskDeck backend.
///
/// Cheap to clone (`Arc` internally); the bearer token set by a login
/// is shared across clones.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: Url,
    http: reqwest::Client,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, Error> {
        // A trailing slash keeps Url::join from eating the last path
        // segment.
        let normalized = format!("{}/", base_url.trim_end_matches('/'));
        let base_url =
            Url::parse(&normalized).map_err(|_| Error::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            inner: Arc::new(ClientInner {
                base_url,
                http: reqwest::Client::new(),
                token: RwLock::new(None),
            }),
        })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url.as_str()
    }

    /// Store the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = Some(token.into());
        }
    }

    pub fn clear_token(&self) {
        if let Ok(mut slot) = self.inner.token.write() {
            *slot = None;
        }
    }

    pub fn has_token(&self) -> bool {
        self.inner
            .token
            .read()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    fn token(&self) -> Option<String> {
        self.inner.token.read().ok().and_then(|slot| slot.clone())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, Error> {
        self.send(Method::GET, path, None::<&()>).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, Error> {
        self.send(Method::POST, path, Some(body)).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Envelope<T>, Error> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Envelope<T>, Error> {
        self.send(Method::DELETE, path, None::<&()>).await
    }

    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Envelope<T>, Error> {
        let url = self
            .inner
            .base_url
            .join(path)
            .map_err(|_| Error::InvalidUrl(path.to_string()))?;
        debug!("{method} {url}");

        let mut request = self.inner.http.request(method, url);
        if let Some(token) = self.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        // Backend errors still carry a well-formed envelope with
        // success=false; anything else is a parse error.
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| Error::parse(format!("HTTP {status}: {e}"), Some(text)))
    }
}
