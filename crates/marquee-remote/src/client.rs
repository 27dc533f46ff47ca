//! # Remote Client
//!
//! One reqwest client shared by every resource.
//!
//! ## Response Handling
//! ```text
//! send ──► status 2xx? ──no──► Http { status, url }
//!              │
//!             yes
//!              ▼
//!          body text ──► "" / "null" ──► EmptyPayload
//!              │
//!              ▼
//!          serde_json ──► T   (or Deserialization)
//! ```

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

use crate::config::RemoteConfig;
use crate::error::{RemoteError, RemoteResult};
use crate::movies::MovieApi;
use crate::users::UserApi;

/// Handle to the REST service.
///
/// Cheap to clone: the inner reqwest client is reference counted.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    http: reqwest::Client,
    base: Url,
    movies_path: Vec<String>,
    users_path: Vec<String>,
}

impl RemoteClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &RemoteConfig) -> RemoteResult<Self> {
        config.validate()?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;

        debug!(base_url = %config.base_url, "Remote client created");

        Ok(RemoteClient {
            http,
            base: config.parsed_base_url()?,
            movies_path: split_path(&config.movies_path),
            users_path: split_path(&config.users_path),
        })
    }

    /// The movies resource.
    pub fn movies(&self) -> MovieApi<'_> {
        MovieApi::new(self)
    }

    /// The users resource.
    pub fn users(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Service root URL.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    // =========================================================================
    // URL Construction
    // =========================================================================

    pub(crate) fn movies_url(&self, id: Option<&str>) -> RemoteResult<Url> {
        self.endpoint(&self.movies_path, id)
    }

    pub(crate) fn users_url(&self, id: Option<&str>) -> RemoteResult<Url> {
        self.endpoint(&self.users_path, id)
    }

    fn endpoint(&self, resource: &[String], id: Option<&str>) -> RemoteResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| RemoteError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            segments.extend(resource);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// GET and decode.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> RemoteResult<T> {
        let response = self.execute(self.http.request(Method::GET, url.clone())).await?;
        decode(response, &url).await
    }

    /// Send a JSON body with `method` and decode the echoed record.
    pub(crate) async fn send_json<B, T>(&self, method: Method, url: Url, body: &B) -> RemoteResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.request(method, url.clone()).json(body);
        let response = self.execute(request).await?;
        decode(response, &url).await
    }

    /// DELETE. The response body is ignored.
    pub(crate) async fn delete(&self, url: Url) -> RemoteResult<()> {
        self.execute(self.http.request(Method::DELETE, url)).await?;
        Ok(())
    }

    async fn execute(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Remote request failed");
            RemoteError::from(e)
        })?;

        let status = response.status();
        let url = response.url().to_string();
        debug!(status = status.as_u16(), url = %url, "Remote response");

        if status.is_success() {
            Ok(response)
        } else {
            Err(RemoteError::Http {
                status: status.as_u16(),
                url,
            })
        }
    }
}

/// Reads the body and decodes it, treating an empty or `null` body as
/// [`RemoteError::EmptyPayload`].
async fn decode<T: DeserializeOwned>(response: Response, url: &Url) -> RemoteResult<T> {
    let body = response.text().await?;
    let trimmed = body.trim();

    if trimmed.is_empty() || trimmed == "null" {
        return Err(RemoteError::EmptyPayload {
            url: url.to_string(),
        });
    }

    serde_json::from_str(trimmed).map_err(|e| RemoteError::Deserialization(e.to_string()))
}

fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
