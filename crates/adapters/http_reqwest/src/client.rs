//! REST client implementing the rule, device and farm gateways.

use farmhub_app::context::SessionContext;
use farmhub_app::ports::{DeviceGateway, FarmGateway, RuleGateway};
use farmhub_domain::device::Device;
use farmhub_domain::error::FarmhubError;
use farmhub_domain::farm::Farm;
use farmhub_domain::id::{FarmId, RuleId};
use farmhub_domain::rule::Rule;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::error::HttpError;

/// JSON error body returned by the backend on non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Success bodies come either wrapped as `{ "data": … }` or bare.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Payload<T> {
    fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

/// Check the HTTP response status and extract an error if non-2xx.
async fn check_response(resp: Response) -> Result<Response, HttpError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.message.or(body.error),
        Err(_) => None,
    };
    Err(HttpError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, HttpError> {
    let bytes = resp.bytes().await.map_err(HttpError::Transport)?;
    let payload: Payload<T> = serde_json::from_slice(&bytes).map_err(HttpError::Decode)?;
    Ok(payload.into_inner())
}

/// Bearer-authenticated client for the farmhub REST API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Build a client for `config`, authenticating as the `session` user.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the TLS backend cannot be initialised.
    pub fn new(config: &ApiConfig, session: &SessionContext) -> Result<Self, HttpError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(HttpError::Transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: session.auth_token().map(str::to_string),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, HttpError> {
        let Some(token) = self.token.as_deref() else {
            tracing::warn!(%method, path, "no token, request not sent");
            return Err(HttpError::MissingToken(path.to_string()));
        };
        tracing::debug!(%method, path, "api request");
        Ok(self
            .http
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(token))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, HttpError> {
        let resp = req.send().await.map_err(HttpError::Transport)?;
        check_response(resp).await
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, HttpError> {
        let resp = self.send(req).await?;
        decode(resp).await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl RuleGateway for ApiClient {
    async fn list_by_farm(&self, farm_id: FarmId) -> Result<Vec<Rule>, FarmhubError> {
        let req = self
            .request(Method::GET, "/rules")?
            .query(&[("farmId", farm_id.get())]);
        Ok(self.fetch(req).await?)
    }

    async fn get_by_id(&self, id: RuleId) -> Result<Option<Rule>, FarmhubError> {
        let req = self.request(Method::GET, &format!("/rules/{id}"))?;
        match self.fetch(req).await {
            Ok(rule) => Ok(Some(rule)),
            Err(HttpError::Status { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create(&self, farm_id: FarmId, rule: Rule) -> Result<Rule, FarmhubError> {
        let req = self
            .request(Method::POST, "/rules")?
            .query(&[("farmId", farm_id.get())])
            .json(&rule);
        Ok(self.fetch(req).await?)
    }

    async fn update(&self, id: RuleId, rule: Rule) -> Result<Rule, FarmhubError> {
        let req = self
            .request(Method::PUT, &format!("/rules/{id}"))?
            .json(&rule);
        Ok(self.fetch(req).await?)
    }

    async fn set_enabled(&self, id: RuleId, enabled: bool) -> Result<(), FarmhubError> {
        let req = self
            .request(Method::PATCH, &format!("/rules/{id}/toggle"))?
            .json(&serde_json::json!({ "enabled": enabled }));
        self.send(req).await?;
        Ok(())
    }

    async fn delete(&self, id: RuleId) -> Result<(), FarmhubError> {
        let req = self.request(Method::DELETE, &format!("/rules/{id}"))?;
        self.send(req).await?;
        Ok(())
    }
}

impl DeviceGateway for ApiClient {
    async fn list_devices(&self, farm_id: FarmId) -> Result<Vec<Device>, FarmhubError> {
        let req = self
            .request(Method::GET, "/devices")?
            .query(&[("farmId", farm_id.to_string()), ("withData", "true".to_string())]);
        Ok(self.fetch(req).await?)
    }
}

impl FarmGateway for ApiClient {
    async fn list_farms(&self) -> Result<Vec<Farm>, FarmhubError> {
        let req = self.request(Method::GET, "/farms")?;
        Ok(self.fetch(req).await?)
    }
}
