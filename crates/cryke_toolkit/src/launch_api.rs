use async_trait::async_trait;
use ethers::types::Address;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Parameters of a token deployment, as posted to the launch API.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchRequest {
    pub name: String,
    pub symbol: String,
    pub wallet: Address,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
}

impl LaunchRequest {
    /// Only presence is checked here, the launch API owns the real schema.
    pub fn validate(&self) -> Result<(), LaunchApiError> {
        for (field, value) in [
            ("name", &self.name),
            ("symbol", &self.symbol),
            ("description", &self.description),
        ] {
            if value.trim().is_empty() {
                return Err(LaunchApiError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// On-chain identifiers of a deployed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchedToken {
    pub address: Address,
    #[serde(default)]
    pub pool: Option<String>,
    #[serde(default)]
    pub dexscreener: Option<String>,
    /// Deploy transaction hash
    #[serde(default)]
    pub transaction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LaunchResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<LaunchedToken>,
    #[serde(default)]
    error: Option<String>,
}

/// Errors for launch API requests.
#[derive(Error, Debug)]
pub enum LaunchApiError {
    /// A required parameter was empty.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    /// The request never got a response.
    #[error(transparent)]
    RequestError(#[from] ReqwestError),
    /// The API answered but refused the deployment.
    #[error("{message}")]
    Rejected { message: String },
    /// A success response could not be deserialized.
    #[error("Deserialization error: {err}. Response: {text}")]
    ResponseSerdeJson {
        err: serde_json::Error,
        text: String,
    },
}

#[async_trait]
pub trait TokenDeployer: Send + Sync {
    async fn deploy(&self, request: &LaunchRequest) -> Result<LaunchedToken, LaunchApiError>;
}

/// Client of the remote token deployment endpoint.
#[derive(Debug, Clone)]
pub struct LaunchApi {
    client: Client,
    url: Url,
}

impl LaunchApi {
    pub fn new(url: impl Into<Url>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    /// Maps a raw response to the deployed token. Non-2xx and
    /// `success: false` are both rejections, carrying the API's `error`
    /// text when it sent one and the status otherwise.
    pub fn interpret_response(
        status: StatusCode,
        text: &str,
    ) -> Result<LaunchedToken, LaunchApiError> {
        let parsed = serde_json::from_str::<LaunchResponse>(text);
        let res = match parsed {
            Ok(res) => res,
            Err(err) => {
                if status.is_success() {
                    return Err(LaunchApiError::ResponseSerdeJson {
                        err,
                        text: text.to_string(),
                    });
                }
                return Err(LaunchApiError::Rejected {
                    message: format!("API returned {}", status.as_u16()),
                });
            }
        };

        if !status.is_success() || !res.success {
            let message = res
                .error
                .filter(|error| !error.trim().is_empty())
                .unwrap_or_else(|| format!("API returned {}", status.as_u16()));
            return Err(LaunchApiError::Rejected { message });
        }

        res.token.ok_or_else(|| LaunchApiError::Rejected {
            message: "API reported success without a token".to_string(),
        })
    }
}

#[async_trait]
impl TokenDeployer for LaunchApi {
    async fn deploy(&self, request: &LaunchRequest) -> Result<LaunchedToken, LaunchApiError> {
        request.validate()?;

        log::debug!("POST {} symbol={}", self.url, request.symbol);
        let res = self
            .client
            .post(self.url.as_ref())
            .json(request)
            .send()
            .await?;
        let status = res.status();
        let text = res.text().await?;

        Self::interpret_response(status, &text)
    }
}
