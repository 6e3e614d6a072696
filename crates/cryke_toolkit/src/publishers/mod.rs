mod fourclaw;
mod moltbook;
mod moltx;

pub use fourclaw::*;
pub use moltbook::*;
pub use moltx::*;

use async_trait::async_trait;
use cryke_utils::utils::format_address;
use reqwest::{Client, Error as ReqwestError};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::launch_api::LaunchedToken;

/// A successful launch, as seen by the social platforms.
#[derive(Debug, Clone)]
pub struct LaunchEvent {
    pub name: String,
    pub symbol: String,
    pub description: String,
    pub token: LaunchedToken,
}

impl LaunchEvent {
    pub fn token_address(&self) -> String {
        format_address(&self.token.address)
    }

    pub fn ticker(&self) -> String {
        format!("${}", self.symbol.to_uppercase())
    }
}

/// Errors for announcement posts.
#[derive(Error, Debug)]
pub enum PublishError {
    /// The request failed.
    #[error(transparent)]
    RequestError(#[from] ReqwestError),
    /// The platform answered without its success marker.
    #[error("{platform} did not accept the post: {body}")]
    NotAccepted { platform: &'static str, body: String },
}

/// One social platform able to announce a launch.
#[async_trait]
pub trait Publisher: Send + Sync {
    fn platform(&self) -> &'static str;

    async fn publish(&self, event: &LaunchEvent) -> Result<(), PublishError>;
}

/// Bearer-authenticated JSON post. The body is read even on error statuses
/// since platforms report refusals inside it.
pub(crate) async fn post_json<T: Serialize + Send + Sync>(
    client: &Client,
    url: &str,
    api_key: &str,
    body: &T,
) -> Result<Value, PublishError> {
    let res = client
        .post(url)
        .bearer_auth(api_key)
        .json(body)
        .send()
        .await?;
    let text = res.text().await?;
    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

pub(crate) fn accepted(
    platform: &'static str,
    body: Value,
    is_accepted: fn(&Value) -> bool,
) -> Result<(), PublishError> {
    if is_accepted(&body) {
        log::info!("Announced on {}!", platform);
        Ok(())
    } else {
        Err(PublishError::NotAccepted {
            platform,
            body: body.to_string(),
        })
    }
}

pub(crate) fn success_flag(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

pub(crate) fn has_field(body: &Value, field: &str) -> bool {
    body.get(field).map(|value| !value.is_null()).unwrap_or(false)
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn success_flag_requires_true() {
        assert!(success_flag(&json!({ "success": true })));
        assert!(!success_flag(&json!({ "success": false })));
        assert!(!success_flag(&json!({ "success": "true" })));
        assert!(!success_flag(&json!("rate limited")));
    }

    #[test]
    fn null_fields_do_not_count() {
        assert!(has_field(&json!({ "id": "abc" }), "id"));
        assert!(!has_field(&json!({ "id": null }), "id"));
        assert!(!has_field(&json!({}), "id"));
    }

    #[test]
    fn rejection_names_platform() {
        let err = accepted("MoltX", json!({ "success": false }), success_flag).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"MoltX did not accept the post: {"success":false}"#
        );
    }

    #[test]
    fn event_uses_checksummed_address_and_ticker() {
        let event = test_utils::launch_event(None);
        assert_eq!(event.ticker(), "$FOO");
        assert_eq!(
            event.token_address(),
            "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266"
        );
    }
}
