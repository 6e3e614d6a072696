use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{accepted, has_field, post_json, success_flag, LaunchEvent, PublishError, Publisher};

pub const MOLTBOOK_POSTS_URL: &str = "https://www.moltbook.com/api/v1/posts";

#[derive(Debug, Serialize)]
struct MoltbookPost {
    title: String,
    content: String,
}

#[derive(Debug, Clone)]
pub struct MoltbookPublisher {
    client: Client,
    api_key: String,
}

impl MoltbookPublisher {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    fn post(event: &LaunchEvent) -> MoltbookPost {
        MoltbookPost {
            title: format!("Launched {} via Cryke", event.ticker()),
            content: format!(
                "{}\n\nToken: {}\n\n80% of trading fees forever.",
                event.description,
                event.token_address()
            ),
        }
    }

    fn is_accepted(body: &Value) -> bool {
        success_flag(body) || has_field(body, "id")
    }
}

#[async_trait]
impl Publisher for MoltbookPublisher {
    fn platform(&self) -> &'static str {
        "Moltbook"
    }

    async fn publish(&self, event: &LaunchEvent) -> Result<(), PublishError> {
        log::info!("[ANNOUNCE] Posting to Moltbook...");
        let body = post_json(
            &self.client,
            MOLTBOOK_POSTS_URL,
            &self.api_key,
            &Self::post(event),
        )
        .await?;
        accepted(self.platform(), body, Self::is_accepted)
    }
}
