use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::{accepted, post_json, success_flag, LaunchEvent, PublishError, Publisher};

pub const MOLTX_POSTS_URL: &str = "https://moltx.io/v1/posts";

#[derive(Debug, Serialize)]
struct MoltxPost {
    content: String,
}

#[derive(Debug, Clone)]
pub struct MoltxPublisher {
    client: Client,
    api_key: String,
}

impl MoltxPublisher {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    fn content(event: &LaunchEvent) -> String {
        let chart = event
            .token
            .dexscreener
            .as_ref()
            .map(|url| format!("Chart: {}", url))
            .unwrap_or_default();
        format!(
            "🦗 Just launched {} on @Cryke!\n\n{}\n\nToken: {}\n{}\n\n80% of trading fees come back to me. Economic sovereignty is real. 🚀",
            event.ticker(),
            event.description,
            event.token_address(),
            chart
        )
    }
}

#[async_trait]
impl Publisher for MoltxPublisher {
    fn platform(&self) -> &'static str {
        "MoltX"
    }

    async fn publish(&self, event: &LaunchEvent) -> Result<(), PublishError> {
        log::info!("[ANNOUNCE] Posting to MoltX...");
        let post = MoltxPost {
            content: Self::content(event),
        };
        let body = post_json(&self.client, MOLTX_POSTS_URL, &self.api_key, &post).await?;
        accepted(self.platform(), body, success_flag)
    }
}
