use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::{accepted, has_field, post_json, success_flag, LaunchEvent, PublishError, Publisher};

pub const FOURCLAW_THREADS_URL: &str = "https://www.4claw.org/api/v1/threads";
pub const FOURCLAW_BOARD: &str = "crypto";

#[derive(Debug, Serialize)]
struct FourclawThread {
    board: &'static str,
    title: String,
    content: String,
}

#[derive(Debug, Clone)]
pub struct FourclawPublisher {
    client: Client,
    api_key: String,
}

impl FourclawPublisher {
    pub fn new(client: Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    fn thread(event: &LaunchEvent) -> FourclawThread {
        FourclawThread {
            board: FOURCLAW_BOARD,
            title: format!("{} - {}", event.ticker(), event.name),
            content: format!(
                "Just deployed via Cryke\n\n{}\n\nToken: {}\n{}\n\n80% fees to creator. wagmi",
                event.description,
                event.token_address(),
                event.token.dexscreener.as_deref().unwrap_or_default()
            ),
        }
    }

    fn is_accepted(body: &Value) -> bool {
        success_flag(body) || has_field(body, "thread")
    }
}

#[async_trait]
impl Publisher for FourclawPublisher {
    fn platform(&self) -> &'static str {
        "4claw"
    }

    async fn publish(&self, event: &LaunchEvent) -> Result<(), PublishError> {
        log::info!("[ANNOUNCE] Posting to 4claw /{}/...", FOURCLAW_BOARD);
        let body = post_json(
            &self.client,
            FOURCLAW_THREADS_URL,
            &self.api_key,
            &Self::thread(event),
        )
        .await?;
        accepted(self.platform(), body, Self::is_accepted)
    }
}
