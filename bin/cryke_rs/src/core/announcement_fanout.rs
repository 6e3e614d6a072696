use cryke_toolkit::{
    FourclawPublisher, LaunchEvent, MoltbookPublisher, MoltxPublisher, Publisher,
};
use futures::future::join_all;
use reqwest::Client;

use crate::{constants::Env, errors::CrykeError, types::AnnouncementOutcome};

/// Posts a launch to every configured platform at once. Failures end up as
/// warnings and `announced: false`, never as errors.
pub struct AnnouncementFanout {
    publishers: Vec<Box<dyn Publisher>>,
}

impl AnnouncementFanout {
    pub fn new(publishers: Vec<Box<dyn Publisher>>) -> Self {
        Self { publishers }
    }

    /// One publisher per credential present in `env`.
    pub fn from_env(env: &Env) -> Self {
        let client = Client::new();
        let mut publishers: Vec<Box<dyn Publisher>> = Vec::new();
        if let Some(api_key) = &env.moltx_api_key {
            publishers.push(Box::new(MoltxPublisher::new(client.clone(), api_key.clone())));
        }
        if let Some(api_key) = &env.moltbook_api_key {
            publishers.push(Box::new(MoltbookPublisher::new(
                client.clone(),
                api_key.clone(),
            )));
        }
        if let Some(api_key) = &env.fourclaw_api_key {
            publishers.push(Box::new(FourclawPublisher::new(client, api_key.clone())));
        }
        Self::new(publishers)
    }

    pub fn is_empty(&self) -> bool {
        self.publishers.is_empty()
    }

    pub fn platforms(&self) -> Vec<&'static str> {
        self.publishers
            .iter()
            .map(|publisher| publisher.platform())
            .collect()
    }

    pub async fn announce(&self, event: &LaunchEvent) -> Vec<AnnouncementOutcome> {
        let futures = self.publishers.iter().map(|publisher| async move {
            let platform = publisher.platform();
            match publisher.publish(event).await {
                Ok(()) => AnnouncementOutcome {
                    platform,
                    announced: true,
                },
                Err(err) => {
                    let fault = CrykeError::Announcement {
                        platform,
                        reason: err.to_string(),
                    };
                    log::warn!("{} (non-blocking)", fault);
                    AnnouncementOutcome {
                        platform,
                        announced: false,
                    }
                }
            }
        });
        join_all(futures).await
    }
}
