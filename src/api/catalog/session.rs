use crate::Status;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

/// Connection to the catalog service scoped to exactly one call.
///
/// The session is released when dropped, which drops its client and the
/// pooled connection with it. Completed and faulted sessions are released the
/// same way; a faulted one is logged as aborted at warn level.
pub struct CatalogSession {
    client: reqwest::Client,
    url: String,
    state: SessionState,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Open,
    Completed,
    Faulted,
}

impl CatalogSession {
    pub fn open(base_url: &str, endpoint: &str) -> Result<Self, Status> {
        let url = format!("{}/{endpoint}", base_url.trim_end_matches('/'));
        if let Err(e) = reqwest::Url::parse(&url) {
            return Err(Status::invalid_argument(format!(
                "Invalid catalog url '{url}': {e}"
            )));
        }

        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| Status::new("Failed to open catalog session", e))?;

        Ok(CatalogSession {
            client,
            url,
            state: SessionState::Open,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Issues the single call of this session.
    pub async fn call<B: Serialize, R: DeserializeOwned>(&mut self, body: &B) -> Result<R, Status> {
        if self.state != SessionState::Open {
            return Err(Status::internal(format!(
                "catalog session for {} was already used",
                self.url
            )));
        }

        let result = self.exchange(body).await;
        self.state = match result {
            Ok(_) => SessionState::Completed,
            Err(_) => SessionState::Faulted,
        };
        result
    }

    async fn exchange<B: Serialize, R: DeserializeOwned>(&self, body: &B) -> Result<R, Status> {
        let resp = match self.client.post(&self.url).json(body).send().await {
            Ok(resp) => resp,
            Err(e) => {
                return Err(Status::unavailable(format!(
                    "Request failed: {e}\nurl: {}",
                    self.url
                )))
            }
        };

        let resp = resp.error_for_status()?;
        let text = resp.text().await?;
        match serde_json::from_str::<R>(&text) {
            Ok(resp) => Ok(resp),
            Err(_) => Err(Status::internal(format!(
                "Failed to parse response: {text}\nurl: {}",
                self.url
            ))),
        }
    }
}

impl Drop for CatalogSession {
    fn drop(&mut self) {
        match self.state {
            SessionState::Faulted => warn!("aborting faulted catalog session {}", self.url),
            SessionState::Open | SessionState::Completed => {
                debug!("closing catalog session {}", self.url)
            }
        }
    }
}
