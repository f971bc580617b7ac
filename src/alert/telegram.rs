//! Telegram bot channel.

use std::fmt;

use serde::Deserialize;
use url::Url;

use super::{AlertChannel, AlertError};
use crate::transport::{HttpClient, HttpRequest};

/// Parse mode sent with every message.
const PARSE_MODE: &str = "HTML";

/// Sends alerts as messages from a Telegram bot to one chat.
///
/// Each alert is one form-encoded POST to `{api_url}/bot{token}/sendMessage`.
/// The bot token is part of the endpoint path and is never included in the
/// `Debug` output.
///
/// # Example
///
/// ```
/// use ipv6_monitor::alert::TelegramChannel;
/// use ipv6_monitor::transport::ReqwestClient;
/// use std::time::Duration;
/// use url::Url;
///
/// let client = ReqwestClient::with_timeout(Duration::from_secs(30)).unwrap();
/// let api = Url::parse("https://api.telegram.org").unwrap();
/// let channel = TelegramChannel::new(client, &api, "123:secret", "-1001").unwrap();
///
/// assert_eq!(channel.chat_id(), "-1001");
/// assert!(!format!("{channel:?}").contains("secret"));
/// ```
#[derive(Clone)]
pub struct TelegramChannel<H> {
    client: H,
    endpoint: Url,
    chat_id: String,
}

impl<H> TelegramChannel<H> {
    /// Creates a channel for `chat_id` using the bot identified by `bot_token`.
    ///
    /// # Errors
    ///
    /// Returns [`AlertError::InvalidEndpoint`] if `api_url` cannot have path
    /// segments appended (e.g. a `mailto:` URL).
    pub fn new(
        client: H,
        api_url: &Url,
        bot_token: &str,
        chat_id: impl Into<String>,
    ) -> Result<Self, AlertError> {
        let mut endpoint = api_url.clone();
        endpoint
            .path_segments_mut()
            .map_err(|()| AlertError::InvalidEndpoint(api_url.to_string()))?
            .pop_if_empty()
            .push(&format!("bot{bot_token}"))
            .push("sendMessage");

        Ok(Self {
            client,
            endpoint,
            chat_id: chat_id.into(),
        })
    }

    /// Returns the destination chat.
    #[must_use]
    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }
}

impl<H> fmt::Debug for TelegramChannel<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramChannel")
            .field("api_host", &self.endpoint.host_str())
            .field("chat_id", &self.chat_id)
            .finish_non_exhaustive()
    }
}

/// The part of a Bot API error response worth logging.
#[derive(Deserialize)]
struct ApiErrorBody {
    description: Option<String>,
}

fn api_description(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ApiErrorBody>(body)
        .ok()?
        .description
}

impl<H: HttpClient> AlertChannel for TelegramChannel<H> {
    async fn send(&self, text: &str) -> Result<(), AlertError> {
        let request = HttpRequest::post(self.endpoint.clone()).with_form([
            ("chat_id", self.chat_id.as_str()),
            ("text", text),
            ("parse_mode", PARSE_MODE),
        ]);

        let response = self.client.request(request).await?;

        if response.is_success() {
            return Ok(());
        }

        Err(AlertError::Rejected {
            status: response.status,
            description: api_description(&response.body),
        })
    }
}
