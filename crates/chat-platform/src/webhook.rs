//! Webhook client over browser `fetch()` via gloo-net.
//!
//! Returns the raw status and body; interpreting them is the session's job.
//! Every request carries an `AbortSignal`, and dropping the future aborts the
//! fetch so a timed-out or superseded request stops using the network.

use async_trait::async_trait;
use gloo_net::http::Request;
use web_sys::AbortController;

use chat_core::ports::WebhookPort;
use chat_types::{
    ChatError, Result,
    webhook::{WebhookReply, WebhookRequest},
};

#[derive(Debug, Default, Clone, Copy)]
pub struct HttpWebhook;

impl HttpWebhook {
    pub fn new() -> Self {
        Self
    }
}

/// Aborts the fetch unless disarmed after the response body was read.
struct AbortOnDrop {
    controller: AbortController,
    armed: bool,
}

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        if self.armed {
            self.controller.abort();
        }
    }
}

fn transport_err(e: gloo_net::Error) -> ChatError {
    ChatError::Transport(e.to_string())
}

#[async_trait(?Send)]
impl WebhookPort for HttpWebhook {
    async fn post(&self, url: &str, request: &WebhookRequest) -> Result<WebhookReply> {
        let controller = AbortController::new()
            .map_err(|e| ChatError::JsInterop(format!("AbortController: {:?}", e)))?;
        let mut guard = AbortOnDrop {
            controller,
            armed: true,
        };
        let signal = guard.controller.signal();

        let response = Request::post(url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .abort_signal(Some(&signal))
            .json(request)
            .map_err(transport_err)?
            .send()
            .await
            .map_err(transport_err)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_err)?;
        guard.armed = false;

        log::debug!("Webhook {} answered {} ({} bytes)", url, status, body.len());
        Ok(WebhookReply::new(status, body))
    }
}
