//! HTTP client for the payment service.

use carshare_core::{NotificationError, PaymentClient, PaymentNotice};
use std::future::Future;
use std::time::Duration;

/// Posts payment notices to `{base_url}/process`.
#[derive(Debug, Clone)]
pub struct HttpPaymentClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPaymentClient {
    /// Create a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| NotificationError::Transport(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Endpoint notices are posted to.
    #[must_use]
    pub fn process_url(&self) -> String {
        format!("{}/process", self.base_url.trim_end_matches('/'))
    }
}

impl PaymentClient for HttpPaymentClient {
    fn deliver(
        &self,
        notice: &PaymentNotice,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        let request = self.client.post(self.process_url()).json(notice);

        async move {
            let response = request.send().await.map_err(|e| {
                if e.is_timeout() {
                    NotificationError::Timeout
                } else {
                    NotificationError::Transport(e.to_string())
                }
            })?;

            let status = response.status();
            if status.is_success() {
                Ok(())
            } else {
                Err(NotificationError::Rejected {
                    status: status.as_u16(),
                })
            }
        }
    }
}
