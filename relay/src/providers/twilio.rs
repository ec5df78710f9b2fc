use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::config::TwilioCredentials;

use super::{
    models::{CreateMessageRequest, CreateMessageResponse, TwilioErrorResponse},
    ProviderError, SmsSender,
};

const TWILIO_API_URL: &str = "https://api.twilio.com/2010-04-01";

#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    api_url: String,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioClient {
    pub fn new(credentials: TwilioCredentials) -> Self {
        TwilioClient {
            client: Client::new(),
            api_url: TWILIO_API_URL.to_string(),
            account_sid: credentials.account_sid,
            auth_token: credentials.auth_token,
            from: credentials.from,
        }
    }

    #[cfg(test)]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl SmsSender for TwilioClient {
    async fn send_sms(&self, to: &str, body: &str) -> Result<String, ProviderError> {
        let request = CreateMessageRequest {
            to,
            from: &self.from,
            body,
        };
        let response = self
            .client
            .post(format!(
                "{}/Accounts/{}/Messages.json",
                self.api_url, self.account_sid
            ))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<TwilioErrorResponse>().await.ok();
            let code = body.as_ref().and_then(|e| e.code);
            let message = body
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("Twilio request failed: {}", status));
            error!("Twilio API error {:?}: {}", code, message);
            return Err(ProviderError::Api(message));
        }

        let created: CreateMessageResponse = response.json().await?;
        info!("Twilio accepted message {} ({:?})", created.sid, created.status);
        Ok(created.sid)
    }
}
