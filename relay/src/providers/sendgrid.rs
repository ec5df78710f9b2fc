use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use super::{
    models::{MailSendRequest, SendGridErrorResponse},
    EmailSender, ProviderError,
};

const SENDGRID_API_URL: &str = "https://api.sendgrid.com/v3";

#[derive(Debug, Clone)]
pub struct SendGridClient {
    client: Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl SendGridClient {
    pub fn new(api_key: String, from: String) -> Self {
        SendGridClient {
            client: Client::new(),
            api_url: SENDGRID_API_URL.to_string(),
            api_key,
            from,
        }
    }

    #[cfg(test)]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }
}

#[async_trait]
impl EmailSender for SendGridClient {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let request = MailSendRequest::plain_text(&self.from, to, subject, text);
        let response = self
            .client
            .post(format!("{}/mail/send", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<SendGridErrorResponse>()
                .await
                .ok()
                .map(|e| {
                    e.errors
                        .into_iter()
                        .map(|item| item.message)
                        .collect::<Vec<_>>()
                        .join("; ")
                })
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("SendGrid request failed: {}", status));
            error!("SendGrid API error: {}", message);
            return Err(ProviderError::Api(message));
        }

        // SendGrid answers 202 with an empty body; the id is only in a header.
        let id = response
            .headers()
            .get("x-message-id")
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .unwrap_or("ok")
            .to_string();
        info!("SendGrid accepted message {}", id);
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::spawn_fake_provider;
    use actix_web::{web, HttpRequest, HttpResponse};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn returns_message_id_header() {
        let origin = spawn_fake_provider(|cfg: &mut web::ServiceConfig| {
            cfg.route(
                "/mail/send",
                web::post().to(|req: HttpRequest, body: web::Json<Value>| async move {
                    let bearer = req
                        .headers()
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        == Some("Bearer SG.key");
                    let expected = json!({
                        "personalizations": [{ "to": [{ "email": "jane@x.com" }] }],
                        "from": { "email": "no-reply@zyvastra.com" },
                        "subject": "Quote",
                        "content": [{ "type": "text/plain", "value": "500 polos" }],
                    });
                    if !bearer || body.into_inner() != expected {
                        return HttpResponse::BadRequest().finish();
                    }
                    HttpResponse::Accepted()
                        .insert_header(("X-Message-Id", "msg-42"))
                        .finish()
                }),
            );
        });
        let client = SendGridClient::new("SG.key".to_string(), "no-reply@zyvastra.com".to_string())
            .with_api_url(origin);

        let id = client.send_email("jane@x.com", "Quote", "500 polos").await.unwrap();
        assert_eq!(id, "msg-42");
    }

    #[actix_web::test]
    async fn joins_error_messages() {
        let origin = spawn_fake_provider(|cfg: &mut web::ServiceConfig| {
            cfg.route(
                "/mail/send",
                web::post().to(|| async {
                    HttpResponse::Forbidden().json(json!({
                        "errors": [
                            { "message": "The from address does not match a verified Sender Identity.", "field": "from" }
                        ]
                    }))
                }),
            );
        });
        let client = SendGridClient::new("SG.key".to_string(), "x@y.com".to_string())
            .with_api_url(origin);

        let err = client.send_email("jane@x.com", "Quote", "hi").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "The from address does not match a verified Sender Identity."
        );
    }
}
