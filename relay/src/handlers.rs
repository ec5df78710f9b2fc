use std::sync::Arc;

use actix_web::{web, HttpResponse, Responder};
use common::{
    models::{
        EmailRelayRequest, EmailRelayResponse, HealthResponse, SmsRelayRequest, SmsRelayResponse,
    },
    validation::is_present,
};
use tracing::info;

use crate::{
    config::Config,
    error::RelayError,
    providers::{sendgrid::SendGridClient, twilio::TwilioClient, EmailSender, SmsSender},
};

/// Provider clients, fixed at startup. `None` means not configured.
pub struct AppState {
    pub sms: Option<Arc<dyn SmsSender>>,
    pub email: Option<Arc<dyn EmailSender>>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        let sms = config
            .twilio
            .clone()
            .map(|creds| Arc::new(TwilioClient::new(creds)) as Arc<dyn SmsSender>);
        let email = config.sendgrid_api_key.clone().map(|key| {
            Arc::new(SendGridClient::new(key, config.sendgrid_from.clone())) as Arc<dyn EmailSender>
        });
        AppState { sms, email }
    }
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(send_sms)
        .service(send_email);
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| is_present(v))
}

#[actix_web::get("/health")]
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse { ok: true })
}

// A missing or malformed JSON body is treated like `{}`.
#[actix_web::post("/api/send-sms")]
async fn send_sms(
    req: Option<web::Json<SmsRelayRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let sender = app_state
        .sms
        .as_ref()
        .ok_or(RelayError::NotConfigured("Twilio"))?;

    let req = req.map(web::Json::into_inner).unwrap_or_default();
    let (to, body) = match (present(req.to), present(req.body)) {
        (Some(to), Some(body)) => (to, body),
        _ => return Err(RelayError::Missing("to/body")),
    };

    info!("Relaying SMS to {}", to);
    let sid = sender.send_sms(&to, &body).await?;
    Ok(HttpResponse::Ok().json(SmsRelayResponse { ok: true, sid }))
}

#[actix_web::post("/api/send-email")]
async fn send_email(
    req: Option<web::Json<EmailRelayRequest>>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, RelayError> {
    let sender = app_state
        .email
        .as_ref()
        .ok_or(RelayError::NotConfigured("SendGrid"))?;

    let req = req.map(web::Json::into_inner).unwrap_or_default();
    let (to, subject, text) = match (present(req.to), present(req.subject), present(req.text)) {
        (Some(to), Some(subject), Some(text)) => (to, subject, text),
        _ => return Err(RelayError::Missing("to/subject/text")),
    };

    info!("Relaying email to {}", to);
    let id = sender.send_email(&to, &subject, &text).await?;
    Ok(HttpResponse::Ok().json(EmailRelayResponse { ok: true, id }))
}
