use common::models::{EnquiryPayload, EnquiryResponse};
use serde_json::Value;
use tracing::info;

use crate::http::{ApiClient, HttpError};

pub async fn send_enquiry(
    api: &ApiClient,
    payload: &EnquiryPayload,
) -> Result<EnquiryResponse, HttpError> {
    info!("Sending enquiry for {:?}", payload.product_service);
    let reply: Value = api.post("enquiries", payload).await?;

    // Some deployments answer with plain text instead of JSON.
    let response = match reply {
        Value::Object(_) => serde_json::from_value(reply)?,
        Value::String(text) if !text.is_empty() => EnquiryResponse {
            message: Some(text),
            ..Default::default()
        },
        _ => EnquiryResponse::default(),
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fake_api_config, spawn_fake_api};
    use actix_web::{web, HttpResponse};
    use serde_json::json;

    #[actix_web::test]
    async fn json_reply_is_decoded() {
        let origin = spawn_fake_api(|cfg: &mut web::ServiceConfig| {
            cfg.route(
                "/api/v1/enquiries",
                web::post().to(|| async {
                    HttpResponse::Created().json(json!({ "id": "enq-7", "message": "received" }))
                }),
            );
        });
        let api = ApiClient::new(fake_api_config(&origin));

        let resp = send_enquiry(&api, &EnquiryPayload::default()).await.unwrap();
        assert_eq!(resp.id.as_deref(), Some("enq-7"));
        assert_eq!(resp.message.as_deref(), Some("received"));
    }

    #[actix_web::test]
    async fn numeric_id_is_kept_as_text() {
        let origin = spawn_fake_api(|cfg: &mut web::ServiceConfig| {
            cfg.route(
                "/api/v1/enquiries",
                web::post().to(|| async {
                    HttpResponse::Created().json(json!({ "id": 42, "status": "queued" }))
                }),
            );
        });
        let api = ApiClient::new(fake_api_config(&origin));

        let resp = send_enquiry(&api, &EnquiryPayload::default()).await.unwrap();
        assert_eq!(resp.id.as_deref(), Some("42"));
        assert_eq!(resp.extra["status"], "queued");
    }

    #[actix_web::test]
    async fn text_reply_becomes_message() {
        let origin = spawn_fake_api(|cfg: &mut web::ServiceConfig| {
            cfg.route(
                "/api/v1/enquiries",
                web::post().to(|| async { HttpResponse::Ok().body("thanks") }),
            );
        });
        let api = ApiClient::new(fake_api_config(&origin));

        let resp = send_enquiry(&api, &EnquiryPayload::default()).await.unwrap();
        assert!(resp.id.is_none());
        assert_eq!(resp.message.as_deref(), Some("thanks"));
    }
}
