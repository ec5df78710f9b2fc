use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One lead capture submission, as posted to the `enquiries` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnquiryPayload {
    #[serde(default)]
    pub company_name: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub quantity: String,
    pub product_service: String,
    #[serde(default)]
    pub order_notes: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnquiryResponse {
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(
        default,
        deserialize_with = "scalar_as_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
    /// Whatever else the backend chose to send back.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

// Numbers are kept as their text; other non-string values are dropped.
fn scalar_as_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// Relay wire types. Request fields are optional and lenient so a partial or
// oddly typed body is answered with a "Missing ..." error, never a parse failure.

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SmsRelayRequest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmailRelayRequest {
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub to: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "scalar_as_string")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsRelayResponse {
    pub ok: bool,
    pub sid: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRelayResponse {
    pub ok: bool,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// A testimonial. `rating` is 1..=5.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: String,
    pub name: String,
    pub text: String,
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    /// ISO 8601 date or timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewInput {
    pub name: String,
    pub text: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AverageCounts {
    pub average: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReviews {
    pub average: f64,
    pub count: u64,
    pub latest: Vec<ReviewItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enquiry_payload_uses_camel_case_keys() {
        let payload = EnquiryPayload {
            name: "Jane Doe".to_string(),
            product_service: "Polo Shirts".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["productService"], "Polo Shirts");
        assert_eq!(value["companyName"], "");
        assert_eq!(value["orderNotes"], "");
    }

    #[test]
    fn relay_request_tolerates_missing_fields() {
        let req: SmsRelayRequest = serde_json::from_value(json!({ "to": "+15550001111" })).unwrap();
        assert_eq!(req.to.as_deref(), Some("+15550001111"));
        assert!(req.body.is_none());
    }

    #[test]
    fn relay_request_accepts_numeric_recipient() {
        let req: SmsRelayRequest =
            serde_json::from_value(json!({ "to": 15550001111u64, "body": "hi" })).unwrap();
        assert_eq!(req.to.as_deref(), Some("15550001111"));

        let req: EmailRelayRequest =
            serde_json::from_value(json!({ "to": ["a@x.com"], "subject": "Quote", "text": "hi" }))
                .unwrap();
        assert!(req.to.is_none());
    }

    #[test]
    fn enquiry_response_keeps_unknown_keys() {
        let resp: EnquiryResponse =
            serde_json::from_value(json!({ "id": "e-1", "status": "queued" })).unwrap();
        assert_eq!(resp.id.as_deref(), Some("e-1"));
        assert_eq!(resp.extra["status"], "queued");
    }

    #[test]
    fn enquiry_response_accepts_numeric_id() {
        let resp: EnquiryResponse =
            serde_json::from_value(json!({ "id": 42, "message": "received" })).unwrap();
        assert_eq!(resp.id.as_deref(), Some("42"));
        assert_eq!(resp.message.as_deref(), Some("received"));

        let resp: EnquiryResponse =
            serde_json::from_value(json!({ "id": null, "message": { "code": 1 } })).unwrap();
        assert!(resp.id.is_none());
        assert!(resp.message.is_none());
    }
}
