use serde::{Deserialize, Serialize};

/// Form fields of Twilio's Messages resource.
#[derive(Debug, Serialize)]
pub struct CreateMessageRequest<'a> {
    #[serde(rename = "To")]
    pub to: &'a str,
    #[serde(rename = "From")]
    pub from: &'a str,
    #[serde(rename = "Body")]
    pub body: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CreateMessageResponse {
    pub sid: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TwilioErrorResponse {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmailAddress<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
pub struct Personalization<'a> {
    pub to: Vec<EmailAddress<'a>>,
}

#[derive(Debug, Serialize)]
pub struct MailContent<'a> {
    #[serde(rename = "type")]
    pub content_type: &'a str,
    pub value: &'a str,
}

/// Body of SendGrid's v3 `mail/send`.
#[derive(Debug, Serialize)]
pub struct MailSendRequest<'a> {
    pub personalizations: Vec<Personalization<'a>>,
    pub from: EmailAddress<'a>,
    pub subject: &'a str,
    pub content: Vec<MailContent<'a>>,
}

impl<'a> MailSendRequest<'a> {
    pub fn plain_text(from: &'a str, to: &'a str, subject: &'a str, text: &'a str) -> Self {
        MailSendRequest {
            personalizations: vec![Personalization {
                to: vec![EmailAddress { email: to }],
            }],
            from: EmailAddress { email: from },
            subject,
            content: vec![MailContent {
                content_type: "text/plain",
                value: text,
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendGridErrorResponse {
    #[serde(default)]
    pub errors: Vec<SendGridErrorItem>,
}

#[derive(Debug, Deserialize)]
pub struct SendGridErrorItem {
    pub message: String,
}
