//! Enquiry form state, validation and submission.
//!
//! A form owns its field values and a `show_errors` flag that is raised by
//! the first invalid submit. Field errors stay hidden until then. A valid
//! submit moves the payload into an [`EnquiryDispatcher`], which either posts
//! it to the API or opens an SMS/email intent.

use std::fmt;

use async_trait::async_trait;
use common::{
    models::{EnquiryPayload, EnquiryResponse},
    utils::{ContactMode, Platform},
    validation::{is_email_valid, is_phone_valid, is_present},
};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    enquiries::send_enquiry,
    http::{ApiClient, HttpError},
    intent::{Intent, IntentError, IntentOpener, Opened},
};

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_EMAIL_MESSAGE: &str = "Enter a valid email";
pub const INVALID_PHONE_MESSAGE: &str = "Enter a valid phone";
const DEFAULT_FAILURE_MESSAGE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    CompanyName,
    Name,
    Email,
    Phone,
    Quantity,
    ProductService,
    OrderNotes,
}

impl FieldKey {
    pub const ALL: [FieldKey; 7] = [
        FieldKey::CompanyName,
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Quantity,
        FieldKey::ProductService,
        FieldKey::OrderNotes,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::CompanyName => "Company Name",
            FieldKey::Name => "Name",
            FieldKey::Email => "Email",
            FieldKey::Phone => "Phone",
            FieldKey::Quantity => "Quantity",
            FieldKey::ProductService => "Product / Service",
            FieldKey::OrderNotes => "Order Notes",
        }
    }
}

/// Which fields a form requires and which patterns it checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    required: Vec<FieldKey>,
    check_email: bool,
    check_phone: bool,
}

impl FormSchema {
    /// The full "post your requirement" form.
    pub fn post_requirement() -> Self {
        FormSchema {
            required: vec![
                FieldKey::Name,
                FieldKey::Email,
                FieldKey::Phone,
                FieldKey::Quantity,
                FieldKey::ProductService,
            ],
            check_email: true,
            check_phone: true,
        }
    }

    pub fn sms_enquiry() -> Self {
        FormSchema {
            required: vec![FieldKey::ProductService, FieldKey::Name, FieldKey::Phone],
            check_email: false,
            check_phone: true,
        }
    }

    pub fn email_enquiry() -> Self {
        FormSchema {
            required: vec![FieldKey::ProductService, FieldKey::Name, FieldKey::Email],
            check_email: true,
            check_phone: false,
        }
    }

    pub fn for_mode(mode: ContactMode) -> Self {
        match mode {
            ContactMode::Sms => Self::sms_enquiry(),
            ContactMode::Email => Self::email_enquiry(),
        }
    }

    pub fn is_required(&self, key: FieldKey) -> bool {
        self.required.contains(&key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    fn new(title: &str, message: impl Into<String>) -> Self {
        Alert {
            title: title.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// What a successful dispatch produced.
#[derive(Debug, Clone)]
pub enum Receipt {
    Posted(EnquiryResponse),
    Opened { mode: ContactMode, opened: Opened },
}

impl Receipt {
    pub fn alert(&self) -> Alert {
        match self {
            Receipt::Posted(_) => Alert::new(
                "Submitted",
                "Your requirement has been submitted. We will contact you soon.",
            ),
            Receipt::Opened { mode, .. } => {
                let channel = match mode {
                    ContactMode::Sms => "SMS",
                    ContactMode::Email => "Email",
                };
                Alert::new(
                    "Thank you",
                    format!("{} enquiry ready. Please finish sending in your app.", channel),
                )
            }
        }
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    /// Validation failed; errors are now visible and nothing was sent.
    Invalid,
    Sent(Receipt),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Network(#[from] HttpError),
    #[error(transparent)]
    Intent(#[from] IntentError),
}

impl SubmitError {
    pub fn alert(&self) -> Alert {
        match self {
            SubmitError::Network(e @ HttpError::Status { .. }) => {
                Alert::new("Submission failed", e.to_string())
            }
            SubmitError::Network(e @ HttpError::Transport(_)) => {
                Alert::new("Submission failed", e.to_string())
            }
            SubmitError::Network(_) => Alert::new("Submission failed", DEFAULT_FAILURE_MESSAGE),
            SubmitError::Intent(IntentError::Unsupported { action, .. }) => Alert::new(
                "Not supported",
                format!("{} is not supported on this device.", action),
            ),
            SubmitError::Intent(IntentError::Launch { .. }) => {
                Alert::new("Failed to open", DEFAULT_FAILURE_MESSAGE)
            }
        }
    }
}

/// Where a validated enquiry goes.
#[async_trait]
pub trait EnquiryDispatcher: Send + Sync {
    async fn dispatch(&self, payload: EnquiryPayload) -> Result<Receipt, SubmitError>;
}

/// Posts the enquiry to the backend.
#[derive(Debug, Clone)]
pub struct ApiDispatcher {
    api: ApiClient,
}

impl ApiDispatcher {
    pub fn new(api: ApiClient) -> Self {
        ApiDispatcher { api }
    }
}

#[async_trait]
impl EnquiryDispatcher for ApiDispatcher {
    async fn dispatch(&self, payload: EnquiryPayload) -> Result<Receipt, SubmitError> {
        let response = send_enquiry(&self.api, &payload).await?;
        Ok(Receipt::Posted(response))
    }
}

/// Hands the enquiry to the SMS or mail app.
pub struct IntentDispatcher<O> {
    opener: O,
    mode: ContactMode,
    recipient: String,
    platform: Platform,
}

impl<O: IntentOpener> IntentDispatcher<O> {
    pub fn new(opener: O, mode: ContactMode, recipient: impl Into<String>) -> Self {
        IntentDispatcher {
            opener,
            mode,
            recipient: recipient.into(),
            platform: Platform::current(),
        }
    }

    pub fn on_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    fn intent_for(&self, payload: &EnquiryPayload) -> Intent {
        let body = enquiry_message(payload);
        match self.mode {
            ContactMode::Sms => Intent::Sms {
                to: self.recipient.clone(),
                body,
            },
            ContactMode::Email => Intent::Mail {
                to: self.recipient.clone(),
                subject: format!("Enquiry: {}", payload.product_service),
                body: Some(body),
            },
        }
    }
}

#[async_trait]
impl<O: IntentOpener> EnquiryDispatcher for IntentDispatcher<O> {
    async fn dispatch(&self, payload: EnquiryPayload) -> Result<Receipt, SubmitError> {
        let intent = self.intent_for(&payload);
        let opened = self.opener.open(&intent, self.platform).await?;
        Ok(Receipt::Opened {
            mode: self.mode,
            opened,
        })
    }
}

/// Plain-text message body used for SMS and mail intents.
pub fn enquiry_message(payload: &EnquiryPayload) -> String {
    format!(
        "Product: {}\nDetails: {}\nName: {}\nEmail: {}\nPhone: {}",
        payload.product_service,
        or_dash(&payload.order_notes),
        payload.name,
        or_dash(&payload.email),
        or_dash(&payload.phone),
    )
}

fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "-"
    } else {
        value
    }
}

#[derive(Debug, Clone)]
pub struct EnquiryForm {
    schema: FormSchema,
    fields: EnquiryPayload,
    country_code: Option<String>,
    show_errors: bool,
}

impl EnquiryForm {
    pub fn new(schema: FormSchema) -> Self {
        EnquiryForm {
            schema,
            fields: EnquiryPayload::default(),
            country_code: None,
            show_errors: false,
        }
    }

    /// Dial code prefixed to the phone number on submit, e.g. `+91`.
    pub fn with_country_code(mut self, code: impl Into<String>) -> Self {
        self.set_country_code(code);
        self
    }

    pub fn set_country_code(&mut self, code: impl Into<String>) {
        let code = code.into();
        self.country_code = is_present(&code).then(|| code.trim().to_string());
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn show_errors(&self) -> bool {
        self.show_errors
    }

    pub fn field(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::CompanyName => &self.fields.company_name,
            FieldKey::Name => &self.fields.name,
            FieldKey::Email => &self.fields.email,
            FieldKey::Phone => &self.fields.phone,
            FieldKey::Quantity => &self.fields.quantity,
            FieldKey::ProductService => &self.fields.product_service,
            FieldKey::OrderNotes => &self.fields.order_notes,
        }
    }

    pub fn update_field(&mut self, key: FieldKey, value: impl Into<String>) {
        let slot = match key {
            FieldKey::CompanyName => &mut self.fields.company_name,
            FieldKey::Name => &mut self.fields.name,
            FieldKey::Email => &mut self.fields.email,
            FieldKey::Phone => &mut self.fields.phone,
            FieldKey::Quantity => &mut self.fields.quantity,
            FieldKey::ProductService => &mut self.fields.product_service,
            FieldKey::OrderNotes => &mut self.fields.order_notes,
        };
        *slot = value.into();
    }

    /// Error text for one field, or `""`. Always empty until a submit failed.
    pub fn field_error(&self, key: FieldKey) -> &'static str {
        if !self.show_errors {
            return "";
        }
        self.validate_field(key).unwrap_or("")
    }

    fn validate_field(&self, key: FieldKey) -> Option<&'static str> {
        let value = self.field(key);
        if self.schema.is_required(key) && !is_present(value) {
            return Some(REQUIRED_MESSAGE);
        }
        if !is_present(value) {
            return None;
        }
        match key {
            FieldKey::Email if self.schema.check_email && !is_email_valid(value) => {
                Some(INVALID_EMAIL_MESSAGE)
            }
            FieldKey::Phone if self.schema.check_phone && !is_phone_valid(value) => {
                Some(INVALID_PHONE_MESSAGE)
            }
            _ => None,
        }
    }

    pub fn is_form_valid(&self) -> bool {
        FieldKey::ALL
            .iter()
            .all(|key| self.validate_field(*key).is_none())
    }

    /// The payload as it would be sent, with the dial code applied.
    pub fn payload(&self) -> EnquiryPayload {
        let mut payload = self.fields.clone();
        let phone = payload.phone.trim();
        payload.phone = match &self.country_code {
            Some(code) if !phone.is_empty() => format!("{} {}", code, phone),
            _ => phone.to_string(),
        };
        payload
    }

    pub fn reset(&mut self) {
        self.fields = EnquiryPayload::default();
        self.show_errors = false;
    }

    pub async fn submit<D>(&mut self, dispatcher: &D) -> Result<SubmitOutcome, SubmitError>
    where
        D: EnquiryDispatcher + ?Sized,
    {
        let valid = self.is_form_valid();
        debug!("Enquiry submit clicked, valid={}", valid);
        if !valid {
            self.show_errors = true;
            return Ok(SubmitOutcome::Invalid);
        }

        let receipt = dispatcher.dispatch(self.payload()).await?;
        info!("Enquiry dispatched");
        self.reset();
        Ok(SubmitOutcome::Sent(receipt))
    }
}
