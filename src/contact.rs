use std::fmt;

use futures_util::future::LocalBoxFuture;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::logging::{log_event, LogLevel};

pub const EMAILJS_SEND_URL: &str = "https://api.emailjs.com/api/v1.0/email/send";
const GENERIC_FAILURE: &str = "Failed to send.";
const RECIPIENT_PATTERNS: [&str; 3] = ["recipient", "to email", "address is empty"];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmailConfig {
    pub public_key: Option<String>,
    pub service_id: Option<String>,
    pub template_id: Option<String>,
}

pub struct EmailCredentials<'a> {
    pub public_key: &'a str,
    pub service_id: &'a str,
    pub template_id: &'a str,
}

impl EmailConfig {
    pub fn credentials(&self) -> Result<EmailCredentials<'_>, ContactError> {
        match (
            self.public_key.as_deref(),
            self.service_id.as_deref(),
            self.template_id.as_deref(),
        ) {
            (Some(public_key), Some(service_id), Some(template_id)) => Ok(EmailCredentials {
                public_key,
                service_id,
                template_id,
            }),
            _ => Err(ContactError::NotConfigured),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactMessage {
    fn validate(&self) -> Result<(), ContactError> {
        if self.name.trim().is_empty() {
            return Err(ContactError::MissingField("name"));
        }
        let email = self.email.trim();
        let well_formed = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !well_formed {
            return Err(ContactError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ContactError::MissingField("message"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TemplateParams {
    pub from_name: String,
    pub from_email: String,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    pub template_params: TemplateParams,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransportFailure {
    pub text: Option<String>,
}

impl TransportFailure {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text.as_deref().unwrap_or(GENERIC_FAILURE))
    }
}

pub trait EmailTransport {
    fn send(&self, request: EmailRequest) -> LocalBoxFuture<'_, Result<(), TransportFailure>>;
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Email is not configured. Add EMAILJS_PUBLIC_KEY, EMAILJS_SERVICE_ID, and EMAILJS_TEMPLATE_ID to the build environment.")]
    NotConfigured,
    #[error("Please fill in your {0}.")]
    MissingField(&'static str),
    #[error("Recipient's address is empty. Set 'To Email' in your EmailJS template (Dashboard → Email Templates → your template).")]
    RecipientMissing,
    #[error("{0}")]
    Service(String),
}

fn classify_failure(failure: TransportFailure) -> ContactError {
    let Some(text) = failure.text.map(|text| text.trim().to_string()).filter(|text| !text.is_empty())
    else {
        return ContactError::Service(GENERIC_FAILURE.to_string());
    };

    let lowered = text.to_lowercase();
    if RECIPIENT_PATTERNS.iter().any(|pattern| lowered.contains(pattern)) {
        ContactError::RecipientMissing
    } else {
        ContactError::Service(text)
    }
}

/// Sends `message` through `transport`. Nothing is sent unless all three
/// credentials are configured and the fields are filled in.
pub async fn submit<T: EmailTransport + ?Sized>(
    config: &EmailConfig,
    message: &ContactMessage,
    transport: &T,
) -> Result<(), ContactError> {
    let credentials = config.credentials().inspect_err(|_| {
        log_event(LogLevel::Warn, "contact_not_configured", json!({}));
    })?;
    message.validate()?;

    let request = EmailRequest {
        service_id: credentials.service_id.to_string(),
        template_id: credentials.template_id.to_string(),
        user_id: credentials.public_key.to_string(),
        template_params: TemplateParams {
            from_name: message.name.trim().to_string(),
            from_email: message.email.trim().to_string(),
            message: message.message.trim().to_string(),
        },
    };

    match transport.send(request).await {
        Ok(()) => {
            log_event(LogLevel::Info, "contact_sent", json!({}));
            Ok(())
        }
        Err(failure) => {
            let error = classify_failure(failure);
            let reason = if error == ContactError::RecipientMissing {
                "recipient_missing"
            } else {
                "service"
            };
            log_event(LogLevel::Warn, "contact_send_failed", json!({ "reason": reason }));
            Err(error)
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Sending,
    Success,
    Error(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub fields: ContactMessage,
    pub status: FormStatus,
}

impl ContactForm {
    pub fn edit(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.fields.name = value,
            ContactField::Email => self.fields.email = value,
            ContactField::Message => self.fields.message = value,
        }
        if self.status != FormStatus::Sending {
            self.status = FormStatus::Idle;
        }
    }

    pub fn is_sending(&self) -> bool {
        self.status == FormStatus::Sending
    }

    pub fn begin_submit(&mut self) -> Option<ContactMessage> {
        if self.is_sending() {
            return None;
        }
        self.status = FormStatus::Sending;
        Some(self.fields.clone())
    }

    pub fn finish(&mut self, result: Result<(), ContactError>) {
        match result {
            Ok(()) => {
                self.status = FormStatus::Success;
                self.fields = ContactMessage::default();
            }
            Err(error) => self.status = FormStatus::Error(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeTransport {
        calls: Cell<usize>,
        last: RefCell<Option<EmailRequest>>,
        outcome: Result<(), TransportFailure>,
    }

    impl FakeTransport {
        fn answering(outcome: Result<(), TransportFailure>) -> Self {
            Self {
                calls: Cell::new(0),
                last: RefCell::new(None),
                outcome,
            }
        }
    }

    impl EmailTransport for FakeTransport {
        fn send(&self, request: EmailRequest) -> LocalBoxFuture<'_, Result<(), TransportFailure>> {
            self.calls.set(self.calls.get() + 1);
            *self.last.borrow_mut() = Some(request);
            let outcome = self.outcome.clone();
            Box::pin(async move { outcome })
        }
    }

    fn configured() -> EmailConfig {
        EmailConfig {
            public_key: Some("pk_live".to_string()),
            service_id: Some("service_1".to_string()),
            template_id: Some("template_1".to_string()),
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            message: " Hello there ".to_string(),
        }
    }

    #[tokio::test]
    async fn unset_credentials_fail_without_sending() {
        let transport = FakeTransport::answering(Ok(()));

        let result = submit(&EmailConfig::default(), &message(), &transport).await;

        assert_eq!(result, Err(ContactError::NotConfigured));
        assert!(result
            .err()
            .map(|error| error.to_string().starts_with("Email is not configured"))
            .unwrap_or(false));
        assert_eq!(transport.calls.get(), 0);
    }

    #[tokio::test]
    async fn one_missing_credential_is_enough_to_refuse() {
        let transport = FakeTransport::answering(Ok(()));
        let config = EmailConfig {
            template_id: None,
            ..configured()
        };

        let result = submit(&config, &message(), &transport).await;

        assert_eq!(result, Err(ContactError::NotConfigured));
        assert_eq!(transport.calls.get(), 0);
    }

    #[tokio::test]
    async fn recipient_empty_failure_maps_to_remediation() {
        let transport = FakeTransport::answering(Err(TransportFailure::new(
            "The recipients address is empty",
        )));

        let result = submit(&configured(), &message(), &transport).await;

        let error = result.expect_err("send should fail");
        assert_eq!(error, ContactError::RecipientMissing);
        assert!(error.to_string().contains("Set 'To Email'"));
        assert!(!error.to_string().contains("recipients address"));
    }

    #[tokio::test]
    async fn other_failures_keep_the_service_text() {
        let transport = FakeTransport::answering(Err(TransportFailure::new("Quota exceeded")));

        let result = submit(&configured(), &message(), &transport).await;

        assert_eq!(result, Err(ContactError::Service("Quota exceeded".to_string())));
    }

    #[tokio::test]
    async fn failure_without_text_uses_generic_message() {
        let transport = FakeTransport::answering(Err(TransportFailure::default()));

        let result = submit(&configured(), &message(), &transport).await;

        assert_eq!(result, Err(ContactError::Service("Failed to send.".to_string())));
    }

    #[tokio::test]
    async fn successful_send_uses_template_params() {
        let transport = FakeTransport::answering(Ok(()));

        submit(&configured(), &message(), &transport)
            .await
            .expect("send succeeds");

        let request = transport.last.borrow().clone().expect("request recorded");
        assert_eq!(request.user_id, "pk_live");
        assert_eq!(request.service_id, "service_1");
        assert_eq!(request.template_params.from_name, "Ada");
        assert_eq!(request.template_params.message, "Hello there");

        let body = serde_json::to_value(&request).expect("serializable");
        assert_eq!(body["template_params"]["from_email"], "ada@example.com");
    }

    #[tokio::test]
    async fn malformed_email_is_rejected_before_sending() {
        let transport = FakeTransport::answering(Ok(()));
        let mut invalid = message();
        invalid.email = "not-an-address".to_string();

        let result = submit(&configured(), &invalid, &transport).await;

        assert_eq!(result, Err(ContactError::MissingField("email")));
        assert_eq!(transport.calls.get(), 0);
    }

    #[test]
    fn recipient_patterns_match_case_insensitively() {
        assert_eq!(
            classify_failure(TransportFailure::new("Invalid TO EMAIL setting")),
            ContactError::RecipientMissing
        );
        assert_eq!(
            classify_failure(TransportFailure::new("RECIPIENT missing")),
            ContactError::RecipientMissing
        );
    }

    #[test]
    fn form_status_lifecycle() {
        let mut form = ContactForm::default();
        form.edit(ContactField::Name, "Ada".to_string());

        let outgoing = form.begin_submit().expect("idle form can submit");
        assert_eq!(outgoing.name, "Ada");
        assert!(form.begin_submit().is_none());

        form.finish(Err(ContactError::NotConfigured));
        assert!(matches!(form.status, FormStatus::Error(_)));

        form.edit(ContactField::Message, "hi".to_string());
        assert_eq!(form.status, FormStatus::Idle);

        form.begin_submit();
        form.finish(Ok(()));
        assert_eq!(form.status, FormStatus::Success);
        assert_eq!(form.fields, ContactMessage::default());
    }
}
