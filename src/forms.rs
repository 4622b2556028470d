//! Form submission pipeline.
//!
//! Four form kinds arrive as JSON from the rendered pages: contact message,
//! caregiver referral, care request, and job application. Every submission
//! runs the same pipeline in a fixed order: presence check, email format
//! check, phone format check, sanitization, then forwarding by email.
//! Validation always finishes before the mailer is touched, so an invalid
//! submission can never cause a send.
//!
//! Sanitization is escaping, not rejection: angle brackets and quotes
//! become HTML entities because the values are interpolated into an HTML
//! email body.

use maud::{html, Markup, PreEscaped};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::config::MailConfig;
use crate::mailer::{EmailMessage, MailError, Mailer};

// Accepts anything shaped local@domain.tld without whitespace.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// International numbers with optional + or 00 prefix, 7 to 15 digits.
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+|00)?[1-9]\d{6,14}$").unwrap());

#[derive(Error, Debug)]
pub enum FormError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("failed to forward submission: {0}")]
    Mail(#[from] MailError),
}

impl FormError {
    /// Message safe to return to the submitting browser.
    pub fn user_message(&self) -> String {
        match self {
            FormError::Mail(_) => "Failed to send message".to_string(),
            other => other.to_string(),
        }
    }
}

/// The four accepted submission kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Message,
    Referral,
    Request,
    Job,
}

impl FormKind {
    pub fn subject(self) -> &'static str {
        match self {
            FormKind::Message => "Nova kontakt poruka",
            FormKind::Referral => "Nova preporuka za njegovateljicu",
            FormKind::Request => "Nova prijava za njegu",
            FormKind::Job => "Nova prijava za posao",
        }
    }

    /// Sender mailbox; one address per form kind so replies route cleanly.
    pub fn from_address(self, mail: &MailConfig) -> &str {
        match self {
            FormKind::Message => &mail.from_message,
            FormKind::Referral => &mail.from_referral,
            FormKind::Request => &mail.from_request,
            FormKind::Job => &mail.from_job,
        }
    }
}

/// How a field is validated beyond presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldFormat {
    Text,
    Email,
    Phone,
}

/// One labelled submission value, normalized from whichever payload shape
/// it arrived in.
#[derive(Debug, Clone)]
pub struct FormField {
    label: &'static str,
    value: String,
    format: FieldFormat,
    required: bool,
}

impl FormField {
    fn text(label: &'static str, value: &str) -> Self {
        Self {
            label,
            value: value.to_string(),
            format: FieldFormat::Text,
            required: true,
        }
    }

    fn email(label: &'static str, value: &str) -> Self {
        Self {
            format: FieldFormat::Email,
            ..Self::text(label, value)
        }
    }

    fn phone(label: &'static str, value: &str) -> Self {
        Self {
            format: FieldFormat::Phone,
            ..Self::text(label, value)
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Contact-message payload; job applications share the same shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MessageForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub comment: String,
}

impl MessageForm {
    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("Ime", &self.first_name),
            FormField::text("Prezime", &self.last_name),
            FormField::email("Email", &self.email),
            FormField::phone("Telefon", &self.phone),
            FormField::text("Poruka", &self.comment),
        ]
    }
}

/// Caregiver referral: who is being recommended, and who recommends them.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReferralForm {
    pub referral_first_name: String,
    pub referral_last_name: String,
    pub referral_email: String,
    pub referral_phone: String,
    pub referrer_first_name: String,
    pub referrer_last_name: String,
    pub referrer_email: String,
    pub referrer_phone: String,
    pub comment: String,
}

impl ReferralForm {
    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("Ime njegovateljice", &self.referral_first_name),
            FormField::text("Prezime njegovateljice", &self.referral_last_name),
            FormField::email("Email njegovateljice", &self.referral_email),
            FormField::phone("Telefon njegovateljice", &self.referral_phone),
            FormField::text("Ime preporučitelja", &self.referrer_first_name),
            FormField::text("Prezime preporučitelja", &self.referrer_last_name),
            FormField::email("Email preporučitelja", &self.referrer_email),
            FormField::phone("Telefon preporučitelja", &self.referrer_phone),
            FormField::text("Napomena", &self.comment).optional(),
        ]
    }
}

/// Care request from a prospective client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestForm {
    pub contractor_first_name: String,
    pub contractor_last_name: String,
    pub contractor_email: String,
    pub contractor_phone: String,
}

impl RequestForm {
    fn fields(&self) -> Vec<FormField> {
        vec![
            FormField::text("Ime", &self.contractor_first_name),
            FormField::text("Prezime", &self.contractor_last_name),
            FormField::email("Email", &self.contractor_email),
            FormField::phone("Telefon", &self.contractor_phone),
        ]
    }
}

/// A submission of any kind, ready for the pipeline.
#[derive(Debug, Clone)]
pub enum Submission {
    Message(MessageForm),
    Referral(ReferralForm),
    Request(RequestForm),
    Job(MessageForm),
}

impl Submission {
    pub fn kind(&self) -> FormKind {
        match self {
            Submission::Message(_) => FormKind::Message,
            Submission::Referral(_) => FormKind::Referral,
            Submission::Request(_) => FormKind::Request,
            Submission::Job(_) => FormKind::Job,
        }
    }

    fn fields(&self) -> Vec<FormField> {
        match self {
            Submission::Message(f) | Submission::Job(f) => f.fields(),
            Submission::Referral(f) => f.fields(),
            Submission::Request(f) => f.fields(),
        }
    }
}

/// Escape characters with meaning in HTML. Applied to every value before
/// it reaches the email body.
pub fn sanitize_input(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}

fn validate(fields: &[FormField]) -> Result<(), FormError> {
    if fields
        .iter()
        .any(|f| f.required && f.value.trim().is_empty())
    {
        return Err(FormError::MissingFields);
    }
    for field in fields {
        if !field.required && field.value.trim().is_empty() {
            continue;
        }
        match field.format {
            FieldFormat::Text => {}
            FieldFormat::Email => {
                if !EMAIL_RE.is_match(field.value.trim()) {
                    return Err(FormError::InvalidEmail(field.label.to_string()));
                }
            }
            FieldFormat::Phone => {
                let compact: String =
                    field.value.chars().filter(|c| !c.is_whitespace()).collect();
                if !PHONE_RE.is_match(&compact) {
                    return Err(FormError::InvalidPhone(field.label.to_string()));
                }
            }
        }
    }
    Ok(())
}

/// The HTML body of the forwarded email: a heading plus a label/value
/// table. Values are pre-sanitized; `PreEscaped` keeps the entities from
/// being escaped a second time.
fn email_body(kind: FormKind, fields: &[FormField]) -> Markup {
    html! {
        div style="font-family: Arial, sans-serif; max-width: 600px;" {
            h2 style="color: #1a1a2e;" { (kind.subject()) }
            table style="width: 100%; border-collapse: collapse;" {
                @for field in fields {
                    tr {
                        td style="padding: 8px; border-bottom: 1px solid #eee; font-weight: bold; width: 40%;" {
                            (field.label)
                        }
                        td style="padding: 8px; border-bottom: 1px solid #eee;" {
                            (PreEscaped(sanitize_input(&field.value)))
                        }
                    }
                }
            }
        }
    }
}

/// Run the full pipeline: validate, sanitize, forward. The mailer is only
/// reached once every check has passed.
pub async fn submit(
    submission: &Submission,
    mailer: &dyn Mailer,
    mail: &MailConfig,
) -> Result<(), FormError> {
    let kind = submission.kind();
    let fields = submission.fields();
    validate(&fields)?;

    let message = EmailMessage {
        from: kind.from_address(mail).to_string(),
        to: mail.to.clone(),
        subject: kind.subject().to_string(),
        html: email_body(kind, &fields).into_string(),
    };
    mailer.send(message).await?;
    tracing::info!(kind = ?kind, "form submission forwarded");
    Ok(())
}
