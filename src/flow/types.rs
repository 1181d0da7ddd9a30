//! Data model for the authentication flow: the mode enum, form fields,
//! field-scoped errors, and the payloads delivered to the host. Password
//! material is wrapped in `SecretString` so `Debug` output and tracing spans
//! never leak it.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// One of the four mutually exclusive authentication interaction states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    #[default]
    Login,
    Register,
    ResetPassword,
    ForgotPassword,
}

impl Mode {
    /// Wire name of the mode, matching the identity-service route naming.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ResetPassword => "reset-password",
            Self::ForgotPassword => "forgot-password",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Input field addressed by validation errors and field edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
}

/// User-entered form state. Reset to empty on successful submission and on
/// close; never partially reset.
#[derive(Clone, Debug, Default)]
pub struct FormFields {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl FormFields {
    /// Identifier submitted for account recovery: the username when one was
    /// entered, otherwise the email address. The ordering is fixed.
    #[must_use]
    pub fn recovery_identifier(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// Field-scoped validation errors. An entry is present only for a field that
/// currently fails validation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Drops a single field's entry, used when the user edits that field.
    pub fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Surface state owned by the controller alongside the form fields.
/// `reset_token` is populated only when the surface is opened from a password
/// reset deep link; it is opaque here and passed through to the service.
#[derive(Clone, Debug, Default)]
pub struct SessionFlags {
    pub is_open: bool,
    pub is_submitting: bool,
    pub reset_token: Option<String>,
}

/// Payload of the auth-success event, fired once per successful submission.
/// `data` is the snapshot of the fields as they were submitted.
#[derive(Clone, Debug)]
pub struct AuthSuccess {
    pub mode: Mode,
    pub data: FormFields,
}

/// Supported notice styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// User-visible banner message presented through the host. Messages must be
/// safe to render and never include secrets or raw service errors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}
