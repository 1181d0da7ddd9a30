//! Mode-dependent form validation. `validate` is pure: it never mutates its
//! input and always re-evaluates the whole form, so stale errors cannot
//! survive an edit. Identifier fields are trimmed before the required check;
//! password fields are checked on the raw value, since trimming a password
//! would change its meaning.

use secrecy::ExposeSecret;

use crate::flow::types::{Field, FieldErrors, FormFields, Mode};

/// Minimum password length for registration and password reset.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Evaluates the active mode's rules against the form and returns the
/// field-scoped errors. Empty result means the form may be submitted.
#[must_use]
pub fn validate(mode: Mode, fields: &FormFields) -> FieldErrors {
    let mut errors = FieldErrors::default();

    match mode {
        Mode::Login => {
            require_identifier(&mut errors, Field::Username, &fields.username, "Username required");
            if fields.password.expose_secret().is_empty() {
                errors.set(Field::Password, "Password required");
            }
        }
        Mode::Register => {
            require_identifier(&mut errors, Field::Username, &fields.username, "Username required");
            require_identifier(&mut errors, Field::Email, &fields.email, "Email required");
            check_password(&mut errors, fields, "Password required", "Password too short");
            check_confirmation(&mut errors, fields);
        }
        Mode::ResetPassword => {
            check_password(
                &mut errors,
                fields,
                "New password required",
                "Password too short (min 6 characters)",
            );
            check_confirmation(&mut errors, fields);
        }
        Mode::ForgotPassword => {
            require_identifier(&mut errors, Field::Username, &fields.username, "Username required");
            require_identifier(&mut errors, Field::Email, &fields.email, "Email required");
        }
    }

    errors
}

fn require_identifier(errors: &mut FieldErrors, field: Field, value: &str, message: &str) {
    if value.trim().is_empty() {
        errors.set(field, message);
    }
}

// A field carries at most one error: the length rule only applies once the
// required check has passed.
fn check_password(errors: &mut FieldErrors, fields: &FormFields, required: &str, too_short: &str) {
    let password = fields.password.expose_secret();
    if password.is_empty() {
        errors.set(Field::Password, required);
    } else if password.len() < MIN_PASSWORD_LENGTH {
        errors.set(Field::Password, too_short);
    }
}

fn check_confirmation(errors: &mut FieldErrors, fields: &FormFields) {
    if fields.password.expose_secret() != fields.confirm_password.expose_secret() {
        errors.set(Field::ConfirmPassword, "Passwords do not match");
    }
}
