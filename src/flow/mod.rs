//! Authentication flow controller. Owns the mode state, the form fields, and
//! the submission lifecycle; validation lives in [`validator`] and every
//! environmental effect goes through [`host::HostBridge`].

pub mod host;
pub mod types;
pub mod validator;

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, instrument};
use ulid::Ulid;

use crate::flow::host::HostBridge;
use crate::flow::types::{
    AuthSuccess, Field, FieldErrors, FormFields, Mode, Notice, SessionFlags,
};
use crate::service::error::ServiceError;
use crate::service::IdentityService;

/// Terminal result of a single `submit` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A previous submission is still in flight; this call was a no-op.
    InFlight,
    /// Validation failed; errors were stored and no request was made.
    Invalid,
    Succeeded,
    Failed,
    /// The surface was closed while the request was pending and the response
    /// was discarded.
    Abandoned,
}

#[derive(Debug, Default)]
struct FlowState {
    mode: Mode,
    fields: FormFields,
    errors: FieldErrors,
    flags: SessionFlags,
    // Incremented whenever the surface closes; a pending submission whose
    // generation no longer matches must not touch state or the host.
    generation: u64,
}

impl FlowState {
    fn close(&mut self) {
        self.flags.is_open = false;
        self.flags.is_submitting = false;
        self.errors.clear_all();
        self.fields = FormFields::default();
        self.generation = self.generation.wrapping_add(1);
    }
}

/// Multi-mode authentication surface: open/close lifecycle, per-mode
/// validation, and sequential submission against an identity service.
///
/// Methods take `&self`; the mutable state lives behind a mutex that is never
/// held across an await point, so the host may keep interacting with the
/// surface (including closing it) while a submission is pending.
pub struct AuthFlow<S, H> {
    service: S,
    host: H,
    state: Mutex<FlowState>,
}

impl<S, H> AuthFlow<S, H>
where
    S: IdentityService,
    H: HostBridge,
{
    /// Creates a closed surface in login mode with empty fields.
    pub fn new(service: S, host: H) -> Self {
        Self {
            service,
            host,
            state: Mutex::new(FlowState::default()),
        }
    }

    /// Opens the surface in the given mode and suppresses background scroll.
    /// Field values survive reopening; errors do not.
    pub fn open(&self, mode: Mode) {
        {
            let mut state = self.lock();
            state.mode = mode;
            state.flags.is_open = true;
            state.errors.clear_all();
        }
        self.host.set_scroll_lock(true);
    }

    /// Opens the surface in the default mode, login.
    pub fn open_default(&self) {
        self.open(Mode::Login);
    }

    /// Stores the reset token from an email deep link, then opens the surface
    /// in reset-password mode. The token is opaque and passed through to the
    /// identity service unchanged.
    pub fn open_for_reset(&self, token: impl Into<String>) {
        {
            let mut state = self.lock();
            state.flags.reset_token = Some(token.into());
        }
        self.open(Mode::ResetPassword);
    }

    /// Opens the surface in forgot-password mode.
    pub fn open_forgot_password(&self) {
        self.open(Mode::ForgotPassword);
    }

    /// Closes the surface: clears errors and all form fields, restores
    /// background scroll, and abandons any in-flight submission.
    pub fn close(&self) {
        {
            let mut state = self.lock();
            state.close();
        }
        self.host.set_scroll_lock(false);
    }

    /// Changes the active mode and clears errors. Field values are kept so a
    /// user who switches mode does not lose partially entered data.
    pub fn switch_mode(&self, mode: Mode) {
        let mut state = self.lock();
        state.mode = mode;
        state.errors.clear_all();
    }

    /// Records user input for one field.
    pub fn set_field(&self, field: Field, value: &str) {
        let mut state = self.lock();
        match field {
            Field::Username => state.fields.username = value.to_string(),
            Field::Email => state.fields.email = value.to_string(),
            Field::Password => state.fields.password = value.to_string().into(),
            Field::ConfirmPassword => state.fields.confirm_password = value.to_string().into(),
        }
    }

    /// Drops a single field's error while the user edits that field. This is a
    /// display affordance; it does not re-run validation.
    pub fn clear_field_error(&self, field: Field) {
        self.lock().errors.clear(field);
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.lock().mode
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().flags.is_open
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.lock().flags.is_submitting
    }

    /// Snapshot of the surface flags.
    #[must_use]
    pub fn flags(&self) -> SessionFlags {
        self.lock().flags.clone()
    }

    /// Snapshot of the current form fields.
    #[must_use]
    pub fn fields(&self) -> FormFields {
        self.lock().fields.clone()
    }

    /// Snapshot of the current field errors.
    #[must_use]
    pub fn errors(&self) -> FieldErrors {
        self.lock().errors.clone()
    }

    /// Validates the form and, when it passes, dispatches exactly one
    /// identity-service call for the active mode. At most one submission is in
    /// flight per instance; a second call while pending is a no-op.
    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let attempt = Ulid::new();

        let (mode, fields, reset_token, generation) = {
            let mut state = self.lock();
            if state.flags.is_submitting {
                debug!(%attempt, "submission already in flight, ignoring");
                return SubmitOutcome::InFlight;
            }

            let errors = validator::validate(state.mode, &state.fields);
            if !errors.is_empty() {
                debug!(%attempt, mode = %state.mode, errors = errors.len(), "validation failed");
                state.errors = errors;
                return SubmitOutcome::Invalid;
            }

            state.errors.clear_all();
            state.flags.is_submitting = true;
            (
                state.mode,
                state.fields.clone(),
                state.flags.reset_token.clone(),
                state.generation,
            )
        };

        debug!(%attempt, mode = %mode, "dispatching identity-service request");
        let result = self.dispatch(mode, &fields, reset_token.as_deref()).await;

        let mut state = self.lock();
        if state.generation != generation {
            debug!(%attempt, mode = %mode, "surface closed while pending, discarding response");
            return SubmitOutcome::Abandoned;
        }
        state.flags.is_submitting = false;

        match result {
            Ok(()) => {
                state.close();
                drop(state);
                self.host.auth_success(AuthSuccess { mode, data: fields });
                self.host.set_scroll_lock(false);
                self.host.notice(Notice::success(success_notice(mode)));
                SubmitOutcome::Succeeded
            }
            Err(err) => {
                drop(state);
                error!(%attempt, mode = %mode, "identity-service request failed: {err}");
                self.host.notice(Notice::error(failure_notice(mode)));
                SubmitOutcome::Failed
            }
        }
    }

    async fn dispatch(
        &self,
        mode: Mode,
        fields: &FormFields,
        reset_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        match mode {
            Mode::Login => self
                .service
                .login(&fields.username, &fields.password)
                .await
                .map(|_| ()),
            Mode::Register => self
                .service
                .register(&fields.username, &fields.email, &fields.password)
                .await
                .map(|_| ()),
            Mode::ResetPassword => self
                .service
                .reset_password(reset_token.unwrap_or_default(), &fields.password)
                .await
                .map(|_| ()),
            Mode::ForgotPassword => self
                .service
                .forgot_password(fields.recovery_identifier())
                .await
                .map(|_| ()),
        }
    }

    // The lock is never held across an await point; a poisoned mutex only
    // means a panic elsewhere, so take the state as-is instead of propagating.
    fn lock(&self) -> MutexGuard<'_, FlowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

const fn success_notice(mode: Mode) -> &'static str {
    match mode {
        Mode::Login => "Logged in successfully!",
        Mode::Register => "Account created successfully!",
        Mode::ResetPassword => {
            "Password reset successfully! You can now login with your new password."
        }
        Mode::ForgotPassword => "Password reset email sent! Check your inbox.",
    }
}

const fn failure_notice(mode: Mode) -> &'static str {
    match mode {
        Mode::Login => "Login failed. Please check your credentials.",
        Mode::Register => "Registration failed. Please try again.",
        Mode::ResetPassword => {
            "Failed to reset password. Please try again or request a new reset link."
        }
        Mode::ForgotPassword => "Failed to send reset email. Please try again.",
    }
}
