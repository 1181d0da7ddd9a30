//! # Ensaluti (Authentication Flow Controller)
//!
//! `ensaluti` is the authentication-flow controller embedded in a larger web
//! front-end. A single reusable component manages four interaction modes
//! (login, registration, password reset, forgot-password), validates
//! user-entered credentials per mode, and submits them to a remote identity
//! service.
//!
//! ## Modes & Validation
//!
//! The active [`flow::types::Mode`] is a closed enum; validation rules and the
//! identity-service operation are selected by exhaustive matching, so a new
//! mode cannot be added without updating both tables. Validation is a pure
//! function over the current form fields and always re-evaluates the whole
//! form; errors are field-scoped and cleared wholesale on every mode switch.
//!
//! ## Submission
//!
//! [`flow::AuthFlow::submit`] runs validate → request → outcome as one awaited
//! sequence and guarantees at most one in-flight identity-service call per
//! component instance. On success the host receives an auth-success event and
//! the surface closes; on failure form data is preserved so the user can retry.
//! Closing the surface while a request is pending abandons the response.
//!
//! ## Host Boundary
//!
//! Environmental side effects (background-scroll suppression, user-visible
//! notices, the auth-success event) go through the [`flow::host::HostBridge`]
//! capability trait, keeping the core logic testable without a display
//! environment. Password material is held as [`secrecy::SecretString`] and
//! never reaches logs.

pub mod flow;
pub mod service;

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
