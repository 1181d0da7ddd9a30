//! Host capability boundary. The controller never touches the display
//! environment directly; scroll suppression, user-visible notices, and the
//! auth-success event all go through this trait so the flow logic can be
//! exercised against a recording fake.

use crate::flow::types::{AuthSuccess, Notice};

/// Environmental collaborators provided by the hosting application.
pub trait HostBridge: Send + Sync {
    /// Suppress or restore background scrolling while the surface is open.
    fn set_scroll_lock(&self, locked: bool);

    /// Present a user-visible confirmation or failure banner.
    fn notice(&self, notice: Notice);

    /// Deliver the auth-success event, fired once per successful submission.
    fn auth_success(&self, event: AuthSuccess);
}
