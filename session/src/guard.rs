//! Navigation guards consulted by the router.
//!
//! Both guards are pure functions of `(is_authenticated, current_path)`, so the
//! redirect table can be tested without a router.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

/// Public landing page, and the prefix the protected guard lets through.
pub const LANDING_PATH: &str = "/Home";
pub const LOGIN_PATH: &str = "/Login";
pub const REGISTER_PATH: &str = "/Register";
/// Protected area root, and the prefix the redirect guard stops at.
pub const DASHBOARD_PATH: &str = "/Dashboard";

/// What a guarded route should do on this render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the guarded children.
    Render,
    /// Replace the current history entry with this path.
    Redirect(&'static str),
    /// Render nothing and stay put.
    Nothing,
}

/// Guard for protected regions: anonymous visitors are bounced to landing
/// unless they are already under it.
#[must_use]
pub fn protected_guard(is_authenticated: bool, current_path: &str) -> GuardOutcome {
    if !is_authenticated && !current_path.starts_with(LANDING_PATH) {
        return GuardOutcome::Redirect(LANDING_PATH);
    }
    GuardOutcome::Render
}

/// Guard mounted at the root index.
///
/// The authenticated-and-already-under-dashboard branch cannot be reached from
/// the root mount point; it renders nothing rather than redirecting.
#[must_use]
pub fn redirect_guard(is_authenticated: bool, current_path: &str) -> GuardOutcome {
    if is_authenticated && !current_path.starts_with(DASHBOARD_PATH) {
        return GuardOutcome::Redirect(DASHBOARD_PATH);
    }
    if !is_authenticated {
        return GuardOutcome::Redirect(LANDING_PATH);
    }
    GuardOutcome::Nothing
}
