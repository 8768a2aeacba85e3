//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Guards apply identical redirect behavior, and every page issues auth
//! operations the same way: snapshot the session into a gateway, run the
//! request, settle it into the store, then raise a toast.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use session::AuthError;
use session::gateway::{AuthRequest, fallback_message, perform};
use session::guard::GuardOutcome;
use session::reducer::{AuthEvent, AuthOp};

use crate::config::ClientConfig;
use crate::net::api::HttpAuthGateway;
use crate::state::auth::AuthState;
use crate::state::notice::{NOTICE_TTL_MS, NoticeKind, NoticeState};
use crate::util::google::GoogleCallback;

/// Guard redirects replace the current history entry.
#[must_use]
pub fn replace_navigation() -> NavigateOptions {
    NavigateOptions { replace: true, ..NavigateOptions::default() }
}

/// Path a guard outcome wants to navigate to, if any.
#[must_use]
pub fn redirect_target(outcome: Option<GuardOutcome>) -> Option<&'static str> {
    match outcome {
        Some(GuardOutcome::Redirect(path)) => Some(path),
        _ => None,
    }
}

/// Navigate whenever `outcome` asks for a redirect.
pub fn install_guard_redirect<O, F>(outcome: O, navigate: F)
where
    O: Fn() -> Option<GuardOutcome> + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let Some(path) = redirect_target(outcome()) {
            navigate(path, replace_navigation());
        }
    });
}

/// Queue a toast and schedule its dismissal.
pub fn notify(notices: RwSignal<NoticeState>, kind: NoticeKind, message: impl Into<String>) {
    let Some(id) = notices.try_update(|n| n.push(kind, message)) else {
        return;
    };
    schedule_dismiss(notices, id);
}

fn schedule_dismiss(notices: RwSignal<NoticeState>, id: u64) {
    #[cfg(feature = "csr")]
    {
        gloo_timers::callback::Timeout::new(NOTICE_TTL_MS, move || {
            notices.try_update(|n| n.dismiss(id));
        })
        .forget();
    }
    #[cfg(not(feature = "csr"))]
    {
        let _ = (notices, id, NOTICE_TTL_MS);
    }
}

/// Page a Google sign-in was started from; picks the operation and its texts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoogleFlow {
    SignIn,
    SignUp,
}

impl GoogleFlow {
    #[must_use]
    pub fn op(self) -> AuthOp {
        match self {
            Self::SignIn => AuthOp::FederatedLogin,
            Self::SignUp => AuthOp::FederatedSignUp,
        }
    }

    #[must_use]
    pub fn request(self, access_token: String) -> AuthRequest {
        match self {
            Self::SignIn => AuthRequest::FederatedLogin { access_token },
            Self::SignUp => AuthRequest::FederatedSignUp { access_token },
        }
    }
}

/// Handles to the auth and notice contexts, for issuing operations.
#[derive(Clone, Copy)]
pub struct AuthActions {
    pub auth: RwSignal<AuthState>,
    pub notices: RwSignal<NoticeState>,
}

impl AuthActions {
    /// Pull both signals out of context. Call during component setup.
    #[must_use]
    pub fn from_context() -> Self {
        Self { auth: expect_context::<RwSignal<AuthState>>(), notices: expect_context::<RwSignal<NoticeState>>() }
    }

    /// Run `request` in the background. `on_settled` receives `true` on
    /// success after the session and storage have been updated.
    pub fn run(self, request: AuthRequest, on_settled: impl FnOnce(bool) + 'static) {
        let op = request.op();
        let session = self.auth.with_untracked(|s| s.session().cloned().unwrap_or_default());
        let gateway = HttpAuthGateway::new(&ClientConfig::current(), &session);
        leptos::task::spawn_local(async move {
            let result = perform(&gateway, request).await;
            if let Some(ok) = self.settle(op, result) {
                on_settled(ok);
            }
        });
    }

    /// Settle `result` into the session and queue its toast. `None` when the
    /// auth state is gone (app torn down); nothing is reported then.
    fn settle(self, op: AuthOp, result: Result<AuthEvent, AuthError>) -> Option<bool> {
        let Some(settled) = self.auth.try_update(|s| s.settle(op, result)) else {
            log::debug!("auth state disposed before {} settled", op.as_str());
            return None;
        };
        if let Some(id) = self.notices.try_update(|n| n.report(op, &settled)) {
            schedule_dismiss(self.notices, id);
        }
        Some(settled.is_ok())
    }

    /// Finish a Google sign-in if the current URL carries the OAuth callback.
    /// Call once during page setup.
    pub fn complete_google_sign_in(
        self,
        flow: GoogleFlow,
        busy: RwSignal<bool>,
        on_success: impl FnOnce() + 'static,
    ) {
        match crate::util::google::take_callback() {
            Some(GoogleCallback::Token { access_token, .. }) => {
                busy.set(true);
                self.run(flow.request(access_token), move |ok| {
                    busy.set(false);
                    if ok {
                        on_success();
                    }
                });
            }
            Some(GoogleCallback::Denied { error }) => {
                log::info!("google sign-in denied: {error}");
                notify(self.notices, NoticeKind::Error, fallback_message(flow.op()));
            }
            None => {}
        }
    }
}
