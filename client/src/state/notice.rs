//! Transient toast notifications.
//!
//! Every settled auth operation produces one notice: the success text for the
//! operation, or the error's message. Notices expire after [`NOTICE_TTL_MS`].

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use session::AuthError;
use session::gateway::success_message;
use session::reducer::AuthOp;

/// How long a toast stays on screen.
pub const NOTICE_TTL_MS: u32 = 5_000;

/// Oldest toasts are dropped beyond this many.
pub const MAX_VISIBLE_NOTICES: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "toast toast--success",
            Self::Error => "toast toast--error",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct NoticeState {
    pub items: Vec<Notice>,
    next_id: u64,
}

impl NoticeState {
    /// Queue a notice and return its id.
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notice { id, kind, message: message.into() });
        if self.items.len() > MAX_VISIBLE_NOTICES {
            let overflow = self.items.len() - MAX_VISIBLE_NOTICES;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|n| n.id != id);
    }

    /// Queue the notice for a settled operation.
    pub fn report(&mut self, op: AuthOp, result: &Result<(), AuthError>) -> u64 {
        match result {
            Ok(()) => self.push(NoticeKind::Success, success_message(op)),
            Err(e) => self.push(NoticeKind::Error, e.to_string()),
        }
    }
}
