use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::config::ClientConfig;
use crate::services::timer::timeout_millis;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    /// CSS modifier class for the status pill
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Self {
            text: text.into(),
            severity,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Info)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Severity::Error)
    }

    pub fn class(&self) -> String {
        format!("status-pill {}", self.severity.as_str())
    }
}

/// When status messages hide themselves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatusPolicy {
    pub hide_after: Duration,
    pub auto_hide_errors: bool,
}

impl StatusPolicy {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            hide_after: config.status_hide_delay(),
            auto_hide_errors: config.auto_hide_errors,
        }
    }

    /// `None` means the message stays until the next one replaces it.
    pub fn hide_delay(&self, severity: Severity) -> Option<Duration> {
        match severity {
            Severity::Error if !self.auto_hide_errors => None,
            _ => Some(self.hide_after),
        }
    }
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

/// The single status slot.
///
/// Every `show` bumps the generation; a scheduled hide only applies to the
/// generation it was scheduled for, so a stale timer never hides a newer message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusBoard {
    current: Option<StatusMessage>,
    generation: u64,
}

impl StatusBoard {
    /// Replace the current message. Returns the hide token and delay if the
    /// message should auto-hide.
    pub fn show(&mut self, message: StatusMessage, policy: &StatusPolicy) -> Option<(u64, Duration)> {
        self.generation += 1;
        let delay = policy.hide_delay(message.severity);
        self.current = Some(message);
        delay.map(|d| (self.generation, d))
    }

    /// Hide the message if `token` still refers to it.
    pub fn expire(&mut self, token: u64) -> bool {
        if token == self.generation && self.current.is_some() {
            self.current = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.generation += 1;
        self.current = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }
}

// ============================================================================
// Reactive State
// ============================================================================

#[derive(Clone, Copy)]
pub struct StatusState {
    pub board: RwSignal<StatusBoard>,
    policy: StatusPolicy,
}

impl StatusState {
    pub fn new(policy: StatusPolicy) -> Self {
        Self {
            board: RwSignal::new(StatusBoard::default()),
            policy,
        }
    }

    pub fn show(&self, message: StatusMessage) {
        match message.severity {
            Severity::Error => tracing::warn!(status = %message.text),
            _ => tracing::info!(status = %message.text),
        }

        let mut scheduled = None;
        self.board.update(|board| scheduled = board.show(message, &self.policy));

        if let Some((token, delay)) = scheduled {
            let board = self.board;
            spawn_local(async move {
                TimeoutFuture::new(timeout_millis(delay)).await;
                board.update(|b| {
                    b.expire(token);
                });
            });
        }
    }

    pub fn dismiss(&self) {
        self.board.update(StatusBoard::clear);
    }

    pub fn current(&self) -> Option<StatusMessage> {
        self.board.with(|b| b.current().cloned())
    }
}

pub fn provide_status_state(policy: StatusPolicy) -> StatusState {
    let state = StatusState::new(policy);
    provide_context(state);
    state
}

pub fn use_status_state() -> StatusState {
    expect_context::<StatusState>()
}
