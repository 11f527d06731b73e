//! 短暂的成功/错误提示。同一时刻最多显示一条，过期后自动消失。

use std::time::{Duration, Instant};

use crate::error::Error;

pub const WELCOME_TEXT: &str =
    "Welcome! Start by generating your cryptographic keys to communicate securely.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    shown_at: Instant,
    ttl: Duration,
}

impl StatusMessage {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.ttl
    }
}

#[derive(Debug, Clone)]
struct PendingWelcome {
    at: Instant,
    ttl: Duration,
}

/// 状态消息面板
#[derive(Debug, Clone)]
pub struct StatusBoard {
    current: Option<StatusMessage>,
    welcome: Option<PendingWelcome>,
    ttl: Duration,
}

impl StatusBoard {
    /// `ttl` 为操作结果消息的显示时长
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: None,
            welcome: None,
            ttl,
        }
    }

    /// 计划在 `at` 时刻显示一次欢迎消息；若届时已有其他消息可见则跳过。
    pub fn schedule_welcome(&mut self, at: Instant, ttl: Duration) {
        self.welcome = Some(PendingWelcome { at, ttl });
    }

    /// 显示新消息，替换之前的任何消息
    pub fn show(&mut self, kind: StatusKind, text: impl Into<String>, now: Instant) -> &StatusMessage {
        self.current.insert(StatusMessage {
            kind,
            text: text.into(),
            shown_at: now,
            ttl: self.ttl,
        })
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// 在到期时放出欢迎消息，并移除过期消息。
    ///
    /// 欢迎消息是否显示取决于它计划出现的时刻，而不是宿主轮询的时刻：
    /// 若那一刻已有消息可见，或之后已有新消息取代它，则跳过。
    pub fn tick(&mut self, now: Instant) {
        if self.welcome.as_ref().is_some_and(|w| now >= w.at) {
            if let Some(welcome) = self.welcome.take() {
                let superseded = self
                    .current
                    .as_ref()
                    .is_some_and(|m| m.shown_at >= welcome.at || !m.is_expired(welcome.at));
                if !superseded {
                    self.current = Some(StatusMessage {
                        kind: StatusKind::Success,
                        text: WELCOME_TEXT.to_string(),
                        shown_at: welcome.at,
                        ttl: welcome.ttl,
                    });
                }
            }
        }

        if self.current.as_ref().is_some_and(|m| m.is_expired(now)) {
            self.current = None;
        }
    }

    pub fn visible(&mut self, now: Instant) -> Option<&StatusMessage> {
        self.tick(now);
        self.current.as_ref()
    }
}

/// 面向用户的错误文本
pub fn user_message(error: &Error) -> String {
    match error {
        Error::Validation(msg) | Error::Crypto(msg) | Error::Config(msg) => msg.clone(),
        Error::InvalidKey { kind, .. } => format!("The {kind} key is not valid"),
        Error::Json(_) => "Error reading the file".to_string(),
        Error::Io(e) => format!("File error: {e}"),
        Error::Base64(_) => "The encrypted message is not valid Base64".to_string(),
        Error::Clipboard(_) => "Copy to clipboard failed".to_string(),
    }
}
