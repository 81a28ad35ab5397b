//! Transient user notifications ("toasts").

use std::sync::{Arc, Mutex};

/// Display time used when no configuration says otherwise.
pub const DEFAULT_TOAST_DURATION_MS: u64 = 3000;

/// Severity of a toast, mapped to its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastKind::Success => "success",
            ToastKind::Error => "error",
            ToastKind::Info => "info",
        }
    }
}

/// An auto-dismissing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    /// How long the toast stays on screen.
    pub duration_ms: u64,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
            duration_ms: DEFAULT_TOAST_DURATION_MS,
        }
    }

    pub fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }
}

/// Sink for user-visible notifications.
///
/// The UI layer decides how to display them and dismisses each toast
/// after its `duration_ms`.
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: Toast);
}

/// Notifier that keeps every toast in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All toasts delivered so far, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .ok()
            .and_then(|toasts| toasts.last().cloned())
    }

    pub fn clear(&self) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }
}

/// Stamps every toast with a fixed display time before passing it on.
#[derive(Clone)]
pub struct TimedNotifier {
    inner: Arc<dyn Notifier>,
    duration_ms: u64,
}

impl TimedNotifier {
    pub fn new(inner: Arc<dyn Notifier>, duration_ms: u64) -> Self {
        Self { inner, duration_ms }
    }
}

impl Notifier for TimedNotifier {
    fn notify(&self, toast: Toast) {
        self.inner.notify(toast.with_duration(self.duration_ms));
    }
}

/// Notifier that only writes toasts to the log.
#[derive(Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: Toast) {
        match toast.kind {
            ToastKind::Error => tracing::warn!(kind = toast.kind.as_str(), "{}", toast.message),
            _ => tracing::info!(kind = toast.kind.as_str(), "{}", toast.message),
        }
    }
}
