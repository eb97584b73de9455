//! Single-slot user notifications with auto-dismiss.
//!
//! # Design
//! `Notifier` holds exactly one notification at a time behind a watch
//! channel (read the current value, subscribe to changes). Each `notify`
//! call replaces whatever is showing and aborts the previous dismiss timer,
//! so a new message never queues behind an old one. The notifier is an
//! explicitly constructed, cloneable handle rather than process-wide state:
//! callers inject it wherever it is needed.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// How long a notification stays visible unless a duration is given.
pub const DEFAULT_DISMISS_AFTER: Duration = Duration::from_millis(3000);

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// The currently displayed notification, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub visible: bool,
    pub message: String,
    pub kind: NotificationKind,
}

impl Default for Notification {
    fn default() -> Self {
        Self {
            visible: false,
            message: String::new(),
            kind: NotificationKind::Info,
        }
    }
}

/// Cloneable handle to the single notification slot.
#[derive(Debug, Clone)]
pub struct Notifier {
    state: Arc<watch::Sender<Notification>>,
    pending: Arc<Mutex<Option<JoinHandle<()>>>>,
}

impl Notifier {
    pub fn new() -> Self {
        let (state, _) = watch::channel(Notification::default());
        Self {
            state: Arc::new(state),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    /// Show a notification, replacing the current one and canceling its
    /// dismiss timer. Must run inside a tokio runtime; the dismissal is a
    /// spawned task sleeping for `dismiss_after`.
    pub fn notify(
        &self,
        message: impl Into<String>,
        kind: NotificationKind,
        dismiss_after: Duration,
    ) {
        let mut pending = self.pending.lock().expect("dismiss timer lock poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let message = message.into();
        self.state.send_modify(|current| {
            current.visible = true;
            current.message = message;
            current.kind = kind;
        });

        let state = Arc::clone(&self.state);
        // Fix the deadline here rather than at the spawned task's first
        // poll, so the timer counts from the replace point even when the
        // task is polled late (e.g. under a paused test clock).
        let deadline = tokio::time::Instant::now() + dismiss_after;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            state.send_modify(|current| current.visible = false);
        }));
    }

    /// Hide the current notification immediately and cancel its timer.
    pub fn dismiss(&self) {
        let mut pending = self.pending.lock().expect("dismiss timer lock poisoned");
        if let Some(handle) = pending.take() {
            handle.abort();
        }
        self.state.send_modify(|current| current.visible = false);
    }

    /// The kind-fixing wrappers forward the message and an optional
    /// per-call duration, falling back to [`DEFAULT_DISMISS_AFTER`].
    pub fn info(&self, message: impl Into<String>, dismiss_after: Option<Duration>) {
        self.notify(
            message,
            NotificationKind::Info,
            dismiss_after.unwrap_or(DEFAULT_DISMISS_AFTER),
        );
    }

    pub fn success(&self, message: impl Into<String>, dismiss_after: Option<Duration>) {
        self.notify(
            message,
            NotificationKind::Success,
            dismiss_after.unwrap_or(DEFAULT_DISMISS_AFTER),
        );
    }

    pub fn warning(&self, message: impl Into<String>, dismiss_after: Option<Duration>) {
        self.notify(
            message,
            NotificationKind::Warning,
            dismiss_after.unwrap_or(DEFAULT_DISMISS_AFTER),
        );
    }

    pub fn error(&self, message: impl Into<String>, dismiss_after: Option<Duration>) {
        self.notify(
            message,
            NotificationKind::Error,
            dismiss_after.unwrap_or(DEFAULT_DISMISS_AFTER),
        );
    }

    pub fn current(&self) -> Notification {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Notification> {
        self.state.subscribe()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn notification_auto_dismisses_after_duration() {
        let notifier = Notifier::new();
        notifier.notify("saved", NotificationKind::Success, Duration::from_millis(100));

        let current = notifier.current();
        assert!(current.visible);
        assert_eq!(current.message, "saved");
        assert_eq!(current.kind, NotificationKind::Success);

        tokio::time::advance(Duration::from_millis(101)).await;
        tokio::task::yield_now().await;
        assert!(!notifier.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn replacement_cancels_pending_dismiss() {
        let notifier = Notifier::new();
        notifier.notify("x", NotificationKind::Info, Duration::from_millis(100));

        tokio::time::advance(Duration::from_millis(50)).await;
        notifier.notify("y", NotificationKind::Error, Duration::from_millis(100));

        // Past x's original deadline: x's timer was canceled, y still shows.
        tokio::time::advance(Duration::from_millis(60)).await;
        tokio::task::yield_now().await;
        let current = notifier.current();
        assert!(current.visible);
        assert_eq!(current.message, "y");
        assert_eq!(current.kind, NotificationKind::Error);

        // Past y's deadline.
        tokio::time::advance(Duration::from_millis(50)).await;
        tokio::task::yield_now().await;
        assert!(!notifier.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn dismiss_hides_immediately_and_cancels_timer() {
        let notifier = Notifier::new();
        notifier.notify("gone", NotificationKind::Warning, Duration::from_millis(100));
        notifier.dismiss();
        assert!(!notifier.current().visible);

        // Nothing left to fire.
        tokio::time::advance(Duration::from_millis(200)).await;
        tokio::task::yield_now().await;
        assert!(!notifier.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn convenience_wrappers_fix_the_kind() {
        let notifier = Notifier::new();

        notifier.info("i", None);
        assert_eq!(notifier.current().kind, NotificationKind::Info);
        notifier.success("s", None);
        assert_eq!(notifier.current().kind, NotificationKind::Success);
        notifier.warning("w", None);
        assert_eq!(notifier.current().kind, NotificationKind::Warning);
        notifier.error("e", None);
        assert_eq!(notifier.current().kind, NotificationKind::Error);

        // Default duration is 3 s.
        tokio::time::advance(Duration::from_millis(2999)).await;
        tokio::task::yield_now().await;
        assert!(notifier.current().visible);
        tokio::time::advance(Duration::from_millis(2)).await;
        tokio::task::yield_now().await;
        assert!(!notifier.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn convenience_wrappers_forward_a_custom_duration() {
        let notifier = Notifier::new();
        notifier.error("slow to fade", Some(Duration::from_millis(10_000)));

        // Outlives the 3 s default.
        tokio::time::advance(Duration::from_millis(3001)).await;
        tokio::task::yield_now().await;
        assert!(notifier.current().visible);

        // Gone after its own deadline.
        tokio::time::advance(Duration::from_millis(7000)).await;
        tokio::task::yield_now().await;
        assert!(!notifier.current().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn subscribers_observe_changes() {
        let notifier = Notifier::new();
        let mut rx = notifier.subscribe();

        notifier.info("hello", None);
        rx.changed().await.unwrap();
        assert!(rx.borrow().visible);
        assert_eq!(rx.borrow().message, "hello");
    }
}
