//! Timers owned by UI components
//!
//! A [`TimerSlot`] holds at most one pending task. Scheduling a new task
//! aborts the previous one and dropping the slot aborts whatever is left, so
//! a callback can never fire after its component is gone.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::future::{abortable, AbortHandle};
use tracing::debug;

use crate::config::NoticeConfig;

pub mod hooks;

/// Sleep on whichever runtime drives this target
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    let ms = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Sleep on whichever runtime drives this target
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

/// One cancellable pending task
#[derive(Debug)]
pub struct TimerSlot {
    name: &'static str,
    handle: Option<AbortHandle>,
}

impl TimerSlot {
    pub fn new(name: &'static str) -> Self {
        Self { name, handle: None }
    }

    /// Wrap `task` so this slot can abort it, aborting the previous task.
    ///
    /// The returned future must be spawned by the caller.
    pub fn schedule<F>(&mut self, task: F) -> impl Future<Output = ()> + 'static
    where
        F: Future<Output = ()> + 'static,
    {
        self.cancel();
        let (task, handle) = abortable(task);
        self.handle = Some(handle);
        debug!(timer = self.name, "Timer scheduled");
        async move {
            let _ = task.await;
        }
    }

    /// Abort the pending task, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            if !handle.is_aborted() {
                handle.abort();
                debug!(timer = self.name, "Timer cancelled");
            }
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for TimerSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Seconds left before something expires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self { remaining: seconds }
    }

    /// Advance one second. Returns true while time is left.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.remaining > 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }
}

/// `m:ss`
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient message shown above a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    brief: bool,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
            brief: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            brief: false,
        }
    }

    /// Error for a quick input mistake; dismissed sooner
    pub fn hint(text: impl Into<String>) -> Self {
        Self {
            brief: true,
            ..Self::error(text)
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }

    pub fn dismiss_after(&self, config: &NoticeConfig) -> Duration {
        let ms = if self.brief {
            config.brief_notice_ms
        } else {
            config.notice_ms
        };
        Duration::from_millis(ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_countdown_display_and_expiry() {
        let mut c = Countdown::new(300);
        assert_eq!(c.to_string(), "5:00");
        assert!(c.tick());
        assert_eq!(c.to_string(), "4:59");

        let mut c = Countdown::new(2);
        assert!(c.tick());
        assert!(!c.tick());
        assert!(c.is_finished());
        assert!(!c.tick(), "stays at zero");
        assert_eq!(c.to_string(), "0:00");
    }

    #[test]
    fn test_notice_delays() {
        let config = NoticeConfig::default();
        assert_eq!(Notice::success("ok").dismiss_after(&config), Duration::from_millis(5000));
        assert_eq!(Notice::error("no").dismiss_after(&config), Duration::from_millis(5000));
        let hint = Notice::hint("bad date");
        assert!(hint.is_error());
        assert_eq!(hint.dismiss_after(&config), Duration::from_millis(2500));
    }

    fn counting_task(counter: &Arc<AtomicUsize>, delay_ms: u64) -> impl Future<Output = ()> + 'static {
        let counter = counter.clone();
        async move {
            sleep(Duration::from_millis(delay_ms)).await;
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_rescheduling_cancels_previous_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut slot = TimerSlot::new("notice");

        let first = tokio::spawn(slot.schedule(counting_task(&fired, 100)));
        let second = tokio::spawn(slot.schedule(counting_task(&fired, 100)));

        first.await.unwrap();
        second.await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_slot_cancels_pending_task() {
        let fired = Arc::new(AtomicUsize::new(0));
        let slot_task = {
            let mut slot = TimerSlot::new("countdown");
            let task = tokio::spawn(slot.schedule(counting_task(&fired, 1000)));
            assert!(slot.is_armed());
            task
        };

        tokio::time::advance(Duration::from_secs(2)).await;
        slot_task.await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_task_runs_when_left_alone() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut slot = TimerSlot::new("otp");
        tokio::spawn(slot.schedule(counting_task(&fired, 10))).await.unwrap();
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
