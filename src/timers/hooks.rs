//! Component-scoped timer hooks

use std::time::Duration;

use dioxus::prelude::*;

use super::{sleep, Countdown, Notice, TimerSlot};
use crate::config::NoticeConfig;

/// A timer slot owned by the calling component; cancelled on unmount
pub fn use_timer_slot(name: &'static str) -> Signal<TimerSlot> {
    let mut slot = use_signal(|| TimerSlot::new(name));
    use_drop(move || {
        if let Ok(mut slot) = slot.try_write() {
            slot.cancel();
        }
    });
    slot
}

/// Schedule `task` in `slot`, replacing whatever was pending
pub fn schedule<F>(mut slot: Signal<TimerSlot>, task: F)
where
    F: std::future::Future<Output = ()> + 'static,
{
    let task = slot.write().schedule(task);
    spawn(task);
}

#[derive(Clone, Copy, PartialEq)]
pub struct NoticeHandle {
    current: Signal<Option<Notice>>,
    timer: Signal<TimerSlot>,
    config: Signal<NoticeConfig>,
}

impl NoticeHandle {
    pub fn current(&self) -> Option<Notice> {
        (self.current)()
    }

    /// Show `notice`, replacing the current one and its dismiss timer
    pub fn show(&self, notice: Notice) {
        let delay = notice.dismiss_after(&self.config.read());
        let mut current = self.current;
        current.set(Some(notice));
        schedule(self.timer, async move {
            sleep(delay).await;
            current.set(None);
        });
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(Notice::success(text));
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(Notice::error(text));
    }

    pub fn hint(&self, text: impl Into<String>) {
        self.show(Notice::hint(text));
    }

    pub fn dismiss(&self) {
        let mut timer = self.timer;
        let mut current = self.current;
        timer.write().cancel();
        current.set(None);
    }
}

/// Auto-dismissing notice for the calling component
pub fn use_notice() -> NoticeHandle {
    let config = use_context::<crate::app::AppContext>().config.notices.clone();
    let current = use_signal(|| None);
    let timer = use_timer_slot("notice");
    let config = use_signal(move || config);
    NoticeHandle {
        current,
        timer,
        config,
    }
}

#[derive(Clone, Copy, PartialEq)]
pub struct CountdownHandle {
    state: Signal<Option<Countdown>>,
    timer: Signal<TimerSlot>,
}

impl CountdownHandle {
    /// `None` until started
    pub fn get(&self) -> Option<Countdown> {
        (self.state)()
    }

    pub fn is_running(&self) -> bool {
        self.get().is_some_and(|c| !c.is_finished())
    }

    /// (Re)start from `seconds`
    pub fn start(&self, seconds: u32) {
        let mut state = self.state;
        state.set(Some(Countdown::new(seconds)));
        schedule(self.timer, async move {
            loop {
                sleep(Duration::from_secs(1)).await;
                let running = match state.write().as_mut() {
                    Some(countdown) => countdown.tick(),
                    None => false,
                };
                if !running {
                    break;
                }
            }
        });
    }

    pub fn stop(&self) {
        let mut timer = self.timer;
        let mut state = self.state;
        timer.write().cancel();
        state.set(None);
    }
}

pub fn use_countdown(name: &'static str) -> CountdownHandle {
    CountdownHandle {
        state: use_signal(|| None),
        timer: use_timer_slot(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::future::{BoxFuture, FutureExt, LocalBoxFuture};
    use std::cell::RefCell;

    thread_local! {
        static PENDING: RefCell<Option<LocalBoxFuture<'static, ()>>> = const { RefCell::new(None) };
    }

    #[allow(non_snake_case)]
    fn Holder() -> Element {
        let mut slot = use_timer_slot("holder");
        use_hook(move || {
            let never: BoxFuture<'static, ()> = futures::future::pending().boxed();
            let task = slot.write().schedule(never);
            PENDING.with(|p| *p.borrow_mut() = Some(task.boxed_local()));
        });
        rsx! { div {} }
    }

    #[test]
    fn test_unmount_cancels_pending_timer() {
        let mut dom = VirtualDom::new(Holder);
        dom.rebuild_in_place();

        let mut task = PENDING.with(|p| p.borrow_mut().take()).unwrap();
        assert!((&mut task).now_or_never().is_none());

        drop(dom);
        assert_eq!(task.now_or_never(), Some(()));
    }
}
