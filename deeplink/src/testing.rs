//! Recording host for unit tests: manual clock, captured navigations and
//! timers that only run when a test fires them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::services::errors::{DeepLinkError, DeepLinkResult};
use crate::services::host::Host;

struct ScheduledTimer {
    delay_ms: u32,
    callback: Option<Box<dyn FnOnce()>>,
    cancelled: Rc<Cell<bool>>,
}

#[derive(Default)]
struct TestHostState {
    user_agent: RefCell<Option<String>>,
    location: RefCell<Option<String>>,
    now_ms: Cell<f64>,
    navigations: RefCell<Vec<String>>,
    timers: RefCell<Vec<ScheduledTimer>>,
    fail_navigation: Cell<bool>,
}

#[derive(Clone, Default)]
pub struct TestHost {
    state: Rc<TestHostState>,
}

pub struct TestTimer {
    cancelled: Rc<Cell<bool>>,
}

impl Drop for TestTimer {
    fn drop(&mut self) {
        self.cancelled.set(true);
    }
}

impl TestHost {
    pub fn new(user_agent: &str) -> Self {
        let host = Self::default();
        host.state.user_agent.replace(Some(user_agent.to_string()));
        host.state.now_ms.set(1_700_000_000_000.0);
        host
    }

    pub fn with_location(self, location: &str) -> Self {
        self.state.location.replace(Some(location.to_string()));
        self
    }

    pub fn fail_navigation(&self, fail: bool) {
        self.state.fail_navigation.set(fail);
    }

    pub fn advance(&self, ms: f64) {
        self.state.now_ms.set(self.state.now_ms.get() + ms);
    }

    pub fn navigations(&self) -> Vec<String> {
        self.state.navigations.borrow().clone()
    }

    pub fn scheduled_count(&self) -> usize {
        self.state.timers.borrow().len()
    }

    pub fn active_timer_count(&self) -> usize {
        self.state
            .timers
            .borrow()
            .iter()
            .filter(|t| t.callback.is_some() && !t.cancelled.get())
            .count()
    }

    pub fn last_delay_ms(&self) -> Option<u32> {
        self.state.timers.borrow().last().map(|t| t.delay_ms)
    }

    /// Run every scheduled, uncancelled callback once
    pub fn fire_timers(&self) {
        let callbacks: Vec<Box<dyn FnOnce()>> = self
            .state
            .timers
            .borrow_mut()
            .iter_mut()
            .filter(|t| !t.cancelled.get())
            .filter_map(|t| t.callback.take())
            .collect();

        for callback in callbacks {
            callback();
        }
    }
}

impl Host for TestHost {
    type Timer = TestTimer;

    fn user_agent(&self) -> Option<String> {
        self.state.user_agent.borrow().clone()
    }

    fn current_location(&self) -> Option<String> {
        self.state.location.borrow().clone()
    }

    fn navigate(&self, url: &str) -> DeepLinkResult<()> {
        if self.state.fail_navigation.get() {
            return Err(DeepLinkError::navigation(url, "navigation blocked"));
        }
        self.state.navigations.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn now_ms(&self) -> f64 {
        self.state.now_ms.get()
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer {
        let cancelled = Rc::new(Cell::new(false));
        self.state.timers.borrow_mut().push(ScheduledTimer {
            delay_ms,
            callback: Some(callback),
            cancelled: Rc::clone(&cancelled),
        });
        TestTimer { cancelled }
    }
}
