//! Host environment seam
//!
//! The dispatcher only needs a user agent, the current page URL, a way to
//! navigate, a clock and a one-shot timer. [`BrowserHost`] provides them
//! from `web_sys`; tests provide a recording host instead.

use gloo_timers::callback::Timeout;
use web_sys::Window;

use super::errors::{DeepLinkError, DeepLinkResult};

pub trait Host: Clone + 'static {
    /// Handle for a scheduled callback. Dropping it must cancel the callback.
    type Timer;

    fn user_agent(&self) -> Option<String>;

    fn current_location(&self) -> Option<String>;

    fn navigate(&self, url: &str) -> DeepLinkResult<()>;

    /// Milliseconds since the Unix epoch
    fn now_ms(&self) -> f64;

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;
}

/// Browser implementation backed by `window`
#[derive(Debug, Clone)]
pub struct BrowserHost {
    window: Window,
}

impl BrowserHost {
    /// Fails when there is no DOM or user agent to work with
    pub fn new() -> DeepLinkResult<Self> {
        let window = web_sys::window().ok_or_else(|| DeepLinkError::environment("window"))?;
        window
            .document()
            .ok_or_else(|| DeepLinkError::environment("document"))?;
        window
            .navigator()
            .user_agent()
            .map_err(|_| DeepLinkError::environment("navigator.userAgent"))?;

        Ok(Self { window })
    }
}

impl Host for BrowserHost {
    type Timer = Timeout;

    fn user_agent(&self) -> Option<String> {
        self.window.navigator().user_agent().ok()
    }

    fn current_location(&self) -> Option<String> {
        self.window.location().href().ok()
    }

    fn navigate(&self, url: &str) -> DeepLinkResult<()> {
        self.window
            .location()
            .set_href(url)
            .map_err(|e| DeepLinkError::navigation(url, format!("{:?}", e)))
    }

    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer {
        Timeout::new(delay_ms, callback)
    }
}
