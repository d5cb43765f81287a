//! Deep-Link Dispatcher
//!
//! Classifies the user agent, rewrites the link for the platform, navigates,
//! and arms a single fallback timer. When the timer fires it only navigates
//! if it is still inside `delay + delta` of the attempt: a late timer means
//! the page was backgrounded, which usually means the app opened.
//!
//! Each dispatcher owns at most one pending fallback. A new attempt, a call
//! to [`DeepLinkDispatcher::cancel_pending_fallback`] or a reconfiguration
//! cancels the previous timer.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::config::DeepLinkConfig;
use super::errors::DeepLinkResult;
use super::host::{BrowserHost, Host};
use super::links;
use crate::utils::platform::{Platform, UserAgent};
use crate::{console_debug, console_info};

/// Why a dispatch did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotMobile,
    AndroidDisabled,
    /// Legacy browser path with no web link to degrade to
    NoFallbackTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Skipped(SkipReason),
    /// Browser cannot open the app; navigated straight to the web fallback
    FellBack { url: String },
    /// Navigated to the (possibly rewritten) deep link
    Launched {
        link: String,
        fallback_scheduled: bool,
    },
}

impl DispatchOutcome {
    /// True only when a navigation actually happened
    pub fn attempted(&self) -> bool {
        !matches!(self, DispatchOutcome::Skipped(_))
    }
}

/// Target and timing of one fallback attempt
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackPlan {
    pub target: Option<String>,
    pub attempted_at_ms: f64,
    pub window_ms: f64,
}

impl FallbackPlan {
    /// The target, if the callback is running in time
    pub fn target_at(&self, now_ms: f64) -> Option<&str> {
        if now_ms - self.attempted_at_ms < self.window_ms {
            self.target.as_deref()
        } else {
            None
        }
    }
}

pub struct DeepLinkDispatcher<H: Host = BrowserHost> {
    config: DeepLinkConfig,
    host: H,
    generation: Rc<Cell<u64>>,
    pending: RefCell<Option<H::Timer>>,
}

impl DeepLinkDispatcher<BrowserHost> {
    /// Dispatcher for the current browser window
    pub fn browser(config: DeepLinkConfig) -> DeepLinkResult<Self> {
        Ok(Self::new(config, BrowserHost::new()?))
    }
}

impl<H: Host> DeepLinkDispatcher<H> {
    pub fn new(config: DeepLinkConfig, host: H) -> Self {
        Self {
            config,
            host,
            generation: Rc::new(Cell::new(0)),
            pending: RefCell::new(None),
        }
    }

    pub fn config(&self) -> &DeepLinkConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Replace the configuration; any pending fallback is cancelled
    pub fn reconfigure(&mut self, config: DeepLinkConfig) {
        self.cancel_pending_fallback();
        self.config = config;
    }

    /// `reconfigure` only when `config` differs. Returns whether it did.
    pub fn reconfigure_if_changed(&mut self, config: &DeepLinkConfig) -> bool {
        if &self.config == config {
            return false;
        }
        self.reconfigure(config.clone());
        true
    }

    pub fn user_agent(&self) -> UserAgent {
        UserAgent::parse(self.host.user_agent().unwrap_or_default())
    }

    /// The link `open_link` would navigate to, without navigating
    pub fn compute_link(&self, uri: &str) -> String {
        links::compute_link(uri, &self.user_agent(), &self.config)
    }

    /// Try to open the app, falling back to the store or web after the delay
    pub fn open_link(
        &self,
        uri: &str,
        fallback_web_url: Option<&str>,
    ) -> DeepLinkResult<DispatchOutcome> {
        self.dispatch(uri, fallback_web_url)
    }

    /// Same contract as `open_link`, for callers acting on a user gesture
    /// that always carry an explicit web fallback.
    pub fn open_link_with_confirmation(
        &self,
        uri: &str,
        fallback_web_url: &str,
    ) -> DeepLinkResult<DispatchOutcome> {
        console_debug!("[Dispatcher] Confirmed open for {}", uri);
        self.dispatch(uri, Some(fallback_web_url))
    }

    /// Cancel the outstanding fallback, if any. Returns whether one was pending.
    pub fn cancel_pending_fallback(&self) -> bool {
        self.generation.set(self.generation.get().wrapping_add(1));
        self.pending.borrow_mut().take().is_some()
    }

    pub fn has_pending_fallback(&self) -> bool {
        self.pending.borrow().is_some()
    }

    fn dispatch(
        &self,
        uri: &str,
        fallback_web_url: Option<&str>,
    ) -> DeepLinkResult<DispatchOutcome> {
        let user_agent = self.user_agent();

        if !user_agent.is_mobile() {
            console_debug!("[Dispatcher] Not a mobile user agent, skipping {}", uri);
            return Ok(DispatchOutcome::Skipped(SkipReason::NotMobile));
        }

        if user_agent.is_android() && self.config.android_disabled {
            console_debug!("[Dispatcher] Android dispatch disabled, skipping {}", uri);
            return Ok(DispatchOutcome::Skipped(SkipReason::AndroidDisabled));
        }

        let config = self.call_config(fallback_web_url);

        if user_agent.is_legacy_android_chrome() {
            let location = self.host.current_location();
            return match links::web_link(&config, location.as_deref()) {
                Some(url) => {
                    console_info!("[Dispatcher] Legacy Android Chrome, opening {}", url);
                    self.host.navigate(&url)?;
                    Ok(DispatchOutcome::FellBack { url })
                }
                None => Ok(DispatchOutcome::Skipped(SkipReason::NoFallbackTarget)),
            };
        }

        let link = links::compute_link(uri, &user_agent, &config);

        let fallback_scheduled = config.fallback_enabled();
        if fallback_scheduled {
            self.arm_fallback(user_agent.platform(), &config);
        } else {
            self.cancel_pending_fallback();
        }

        console_info!("[Dispatcher] Opening {} on {}", link, user_agent.platform().name());
        if let Err(e) = self.host.navigate(&link) {
            e.log("Dispatcher");
            self.cancel_pending_fallback();
            return Err(e);
        }

        Ok(DispatchOutcome::Launched {
            link,
            fallback_scheduled,
        })
    }

    /// Configuration for one call, with the per-call web fallback applied
    fn call_config(&self, fallback_web_url: Option<&str>) -> Cow<'_, DeepLinkConfig> {
        match fallback_web_url.filter(|url| !url.is_empty()) {
            Some(url) => Cow::Owned(self.config.clone().with_fallback_web_url(url)),
            None => Cow::Borrowed(&self.config),
        }
    }

    fn arm_fallback(&self, platform: Platform, config: &DeepLinkConfig) {
        let location = self.host.current_location();
        let plan = FallbackPlan {
            target: links::fallback_link(platform, config, location.as_deref()),
            attempted_at_ms: self.host.now_ms(),
            window_ms: config.fallback_window_ms(),
        };

        let generation = self.generation.get().wrapping_add(1);
        self.generation.set(generation);

        let current = Rc::clone(&self.generation);
        let host = self.host.clone();
        let timer = self.host.schedule(
            config.delay_ms,
            Box::new(move || {
                if current.get() != generation {
                    console_debug!("[Fallback] Attempt superseded, ignoring timer");
                    return;
                }
                fire_fallback(&host, &plan);
            }),
        );

        // Dropping the previous handle cancels its timer
        *self.pending.borrow_mut() = Some(timer);
    }
}

fn fire_fallback<H: Host>(host: &H, plan: &FallbackPlan) {
    match plan.target_at(host.now_ms()) {
        Some(target) => {
            console_info!("[Fallback] App did not open, navigating to {}", target);
            if let Err(e) = host.navigate(target) {
                e.log("Fallback");
            }
        }
        None => console_debug!("[Fallback] Timer late or no target, staying put"),
    }
}
