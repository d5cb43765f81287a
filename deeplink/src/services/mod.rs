//! Deep-Link Services
//!
//! - **config**: app identities, fallback mode and timing
//! - **errors**: error types shared by the crate
//! - **links**: pure link construction (intent, store and web links)
//! - **host**: the browser seam (user agent, location, clock, timers)
//! - **dispatcher**: navigation plus the single fallback timer
//!
//! The services are WASM-first: shared state is `Rc`-based and nothing
//! requires `Send`/`Sync`.

pub mod config;
pub mod dispatcher;
pub mod errors;
pub mod host;
pub mod links;

pub use config::{AndroidConfig, DeepLinkConfig, IosConfig};
pub use dispatcher::{DeepLinkDispatcher, DispatchOutcome, FallbackPlan, SkipReason};
pub use errors::{DeepLinkError, DeepLinkResult};
pub use host::{BrowserHost, Host};
