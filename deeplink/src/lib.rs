//! Browser deep linking: open a native app from a web page, falling back to
//! the App Store, Play Store or a web page when the app does not open.

pub mod bindings;
pub mod components;
pub mod services;
pub mod utils;

#[cfg(test)]
mod testing;

pub use bindings::DeepLink;
pub use components::DeepLinkButton;
pub use services::{
    DeepLinkConfig, DeepLinkDispatcher, DeepLinkError, DeepLinkResult, DispatchOutcome,
};
pub use utils::platform::{Platform, UserAgent};

#[doc(hidden)]
pub mod __private {
    pub use gloo_console;
    pub use js_sys;
    pub use tracing;
}
