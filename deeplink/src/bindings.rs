//! JavaScript bindings
//!
//! Exposes the dispatcher as a `DeepLink` class with the classic
//! `setup` / `open` / `openWithButton` / `getLink` surface. Options are a
//! camelCase object merged over the defaults.

use wasm_bindgen::prelude::*;

use crate::console_info;
use crate::services::{BrowserHost, DeepLinkConfig, DeepLinkDispatcher, DeepLinkError};

impl From<DeepLinkError> for JsValue {
    fn from(error: DeepLinkError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

fn config_from_options(options: JsValue) -> Result<DeepLinkConfig, DeepLinkError> {
    if options.is_undefined() || options.is_null() {
        return Ok(DeepLinkConfig::default());
    }
    let config: DeepLinkConfig = serde_wasm_bindgen::from_value(options)?;
    config.validated()
}

#[wasm_bindgen]
pub struct DeepLink {
    dispatcher: DeepLinkDispatcher<BrowserHost>,
}

#[wasm_bindgen]
impl DeepLink {
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<DeepLink, JsValue> {
        let config = config_from_options(options)?;
        let dispatcher = DeepLinkDispatcher::browser(config)?;
        console_info!("[DeepLink] Initialized");
        Ok(DeepLink { dispatcher })
    }

    /// Re-initialize with new options
    pub fn setup(&mut self, options: JsValue) -> Result<(), JsValue> {
        let config = config_from_options(options)?;
        self.dispatcher.reconfigure(config);
        Ok(())
    }

    /// Returns true when a navigation was made
    pub fn open(&self, uri: &str, fallback_web_url: Option<String>) -> Result<bool, JsValue> {
        let outcome = self.dispatcher.open_link(uri, fallback_web_url.as_deref())?;
        Ok(outcome.attempted())
    }

    #[wasm_bindgen(js_name = openWithButton)]
    pub fn open_with_button(&self, uri: &str, fallback_web_url: &str) -> Result<bool, JsValue> {
        let outcome = self
            .dispatcher
            .open_link_with_confirmation(uri, fallback_web_url)?;
        Ok(outcome.attempted())
    }

    #[wasm_bindgen(js_name = getLink)]
    pub fn get_link(&self, uri: &str) -> String {
        self.dispatcher.compute_link(uri)
    }

    #[wasm_bindgen(js_name = cancelFallback)]
    pub fn cancel_fallback(&self) -> bool {
        self.dispatcher.cancel_pending_fallback()
    }
}
