//! Deep-link configuration
//!
//! Options arrive either from Rust (builder helpers) or from JavaScript as a
//! camelCase object. Every field has a default, so a partial options object
//! merges over the defaults the same way the JS `setup()` call always has.

use serde::{Deserialize, Deserializer, Serialize};

use super::errors::{DeepLinkError, DeepLinkResult};
use super::links::store_link;
use crate::console_warn;
use crate::utils::platform::Platform;

pub const DEFAULT_DELAY_MS: u32 = 3000;
pub const DEFAULT_DELTA_MS: u32 = 500;

/// App Store identity for iOS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IosConfig {
    /// App name slug used in the `itms-apps://` URL
    pub app_name: Option<String>,
    /// Numeric App Store id (JS callers may pass a number)
    #[serde(deserialize_with = "string_or_number")]
    pub app_id: Option<String>,
    /// Explicit store URL, takes precedence over the synthesized one
    pub store_url: Option<String>,
}

/// Play Store identity for Android
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AndroidConfig {
    /// Package id, e.g. `com.example.app`
    pub app_id: Option<String>,
    /// Explicit store URL, takes precedence over `market://details`
    pub store_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeepLinkConfig {
    #[serde(rename = "iOS", alias = "ios")]
    pub ios: IosConfig,
    pub android: AndroidConfig,
    /// Never dispatch on Android
    pub android_disabled: bool,
    /// Fall back to the store link when the app does not open
    pub fallback: bool,
    /// Fall back to the web link instead of the store link
    pub fallback_to_web: bool,
    /// Web fallback; empty means "stay on the current page"
    pub fallback_web_url: String,
    /// Time to wait before falling back
    #[serde(rename = "delay")]
    pub delay_ms: u32,
    /// Tolerance added to `delay_ms` before a late timer is ignored
    #[serde(rename = "delta")]
    pub delta_ms: u32,
}

impl Default for DeepLinkConfig {
    fn default() -> Self {
        Self {
            ios: IosConfig::default(),
            android: AndroidConfig::default(),
            android_disabled: false,
            fallback: true,
            fallback_to_web: false,
            fallback_web_url: String::new(),
            delay_ms: DEFAULT_DELAY_MS,
            delta_ms: DEFAULT_DELTA_MS,
        }
    }
}

impl DeepLinkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON options object, merging it over the defaults
    pub fn from_json(json: &str) -> DeepLinkResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn with_ios(mut self, app_name: &str, app_id: &str) -> Self {
        self.ios.app_name = Some(app_name.to_string());
        self.ios.app_id = Some(app_id.to_string());
        self
    }

    pub fn with_ios_store_url(mut self, store_url: &str) -> Self {
        self.ios.store_url = Some(store_url.to_string());
        self
    }

    pub fn with_android(mut self, app_id: &str) -> Self {
        self.android.app_id = Some(app_id.to_string());
        self
    }

    pub fn with_android_store_url(mut self, store_url: &str) -> Self {
        self.android.store_url = Some(store_url.to_string());
        self
    }

    pub fn with_fallback_web_url(mut self, url: &str) -> Self {
        self.fallback_web_url = url.to_string();
        self
    }

    pub fn with_delay_ms(mut self, delay_ms: u32) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_delta_ms(mut self, delta_ms: u32) -> Self {
        self.delta_ms = delta_ms;
        self
    }

    pub fn fallback_to_web(mut self, enabled: bool) -> Self {
        self.fallback_to_web = enabled;
        self
    }

    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback = enabled;
        self
    }

    pub fn android_disabled(mut self, disabled: bool) -> Self {
        self.android_disabled = disabled;
        self
    }

    /// Whether a fallback timer should be armed at all
    pub fn fallback_enabled(&self) -> bool {
        self.fallback || self.fallback_to_web
    }

    /// Window after the attempt in which a fallback may still navigate
    pub fn fallback_window_ms(&self) -> f64 {
        f64::from(self.delay_ms) + f64::from(self.delta_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(app_id) = non_empty(&self.ios.app_id) {
            if !app_id.chars().all(|c| c.is_ascii_digit()) {
                errors.push(format!("iOS appId must be numeric, got '{}'", app_id));
            }
        }

        if let Some(app_id) = non_empty(&self.android.app_id) {
            if app_id.contains([';', '#', ' ']) {
                errors.push(format!("Android appId '{}' is not a package id", app_id));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Options that load but probably do not do what the caller wants
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (field, url) in [
            ("iOS storeUrl", non_empty(&self.ios.store_url)),
            ("android storeUrl", non_empty(&self.android.store_url)),
        ] {
            if let Some(url) = url {
                if !url.contains("://") {
                    warnings.push(format!("{} '{}' has no scheme", field, url));
                }
            }
        }

        if self.fallback_enabled() && self.delay_ms == 0 {
            warnings.push("delay is 0, the fallback fires immediately".to_string());
        }

        if self.fallback
            && !self.fallback_to_web
            && store_link(Platform::Ios, self).is_none()
            && store_link(Platform::Android, self).is_none()
        {
            warnings.push("store fallback enabled but no store link can be built".to_string());
        }

        warnings
    }

    /// Consume the configuration, rejecting it when `validate` fails.
    /// Warnings are logged and do not reject.
    pub fn validated(self) -> DeepLinkResult<Self> {
        self.validate()
            .map_err(|errors| DeepLinkError::Configuration {
                field: "options".to_string(),
                message: errors.join("; "),
            })?;
        for warning in self.warnings() {
            console_warn!("[DeepLinkConfig] {}", warning);
        }
        Ok(self)
    }
}

/// Treat `Some("")` the same as `None`
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    }))
}
