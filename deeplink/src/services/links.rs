//! Link construction
//!
//! Every function here is pure: given a URI, a classified user agent and a
//! configuration it returns the string that should be handed to navigation.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use super::config::{non_empty, DeepLinkConfig};
use crate::console_warn;
use crate::utils::platform::{Platform, UserAgent};

const ITUNES_APP_BASE: &str = "itms-apps://itunes.apple.com/app/";
const PLAY_MARKET_BASE: &str = "market://details?id=";

/// Characters that would terminate or corrupt an intent field
const INTENT_FIELD: &AsciiSet = &CONTROLS.add(b' ').add(b'#').add(b';');

/// First run of non-`:` characters, e.g. `myapp` for `myapp://open`
pub fn scheme_of(uri: &str) -> Option<&str> {
    uri.split(':').find(|segment| !segment.is_empty())
}

/// Build an Android intent URI for `scheme`.
///
/// Only the scheme survives the rewrite; Chrome resolves the activity from
/// the scheme and package, and opens `fallback_url` when the package is
/// missing. The `package` field is omitted when no package id is known.
pub fn intent_link(scheme: &str, package: Option<&str>, fallback_url: &str) -> String {
    let mut link = format!("intent://{scheme}#Intent;scheme={scheme}");
    if let Some(package) = package {
        link.push_str(";package=");
        link.push_str(package);
    }
    link.push_str(";S.browser_fallback_url=");
    link.extend(utf8_percent_encode(fallback_url, INTENT_FIELD));
    link.push_str(";end");
    link
}

/// The URI actually handed to navigation for this user agent
pub fn compute_link(uri: &str, user_agent: &UserAgent, config: &DeepLinkConfig) -> String {
    if !user_agent.supports_intent_links() {
        return uri.to_string();
    }

    match scheme_of(uri) {
        Some(scheme) => intent_link(
            scheme,
            non_empty(&config.android.app_id),
            &config.fallback_web_url,
        ),
        None => {
            console_warn!("Deep link '{}' has no scheme, passing it through", uri);
            uri.to_string()
        }
    }
}

/// App Store / Play Store link for the platform, if one can be built
pub fn store_link(platform: Platform, config: &DeepLinkConfig) -> Option<String> {
    match platform {
        Platform::Ios => non_empty(&config.ios.store_url)
            .map(str::to_string)
            .or_else(|| {
                let name = non_empty(&config.ios.app_name)?;
                let id = non_empty(&config.ios.app_id)?;
                Some(format!("{ITUNES_APP_BASE}{name}/id{id}?mt=8"))
            }),
        Platform::Android => non_empty(&config.android.store_url)
            .map(str::to_string)
            .or_else(|| {
                non_empty(&config.android.app_id).map(|id| format!("{PLAY_MARKET_BASE}{id}"))
            }),
        Platform::Other => None,
    }
}

/// Configured web fallback, else the page the user is on
pub fn web_link(config: &DeepLinkConfig, current_location: Option<&str>) -> Option<String> {
    if config.fallback_web_url.is_empty() {
        current_location.map(str::to_string)
    } else {
        Some(config.fallback_web_url.clone())
    }
}

/// Where the fallback timer should send the user
pub fn fallback_link(
    platform: Platform,
    config: &DeepLinkConfig,
    current_location: Option<&str>,
) -> Option<String> {
    if config.fallback_to_web {
        web_link(config, current_location)
    } else {
        store_link(platform, config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::platform::fixtures::*;

    fn android_config() -> DeepLinkConfig {
        DeepLinkConfig::new()
            .with_android("com.app")
            .with_fallback_web_url("https://x.com")
    }

    #[test]
    fn test_android_intent_rewrite() {
        let link = compute_link(
            "myapp://open",
            &UserAgent::parse(ANDROID_CHROME),
            &android_config(),
        );
        assert_eq!(
            link,
            "intent://myapp#Intent;scheme=myapp;package=com.app;S.browser_fallback_url=https://x.com;end"
        );
    }

    #[test]
    fn test_passthrough_outside_intent_contexts() {
        let config = android_config();
        for ua in [IPHONE_SAFARI, DESKTOP_CHROME, ANDROID_FIREFOX, ANDROID_WEBVIEW] {
            assert_eq!(
                compute_link("myapp://open", &UserAgent::parse(ua), &config),
                "myapp://open"
            );
        }
    }

    #[test]
    fn test_intent_without_package() {
        let config = DeepLinkConfig::new().with_fallback_web_url("https://x.com");
        let link = compute_link("myapp://open", &UserAgent::parse(ANDROID_CHROME), &config);
        assert_eq!(
            link,
            "intent://myapp#Intent;scheme=myapp;S.browser_fallback_url=https://x.com;end"
        );
    }

    #[test]
    fn test_intent_escapes_fallback_delimiters() {
        let link = intent_link("myapp", Some("com.app"), "https://x.com/a b#frag;x");
        assert!(link.ends_with("S.browser_fallback_url=https://x.com/a%20b%23frag%3Bx;end"));
    }

    #[test]
    fn test_scheme_extraction() {
        assert_eq!(scheme_of("myapp://open/item?id=1"), Some("myapp"));
        assert_eq!(scheme_of("::weird"), Some("weird"));
        assert_eq!(scheme_of(""), None);
        assert_eq!(scheme_of(":::"), None);

        let ua = UserAgent::parse(ANDROID_CHROME);
        assert_eq!(compute_link(":::", &ua, &android_config()), ":::");
    }

    #[test]
    fn test_ios_store_link() {
        let config = DeepLinkConfig::new().with_ios("App", "123");
        assert_eq!(
            store_link(Platform::Ios, &config).as_deref(),
            Some("itms-apps://itunes.apple.com/app/App/id123?mt=8")
        );

        let missing_name = DeepLinkConfig::new();
        assert_eq!(store_link(Platform::Ios, &missing_name), None);
    }

    #[test]
    fn test_android_store_link() {
        let config = DeepLinkConfig::new().with_android("com.app");
        assert_eq!(
            store_link(Platform::Android, &config).as_deref(),
            Some("market://details?id=com.app")
        );
        assert_eq!(store_link(Platform::Android, &DeepLinkConfig::new()), None);
        assert_eq!(store_link(Platform::Other, &config), None);
    }

    #[test]
    fn test_store_url_override() {
        let config = DeepLinkConfig::new()
            .with_ios("App", "123")
            .with_ios_store_url("https://apps.apple.com/app/id123")
            .with_android("com.app")
            .with_android_store_url("https://play.google.com/store/apps/details?id=com.app");

        assert_eq!(
            store_link(Platform::Ios, &config).as_deref(),
            Some("https://apps.apple.com/app/id123")
        );
        assert_eq!(
            store_link(Platform::Android, &config).as_deref(),
            Some("https://play.google.com/store/apps/details?id=com.app")
        );
    }

    #[test]
    fn test_web_link() {
        let configured = DeepLinkConfig::new().with_fallback_web_url("https://x.com");
        assert_eq!(
            web_link(&configured, Some("https://page.example")).as_deref(),
            Some("https://x.com")
        );

        let unset = DeepLinkConfig::new();
        assert_eq!(
            web_link(&unset, Some("https://page.example")).as_deref(),
            Some("https://page.example")
        );
        assert_eq!(web_link(&unset, None), None);
    }

    #[test]
    fn test_fallback_link_mode() {
        let config = DeepLinkConfig::new()
            .with_android("com.app")
            .with_fallback_web_url("https://x.com");
        assert_eq!(
            fallback_link(Platform::Android, &config, None).as_deref(),
            Some("market://details?id=com.app")
        );

        let config = config.fallback_to_web(true);
        assert_eq!(
            fallback_link(Platform::Android, &config, None).as_deref(),
            Some("https://x.com")
        );
    }

    #[test]
    fn test_compute_link_is_pure() {
        let ua = UserAgent::parse(ANDROID_CHROME);
        let config = android_config();
        let first = compute_link("myapp://open", &ua, &config);
        let second = compute_link("myapp://open", &ua, &config);
        assert_eq!(first, second);
    }
}
