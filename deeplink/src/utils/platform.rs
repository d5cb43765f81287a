//! Platform Detection Utilities
//!
//! Pure user-agent classification used to decide how a deep link should be
//! dispatched. Nothing here touches the browser: callers hand in the
//! user-agent string, which keeps every decision deterministic under test.
//!
//! Key features:
//! - Mobile platform detection (iOS, Android)
//! - Browser family and major version via a small pattern table
//! - Embedded WebView detection
//! - Legacy Android Chrome gating (no intent support)

/// Android Chrome releases older than this cannot follow `intent://` links.
pub const LEGACY_CHROME_MAJOR: u32 = 40;

/// Mobile platform derived from the user agent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// iPhone, iPad or iPod
    Ios,
    /// Any Android device
    Android,
    /// Desktop and everything else
    Other,
}

impl Platform {
    /// Get the display name of the platform
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android => "Android",
            Platform::Other => "Other",
        }
    }

    pub fn is_mobile(&self) -> bool {
        matches!(self, Platform::Ios | Platform::Android)
    }
}

/// Browser families the version table knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserFamily {
    /// Chrome and Chromium derivatives (`Chrome/`)
    Chrome,
    /// Chrome on iOS (`CriOS/`), a WebKit shell
    ChromeIos,
    /// Firefox (`Firefox/`)
    Firefox,
    /// Firefox on iOS (`FxiOS/`)
    FirefoxIos,
}

impl BrowserFamily {
    pub fn name(&self) -> &'static str {
        match self {
            BrowserFamily::Chrome => "Chrome",
            BrowserFamily::ChromeIos => "Chrome iOS",
            BrowserFamily::Firefox => "Firefox",
            BrowserFamily::FirefoxIos => "Firefox iOS",
        }
    }
}

/// Best-effort browser name/version pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BrowserInfo {
    pub family: Option<BrowserFamily>,
    pub version: Option<u32>,
}

impl BrowserInfo {
    pub fn name(&self) -> Option<&'static str> {
        self.family.map(|family| family.name())
    }
}

struct BrowserPattern {
    token: &'static str,
    family: BrowserFamily,
    parse_version: fn(&str, &str) -> Option<u32>,
}

// Order matters: iOS shells first, Chrome last since many UAs embed it.
const BROWSER_PATTERNS: &[BrowserPattern] = &[
    BrowserPattern {
        token: "FxiOS/",
        family: BrowserFamily::FirefoxIos,
        parse_version: major_version_after,
    },
    BrowserPattern {
        token: "CriOS/",
        family: BrowserFamily::ChromeIos,
        parse_version: major_version_after,
    },
    BrowserPattern {
        token: "Firefox/",
        family: BrowserFamily::Firefox,
        parse_version: major_version_after,
    },
    BrowserPattern {
        token: "Chrome/",
        family: BrowserFamily::Chrome,
        parse_version: major_version_after,
    },
];

/// Read the run of digits directly following `token`
fn major_version_after(user_agent: &str, token: &str) -> Option<u32> {
    let start = user_agent.find(token)? + token.len();
    let digits: String = user_agent[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// A classified user-agent string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAgent {
    raw: String,
}

impl UserAgent {
    pub fn parse(user_agent: impl Into<String>) -> Self {
        Self {
            raw: user_agent.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_android(&self) -> bool {
        self.raw.contains("Android")
    }

    pub fn is_ios(&self) -> bool {
        self.raw.contains("iPad") || self.raw.contains("iPhone") || self.raw.contains("iPod")
    }

    pub fn is_mobile(&self) -> bool {
        self.is_android() || self.is_ios()
    }

    /// Embedded web views cannot hand intents to the system
    pub fn is_webview(&self) -> bool {
        self.raw.contains("WebView") || (self.is_android() && self.raw.contains("; wv)"))
    }

    pub fn is_firefox(&self) -> bool {
        self.raw.contains("Firefox") || self.raw.contains("FxiOS")
    }

    /// iOS wins when a UA claims both platforms
    pub fn platform(&self) -> Platform {
        if self.is_ios() {
            Platform::Ios
        } else if self.is_android() {
            Platform::Android
        } else {
            Platform::Other
        }
    }

    pub fn browser(&self) -> BrowserInfo {
        BROWSER_PATTERNS
            .iter()
            .find(|pattern| self.raw.contains(pattern.token))
            .map(|pattern| BrowserInfo {
                family: Some(pattern.family),
                version: (pattern.parse_version)(&self.raw, pattern.token),
            })
            .unwrap_or_default()
    }

    /// Android Chrome too old to understand intent links
    pub fn is_legacy_android_chrome(&self) -> bool {
        if !self.is_android() {
            return false;
        }

        let browser = self.browser();
        browser.family == Some(BrowserFamily::Chrome)
            && browser
                .version
                .is_some_and(|version| version < LEGACY_CHROME_MAJOR)
    }

    /// Whether deep links should be rewritten as `intent://` URIs
    pub fn supports_intent_links(&self) -> bool {
        self.is_android() && !self.is_firefox() && !self.is_webview()
    }
}
