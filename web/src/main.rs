use deeplink::{DeepLinkButton, DeepLinkConfig, DispatchOutcome};
use dioxus::prelude::*;

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        Router::<Route> {}
    }
}

#[derive(Clone, Routable, Debug, PartialEq)]
enum Route {
    #[route("/")]
    Home {},
}

#[component]
fn Home() -> Element {
    let config = DeepLinkConfig::new()
        .with_ios("App", "123456789")
        .with_android("com.example.app")
        .with_fallback_web_url("https://example.com/open");
    let mut last_outcome = use_signal(|| None::<DispatchOutcome>);

    rsx! {
        div {
            h1 { "Open in app" }
            DeepLinkButton {
                config: config,
                uri: "exampleapp://open/home".to_string(),
                fallback_web_url: "https://example.com/open".to_string(),
                label: "Open the app".to_string(),
                on_outcome: move |outcome| last_outcome.set(Some(outcome)),
            }
            if let Some(outcome) = last_outcome() {
                pre { "{outcome:?}" }
            }
        }
    }
}
