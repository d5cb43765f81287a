use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::services::{DeepLinkConfig, DeepLinkDispatcher, DispatchOutcome};

#[derive(Props, PartialEq, Clone)]
pub struct DeepLinkButtonProps {
    pub config: DeepLinkConfig,
    pub uri: String,
    pub fallback_web_url: String,
    pub label: String,
    #[props(default)]
    pub on_outcome: Option<EventHandler<DispatchOutcome>>,
}

/// Opens `uri` in the native app on click. The dispatcher lives as long as
/// the button, so unmounting the button also cancels a pending fallback.
/// A changed `config` prop reconfigures the dispatcher on the next render.
#[component]
pub fn DeepLinkButton(props: DeepLinkButtonProps) -> Element {
    let config = props.config.clone();
    let dispatcher = use_hook(move || match DeepLinkDispatcher::browser(config) {
        Ok(dispatcher) => Some(Rc::new(RefCell::new(dispatcher))),
        Err(e) => {
            e.log("DeepLinkButton");
            None
        }
    });
    if let Some(dispatcher) = dispatcher.as_ref() {
        dispatcher.borrow_mut().reconfigure_if_changed(&props.config);
    }
    let mut status = use_signal(|| None::<&'static str>);
    let unavailable = dispatcher.is_none();

    let uri = props.uri.clone();
    let fallback_web_url = props.fallback_web_url.clone();
    let on_outcome = props.on_outcome;

    rsx! {
        div {
            class: "deep-link",
            button {
                class: "deep-link-button",
                disabled: unavailable,
                onclick: move |_| {
                    let Some(dispatcher) = dispatcher.as_ref() else {
                        return;
                    };
                    let outcome = dispatcher
                        .borrow()
                        .open_link_with_confirmation(&uri, &fallback_web_url);
                    match outcome {
                        Ok(outcome) => {
                            status.set(Some(if outcome.attempted() {
                                "Opening app..."
                            } else {
                                "Open this link on your phone"
                            }));
                            if let Some(handler) = on_outcome {
                                handler.call(outcome);
                            }
                        }
                        Err(e) => {
                            e.log("DeepLinkButton");
                            status.set(Some("Could not open the app"));
                        }
                    }
                },
                "{props.label}"
            }
            if let Some(message) = status() {
                p {
                    class: "deep-link-status",
                    "{message}"
                }
            }
        }
    }
}
