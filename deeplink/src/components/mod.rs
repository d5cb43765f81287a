//! User Interface Components
//!
//! - **deep_link_button**: a button that opens the app on click, with the
//!   store/web fallback armed

pub mod deep_link_button;

pub use deep_link_button::*;
