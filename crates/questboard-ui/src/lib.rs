//! Questboard UI Components
//!
//! Small Dioxus building blocks shared by the desktop client: buttons, the
//! quest type badge and a clipboard copy button.
//!
//! ## Palette
//!
//! Quest types carry fixed colors, taken from
//! [`QuestType::color`](questboard_core::QuestType::color):
//! - **Agency (#6b8e9f)**: slate blue
//! - **Courage (#d4a574)**: warm sand
//! - **Order (#8b6f7e)**: dusty plum

pub mod components;

pub use components::*;
