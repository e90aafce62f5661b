//! Reusable UI components

mod button;
mod copy_button;
mod type_badge;

pub use button::*;
pub use copy_button::*;
pub use type_badge::*;
