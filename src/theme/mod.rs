//! Global styles for the desktop client.

mod styles;

pub use styles::GLOBAL_STYLES;
