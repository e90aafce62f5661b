//! Controller context for the desktop app.
//!
//! The [`Controller`] is handed to the launcher in `main`; [`App`](crate::app::App)
//! mirrors its `watch` channel into a `Signal<AppState>` that every
//! component can read.
//!
//! ```ignore
//! let controller = use_controller();
//! let state = use_app_state();
//! if state.read().can_start() { ... }
//! ```

use dioxus::prelude::*;
use questboard_core::{AppState, Controller};
use tokio_util::sync::CancellationToken;

/// Hook to access the controller.
pub fn use_controller() -> Controller {
    use_context::<Controller>()
}

/// Hook to access the mirrored application state.
pub fn use_app_state() -> Signal<AppState> {
    use_context::<Signal<AppState>>()
}

/// Token cancelled when the app shell is torn down.
///
/// Every controller call made from the UI passes this token, so responses
/// arriving after teardown are dropped.
#[derive(Clone)]
pub struct ViewLifetime(pub CancellationToken);

/// Hook to access the shell's cancellation token.
pub fn use_view_lifetime() -> CancellationToken {
    use_context::<ViewLifetime>().0
}
