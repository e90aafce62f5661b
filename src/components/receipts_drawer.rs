//! Drawer listing the player's full receipt history.
//!
//! The list is fetched from the server every time the drawer opens, so it
//! is independent of the receipts cached in the controller state.

use dioxus::prelude::*;
use questboard_core::Receipt;
use questboard_ui::{CloseButton, TypeBadge};

use crate::context::{use_controller, use_view_lifetime};

/// Next expanded item after clicking `clicked`: clicking the open item
/// collapses it, clicking another one switches to it.
pub fn toggle_expanded(current: Option<&str>, clicked: &str) -> Option<String> {
    if current == Some(clicked) {
        None
    } else {
        Some(clicked.to_string())
    }
}

/// Props for the ReceiptsDrawer component.
#[derive(Props, Clone, PartialEq)]
pub struct ReceiptsDrawerProps {
    pub open: bool,
    pub on_close: EventHandler<()>,
}

#[component]
pub fn ReceiptsDrawer(props: ReceiptsDrawerProps) -> Element {
    let controller = use_controller();
    let lifetime = use_view_lifetime();

    let mut receipts: Signal<Vec<Receipt>> = use_signal(Vec::new);
    let mut loading = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);
    let mut expanded: Signal<Option<String>> = use_signal(|| None);

    // Refetch each time the drawer opens
    use_effect(use_reactive((&props.open,), move |(open,)| {
        if !open {
            return;
        }
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        loading.set(true);
        error.set(None);
        spawn(async move {
            match controller.fetch_receipts(&lifetime).await {
                Ok(list) => receipts.set(list),
                Err(e) => {
                    tracing::error!("Error fetching receipts: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            loading.set(false);
        });
    }));

    if !props.open {
        return rsx! {};
    }

    let on_close = props.on_close;

    rsx! {
        div {
            class: "drawer-overlay",
            onclick: move |_| on_close.call(()),

            aside {
                class: "receipts-drawer",
                onclick: move |e| e.stop_propagation(),

                div { class: "drawer-header",
                    h2 { class: "drawer-title", "Receipts" }
                    CloseButton { onclick: move |_| on_close.call(()) }
                }

                div { class: "drawer-content",
                    if loading() {
                        div { class: "drawer-loading", "Loading receipts..." }
                    } else if let Some(err) = error() {
                        div { class: "drawer-error", "Error: {err}" }
                    } else if receipts.read().is_empty() {
                        div { class: "drawer-empty",
                            "No receipts yet. Complete quests to earn receipts."
                        }
                    } else {
                        div { class: "drawer-list",
                            for receipt in receipts.read().iter().cloned() {
                                {
                                    let is_expanded = expanded.read().as_deref() == Some(receipt.id.as_str());
                                    let id = receipt.id.clone();
                                    let date = receipt.created_date();
                                    rsx! {
                                        div { key: "{receipt.id}", class: "drawer-item",
                                            div {
                                                class: "drawer-item-header",
                                                onclick: move |_| {
                                                    let next = toggle_expanded(expanded.read().as_deref(), &id);
                                                    expanded.set(next);
                                                },
                                                TypeBadge { quest_type: receipt.quest_type }
                                                div { class: "drawer-item-info",
                                                    h3 { class: "drawer-item-title", "{receipt.title}" }
                                                    p { class: "drawer-item-line", "{receipt.line}" }
                                                }
                                                span { class: "drawer-item-date", "{date}" }
                                            }
                                            if is_expanded {
                                                div { class: "drawer-item-expanded",
                                                    p { class: "drawer-item-share-text", "{receipt.share_text}" }
                                                    if let Some(action) = receipt.action.clone() {
                                                        div { class: "drawer-item-action",
                                                            div { class: "drawer-item-action-label", "What you did:" }
                                                            div { class: "drawer-item-action-text", "{action}" }
                                                        }
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
