use dioxus::prelude::*;
use questboard_core::ShareLink;
use questboard_ui::{Button, ButtonVariant};
use tokio_util::sync::CancellationToken;

use crate::components::{
    ActiveQuestPanel, NarrativeBox, PlayerStats, QuestCard, ReceiptCard, ReceiptsDrawer,
};
use crate::context::{use_controller, ViewLifetime};
use crate::theme::GLOBAL_STYLES;

/// Root application component.
///
/// Owns the subscription to the controller, kicks off the initial load and
/// wires every user intent to a controller operation.
#[component]
pub fn App() -> Element {
    let controller = use_controller();

    let mut state = use_signal(|| controller.snapshot());
    use_context_provider(|| state);

    let lifetime = use_hook(CancellationToken::new);
    use_context_provider(|| ViewLifetime(lifetime.clone()));
    use_drop({
        let lifetime = lifetime.clone();
        move || lifetime.cancel()
    });

    let mut drawer_open = use_signal(|| false);
    let mut share_link: Signal<Option<ShareLink>> = use_signal(|| None);

    // Mirror controller state into the signal
    use_future({
        let controller = controller.clone();
        move || {
            let mut rx = controller.subscribe();
            async move {
                state.set(rx.borrow_and_update().clone());
                while rx.changed().await.is_ok() {
                    let next = rx.borrow_and_update().clone();
                    state.set(next);
                }
            }
        }
    });

    // Initial load
    use_effect({
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        move || {
            let controller = controller.clone();
            let lifetime = lifetime.clone();
            spawn(async move {
                if let Err(e) = controller.load(&lifetime).await {
                    tracing::debug!("Initial load ended with: {}", e);
                }
            });
        }
    });

    let on_start = use_callback({
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        move |quest_id: String| {
            let controller = controller.clone();
            let lifetime = lifetime.clone();
            spawn(async move {
                let _ = controller.start_quest(&quest_id, &lifetime).await;
            });
        }
    });

    let on_complete = use_callback({
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        move |quest_id: String| {
            let controller = controller.clone();
            let lifetime = lifetime.clone();
            share_link.set(None);
            spawn(async move {
                let _ = controller.complete_quest(&quest_id, &lifetime).await;
            });
        }
    });

    let on_abandon = use_callback({
        let controller = controller.clone();
        move |_: ()| {
            controller.abandon();
        }
    });

    let on_record = use_callback({
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        move |(quest_id, text): (String, String)| {
            let controller = controller.clone();
            let lifetime = lifetime.clone();
            spawn(async move {
                let _ = controller.record_action(&quest_id, &text, &lifetime).await;
            });
        }
    });

    let on_share = use_callback({
        let controller = controller.clone();
        let lifetime = lifetime.clone();
        move |receipt_id: String| {
            let controller = controller.clone();
            let lifetime = lifetime.clone();
            spawn(async move {
                if let Ok(link) = controller.share_receipt(&receipt_id, &lifetime).await {
                    questboard_ui::copy_to_clipboard(&link.url);
                    share_link.set(Some(link));
                }
            });
        }
    });

    let on_dismiss_receipt = use_callback({
        let controller = controller.clone();
        move |_: ()| {
            share_link.set(None);
            controller.dismiss_receipt();
        }
    });

    let snapshot = state.read().clone();
    let busy = snapshot.action_in_progress;
    let can_start = snapshot.can_start();
    let active = snapshot.active_quest().cloned();
    let available: Vec<_> = snapshot.available_quests().into_iter().cloned().collect();

    rsx! {
        style { {GLOBAL_STYLES} }

        div { class: "app-shell",
            header { class: "app-header",
                h1 { class: "app-title", "Questboard" }
                PlayerStats {}
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| drawer_open.set(true),
                    "Receipts"
                }
            }

            main { class: "app-main",
                NarrativeBox { narrative: snapshot.narrative.clone() }

                // Error display
                if let Some(err) = snapshot.error.clone() {
                    div { class: "error-banner",
                        span { "Error: {err}" }
                        button {
                            class: "error-dismiss",
                            onclick: move |_| controller.dismiss_error(),
                            "dismiss"
                        }
                    }
                }

                if let Some(receipt) = snapshot.latest_receipt.clone() {
                    ReceiptCard {
                        receipt: receipt,
                        share_url: share_link().map(|l| l.url),
                        on_open_receipts: move |_| drawer_open.set(true),
                        on_share: on_share,
                        on_dismiss: on_dismiss_receipt,
                        on_record: on_record,
                        disabled: busy,
                    }
                }

                // Loading state
                if snapshot.is_loading() {
                    div { class: "loading-state",
                        p { class: "loading-message", "Loading..." }
                    }
                } else {
                    if let Some(quest) = active.clone() {
                        ActiveQuestPanel {
                            quest: quest,
                            disabled: busy,
                            on_complete: on_complete,
                            on_abandon: on_abandon,
                            on_record: on_record,
                        }
                    }

                    if !available.is_empty() {
                        section { class: "quest-list",
                            h2 { class: "section-title", "Available Quests" }
                            for quest in available {
                                QuestCard {
                                    key: "{quest.id}",
                                    quest: quest.clone(),
                                    disabled: !can_start,
                                    on_start: on_start,
                                }
                            }
                        }
                    } else if active.is_none() {
                        div { class: "empty-state", "No quests available at this time." }
                    }
                }
            }

            ReceiptsDrawer {
                open: drawer_open(),
                on_close: move |_| drawer_open.set(false),
            }
        }
    }
}
