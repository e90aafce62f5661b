//! Receipt card shown right after a quest is completed.

use dioxus::prelude::*;
use questboard_core::Receipt;
use questboard_ui::{Button, ButtonVariant, CloseButton, CopyButton, TypeBadge};

use super::RecordActionForm;

/// A note can still be attached while the receipt carries none.
pub fn accepts_note(receipt: &Receipt) -> bool {
    receipt.action.is_none()
}

/// Props for the ReceiptCard component.
#[derive(Props, Clone, PartialEq)]
pub struct ReceiptCardProps {
    pub receipt: Receipt,
    /// Public link for this receipt, once one was created
    #[props(default)]
    pub share_url: Option<String>,
    /// Shows an "Open Receipts" button when set
    #[props(default)]
    pub on_open_receipts: Option<EventHandler<()>>,
    /// Called with the receipt id to create a share link
    #[props(default)]
    pub on_share: Option<EventHandler<String>>,
    #[props(default)]
    pub on_dismiss: Option<EventHandler<()>>,
    /// Offers the "What did you do?" form for the receipt's quest when set
    #[props(default)]
    pub on_record: Option<EventHandler<(String, String)>>,
    #[props(default = false)]
    pub disabled: bool,
}

/// Badge, title, line and share text of a receipt, with copy and share
/// actions.
#[component]
pub fn ReceiptCard(props: ReceiptCardProps) -> Element {
    let receipt = props.receipt.clone();
    let class = format!("receipt-card receipt-{}", receipt.tone.as_str());
    let receipt_id = receipt.id.clone();
    let note_handler = props.on_record.filter(|_| accepts_note(&receipt));

    rsx! {
        article { class: "{class}",
            div { class: "receipt-header",
                TypeBadge { quest_type: receipt.quest_type }
                if let Some(on_dismiss) = props.on_dismiss {
                    CloseButton { onclick: move |_| on_dismiss.call(()) }
                }
            }

            div { class: "receipt-content",
                h2 { class: "receipt-title", "{receipt.title}" }
                p { class: "receipt-line", "{receipt.line}" }
                div { class: "receipt-share",
                    p { class: "receipt-share-text", "{receipt.share_text}" }
                }
                if let Some(action) = receipt.action.clone() {
                    p { class: "receipt-action", "What you did: {action}" }
                }
            }

            if let Some(on_record) = note_handler {
                RecordActionForm {
                    quest_id: receipt.quest_id.clone(),
                    on_record: on_record,
                    disabled: props.disabled,
                }
            }

            div { class: "receipt-actions",
                CopyButton { text: receipt.share_text.clone() }

                if let Some(on_share) = props.on_share {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_share.call(receipt_id.clone()),
                        "Share link"
                    }
                }

                if let Some(on_open) = props.on_open_receipts {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_open.call(()),
                        "Open Receipts"
                    }
                }
            }

            if let Some(url) = props.share_url.clone() {
                div { class: "receipt-share-link",
                    span { "{url}" }
                    CopyButton { text: url.clone(), label: "Copy link".to_string() }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use questboard_core::{NarrativeTone, QuestType};

    fn receipt(action: Option<&str>) -> Receipt {
        Receipt {
            id: "r1".to_string(),
            created_at_ms: 1_760_600_000_000,
            quest_id: "q1".to_string(),
            quest_type: QuestType::Courage,
            tone: NarrativeTone::Warm,
            title: "Spoke up".to_string(),
            line: "You said it out loud.".to_string(),
            share_text: "I spoke up today.".to_string(),
            action: action.map(str::to_string),
        }
    }

    #[test]
    fn test_bare_receipt_accepts_note() {
        assert!(accepts_note(&receipt(None)));
    }

    #[test]
    fn test_annotated_receipt_hides_form() {
        assert!(!accepts_note(&receipt(Some("Asked for the raise"))));
    }
}
