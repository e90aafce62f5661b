//! Panel for the quest the player is working on.

use dioxus::prelude::*;
use questboard_core::Quest;
use questboard_ui::{Button, ButtonVariant, TypeBadge};

use super::quest_card::QuestDetails;
use super::RecordActionForm;

/// Props for the ActiveQuestPanel component.
#[derive(Props, Clone, PartialEq)]
pub struct ActiveQuestPanelProps {
    pub quest: Quest,
    /// Called with the quest id on "I did it"
    pub on_complete: EventHandler<String>,
    /// Drops the active quest locally
    pub on_abandon: EventHandler<()>,
    /// Called with `(quest_id, text)` when a note is submitted
    pub on_record: EventHandler<(String, String)>,
    #[props(default = false)]
    pub disabled: bool,
}

#[component]
pub fn ActiveQuestPanel(props: ActiveQuestPanelProps) -> Element {
    let quest = props.quest.clone();
    let quest_id = quest.id.clone();
    let on_complete = props.on_complete;
    let on_abandon = props.on_abandon;

    rsx! {
        section { class: "active-quest-panel",
            div { class: "active-quest-header",
                TypeBadge { quest_type: quest.quest_type }
                h2 { class: "section-title", "Active Quest" }
            }

            QuestDetails {
                context: quest.context.clone(),
                real_world_action: quest.real_world_action.clone(),
                constraint: quest.constraint.clone(),
                reflection: quest.reflection.clone(),
            }

            div { class: "active-quest-actions",
                Button {
                    variant: ButtonVariant::Primary,
                    disabled: props.disabled,
                    onclick: move |_| on_complete.call(quest_id.clone()),
                    "I did it"
                }
                Button {
                    variant: ButtonVariant::Secondary,
                    disabled: props.disabled,
                    onclick: move |_| on_abandon.call(()),
                    "Abandon"
                }
            }

            RecordActionForm {
                quest_id: quest.id.clone(),
                disabled: props.disabled,
                on_record: props.on_record,
            }
        }
    }
}
