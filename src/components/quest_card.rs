//! Quest card for an available quest.

use dioxus::prelude::*;
use questboard_core::Quest;
use questboard_ui::{Button, ButtonVariant, TypeBadge};

/// Props for the QuestCard component.
#[derive(Props, Clone, PartialEq)]
pub struct QuestCardProps {
    pub quest: Quest,
    /// Called with the quest id when "Start" is pressed
    pub on_start: EventHandler<String>,
    #[props(default = false)]
    pub disabled: bool,
}

/// One available quest with its "Start" button.
///
/// # Example
///
/// ```ignore
/// QuestCard {
///     quest: quest.clone(),
///     disabled: !state.can_start(),
///     on_start: move |id| start(id),
/// }
/// ```
#[component]
pub fn QuestCard(props: QuestCardProps) -> Element {
    let quest = props.quest.clone();
    let quest_id = quest.id.clone();
    let on_start = props.on_start;

    rsx! {
        article { class: "quest-card",
            TypeBadge { quest_type: quest.quest_type }

            QuestDetails {
                context: quest.context.clone(),
                real_world_action: quest.real_world_action.clone(),
                constraint: quest.constraint.clone(),
                reflection: quest.reflection.clone(),
            }

            Button {
                variant: ButtonVariant::Primary,
                disabled: props.disabled,
                onclick: move |_| on_start.call(quest_id.clone()),
                "Start"
            }
        }
    }
}

/// Context, action, constraint and optional reflection of a quest.
///
/// Shared by the quest card and the active quest panel.
#[component]
pub fn QuestDetails(
    context: String,
    real_world_action: String,
    constraint: String,
    reflection: Option<String>,
) -> Element {
    rsx! {
        div { class: "quest-details",
            p { class: "quest-context", "{context}" }
            div { class: "quest-action",
                strong { "Action: " }
                "{real_world_action}"
            }
            div { class: "quest-constraint",
                strong { "Constraint: " }
                "{constraint}"
            }
            if let Some(reflection) = reflection {
                div { class: "quest-reflection",
                    em { "{reflection}" }
                }
            }
        }
    }
}
