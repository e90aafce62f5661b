//! Quest Type Badge
//!
//! Small colored label naming a quest's type. Label and color come from the
//! static table on [`QuestType`].

use dioxus::prelude::*;
use questboard_core::QuestType;

/// Inline style for a badge of `quest_type`
pub fn badge_style(quest_type: QuestType) -> String {
    format!("background-color: {};", quest_type.color())
}

/// Displays a quest type as a pill
///
/// # Example
///
/// ```rust,ignore
/// rsx! {
///     TypeBadge { quest_type: quest.quest_type }
/// }
/// ```
#[component]
pub fn TypeBadge(quest_type: QuestType) -> Element {
    let style = badge_style(quest_type);
    let class = format!("type-badge type-{}", quest_type.as_str());
    let label = quest_type.label();

    rsx! {
        span {
            class: "{class}",
            style: "{style}",
            "{label}"
        }
    }
}
