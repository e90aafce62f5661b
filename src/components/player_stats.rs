//! Stat totals shown in the header.
//!
//! Reads the shared [`AppState`](questboard_core::AppState) signal directly;
//! renders nothing until the player state has loaded.

use dioxus::prelude::*;
use questboard_core::{QuestType, Stats};

use crate::context::use_app_state;

/// One row per quest type, in display order
pub fn stat_entries(stats: &Stats) -> [(QuestType, String); 3] {
    [
        (QuestType::Agency, format_stat(stats.agency)),
        (QuestType::Courage, format_stat(stats.courage)),
        (QuestType::Order, format_stat(stats.order)),
    ]
}

/// Whole numbers without a fraction, anything else to one decimal
pub fn format_stat(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[component]
pub fn PlayerStats() -> Element {
    let state = use_app_state();
    let Some(player) = state.read().player.clone() else {
        return rsx! {};
    };

    let rows: Vec<(&'static str, &'static str, String, String)> = stat_entries(&player.stats)
        .into_iter()
        .map(|(quest_type, value)| {
            (
                quest_type.as_str(),
                quest_type.label(),
                format!("color: {};", quest_type.color()),
                value,
            )
        })
        .collect();

    rsx! {
        div { class: "player-stats",
            for (key, label, style, value) in rows {
                span { key: "{key}", class: "player-stat",
                    span { class: "player-stat-label", style: "{style}", "{label}" }
                    span { class: "player-stat-value", "{value}" }
                }
            }
        }
    }
}
