//! Narrative line shown above the quest list.

use dioxus::prelude::*;
use questboard_core::Narrative;
use questboard_ui::CopyButton;

/// The narrative to display: the given one, or the calm idle message.
pub fn displayed(narrative: Option<&Narrative>) -> Narrative {
    narrative.cloned().unwrap_or_else(Narrative::idle)
}

/// Props for the NarrativeBox component.
#[derive(Props, Clone, PartialEq)]
pub struct NarrativeBoxProps {
    #[props(default)]
    pub narrative: Option<Narrative>,
}

#[component]
pub fn NarrativeBox(props: NarrativeBoxProps) -> Element {
    let shown = displayed(props.narrative.as_ref());
    let class = format!("narrative-box narrative-{}", shown.tone.as_str());

    rsx! {
        div { class: "{class}",
            div { class: "narrative-content",
                if let Some(title) = shown.title.clone().filter(|t| !t.is_empty()) {
                    h2 { class: "narrative-title", "{title}" }
                }
                p { class: "narrative-line", "{shown.line}" }
            }
            if let Some(share_text) = shown.share_text.clone() {
                CopyButton { text: share_text }
            }
        }
    }
}
