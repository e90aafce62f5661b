//! Copy Button
//!
//! Copies a string to the system clipboard and shows "✓ Copied" for two
//! seconds.

use std::time::Duration;

use dioxus::prelude::*;

/// How long the confirmation label stays up
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// Button text for the given feedback state
pub fn copy_label(copied: bool, idle_label: &str) -> String {
    if copied {
        "\u{2713} Copied".to_string()
    } else {
        idle_label.to_string()
    }
}

/// Put `text` on the clipboard. Returns false when no clipboard is available.
pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to copy to clipboard: {}", e);
                false
            }
        },
        Err(e) => {
            tracing::warn!("Clipboard not available: {}", e);
            false
        }
    }
}

#[derive(Clone, PartialEq, Props)]
pub struct CopyButtonProps {
    /// Text placed on the clipboard
    pub text: String,
    #[props(default = "Copy".to_string())]
    pub label: String,
    #[props(default)]
    pub class: Option<String>,
}

#[component]
pub fn CopyButton(props: CopyButtonProps) -> Element {
    let mut copied = use_signal(|| false);
    let base = match props.class.as_deref() {
        Some(extra) => format!("copy-btn {}", extra),
        None => "copy-btn".to_string(),
    };
    let class = if copied() { format!("{} copied", base) } else { base };
    let label = copy_label(copied(), &props.label);
    let text = props.text.clone();

    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| {
                if copy_to_clipboard(&text) {
                    copied.set(true);
                    spawn(async move {
                        tokio::time::sleep(COPIED_FEEDBACK).await;
                        copied.set(false);
                    });
                }
            },
            "{label}"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_switches_while_copied() {
        assert_eq!(copy_label(false, "Copy share text"), "Copy share text");
        assert_eq!(copy_label(true, "Copy share text"), "✓ Copied");
    }

    #[test]
    fn feedback_lasts_two_seconds() {
        assert_eq!(COPIED_FEEDBACK, Duration::from_secs(2));
    }
}
