//! Free-text note describing what the player actually did.

use dioxus::prelude::*;
use questboard_ui::{Button, ButtonVariant};

/// Text ready to submit, or `None` when it is blank.
pub fn submittable(buffer: &str) -> Option<String> {
    let trimmed = buffer.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Props for the RecordActionForm component.
#[derive(Props, Clone, PartialEq)]
pub struct RecordActionFormProps {
    pub quest_id: String,
    /// Called with `(quest_id, text)`; never with blank text
    pub on_record: EventHandler<(String, String)>,
    #[props(default = false)]
    pub disabled: bool,
}

/// Text area plus "Record" button. The buffer is cleared after a submit.
#[component]
pub fn RecordActionForm(props: RecordActionFormProps) -> Element {
    let mut text = use_signal(String::new);
    let on_record = props.on_record;
    let quest_id = props.quest_id.clone();
    let blank = submittable(&text.read()).is_none();
    let input_id = format!("record-action-{}", props.quest_id);

    let mut submit = move || {
        if let Some(note) = submittable(&text.read()) {
            on_record.call((quest_id.clone(), note));
            text.set(String::new());
        }
    };

    rsx! {
        form {
            class: "record-action-form",
            onsubmit: move |evt: FormEvent| {
                evt.prevent_default();
                submit();
            },
            label { class: "record-action-label", r#for: "{input_id}",
                "What did you do?"
            }
            textarea {
                id: "{input_id}",
                class: "record-action-input",
                rows: "3",
                placeholder: "A sentence is enough.",
                disabled: props.disabled,
                value: "{text}",
                oninput: move |evt: FormEvent| text.set(evt.value()),
            }
            Button {
                variant: ButtonVariant::Ghost,
                button_type: "submit".to_string(),
                disabled: props.disabled || blank,
                "Record"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_is_not_submittable() {
        assert_eq!(submittable(""), None);
        assert_eq!(submittable("   \n\t"), None);
    }

    #[test]
    fn test_submitted_text_is_trimmed() {
        assert_eq!(
            submittable("  Called my sister \n"),
            Some("Called my sister".to_string())
        );
    }
}
