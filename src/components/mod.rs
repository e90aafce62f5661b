//! View components for the quest board.
//!
//! Most render from props; the only state they keep is local to the widget
//! (a text buffer, which receipt is expanded). `PlayerStats` reads the shared
//! state signal instead.

mod active_quest_panel;
mod narrative_box;
mod player_stats;
mod quest_card;
mod receipt_card;
mod receipts_drawer;
mod record_action_form;

pub use active_quest_panel::ActiveQuestPanel;
pub use narrative_box::NarrativeBox;
pub use player_stats::PlayerStats;
pub use quest_card::QuestCard;
pub use receipt_card::ReceiptCard;
pub use receipts_drawer::ReceiptsDrawer;
pub use record_action_form::RecordActionForm;
