//! Widget Events
//!
//! Everything a surface can ask the widget to do. Surfaces translate their
//! native input (terminal keys, clicks) into these and hand them to
//! [`crate::ChatWidget::handle_event`]; the widget holds all the rules.

use serde::{Deserialize, Serialize};

/// Events from a UI surface to the widget
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetEvent {
    /// Launcher pressed
    Open,
    /// Close button pressed
    Close,
    /// Flip between launcher and panel
    ToggleOpen,
    /// Flip between compact and expanded panel
    ToggleExpanded,
    /// A character typed into the input
    InsertChar(char),
    /// Delete the last character of the draft
    Backspace,
    /// Replace the whole draft (paste, programmatic input)
    SetDraft(String),
    /// Enter pressed in the input
    Enter {
        /// Whether Shift was held
        shift: bool,
    },
    /// Send button pressed
    Submit,
}

impl WidgetEvent {
    /// Whether this event only makes sense while the panel is open
    #[must_use]
    pub fn requires_open_panel(&self) -> bool {
        matches!(
            self,
            Self::ToggleExpanded
                | Self::InsertChar(_)
                | Self::Backspace
                | Self::SetDraft(_)
                | Self::Enter { .. }
                | Self::Submit
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_only_events() {
        assert!(WidgetEvent::Submit.requires_open_panel());
        assert!(WidgetEvent::InsertChar('a').requires_open_panel());
        assert!(!WidgetEvent::Open.requires_open_panel());
        assert!(!WidgetEvent::ToggleOpen.requires_open_panel());
        assert!(!WidgetEvent::Close.requires_open_panel());
    }
}
