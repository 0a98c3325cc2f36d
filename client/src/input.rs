//! Chat input handling: key presses, text box growth and command recognition.

/// Tallest the chat text box may grow, in pixels.
pub const MAX_INPUT_HEIGHT: u32 = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Submit,
    InsertNewline,
    Type,
}

impl KeyPress {
    pub fn action(&self) -> InputAction {
        match (self.key, self.shift) {
            (Key::Enter, false) => InputAction::Submit,
            (Key::Enter, true) => InputAction::InsertNewline,
            (Key::Other, _) => InputAction::Type,
        }
    }
}

/// Height for the text box given the height its content wants.
pub fn textarea_height(scroll_height: u32) -> u32 {
    scroll_height.min(MAX_INPUT_HEIGHT)
}

/// Chat inputs that trigger a dedicated backend operation instead of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatCommand {
    Summary,
    Referat,
}

impl ChatCommand {
    /// Whole-input, case-insensitive match against the English and Russian names.
    pub fn parse(query: &str) -> Option<Self> {
        match query.trim().to_lowercase().as_str() {
            "summary" | "суммаризация" => Some(ChatCommand::Summary),
            "referat" | "реферат" => Some(ChatCommand::Referat),
            _ => None,
        }
    }
}
