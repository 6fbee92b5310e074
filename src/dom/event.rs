#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    Submit,
    Reset,
    KeyDown,
}

impl EventType {
    /// Event name for use in JS listeners.
    pub fn name(self) -> &'static str {
        use EventType::*;
        match self {
            Click => "click",
            Submit => "submit",
            Reset => "reset",
            KeyDown => "keydown",
        }
    }
}
