#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

// Discrete player intents, independent of keyboard or touch origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub enum InputEvent {
    LaneLeft,
    LaneRight,
    Jump,
    SlideStart,
    SlideEnd,
}
