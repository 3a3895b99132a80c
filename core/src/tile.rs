use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell, tracked per round.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    #[default]
    Hidden,
    Revealed(u8),
    Detonated,
}

impl CellStatus {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }

    pub const fn adjacent_mines(self) -> Option<u8> {
        match self {
            Self::Revealed(count) => Some(count),
            _ => None,
        }
    }

    /// Single character used by the text board rendering.
    pub const fn glyph(self) -> char {
        match self {
            Self::Hidden => '.',
            Self::Detonated => '*',
            Self::Revealed(0) => ' ',
            Self::Revealed(count) => match char::from_digit(count as u32, 10) {
                Some(digit) => digit,
                None => '?',
            },
        }
    }
}
