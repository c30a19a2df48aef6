use serde::Serialize;

/// Disc color. Dark moves first; the computer plays light.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Player {
    Dark,
    Light,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Wire code used across the display boundary: 1=dark, 2=light.
    pub fn code(self) -> u8 {
        match self {
            Self::Dark => 1,
            Self::Light => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Dark),
            2 => Some(Self::Light),
            _ => None,
        }
    }
}

/// AI strength picked in the display layer, read fresh on every `ai_move`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Hard,
}

impl Difficulty {
    /// Any label other than "Easy" selects the greedy heuristic.
    pub fn from_label(label: &str) -> Self {
        if label == "Easy" { Self::Easy } else { Self::Hard }
    }
}

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

/// Public game state snapshot read by the display layer after every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Flattened row-major board, 0=empty, 1=dark, 2=light.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub dark_count: u8,
    pub light_count: u8,
    pub is_game_over: bool,
    /// Contract:
    /// - `true` when the previous action was a pass.
    /// - `false` when the previous action was a normal move.
    pub is_pass: bool,
    /// Contract:
    /// - Normal move: list of flipped positions (0..=63).
    /// - Pass: must be an empty list.
    pub flipped: Vec<u8>,
}

/// Final result after game over. `winner` is 0 on a tie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GameResult {
    pub winner: u8,
    pub dark_count: u8,
    pub light_count: u8,
}
