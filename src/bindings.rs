//! wasm-bindgen surface for the display layer. One global session; the
//! display re-renders from a fresh snapshot after every call and never
//! holds board state of its own.

use std::sync::{Mutex, PoisonError};

use once_cell::sync::Lazy;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::game::GameInstance;
use crate::types::{Difficulty, Player};

static GAME: Lazy<Mutex<GameInstance>> = Lazy::new(|| Mutex::new(GameInstance::new()));

fn with_game<R>(f: impl FnOnce(&mut GameInstance) -> R) -> R {
    let mut game = GAME.lock().unwrap_or_else(PoisonError::into_inner);
    f(&mut game)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(JsValue::from)
}

/// Resets the session to the standard starting position, dark to move,
/// and returns the fresh snapshot.
#[wasm_bindgen]
pub fn initialize() -> Result<JsValue, JsValue> {
    with_game(|game| {
        *game = GameInstance::new();
        to_js(&game.to_game_state())
    })
}

/// Current snapshot without mutating anything.
#[wasm_bindgen]
pub fn get_state() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.to_game_state()))
}

/// Legal-destination probe used to highlight cells.
#[wasm_bindgen]
pub fn is_valid_move(row: u8, col: u8) -> bool {
    with_game(|game| game.is_valid_move(row, col))
}

/// Attempts a move for the active player. `false` means the display should
/// show an invalid-move notice and change nothing else.
#[wasm_bindgen]
pub fn place_piece(row: u8, col: u8) -> bool {
    with_game(|game| game.place_piece(row, col))
}

/// `player` uses the wire codes 1=dark, 2=light. Unknown codes have no
/// moves.
#[wasm_bindgen]
pub fn has_valid_move(player: u8) -> bool {
    match Player::from_code(player) {
        Some(player) => with_game(|game| game.has_valid_move(player)),
        None => false,
    }
}

/// Plays the computer turn. `false` means light had no legal move; the
/// display treats that as a skipped turn.
#[wasm_bindgen]
pub fn ai_move(difficulty: &str) -> bool {
    with_game(|game| game.ai_move(Difficulty::from_label(difficulty)))
}

/// Forfeits the active player's turn.
#[wasm_bindgen]
pub fn pass() {
    with_game(|game| game.pass());
}

#[wasm_bindgen]
pub fn get_score(player: u8) -> u8 {
    match Player::from_code(player) {
        Some(player) => with_game(|game| game.score(player)),
        None => 0,
    }
}

#[wasm_bindgen]
pub fn is_game_over() -> bool {
    with_game(|game| game.is_game_over())
}

/// Final standings for the end-of-game banner.
#[wasm_bindgen]
pub fn game_result() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.to_game_result()))
}

/// All legal destinations for the active player.
#[wasm_bindgen]
pub fn get_legal_moves() -> Result<JsValue, JsValue> {
    with_game(|game| to_js(&game.get_legal_moves()))
}
