use crate::ai::selector_for;
use crate::board::Board;
use crate::types::{Difficulty, GameResult, GameState, Player, Position};

const BOARD_WIDTH: usize = 8;

/// One game session. Owns the only mutable board; the display layer reads
/// snapshots via `to_game_state` and never writes cells directly.
pub struct GameInstance {
    board: Board,
    active_player: Player,
    is_pass: bool,
    flipped: Vec<u8>,
}

impl GameInstance {
    /// Standard starting position, dark to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            active_player: Player::Dark,
            is_pass: false,
            flipped: Vec::new(),
        }
    }

    pub fn active_player(&self) -> Player {
        self.active_player
    }

    /// Legal-destination probe for the active player. Off-board coordinates
    /// are not an error, just `false`.
    pub fn is_valid_move(&self, row: u8, col: u8) -> bool {
        match row_col_to_pos(row, col) {
            Some(pos) => self.board.flips_for(pos, self.active_player) != 0,
            None => false,
        }
    }

    /// Attempts a move for the active player. On success the stone is
    /// placed, every bracketed run flips and the turn passes to the
    /// opponent. On failure nothing changes.
    pub fn place_piece(&mut self, row: u8, col: u8) -> bool {
        match row_col_to_pos(row, col) {
            Some(pos) => self.apply_move(pos, self.active_player),
            None => false,
        }
    }

    /// Whether `player` has any legal destination. Pure probe; the active
    /// player is not touched.
    pub fn has_valid_move(&self, player: Player) -> bool {
        self.board.legal_moves(player) != 0
    }

    /// The active player forfeits the turn.
    pub fn pass(&mut self) {
        self.is_pass = true;
        self.flipped.clear();
        self.active_player = self.active_player.opponent();
    }

    /// Plays one computer move for light. Difficulty is read fresh on every
    /// call. Returns `false` and changes nothing when light has no legal
    /// destination; the caller treats that as a forfeited turn.
    pub fn ai_move(&mut self, difficulty: Difficulty) -> bool {
        let Some(pos) = selector_for(difficulty).select_move(&self.board, Player::Light) else {
            return false;
        };
        self.apply_move(pos, Player::Light)
    }

    pub fn score(&self, player: Player) -> u8 {
        let (dark, light) = self.board.count();
        match player {
            Player::Dark => dark,
            Player::Light => light,
        }
    }

    /// True when neither side has a legal move left.
    pub fn is_game_over(&self) -> bool {
        !self.has_valid_move(Player::Dark) && !self.has_valid_move(Player::Light)
    }

    pub fn get_legal_moves(&self) -> Vec<Position> {
        bitmask_to_indices(self.board.legal_moves(self.active_player))
            .into_iter()
            .map(|idx| Position {
                row: idx / BOARD_WIDTH as u8,
                col: idx % BOARD_WIDTH as u8,
            })
            .collect()
    }

    pub fn to_game_state(&self) -> GameState {
        let (dark_count, light_count) = self.board.count();
        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.active_player.code(),
            dark_count,
            light_count,
            is_game_over: self.is_game_over(),
            is_pass: self.is_pass,
            flipped: self.flipped.clone(),
        }
    }

    pub fn to_game_result(&self) -> GameResult {
        let (dark_count, light_count) = self.board.count();
        GameResult {
            winner: if dark_count > light_count {
                Player::Dark.code()
            } else if light_count > dark_count {
                Player::Light.code()
            } else {
                0
            },
            dark_count,
            light_count,
        }
    }

    fn apply_move(&mut self, pos: usize, player: Player) -> bool {
        let flips = self.board.place(pos, player);
        if flips == 0 {
            return false;
        }

        self.is_pass = false;
        self.flipped = bitmask_to_indices(flips);
        // The turn alternates strictly, also after a computer move.
        self.active_player = player.opponent();
        true
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, active_player: Player) {
        self.board = board;
        self.active_player = active_player;
        self.is_pass = false;
        self.flipped.clear();
    }
}

impl Default for GameInstance {
    fn default() -> Self {
        Self::new()
    }
}

fn row_col_to_pos(row: u8, col: u8) -> Option<usize> {
    if row >= BOARD_WIDTH as u8 || col >= BOARD_WIDTH as u8 {
        return None;
    }
    Some((row as usize) * BOARD_WIDTH + col as usize)
}

fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bit(row: usize, col: usize) -> u64 {
        1u64 << (row * BOARD_WIDTH + col)
    }

    fn idx(row: usize, col: usize) -> usize {
        row * BOARD_WIDTH + col
    }

    #[test]
    fn initial_state_has_center_cross_and_dark_to_move() {
        let game = GameInstance::new();
        let state = game.to_game_state();

        assert_eq!(state.current_player, Player::Dark.code());
        assert_eq!(state.dark_count, 2);
        assert_eq!(state.light_count, 2);
        assert_eq!(state.board[idx(3, 3)], 2);
        assert_eq!(state.board[idx(3, 4)], 1);
        assert_eq!(state.board[idx(4, 3)], 1);
        assert_eq!(state.board[idx(4, 4)], 2);
        assert_eq!(state.board.iter().filter(|&&c| c != 0).count(), 4);
        assert!(!state.is_game_over);
        assert!(!state.is_pass);
        assert!(state.flipped.is_empty());
        assert_eq!(game.get_legal_moves().len(), 4);
    }

    #[test]
    fn off_board_coordinates_are_never_valid() {
        let game = GameInstance::new();

        assert!(!game.is_valid_move(8, 0));
        assert!(!game.is_valid_move(0, 8));
        assert!(!game.is_valid_move(8, 8));
        assert!(!game.is_valid_move(u8::MAX, u8::MAX));
    }

    #[test]
    fn opening_move_flips_one_stone_and_hands_the_turn_to_light() {
        let mut game = GameInstance::new();

        assert!(game.is_valid_move(2, 3));
        assert!(game.place_piece(2, 3));

        let state = game.to_game_state();
        assert_eq!(state.board[idx(2, 3)], 1);
        assert_eq!(state.board[idx(3, 3)], 1);
        assert_eq!(state.current_player, Player::Light.code());
        assert_eq!(state.flipped, vec![idx(3, 3) as u8]);
        assert_eq!(game.score(Player::Dark), 4);
        assert_eq!(game.score(Player::Light), 1);
    }

    #[test]
    fn occupancy_grows_by_exactly_one_per_placement() {
        let mut game = GameInstance::new();

        for n in 1..=10 {
            let mv = game.get_legal_moves()[0];
            assert!(game.place_piece(mv.row, mv.col));

            let occupied = game.score(Player::Dark) as usize + game.score(Player::Light) as usize;
            assert_eq!(occupied, 4 + n);
        }
    }

    #[test]
    fn rejected_placement_leaves_state_untouched() {
        let mut game = GameInstance::new();
        let before = game.to_game_state();

        assert!(!game.place_piece(0, 0)); // no capturing direction
        assert!(!game.place_piece(3, 3)); // occupied
        assert!(!game.place_piece(9, 1)); // off board

        assert_eq!(game.to_game_state(), before);
        assert_eq!(game.active_player(), Player::Dark);
    }

    #[test]
    fn pass_switches_turn_and_clears_flip_list() {
        let mut game = GameInstance::new();
        assert!(game.place_piece(2, 3));
        assert!(!game.to_game_state().flipped.is_empty());

        game.pass();

        let state = game.to_game_state();
        assert_eq!(state.current_player, Player::Dark.code());
        assert!(state.is_pass);
        assert!(state.flipped.is_empty());
    }

    #[test]
    fn easy_ai_takes_first_legal_square_in_scan_order() {
        let mut game = GameInstance::new();
        // (0,0) flips one stone, (1,0) would flip two.
        let dark = bit(0, 1) | bit(2, 0) | bit(3, 0);
        let light = bit(0, 2) | bit(4, 0);
        game.set_board_for_test(Board::from_bitboards(dark, light), Player::Light);

        assert!(game.ai_move(Difficulty::Easy));

        let state = game.to_game_state();
        assert_eq!(state.board[idx(0, 0)], 2);
        assert_eq!(state.board[idx(0, 1)], 2);
        assert_eq!(state.board[idx(1, 0)], 0);
    }

    #[test]
    fn hard_ai_takes_greatest_capture() {
        let mut game = GameInstance::new();
        let dark = bit(0, 1) | bit(2, 0) | bit(3, 0);
        let light = bit(0, 2) | bit(4, 0);
        game.set_board_for_test(Board::from_bitboards(dark, light), Player::Light);

        assert!(game.ai_move(Difficulty::Hard));

        let state = game.to_game_state();
        assert_eq!(state.board[idx(1, 0)], 2);
        assert_eq!(state.board[idx(2, 0)], 2);
        assert_eq!(state.board[idx(3, 0)], 2);
        assert_eq!(state.flipped, vec![idx(2, 0) as u8, idx(3, 0) as u8]);
    }

    #[test]
    fn hard_ai_tie_breaks_to_first_row_major_square() {
        let mut game = GameInstance::new();
        // Both legal squares flip exactly one stone.
        let dark = bit(0, 1) | bit(5, 1);
        let light = bit(0, 2) | bit(5, 2);
        game.set_board_for_test(Board::from_bitboards(dark, light), Player::Light);

        assert!(game.ai_move(Difficulty::Hard));

        assert_eq!(game.to_game_state().board[idx(0, 0)], 2);
    }

    #[test]
    fn successful_ai_move_hands_the_turn_to_dark() {
        let mut game = GameInstance::new();
        assert!(game.place_piece(2, 3));
        assert_eq!(game.active_player(), Player::Light);

        assert!(game.ai_move(Difficulty::Hard));

        assert_eq!(game.active_player(), Player::Dark);
    }

    #[test]
    fn ai_move_without_legal_squares_reports_failure_and_changes_nothing() {
        let mut game = GameInstance::new();
        game.set_board_for_test(Board::from_bitboards(bit(0, 0), 0), Player::Light);
        let before = game.to_game_state();

        assert!(!game.ai_move(Difficulty::Easy));
        assert!(!game.ai_move(Difficulty::Hard));

        assert_eq!(game.to_game_state(), before);
    }

    #[test]
    fn moveless_board_is_terminal_regardless_of_occupancy() {
        let mut game = GameInstance::new();
        // A lone dark stone: nobody can capture anything.
        game.set_board_for_test(Board::from_bitboards(bit(0, 0), 0), Player::Dark);

        assert!(!game.has_valid_move(Player::Dark));
        assert!(!game.has_valid_move(Player::Light));
        assert!(game.is_game_over());
    }

    #[test]
    fn game_result_resolves_winner_by_strict_score_comparison() {
        let mut game = GameInstance::new();

        game.set_board_for_test(
            Board::from_bitboards(bit(0, 0) | bit(0, 1), bit(7, 7)),
            Player::Dark,
        );
        assert_eq!(game.to_game_result().winner, Player::Dark.code());

        game.set_board_for_test(Board::from_bitboards(bit(0, 0), bit(7, 7)), Player::Dark);
        let result = game.to_game_result();
        assert_eq!(result.winner, 0);
        assert_eq!((result.dark_count, result.light_count), (1, 1));
    }
}
