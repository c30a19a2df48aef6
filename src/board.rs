use crate::types::Player;

const BOARD_SIZE: usize = 8;
const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Reversi board state represented by two bitboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    dark: u64,
    light: u64,
}

impl Board {
    /// Creates the initial board:
    /// d4=light, e4=dark, d5=dark, e5=light.
    pub fn new() -> Self {
        Self {
            dark: bit(28) | bit(35),
            light: bit(27) | bit(36),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_bitboards(dark: u64, light: u64) -> Self {
        Self { dark, light }
    }

    /// Returns legal move mask for the given player.
    pub fn legal_moves(&self, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        let occupied = me | opp;
        let mut legal = 0u64;

        for pos in 0..NUM_SQUARES {
            let move_bit = bit(pos);
            if (occupied & move_bit) != 0 {
                continue;
            }
            if scan_flips(pos, me, opp) != 0 {
                legal |= move_bit;
            }
        }

        legal
    }

    /// Returns the mask of stones `player` would capture by playing `pos`,
    /// without touching the board. Zero means the move is illegal.
    pub fn flips_for(&self, pos: usize, player: Player) -> u64 {
        let (me, opp) = self.sides(player);
        scan_flips(pos, me, opp)
    }

    /// Places one stone and flips captured stones.
    /// Returns flipped bit mask. Returns 0 and leaves the board
    /// unchanged when the move is illegal.
    pub fn place(&mut self, pos: usize, player: Player) -> u64 {
        let (me, opp) = self.sides(player);

        let flips = scan_flips(pos, me, opp);
        if flips == 0 {
            return 0;
        }

        let move_bit = bit(pos);
        let next_me = me | move_bit | flips;
        let next_opp = opp & !flips;

        match player {
            Player::Dark => {
                self.dark = next_me;
                self.light = next_opp;
            }
            Player::Light => {
                self.light = next_me;
                self.dark = next_opp;
            }
        }

        flips
    }

    /// Returns `(dark_count, light_count)`.
    pub fn count(&self) -> (u8, u8) {
        (self.dark.count_ones() as u8, self.light.count_ones() as u8)
    }

    /// Converts board to `[u8; 64]` where 0=empty, 1=dark, 2=light.
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut board = [0u8; NUM_SQUARES];
        for (pos, cell) in board.iter_mut().enumerate() {
            let square = bit(pos);
            *cell = if (self.dark & square) != 0 {
                1
            } else if (self.light & square) != 0 {
                2
            } else {
                0
            };
        }
        board
    }

    fn sides(&self, player: Player) -> (u64, u64) {
        match player {
            Player::Dark => (self.dark, self.light),
            Player::Light => (self.light, self.dark),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Directional scan shared by validation, flipping and the AI's capture
/// count: for each of the 8 directions, a contiguous opponent run anchored
/// by an own stone is captured. Edge or empty square breaks the direction.
fn scan_flips(pos: usize, me: u64, opp: u64) -> u64 {
    if pos >= NUM_SQUARES {
        return 0;
    }

    let move_bit = bit(pos);
    if ((me | opp) & move_bit) != 0 {
        return 0;
    }

    let (row, col) = pos_to_row_col(pos);
    let mut flips = 0u64;

    for (dr, dc) in DIRECTIONS {
        let mut r = row + dr;
        let mut c = col + dc;
        let mut line = 0u64;
        let mut has_opponent = false;

        while in_bounds(r, c) {
            let square = bit((r as usize) * BOARD_SIZE + c as usize);
            if (opp & square) != 0 {
                has_opponent = true;
                line |= square;
            } else if (me & square) != 0 {
                if has_opponent {
                    flips |= line;
                }
                break;
            } else {
                break;
            }

            r += dr;
            c += dc;
        }
    }

    flips
}

fn bit(pos: usize) -> u64 {
    if pos < NUM_SQUARES { 1u64 << pos } else { 0 }
}

fn pos_to_row_col(pos: usize) -> (i32, i32) {
    ((pos / BOARD_SIZE) as i32, (pos % BOARD_SIZE) as i32)
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}
