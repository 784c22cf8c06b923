//! Connect Four rules engine
//!
//! This module defines the board representation shared by every search
//! strategy: legal-move enumeration, move application, win detection and
//! partial-run counting used by the heuristic evaluator.
//!
//! Row 0 is the bottom row. Pieces always rest on top of each other, so the
//! occupied cells of a column form a contiguous block starting at row 0.

use std::fmt;
use std::str::FromStr;

use crate::{Result, SearchError};

/// Number of rows on the board
pub const ROWS: usize = 6;

/// Number of columns on the board
pub const COLS: usize = 7;

/// Length of a winning line
pub const CONNECT: usize = 4;

/// Row/column steps of the four line axes: vertical, horizontal and both diagonals
const AXES: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

const FRAME: &str = "|=============|";
const LABELS: &str = "|0 1 2 3 4 5 6|";

/// One of the two players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Moves first, printed as `X`
    One,
    /// Moves second, printed as `O`
    Two,
}

impl Player {
    /// Returns the opponent of this player
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    fn symbol(self) -> char {
        match self {
            Player::One => 'X',
            Player::Two => 'O',
        }
    }
}

/// A move: the column a piece is dropped into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move {
    /// Column to drop the piece into (0-6)
    pub column: usize,
}

impl Move {
    /// Creates a move for the given column
    pub fn new(column: usize) -> Self {
        Move { column }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)
    }
}

/// State of the game after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given player has connected four
    Win(Player),
    /// The board is full without a winner
    Draw,
    /// Play continues
    InProgress,
}

/// A 6x7 Connect Four board
///
/// Boards are small `Copy` values. Applying a move never modifies the
/// original board; it returns a new one, so search branches can never alias
/// each other's positions.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Player>; COLS]; ROWS],
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Board {
            cells: [[None; COLS]; ROWS],
        }
    }

    /// Plays a sequence of columns alternately, starting with `Player::One`
    ///
    /// ```
    /// use connect4_search::board::{Board, Player};
    ///
    /// let board = Board::from_moves(&[3, 3, 4]).unwrap();
    /// assert_eq!(board.get(0, 3), Some(Player::One));
    /// assert_eq!(board.get(1, 3), Some(Player::Two));
    /// assert_eq!(board.get(0, 4), Some(Player::One));
    /// ```
    pub fn from_moves(columns: &[usize]) -> Result<Self> {
        let mut board = Board::new();
        let mut player = Player::One;
        for &column in columns {
            board = board.apply_move(Move::new(column), player)?;
            player = player.other();
        }
        Ok(board)
    }

    /// Returns the piece at the given cell, `None` if empty or off the board
    pub fn get(&self, row: usize, column: usize) -> Option<Player> {
        if row >= ROWS || column >= COLS {
            return None;
        }
        self.cells[row][column]
    }

    /// Returns the row a piece dropped into `column` would land in
    pub fn landing_row(&self, column: usize) -> Option<usize> {
        if column >= COLS {
            return None;
        }
        (0..ROWS).find(|&row| self.cells[row][column].is_none())
    }

    /// Checks whether a move is legal (column in range and not full)
    pub fn is_legal(&self, action: Move) -> bool {
        action.column < COLS && self.cells[ROWS - 1][action.column].is_none()
    }

    /// Returns every legal move in ascending column order
    pub fn legal_moves(&self) -> Vec<Move> {
        (0..COLS)
            .map(Move::new)
            .filter(|&action| self.is_legal(action))
            .collect()
    }

    /// Returns true if no legal move remains
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|column| self.cells[ROWS - 1][column].is_some())
    }

    /// Returns the number of pieces on the board
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    /// Drops a piece for `player` into the lowest empty row of the move's column
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidMove`] if the column is full or out of
    /// range. Search code only ever applies moves taken from
    /// [`legal_moves`](Self::legal_moves), so hitting this is a caller bug.
    pub fn apply_move(&self, action: Move, player: Player) -> Result<Board> {
        let row = self
            .landing_row(action.column)
            .ok_or(SearchError::InvalidMove {
                column: action.column,
            })?;

        let mut next = *self;
        next.cells[row][action.column] = Some(player);
        Ok(next)
    }

    /// Locates the piece `player` just dropped into the move's column
    ///
    /// This is the highest cell of the column occupied by `player`.
    fn last_played_cell(&self, player: Player, last_move: Move) -> Option<(usize, usize)> {
        if last_move.column >= COLS {
            return None;
        }
        (0..ROWS)
            .rev()
            .find(|&row| self.cells[row][last_move.column] == Some(player))
            .map(|row| (row, last_move.column))
    }

    /// Offsets a cell by `steps` along an axis, `None` if it leaves the board
    fn offset(
        row: usize,
        column: usize,
        axis: (isize, isize),
        steps: isize,
    ) -> Option<(usize, usize)> {
        let r = row as isize + axis.0 * steps;
        let c = column as isize + axis.1 * steps;
        if (0..ROWS as isize).contains(&r) && (0..COLS as isize).contains(&c) {
            Some((r as usize, c as usize))
        } else {
            None
        }
    }

    /// Counts consecutive `player` cells walking away from a cell in one direction
    fn run_length(
        &self,
        player: Player,
        origin: (usize, usize),
        axis: (isize, isize),
        direction: isize,
    ) -> usize {
        let mut length = 0;
        let mut steps = direction;
        while let Some((r, c)) = Self::offset(origin.0, origin.1, axis, steps) {
            if self.cells[r][c] != Some(player) {
                break;
            }
            length += 1;
            steps += direction;
        }
        length
    }

    /// Returns true if the piece `player` just played in `last_move` completes
    /// a line of four or more along any axis
    ///
    /// Each axis is scanned outward in both directions from the played piece,
    /// so the piece may sit anywhere within the line.
    pub fn is_win(&self, player: Player, last_move: Move) -> bool {
        let Some(origin) = self.last_played_cell(player, last_move) else {
            return false;
        };

        AXES.iter().any(|&axis| {
            1 + self.run_length(player, origin, axis, -1) + self.run_length(player, origin, axis, 1)
                >= CONNECT
        })
    }

    /// Counts open partial lines through the piece `player` just played
    ///
    /// Every window of four consecutive cells that contains the played piece
    /// is examined on each of the four axes. A window counts when it holds
    /// exactly `k` of the player's pieces and `4 - k` empty cells, i.e. it can
    /// still be completed into a win. Axes are counted independently.
    pub fn count_partial_runs(&self, player: Player, last_move: Move, k: usize) -> usize {
        let Some(origin) = self.last_played_cell(player, last_move) else {
            return 0;
        };

        let mut count = 0;
        for &axis in &AXES {
            // Window start offsets so that the played cell lies inside the window
            for start in -(CONNECT as isize - 1)..=0 {
                let mut own = 0;
                let mut empty = 0;
                let mut valid = true;

                for step in start..start + CONNECT as isize {
                    match Self::offset(origin.0, origin.1, axis, step) {
                        Some((r, c)) => match self.cells[r][c] {
                            Some(p) if p == player => own += 1,
                            None => empty += 1,
                            Some(_) => {
                                valid = false;
                                break;
                            }
                        },
                        None => {
                            valid = false;
                            break;
                        }
                    }
                }

                if valid && own == k && empty == CONNECT - k {
                    count += 1;
                }
            }
        }
        count
    }

    /// Returns the game outcome after `player` played `last_move`
    pub fn outcome(&self, player: Player, last_move: Move) -> Outcome {
        if self.is_win(player, last_move) {
            Outcome::Win(player)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", FRAME)?;
        for row in (0..ROWS).rev() {
            let line: Vec<String> = self.cells[row]
                .iter()
                .map(|cell| cell.map_or(' ', Player::symbol).to_string())
                .collect();
            writeln!(f, "|{}|", line.join(" "))?;
        }
        writeln!(f, "{}", FRAME)?;
        write!(f, "{}", LABELS)
    }
}

impl FromStr for Board {
    type Err = SearchError;

    /// Parses the text produced by the `Display` implementation
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty() && *line != FRAME && *line != LABELS)
            .collect();

        if rows.len() != ROWS {
            return Err(SearchError::InvalidBoard(format!(
                "expected {} rows, found {}",
                ROWS,
                rows.len()
            )));
        }

        let mut board = Board::new();
        for (i, line) in rows.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != 2 * COLS + 1 || chars[0] != '|' || chars[2 * COLS] != '|' {
                return Err(SearchError::InvalidBoard(format!("malformed row: {:?}", line)));
            }

            let row = ROWS - 1 - i;
            for column in 0..COLS {
                board.cells[row][column] = match chars[1 + 2 * column] {
                    'X' => Some(Player::One),
                    'O' => Some(Player::Two),
                    ' ' => None,
                    other => {
                        return Err(SearchError::InvalidBoard(format!(
                            "unknown cell marker {:?}",
                            other
                        )))
                    }
                };
            }
        }

        for column in 0..COLS {
            let height = board.landing_row(column).unwrap_or(ROWS);
            if (height..ROWS).any(|row| board.cells[row][column].is_some()) {
                return Err(SearchError::InvalidBoard(format!(
                    "floating piece in column {}",
                    column
                )));
            }
        }

        Ok(board)
    }
}
