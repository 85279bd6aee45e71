//! Board model: a fixed grid of cards and their revealed flags
//!
//! Built once at setup from a value pool (each value placed twice),
//! never reshaped afterwards. No timing lives here.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::ConfigError;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Card art orientation, applied as a quarter-turn rotation of the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Counter-clockwise quarter turns (0, 90, 180, 270 degrees)
    pub fn quarter_turns(self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }
}

/// A card: its pairing value and how its art is turned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub value: u8,
    pub orientation: Orientation,
}

/// The card grid
#[derive(Debug, Clone)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Row-major
    cards: Vec<Card>,
    revealed: Vec<bool>,
}

impl Board {
    /// Check that `rows x cols` holds exactly two of every pool value
    pub fn check_pool(rows: usize, cols: usize, values: &[u8]) -> Result<(), ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError::EmptyGrid);
        }
        let cells = rows * cols;
        let needed = values.len() * 2;
        if cells != needed {
            return Err(ConfigError::GridMismatch {
                rows,
                cols,
                cells,
                values: values.len(),
                needed,
            });
        }
        let mut seen = std::collections::BTreeSet::new();
        for &value in values {
            if !seen.insert(value) {
                return Err(ConfigError::DuplicateValue(value));
            }
        }
        Ok(())
    }

    /// Pair every value, pick a random orientation per card and shuffle placement
    pub fn setup<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        values: &[u8],
        rng: &mut R,
    ) -> Result<Self, ConfigError> {
        Self::check_pool(rows, cols, values)?;

        let mut pairs: Vec<u8> = values.iter().flat_map(|&v| [v, v]).collect();
        pairs.shuffle(rng);

        let cards = pairs
            .into_iter()
            .map(|value| Card {
                value,
                orientation: Orientation::ALL[rng.random_range(0..Orientation::ALL.len())],
            })
            .collect();

        Ok(Self::from_cards(rows, cols, cards))
    }

    /// Build a board from an explicit row-major layout (all hidden)
    pub(crate) fn from_cards(rows: usize, cols: usize, cards: Vec<Card>) -> Self {
        debug_assert_eq!(cards.len(), rows * cols);
        Self {
            rows,
            cols,
            revealed: vec![false; cards.len()],
            cards,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Row-major slot of a cell, None when off the grid
    #[inline]
    pub fn index(&self, cell: Cell) -> Option<usize> {
        (cell.row < self.rows && cell.col < self.cols).then(|| cell.row * self.cols + cell.col)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        self.index(cell).is_some()
    }

    /// All cells in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    pub fn card_at(&self, cell: Cell) -> Option<&Card> {
        self.index(cell).map(|i| &self.cards[i])
    }

    pub fn value_at(&self, cell: Cell) -> Option<u8> {
        self.card_at(cell).map(|c| c.value)
    }

    pub fn is_revealed(&self, cell: Cell) -> bool {
        self.index(cell).is_some_and(|i| self.revealed[i])
    }

    /// Set a cell face-up/face-down (no-op off the grid)
    pub fn set_revealed(&mut self, cell: Cell, revealed: bool) {
        if let Some(i) = self.index(cell) {
            self.revealed[i] = revealed;
        }
    }

    /// True iff every cell is face-up
    pub fn all_revealed(&self) -> bool {
        self.revealed.iter().all(|&r| r)
    }

    /// Number of face-up cells
    pub fn revealed_count(&self) -> usize {
        self.revealed.iter().filter(|&&r| r).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn count_values(board: &Board) -> std::collections::BTreeMap<u8, usize> {
        let mut counts = std::collections::BTreeMap::new();
        for cell in board.cells() {
            *counts.entry(board.value_at(cell).unwrap()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn test_setup_places_every_value_twice() {
        let mut rng = Pcg32::seed_from_u64(12345);
        let values = crate::default_value_pool();
        let board = Board::setup(4, 5, &values, &mut rng).unwrap();

        assert_eq!(board.len(), 20);
        let counts = count_values(&board);
        assert_eq!(counts.len(), 10);
        assert!(counts.values().all(|&n| n == 2));
        assert!(!board.all_revealed());
        assert_eq!(board.revealed_count(), 0);
    }

    #[test]
    fn test_setup_rejects_bad_pool() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(
            Board::setup(4, 5, &[1, 2, 3], &mut rng),
            Err(ConfigError::GridMismatch { cells: 20, needed: 6, .. })
        ));
        assert_eq!(
            Board::setup(2, 2, &[4, 4], &mut rng).unwrap_err(),
            ConfigError::DuplicateValue(4)
        );
        assert_eq!(
            Board::setup(0, 5, &[], &mut rng).unwrap_err(),
            ConfigError::EmptyGrid
        );
    }

    #[test]
    fn test_same_seed_same_board() {
        let values = crate::default_value_pool();
        let a = Board::setup(4, 5, &values, &mut Pcg32::seed_from_u64(99)).unwrap();
        let b = Board::setup(4, 5, &values, &mut Pcg32::seed_from_u64(99)).unwrap();
        assert_eq!(a.cards, b.cards);
    }

    #[test]
    fn test_reveal_and_all_revealed() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut board = Board::setup(1, 2, &[5], &mut rng).unwrap();
        let (a, b) = (Cell::new(0, 0), Cell::new(0, 1));

        board.set_revealed(a, true);
        assert!(board.is_revealed(a));
        assert!(!board.all_revealed());

        board.set_revealed(b, true);
        assert!(board.all_revealed());

        board.set_revealed(a, false);
        assert!(!board.all_revealed());
    }

    #[test]
    fn test_off_grid_access() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut board = Board::setup(4, 5, &crate::default_value_pool(), &mut rng).unwrap();
        let outside = Cell::new(4, 0);
        assert!(!board.contains(outside));
        assert_eq!(board.value_at(outside), None);
        assert!(!board.is_revealed(outside));
        board.set_revealed(outside, true);
        assert_eq!(board.revealed_count(), 0);
        assert!(!board.contains(Cell::new(0, 5)));
    }

    #[test]
    fn test_cells_row_major() {
        let board = Board::from_cards(
            2,
            2,
            vec![
                Card { value: 1, orientation: Orientation::Up },
                Card { value: 2, orientation: Orientation::Up },
                Card { value: 1, orientation: Orientation::Up },
                Card { value: 2, orientation: Orientation::Up },
            ],
        );
        let cells: Vec<_> = board.cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
        assert_eq!(board.value_at(Cell::new(1, 1)), Some(2));
    }

    proptest! {
        #[test]
        fn prop_pair_invariant(seed in any::<u64>(), pairs in 1usize..16) {
            let values: Vec<u8> = (1..=pairs as u8).collect();
            let board = Board::setup(2, pairs, &values, &mut Pcg32::seed_from_u64(seed)).unwrap();
            prop_assert_eq!(board.len(), 2 * values.len());
            let counts = count_values(&board);
            prop_assert_eq!(counts.len(), values.len());
            prop_assert!(counts.values().all(|&n| n == 2));
        }
    }
}
