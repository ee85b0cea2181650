//! This module contains the logic for generating full Sudoku grids.
//!
//! Generation starts by seeding the diagonal blocks of a blank grid with
//! random permutations of the alphabet. Diagonal blocks never share a row or
//! column with each other, so the seeds cannot conflict. The remaining cells
//! are then filled one by one: each visited cell receives a random token from
//! its cached candidate list, and a cell whose candidates are exhausted sends
//! the search back to the previously visited cell. A stalled attempt is
//! abandoned after a fixed number of steps and the whole process restarts
//! from a fresh blank grid.

use crate::SudokuGrid;
use crate::cache::CandidateCache;
use crate::error::SudokuResult;

use rand::Rng;
use rand::rngs::ThreadRng;

/// The maximum number of fill and backtrack steps permitted within one
/// attempt before it is abandoned and a fresh attempt is started.
const STEP_LIMIT: usize = 10_000;

pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..(len - 1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

/// Computes the next cell after the given position in the traversal order of
/// the fill search: columns advance first, then rows, and cells inside
/// diagonal blocks are skipped. Returns `None` if no open slot remains, i.e.
/// the traversal has run past the bottom-right corner of the grid.
pub(crate) fn next_slot(grid: &SudokuGrid, column: usize, row: usize)
        -> Option<(usize, usize)> {
    let size = grid.size();
    let (mut column, mut row) = (column, row);

    loop {
        if column + 1 == size {
            if row + 1 == size {
                return None;
            }

            column = 0;
            row += 1;
        }
        else {
            column += 1;
        }

        if !grid.in_diagonal_block(column, row) {
            return Some((column, row));
        }
    }
}

/// Computes the cell before the given position in the traversal order of the
/// fill search. This is the exact inverse of [next_slot] over that order.
/// Returns `None` if no open slot precedes the position, i.e. the traversal
/// has run past the top-left corner of the grid.
pub(crate) fn previous_slot(grid: &SudokuGrid, column: usize, row: usize)
        -> Option<(usize, usize)> {
    let size = grid.size();
    let (mut column, mut row) = (column, row);

    loop {
        if column == 0 {
            if row == 0 {
                return None;
            }

            column = size - 1;
            row -= 1;
        }
        else {
            column -= 1;
        }

        if !grid.in_diagonal_block(column, row) {
            return Some((column, row));
        }
    }
}

/// The owned state of one generation attempt: a blank grid, an empty
/// candidate cache, and a zeroed step counter. Restarting constructs a fresh
/// `Attempt` instead of resetting shared state in place.
struct Attempt {
    grid: SudokuGrid,
    cache: CandidateCache,
    steps: usize
}

impl Attempt {
    fn new(block_size: usize) -> SudokuResult<Attempt> {
        Ok(Attempt {
            grid: SudokuGrid::new(block_size)?,
            cache: CandidateCache::new(),
            steps: 0
        })
    }
}

/// The ways in which one fill attempt can end.
enum FillOutcome {

    /// The forward traversal ran past the last open slot, meaning every cell
    /// of the grid is filled.
    Complete,

    /// The attempt exceeded [STEP_LIMIT] steps without completing the grid.
    Stalled,

    /// The backward traversal ran past the first open slot, meaning no grid
    /// can be completed from the current diagonal seeds. In practice the
    /// step limit is usually hit first.
    Exhausted
}

/// A generator randomly generates a full [SudokuGrid], that is, a grid with
/// no blank cells in which every row, column, and block contains each
/// alphabet token exactly once. It uses a random number generator to decide
/// the content. For most cases, sensible defaults are provided by
/// [Generator::new_default].
pub struct Generator<R: Rng> {
    rng: R
}

impl Generator<ThreadRng> {

    /// Creates a new generator that uses a [ThreadRng] to generate the random
    /// tokens.
    pub fn new_default() -> Generator<ThreadRng> {
        Generator::new(rand::thread_rng())
    }
}

impl<R: Rng> Generator<R> {

    /// Creates a new generator that uses the given random number generator to
    /// generate random tokens.
    pub fn new(rng: R) -> Generator<R> {
        Generator {
            rng
        }
    }

    /// Generates a new random [SudokuGrid] with the given block size. The
    /// returned grid is always complete: every cell holds a token and every
    /// row, column, and block contains each alphabet token exactly once.
    ///
    /// Generation is eager and runs as many internal attempts as necessary.
    /// Termination is probabilistic rather than formally guaranteed, since a
    /// stalled attempt is simply retried with fresh random seeds; in practice
    /// the re-randomization on every attempt makes completion fast. Callers
    /// that need bounded latency should impose an external ceiling.
    ///
    /// # Arguments
    ///
    /// * `block_size`: The dimension of one sub-block of the grid. For an
    /// ordinary Sudoku grid, this is 3. Must be in the range
    /// `[1, MAX_BLOCK_SIZE]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidBlockSize` If `block_size` is zero.
    /// * `SudokuError::BlockSizeTooLarge` If `block_size` is greater than
    /// [MAX_BLOCK_SIZE](crate::MAX_BLOCK_SIZE). This is checked before any
    /// grid work begins.
    pub fn generate(&mut self, block_size: usize)
            -> SudokuResult<SudokuGrid> {
        loop {
            let mut attempt = Attempt::new(block_size)?;
            self.seed_diagonal_blocks(&mut attempt.grid);

            if let FillOutcome::Complete = self.fill(&mut attempt) {
                return Ok(attempt.grid);
            }
        }
    }

    fn seed_diagonal_blocks(&mut self, grid: &mut SudokuGrid) {
        for i in 0..grid.block_size() {
            let tokens = shuffle(&mut self.rng, grid.tokens().iter().copied());
            grid.set_block(i, i, &tokens).unwrap();
        }
    }

    fn fill(&mut self, attempt: &mut Attempt) -> FillOutcome {
        let mut slot = match next_slot(&attempt.grid, 0, 0) {
            Some(slot) => slot,

            // every cell lies in a diagonal block, seeding filled the grid
            None => return FillOutcome::Complete
        };

        loop {
            let (column, row) = slot;
            let advanced = self.fill_slot(attempt, column, row);
            let neighbour = if advanced {
                next_slot(&attempt.grid, column, row)
            }
            else {
                previous_slot(&attempt.grid, column, row)
            };

            attempt.steps += 1;

            match neighbour {
                Some(next) => {
                    if attempt.steps > STEP_LIMIT {
                        return FillOutcome::Stalled;
                    }

                    slot = next;
                },
                None =>
                    return if advanced {
                        FillOutcome::Complete
                    }
                    else {
                        FillOutcome::Exhausted
                    }
            }
        }
    }

    /// Attempts to fill the slot at the given position with a random token
    /// from its candidate list, computing and caching that list if the slot
    /// is visited for the first time. Returns `true` if a token was placed
    /// and `false` if the slot's candidates are exhausted, in which case the
    /// slot is cleared and its cache entry discarded.
    fn fill_slot(&mut self, attempt: &mut Attempt, column: usize, row: usize)
            -> bool {
        if !attempt.cache.contains(column, row) {
            let fresh = attempt.grid.available_tokens(column, row).unwrap();
            attempt.cache.insert(column, row, fresh);
        }

        let candidates = attempt.cache.candidates_mut(column, row).unwrap();

        if candidates.is_empty() {
            // this slot was visited last, so its entry is the most recent one
            attempt.cache.pop_most_recent();
            attempt.grid.clear_cell(column, row).unwrap();
            false
        }
        else {
            let chosen = self.rng.gen_range(0..candidates.len());
            let token = candidates.swap_remove(chosen);
            attempt.grid.set_cell(column, row, token).unwrap();
            true
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    use crate::error::SudokuError;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn shuffling_uniformly_distributed() {
        // 18000 experiments, 6 options (3!), so if uniformly distributed:
        // p = 1/6, my = 3000, sigma = sqrt(18000 * 1/6 * 5/6) = 50
        // with a probability of the amount being in the range [2600, 3400]
        // is more than 99,9999999999999 %.

        let mut counts = [0; 6];
        let mut rng = rand::thread_rng();

        for _ in 0..18000 {
            let result = shuffle(&mut rng, "ABC".chars());

            if result == vec!['A', 'B', 'C'] {
                counts[0] += 1;
            }
            else if result == vec!['A', 'C', 'B'] {
                counts[1] += 1;
            }
            else if result == vec!['B', 'A', 'C'] {
                counts[2] += 1;
            }
            else if result == vec!['B', 'C', 'A'] {
                counts[3] += 1;
            }
            else if result == vec!['C', 'A', 'B'] {
                counts[4] += 1;
            }
            else if result == vec!['C', 'B', 'A'] {
                counts[5] += 1;
            }
        }

        for count in counts.iter() {
            assert!(*count >= 2600 && *count <= 3400,
                "Count is not in range [2600, 3400].");
        }
    }

    fn forward_slots(grid: &SudokuGrid) -> Vec<(usize, usize)> {
        let mut slots = Vec::new();
        let mut slot = next_slot(grid, 0, 0);

        while let Some((column, row)) = slot {
            slots.push((column, row));
            slot = next_slot(grid, column, row);
        }

        slots
    }

    #[test]
    fn forward_traversal_visits_every_open_slot_once() {
        let grid = SudokuGrid::new(2).unwrap();
        let expected = vec![
            (2, 0), (3, 0),
            (2, 1), (3, 1),
            (0, 2), (1, 2),
            (0, 3), (1, 3)
        ];
        assert_eq!(expected, forward_slots(&grid));

        let grid = SudokuGrid::new(3).unwrap();
        let slots = forward_slots(&grid);

        // 81 cells minus three seeded 3x3 blocks
        assert_eq!(54, slots.len());

        for &(column, row) in &slots {
            assert!(!grid.in_diagonal_block(column, row));
        }

        let mut deduped = slots.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(54, deduped.len());
    }

    #[test]
    fn traversal_directions_are_inverses() {
        let grid = SudokuGrid::new(3).unwrap();
        let slots = forward_slots(&grid);

        for window in slots.windows(2) {
            let (previous_column, previous_row) = window[0];
            let (column, row) = window[1];

            assert_eq!(Some((previous_column, previous_row)),
                previous_slot(&grid, column, row));
            assert_eq!(Some((column, row)),
                next_slot(&grid, previous_column, previous_row));
        }
    }

    #[test]
    fn traversal_signals_boundaries() {
        let grid = SudokuGrid::new(2).unwrap();

        // (2, 0) is the first open slot, (1, 3) the last
        assert_eq!(None, previous_slot(&grid, 2, 0));
        assert_eq!(None, next_slot(&grid, 1, 3));
    }

    #[test]
    fn one_by_one_grid_has_no_open_slots() {
        let grid = SudokuGrid::new(1).unwrap();
        assert_eq!(None, next_slot(&grid, 0, 0));
    }

    fn assert_no_duplicates(values: Vec<Option<char>>) {
        let tokens: Vec<char> = values.into_iter().flatten().collect();
        let mut deduped = tokens.clone();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), tokens.len());
    }

    #[test]
    fn seeded_diagonal_blocks_are_complete_and_conflict_free() {
        let mut generator = Generator::new(ChaCha8Rng::seed_from_u64(17));
        let mut grid = SudokuGrid::new(3).unwrap();
        generator.seed_diagonal_blocks(&mut grid);

        for i in 0..grid.block_size() {
            let mut block: Vec<char> = grid.block(i, i).unwrap()
                .into_iter()
                .map(Option::unwrap)
                .collect();
            block.sort();
            assert_eq!(grid.tokens(), &block);
        }

        for row in 0..grid.size() {
            for column in 0..grid.size() {
                if !grid.in_diagonal_block(column, row) {
                    assert_eq!(None, grid.get_cell(column, row).unwrap());
                }
            }
        }

        // diagonal blocks pairwise share no row or column, so seeding alone
        // must leave every row and column free of duplicates
        for i in 0..grid.size() {
            assert_no_duplicates(grid.row(i).unwrap());
            assert_no_duplicates(grid.column(i).unwrap());
        }
    }

    fn assert_group_complete(grid: &SudokuGrid, values: Vec<Option<char>>) {
        let mut tokens: Vec<char> = values.into_iter()
            .map(Option::unwrap)
            .collect();
        tokens.sort();
        assert_eq!(grid.tokens(), &tokens);
    }

    fn assert_valid_grid(grid: &SudokuGrid) {
        assert!(grid.is_full());

        for i in 0..grid.size() {
            assert_group_complete(grid, grid.row(i).unwrap());
            assert_group_complete(grid, grid.column(i).unwrap());
        }

        for block_column in 0..grid.block_size() {
            for block_row in 0..grid.block_size() {
                assert_group_complete(grid,
                    grid.block(block_column, block_row).unwrap());
            }
        }
    }

    #[test]
    fn trivial_grid_contains_the_single_token() {
        let mut generator = Generator::new_default();
        let grid = generator.generate(1).unwrap();

        assert_eq!(1, grid.size());
        assert_eq!(Some('A'), grid.get_cell(0, 0).unwrap());
        assert_valid_grid(&grid);
    }

    #[test]
    fn generated_four_by_four_grid_is_valid() {
        let mut generator = Generator::new_default();
        let grid = generator.generate(2).unwrap();

        assert_eq!(4, grid.size());
        assert_valid_grid(&grid);
    }

    #[test]
    fn generated_nine_by_nine_grid_is_valid() {
        let mut generator = Generator::new_default();
        let grid = generator.generate(3).unwrap();

        assert_eq!(9, grid.size());
        assert_valid_grid(&grid);
    }

    #[test]
    fn generation_rejects_invalid_block_sizes() {
        let mut generator = Generator::new_default();

        assert_eq!(Err(SudokuError::InvalidBlockSize), generator.generate(0));
        assert_eq!(Err(SudokuError::BlockSizeTooLarge),
            generator.generate(17));
    }

    #[test]
    fn repeated_generation_is_always_valid() {
        let mut generator = Generator::new_default();

        for _ in 0..30 {
            assert_valid_grid(&generator.generate(2).unwrap());
        }

        for _ in 0..10 {
            assert_valid_grid(&generator.generate(3).unwrap());
        }
    }

    #[test]
    fn equal_seeds_yield_equal_grids() {
        let mut first = Generator::new(ChaCha8Rng::seed_from_u64(42));
        let mut second = Generator::new(ChaCha8Rng::seed_from_u64(42));

        assert_eq!(first.generate(3).unwrap(), second.generate(3).unwrap());
    }
}
