// Code lints

#![warn(trivial_casts)]
#![warn(trivial_numeric_casts)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_lifetimes)]
#![warn(unused_qualifications)]

// Doc lints

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_codeblock_attributes)]

//! This crate implements an easy-to-understand Sudoku grid generator. It
//! supports the following key features:
//!
//! * Generating complete, conflict-free Sudoku grids of configurable block
//! size using randomized backtracking with memoized candidate sets
//! * Inspecting the generated grid cell by cell, or by row, column, and block
//! * Pretty-printing and serializing grids
//!
//! Grids are square and divided into `block_size × block_size` blocks, so the
//! total side length is `block_size²`. Cells hold tokens from an alphabet of
//! `block_size²` distinct characters starting at `'A'`, which keeps even a
//! 16x16-block grid (the maximum) within a fixed symbol space.
//!
//! # Generating grids
//!
//! The entry point is [Generator](generator::Generator), which owns a random
//! number generator and produces one finished grid per call. For most cases,
//! [Generator::new_default](generator::Generator::new_default) provides
//! sensible defaults.
//!
//! ```
//! use sudoku_forge::generator::Generator;
//!
//! // Generate an ordinary Sudoku grid with 3x3 blocks.
//! let mut generator = Generator::new_default();
//! let grid = generator.generate(3).unwrap();
//!
//! assert_eq!(9, grid.size());
//! assert!(grid.is_full());
//! println!("{}", grid);
//! ```
//!
//! # Inspecting grids
//!
//! A finished [SudokuGrid] guarantees that every row, column, and block
//! contains each alphabet token exactly once. The alphabet and the cells can
//! be queried directly.
//!
//! ```
//! use sudoku_forge::generator::Generator;
//!
//! let mut generator = Generator::new_default();
//! let grid = generator.generate(2).unwrap();
//!
//! assert_eq!(&vec!['A', 'B', 'C', 'D'], grid.tokens());
//!
//! let top_left_block = grid.block(0, 0).unwrap();
//! let mut tokens: Vec<char> =
//!     top_left_block.into_iter().map(Option::unwrap).collect();
//! tokens.sort();
//! assert_eq!(vec!['A', 'B', 'C', 'D'], tokens);
//! ```
//!
//! # Note regarding performance
//!
//! Generation is a randomized search with internal restarts, so its runtime
//! is probabilistic. It is strongly recommended to use at least
//! `opt-level = 2`, even in tests that generate grids.

pub mod cache;
pub mod error;
pub mod generator;

use error::{SudokuError, SudokuResult};

use serde::{Deserialize, Serialize};

use std::convert::TryFrom;
use std::fmt::{self, Display, Formatter};

/// The largest supported block size. The token alphabet of a grid with
/// `MAX_BLOCK_SIZE` blocks contains 256 distinct characters, which is the
/// entire symbol space reserved for tokens.
pub const MAX_BLOCK_SIZE: usize = 16;

/// The first character of every token alphabet. The alphabet of a grid of
/// size `n` consists of the `n` characters starting here.
const FIRST_TOKEN: char = 'A';

/// A Sudoku grid is composed of cells that are organized into square blocks
/// in a way that makes the entire grid a square. Consequently, the number of
/// blocks in a row is equal to the block size. Each cell may or may not be
/// occupied by a token of the grid's alphabet.
///
/// In ordinary Sudoku, the block size is 3, which yields a 9x9 grid divided
/// into nine 3x3 blocks:
///
/// ```text
/// ╔═══╤═══╤═══╦═══╤═══╤═══╦═══╤═══╤═══╗
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╠═══╪═══╪═══╬═══╪═══╪═══╬═══╪═══╪═══╣
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╟───┼───┼───╫───┼───┼───╫───┼───┼───╢
/// ║   │   │   ║   │   │   ║   │   │   ║
/// ╚═══╧═══╧═══╩═══╧═══╧═══╩═══╧═══╧═══╝
/// ```
///
/// The grid performs no Sudoku legality checks beyond bounds and alphabet
/// membership - ensuring that no token repeats within a row, column, or
/// block is the responsibility of the [Generator](crate::generator::Generator)
/// that fills it.
///
/// `SudokuGrid` implements `Display` and renders cells as their token
/// characters, so grids of any supported size can be displayed.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(into = "(usize, Vec<Option<char>>)")]
#[serde(try_from = "(usize, Vec<Option<char>>)")]
pub struct SudokuGrid {
    block_size: usize,
    size: usize,
    tokens: Vec<char>,
    cells: Vec<Option<char>>
}

fn to_char(cell: Option<char>) -> char {
    cell.unwrap_or(' ')
}

fn line(grid: &SudokuGrid, start: char, thick_sep: char, thin_sep: char,
        segment: impl Fn(usize) -> char, pad: char, end: char, newline: bool)
        -> String {
    let size = grid.size();
    let mut result = String::new();

    for x in 0..size {
        if x == 0 {
            result.push(start);
        }
        else if x % grid.block_size == 0 {
            result.push(thick_sep);
        }
        else {
            result.push(thin_sep);
        }

        result.push(pad);
        result.push(segment(x));
        result.push(pad);
    }

    result.push(end);

    if newline {
        result.push('\n');
    }

    result
}

fn top_row(grid: &SudokuGrid) -> String {
    line(grid, '╔', '╦', '╤', |_| '═', '═', '╗', true)
}

fn thin_separator_line(grid: &SudokuGrid) -> String {
    line(grid, '╟', '╫', '┼', |_| '─', '─', '╢', true)
}

fn thick_separator_line(grid: &SudokuGrid) -> String {
    line(grid, '╠', '╬', '╪', |_| '═', '═', '╣', true)
}

fn bottom_row(grid: &SudokuGrid) -> String {
    line(grid, '╚', '╩', '╧', |_| '═', '═', '╝', false)
}

fn content_row(grid: &SudokuGrid, y: usize) -> String {
    line(grid, '║', '║', '│', |x| to_char(grid.get_cell(x, y).unwrap()), ' ',
        '║', true)
}

impl Display for SudokuGrid {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let size = self.size();
        let top_row = top_row(self);
        let thin_separator_line = thin_separator_line(self);
        let thick_separator_line = thick_separator_line(self);
        let bottom_row = bottom_row(self);

        for y in 0..size {
            if y == 0 {
                f.write_str(top_row.as_str())?;
            }
            else if y % self.block_size == 0 {
                f.write_str(thick_separator_line.as_str())?;
            }
            else {
                f.write_str(thin_separator_line.as_str())?;
            }

            f.write_str(content_row(self, y).as_str())?;
        }

        f.write_str(bottom_row.as_str())?;
        Ok(())
    }
}

pub(crate) fn index(column: usize, row: usize, size: usize) -> usize {
    row * size + column
}

impl SudokuGrid {

    /// Creates a new, empty Sudoku grid with the given block size. The total
    /// width and height of the grid will be equal to `block_size²`, and the
    /// token alphabet will contain `block_size²` distinct characters starting
    /// at `'A'`. All cells are allocated and blank after this call.
    ///
    /// # Arguments
    ///
    /// * `block_size`: The dimension of one sub-block of the grid. To ensure
    /// a square grid, this is also the number of blocks that compose the grid
    /// horizontally and vertically. For an ordinary Sudoku grid, this is 3.
    /// Must be in the range `[1, MAX_BLOCK_SIZE]`.
    ///
    /// # Errors
    ///
    /// * `SudokuError::InvalidBlockSize` If `block_size` is zero.
    /// * `SudokuError::BlockSizeTooLarge` If `block_size` is greater than
    /// [MAX_BLOCK_SIZE].
    pub fn new(block_size: usize) -> SudokuResult<SudokuGrid> {
        if block_size == 0 {
            return Err(SudokuError::InvalidBlockSize);
        }

        if block_size > MAX_BLOCK_SIZE {
            return Err(SudokuError::BlockSizeTooLarge);
        }

        let size = block_size * block_size;

        // code points 65..=320, all valid scalar values
        let tokens = (0..size)
            .map(|i| std::char::from_u32(FIRST_TOKEN as u32 + i as u32)
                .unwrap())
            .collect();
        let cells = vec![None; size * size];

        Ok(SudokuGrid {
            block_size,
            size,
            tokens,
            cells
        })
    }

    /// Gets the size (number of columns and rows) of one sub-block of the
    /// grid. To ensure a square grid, this is also the number of blocks that
    /// compose the grid horizontally and vertically.
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Gets the total size of the grid on one axis (horizontally or
    /// vertically). Since a square grid is enforced at construction time,
    /// this is guaranteed to be valid for both axes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Gets a reference to the ordered token alphabet of this grid. It
    /// contains [SudokuGrid::size] distinct characters in ascending order and
    /// is fixed at construction time.
    pub fn tokens(&self) -> &Vec<char> {
        &self.tokens
    }

    /// Gets the content of the cell at the specified position.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the desired cell. Must be in
    /// the range `[0, size[`.
    /// * `row`: The row (y-coordinate) of the desired cell. Must be in the
    /// range `[0, size[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn get_cell(&self, column: usize, row: usize)
            -> SudokuResult<Option<char>> {
        let size = self.size();

        if column >= size || row >= size {
            Err(SudokuError::OutOfBounds)
        }
        else {
            let index = index(column, row, size);
            Ok(self.cells[index])
        }
    }

    /// Sets the content of the cell at the specified position to the given
    /// token. If the cell was not empty, the old token will be overwritten.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the assigned cell. Must be in
    /// the range `[0, size[`.
    /// * `row`: The row (y-coordinate) of the assigned cell. Must be in the
    /// range `[0, size[`.
    /// * `token`: The token to assign to the specified cell. Must be an
    /// element of the alphabet returned by [SudokuGrid::tokens].
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `column` or `row` are not in
    /// the specified range.
    /// * `SudokuError::InvalidToken` If `token` is not in the alphabet.
    pub fn set_cell(&mut self, column: usize, row: usize, token: char)
            -> SudokuResult<()> {
        let size = self.size();

        if column >= size || row >= size {
            return Err(SudokuError::OutOfBounds);
        }

        if !self.tokens.contains(&token) {
            return Err(SudokuError::InvalidToken);
        }

        let index = index(column, row, size);
        self.cells[index] = Some(token);
        Ok(())
    }

    /// Clears the content of the cell at the specified position, that is, if
    /// it contains a token, that token is removed. If the cell is already
    /// empty, it will be left that way.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the cleared cell. Must be in
    /// the range `[0, size[`.
    /// * `row`: The row (y-coordinate) of the cleared cell. Must be in the
    /// range `[0, size[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn clear_cell(&mut self, column: usize, row: usize)
            -> SudokuResult<()> {
        let size = self.size();

        if column >= size || row >= size {
            return Err(SudokuError::OutOfBounds);
        }

        let index = index(column, row, size);
        self.cells[index] = None;
        Ok(())
    }

    /// Gets all cells of the row with the given index as an ordered sequence,
    /// from the leftmost to the rightmost column.
    ///
    /// # Errors
    ///
    /// If `row` is not in the range `[0, size[`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn row(&self, row: usize) -> SudokuResult<Vec<Option<char>>> {
        let size = self.size();

        if row >= size {
            return Err(SudokuError::OutOfBounds);
        }

        Ok((0..size)
            .map(|column| self.cells[index(column, row, size)])
            .collect())
    }

    /// Gets all cells of the column with the given index as an ordered
    /// sequence, from the topmost to the bottommost row.
    ///
    /// # Errors
    ///
    /// If `column` is not in the range `[0, size[`. In that case,
    /// `SudokuError::OutOfBounds` is returned.
    pub fn column(&self, column: usize) -> SudokuResult<Vec<Option<char>>> {
        let size = self.size();

        if column >= size {
            return Err(SudokuError::OutOfBounds);
        }

        Ok((0..size)
            .map(|row| self.cells[index(column, row, size)])
            .collect())
    }

    /// Gets all cells of the block with the given block coordinate as an
    /// ordered sequence, iterating the block in row-major order (each row of
    /// the block completed before the next one is started).
    ///
    /// # Arguments
    ///
    /// * `block_column`: The column of the block in block coordinates. Must
    /// be in the range `[0, block_size[`.
    /// * `block_row`: The row of the block in block coordinates. Must be in
    /// the range `[0, block_size[`.
    ///
    /// # Errors
    ///
    /// If either `block_column` or `block_row` are not in the specified
    /// range. In that case, `SudokuError::OutOfBounds` is returned.
    pub fn block(&self, block_column: usize, block_row: usize)
            -> SudokuResult<Vec<Option<char>>> {
        let block_size = self.block_size();

        if block_column >= block_size || block_row >= block_size {
            return Err(SudokuError::OutOfBounds);
        }

        let mut values = Vec::with_capacity(self.size());

        for row in (block_row * block_size)..((block_row + 1) * block_size) {
            for column in
                    (block_column * block_size)..((block_column + 1) * block_size) {
                values.push(self.cells[index(column, row, self.size())]);
            }
        }

        Ok(values)
    }

    /// Replaces all cells of the block with the given block coordinate by the
    /// given tokens, which are consumed in row-major order (each row of the
    /// block completed before the next one is started).
    ///
    /// # Arguments
    ///
    /// * `block_column`: The column of the block in block coordinates. Must
    /// be in the range `[0, block_size[`.
    /// * `block_row`: The row of the block in block coordinates. Must be in
    /// the range `[0, block_size[`.
    /// * `tokens`: The tokens to write to the block. Must contain exactly
    /// [SudokuGrid::size] elements of the alphabet.
    ///
    /// # Errors
    ///
    /// * `SudokuError::OutOfBounds` If either `block_column` or `block_row`
    /// are not in the specified range.
    /// * `SudokuError::WrongTokenCount` If the number of provided tokens is
    /// not equal to the number of cells in a block.
    /// * `SudokuError::InvalidToken` If any provided token is not in the
    /// alphabet.
    pub fn set_block(&mut self, block_column: usize, block_row: usize,
            tokens: &[char]) -> SudokuResult<()> {
        let block_size = self.block_size();

        if block_column >= block_size || block_row >= block_size {
            return Err(SudokuError::OutOfBounds);
        }

        if tokens.len() != self.size() {
            return Err(SudokuError::WrongTokenCount);
        }

        let mut tokens = tokens.iter();

        for row in (block_row * block_size)..((block_row + 1) * block_size) {
            for column in
                    (block_column * block_size)..((block_column + 1) * block_size) {
                let &token = tokens.next().unwrap();
                self.set_cell(column, row, token)?;
            }
        }

        Ok(())
    }

    /// Indicates whether the cell at the given position lies in a diagonal
    /// block, that is, a block whose block-row index equals its block-column
    /// index. Coordinates must lie within the grid.
    pub fn in_diagonal_block(&self, column: usize, row: usize) -> bool {
        column / self.block_size == row / self.block_size
    }

    /// Computes the tokens that could legally occupy the cell at the given
    /// position, that is, the alphabet minus all tokens currently present in
    /// the cell's row, column, and block. The content of the queried cell
    /// itself is excluded like any other value in its row.
    ///
    /// # Arguments
    ///
    /// * `column`: The column (x-coordinate) of the queried cell. Must be in
    /// the range `[0, size[`.
    /// * `row`: The row (y-coordinate) of the queried cell. Must be in the
    /// range `[0, size[`.
    ///
    /// # Errors
    ///
    /// If either `column` or `row` are not in the specified range. In that
    /// case, `SudokuError::OutOfBounds` is returned.
    pub fn available_tokens(&self, column: usize, row: usize)
            -> SudokuResult<Vec<char>> {
        let block_size = self.block_size();
        let mut occupied = self.row(row)?;
        occupied.extend(self.column(column)?);
        occupied.extend(self.block(column / block_size, row / block_size)?);

        Ok(self.tokens.iter()
            .copied()
            .filter(|&token| !occupied.contains(&Some(token)))
            .collect())
    }

    /// Indicates whether this grid is full, i.e. every cell is filled with a
    /// token.
    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|c| c == &None)
    }

    /// Indicates whether this grid is empty, i.e. no cell is filled with a
    /// token.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| c == &None)
    }

    /// Gets a reference to the vector which holds the cells. They are in
    /// left-to-right, top-to-bottom order, where rows are together.
    pub fn cells(&self) -> &Vec<Option<char>> {
        &self.cells
    }
}

impl From<SudokuGrid> for (usize, Vec<Option<char>>) {
    fn from(grid: SudokuGrid) -> (usize, Vec<Option<char>>) {
        (grid.block_size, grid.cells)
    }
}

impl TryFrom<(usize, Vec<Option<char>>)> for SudokuGrid {
    type Error = SudokuError;

    fn try_from((block_size, cells): (usize, Vec<Option<char>>))
            -> SudokuResult<SudokuGrid> {
        let mut grid = SudokuGrid::new(block_size)?;

        if cells.len() != grid.size() * grid.size() {
            return Err(SudokuError::WrongTokenCount);
        }

        for cell in &cells {
            if let Some(token) = cell {
                if !grid.tokens.contains(token) {
                    return Err(SudokuError::InvalidToken);
                }
            }
        }

        grid.cells = cells;
        Ok(grid)
    }
}
