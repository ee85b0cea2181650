//! This module contains some error and result definitions used in this crate.

use std::fmt::{self, Display, Formatter};

/// An enumeration of the errors that can occur when constructing or
/// manipulating Sudoku grids. Expected control flow during generation, such
/// as a cell running out of candidate tokens or the traversal reaching a
/// boundary, is *not* an error and is handled internally by the generator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SudokuError {

    /// Indicates that the block size specified for a created grid is invalid.
    /// This is the case if it is zero.
    InvalidBlockSize,

    /// Indicates that the block size specified for a created grid exceeds
    /// [MAX_BLOCK_SIZE](crate::MAX_BLOCK_SIZE), which would exhaust the token
    /// alphabet. This is raised before any grid memory is allocated.
    BlockSizeTooLarge,

    /// Indicates that the specified coordinates (column and row, or block
    /// column and block row) lie outside the grid in question. This is the
    /// case if they are greater than or equal to the relevant size.
    OutOfBounds,

    /// Indicates that a token that was written to a cell is not part of the
    /// grid's token alphabet.
    InvalidToken,

    /// Indicates that a slice of tokens written to a block does not contain
    /// exactly one token per cell of the block.
    WrongTokenCount
}

impl Display for SudokuError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SudokuError::InvalidBlockSize =>
                write!(f, "block size is zero"),
            SudokuError::BlockSizeTooLarge =>
                write!(f, "block size is too large"),
            SudokuError::OutOfBounds =>
                write!(f, "coordinates out of bounds"),
            SudokuError::InvalidToken =>
                write!(f, "token not in the alphabet"),
            SudokuError::WrongTokenCount =>
                write!(f, "wrong number of tokens for a block")
        }
    }
}

/// Syntactic sugar for `Result<V, SudokuError>`.
pub type SudokuResult<V> = Result<V, SudokuError>;
