//! Side to move and half-move addressing

use serde::{Deserialize, Serialize};
use std::fmt;

/// The side that plays a half-move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Offset of this color inside a move pair (white = 0, black = 1)
    pub fn index(self) -> i64 {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A half-move address: move number plus the color that plays it.
///
/// Ordering follows play order, so `1. white < 1. black < 2. white`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MovePosition {
    pub number: u32,
    pub color: Color,
}

impl MovePosition {
    pub fn new(number: u32, color: Color) -> Self {
        Self { number, color }
    }

    /// Zero-based ply index counted from the initial position (1. white is ply 0)
    pub fn ply_index(self) -> i64 {
        (i64::from(self.number) - 1) * 2 + self.color.index()
    }

    /// The half-move played right after this one
    pub fn next(self) -> Self {
        match self.color {
            Color::White => Self::new(self.number, Color::Black),
            Color::Black => Self::new(self.number.saturating_add(1), Color::White),
        }
    }
}

impl fmt::Display for MovePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::White => write!(f, "{}.", self.number),
            Color::Black => write!(f, "{}...", self.number),
        }
    }
}
