//! Ply arithmetic
//!
//!     The repository addresses lines by a flat ply anchor while the PGN model addresses them
//!     by move number and color. Plies count half-moves: `1.` white is ply 0 from the standard
//!     start, `1...` black is ply 1, `2.` white is ply 2.
//!
//!     [ply_offset] and [move_color_from_ply] are exact inverses for every ply >= -1 from any
//!     start at move number 1 or later.

use crate::pgn::ast::{Color, MovePosition};

/// Half-moves from `start` to `target` (negative when `target` comes first)
pub fn ply_offset(start: MovePosition, target: MovePosition) -> i64 {
    target.ply_index() - start.ply_index()
}

/// The position `ply` half-moves after `start`. Move numbers saturate at 0.
pub fn move_color_from_ply(start: MovePosition, ply: i64) -> MovePosition {
    let total = start.color.index() + ply;
    let number = i64::from(start.number) + total.div_euclid(2);
    let color = if total.rem_euclid(2) == 0 {
        Color::White
    } else {
        Color::Black
    };
    MovePosition::new(u32::try_from(number.max(0)).unwrap_or(u32::MAX), color)
}

/// `1.` white, the origin of every mainline anchor
pub fn game_start() -> MovePosition {
    MovePosition::new(1, Color::White)
}

/// Mainline anchor of a line whose first move is played at `position`: the ply of the last
/// shared half-move, -1 for a line that replaces the very first move.
pub fn anchor_for(position: MovePosition) -> i64 {
    ply_offset(game_start(), position) - 1
}

/// Inverse of [anchor_for]: where a line branching after `anchor` starts
pub fn position_after(anchor: i64) -> MovePosition {
    move_color_from_ply(game_start(), anchor + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let start = game_start();
        assert_eq!(ply_offset(start, MovePosition::new(1, Color::White)), 0);
        assert_eq!(ply_offset(start, MovePosition::new(1, Color::Black)), 1);
        assert_eq!(ply_offset(start, MovePosition::new(4, Color::White)), 6);
        assert_eq!(
            ply_offset(MovePosition::new(3, Color::Black), MovePosition::new(3, Color::White)),
            -1
        );
    }

    #[test]
    fn test_before_start() {
        assert_eq!(
            move_color_from_ply(game_start(), -1),
            MovePosition::new(0, Color::Black)
        );
        assert_eq!(
            move_color_from_ply(MovePosition::new(5, Color::Black), -1),
            MovePosition::new(5, Color::White)
        );
    }

    #[test]
    fn test_anchor_for() {
        assert_eq!(anchor_for(MovePosition::new(1, Color::White)), -1);
        assert_eq!(anchor_for(MovePosition::new(4, Color::White)), 5);
        assert_eq!(position_after(5), MovePosition::new(4, Color::White));
        assert_eq!(position_after(-1), MovePosition::new(1, Color::White));
    }
}
