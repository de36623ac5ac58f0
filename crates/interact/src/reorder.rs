//! Moving one element of an ordered list to a new position.
//!
//! Pointer drags, touch drags and keyboard moves all reduce to a [`Move`]:
//! the element's current index and the index it should end up at once the
//! move is complete.

use crate::error::{ErrorKind, Result};
use derive_more::Display;

/// Which half of the target element the pointer is over.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum DropSide {
    #[display("before")]
    Before,
    #[display("after")]
    After,
}

/// Direction of a single-step keyboard move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Move the element at `from` so that it ends up at index `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: usize,
    pub to: usize,
}
impl Move {
    pub fn apply<T>(self, items: &mut Vec<T>) -> Result<()> {
        apply_move(items, self.from, self.to)
    }
}

/// [`Before`](DropSide::Before) if `pointer_y` is strictly above the
/// target's vertical midpoint, otherwise [`After`](DropSide::After).
pub fn resolve_side(pointer_y: f64, target_top: f64, target_height: f64) -> DropSide {
    match pointer_y < target_top + target_height / 2.0 {
        true => DropSide::Before,
        false => DropSide::After,
    }
}

/// The final index of an element dragged from `from` and dropped on `side`
/// of the element at `target`, in a list of `len` elements.
///
/// The result is clamped to the list. When it equals `from` the drop has no
/// effect and should not be reported as a reorder.
///
/// ```
/// use folio_interact::{DropSide, compute_move};
///
/// assert_eq!(compute_move(2, 2, DropSide::Before, 5), 2);
/// assert_eq!(compute_move(0, 1, DropSide::After, 5), 1);
/// ```
pub fn compute_move(from: usize, target: usize, side: DropSide, len: usize) -> usize {
    let mut to = target;
    if side == DropSide::After {
        to = to.saturating_add(1);
    }
    // Removing the dragged element shifts everything after it left by one.
    if from < to {
        to -= 1;
    }
    to.min(len.saturating_sub(1))
}

/// Remove the element at `from` and reinsert it so it lands at index `to`.
///
/// Every other element keeps its relative order.
///
/// # Errors
///
/// [`IndexOutOfRange`](ErrorKind::IndexOutOfRange) if either index is not a
/// valid position in `items`; nothing is modified in that case.
pub fn apply_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<()> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            exn::bail!(ErrorKind::IndexOutOfRange { index, len });
        }
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// The single-step move for an up/down key press at `current`.
///
/// Identical to dragging the element onto the far side of its neighbour.
/// `None` at either end of the list.
pub fn keyboard_move(current: usize, direction: Direction, len: usize) -> Option<Move> {
    if current >= len {
        return None;
    }
    let to = match direction {
        Direction::Up => current.checked_sub(1)?,
        Direction::Down => (current + 1).min(len - 1),
    };
    (to != current).then_some(Move { from: current, to })
}
