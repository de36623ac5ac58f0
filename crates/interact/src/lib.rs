//! Interaction logic for ordered lists, tabs and popovers.
//!
//! Everything here is pure bookkeeping over indices and rectangles: callers
//! translate pointer, touch and keyboard events into these calls and render
//! the result themselves.

mod drag;
pub mod error;
mod navigate;
mod popover;
mod reorder;

pub use crate::drag::DragSession;
pub use crate::navigate::{Key, ListNavigator, Orientation, TabNavigator};
pub use crate::popover::{Point, Rect, Size, VIEWPORT_PADDING, place_popover};
pub use crate::reorder::{Direction, DropSide, Move, apply_move, compute_move, keyboard_move, resolve_side};
