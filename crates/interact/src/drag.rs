use crate::reorder::{DropSide, Move, compute_move, resolve_side};

/// State of one drag gesture, from pick-up to drop.
///
/// Pointer and touch drags work the same way: start with the index being
/// dragged, report every element the pointer passes over, then
/// [`drop`](Self::drop). Discarding the session cancels the drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    source: usize,
    target: Option<(usize, DropSide)>,
}

impl DragSession {
    pub fn start(source: usize) -> Self {
        Self { source, target: None }
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// The element under the pointer and which side of it the pointer is on.
    pub fn target(&self) -> Option<(usize, DropSide)> {
        self.target
    }

    /// The pointer is over element `index`, whose box starts at `top` and
    /// is `height` tall.
    pub fn hover(&mut self, index: usize, pointer_y: f64, top: f64, height: f64) -> DropSide {
        let side = resolve_side(pointer_y, top, height);
        self.target = Some((index, side));
        side
    }

    /// The pointer left the current target without entering another.
    pub fn leave(&mut self) {
        self.target = None;
    }

    /// Finish the gesture over a list of `len` elements.
    ///
    /// `None` if nothing was targeted or the drop would leave the list
    /// unchanged.
    pub fn drop(self, len: usize) -> Option<Move> {
        let (target, side) = self.target?;
        let to = compute_move(self.source, target, side, len);
        tracing::debug!(from = self.source, target, %side, to, "Drag dropped");
        (to != self.source).then_some(Move { from: self.source, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROW: f64 = 40.0;

    /// Hover over row `index` at `offset` pixels into it.
    fn over(session: &mut DragSession, index: usize, offset: f64) -> DropSide {
        session.hover(index, index as f64 * ROW + offset, index as f64 * ROW, ROW)
    }

    #[test]
    fn test_drag_down_past_neighbour() {
        let mut session = DragSession::start(0);
        assert_eq!(over(&mut session, 1, 30.0), DropSide::After);
        assert_eq!(session.drop(5), Some(Move { from: 0, to: 1 }));
    }

    #[test]
    fn test_drag_up_to_top() {
        let mut session = DragSession::start(3);
        over(&mut session, 2, 35.0);
        assert_eq!(over(&mut session, 0, 5.0), DropSide::Before);
        assert_eq!(session.target(), Some((0, DropSide::Before)));
        assert_eq!(session.drop(5), Some(Move { from: 3, to: 0 }));
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let mut session = DragSession::start(2);
        over(&mut session, 2, 5.0);
        assert_eq!(session.drop(5), None);
        let mut session = DragSession::start(2);
        over(&mut session, 1, 30.0);
        assert_eq!(session.drop(5), None);
    }

    #[test]
    fn test_drop_without_target() {
        let mut session = DragSession::start(1);
        assert_eq!(session.drop(5), None);
        over(&mut session, 3, 5.0);
        session.leave();
        assert_eq!(session.drop(5), None);
        assert_eq!(session.source(), 1);
    }
}
