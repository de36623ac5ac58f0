//! Viewport-aware placement for dropdowns and other anchored popovers.

/// Minimum distance kept between a popover and the viewport edges.
pub const VIEWPORT_PADDING: f64 = 12.0;
/// Distance between a popover and its anchor.
const ANCHOR_GAP: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}
impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

/// Where to put the top-left corner of a `popover` anchored to `anchor`.
///
/// The popover is centred under the anchor and then nudged to stay
/// [`VIEWPORT_PADDING`] inside the viewport. If there is no room below it
/// flips above the anchor; if there is no room there either it sits against
/// the bottom padding. It never starts above the top padding.
pub fn place_popover(anchor: Rect, popover: Size, viewport: Size) -> Point {
    let mut left = anchor.center_x() - popover.width / 2.0;
    if left < VIEWPORT_PADDING {
        left = VIEWPORT_PADDING;
    } else if left + popover.width > viewport.width - VIEWPORT_PADDING {
        left = viewport.width - popover.width - VIEWPORT_PADDING;
    }

    let mut top = anchor.bottom() + ANCHOR_GAP;
    if top + popover.height > viewport.height - VIEWPORT_PADDING {
        let above = anchor.top - popover.height - ANCHOR_GAP;
        top = match above >= VIEWPORT_PADDING {
            true => above,
            false => viewport.height - popover.height - VIEWPORT_PADDING,
        };
    }
    Point { left, top: top.max(VIEWPORT_PADDING) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const VIEWPORT: Size = Size { width: 800.0, height: 600.0 };
    const MENU: Size = Size { width: 200.0, height: 100.0 };

    fn anchor(left: f64, top: f64) -> Rect {
        Rect { left, top, width: 100.0, height: 30.0 }
    }

    #[rstest]
    // Centred below.
    #[case(anchor(300.0, 100.0), MENU, Point { left: 250.0, top: 134.0 })]
    // Pushed in from the left edge.
    #[case(anchor(0.0, 100.0), MENU, Point { left: 12.0, top: 134.0 })]
    // Pushed in from the right edge.
    #[case(anchor(750.0, 100.0), MENU, Point { left: 588.0, top: 134.0 })]
    // Flipped above.
    #[case(anchor(300.0, 500.0), MENU, Point { left: 250.0, top: 396.0 })]
    // No room either way: pinned to the bottom padding.
    #[case(anchor(300.0, 50.0), Size { width: 200.0, height: 540.0 }, Point { left: 250.0, top: 48.0 })]
    // Taller than the viewport: held at the top padding.
    #[case(anchor(300.0, 50.0), Size { width: 200.0, height: 700.0 }, Point { left: 250.0, top: 12.0 })]
    fn test_place_popover(#[case] anchor: Rect, #[case] popover: Size, #[case] expected: Point) {
        assert_eq!(place_popover(anchor, popover, VIEWPORT), expected);
    }
}
