use cubic_bezier::{BezierCanvas, CubicBezier, Result};
use kurbo::Point;

/// One of the two draggable control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    P1,
    P2,
}

impl Handle {
    fn index(self) -> usize {
        match self {
            Handle::P1 => 0,
            Handle::P2 => 1,
        }
    }
}

/// A set of states that are possible while handling a mouse drag.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    /// A handle is following the pointer.
    MoveHandle(Handle),
    None,
}

impl Default for DragState {
    fn default() -> Self {
        DragState::None
    }
}

/// The curve being edited and where its handles sit on the editor canvas.
///
/// Handle positions are in canvas pixels. It is an invariant that they
/// always describe `curve`: a move that would produce an invalid curve is
/// refused and leaves both untouched.
#[derive(Debug, Clone)]
pub struct EditSession {
    canvas: BezierCanvas,
    handles: [Point; 2],
    curve: CubicBezier,
    drag: DragState,
}

impl EditSession {
    pub fn new(canvas: BezierCanvas, curve: CubicBezier) -> EditSession {
        EditSession {
            canvas,
            handles: canvas.offsets(&curve),
            curve,
            drag: DragState::default(),
        }
    }

    pub fn canvas(&self) -> &BezierCanvas {
        &self.canvas
    }

    pub fn curve(&self) -> CubicBezier {
        self.curve
    }

    pub fn handle(&self, handle: Handle) -> Point {
        self.handles[handle.index()]
    }

    /// Replace the curve, moving both handles to match.
    pub fn set_curve(&mut self, curve: CubicBezier) {
        self.curve = curve;
        self.handles = self.canvas.offsets(&curve);
    }

    /// Put `handle` at `pos` and recompute its control point.
    ///
    /// The other control point is taken from the current curve as is.
    pub fn move_handle(&mut self, handle: Handle, pos: Point) -> Result<CubicBezier> {
        let moved = self.canvas.pixel_to_coordinate(pos);
        let curve = match handle {
            Handle::P1 => {
                let p2 = self.curve.P2();
                CubicBezier::new(moved.x, moved.y, p2.x, p2.y)?
            }
            Handle::P2 => {
                let p1 = self.curve.P1();
                CubicBezier::new(p1.x, p1.y, moved.x, moved.y)?
            }
        };
        self.handles[handle.index()] = pos;
        self.curve = curve;
        Ok(curve)
    }

    /// The handle closest to `pos`; ties go to `P2`.
    pub fn nearest_handle(&self, pos: Point) -> Handle {
        let d1 = self.handles[0].distance(pos);
        let d2 = self.handles[1].distance(pos);
        if d1 < d2 {
            Handle::P1
        } else {
            Handle::P2
        }
    }

    pub fn begin_drag(&mut self, handle: Handle) {
        self.drag = DragState::MoveHandle(handle);
    }

    pub fn dragged(&self) -> Option<Handle> {
        match self.drag {
            DragState::MoveHandle(handle) => Some(handle),
            DragState::None => None,
        }
    }

    /// Stop dragging; returns `true` if a drag was in progress.
    pub fn end_drag(&mut self) -> bool {
        std::mem::take(&mut self.drag) != DragState::None
    }
}
