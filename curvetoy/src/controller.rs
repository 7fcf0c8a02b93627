//! Input handling for the editor page.

use cubic_bezier::{BezierCanvas, CubicBezier, Library, Surface};
use kurbo::{Point, Rect, Size, Vec2};

use crate::config::ToyConfig;
use crate::edit_session::{EditSession, Handle};
use crate::error::ToyError;
use crate::save::SessionState;

/// Something that can take a timing function, such as an element whose
/// `transition-timing-function` is set to it.
pub trait TimingSink {
    fn apply(&mut self, timing: &str, duration: Option<f64>);
}

impl<F: FnMut(&str, Option<f64>)> TimingSink for F {
    fn apply(&mut self, timing: &str, duration: Option<f64>) {
        self(timing, duration)
    }
}

/// Where committed curves are recorded, usually the URL fragment.
pub trait HistorySink {
    fn push(&mut self, fragment: &str);
}

impl<F: FnMut(&str)> HistorySink for F {
    fn push(&mut self, fragment: &str) {
        self(fragment)
    }
}

/// The parts of the page the controller draws on and talks to.
pub struct UiContext<S> {
    /// The large canvas the handles are dragged over.
    pub curve: S,
    /// Preview of the curve being edited.
    pub current: S,
    /// Preview of the curve picked from the gallery.
    pub compare: S,
    pub current_timing: Box<dyn TimingSink>,
    pub compare_timing: Box<dyn TimingSink>,
    pub history: Box<dyn HistorySink>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

/// Percentages shown while hovering over the editor canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readout {
    pub time: i64,
    pub progression: i64,
}

pub struct Controller<S> {
    ui: UiContext<S>,
    session: EditSession,
    preview: BezierCanvas,
    library: Library,
    config: ToyConfig,
    compare: Option<CubicBezier>,
    duration: Option<f64>,
    moving: bool,
    /// The fragment last pushed to history.
    committed: Option<String>,
}

impl<S: Surface> Controller<S> {
    pub fn new(config: ToyConfig, ui: UiContext<S>) -> Result<Controller<S>, ToyError> {
        let editor = BezierCanvas::new(config.editor_size, config.editor_padding)?;
        let preview = BezierCanvas::new(config.preview_size, config.preview_padding)?;
        Ok(Controller {
            ui,
            session: EditSession::new(editor, config.initial_curve),
            preview,
            library: Library::with_predefined(),
            duration: config.duration,
            config,
            compare: None,
            moving: false,
            committed: None,
        })
    }

    pub fn curve(&self) -> CubicBezier {
        self.session.curve()
    }

    pub fn handle(&self, handle: Handle) -> Point {
        self.session.handle(handle)
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    pub fn ui(&self) -> &UiContext<S> {
        &self.ui
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    /// Start up from the page's URL fragment, if it has one.
    ///
    /// A fragment that is not a valid curve is logged and ignored.
    pub fn init(&mut self, fragment: Option<&str>) -> Result<(), ToyError> {
        if let Some(f) = fragment.filter(|f| !f.trim_start_matches('#').is_empty()) {
            match f.parse::<CubicBezier>() {
                Ok(curve) => self.session.set_curve(curve),
                Err(e) => log::warn!("ignoring fragment {:?}: {}", f, e),
            }
        }
        self.update()?;
        self.commit();
        Ok(())
    }

    /// Redraw the editor and the current preview.
    pub fn update(&mut self) -> Result<(), ToyError> {
        let curve = self.session.curve();
        self.session
            .canvas()
            .render(&mut self.ui.curve, &curve, &self.config.editor_style)?;
        self.preview
            .render(&mut self.ui.current, &curve, &self.config.preview_style)?;
        Ok(())
    }

    /// The four numbers as shown next to `cubic-bezier(`.
    pub fn params(&self) -> Vec<String> {
        self.session
            .curve()
            .fragment()
            .split(',')
            .map(str::to_owned)
            .collect()
    }

    /// Record the curve for the things that need not follow every mouse
    /// move: the preview's timing function and the URL.
    ///
    /// Returns `false` if nothing changed since the last commit.
    pub fn commit(&mut self) -> bool {
        let curve = self.session.curve();
        let fragment = curve.fragment();
        if self.committed.as_deref() == Some(fragment.as_str()) {
            return false;
        }
        log::debug!("commit {}", curve);
        self.ui
            .current_timing
            .apply(&curve.to_string(), self.duration);
        self.ui.history.push(&format!("#{}", fragment));
        self.committed = Some(fragment);
        true
    }

    pub fn drag_start(&mut self, handle: Handle) {
        self.session.begin_drag(handle);
    }

    /// Follow the pointer at page position `page`, with `bounds` the editor
    /// canvas in page coordinates. x is kept inside the padded box, so
    /// dragging past either side pins the handle at 0 or 1.
    pub fn drag_to(&mut self, page: Point, bounds: Rect) -> Result<(), ToyError> {
        let handle = match self.session.dragged() {
            Some(handle) => handle,
            None => return Ok(()),
        };
        // some browsers send a bogus final move at the origin
        if page == Point::ORIGIN {
            return Ok(());
        }
        let (left, right) = self.session.canvas().x_range();
        let x = (page.x - bounds.x0).max(left).min(right);
        let pos = Point::new(x, page.y - bounds.y0);
        self.move_handle(handle, pos)
    }

    pub fn drag_end(&mut self) {
        if self.session.end_drag() {
            self.commit();
        }
    }

    /// A handle lost focus.
    pub fn blur(&mut self) {
        self.commit();
    }

    /// Move a handle with the arrow keys.
    pub fn nudge(&mut self, handle: Handle, direction: Direction, shift: bool) -> Result<(), ToyError> {
        let step = if shift {
            self.config.nudge_step * self.config.nudge_boost
        } else {
            self.config.nudge_step
        };
        let delta = match direction {
            Direction::Left => Vec2::new(-step, 0.0),
            Direction::Up => Vec2::new(0.0, -step),
            Direction::Right => Vec2::new(step, 0.0),
            Direction::Down => Vec2::new(0.0, step),
        };
        let pos = self.session.handle(handle) + delta;
        self.move_handle(handle, pos)?;
        self.commit();
        Ok(())
    }

    /// A click on the editor canvas pulls the nearer handle to it.
    pub fn click(&mut self, pos: Point) -> Result<(), ToyError> {
        let handle = self.session.nearest_handle(pos);
        self.move_handle(handle, pos)?;
        self.commit();
        Ok(())
    }

    fn move_handle(&mut self, handle: Handle, pos: Point) -> Result<(), ToyError> {
        if let Err(e) = self.session.move_handle(handle, pos) {
            log::warn!("refusing to move {:?} to {:?}: {}", handle, pos, e);
            return Err(e.into());
        }
        self.update()
    }

    /// Time and progression percentages under the pointer.
    pub fn hover(&self, pos: Point) -> Readout {
        let Size { width, height } = self.session.canvas().size();
        Readout {
            time: (100.0 * pos.x / width).round() as i64,
            progression: (100.0 * (0.75 * height - pos.y) / (0.5 * height)).round() as i64,
        }
    }

    /// Start or stop the preview animations.
    pub fn go(&mut self) -> bool {
        self.commit();
        self.moving = !self.moving;
        self.moving
    }

    /// Set the preview duration in seconds, rounded to a tenth.
    pub fn set_duration(&mut self, seconds: f64) -> Option<f64> {
        let rounded = (seconds * 10.0).round() / 10.0;
        self.duration = if rounded.is_finite() {
            Some(rounded)
        } else {
            None
        };
        self.duration
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Pick a gallery curve to compare against.
    pub fn select_thumbnail(&mut self, name: &str) -> Result<CubicBezier, ToyError> {
        let curve = self.library.select(name)?;
        self.compare = Some(curve);
        self.preview
            .render(&mut self.ui.compare, &curve, &self.config.preview_style)?;
        self.ui
            .compare_timing
            .apply(&curve.to_string(), self.duration);
        Ok(curve)
    }

    pub fn compare(&self) -> Option<CubicBezier> {
        self.compare
    }

    /// Draw the gallery, one surface per curve.
    pub fn render_gallery<T, F>(&self, make_surface: F) -> Vec<(String, cubic_bezier::Result<T>)>
    where
        T: Surface,
        F: FnMut(&str, Size) -> cubic_bezier::Result<T>,
    {
        self.library.render(&self.config.thumbnails, make_surface)
    }

    /// Add the curve being edited to the gallery.
    pub fn save_current(&mut self, name: &str) -> Option<CubicBezier> {
        let curve = self.session.curve();
        log::info!("saving {} as {:?}", curve, name);
        self.library.insert(name, curve)
    }

    /// Put the gallery back to the predefined curves.
    pub fn reset_library(&mut self) {
        self.library.reset();
    }

    pub fn export_library(&self) -> Result<String, ToyError> {
        self.state().to_json()
    }

    /// Replace the gallery with an exported one; on error nothing changes.
    pub fn import_library(&mut self, json: &str) -> Result<(), ToyError> {
        let state = SessionState::from_json(json.as_bytes())?;
        self.library = state.library;
        Ok(())
    }

    /// A compact string holding the gallery and the current curve.
    pub fn share(&self) -> Result<String, ToyError> {
        self.state().encode()
    }

    /// Load a string made by [`share`](Controller::share).
    pub fn open_shared(&mut self, shared: &str) -> Result<(), ToyError> {
        let state = SessionState::from_bytes(shared.as_bytes())?;
        self.library = state.library;
        if let Some(curve) = state.current {
            self.session.set_curve(curve);
        }
        self.update()?;
        self.commit();
        Ok(())
    }

    fn state(&self) -> SessionState {
        SessionState {
            library: self.library.clone(),
            current: Some(self.session.curve()),
        }
    }
}
