//! Browser glue: a 2D canvas surface, the URL fragment, and the object the
//! page's script drives.

use cubic_bezier::{Error, Surface};
use kurbo::{Affine, BezPath, Circle, PathEl, Point, Rect, Size};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement};

use crate::config::ToyConfig;
use crate::controller::{Controller, Direction, HistorySink, TimingSink, UiContext};
use crate::edit_session::Handle;
use crate::error::ToyError;

fn js_err(e: JsValue) -> Error {
    Error::Surface(format!("{:?}", e))
}

/// A `<canvas>` element's 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<CanvasSurface, ToyError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| ToyError::Web("no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|obj| ToyError::from(JsValue::from(obj)))?;
        Ok(CanvasSurface { canvas, ctx })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Size {
        Size::new(self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn set_transform(&mut self, transform: Affine) -> cubic_bezier::Result<()> {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        self.ctx.set_transform(a, b, c, d, e, f).map_err(js_err)
    }

    fn clear(&mut self, rect: Rect) -> cubic_bezier::Result<()> {
        self.ctx
            .clear_rect(rect.x0, rect.y0, rect.width(), rect.height());
        Ok(())
    }

    fn stroke(&mut self, path: &BezPath, color: &str, width: f64) -> cubic_bezier::Result<()> {
        self.ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => self.ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => self.ctx.line_to(p.x, p.y),
                PathEl::QuadTo(p1, p2) => self.ctx.quadratic_curve_to(p1.x, p1.y, p2.x, p2.y),
                PathEl::CurveTo(p1, p2, p3) => {
                    self.ctx.bezier_curve_to(p1.x, p1.y, p2.x, p2.y, p3.x, p3.y)
                }
                PathEl::ClosePath => self.ctx.close_path(),
            }
        }
        self.ctx.set_line_width(width);
        self.ctx.set_stroke_style(&JsValue::from_str(color));
        self.ctx.stroke();
        Ok(())
    }

    fn fill_circle(&mut self, circle: Circle, color: &str) -> cubic_bezier::Result<()> {
        self.ctx.begin_path();
        self.ctx
            .arc(
                circle.center.x,
                circle.center.y,
                circle.radius,
                0.0,
                std::f64::consts::TAU,
            )
            .map_err(js_err)?;
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill();
        Ok(())
    }
}

/// Sets the transition timing (and duration) on an element.
struct StyleSink(HtmlElement);

impl TimingSink for StyleSink {
    fn apply(&mut self, timing: &str, duration: Option<f64>) {
        let style = self.0.style();
        if let Err(e) = style.set_property("transition-timing-function", timing) {
            log::warn!("could not set timing: {:?}", e);
        }
        if let Some(seconds) = duration {
            let _ = style.set_property("transition-duration", &format!("{}s", seconds));
        }
    }
}

/// Pushes fragments onto the browser history.
struct UrlHistory;

impl HistorySink for UrlHistory {
    fn push(&mut self, fragment: &str) {
        let pushed = web_sys::window()
            .ok_or_else(|| JsValue::from_str("no window"))
            .and_then(|win| win.history())
            .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(fragment)));
        if let Err(e) = pushed {
            log::warn!("save failed: {:?}", e);
        }
    }
}

fn document() -> Result<Document, ToyError> {
    web_sys::window()
        .and_then(|win| win.document())
        .ok_or_else(|| ToyError::Web("no document".into()))
}

fn canvas_by_id(doc: &Document, id: &str) -> Result<HtmlCanvasElement, ToyError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| ToyError::MissingElement(id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|el| ToyError::from(JsValue::from(el)))
}

fn current_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    Some(hash)
}

fn to_js(e: ToyError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn handle_from(n: u8) -> Handle {
    if n == 1 {
        Handle::P1
    } else {
        Handle::P2
    }
}

#[wasm_bindgen]
pub fn wasm_main() {
    // This hook is necessary to get panic messages in the console
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    if console_log::init_with_level(log::Level::Debug).is_err() {
        web_sys::console::log_1(&"logger already installed".into());
    }
}

/// The editor page, as seen from its script.
#[wasm_bindgen]
pub struct App {
    controller: Controller<CanvasSurface>,
}

#[wasm_bindgen]
impl App {
    /// Wire up the `#curve`, `#current` and `#compare` canvases.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<App, JsValue> {
        App::build(config_json).map_err(to_js)
    }

    fn build(config_json: Option<String>) -> Result<App, ToyError> {
        let config = match config_json {
            Some(json) => ToyConfig::from_json(&json)?,
            None => ToyConfig::default(),
        };
        let doc = document()?;
        let current = canvas_by_id(&doc, "current")?;
        let compare = canvas_by_id(&doc, "compare")?;
        let ui = UiContext {
            curve: CanvasSurface::new(canvas_by_id(&doc, "curve")?)?,
            current_timing: Box::new(StyleSink((*current).clone())),
            compare_timing: Box::new(StyleSink((*compare).clone())),
            current: CanvasSurface::new(current)?,
            compare: CanvasSurface::new(compare)?,
            history: Box::new(UrlHistory),
        };
        let mut controller = Controller::new(config, ui)?;
        controller.init(current_fragment().as_deref())?;
        Ok(App { controller })
    }

    /// Handle position (`left`, `top`) in canvas pixels.
    pub fn handle(&self, handle: u8) -> Vec<f64> {
        let p = self.controller.handle(handle_from(handle));
        vec![p.x, p.y]
    }

    pub fn drag_start(&mut self, handle: u8) {
        self.controller.drag_start(handle_from(handle));
    }

    pub fn drag_to(
        &mut self,
        page_x: f64,
        page_y: f64,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<(), JsValue> {
        let bounds = Rect::new(left, top, left + width, top + height);
        self.controller
            .drag_to(Point::new(page_x, page_y), bounds)
            .map_err(to_js)
    }

    pub fn drag_end(&mut self) {
        self.controller.drag_end();
    }

    pub fn blur(&mut self) {
        self.controller.blur();
    }

    /// Arrow keys move the focused handle; returns `true` if the key was used.
    pub fn key_down(&mut self, handle: u8, key_code: u32, shift: bool) -> Result<bool, JsValue> {
        let direction = match key_code {
            37 => Direction::Left,
            38 => Direction::Up,
            39 => Direction::Right,
            40 => Direction::Down,
            _ => return Ok(false),
        };
        self.controller
            .nudge(handle_from(handle), direction, shift)
            .map_err(to_js)?;
        Ok(true)
    }

    pub fn click(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.controller.click(Point::new(x, y)).map_err(to_js)
    }

    /// `[time, progression]` percentages under the pointer.
    pub fn hover(&self, x: f64, y: f64) -> Vec<i32> {
        let readout = self.controller.hover(Point::new(x, y));
        vec![readout.time as i32, readout.progression as i32]
    }

    pub fn go(&mut self) -> bool {
        self.controller.go()
    }

    pub fn set_duration(&mut self, seconds: f64) -> Option<f64> {
        self.controller.set_duration(seconds)
    }

    /// The curve as a CSS value.
    pub fn timing(&self) -> String {
        self.controller.curve().to_string()
    }

    pub fn params(&self) -> Vec<JsValue> {
        self.controller
            .params()
            .iter()
            .map(|p| JsValue::from_str(p))
            .collect()
    }

    pub fn select(&mut self, name: &str) -> Result<(), JsValue> {
        self.controller.select_thumbnail(name).map_err(to_js)?;
        self.render_library()
    }

    pub fn save(&mut self, name: &str) -> Result<(), JsValue> {
        self.controller.save_current(name);
        self.render_library()
    }

    pub fn export_library(&self) -> Result<String, JsValue> {
        self.controller.export_library().map_err(to_js)
    }

    pub fn import_library(&mut self, json: &str) -> Result<(), JsValue> {
        self.controller.import_library(json).map_err(to_js)?;
        self.render_library()
    }

    /// Redraw the gallery into `#library`, replacing the old thumbnails.
    pub fn render_library(&self) -> Result<(), JsValue> {
        let doc = document().map_err(to_js)?;
        let library = doc
            .get_element_by_id("library")
            .ok_or_else(|| to_js(ToyError::MissingElement("library".into())))?;
        let old = library.query_selector_all("a")?;
        for i in 0..old.length() {
            if let Some(node) = old.item(i) {
                library.remove_child(&node)?;
            }
        }
        let rendered = self.controller.render_gallery(|_, size| {
            let canvas = doc
                .create_element("canvas")
                .map_err(js_err)?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|el| js_err(el.into()))?;
            canvas.set_width(size.width as u32);
            canvas.set_height(size.height as u32);
            CanvasSurface::new(canvas).map_err(|e| Error::Surface(e.to_string()))
        });
        // failures were logged by the library; show the rest
        for (name, surface) in rendered {
            let surface = match surface {
                Ok(surface) => surface,
                Err(_) => continue,
            };
            let link = doc.create_element("a")?;
            if let Some(curve) = self.controller.library().get(&name) {
                link.set_attribute("href", &format!("#{}", curve.fragment()))?;
            }
            if self.controller.library().is_selected(&name) {
                link.set_class_name("selected");
            }
            let label = doc.create_element("span")?;
            label.set_text_content(Some(&name));
            label.set_attribute("title", &name)?;
            link.append_child(surface.canvas())?;
            link.append_child(&label)?;
            library.append_child(&link)?;
        }
        Ok(())
    }
}
