//! Full-viewport canvas behind the page running the grid simulation.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, Window};

use super::{CanvasSurface, listen, noise_seed, viewport_size};
use crate::SiteError;
use crate::config::GridConfig;
use crate::grid::{GridSimulation, PointerState};

const CANVAS_ID: &str = "bg-canvas";

pub(crate) fn start(win: &Window, doc: &Document, config: &GridConfig) -> Result<(), SiteError> {
    let missing = || SiteError::MissingElement(format!("#{CANVAS_ID}"));
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(missing)?
        .dyn_into()
        .map_err(|_| missing())?;
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| SiteError::Js("2d context unavailable".into()))?
        .dyn_into()
        .map_err(|_| SiteError::Js("2d context has unexpected type".into()))?;

    let (width, height) = viewport_size(win);
    fit_canvas(&canvas, width, height);
    let sim = Rc::new(RefCell::new(GridSimulation::new(
        config.clone(),
        width,
        height,
        noise_seed(),
    )));
    let pointer = Rc::new(Cell::new(PointerState::Absent));

    // Pointer tracking
    {
        let pointer = pointer.clone();
        listen(win, "mousemove", move |evt| {
            if let Some(m) = evt.dyn_ref::<MouseEvent>() {
                pointer.set(PointerState::Present {
                    x: m.client_x() as f64,
                    y: m.client_y() as f64,
                });
            }
        })?;
    }
    if let Some(root) = doc.document_element() {
        let pointer = pointer.clone();
        listen(&root, "mouseleave", move |_evt| pointer.set(PointerState::Absent))?;
    }

    // Resize rebuilds the lattice; the frame loop keeps running with the new one.
    {
        let sim = sim.clone();
        let canvas = canvas.clone();
        let win_resize = win.clone();
        listen(win, "resize", move |_evt| {
            let (w, h) = viewport_size(&win_resize);
            fit_canvas(&canvas, w, h);
            sim.borrow_mut().resize(w, h);
        })?;
    }

    log::debug!("background grid: {} points", sim.borrow().points().len());
    start_frame_loop(sim, pointer, CanvasSurface(ctx));
    Ok(())
}

fn fit_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64) {
    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop(sim: Rc<RefCell<GridSimulation>>, pointer: Rc<Cell<PointerState>>, surface: CanvasSurface) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |_ts: f64| {
        sim.borrow_mut().frame(pointer.get(), &surface);
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    let Some(w) = web_sys::window() else { return };
    if let Some(cb) = f.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {}", crate::error::describe_js(&e));
        }
    }
}
