//! Browser wiring: frame loop, pointer tracking and resize handling.
//!
//! All state lives in one `Rc<RefCell<Host>>` shared by the frame callback
//! and the event listeners. Everything runs on the page's single thread, so
//! the callbacks never overlap.

use std::cell::RefCell;
use std::rc::Rc;

use point_field_core::{FrameScheduler, PointField, ResizePolicy};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use crate::canvas::CanvasSurface;

pub struct Host {
    pub field: PointField,
    pub surface: CanvasSurface,
    pub canvas: HtmlCanvasElement,
}

impl Host {
    /// Runs one frame. Surface failures are logged and the loop carries on.
    fn tick(&mut self) {
        if let Err(e) = self.field.frame(&mut self.surface) {
            log::warn!("frame failed: {e}");
        }
    }

    /// Resizes the canvas to the viewport and rebuilds the field in place.
    fn rebuild(&mut self, width: f64, height: f64) {
        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        match self.field.resize(width, height) {
            Ok(()) => log::debug!(
                "rebuilt field for {width}x{height}: {} points",
                self.field.points().len()
            ),
            Err(e) => log::warn!("resize to {width}x{height} failed: {e}"),
        }
    }
}

pub type Shared = Rc<RefCell<Host>>;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Current viewport size in CSS pixels.
pub fn viewport(window: &Window) -> Result<(f64, f64), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok((width, height))
}

/// Whether the page exposes a native `requestAnimationFrame`.
pub fn has_animation_frame(window: &Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("requestAnimationFrame")).unwrap_or(false)
}

fn schedule(
    window: &Window,
    scheduler: FrameScheduler,
    callback: &Closure<dyn FnMut()>,
) -> Result<(), JsValue> {
    let f = callback.as_ref().unchecked_ref();
    match scheduler {
        FrameScheduler::AnimationFrame => window.request_animation_frame(f).map(|_| ()),
        FrameScheduler::Timer { interval_ms } => window
            .set_timeout_with_callback_and_timeout_and_arguments_0(f, interval_ms)
            .map(|_| ()),
    }
}

/// Starts the perpetual frame loop. Each callback runs a frame and then
/// schedules itself again.
pub fn start_loop(window: Window, host: Shared, scheduler: FrameScheduler) -> Result<(), JsValue> {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    let win = window.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        host.borrow_mut().tick();
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = schedule(&win, scheduler, callback) {
                log::warn!("failed to schedule next frame: {e:?}");
            }
        }
    }) as Box<dyn FnMut()>));

    let first = g.borrow();
    match first.as_ref() {
        Some(callback) => schedule(&window, scheduler, callback),
        None => Ok(()),
    }
}

/// Feeds pointer-move positions into the field and drops the pointer when it
/// leaves the window.
pub fn listen_pointer(window: &Window, host: Shared) -> Result<(), JsValue> {
    {
        let host = host.clone();
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            let (x, y) = (f64::from(evt.client_x()), f64::from(evt.client_y()));
            host.borrow_mut().field.set_pointer(x, y);
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if evt.related_target().is_none() {
                host.borrow_mut().field.clear_pointer();
            }
        }) as Box<dyn FnMut(_)>);
        window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

/// Applies the resize policy whenever the viewport changes.
pub fn listen_resize(window: &Window, host: Shared, policy: ResizePolicy) -> Result<(), JsValue> {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || match policy {
        ResizePolicy::Reload => {
            if let Err(e) = win.location().reload() {
                log::warn!("reload on resize failed: {e:?}");
            }
        }
        ResizePolicy::Rebuild => match viewport(&win) {
            Ok((width, height)) => host.borrow_mut().rebuild(width, height),
            Err(e) => log::warn!("could not read viewport size: {e:?}"),
        },
    }) as Box<dyn FnMut()>);
    window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}
