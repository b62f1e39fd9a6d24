#![deny(unsafe_code)]
//! Browser host for the flow-field animation.
//!
//! Binds a full-window `<canvas>` to the particle render loop, tracks the
//! mouse and window size, and drives frames with `requestAnimationFrame`.
//! The scroll reveal in [`reveal`] is installed separately.

mod canvas;
mod console_log;
pub mod reveal;

use std::cell::RefCell;
use std::rc::Rc;

use canvas::CanvasSurface;
use flow_field_core::{Bounds, FlowError, Frame, Xorshift64};
use flow_field_particles::params::PARTICLE_COUNT;
use flow_field_particles::{ParticleField, RenderLoop, StopHandle, Tick};
use log::LevelFilter;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{MouseEvent, Window};

#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    console_log::init(LevelFilter::Info);
}

struct Host {
    frame: Frame,
    surface: CanvasSurface,
    render_loop: RenderLoop<ParticleField>,
}

/// Returned by [`start`]; lets the page halt the animation.
#[wasm_bindgen]
pub struct FlowFieldHandle {
    stop: StopHandle,
}

#[wasm_bindgen]
impl FlowFieldHandle {
    /// Stops scheduling frames. The last rendered frame stays on the canvas.
    pub fn stop(&self) {
        self.stop.stop();
    }

    #[wasm_bindgen(getter)]
    pub fn stopped(&self) -> bool {
        self.stop.is_stopped()
    }
}

/// Maps a uniform sample in `[0, 1)` to a non-zero PRNG seed.
fn seed_from_unit(r: f64) -> u64 {
    ((r.clamp(0.0, 1.0) * u64::MAX as f64) as u64).max(1)
}

fn js_err(e: FlowError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn viewport(window: &Window) -> (f64, f64) {
    let dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0)
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn request_animation_frame(window: &Window, f: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window.request_animation_frame(f.as_ref().unchecked_ref())
}

/// Starts the animation on the canvas with id `canvas_id`.
///
/// The canvas is sized to the window, seeded with [`PARTICLE_COUNT`]
/// particles at random positions, and redrawn once per animation frame
/// until the returned handle is stopped.
#[wasm_bindgen]
pub fn start(canvas_id: &str) -> Result<FlowFieldHandle, JsValue> {
    let window = web_sys::window()
        .ok_or_else(|| js_err(FlowError::MissingHostCapability("window".into())))?;
    let document = window
        .document()
        .ok_or_else(|| js_err(FlowError::MissingHostCapability("document".into())))?;

    let surface = CanvasSurface::from_id(&document, canvas_id).map_err(js_err)?;
    let (width, height) = viewport(&window);
    surface.set_size(width, height);
    let bounds = Bounds::new(width, height).map_err(js_err)?;

    let mut rng = Xorshift64::new(seed_from_unit(js_sys::Math::random()));
    let field = ParticleField::initialize(PARTICLE_COUNT, &bounds, &mut rng);
    let mut render_loop = RenderLoop::new(field);
    render_loop.start();
    let handle = FlowFieldHandle {
        stop: render_loop.stop_handle(),
    };

    let host = Rc::new(RefCell::new(Host {
        frame: Frame::new(bounds),
        surface,
        render_loop,
    }));

    {
        let host = host.clone();
        let on_move = Closure::wrap(Box::new(move |event: MouseEvent| {
            let mut host = host.borrow_mut();
            host.frame
                .pointer
                .move_to(event.client_x() as f64, event.client_y() as f64);
        }) as Box<dyn FnMut(MouseEvent)>);
        window.add_event_listener_with_callback("mousemove", on_move.as_ref().unchecked_ref())?;
        on_move.forget();
    }

    {
        let host = host.clone();
        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            let (width, height) = viewport(&resize_window);
            let mut host = host.borrow_mut();
            host.surface.set_size(width, height);
            if let Err(e) = host.frame.bounds.resize(width, height) {
                log::warn!("resize ignored: {e}");
            }
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        on_resize.forget();
    }

    let frame_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let scheduled = frame_cb.clone();
    let loop_window = window.clone();
    *scheduled.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let tick = {
            let mut guard = host.borrow_mut();
            let Host {
                frame,
                surface,
                render_loop,
            } = &mut *guard;
            render_loop.tick(frame, surface)
        };
        match tick {
            Ok(Tick::Continue) => {
                if let Some(cb) = frame_cb.borrow().as_ref() {
                    if let Err(e) = request_animation_frame(&loop_window, cb) {
                        log::error!("requestAnimationFrame failed: {e:?}");
                    }
                }
            }
            // The loop has already logged the stop; not rescheduling ends the chain.
            Ok(Tick::Halted) => {}
            Err(e) => {
                log::error!("frame failed: {e}");
                host.borrow_mut().render_loop.stop();
            }
        }
    }) as Box<dyn FnMut()>));

    if let Some(cb) = scheduled.borrow().as_ref() {
        request_animation_frame(&window, cb)?;
    }
    log::info!("flow field started on #{canvas_id} ({width}x{height})");
    Ok(handle)
}

/// Installs the scroll reveal on the current document.
#[wasm_bindgen]
pub fn reveal_sections() -> Result<u32, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| js_err(FlowError::MissingHostCapability("document".into())))?;
    let observed = reveal::install(&document)?;
    Ok(observed as u32)
}
