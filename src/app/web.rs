use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, WheelEvent, Window};

use crate::animation::{FrameCallback, FrameLoop, FrameScheduler};
use crate::config::DemoConfig;
use crate::render::Renderer;
use super::context::SceneContext;
use super::demo::Demo;
use super::stage::Stage;

/// Schedules frames with `window.requestAnimationFrame`
pub struct AnimationFrameScheduler {
    window: Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> Result<(), String> {
        let closure = Closure::once_into_js(move |timestamp: f64| callback(timestamp));
        self.window
            .request_animation_frame(closure.unchecked_ref())
            .map(|_| ())
            .map_err(|e| format!("requestAnimationFrame failed: {:?}", e))
    }
}

/// A DOM event listener, detached when dropped
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, kind: &'static str, handler: impl FnMut(Event) + 'static) -> Result<Self, String> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| format!("Failed to listen for {}: {:?}", kind, e))?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// A stage bound to a canvas inside the page
struct DemoApp<D: Demo> {
    context: SceneContext,
    renderer: Renderer,
    stage: Stage<D>,
}

impl<D: Demo> DemoApp<D> {
    fn new(context: SceneContext, demo: D, config: &DemoConfig) -> Result<Self, String> {
        let canvas = context.append_canvas()?;
        let mut renderer = Renderer::new(canvas, config.antialias)?;
        renderer.set_pixel_ratio(context.pixel_ratio());

        let (width, height) = context.size();
        renderer.set_size(width, height)?;
        let stage = Stage::new(demo, config, width, height);

        Ok(Self {
            context,
            renderer,
            stage,
        })
    }

    fn resize(&mut self) -> Result<(), String> {
        let (width, height) = self.context.size();
        if self.stage.resize(width, height) {
            self.renderer.set_size(width, height)?;
            crate::console_log!("Resized to {}x{}", width, height);
        }
        Ok(())
    }

    /// Draw the current state, then step it for the next frame
    fn frame(&mut self, timestamp: f64) -> Result<(), String> {
        self.renderer.render(&self.stage.scene, &self.stage.camera)?;
        self.stage.advance(timestamp);
        Ok(())
    }
}

fn bind_listeners<D: Demo + 'static>(app: &Rc<RefCell<DemoApp<D>>>) -> Result<Vec<Listener>, String> {
    let (window, canvas, orbit) = {
        let app = app.borrow();
        let window: EventTarget = app.context.window.clone().into();
        let canvas: EventTarget = app.renderer.canvas().clone().into();
        (window, canvas, app.stage.controls.is_some())
    };

    let mut listeners = Vec::new();

    let resizing = app.clone();
    listeners.push(Listener::attach(&window, "resize", move |_| {
        if let Err(e) = resizing.borrow_mut().resize() {
            crate::console_log!("Resize failed: {}", e);
        }
    })?);

    if !orbit {
        return Ok(listeners);
    }

    let pressing = app.clone();
    listeners.push(Listener::attach(&canvas, "mousedown", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
            pressing.borrow_mut().stage.control(|c| c.pointer_down(mouse.button(), x, y));
        }
    })?);

    let dragging = app.clone();
    listeners.push(Listener::attach(&window, "mousemove", move |event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let (x, y) = (mouse.client_x() as f32, mouse.client_y() as f32);
            dragging.borrow_mut().stage.control(|c| {
                c.pointer_move(x, y);
            });
        }
    })?);

    let releasing = app.clone();
    listeners.push(Listener::attach(&window, "mouseup", move |_| {
        releasing.borrow_mut().stage.control(|c| c.pointer_up());
    })?);

    let zooming = app.clone();
    listeners.push(Listener::attach(&canvas, "wheel", move |event| {
        if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
            wheel.prevent_default();
            let delta = wheel.delta_y();
            zooming.borrow_mut().stage.control(|c| c.wheel(delta));
        }
    })?);

    // Right button pans
    listeners.push(Listener::attach(&canvas, "contextmenu", |event| event.prevent_default())?);

    Ok(listeners)
}

/// Handle to a running demo
#[wasm_bindgen]
pub struct DemoHandle {
    frame_loop: FrameLoop,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl DemoHandle {
    /// Cancel the frame loop and detach every event listener
    #[wasm_bindgen]
    pub fn stop(&mut self) {
        if self.frame_loop.is_running() {
            crate::console_log!("Stopping demo after {} frames", self.frame_loop.frame_count());
        }
        self.frame_loop.stop();
        self.listeners.clear();
    }

    #[wasm_bindgen]
    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Frames rendered so far
    #[wasm_bindgen]
    pub fn frame_count(&self) -> u32 {
        self.frame_loop.frame_count().min(u32::MAX as u64) as u32
    }
}

/// Mount `demo` into the element named by `config.container` and start animating it
pub fn start_demo<D: Demo + 'static>(demo: D, config: DemoConfig) -> Result<DemoHandle, String> {
    config.validate()?;

    let context = SceneContext::from_selector(&config.container)?;
    let scheduler = Rc::new(AnimationFrameScheduler::new(context.window.clone()));
    let app = Rc::new(RefCell::new(DemoApp::new(context, demo, &config)?));

    let listeners = bind_listeners(&app)?;

    let ticking = app.clone();
    let frame_loop = FrameLoop::start(scheduler, move |timestamp| ticking.borrow_mut().frame(timestamp))?;

    crate::console_log!(
        "Started demo in {} ({} meshes)",
        config.container,
        app.borrow().stage.scene.mesh_count()
    );

    Ok(DemoHandle {
        frame_loop,
        listeners,
    })
}
