use std::cell::{Cell, RefCell};
use std::rc::Rc;

use synth_engine::{AnimationDriver, FrameStatus, RenderHost, ViewportSize};
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::Window;

use crate::host::JsHost;

type SharedDriver = Rc<RefCell<AnimationDriver<JsHost>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Set when a stop arrives while a frame holds the driver.
pub type StopRequest = Rc<Cell<bool>>;

/// Current window size and pixel ratio.
pub fn window_size(window: &Window) -> ViewportSize {
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    ViewportSize::new(width as f32, height as f32, window.device_pixel_ratio() as f32)
}

/// `requestAnimationFrame` loop plus the window resize listener.
///
/// The frame closure re-registers itself until the driver reports
/// `Stopped`. Dropping the loop cancels the pending frame, removes the
/// listener and releases both closures.
pub struct FrameLoop {
    window: Window,
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    on_resize: Closure<dyn FnMut()>,
}

impl FrameLoop {
    pub fn start(window: Window, driver: SharedDriver, stop: StopRequest) -> Result<Self, JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next = Rc::clone(&callback);
        let pending_frame = Rc::clone(&pending);
        let frame_driver = Rc::clone(&driver);
        let frame_window = window.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |_timestamp: f64| {
            pending_frame.set(None);
            // Orbits read wall-clock time, not the rAF timestamp.
            let status = drive_frame(&frame_driver, &stop, js_sys::Date::now());
            if status == FrameStatus::Stopped {
                log::info!("animation loop stopped");
                return;
            }
            if let Some(cb) = next.borrow().as_ref() {
                match request_frame(&frame_window, cb) {
                    Ok(id) => pending_frame.set(Some(id)),
                    Err(err) => log::error!("requestAnimationFrame failed: {err:?}"),
                }
            }
        }) as Box<dyn FnMut(f64)>));

        let resize_window = window.clone();
        let on_resize = Closure::wrap(Box::new(move || {
            let size = window_size(&resize_window);
            driver.borrow_mut().resize(size.width, size.height, size.pixel_ratio);
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;

        if let Some(cb) = callback.borrow().as_ref() {
            pending.set(Some(request_frame(&window, cb)?));
        }

        Ok(Self { window, callback, pending, on_resize })
    }

    /// True while a frame is scheduled.
    pub fn is_scheduled(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
        // Breaks the self-reference held by the frame closure.
        self.callback.borrow_mut().take();
    }
}

fn request_frame(window: &Window, cb: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    window.request_animation_frame(cb.as_ref().unchecked_ref())
}

/// Run one frame, then apply any stop requested while it rendered.
pub(crate) fn drive_frame<H: RenderHost>(
    driver: &RefCell<AnimationDriver<H>>,
    stop: &Cell<bool>,
    now_ms: f64,
) -> FrameStatus {
    let status = driver.borrow_mut().frame(now_ms);
    if stop.get() {
        driver.borrow_mut().stop();
        return FrameStatus::Stopped;
    }
    status
}

/// Stop the driver, or leave the stop to the frame in progress when the
/// host calls back into us from `render`. Returns true if it stopped now.
pub(crate) fn request_stop<H: RenderHost>(driver: &RefCell<AnimationDriver<H>>, stop: &Cell<bool>) -> bool {
    match driver.try_borrow_mut() {
        Ok(mut driver) => {
            driver.stop();
            true
        }
        Err(_) => {
            stop.set(true);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Weak;

    use synth_engine::{FrameData, Scene, SceneConfig};

    use super::*;

    type Shared = Rc<RefCell<AnimationDriver<UnmountingHost>>>;

    /// Host whose page unmounts the scene from inside `render`.
    #[derive(Default)]
    struct UnmountingHost {
        driver: Weak<RefCell<AnimationDriver<UnmountingHost>>>,
        stop: StopRequest,
        unmount_on_render: bool,
        renders: usize,
    }

    impl RenderHost for UnmountingHost {
        fn is_context_lost(&self) -> bool {
            false
        }

        fn build(&mut self, _scene: &Scene) {}

        fn render(&mut self, _frame: &FrameData<'_>) {
            self.renders += 1;
            if self.unmount_on_render {
                if let Some(driver) = self.driver.upgrade() {
                    assert!(!request_stop(&driver, &self.stop));
                }
            }
        }

        fn resize(&mut self, _width: u32, _height: u32, _pixel_ratio: f32) {}
    }

    fn mounted(stop: &StopRequest) -> Shared {
        let host = UnmountingHost { stop: Rc::clone(stop), ..Default::default() };
        let size = ViewportSize::new(1280.0, 720.0, 1.0);
        let driver = AnimationDriver::new(SceneConfig::default(), host, size, false).unwrap();
        let driver = Rc::new(RefCell::new(driver));
        driver.borrow_mut().host_mut().driver = Rc::downgrade(&driver);
        driver
    }

    #[test]
    fn unmount_from_render_stops_after_the_frame() {
        let stop = StopRequest::default();
        let driver = mounted(&stop);
        assert_eq!(drive_frame(&driver, &stop, 0.0), FrameStatus::Continue);

        driver.borrow_mut().host_mut().unmount_on_render = true;
        assert_eq!(drive_frame(&driver, &stop, 16.0), FrameStatus::Stopped);
        assert!(stop.get());
        assert!(!driver.borrow().is_running());
        assert!(driver.borrow().context().is_none());

        assert_eq!(drive_frame(&driver, &stop, 32.0), FrameStatus::Stopped);
        assert_eq!(driver.borrow().host().renders, 2);
    }

    #[test]
    fn unmount_between_frames_stops_at_once() {
        let stop = StopRequest::default();
        let driver = mounted(&stop);
        drive_frame(&driver, &stop, 0.0);
        assert!(request_stop(&driver, &stop));
        assert!(!stop.get());
        assert!(!driver.borrow().is_running());
    }
}
