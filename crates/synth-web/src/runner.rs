use std::cell::RefCell;
use std::rc::Rc;

use synth_engine::{AnimationDriver, SceneConfig, SceneError};
use wasm_bindgen::JsValue;

use crate::frame_loop::{request_stop, window_size, FrameLoop, StopRequest};
use crate::host::{JsHost, SceneHost};

/// One mounted scene: the driver plus the browser loop feeding it.
///
/// Unlike a game runner there is no exported tick; the loop drives itself
/// through `requestAnimationFrame` until the driver stops or the runner
/// is unmounted.
pub struct SceneRunner {
    driver: Rc<RefCell<AnimationDriver<JsHost>>>,
    frame_loop: Option<FrameLoop>,
    stop: StopRequest,
}

impl SceneRunner {
    /// Build the scene and start the loop. In minimal mode the driver is
    /// created empty and no frame is ever scheduled.
    pub fn mount(host: SceneHost, minimal: bool, config: SceneConfig) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let size = window_size(&window);
        let host = JsHost::new(host, config.pools.impact_capacity);

        let driver = AnimationDriver::new(config, host, size, minimal).map_err(to_js)?;
        let driver = Rc::new(RefCell::new(driver));

        let stop = StopRequest::default();
        let frame_loop = if minimal {
            None
        } else {
            Some(FrameLoop::start(window, Rc::clone(&driver), Rc::clone(&stop))?)
        };

        Ok(Self { driver, frame_loop, stop })
    }

    /// Mid-frame the driver is borrowed by the loop and counts as running.
    pub fn is_running(&self) -> bool {
        !self.stop.get() && self.driver.try_borrow().map_or(true, |d| d.is_running())
    }

    pub fn frame_scheduled(&self) -> bool {
        self.frame_loop.as_ref().is_some_and(FrameLoop::is_scheduled)
    }

    /// Stop the loop and release the scene. Safe to call more than once,
    /// including from the host's `render`; the scene is then released once
    /// that frame returns.
    pub fn unmount(&mut self) {
        self.frame_loop.take();
        if !request_stop(&self.driver, &self.stop) {
            log::debug!("unmount during render; stopping after this frame");
        }
    }
}

impl Drop for SceneRunner {
    fn drop(&mut self) {
        self.unmount();
    }
}

pub(crate) fn to_js(err: SceneError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
