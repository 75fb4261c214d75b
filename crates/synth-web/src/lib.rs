//! Browser bridge: mounts the synthwave scene into a page.
//!
//! ```ignore
//! import init, { mount, memory, accent_next } from "synth-web";
//!
//! await init();
//! const handle = mount(host, prefersReducedMotion, null);
//! // ...
//! handle.unmount();
//! ```

pub mod frame_loop;
pub mod host;
pub mod runner;

use std::cell::RefCell;

use synth_engine::{AccentColor, SceneConfig, ThemeCycle};
use wasm_bindgen::prelude::*;

pub use host::{JsHost, SceneHost};
pub use runner::SceneRunner;

thread_local! {
    static THEME: RefCell<ThemeCycle> = RefCell::new(ThemeCycle::default());
}

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

/// Handle returned by `mount`. Dropping it (or calling `free()` from
/// JavaScript) unmounts the scene.
#[wasm_bindgen]
pub struct SceneHandle {
    runner: Option<SceneRunner>,
}

#[wasm_bindgen]
impl SceneHandle {
    /// Cancel the pending frame, remove listeners and release the scene.
    pub fn unmount(&mut self) {
        if let Some(mut runner) = self.runner.take() {
            runner.unmount();
            log::info!("synth-web: unmounted");
        }
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.runner.as_ref().is_some_and(SceneRunner::is_running)
    }

    #[wasm_bindgen(getter, js_name = frameScheduled)]
    pub fn frame_scheduled(&self) -> bool {
        self.runner.as_ref().is_some_and(SceneRunner::frame_scheduled)
    }
}

/// Mount the scene. `config_json` is an optional partial `SceneConfig`;
/// missing fields keep their defaults. With `minimal_mode` nothing is
/// built and no frame is scheduled.
#[wasm_bindgen]
pub fn mount(host: SceneHost, minimal_mode: bool, config_json: Option<String>) -> Result<SceneHandle, JsValue> {
    init_logging();

    let config = match config_json.as_deref() {
        Some(json) => SceneConfig::from_json(json).map_err(runner::to_js)?,
        None => SceneConfig::default(),
    };
    let runner = SceneRunner::mount(host, minimal_mode, config)?;
    log::info!("synth-web: mounted (minimal = {minimal_mode})");
    Ok(SceneHandle { runner: Some(runner) })
}

/// Linear memory, for reading frame and scene buffers by address.
#[wasm_bindgen]
pub fn memory() -> JsValue {
    wasm_bindgen::memory()
}

/// An accent color for the page chrome.
#[wasm_bindgen]
pub struct Accent {
    name: &'static str,
    hex: &'static str,
}

#[wasm_bindgen]
impl Accent {
    #[wasm_bindgen(getter)]
    pub fn name(&self) -> String {
        self.name.to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn hex(&self) -> String {
        self.hex.to_string()
    }
}

impl From<AccentColor> for Accent {
    fn from(color: AccentColor) -> Self {
        Self { name: color.name, hex: color.hex }
    }
}

#[wasm_bindgen]
pub fn accent_current() -> Accent {
    THEME.with(|theme| theme.borrow().current().into())
}

/// Advance to the next accent color, wrapping at the end.
#[wasm_bindgen]
pub fn accent_next() -> Accent {
    THEME.with(|theme| theme.borrow_mut().advance().into())
}
