use synth_engine::{FrameData, FrameLayout, RenderHost, Scene, DEFAULT_MAX_EVENTS};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// The page's JavaScript renderer.
    ///
    /// `build` receives the scene descriptor as JSON once at mount; buffer
    /// entries carry byte addresses into the exported wasm memory. `render`
    /// receives the address and float length of the packed frame view.
    #[wasm_bindgen(typescript_type = "SceneHost")]
    pub type SceneHost;

    #[wasm_bindgen(method, js_name = isContextLost)]
    fn is_context_lost(this: &SceneHost) -> bool;

    #[wasm_bindgen(method)]
    fn build(this: &SceneHost, descriptor_json: &str);

    #[wasm_bindgen(method)]
    fn render(this: &SceneHost, frame_ptr: u32, frame_len: u32);

    #[wasm_bindgen(method)]
    fn resize(this: &SceneHost, width: u32, height: u32, pixel_ratio: f32);
}

/// `RenderHost` backed by a JavaScript `SceneHost`.
///
/// Packs every frame into one flat `f32` buffer using `FrameLayout` and
/// hands the host a pointer into linear memory; nothing is copied across
/// the boundary.
pub struct JsHost {
    inner: SceneHost,
    layout: FrameLayout,
    max_points: usize,
    packed: Vec<f32>,
}

impl JsHost {
    pub fn new(inner: SceneHost, max_points: usize) -> Self {
        Self {
            inner,
            layout: FrameLayout::new(0, max_points, DEFAULT_MAX_EVENTS),
            max_points,
            packed: Vec::new(),
        }
    }
}

impl RenderHost for JsHost {
    fn is_context_lost(&self) -> bool {
        self.inner.is_context_lost()
    }

    fn build(&mut self, scene: &Scene) {
        self.layout = FrameLayout::new(scene.len(), self.max_points, DEFAULT_MAX_EVENTS);
        self.packed = Vec::with_capacity(self.layout.total_floats);
        match scene.descriptor_json() {
            Ok(json) => {
                log::info!(
                    "frame layout: {} floats ({} bytes)",
                    self.layout.total_floats,
                    self.layout.total_bytes()
                );
                self.inner.build(&json);
            }
            Err(err) => log::error!("scene descriptor failed to serialize: {err}"),
        }
    }

    fn render(&mut self, frame: &FrameData<'_>) {
        self.layout.pack(frame, &mut self.packed);
        self.inner
            .render(self.packed.as_ptr() as u32, self.packed.len() as u32);
    }

    fn resize(&mut self, width: u32, height: u32, pixel_ratio: f32) {
        self.inner.resize(width, height, pixel_ratio);
    }
}
