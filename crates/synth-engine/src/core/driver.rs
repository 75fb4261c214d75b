use crate::api::config::SceneConfig;
use crate::api::context::SceneContext;
use crate::core::viewport::{ViewportAdapter, ViewportSize};
use crate::error::{SceneError, SceneResult};
use crate::renderer::instance::FrameBuffer;
use crate::renderer::traits::{FrameData, RenderHost};
use crate::systems::render::build_frame_buffer;

/// What the caller should do after a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Schedule another frame.
    Continue,
    /// The loop is over: context lost, torn down, or never built.
    Stopped,
}

/// Runs the per-frame update against a host renderer.
///
/// One `frame` call per host refresh, no accumulator. The caller owns the
/// scheduling (the browser bridge uses `requestAnimationFrame`) and simply
/// stops re-registering once `Stopped` comes back.
pub struct AnimationDriver<H: RenderHost> {
    host: H,
    ctx: Option<SceneContext>,
    viewport: ViewportAdapter,
    frame_buffer: FrameBuffer,
    running: bool,
}

impl<H: RenderHost> AnimationDriver<H> {
    /// Build the scene and hand it to the host.
    ///
    /// In minimal mode nothing is generated or built and every frame reports
    /// `Stopped`.
    pub fn new(config: SceneConfig, mut host: H, size: ViewportSize, minimal: bool) -> SceneResult<Self> {
        config.validate()?;
        let viewport = ViewportAdapter::new(&config.viewport, size.width, size.height, size.pixel_ratio);

        if minimal {
            log::info!("minimal mode: scene not built");
            return Ok(Self {
                host,
                ctx: None,
                viewport,
                frame_buffer: FrameBuffer::new(),
                running: false,
            });
        }

        if host.is_context_lost() {
            return Err(SceneError::ContextLost);
        }

        let ctx = SceneContext::new(config, viewport.is_mobile(), size.aspect());
        host.build(&ctx.scene);
        let applied = viewport.current();
        host.resize(applied.width as u32, applied.height as u32, applied.pixel_ratio);
        log::info!(
            "scene mounted ({} layout, {}x{})",
            if viewport.is_mobile() { "mobile" } else { "desktop" },
            applied.width,
            applied.height
        );

        Ok(Self {
            host,
            ctx: Some(ctx),
            viewport,
            frame_buffer: FrameBuffer::with_capacity(256),
            running: true,
        })
    }

    /// Advance and draw one frame at wall-clock `now_ms`.
    pub fn frame(&mut self, now_ms: f64) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }
        let Some(ctx) = self.ctx.as_mut() else {
            return FrameStatus::Stopped;
        };

        if self.host.is_context_lost() {
            log::warn!("render context lost, stopping animation");
            self.running = false;
            return FrameStatus::Stopped;
        }

        ctx.update(now_ms);
        build_frame_buffer(&ctx.scene, &mut self.frame_buffer);

        let points = ctx.effects.impacts.points();
        let frame = FrameData {
            frame: ctx.clock.frame(),
            instances: &self.frame_buffer.instances,
            impact_points: points,
            uniforms: ctx.shaders.uniforms(),
            camera: ctx.camera.uniform(),
            events: ctx.effects.events(),
        };
        self.host.render(&frame);
        FrameStatus::Continue
    }

    /// Forward a surface resize, subject to the viewport hysteresis.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };
        if let Some(size) = self.viewport.offer(width, height, device_pixel_ratio) {
            ctx.camera.set_aspect(size.width, size.height);
            self.host.resize(size.width as u32, size.height as u32, size.pixel_ratio);
            log::debug!("viewport resized to {}x{} @{}", size.width, size.height, size.pixel_ratio);
        }
    }

    /// Tear down: stop the loop and release every scene resource.
    pub fn stop(&mut self) {
        if let Some(mut ctx) = self.ctx.take() {
            let nodes = ctx.scene.len();
            ctx.scene.clear();
            log::info!("scene torn down ({nodes} nodes released)");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn context(&self) -> Option<&SceneContext> {
        self.ctx.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut SceneContext> {
        self.ctx.as_mut()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::config::TerrainConfig;
    use crate::api::types::EVENT_IMPACT;
    use crate::core::rng::Scripted;
    use crate::renderer::traits::RecordingHost;
    use crate::systems::effects::Meteor;

    fn config() -> SceneConfig {
        SceneConfig {
            terrain: TerrainConfig {
                segments_x: 8,
                segments_z: 4,
                noise_seed: Some(1),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn desktop() -> ViewportSize {
        ViewportSize::new(1280.0, 720.0, 1.0)
    }

    fn driver() -> AnimationDriver<RecordingHost> {
        AnimationDriver::new(config(), RecordingHost::default(), desktop(), false).unwrap()
    }

    #[test]
    fn mount_builds_once_and_sizes_the_host() {
        let d = driver();
        assert_eq!(d.host().builds, 1);
        assert!(d.host().built_nodes > 0);
        assert_eq!(d.host().resizes, vec![(1280, 720, 1.0)]);
        assert!(d.is_running());
    }

    #[test]
    fn exactly_one_render_per_frame() {
        let mut d = driver();
        for i in 0..5 {
            assert_eq!(d.frame(i as f64 * 16.7), FrameStatus::Continue);
            assert_eq!(d.host().renders, i + 1);
        }
        assert_eq!(d.host().last_frame, 5);
        assert_eq!(d.host().last_instances.len(), d.host().built_nodes);
        assert!((d.host().last_uniforms.disk_time - 0.05).abs() < 1e-5);
    }

    #[test]
    fn lost_context_stops_without_rendering() {
        let mut d = driver();
        d.frame(0.0);
        d.host_mut().lost = true;
        assert_eq!(d.frame(16.0), FrameStatus::Stopped);
        assert_eq!(d.frame(32.0), FrameStatus::Stopped);
        assert_eq!(d.host().renders, 1);
        assert!(!d.is_running());

        // Recovery of the context does not restart a stopped loop.
        d.host_mut().lost = false;
        assert_eq!(d.frame(48.0), FrameStatus::Stopped);
    }

    #[test]
    fn lost_context_at_mount_is_an_error() {
        let host = RecordingHost { lost: true, ..Default::default() };
        let err = AnimationDriver::new(config(), host, desktop(), false).err().unwrap();
        assert!(matches!(err, SceneError::ContextLost));
    }

    #[test]
    fn teardown_releases_scene_and_stops() {
        let mut d = driver();
        d.frame(0.0);
        d.stop();
        assert!(d.context().is_none());
        assert_eq!(d.frame(16.0), FrameStatus::Stopped);
        d.resize(1920.0, 1080.0, 1.0);
        assert_eq!(d.host().renders, 1);
        assert_eq!(d.host().resizes.len(), 1);
    }

    #[test]
    fn minimal_mode_builds_nothing() {
        let mut d = AnimationDriver::new(config(), RecordingHost::default(), desktop(), true).unwrap();
        assert_eq!(d.host().builds, 0);
        assert!(d.context().is_none());
        assert_eq!(d.frame(0.0), FrameStatus::Stopped);
        assert_eq!(d.host().renders, 0);
    }

    #[test]
    fn invalid_config_rejected() {
        let mut bad = config();
        bad.terrain.segments_z = 0;
        assert!(AnimationDriver::new(bad, RecordingHost::default(), desktop(), false).is_err());
    }

    #[test]
    fn resize_is_idempotent() {
        let mut d = driver();
        d.resize(1600.0, 900.0, 1.0);
        d.resize(1600.0, 900.0, 1.0);
        assert_eq!(d.host().resizes.len(), 2);
        let aspect = d.context().unwrap().camera.aspect;
        assert!((aspect - 16.0 / 9.0).abs() < 1e-5);
    }

    #[test]
    fn impact_events_reach_the_host() {
        let mut d = driver();
        let meteor = Meteor::launch(&mut Scripted::constant(0.5));
        d.context_mut().unwrap().effects.meteors.pool.spawn(meteor);

        let mut frames = 0;
        while !d.host().events.iter().any(|e| e.kind == EVENT_IMPACT) {
            assert!(frames < 1000, "meteor never struck");
            d.frame(frames as f64 * 16.7);
            frames += 1;
        }
        assert_eq!(d.host().renders, frames);
    }
}
