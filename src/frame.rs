//! Per-frame orchestration.
//!
//! [`Scene`] owns all mutable state of a session. Host events call into it one
//! at a time and run to completion, so no handler ever observes another's
//! partial update.

use crate::config::{ConfigError, SceneConfig};
use crate::ik::{Chain, ChainBuilder, FollowSolver, StepReport};
use crate::math::{GroundPoint, Transform};
use crate::render::{FrameScheduler, GeometryHandle, MeshData, RenderBackend};
use crate::view::{unproject_to_ground, Direction, OrbitCamera, Projection, UnprojectError};
use glam::{Mat4, Vec2};

pub const HEAD_COLOR: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
pub const BODY_COLOR: [f32; 4] = [1.0, 0.5, 0.0, 1.0];
pub const GROUND_COLOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];

/// Half extent of each cube segment.
const SEGMENT_HALF_EXTENT: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
struct SceneGeometry {
    cube: GeometryHandle,
    ground: GeometryHandle,
}

pub struct Scene {
    camera: OrbitCamera,
    projection: Projection,
    chain: Chain,
    target: GroundPoint,
    pointer: Option<Vec2>,
    rotation_step: f32,
    view: Mat4,
    geometry: SceneGeometry,
    frame: u64,
}

impl Scene {
    /// Validates `config`, builds the initial state and uploads the cube and
    /// ground geometry through `backend`.
    pub fn new<B: RenderBackend>(config: &SceneConfig, backend: &mut B) -> Result<Self, ConfigError> {
        config.validate()?;

        let camera = OrbitCamera::new(config.camera_radius)?
            .with_angles(config.camera_yaw, config.clamped_pitch())
            .with_axis_clamp(config.axis_clamp)?;
        let projection = Projection::new(config.fov_y, 1.0, config.near, config.far)?;
        let chain = ChainBuilder::from_config(config).build()?;

        let geometry = SceneGeometry {
            cube: backend.create_geometry(&MeshData::cube(SEGMENT_HALF_EXTENT)),
            ground: backend.create_geometry(&MeshData::ground(
                config.ground_half_extent,
                config.ground_height,
            )),
        };
        backend.set_projection(projection.matrix());

        log::info!(
            "Scene ready: {} segments, spacing {}, camera radius {}, axis clamp {:?}",
            chain.len(),
            chain.spacing(),
            camera.radius(),
            camera.axis_clamp()
        );

        Ok(Self {
            view: camera.view_matrix(),
            camera,
            projection,
            chain,
            target: GroundPoint::ORIGIN,
            pointer: None,
            rotation_step: config.rotation_step,
            geometry,
            frame: 0,
        })
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn target(&self) -> GroundPoint {
        self.target
    }

    /// View matrix as of the last tick or camera event.
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Records the pointer and retargets the chain immediately.
    pub fn on_pointer_moved(&mut self, ndc: Vec2) {
        self.pointer = Some(ndc);
        self.retarget(ndc);
    }

    pub fn on_direction(&mut self, direction: Direction) {
        self.camera.apply_rotation(direction, self.rotation_step);
        self.view = self.camera.view_matrix();
        log::debug!(
            "Camera {:?}: yaw {:.3}, pitch {:.3}",
            direction,
            self.camera.yaw(),
            self.camera.pitch()
        );
    }

    /// Follows a viewport resize. Zero-sized viewports are ignored.
    pub fn on_resize<B: RenderBackend>(&mut self, width: u32, height: u32, backend: &mut B) {
        if self.projection.set_viewport(width, height) {
            backend.set_projection(self.projection.matrix());
        }
    }

    fn retarget(&mut self, ndc: Vec2) {
        match self.unproject(ndc) {
            Ok(target) => self.target = target,
            Err(err) => log::debug!("Keeping target {:?}: {}", self.target, err),
        }
    }

    fn unproject(&self, ndc: Vec2) -> Result<GroundPoint, UnprojectError> {
        unproject_to_ground(
            ndc,
            &self.projection.matrix(),
            &self.view,
            self.camera.position(),
        )
    }

    /// Advances one frame and emits its draws to `backend`.
    pub fn tick<B: RenderBackend>(&mut self, backend: &mut B) -> StepReport {
        self.view = self.camera.view_matrix();

        if let Some(ndc) = self.pointer {
            self.retarget(ndc);
        }

        let report = FollowSolver::step(&mut self.chain, self.target);
        log::trace!("Frame {}: {:?}", self.frame, report);
        self.frame += 1;

        self.emit(backend);
        report
    }

    /// [`tick`](Self::tick) followed by a request for the next frame.
    pub fn run_frame<B: RenderBackend, S: FrameScheduler>(
        &mut self,
        backend: &mut B,
        scheduler: &mut S,
    ) -> StepReport {
        let report = self.tick(backend);
        scheduler.schedule_next_frame();
        report
    }

    fn emit<B: RenderBackend>(&self, backend: &mut B) {
        backend.clear_frame();

        backend.draw(
            self.geometry.ground,
            GROUND_COLOR,
            Transform::IDENTITY.relative_to(&self.view),
        );

        for (i, position) in self.chain.positions().enumerate() {
            let color = if i == 0 { HEAD_COLOR } else { BODY_COLOR };
            let transform = Transform::from_translation(position).relative_to(&self.view);
            backend.draw(self.geometry.cube, color, transform);
        }
    }
}
