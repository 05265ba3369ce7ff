/*
Physics world.

Owns every Rapier set the pipeline needs and exposes the handful of operations
the banner uses: fixed boxes, dynamic boxes, impulses, teleporting, removal
and a single fixed step.
*/

use macroquad::math::{Vec2, vec2};
// Import Rapier2D physics engine - provides 2D rigid body physics simulation
use rapier2d::prelude::*;

/// Material of a collider.
#[derive(Debug, Clone, Copy)]
pub struct Material {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self { restitution: 0.0, friction: 0.5, density: 1.0 }
    }
}

/// Snapshot of a body the rest of the banner cares about.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
}

pub struct PhysicsWorld {
    // Zero gravity: glyphs float
    gravity: Vector<Real>,

    // Integration parameters control the physics simulation timestep and solver iterations
    integration_params: IntegrationParameters,

    // PhysicsPipeline orchestrates all physics computations each frame
    pipeline: PhysicsPipeline,

    // IslandManager groups bodies that can interact for more efficient simulation
    island_manager: IslandManager,

    // BroadPhase performs coarse collision detection to quickly eliminate impossible collisions
    broad_phase: BroadPhase,

    // NarrowPhase performs precise collision detection on pairs identified by broad phase
    narrow_phase: NarrowPhase,

    // RigidBodySet stores all rigid bodies in the simulation (walls, labels, glyphs)
    bodies: RigidBodySet,

    // ColliderSet stores all collision shapes attached to rigid bodies
    colliders: ColliderSet,

    // Joint sets are not used by the banner but are required by the physics pipeline
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,

    // CCDSolver keeps fast glyphs from tunneling through thin obstacles
    ccd: CCDSolver,
}

impl PhysicsWorld {
    pub fn new(timestep: f32) -> Self {
        let mut integration_params = IntegrationParameters::default();
        if timestep > 0.0 {
            integration_params.dt = timestep;
        }
        Self {
            gravity: vector![0.0, 0.0],
            integration_params,
            pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    /// Timestep used by `step`, in seconds.
    pub fn timestep(&self) -> f32 {
        self.integration_params.dt
    }

    /// Immovable box centered at `center` with half extents `half`.
    pub fn add_fixed_box(&mut self, center: Vec2, half: Vec2, material: Material) -> RigidBodyHandle {
        // RigidBodyBuilder::fixed() creates a body with infinite mass that won't move
        let body = RigidBodyBuilder::fixed().translation(vector![center.x, center.y]).build();
        self.insert_box(body, half, material)
    }

    /// Movable box that starts at `center` with linear velocity `velocity` (px/s).
    pub fn add_dynamic_box(
        &mut self,
        center: Vec2,
        half: Vec2,
        velocity: Vec2,
        linear_damping: f32,
        angular_damping: f32,
        material: Material,
    ) -> RigidBodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .translation(vector![center.x, center.y])
            .linvel(vector![velocity.x, velocity.y])
            .linear_damping(linear_damping)
            .angular_damping(angular_damping)
            .ccd_enabled(true)
            .build();
        self.insert_box(body, half, material)
    }

    fn insert_box(&mut self, body: RigidBody, half: Vec2, material: Material) -> RigidBodyHandle {
        let collider = ColliderBuilder::cuboid(half.x.max(0.5), half.y.max(0.5))
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .build();
        let handle = self.bodies.insert(body);
        // The collider inherits the position and movement of its parent body
        self.colliders.insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Teleport a body and resize its box collider(s).
    pub fn place_box(&mut self, handle: RigidBodyHandle, center: Vec2, half: Vec2) {
        let Some(body) = self.bodies.get_mut(handle) else {
            return;
        };
        body.set_translation(vector![center.x, center.y], true);
        let attached: Vec<ColliderHandle> = body.colliders().to_vec();
        for ch in attached {
            if let Some(collider) = self.colliders.get_mut(ch) {
                collider.set_shape(SharedShape::cuboid(half.x.max(0.5), half.y.max(0.5)));
            }
        }
    }

    /// Teleport a body, keeping its shape and velocity.
    pub fn move_to(&mut self, handle: RigidBodyHandle, center: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            body.set_translation(vector![center.x, center.y], true);
        }
    }

    pub fn remove(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Change a dynamic body's velocity by `delta_v` (px/s) through an impulse
    /// scaled by its mass.
    pub fn nudge(&mut self, handle: RigidBodyHandle, delta_v: Vec2) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let mass = body.mass();
            if mass > 0.0 {
                body.apply_impulse(vector![delta_v.x * mass, delta_v.y * mass], true);
            }
        }
    }

    pub fn state(&self, handle: RigidBodyHandle) -> Option<BodyState> {
        self.bodies.get(handle).map(|body| {
            let pos = body.translation();
            let vel = body.linvel();
            BodyState {
                position: vec2(pos.x, pos.y),
                velocity: vec2(vel.x, vel.y),
                angle: body.rotation().angle(),
            }
        })
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Advance the physics simulation by one timestep.
    /// This computes forces, integrates velocities, detects collisions, and resolves them
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.integration_params,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,  // Optional query pipeline for raycasts/shape casts
            &(),   // Physics hooks for custom collision filtering
            &(),   // Event handler for collision/contact events
        );
    }
}
