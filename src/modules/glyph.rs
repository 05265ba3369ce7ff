/*
Floating glyphs: small dynamic boxes carrying one symbol each.

A glyph starts white and switches to a random color the first time something
touches it (pointer hover or press, another glyph, a label, the intro box).
After that its color never changes again.
*/

use macroquad::prelude::{Color, Vec2, WHITE, vec2};
use macroquad::rand;
use rapier2d::prelude::RigidBodyHandle;

use crate::modules::collision::{Collidable, is_point_in_bounds};
use crate::modules::config::GlyphConfig;
use crate::modules::layout::{Viewport, spawn_area};
use crate::modules::physics::{Material, PhysicsWorld};
use crate::modules::text::TextMetrics;

#[derive(Debug, Clone)]
pub struct FloatingGlyph {
    pub handle: RigidBodyHandle,
    pub symbol: String,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub has_changed: bool,
    // mirrored from the body after every step
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f32,
}

impl FloatingGlyph {
    /// Spawn a glyph with a random symbol at a random point of the viewport.
    pub fn spawn<M: TextMetrics + ?Sized>(
        world: &mut PhysicsWorld,
        vp: Viewport,
        cfg: &GlyphConfig,
        metrics: &M,
    ) -> Self {
        let ((x_lo, x_hi), (y_lo, y_hi)) = spawn_area(vp, cfg.spawn_margin);
        let position = vec2(rand::gen_range(x_lo, x_hi), rand::gen_range(y_lo, y_hi));
        let symbol = pick_symbol(&cfg.symbols);
        let speed = cfg.initial_speed.abs();
        let velocity = vec2(rand::gen_range(-speed, speed), rand::gen_range(-speed, speed));
        Self::spawn_at(world, position, velocity, symbol, cfg, metrics)
    }

    pub fn spawn_at<M: TextMetrics + ?Sized>(
        world: &mut PhysicsWorld,
        position: Vec2,
        velocity: Vec2,
        symbol: String,
        cfg: &GlyphConfig,
        metrics: &M,
    ) -> Self {
        let width = metrics.measure(&symbol, cfg.font_size) + cfg.padding;
        let height = cfg.height;
        let material = Material {
            restitution: cfg.restitution,
            friction: cfg.friction,
            density: cfg.density,
        };
        let handle = world.add_dynamic_box(
            position,
            vec2(width / 2.0, height / 2.0),
            velocity,
            cfg.linear_damping,
            cfg.angular_damping,
            material,
        );
        Self {
            handle,
            symbol,
            width,
            height,
            color: WHITE,
            has_changed: false,
            position,
            velocity,
            angle: 0.0,
        }
    }

    /// Copy position, velocity and angle back from the physics body.
    pub fn sync(&mut self, world: &PhysicsWorld) {
        if let Some(state) = world.state(self.handle) {
            self.position = state.position;
            self.velocity = state.velocity;
            self.angle = state.angle;
        }
    }

    /// Pull toward the pointer when it is close, then jitter.
    pub fn steer(&self, world: &mut PhysicsWorld, pointer: Option<Vec2>, cfg: &GlyphConfig) {
        world.nudge(self.handle, attraction(self.position, pointer, cfg) + jitter(cfg.jitter));
    }

    pub fn contains(&self, point: Vec2) -> bool {
        is_point_in_bounds(point, self)
    }

    /// Switch to a random color unless already switched. True if this call did it.
    pub fn recolor(&mut self) -> bool {
        if self.has_changed {
            return false;
        }
        self.color = random_color();
        self.has_changed = true;
        true
    }
}

impl Collidable for FloatingGlyph {
    fn center(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

/// Velocity change toward `pointer`, zero when it is absent or out of reach.
pub fn attraction(position: Vec2, pointer: Option<Vec2>, cfg: &GlyphConfig) -> Vec2 {
    let Some(pointer) = pointer else {
        return Vec2::ZERO;
    };
    let dir = pointer - position;
    if dir.length() < cfg.attraction_radius {
        dir.normalize_or_zero() * cfg.attraction
    } else {
        Vec2::ZERO
    }
}

fn jitter(amount: f32) -> Vec2 {
    let a = amount.abs();
    if a == 0.0 {
        return Vec2::ZERO;
    }
    vec2(rand::gen_range(-a, a), rand::gen_range(-a, a))
}

fn pick_symbol(symbols: &[String]) -> String {
    if symbols.is_empty() {
        return "*".to_string();
    }
    symbols[rand::gen_range(0, symbols.len())].clone()
}

fn random_color() -> Color {
    Color::from_rgba(rand::gen_range(0, 256) as u8, rand::gen_range(0, 256) as u8, rand::gen_range(0, 256) as u8, 255)
}
