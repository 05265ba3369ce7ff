/*
Static scenery: word labels, the intro paragraph block and the walls.
*/

use macroquad::prelude::{Rect, Vec2, vec2};
use rapier2d::prelude::RigidBodyHandle;

use crate::modules::collision::Collidable;
use crate::modules::layout::{Alignment, CenteredBox, Viewport, wall_boxes};
use crate::modules::physics::{Material, PhysicsWorld};

/// A word on a fixed body. Glyphs bounce off it.
#[derive(Debug, Clone)]
pub struct StaticLabel {
    pub handle: RigidBodyHandle,
    pub text: String,
    pub width: f32,
    pub height: f32,
    pub position: Vec2,
}

impl StaticLabel {
    pub fn new(world: &mut PhysicsWorld, text: &str, center: Vec2, size: Vec2, restitution: f32) -> Self {
        let material = Material { restitution, ..Material::default() };
        let handle = world.add_fixed_box(center, size / 2.0, material);
        Self {
            handle,
            text: text.to_string(),
            width: size.x,
            height: size.y,
            position: center,
        }
    }

    /// Teleport the body and resize its collider.
    pub fn place(&mut self, world: &mut PhysicsWorld, center: Vec2, size: Vec2) {
        world.place_box(self.handle, center, size / 2.0);
        self.position = center;
        self.width = size.x;
        self.height = size.y;
    }

    /// Middle of the left edge, where incoming links end.
    pub fn left_anchor(&self) -> Vec2 {
        vec2(self.position.x - self.width / 2.0, self.position.y)
    }

    /// Middle of the right edge, where outgoing links start.
    pub fn right_anchor(&self) -> Vec2 {
        vec2(self.position.x + self.width / 2.0, self.position.y)
    }
}

impl Collidable for StaticLabel {
    fn center(&self) -> Vec2 {
        self.position
    }

    fn size(&self) -> Vec2 {
        vec2(self.width, self.height)
    }
}

/// The intro header + paragraph box.
#[derive(Debug, Clone)]
pub struct ParagraphBlock {
    pub rect: Rect,
    pub header: String,
    pub paragraph: String,
    pub alignment: Alignment,
    /// Present when the block also blocks glyphs physically.
    pub handle: Option<RigidBodyHandle>,
}

impl ParagraphBlock {
    pub fn right_anchor(&self) -> Vec2 {
        vec2(self.rect.x + self.rect.w, self.rect.y + self.rect.h / 2.0)
    }
}

impl Collidable for ParagraphBlock {
    fn center(&self) -> Vec2 {
        vec2(self.rect.x + self.rect.w / 2.0, self.rect.y + self.rect.h / 2.0)
    }

    fn size(&self) -> Vec2 {
        vec2(self.rect.w, self.rect.h)
    }
}

/// Fade-in and slide-up of the intro block, eased every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntroAnimation {
    pub alpha: f32,
    pub y_offset: f32,
}

impl IntroAnimation {
    pub fn new(slide_offset: f32) -> Self {
        Self { alpha: 0.0, y_offset: slide_offset }
    }

    /// Move a fixed fraction of the remaining way toward opaque and in place.
    pub fn advance(&mut self, rate: f32) {
        self.alpha = lerp(self.alpha, 255.0, rate);
        self.y_offset = lerp(self.y_offset, 0.0, rate);
    }
}

pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Four fixed boxes just outside the viewport.
#[derive(Debug, Clone, Copy)]
pub struct Walls {
    pub handles: [RigidBodyHandle; 4],
}

impl Walls {
    pub fn new(world: &mut PhysicsWorld, vp: Viewport, thickness: f32) -> Self {
        let boxes = wall_boxes(vp, thickness);
        let handles = boxes.map(|b: CenteredBox| world.add_fixed_box(b.center, b.half, Material::default()));
        Self { handles }
    }

    pub fn place(&self, world: &mut PhysicsWorld, vp: Viewport, thickness: f32) {
        for (handle, b) in self.handles.iter().zip(wall_boxes(vp, thickness)) {
            world.place_box(*handle, b.center, b.half);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intro_animation_converges() {
        let mut anim = IntroAnimation::new(30.0);
        anim.advance(0.05);
        assert!((anim.alpha - 12.75).abs() < 1e-4);
        assert!((anim.y_offset - 28.5).abs() < 1e-4);
        for _ in 0..300 {
            anim.advance(0.05);
        }
        assert!(anim.alpha > 254.9 && anim.alpha <= 255.0);
        assert!(anim.y_offset.abs() < 0.01);
    }

    #[test]
    fn label_anchors_and_place() {
        let mut world = PhysicsWorld::new(1.0 / 60.0);
        let mut label = StaticLabel::new(&mut world, "Culture", vec2(100.0, 50.0), vec2(80.0, 40.0), 0.9);
        assert_eq!(label.left_anchor(), vec2(60.0, 50.0));
        assert_eq!(label.right_anchor(), vec2(140.0, 50.0));
        label.place(&mut world, vec2(300.0, 200.0), vec2(100.0, 40.0));
        assert_eq!(world.state(label.handle).unwrap().position, vec2(300.0, 200.0));
        assert_eq!(label.right_anchor(), vec2(350.0, 200.0));
    }

    #[test]
    fn paragraph_block_collides_as_its_rect() {
        let block = ParagraphBlock {
            rect: Rect::new(40.0, 100.0, 500.0, 184.0),
            header: String::new(),
            paragraph: String::new(),
            alignment: Alignment::Left,
            handle: None,
        };
        assert_eq!(block.center(), vec2(290.0, 192.0));
        assert_eq!(block.size(), vec2(500.0, 184.0));
        assert_eq!(block.right_anchor(), vec2(540.0, 192.0));
    }
}
