/*
The banner scene: everything the frame loop mutates, in one place.

`update` runs one frame of simulation (intro easing, physics step, overlap
recoloring, spawning, steering). `resize` re-lays out the static scenery.
`press` handles a pointer click. Rendering only reads the scene.
*/

use macroquad::logging::{debug, info};
use macroquad::prelude::Vec2;

use crate::modules::collision::{BoxProbe, Collidable, Overlap, find_overlaps};
use crate::modules::config::{BannerConfig, ResizeStrategy};
use crate::modules::glyph::FloatingGlyph;
use crate::modules::label::{IntroAnimation, ParagraphBlock, StaticLabel, Walls};
use crate::modules::layout::{self, CenteredBox, Viewport};
use crate::modules::physics::{Material, PhysicsWorld};
use crate::modules::text::TextMetrics;

/// Pointer state sampled by the host for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// `None` until the pointer has been seen over the canvas.
    pub pointer: Option<Vec2>,
    pub pressed: bool,
}

pub struct Scene {
    pub config: BannerConfig,
    pub world: PhysicsWorld,
    pub viewport: Viewport,
    pub glyphs: Vec<FloatingGlyph>,
    pub labels: Vec<StaticLabel>,
    pub intro: ParagraphBlock,
    pub intro_anim: IntroAnimation,
    pub walls: Walls,
    pub frame: u64,
    // per glyph, whether it overlapped the intro block this frame
    behind_intro: Vec<bool>,
    cap_logged: bool,
}

impl Scene {
    /// Build the world for a window of the given size.
    pub fn new<M: TextMetrics + ?Sized>(config: BannerConfig, window_width: f32, window_height: f32, metrics: &M) -> Self {
        let viewport = Viewport::from_window(window_width, window_height, config.window.min_height);
        let mut world = PhysicsWorld::new(config.physics.timestep);
        let walls = Walls::new(&mut world, viewport, config.walls.thickness);

        let mobile = viewport.is_mobile(config.layout.breakpoint);
        let intro_anim = IntroAnimation::new(config.intro.slide_offset);
        let intro = ParagraphBlock {
            rect: layout::intro_box(viewport, &config.intro, mobile, intro_anim.y_offset),
            header: config.intro.header.clone(),
            paragraph: config.intro.paragraph.clone(),
            alignment: layout::intro_alignment(mobile),
            handle: None,
        };

        let mut scene = Self {
            config,
            world,
            viewport,
            glyphs: Vec::new(),
            labels: Vec::new(),
            intro,
            intro_anim,
            walls,
            frame: 0,
            behind_intro: Vec::new(),
            cap_logged: false,
        };
        scene.build_statics(metrics);
        scene
    }

    pub fn is_mobile(&self) -> bool {
        self.viewport.is_mobile(self.config.layout.breakpoint)
    }

    /// Whether glyph `i` sits behind the intro text and should be drawn blurred.
    pub fn is_behind_intro(&self, i: usize) -> bool {
        self.behind_intro.get(i).copied().unwrap_or(false)
    }

    // Create label (and paragraph) bodies at their laid-out places
    fn build_statics<M: TextMetrics + ?Sized>(&mut self, metrics: &M) {
        let cfg = &self.config.labels;
        let centers = layout::label_centers(self.viewport, cfg, self.is_mobile(), cfg.words.len());
        self.labels = cfg
            .words
            .iter()
            .zip(centers)
            .map(|(word, center)| {
                let size = layout::label_size(word, cfg, metrics);
                StaticLabel::new(&mut self.world, word, center, size, cfg.restitution)
            })
            .collect();

        if self.config.layout.paragraph_body {
            let b = CenteredBox::from_rect(self.intro.rect);
            self.intro.handle = Some(self.world.add_fixed_box(b.center, b.half, Material::default()));
        }
    }

    /// Re-layout for a new window size. Returns false when nothing changed.
    pub fn resize<M: TextMetrics + ?Sized>(&mut self, window_width: f32, window_height: f32, metrics: &M) -> bool {
        let viewport = Viewport::from_window(window_width, window_height, self.config.window.min_height);
        if viewport == self.viewport {
            return false;
        }
        self.viewport = viewport;
        let mobile = self.is_mobile();
        debug!(
            "resize to {}x{} ({} layout)",
            viewport.width,
            viewport.height,
            if mobile { "mobile" } else { "desktop" }
        );

        self.walls.place(&mut self.world, viewport, self.config.walls.thickness);
        self.pull_glyphs_inside();
        self.intro.alignment = layout::intro_alignment(mobile);
        self.intro.rect = layout::intro_box(viewport, &self.config.intro, mobile, self.intro_anim.y_offset);

        match self.config.layout.resize_strategy {
            ResizeStrategy::Reposition => {
                let cfg = &self.config.labels;
                let centers = layout::label_centers(viewport, cfg, mobile, self.labels.len());
                for (label, center) in self.labels.iter_mut().zip(centers) {
                    let size = layout::label_size(&label.text, cfg, metrics);
                    label.place(&mut self.world, center, size);
                }
                if let Some(handle) = self.intro.handle {
                    let b = CenteredBox::from_rect(self.intro.rect);
                    self.world.place_box(handle, b.center, b.half);
                }
            }
            ResizeStrategy::Rebuild => {
                for label in self.labels.drain(..) {
                    self.world.remove(label.handle);
                }
                if let Some(handle) = self.intro.handle.take() {
                    self.world.remove(handle);
                }
                self.build_statics(metrics);
            }
        }
        true
    }

    // Move every glyph box back inside the current viewport
    fn pull_glyphs_inside(&mut self) {
        for glyph in &mut self.glyphs {
            let inside = self.viewport.clamp_box(glyph.position, glyph.size() / 2.0);
            if inside != glyph.position {
                self.world.move_to(glyph.handle, inside);
                glyph.position = inside;
            }
        }
    }

    /// Spawn one glyph at a random spot if below the cap.
    pub fn spawn_glyph<M: TextMetrics + ?Sized>(&mut self, metrics: &M) -> bool {
        if self.glyphs.len() >= self.config.glyphs.cap {
            return false;
        }
        let glyph = FloatingGlyph::spawn(&mut self.world, self.viewport, &self.config.glyphs, metrics);
        self.glyphs.push(glyph);
        true
    }

    /// Spawn one glyph at a given spot if below the cap.
    pub fn spawn_glyph_at<M: TextMetrics + ?Sized>(&mut self, position: Vec2, velocity: Vec2, symbol: &str, metrics: &M) -> bool {
        if self.glyphs.len() >= self.config.glyphs.cap {
            return false;
        }
        let glyph = FloatingGlyph::spawn_at(&mut self.world, position, velocity, symbol.to_string(), &self.config.glyphs, metrics);
        self.glyphs.push(glyph);
        true
    }

    /// Recolor every glyph under `point`. Returns how many changed color.
    pub fn press(&mut self, point: Vec2) -> usize {
        self.glyphs
            .iter_mut()
            .filter(|g| g.contains(point))
            .map(|g| g.recolor())
            .filter(|changed| *changed)
            .count()
    }

    /// Run one frame.
    pub fn update<M: TextMetrics + ?Sized>(&mut self, input: &FrameInput, metrics: &M) {
        self.frame += 1;

        self.intro_anim.advance(self.config.intro.fade_rate);
        let mobile = self.is_mobile();
        self.intro.rect = layout::intro_box(self.viewport, &self.config.intro, mobile, self.intro_anim.y_offset);
        if let Some(handle) = self.intro.handle {
            let b = CenteredBox::from_rect(self.intro.rect);
            self.world.place_box(handle, b.center, b.half);
        }

        self.world.step();
        for glyph in &mut self.glyphs {
            glyph.sync(&self.world);
        }

        self.apply_overlaps();

        let interval = self.config.glyphs.spawn_interval_frames.max(1);
        if self.frame % interval == 0 {
            if self.spawn_glyph(metrics) {
                self.behind_intro.push(false);
            } else if !self.cap_logged {
                info!("glyph cap of {} reached", self.config.glyphs.cap);
                self.cap_logged = true;
            }
        }

        for glyph in &mut self.glyphs {
            glyph.steer(&mut self.world, input.pointer, &self.config.glyphs);
            if input.pointer.is_some_and(|p| glyph.contains(p)) {
                glyph.recolor();
            }
        }

        if input.pressed {
            if let Some(point) = input.pointer {
                self.press(point);
            }
        }
    }

    // Recolor everything touching something; remember who is behind the intro text
    fn apply_overlaps(&mut self) {
        let mut statics: Vec<BoxProbe> = self
            .labels
            .iter()
            .map(|l| BoxProbe { center: l.center(), size: l.size() })
            .collect();
        let intro_index = statics.len();
        statics.push(BoxProbe { center: self.intro.center(), size: self.intro.size() });

        self.behind_intro.clear();
        self.behind_intro.resize(self.glyphs.len(), false);

        for overlap in find_overlaps(&self.glyphs, &statics) {
            match overlap {
                Overlap::Glyphs(a, b) => {
                    self.glyphs[a].recolor();
                    self.glyphs[b].recolor();
                }
                Overlap::Static { glyph, target } if target == intro_index => {
                    self.behind_intro[glyph] = true;
                    if self.config.recolor_on_intro_overlap {
                        self.glyphs[glyph].recolor();
                    }
                }
                Overlap::Static { glyph, .. } => {
                    self.glyphs[glyph].recolor();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::text::MonospaceMetrics;
    use macroquad::prelude::vec2;

    fn scene(w: f32, h: f32) -> Scene {
        Scene::new(BannerConfig::default(), w, h, &MonospaceMetrics::default())
    }

    #[test]
    fn builds_three_labels_and_walls() {
        let s = scene(1920.0, 1080.0);
        assert_eq!(s.labels.len(), 3);
        assert_eq!(s.world.body_count(), 4 + 3);
        assert!(s.intro.handle.is_none());
    }

    #[test]
    fn paragraph_body_is_optional() {
        let mut cfg = BannerConfig::default();
        cfg.layout.paragraph_body = true;
        let s = Scene::new(cfg, 1280.0, 720.0, &MonospaceMetrics::default());
        assert!(s.intro.handle.is_some());
        assert_eq!(s.world.body_count(), 4 + 3 + 1);
    }

    #[test]
    fn spawns_on_interval() {
        let mut s = scene(1280.0, 720.0);
        let input = FrameInput::default();
        for _ in 0..19 {
            s.update(&input, &MonospaceMetrics::default());
        }
        assert_eq!(s.glyphs.len(), 0);
        s.update(&input, &MonospaceMetrics::default());
        assert_eq!(s.glyphs.len(), 1);
    }

    #[test]
    fn glyph_overlap_recolors_both() {
        let mut s = scene(1920.0, 1080.0);
        let m = MonospaceMetrics::default();
        // far from labels and the intro box
        s.spawn_glyph_at(vec2(1000.0, 700.0), Vec2::ZERO, "x", &m);
        s.spawn_glyph_at(vec2(1010.0, 700.0), Vec2::ZERO, "x", &m);
        s.spawn_glyph_at(vec2(1000.0, 950.0), Vec2::ZERO, "x", &m);
        s.apply_overlaps();
        assert!(s.glyphs[0].has_changed);
        assert!(s.glyphs[1].has_changed);
        assert!(!s.glyphs[2].has_changed);
    }

    #[test]
    fn label_overlap_recolors() {
        let mut s = scene(1920.0, 1080.0);
        let m = MonospaceMetrics::default();
        let at = s.labels[0].position + vec2(10.0, 0.0);
        s.spawn_glyph_at(at, Vec2::ZERO, "x", &m);
        s.apply_overlaps();
        assert!(s.glyphs[0].has_changed);
        assert!(!s.is_behind_intro(0));
    }

    #[test]
    fn intro_overlap_blurs_and_optionally_recolors() {
        let mut cfg = BannerConfig::default();
        cfg.recolor_on_intro_overlap = false;
        let m = MonospaceMetrics::default();
        let mut s = Scene::new(cfg, 1920.0, 1080.0, &m);
        let center = s.intro.center();
        s.spawn_glyph_at(center, Vec2::ZERO, "x", &m);
        s.apply_overlaps();
        assert!(s.is_behind_intro(0));
        assert!(!s.glyphs[0].has_changed);

        s.config.recolor_on_intro_overlap = true;
        s.apply_overlaps();
        assert!(s.glyphs[0].has_changed);
    }

    #[test]
    fn rebuild_replaces_label_bodies() {
        let mut cfg = BannerConfig::default();
        cfg.layout.resize_strategy = ResizeStrategy::Rebuild;
        cfg.layout.paragraph_body = true;
        let m = MonospaceMetrics::default();
        let mut s = Scene::new(cfg, 1920.0, 1080.0, &m);
        let old: Vec<_> = s.labels.iter().map(|l| l.handle).collect();
        assert!(s.resize(600.0, 900.0, &m));
        assert_eq!(s.world.body_count(), 4 + 3 + 1);
        for h in old {
            assert!(!s.world.contains(h));
        }
        assert!(s.is_mobile());
    }

    #[test]
    fn same_size_resize_is_a_no_op() {
        let mut s = scene(1280.0, 720.0);
        assert!(!s.resize(1280.0, 720.0, &MonospaceMetrics::default()));
        // min height makes these equal too
        let mut s = scene(1280.0, 200.0);
        assert!(!s.resize(1280.0, 250.0, &MonospaceMetrics::default()));
    }

    #[test]
    fn hover_recolors_glyph_under_pointer() {
        let mut s = scene(1920.0, 1080.0);
        let m = MonospaceMetrics::default();
        s.spawn_glyph_at(vec2(1000.0, 700.0), Vec2::ZERO, "x", &m);
        let input = FrameInput { pointer: Some(vec2(1000.0, 700.0)), pressed: false };
        s.update(&input, &m);
        assert!(s.glyphs[0].has_changed);
    }
}
