/*
Drawing. Reads the scene, never changes it.

Needs a live macroquad context, so nothing in here runs under `cargo test`;
the geometry it draws (layout, curves, dashes, wrapping) is tested where it
is computed.
*/

use std::f32::consts::TAU;

use macroquad::prelude::*;

use crate::modules::curve::{dash_offset, dash_polyline, label_links};
use crate::modules::label::ParagraphBlock;
use crate::modules::layout::Alignment;
use crate::modules::scene::Scene;
use crate::modules::text::{TextMetrics, wrap_text};

/// Measures with the loaded font, or macroquad's built-in one.
pub struct HostMetrics<'a> {
    pub font: Option<&'a Font>,
}

impl TextMetrics for HostMetrics<'_> {
    fn measure(&self, text: &str, size: f32) -> f32 {
        measure_text(text, self.font, size.max(1.0) as u16, 1.0).width
    }
}

/// Draw one frame. `elapsed_ms` drives the dash animation.
pub fn draw_scene(scene: &Scene, font: Option<&Font>, elapsed_ms: f64) {
    clear_background(BLACK);
    draw_intro(scene, font);
    draw_labels(scene, font);
    draw_glyphs(scene, font);
    draw_links(scene, elapsed_ms);
}

fn draw_intro(scene: &Scene, font: Option<&Font>) {
    let cfg = &scene.config.intro;
    let block = &scene.intro;
    let metrics = HostMetrics { font };
    let color = Color::new(1.0, 1.0, 1.0, (scene.intro_anim.alpha / 255.0).clamp(0.0, 1.0));

    let header_lines = wrap_text(&block.header, block.rect.w, cfg.header_size, &metrics);
    draw_lines(&header_lines, block, block.rect.y, cfg.header_size, cfg.header_leading, color, font);

    let paragraph_top = block.rect.y + cfg.header_height + cfg.gap / 2.0;
    let paragraph_lines = wrap_text(&block.paragraph, block.rect.w, cfg.paragraph_size, &metrics);
    draw_lines(&paragraph_lines, block, paragraph_top, cfg.paragraph_size, cfg.paragraph_leading, color, font);
}

fn draw_lines(
    lines: &[String],
    block: &ParagraphBlock,
    top: f32,
    size: f32,
    leading: f32,
    color: Color,
    font: Option<&Font>,
) {
    let font_size = size.max(1.0) as u16;
    for (i, line) in lines.iter().enumerate() {
        let dims = measure_text(line, font, font_size, 1.0);
        let x = match block.alignment {
            Alignment::Left => block.rect.x,
            Alignment::Center => block.rect.x + (block.rect.w - dims.width) / 2.0,
        };
        // draw_text takes the baseline
        let baseline = top + i as f32 * leading + dims.offset_y;
        draw_text_ex(line, x, baseline, TextParams { font, font_size, color, ..Default::default() });
    }
}

fn draw_labels(scene: &Scene, font: Option<&Font>) {
    let font_size = scene.config.labels.font_size.max(1.0) as u16;
    for label in &scene.labels {
        draw_centered(&label.text, label.position, 0.0, font_size, WHITE, font);
    }
}

fn draw_glyphs(scene: &Scene, font: Option<&Font>) {
    let font_size = scene.config.glyphs.font_size.max(1.0) as u16;
    let blur = scene.config.blur_radius.max(0.0);
    for (i, glyph) in scene.glyphs.iter().enumerate() {
        if scene.is_behind_intro(i) && blur > 0.0 {
            // smear: faint copies on a ring stand in for a blur filter
            let faint = Color { a: glyph.color.a * 0.2, ..glyph.color };
            for k in 0..8 {
                let offset = Vec2::from_angle(k as f32 * TAU / 8.0) * blur;
                draw_centered(&glyph.symbol, glyph.position + offset, glyph.angle, font_size, faint, font);
            }
        } else {
            draw_centered(&glyph.symbol, glyph.position, glyph.angle, font_size, glyph.color, font);
        }
    }
}

// Text centered on `center`, rotated by `angle` around it
fn draw_centered(text: &str, center: Vec2, angle: f32, font_size: u16, color: Color, font: Option<&Font>) {
    let dims = measure_text(text, font, font_size, 1.0);
    let local = vec2(-dims.width / 2.0, dims.offset_y / 2.0);
    let origin = center + Vec2::from_angle(angle).rotate(local);
    draw_text_ex(
        text,
        origin.x,
        origin.y,
        TextParams { font, font_size, color, rotation: angle, ..Default::default() },
    );
}

fn draw_links(scene: &Scene, elapsed_ms: f64) {
    let cfg = &scene.config.links;
    let paragraph = cfg.link_paragraph.then_some(&scene.intro);
    let offset = dash_offset(elapsed_ms, cfg.scroll_ms, cfg.scroll_wrap);
    let color = Color::from_rgba(cfg.gray, cfg.gray, cfg.gray, 255);
    for curve in label_links(&scene.labels, paragraph) {
        let points = curve.flatten(cfg.segments);
        for (a, b) in dash_polyline(&points, cfg.dash, cfg.gap, -offset) {
            draw_line(a.x, a.y, b.x, b.y, cfg.thickness, color);
        }
    }
}
