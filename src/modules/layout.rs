/*
Responsive layout.

Pure viewport math: where the intro box, the word labels and the walls go for a
given canvas size. Nothing here touches the physics world; the scene applies
the results to bodies.
*/

use macroquad::math::{Rect, Vec2, vec2};

use crate::modules::config::{IntroConfig, LabelConfig, MobileLabelStyle};
use crate::modules::text::TextMetrics;

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Canvas for a window: full width, never shorter than `min_height`.
    pub fn from_window(width: f32, height: f32, min_height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(min_height).max(1.0),
        }
    }

    pub fn is_mobile(&self, breakpoint: f32) -> bool {
        self.width < breakpoint
    }

    /// Whether `p` lies inside the viewport shrunk by `margin` on each side
    /// (or at its center, when the margin does not fit).
    pub fn contains_with_margin(&self, p: Vec2, margin: f32) -> bool {
        let (x_lo, x_hi) = inset(self.width, margin);
        let (y_lo, y_hi) = inset(self.height, margin);
        p.x >= x_lo && p.x <= x_hi && p.y >= y_lo && p.y <= y_hi
    }

    pub fn clamp(&self, p: Vec2, margin: f32) -> Vec2 {
        let (x_lo, x_hi) = inset(self.width, margin);
        let (y_lo, y_hi) = inset(self.height, margin);
        vec2(p.x.clamp(x_lo, x_hi), p.y.clamp(y_lo, y_hi))
    }

    /// Nearest center that keeps a box of half extents `half` fully inside.
    pub fn clamp_box(&self, p: Vec2, half: Vec2) -> Vec2 {
        let (x_lo, x_hi) = inset(self.width, half.x);
        let (y_lo, y_hi) = inset(self.height, half.y);
        vec2(p.x.clamp(x_lo, x_hi), p.y.clamp(y_lo, y_hi))
    }
}

// [margin, extent - margin], collapsed to the midpoint when that is empty
fn inset(extent: f32, margin: f32) -> (f32, f32) {
    let margin = margin.max(0.0);
    if extent < 2.0 * margin {
        (extent / 2.0, extent / 2.0)
    } else {
        (margin, extent - margin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

/// Top-left rectangle of the intro header + paragraph block.
pub fn intro_box(vp: Viewport, cfg: &IntroConfig, mobile: bool, y_offset: f32) -> Rect {
    let h = cfg.header_height + cfg.gap + cfg.paragraph_height;
    if mobile {
        let w = (vp.width * cfg.mobile_width).max(0.0);
        Rect::new((vp.width - w) / 2.0, cfg.mobile_top + y_offset, w, h)
    } else {
        let w = (vp.width * cfg.desktop_width).max(0.0);
        Rect::new(cfg.desktop_left, (vp.height - h) / 2.0 + y_offset, w, h)
    }
}

pub fn intro_alignment(mobile: bool) -> Alignment {
    if mobile { Alignment::Center } else { Alignment::Left }
}

/// Collision box of a word label.
pub fn label_size<M: TextMetrics + ?Sized>(word: &str, cfg: &LabelConfig, metrics: &M) -> Vec2 {
    vec2(metrics.measure(word, cfg.font_size) + cfg.padding, cfg.height)
}

/// Centers for `count` labels, clamped into the viewport minus `cfg.margin`.
pub fn label_centers(vp: Viewport, cfg: &LabelConfig, mobile: bool, count: usize) -> Vec<Vec2> {
    let raw = if mobile {
        mobile_centers(vp, cfg, count)
    } else {
        desktop_centers(vp, cfg, count)
    };
    raw.into_iter().map(|p| vp.clamp(p, cfg.margin)).collect()
}

fn desktop_centers(vp: Viewport, cfg: &LabelConfig, count: usize) -> Vec<Vec2> {
    // a quarter of the height at most, so the spread never inverts
    let padding = cfg.vertical_padding.clamp(0.0, vp.height / 4.0);
    let spread = vp.height - 2.0 * padding;
    let spacing = if count > 1 { spread / (count - 1) as f32 } else { 0.0 };

    let mut centers: Vec<Vec2> = Vec::with_capacity(count);
    for i in 0..count {
        let fraction = fraction_at(&cfg.desktop_x, i);
        let mut y = if count > 1 { padding + i as f32 * spacing } else { vp.height / 2.0 };
        if let Some(prev) = centers.last() {
            y = y.max(prev.y + cfg.min_spacing);
        }
        centers.push(vec2(vp.width * fraction, y));
    }
    centers
}

fn mobile_centers(vp: Viewport, cfg: &LabelConfig, count: usize) -> Vec<Vec2> {
    let (top, spacing) = mobile_rows(vp, cfg, count);
    (0..count)
        .map(|i| {
            let fraction = match cfg.mobile_style {
                MobileLabelStyle::ZigZag => fraction_at(&cfg.zigzag, i),
                MobileLabelStyle::Stacked => 0.5,
            };
            vec2(vp.width * fraction, top + i as f32 * spacing)
        })
        .collect()
}

// First row and row spacing that fit above the bottom margin. Spacing shrinks
// first, down to one label height; after that the first row moves up.
fn mobile_rows(vp: Viewport, cfg: &LabelConfig, count: usize) -> (f32, f32) {
    let (y_lo, y_hi) = inset(vp.height, cfg.margin);
    let rows = count.saturating_sub(1) as f32;
    let mut top = cfg.mobile_top.max(y_lo);
    let mut spacing = cfg.mobile_row_spacing.max(0.0);
    if rows == 0.0 || top + rows * spacing <= y_hi {
        return (top, spacing);
    }
    let floor = cfg.height.max(0.0).min(spacing);
    spacing = ((y_hi - top) / rows).max(floor);
    if top + rows * spacing > y_hi {
        top = (y_hi - rows * spacing).max(y_lo);
    }
    (top, spacing)
}

fn fraction_at(fractions: &[f32], i: usize) -> f32 {
    if fractions.is_empty() {
        0.5
    } else {
        fractions[i % fractions.len()]
    }
}

/// A box by center and half extents, the way the physics world sizes cuboids.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CenteredBox {
    pub center: Vec2,
    pub half: Vec2,
}

impl CenteredBox {
    pub fn from_rect(r: Rect) -> Self {
        Self {
            center: vec2(r.x + r.w / 2.0, r.y + r.h / 2.0),
            half: vec2(r.w / 2.0, r.h / 2.0),
        }
    }
}

/// Bottom, top, left, right walls hugging the outside of the viewport.
pub fn wall_boxes(vp: Viewport, thickness: f32) -> [CenteredBox; 4] {
    let t = thickness.max(1.0);
    let (w, h) = (vp.width, vp.height);
    [
        CenteredBox { center: vec2(w / 2.0, h + t / 2.0), half: vec2(w / 2.0 + t, t / 2.0) },
        CenteredBox { center: vec2(w / 2.0, -t / 2.0), half: vec2(w / 2.0 + t, t / 2.0) },
        CenteredBox { center: vec2(-t / 2.0, h / 2.0), half: vec2(t / 2.0, h / 2.0 + t) },
        CenteredBox { center: vec2(w + t / 2.0, h / 2.0), half: vec2(t / 2.0, h / 2.0 + t) },
    ]
}

/// Inclusive spawn range on each axis: inset by `margin`, collapsed to the
/// center on viewports too small for it.
pub fn spawn_area(vp: Viewport, margin: f32) -> ((f32, f32), (f32, f32)) {
    (inset(vp.width, margin), inset(vp.height, margin))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels() -> LabelConfig {
        LabelConfig::default()
    }

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-3
    }

    #[test]
    fn full_hd_desktop_positions() {
        let vp = Viewport::from_window(1920.0, 1080.0, 300.0);
        let centers = label_centers(vp, &labels(), vp.is_mobile(810.0), 3);
        assert!(close(centers[0], vec2(1152.0, 180.0)), "{centers:?}");
        assert!(close(centers[1], vec2(1536.0, 540.0)), "{centers:?}");
        assert!(close(centers[2], vec2(1440.0, 900.0)), "{centers:?}");
    }

    #[test]
    fn short_desktop_pushes_labels_apart() {
        let vp = Viewport::from_window(1200.0, 300.0, 300.0);
        let centers = label_centers(vp, &labels(), false, 3);
        for pair in centers.windows(2) {
            assert!(pair[1].y - pair[0].y >= 100.0 - 1e-3, "{centers:?}");
        }
        for c in &centers {
            assert!(vp.contains_with_margin(*c, 20.0), "{c:?}");
        }
    }

    #[test]
    fn mobile_zigzag_and_stacked() {
        let vp = Viewport::from_window(400.0, 900.0, 300.0);
        assert!(vp.is_mobile(810.0));
        let zig = label_centers(vp, &labels(), true, 3);
        assert!(close(zig[0], vec2(120.0, 290.0)), "{zig:?}");
        assert!(close(zig[1], vec2(280.0, 370.0)), "{zig:?}");
        assert!(close(zig[2], vec2(160.0, 450.0)), "{zig:?}");

        let cfg = LabelConfig { mobile_style: MobileLabelStyle::Stacked, ..labels() };
        let stacked = label_centers(vp, &cfg, true, 3);
        assert!(stacked.iter().all(|c| c.x == 200.0));
    }

    #[test]
    fn short_mobile_rows_do_not_overlap() {
        let cfg = labels();
        let vp = Viewport::from_window(400.0, 300.0, 300.0);
        let centers = label_centers(vp, &cfg, true, 3);
        for pair in centers.windows(2) {
            assert!(pair[1].y - pair[0].y >= cfg.height - 1e-3, "{centers:?}");
        }
        for c in &centers {
            assert!(vp.contains_with_margin(*c, cfg.margin), "{c:?}");
        }
        assert!(close(centers[2], vec2(160.0, 280.0)), "{centers:?}");
    }

    #[test]
    fn mobile_spacing_shrinks_before_top_moves() {
        let cfg = labels();
        // 290 + 2 * 80 = 450 does not fit under 420 - 20, but 290 + 2 * 55 does
        let vp = Viewport::from_window(400.0, 420.0, 300.0);
        let centers = label_centers(vp, &cfg, true, 3);
        assert!(close(centers[0], vec2(120.0, 290.0)), "{centers:?}");
        assert!(close(centers[2], vec2(160.0, 400.0)), "{centers:?}");
    }

    #[test]
    fn tiny_viewport_collapses_to_center() {
        let vp = Viewport { width: 10.0, height: 10.0 };
        for c in label_centers(vp, &labels(), true, 5) {
            assert_eq!(c, vec2(5.0, 5.0));
        }
        assert_eq!(spawn_area(vp, 100.0), ((5.0, 5.0), (5.0, 5.0)));
    }

    #[test]
    fn single_label_sits_mid_height() {
        let vp = Viewport::from_window(1000.0, 800.0, 300.0);
        let c = label_centers(vp, &labels(), false, 1);
        assert_eq!(c[0].y, 400.0);
    }

    #[test]
    fn intro_box_desktop_and_mobile() {
        let cfg = IntroConfig::default();
        let vp = Viewport::from_window(1000.0, 800.0, 300.0);
        let desk = intro_box(vp, &cfg, false, 0.0);
        assert_eq!((desk.x, desk.w, desk.h), (40.0, 500.0, 184.0));
        assert_eq!(desk.y, (800.0 - 184.0) / 2.0);

        let mob = intro_box(vp, &cfg, true, 30.0);
        assert_eq!((mob.x, mob.y, mob.w), (100.0, 70.0, 800.0));
    }

    #[test]
    fn clamp_box_keeps_whole_box_inside() {
        let vp = Viewport { width: 800.0, height: 600.0 };
        let half = vec2(14.0, 16.0);
        assert_eq!(vp.clamp_box(vec2(1500.0, 900.0), half), vec2(786.0, 584.0));
        assert_eq!(vp.clamp_box(vec2(-20.0, 5.0), half), vec2(14.0, 16.0));
        assert_eq!(vp.clamp_box(vec2(400.0, 300.0), half), vec2(400.0, 300.0));
    }

    #[test]
    fn min_height_applies() {
        let vp = Viewport::from_window(800.0, 120.0, 300.0);
        assert_eq!(vp.height, 300.0);
    }

    #[test]
    fn walls_frame_the_viewport() {
        let vp = Viewport { width: 800.0, height: 600.0 };
        let [bottom, top, left, right] = wall_boxes(vp, 100.0);
        assert_eq!(bottom.center.y - bottom.half.y, 600.0);
        assert_eq!(top.center.y + top.half.y, 0.0);
        assert_eq!(left.center.x + left.half.x, 0.0);
        assert_eq!(right.center.x - right.half.x, 800.0);
    }
}
