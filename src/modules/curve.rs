/*
Dashed cubic bezier links between labels.

Curves are flattened to polylines and then cut into dash segments, so the
renderer only ever draws straight lines.
*/

use macroquad::prelude::{Vec2, vec2};

use crate::modules::label::{ParagraphBlock, StaticLabel};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub p0: Vec2,
    pub c0: Vec2,
    pub c1: Vec2,
    pub p1: Vec2,
}

impl CubicBezier {
    pub fn point(&self, t: f32) -> Vec2 {
        let u = 1.0 - t;
        self.p0 * (u * u * u) + self.c0 * (3.0 * u * u * t) + self.c1 * (3.0 * u * t * t) + self.p1 * (t * t * t)
    }

    /// `segments + 1` points from `p0` to `p1`.
    pub fn flatten(&self, segments: usize) -> Vec<Vec2> {
        let n = segments.max(1);
        (0..=n).map(|i| self.point(i as f32 / n as f32)).collect()
    }
}

/// Dash offset for the given elapsed time: grows by one every `scroll_ms`
/// milliseconds and wraps at `wrap`.
pub fn dash_offset(elapsed_ms: f64, scroll_ms: f32, wrap: f32) -> f32 {
    if scroll_ms <= 0.0 || wrap <= 0.0 {
        return 0.0;
    }
    ((elapsed_ms / scroll_ms as f64) % wrap as f64) as f32
}

/// Cut a polyline into the "on" pieces of a dash pattern. `phase` is how far
/// into the pattern the line starts; a growing offset passed as `-offset`
/// makes the dashes crawl forward along the line.
pub fn dash_polyline(points: &[Vec2], dash: f32, gap: f32, phase: f32) -> Vec<(Vec2, Vec2)> {
    let mut out = Vec::new();
    if points.len() < 2 {
        return out;
    }
    let period = dash.max(0.0) + gap.max(0.0);
    if period <= 0.0 || gap <= 0.0 {
        // degenerate pattern: solid line
        out.extend(points.windows(2).map(|w| (w[0], w[1])));
        return out;
    }
    let dash = dash.max(0.0);
    let mut pos = phase.rem_euclid(period);
    for w in points.windows(2) {
        let (a, b) = (w[0], w[1]);
        let len = a.distance(b);
        if len <= f32::EPSILON {
            continue;
        }
        let dir = (b - a) / len;
        let mut t = 0.0;
        while t < len {
            let on = pos < dash;
            let remaining = if on { dash - pos } else { period - pos };
            let step = remaining.min(len - t).max(1e-4);
            if on {
                out.push((a + dir * t, a + dir * (t + step).min(len)));
            }
            t += step;
            pos += step;
            if pos >= period {
                pos -= period;
            }
        }
    }
    out
}

/// The decorative links: label 0 → 1 → 2, and the intro block → label 0
/// when `link_paragraph` is set.
pub fn label_links(labels: &[StaticLabel], paragraph: Option<&ParagraphBlock>) -> Vec<CubicBezier> {
    let mut out = Vec::new();
    if labels.len() < 3 {
        return out;
    }
    let (a, b, c) = (&labels[0], &labels[1], &labels[2]);

    let start = a.right_anchor();
    let end = b.left_anchor();
    out.push(CubicBezier {
        p0: start,
        c0: start + vec2(40.0, 40.0),
        c1: end - vec2(40.0, 40.0),
        p1: end,
    });

    let start = b.right_anchor();
    let end = c.left_anchor();
    out.push(CubicBezier {
        p0: start,
        c0: start + vec2(60.0, 100.0),
        c1: end - vec2(60.0, 80.0),
        p1: end,
    });

    if let Some(block) = paragraph {
        let start = block.right_anchor();
        let end = a.left_anchor();
        out.push(CubicBezier {
            p0: start,
            c0: start + vec2(50.0, -40.0),
            c1: end - vec2(50.0, -40.0),
            p1: end,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total_len(segs: &[(Vec2, Vec2)]) -> f32 {
        segs.iter().map(|(a, b)| a.distance(*b)).sum()
    }

    #[test]
    fn bezier_hits_endpoints() {
        let c = CubicBezier { p0: vec2(0.0, 0.0), c0: vec2(40.0, 40.0), c1: vec2(60.0, -40.0), p1: vec2(100.0, 0.0) };
        let pts = c.flatten(16);
        assert_eq!(pts.len(), 17);
        assert_eq!(pts[0], c.p0);
        assert!((pts[16] - c.p1).length() < 1e-4);
        assert!((c.point(0.5) - vec2(50.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn dashes_cover_expected_fraction() {
        // 250 px straight line, 5 on / 20 off: 10 full periods
        let line = [vec2(0.0, 0.0), vec2(250.0, 0.0)];
        let segs = dash_polyline(&line, 5.0, 20.0, 0.0);
        assert_eq!(segs.len(), 10);
        assert!((total_len(&segs) - 50.0).abs() < 1e-2);
        assert_eq!(segs[0].0, vec2(0.0, 0.0));
        assert!((segs[1].0.x - 25.0).abs() < 1e-3);
    }

    #[test]
    fn negative_phase_moves_dashes_forward() {
        let line = [vec2(0.0, 0.0), vec2(100.0, 0.0)];
        let still = dash_polyline(&line, 5.0, 20.0, 0.0);
        let moved = dash_polyline(&line, 5.0, 20.0, -3.0);
        // pattern position 22 at the start: 3 px of gap, then the first full dash
        assert!((moved[0].0.x - 3.0).abs() < 1e-3, "{moved:?}");
        assert!(moved[0].0.x > still[0].0.x);
    }

    #[test]
    fn dashes_continue_across_vertices() {
        let line = [vec2(0.0, 0.0), vec2(3.0, 0.0), vec2(3.0, 100.0)];
        let segs = dash_polyline(&line, 5.0, 20.0, 0.0);
        // the first dash is split over the corner: 3 px then 2 px
        assert!((segs[0].1 - vec2(3.0, 0.0)).length() < 1e-3);
        assert!((segs[1].1 - vec2(3.0, 2.0)).length() < 1e-3);
    }

    #[test]
    fn offset_scrolls_and_wraps() {
        assert_eq!(dash_offset(0.0, 120.0, 32.0), 0.0);
        assert!((dash_offset(1200.0, 120.0, 32.0) - 10.0).abs() < 1e-4);
        assert!((dash_offset(120.0 * 33.0, 120.0, 32.0) - 1.0).abs() < 1e-4);
        assert_eq!(dash_offset(500.0, 0.0, 32.0), 0.0);
    }
}
