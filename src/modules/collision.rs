/*
Overlap queries between glyphs and the static boxes of the banner.

One pass answers every "is this glyph touching something" question the frame
needs: glyph-glyph pairs, glyph-label pairs and glyph-intro-box pairs. The
answers are advisory (they recolor and blur glyphs); the physics world does
the real collision response on its own.

Glyph-glyph uses the center distance against the mean of the two widths, so
each glyph acts as a circle whose diameter is its box width. Glyph-static uses
axis-aligned boxes.

The glyph-static scan runs on Rayon when the `native` feature is on and the
target is not wasm; otherwise it stays sequential. Both paths return pairs in
the same order.
*/

use std::collections::HashMap;

use macroquad::prelude::Vec2;

#[cfg(all(feature = "native", not(target_arch = "wasm32")))]
use rayon::prelude::*;

// Anything with a center and a box size can take part in overlap queries
pub trait Collidable {
    fn center(&self) -> Vec2;
    fn size(&self) -> Vec2;
}

/// Plain center + size box, handy for the intro block and for tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxProbe {
    pub center: Vec2,
    pub size: Vec2,
}

impl Collidable for BoxProbe {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn size(&self) -> Vec2 {
        self.size
    }
}

/// What a glyph touched, by index into the static list handed to `find_overlaps`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Overlap {
    /// Two glyphs, always `a < b`.
    Glyphs(usize, usize),
    Static { glyph: usize, target: usize },
}

// Utility function to check if a point is within a centered box
#[inline]
pub fn is_point_in_bounds<T: Collidable + ?Sized>(point: Vec2, obj: &T) -> bool {
    let c = obj.center();
    let half = obj.size() / 2.0;
    point.x > c.x - half.x && point.x < c.x + half.x && point.y > c.y - half.y && point.y < c.y + half.y
}

/// Axis-aligned box test on half extents. Symmetric in its arguments.
#[inline]
pub fn boxes_overlap<T, U>(a: &T, b: &U) -> bool
where
    T: Collidable + ?Sized,
    U: Collidable + ?Sized,
{
    let d = (a.center() - b.center()).abs();
    let reach = (a.size() + b.size()) / 2.0;
    d.x < reach.x && d.y < reach.y
}

/// Distance test treating each box width as a diameter.
#[inline]
pub fn widths_overlap<T, U>(a: &T, b: &U) -> bool
where
    T: Collidable + ?Sized,
    U: Collidable + ?Sized,
{
    a.center().distance(b.center()) < (a.size().x + b.size().x) / 2.0
}

// Uniform grid bucketing glyph indices by cell
struct CellGrid {
    cell: f32,
    buckets: HashMap<(i32, i32), Vec<usize>>,
}

impl CellGrid {
    fn build<T: Collidable>(items: &[T], cell: f32) -> Self {
        let mut buckets: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (i, item) in items.iter().enumerate() {
            buckets.entry(Self::key(item.center(), cell)).or_default().push(i);
        }
        Self { cell, buckets }
    }

    #[inline]
    fn key(p: Vec2, cell: f32) -> (i32, i32) {
        ((p.x / cell).floor() as i32, (p.y / cell).floor() as i32)
    }

    // Indices in the 3x3 block of cells around `p`
    fn neighbours(&self, p: Vec2) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy) = Self::key(p, self.cell);
        (-1..=1)
            .flat_map(move |dy| (-1..=1).map(move |dx| (cx + dx, cy + dy)))
            .filter_map(move |k| self.buckets.get(&k))
            .flat_map(|v| v.iter().copied())
    }
}

/// Glyph pairs within reach of each other, each pair once with `a < b`,
/// sorted. Cells are as wide as the widest glyph, so any pair closer than the
/// mean of their widths shares a cell or sits in adjacent cells.
pub fn glyph_pairs<T: Collidable>(glyphs: &[T]) -> Vec<(usize, usize)> {
    let widest = glyphs.iter().map(|g| g.size().x).fold(0.0_f32, f32::max);
    if glyphs.len() < 2 || !widest.is_finite() || widest <= 0.0 {
        return Vec::new();
    }
    let grid = CellGrid::build(glyphs, widest);
    let mut pairs = Vec::new();
    for (i, g) in glyphs.iter().enumerate() {
        for j in grid.neighbours(g.center()) {
            if j > i && widths_overlap(g, &glyphs[j]) {
                pairs.push((i, j));
            }
        }
    }
    pairs.sort_unstable();
    pairs
}

/// Glyph-static pairs as (glyph, target) in glyph order, then target order.
pub fn static_pairs<T, U>(glyphs: &[T], statics: &[U]) -> Vec<(usize, usize)>
where
    T: Collidable + Sync,
    U: Collidable + Sync,
{
    let hits_for = |(i, g): (usize, &T)| {
        statics
            .iter()
            .enumerate()
            .filter(|(_, s)| boxes_overlap(g, *s))
            .map(|(k, _)| (i, k))
            .collect::<Vec<_>>()
    };

    #[cfg(all(feature = "native", not(target_arch = "wasm32")))]
    {
        glyphs.par_iter().enumerate().flat_map_iter(hits_for).collect()
    }

    #[cfg(not(all(feature = "native", not(target_arch = "wasm32"))))]
    {
        glyphs.iter().enumerate().flat_map(hits_for).collect()
    }
}

/// Every overlap of this frame: glyph pairs first, then glyph-static pairs.
pub fn find_overlaps<T, U>(glyphs: &[T], statics: &[U]) -> Vec<Overlap>
where
    T: Collidable + Sync,
    U: Collidable + Sync,
{
    let mut out: Vec<Overlap> = glyph_pairs(glyphs)
        .into_iter()
        .map(|(a, b)| Overlap::Glyphs(a, b))
        .collect();
    out.extend(
        static_pairs(glyphs, statics)
            .into_iter()
            .map(|(glyph, target)| Overlap::Static { glyph, target }),
    );
    out
}
