/*
Banner configuration.

Every tunable number of the banner lives here, grouped by concern. Loaded from
RON; each section is `#[serde(default)]` so a file only needs the values it
changes. The shipped file `assets/config/banner.ron` is embedded at build time.
*/

use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;

/// RON bundled into the binary, used on wasm and whenever the disk copy is unusable.
pub const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/banner.ron");

/// DejaVu Sans, bundled so every default symbol and the en dash in the intro
/// render on all targets. macroquad's built-in font is ASCII only.
pub const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: i32,
    pub height: i32,
    /// The canvas never gets shorter than this, even if the window does.
    pub min_height: f32,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "glyphfield".into(),
            width: 1280,
            height: 720,
            min_height: 300.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GlyphConfig {
    /// Hard upper bound on live glyphs.
    pub cap: usize,
    /// One glyph may spawn every this many frames.
    pub spawn_interval_frames: u64,
    /// Spawn points are inset this far from every viewport edge.
    pub spawn_margin: f32,
    pub symbols: Vec<String>,
    pub font_size: f32,
    /// Added to the measured symbol width to get the body width.
    pub padding: f32,
    pub height: f32,
    /// Initial velocity is uniform in [-initial_speed, initial_speed] per axis (px/s).
    pub initial_speed: f32,
    /// Pointer pulls glyphs closer than this distance.
    pub attraction_radius: f32,
    /// Velocity change per frame toward the pointer (px/s).
    pub attraction: f32,
    /// Per-axis random velocity change per frame is uniform in [-jitter, jitter] (px/s).
    pub jitter: f32,
    pub restitution: f32,
    pub friction: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub density: f32,
}
impl Default for GlyphConfig {
    fn default() -> Self {
        Self {
            cap: 80,
            spawn_interval_frames: 20,
            spawn_margin: 100.0,
            symbols: ["*", "+", "x", "•", ".", "✦"].iter().map(|s| s.to_string()).collect(),
            font_size: 24.0,
            padding: 16.0,
            height: 32.0,
            initial_speed: 120.0,
            attraction_radius: 150.0,
            attraction: 3.5,
            jitter: 1.7,
            restitution: 0.9,
            friction: 0.1,
            linear_damping: 1.2,
            angular_damping: 0.5,
            density: 0.001,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum MobileLabelStyle {
    /// Alternate x positions from `LabelConfig::zigzag`.
    ZigZag,
    /// Every label centered horizontally.
    Stacked,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LabelConfig {
    pub words: Vec<String>,
    /// Desktop x as a fraction of viewport width, one per word (cycled if short).
    pub desktop_x: Vec<f32>,
    pub font_size: f32,
    pub padding: f32,
    pub height: f32,
    pub restitution: f32,
    /// Desktop top/bottom padding before labels are spread across the height.
    pub vertical_padding: f32,
    /// Desktop labels are pushed down until they sit this far apart.
    pub min_spacing: f32,
    /// Label centers stay at least this far inside the viewport.
    pub margin: f32,
    pub mobile_style: MobileLabelStyle,
    pub zigzag: Vec<f32>,
    /// First mobile label row, below the estimated intro text.
    pub mobile_top: f32,
    pub mobile_row_spacing: f32,
}
impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            words: ["Empathy", "Experience", "Culture"].iter().map(|s| s.to_string()).collect(),
            desktop_x: vec![0.60, 0.80, 0.75],
            font_size: 24.0,
            padding: 20.0,
            height: 40.0,
            restitution: 0.9,
            vertical_padding: 180.0,
            min_spacing: 100.0,
            margin: 20.0,
            mobile_style: MobileLabelStyle::ZigZag,
            zigzag: vec![0.3, 0.7, 0.4, 0.65, 0.5],
            mobile_top: 290.0,
            mobile_row_spacing: 80.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct IntroConfig {
    pub header: String,
    pub paragraph: String,
    pub header_size: f32,
    pub header_leading: f32,
    pub paragraph_size: f32,
    pub paragraph_leading: f32,
    /// Reserved height for the header block (two lines).
    pub header_height: f32,
    /// Gap between header and paragraph used when sizing the box.
    pub gap: f32,
    /// Reserved height for the paragraph block (four lines).
    pub paragraph_height: f32,
    pub desktop_left: f32,
    pub desktop_width: f32,
    pub mobile_top: f32,
    pub mobile_width: f32,
    /// Lerp factor per frame for both fade and slide.
    pub fade_rate: f32,
    /// Starting downward offset of the slide-in.
    pub slide_offset: f32,
}
impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            header: "Hi – I'm Jennifer Lee".into(),
            paragraph: "A product designer who builds engaging branding and digital experiences – designed through empathy, shaped by culture, and brought to life through design thinking.".into(),
            header_size: 32.0,
            header_leading: 38.0,
            paragraph_size: 16.0,
            paragraph_leading: 22.0,
            header_height: 64.0,
            gap: 24.0,
            paragraph_height: 96.0,
            desktop_left: 40.0,
            desktop_width: 0.5,
            mobile_top: 40.0,
            mobile_width: 0.8,
            fade_rate: 0.05,
            slide_offset: 30.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ResizeStrategy {
    /// Teleport existing static bodies and resize their colliders.
    Reposition,
    /// Destroy static bodies and create new ones.
    Rebuild,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Viewports narrower than this use the mobile layout.
    pub breakpoint: f32,
    pub resize_strategy: ResizeStrategy,
    /// Give the intro box a fixed body so glyphs bounce off it.
    pub paragraph_body: bool,
}
impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            breakpoint: 810.0,
            resize_strategy: ResizeStrategy::Reposition,
            paragraph_body: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WallConfig {
    pub thickness: f32,
}
impl Default for WallConfig {
    fn default() -> Self {
        Self { thickness: 100.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LinkConfig {
    pub dash: f32,
    pub gap: f32,
    /// Milliseconds per unit of dash offset.
    pub scroll_ms: f32,
    /// Offset wraps at this value.
    pub scroll_wrap: f32,
    pub gray: u8,
    pub thickness: f32,
    /// Samples per curve when flattening.
    pub segments: usize,
    /// Also link the intro box to the first label.
    pub link_paragraph: bool,
}
impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            dash: 5.0,
            gap: 20.0,
            scroll_ms: 120.0,
            scroll_wrap: 32.0,
            gray: 180,
            thickness: 2.0,
            segments: 48,
            link_paragraph: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed timestep in seconds, one per frame.
    pub timestep: f32,
}
impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { timestep: 1.0 / 60.0 }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BannerConfig {
    pub window: WindowConfig,
    pub glyphs: GlyphConfig,
    pub labels: LabelConfig,
    pub intro: IntroConfig,
    pub layout: LayoutConfig,
    pub walls: WallConfig,
    pub links: LinkConfig,
    pub physics: PhysicsConfig,
    /// TTF overriding the bundled font; the bundled one is used when unset or unreadable.
    pub font_path: Option<String>,
    pub recolor_on_intro_overlap: bool,
    /// Offset of the blur smear drawn for glyphs behind the intro text.
    pub blur_radius: f32,
}
impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            window: Default::default(),
            glyphs: Default::default(),
            labels: Default::default(),
            intro: Default::default(),
            layout: Default::default(),
            walls: Default::default(),
            links: Default::default(),
            physics: Default::default(),
            font_path: None,
            recolor_on_intro_overlap: true,
            blur_radius: 4.0,
        }
    }
}

impl BannerConfig {
    pub fn from_ron(data: &str) -> anyhow::Result<Self> {
        ron::from_str(data).context("parse banner RON")
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Self::from_ron(&data).with_context(|| format!("load config {}", path.display()))
    }

    /// The bundled configuration, or plain defaults if it somehow fails to parse.
    pub fn embedded() -> Self {
        Self::from_ron(EMBEDDED_CONFIG).unwrap_or_default()
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<anyhow::Error>) {
        match Self::load_from_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::embedded(), Some(e)),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0 || self.window.height <= 0 {
            w.push("window dimensions must be > 0".into());
        }
        if self.window.min_height < 0.0 {
            w.push(format!("window.min_height {} negative; treated as 0", self.window.min_height));
        }
        let g = &self.glyphs;
        if g.cap == 0 {
            w.push("glyphs.cap is 0; nothing will spawn".into());
        }
        if g.cap > 500 {
            w.push(format!("glyphs.cap {} very high; overlap checks are quadratic", g.cap));
        }
        if g.spawn_interval_frames == 0 {
            w.push("glyphs.spawn_interval_frames is 0; treated as 1".into());
        }
        if g.symbols.iter().all(|s| s.trim().is_empty()) {
            w.push("glyphs.symbols has no visible symbol".into());
        }
        if g.height <= 0.0 || g.font_size <= 0.0 {
            w.push("glyphs.height and glyphs.font_size must be > 0".into());
        }
        if !(0.0..=1.5).contains(&g.restitution) {
            w.push(format!("glyphs.restitution {} outside recommended 0..1.5", g.restitution));
        }
        if g.density <= 0.0 {
            w.push("glyphs.density must be > 0; impulses will do nothing".into());
        }
        let l = &self.labels;
        if l.words.is_empty() {
            w.push("labels.words is empty; no labels or links will be drawn".into());
        }
        if l.words.len() < 3 {
            w.push(format!("{} label(s); links need three", l.words.len()));
        }
        if l.desktop_x.is_empty() {
            w.push("labels.desktop_x is empty; labels fall back to the center".into());
        }
        if l.desktop_x.iter().any(|f| !(0.0..=1.0).contains(f)) {
            w.push("labels.desktop_x fractions outside 0..1 are clamped into view".into());
        }
        if l.zigzag.is_empty() && l.mobile_style == MobileLabelStyle::ZigZag {
            w.push("labels.zigzag is empty; mobile labels fall back to the center".into());
        }
        if !(0.0..=1.0).contains(&self.intro.fade_rate) {
            w.push(format!("intro.fade_rate {} outside 0..1 overshoots", self.intro.fade_rate));
        }
        if self.links.dash + self.links.gap <= 0.0 {
            w.push("links.dash + links.gap must be > 0; links drawn solid".into());
        }
        if self.physics.timestep <= 0.0 {
            w.push("physics.timestep must be > 0".into());
        }
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_file_parses_and_is_clean() {
        let cfg = BannerConfig::from_ron(EMBEDDED_CONFIG).expect("embedded RON parses");
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.labels.words, vec!["Empathy", "Experience", "Culture"]);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = BannerConfig::from_ron("(glyphs: (cap: 50), layout: (resize_strategy: Rebuild))").unwrap();
        assert_eq!(cfg.glyphs.cap, 50);
        assert_eq!(cfg.glyphs.spawn_interval_frames, 20);
        assert_eq!(cfg.layout.resize_strategy, ResizeStrategy::Rebuild);
        assert_eq!(cfg.labels, LabelConfig::default());
    }

    #[test]
    fn validate_flags_degenerate_values() {
        let mut cfg = BannerConfig::default();
        cfg.glyphs.cap = 0;
        cfg.labels.words.clear();
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.contains("glyphs.cap")));
        assert!(warnings.iter().any(|w| w.contains("labels.words")));
    }

    #[test]
    fn missing_file_falls_back() {
        let (cfg, err) = BannerConfig::load_or_default("does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg.glyphs.cap, BannerConfig::embedded().glyphs.cap);
    }
}
