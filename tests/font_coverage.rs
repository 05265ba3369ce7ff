//! Every character the default banner draws must exist in the bundled font.

use fontdue::{Font, FontSettings};
use glyphfield::modules::config::{BannerConfig, EMBEDDED_CONFIG, EMBEDDED_FONT};

fn bundled_font() -> Font {
    Font::from_bytes(EMBEDDED_FONT, FontSettings::default()).expect("bundled font parses")
}

fn missing_chars(font: &Font, text: &str) -> Vec<char> {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|&c| font.lookup_glyph_index(c) == 0)
        .collect()
}

fn drawn_strings(cfg: &BannerConfig) -> Vec<String> {
    let mut all = cfg.glyphs.symbols.clone();
    all.extend(cfg.labels.words.iter().cloned());
    all.push(cfg.intro.header.clone());
    all.push(cfg.intro.paragraph.clone());
    all
}

#[test]
fn default_config_text_is_covered() {
    let font = bundled_font();
    for text in drawn_strings(&BannerConfig::default()) {
        assert!(missing_chars(&font, &text).is_empty(), "{text:?} missing {:?}", missing_chars(&font, &text));
    }
}

#[test]
fn shipped_config_text_is_covered() {
    let font = bundled_font();
    let cfg = BannerConfig::from_ron(EMBEDDED_CONFIG).expect("embedded RON parses");
    assert!(cfg.font_path.is_none(), "shipped config should draw with the bundled font");
    for text in drawn_strings(&cfg) {
        assert!(missing_chars(&font, &text).is_empty(), "{text:?} missing {:?}", missing_chars(&font, &text));
    }
}

#[test]
fn non_ascii_symbols_resolve() {
    let font = bundled_font();
    for c in ['•', '✦', '–'] {
        assert_ne!(font.lookup_glyph_index(c), 0, "{c:?}");
    }
}
