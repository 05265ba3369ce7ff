/*
Text measurement and wrapping.

Layout needs word widths but must not care where they come from: the running
banner measures with the loaded font, tests use a fixed advance.
*/

/// Width of a string set at a given pixel size.
pub trait TextMetrics {
    fn measure(&self, text: &str, size: f32) -> f32;
}

/// Every character advances `advance * size` pixels. Needs no graphics context.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMetrics {
    pub advance: f32,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { advance: 0.5 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * self.advance * size
    }
}

/// Greedy word wrap. A single word wider than `max_width` gets its own line.
pub fn wrap_text<M: TextMetrics + ?Sized>(text: &str, max_width: f32, size: f32, metrics: &M) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if metrics.measure(&candidate, size) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
