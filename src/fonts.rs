use std::collections::HashMap;
use std::path::Path;

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, Style, Weight};
use log::debug;

use crate::model::TextStyle;

/// Line spacing of multi-line text, as a multiple of the font size.
pub const LINE_SPACING: f32 = 1.2;

#[derive(Hash, PartialEq, Eq, Clone)]
struct MeasureKey {
    text: String,
    font_size_bits: u32,
    is_bold: bool,
    is_italic: bool,
}

pub trait TextMeasure {
    /// Width and height in points of a single line of `text`.
    fn measure_line(&mut self, text: &str, style: &TextStyle) -> (f32, f32);

    /// Widest line and total height of a possibly multi-line `text`.
    fn measure_block(&mut self, text: &str, style: &TextStyle) -> (f32, f32) {
        let mut width: f32 = 0.0;
        let mut lines = 0;
        for line in text.split('\n') {
            let (line_width, _) = self.measure_line(line, style);
            width = width.max(line_width);
            lines += 1;
        }
        (width, lines as f32 * style.size * LINE_SPACING)
    }
}

pub struct CosmicTextMeasure {
    font_system: FontSystem,
    cache: HashMap<MeasureKey, (f32, f32)>,
}

impl CosmicTextMeasure {
    pub fn new() -> Self {
        Self {
            font_system: FontSystem::new(),
            cache: HashMap::new(),
        }
    }

    /// Loads fonts from `dir` on top of the system fonts, when it exists.
    pub fn with_fonts_dir(dir: Option<&Path>) -> Self {
        let mut measure = Self::new();
        if let Some(dir) = dir.filter(|d| d.is_dir()) {
            measure.font_system.db_mut().load_fonts_dir(dir);
            debug!(dir = dir.display().to_string(); "Loaded local fonts for measurement");
        }
        measure
    }
}

impl TextMeasure for CosmicTextMeasure {
    fn measure_line(&mut self, text: &str, style: &TextStyle) -> (f32, f32) {
        let key = MeasureKey {
            text: text.to_string(),
            font_size_bits: style.size.to_bits(),
            is_bold: style.is_bold(),
            is_italic: style.is_italic(),
        };

        if let Some(cached) = self.cache.get(&key) {
            return *cached;
        }

        let line_height = style.size * LINE_SPACING;
        let mut buffer = Buffer::new(
            &mut self.font_system,
            Metrics {
                font_size: style.size,
                line_height,
            },
        );

        buffer.set_size(&mut self.font_system, None, None);

        let attrs = Attrs::new()
            .family(Family::SansSerif)
            .weight(if style.is_bold() {
                Weight::BOLD
            } else {
                Weight::NORMAL
            })
            .style(if style.is_italic() {
                Style::Italic
            } else {
                Style::Normal
            });

        buffer.set_text(&mut self.font_system, text, &attrs, Shaping::Advanced, None);

        let mut width: f32 = 0.0;
        for run in buffer.layout_runs() {
            width = width.max(run.line_w);
        }

        let measured = (width, line_height);
        self.cache.insert(key, measured);
        measured
    }
}

impl Default for CosmicTextMeasure {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-advance measurement: every char is `advance` x font size wide.
/// Stable across machines regardless of installed fonts.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceEstimate {
    pub advance: f32,
}

impl Default for MonospaceEstimate {
    fn default() -> Self {
        Self { advance: 0.6 }
    }
}

impl TextMeasure for MonospaceEstimate {
    fn measure_line(&mut self, text: &str, style: &TextStyle) -> (f32, f32) {
        let chars = crate::xml::sanitized_char_count(text) as f32;
        (chars * style.size * self.advance, style.size * LINE_SPACING)
    }
}
