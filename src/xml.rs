use std::fmt::Write;

/// XML 1.0 valid char ranges:
/// - 0x09, 0x0A, 0x0D
/// - 0x20..=0xD7FF
/// - 0xE000..=0xFFFD
/// - 0x10000..=0x10FFFF
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

pub fn sanitized_char_count(text: &str) -> usize {
    text.chars().filter(|&c| is_valid_xml_char(c)).count()
}

pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if !is_valid_xml_char(c) {
            continue;
        }
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builder for one SVG element. Numbers are written with two decimals so the
/// output is stable byte for byte.
pub struct Tag {
    name: &'static str,
    attrs: String,
}

impl Tag {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            attrs: String::new(),
        }
    }

    pub fn num(mut self, key: &str, value: f32) -> Self {
        let _ = write!(self.attrs, r#" {key}="{value:.2}""#);
        self
    }

    pub fn str(mut self, key: &str, value: &str) -> Self {
        let _ = write!(self.attrs, r#" {key}="{}""#, escape_xml(value));
        self
    }

    /// Skips the attribute when `value` is `None`.
    pub fn opt_str(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.str(key, value),
            None => self,
        }
    }

    pub fn empty(self) -> String {
        format!("<{}{} />", self.name, self.attrs)
    }

    pub fn with_text(self, text: &str) -> String {
        format!("<{0}{1}>{2}</{0}>", self.name, self.attrs, escape_xml(text))
    }
}
