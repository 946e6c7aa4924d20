//! Display data drawn onto a [`Canvas`].
//!
//! Everything here is plain data: built once by the diagram definition, read
//! once by the renderer. Coordinates are canvas units with y pointing up;
//! font sizes and stroke widths are in points.

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Slant {
    #[default]
    Normal,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    Left,
    #[default]
    Center,
}

impl HAlign {
    pub fn text_anchor(self) -> &'static str {
        match self {
            HAlign::Left => "start",
            HAlign::Center => "middle",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    /// The anchor is the baseline of the first line.
    #[default]
    Baseline,
    /// The anchor is the middle of the whole text block.
    Center,
}

/// Font settings shared by every piece of text on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: Weight,
    pub slant: Slant,
    pub color: String,
}

impl TextStyle {
    pub fn new(size: f32, color: &str) -> Self {
        Self {
            size,
            weight: Weight::Normal,
            slant: Slant::Normal,
            color: color.to_string(),
        }
    }

    pub fn bold(mut self) -> Self {
        self.weight = Weight::Bold;
        self
    }

    pub fn italic(mut self) -> Self {
        self.slant = Slant::Italic;
        self
    }

    pub fn is_bold(&self) -> bool {
        self.weight == Weight::Bold
    }

    pub fn is_italic(&self) -> bool {
        self.slant == Slant::Italic
    }
}

/// Rounded box drawn behind an annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Chip {
    pub fill: String,
    pub stroke: String,
    /// Padding around the text as a fraction of the font size.
    pub pad: f32,
}

impl Chip {
    pub fn new(fill: &str, stroke: &str) -> Self {
        Self {
            fill: fill.to_string(),
            stroke: stroke.to_string(),
            pad: 0.3,
        }
    }
}

/// Free-floating text.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub anchor: Point,
    pub text: String,
    pub style: TextStyle,
    pub halign: HAlign,
    pub valign: VAlign,
    pub chip: Option<Chip>,
}

impl Annotation {
    pub fn new(x: f32, y: f32, text: &str, style: TextStyle) -> Self {
        Self {
            anchor: Point::new(x, y),
            text: text.to_string(),
            style,
            halign: HAlign::Center,
            valign: VAlign::Baseline,
            chip: None,
        }
    }

    pub fn align(mut self, halign: HAlign) -> Self {
        self.halign = halign;
        self
    }

    pub fn valign(mut self, valign: VAlign) -> Self {
        self.valign = valign;
        self
    }

    pub fn with_chip(mut self, chip: Chip) -> Self {
        self.chip = Some(chip);
        self
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Fill and outline of a box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f32,
    /// Rounding pad in canvas units; the box grows by it on every side and
    /// its corners use it as radius.
    pub rounding: f32,
}

/// A labeled rectangle. `x`, `y` is the lower-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub style: BoxStyle,
    pub title: String,
    pub subtitle: String,
    pub body: String,
    /// Font size of the title; subtitle and body are derived from it.
    pub title_size: f32,
    pub text_color: String,
}

impl Node {
    /// A box without labels, used as the backdrop of panels and banners.
    pub fn panel(x: f32, y: f32, width: f32, height: f32, style: BoxStyle) -> Self {
        Self {
            x,
            y,
            width,
            height,
            style,
            title: String::new(),
            subtitle: String::new(),
            body: String::new(),
            title_size: 12.0,
            text_color: "black".to_string(),
        }
    }

    pub fn labeled(mut self, title: &str, subtitle: &str, body: &str) -> Self {
        self.title = title.to_string();
        self.subtitle = subtitle.to_string();
        self.body = body.to_string();
        self
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Title, subtitle and body as annotations at their fixed offsets.
    pub fn label_annotations(&self) -> Vec<Annotation> {
        let mut labels = Vec::new();
        let cx = self.center_x();

        if !self.title.is_empty() {
            labels.push(Annotation::new(
                cx,
                self.y + self.height / 2.0,
                &self.title,
                TextStyle::new(self.title_size, &self.text_color).bold(),
            ));
        }
        if !self.subtitle.is_empty() {
            labels.push(Annotation::new(
                cx,
                self.y + 0.3,
                &self.subtitle,
                TextStyle::new(self.title_size - 2.0, &self.text_color).italic(),
            ));
        }
        if !self.body.is_empty() {
            labels.push(
                Annotation::new(
                    cx,
                    self.y + 0.1,
                    &self.body,
                    TextStyle::new(self.title_size - 3.0, &self.text_color),
                )
                .valign(VAlign::Center),
            );
        }

        labels
    }
}

/// A directional connector between two canvas points.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrow {
    pub start: Point,
    pub end: Point,
    pub color: String,
    pub opacity: f32,
    /// Head length is `0.4 * scale`, head half-width `0.2 * scale`, in points.
    pub scale: f32,
    /// Distance in points trimmed from both ends.
    pub shrink: f32,
    pub stroke_width: f32,
}

impl Arrow {
    pub fn new(start: Point, end: Point, color: &str) -> Self {
        Self {
            start,
            end,
            color: color.to_string(),
            opacity: 1.0,
            scale: 20.0,
            shrink: 5.0,
            stroke_width: 1.0,
        }
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn head_length(&self) -> f32 {
        0.4 * self.scale
    }

    pub fn head_half_width(&self) -> f32 {
        0.2 * self.scale
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Node(Node),
    Arrow(Arrow),
    Text(Annotation),
}

/// The drawing surface. Elements are drawn in insertion order.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub background: String,
    elements: Vec<Element>,
}

impl Canvas {
    pub fn new(width: f32, height: f32, background: &str) -> Self {
        Self {
            width,
            height,
            background: background.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn node(&mut self, node: Node) {
        self.push(Element::Node(node));
    }

    pub fn arrow(&mut self, arrow: Arrow) {
        self.push(Element::Arrow(arrow));
    }

    pub fn text(&mut self, annotation: Annotation) {
        self.push(Element::Text(annotation));
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_box() -> BoxStyle {
        BoxStyle {
            fill: "#ffffff".to_string(),
            stroke: "black".to_string(),
            stroke_width: 2.0,
            rounding: 0.1,
        }
    }

    #[test]
    fn node_labels_use_fixed_offsets() {
        let node = Node::panel(1.0, 9.5, 3.0, 1.2, plain_box()).labeled(
            "PHASE 1: INPUT",
            "analyzeInput()",
            "a\nb",
        );
        let labels = node.label_annotations();

        assert_eq!(labels.len(), 3);
        assert!((labels[0].anchor.x - 2.5).abs() < 1e-5);
        assert!((labels[0].anchor.y - 10.1).abs() < 1e-5);
        assert!(labels[0].style.is_bold());
        assert!((labels[1].anchor.y - 9.8).abs() < 1e-5);
        assert!(labels[1].style.is_italic());
        assert!((labels[2].anchor.y - 9.6).abs() < 1e-5);
        assert_eq!(labels[2].valign, VAlign::Center);
        assert_eq!(labels[2].style.size, 9.0);
    }

    #[test]
    fn panel_has_no_labels() {
        let node = Node::panel(0.0, 0.0, 1.0, 1.0, plain_box());
        assert!(node.label_annotations().is_empty());
    }

    #[test]
    fn canvas_keeps_insertion_order() {
        let mut canvas = Canvas::new(16.0, 12.0, "white");
        canvas.text(Annotation::new(1.0, 1.0, "first", TextStyle::new(10.0, "black")));
        canvas.node(Node::panel(0.0, 0.0, 1.0, 1.0, plain_box()));

        assert!(matches!(canvas.elements()[0], Element::Text(_)));
        assert!(matches!(canvas.elements()[1], Element::Node(_)));
    }
}
