//! Composes a [`Canvas`] into an SVG document.
//!
//! SVG user space is in points with y pointing down. Elements are emitted in
//! canvas order, so later elements paint over earlier ones.

use log::debug;

use crate::fonts::{LINE_SPACING, TextMeasure};
use crate::geometry::{BBox, Extents, POINTS_PER_UNIT, Point};
use crate::model::{Annotation, Arrow, Canvas, Element, HAlign, Node, VAlign};
use crate::xml::Tag;

const FONT_FAMILY: &str = "sans-serif";
/// Glyph extents above and below the baseline, as a fraction of font size.
const ASCENT: f32 = 0.76;
const DESCENT: f32 = 0.24;
const CHIP_STROKE_WIDTH: f32 = 1.0;

/// Result of composing a canvas.
#[derive(Debug, Clone)]
pub struct RenderedSvg {
    pub svg: String,
    /// Document size in points.
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Crop the document to the drawn content.
    pub tight: bool,
    /// Margin around the cropped content, in inches.
    pub pad_inches: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            tight: true,
            pad_inches: 0.1,
        }
    }
}

pub struct SvgRenderer<'a, T: TextMeasure> {
    measure: &'a mut T,
    options: RenderOptions,
    canvas_height: f32,
    content: String,
    extents: Extents,
}

impl<'a, T: TextMeasure> SvgRenderer<'a, T> {
    pub fn new(measure: &'a mut T, options: RenderOptions) -> Self {
        Self {
            measure,
            options,
            canvas_height: 0.0,
            content: String::new(),
            extents: Extents::default(),
        }
    }

    pub fn render(mut self, canvas: &Canvas) -> RenderedSvg {
        self.canvas_height = canvas.height;

        for element in canvas.elements() {
            match element {
                Element::Node(node) => self.draw_node(node),
                Element::Arrow(arrow) => self.draw_arrow(arrow),
                Element::Text(annotation) => self.draw_annotation(annotation),
            }
        }

        let full = BBox::new(
            0.0,
            0.0,
            canvas.width * POINTS_PER_UNIT,
            canvas.height * POINTS_PER_UNIT,
        );
        let view = match (self.options.tight, self.extents.bounds()) {
            (true, Some(bounds)) => {
                bounds.with_padding(self.options.pad_inches * POINTS_PER_UNIT)
            }
            _ => full,
        };

        debug!(
            elements = canvas.elements().len(),
            view_x = view.x,
            view_y = view.y,
            view_width = view.width,
            view_height = view.height;
            "Composed SVG"
        );

        RenderedSvg {
            svg: self.finalize(&view, &canvas.background),
            width: view.width,
            height: view.height,
        }
    }

    fn to_svg(&self, point: Point) -> Point {
        Point::new(
            point.x * POINTS_PER_UNIT,
            (self.canvas_height - point.y) * POINTS_PER_UNIT,
        )
    }

    fn draw_node(&mut self, node: &Node) {
        let pad = node.style.rounding;
        let top_left = self.to_svg(Point::new(node.x - pad, node.y + node.height + pad));
        let bbox = BBox::new(
            top_left.x,
            top_left.y,
            (node.width + pad * 2.0) * POINTS_PER_UNIT,
            (node.height + pad * 2.0) * POINTS_PER_UNIT,
        );

        self.content.push_str(
            &Tag::new("rect")
                .num("x", bbox.x)
                .num("y", bbox.y)
                .num("width", bbox.width)
                .num("height", bbox.height)
                .num("rx", pad * POINTS_PER_UNIT)
                .str("fill", &node.style.fill)
                .str("stroke", &node.style.stroke)
                .num("stroke-width", node.style.stroke_width)
                .empty(),
        );
        self.extents
            .include(bbox.with_padding(node.style.stroke_width / 2.0));

        for label in node.label_annotations() {
            self.draw_annotation(&label);
        }
    }

    fn draw_annotation(&mut self, annotation: &Annotation) {
        let style = &annotation.style;
        let anchor = self.to_svg(annotation.anchor);
        let line_height = style.size * LINE_SPACING;
        let lines: Vec<&str> = annotation.lines().collect();

        let first_baseline = match annotation.valign {
            VAlign::Baseline => anchor.y,
            VAlign::Center => {
                let block_height = line_height * lines.len() as f32;
                anchor.y - block_height / 2.0 + line_height / 2.0 + style.size / 3.0
            }
        };
        let last_baseline = first_baseline + line_height * lines.len().saturating_sub(1) as f32;

        let (width, _) = self.measure.measure_block(&annotation.text, style);
        let left = match annotation.halign {
            HAlign::Left => anchor.x,
            HAlign::Center => anchor.x - width / 2.0,
        };
        let text_box = BBox::from_corners(
            left,
            first_baseline - style.size * ASCENT,
            left + width,
            last_baseline + style.size * DESCENT,
        );

        if let Some(chip) = &annotation.chip {
            let pad = chip.pad * style.size;
            let chip_box = text_box.with_padding(pad);
            self.content.push_str(
                &Tag::new("rect")
                    .num("x", chip_box.x)
                    .num("y", chip_box.y)
                    .num("width", chip_box.width)
                    .num("height", chip_box.height)
                    .num("rx", pad)
                    .str("fill", &chip.fill)
                    .str("stroke", &chip.stroke)
                    .num("stroke-width", CHIP_STROKE_WIDTH)
                    .empty(),
            );
            self.extents
                .include(chip_box.with_padding(CHIP_STROKE_WIDTH / 2.0));
        }

        for (idx, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            self.content.push_str(
                &Tag::new("text")
                    .num("x", anchor.x)
                    .num("y", first_baseline + idx as f32 * line_height)
                    .str("font-family", FONT_FAMILY)
                    .num("font-size", style.size)
                    .str("fill", &style.color)
                    .str("text-anchor", annotation.halign.text_anchor())
                    .opt_str("font-weight", style.is_bold().then_some("bold"))
                    .opt_str("font-style", style.is_italic().then_some("italic"))
                    .with_text(line),
            );
        }
        self.extents.include(text_box);
    }

    fn draw_arrow(&mut self, arrow: &Arrow) {
        let start = self.to_svg(arrow.start);
        let end = self.to_svg(arrow.end);
        let Some((tail, tip, left, right)) = arrow_geometry(arrow, start, end) else {
            debug!(
                start_x = arrow.start.x,
                start_y = arrow.start.y;
                "Skipping arrow shorter than its shrink distance"
            );
            return;
        };

        let opacity = (arrow.opacity < 1.0).then(|| format!("{:.2}", arrow.opacity));
        self.content.push_str(
            &Tag::new("path")
                .str(
                    "d",
                    &format!(
                        "M {:.2} {:.2} L {:.2} {:.2} M {:.2} {:.2} L {:.2} {:.2} L {:.2} {:.2}",
                        tail.x, tail.y, tip.x, tip.y, left.x, left.y, tip.x, tip.y, right.x,
                        right.y
                    ),
                )
                .str("fill", "none")
                .str("stroke", &arrow.color)
                .num("stroke-width", arrow.stroke_width)
                .opt_str("stroke-opacity", opacity.as_deref())
                .str("stroke-linecap", "round")
                .str("stroke-linejoin", "round")
                .empty(),
        );

        for point in [tail, tip, left, right] {
            self.extents.include(
                BBox::new(point.x, point.y, 0.0, 0.0).with_padding(arrow.stroke_width / 2.0),
            );
        }
    }

    fn finalize(&self, view: &BBox, background: &str) -> String {
        // Overscan: the raster rounds its size up, so the last pixel column
        // and row lie partly outside the view box.
        let backdrop = view.with_padding(POINTS_PER_UNIT);
        let background_rect = Tag::new("rect")
            .num("x", backdrop.x)
            .num("y", backdrop.y)
            .num("width", backdrop.width)
            .num("height", backdrop.height)
            .str("fill", background)
            .empty();

        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.2}" height="{h:.2}" viewBox="{x:.2} {y:.2} {w:.2} {h:.2}">{background_rect}{content}</svg>"#,
            x = view.x,
            y = view.y,
            w = view.width,
            h = view.height,
            content = self.content,
        )
    }
}

/// Shaft tail, tip, and the two barb ends of an open arrow head, in SVG
/// points. `None` when the shrunk shaft would be empty.
pub fn arrow_geometry(
    arrow: &Arrow,
    start: Point,
    end: Point,
) -> Option<(Point, Point, Point, Point)> {
    if start.distance_to(end) <= arrow.shrink * 2.0 {
        return None;
    }

    let tail = start.toward(end, arrow.shrink);
    let tip = end.toward(start, arrow.shrink);

    let angle = (tip.y - tail.y).atan2(tip.x - tail.x);
    let (sin, cos) = angle.sin_cos();
    let length = arrow.head_length();
    let half_width = arrow.head_half_width();

    let left = Point::new(
        tip.x - cos * length + sin * half_width,
        tip.y - sin * length - cos * half_width,
    );
    let right = Point::new(
        tip.x - cos * length - sin * half_width,
        tip.y - sin * length + cos * half_width,
    );

    Some((tail, tip, left, right))
}
