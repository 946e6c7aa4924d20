//! The agent workflow diagram.
//!
//! Every coordinate below is authored by hand on a 16 x 12 canvas, y up.

use crate::geometry::Point;
use crate::model::{Annotation, Arrow, BoxStyle, Canvas, Chip, HAlign, Node, TextStyle};
use crate::palette::Palette;

pub const CANVAS_WIDTH: f32 = 16.0;
pub const CANVAS_HEIGHT: f32 = 12.0;

const TITLE: &str = "ThinkingCindyAgent - LangGraph Architecture";
const FOOTER: &str =
    "ThinkingCindyAgent: Multi-phase AI reasoning with tool execution and streaming output";

const BOX_ROUNDING: f32 = 0.1;
const PHASE_WIDTH: f32 = 3.0;
const PHASE_HEIGHT: f32 = 1.2;
const PANEL_HEIGHT: f32 = 1.5;

struct Phase {
    x: f32,
    y: f32,
    title: &'static str,
    entry_point: &'static str,
    steps: &'static str,
}

const PHASES: [Phase; 4] = [
    Phase {
        x: 1.0,
        y: 9.5,
        title: "PHASE 1: INPUT",
        entry_point: "analyzeInput()",
        steps: "• Parse hashtags\n• Extract clean input\n• Identify forced tools",
    },
    Phase {
        x: 6.0,
        y: 9.5,
        title: "PHASE 2: THINKING",
        entry_point: "createThinkingPlan()",
        steps: "• LLM planning call\n• Tool suggestion\n• Create execution plan",
    },
    Phase {
        x: 11.0,
        y: 9.5,
        title: "PHASE 3: TOOLS",
        entry_point: "executeTools()",
        steps: "• Run planned tools\n• Collect results\n• Handle errors",
    },
    Phase {
        x: 6.0,
        y: 7.5,
        title: "PHASE 4: SYNTHESIS",
        entry_point: "synthesizeResponse()",
        steps: "• Final LLM call\n• Combine tool results\n• Generate citations",
    },
];

const AVAILABLE_TOOLS: [(f32, f32, &str); 6] = [
    (2.0, 6.4, "• search_documents"),
    (2.0, 6.1, "• read_file"),
    (2.0, 5.8, "• write_file"),
    (4.5, 6.4, "• web_search"),
    (4.5, 6.1, "• brave_search"),
    (4.5, 5.8, "• list_directory"),
];

const HASHTAGS: [(f32, f32, &str); 6] = [
    (10.0, 6.4, "#search → search_documents"),
    (10.0, 6.1, "#read → read_file"),
    (10.0, 5.8, "#web → web_search_preferred"),
    (13.0, 6.4, "#write → write_file"),
    (13.0, 6.1, "#brave → brave_search"),
    (13.0, 5.8, "#dir → list_directory"),
];

const STREAM_CHIPS: [(f32, &str); 4] = [
    (2.0, "<think> blocks"),
    (5.0, "<tool> execution"),
    (8.5, "Real-time progress"),
    (12.0, "Structured output"),
];

const LLM_CALLS: [(f32, &str, &str); 3] = [
    (3.0, "1. Planning Call", "createThinkingPlan()"),
    (8.0, "2. Direct Response", "Simple greetings"),
    (13.0, "3. Synthesis Call", "synthesizeResponse()"),
];

/// Builds the full diagram. Draw order follows the order of the calls below.
pub fn agent_workflow(palette: &Palette) -> Canvas {
    let mut canvas = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT, &palette.background);

    canvas.text(Annotation::new(
        8.0,
        11.5,
        TITLE,
        TextStyle::new(20.0, &palette.text).bold(),
    ));

    let phase_fills = [
        &palette.input,
        &palette.think,
        &palette.tools,
        &palette.synthesize,
    ];
    for (phase, fill) in PHASES.iter().zip(phase_fills) {
        canvas.node(
            Node::panel(
                phase.x,
                phase.y,
                PHASE_WIDTH,
                PHASE_HEIGHT,
                box_style(fill, "black", 2.0),
            )
            .labeled(phase.title, phase.entry_point, phase.steps),
        );
    }

    list_panel(
        &mut canvas,
        1.0,
        "AVAILABLE TOOLS",
        &palette.tools_panel,
        &AVAILABLE_TOOLS,
    );
    list_panel(
        &mut canvas,
        9.0,
        "HASHTAG TOOL FORCING",
        &palette.hashtag_panel,
        &HASHTAGS,
    );

    streaming_banner(&mut canvas, palette);
    llm_banner(&mut canvas, palette);

    // Phase 1 -> 2 -> 3 -> 4
    canvas.arrow(Arrow::new(Point::new(4.0, 10.1), Point::new(6.0, 10.1), &palette.arrow));
    canvas.arrow(Arrow::new(Point::new(9.0, 10.1), Point::new(11.0, 10.1), &palette.arrow));
    canvas.arrow(Arrow::new(Point::new(12.5, 9.5), Point::new(7.5, 8.7), &palette.arrow));
    // Tools panel -> phase 3, hashtag panel -> phase 1
    canvas.arrow(
        Arrow::new(Point::new(4.0, 5.5), Point::new(12.5, 9.5), "green")
            .scale(15.0)
            .opacity(0.7),
    );
    canvas.arrow(
        Arrow::new(Point::new(12.0, 5.5), Point::new(2.5, 9.5), "orange")
            .scale(15.0)
            .opacity(0.7),
    );

    canvas.text(Annotation::new(
        8.0,
        0.5,
        FOOTER,
        TextStyle::new(12.0, "gray").italic(),
    ));

    canvas
}

fn box_style(fill: &str, stroke: &str, stroke_width: f32) -> BoxStyle {
    BoxStyle {
        fill: fill.to_string(),
        stroke: stroke.to_string(),
        stroke_width,
        rounding: BOX_ROUNDING,
    }
}

fn list_panel(
    canvas: &mut Canvas,
    x: f32,
    heading: &str,
    fill: &str,
    items: &[(f32, f32, &str)],
) {
    let width = 6.0;
    let y = 5.5;
    canvas.node(Node::panel(
        x,
        y,
        width,
        PANEL_HEIGHT,
        box_style(fill, "black", 1.0),
    ));
    canvas.text(Annotation::new(
        x + width / 2.0,
        6.8,
        heading,
        TextStyle::new(12.0, "black").bold(),
    ));
    for &(item_x, item_y, item) in items {
        canvas.text(
            Annotation::new(item_x, item_y, item, TextStyle::new(10.0, "black"))
                .align(HAlign::Left),
        );
    }
}

fn streaming_banner(canvas: &mut Canvas, palette: &Palette) {
    canvas.node(Node::panel(
        1.0,
        3.5,
        14.0,
        PANEL_HEIGHT,
        box_style(&palette.streaming, "blue", 2.0),
    ));
    canvas.text(Annotation::new(
        8.0,
        4.7,
        "STREAMING PROCESS (processStreaming)",
        TextStyle::new(14.0, "black").bold(),
    ));
    for &(x, label) in &STREAM_CHIPS {
        canvas.text(
            Annotation::new(x, 4.3, label, TextStyle::new(10.0, "black"))
                .align(HAlign::Left)
                .with_chip(Chip::new("white", "black")),
        );
    }
    canvas.text(Annotation::new(
        8.0,
        3.8,
        "Emits structured tokens for UI rendering: thinking blocks, tool calls, progress updates",
        TextStyle::new(10.0, "black").italic(),
    ));
}

fn llm_banner(canvas: &mut Canvas, palette: &Palette) {
    canvas.node(Node::panel(
        1.0,
        1.5,
        14.0,
        PANEL_HEIGHT,
        box_style(&palette.llm, "purple", 2.0),
    ));
    canvas.text(Annotation::new(
        8.0,
        2.7,
        "LLM INTEGRATION POINTS",
        TextStyle::new(14.0, "black").bold(),
    ));
    for &(x, call, entry_point) in &LLM_CALLS {
        canvas.text(
            Annotation::new(x, 2.3, call, TextStyle::new(11.0, "black"))
                .with_chip(Chip::new("white", "black")),
        );
        canvas.text(Annotation::new(
            x,
            2.0,
            entry_point,
            TextStyle::new(9.0, "black").italic(),
        ));
    }
    canvas.text(Annotation::new(
        8.0,
        1.7,
        "Smart routing: Simple greetings = 1 call | Complex requests = 2 calls",
        TextStyle::new(10.0, "purple").italic(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Element;

    fn count<F: Fn(&Element) -> bool>(canvas: &Canvas, predicate: F) -> usize {
        canvas.elements().iter().filter(|e| predicate(e)).count()
    }

    #[test]
    fn workflow_has_expected_shape_counts() {
        let canvas = agent_workflow(&Palette::default());

        assert_eq!(count(&canvas, |e| matches!(e, Element::Node(_))), 8);
        assert_eq!(count(&canvas, |e| matches!(e, Element::Arrow(_))), 5);
        assert_eq!(
            count(&canvas, |e| matches!(e, Element::Text(t) if t.chip.is_some())),
            STREAM_CHIPS.len() + LLM_CALLS.len()
        );
    }

    #[test]
    fn title_first_footer_last() {
        let canvas = agent_workflow(&Palette::default());
        let elements = canvas.elements();

        match (elements.first(), elements.last()) {
            (Some(Element::Text(title)), Some(Element::Text(footer))) => {
                assert_eq!(title.text, TITLE);
                assert_eq!(footer.text, FOOTER);
                assert!(footer.style.is_italic());
            }
            other => panic!("unexpected first/last elements: {other:?}"),
        }
    }

    #[test]
    fn phase_fills_follow_palette() {
        let palette = Palette {
            think: "#010203".to_string(),
            ..Palette::default()
        };
        let canvas = agent_workflow(&palette);

        let thinking = canvas.elements().iter().find_map(|e| match e {
            Element::Node(node) if node.title == "PHASE 2: THINKING" => Some(node),
            _ => None,
        });
        assert_eq!(thinking.map(|n| n.style.fill.as_str()), Some("#010203"));
    }

    #[test]
    fn everything_stays_on_canvas() {
        let canvas = agent_workflow(&Palette::default());
        for element in canvas.elements() {
            if let Element::Node(node) = element {
                assert!(node.x >= 0.0 && node.x + node.width <= CANVAS_WIDTH);
                assert!(node.y >= 0.0 && node.y + node.height <= CANVAS_HEIGHT);
            }
        }
    }
}
