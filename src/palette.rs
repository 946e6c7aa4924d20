use serde::Deserialize;

const INPUT_FILL: &str = "#E3F2FD";
const THINK_FILL: &str = "#F3E5F5";
const TOOLS_FILL: &str = "#E8F5E8";
const SYNTHESIZE_FILL: &str = "#FFF3E0";
const ARROW: &str = "#666666";
const TEXT: &str = "#333333";
const TOOLS_PANEL_FILL: &str = "#F5F5F5";
const HASHTAG_PANEL_FILL: &str = "#FFF9C4";
const STREAMING_FILL: &str = "#E1F5FE";
const LLM_FILL: &str = "#FCE4EC";
const BACKGROUND: &str = "#ffffff";

/// Colors of the workflow diagram. Any CSS color SVG understands is accepted.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Palette {
    #[serde(default = "default_input")]
    pub input: String,
    #[serde(default = "default_think")]
    pub think: String,
    #[serde(default = "default_tools")]
    pub tools: String,
    #[serde(default = "default_synthesize")]
    pub synthesize: String,
    #[serde(default = "default_arrow")]
    pub arrow: String,
    #[serde(default = "default_text")]
    pub text: String,

    #[serde(default = "default_tools_panel")]
    pub tools_panel: String,
    #[serde(default = "default_hashtag_panel")]
    pub hashtag_panel: String,
    #[serde(default = "default_streaming")]
    pub streaming: String,
    #[serde(default = "default_llm")]
    pub llm: String,

    #[serde(default = "default_background")]
    pub background: String,
}

fn default_input() -> String {
    INPUT_FILL.to_string()
}
fn default_think() -> String {
    THINK_FILL.to_string()
}
fn default_tools() -> String {
    TOOLS_FILL.to_string()
}
fn default_synthesize() -> String {
    SYNTHESIZE_FILL.to_string()
}
fn default_arrow() -> String {
    ARROW.to_string()
}
fn default_text() -> String {
    TEXT.to_string()
}
fn default_tools_panel() -> String {
    TOOLS_PANEL_FILL.to_string()
}
fn default_hashtag_panel() -> String {
    HASHTAG_PANEL_FILL.to_string()
}
fn default_streaming() -> String {
    STREAMING_FILL.to_string()
}
fn default_llm() -> String {
    LLM_FILL.to_string()
}
fn default_background() -> String {
    BACKGROUND.to_string()
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            input: default_input(),
            think: default_think(),
            tools: default_tools(),
            synthesize: default_synthesize(),
            arrow: default_arrow(),
            text: default_text(),
            tools_panel: default_tools_panel(),
            hashtag_panel: default_hashtag_panel(),
            streaming: default_streaming(),
            llm: default_llm(),
            background: default_background(),
        }
    }
}
