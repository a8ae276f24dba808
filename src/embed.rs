use std::collections::HashMap;

use crate::domain::{contains_forbidden, escape_html};

/// Endpoint the rendered form submits to
pub const SUBSCRIBE_PATH: &str = "/subscribe_email";

const DEFAULT_HEIGHT: u32 = 40;
const DEFAULT_BG_COLOR: &str = "transparent";
const DEFAULT_TITLE: &str = "Subscribe";
const DEFAULT_PARAGRAPH: &str = "Did you enjoy reading this? If so, enter your email below to receive all the latest features, updates, and news!";
const DEFAULT_PLACEHOLDER: &str =
    "Enter your email address to receive the latest updates, features, and news";
const DEFAULT_BUTTON_LABEL: &str = "Subscribe";
const DEFAULT_BUTTON_COLOR: &str = "default";

/// Layout of the capture form
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Input and button only
    #[default]
    Bare,
    /// Full-width colored bar around the input
    ColorBar,
    /// Panel with a title and a paragraph above the input
    Panel,
}

impl Variant {
    /// Map the numeric `type` attribute, anything unknown renders the bare form
    pub const fn from_code(code: u32) -> Self {
        match code {
            1 => Self::ColorBar,
            2 => Self::Panel,
            _ => Self::Bare,
        }
    }
}

/// Options of the embeddable capture form
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedOptions {
    pub variant: Variant,
    pub height_px: u32,
    pub bg_color: String,
    pub title: String,
    pub paragraph: String,
    pub placeholder: String,
    pub button_label: String,
    pub button_color: String,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            variant: Variant::default(),
            height_px: DEFAULT_HEIGHT,
            bg_color: DEFAULT_BG_COLOR.into(),
            title: DEFAULT_TITLE.into(),
            paragraph: DEFAULT_PARAGRAPH.into(),
            placeholder: DEFAULT_PLACEHOLDER.into(),
            button_label: DEFAULT_BUTTON_LABEL.into(),
            button_color: DEFAULT_BUTTON_COLOR.into(),
        }
    }
}

impl EmbedOptions {
    /// Build options from raw embed attributes
    ///
    /// Attribute names are case-insensitive. A value holding markup or code falls back to
    /// its default, and so does a non-numeric `type` or `height`.
    pub fn from_attributes(attributes: &HashMap<String, String>) -> Self {
        let attributes: HashMap<String, &str> = attributes
            .iter()
            .map(|(k, v)| (k.to_lowercase(), v.as_str()))
            .collect();
        let text = |key: &str, default: &str| -> String {
            attributes
                .get(key)
                .filter(|v| !contains_forbidden(v))
                .map_or_else(|| default.to_string(), |v| (*v).to_string())
        };
        let number = |key: &str, default: u32| -> u32 {
            attributes
                .get(key)
                .filter(|v| !contains_forbidden(v))
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };

        Self {
            variant: Variant::from_code(number("type", 0)),
            height_px: number("height", DEFAULT_HEIGHT),
            bg_color: text("bg_color", DEFAULT_BG_COLOR),
            title: text("action_title", DEFAULT_TITLE),
            paragraph: text("action_paragraph", DEFAULT_PARAGRAPH),
            placeholder: text("placeholder", DEFAULT_PLACEHOLDER),
            button_label: text("btn_label", DEFAULT_BUTTON_LABEL),
            button_color: text("btn_color", DEFAULT_BUTTON_COLOR),
        }
    }
}

/// Render the capture form for the page at `source_path`
pub fn render_form(options: &EmbedOptions, source_path: &str) -> String {
    let height = options.height_px;
    let inputs = format!(
        r#"<div class="cloeve-email-list-input-container">
    <input type="hidden" name="source" value="{source}">
    <input type="text" name="email" class="cloeve-email-list-input" style="height: {height}px; line-height: {height}px" placeholder="{placeholder}">
    <button class="cloeve-btn-subscribe" style="height: {height}px; line-height: {height}px; background-color: {button_color}" type="submit">{button_label}</button>
</div>
<div class="cloeve-success-container"><h5>Success!</h5></div>"#,
        source = escape_html(source_path),
        placeholder = escape_html(&options.placeholder),
        button_color = escape_html(&options.button_color),
        button_label = escape_html(&options.button_label),
    );

    let body = match options.variant {
        Variant::Bare => inputs,
        Variant::ColorBar => format!(
            r#"<div class="cloeve-color-bar-container" style="background-color: {bg_color}">
{inputs}
</div>"#,
            bg_color = escape_html(&options.bg_color),
        ),
        Variant::Panel => format!(
            r#"<div class="cloeve-subscriber-container">
<h2>{title}</h2>
<p>{paragraph}</p>
{inputs}
</div>"#,
            title = escape_html(&options.title),
            paragraph = escape_html(&options.paragraph),
        ),
    };

    format!(
        r#"<form class="ctEmailListBuilderForm" method="post" action="{SUBSCRIBE_PATH}" onsubmit="return subscribeEmail(this);">
{body}
</form>"#
    )
}
