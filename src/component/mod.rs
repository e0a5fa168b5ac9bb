//! Rich-text component trees.
//!
//! A [`StyledRun`] is a piece of text with a [`Style`], optional click and
//! hover events, and an ordered list of child runs. Children render after
//! their parent's text, in order.
//!
//! Runs are built with consuming builder methods:
//!
//! ```
//! use rgb_text::component::StyledRun;
//! use rgb_text::color::{Color, RenderMode};
//!
//! let run = StyledRun::text("Click me")
//!     .bold()
//!     .color(Color::parse("gold").unwrap())
//!     .click_run_command("/spawn")
//!     .hover_show_text_markup("&7Teleports you to spawn");
//!
//! let json = run.to_json_string(RenderMode::Rgb);
//! assert!(json.starts_with(r#"{"text":"Click me","color":"gold","bold":true"#));
//! ```
//!
//! or parsed from markup with [`StyledRun::from_markup`], which accepts legacy
//! codes, every hex dialect and every gradient dialect the default
//! [`Pipeline`](crate::pipeline::Pipeline) knows.

mod json;
pub(crate) mod parse;
mod render;

use std::fmt;

use uuid::Uuid;

use crate::color::{Color, RenderMode};
use crate::pipeline::Pipeline;
use crate::style::{Attributes, Style};

/// What happens when a run is clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickAction {
    OpenUrl,
    RunCommand,
    ChangePage,
    SuggestCommand,
    CopyToClipboard,
}

impl ClickAction {
    const ALL: [Self; 5] = [
        Self::OpenUrl,
        Self::RunCommand,
        Self::ChangePage,
        Self::SuggestCommand,
        Self::CopyToClipboard,
    ];

    /// The snake_case name used in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenUrl => "open_url",
            Self::RunCommand => "run_command",
            Self::ChangePage => "change_page",
            Self::SuggestCommand => "suggest_command",
            Self::CopyToClipboard => "copy_to_clipboard",
        }
    }

    /// Look up an action by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What is shown when a run is hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoverAction {
    ShowText,
    ShowItem,
    ShowEntity,
}

impl HoverAction {
    const ALL: [Self; 3] = [Self::ShowText, Self::ShowItem, Self::ShowEntity];

    /// The snake_case name used in JSON.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShowText => "show_text",
            Self::ShowItem => "show_item",
            Self::ShowEntity => "show_entity",
        }
    }

    /// Look up an action by name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for HoverAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub action: ClickAction,
    pub value: String,
}

/// Payload of a hover event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverValue {
    /// Serialized as a JSON string.
    Plain(String),
    /// Serialized as a nested component object.
    Run(Box<StyledRun>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverEvent {
    pub action: HoverAction,
    pub value: HoverValue,
}

/// A run of styled text and its children.
///
/// `text` is `None` for a run that only groups children; such a run
/// contributes nothing itself when rendered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledRun {
    pub text: Option<String>,
    pub style: Style,
    pub click: Option<ClickEvent>,
    pub hover: Option<HoverEvent>,
    pub extra: Vec<StyledRun>,
}

impl StyledRun {
    /// Create a run with no text, style or children.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unstyled run with the given text.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Parse markup with the global pipeline.
    #[must_use]
    pub fn from_markup(text: &str) -> Self {
        Pipeline::global().parse(text)
    }

    /// Parse only when the text can contain a hex color (`#`, `&x` or `§x`);
    /// otherwise wrap it verbatim.
    #[must_use]
    pub fn optimized(text: &str) -> Self {
        if text.contains('#') || text.contains("&x") || text.contains("§x") {
            Self::from_markup(text)
        } else {
            Self::text(text)
        }
    }

    /// A new run carrying this run's color and attributes, nothing else.
    #[must_use]
    pub fn copy_formatting(&self) -> Self {
        Self {
            style: self.style,
            ..Self::default()
        }
    }

    /// Replace the text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Replace the whole style.
    #[must_use]
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Set the color.
    #[must_use]
    pub fn color(mut self, color: Color) -> Self {
        self.style.color = Some(color);
        self
    }

    /// Enable bold text.
    #[must_use]
    pub fn bold(self) -> Self {
        self.attribute(Attributes::BOLD, Some(true))
    }

    /// Enable italic text.
    #[must_use]
    pub fn italic(self) -> Self {
        self.attribute(Attributes::ITALIC, Some(true))
    }

    /// Enable underlined text.
    #[must_use]
    pub fn underline(self) -> Self {
        self.attribute(Attributes::UNDERLINE, Some(true))
    }

    /// Enable strikethrough text.
    #[must_use]
    pub fn strikethrough(self) -> Self {
        self.attribute(Attributes::STRIKETHROUGH, Some(true))
    }

    /// Enable obfuscated text.
    #[must_use]
    pub fn obfuscated(self) -> Self {
        self.attribute(Attributes::OBFUSCATED, Some(true))
    }

    /// Set an attribute to enabled, disabled or inherited (`None`).
    #[must_use]
    pub fn attribute(mut self, attr: Attributes, value: Option<bool>) -> Self {
        self.style.set(attr, value);
        self
    }

    /// Append a child run.
    #[must_use]
    pub fn append(mut self, child: StyledRun) -> Self {
        self.extra.push(child);
        self
    }

    /// Append a child run in place.
    pub fn push(&mut self, child: StyledRun) {
        self.extra.push(child);
    }

    /// Set the click event.
    #[must_use]
    pub fn click(mut self, action: ClickAction, value: impl Into<String>) -> Self {
        self.click = Some(ClickEvent {
            action,
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn click_open_url(self, url: impl Into<String>) -> Self {
        self.click(ClickAction::OpenUrl, url)
    }

    #[must_use]
    pub fn click_run_command(self, command: impl Into<String>) -> Self {
        self.click(ClickAction::RunCommand, command)
    }

    #[must_use]
    pub fn click_suggest_command(self, command: impl Into<String>) -> Self {
        self.click(ClickAction::SuggestCommand, command)
    }

    #[must_use]
    pub fn click_change_page(self, page: u32) -> Self {
        self.click(ClickAction::ChangePage, page.to_string())
    }

    #[must_use]
    pub fn click_copy_to_clipboard(self, text: impl Into<String>) -> Self {
        self.click(ClickAction::CopyToClipboard, text)
    }

    /// Set the hover event.
    #[must_use]
    pub fn hover(mut self, action: HoverAction, value: HoverValue) -> Self {
        self.hover = Some(HoverEvent { action, value });
        self
    }

    /// Show a run as hover text.
    #[must_use]
    pub fn hover_show_text(self, run: StyledRun) -> Self {
        self.hover(HoverAction::ShowText, HoverValue::Run(Box::new(run)))
    }

    /// Show markup as hover text, parsed with [`StyledRun::optimized`].
    #[must_use]
    pub fn hover_show_text_markup(self, markup: &str) -> Self {
        self.hover_show_text(Self::optimized(markup))
    }

    /// Show a serialized item.
    #[must_use]
    pub fn hover_show_item(self, item: impl Into<String>) -> Self {
        self.hover(HoverAction::ShowItem, HoverValue::Plain(item.into()))
    }

    /// Show an entity as `{id:<uuid>,type:<type>,name:<name>}`.
    #[must_use]
    pub fn hover_show_entity(self, id: Uuid, entity_type: &str, name: &str) -> Self {
        let value = format!("{{id:{id},type:{entity_type},name:{name}}}");
        self.hover(HoverAction::ShowEntity, HoverValue::Plain(value))
    }

    /// Whether this run has neither text nor children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.as_deref().is_none_or(str::is_empty) && self.extra.is_empty()
    }
}

impl From<&str> for StyledRun {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for StyledRun {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl fmt::Display for StyledRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_json_string(RenderMode::Rgb))
    }
}

/// Error type for component decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentError {
    /// A click or hover event names an action that does not exist.
    UnknownActionKind(String),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownActionKind(action) => write!(f, "Unknown action kind: {action}"),
        }
    }
}

impl std::error::Error for ComponentError {}
