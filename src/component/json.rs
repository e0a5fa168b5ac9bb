//! JSON encoding and decoding of [`StyledRun`] trees.
//!
//! Keys are written in a fixed order and unset fields are omitted:
//!
//! ```text
//! text, color, bold, italic, underlined, strikethrough, obfuscated,
//! clickEvent {action, value}, hoverEvent {action, value}, extra [...]
//! ```
//!
//! Decoding is lenient. Input that is not a component (invalid JSON, a bare
//! number, an unknown color) is logged and parsed as markup instead; only an
//! unknown event action is reported as an error.

use serde_json::{Map, Value};

use crate::color::{Color, RenderMode};
use crate::style::Attributes;

use super::{
    ClickAction, ClickEvent, ComponentError, HoverAction, HoverEvent, HoverValue, StyledRun,
};

const EMPTY_TEXT: &str = r#"{"text":""}"#;
const EMPTY_TRANSLATE: &str = r#"{"translate":""}"#;

/// Why an object could not be decoded.
enum DecodeError {
    /// Surfaced to the caller.
    Component(ComponentError),
    /// Triggers the markup fallback.
    Malformed(String),
}

impl From<ComponentError> for DecodeError {
    fn from(err: ComponentError) -> Self {
        Self::Component(err)
    }
}

impl StyledRun {
    /// Encode as a JSON value.
    ///
    /// `mode` decides how colors are named; see [`Color::name`].
    #[must_use]
    pub fn to_json(&self, mode: RenderMode) -> Value {
        let mut obj = Map::new();

        if let Some(text) = &self.text {
            obj.insert("text".to_string(), Value::String(text.clone()));
        }
        if let Some(color) = &self.style.color {
            obj.insert("color".to_string(), Value::String(color.name(mode)));
        }
        for (attr, key) in Attributes::JSON_KEYS {
            if let Some(enabled) = self.style.get(attr) {
                obj.insert(key.to_string(), Value::Bool(enabled));
            }
        }
        if let Some(click) = &self.click {
            let mut event = Map::new();
            event.insert("action".to_string(), click.action.as_str().into());
            event.insert("value".to_string(), Value::String(click.value.clone()));
            obj.insert("clickEvent".to_string(), Value::Object(event));
        }
        if let Some(hover) = &self.hover {
            let value = match &hover.value {
                HoverValue::Plain(text) => Value::String(text.clone()),
                HoverValue::Run(run) => run.to_json(mode),
            };
            let mut event = Map::new();
            event.insert("action".to_string(), hover.action.as_str().into());
            event.insert("value".to_string(), value);
            obj.insert("hoverEvent".to_string(), Value::Object(event));
        }
        if !self.extra.is_empty() {
            let extra = self.extra.iter().map(|run| run.to_json(mode)).collect();
            obj.insert("extra".to_string(), Value::Array(extra));
        }

        Value::Object(obj)
    }

    /// Encode as a compact JSON string.
    #[must_use]
    pub fn to_json_string(&self, mode: RenderMode) -> String {
        self.to_json(mode).to_string()
    }

    /// Encode for sending, with the empty-message shortcuts.
    ///
    /// A run without children returns `None` when it has no text, and a fixed
    /// empty message when its text is empty: `{"translate":""}` if
    /// `translatable_if_empty`, `{"text":""}` otherwise.
    #[must_use]
    pub fn serialize(&self, mode: RenderMode, translatable_if_empty: bool) -> Option<String> {
        if self.extra.is_empty() {
            match self.text.as_deref() {
                None => return None,
                Some("") if translatable_if_empty => return Some(EMPTY_TRANSLATE.to_string()),
                Some("") => return Some(EMPTY_TEXT.to_string()),
                Some(_) => {}
            }
        }
        Some(self.to_json_string(mode))
    }

    /// Decode a component from JSON.
    ///
    /// A bare JSON string becomes a text run. Input that is not a valid
    /// component is logged at warn level and parsed with
    /// [`StyledRun::from_markup`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`ComponentError::UnknownActionKind`] if a click or hover event
    /// names an action that does not exist.
    ///
    /// ```
    /// use rgb_text::component::StyledRun;
    /// use rgb_text::style::Attributes;
    ///
    /// let run = StyledRun::from_json(r#"{"text":"hi","bold":"TRUE"}"#).unwrap();
    /// assert_eq!(run.text.as_deref(), Some("hi"));
    /// assert!(run.style.is_enabled(Attributes::BOLD));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ComponentError> {
        let value: Value = match serde_json::from_str(json) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to parse component JSON ({err}): {json}");
                return Ok(Self::from_markup(json));
            }
        };

        let decoded = match &value {
            Value::String(text) => return Ok(Self::text(text.clone())),
            Value::Object(obj) => decode_object(obj),
            other => Err(DecodeError::Malformed(format!(
                "expected an object or a string, found {other}"
            ))),
        };

        match decoded {
            Ok(run) => Ok(run),
            Err(DecodeError::Component(err)) => Err(err),
            Err(DecodeError::Malformed(reason)) => {
                log::warn!("Failed to read component ({reason}): {json}");
                Ok(Self::from_markup(json))
            }
        }
    }
}

fn decode_object(obj: &Map<String, Value>) -> Result<StyledRun, DecodeError> {
    let mut run = StyledRun::new();

    run.text = match obj.get("text") {
        None | Some(Value::Null) => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(other) => return Err(DecodeError::Malformed(format!("text is not a string: {other}"))),
    };

    run.style.color = match obj.get("color") {
        None | Some(Value::Null) => None,
        Some(Value::String(name)) => Some(
            Color::parse(name).map_err(|err| DecodeError::Malformed(err.to_string()))?,
        ),
        Some(other) => {
            return Err(DecodeError::Malformed(format!("color is not a string: {other}")));
        }
    };

    for (attr, key) in Attributes::JSON_KEYS {
        if let Some(value) = obj.get(key) {
            run.style.set(attr, Some(is_true(value)));
        }
    }

    if let Some(event) = obj.get("clickEvent") {
        let (action, value) = event_parts(event, "clickEvent")?;
        let action = ClickAction::from_name(action)
            .ok_or_else(|| ComponentError::UnknownActionKind(action.to_string()))?;
        let value = match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        run.click = Some(ClickEvent { action, value });
    }

    if let Some(event) = obj.get("hoverEvent") {
        let (action, value) = event_parts(event, "hoverEvent")?;
        let action = HoverAction::from_name(action)
            .ok_or_else(|| ComponentError::UnknownActionKind(action.to_string()))?;
        let value = match value {
            Value::String(text) => HoverValue::Plain(text.clone()),
            Value::Object(nested) => HoverValue::Run(Box::new(decode_object(nested)?)),
            other => HoverValue::Plain(other.to_string()),
        };
        run.hover = Some(HoverEvent { action, value });
    }

    match obj.get("extra") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                let child = match item {
                    Value::Object(nested) => decode_object(nested)?,
                    Value::String(text) => StyledRun::text(text.clone()),
                    other => StyledRun::text(other.to_string()),
                };
                run.extra.push(child);
            }
        }
        Some(other) => {
            return Err(DecodeError::Malformed(format!("extra is not an array: {other}")));
        }
    }

    Ok(run)
}

/// `true`, or a string equal to `"true"` ignoring case.
fn is_true(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn event_parts<'a>(event: &'a Value, key: &str) -> Result<(&'a str, &'a Value), DecodeError> {
    let Value::Object(event) = event else {
        return Err(DecodeError::Malformed(format!("{key} is not an object")));
    };
    let action = event
        .get("action")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::Malformed(format!("{key} has no action")))?;
    let value = event
        .get("value")
        .filter(|v| !v.is_null())
        .ok_or_else(|| DecodeError::Malformed(format!("{key} has no value")))?;
    Ok((action, value))
}
