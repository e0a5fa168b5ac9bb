//! # rgb_text
//!
//! Legacy `§` color codes, hex color dialects, gradients and rich-text
//! components for chat-style text.
//!
//! Human-written markup in any of several dialects is rewritten into a
//! canonical form (`§` codes plus `#RRGGBB`), then either downgraded to the
//! 16-color legacy palette or parsed into a [`StyledRun`] tree that renders to
//! legacy text or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use rgb_text::prelude::*;
//!
//! let run = StyledRun::from_markup("&6Gold <#FF0000>fade</#0000FF> &lbold");
//! assert_eq!(run.to_plain_text(), "Gold fade bold");
//!
//! let json = run.to_json_string(RenderMode::Rgb);
//! assert!(json.contains(r#""color":"gold""#));
//!
//! // Targets without RGB get the nearest palette color.
//! let legacy = Pipeline::global().convert_rgb_to_legacy("#FF5555red");
//! assert_eq!(legacy, "§cred");
//! ```
//!
//! ## Core Concepts
//!
//! - **Palette**: the 16 legacy colors, 5 style flags and reset
//! - **Color**: an RGB value with its legacy fallback
//! - **Pipeline**: ordered markup and gradient dialects plus RGB support
//! - **StyledRun**: a styled piece of text with events and child runs

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod component;
pub mod legacy;
pub mod logging;
pub mod markup;
pub mod palette;
pub mod pipeline;
pub mod style;
pub mod sync;

/// Re-exports for convenient usage
pub mod prelude {
    pub use crate::color::{Color, ColorParseError, ColorTriplet, RenderMode};
    pub use crate::component::{
        ClickAction, ClickEvent, ComponentError, HoverAction, HoverEvent, HoverValue, StyledRun,
    };
    pub use crate::legacy::{colorize, strip_codes, trailing_active_codes};
    pub use crate::logging::LegacyLogger;
    pub use crate::markup::Normalizer;
    pub use crate::markup::gradient::{GradientDialect, as_gradient};
    pub use crate::palette::{LEGACY_MARKER, LegacyCode};
    pub use crate::pipeline::Pipeline;
    pub use crate::style::{Attributes, Style};
}

// Re-export key types at crate root
pub use color::{Color, ColorTriplet, RenderMode};
pub use component::StyledRun;
pub use palette::LegacyCode;
pub use pipeline::Pipeline;
pub use style::{Attributes, Style};
