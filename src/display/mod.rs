//! Terminal rendering primitives
//!
//! Text truncation, number formatting, the muted theme and the markdown
//! renderer used for reasoning blocks.

pub mod markdown;
pub mod text;
pub mod theme;

pub use markdown::MarkdownRenderer;
pub use text::{format_thousands, truncate_lines};
pub use theme::{MutedPalette, TextStyle, Theme};
