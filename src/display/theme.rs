//! Display theme
//!
//! A `Theme` is built once and handed to the formatter; nothing here is
//! global. The default is the muted palette used for reasoning blocks so
//! they read as secondary to the main response.

use colored::{Color, ColoredString, Colorize};

/// A combination of colour and text attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStyle {
    /// Foreground colour, if any
    pub color: Option<Color>,
    /// Bold weight
    pub bold: bool,
    /// Dim/faint intensity
    pub dimmed: bool,
    /// Italic
    pub italic: bool,
    /// Underline
    pub underline: bool,
}

impl TextStyle {
    /// Plain, unstyled text.
    pub const PLAIN: Self = Self {
        color: None,
        bold: false,
        dimmed: false,
        italic: false,
        underline: false,
    };

    /// Dim text with no other attributes.
    pub const DIM: Self = Self {
        dimmed: true,
        ..Self::PLAIN
    };

    /// Text in the given colour.
    #[must_use]
    pub const fn fg(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::PLAIN
        }
    }

    /// Add bold.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Add italic.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Add underline.
    #[must_use]
    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Apply the style to `text`.
    #[must_use]
    pub fn paint(&self, text: &str) -> ColoredString {
        let mut out = text.normal();
        if let Some(color) = self.color {
            out = out.color(color);
        }
        if self.bold {
            out = out.bold();
        }
        if self.dimmed {
            out = out.dimmed();
        }
        if self.italic {
            out = out.italic();
        }
        if self.underline {
            out = out.underline();
        }
        out
    }
}

/// Per-element styles for rendered markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutedPalette {
    /// Heading styles for levels 1 through 6
    pub headings: [TextStyle; 6],
    /// Body text
    pub text: TextStyle,
    /// Inline code spans
    pub code: TextStyle,
    /// Fenced and indented code blocks
    pub code_block: TextStyle,
    /// Link destinations
    pub link: TextStyle,
    /// `**strong**` text
    pub strong: TextStyle,
    /// `*emphasis*` text
    pub emphasis: TextStyle,
    /// List bullets and quote bars
    pub bullet: TextStyle,
}

impl MutedPalette {
    /// Style for a heading level, clamped to 1..=6.
    #[must_use]
    pub fn heading(&self, level: usize) -> TextStyle {
        self.headings[level.clamp(1, 6) - 1]
    }
}

impl Default for MutedPalette {
    fn default() -> Self {
        let dim = TextStyle::DIM;
        Self {
            headings: [
                dim.italic().underline(),
                dim.bold(),
                dim.bold(),
                dim,
                dim,
                dim,
            ],
            text: dim,
            code: dim,
            code_block: dim,
            link: dim.underline(),
            strong: dim.bold(),
            emphasis: dim.italic(),
            bullet: dim,
        }
    }
}

/// Styles for every element the formatter prints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Status lines: thinking announcements, tool headers
    pub status: TextStyle,
    /// Banner rules and titles around reasoning blocks
    pub banner: TextStyle,
    /// Secondary detail: tool arguments, results, usage
    pub detail: TextStyle,
    /// Markdown palette for reasoning text
    pub markdown: MutedPalette,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            status: TextStyle::fg(Color::Cyan),
            banner: TextStyle::fg(Color::BrightBlack),
            detail: TextStyle::DIM,
            markdown: MutedPalette::default(),
        }
    }
}
