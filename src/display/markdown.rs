//! Markdown rendering for terminal output
//!
//! Renders reasoning text with a [`MutedPalette`] so headings, emphasis,
//! code and lists stay recognisable while the whole block reads dim.

use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag};
use textwrap::{wrap, Options};

use super::theme::{MutedPalette, TextStyle};

/// Wrap width for reasoning blocks of the parent session.
pub const PARENT_WIDTH: usize = 60;

/// Wrap width for sub-agent reasoning blocks, which are indented by 4.
pub const AGENT_WIDTH: usize = 52;

/// Markdown renderer for terminal output
#[derive(Debug, Clone)]
pub struct MarkdownRenderer {
    palette: MutedPalette,
    width: usize,
}

impl MarkdownRenderer {
    /// Create a renderer with the given palette and the parent wrap width
    #[must_use]
    pub const fn new(palette: MutedPalette) -> Self {
        Self {
            palette,
            width: PARENT_WIDTH,
        }
    }

    /// Set the wrap width
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Render markdown to styled lines joined by `\n`, without trailing blanks
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let mut state = RenderState::new(&self.palette, self.width);

        for event in Parser::new(markdown) {
            match event {
                Event::Start(tag) => state.start(tag),
                Event::End(tag) => state.end(tag),
                Event::Text(text) => state.text(&text),
                Event::Code(code) => {
                    let painted = self.palette.code.paint(&code).to_string();
                    state.inline.push_str(&painted);
                }
                Event::SoftBreak => state.inline.push(' '),
                Event::HardBreak => state.flush_inline(),
                Event::Rule => {
                    let rule = "─".repeat(self.width);
                    state.lines.push(self.palette.text.paint(&rule).to_string());
                    state.blank();
                }
                _ => {}
            }
        }

        state.flush_inline();
        while state.lines.last().is_some_and(String::is_empty) {
            state.lines.pop();
        }
        state.lines.join("\n")
    }
}

struct RenderState<'a> {
    palette: &'a MutedPalette,
    width: usize,
    lines: Vec<String>,
    inline: String,
    styles: Vec<TextStyle>,
    /// Next item number per open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
    /// Marker for the first line of the current list item
    item_marker: Option<String>,
    quote_depth: usize,
    code_block: Option<String>,
}

impl<'a> RenderState<'a> {
    fn new(palette: &'a MutedPalette, width: usize) -> Self {
        Self {
            palette,
            width,
            lines: Vec::new(),
            inline: String::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            item_marker: None,
            quote_depth: 0,
            code_block: None,
        }
    }

    fn current_style(&self) -> TextStyle {
        self.styles.last().copied().unwrap_or(self.palette.text)
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(level, _, _) => {
                self.flush_inline();
                self.styles.push(self.palette.heading(level as usize));
            }
            Tag::List(first) => {
                self.flush_inline();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush_inline();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::CodeBlock(kind) => {
                self.flush_inline();
                if let CodeBlockKind::Fenced(lang) = kind {
                    if !lang.is_empty() {
                        let label = self.palette.code_block.paint(&lang).to_string();
                        self.lines.push(format!("{}{label}", self.base_prefix()));
                    }
                }
                self.code_block = Some(String::new());
            }
            Tag::BlockQuote => {
                self.flush_inline();
                self.quote_depth += 1;
            }
            Tag::Emphasis => self.styles.push(self.palette.emphasis),
            Tag::Strong => self.styles.push(self.palette.strong),
            Tag::Link(..) => self.styles.push(self.palette.link),
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(..) => {
                self.flush_inline();
                self.styles.pop();
                self.blank();
            }
            Tag::Paragraph => {
                self.flush_inline();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::List(_) => {
                self.flush_inline();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Item => {
                self.flush_inline();
                self.item_marker = None;
            }
            Tag::CodeBlock(_) => {
                if let Some(code) = self.code_block.take() {
                    let prefix = format!("{}  ", self.base_prefix());
                    for line in code.trim_end_matches('\n').split('\n') {
                        let painted = self.palette.code_block.paint(line);
                        self.lines.push(format!("{prefix}{painted}"));
                    }
                    self.blank();
                }
            }
            Tag::BlockQuote => {
                self.flush_inline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Tag::Emphasis | Tag::Strong | Tag::Link(..) => {
                self.styles.pop();
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(code) = self.code_block.as_mut() {
            code.push_str(text);
        } else {
            let painted = self.current_style().paint(text).to_string();
            self.inline.push_str(&painted);
        }
    }

    /// Indent shared by every line at the current nesting: quote bars plus
    /// two spaces per enclosing list beyond the first.
    fn base_prefix(&self) -> String {
        let bar = self.palette.bullet.paint("│ ").to_string();
        let mut prefix = bar.repeat(self.quote_depth);
        prefix.push_str(&"  ".repeat(self.lists.len().saturating_sub(1)));
        prefix
    }

    fn flush_inline(&mut self) {
        if self.inline.trim().is_empty() {
            self.inline.clear();
            return;
        }

        let base = self.base_prefix();
        let (first, rest) = match self.item_marker.take() {
            Some(marker) => {
                let hang = " ".repeat(marker.chars().count());
                let bullet = self.palette.bullet.paint(&marker).to_string();
                (format!("{base}{bullet}"), format!("{base}{hang}"))
            }
            None if !self.lists.is_empty() => {
                let hang = format!("{base}  ");
                (hang.clone(), hang)
            }
            None => (base.clone(), base),
        };

        let options = Options::new(self.width.max(1))
            .initial_indent(&first)
            .subsequent_indent(&rest);
        let wrapped: Vec<String> = wrap(self.inline.trim(), &options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        self.lines.extend(wrapped);
        self.inline.clear();
    }

    fn blank(&mut self) {
        if self.lines.last().is_some_and(|l| !l.is_empty()) {
            self.lines.push(String::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> MarkdownRenderer {
        colored::control::set_override(false);
        MarkdownRenderer::new(MutedPalette::default())
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(renderer().render("Hello world"), "Hello world");
    }

    #[test]
    fn test_paragraphs_separated_by_blank_line() {
        assert_eq!(renderer().render("First.\n\nSecond."), "First.\n\nSecond.");
    }

    #[test]
    fn test_soft_break_joins_lines() {
        assert_eq!(renderer().render("one\ntwo"), "one two");
    }

    #[test]
    fn test_heading_and_emphasis_text_kept() {
        let out = renderer().render("# Plan\n\nUse **bold** and *italic* and `code`.");
        assert_eq!(out, "Plan\n\nUse bold and italic and code.");
    }

    #[test]
    fn test_bullet_list() {
        let out = renderer().render("- alpha\n- beta");
        assert_eq!(out, "• alpha\n• beta");
    }

    #[test]
    fn test_ordered_list_numbers() {
        let out = renderer().render("3. three\n4. four");
        assert_eq!(out, "3. three\n4. four");
    }

    #[test]
    fn test_nested_list_indents() {
        let out = renderer().render("- outer\n  - inner");
        assert_eq!(out, "• outer\n  • inner");
    }

    #[test]
    fn test_fenced_code_block() {
        let out = renderer().render("```rust\nfn main() {}\n```");
        assert_eq!(out, "rust\n  fn main() {}");
    }

    #[test]
    fn test_block_quote() {
        assert_eq!(renderer().render("> quoted"), "│ quoted");
    }

    #[test]
    fn test_wraps_to_width() {
        let text = "word ".repeat(30);
        let out = renderer().with_width(20).render(&text);
        assert!(out.lines().count() > 1);
        assert!(out.lines().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(renderer().render(""), "");
    }
}
