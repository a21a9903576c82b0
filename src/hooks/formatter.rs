//! Console formatter for runtime lifecycle events
//!
//! Reasoning blocks, tool calls and token usage are rendered to the primary
//! stream. The transient "Thinking..." status goes to the diagnostic stream
//! so the transcript can be redirected on its own.
//!
//! All state is unsynchronized and assumes the dispatcher calls handlers one
//! at a time. Block indices and the usage slot are not keyed by session.

use std::collections::HashMap;
use std::io::{self, Stderr, Stdout, Write};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::{
    HookResult, CONTENT_BLOCK_END, CONTENT_BLOCK_START, LLM_RESPONSE, PROMPT_COMPLETE, TOOL_POST,
    TOOL_PRE,
};
use crate::config::UiConfig;
use crate::display::markdown::{AGENT_WIDTH, PARENT_WIDTH};
use crate::display::{format_thousands, truncate_lines, MarkdownRenderer, Theme};
use crate::payload::{display_string, field, flatten_reasoning_block, is_truthy, str_field};
use crate::session::agent_label;

/// Block types rendered as reasoning
const REASONING_TYPES: [&str; 2] = ["thinking", "reasoning"];

const PARENT_BANNER_WIDTH: usize = 60;
const AGENT_BANNER_WIDTH: usize = 56;

/// A reasoning block that has started but not yet ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedBlock {
    /// Always true once tracked
    pub started: bool,
    /// Sub-agent the block belongs to, `None` for the parent session
    pub agent: Option<String>,
}

/// Token counts captured from the last successful response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferedUsage {
    /// Input tokens
    pub input: u64,
    /// Output tokens
    pub output: u64,
}

impl BufferedUsage {
    /// Input plus output
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.input.saturating_add(self.output)
    }
}

/// Event formatter with a primary writer `O` and a diagnostic writer `D`
pub struct StreamingUiHooks<O: Write = Stdout, D: Write = Stderr> {
    config: UiConfig,
    theme: Theme,
    out: O,
    diag: D,
    thinking_blocks: HashMap<i64, TrackedBlock>,
    buffered_usage: Option<BufferedUsage>,
}

impl StreamingUiHooks<Stdout, Stderr> {
    /// Formatter writing to stdout and stderr with the default theme
    #[must_use]
    pub fn stdio(config: UiConfig) -> Self {
        Self::new(config, Theme::default(), io::stdout(), io::stderr())
    }
}

impl<O: Write, D: Write> StreamingUiHooks<O, D> {
    /// Create a formatter over arbitrary writers
    pub fn new(config: UiConfig, theme: Theme, out: O, diag: D) -> Self {
        Self {
            config,
            theme,
            out,
            diag,
            thinking_blocks: HashMap::new(),
            buffered_usage: None,
        }
    }

    /// Active configuration
    pub const fn config(&self) -> &UiConfig {
        &self.config
    }

    /// Reasoning blocks currently awaiting their end event
    pub const fn tracked_blocks(&self) -> &HashMap<i64, TrackedBlock> {
        &self.thinking_blocks
    }

    /// Usage waiting for the next `prompt:complete`
    pub const fn buffered_usage(&self) -> Option<BufferedUsage> {
        self.buffered_usage
    }

    /// Primary output writer
    pub const fn primary(&self) -> &O {
        &self.out
    }

    /// Diagnostic writer
    pub const fn diagnostic(&self) -> &D {
        &self.diag
    }

    /// Route an event to its handler by name.
    ///
    /// Unknown event names are ignored.
    pub fn dispatch(&mut self, event: &str, data: &Value) -> HookResult {
        match event {
            CONTENT_BLOCK_START => self.handle_content_block_start(event, data),
            CONTENT_BLOCK_END => self.handle_content_block_end(event, data),
            TOOL_PRE => self.handle_tool_pre(event, data),
            TOOL_POST => self.handle_tool_post(event, data),
            LLM_RESPONSE => self.handle_llm_response(event, data),
            PROMPT_COMPLETE => self.handle_prompt_complete(event, data),
            other => {
                debug!(event = other, "ignoring unsubscribed event");
                HookResult::CONTINUE
            }
        }
    }

    /// Start tracking a reasoning block and announce it on the diagnostic stream
    pub fn handle_content_block_start(&mut self, _event: &str, data: &Value) -> HookResult {
        let block_type = str_field(data, "block_type");
        let block_index = field(data, "block_index").and_then(Value::as_i64);
        let agent = agent_label(str_field(data, "session_id")).map(str::to_string);

        let is_reasoning = block_type.is_some_and(|t| REASONING_TYPES.contains(&t));
        if !is_reasoning || !self.config.show_thinking_stream {
            return HookResult::CONTINUE;
        }
        if let Some(index) = block_index {
            let status = self.write_thinking_status(agent.as_deref());
            report(status, CONTENT_BLOCK_START);
            self.thinking_blocks.insert(
                index,
                TrackedBlock {
                    started: true,
                    agent,
                },
            );
        }

        HookResult::CONTINUE
    }

    /// Render a tracked reasoning block once it is complete
    pub fn handle_content_block_end(&mut self, _event: &str, data: &Value) -> HookResult {
        let Some(index) = field(data, "block_index").and_then(Value::as_i64) else {
            return HookResult::CONTINUE;
        };
        let Some(tracked) = self.thinking_blocks.remove(&index) else {
            return HookResult::CONTINUE;
        };

        let empty = Value::Object(Map::new());
        let block = field(data, "block").unwrap_or(&empty);
        let text = reasoning_text(block);

        if !text.is_empty() {
            let status = self.write_thinking_block(tracked.agent.as_deref(), &text);
            report(status, CONTENT_BLOCK_END);
        }

        HookResult::CONTINUE
    }

    /// Show the tool about to run and its truncated arguments
    pub fn handle_tool_pre(&mut self, _event: &str, data: &Value) -> HookResult {
        let tool_name = field(data, "tool_name").map_or_else(|| "unknown".to_string(), display_string);
        let input = field(data, "tool_input").map_or_else(|| "{}".to_string(), display_string);
        let truncated = truncate_lines(&input, self.config.show_tool_lines);
        let agent = agent_label(str_field(data, "session_id"));

        let status = self.write_tool_call(agent, &tool_name, &truncated);
        report(status, TOOL_PRE);

        HookResult::CONTINUE
    }

    /// Show the tool's outcome and its truncated output
    pub fn handle_tool_post(&mut self, _event: &str, data: &Value) -> HookResult {
        let tool_name = field(data, "tool_name").map_or_else(|| "unknown".to_string(), display_string);
        let result = field(data, "tool_response").or_else(|| field(data, "result"));
        let (output, success) = tool_outcome(result);
        let truncated = truncate_lines(&output, self.config.show_tool_lines);
        let agent = agent_label(str_field(data, "session_id"));

        let status = self.write_tool_result(agent, &tool_name, &truncated, success);
        report(status, TOOL_POST);

        HookResult::CONTINUE
    }

    /// Buffer token usage from a successful response for display later
    pub fn handle_llm_response(&mut self, _event: &str, data: &Value) -> HookResult {
        if !self.config.show_token_usage {
            return HookResult::CONTINUE;
        }

        // A missing status counts as success
        let ok = field(data, "status").map_or(true, |s| s.as_str() == Some("ok"));
        if !ok {
            return HookResult::CONTINUE;
        }

        let Some(usage) = field(data, "usage")
            .and_then(Value::as_object)
            .filter(|u| !u.is_empty())
        else {
            return HookResult::CONTINUE;
        };

        let count = |key: &str| usage.get(key).and_then(Value::as_u64).unwrap_or(0);
        self.buffered_usage = Some(BufferedUsage {
            input: count("input"),
            output: count("output"),
        });

        HookResult::CONTINUE
    }

    /// Print and clear buffered token usage
    pub fn handle_prompt_complete(&mut self, _event: &str, _data: &Value) -> HookResult {
        if let Some(usage) = self.buffered_usage.take() {
            let status = self.write_usage(usage);
            report(status, PROMPT_COMPLETE);
        }

        HookResult::CONTINUE
    }

    fn write_thinking_status(&mut self, agent: Option<&str>) -> io::Result<()> {
        let line = match agent {
            Some(agent) => format!(
                "    {}",
                self.theme.status.paint(&format!("🤔 [{agent}] Thinking..."))
            ),
            None => self.theme.status.paint("🧠 Thinking...").to_string(),
        };
        writeln!(self.diag, "\n{line}")?;
        self.diag.flush()
    }

    fn write_thinking_block(&mut self, agent: Option<&str>, text: &str) -> io::Result<()> {
        let (indent, banner_width, render_width, title) = match agent {
            Some(agent) => ("    ", AGENT_BANNER_WIDTH, AGENT_WIDTH, format!("[{agent}] Thinking:")),
            None => ("", PARENT_BANNER_WIDTH, PARENT_WIDTH, "Thinking:".to_string()),
        };
        let rendered = MarkdownRenderer::new(self.theme.markdown.clone())
            .with_width(render_width)
            .render(text);

        let banner = &self.theme.banner;
        let heavy = banner.paint(&"=".repeat(banner_width));
        let light = banner.paint(&"-".repeat(banner_width));

        writeln!(self.out, "\n{indent}{heavy}")?;
        writeln!(self.out, "{indent}{}", banner.paint(&title))?;
        writeln!(self.out, "{indent}{light}")?;
        for line in rendered.split('\n') {
            writeln!(self.out, "{indent}{line}")?;
        }
        writeln!(self.out, "{indent}{heavy}\n")?;
        self.out.flush()
    }

    fn write_tool_call(&mut self, agent: Option<&str>, tool_name: &str, args: &str) -> io::Result<()> {
        let status = &self.theme.status;
        let detail = &self.theme.detail;
        let arguments = detail.paint(&format!("Arguments: {args}"));
        match agent {
            Some(agent) => {
                let header = status.paint(&format!("┌─ 🔧 [{agent}] Using tool: {tool_name}"));
                writeln!(self.out, "\n    {header}")?;
                writeln!(self.out, "    {}  {arguments}", status.paint("│"))?;
            }
            None => {
                let header = status.paint(&format!("🔧 Using tool: {tool_name}"));
                writeln!(self.out, "\n{header}")?;
                writeln!(self.out, "   {arguments}")?;
            }
        }
        self.out.flush()
    }

    fn write_tool_result(
        &mut self,
        agent: Option<&str>,
        tool_name: &str,
        output: &str,
        success: bool,
    ) -> io::Result<()> {
        let icon = if success { "✅" } else { "❌" };
        let status = &self.theme.status;
        let body = self.theme.detail.paint(output);
        match agent {
            Some(agent) => {
                let header = status.paint(&format!("└─ {icon} [{agent}] Tool result: {tool_name}"));
                writeln!(self.out, "    {header}")?;
                writeln!(self.out, "       {body}\n")?;
            }
            None => {
                let header = status.paint(&format!("{icon} Tool result: {tool_name}"));
                writeln!(self.out, "{header}")?;
                writeln!(self.out, "   {body}\n")?;
            }
        }
        self.out.flush()
    }

    fn write_usage(&mut self, usage: BufferedUsage) -> io::Result<()> {
        let detail = &self.theme.detail;
        let summary = format!(
            "└─ Input: {} | Output: {} | Total: {}",
            format_thousands(usage.input),
            format_thousands(usage.output),
            format_thousands(usage.total()),
        );
        writeln!(self.out)?;
        writeln!(self.out, "{}", detail.paint("│  📊 Token Usage"))?;
        writeln!(self.out, "{}", detail.paint(&summary))?;
        self.out.flush()
    }
}

/// Display text for a finished reasoning block.
///
/// Prefers a non-empty `thinking` string, then `text`, then the flattened
/// nested structure.
fn reasoning_text(block: &Value) -> String {
    ["thinking", "text"]
        .iter()
        .find_map(|key| block.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map_or_else(|| flatten_reasoning_block(block), str::to_string)
}

/// Output text and success flag for a tool result payload.
fn tool_outcome(result: Option<&Value>) -> (String, bool) {
    match result {
        None => ("{}".to_string(), true),
        Some(Value::Object(map)) => {
            let output = match map.get("output") {
                None | Some(Value::Null) => Value::Object(map.clone()).to_string(),
                Some(output) => display_string(output),
            };
            let success = map.get("success").map_or(true, is_truthy);
            (output, success)
        }
        Some(other) => (display_string(other), true),
    }
}

fn report(status: io::Result<()>, event: &str) {
    if let Err(err) = status {
        warn!(event, error = %err, "failed to write console output");
    }
}
