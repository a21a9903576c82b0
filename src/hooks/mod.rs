//! Lifecycle event hooks
//!
//! The formatter that turns runtime events into console output, and the
//! registry glue that mounts it on a host dispatcher.

pub mod formatter;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use formatter::{BufferedUsage, StreamingUiHooks, TrackedBlock};
pub use registry::{mount, EventRouter, HookHandler, HookRegistry, SharedHooks};

/// Event fired when a content block begins streaming
pub const CONTENT_BLOCK_START: &str = "content_block:start";
/// Event fired with the complete content block
pub const CONTENT_BLOCK_END: &str = "content_block:end";
/// Event fired before a tool runs
pub const TOOL_PRE: &str = "tool:pre";
/// Event fired after a tool returns
pub const TOOL_POST: &str = "tool:post";
/// Event fired when a model response arrives
pub const LLM_RESPONSE: &str = "llm:response";
/// Event fired after the response has been shown to the user
pub const PROMPT_COMPLETE: &str = "prompt:complete";

/// Every event the formatter subscribes to, in registration order
pub const SUBSCRIBED_EVENTS: [&str; 6] = [
    CONTENT_BLOCK_START,
    CONTENT_BLOCK_END,
    TOOL_PRE,
    TOOL_POST,
    LLM_RESPONSE,
    PROMPT_COMPLETE,
];

/// What the dispatcher should do after a hook runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HookAction {
    /// Proceed unchanged
    #[default]
    Continue,
}

/// Value returned by every hook handler
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HookResult {
    /// Requested action
    pub action: HookAction,
}

impl HookResult {
    /// Proceed without altering the pipeline
    pub const CONTINUE: Self = Self {
        action: HookAction::Continue,
    };
}
