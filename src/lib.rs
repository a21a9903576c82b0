//! Streaming UI - console display for agent runtime events
//!
//! Subscribes to content-block, tool, response and prompt lifecycle events
//! and renders reasoning blocks, tool calls and token usage as readable,
//! colored terminal output.

// Allow multiple crate versions from dependencies (can't easily control)
#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod display;
pub mod hooks;
pub mod payload;
pub mod replay;
pub mod session;

// Re-export commonly used types
pub use config::{ModuleConfig, UiConfig};
pub use display::{truncate_lines, Theme};
pub use hooks::{mount, EventRouter, HookAction, HookRegistry, HookResult, StreamingUiHooks};
pub use payload::flatten_reasoning_block;
pub use session::parse_agent_from_session_id;
