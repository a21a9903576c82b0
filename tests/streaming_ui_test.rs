#![allow(missing_docs)]

use std::io::Write;

use serde_json::{json, Value};
use tempfile::NamedTempFile;

use streaming_ui::config::{ModuleConfig, UiConfig};
use streaming_ui::display::Theme;
use streaming_ui::hooks::{
    mount, EventRouter, HookResult, StreamingUiHooks, CONTENT_BLOCK_END, CONTENT_BLOCK_START,
    LLM_RESPONSE, PROMPT_COMPLETE, SUBSCRIBED_EVENTS, TOOL_POST, TOOL_PRE,
};
use streaming_ui::replay::replay;

type CapturedHooks = StreamingUiHooks<Vec<u8>, Vec<u8>>;

fn captured(config: UiConfig) -> CapturedHooks {
    colored::control::set_override(false);
    StreamingUiHooks::new(config, Theme::default(), Vec::new(), Vec::new())
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// A full turn: reasoning, a tool call, then usage shown after completion.
#[test]
fn test_full_turn_renders_in_order() {
    let mut hooks = captured(UiConfig::default());
    let events: Vec<(&str, Value)> = vec![
        (
            CONTENT_BLOCK_START,
            json!({"block_type": "thinking", "block_index": 0, "session_id": "root-session"}),
        ),
        (
            CONTENT_BLOCK_END,
            json!({"block_index": 0, "block": {"type": "thinking", "thinking": "## Plan\n\n- read the file\n- summarise"}}),
        ),
        (
            TOOL_PRE,
            json!({"tool_name": "read_file", "tool_input": {"path": "README.md"}}),
        ),
        (
            TOOL_POST,
            json!({"tool_name": "read_file", "tool_response": {"success": true, "output": "# Title\nbody"}}),
        ),
        (
            LLM_RESPONSE,
            json!({"status": "ok", "usage": {"input": 1234, "output": 567}}),
        ),
        (PROMPT_COMPLETE, json!({"prompt": "hi", "response": "hello"})),
    ];

    for (event, data) in &events {
        assert_eq!(hooks.dispatch(event, data), HookResult::CONTINUE);
    }

    let out = text(hooks.primary());
    let thinking = out.find("Thinking:").unwrap();
    let plan = out.find("Plan").unwrap();
    let tool = out.find("🔧 Using tool: read_file").unwrap();
    let result = out.find("✅ Tool result: read_file").unwrap();
    let usage = out.find("📊 Token Usage").unwrap();
    assert!(thinking < plan && plan < tool && tool < result && result < usage);

    assert!(out.contains("• read the file"));
    assert!(out.contains("Input: 1,234 | Output: 567 | Total: 1,801"));

    let diag = text(hooks.diagnostic());
    assert!(diag.contains("🧠 Thinking..."));
    assert!(!out.contains("🧠"));
    assert!(hooks.tracked_blocks().is_empty());
    assert!(hooks.buffered_usage().is_none());
}

#[test]
fn test_sub_agent_output_is_indented() {
    let mut hooks = captured(UiConfig::default());
    let session = "0000000000000000-7cc787dd22d54f6c_developer-expertise-zen-architect";

    hooks.dispatch(
        CONTENT_BLOCK_START,
        &json!({"block_type": "reasoning", "block_index": 3, "session_id": session}),
    );
    hooks.dispatch(
        CONTENT_BLOCK_END,
        &json!({"block_index": 3, "block": {"type": "reasoning", "summary": [{"text": "a"}, {"content": "b"}]}}),
    );
    hooks.dispatch(
        TOOL_PRE,
        &json!({"tool_name": "grep", "tool_input": "pattern", "session_id": session}),
    );
    hooks.dispatch(
        TOOL_POST,
        &json!({"tool_name": "grep", "result": {"success": false, "output": "no match"}, "session_id": session}),
    );

    let out = text(hooks.primary());
    assert!(out.contains("    [developer-expertise-zen-architect] Thinking:"));
    assert!(out.contains("    a b") || (out.contains("    a\n") && out.contains("    b\n")));
    assert!(out.contains("    ┌─ 🔧 [developer-expertise-zen-architect] Using tool: grep"));
    assert!(out.contains("    └─ ❌ [developer-expertise-zen-architect] Tool result: grep"));

    assert!(text(hooks.diagnostic()).contains("🤔 [developer-expertise-zen-architect] Thinking..."));
}

#[test]
fn test_usage_requires_ok_status_and_flushes_once() {
    let mut hooks = captured(UiConfig::default());

    hooks.dispatch(LLM_RESPONSE, &json!({"status": "error", "usage": {"input": 10}}));
    hooks.dispatch(PROMPT_COMPLETE, &json!({}));
    assert!(hooks.primary().is_empty());

    hooks.dispatch(LLM_RESPONSE, &json!({"status": "ok", "usage": {"input": 10, "output": 20}}));
    hooks.dispatch(PROMPT_COMPLETE, &json!({}));
    let once = text(hooks.primary());
    assert!(once.contains("Total: 30"));

    hooks.dispatch(PROMPT_COMPLETE, &json!({}));
    assert_eq!(text(hooks.primary()), once);
}

#[test]
fn test_disabled_features_print_nothing() {
    let mut hooks = captured(UiConfig {
        show_thinking_stream: false,
        show_tool_lines: 5,
        show_token_usage: false,
    });

    hooks.dispatch(CONTENT_BLOCK_START, &json!({"block_type": "thinking", "block_index": 0}));
    hooks.dispatch(
        CONTENT_BLOCK_END,
        &json!({"block_index": 0, "block": {"type": "thinking", "thinking": "hidden"}}),
    );
    hooks.dispatch(LLM_RESPONSE, &json!({"status": "ok", "usage": {"input": 1}}));
    hooks.dispatch(PROMPT_COMPLETE, &json!({}));

    assert!(hooks.primary().is_empty());
    assert!(hooks.diagnostic().is_empty());
}

#[test]
fn test_malformed_payloads_always_continue() {
    let mut hooks = captured(UiConfig::default());
    let payloads = [
        Value::Null,
        json!("string payload"),
        json!([1, 2, 3]),
        json!({"block_index": "zero", "block_type": 5}),
        json!({"tool_response": {"output": null, "success": "yes"}}),
        json!({"status": 200, "usage": [1, 2]}),
    ];

    for event in SUBSCRIBED_EVENTS {
        for payload in &payloads {
            assert_eq!(hooks.dispatch(event, payload), HookResult::CONTINUE);
        }
    }
    assert!(hooks.tracked_blocks().is_empty());
    assert!(hooks.buffered_usage().is_none());
}

#[test]
fn test_mount_registers_six_hooks() {
    let mut router = EventRouter::new();
    let config = ModuleConfig::from_value(&json!({})).unwrap();
    let hooks = mount(&mut router, &config);

    for event in SUBSCRIBED_EVENTS {
        assert_eq!(router.handler_count(event), 1, "{event} not registered");
    }
    assert_eq!(router.events().len(), 6);
    assert_eq!(*hooks.lock().unwrap().config(), UiConfig::default());
}

#[tokio::test]
async fn test_replay_drives_mounted_formatter() {
    let mut router = EventRouter::new();
    let hooks = mount(&mut router, &ModuleConfig::default());

    let input = concat!(
        "{\"event\":\"content_block:start\",\"data\":{\"block_type\":\"thinking\",\"block_index\":4}}\n",
        "{\"event\":\"llm:response\",\"data\":{\"status\":\"ok\",\"usage\":{\"input\":5,\"output\":6}}}\n",
    );
    let stats = replay(input.as_bytes(), &mut router).await.unwrap();
    assert_eq!(stats.emitted, 2);
    assert_eq!(stats.skipped, 0);

    let guard = hooks.lock().unwrap();
    assert!(guard.tracked_blocks().contains_key(&4));
    assert_eq!(guard.buffered_usage().map(|u| u.total()), Some(11));
}

#[test]
fn test_config_file_round_trip_into_formatter() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "[ui]\nshow_tool_lines = 1").unwrap();

    let config = ModuleConfig::from_path(file.path()).unwrap();
    let mut hooks = captured(config.ui);
    hooks.dispatch(TOOL_PRE, &json!({"tool_name": "write", "tool_input": "one\ntwo\nthree"}));

    assert!(text(hooks.primary()).contains("Arguments: one\n... (2 more lines)"));
}
