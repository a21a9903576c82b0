//! Session identifier parsing
//!
//! Sub-agent sessions carry the agent name after the first underscore:
//! `{parent-span}-{child-span}_{agent-name}`. Parent sessions have no
//! underscore at all.

/// Extract the agent name from a hierarchical session ID.
///
/// Returns everything after the first underscore, verbatim. Agent names may
/// themselves contain hyphens or further underscores.
///
/// ```
/// use streaming_ui::session::parse_agent_from_session_id;
///
/// assert_eq!(
///     parse_agent_from_session_id(Some("0000-7cc7_zen-architect")),
///     Some("zen-architect")
/// );
/// assert_eq!(parse_agent_from_session_id(Some("12345678-1234")), None);
/// ```
#[must_use]
pub fn parse_agent_from_session_id(session_id: Option<&str>) -> Option<&str> {
    let session_id = session_id.filter(|s| !s.is_empty())?;
    session_id.split_once('_').map(|(_, agent)| agent)
}

/// Agent name for layout decisions.
///
/// Same as [`parse_agent_from_session_id`] but an empty name (a session ID of
/// just `"_"`, for instance) counts as no agent.
#[must_use]
pub fn agent_label(session_id: Option<&str>) -> Option<&str> {
    parse_agent_from_session_id(session_id).filter(|agent| !agent.is_empty())
}
