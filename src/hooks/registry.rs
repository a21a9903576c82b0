//! Mounting the formatter on a hook dispatcher

use std::collections::HashMap;
use std::io::{Stderr, Stdout};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use tracing::info;

use super::{HookResult, StreamingUiHooks, SUBSCRIBED_EVENTS};
use crate::config::ModuleConfig;

/// A registered hook callback: `(event name, payload) -> result`
pub type HookHandler = Box<dyn FnMut(&str, &Value) -> HookResult + Send>;

/// Formatter shared between the callbacks registered by [`mount`]
pub type SharedHooks = Arc<Mutex<StreamingUiHooks<Stdout, Stderr>>>;

/// Anything that can accept hook registrations
pub trait HookRegistry {
    /// Register `handler` to run whenever `event` fires
    fn register(&mut self, event: &'static str, handler: HookHandler);
}

/// Mount the streaming UI on `registry`.
///
/// Builds a stdout/stderr formatter from `config` and registers one handler
/// per subscribed event. The returned handle shares state with the
/// registered callbacks.
pub fn mount<R: HookRegistry + ?Sized>(registry: &mut R, config: &ModuleConfig) -> SharedHooks {
    let hooks: SharedHooks = Arc::new(Mutex::new(StreamingUiHooks::stdio(config.ui.clone())));

    for event in SUBSCRIBED_EVENTS {
        let shared = Arc::clone(&hooks);
        registry.register(
            event,
            Box::new(move |name: &str, data: &Value| {
                shared
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .dispatch(name, data)
            }),
        );
    }

    info!("Mounted hooks-streaming-ui");
    hooks
}

/// In-process dispatcher keeping handlers per event in registration order
#[derive(Default)]
pub struct EventRouter {
    handlers: HashMap<&'static str, Vec<HookHandler>>,
}

impl EventRouter {
    /// Create an empty router
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every handler registered for `event`, returning their results
    pub fn emit(&mut self, event: &str, data: &Value) -> Vec<HookResult> {
        self.handlers
            .get_mut(event)
            .map(|handlers| handlers.iter_mut().map(|h| h(event, data)).collect())
            .unwrap_or_default()
    }

    /// Number of handlers registered for `event`
    #[must_use]
    pub fn handler_count(&self, event: &str) -> usize {
        self.handlers.get(event).map_or(0, Vec::len)
    }

    /// Event names with at least one handler, sorted
    #[must_use]
    pub fn events(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl HookRegistry for EventRouter {
    fn register(&mut self, event: &'static str, handler: HookHandler) {
        self.handlers.entry(event).or_default().push(handler);
    }
}
