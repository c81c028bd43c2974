//! Common test utilities for rulegraph
//!
//! [`capture`] runs a closure under a scoped subscriber and returns every
//! event it emitted, so tests can assert on warnings without a global logger.

#![allow(dead_code)]

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// One emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedEvent {
    pub level: Level,
    pub message: String,
}

#[derive(Default)]
struct MessageVisitor(String);

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

/// Layer appending every event to a shared buffer.
#[derive(Clone, Default)]
struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.events.lock().push(CapturedEvent {
            level: *event.metadata().level(),
            message: visitor.0,
        });
    }
}

/// Runs `f` and returns its output with the events it emitted.
pub fn capture<R>(f: impl FnOnce() -> R) -> (R, Vec<CapturedEvent>) {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.events);
    let subscriber = tracing_subscriber::registry().with(layer);

    let output = tracing::subscriber::with_default(subscriber, f);
    let captured = events.lock().clone();
    (output, captured)
}

/// Events at `level` or more severe.
pub fn at_least(events: &[CapturedEvent], level: Level) -> Vec<CapturedEvent> {
    events.iter().filter(|event| event.level <= level).cloned().collect()
}

/// Messages of the WARN events.
pub fn warnings(events: &[CapturedEvent]) -> Vec<String> {
    events
        .iter()
        .filter(|event| event.level == Level::WARN)
        .map(|event| event.message.clone())
        .collect()
}
