// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Immutable log-event value and the event-rewrite operation

use std::collections::BTreeMap;
use std::time::SystemTime;

use tracing::Level;

use super::masking::MessageMasker;

/// An immutable structured log event.
///
/// Carries the message string plus metadata the masking engine never
/// inspects or mutates: level, logger target, timestamp, thread name, a
/// rendered stack trace when the event reports an error, and a string
/// context map.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEvent {
    level: Level,
    target: String,
    timestamp: SystemTime,
    thread_name: Option<String>,
    stack_trace: Option<String>,
    context: BTreeMap<String, String>,
    message: String,
}

impl LogEvent {
    pub fn new(level: Level, target: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            target: target.into(),
            timestamp: SystemTime::now(),
            thread_name: std::thread::current().name().map(str::to_owned),
            stack_trace: None,
            context: BTreeMap::new(),
            message: message.into(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: SystemTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_thread_name(mut self, thread_name: impl Into<String>) -> Self {
        self.thread_name = Some(thread_name.into());
        self
    }

    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn timestamp(&self) -> SystemTime {
        self.timestamp
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    pub fn context(&self) -> &BTreeMap<String, String> {
        &self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Copy of this event with a different message; every other field is
    /// carried over unchanged.
    fn with_message(&self, message: String) -> Self {
        Self {
            level: self.level,
            target: self.target.clone(),
            timestamp: self.timestamp,
            thread_name: self.thread_name.clone(),
            stack_trace: self.stack_trace.clone(),
            context: self.context.clone(),
            message,
        }
    }
}

impl MessageMasker {
    /// Rewrite an event: a new event identical in every field except the
    /// message, which has the mask applied. The input is not mutated.
    pub fn rewrite(&self, event: &LogEvent) -> LogEvent {
        event.with_message(self.mask(event.message()).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masker::catalog::MaskableProperties;
    use crate::masker::MASK_TOKEN;

    #[test]
    fn test_rewrite_replaces_only_the_message() {
        let masker = MessageMasker::new(MaskableProperties::new(["password"]));
        let event = LogEvent::new(Level::WARN, "sync::worker", r#"{"password": "abc123"}"#)
            .with_thread_name("worker-3")
            .with_stack_trace("io.Worker.run(Worker.java:42)")
            .with_context("job_id", "42");

        let rewritten = masker.rewrite(&event);

        assert_eq!(
            rewritten.message(),
            format!(r#"{{"password":"{MASK_TOKEN}"}}"#)
        );
        assert_eq!(rewritten.level(), event.level());
        assert_eq!(rewritten.target(), event.target());
        assert_eq!(rewritten.timestamp(), event.timestamp());
        assert_eq!(rewritten.thread_name(), Some("worker-3"));
        assert_eq!(
            rewritten.stack_trace(),
            Some("io.Worker.run(Worker.java:42)")
        );
        assert_eq!(rewritten.context(), event.context());
        // input untouched
        assert_eq!(event.message(), r#"{"password": "abc123"}"#);
    }

    #[test]
    fn test_rewrite_clean_event_is_equal() {
        let masker = MessageMasker::new(MaskableProperties::new(["password"]));
        let event = LogEvent::new(Level::INFO, "sync::worker", "sync finished in 3s");
        assert_eq!(masker.rewrite(&event), event);
    }
}
