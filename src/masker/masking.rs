// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Mask-application orchestration: known-pattern scrubbing followed by
// catalog-driven property masking, failing open on any internal fault

use std::borrow::Cow;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use regex::Regex;

use super::catalog::MaskableProperties;
use super::patterns::{self, KnownPiiRule};

/// Capability implemented by anything that can rewrite a log message.
/// Single operation: message string in, redacted message string out.
pub trait MessageRewriter: Send + Sync {
    fn rewrite_message(&self, message: &str) -> String;
}

/// The redaction engine.
///
/// Holds the ordered known-PII rule table and the compiled property
/// matcher. Everything is read-only after construction, so a single
/// instance can be shared by reference across threads.
#[derive(Debug)]
pub struct MessageMasker {
    rules: Vec<KnownPiiRule>,
    property_pattern: Option<Regex>,
    property_replacement: String,
}

impl MessageMasker {
    /// Masker with the built-in rule table and the given property catalog.
    pub fn new(properties: MaskableProperties) -> Self {
        Self::with_rules(properties, patterns::default_rules())
    }

    /// Masker with a caller-supplied rule table. Rules are applied in the
    /// given order; each rule sees the output of the previous one.
    pub fn with_rules(properties: MaskableProperties, rules: Vec<KnownPiiRule>) -> Self {
        Self {
            rules,
            property_pattern: patterns::compile_property_pattern(&properties),
            property_replacement: patterns::property_replacement(),
        }
    }

    /// Masker whose property catalog is loaded from `path`, degrading to
    /// known-pattern scrubbing only if the catalog cannot be read.
    pub fn from_catalog_path(path: impl AsRef<Path>) -> Self {
        Self::new(MaskableProperties::load(path))
    }

    /// Apply the mask to a message.
    ///
    /// Returns `Cow::Borrowed` when nothing matches, which is the common
    /// case. This never fails: any internal fault is absorbed and the
    /// original message is returned unmasked.
    pub fn mask<'a>(&self, message: &'a str) -> Cow<'a, str> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.mask_inner(message))) {
            Ok(masked) => masked,
            Err(_) => {
                // Failing open leaves a masking coverage gap; record it
                // through the side channel, never through this path. When
                // the masker sits inside the tracing pipeline itself, the
                // dispatcher's reentrancy guard drops this event rather
                // than recursing.
                tracing::error!("mask application failed; emitting the original message unmasked");
                Cow::Borrowed(message)
            }
        }
    }

    fn mask_inner<'a>(&self, message: &'a str) -> Cow<'a, str> {
        let needs_scrub = self.rules.iter().any(|rule| rule.matcher().is_match(message));
        let needs_property_mask = self
            .property_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(message));

        if !needs_scrub && !needs_property_mask {
            return Cow::Borrowed(message);
        }

        let mut result = message.to_string();

        // Sequential reduction: each rule rewrites the previous output.
        for rule in &self.rules {
            if let Cow::Owned(next) = rule.matcher().replace_all(&result, rule.replacement()) {
                result = next;
            }
        }

        // The property matcher runs on the scrubbed text, so a property
        // inside an already-scrubbed tail is never seen here.
        if let Some(pattern) = &self.property_pattern {
            if let Cow::Owned(next) =
                pattern.replace_all(&result, self.property_replacement.as_str())
            {
                result = next;
            }
        }

        Cow::Owned(result)
    }
}

impl MessageRewriter for MessageMasker {
    fn rewrite_message(&self, message: &str) -> String {
        self.mask(message).into_owned()
    }
}
