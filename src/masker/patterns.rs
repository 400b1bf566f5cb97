// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Pattern compilation: the known-PII rule table and the maskable-property
// matcher built from the catalog

use once_cell::sync::Lazy;
use regex::Regex;

use super::catalog::MaskableProperties;
use super::MASK_TOKEN;

/// Shared prefix of the built-in rules: everything up to and including a
/// destination connector's ERROR marker. Greedy on purpose, so the last
/// marker occurrence before the sensitive payload anchors the match.
const DESTINATION_ERROR_PREFIX: &str = r"^(?P<destinationPrefix>.*destination.*\s+>\s+ERROR.+)";

/// Shared tail of the built-in rules: the sensitive payload plus an
/// optional final line terminator, captured so the replacement can keep
/// it. `$` in this engine matches only at the very end of the haystack,
/// so without the explicit terminator a newline-terminated message (every
/// formatted event the writer integration delivers) would bypass the rule.
const SENSITIVE_TAIL_SUFFIX: &str = r"(.+?)(?P<eol>\r?\n?)$";

/// Alternation delimiter for the property matcher.
const PROPERTY_PATTERN_DELIMITER: &str = "|";

const PROPERTY_PATTERN_PREFIX: &str = "(?i)\"(";

/// Tail of the property matcher: `:` then a JSON string literal (escapes
/// allowed), a flat JSON array literal, or a run of decimal digits.
const PROPERTY_PATTERN_SUFFIX: &str = r#")"\s*:\s*("(?:[^"\\]|\\.)*"|\[[^\]\[]*\]|\d+)"#;

/// One recognized category of sensitive free-text message: a precompiled
/// matcher plus a replacement template that keeps the `destinationPrefix`
/// and `messagePrefix` capture groups and drops everything after them.
#[derive(Debug, Clone)]
pub struct KnownPiiRule {
    matcher: Regex,
    replacement: String,
}

impl KnownPiiRule {
    /// Compile a rule from a pattern and replacement template.
    ///
    /// The pattern must define the `destinationPrefix` and `messagePrefix`
    /// named capture groups referenced by the default replacement.
    pub fn new(pattern: &str, replacement: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            matcher: Regex::new(pattern)?,
            replacement: replacement.into(),
        })
    }

    /// Rule with the standard prefix-preserving replacement
    /// `${destinationPrefix}${messagePrefix}` followed by the mask token
    /// and the `eol` capture, when the pattern defines one, so a trailing
    /// line terminator survives the rewrite. An absent `eol` group
    /// expands to the empty string.
    pub fn prefix_preserving(pattern: &str) -> Result<Self, regex::Error> {
        Self::new(
            pattern,
            format!("${{destinationPrefix}}${{messagePrefix}}{MASK_TOKEN}${{eol}}"),
        )
    }

    pub(crate) fn matcher(&self) -> &Regex {
        &self.matcher
    }

    pub(crate) fn replacement(&self) -> &str {
        &self.replacement
    }
}

/// Built-in rule table covering the known destination error shapes.
/// Applied in order; each rule sees the output of the previous one.
pub(crate) static DEFAULT_RULES: Lazy<Vec<KnownPiiRule>> = Lazy::new(|| {
    let shapes = [
        // destination error carrying an invalid-message report
        format!(
            r"{DESTINATION_ERROR_PREFIX}(?P<messagePrefix>Received\s+invalid\s+message:){SENSITIVE_TAIL_SUFFIX}"
        ),
        // destination error carrying a SQL exception with literal values
        format!(
            r"{DESTINATION_ERROR_PREFIX}(?P<messagePrefix>org\.jooq\.exception\.DataAccessException: SQL.+values\s+\(){SENSITIVE_TAIL_SUFFIX}"
        ),
    ];

    shapes
        .iter()
        .filter_map(|pattern| match KnownPiiRule::prefix_preserving(pattern) {
            Ok(rule) => Some(rule),
            Err(err) => {
                tracing::warn!(error = %err, "failed to compile built-in masking rule, skipping");
                None
            }
        })
        .collect()
});

/// Default rules, cloned for a new masker instance.
pub fn default_rules() -> Vec<KnownPiiRule> {
    DEFAULT_RULES.clone()
}

/// Compile the single property matcher by alternating every catalog entry
/// inside the fixed template. Returns `None` for an empty catalog, and on
/// compile failure, which degrades to no property masking.
///
/// Property names come from a trusted catalog and are joined unescaped; a
/// name carrying pattern metacharacters is an accepted limitation.
pub(crate) fn compile_property_pattern(properties: &MaskableProperties) -> Option<Regex> {
    if properties.is_empty() {
        return None;
    }

    let alternation = properties
        .iter()
        .collect::<Vec<_>>()
        .join(PROPERTY_PATTERN_DELIMITER);
    let pattern = format!("{PROPERTY_PATTERN_PREFIX}{alternation}{PROPERTY_PATTERN_SUFFIX}");

    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(err) => {
            tracing::warn!(
                error = %err,
                "failed to compile property masking pattern; property masking disabled"
            );
            None
        }
    }
}

/// Replacement applied per property match: the key keeps its captured
/// casing, the value is always rendered as a masked string literal.
pub(crate) fn property_replacement() -> String {
    format!("\"${{1}}\":\"{MASK_TOKEN}\"")
}
