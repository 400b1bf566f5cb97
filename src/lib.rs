// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// logmask - runtime log-redaction engine
//
// Intercepts log messages before they are emitted and rewrites them to
// remove secrets and known categories of sensitive payload data:
// - A known-pattern scrubber truncates recognized sensitive message shapes
// - A property masker replaces JSON-style `"key": value` pairs whose key
//   appears in an externally supplied catalog of maskable property names

//! Runtime log redaction.
//!
//! # Examples
//!
//! ```
//! use logmask::{MaskableProperties, MessageMasker, MASK_TOKEN};
//!
//! let properties = MaskableProperties::new(["password", "api_key"]);
//! let masker = MessageMasker::new(properties);
//!
//! let masked = masker.mask(r#"connector config: {"password": "hunter2"}"#);
//! assert_eq!(
//!     masked,
//!     format!(r#"connector config: {{"password":"{MASK_TOKEN}"}}"#)
//! );
//! ```

pub mod masker;

pub use masker::catalog::{CatalogError, MaskableProperties, DEFAULT_CATALOG_PATH};
pub use masker::event::LogEvent;
pub use masker::masking::{MessageMasker, MessageRewriter};
pub use masker::patterns::KnownPiiRule;
pub use masker::writer::MaskingMakeWriter;
pub use masker::MASK_TOKEN;
