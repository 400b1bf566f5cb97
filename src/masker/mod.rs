// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Log-message masking engine
//
// Two stages, evaluated in strict order for every message:
// - patterns::KnownPiiRule scrubbing of recognized sensitive message shapes
// - catalog-driven masking of JSON-style `"key": value` property pairs

pub mod catalog;
pub mod event;
pub mod masking;
pub mod patterns;
pub mod writer;

pub use masking::MessageMasker;

/// Fixed sentinel substituted for every redacted value. Masking is lossy
/// and uniform; the token is not distinguishable per field.
pub const MASK_TOKEN: &str = "*****";
