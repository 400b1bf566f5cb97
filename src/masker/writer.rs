// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// tracing-subscriber pipeline integration: a MakeWriter wrapper that
// passes every formatted event through the masker before emission

use std::io::{self, Write};
use std::sync::Arc;

use tracing_subscriber::fmt::MakeWriter;

use super::masking::MessageMasker;

/// Wraps a [`MakeWriter`] so each formatted log line is masked on its way
/// to the underlying writer.
///
/// Construct the masker (and load its catalog) before installing the
/// subscriber: the engine's own diagnostics are `tracing` events, and one
/// fired from inside this pipeline is dropped by the dispatcher's
/// reentrancy guard instead of looping. Catalog diagnostics emitted at
/// construction time still reach whatever subscriber was active then.
///
/// Install on a `fmt` layer:
///
/// ```
/// use std::sync::Arc;
/// use logmask::{MaskableProperties, MaskingMakeWriter, MessageMasker};
///
/// let masker = Arc::new(MessageMasker::new(MaskableProperties::new(["password"])));
/// let subscriber = tracing_subscriber::fmt()
///     .with_writer(MaskingMakeWriter::new(masker, std::io::stderr))
///     .finish();
/// ```
pub struct MaskingMakeWriter<W> {
    masker: Arc<MessageMasker>,
    inner: W,
}

impl<W> MaskingMakeWriter<W> {
    pub fn new(masker: Arc<MessageMasker>, inner: W) -> Self {
        Self { masker, inner }
    }
}

impl<'a, W> MakeWriter<'a> for MaskingMakeWriter<W>
where
    W: MakeWriter<'a>,
{
    type Writer = MaskingWriter<W::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        MaskingWriter {
            masker: Arc::clone(&self.masker),
            inner: self.inner.make_writer(),
        }
    }
}

/// Per-event writer produced by [`MaskingMakeWriter`].
pub struct MaskingWriter<W> {
    masker: Arc<MessageMasker>,
    inner: W,
}

impl<W: Write> Write for MaskingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // fmt layers hand over one fully formatted event per call.
        // Non-UTF-8 bytes are converted lossily rather than failing the
        // logging path.
        let text = String::from_utf8_lossy(buf);
        let masked = self.masker.mask(&text);
        self.inner.write_all(masked.as_bytes())?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masker::catalog::MaskableProperties;
    use crate::masker::MASK_TOKEN;

    fn masker() -> Arc<MessageMasker> {
        Arc::new(MessageMasker::new(MaskableProperties::new(["password"])))
    }

    #[test]
    fn test_writer_masks_formatted_event() {
        let mut sink = Vec::new();
        let mut writer = MaskingWriter {
            masker: masker(),
            inner: &mut sink,
        };

        let line = br#"2024-01-01T00:00:00Z INFO sync: {"password": "abc123"}"#;
        let written = writer.write(line).unwrap();

        assert_eq!(written, line.len());
        let output = String::from_utf8(sink).unwrap();
        assert!(output.contains(&format!(r#""password":"{MASK_TOKEN}""#)));
        assert!(!output.contains("abc123"));
    }

    #[test]
    fn test_writer_passes_clean_event_through() {
        let mut sink = Vec::new();
        let mut writer = MaskingWriter {
            masker: masker(),
            inner: &mut sink,
        };

        writer.write_all(b"plain event without secrets\n").unwrap();
        assert_eq!(sink, b"plain event without secrets\n");
    }

    #[test]
    fn test_writer_tolerates_invalid_utf8() {
        let mut sink = Vec::new();
        let mut writer = MaskingWriter {
            masker: masker(),
            inner: &mut sink,
        };

        let written = writer.write(&[0xff, 0xfe, b'o', b'k']).unwrap();
        assert_eq!(written, 4);
        assert!(!sink.is_empty());
    }
}
