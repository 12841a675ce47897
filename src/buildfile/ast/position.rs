//! Byte offset to line/column conversion
//!
//! The parser works on byte spans; nodes and diagnostics carry the
//! human-readable form produced here.

use super::span::Position;

/// Line index over one source text
#[derive(Debug, Clone)]
pub struct SourceLocation {
    /// Offset of the first byte of every line
    line_starts: Vec<usize>,
    len: usize,
}

impl SourceLocation {
    pub fn new(source: &str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(
                source
                    .bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        Self {
            line_starts,
            len: source.len(),
        }
    }

    /// Position of `byte_offset`; offsets past the end clamp to the end of input
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let offset = byte_offset.min(self.len);
        let line = self.line_starts.partition_point(|&start| start <= offset) - 1;
        Position::new(line + 1, offset - self.line_starts[line] + 1, offset)
    }
}
