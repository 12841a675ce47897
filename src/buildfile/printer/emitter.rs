//! Line-oriented text buffer with an indentation level
//!
//! Indentation is written lazily, by the first `print` on a line, so blank
//! lines never carry trailing whitespace.

pub(crate) struct Emitter<'a> {
    buffer: String,
    unit: &'a str,
    depth: usize,
    at_line_start: bool,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(unit: &'a str) -> Self {
        Self {
            buffer: String::new(),
            unit,
            depth: 0,
            at_line_start: true,
        }
    }

    /// Append text to the current line. `text` must not contain a newline.
    pub(crate) fn print(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if self.at_line_start {
            for _ in 0..self.depth {
                self.buffer.push_str(self.unit);
            }
            self.at_line_start = false;
        }
        self.buffer.push_str(text);
    }

    pub(crate) fn println(&mut self, text: &str) {
        self.print(text);
        self.newline();
    }

    pub(crate) fn newline(&mut self) {
        self.buffer.push('\n');
        self.at_line_start = true;
    }

    pub(crate) fn indent(&mut self) {
        self.depth += 1;
    }

    pub(crate) fn dedent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn finish(self) -> String {
        self.buffer
    }
}
