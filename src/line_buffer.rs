//! Fixed-capacity line buffer with an in-place field table.
//!
//! One buffer holds one operator line. The tokenizer overwrites every
//! delimiter byte with NUL, so each recognized field is independently
//! readable as a terminated run starting at its recorded offset.

/// Maximum printable bytes per line; one extra slot holds the terminator.
pub const MAX_CHARS: usize = 80;

/// Maximum number of fields recorded per line.
pub const MAX_FIELDS: usize = 5;

/// Classification of a field, fixed by its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    LowerAlpha,
    UpperAlpha,
    Numeric,
}

/// A line of operator input plus the field table the tokenizer fills in.
pub struct LineBuffer {
    pub(crate) buffer: [u8; MAX_CHARS + 1],
    pub(crate) len: usize,
    pub(crate) field_count: usize,
    pub(crate) field_position: [usize; MAX_FIELDS],
    pub(crate) field_kind: [FieldKind; MAX_FIELDS],
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl LineBuffer {
    pub fn new() -> Self {
        Self {
            buffer: [0; MAX_CHARS + 1],
            len: 0,
            field_count: 0,
            field_position: [0; MAX_FIELDS],
            field_kind: [FieldKind::LowerAlpha; MAX_FIELDS],
        }
    }

    /// Build a buffer directly from a string, truncated at capacity.
    pub fn from_str(s: &str) -> Self {
        let mut data = Self::new();
        for &byte in s.as_bytes() {
            data.push(byte);
        }
        data
    }

    /// Append one byte; ignored once the buffer is at capacity.
    pub fn push(&mut self, byte: u8) {
        if self.len < MAX_CHARS {
            self.buffer[self.len] = byte;
            self.len += 1;
        }
    }

    /// Destructively remove the most recent byte; no-op when empty.
    pub fn pop(&mut self) {
        if self.len > 0 {
            self.len -= 1;
            self.buffer[self.len] = 0;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reset content and field table before reading the next line.
    pub fn clear(&mut self) {
        self.buffer = [0; MAX_CHARS + 1];
        self.len = 0;
        self.field_count = 0;
        self.field_position = [0; MAX_FIELDS];
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// The text of a field as a terminated run; empty for an absent field
    /// (or one holding bytes that are not valid UTF-8).
    pub fn field_str(&self, field: usize) -> &str {
        if field >= self.field_count {
            return "";
        }
        let start = self.field_position[field];
        let end = self.buffer[start..]
            .iter()
            .position(|&b| b == 0)
            .map_or(self.buffer.len(), |n| start + n);
        std::str::from_utf8(&self.buffer[start..end]).unwrap_or("")
    }

    /// The integer value of a numeric field; `None` for absent fields and
    /// fields not classified as numeric.
    pub fn field_int(&self, field: usize) -> Option<i32> {
        if field >= self.field_count || self.field_kind[field] != FieldKind::Numeric {
            return None;
        }
        self.field_str(field).parse().ok()
    }

    /// All recognized fields, in scan order.
    pub fn fields(&self) -> impl Iterator<Item = (FieldKind, &str)> {
        (0..self.field_count).map(|i| (self.field_kind[i], self.field_str(i)))
    }
}
