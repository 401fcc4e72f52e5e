//! Column layout tables for the 80-column record format.
//!
//! Each record type declares its line as a `const` slice of [`Column`]s, so
//! every span (including blank fillers) has a name and a width that tests
//! can check in isolation.

use crate::error::Result;
use crate::field::{self, OverflowPolicy, Truncate};
use std::ops::Range;

/// Width of every record line, excluding the line break.
pub const LINE_WIDTH: usize = 80;

/// How a column gets its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Fixed text, left-justified and space-padded.
    Constant(&'static str),

    /// The fill character repeated over the whole column.
    Filler(char),

    /// Caller data, zero-padded on the left, keeping the rightmost digits.
    Numeric,

    /// Caller data, space-padded on the right, keeping the leftmost characters.
    Text,
}

/// One named span of a record line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub width: usize,
    pub kind: ColumnKind,
}

impl Column {
    pub const fn constant(name: &'static str, width: usize, value: &'static str) -> Self {
        Column {
            name,
            width,
            kind: ColumnKind::Constant(value),
        }
    }

    pub const fn filler(name: &'static str, width: usize, fill: char) -> Self {
        Column {
            name,
            width,
            kind: ColumnKind::Filler(fill),
        }
    }

    pub const fn numeric(name: &'static str, width: usize) -> Self {
        Column {
            name,
            width,
            kind: ColumnKind::Numeric,
        }
    }

    pub const fn text(name: &'static str, width: usize) -> Self {
        Column {
            name,
            width,
            kind: ColumnKind::Text,
        }
    }

    /// Returns `true` for columns filled from caller data.
    pub fn is_data(&self) -> bool {
        matches!(self.kind, ColumnKind::Numeric | ColumnKind::Text)
    }

    /// Encodes a caller value into exactly `width` columns.
    ///
    /// Fails if the value is not Latin-1, or if it is too long and `policy`
    /// is [`OverflowPolicy::Reject`].
    pub fn encode(&self, value: &str, policy: OverflowPolicy) -> Result<String> {
        field::check_latin1(self.name, value)?;
        field::check_width(self.name, value, self.width, policy)?;
        Ok(self.fit(value))
    }

    fn fit(&self, value: &str) -> String {
        match self.kind {
            ColumnKind::Numeric => field::zero_pad(value, self.width),
            ColumnKind::Text => field::space_pad(value, self.width),
            ColumnKind::Constant(text) => field::space_pad(text, self.width),
            ColumnKind::Filler(fill) => field::pad("", self.width, fill, Truncate::KeepLeft),
        }
    }
}

/// Sum of all column widths in a layout.
pub fn total_width(layout: &[Column]) -> usize {
    layout.iter().map(|c| c.width).sum()
}

/// Character range occupied by the named column.
pub fn column_range(layout: &[Column], name: &str) -> Option<Range<usize>> {
    let mut offset = 0;
    for column in layout {
        if column.name == name {
            return Some(offset..offset + column.width);
        }
        offset += column.width;
    }
    None
}

/// Cuts the named column out of a rendered line.
pub fn extract(layout: &[Column], line: &str, name: &str) -> Option<String> {
    let range = column_range(layout, name)?;
    if line.chars().count() < range.end {
        return None;
    }
    Some(line.chars().skip(range.start).take(range.len()).collect())
}

/// Renders one record line.
///
/// `values` supplies the data columns in layout order. The result is always
/// exactly [`LINE_WIDTH`] characters wide.
pub fn render(layout: &[Column], values: &[&str]) -> String {
    debug_assert_eq!(
        layout.iter().filter(|c| c.is_data()).count(),
        values.len(),
        "one value per data column"
    );

    let mut values = values.iter();
    let line: String = layout
        .iter()
        .map(|column| {
            if column.is_data() {
                column.fit(values.next().copied().unwrap_or_default())
            } else {
                column.fit("")
            }
        })
        .collect();

    field::space_pad(&line, LINE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &[Column] = &[
        Column::constant("code", 2, "AB"),
        Column::numeric("number", 4),
        Column::filler("gap", 3, ' '),
        Column::text("name", 5),
        Column::filler("zeros", 2, '0'),
    ];

    #[test]
    fn test_render_pads_to_line_width() {
        let line = render(SAMPLE, &["12", "Bob"]);
        assert_eq!(line.chars().count(), LINE_WIDTH);
        assert!(line.starts_with("AB0012   Bob  00"));
        assert!(line[16..].chars().all(|c| c == ' '));
    }

    #[test]
    fn test_render_truncates_long_values() {
        let line = render(SAMPLE, &["123456", "Roberta"]);
        assert!(line.starts_with("AB3456   Rober00"));
    }

    #[test]
    fn test_column_range_and_extract() {
        assert_eq!(column_range(SAMPLE, "code"), Some(0..2));
        assert_eq!(column_range(SAMPLE, "name"), Some(9..14));
        assert_eq!(column_range(SAMPLE, "missing"), None);

        let line = render(SAMPLE, &["7", "Eve"]);
        assert_eq!(extract(SAMPLE, &line, "number").as_deref(), Some("0007"));
        assert_eq!(extract(SAMPLE, &line, "name").as_deref(), Some("Eve  "));
        assert_eq!(extract(SAMPLE, "AB", "name"), None);
    }

    #[test]
    fn test_total_width() {
        assert_eq!(total_width(SAMPLE), 16);
    }

    #[test]
    fn test_encode_respects_policy() {
        let column = Column::numeric("account", 4);
        assert_eq!(column.encode("123456", OverflowPolicy::Truncate).unwrap(), "3456");
        assert!(column.encode("123456", OverflowPolicy::Reject).is_err());
        assert_eq!(column.encode("12", OverflowPolicy::Reject).unwrap(), "0012");
        assert!(column.encode("1€", OverflowPolicy::Truncate).is_err());
    }
}
