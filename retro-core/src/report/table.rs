//! Fixed-width column helpers

use std::io::{self, Write};

pub(crate) fn rjust(text: &str, width: usize) -> String {
    format!("{:>width$}", text, width = width)
}

pub(crate) fn ljust(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

/// At most `width` characters of `text`
pub(crate) fn truncate(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}

/// Row label followed by right-justified cells
pub(crate) fn write_row<W, I, S>(out: &mut W, label: &str, cells: I, width: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = ljust(label, width);
    for cell in cells {
        line.push_str(&rjust(cell.as_ref(), width));
    }
    writeln!(out, "{}", line.trim_end())
}

pub(crate) fn write_underline<W: Write>(out: &mut W, columns: usize, width: usize) -> io::Result<()> {
    write_row(out, "", std::iter::repeat("---").take(columns), width)
}

/// Column labels with an underline beneath
pub(crate) fn write_header<'a, W, I>(out: &mut W, labels: I, width: usize) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a str>,
{
    let labels: Vec<&str> = labels.into_iter().collect();
    write_row(out, "", labels.iter(), width)?;
    write_underline(out, labels.len(), width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_justify() {
        assert_eq!(rjust("HR", 6), "    HR");
        assert_eq!(ljust("Ave", 6), "Ave   ");
        assert_eq!(truncate("Philadelphia Athletics", 12), "Philadelphia");
    }

    #[test]
    fn test_header() {
        let mut out = Vec::new();
        write_header(&mut out, ["G", "PA"], 4).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "       G  PA\n     --- ---\n");
    }
}
