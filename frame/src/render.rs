//! FILENAME: frame/src/render.rs
//! PURPOSE: Deterministic textual dump of a frame.
//! CONTEXT: The layout is a header row of column keys, a left gutter of
//! `ordinal row-key`, and fixed-width cells padded to the widest text in
//! each column. The output is stable for a given frame, so tests can
//! compare it verbatim; it is not a machine-readable format.

use smallvec::SmallVec;
use std::fmt;
use std::hash::Hash;

use crate::frame::Frame;

impl<R, C, V> fmt::Display for Frame<R, C, V>
where
    R: Hash + Eq + fmt::Display,
    C: Hash + Eq + fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<String> = self.cols.keys().map(|col| col.to_string()).collect();
        let gutters: Vec<String> = self
            .rows
            .keys()
            .enumerate()
            .map(|(ordinal, row)| format!("{} {}", ordinal, row))
            .collect();

        // Cell texts in row-major order; a column missing from a row is an
        // empty cell
        let grid: Vec<Vec<String>> = self
            .rows
            .values()
            .map(|cells| {
                self.cols
                    .keys()
                    .map(|col| cells.get(col).map_or_else(String::new, |v| v.to_string()))
                    .collect()
            })
            .collect();

        let gutter_width = gutters.iter().map(|g| g.len()).max().unwrap_or(0);
        let mut widths: SmallVec<[usize; 8]> =
            headers.iter().map(|h| h.len()).collect();
        for row in &grid {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }

        let mut line = String::new();
        render_line(&mut line, "", gutter_width, &headers, &widths);
        writeln!(f, "{}", line.trim_end())?;
        for (gutter, row) in gutters.iter().zip(grid.iter()) {
            line.clear();
            render_line(&mut line, gutter, gutter_width, row, &widths);
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}

fn render_line(
    line: &mut String,
    gutter: &str,
    gutter_width: usize,
    cells: &[String],
    widths: &[usize],
) {
    line.push_str(&format!("{:<width$}", gutter, width = gutter_width));
    for (cell, width) in cells.iter().zip(widths.iter()) {
        line.push(' ');
        line.push_str(&format!("{:<width$}", cell, width = width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use series::Observation;

    #[test]
    fn test_dump_is_deterministic() {
        let frame: Frame<&str, &str, i64> = Frame::from_rows(vec![
            ("rA", vec![("c1", 1), ("c2", 22)]),
            ("rB", vec![("c1", 333)]),
        ]);
        let expected = "     c1  c2\n0 rA 1   22\n1 rB 333\n";
        assert_eq!(frame.to_string(), expected);
        // Stable across repeated renders
        assert_eq!(frame.to_string(), expected);
    }

    #[test]
    fn test_dump_pads_to_widest_text() {
        let frame: Frame<&str, &str> = Frame::from_rows(vec![
            ("r1", vec![("name", Observation::from("alpha"))]),
            ("r2", vec![("name", Observation::from("x"))]),
        ]);
        assert_eq!(frame.to_string(), "     name\n0 r1 alpha\n1 r2 x\n");
    }

    #[test]
    fn test_dump_renders_nulls_as_blank() {
        let mut frame: Frame<&str, &str> = Frame::new();
        frame.set("r1", "c1", Observation::Int(1));
        let _ = frame.get("r2", "c1");
        assert_eq!(frame.to_string(), "     c1\n0 r1 1\n1 r2\n");
    }
}
