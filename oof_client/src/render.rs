//! Console rendering of one poll cycle.
//!
//! Each render clears the terminal, prints a timestamp banner, and prints an
//! aligned table. Column widths are measured in terminal cells so CJK names
//! line up. The change column is red when non-negative and green when
//! negative, following A-share convention.
use std::io::{self, Write};
use std::iter::once;

use chrono::{DateTime, Local};
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Stylize, style};
use crossterm::terminal::{Clear, ClearType};
use oof_common::quote::QuoteField;
use oof_common::QuoteRecord;
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

const BANNER: &str = "*********************************************";
const CODE_HEADER: &str = "Code";
const CHANGE_HEADER: &str = "Change %";
const COLUMN_GAP: &str = "  ";

/// Clear the screen and draw `records` stamped with `now`.
pub fn render<W: Write>(out: &mut W, records: &[QuoteRecord], now: DateTime<Local>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), Clear(ClearType::Purge), MoveTo(0, 0))?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out, "Updated: {}", now.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "{}", BANNER)?;
    writeln!(out)?;
    write_table(out, records)?;
    out.flush()
}

/// Print the header, a rule, and one row per record.
pub fn write_table<W: Write>(out: &mut W, records: &[QuoteRecord]) -> io::Result<()> {
    let headers: Vec<String> = once(CODE_HEADER.to_string())
        .chain(QuoteField::iter().map(|f| f.to_string()))
        .chain(once(CHANGE_HEADER.to_string()))
        .collect();
    let rows: Vec<Vec<String>> = records.iter().map(row_cells).collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|i| {
            rows.iter()
                .map(|row| row[i].width())
                .chain(once(headers[i].width()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    write_row(out, &headers, &widths, None)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(out, "{}", rule.join(COLUMN_GAP))?;
    for (record, row) in records.iter().zip(&rows) {
        write_row(out, row, &widths, record.percent_change())?;
    }
    Ok(())
}

fn row_cells(record: &QuoteRecord) -> Vec<String> {
    once(record.key.clone())
        .chain(record.fields().map(|(_, value)| value.to_string()))
        .chain(once(format_change(record.percent_change())))
        .collect()
}

fn format_change(change: Option<f64>) -> String {
    change
        .map(|c| format!("{:+.2}", c))
        .unwrap_or_else(|| "-".to_string())
}

// `change` colours the last cell; `None` leaves the row plain.
fn write_row<W: Write>(
    out: &mut W,
    cells: &[String],
    widths: &[usize],
    change: Option<f64>,
) -> io::Result<()> {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            write!(out, "{}", COLUMN_GAP)?;
        }
        let pad = " ".repeat(width.saturating_sub(cell.width()));
        match change {
            Some(c) if i == last && c >= 0.0 => write!(out, "{}{}", style(cell.as_str()).red(), pad)?,
            Some(_) if i == last => write!(out, "{}{}", style(cell.as_str()).green(), pad)?,
            _ => write!(out, "{}{}", cell, pad)?,
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use oof_common::quote::parse_response;

    fn draw(records: &[QuoteRecord]) -> String {
        let now = Local.with_ymd_and_hms(2026, 10, 15, 9, 30, 0).unwrap();
        let mut out = Vec::new();
        render(&mut out, records, now).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn renders_banner_and_rows() {
        let records = parse_response(
            "var hq_str_sz000002=\"Vanke A,10.00,9.50,9.80,10.10,9.40,9.79,9.81,1000,9800\";\n\
             var hq_str_sh600000=\"浦发银行,7.10,7.00,6.93,7.12,6.90,6.92,6.93,123456,876543.21\";\n",
        );
        let text = draw(&records);

        assert!(text.contains("Updated: 2026-10-15 09:30:00"));
        assert!(text.contains("Prev Close"));
        assert!(text.contains("sz000002"));
        assert!(text.contains("Vanke A"));
        assert!(text.contains("+3.16"));
        assert!(text.contains("浦发银行"));
        assert!(text.contains("-1.00"));
    }

    #[test]
    fn empty_batch_renders_header_only() {
        let mut out = Vec::new();
        write_table(&mut out, &[]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Code"));
        assert!(lines[1].starts_with("----"));
    }

    #[test]
    fn cjk_names_align_by_cell_width() {
        let records = parse_response(
            "var hq_str_sh600000=\"浦发,1,1,1,1,1,1,1,1,1\";var hq_str_sz000002=\"ABCDEFGH,1,1,1,1,1,1,1,1,1\";",
        );
        let mut out = Vec::new();
        write_table(&mut out, &records).unwrap();
        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().skip(2).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].width(), rows[1].width());
        assert!(rows[0].contains("浦发    "));
    }

    #[test]
    fn change_formatting() {
        assert_eq!(format_change(Some(3.16)), "+3.16");
        assert_eq!(format_change(Some(-0.5)), "-0.50");
        assert_eq!(format_change(Some(0.0)), "+0.00");
        assert_eq!(format_change(None), "-");
    }
}
