//! Plain PDF 1.4 writer for the monthly report.
//!
//! Output is text only: one Helvetica body font, a bold font for headings,
//! fixed line spacing and as many US Letter pages as the lines need.

use anyhow::Result;

use super::{ReportData, ReportRenderer};

const PAGE_WIDTH: u32 = 612;
const PAGE_HEIGHT: u32 = 792;
const MARGIN: u32 = 54;
const FONT_SIZE: u32 = 10;
const LEADING: u32 = 14;
const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2 * MARGIN) / LEADING) as usize;
const WRAP_WIDTH: usize = 95;

#[derive(Debug, Clone, PartialEq)]
enum Line {
    Heading(String),
    Text(String),
}

#[derive(Debug, Clone, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    fn layout(report: &ReportData) -> Vec<Line> {
        let recap = &report.recap;
        let totals = &recap.totals;
        let mut lines = vec![
            Line::Heading(format!("Monthly Report - {}", recap.period.display_name())),
            Line::Text(String::new()),
            Line::Heading("Summary".to_string()),
        ];
        lines.extend(wrap(&recap.summary, WRAP_WIDTH).into_iter().map(Line::Text));

        lines.push(Line::Text(String::new()));
        lines.push(Line::Heading("Totals".to_string()));
        lines.push(Line::Text(format!("Activities: {}", totals.total_activities)));
        lines.push(Line::Text(format!("Hours: {:.1}", totals.total_hours)));
        lines.push(Line::Text(format!("Income: {:.2}", totals.total_income)));
        lines.push(Line::Text(format!("Expense: {:.2}", totals.total_expense)));
        lines.push(Line::Text(format!("Net: {:.2}", totals.net())));

        if !totals.activities_by_category.is_empty() {
            lines.push(Line::Text(String::new()));
            lines.push(Line::Heading("Activities by category".to_string()));
            for (category, count) in &totals.activities_by_category {
                lines.push(Line::Text(format!("  {}: {}", category, count)));
            }
        }

        lines.push(Line::Text(String::new()));
        lines.push(Line::Heading("Activities".to_string()));
        if report.activities.is_empty() {
            lines.push(Line::Text("No activities recorded.".to_string()));
        }
        for activity in &report.activities {
            lines.push(Line::Text(format!(
                "{}  {}  [{}]  {:.1}h",
                activity.date,
                clip(&activity.name, 50),
                activity.category,
                activity.duration_hours
            )));
            if !activity.output.trim().is_empty() {
                lines.extend(
                    wrap(&format!("Output: {}", activity.output), WRAP_WIDTH - 4)
                        .into_iter()
                        .map(|l| Line::Text(format!("    {}", l))),
                );
            }
        }

        lines.push(Line::Text(String::new()));
        lines.push(Line::Heading("Finance".to_string()));
        if report.finances.is_empty() {
            lines.push(Line::Text("No finance entries recorded.".to_string()));
        }
        for finance in &report.finances {
            lines.push(Line::Text(format!(
                "{}  {}  income {:.2}  expense {:.2}  net {:.2}",
                finance.date,
                clip(&finance.category, 40),
                finance.income,
                finance.expense,
                finance.net()
            )));
        }

        lines
    }

    fn content_stream(lines: &[Line]) -> String {
        let mut stream = format!(
            "BT\n{} TL\n{} {} Td\n",
            LEADING,
            MARGIN,
            PAGE_HEIGHT - MARGIN
        );
        for line in lines {
            let (font, text) = match line {
                Line::Heading(text) => ("F2", text),
                Line::Text(text) => ("F1", text),
            };
            stream.push_str(&format!("/{} {} Tf\n({}) Tj\nT*\n", font, FONT_SIZE, escape(text)));
        }
        stream.push_str("ET");
        stream
    }

    /// Serializes pages of lines into a complete document
    fn write_document(lines: &[Line]) -> Vec<u8> {
        let pages: Vec<&[Line]> = if lines.is_empty() {
            vec![&[]]
        } else {
            lines.chunks(LINES_PER_PAGE).collect()
        };

        // 1 catalog, 2 page tree, 3-4 fonts, then a page + content pair per page
        let page_ids: Vec<usize> = (0..pages.len()).map(|i| 5 + 2 * i).collect();
        let kids = page_ids
            .iter()
            .map(|id| format!("{} 0 R", id))
            .collect::<Vec<_>>()
            .join(" ");

        let mut objects = vec![
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            format!("<< /Type /Pages /Kids [{}] /Count {} >>", kids, pages.len()),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>".to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>".to_string(),
        ];

        for (page, page_id) in pages.iter().zip(&page_ids) {
            objects.push(format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
                 /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                PAGE_WIDTH,
                PAGE_HEIGHT,
                page_id + 1
            ));
            let stream = Self::content_stream(page);
            objects.push(format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                stream.len(),
                stream
            ));
        }

        let mut out = String::from("%PDF-1.4\n");
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, body));
        }

        let xref_offset = out.len();
        out.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
        for offset in offsets {
            out.push_str(&format!("{:010} 00000 n \n", offset));
        }
        out.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        ));

        out.into_bytes()
    }
}

impl ReportRenderer for PdfRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render(&self, report: &ReportData) -> Result<Vec<u8>> {
        Ok(Self::write_document(&Self::layout(report)))
    }
}

/// Escapes a PDF string literal for the WinAnsi-encoded fonts. Characters
/// outside printable ASCII are written as octal codes, or '?' when WinAnsi
/// has no glyph for them.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            ' '..='~' => escaped.push(c),
            _ => match win_ansi_code(c) {
                Some(code) => escaped.push_str(&format!("\\{:03o}", code)),
                None => escaped.push('?'),
            },
        }
    }
    escaped
}

/// WinAnsiEncoding byte for a non-ASCII character
fn win_ansi_code(c: char) -> Option<u8> {
    let code = match c {
        '\u{00A0}'..='\u{00FF}' => c as u32 as u8,
        '\u{20AC}' => 0x80,
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85,
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99,
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}

fn clip(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(max.saturating_sub(3)).collect();
        clipped.push_str("...");
        clipped
    }
}

/// Greedy word wrap; words longer than `width` are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let word: String = word.into_iter().collect();
            if current.is_empty() {
                current = word;
            } else if current.chars().count() + 1 + word.chars().count() <= width {
                current.push(' ');
                current.push_str(&word);
            } else {
                lines.push(std::mem::replace(&mut current, word));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
