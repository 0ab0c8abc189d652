//! Fixed-width text report for comparison results
//!
//! Pure formatting: every number shown is already in the [`ComparisonResult`]. Column
//! widths and decimal precision come from [`ReportLayout`], so the same formatter works
//! for any metric set. Cells are padded to their column width and separated by a
//! fixed gap, which makes every field recoverable by byte position
//! (see [`ReportLayout::column_spans`]).
//!
//! Widths are minimums: [`Report::build`] widens a column to its widest cell, so every
//! row keeps the same spans. Metric names are the only cells that get truncated, and
//! widths are counted in bytes so the spans stay valid for non-ASCII names.

use crate::comparison::ComparisonResult;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Columns in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Metric,
    BaselineMean,
    EnhancedMean,
    Change,
    PValue,
    EffectSize,
    Interval,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Metric,
        Column::BaselineMean,
        Column::EnhancedMean,
        Column::Change,
        Column::PValue,
        Column::EffectSize,
        Column::Interval,
    ];

    fn label(&self) -> &'static str {
        match self {
            Column::Metric => "metric",
            Column::BaselineMean => "baseline",
            Column::EnhancedMean => "enhanced",
            Column::Change => "change",
            Column::PValue => "p-value",
            Column::EffectSize => "cohen_d",
            Column::Interval => "CI",
        }
    }
}

/// Column widths and decimal precision of the text report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLayout {
    pub name_width: usize,
    /// Width of the baseline and enhanced mean columns
    pub value_width: usize,
    pub change_width: usize,
    pub p_value_width: usize,
    pub effect_width: usize,
    pub interval_width: usize,
    /// Spaces between adjacent columns
    pub column_gap: usize,

    pub mean_precision: usize,
    pub change_precision: usize,
    pub p_value_precision: usize,
    pub effect_precision: usize,
    pub interval_precision: usize,
}

impl Default for ReportLayout {
    fn default() -> Self {
        Self {
            name_width: 14,
            value_width: 10,
            change_width: 10,
            p_value_width: 10,
            effect_width: 8,
            interval_width: 20,
            column_gap: 2,
            mean_precision: 3,
            change_precision: 1,
            p_value_precision: 6,
            effect_precision: 2,
            interval_precision: 2,
        }
    }
}

impl ReportLayout {
    pub fn width_of(&self, column: Column) -> usize {
        match column {
            Column::Metric => self.name_width,
            Column::BaselineMean | Column::EnhancedMean => self.value_width,
            Column::Change => self.change_width,
            Column::PValue => self.p_value_width,
            Column::EffectSize => self.effect_width,
            Column::Interval => self.interval_width,
        }
    }

    /// Grow a column so that a `width`-byte cell fits; never shrinks
    fn widen(&mut self, column: Column, width: usize) {
        let field = match column {
            Column::Metric => &mut self.name_width,
            Column::BaselineMean | Column::EnhancedMean => &mut self.value_width,
            Column::Change => &mut self.change_width,
            Column::PValue => &mut self.p_value_width,
            Column::EffectSize => &mut self.effect_width,
            Column::Interval => &mut self.interval_width,
        };
        *field = (*field).max(width);
    }

    /// Byte range of each column within a rendered line, in `Column::ALL` order
    pub fn column_spans(&self) -> Vec<Range<usize>> {
        let mut start = 0;
        Column::ALL
            .iter()
            .map(|&column| {
                let end = start + self.width_of(column);
                let span = start..end;
                start = end + self.column_gap;
                span
            })
            .collect()
    }

    /// Total width of a line whose cells all fit their columns
    pub fn line_width(&self) -> usize {
        self.column_spans().last().map_or(0, |span| span.end)
    }

    fn format_cell(&self, column: Column, result: &ComparisonResult) -> String {
        match column {
            Column::Metric => truncate(&result.metric, self.name_width),
            Column::BaselineMean => format!("{:.*}", self.mean_precision, result.baseline.mean),
            Column::EnhancedMean => format!("{:.*}", self.mean_precision, result.enhanced.mean),
            Column::Change => match result.percent_change {
                Some(change) => format!("{:+.*}%", self.change_precision, change),
                None => "n/a".to_string(),
            },
            Column::PValue => format!("{:.*}", self.p_value_precision, result.anova.p_value),
            Column::EffectSize => format!("{:.*}", self.effect_precision, result.effect_size),
            Column::Interval => format!(
                "[{:.*}, {:.*}]",
                self.interval_precision,
                result.confidence_interval.lower,
                self.interval_precision,
                result.confidence_interval.upper
            ),
        }
    }

    /// Pad cells to their widths and join them: metric left-aligned, numbers right-aligned
    fn join(&self, cells: &[String]) -> String {
        let gap = " ".repeat(self.column_gap);
        Column::ALL
            .iter()
            .zip(cells)
            .map(|(&column, cell)| {
                let pad = " ".repeat(self.width_of(column).saturating_sub(cell.len()));
                if column == Column::Metric {
                    format!("{}{}", cell, pad)
                } else {
                    format!("{}{}", pad, cell)
                }
            })
            .collect::<Vec<_>>()
            .join(&gap)
    }
}

/// 0.95 -> "95", 0.975 -> "97.5"
fn percent_label(level: f64) -> String {
    ((level * 1000.0).round() / 10.0).to_string()
}

/// Longest prefix of `text` that fits in `width` bytes without splitting a character
fn truncate(text: &str, width: usize) -> String {
    let end = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .take_while(|&end| end <= width)
        .last()
        .unwrap_or(0);
    text[..end].to_string()
}

/// One formatted report row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    pub metric: String,
    /// Unpadded cell text in `Column::ALL` order
    pub cells: Vec<String>,
}

/// Ordered rows plus the layout used to render them
#[derive(Debug, Clone)]
pub struct Report {
    layout: ReportLayout,
    interval_label: String,
    rows: Vec<ReportRow>,
}

impl Report {
    /// Format results in the order given
    ///
    /// # Example
    /// ```
    /// use qwifi_stats::comparison::compare_values;
    /// use qwifi_stats::report::{Report, ReportLayout};
    ///
    /// let result = compare_values("latency", &[12.0, 11.0, 13.0], &[7.0, 8.0, 7.5], 0.95).unwrap();
    /// let report = Report::build([&result], ReportLayout::default());
    /// assert!(report.render().contains("latency"));
    /// ```
    pub fn build<'a, I>(results: I, mut layout: ReportLayout) -> Self
    where
        I: IntoIterator<Item = &'a ComparisonResult>,
    {
        let mut interval_label = Column::Interval.label().to_string();
        let mut rows = Vec::new();

        for result in results {
            if rows.is_empty() {
                interval_label = format!("{}% CI", percent_label(result.confidence_interval.level));
            }
            let cells = Column::ALL
                .iter()
                .map(|&column| layout.format_cell(column, result))
                .collect();
            rows.push(ReportRow {
                metric: result.metric.clone(),
                cells,
            });
        }

        for row in &rows {
            for (&column, cell) in Column::ALL.iter().zip(&row.cells) {
                layout.widen(column, cell.len());
            }
        }

        Self {
            layout,
            interval_label,
            rows,
        }
    }

    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    pub fn rows(&self) -> &[ReportRow] {
        &self.rows
    }

    pub fn header_line(&self) -> String {
        let labels: Vec<String> = Column::ALL
            .iter()
            .map(|&column| {
                let label = match column {
                    Column::Interval => self.interval_label.as_str(),
                    other => other.label(),
                };
                truncate(label, self.layout.width_of(column))
            })
            .collect();
        self.layout.join(&labels)
    }

    /// Rendered lines for each row, without header
    pub fn lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| self.layout.join(&row.cells))
            .collect()
    }

    /// Header, rule and rows, one per line
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.header_line());
        out.push('\n');
        out.push_str(&"-".repeat(self.layout.line_width()));
        out.push('\n');
        for line in self.lines() {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
