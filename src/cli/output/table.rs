//! Bordered text tables
//!
//! Column widths are measured on the plain text of each cell. Styling is
//! applied after padding so escape sequences never skew the layout.

use colored::{ColoredString, Colorize};

use crate::rules::results::{Severity, Status};

/// How a cell is colorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Bold,
    Severity(Severity),
    Status(Status),
}

/// One table cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Plain,
        }
    }

    pub fn severity(severity: Severity) -> Self {
        Self {
            text: severity.label().to_string(),
            style: Style::Severity(severity),
        }
    }

    pub fn status(status: Status) -> Self {
        Self {
            text: status.label().to_string(),
            style: Style::Status(status),
        }
    }

    fn header(text: &str) -> Self {
        Self {
            text: text.to_string(),
            style: Style::Bold,
        }
    }

    fn width(&self) -> usize {
        self.text.chars().count()
    }

    fn render(&self, width: usize) -> String {
        let padded = format!("{:<width$}", self.text, width = width);
        match self.style {
            Style::Plain => padded,
            Style::Bold => padded.bold().to_string(),
            Style::Severity(severity) => severity_color(severity, padded).to_string(),
            Style::Status(Status::Pass) => padded.green().to_string(),
            Style::Status(Status::Fail) => padded.red().bold().to_string(),
        }
    }
}

fn severity_color(severity: Severity, text: String) -> ColoredString {
    match severity {
        Severity::Info => text.cyan(),
        Severity::Warning => text.yellow(),
        Severity::Alert => text.red(),
    }
}

/// A table with a fixed header and a line between rows
#[derive(Debug, Clone)]
pub struct Table {
    headers: Vec<Cell>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| Cell::header(h)).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row; missing cells render empty and extra cells are dropped
    pub fn add_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.headers.len(), Cell::plain(""));
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(Cell::width).collect();
        for row in &self.rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.width());
            }
        }
        widths
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let separator = separator_line(&widths);

        let mut output = String::new();
        output.push_str(&separator);
        output.push_str(&row_line(&self.headers, &widths));
        output.push_str(&separator);
        for row in &self.rows {
            output.push_str(&row_line(row, &widths));
            output.push_str(&separator);
        }
        output
    }
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(cells: &[Cell], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        line.push(' ');
        line.push_str(&cell.render(*width));
        line.push_str(" |");
    }
    line.push('\n');
    line
}
