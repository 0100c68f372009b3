//! Terminal styling primitives.
//!
//! [`Theme`] is the presentation configuration for a run: whether ANSI
//! styling is emitted at all, and the palette used by messages. It is built
//! once by the binary and handed to the [`Printer`](crate::output::Printer).
//!
//! [`Style`] renders a single cell: padding, alignment within a fixed width,
//! foreground color, bold and faint. Widths are measured in terminal columns
//! on the unstyled text, so styled and plain output line up identically.

use nu_ansi_term::Style as AnsiStyle;
use unicode_width::UnicodeWidthStr;

pub use nu_ansi_term::Color;

/// Presentation configuration for one process run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    color: bool,
    /// Confirmation messages.
    pub success: Color,
    /// Fatal diagnostics.
    pub error: Color,
    /// Names quoted inside messages.
    pub emphasis: Color,
    /// Table headers.
    pub header: Color,
    /// Highlighted table values.
    pub accent: Color,
}

impl Theme {
    pub fn new(color: bool) -> Self {
        Self {
            color,
            success: Color::Green,
            error: Color::Red,
            emphasis: Color::Blue,
            header: Color::Rgb(0x64, 0x95, 0xed),
            accent: Color::Rgb(0x04, 0xb5, 0x75),
        }
    }

    /// A theme that never emits escape sequences.
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Paint `text` in `color`.
    pub fn colorize(&self, text: &str, color: Color) -> String {
        self.paint(text, color.normal())
    }

    fn paint(&self, text: &str, style: AnsiStyle) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        style.paint(text).to_string()
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Horizontal alignment of a cell's content within its width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// Style for a single-line cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    align: Align,
    padding_left: usize,
    padding_right: usize,
    width: usize,
    fg: Option<Color>,
    bold: bool,
    faint: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn padding(mut self, left: usize, right: usize) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self
    }

    /// Minimum total width of the cell, padding included.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn faint(mut self, faint: bool) -> Self {
        self.faint = faint;
        self
    }

    /// Render `text` as a cell. Content wider than the cell is never cut;
    /// the cell grows instead.
    pub fn render(&self, text: &str, theme: &Theme) -> String {
        let content = self.padding_left + display_width(text) + self.padding_right;
        let gap = self.width.saturating_sub(content);
        let (left, right) = match self.align {
            Align::Left => (0, gap),
            Align::Right => (gap, 0),
            Align::Center => (gap / 2, gap - gap / 2),
        };

        let mut ansi = AnsiStyle::new();
        if self.bold {
            ansi = ansi.bold();
        }
        if self.faint {
            ansi = ansi.dimmed();
        }
        if let Some(fg) = self.fg {
            ansi = ansi.fg(fg);
        }

        format!(
            "{}{}{}",
            " ".repeat(left + self.padding_left),
            theme.paint(text, ansi),
            " ".repeat(self.padding_right + right),
        )
    }
}

/// Width of unstyled text in terminal columns.
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Width of text in terminal columns, ignoring ANSI SGR sequences.
pub fn visible_width(text: &str) -> usize {
    let mut plain = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
            continue;
        }
        plain.push(c);
    }
    display_width(&plain)
}

/// Wrap lines in a rounded border. Short lines are right-padded so every
/// row has the width of the widest one.
pub fn rounded_border(lines: &[String]) -> String {
    let inner = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let horizontal = "─".repeat(inner);

    let mut out = Vec::with_capacity(lines.len() + 2);
    out.push(format!("╭{}╮", horizontal));
    for line in lines {
        let pad = inner - visible_width(line);
        out.push(format!("│{}{}│", line, " ".repeat(pad)));
    }
    out.push(format!("╰{}╯", horizontal));
    out.join("\n")
}
