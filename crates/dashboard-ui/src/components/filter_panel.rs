use chrono::NaiveDate;
use ratatui::{
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// A bordered list of filter values with checkboxes and a cursor.
pub struct CheckList<'a> {
    pub title: &'a str,
    /// `(label, selected)` in display order.
    pub items: Vec<(&'a str, bool)>,
    pub cursor: usize,
    /// Whether this list has keyboard focus (highlights border and cursor).
    pub focused: bool,
    pub theme: &'a Theme,
}

impl<'a> CheckList<'a> {
    pub fn new(title: &'a str, items: Vec<(&'a str, bool)>, theme: &'a Theme) -> Self {
        Self {
            title,
            items,
            cursor: 0,
            focused: false,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn selected_count(&self) -> usize {
        self.items.iter().filter(|(_, on)| *on).count()
    }

    /// Lines for at most `height` rows, scrolled so the cursor stays visible.
    pub fn to_lines(&self, height: usize) -> Vec<Line<'a>> {
        if height == 0 {
            return Vec::new();
        }
        let offset = self.cursor.saturating_sub(height - 1);

        self.items
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(i, (label, on))| {
                let (mark, mark_style) = if *on {
                    ("[x] ", self.theme.checked)
                } else {
                    ("[ ] ", self.theme.unchecked)
                };
                let label_style = if self.focused && i == self.cursor {
                    self.theme.cursor
                } else {
                    self.theme.text
                };
                Line::from(vec![
                    Span::styled(mark, mark_style),
                    Span::styled(*label, label_style),
                ])
            })
            .collect()
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let inner_height = area.height.saturating_sub(2) as usize;
        let title = format!(
            " {} ({}/{}) ",
            self.title,
            self.selected_count(),
            self.items.len()
        );
        let border = if self.focused {
            self.theme.focus_border
        } else {
            self.theme.table_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(title);
        frame.render_widget(
            Paragraph::new(Text::from(self.to_lines(inner_height))).block(block),
            area,
        );
    }
}

/// Which date field, if any, has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateField {
    Start,
    End,
}

/// Render the start/end date editor.
pub fn render_date_range(
    frame: &mut Frame,
    area: Rect,
    start: NaiveDate,
    end: NaiveDate,
    focus: Option<DateField>,
    theme: &Theme,
) {
    let border = if focus.is_some() {
        theme.focus_border
    } else {
        theme.table_border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(" Date Range ");
    frame.render_widget(
        Paragraph::new(Text::from(date_lines(start, end, focus, theme))).block(block),
        area,
    );
}

/// `Start  2024-01-05` / `End    2024-03-15`, the focused field highlighted.
pub fn date_lines<'a>(
    start: NaiveDate,
    end: NaiveDate,
    focus: Option<DateField>,
    theme: &'a Theme,
) -> Vec<Line<'a>> {
    let field = |label: &'static str, date: NaiveDate, which: DateField| {
        let style = if focus == Some(which) {
            theme.cursor
        } else {
            theme.value
        };
        Line::from(vec![
            Span::styled(label, theme.label),
            Span::styled(date.format("%Y-%m-%d").to_string(), style),
        ])
    };
    vec![
        field("Start  ", start, DateField::Start),
        field("End    ", end, DateField::End),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────
