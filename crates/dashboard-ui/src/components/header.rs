use crate::themes::Theme;
use dashboard_core::formatting::format_count;
use ratatui::text::{Line, Span};

/// Ornament on both sides of the title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Title block above the tabs: title, rule, a `[ file | tz | N posts ]`
/// status line and a blank spacer.
pub struct Header<'a> {
    /// File name of the loaded CSV.
    pub source: &'a str,
    /// IANA timezone the post dates were read in.
    pub timezone: &'a str,
    /// Posts in the full dataset.
    pub total_posts: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(source: &'a str, timezone: &'a str, total_posts: usize, theme: &'a Theme) -> Self {
        Self {
            source,
            timezone,
            total_posts,
            theme,
        }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_accent),
                Span::styled(" SOCIAL MEDIA ANALYTICS DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_accent),
            ]),
            Line::from(Span::styled(separator, self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.source, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.timezone, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} posts", format_count(self.total_posts as u64)),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
