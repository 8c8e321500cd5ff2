use crate::themes::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Configuration controlling visual appearance of a horizontal bar.
pub struct BarConfig {
    /// Display columns reserved for the label, which is truncated or padded
    /// to fit.
    pub label_width: usize,
    /// Columns of the bar portion (excluding label and value).
    pub width: u16,
    /// Character used for the filled portion.
    pub filled_char: char,
    /// Character used for the empty portion.
    pub empty_char: char,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            label_width: 16,
            width: 30,
            filled_char: '\u{2588}', // █  FULL BLOCK
            empty_char: '\u{2591}',  // ░  LIGHT SHADE
        }
    }
}

// ── HorizontalBar ─────────────────────────────────────────────────────────────

/// One labelled bar of a horizontal bar chart, scaled against the largest
/// value in the chart.
///
/// ```text
/// Live Stream     ███████████░░░░░░░░░ 1,234
/// ```
pub struct HorizontalBar<'a> {
    pub label: &'a str,
    pub value: f64,
    /// Largest value in the chart; a bar of this value is completely filled.
    pub max: f64,
    /// Preformatted value shown after the bar.
    pub value_text: String,
    pub fill_style: Style,
    pub theme: &'a Theme,
    pub config: BarConfig,
}

impl<'a> HorizontalBar<'a> {
    pub fn new(label: &'a str, value: f64, max: f64, value_text: String, theme: &'a Theme) -> Self {
        Self {
            label,
            value,
            max,
            value_text,
            fill_style: theme.bar_fill,
            theme,
            config: BarConfig::default(),
        }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.fill_style = style;
        self
    }

    pub fn with_config(mut self, config: BarConfig) -> Self {
        self.config = config;
        self
    }

    /// Fraction of the bar that is filled, in `[0.0, 1.0]`.
    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 && self.value.is_finite() {
            (self.value / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Render the bar as a [`Line`].
    pub fn to_line(&self) -> Line<'a> {
        let filled = (self.ratio() * self.config.width as f64).round() as u16;
        let empty = self.config.width.saturating_sub(filled);

        let filled_str: String =
            std::iter::repeat_n(self.config.filled_char, filled as usize).collect();
        let empty_str: String =
            std::iter::repeat_n(self.config.empty_char, empty as usize).collect();

        Line::from(vec![
            Span::styled(fit_label(self.label, self.config.label_width), self.theme.bar_label),
            Span::styled(filled_str, self.fill_style),
            Span::styled(empty_str, self.theme.bar_empty),
            Span::styled(format!(" {}", self.value_text), self.theme.value),
        ])
    }
}

/// Truncate or pad `label` to exactly `width` display columns, leaving one
/// trailing space as a gap before the bar.
pub fn fit_label(label: &str, width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let room = width - 1;
    let mut out = String::new();
    let mut used = 0;
    if label.width() > room {
        for ch in label.chars() {
            let w = ch.width().unwrap_or(0);
            if used + w + 1 > room {
                break;
            }
            out.push(ch);
            used += w;
        }
        out.push('…');
        used += 1;
    } else {
        out.push_str(label);
        used = label.width();
    }
    out.push_str(&" ".repeat(width - used));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_full_bar_at_max() {
        let theme = Theme::dark();
        let bar = HorizontalBar::new("Video", 50.0, 50.0, "50".into(), &theme);
        let line = bar.to_line();
        assert_eq!(line.spans[1].content.chars().count(), 30);
        assert!(line.spans[2].content.is_empty());
    }

    #[test]
    fn test_half_bar() {
        let theme = Theme::dark();
        let bar = HorizontalBar::new("Video", 25.0, 50.0, "25".into(), &theme);
        let line = bar.to_line();
        assert_eq!(line.spans[1].content.chars().count(), 15);
        assert_eq!(line.spans[2].content.chars().count(), 15);
        assert!(text(&line).ends_with(" 25"));
    }

    #[test]
    fn test_zero_max_is_empty_bar() {
        let theme = Theme::dark();
        let bar = HorizontalBar::new("Video", 10.0, 0.0, "10".into(), &theme);
        assert_eq!(bar.ratio(), 0.0);
        assert!(bar.to_line().spans[1].content.is_empty());
    }

    #[test]
    fn test_custom_style_and_width() {
        let theme = Theme::dark();
        let bar = HorizontalBar::new("TikTok", 1.0, 4.0, "1".into(), &theme)
            .with_style(theme.rate_high)
            .with_config(BarConfig {
                width: 8,
                ..BarConfig::default()
            });
        let line = bar.to_line();
        assert_eq!(line.spans[1].content.chars().count(), 2);
        assert_eq!(line.spans[1].style, theme.rate_high);
    }

    // ── fit_label ─────────────────────────────────────────────────────────────

    #[test]
    fn test_fit_label_pads_short_labels() {
        assert_eq!(fit_label("Reel", 8), "Reel    ");
    }

    #[test]
    fn test_fit_label_truncates_long_labels() {
        let out = fit_label("Live Stream Replay", 10);
        assert_eq!(out.width(), 10);
        assert!(out.starts_with("Live Str…"));
    }

    #[test]
    fn test_fit_label_wide_characters() {
        let out = fit_label("動画コンテンツ", 8);
        assert_eq!(out.width(), 8);
    }
}
