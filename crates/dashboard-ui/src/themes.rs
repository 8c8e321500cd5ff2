use ratatui::style::{Color, Modifier, Style};

/// Light or dark terminal background, as far as it can be told.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
}

/// Background implied by a `COLORFGBG` value such as `"15;0"`: the last
/// field is the background palette index, 0 through 6 being dark.
pub fn background_from_colorfgbg(value: Option<&str>) -> BackgroundType {
    let index = value
        .and_then(|v| v.rsplit(';').next())
        .and_then(|bg| bg.trim().parse::<u8>().ok());
    match index {
        Some(bg) if bg > 6 => BackgroundType::Light,
        _ => BackgroundType::Dark,
    }
}

/// Read `COLORFGBG` from the environment; dark when unset.
pub fn detect_background() -> BackgroundType {
    background_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
}

/// Complete theme definition carrying all UI styles used by the dashboard
/// widgets.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_accent: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,

    // ── Tabs and focus ───────────────────────────────────────────────────────
    pub tab_active: Style,
    pub tab_inactive: Style,
    /// Border of the filter panel that has keyboard focus.
    pub focus_border: Style,
    /// Row under the list cursor.
    pub cursor: Style,
    /// Checkbox of a selected filter value.
    pub checked: Style,
    pub unchecked: Style,

    // ── Bars ─────────────────────────────────────────────────────────────────
    pub bar_fill: Style,
    pub bar_empty: Style,
    pub bar_label: Style,

    // ── Engagement rate ──────────────────────────────────────────────────────
    pub rate_low: Style,
    pub rate_medium: Style,
    pub rate_high: Style,

    // ── Table ────────────────────────────────────────────────────────────────
    pub table_header: Style,
    pub table_border: Style,
    pub table_row: Style,
    pub table_row_alt: Style,
    pub table_total: Style,

    // ── Charts ───────────────────────────────────────────────────────────────
    /// Colours cycled through for per-platform series.
    pub series: Vec<Color>,
    pub axis: Style,
    pub reference_line: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            tab_active: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            focus_border: Style::default().fg(Color::Cyan),
            cursor: Style::default()
                .fg(Color::Black)
                .bg(Color::Gray),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::DarkGray),

            bar_fill: Style::default().fg(Color::Cyan),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::Gray),

            rate_low: Style::default().fg(Color::Red),
            rate_medium: Style::default().fg(Color::Yellow),
            rate_high: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),

            series: vec![
                Color::Cyan,
                Color::Magenta,
                Color::Yellow,
                Color::Green,
                Color::LightRed,
                Color::LightBlue,
            ],
            axis: Style::default().fg(Color::DarkGray),
            reference_line: Style::default().fg(Color::Red),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text and bright accent colours so that content
    /// remains legible against a white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_accent: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Yellow),

            tab_active: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            focus_border: Style::default().fg(Color::Blue),
            cursor: Style::default()
                .fg(Color::White)
                .bg(Color::DarkGray),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::Gray),

            bar_fill: Style::default().fg(Color::Blue),
            bar_empty: Style::default().fg(Color::Gray),
            bar_label: Style::default().fg(Color::DarkGray),

            rate_low: Style::default().fg(Color::Red),
            rate_medium: Style::default().fg(Color::Magenta),
            rate_high: Style::default().fg(Color::Green),

            table_header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            table_border: Style::default().fg(Color::Gray),
            table_row: Style::default().fg(Color::Black),
            table_row_alt: Style::default().fg(Color::DarkGray),
            table_total: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            series: vec![
                Color::Blue,
                Color::Magenta,
                Color::Red,
                Color::Green,
                Color::DarkGray,
                Color::Cyan,
            ],
            axis: Style::default().fg(Color::Gray),
            reference_line: Style::default().fg(Color::Red),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maintain a retro aesthetic and maximise
    /// compatibility with minimal terminal emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_accent: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            tab_active: Style::default().fg(Color::Black).bg(Color::White),
            tab_inactive: Style::default().fg(Color::White),
            focus_border: Style::default().fg(Color::White),
            cursor: Style::default().fg(Color::Black).bg(Color::White),
            checked: Style::default().fg(Color::Green),
            unchecked: Style::default().fg(Color::White),

            bar_fill: Style::default().fg(Color::Green),
            bar_empty: Style::default().fg(Color::DarkGray),
            bar_label: Style::default().fg(Color::White),

            rate_low: Style::default().fg(Color::Red),
            rate_medium: Style::default().fg(Color::Yellow),
            rate_high: Style::default().fg(Color::Green),

            table_header: Style::default().fg(Color::Cyan),
            table_border: Style::default().fg(Color::DarkGray),
            table_row: Style::default().fg(Color::White),
            table_row_alt: Style::default().fg(Color::Gray),
            table_total: Style::default().fg(Color::Yellow),

            series: vec![
                Color::Green,
                Color::Cyan,
                Color::Yellow,
                Color::Magenta,
                Color::Red,
                Color::Blue,
            ],
            axis: Style::default().fg(Color::White),
            reference_line: Style::default().fg(Color::Red),
        }
    }

    /// Light theme on light terminals, dark otherwise.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            BackgroundType::Dark => Self::dark(),
        }
    }

    /// `--theme` value to theme; `auto` and anything unknown detect.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Style for an engagement rate (a percentage of views).
    ///
    /// * `< 5 %`   → `rate_low`
    /// * `5–10 %`  → `rate_medium`
    /// * `≥ 10 %`  → `rate_high`
    pub fn rate_style(&self, rate: f64) -> Style {
        if rate >= 10.0 {
            self.rate_high
        } else if rate >= 5.0 {
            self.rate_medium
        } else {
            self.rate_low
        }
    }

    /// Colour of the `index`-th chart series, cycling through the palette.
    pub fn series_color(&self, index: usize) -> Color {
        if self.series.is_empty() {
            return Color::Reset;
        }
        self.series[index % self.series.len()]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    // ── Theme construction ───────────────────────────────────────────────────

    #[test]
    fn test_dark_theme_creation() {
        let t = Theme::dark();
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.warning.fg, Some(Color::Yellow));
        assert_eq!(t.tab_active.bg, Some(Color::Cyan));
        assert_eq!(t.series.len(), 6);
    }

    #[test]
    fn test_light_theme_creation() {
        let t = Theme::light();
        assert_eq!(t.header.fg, Some(Color::Blue));
        assert_eq!(t.text.fg, Some(Color::Black));
        assert_eq!(t.table_row.fg, Some(Color::Black));
        assert_eq!(t.series[0], Color::Blue);
    }

    #[test]
    fn test_classic_theme_creation() {
        let t = Theme::classic();
        // Classic has no bold modifiers on primary text fields.
        assert!(!t.bold.add_modifier.contains(Modifier::BOLD));
        assert!(!t.tab_active.add_modifier.contains(Modifier::BOLD));
        assert_eq!(t.header.fg, Some(Color::Cyan));
        assert_eq!(t.table_total.fg, Some(Color::Yellow));
    }

    #[test]
    fn test_reference_line_differs_from_bars() {
        for t in [Theme::dark(), Theme::light(), Theme::classic()] {
            assert_ne!(t.reference_line, t.bar_fill);
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(Theme::from_name("dark").header.fg, Some(Color::Cyan));
        assert_eq!(Theme::from_name("light").header.fg, Some(Color::Blue));
        let classic = Theme::from_name("classic");
        assert!(!classic.header.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_from_name_unknown_falls_back() {
        let t = Theme::from_name("does-not-exist");
        assert!(t.header.fg.is_some());
    }

    // ── background detection ─────────────────────────────────────────────────

    #[test]
    fn test_background_from_colorfgbg() {
        assert_eq!(background_from_colorfgbg(Some("15;0")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(Some("0;15")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("0;default;7")), BackgroundType::Light);
        assert_eq!(background_from_colorfgbg(Some("garbage")), BackgroundType::Dark);
        assert_eq!(background_from_colorfgbg(None), BackgroundType::Dark);
    }

    // ── rate_style thresholds ────────────────────────────────────────────────

    #[test]
    fn test_rate_style_thresholds() {
        let t = Theme::dark();
        assert_eq!(t.rate_style(0.0).fg, Some(Color::Red));
        assert_eq!(t.rate_style(4.99).fg, Some(Color::Red));
        assert_eq!(t.rate_style(5.0).fg, Some(Color::Yellow));
        assert_eq!(t.rate_style(9.99).fg, Some(Color::Yellow));
        assert_eq!(t.rate_style(10.0).fg, Some(Color::Green));
        assert_eq!(t.rate_style(250.0).fg, Some(Color::Green));
    }

    // ── series_color ─────────────────────────────────────────────────────────

    #[test]
    fn test_series_color_cycles() {
        let t = Theme::dark();
        assert_eq!(t.series_color(0), Color::Cyan);
        assert_eq!(t.series_color(6), Color::Cyan);
        assert_eq!(t.series_color(7), Color::Magenta);
    }
}
