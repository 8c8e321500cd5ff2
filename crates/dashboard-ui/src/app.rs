//! Main application state and TUI event loop for the social media dashboard.
//!
//! [`App`] owns the theme, the active tab, the keyboard focus and the
//! [`DashboardSession`]. Every filter change goes through the session, which
//! recomputes the snapshot before the next frame is drawn.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame, Terminal,
};
use tracing::debug;

use dashboard_core::formatting::format_count;
use dashboard_runtime::session::{DashboardSession, DateBound};

use crate::analytics_view;
use crate::components::filter_panel::{render_date_range, CheckList, DateField};
use crate::components::header::Header;
use crate::dashboard_view;
use crate::themes::Theme;

/// Days moved by PgUp / PgDn on a date field.
const DATE_PAGE_DAYS: i64 = 30;
const SIDEBAR_WIDTH: u16 = 30;

// ── Tab / Focus ───────────────────────────────────────────────────────────────

/// Which page of the dashboard is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// KPIs and charts for the filtered posts.
    Dashboard,
    /// Platform comparison and statistics over every post.
    Analytics,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Dashboard, Tab::Analytics];

    /// Parse a `--tab` value; anything unrecognised opens the dashboard.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "analytics" => Tab::Analytics,
            _ => Tab::Dashboard,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Dashboard => "Dashboard",
            Tab::Analytics => "Analytics",
        }
    }

    fn index(self) -> usize {
        match self {
            Tab::Dashboard => 0,
            Tab::Analytics => 1,
        }
    }

    fn next(self) -> Self {
        match self {
            Tab::Dashboard => Tab::Analytics,
            Tab::Analytics => Tab::Dashboard,
        }
    }
}

/// The sidebar control that receives arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Platforms,
    ContentTypes,
    StartDate,
    EndDate,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::Platforms,
        Focus::ContentTypes,
        Focus::StartDate,
        Focus::EndDate,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    fn date_field(self) -> Option<DateField> {
        match self {
            Focus::StartDate => Some(DateField::Start),
            Focus::EndDate => Some(DateField::End),
            _ => None,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    pub tab: Tab,
    pub focus: Focus,
    /// File name shown in the header.
    pub source: String,
    /// Timezone name shown in the header.
    pub timezone: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    platform_cursor: usize,
    content_type_cursor: usize,
    session: DashboardSession,
}

impl App {
    pub fn new(
        theme_name: &str,
        tab: Tab,
        source: String,
        timezone: String,
        session: DashboardSession,
    ) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            tab,
            focus: Focus::Platforms,
            source,
            timezone,
            should_quit: false,
            platform_cursor: 0,
            content_type_cursor: 0,
            session,
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn platform_cursor(&self) -> usize {
        self.platform_cursor
    }

    pub fn content_type_cursor(&self) -> usize {
        self.content_type_cursor
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Take over the terminal and run until the user quits with `q`, `Q` or
    /// `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press to the application state.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => {
                self.tab = self.tab.next();
                debug!("Switched to {} tab", self.tab.title());
            }
            KeyCode::Right => self.focus = self.focus.next(),
            KeyCode::Left => self.focus = self.focus.prev(),
            KeyCode::Up => self.step(-1),
            KeyCode::Down => self.step(1),
            KeyCode::PageUp => self.shift_focused_date(DATE_PAGE_DAYS),
            KeyCode::PageDown => self.shift_focused_date(-DATE_PAGE_DAYS),
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_under_cursor(),
            KeyCode::Char('a') => self.toggle_all(),
            KeyCode::Char('r') => {
                self.session.reset_filters();
                debug!("Filters reset");
            }
            _ => {}
        }
    }

    /// Up/Down: move a list cursor, or move the focused date by one day
    /// (Up is later, Down is earlier).
    fn step(&mut self, delta: i64) {
        match self.focus {
            Focus::Platforms => {
                let len = self.session.options().platforms.len();
                self.platform_cursor = move_cursor(self.platform_cursor, delta, len);
            }
            Focus::ContentTypes => {
                let len = self.session.options().content_types.len();
                self.content_type_cursor = move_cursor(self.content_type_cursor, delta, len);
            }
            Focus::StartDate | Focus::EndDate => self.shift_focused_date(-delta),
        }
    }

    fn shift_focused_date(&mut self, days: i64) {
        match self.focus {
            Focus::StartDate => self.session.shift_date(DateBound::Start, days),
            Focus::EndDate => self.session.shift_date(DateBound::End, days),
            _ => {}
        }
    }

    fn toggle_under_cursor(&mut self) {
        match self.focus {
            Focus::Platforms => {
                if let Some(p) = self.session.options().platforms.get(self.platform_cursor).cloned() {
                    self.session.toggle_platform(&p);
                }
            }
            Focus::ContentTypes => {
                if let Some(c) = self
                    .session
                    .options()
                    .content_types
                    .get(self.content_type_cursor)
                    .cloned()
                {
                    self.session.toggle_content_type(&c);
                }
            }
            _ => {}
        }
    }

    /// `a`: select every value of the focused list, or clear it when every
    /// value is already selected.
    fn toggle_all(&mut self) {
        match self.focus {
            Focus::Platforms => {
                let all = self.session.selection().platforms.len()
                    == self.session.options().platforms.len();
                self.session.select_all_platforms(!all);
            }
            Focus::ContentTypes => {
                let all = self.session.selection().content_types.len()
                    == self.session.options().content_types.len();
                self.session.select_all_content_types(!all);
            }
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header_area, tabs_area, body, footer] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let header = Header::new(
            &self.source,
            &self.timezone,
            self.session.dataset().len(),
            &self.theme,
        );
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), header_area);

        let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
            .select(self.tab.index())
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active);
        frame.render_widget(tabs, tabs_area);

        let [sidebar, main] =
            Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(body);
        self.render_sidebar(frame, sidebar);

        match self.tab {
            Tab::Dashboard => {
                dashboard_view::render_dashboard(frame, main, self.session.snapshot(), &self.theme)
            }
            Tab::Analytics => {
                analytics_view::render_analytics(frame, main, self.session.analytics(), &self.theme)
            }
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let options = self.session.options();
        let platforms_height = (options.platforms.len() as u16 + 2).min(area.height / 3).max(3);
        let [platforms_area, content_area, dates_area] = Layout::vertical([
            Constraint::Length(platforms_height),
            Constraint::Min(3),
            Constraint::Length(4),
        ])
        .areas(area);

        let platforms = options
            .platforms
            .iter()
            .map(|p| (p.as_str(), self.session.is_platform_selected(p)))
            .collect();
        CheckList::new("Platforms", platforms, &self.theme)
            .cursor(self.platform_cursor)
            .focused(self.focus == Focus::Platforms)
            .render(frame, platforms_area);

        let content_types = options
            .content_types
            .iter()
            .map(|c| (c.as_str(), self.session.is_content_type_selected(c)))
            .collect();
        CheckList::new("Content Types", content_types, &self.theme)
            .cursor(self.content_type_cursor)
            .focused(self.focus == Focus::ContentTypes)
            .render(frame, content_area);

        if options.date_bounds.is_some() {
            let range = self.session.selection().date_range;
            render_date_range(
                frame,
                dates_area,
                range.start,
                range.end,
                self.focus.date_field(),
                &self.theme,
            );
        } else {
            frame.render_widget(
                Paragraph::new(Span::styled("no dates", self.theme.dim)).block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(self.theme.table_border)
                        .title(" Date Range "),
                ),
                dates_area,
            );
        }
    }

    fn footer_line(&self) -> Line<'_> {
        Line::from(vec![
            Span::styled(
                format!(
                    " Showing {} of {} posts ",
                    format_count(self.session.filtered_count() as u64),
                    format_count(self.session.dataset().len() as u64)
                ),
                self.theme.info,
            ),
            Span::styled(
                "│ Tab: switch  ←/→: focus  ↑/↓: move  Space: toggle  a: all  r: reset  q: quit",
                self.theme.dim,
            ),
        ])
    }
}

fn move_cursor(cursor: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let moved = cursor as i64 + delta;
    moved.clamp(0, len as i64 - 1) as usize
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashboard_core::models::{Dataset, PostRecord};
    use dashboard_data::deriver::derive_metrics;
    use ratatui::backend::TestBackend;

    fn post(row: usize, platform: &str, content_type: &str, date: (i32, u32, u32), views: u64) -> PostRecord {
        PostRecord {
            row,
            platform: platform.to_string(),
            content_type: content_type.to_string(),
            post_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            views,
            likes: 10,
            shares: 5,
            comments: 5,
            engagement: 0,
            engagement_rate: 0.0,
        }
    }

    fn app() -> App {
        let ds = derive_metrics(Dataset::new(vec![
            post(0, "TikTok", "Video", (2024, 1, 5), 100),
            post(1, "Instagram", "Image", (2024, 1, 20), 0),
            post(2, "TikTok", "Video", (2024, 2, 1), 50),
            post(3, "YouTube", "Shorts", (2024, 3, 15), 400),
        ]));
        App::new(
            "dark",
            Tab::Dashboard,
            "posts.csv".to_string(),
            "UTC".to_string(),
            DashboardSession::new(ds),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── Tab / Focus ───────────────────────────────────────────────────────────

    #[test]
    fn test_tab_from_name() {
        assert_eq!(Tab::from_name("analytics"), Tab::Analytics);
        assert_eq!(Tab::from_name("Analytics"), Tab::Analytics);
        assert_eq!(Tab::from_name("dashboard"), Tab::Dashboard);
        assert_eq!(Tab::from_name("other"), Tab::Dashboard);
    }

    #[test]
    fn test_focus_cycles_both_ways() {
        assert_eq!(Focus::Platforms.next(), Focus::ContentTypes);
        assert_eq!(Focus::EndDate.next(), Focus::Platforms);
        assert_eq!(Focus::Platforms.prev(), Focus::EndDate);
    }

    #[test]
    fn test_move_cursor_clamps() {
        assert_eq!(move_cursor(0, -1, 3), 0);
        assert_eq!(move_cursor(2, 1, 3), 2);
        assert_eq!(move_cursor(1, 1, 3), 2);
        assert_eq!(move_cursor(5, 1, 0), 0);
    }

    // ── handle_key ────────────────────────────────────────────────────────────

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Char('q'));
        assert!(a.should_quit);

        let mut a = app();
        a.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(a.should_quit);

        let mut a = app();
        press(&mut a, KeyCode::Char('c'));
        assert!(!a.should_quit);
    }

    #[test]
    fn test_tab_switches_view() {
        let mut a = app();
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.tab, Tab::Analytics);
        press(&mut a, KeyCode::Tab);
        assert_eq!(a.tab, Tab::Dashboard);
    }

    #[test]
    fn test_space_toggles_platform_under_cursor() {
        let mut a = app();
        assert_eq!(a.session().filtered_count(), 4);

        // Platforms in first-seen order: TikTok, Instagram, YouTube.
        press(&mut a, KeyCode::Char(' '));
        assert!(!a.session().is_platform_selected("TikTok"));
        assert_eq!(a.session().filtered_count(), 2);

        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Enter);
        assert!(!a.session().is_platform_selected("Instagram"));
        assert_eq!(a.session().filtered_count(), 1);
    }

    #[test]
    fn test_toggle_content_type() {
        let mut a = app();
        press(&mut a, KeyCode::Right);
        assert_eq!(a.focus, Focus::ContentTypes);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        press(&mut a, KeyCode::Down);
        assert_eq!(a.content_type_cursor(), 2);
        press(&mut a, KeyCode::Char(' '));
        assert!(!a.session().is_content_type_selected("Shorts"));
        assert_eq!(a.session().filtered_count(), 3);
    }

    #[test]
    fn test_select_all_toggles_between_all_and_none() {
        let mut a = app();
        press(&mut a, KeyCode::Char('a'));
        assert_eq!(a.session().filtered_count(), 0);
        assert!(a.session().snapshot().is_none());

        press(&mut a, KeyCode::Char('a'));
        assert_eq!(a.session().filtered_count(), 4);
    }

    #[test]
    fn test_date_keys_shift_focused_bound() {
        let mut a = app();
        press(&mut a, KeyCode::Left);
        press(&mut a, KeyCode::Left);
        assert_eq!(a.focus, Focus::StartDate);

        press(&mut a, KeyCode::Up);
        assert_eq!(a.session().selection().date_range.start, day(2024, 1, 6));
        assert_eq!(a.session().filtered_count(), 3);

        // Clamped to the earliest post.
        press(&mut a, KeyCode::PageDown);
        assert_eq!(a.session().selection().date_range.start, day(2024, 1, 5));

        press(&mut a, KeyCode::Right);
        assert_eq!(a.focus, Focus::EndDate);
        press(&mut a, KeyCode::PageDown);
        assert_eq!(a.session().selection().date_range.end, day(2024, 2, 14));
        assert_eq!(a.session().filtered_count(), 3);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut a = app();
        press(&mut a, KeyCode::Char(' '));
        press(&mut a, KeyCode::Left);
        press(&mut a, KeyCode::Up);
        press(&mut a, KeyCode::Char('r'));
        assert_eq!(a.session().filtered_count(), 4);
        assert_eq!(a.session().selection().date_range.end, day(2024, 3, 15));
    }

    // ── render ────────────────────────────────────────────────────────────────

    fn draw(app: &App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_dashboard_tab() {
        let a = app();
        let text = draw(&a, 180, 60);
        assert!(text.contains("SOCIAL MEDIA ANALYTICS DASHBOARD"));
        assert!(text.contains("Platforms (3/3)"));
        assert!(text.contains("2024-01-05"));
        assert!(text.contains("Showing 4 of 4 posts"));
        assert!(text.contains("Total Posts"));
    }

    #[test]
    fn test_render_analytics_tab() {
        let mut a = app();
        press(&mut a, KeyCode::Tab);
        let text = draw(&a, 180, 60);
        assert!(text.contains("Statistical Summary"));
    }

    #[test]
    fn test_render_empty_selection_shows_warning() {
        let mut a = app();
        press(&mut a, KeyCode::Char('a'));
        let text = draw(&a, 180, 60);
        assert!(text.contains("No data available"));
        assert!(text.contains("Showing 0 of 4 posts"));
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let a = app();
        draw(&a, 20, 6);
    }
}
