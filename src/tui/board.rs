//! Interactive terminal board for browsing the proxy catalog

use crate::board::{ListController, Notice, Stats, View, ViewMode};
use crate::export::{Clipboard, DirectorySaver};
use crate::proxy::{ProxyCatalog, ProxyEntry};
use crate::{Config, Result};
use chrono::NaiveTime;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Width of one grid cell, including padding
const GRID_CELL_WIDTH: u16 = 24;

/// How often the loop wakes up to check timers
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// What the controller last pushed into the terminal regions
#[derive(Debug, Default)]
pub struct BoardView {
    items: Vec<ProxyEntry>,
    mode: ViewMode,
    stats: Stats,
    updated_at: Option<NaiveTime>,
    prev_enabled: bool,
    next_enabled: bool,
    active_mode: ViewMode,
    refresh_busy: bool,
    notice: Option<Notice>,
}

impl BoardView {
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn active_mode(&self) -> ViewMode {
        self.active_mode
    }

    pub fn is_refresh_busy(&self) -> bool {
        self.refresh_busy
    }
}

impl View for BoardView {
    fn render_list(&mut self, items: &[ProxyEntry], mode: ViewMode) {
        self.items = items.to_vec();
        self.mode = mode;
    }

    fn render_stats(&mut self, stats: &Stats) {
        self.stats = *stats;
    }

    fn render_updated_at(&mut self, time: NaiveTime) {
        self.updated_at = Some(time);
    }

    fn set_pagination_enabled(&mut self, prev: bool, next: bool) {
        self.prev_enabled = prev;
        self.next_enabled = next;
    }

    fn set_active_view_mode(&mut self, mode: ViewMode) {
        self.active_mode = mode;
    }

    fn set_refresh_busy(&mut self, busy: bool) {
        self.refresh_busy = busy;
    }

    fn notify(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }
}

/// Keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Search,
}

/// Proxy board TUI application state
pub struct BoardApp {
    controller: ListController<BoardView>,
    clipboard: Box<dyn Clipboard>,
    saver: DirectorySaver,
    input_mode: InputMode,
    /// Text typed into the search box
    search_input: String,
    /// When the pending simulated refresh completes
    refresh_deadline: Option<Instant>,
    /// Whether the user wants to quit
    should_quit: bool,
}

impl BoardApp {
    /// Create a new board TUI application
    pub fn new(catalog: ProxyCatalog, config: &Config, clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            controller: ListController::new(catalog, BoardView::default(), config),
            clipboard,
            saver: DirectorySaver::new(&config.export_dir),
            input_mode: InputMode::Normal,
            search_input: String::new(),
            refresh_deadline: None,
            should_quit: false,
        }
    }

    pub fn controller(&self) -> &ListController<BoardView> {
        &self.controller
    }

    /// Run the TUI application
    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.run_app(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn run_app<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(
            count = self.controller.catalog().len(),
            "starting proxy board"
        );

        loop {
            terminal.draw(|f| self.ui(f))?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            self.tick(Instant::now());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Complete a pending refresh once its deadline has passed
    pub fn tick(&mut self, now: Instant) {
        if let Some(deadline) = self.refresh_deadline {
            if now >= deadline {
                self.refresh_deadline = None;
                self.controller.finish_refresh();
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // A notice blocks until acknowledged
        if self.controller.view().notice().is_some() {
            self.controller.view_mut().dismiss_notice();
            return;
        }

        match self.input_mode {
            InputMode::Search => self.handle_search_key(key.code),
            InputMode::Normal => self.handle_normal_key(key.code),
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Backspace => {
                self.search_input.pop();
                self.controller.apply_search(&self.search_input);
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
                self.controller.apply_search(&self.search_input);
            }
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Left | KeyCode::Char('h') | KeyCode::PageUp => {
                self.controller.go_to_previous_page();
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::PageDown => {
                self.controller.go_to_next_page();
            }
            KeyCode::Char('+') => {
                if let Some(size) = self.controller.state().page_size.larger() {
                    self.controller.set_page_size(size);
                }
            }
            KeyCode::Char('-') => {
                if let Some(size) = self.controller.state().page_size.smaller() {
                    self.controller.set_page_size(size);
                }
            }
            KeyCode::Char('g') => self.controller.set_view_mode(ViewMode::Grid),
            KeyCode::Char('v') => self.controller.set_view_mode(ViewMode::List),
            KeyCode::Char('c') => {
                self.controller.copy_all(self.clipboard.as_mut());
            }
            KeyCode::Char('d') => {
                // Failures are already reported through the notice
                let _ = self.controller.export_as_text(&mut self.saver);
            }
            KeyCode::Char('r') => {
                if let Some(delay) = self.controller.begin_refresh() {
                    self.refresh_deadline = Some(Instant::now() + delay);
                } else {
                    debug!("refresh already pending");
                }
            }
            _ => {}
        }
    }

    pub fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Stats
                Constraint::Length(3), // Search
                Constraint::Min(0),    // Proxy region
                Constraint::Length(3), // Key hints
            ])
            .split(f.size());

        let title = Paragraph::new("SOCKS5 Proxy List")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, chunks[0]);

        self.render_stats(f, chunks[1]);
        self.render_search(f, chunks[2]);

        let view = self.controller.view();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!("Proxies ({} view)", view.mode));
        if view.items.is_empty() {
            let empty = Paragraph::new("No proxies found.")
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(empty, chunks[3]);
        } else {
            match view.mode {
                ViewMode::Grid => Self::render_grid(f, chunks[3], &view.items, block),
                ViewMode::List => Self::render_list(f, chunks[3], &view.items, block),
            }
        }

        self.render_footer(f, chunks[4]);

        if let Some(notice) = view.notice() {
            Self::render_notice(f, notice);
        }
    }

    fn render_stats(&self, f: &mut Frame, area: Rect) {
        let view = self.controller.view();
        let stats = &view.stats;
        let updated = if view.refresh_busy {
            "Updating...".to_string()
        } else {
            view.updated_at
                .map(|t| t.format("%H:%M").to_string())
                .unwrap_or_else(|| "--:--".to_string())
        };

        let line = Line::from(vec![
            Span::raw("Total: "),
            Span::styled(stats.total_count.to_string(), Style::default().fg(Color::Green)),
            Span::raw("  Filtered: "),
            Span::styled(
                stats.filtered_count.to_string(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(format!(
                "  Page {}/{}  Size: {}  Updated: {}",
                stats.current_page,
                stats.total_pages,
                self.controller.state().page_size,
                updated
            )),
        ]);

        let paragraph =
            Paragraph::new(line).block(Block::default().borders(Borders::ALL).title("Stats"));
        f.render_widget(paragraph, area);
    }

    fn render_search(&self, f: &mut Frame, area: Rect) {
        let editing = self.input_mode == InputMode::Search;
        let style = if editing {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let text = if editing {
            format!("{}_", self.search_input)
        } else {
            self.search_input.clone()
        };

        let search = Paragraph::new(text)
            .style(style)
            .block(Block::default().borders(Borders::ALL).title("Search (/)"));
        f.render_widget(search, area);
    }

    fn render_grid(f: &mut Frame, area: Rect, items: &[ProxyEntry], block: Block) {
        let inner_width = area.width.saturating_sub(2);
        let columns = usize::from((inner_width / GRID_CELL_WIDTH).max(1));

        let lines: Vec<Line> = items
            .chunks(columns)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .flat_map(|entry| {
                        let pad = usize::from(GRID_CELL_WIDTH)
                            .saturating_sub(entry.as_str().len() + 1);
                        vec![
                            Span::styled(entry.address().to_string(), Style::default().fg(Color::White)),
                            Span::styled(format!(":{}", entry.port()), Style::default().fg(Color::Cyan)),
                            Span::raw(" ".repeat(pad)),
                        ]
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_list(f: &mut Frame, area: Rect, items: &[ProxyEntry], block: Block) {
        let rows: Vec<ListItem> = items
            .iter()
            .map(|entry| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<18}", entry.address()),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(format!(":{}", entry.port()), Style::default().fg(Color::Cyan)),
                ]))
            })
            .collect();

        f.render_widget(List::new(rows).block(block), area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let view = self.controller.view();
        let enabled = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);
        let mode_style = |mode: ViewMode| {
            if view.active_mode == mode {
                enabled
            } else {
                disabled
            }
        };

        let refresh = if view.refresh_busy {
            Span::styled("[r] Updating...", disabled)
        } else {
            Span::raw("[r] Refresh")
        };

        let line = Line::from(vec![
            Span::styled("[←] Prev", if view.prev_enabled { enabled } else { disabled }),
            Span::raw("  "),
            Span::styled("[→] Next", if view.next_enabled { enabled } else { disabled }),
            Span::raw("  [+/-] Size  "),
            Span::styled("[g] Grid", mode_style(ViewMode::Grid)),
            Span::raw(" "),
            Span::styled("[v] List", mode_style(ViewMode::List)),
            Span::raw("  [c] Copy  [d] Download  "),
            refresh,
            Span::raw("  [q] Quit"),
        ]);

        let footer = Paragraph::new(line)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(footer, area);
    }

    fn render_notice(f: &mut Frame, notice: &Notice) {
        let area = centered_rect(50, 20, f.size());
        let (title, color) = if notice.is_error() {
            ("Error", Color::Red)
        } else {
            ("Notice", Color::Green)
        };

        let popup = Paragraph::new(vec![
            Line::from(notice.message().to_string()),
            Line::from(""),
            Line::from(Span::styled(
                "Press any key to continue",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        );

        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

/// Rectangle of `percent_x` by `percent_y` centered in `r`
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
