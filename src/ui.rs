use anyhow::Result;
use coin_catalog::{cycle_selection, Catalog, CoinRecord, FilterCriteria, Selection, ViewMode};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::io;

const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys are commands
    Normal,
    /// Keys edit the search query
    Search,
}

pub struct App {
    pub catalog: Catalog,
    pub criteria: FilterCriteria,
    pub filtered_coins: Vec<CoinRecord>,
    pub state: TableState,
    pub show_detail: bool,
    pub input_mode: InputMode,
    denominations: Vec<String>,
    mint_cities: Vec<String>,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        // Facets come from the full catalog, never the filtered view
        let denominations = catalog.distinct_denominations();
        let mint_cities = catalog.distinct_mint_cities();

        let mut app = Self {
            catalog,
            criteria: FilterCriteria::default(),
            filtered_coins: Vec::new(),
            state: TableState::default(),
            show_detail: false,
            input_mode: InputMode::Normal,
            denominations,
            mint_cities,
        };
        app.refresh();
        app
    }

    /// Re-run the filter engine for the current criteria
    pub fn refresh(&mut self) {
        self.filtered_coins = self
            .catalog
            .filter(&self.criteria)
            .into_iter()
            .cloned()
            .collect();

        // Reset selection to first item
        if !self.filtered_coins.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.refresh();
    }

    pub fn clear_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    pub fn push_search_char(&mut self, c: char) {
        self.criteria.search_query.push(c);
        self.refresh();
    }

    pub fn pop_search_char(&mut self) {
        if self.criteria.search_query.pop().is_some() {
            self.refresh();
        }
    }

    pub fn cycle_denomination(&mut self) {
        self.criteria.denomination = cycle_selection(&self.criteria.denomination, &self.denominations);
        self.refresh();
    }

    pub fn cycle_mint_city(&mut self) {
        self.criteria.mint_city = cycle_selection(&self.criteria.mint_city, &self.mint_cities);
        self.refresh();
    }

    pub fn cycle_status(&mut self) {
        self.criteria.status = self.criteria.status.cycle();
        self.refresh();
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.criteria.view_mode = view_mode;
        self.refresh();
    }

    pub fn toggle_detail(&mut self) {
        self.show_detail = !self.show_detail;
    }

    pub fn selected_coin(&self) -> Option<&CoinRecord> {
        self.state.selected().and_then(|i| self.filtered_coins.get(i))
    }

    /// "Showing N of M coins"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} of {} coins",
            self.filtered_coins.len(),
            self.catalog.len()
        )
    }

    pub fn next(&mut self) {
        let len = self.filtered_coins.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.filtered_coins.len();
        if len == 0 {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn page_down(&mut self) {
        let len = self.filtered_coins.len();
        if len == 0 {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| (i + PAGE_SIZE).min(len - 1))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    pub fn page_up(&mut self) {
        if self.filtered_coins.is_empty() {
            return;
        }
        let i = self
            .state
            .selected()
            .map(|i| i.saturating_sub(PAGE_SIZE))
            .unwrap_or(0);
        self.state.select(Some(i));
    }

    /// Apply one key press. Returns true when the explorer should quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.input_mode {
            InputMode::Search => match code {
                KeyCode::Enter | KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Backspace => self.pop_search_char(),
                KeyCode::Char(c) => self.push_search_char(c),
                _ => {}
            },
            InputMode::Normal => match code {
                KeyCode::Char('q') | KeyCode::Esc => return true,
                KeyCode::Char('/') => self.input_mode = InputMode::Search,
                KeyCode::Enter => self.toggle_detail(),
                KeyCode::Char('d') => self.cycle_denomination(),
                KeyCode::Char('m') => self.cycle_mint_city(),
                KeyCode::Char('s') => self.cycle_status(),
                KeyCode::Char('v') | KeyCode::Tab => {
                    self.set_view_mode(self.criteria.view_mode.next())
                }
                KeyCode::Char('1') => self.set_view_mode(ViewMode::All),
                KeyCode::Char('2') => self.set_view_mode(ViewMode::Regular),
                KeyCode::Char('3') => self.set_view_mode(ViewMode::Commemorative),
                KeyCode::Char('c') => self.clear_filters(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::PageDown => self.page_down(),
                KeyCode::PageUp => self.page_up(),
                KeyCode::Home => {
                    if !self.filtered_coins.is_empty() {
                        self.state.select(Some(0));
                    }
                }
                KeyCode::End => {
                    if !self.filtered_coins.is_empty() {
                        self.state.select(Some(self.filtered_coins.len() - 1));
                    }
                }
                _ => {}
            },
        }
        false
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Surface loop errors only after the terminal is restored
    res?;

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.handle_key(key.code) {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with view-mode tabs
            Constraint::Length(3), // Search + selectors
            Constraint::Min(0),    // Results
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);
    render_filter_bar(f, chunks[1], app);

    if app.show_detail {
        let content_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(55), // Coin list
                Constraint::Percentage(45), // Detail panel
            ])
            .split(chunks[2]);

        render_results(f, content_chunks[0], app);
        render_detail_panel(f, content_chunks[1], app);
    } else {
        render_results(f, chunks[2], app);
    }

    render_status_bar(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        Span::styled(
            " Indian Coin Explorer ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];

    for (i, mode) in [ViewMode::All, ViewMode::Regular, ViewMode::Commemorative]
        .iter()
        .enumerate()
    {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *mode == app.criteria.view_mode {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("{} {}", i + 1, mode.title()), style));
    }

    spans.push(Span::raw("  │  "));
    spans.push(Span::styled(app.summary(), Style::default().fg(Color::White)));

    let header = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(header, area);
}

fn selection_label<'a>(selection: &'a Selection, all_label: &'a str) -> &'a str {
    match selection {
        Selection::All => all_label,
        Selection::Only(value) => value,
    }
}

fn render_filter_bar(f: &mut Frame, area: Rect, app: &App) {
    let label = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let searching = app.input_mode == InputMode::Search;

    let query_style = if searching {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    };
    let cursor = if searching { "▏" } else { "" };

    let status = match app.criteria.status {
        coin_catalog::StatusFilter::All => "All Status",
        coin_catalog::StatusFilter::Only(status) => status.label(),
    };

    let spans = vec![
        Span::styled(" Search: ", label),
        Span::styled(format!("{}{}", app.criteria.search_query, cursor), query_style),
        Span::raw("  │ "),
        Span::styled("Denomination: ", label),
        Span::raw(selection_label(&app.criteria.denomination, "All Denominations")),
        Span::raw("  │ "),
        Span::styled("Mint: ", label),
        Span::raw(selection_label(&app.criteria.mint_city, "All Mints")),
        Span::raw("  │ "),
        Span::styled("Status: ", label),
        Span::raw(status),
    ];

    let border = if searching { Color::Yellow } else { Color::White };
    let bar = Paragraph::new(vec![Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(" Filters "),
    );

    f.render_widget(bar, area);
}

fn render_results(f: &mut Frame, area: Rect, app: &mut App) {
    if app.filtered_coins.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No coins found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Try adjusting your filters or search query",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Coins "),
        );
        f.render_widget(empty, area);
        return;
    }

    let header_cells = ["Denomination", "Name", "Year", "Mint", "Status", "Issue"]
        .iter()
        .map(|h| {
            Cell::from(*h).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
        });

    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let rows = app.filtered_coins.iter().map(|coin| {
        let status_color = if coin.status == coin_catalog::CoinStatus::Active {
            Color::Green
        } else {
            Color::Red
        };
        let issue_color = if coin.is_commemorative() {
            Color::Magenta
        } else {
            Color::White
        };

        let cells = vec![
            Cell::from(coin.denomination.clone()).style(Style::default().fg(Color::Yellow)),
            Cell::from(truncate(&coin.name, 40)),
            Cell::from(coin.year.to_string()),
            Cell::from(coin.mint_city.clone()),
            Cell::from(coin.status.as_str()).style(Style::default().fg(status_color)),
            Cell::from(coin.issue_type.clone()).style(Style::default().fg(issue_color)),
        ];

        Row::new(cells).height(1)
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(13),
            Constraint::Length(42),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(15),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Coins "),
    )
    .highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = app.state.selected().map(|i| i + 1).unwrap_or(0);
    let total = app.filtered_coins.len();
    let key = Style::default().fg(Color::Yellow);

    let mut status_spans = vec![Span::styled(
        format!(" Row: {}/{} ", selected, total),
        Style::default().fg(Color::Cyan),
    )];

    if app.input_mode == InputMode::Search {
        status_spans.push(Span::raw(" | Typing search... "));
        status_spans.push(Span::styled("Enter", key));
        status_spans.push(Span::raw(" Done | "));
        status_spans.push(Span::styled("Backspace", key));
        status_spans.push(Span::raw(" Delete"));
    } else {
        let active = app.criteria.active_filters();
        if active > 0 {
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled(
                format!("{} filter(s)", active),
                Style::default().fg(Color::Green),
            ));
            status_spans.push(Span::raw(" ("));
            status_spans.push(Span::styled("c", key));
            status_spans.push(Span::raw(" clear)"));
        }

        for (k, label) in [
            ("/", " Search"),
            ("d", " Denom"),
            ("m", " Mint"),
            ("s", " Status"),
            ("v", " View"),
            ("Enter", " Details"),
        ] {
            status_spans.push(Span::raw(" | "));
            status_spans.push(Span::styled(k, key));
            status_spans.push(Span::raw(label));
        }
        status_spans.push(Span::raw(" | "));
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

fn field_line<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("  {}: ", name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value),
    ])
}

fn section_line(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn render_detail_panel(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Coin Details ");

    let coin = match app.selected_coin() {
        Some(c) => c,
        None => {
            f.render_widget(Paragraph::new("No coin selected").block(block), area);
            return;
        }
    };

    let mut content = vec![
        Line::from(Span::styled(
            format!("  {}", coin.name),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field_line("Denomination", coin.denomination.clone()),
        field_line("Year", coin.year.to_string()),
        field_line("Series", coin.series.clone()),
        field_line("Status", coin.status.label().to_string()),
        field_line("Issue", coin.issue_type.clone()),
    ];

    if let Some(note) = &coin.commemorative_note {
        content.push(field_line("Commemorates", note.clone()));
    }

    content.push(Line::from(""));
    content.push(section_line("SPECIFICATIONS"));
    content.push(field_line("Metal", coin.metal.clone()));
    content.push(field_line("Weight", format!("{} g", coin.weight)));
    content.push(field_line("Diameter", format!("{} mm", coin.diameter)));
    if let Some(thickness) = coin.thickness {
        content.push(field_line("Thickness", format!("{} mm", thickness)));
    }
    content.push(field_line("Shape", coin.shape.clone()));
    content.push(field_line("Edge", coin.edge_design.clone()));
    content.push(field_line("Mint", format!("{} ({})", coin.mint_city, coin.mint_mark)));

    content.push(Line::from(""));
    content.push(section_line("DESIGN"));
    content.push(field_line("Obverse", coin.obverse_description.clone()));
    content.push(field_line("Reverse", coin.reverse_description.clone()));

    if let Some(features) = &coin.security_features {
        content.push(Line::from(""));
        content.push(section_line("SECURITY FEATURES"));
        content.push(Line::from(format!("  {}", features)));
    }

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "  Press Enter to close",
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    )));

    let detail_panel = Paragraph::new(content)
        .wrap(Wrap { trim: false })
        .block(block);

    f.render_widget(detail_panel, area);
}
