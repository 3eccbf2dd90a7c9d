use std::io;
use std::time::{Duration, Instant};

use anyhow::Context;
use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::style::{Color, Modifier, Style};
use tui::text::Span;
use tui::widgets::{Block, BorderType, Borders, Cell, Row};
use tui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use components::{Component, Map, Prompt, PromptKind, StatusBar, Styles, Table};

use crate::app::App;
use crate::models::Station;
use crate::storage::Storage;
use crate::view;

mod components;

const TABLE_WIDTHS: [Constraint; 5] = [
    Constraint::Percentage(30),
    Constraint::Percentage(20),
    Constraint::Percentage(15),
    Constraint::Percentage(15),
    Constraint::Percentage(20),
];

pub struct Ui<S: Storage> {
    app: App<S>,
    closed: bool,
    show_map: bool,

    table: Table<'static, Station>,
    map: Map,
    statusbar: StatusBar,
    prompt: Option<Prompt>,
}

impl<S: Storage> Ui<S> {
    pub fn new(app: App<S>) -> Self {
        let table = Table::new(
            |s: &Station| {
                Row::new(vec![
                    Cell::from(Span::raw(s.name.clone())),
                    Cell::from(Span::raw(s.city.clone())),
                    Cell::from(Span::raw(
                        s.updated.with_timezone(&Local).format("%d/%m %H:%M").to_string(),
                    )),
                    Cell::from(Span::raw(view::status_label(&s.available))),
                    Cell::from(Span::raw(view::summary(&s.available))),
                ])
            },
            Styles {
                block: Some(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .title("Stations"),
                ),
                header: Some(
                    Row::new(vec!["Nom", "Ville", "MAJ", "Statut", "Stocks"])
                        .style(Style::default().add_modifier(Modifier::BOLD)),
                ),
                highlight_style: Some(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                widths: Some(&TABLE_WIDTHS),
            },
        );

        Self {
            app,
            closed: false,
            show_map: true,
            table,
            map: Map::new(),
            statusbar: StatusBar::new(),
            prompt: None,
        }
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        setup_terminal()?;

        let backend = CrosstermBackend::new(io::stdout());

        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor().context("hide cursor")?;

        let tick_rate = Duration::from_millis(250);
        let mut last_tick = Instant::now();

        self.sync();

        loop {
            terminal.draw(|f| self.draw(f))?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                self.handle_event(event::read()?).await;

                if self.closed {
                    break;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                // Periodic read-only re-derivation of the rendered subset.
                self.sync();
                last_tick = Instant::now();
            }
        }

        shutdown_terminal()
    }

    /// Re-derives the filtered subset and pushes it to every surface. Both
    /// the map and the table consume this one subset; neither re-filters.
    fn sync(&mut self) {
        let stations = self.app.filtered();

        self.table.set_list(stations.clone());

        let selected_id = self.table.get_selected().map(|s| s.id);
        self.map.set_stations(&stations, selected_id);

        self.statusbar.update(
            stations.len(),
            self.app.filter(),
            self.app.last_refresh(),
            self.app.toast_message(),
        );
    }

    fn draw<B: Backend>(&mut self, f: &mut Frame<B>) {
        let mut constraints = vec![];

        if self.show_map {
            constraints.push(Constraint::Percentage(45));
        }

        constraints.push(Constraint::Min(1));
        constraints.push(Constraint::Length(3));

        if self.prompt.is_some() {
            constraints.push(Constraint::Length(3));
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(f.size());

        let mut idx = 0;

        if self.show_map {
            self.map.draw(f, layout[idx]);
            idx += 1;
        }

        self.table.draw(f, layout[idx]);
        self.statusbar.draw(f, layout[idx + 1]);

        if let Some(ref prompt) = self.prompt {
            prompt.draw(f, layout[idx + 2]);
        }
    }

    async fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if self.prompt.is_some() {
                self.handle_prompt_key(key.code).await;
                self.sync();
                return;
            }

            match key.code {
                KeyCode::Char('q') => self.closed = true,
                KeyCode::Char('f') => self.app.cycle_filter(),
                KeyCode::Char('m') => self.show_map = !self.show_map,
                KeyCode::Char('r') => {
                    if let Some(station) = self.table.get_selected() {
                        self.prompt = Some(Prompt::report(station));
                    }
                }
                KeyCode::Char('n') => self.prompt = Some(Prompt::station_name()),
                KeyCode::Char('i') => self.prompt = Some(Prompt::import()),
                KeyCode::F(5) => self.app.refresh().await,
                KeyCode::Up => self.table.handle_up(),
                KeyCode::Down => self.table.handle_down(),
                KeyCode::Char('h') => self.map.pan(-1.0, 0.0),
                KeyCode::Char('l') => self.map.pan(1.0, 0.0),
                KeyCode::Char('j') => self.map.pan(0.0, -1.0),
                KeyCode::Char('k') => self.map.pan(0.0, 1.0),
                _ => {}
            }

            self.sync();
        }
    }

    async fn handle_prompt_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push(c);
                }
            }
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt).await;
                }
            }
            _ => {}
        }
    }

    async fn submit_prompt(&mut self, prompt: Prompt) {
        let (kind, input) = prompt.into_parts();

        match kind {
            PromptKind::Report { station_id } => self.app.submit_report(station_id, &input).await,
            PromptKind::StationName => {
                // No name, no station; same as cancelling the dialog.
                if !input.trim().is_empty() {
                    self.prompt = Some(Prompt::station_city(input));
                }
            }
            PromptKind::StationCity { name } => {
                self.prompt = Some(Prompt::station_fuels(name, input));
            }
            PromptKind::StationFuels { name, city } => {
                let (lon, lat) = self.map.center();
                self.app.add_station(&name, &city, &input, lat, lon).await;
            }
            PromptKind::Import => self.app.import(&input).await,
        }
    }
}

fn setup_terminal() -> anyhow::Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("execute")?;
    enable_raw_mode().context("enable raw mod")?;

    std::panic::set_hook(Box::new(|info| {
        shutdown_terminal().expect("can't graceful shutdown terminal");
        eprintln!("{:?}", info);
    }));

    Ok(())
}

fn shutdown_terminal() -> anyhow::Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).context("execute")
}
