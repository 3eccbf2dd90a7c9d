use chrono::{DateTime, Local};
use tui::backend::Backend;
use tui::layout::{Alignment, Rect};
use tui::text::Spans;
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Frame;

use crate::models::FuelFilter;

use super::Component;

const HELP: &str =
    "q quitter | f filtre | \u{2191}\u{2193} choisir | r signaler | n nouvelle | i importer | m carte | F5 rafra\u{ee}chir";

/// One-line strip with the station count, the active filter, the last
/// refresh time and the current toast (falling back to the key help).
pub struct StatusBar {
    count: usize,
    filter: FuelFilter,
    last_refresh: DateTime<Local>,
    toast: Option<String>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            count: 0,
            filter: FuelFilter::default(),
            last_refresh: Local::now(),
            toast: None,
        }
    }

    pub fn update(
        &mut self,
        count: usize,
        filter: FuelFilter,
        last_refresh: DateTime<Local>,
        toast: Option<&str>,
    ) {
        self.count = count;
        self.filter = filter;
        self.last_refresh = last_refresh;
        self.toast = toast.map(str::to_string);
    }

    fn get_title(&self) -> String {
        format!(
            "{} station(s) | Filtre: {} | MAJ: {}",
            self.count,
            self.filter.label(),
            self.last_refresh.format("%d/%m/%Y %H:%M")
        )
    }

    fn get_text(&self) -> Vec<Spans> {
        let line = self.toast.as_deref().unwrap_or(HELP);

        vec![Spans::from(line.to_string())]
    }
}

impl Component for StatusBar {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let paragraph = Paragraph::new(self.get_text())
            .block(
                Block::default()
                    .title(self.get_title())
                    .borders(Borders::LEFT | Borders::TOP | Borders::RIGHT)
                    .border_type(BorderType::Rounded),
            )
            .alignment(Alignment::Left);

        frame.render_widget(paragraph, area);
    }
}
