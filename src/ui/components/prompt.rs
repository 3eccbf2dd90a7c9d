use tui::backend::Backend;
use tui::layout::Rect;
use tui::widgets::{Block, BorderType, Borders, Paragraph};
use tui::Frame;

use crate::models::Station;

use super::Component;

/// What the collected input is for. New-station entry chains three
/// prompts, carrying the earlier answers along.
pub enum PromptKind {
    Report { station_id: i64 },
    StationName,
    StationCity { name: String },
    StationFuels { name: String, city: String },
    Import,
}

/// Single-line input overlay standing in for the browser prompts of the
/// map UI this replaces.
pub struct Prompt {
    title: String,
    input: String,
    kind: PromptKind,
}

impl Prompt {
    pub fn report(station: &Station) -> Self {
        Self {
            title: format!("Disponibilit\u{e9} pour {} (Esc annule)", station.name.trim()),
            // Pre-filled template, as in the original report dialog.
            input: "essence=oui,gazole=non,gpl=non".to_string(),
            kind: PromptKind::Report {
                station_id: station.id,
            },
        }
    }

    pub fn station_name() -> Self {
        Self {
            title: "Nom de la station".to_string(),
            input: String::new(),
            kind: PromptKind::StationName,
        }
    }

    pub fn station_city(name: String) -> Self {
        Self {
            title: "Ville / localit\u{e9}".to_string(),
            input: String::new(),
            kind: PromptKind::StationCity { name },
        }
    }

    pub fn station_fuels(name: String, city: String) -> Self {
        Self {
            title: "Carburants (s\u{e9}par\u{e9}s par ,) ex: essence,gazole".to_string(),
            input: String::new(),
            kind: PromptKind::StationFuels { name, city },
        }
    }

    pub fn import() -> Self {
        Self {
            title: "Import JSON: liste d'enregistrements".to_string(),
            input: String::new(),
            kind: PromptKind::Import,
        }
    }

    pub fn push(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn into_parts(self) -> (PromptKind, String) {
        (self.kind, self.input)
    }
}

impl Component for Prompt {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let paragraph = Paragraph::new(format!("{}\u{2588}", self.input)).block(
            Block::default()
                .title(self.title.as_str())
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );

        frame.render_widget(paragraph, area);
    }
}
