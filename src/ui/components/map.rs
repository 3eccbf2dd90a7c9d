use tui::backend::Backend;
use tui::layout::Rect;
use tui::style::Color;
use tui::widgets::canvas::{Canvas, Points};
use tui::widgets::{Block, BorderType, Borders};
use tui::Frame;

use crate::models::{Station, Stock};
use crate::view;

use super::Component;

const PAN_STEP: f64 = 0.5;

// Bamako, matching the original map's initial view.
const DEFAULT_CENTER: (f64, f64) = (-8.0029, 12.6392);

// Half-spans of the visible window, in degrees (lon, lat).
const SPAN: (f64, f64) = (9.0, 4.5);

/// Point-marker map of the rendered subset. Holds plain `(lon, lat)`
/// coordinates grouped by stock tier; the cursor doubles as the spawn
/// location for operator-entered stations.
pub struct Map {
    points: Vec<(f64, f64, Stock)>,
    selected: Option<(f64, f64)>,
    center: (f64, f64),
}

impl Map {
    pub fn new() -> Self {
        Self {
            points: vec![],
            selected: None,
            center: DEFAULT_CENTER,
        }
    }

    pub fn set_stations(&mut self, stations: &[Station], selected_id: Option<i64>) {
        self.points = stations
            .iter()
            .map(|s| (s.lon, s.lat, view::stock(&s.available)))
            .collect();

        self.selected = stations
            .iter()
            .find(|s| Some(s.id) == selected_id)
            .map(|s| (s.lon, s.lat));
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center.0 += dx * PAN_STEP;
        self.center.1 += dy * PAN_STEP;
    }

    /// Current cursor position as `(lon, lat)`.
    pub fn center(&self) -> (f64, f64) {
        self.center
    }
}

impl Component for Map {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Carte"),
            )
            .x_bounds([self.center.0 - SPAN.0, self.center.0 + SPAN.0])
            .y_bounds([self.center.1 - SPAN.1, self.center.1 + SPAN.1])
            .paint(|ctx| {
                for tier in [Stock::Empty, Stock::Partial, Stock::Full] {
                    let coords: Vec<(f64, f64)> = self
                        .points
                        .iter()
                        .filter(|(_, _, stock)| *stock == tier)
                        .map(|(x, y, _)| (*x, *y))
                        .collect();

                    if !coords.is_empty() {
                        ctx.draw(&Points {
                            coords: &coords,
                            color: view::marker_color(tier),
                        });
                    }
                }

                if let Some(selected) = self.selected {
                    ctx.draw(&Points {
                        coords: &[selected],
                        color: Color::Cyan,
                    });
                }

                ctx.draw(&Points {
                    coords: &[self.center],
                    color: Color::White,
                });
            });

        frame.render_widget(canvas, area);
    }
}
