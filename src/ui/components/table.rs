use std::sync::Arc;

use tui::backend::Backend;
use tui::layout::Rect;
use tui::widgets::{Row, TableState};
use tui::Frame;

use super::{Component, Styles};

/// Stateful table over any row type; rendering is delegated to the
/// injected row builder so the component stays data-agnostic.
pub struct Table<'a, T> {
    list: Vec<T>,
    state: TableState,

    row_builder: Arc<dyn Fn(&T) -> Row>,
    styles: Styles<'a>,
}

impl<'a, T> Table<'a, T> {
    pub fn new<RB>(row_builder: RB, styles: Styles<'a>) -> Self
    where
        RB: Fn(&T) -> Row + 'static,
    {
        Self {
            list: vec![],
            state: TableState::default(),
            row_builder: Arc::new(row_builder),
            styles,
        }
    }

    /// Replaces the rendered list. The selection survives the swap,
    /// clamped into the new bounds, so periodic re-syncs don't reset the
    /// user's position.
    pub fn set_list(&mut self, list: Vec<T>) {
        self.list = list;

        if self.list.is_empty() {
            self.state.select(None);
        } else {
            let idx = self.state.selected().unwrap_or(0).min(self.list.len() - 1);
            self.state.select(Some(idx));
        }
    }

    pub fn handle_up(&mut self) {
        if self.list.is_empty() {
            return;
        }

        let idx = self.state.selected().unwrap_or(0);

        if idx == 0 {
            self.state.select(Some(self.list.len() - 1));
        } else {
            self.state.select(Some(idx - 1));
        }
    }

    pub fn handle_down(&mut self) {
        if self.list.is_empty() {
            return;
        }

        let idx = self.state.selected().unwrap_or(0);

        if idx >= self.list.len() - 1 {
            self.state.select(Some(0));
        } else {
            self.state.select(Some(idx + 1));
        }
    }

    pub fn get_selected(&self) -> Option<&T> {
        self.state.selected().and_then(|idx| self.list.get(idx))
    }
}

impl<'a, T> Component for Table<'a, T> {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect) {
        let rows: Vec<Row> = self.list.iter().map(|s| (self.row_builder)(s)).collect();
        let mut table = tui::widgets::Table::new(rows);

        if let Some(ref block) = self.styles.block {
            table = table.block(block.clone());
        }

        if let Some(ref header) = self.styles.header {
            table = table.header(header.clone());
        }

        if let Some(highlight_style) = self.styles.highlight_style {
            table = table.highlight_style(highlight_style);
        }

        if let Some(widths) = self.styles.widths {
            table = table.widths(widths);
        }

        frame.render_stateful_widget(table, area, &mut self.state.clone());
    }
}
