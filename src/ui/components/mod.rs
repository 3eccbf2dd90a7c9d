use tui::backend::Backend;
use tui::layout::{Constraint, Rect};
use tui::style::Style;
use tui::widgets::{Block, Row};
use tui::Frame;

pub use map::Map;
pub use prompt::{Prompt, PromptKind};
pub use statusbar::StatusBar;
pub use table::Table;

mod map;
mod prompt;
mod statusbar;
mod table;

pub trait Component {
    fn draw<B: Backend>(&self, frame: &mut Frame<B>, area: Rect);
}

#[derive(Default, Clone)]
pub struct Styles<'a> {
    pub block: Option<Block<'a>>,
    pub header: Option<Row<'a>>,
    pub highlight_style: Option<Style>,
    pub widths: Option<&'a [Constraint]>,
}
