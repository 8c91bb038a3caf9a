use crate::placement::{PlacementResult, ReviewRow};
use crossterm::event::{KeyCode, KeyEvent};

#[derive(Debug, PartialEq, Eq)]
pub enum ResultsAction {
    None,
    Menu,
    Retake,
}

#[derive(Debug)]
pub struct ResultsScreen {
    pub result: PlacementResult,
    pub rows: Vec<ReviewRow>,
    pub saved_id: Option<u64>,
    pub scroll: u16,
}

impl ResultsScreen {
    pub fn new(result: PlacementResult, rows: Vec<ReviewRow>, saved_id: Option<u64>) -> Self {
        Self {
            result,
            rows,
            saved_id,
            scroll: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> ResultsAction {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('m') => ResultsAction::Menu,
            KeyCode::Char('r') => ResultsAction::Retake,
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                ResultsAction::None
            }
            KeyCode::Down => {
                // Each review row renders on three lines.
                let max = (self.rows.len() * 3) as u16;
                self.scroll = (self.scroll + 1).min(max);
                ResultsAction::None
            }
            _ => ResultsAction::None,
        }
    }
}
