//! Navigation collaborator: lets the flow controller read and push the
//! current path without depending on a real browser-style host.

use std::sync::{Mutex, PoisonError};

/// Path of the form/survey view.
pub const BASE_PATH: &str = "/";
/// Path of the submission-complete view; independently addressable.
pub const SUBMITTED_PATH: &str = "/encuesta-enviada";

pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}

/// In-memory history with browser semantics: `push` drops any forward
/// entries, `back`/`forward` move along the retained stack.
pub struct MemoryHistory {
    state: Mutex<HistoryState>,
}

struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::starting_at(BASE_PATH)
    }

    /// History whose first entry is `path`, for direct navigation to a
    /// routed view.
    pub fn starting_at(path: &str) -> Self {
        Self {
            state: Mutex::new(HistoryState {
                entries: vec![path.to_string()],
                index: 0,
            }),
        }
    }

    pub fn back(&self) -> Option<String> {
        let mut state = self.lock();
        if state.index == 0 {
            return None;
        }
        state.index -= 1;
        Some(state.entries[state.index].clone())
    }

    pub fn forward(&self) -> Option<String> {
        let mut state = self.lock();
        if state.index + 1 >= state.entries.len() {
            return None;
        }
        state.index += 1;
        Some(state.entries[state.index].clone())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for MemoryHistory {
    fn current_path(&self) -> String {
        let state = self.lock();
        state.entries[state.index].clone()
    }

    fn push(&self, path: &str) {
        let mut state = self.lock();
        let keep = state.index + 1;
        state.entries.truncate(keep);
        state.entries.push(path.to_string());
        state.index = state.entries.len() - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_base_path() {
        let history = MemoryHistory::new();
        assert_eq!(history.current_path(), BASE_PATH);
        assert_eq!(history.back(), None);
        assert_eq!(history.forward(), None);
    }

    #[test]
    fn push_then_back_and_forward_walk_the_stack() {
        let history = MemoryHistory::new();
        history.push(SUBMITTED_PATH);
        assert_eq!(history.current_path(), SUBMITTED_PATH);

        assert_eq!(history.back().as_deref(), Some(BASE_PATH));
        assert_eq!(history.current_path(), BASE_PATH);

        assert_eq!(history.forward().as_deref(), Some(SUBMITTED_PATH));
        assert_eq!(history.current_path(), SUBMITTED_PATH);
    }

    #[test]
    fn push_discards_forward_entries() {
        let history = MemoryHistory::new();
        history.push(SUBMITTED_PATH);
        history.back();

        history.push("/otra");
        assert_eq!(history.forward(), None);
        assert_eq!(history.current_path(), "/otra");
    }

    #[test]
    fn can_start_on_a_routed_path() {
        let history = MemoryHistory::starting_at(SUBMITTED_PATH);
        assert_eq!(history.current_path(), SUBMITTED_PATH);
    }
}
