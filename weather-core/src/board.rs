use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::model::Message;

#[derive(Debug, Default)]
struct BoardState {
    messages: Vec<Message>,
    last_id: i64,
}

/// In-memory message board, kept in insertion order for the process lifetime.
///
/// Ids are the creation time in epoch milliseconds, bumped when two messages
/// land in the same millisecond so they stay unique and increasing.
#[derive(Debug, Default)]
pub struct MessageBoard {
    state: Mutex<BoardState>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message; returns `None` when `text` is empty.
    pub fn append(&self, text: &str) -> Option<Message> {
        self.append_at(text, Utc::now())
    }

    fn append_at(&self, text: &str, now: DateTime<Utc>) -> Option<Message> {
        if text.is_empty() {
            return None;
        }

        let mut state = self.state.lock();
        let id = now.timestamp_millis().max(state.last_id + 1);
        state.last_id = id;

        let message = Message { id: id.to_string(), text: text.to_string(), timestamp: now };
        state.messages.push(message.clone());
        Some(message)
    }

    pub fn list(&self) -> Vec<Message> {
        self.state.lock().messages.clone()
    }

    /// Remove the message with `id`; `false` if there is none.
    pub fn delete(&self, id: &str) -> bool {
        let mut state = self.state.lock();
        match state.messages.iter().position(|m| m.id == id) {
            Some(index) => {
                state.messages.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.state.lock().messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
