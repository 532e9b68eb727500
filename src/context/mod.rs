use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One completed exchange. Both sides are stored as truncated excerpts,
/// a deliberate lossy summary that bounds prompt growth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user: String,
    pub assistant: String,
}

/// Bounded FIFO log of recent exchanges for one conversation session.
///
/// Appending past capacity evicts the oldest turn. Not internally
/// synchronized; the server wraps each session's store in its own async
/// lock.
pub struct ContextStore {
    capacity: usize,
    excerpt_chars: usize,
    turns: VecDeque<ConversationTurn>,
}

impl ContextStore {
    pub fn new(capacity: usize, excerpt_chars: usize) -> Self {
        Self {
            capacity,
            excerpt_chars,
            turns: VecDeque::with_capacity(capacity),
        }
    }

    /// Record an exchange, truncating both sides to the excerpt budget.
    pub fn append(&mut self, user: &str, assistant: &str) {
        self.turns.push_back(ConversationTurn {
            user: truncate_excerpt(user, self.excerpt_chars),
            assistant: truncate_excerpt(assistant, self.excerpt_chars),
        });
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// The most recent `n` turns, oldest first.
    pub fn recent(&self, n: usize) -> Vec<ConversationTurn> {
        let skip = self.turns.len().saturating_sub(n);
        self.turns.iter().skip(skip).cloned().collect()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Truncate to at most `max_chars` characters, never splitting a char.
fn truncate_excerpt(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
