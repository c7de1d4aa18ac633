use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::clip::Clip;

#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum OpKind {
    Import,
    Move,
    Trim,
    Split,
    Delete,
    Duplicate,
}

/// One snapshot per affected clip; `None` means the clip did not exist on
/// that side of the operation.
pub type ClipSnapshot = (Uuid, Option<Clip>);

/// Enough to invert the operation. One entry per successful mutating call;
/// applying undo/redo is the persisted-history collaborator's job.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct HistoryEntry {
    pub kind: OpKind,
    pub description: String,
    pub affected: Vec<Uuid>,
    pub before: Vec<ClipSnapshot>,
    pub after: Vec<ClipSnapshot>,
}

#[derive(Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
    cursor: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording drops any redo tail beyond the cursor.
    pub fn record(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor = self.entries.len();
    }

    pub fn undo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&HistoryEntry> {
        if self.cursor >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor - 1)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
