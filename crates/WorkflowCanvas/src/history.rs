use crate::model::GraphState;

/// Manages the Undo/Redo history of the graph.
///
/// This implementation uses a simple Full State Snapshot approach: a linear
/// list of snapshots plus a cursor pointing at the one that matches the live
/// state. Pushing after an undo discards the undone branch.
///
/// The buffer should be seeded with the initial state so that undoing every
/// recorded mutation lands back on it.
#[derive(Clone, Debug)]
pub struct HistoryManager<S = GraphState> {
    entries: Vec<S>,
    index: usize,
    pub max_history: usize,
}

impl<S> Default for HistoryManager<S> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            max_history: 100,
        }
    }
}

impl<S: Clone> HistoryManager<S> {
    /// Creates a new HistoryManager with a specified limit.
    ///
    /// A limit below 1 is raised to 1, since the current state always occupies an entry.
    pub fn new(max_history: usize) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            max_history: max_history.max(1),
        }
    }

    /// Records a snapshot as the newest entry.
    ///
    /// Entries after the cursor are dropped; the oldest entry is dropped once
    /// the limit is exceeded.
    pub fn push(&mut self, snapshot: S) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.index + 1);
        }
        self.entries.push(snapshot);
        while self.entries.len() > self.max_history {
            self.entries.remove(0);
        }
        self.index = self.entries.len() - 1;
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    /// Steps the cursor back and returns the snapshot to restore,
    /// or `None` at the start of history.
    pub fn undo(&mut self) -> Option<&S> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        self.entries.get(self.index)
    }

    /// Steps the cursor forward and returns the snapshot to restore,
    /// or `None` at the end of history.
    pub fn redo(&mut self) -> Option<&S> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        self.entries.get(self.index)
    }

    /// The snapshot under the cursor.
    pub fn current(&self) -> Option<&S> {
        self.entries.get(self.index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Drops every entry except the current one.
    pub fn clear(&mut self) {
        match self.entries.get(self.index).cloned() {
            Some(current) => self.reset(current),
            None => {
                self.entries.clear();
                self.index = 0;
            }
        }
    }

    /// Forgets everything and starts over from `snapshot`.
    pub fn reset(&mut self, snapshot: S) {
        self.entries.clear();
        self.entries.push(snapshot);
        self.index = 0;
    }
}
