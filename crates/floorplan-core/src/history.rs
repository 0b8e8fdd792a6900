//! Linear undo/redo history of scene snapshots.

use crate::scene::SceneSnapshot;

/// Maximum number of frames kept, including the current one.
pub const MAX_HISTORY_SIZE: usize = 50;

/// Snapshot history with a cursor.
///
/// There is always at least one frame. `index` points at the frame matching the
/// current scene; frames after it are redo targets.
#[derive(Debug, Clone)]
pub struct History {
    frames: Vec<SceneSnapshot>,
    index: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(SceneSnapshot::default())
    }
}

impl History {
    pub fn new(initial: SceneSnapshot) -> Self {
        Self {
            frames: vec![initial],
            index: 0,
        }
    }

    /// Record a new frame, discarding any redo frames.
    pub fn commit(&mut self, snapshot: SceneSnapshot) {
        self.frames.truncate(self.index + 1);
        self.frames.push(snapshot);
        if self.frames.len() > MAX_HISTORY_SIZE {
            let excess = self.frames.len() - MAX_HISTORY_SIZE;
            self.frames.drain(..excess);
        }
        self.index = self.frames.len() - 1;
        log::debug!("history commit, {} frames", self.frames.len());
    }

    /// Step back. Returns the frame to restore.
    pub fn undo(&mut self) -> Option<&SceneSnapshot> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        log::debug!("undo to frame {}", self.index);
        self.frames.get(self.index)
    }

    /// Step forward. Returns the frame to restore.
    pub fn redo(&mut self) -> Option<&SceneSnapshot> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        log::debug!("redo to frame {}", self.index);
        self.frames.get(self.index)
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.frames.len()
    }

    /// Drop every frame and start over from `snapshot`.
    pub fn reset(&mut self, snapshot: SceneSnapshot) {
        self.frames = vec![snapshot];
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Frame matching the current scene.
    pub fn current(&self) -> Option<&SceneSnapshot> {
        self.frames.get(self.index)
    }
}
