// Inline rename - at most one edit at a time
use crate::model::ItemKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineEdit {
    pub editing_id: String,
    pub editing_kind: ItemKind,
    pub original_name: String,
}

/// A confirmed rename for the host to send to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameCommit {
    pub id: String,
    pub kind: ItemKind,
    pub original_name: String,
    pub new_name: String,
}

#[derive(Debug, Default)]
pub struct RenameState {
    active: Option<InlineEdit>,
}

impl RenameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts editing, replacing any edit already in progress.
    pub fn start(&mut self, id: &str, kind: ItemKind, original_name: &str) -> Option<InlineEdit> {
        self.active.replace(InlineEdit {
            editing_id: id.to_string(),
            editing_kind: kind,
            original_name: original_name.to_string(),
        })
    }

    pub fn cancel(&mut self) -> Option<InlineEdit> {
        self.active.take()
    }

    /// Ends the edit. Blank or unchanged names cancel instead of committing.
    pub fn commit(&mut self, new_name: &str) -> Option<RenameCommit> {
        let edit = self.active.take()?;
        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == edit.original_name {
            return None;
        }
        Some(RenameCommit {
            id: edit.editing_id,
            kind: edit.editing_kind,
            original_name: edit.original_name,
            new_name: new_name.to_string(),
        })
    }

    pub fn active(&self) -> Option<&InlineEdit> {
        self.active.as_ref()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.active
            .as_ref()
            .map(|e| e.editing_id == id)
            .unwrap_or(false)
    }
}
