use crate::core::{
    FileHandle,
    OutputFormat,
};

// A simple ui action queue so widgets never touch the session directly
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // File
    ChooseFile,
    SelectFile(Option<FileHandle>),
    ClearFile,

    // Analysis
    SetOutputFormat(OutputFormat),
    Analyze,
    Download,

    // Notifications
    DismissNotification,

    Quit,
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order_and_empties() {
        let mut queue = ActionQueue::new();
        queue.push(UiAction::SetOutputFormat(OutputFormat::Xml));
        queue.push(UiAction::Analyze);

        let drained: Vec<UiAction> = queue.drain().collect();
        assert_eq!(drained, vec![UiAction::SetOutputFormat(OutputFormat::Xml), UiAction::Analyze]);
        assert!(queue.is_empty());
    }
}
