//! # Command Context
//!
//! Read-only view of the state that decides which command a key maps to.

use crate::app::events::Focus;
use crate::app::models::EntityId;
use crate::app::view_models::ViewModel;

/// Read-only snapshot of ViewModel state for commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModelSnapshot {
    pub focus: Focus,
    pub form_open: bool,
    pub can_write: bool,
    pub comment_under_cursor: Option<EntityId>,
    pub terminal_dimensions: (u16, u16),
}

impl ViewModelSnapshot {
    /// Create snapshot from current ViewModel state
    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self {
            focus: view_model.focus(),
            form_open: view_model.comments().form().is_some(),
            can_write: view_model.comments().can_write(),
            comment_under_cursor: view_model.comment_at_cursor(),
            terminal_dimensions: view_model.terminal_size(),
        }
    }
}

/// Base context available to all commands
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub state: ViewModelSnapshot,
}

impl CommandContext {
    pub fn new(state: ViewModelSnapshot) -> Self {
        Self { state }
    }

    pub fn from_view_model(view_model: &ViewModel) -> Self {
        Self::new(ViewModelSnapshot::from_view_model(view_model))
    }

    /// Keys go to the form while it has focus
    pub fn is_editing(&self) -> bool {
        self.state.focus == Focus::Form && self.state.form_open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_view_model_should_not_be_editing() {
        let view_model = ViewModel::new();
        let context = CommandContext::from_view_model(&view_model);

        assert_eq!(context.state.focus, Focus::Users);
        assert!(!context.state.form_open);
        assert!(!context.state.can_write);
        assert!(!context.is_editing());
        assert_eq!(context.state.terminal_dimensions, (80, 24));
    }
}
