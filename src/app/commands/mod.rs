//! # Command System
//!
//! Key events are mapped to [`CommandEvent`]s by small commands. A command
//! only looks at a read-only [`CommandContext`]; the controller decides how
//! the resulting events change the ViewModel.

use anyhow::Result;
use crossterm::event::KeyEvent;

pub mod app;
pub mod comments;
pub mod context;
pub mod events;
pub mod navigation;

pub use app::{AppTerminateCommand, QuitCommand};
pub use comments::{
    CancelFormCommand, ClearFormCommand, DeleteCommentCommand, FormInputCommand,
    WriteCommentCommand,
};
pub use context::{CommandContext, ViewModelSnapshot};
pub use events::CommandEvent;
pub use navigation::{
    ActivateCommand, FocusNextCommand, FocusPreviousCommand, MoveCursorDownCommand,
    MoveCursorUpCommand,
};

/// Maps a key event to command events
pub trait Command: Send + Sync {
    /// Check if command is relevant for current state and event
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool;

    /// Produce the events this key stands for
    fn execute(&self, event: KeyEvent, context: &CommandContext) -> Result<Vec<CommandEvent>>;

    /// Get command name for debugging
    fn name(&self) -> &'static str;
}

/// Type alias for command collection to reduce complexity
pub type CommandCollection = Vec<Box<dyn Command>>;

/// Registry that holds all available commands; the first relevant one wins
pub struct CommandRegistry {
    commands: CommandCollection,
}

impl CommandRegistry {
    /// Create new command registry with default commands
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };

        registry.register_default_commands();
        registry
    }

    fn register_default_commands(&mut self) {
        self.add_command(Box::new(AppTerminateCommand));

        // Form keys before list keys so typing never navigates
        self.add_command(Box::new(CancelFormCommand));
        self.add_command(Box::new(ClearFormCommand));
        self.add_command(Box::new(FocusPreviousCommand));
        self.add_command(Box::new(FormInputCommand));

        self.add_command(Box::new(FocusNextCommand));
        self.add_command(Box::new(MoveCursorDownCommand));
        self.add_command(Box::new(MoveCursorUpCommand));
        self.add_command(Box::new(ActivateCommand));

        self.add_command(Box::new(DeleteCommentCommand));
        self.add_command(Box::new(WriteCommentCommand));

        self.add_command(Box::new(QuitCommand));
    }

    /// Add a command to the registry
    pub fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    /// Process a key event through all commands
    pub fn process_event(
        &self,
        event: KeyEvent,
        context: &CommandContext,
    ) -> Result<Vec<CommandEvent>> {
        for command in &self.commands {
            if command.is_relevant(context, &event) {
                tracing::debug!("Key {:?} handled by {}", event.code, command.name());
                return command.execute(event, context);
            }
        }
        Ok(Vec::new())
    }

    /// Get all commands (for testing/debugging)
    pub fn commands(&self) -> &CommandCollection {
        &self.commands
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::events::Focus;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn context(focus: Focus, form_open: bool) -> CommandContext {
        CommandContext::new(ViewModelSnapshot {
            focus,
            form_open,
            can_write: true,
            comment_under_cursor: Some(1),
            terminal_dimensions: (80, 24),
        })
    }

    #[test]
    fn q_should_be_typed_into_form_not_quit() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);

        let events = registry.process_event(event, &context(Focus::Form, true)).unwrap();
        assert_eq!(events, vec![CommandEvent::FieldCharRequested { ch: 'q' }]);

        let events = registry.process_event(event, &context(Focus::Users, false)).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn ctrl_c_should_quit_from_form() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);

        let events = registry.process_event(event, &context(Focus::Form, true)).unwrap();
        assert_eq!(events, vec![CommandEvent::QuitRequested]);
    }

    #[test]
    fn unmapped_key_should_produce_nothing() {
        let registry = CommandRegistry::new();
        let event = KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE);

        let events = registry.process_event(event, &context(Focus::Users, false)).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn registry_should_hold_every_default_command() {
        let registry = CommandRegistry::new();
        let names: Vec<_> = registry.commands().iter().map(|c| c.name()).collect();

        assert!(names.contains(&"DeleteComment"));
        assert!(names.contains(&"FormInput"));
        assert_eq!(names.first(), Some(&"AppTerminate"));
    }
}
