//! # Comment Commands
//!
//! Delete, write and the key handling of the new comment form.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};
use crate::app::events::Focus;

/// `d` or Delete on a comment row
pub struct DeleteCommentCommand;

impl Command for DeleteCommentCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        let key = match event.code {
            KeyCode::Char('d') => event.modifiers.is_empty(),
            KeyCode::Delete => true,
            _ => false,
        };
        key && context.state.focus == Focus::Comments && context.state.comment_under_cursor.is_some()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::DeleteCommentRequested])
    }

    fn name(&self) -> &'static str {
        "DeleteComment"
    }
}

/// `w` opens the form, or jumps back into an open one
pub struct WriteCommentCommand;

impl Command for WriteCommentCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        matches!(event.code, KeyCode::Char('w'))
            && event.modifiers.is_empty()
            && !context.is_editing()
            && (context.state.can_write || context.state.form_open)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::OpenFormRequested])
    }

    fn name(&self) -> &'static str {
        "WriteComment"
    }
}

/// Esc closes the form from anywhere
pub struct CancelFormCommand;

impl Command for CancelFormCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::Esc && context.state.form_open
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::CloseFormRequested])
    }

    fn name(&self) -> &'static str {
        "CancelForm"
    }
}

/// Ctrl+L empties every field
pub struct ClearFormCommand;

impl Command for ClearFormCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        context.is_editing()
            && matches!(event.code, KeyCode::Char('l'))
            && event.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ClearFormRequested])
    }

    fn name(&self) -> &'static str {
        "ClearForm"
    }
}

/// Typing, Backspace, Tab and Enter inside the form
pub struct FormInputCommand;

impl Command for FormInputCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if !context.is_editing() {
            return false;
        }
        match event.code {
            KeyCode::Char(_) => {
                !event.modifiers.contains(KeyModifiers::CONTROL)
                    && !event.modifiers.contains(KeyModifiers::ALT)
            }
            KeyCode::Backspace | KeyCode::Enter => true,
            KeyCode::Tab => event.modifiers.is_empty(),
            _ => false,
        }
    }

    fn execute(&self, event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        let command_event = match event.code {
            KeyCode::Char(ch) => CommandEvent::field_char(ch),
            KeyCode::Backspace => CommandEvent::FieldBackspaceRequested,
            KeyCode::Tab => CommandEvent::NextFieldRequested,
            KeyCode::Enter => CommandEvent::SubmitRequested,
            _ => CommandEvent::NoAction,
        };
        Ok(vec![command_event])
    }

    fn name(&self) -> &'static str {
        "FormInput"
    }
}
