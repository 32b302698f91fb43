//! # Navigation Commands
//!
//! Focus cycling, j/k and arrow movement, and Enter on list rows.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::{Command, CommandContext, CommandEvent};

/// Tab to the next region (outside the form, where Tab cycles fields)
pub struct FocusNextCommand;

impl Command for FocusNextCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::Tab && event.modifiers.is_empty() && !context.is_editing()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusNextRequested])
    }

    fn name(&self) -> &'static str {
        "FocusNext"
    }
}

/// Shift-Tab to the previous region, also the way out of the form
pub struct FocusPreviousCommand;

impl Command for FocusPreviousCommand {
    fn is_relevant(&self, _context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::BackTab
            || (event.code == KeyCode::Tab && event.modifiers.contains(KeyModifiers::SHIFT))
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::FocusPreviousRequested])
    }

    fn name(&self) -> &'static str {
        "FocusPrevious"
    }
}

/// Move cursor down (j key or down arrow)
pub struct MoveCursorDownCommand;

impl Command for MoveCursorDownCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if context.is_editing() {
            return false;
        }
        match event.code {
            KeyCode::Char('j') => event.modifiers.is_empty(),
            KeyCode::Down => true,
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::cursor_move(1)])
    }

    fn name(&self) -> &'static str {
        "MoveCursorDown"
    }
}

/// Move cursor up (k key or up arrow)
pub struct MoveCursorUpCommand;

impl Command for MoveCursorUpCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        if context.is_editing() {
            return false;
        }
        match event.code {
            KeyCode::Char('k') => event.modifiers.is_empty(),
            KeyCode::Up => true,
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::cursor_move(-1)])
    }

    fn name(&self) -> &'static str {
        "MoveCursorUp"
    }
}

/// Enter on a user or post row
pub struct ActivateCommand;

impl Command for ActivateCommand {
    fn is_relevant(&self, context: &CommandContext, event: &KeyEvent) -> bool {
        event.code == KeyCode::Enter && !context.is_editing()
    }

    fn execute(&self, _event: KeyEvent, _context: &CommandContext) -> Result<Vec<CommandEvent>> {
        Ok(vec![CommandEvent::ActivateRequested])
    }

    fn name(&self) -> &'static str {
        "Activate"
    }
}
