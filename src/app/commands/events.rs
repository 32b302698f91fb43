//! # Command Events
//!
//! Events produced by commands that describe what should happen.
//! Commands produce these events, and the controller applies them to the ViewModel.

/// Events that commands can produce to request changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandEvent {
    /// Tab to the next list region
    FocusNextRequested,

    /// Shift-Tab to the previous list region
    FocusPreviousRequested,

    /// Move the cursor of the focused list
    CursorMoveRequested { delta: isize },

    /// Select the user or toggle the post under the cursor
    ActivateRequested,

    /// Delete the comment under the cursor
    DeleteCommentRequested,

    /// Open (or refocus) the new comment form
    OpenFormRequested,

    /// Close the form and drop the draft
    CloseFormRequested,

    /// Type a character into the active form field
    FieldCharRequested { ch: char },

    /// Remove the last character of the active form field
    FieldBackspaceRequested,

    /// Move to the next form field
    NextFieldRequested,

    /// Validate and send the draft
    SubmitRequested,

    /// Empty every form field
    ClearFormRequested,

    /// Request to quit application
    QuitRequested,

    /// No action needed
    NoAction,
}

impl CommandEvent {
    pub fn cursor_move(delta: isize) -> Self {
        Self::CursorMoveRequested { delta }
    }

    pub fn field_char(ch: char) -> Self {
        Self::FieldCharRequested { ch }
    }
}
