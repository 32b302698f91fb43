//! # View Events
//!
//! Emitted by the view model whenever something visible changed, so the
//! controller can redraw only the affected region.

/// Screen region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pane {
    /// User selector and post list
    Left,
    /// Post details, comments and the new-comment form
    Right,
}

/// Events emitted when view updates are needed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Full screen redraw required (terminal resize, startup)
    FullRedrawRequired,

    /// A single pane needs redrawing
    PaneRedrawRequired { pane: Pane },

    /// Status bar needs updating
    StatusBarUpdateRequired,
}
