//! # Mock I/O Implementations for Testing
//!
//! Scripted key input and a render stream that keeps a plain-text copy of
//! the screen, so tests can assert on what a user would read.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Scripted event stream
///
/// `poll` reports true while events remain, so a controller loop fed by it
/// drains the script and then idles.
#[derive(Debug, Default)]
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    /// Queue a plain key press
    pub fn push_key(&mut self, code: KeyCode) {
        self.push_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)));
    }

    /// Queue every character of `text` as key presses
    pub fn push_text(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_key(KeyCode::Char(ch));
        }
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    Flush,
}

/// Text grid plus the terminal modes a render stream has switched
#[derive(Debug, Clone)]
pub struct MockScreen {
    size: TerminalSize,
    rows: Vec<Vec<char>>,
    cursor: (u16, u16),
    commands: Vec<RenderCommand>,
    cursor_visible: bool,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockScreen {
    fn new(size: TerminalSize) -> Self {
        Self {
            size,
            rows: vec![Vec::new(); size.1 as usize],
            cursor: (0, 0),
            commands: Vec::new(),
            cursor_visible: true,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    fn clear(&mut self) {
        self.rows = vec![Vec::new(); self.size.1 as usize];
    }

    fn put_char(&mut self, ch: char) {
        let (x, y) = (self.cursor.0 as usize, self.cursor.1 as usize);
        if x >= self.size.0 as usize {
            return;
        }
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        if row.len() <= x {
            row.resize(x + 1, ' ');
        }
        row[x] = ch;
        self.cursor.0 += 1;
    }

    /// Write text at the cursor, skipping ANSI escape sequences
    fn feed(&mut self, text: &str) {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            match ch {
                '\x1b' => {
                    if chars.peek() == Some(&'[') {
                        chars.next();
                        for c in chars.by_ref() {
                            if ('@'..='~').contains(&c) {
                                break;
                            }
                        }
                    }
                }
                '\r' => self.cursor.0 = 0,
                '\n' => self.cursor = (0, self.cursor.1.saturating_add(1)),
                _ => self.put_char(ch),
            }
        }
    }

    /// One screen row without trailing blanks
    pub fn row(&self, index: usize) -> String {
        self.rows
            .get(index)
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// The whole screen, one line per row
    pub fn text(&self) -> String {
        (0..self.rows.len())
            .map(|index| self.row(index))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn contains(&self, needle: &str) -> bool {
        (0..self.rows.len()).any(|index| self.row(index).contains(needle))
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    pub fn raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn alternate_screen(&self) -> bool {
        self.alternate_screen
    }
}

/// Type alias for a screen shared between the stream and a test
pub type SharedScreen = Arc<Mutex<MockScreen>>;

/// Render stream that draws into a [`MockScreen`]
#[derive(Debug, Clone)]
pub struct MockRenderStream {
    screen: SharedScreen,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            screen: Arc::new(Mutex::new(MockScreen::new(size))),
        }
    }

    /// Handle that stays valid after the stream moved into a renderer
    pub fn screen(&self) -> SharedScreen {
        Arc::clone(&self.screen)
    }

    /// Snapshot of the current screen
    pub fn snapshot(&self) -> MockScreen {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockScreen> {
        self.screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, command: RenderCommand) -> MutexGuard<'_, MockScreen> {
        let mut screen = self.lock();
        screen.commands.push(command);
        screen
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.lock().feed(&String::from_utf8_lossy(buf));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.record(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::ClearScreen).clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.record(RenderCommand::MoveCursor(x, y)).cursor = (x, y);
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::HideCursor).cursor_visible = false;
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.record(RenderCommand::ShowCursor).cursor_visible = true;
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.lock().size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::EnterAlternateScreen).alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.record(RenderCommand::LeaveAlternateScreen).alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::EnableRawMode).raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.record(RenderCommand::DisableRawMode).raw_mode = false;
        Ok(())
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}
