//! # Terminal Renderer
//!
//! Draws composed screens onto a [`RenderStream`]. Every pane row is written
//! padded to the pane width, so a redraw never leaves text of the previous
//! frame behind.

use super::ansi_escape_codes::{style_prefix, FG_SEPARATOR, RESET, REVERSE};
use super::layout::{compose_screen, truncate, Screen, ScreenLine};
use crate::app::events::{Pane, ViewEvent};
use crate::app::io::RenderStream;
use crate::app::view_models::ViewModel;
use anyhow::Result;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "│";

/// Trait for rendering views
pub trait ViewRenderer {
    /// Put the terminal into raw mode on the alternate screen
    fn initialize(&mut self) -> Result<()>;

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()>;

    fn render_pane(&mut self, view_model: &ViewModel, pane: Pane) -> Result<()>;

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()>;

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()>;

    /// Restore the terminal
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer over any render stream
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    terminal_size: (u16, u16),
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            terminal_size,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    fn compose(&self, view_model: &ViewModel) -> Screen {
        compose_screen(view_model, self.terminal_size.0, self.terminal_size.1)
    }

    fn draw_line(&mut self, x: u16, row: u16, width: u16, line: Option<&ScreenLine>) -> Result<()> {
        let width = width as usize;
        if width == 0 {
            return Ok(());
        }
        self.render_stream.move_cursor(x, row)?;

        let (prefix, text) = match line {
            Some(line) => (style_prefix(line.style), truncate(&line.text, width)),
            None => ("", String::new()),
        };
        let padding = " ".repeat(width.saturating_sub(text.width()));
        write!(self.render_stream, "{prefix}{text}{padding}{RESET}")?;
        Ok(())
    }

    fn draw_pane(&mut self, screen: &Screen, pane: Pane) -> Result<()> {
        let geometry = screen.geometry;
        let (x, width) = match pane {
            Pane::Left => (0, geometry.left_width),
            Pane::Right => (geometry.right_x, geometry.right_width),
        };
        let lines = screen.pane(pane);
        for row in 0..geometry.content_height {
            self.draw_line(x, row, width, lines.get(row as usize))?;
        }
        Ok(())
    }

    fn draw_separator(&mut self, screen: &Screen) -> Result<()> {
        let geometry = screen.geometry;
        if geometry.separator_x >= self.terminal_size.0 {
            return Ok(());
        }
        for row in 0..geometry.content_height {
            self.render_stream.move_cursor(geometry.separator_x, row)?;
            write!(self.render_stream, "{FG_SEPARATOR}{SEPARATOR}{RESET}")?;
        }
        Ok(())
    }

    fn draw_status_bar(&mut self, screen: &Screen) -> Result<()> {
        let (width, height) = self.terminal_size;
        if height == 0 {
            return Ok(());
        }
        let text = truncate(&screen.status, width as usize);
        let padding = " ".repeat((width as usize).saturating_sub(text.width()));
        self.render_stream.move_cursor(0, height - 1)?;
        write!(self.render_stream, "{REVERSE}{text}{padding}{RESET}")?;
        Ok(())
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        Ok(())
    }

    fn render_full(&mut self, view_model: &ViewModel) -> Result<()> {
        let screen = self.compose(view_model);

        self.render_stream.clear_screen()?;
        self.draw_pane(&screen, Pane::Left)?;
        self.draw_separator(&screen)?;
        self.draw_pane(&screen, Pane::Right)?;
        self.draw_status_bar(&screen)?;

        self.render_stream.flush()?;
        Ok(())
    }

    fn render_pane(&mut self, view_model: &ViewModel, pane: Pane) -> Result<()> {
        let screen = self.compose(view_model);
        self.draw_pane(&screen, pane)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn render_status_bar(&mut self, view_model: &ViewModel) -> Result<()> {
        let screen = self.compose(view_model);
        self.draw_status_bar(&screen)?;
        self.render_stream.flush()?;
        Ok(())
    }

    fn handle_view_event(&mut self, event: &ViewEvent, view_model: &ViewModel) -> Result<()> {
        match event {
            ViewEvent::FullRedrawRequired => self.render_full(view_model),
            ViewEvent::PaneRedrawRequired { pane } => self.render_pane(view_model, *pane),
            ViewEvent::StatusBarUpdateRequired => self.render_status_bar(view_model),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.render_stream.show_cursor()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        Ok(())
    }
}
