//! # Screen Composition
//!
//! Turns the ViewModel into styled text lines for the two panes and the
//! status bar. Nothing here touches the terminal, so layout is tested on
//! plain strings.

use crate::app::events::{Focus, Pane};
use crate::app::models::{CommentDraft, FormField};
use crate::app::view_models::{CommentsState, ViewModel, COMMENTS_ERROR_MESSAGE, LIST_ERROR_MESSAGE};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const CURSOR_MARKER: &str = "›";
pub const SELECTED_MARKER: &str = "●";

/// Visual treatment of a composed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Plain,
    Heading,
    Muted,
    Error,
    /// Row under the cursor of the focused region
    Highlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLine {
    pub text: String,
    pub style: LineStyle,
}

impl ScreenLine {
    pub fn new<S: Into<String>>(text: S, style: LineStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain<S: Into<String>>(text: S) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn blank() -> Self {
        Self::plain("")
    }
}

/// Column geometry of the two panes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneGeometry {
    pub left_width: u16,
    pub separator_x: u16,
    pub right_x: u16,
    pub right_width: u16,
    pub content_height: u16,
}

impl PaneGeometry {
    pub fn for_size(width: u16, height: u16) -> Self {
        let left_width = (width * 2 / 5).max(20).min(width.saturating_sub(1));
        let separator_x = left_width;
        let right_x = separator_x.saturating_add(2).min(width);
        Self {
            left_width,
            separator_x,
            right_x,
            right_width: width.saturating_sub(right_x),
            content_height: height.saturating_sub(1),
        }
    }
}

/// A whole frame: both panes cut to the content height, and the status bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub geometry: PaneGeometry,
    pub left: Vec<ScreenLine>,
    pub right: Vec<ScreenLine>,
    pub status: String,
}

impl Screen {
    pub fn pane(&self, pane: Pane) -> &[ScreenLine] {
        match pane {
            Pane::Left => &self.left,
            Pane::Right => &self.right,
        }
    }

    /// All visible text, left pane first, for assertions
    pub fn text(&self) -> String {
        self.left
            .iter()
            .chain(self.right.iter())
            .map(|line| line.text.as_str())
            .chain(std::iter::once(self.status.as_str()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn compose_screen(view_model: &ViewModel, width: u16, height: u16) -> Screen {
    let geometry = PaneGeometry::for_size(width, height);
    let rows = geometry.content_height as usize;

    let (left, left_anchor) = compose_left(view_model, geometry.left_width as usize);
    let (right, right_anchor) = compose_right(view_model, geometry.right_width as usize);

    Screen {
        geometry,
        left: scroll_into_view(left, rows, left_anchor),
        right: scroll_into_view(right, rows, right_anchor),
        status: status_line(view_model, width as usize),
    }
}

/// Left pane lines and the index of the focused cursor row
pub fn compose_left(view_model: &ViewModel, width: usize) -> (Vec<ScreenLine>, Option<usize>) {
    let mut lines = Vec::new();
    let mut anchor = None;
    let focus = view_model.focus();
    let cursors = view_model.cursors();

    let header = match view_model.selected_user() {
        Some(user) => format!("User: {}", user.name),
        None => "Choose a user".to_string(),
    };
    lines.push(ScreenLine::new(truncate(&header, width), LineStyle::Heading));
    lines.push(ScreenLine::blank());

    for (index, user) in view_model.users().users().iter().enumerate() {
        let under_cursor = focus == Focus::Users && index == cursors.user;
        let selected = view_model.selection().user_id() == Some(user.id);
        let row = format!(
            "{} {} {}",
            if under_cursor { CURSOR_MARKER } else { " " },
            if selected { SELECTED_MARKER } else { " " },
            user.name
        );
        if under_cursor {
            anchor = Some(lines.len());
        }
        lines.push(ScreenLine::new(truncate(&row, width), row_style(under_cursor)));
    }
    lines.push(ScreenLine::blank());

    let posts = view_model.posts();
    if view_model.is_loading() {
        lines.push(ScreenLine::new("Loading...", LineStyle::Muted));
    } else if view_model.users().error().is_some() || posts.error().is_some() {
        lines.push(ScreenLine::new(LIST_ERROR_MESSAGE, LineStyle::Error));
    } else if view_model.selection().user_id().is_none() {
        lines.push(ScreenLine::new("No user selected", LineStyle::Muted));
    } else if posts.has_no_posts() {
        lines.push(ScreenLine::new("No posts yet", LineStyle::Muted));
    } else if !posts.posts().is_empty() {
        lines.push(ScreenLine::new("Posts:", LineStyle::Heading));
        for (index, post) in posts.posts().iter().enumerate() {
            let under_cursor = focus == Focus::Posts && index == cursors.post;
            let action = if view_model.selection().is_post_selected(post.id) {
                "[Close]"
            } else {
                "[Open]"
            };
            let prefix = format!("{} #{} ", if under_cursor { CURSOR_MARKER } else { " " }, post.id);
            let title_width = width
                .saturating_sub(prefix.width())
                .saturating_sub(action.width() + 1);
            let row = format!("{prefix}{} {action}", truncate(&post.title, title_width));
            if under_cursor {
                anchor = Some(lines.len());
            }
            lines.push(ScreenLine::new(truncate(&row, width), row_style(under_cursor)));
        }
    }

    (lines, anchor)
}

/// Right pane lines and the index of the focused cursor row
pub fn compose_right(view_model: &ViewModel, width: usize) -> (Vec<ScreenLine>, Option<usize>) {
    let mut lines = Vec::new();
    let mut anchor = None;

    let Some(post) = view_model.selected_post() else {
        return (lines, None);
    };

    let title = format!("#{}: {}", post.id, post.title);
    for line in wrap(&title, width) {
        lines.push(ScreenLine::new(line, LineStyle::Heading));
    }
    for line in wrap(&post.body, width) {
        lines.push(ScreenLine::plain(line));
    }
    lines.push(ScreenLine::blank());

    let session = view_model.comments();
    let focus = view_model.focus();
    match session.state() {
        CommentsState::Loading => lines.push(ScreenLine::new("Loading...", LineStyle::Muted)),
        CommentsState::LoadError => {
            lines.push(ScreenLine::new(COMMENTS_ERROR_MESSAGE, LineStyle::Error))
        }
        _ if session.comments().is_empty() => {
            lines.push(ScreenLine::new("No comments yet", LineStyle::Muted))
        }
        _ => {
            lines.push(ScreenLine::new("Comments:", LineStyle::Heading));
            for (index, comment) in session.comments().iter().enumerate() {
                let under_cursor =
                    focus == Focus::Comments && index == view_model.cursors().comment;
                let header = format!(
                    "{} {} <{}>",
                    if under_cursor { CURSOR_MARKER } else { " " },
                    comment.name,
                    comment.email
                );
                if under_cursor {
                    anchor = Some(lines.len());
                }
                lines.push(ScreenLine::new(truncate(&header, width), row_style(under_cursor)));
                for line in wrap(&comment.body, width.saturating_sub(4)) {
                    lines.push(ScreenLine::new(format!("    {line}"), LineStyle::Muted));
                }
            }
        }
    }

    if let Some(banner) = session.mutation_error() {
        lines.push(ScreenLine::new(banner.message(), LineStyle::Error));
    }

    lines.push(ScreenLine::blank());
    if let Some(draft) = session.form() {
        let form_start = lines.len();
        compose_form(&mut lines, draft, focus == Focus::Form, width);
        if focus == Focus::Form {
            anchor = Some(lines.len().saturating_sub(1).max(form_start));
        }
    } else if session.can_write() {
        lines.push(ScreenLine::new("[w] Write a comment", LineStyle::Muted));
    }

    (lines, anchor)
}

fn compose_form(lines: &mut Vec<ScreenLine>, draft: &CommentDraft, focused: bool, width: usize) {
    lines.push(ScreenLine::new("New comment", LineStyle::Heading));

    for field in [FormField::Name, FormField::Email, FormField::Body] {
        let active = focused && draft.active_field() == field;
        let caret = if active { "_" } else { "" };
        let row = format!(
            "{} {}: {}{}",
            if active { CURSOR_MARKER } else { " " },
            field.label(),
            draft.value(field),
            caret
        );
        lines.push(ScreenLine::new(truncate_left(&row, width), row_style(active)));
        if draft.is_invalid(field) {
            lines.push(ScreenLine::new(
                format!("    {}", field.error_message()),
                LineStyle::Error,
            ));
        }
    }

    let actions = if draft.is_submitting() {
        "Adding..."
    } else {
        "[Enter] Add  [Ctrl+L] Clear  [Esc] Cancel"
    };
    lines.push(ScreenLine::new(truncate(actions, width), LineStyle::Muted));
}

/// Key hints for the focused region plus the backend on the right
pub fn status_line(view_model: &ViewModel, width: usize) -> String {
    let hints = match view_model.focus() {
        Focus::Users => "Enter select  j/k move  Tab next  q quit",
        Focus::Posts => "Enter open/close  j/k move  Tab next  q quit",
        Focus::Comments => "d delete  w write  j/k move  Tab next  q quit",
        Focus::Form => "Tab field  Enter add  Ctrl+L clear  Esc cancel",
    };
    let left = format!(" {} | {}", view_model.focus().label(), hints);
    let right = format!("{} ", view_model.base_url());

    let used = left.width() + right.width();
    if used < width {
        format!("{left}{}{right}", " ".repeat(width - used))
    } else {
        truncate(&left, width)
    }
}

fn row_style(under_cursor: bool) -> LineStyle {
    if under_cursor {
        LineStyle::Highlight
    } else {
        LineStyle::Plain
    }
}

/// Cut `lines` to `rows`, scrolled just enough to keep `anchor` visible
pub fn scroll_into_view(lines: Vec<ScreenLine>, rows: usize, anchor: Option<usize>) -> Vec<ScreenLine> {
    if lines.len() <= rows {
        return lines;
    }
    let offset = match anchor {
        Some(anchor) if anchor >= rows => anchor + 1 - rows,
        _ => 0,
    };
    lines.into_iter().skip(offset).take(rows).collect()
}

/// Truncate to a display width, marking the cut with an ellipsis
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Keep the tail of `text` so the caret of a long field stays visible
fn truncate_left(text: &str, width: usize) -> String {
    if text.width() <= width || width == 0 {
        return truncate(text, width);
    }

    let mut tail: Vec<char> = Vec::new();
    let mut used = 1;
    for ch in text.chars().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        tail.push(ch);
        used += w;
    }
    std::iter::once('…').chain(tail.into_iter().rev()).collect()
}

/// Word wrap to a display width; words longer than a line are split
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut used = 0;

        for word in paragraph.split_whitespace() {
            let word_width = word.width();
            if used > 0 && used + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                used = 0;
            }
            if word_width > width {
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if used + w > width {
                        lines.push(std::mem::take(&mut line));
                        used = 0;
                    }
                    line.push(ch);
                    used += w;
                }
                continue;
            }
            if used > 0 {
                line.push(' ');
                used += 1;
            }
            line.push_str(word);
            used += word_width;
        }
        lines.push(line);
    }

    lines
}
