//! Scrollable log panel with navigation.

use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::styles::ColorTheme;

/// Scroll state for the log panel.
///
/// `offset` is the index of the first visible line. While `auto_scroll`
/// is set, new lines keep the view pinned to the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogScrollState {
    pub offset: usize,
    pub auto_scroll: bool,
}

impl LogScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            offset: 0,
            auto_scroll: true,
        }
    }

    /// Handle a new log message (auto-scroll if enabled).
    pub fn on_new_message(&mut self, total_logs: usize) {
        if self.auto_scroll {
            self.offset = total_logs.saturating_sub(1);
        }
    }

    /// Keep the offset valid after `removed` lines were dropped from the front.
    pub fn on_trimmed(&mut self, removed: usize) {
        self.offset = self.offset.saturating_sub(removed);
    }

    pub fn scroll_up(&mut self) {
        self.page_up(1);
    }

    pub fn scroll_down(&mut self, total_logs: usize) {
        self.page_down(1, total_logs);
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.auto_scroll = false;
        self.offset = self.offset.saturating_sub(page_size);
    }

    pub fn page_down(&mut self, page_size: usize, total_logs: usize) {
        let last = total_logs.saturating_sub(1);
        self.offset = (self.offset + page_size).min(last);
        if self.offset >= last {
            self.auto_scroll = true;
        }
    }

    /// Jump to top.
    pub fn home(&mut self) {
        self.auto_scroll = false;
        self.offset = 0;
    }

    /// Jump to bottom.
    pub fn end(&mut self, total_logs: usize) {
        self.auto_scroll = true;
        self.offset = total_logs.saturating_sub(1);
    }
}

impl Default for LogScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Render the scrollable log panel.
///
/// When pinned to the bottom the last page of lines is shown; otherwise
/// the view starts at the scroll offset.
pub fn render_logs(
    frame: &mut Frame,
    area: Rect,
    logs: &[String],
    scroll: &LogScrollState,
    theme: &ColorTheme,
) {
    let visible_height = area.height.saturating_sub(2) as usize; // borders
    let total = logs.len();
    let first = if scroll.auto_scroll {
        total.saturating_sub(visible_height)
    } else {
        scroll.offset.min(total.saturating_sub(1))
    };

    let items: Vec<ListItem> = logs
        .iter()
        .skip(first)
        .take(visible_height)
        .map(|log| {
            let style = if log.starts_with("[ERROR]") {
                theme.error_style()
            } else if log.starts_with("[WARN]") {
                theme.warning_style()
            } else if log.starts_with("[OK]") {
                theme.success_style()
            } else {
                theme.text_style()
            };
            ListItem::new(Line::raw(log.as_str())).style(style)
        })
        .collect();

    let title = if total > visible_height {
        let pct = (first * 100) / total.saturating_sub(visible_height).max(1);
        format!(" Logs ({}%) ", pct.min(100))
    } else {
        " Logs ".to_string()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(theme.muted_style()),
    );

    frame.render_widget(list, area);
}
