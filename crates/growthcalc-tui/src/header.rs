//! TUI header panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use growthcalc_core::constants::SIGNIFICANT_DIGITS;
use growthcalc_core::format::format_general;

use crate::styles::ColorTheme;

/// Render the header panel: parameters and running state.
pub fn render_header(
    frame: &mut Frame,
    area: Rect,
    base: f64,
    exponent: i32,
    running: bool,
    theme: &ColorTheme,
) {
    let state = if running {
        Span::styled("RUNNING", theme.success_style())
    } else {
        Span::styled("IDLE", theme.muted_style())
    };
    let text = vec![Line::from(vec![
        Span::styled("GrowthCalc-rs", theme.header_style()),
        Span::raw(format!(
            " | Base: {} | Exponent: {exponent} | ",
            format_general(base, SIGNIFICANT_DIGITS)
        )),
        state,
    ])];

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .title(" GrowthCalc-rs ");

    let paragraph = Paragraph::new(text).block(block);
    frame.render_widget(paragraph, area);
}
