//! Status and result labels panel.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use growthcalc_core::{EngineSnapshot, RunPhase, SequenceKind};

use crate::styles::ColorTheme;

/// Render the status label and both result labels.
pub fn render_results(frame: &mut Frame, area: Rect, view: &EngineSnapshot, theme: &ColorTheme) {
    let status_style = match view.phase {
        RunPhase::Completed => theme.success_style(),
        RunPhase::Rejected => theme.error_style(),
        RunPhase::Cancelled => theme.warning_style(),
        RunPhase::Idle | RunPhase::Running => theme.text_style(),
    };

    let mut lines = vec![Line::from(vec![
        Span::styled("Status: ", theme.muted_style()),
        Span::styled(view.status_label.clone(), status_style),
    ])];
    for kind in SequenceKind::ALL {
        let name = match kind {
            SequenceKind::Linear => "Linear:      ",
            SequenceKind::Exponential => "Exponential: ",
        };
        let label = match view.result_label(kind) {
            Some(label) => Span::styled(label.to_string(), theme.text_style()),
            None => Span::styled("-", theme.muted_style()),
        };
        lines.push(Line::from(vec![Span::styled(name, theme.muted_style()), label]));
    }

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    frame.render_widget(paragraph, area);
}
