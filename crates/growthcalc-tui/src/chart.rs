//! Line charts of the two sequences.

use ratatui::layout::Rect;
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use growthcalc_core::format::format_general;
use growthcalc_core::{SequenceKind, SequencePoint};

use crate::styles::ColorTheme;

/// Significant digits on axis labels.
const AXIS_DIGITS: usize = 3;

/// Axis bounds `(x, y)` covering the finite points of a sequence.
///
/// The x axis always starts at 0 and the y axis always includes 0. Returns
/// `None` when no point has a finite value.
#[must_use]
pub fn chart_bounds(points: &[SequencePoint]) -> Option<([f64; 2], [f64; 2])> {
    let mut finite = points.iter().filter(|p| p.value.is_finite());
    let first = finite.next()?;
    let (mut x_max, mut y_min, mut y_max) = (f64::from(first.index), first.value, first.value);
    for point in finite {
        x_max = x_max.max(f64::from(point.index));
        y_min = y_min.min(point.value);
        y_max = y_max.max(point.value);
    }
    y_min = y_min.min(0.0);
    y_max = y_max.max(0.0);
    if (y_max - y_min).abs() < f64::EPSILON {
        y_max += 1.0;
    }
    Some(([0.0, x_max.max(1.0)], [y_min, y_max]))
}

/// Render one sequence as a line chart titled with its name.
pub fn render_sequence_chart(
    frame: &mut Frame,
    area: Rect,
    kind: SequenceKind,
    points: &[SequencePoint],
    theme: &ColorTheme,
) {
    let title = format!(" {} ({} points) ", kind_title(kind), points.len());
    let block = Block::default().borders(Borders::ALL).title(title);

    let Some((x, y)) = chart_bounds(points) else {
        let placeholder = Paragraph::new("No data")
            .style(theme.muted_style())
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    };

    let data: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.value.is_finite())
        .map(|p| (f64::from(p.index), p.value))
        .collect();

    let dataset = Dataset::default()
        .name(kind.as_str())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(theme.sequence_style(kind))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .title("step")
                .style(theme.muted_style())
                .bounds(x)
                .labels(axis_labels(x)),
        )
        .y_axis(
            Axis::default()
                .style(theme.muted_style())
                .bounds(y)
                .labels(axis_labels(y)),
        );

    frame.render_widget(chart, area);
}

fn kind_title(kind: SequenceKind) -> &'static str {
    match kind {
        SequenceKind::Linear => "Linear Growth",
        SequenceKind::Exponential => "Exponential Growth",
    }
}

fn axis_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| format_general(*v, AXIS_DIGITS))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn pts(values: &[f64]) -> Vec<SequencePoint> {
        (1..).zip(values).map(|(i, v)| SequencePoint::new(i, *v)).collect()
    }

    #[test]
    fn bounds_empty() {
        assert_eq!(chart_bounds(&[]), None);
    }

    #[test]
    fn bounds_include_zero() {
        let (x, y) = chart_bounds(&pts(&[2.0, 4.0, 8.0])).unwrap();
        assert_eq!(x, [0.0, 3.0]);
        assert_eq!(y, [0.0, 8.0]);
    }

    #[test]
    fn bounds_negative_values() {
        let (_, y) = chart_bounds(&pts(&[-2.0, 4.0, -8.0])).unwrap();
        assert_eq!(y, [-8.0, 4.0]);
    }

    #[test]
    fn bounds_flat_sequence_expanded() {
        let (_, y) = chart_bounds(&pts(&[0.0, 0.0])).unwrap();
        assert_eq!(y, [0.0, 1.0]);
    }

    #[test]
    fn bounds_skip_non_finite() {
        let (x, y) = chart_bounds(&pts(&[1.0, f64::INFINITY, f64::NAN])).unwrap();
        assert_eq!(x, [0.0, 1.0]);
        assert_eq!(y, [0.0, 1.0]);
        assert_eq!(chart_bounds(&pts(&[f64::INFINITY])), None);
    }

    #[test]
    fn axis_labels_use_general_format() {
        assert_eq!(axis_labels([0.0, 32.0]), vec!["0", "16", "32"]);
        assert_eq!(axis_labels([0.0, 2e9]), vec!["0", "1e+09", "2e+09"]);
    }

    fn render(kind: SequenceKind, points: &[SequencePoint], w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        let frame = terminal
            .draw(|frame| {
                let area = frame.area();
                render_sequence_chart(frame, area, kind, points, &ColorTheme::default());
            })
            .unwrap();
        frame.buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn renders_title_with_count() {
        let text = render(SequenceKind::Exponential, &pts(&[2.0, 4.0, 8.0]), 60, 15);
        assert!(text.contains("Exponential Growth (3 points)"));
    }

    #[test]
    fn renders_placeholder_without_points() {
        let text = render(SequenceKind::Linear, &[], 40, 6);
        assert!(text.contains("No data"));
        assert!(text.contains("Linear Growth (0 points)"));
    }

    #[test]
    fn renders_in_tiny_area() {
        render(SequenceKind::Linear, &pts(&[1.0, 2.0]), 5, 3);
    }
}
