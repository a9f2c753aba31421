//! CLI output formatting.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use growthcalc_core::constants::SIGNIFICANT_DIGITS;
use growthcalc_core::format::{format_fixed, format_general};
use growthcalc_core::{EngineSnapshot, SequenceKind, SequencePoint};

/// Format a duration for display.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else if secs < 60.0 {
        format!("{secs:.3}s")
    } else {
        let mins = (secs / 60.0).floor() as u64;
        let remaining = secs - (mins as f64 * 60.0);
        format!("{mins}m{remaining:.1}s")
    }
}

/// Format one point value the way the step labels show it.
#[must_use]
pub fn format_value(kind: SequenceKind, value: f64) -> String {
    match kind {
        SequenceKind::Linear => format_fixed(value),
        SequenceKind::Exponential => format_general(value, SIGNIFICANT_DIGITS),
    }
}

/// Render a sequence as a two-column table.
///
/// ```
/// use growthcalc_cli::output::format_points;
/// use growthcalc_core::{SequenceKind, SequencePoint};
///
/// let table = format_points(SequenceKind::Linear, &[SequencePoint::new(1, 2.0)]);
/// assert!(table.contains("2.00"));
/// ```
#[must_use]
pub fn format_points(kind: SequenceKind, points: &[SequencePoint]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "  {:>6}  {:>16}", "Step", kind.as_str());
    let _ = writeln!(out, "  {:-<6}  {:-<16}", "", "");
    for point in points {
        let _ = writeln!(
            out,
            "  {:>6}  {:>16}",
            point.index,
            format_value(kind, point.value)
        );
    }
    out
}

/// Write the snapshot to a file as pretty-printed JSON.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be created or written.
pub fn write_snapshot(path: &Path, snapshot: &EngineSnapshot) -> io::Result<()> {
    let mut writer = io::BufWriter::new(std::fs::File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), "Snapshot written");
    Ok(())
}
