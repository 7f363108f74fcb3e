//! Human-readable listing of a selection.

use super::file::FileSelection;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Formats a byte count as `B`, `KB` or `MB`.
///
/// KB and MB values carry one decimal, rounded half-up on the exact value.
///
/// ```rust
/// use mergeup::selection::human_size;
///
/// assert_eq!(human_size(500), "500 B");
/// assert_eq!(human_size(2048), "2.0 KB");
/// assert_eq!(human_size(5242880), "5.0 MB");
/// ```
pub fn human_size(bytes: u64) -> String {
    if bytes < KIB {
        format!("{} B", bytes)
    } else if bytes < MIB {
        format!("{} KB", tenths(bytes, KIB))
    } else {
        format!("{} MB", tenths(bytes, MIB))
    }
}

/// `bytes / unit` with one decimal, half-up.
fn tenths(bytes: u64, unit: u64) -> String {
    let unit = u128::from(unit);
    let t = (u128::from(bytes) * 20 + unit) / (unit * 2);
    format!("{}.{}", t / 10, t % 10)
}

/// Renders one `• <name> (<size>)` line per file.
///
/// Returns `None` when nothing is selected so the caller can clear any
/// previous listing.
pub fn render_listing(selection: &FileSelection) -> Option<String> {
    if selection.is_empty() {
        return None;
    }

    let lines = selection
        .files()
        .iter()
        .map(|f| format!("• {} ({})", f.name, human_size(f.size)))
        .collect::<Vec<_>>();
    Some(lines.join("\n"))
}
