//! Spacer commands

mod add;
mod update;

pub use add::AddSpacer;
pub use update::UpdateSpacer;

/// Blank names and tags are stored as absent
fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
