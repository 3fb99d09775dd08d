/// Renders a second count the way Jira accepts it in the `timeSpent`
/// field: `"8h"`, `"7h 30m"`, `"1m 5s"`. Zero renders as `"0s"`.
pub fn format_duration(total_secs: i64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    let mut parts = Vec::new();
    if hours > 0 {
        parts.push(format!("{}h", hours));
    }
    if minutes > 0 {
        parts.push(format!("{}m", minutes));
    }
    if seconds > 0 || parts.is_empty() {
        parts.push(format!("{}s", seconds));
    }

    parts.join(" ")
}

pub fn duration_secs(hours: i64, minutes: i64) -> i64 {
    hours * 3600 + minutes * 60
}
