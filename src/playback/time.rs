// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// Format seconds as "M:SS".
///
/// Minutes are not padded and keep counting past an hour. Non-finite or
/// negative input formats as "0:00".
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Parse a display duration such as "42:10", "1:02:03" or "95" into seconds
pub fn parse_display_duration(display: &str) -> Option<u64> {
    let parts: Vec<&str> = display.trim().split(':').collect();
    if parts.len() > 3 {
        return None;
    }

    parts.iter().try_fold(0u64, |total, part| {
        let value: u64 = part.trim().parse().ok()?;
        total.checked_mul(60)?.checked_add(value)
    })
}
