//! Count display formatting.

/// Abbreviate an engagement count for display. Values of 1000 and above
/// render as tenths of thousands: `1200` becomes `1.2K`.
pub fn format_count(count: u32) -> String {
    if count >= 1000 {
        format!("{:.1}K", count as f32 / 1000.0)
    } else {
        count.to_string()
    }
}
