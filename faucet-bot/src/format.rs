//! Display helpers for amounts and durations in replies.

use std::time::Duration;

/// Octas per APT.
const OCTAS_PER_APT: u64 = 100_000_000;

/// `10_000_000` → `0.1`; trailing zeros dropped.
pub fn format_apt(octas: u64) -> String {
    let whole = octas / OCTAS_PER_APT;
    let frac = octas % OCTAS_PER_APT;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:08}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

/// Compact duration: `1h`, `1h 5m`, `30m`, `45s`. Seconds are shown only under a minute, rounded up.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs() + u64::from(duration.subsec_nanos() > 0);
    if secs < 60 {
        return format!("{}s", secs);
    }
    let minutes = secs.div_ceil(60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    match (hours, minutes) {
        (0, m) => format!("{}m", m),
        (h, 0) => format!("{}h", h),
        (h, m) => format!("{}h {}m", h, m),
    }
}
