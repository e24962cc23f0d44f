//! Score and level policy: points per cleared line, and the score → fall
//! interval bands that drive gravity speed.

/// Base increment per cleared row.
pub const POINTS_PER_LINE: u32 = 10;

/// Speed bands: (score lower bound, fall interval in ms), ascending. The
/// last band is terminal; no further speed-up past it.
pub const SPEED_BANDS: [(u32, u64); 10] = [
    (0, 1000),
    (1000, 900),
    (2000, 800),
    (3000, 700),
    (5000, 600),
    (10_000, 500),
    (25_000, 400),
    (50_000, 300),
    (100_000, 200),
    (250_000, 100),
];

fn band_for_score(score: u32) -> usize {
    SPEED_BANDS
        .iter()
        .rposition(|&(threshold, _)| score >= threshold)
        .unwrap_or(0)
}

/// Level is the ordinal of the active band, starting at 1.
pub fn level_for_score(score: u32) -> u32 {
    band_for_score(score) as u32 + 1
}

/// Gravity tick interval for the given cumulative score.
pub fn fall_interval_ms(score: u32) -> u64 {
    SPEED_BANDS[band_for_score(score)].1
}
