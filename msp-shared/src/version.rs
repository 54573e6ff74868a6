use std::cmp::Ordering;

/// Compare two dotted version strings segment by segment.
///
/// Non-numeric suffixes inside a segment are ignored (`6.4.0.0-rc1` reads as
/// `6.4.0.0`). A version with extra trailing segments sorts after its prefix,
/// so `6.4.0.0` is greater than `6.4`.
pub fn compare(left: &str, right: &str) -> Ordering {
    parse(left).cmp(&parse(right))
}

/// True when `version` is strictly lower than `reference`.
pub fn is_lower_than(version: &str, reference: &str) -> bool {
    compare(version, reference) == Ordering::Less
}

fn parse(version: &str) -> Vec<u64> {
    version
        .trim()
        .trim_start_matches('v')
        .split('.')
        .map(|segment| {
            let digits: String = segment.chars().take_while(|c| c.is_ascii_digit()).collect();
            digits.parse().unwrap_or(0)
        })
        .collect()
}
