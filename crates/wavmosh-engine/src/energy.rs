//! Energy analysis over raw PCM bytes.
//!
//! The buffer is split into fixed-size windows and each window is scored by
//! the summed absolute difference between neighbouring bytes. High scores mark
//! transients (beats, hits) where a glitch is most audible.

/// Smallest window, in bytes.
pub const MIN_WINDOW: usize = 1000;

/// Most byte pairs scored per window.
pub const MAX_PAIRS_PER_WINDOW: usize = 500;

/// A scored window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterestingPoint {
    /// Byte offset of the window start.
    pub position: usize,
    /// Summed absolute neighbour difference over the scored pairs.
    pub energy: u64,
}

/// Window size used for a buffer length and requested point count.
pub fn window_size(len: usize, count: usize) -> usize {
    let target = len / count.saturating_mul(2).max(1);
    target.max(MIN_WINDOW)
}

/// Scores every window, highest energy first.
///
/// Ties keep ascending position order. Every window is scored, including a
/// trailing partial one. Returns an empty list for an empty buffer or a
/// count of zero.
pub fn score_windows(buffer: &[u8], count: usize) -> Vec<InterestingPoint> {
    if buffer.is_empty() || count == 0 {
        return Vec::new();
    }

    let step = window_size(buffer.len(), count);
    let mut points: Vec<InterestingPoint> = (0..buffer.len())
        .step_by(step)
        .map(|start| InterestingPoint {
            position: start,
            energy: window_energy(buffer, start, step),
        })
        .collect();

    // Stable sort keeps equal energies in position order.
    points.sort_by(|a, b| b.energy.cmp(&a.energy));
    points
}

/// Positions of the `count` highest-energy windows, highest first.
pub fn find_interesting_points(buffer: &[u8], count: usize) -> Vec<usize> {
    score_windows(buffer, count)
        .into_iter()
        .take(count)
        .map(|point| point.position)
        .collect()
}

fn window_energy(buffer: &[u8], start: usize, step: usize) -> u64 {
    let pairs = step.min(MAX_PAIRS_PER_WINDOW);
    let end = (start + pairs + 1).min(buffer.len());
    buffer[start..end]
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]) as u64)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size() {
        assert_eq!(window_size(100, 4), MIN_WINDOW);
        assert_eq!(window_size(100_000, 10), 5_000);
        assert_eq!(window_size(100_000, 0), 100_000);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(find_interesting_points(&[], 5).is_empty());
        assert!(find_interesting_points(&[1, 2, 3], 0).is_empty());
    }

    #[test]
    fn test_discontinuity_wins() {
        let mut buffer = vec![0x40u8; 20_000];
        // Sharp step inside the window starting at 12_000 (window = 2_000 bytes).
        for b in buffer.iter_mut().skip(12_100) {
            *b = 0xC0;
        }

        let scores = score_windows(&buffer, 5);
        assert_eq!(scores[0].position, 12_000);
        assert_eq!(scores[0].energy, 0x80);
        assert!(scores[1..].iter().all(|p| p.energy == 0));
    }

    #[test]
    fn test_ties_keep_position_order() {
        let buffer = vec![7u8; 10_000];
        let points = find_interesting_points(&buffer, 5);
        assert_eq!(points, vec![0, 1_000, 2_000, 3_000, 4_000]);
    }

    #[test]
    fn test_pair_cap() {
        // Alternating bytes: each pair scores 255, but only 500 pairs count.
        let buffer: Vec<u8> = (0..4_000).map(|i| if i % 2 == 0 { 0 } else { 255 }).collect();
        let scores = score_windows(&buffer, 1);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].energy, 500 * 255);
    }

    #[test]
    fn test_trailing_partial_window_is_scored() {
        // 2_500 / 4 is under the floor, so windows are 1_000 bytes and the
        // last one covers only 2_000..2_500.
        let mut buffer = vec![0u8; 2_500];
        buffer[2_200] = 100;
        assert_eq!(window_size(buffer.len(), 2), MIN_WINDOW);

        let scores = score_windows(&buffer, 2);
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0].position, 2_000);
        assert_eq!(scores[0].energy, 200);
        assert_eq!(find_interesting_points(&buffer, 2)[0], 2_000);
    }

    #[test]
    fn test_count_limits_result() {
        let buffer: Vec<u8> = (0..50_000u32).map(|i| (i % 251) as u8).collect();
        assert_eq!(find_interesting_points(&buffer, 4).len(), 4);
        assert!(find_interesting_points(&buffer, 1_000).len() <= 50);
    }
}
