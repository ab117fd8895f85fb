//! Nearest-candidate search.

use glam::DVec3;

/// Outcome of [`find_closest`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<T> {
    /// Closest qualifying candidate, if any.
    pub item: Option<T>,
    /// Distance to `item`; `f64::INFINITY` when empty.
    pub distance: f64,
    /// Number of candidates that passed the filter and lay within the radius.
    pub in_range: usize,
}

impl<T> SearchResult<T> {
    pub fn empty() -> Self {
        Self {
            item: None,
            distance: f64::INFINITY,
            in_range: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }
}

/// Find the candidate closest to `center` within `radius` (inclusive).
///
/// Single pass over squared distances; only the winner's distance is
/// square-rooted. Ties keep the first candidate in iteration order.
pub fn find_closest<T, I, P, F>(
    center: DVec3,
    radius: f64,
    candidates: I,
    position_of: P,
    filter: F,
) -> SearchResult<T>
where
    I: IntoIterator<Item = T>,
    P: Fn(&T) -> DVec3,
    F: Fn(&T) -> bool,
{
    let range_sq = radius * radius;
    let mut best: Option<(T, f64)> = None;
    let mut in_range = 0;

    for candidate in candidates {
        if !filter(&candidate) {
            continue;
        }
        let dist_sq = (position_of(&candidate) - center).length_squared();
        if dist_sq > range_sq {
            continue;
        }
        in_range += 1;
        let closer = best
            .as_ref()
            .map_or(true, |(_, best_sq)| dist_sq < *best_sq);
        if closer {
            best = Some((candidate, dist_sq));
        }
    }

    match best {
        Some((item, dist_sq)) => SearchResult {
            item: Some(item),
            distance: dist_sq.sqrt(),
            in_range,
        },
        None => SearchResult {
            in_range,
            ..SearchResult::empty()
        },
    }
}
