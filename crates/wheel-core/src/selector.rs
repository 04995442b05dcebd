use crate::config::Segment;
use crate::rng::{unit_draw, RandomSource};

/// Pick a segment index with probability proportional to its weight.
///
/// `[0, total)` is split into contiguous intervals in index order and the
/// interval holding `random() * total` wins, so zero-weight segments are
/// never chosen. When no segment has positive weight every segment counts
/// as weight 1. Takes exactly one draw; `None` only for an empty slice.
pub fn select_weighted(segments: &[Segment], rng: &mut dyn RandomSource) -> Option<usize> {
    if segments.is_empty() {
        return None;
    }

    let total: f64 = segments.iter().map(Segment::effective_weight).sum();
    let draw = unit_draw(rng);

    if total <= 0.0 {
        log::debug!(
            "[select] no positive weights across {} segments, using uniform fallback",
            segments.len()
        );
        let index = (draw * segments.len() as f64).floor() as usize;
        return Some(index.min(segments.len() - 1));
    }

    let mut remaining = draw * total;
    let mut last_positive = 0;
    for (i, seg) in segments.iter().enumerate() {
        let w = seg.effective_weight();
        if w <= 0.0 {
            continue;
        }
        last_positive = i;
        if remaining < w {
            return Some(i);
        }
        remaining -= w;
    }
    // Rounding left `remaining` a hair above the final interval.
    Some(last_positive)
}
