//! Scroll sampling: throttling and fraction-to-view bucketing.

/// Width of one scroll bucket, in percent of total scroll range.
pub const BUCKET_WIDTH_PERCENT: f64 = 20.0;

/// Map a scroll fraction in `[0,1]` to a view index.
///
/// `floor(fraction * 100 / 20)` picks one of five equal-width buckets.
/// A fraction of exactly 1.0 lands in bucket 5, which is outside the
/// view range and dropped (see DESIGN.md).
pub fn scroll_bucket(fraction: f64) -> Option<usize> {
    if !fraction.is_finite() || fraction < 0.0 {
        return None;
    }
    let bucket = (fraction * 100.0 / BUCKET_WIDTH_PERCENT).floor() as usize;
    if bucket < crate::switcher::VIEW_COUNT {
        Some(bucket)
    } else {
        None
    }
}

/// Rate limiter for scroll sampling, at most one sample per interval.
///
/// The caller passes a monotonic clock reading in seconds.
#[derive(Debug, Clone)]
pub struct SampleThrottle {
    min_interval: f64,
    last: Option<f64>,
}

impl SampleThrottle {
    pub fn new(min_interval: f64) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// Returns true if enough time has passed since the last accepted
    /// sample, and records `now` as the new reference point if so.
    pub fn ready(&mut self, now: f64) -> bool {
        match self.last {
            Some(last) if now - last < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_mapping_matches_twenty_percent_bands() {
        assert_eq!(scroll_bucket(0.0), Some(0));
        assert_eq!(scroll_bucket(0.199), Some(0));
        assert_eq!(scroll_bucket(0.2), Some(1));
        assert_eq!(scroll_bucket(0.45), Some(2));
        assert_eq!(scroll_bucket(0.799), Some(3));
        assert_eq!(scroll_bucket(0.999), Some(4));
    }

    #[test]
    fn full_scroll_is_out_of_range_and_dropped() {
        assert_eq!(scroll_bucket(1.0), None);
    }

    #[test]
    fn garbage_fractions_are_dropped() {
        assert_eq!(scroll_bucket(-0.1), None);
        assert_eq!(scroll_bucket(f64::NAN), None);
        assert_eq!(scroll_bucket(f64::INFINITY), None);
    }

    #[test]
    fn throttle_passes_first_sample_immediately() {
        let mut t = SampleThrottle::new(0.016);
        assert!(t.ready(0.0));
    }

    #[test]
    fn throttle_blocks_samples_inside_the_window() {
        let mut t = SampleThrottle::new(0.016);
        assert!(t.ready(1.0));
        assert!(!t.ready(1.010));
        assert!(!t.ready(1.015));
        assert!(t.ready(1.017));
        assert!(!t.ready(1.020));
    }
}
