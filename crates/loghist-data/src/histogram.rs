//! Fixed 24-bucket hour-of-day access counter.

use loghist_core::models::{LogEntry, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};

/// Access counts indexed by hour of day.
///
/// Always exactly [`HOURS_PER_DAY`] buckets; counters only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyHistogram {
    counts: [u64; HOURS_PER_DAY],
}

impl HourlyHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a histogram from precomputed counts.
    pub fn from_counts(counts: [u64; HOURS_PER_DAY]) -> Self {
        Self { counts }
    }

    /// Count one access for `entry`'s hour and return the new bucket value.
    ///
    /// Returns `None`, leaving the histogram untouched, when the hour lies
    /// outside 0–23.
    pub fn record(&mut self, entry: &LogEntry) -> Option<u64> {
        let slot = self.counts.get_mut(entry.hour_index())?;
        *slot += 1;
        Some(*slot)
    }

    pub fn counts(&self) -> &[u64; HOURS_PER_DAY] {
        &self.counts
    }

    /// Sum of all buckets.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Hour with the most accesses. Ties go to the earliest hour, so an
    /// empty histogram reports hour 0.
    pub fn busiest_hour(&self) -> usize {
        let mut busiest = 0;
        for hour in 1..HOURS_PER_DAY {
            if self.counts[hour] > self.counts[busiest] {
                busiest = hour;
            }
        }
        busiest
    }

    /// Hour with the fewest accesses. Ties go to the earliest hour, so an
    /// empty histogram reports hour 0.
    pub fn quietest_hour(&self) -> usize {
        let mut quietest = 0;
        for hour in 1..HOURS_PER_DAY {
            if self.counts[hour] < self.counts[quietest] {
                quietest = hour;
            }
        }
        quietest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_hour(hour: u32) -> LogEntry {
        LogEntry {
            year: 2015,
            month: 6,
            day: 1,
            hour,
            minute: 0,
        }
    }

    fn with_prefix(prefix: &[u64]) -> HourlyHistogram {
        let mut counts = [0u64; HOURS_PER_DAY];
        counts[..prefix.len()].copy_from_slice(prefix);
        HourlyHistogram::from_counts(counts)
    }

    #[test]
    fn test_new_is_all_zero() {
        let h = HourlyHistogram::new();
        assert_eq!(h.counts().len(), 24);
        assert_eq!(h.total(), 0);
        assert_eq!(h.busiest_hour(), 0);
        assert_eq!(h.quietest_hour(), 0);
    }

    #[test]
    fn test_record_increments_bucket() {
        let mut h = HourlyHistogram::new();
        assert_eq!(h.record(&at_hour(14)), Some(1));
        assert_eq!(h.record(&at_hour(14)), Some(2));
        assert_eq!(h.counts()[14], 2);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn test_record_rejects_out_of_range_hour() {
        let mut h = HourlyHistogram::new();
        assert_eq!(h.record(&at_hour(24)), None);
        assert_eq!(h.total(), 0);
    }

    #[test]
    fn test_busiest_tie_goes_to_earliest() {
        let mut counts = [1u64; HOURS_PER_DAY];
        counts[0] = 5;
        counts[1] = 5;
        counts[2] = 3;
        assert_eq!(HourlyHistogram::from_counts(counts).busiest_hour(), 0);

        assert_eq!(with_prefix(&[0, 0, 4, 9, 9]).busiest_hour(), 3);
    }

    #[test]
    fn test_quietest_tie_goes_to_earliest() {
        let mut counts = [9u64; HOURS_PER_DAY];
        counts[0] = 5;
        counts[1] = 3;
        counts[2] = 3;
        assert_eq!(HourlyHistogram::from_counts(counts).quietest_hour(), 1);
    }

    #[test]
    fn test_quietest_is_first_empty_hour() {
        assert_eq!(with_prefix(&[5, 5, 3]).quietest_hour(), 3);
    }

    #[test]
    fn test_results_always_in_range() {
        let mut counts = [0u64; HOURS_PER_DAY];
        counts[23] = 100;
        let h = HourlyHistogram::from_counts(counts);
        assert_eq!(h.busiest_hour(), 23);
        assert!(h.quietest_hour() < HOURS_PER_DAY);
    }

    #[test]
    fn test_serializes_as_counts_array() {
        let h = with_prefix(&[2]);
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["counts"].as_array().unwrap().len(), 24);
        assert_eq!(json["counts"][0], 2);
    }
}
