//! Per-tick tracking metrics.
//!
//! [`TickMetrics`] captures timing and protocol counters for a single
//! tick. The cumulative fields carry totals since the engine was built.

/// Timing and protocol counters collected during a single tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Wall-clock time for the entire tick, in microseconds.
    pub total_us: u64,
    /// Handshakes written during propagation this tick.
    pub handshakes_sent: u32,
    /// Candidate objects scored during re-identification this tick.
    pub candidates_scored: u32,
    /// Cumulative number of responsibility transfers.
    pub handoffs: u64,
    /// Cumulative number of ticks spent with tracking lost.
    pub lost_ticks: u64,
    /// Cumulative number of initial acquisitions.
    pub acquisitions: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = TickMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.handshakes_sent, 0);
        assert_eq!(m.candidates_scored, 0);
        assert_eq!(m.handoffs, 0);
        assert_eq!(m.lost_ticks, 0);
        assert_eq!(m.acquisitions, 0);
    }
}
