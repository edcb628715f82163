//! Metrics
//!
//! Counters kept by the HTTP layer plus engine totals, rendered in the
//! Prometheus text format.

use crate::games::types::HouseStats;
use std::fmt::Write;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Prometheus-compatible metrics registry
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    pub bets_total: Arc<AtomicU64>,
    pub wins_total: Arc<AtomicU64>,
    pub invalid_bets_total: Arc<AtomicU64>,
    pub resets_total: Arc<AtomicU64>,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_bet(&self, is_win: bool) {
        self.bets_total.fetch_add(1, Ordering::SeqCst);
        if is_win {
            self.wins_total.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn record_invalid_bet(&self) {
        self.invalid_bets_total.fetch_add(1, Ordering::SeqCst);
    }

    pub fn record_reset(&self) {
        self.resets_total.fetch_add(1, Ordering::SeqCst);
    }

    /// Render counters and the current engine totals
    pub fn to_prometheus_format(&self, stats: &HouseStats) -> String {
        let mut out = String::new();

        let counters = [
            ("ruleta_bets_total", "Bets processed since start", &self.bets_total),
            ("ruleta_wins_total", "Winning bets since start", &self.wins_total),
            ("ruleta_invalid_bets_total", "Rejected unknown bet identifiers", &self.invalid_bets_total),
            ("ruleta_resets_total", "Statistics resets", &self.resets_total),
        ];
        for (name, help, value) in counters {
            let _ = writeln!(out, "# HELP {} {}", name, help);
            let _ = writeln!(out, "# TYPE {} counter", name);
            let _ = writeln!(out, "{} {}", name, value.load(Ordering::SeqCst));
        }

        let gauges = [
            ("ruleta_total_staked", "Stakes since last reset", stats.total_staked),
            ("ruleta_total_paid_out", "Prizes paid since last reset", stats.total_paid_out),
            ("ruleta_total_retained", "Stakes kept since last reset", stats.total_retained),
            ("ruleta_current_edge", "Realized house edge", stats.current_edge),
            ("ruleta_target_edge", "Configured house edge", stats.target_edge),
            ("ruleta_recent_win_rate", "Win rate over the history window", stats.recent_win_rate),
        ];
        for (name, help, value) in gauges {
            let _ = writeln!(out, "# HELP {} {}", name, help);
            let _ = writeln!(out, "# TYPE {} gauge", name);
            let _ = writeln!(out, "{} {}", name, value);
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_stats() -> HouseStats {
        HouseStats {
            total_staked: 0.0,
            total_paid_out: 0.0,
            total_retained: 0.0,
            current_edge: 0.0,
            target_edge: 0.027,
            recent_win_rate: 0.0,
            bets_placed: 0,
            history_length: 0,
        }
    }

    #[test]
    fn test_prometheus_output() {
        let metrics = MetricsRegistry::new();
        metrics.record_bet(true);
        metrics.record_bet(false);
        metrics.record_invalid_bet();

        let text = metrics.to_prometheus_format(&empty_stats());
        assert!(text.contains("ruleta_bets_total 2"));
        assert!(text.contains("ruleta_wins_total 1"));
        assert!(text.contains("ruleta_invalid_bets_total 1"));
        assert!(text.contains("ruleta_target_edge 0.027"));
    }
}
