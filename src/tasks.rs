use std::time::Instant;
use serde::{Serialize, Deserialize};




/**
 * The ascending plot-time schedule (§4.7, S5): tracks which snapshot
 * index is next due, and whether the current simulation time has
 * reached it. Adapted from the teacher's `RecurringTask`/`Tasks`
 * bookkeeping, specialized to the single recurring event this solver
 * has: taking a plot snapshot.
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct PlotSchedule {
    /// Ascending physical times at which a snapshot must be recorded.
    plot_times: Vec<f64>,

    /// Index into `plot_times` of the next one not yet reached.
    next_due: usize,
}





// ============================================================================
impl PlotSchedule {
    pub fn new(mut plot_times: Vec<f64>) -> Self {
        plot_times.sort_by(|a, b| a.partial_cmp(b).unwrap());
        PlotSchedule { plot_times, next_due: 0 }
    }

    /// Number of snapshots this schedule will produce beyond snapshot
    /// 0, i.e. the `N - 1` of §3's "Lifecycles".
    pub fn len(&self) -> usize {
        self.plot_times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plot_times.is_empty()
    }

    /// True once `time` has reached (or passed) the next scheduled
    /// plot time; advances the schedule so the same time is not
    /// recorded twice.
    pub fn is_due(&mut self, time: f64) -> bool {
        if self.next_due < self.plot_times.len() && time >= self.plot_times[self.next_due] {
            self.next_due += 1;
            true
        } else {
            false
        }
    }

    pub fn next_due_index(&self) -> usize {
        self.next_due
    }
}




/**
 * Tracks per-step CPU time measurement (§4.7: "measured monotonically
 * and stored per snapshot"), mirroring the teacher's `RecurringTask`
 * clock bookkeeping pattern but measuring wall time per step rather
 * than scheduling a recurring side effect.
 */
#[derive(Clone, Serialize, Deserialize)]
pub struct StepTimer {
    #[serde(skip, default = "Instant::now")]
    started_at: Instant,
}





// ============================================================================
impl StepTimer {
    pub fn start() -> Self {
        StepTimer { started_at: Instant::now() }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.started_at.elapsed().as_secs_f64()
    }
}




#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn schedule_fires_once_per_plot_time() {
        let mut schedule = PlotSchedule::new(vec![0.5, 0.2, 1.0]);
        assert!(!schedule.is_due(0.1));
        assert!(schedule.is_due(0.2));
        assert!(!schedule.is_due(0.3));
        assert!(schedule.is_due(0.6));
        assert!(schedule.is_due(1.5));
        assert_eq!(schedule.next_due_index(), 3);
    }
}
