use serde::Serialize;

use super::trajectory::TrajectoryLog;

/// A fixed-range histogram of one parameter's recent history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The label of the tracked parameter.
    pub label: String,
    /// The inclusive x-axis range: the parameter's observed extremes across
    /// the whole run, so every frame of a sequence is visually comparable.
    pub range: (f32, f32),
    /// The per-bin counts.
    pub counts: Vec<usize>,
}

impl Histogram {
    fn build<I>(label: String, range: (f32, f32), bins: usize, values: I) -> Self
    where
        I: Iterator<Item = f32>,
    {
        let (lo, hi) = range;
        let width = hi - lo;
        let mut counts = vec![0; bins];

        for v in values {
            let bin = if width > 0. {
                (((v - lo) / width) * bins as f32) as usize
            } else {
                0
            };
            counts[bin.min(bins - 1)] += 1;
        }

        Self { label, range, counts }
    }
}

/// One composite frame: a histogram per tracked parameter, derived from the
/// sliding window of history strictly before epoch index `t`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    /// The 1-based log-entry index this frame was derived at.
    pub t: usize,
    /// One histogram per tracked parameter, in label order.
    pub histograms: Vec<Histogram>,
}

/// A lazy, finite, restartable sequence of [`Frame`]s over a completed
/// [`TrajectoryLog`]. See [`TrajectoryLog::frames`].
///
/// For a window of size `n` over a log of `E + 1` entries, frame indices run
/// from `n + 2` to `E + 1`, so the sequence holds `max(0, (E + 1) - (n + 1))`
/// frames; each histogram covers the most recent `min(n, t - 1)` recorded
/// values of its parameter.
#[derive(Clone)]
pub struct Frames<'a> {
    log: &'a TrajectoryLog,
    t: usize,
    end: usize,
}

impl<'a> Frames<'a> {
    pub(crate) fn new(log: &'a TrajectoryLog) -> Self {
        Self {
            log,
            t: log.window() + 2,
            end: log.len(),
        }
    }

    fn build(&self, t: usize) -> Frame {
        // Window start in 1-based entry indices, clamped to entry 1. The
        // window covers entries start..=t-1: the history strictly before t.
        let start = t.saturating_sub(self.log.window()).max(1);

        let histograms = (0..self.log.labels().len())
            .map(|param| {
                let values = self.log.snapshots()[start - 1..t - 1]
                    .iter()
                    .map(|s| s.params[param]);

                Histogram::build(
                    self.log.labels()[param].clone(),
                    self.log.param_range(param),
                    self.log.bins(),
                    values,
                )
            })
            .collect();

        Frame { t, histograms }
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Self::Item> {
        if self.t > self.end {
            return None;
        }

        let frame = self.build(self.t);
        self.t += 1;

        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end + 1).saturating_sub(self.t);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::recorder::trajectory::Snapshot;

    /// A log over one parameter whose recorded value at entry `i` (0-based)
    /// is `i as f32`.
    fn log(epochs: usize, window: usize, bins: usize) -> TrajectoryLog {
        let mut log = TrajectoryLog::new(vec!["w".into()], window, bins, epochs);
        for i in 0..=epochs {
            log.push(Snapshot::new(vec![i as f32], 0.1, 0.2));
        }
        log
    }

    #[test]
    fn test_sequence_length_matches_the_window() {
        for (epochs, window, expected) in [(3, 1, 2), (10, 4, 6), (5, 0, 5)] {
            let log = log(epochs, window, 4);
            assert_eq!(log.frames().len(), expected);
            assert_eq!(log.frames().count(), expected);
        }
    }

    #[test]
    fn test_three_epochs_window_one_yields_frames_at_three_and_four() {
        let log = log(3, 1, 4);
        let ts: Vec<_> = log.frames().map(|f| f.t).collect();
        assert_eq!(ts, vec![3, 4]);
    }

    #[test]
    fn test_window_larger_than_the_run_yields_no_frames() {
        let log = log(3, 3, 4);
        assert_eq!(log.frames().count(), 0);

        let log = self::log(3, 10, 4);
        assert_eq!(log.frames().count(), 0);
    }

    #[test]
    fn test_each_histogram_covers_the_recent_window_only() {
        let window = 2;
        let log = log(5, window, 6);

        for frame in log.frames() {
            let hist = &frame.histograms[0];
            let total: usize = hist.counts.iter().sum();
            assert_eq!(total, window.min(frame.t - 1));
        }
    }

    #[test]
    fn test_window_excludes_the_current_entry() {
        // Entries hold 0..=3; at t = 3 with window 1 only entry 2 (value 1)
        // is covered, and the range spans the full run.
        let log = log(3, 1, 3);
        let frame = log.frames().next().unwrap();

        let hist = &frame.histograms[0];
        assert_eq!(hist.range, (0., 3.));
        // Value 1 over [0, 3] with 3 bins falls in the middle bin.
        assert_eq!(hist.counts, vec![0, 1, 0]);
    }

    #[test]
    fn test_frames_restart_identically() {
        let log = log(6, 2, 5);
        let first: Vec<_> = log.frames().collect();
        let second: Vec<_> = log.frames().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_constant_parameter_lands_in_the_first_bin() {
        let mut log = TrajectoryLog::new(vec!["w".into()], 1, 4, 2);
        for _ in 0..3 {
            log.push(Snapshot::new(vec![1.5], 0.1, 0.2));
        }

        // Degenerate range: every value maps to bin 0.
        for frame in log.frames() {
            assert_eq!(frame.histograms[0].range, (1.5, 1.5));
            assert_eq!(frame.histograms[0].counts[0], 1);
        }
    }
}
