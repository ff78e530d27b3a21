use serde::Serialize;

use super::frames::Frames;

/// One per-epoch record of a training run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// The flattened model parameters after this epoch's updates (entry 0:
    /// before any update).
    pub params: Vec<f32>,
    /// The loss over the full training split.
    pub train_loss: f32,
    /// The loss over the full test split.
    pub test_loss: f32,
}

impl Snapshot {
    pub(crate) fn new(params: Vec<f32>, train_loss: f32, test_loss: f32) -> Self {
        Self {
            params,
            train_loss,
            test_loss,
        }
    }
}

/// The ordered sequence of snapshots recorded by a run: one per epoch plus
/// the pre-training snapshot, so a completed run of `E` epochs holds exactly
/// `E + 1` entries.
///
/// A log is append-only while the run owns it and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryLog {
    labels: Vec<String>,
    window: usize,
    bins: usize,
    snapshots: Vec<Snapshot>,
}

impl TrajectoryLog {
    pub(crate) fn new(labels: Vec<String>, window: usize, bins: usize, epochs: usize) -> Self {
        Self {
            labels,
            window,
            bins,
            snapshots: Vec::with_capacity(epochs + 1),
        }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Returns the number of recorded snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Returns the ordered labels of the tracked parameters.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the sliding-window size frames are derived with.
    pub fn window(&self) -> usize {
        self.window
    }

    /// Returns the number of bins in each derived histogram.
    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Returns the recorded snapshots in epoch order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// Returns the recorded history of one parameter, in epoch order.
    ///
    /// # Panics
    /// Panics if `param` is not a valid parameter index.
    pub fn param_history(&self, param: usize) -> impl Iterator<Item = f32> + '_ {
        self.snapshots.iter().map(move |s| s.params[param])
    }

    /// Returns the observed `(min, max)` of one parameter across the whole
    /// run. Frames use this as their fixed histogram range.
    ///
    /// # Panics
    /// Panics if `param` is not a valid parameter index or the log is empty.
    pub fn param_range(&self, param: usize) -> (f32, f32) {
        self.param_history(param)
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Derives the frame sequence for this log: one composite frame of
    /// per-parameter histograms per eligible epoch index.
    ///
    /// The sequence is lazy and finite; calling `frames` again restarts it.
    pub fn frames(&self) -> Frames<'_> {
        Frames::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn log_of(values: &[f32]) -> TrajectoryLog {
        let mut log = TrajectoryLog::new(vec!["w".into()], 2, 4, values.len() - 1);
        for &v in values {
            log.push(Snapshot::new(vec![v], 0.1, 0.2));
        }
        log
    }

    #[test]
    fn test_param_history_follows_epoch_order() {
        let log = log_of(&[3., 1., 2.]);
        let history: Vec<_> = log.param_history(0).collect();
        assert_eq!(history, vec![3., 1., 2.]);
    }

    #[test]
    fn test_param_range_spans_the_whole_run() {
        let log = log_of(&[3., -1., 2.]);
        assert_eq!(log.param_range(0), (-1., 3.));
    }
}
