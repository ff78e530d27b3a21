use std::{fs::File, io::BufWriter, num::NonZeroUsize};

use anyhow::Context;
use log::info;
use ndarray::{Array1, Array2};
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

use trajectoria::{Bce, Dataset, Langevin, Logistic, Recorder, RecorderConfig};

const SEED: u64 = 42;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut rng = StdRng::seed_from_u64(SEED);
    let train = blobs(200, &mut rng)?;
    let test = blobs(50, &mut rng)?;

    let config = RecorderConfig {
        epochs: 60,
        batch_size: NonZeroUsize::new(10).context("batch size")?,
        window: 20,
        bins: 20,
        seed: SEED,
        param_labels: vec!["w1".into(), "w2".into(), "b".into()],
    };

    let mut recorder = Recorder::new(
        Logistic::new(2),
        Langevin::seeded(0.1, SEED),
        Bce::new(),
        train,
        test,
        config,
    )?;

    let log = recorder.run()?;
    if let Some(last) = log.snapshots().last() {
        info!(
            "final losses: train={}, test={}",
            last.train_loss, last.test_loss,
        );
    }

    serde_json::to_writer(
        BufWriter::new(File::create("trajectory.json")?),
        &log,
    )?;

    let frames: Vec<_> = log.frames().collect();
    serde_json::to_writer(BufWriter::new(File::create("frames.json")?), &frames)?;
    info!(
        "wrote trajectory.json ({} snapshots) and frames.json ({} frames)",
        log.len(),
        frames.len(),
    );

    Ok(())
}

/// Two gaussian blobs around (-2, -2) and (2, 2), alternating labels so every
/// mini-batch sees both classes.
fn blobs(len: usize, rng: &mut StdRng) -> anyhow::Result<Dataset> {
    let noise = Normal::new(0., 0.8)?;

    let mut x = Vec::with_capacity(len * 2);
    let mut y = Vec::with_capacity(len);
    for i in 0..len {
        let label = (i % 2) as f32;
        let center = if label == 0. { -2. } else { 2. };
        x.push(center + noise.sample(rng));
        x.push(center + noise.sample(rng));
        y.push(label);
    }

    let dataset = Dataset::new(Array2::from_shape_vec((len, 2), x)?, Array1::from_vec(y))?;
    Ok(dataset)
}
