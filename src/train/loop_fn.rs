use rand::seq::SliceRandom;
use tracing::{debug, warn};

use crate::activation::relu_gate;
use crate::loss::CrossEntropyLoss;
use crate::math::vector;
use crate::network::Network;
use crate::optim::Sgd;
use crate::sample::Sample;
use crate::train::gradients::Gradients;
use crate::train::report::TrainReport;
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` on `samples` for `config.epochs` epochs of minibatch SGD.
///
/// Samples with a wrong pixel count or an out-of-range label are dropped up
/// front. If none remain the network is left untouched. Each batch's update
/// is applied as one unit by `optimizer`; a batch it rejects is logged and
/// skipped, and training continues with the next batch.
pub fn train_loop(
    network: &mut Network,
    samples: &[Sample],
    optimizer: &Sgd,
    config: &TrainConfig,
) -> TrainReport {
    let arch = *network.architecture();
    let valid: Vec<(&[f64], usize)> = samples.iter()
        .filter_map(|s| s.class_for(&arch).map(|class| (s.pixels.as_slice(), class)))
        .collect();

    let mut report = TrainReport {
        samples_used: valid.len(),
        samples_skipped: samples.len() - valid.len(),
        ..TrainReport::default()
    };
    if report.samples_skipped > 0 {
        warn!(skipped = report.samples_skipped, "dropping malformed training samples");
    }
    if valid.is_empty() {
        return report;
    }

    let batch_size = config.batch_size.max(1);
    for epoch in 1..=config.epochs {
        let stats = run_one_epoch(network, &valid, optimizer, batch_size);
        debug!(
            epoch,
            applied = stats.applied,
            rejected = stats.rejected,
            loss = ?stats.mean_loss,
            "finished training epoch"
        );
        report.epochs = epoch;
        report.batches_applied += stats.applied;
        report.batches_rejected += stats.rejected;
        report.mean_loss = stats.mean_loss;
    }

    report
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

struct EpochStats {
    applied: usize,
    rejected: usize,
    mean_loss: Option<f64>,
}

/// One shuffled pass over the valid samples.
fn run_one_epoch(
    network: &mut Network,
    samples: &[(&[f64], usize)],
    optimizer: &Sgd,
    batch_size: usize,
) -> EpochStats {
    let arch = *network.architecture();
    let mut stats = EpochStats { applied: 0, rejected: 0, mean_loss: None };
    let mut total_loss = 0.0;
    let mut counted = 0usize;

    // Shuffle sample order each epoch.
    let mut indices: Vec<usize> = (0..samples.len()).collect();
    indices.shuffle(&mut rand::thread_rng());

    for batch in indices.chunks(batch_size) {
        let mut grads = Gradients::zeros(&arch);
        let mut batch_loss = 0.0;

        // Accumulate gradients over the mini-batch against the same parameters.
        for &idx in batch {
            let (input, class) = samples[idx];
            batch_loss += accumulate_sample(network, input, class, &mut grads);
        }

        match optimizer.step(network, &grads, batch.len()) {
            Ok(()) => {
                stats.applied += 1;
                total_loss += batch_loss;
                counted += batch.len();
            }
            Err(e) => {
                stats.rejected += 1;
                warn!(batch_len = batch.len(), error = %e, "discarding training batch");
            }
        }
    }

    if counted > 0 {
        stats.mean_loss = Some(total_loss / counted as f64);
    }
    stats
}

/// Backpropagates one sample and adds its gradients to `grads`.
/// Returns the sample's cross-entropy loss before the update.
fn accumulate_sample(network: &Network, input: &[f64], class: usize, grads: &mut Gradients) -> f64 {
    let pass = network.forward_unchecked(input);
    let target = CrossEntropyLoss::one_hot(class, pass.probabilities.len());

    // Output error: ∂L/∂z2 = yhat - y.
    let dz2 = CrossEntropyLoss::derivative(&pass.probabilities, &target);
    grads.w2.add_outer(&dz2, &pass.hidden);
    vector::add_assign(&mut grads.b2, &dz2);

    // Hidden error, gated by the ReLU derivative.
    let dh1 = network.output_layer().weights.transpose_mul_vec(&dz2);
    let dz1 = relu_gate(&dh1, &pass.hidden);
    grads.w1.add_outer(&dz1, input);
    vector::add_assign(&mut grads.b1, &dz1);

    CrossEntropyLoss::loss(&pass.probabilities, &target)
}
