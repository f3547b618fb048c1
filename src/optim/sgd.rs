use crate::error::{EngineError, Result};
use crate::network::Network;
use crate::train::Gradients;

pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one SGD update from gradients summed over `batch_len` samples:
    ///   param -= lr * (grad / batch_len)
    ///
    /// All four tensors are updated together or not at all. The update is
    /// rejected with `NumericCorruption` if the gradients or any resulting
    /// parameter are non-finite; the network is then left as it was.
    pub fn step(&self, network: &mut Network, grads: &Gradients, batch_len: usize) -> Result<()> {
        if batch_len == 0 {
            return Ok(());
        }
        let mean = grads.mean(batch_len);
        if !mean.is_finite() {
            return Err(EngineError::NumericCorruption(
                "batch gradient contains non-finite values".to_owned(),
            ));
        }

        let mut hidden = network.hidden_layer().clone();
        let mut output = network.output_layer().clone();
        hidden.apply_gradients(&mean.w1, &mean.b1, self.learning_rate);
        output.apply_gradients(&mean.w2, &mean.b2, self.learning_rate);

        if !(hidden.is_finite() && output.is_finite()) {
            return Err(EngineError::NumericCorruption(
                "update would produce non-finite parameters".to_owned(),
            ));
        }
        network.replace_layers(hidden, output);
        Ok(())
    }
}
