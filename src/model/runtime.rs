//! Forward pass over a loaded model.

use std::path::PathBuf;

use super::builtin;
use super::weights::ModelWeights;
use crate::common::error::{Error, Result};
use crate::features::{FeatureLayout, FeatureVector, PADDING_TOKEN, VOCAB_SIZE};

/// Where to load weights from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModelSource {
    /// The network synthesized into this crate.
    #[default]
    Builtin,
    /// A blob file on disk.
    File(PathBuf),
    /// A blob already in memory.
    Bytes(Vec<u8>),
}

/// Probability assigned to one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score<'a> {
    pub label: &'a str,
    pub probability: f32,
}

/// A loaded, immutable model.
///
/// [`infer`](Self::infer) only reads the weights, so one runtime can serve
/// any number of threads at once.
#[derive(Debug)]
pub struct ModelRuntime {
    weights: ModelWeights,
}

impl ModelRuntime {
    /// Load and validate weights. This is the expensive step; do it once and
    /// reuse the runtime.
    pub fn load(source: &ModelSource) -> Result<Self> {
        let weights = match source {
            ModelSource::Builtin => ModelWeights::from_bytes(builtin::blob())?,
            ModelSource::File(path) => ModelWeights::from_file(path)?,
            ModelSource::Bytes(bytes) => ModelWeights::from_bytes(bytes)?,
        };
        tracing::debug!(
            labels = weights.labels().len(),
            hidden = weights.hidden().rows(),
            width = weights.layout().width(),
            "model loaded"
        );
        Ok(Self::from_weights(weights))
    }

    pub fn from_weights(weights: ModelWeights) -> Self {
        Self { weights }
    }

    /// Feature layout the model was built for.
    #[inline]
    pub fn layout(&self) -> &FeatureLayout {
        self.weights.layout()
    }

    /// Every label the model can emit.
    #[inline]
    pub fn labels(&self) -> &[String] {
        self.weights.labels()
    }

    /// Run the network over one feature vector.
    ///
    /// Returns one score per label, sorted by descending probability; exactly
    /// equal probabilities keep output-unit order. Probabilities sum to 1.
    pub fn infer(&self, features: &FeatureVector) -> Result<Vec<Score<'_>>> {
        let tokens = features.tokens();
        let width = self.layout().width();
        if tokens.len() != width {
            return Err(Error::Inference(format!(
                "feature vector has {} tokens, model expects {}",
                tokens.len(),
                width
            )));
        }
        if let Some(&token) = tokens.iter().find(|&&t| usize::from(t) >= VOCAB_SIZE) {
            return Err(Error::Inference(format!(
                "token {} outside vocabulary of {}",
                token, VOCAB_SIZE
            )));
        }

        let hidden = self.hidden_activations(tokens);
        let output = self.weights.output();
        let logits: Vec<f32> = (0..output.rows())
            .map(|row| output.bias()[row] + dot(output.row(row), &hidden))
            .collect();
        let probabilities = softmax(&logits);

        let mut scores: Vec<Score<'_>> = self
            .labels()
            .iter()
            .zip(probabilities)
            .map(|(label, probability)| Score {
                label: label.as_str(),
                probability,
            })
            .collect();
        scores.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(scores)
    }

    fn hidden_activations(&self, tokens: &[u16]) -> Vec<f32> {
        let layer = self.weights.hidden();
        let probe = self.weights.probe_len();
        let histogram = token_histogram(tokens);
        let histogram_offset = probe * VOCAB_SIZE;

        (0..layer.rows())
            .map(|unit| {
                let row = layer.row(unit);
                let positional: f32 = tokens[..probe]
                    .iter()
                    .enumerate()
                    .map(|(pos, &token)| row[pos * VOCAB_SIZE + usize::from(token)])
                    .sum();
                let pre = layer.bias()[unit]
                    + positional
                    + dot(&row[histogram_offset..], &histogram);
                pre.max(0.0)
            })
            .collect()
    }
}

/// Token frequencies: byte bins are relative to the number of content
/// tokens, the padding bin is relative to the whole vector.
fn token_histogram(tokens: &[u16]) -> [f32; VOCAB_SIZE] {
    let mut counts = [0u32; VOCAB_SIZE];
    for &token in tokens {
        counts[usize::from(token)] += 1;
    }

    let padding = counts[usize::from(PADDING_TOKEN)];
    let content = tokens.len() as u32 - padding;
    let mut histogram = [0f32; VOCAB_SIZE];
    if content > 0 {
        for (bin, &count) in histogram.iter_mut().zip(counts.iter()).take(256) {
            *bin = count as f32 / content as f32;
        }
    }
    if !tokens.is_empty() {
        histogram[usize::from(PADDING_TOKEN)] = padding as f32 / tokens.len() as f32;
    }
    histogram
}

#[inline]
fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}
