//! Model weights and their binary blob format.
//!
//! Blob layout, all integers and floats little-endian:
//!
//! ```text
//! magic        4 bytes  "FKMW"
//! version      u16      FORMAT_VERSION
//! reserved     u16      0
//! beg_size     u32
//! mid_size     u32
//! end_size     u32
//! probe_len    u32      leading tokens encoded positionally
//! vocab        u32      must equal VOCAB_SIZE
//! hidden       u32      hidden units
//! label_count  u32
//! labels       label_count x (u16 length, UTF-8 bytes)
//! hidden layer hidden x input_width f32 (row-major), then hidden f32 bias
//! output layer label_count x hidden f32 (row-major), then label_count f32 bias
//! crc32        u32      over every preceding byte
//! ```
//!
//! `input_width` is `probe_len * vocab + vocab`: a one-hot block per probed
//! position followed by a token histogram.

use std::collections::HashSet;
use std::path::Path;

use crate::common::binary::ByteCursor;
use crate::common::error::{Error, Result};
use crate::features::{FeatureLayout, VOCAB_SIZE};

/// Leading bytes of every weight blob.
pub const MAGIC: &[u8; 4] = b"FKMW";

/// Current blob format version.
pub const FORMAT_VERSION: u16 = 1;

const MAX_LABEL_LEN: usize = 255;

/// Largest feature width a model may declare. Every identify call allocates
/// a vector of this many tokens.
pub const MAX_LAYOUT_WIDTH: usize = 8 * FeatureLayout::DEFAULT.width();

/// Largest number of positionally encoded leading tokens.
pub const MAX_PROBE_LEN: usize = 64;

/// Fully connected layer with row-major weights.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    rows: usize,
    cols: usize,
    weights: Vec<f32>,
    bias: Vec<f32>,
}

impl DenseLayer {
    /// Build a layer, checking that the buffers match `rows x cols`.
    pub fn new(rows: usize, cols: usize, weights: Vec<f32>, bias: Vec<f32>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or_else(|| Error::ModelLoad(format!("layer {}x{} overflows", rows, cols)))?;
        if weights.len() != expected {
            return Err(Error::ModelLoad(format!(
                "layer {}x{} expects {} weights, got {}",
                rows,
                cols,
                expected,
                weights.len()
            )));
        }
        if bias.len() != rows {
            return Err(Error::ModelLoad(format!(
                "layer with {} rows expects {} biases, got {}",
                rows,
                rows,
                bias.len()
            )));
        }
        if weights.iter().chain(bias.iter()).any(|v| !v.is_finite()) {
            return Err(Error::ModelLoad("layer contains non-finite values".to_string()));
        }
        Ok(Self {
            rows,
            cols,
            weights,
            bias,
        })
    }

    /// All-zero layer.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            weights: vec![0.0; rows * cols],
            bias: vec![0.0; rows],
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Weights feeding output unit `row`.
    #[inline]
    pub fn row(&self, row: usize) -> &[f32] {
        &self.weights[row * self.cols..(row + 1) * self.cols]
    }

    #[inline]
    pub fn bias(&self) -> &[f32] {
        &self.bias
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: f32) {
        self.weights[row * self.cols + col] = value;
    }

    pub(crate) fn set_bias(&mut self, row: usize, value: f32) {
        self.bias[row] = value;
    }
}

/// Complete parameter set of the classifier network.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelWeights {
    layout: FeatureLayout,
    probe_len: usize,
    labels: Vec<String>,
    hidden: DenseLayer,
    output: DenseLayer,
}

/// Width of the encoded network input for a given probe length.
#[inline]
pub const fn input_width(probe_len: usize) -> usize {
    probe_len * VOCAB_SIZE + VOCAB_SIZE
}

impl ModelWeights {
    /// Assemble weights, checking every shape against the others.
    pub fn new(
        layout: FeatureLayout,
        probe_len: usize,
        labels: Vec<String>,
        hidden: DenseLayer,
        output: DenseLayer,
    ) -> Result<Self> {
        check_dimensions(&layout, probe_len)?;
        if labels.is_empty() {
            return Err(Error::ModelLoad("model has no labels".to_string()));
        }
        let mut seen = HashSet::with_capacity(labels.len());
        for label in &labels {
            if label.is_empty() || label.len() > MAX_LABEL_LEN {
                return Err(Error::ModelLoad(format!("invalid label name {:?}", label)));
            }
            if !seen.insert(label.as_str()) {
                return Err(Error::ModelLoad(format!("duplicate label {:?}", label)));
            }
        }
        if hidden.cols() != input_width(probe_len) {
            return Err(Error::ModelLoad(format!(
                "hidden layer takes {} inputs, encoding produces {}",
                hidden.cols(),
                input_width(probe_len)
            )));
        }
        if output.cols() != hidden.rows() {
            return Err(Error::ModelLoad(format!(
                "output layer takes {} inputs, hidden layer produces {}",
                output.cols(),
                hidden.rows()
            )));
        }
        if u32::try_from(hidden.rows()).is_err() || u32::try_from(labels.len()).is_err() {
            return Err(Error::ModelLoad("model too large for the blob format".to_string()));
        }
        if output.rows() != labels.len() {
            return Err(Error::ModelLoad(format!(
                "output layer has {} units for {} labels",
                output.rows(),
                labels.len()
            )));
        }
        Ok(Self {
            layout,
            probe_len,
            labels,
            hidden,
            output,
        })
    }

    #[inline]
    pub fn layout(&self) -> &FeatureLayout {
        &self.layout
    }

    #[inline]
    pub fn probe_len(&self) -> usize {
        self.probe_len
    }

    /// Output labels in output-unit order.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[inline]
    pub fn hidden(&self) -> &DenseLayer {
        &self.hidden
    }

    #[inline]
    pub fn output(&self) -> &DenseLayer {
        &self.output
    }

    /// Serialize to the blob format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let floats = self.hidden.weights.len()
            + self.hidden.bias.len()
            + self.output.weights.len()
            + self.output.bias.len();
        let mut out = Vec::with_capacity(48 + floats * 4);

        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        for value in [
            self.layout.beg_size,
            self.layout.mid_size,
            self.layout.end_size,
            self.probe_len,
            VOCAB_SIZE,
            self.hidden.rows,
            self.labels.len(),
        ] {
            // Every field is bounded to fit a u32 in `new`.
            let value = u32::try_from(value).unwrap_or(u32::MAX);
            out.extend_from_slice(&value.to_le_bytes());
        }
        for label in &self.labels {
            out.extend_from_slice(&(label.len() as u16).to_le_bytes());
            out.extend_from_slice(label.as_bytes());
        }
        for values in [
            &self.hidden.weights,
            &self.hidden.bias,
            &self.output.weights,
            &self.output.bias,
        ] {
            for v in values.iter() {
                out.extend_from_slice(&v.to_le_bytes());
            }
        }

        let crc = crc32fast::hash(&out);
        out.extend_from_slice(&crc.to_le_bytes());
        out
    }

    /// Parse and validate a blob.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MAGIC.len() + 4 {
            return Err(Error::ModelLoad(format!(
                "weight blob too short ({} bytes)",
                bytes.len()
            )));
        }
        if &bytes[..MAGIC.len()] != MAGIC {
            return Err(Error::ModelLoad("bad weight blob magic".to_string()));
        }

        let (body, crc_bytes) = bytes.split_at(bytes.len() - 4);
        let stored = ByteCursor::new(crc_bytes).read_u32()?;
        let actual = crc32fast::hash(body);
        if stored != actual {
            return Err(Error::ModelLoad(format!(
                "weight blob checksum mismatch (stored {:#010x}, computed {:#010x})",
                stored, actual
            )));
        }

        let mut cursor = ByteCursor::new(body);
        cursor.read_bytes(MAGIC.len())?;
        let version = cursor.read_u16()?;
        if version != FORMAT_VERSION {
            return Err(Error::ModelLoad(format!(
                "unsupported weight format version {}",
                version
            )));
        }
        cursor.read_u16()?;

        let beg_size = cursor.read_u32()? as usize;
        let mid_size = cursor.read_u32()? as usize;
        let end_size = cursor.read_u32()? as usize;
        let probe_len = cursor.read_u32()? as usize;
        let vocab = cursor.read_u32()? as usize;
        let hidden_units = cursor.read_u32()? as usize;
        let label_count = cursor.read_u32()? as usize;

        let layout = FeatureLayout::new(beg_size, mid_size, end_size);
        check_dimensions(&layout, probe_len)?;
        if vocab != VOCAB_SIZE {
            return Err(Error::ModelLoad(format!(
                "model vocabulary {} does not match {}",
                vocab, VOCAB_SIZE
            )));
        }

        // Each label needs at least its length prefix.
        let mut labels = Vec::with_capacity(label_count.min(cursor.remaining() / 2));
        for _ in 0..label_count {
            let len = cursor.read_u16()? as usize;
            let raw = cursor.read_bytes(len)?;
            let label = std::str::from_utf8(raw)
                .map_err(|e| Error::ModelLoad(format!("label is not UTF-8: {}", e)))?;
            labels.push(label.to_string());
        }

        let in_width = probe_len
            .checked_mul(VOCAB_SIZE)
            .and_then(|w| w.checked_add(VOCAB_SIZE))
            .ok_or_else(|| Error::ModelLoad("probe length overflows".to_string()))?;
        let hidden_len = hidden_units
            .checked_mul(in_width)
            .ok_or_else(|| Error::ModelLoad("hidden layer size overflows".to_string()))?;
        let output_len = label_count
            .checked_mul(hidden_units)
            .ok_or_else(|| Error::ModelLoad("output layer size overflows".to_string()))?;

        let hidden_weights = cursor.read_f32_vec(hidden_len)?;
        let hidden_bias = cursor.read_f32_vec(hidden_units)?;
        let output_weights = cursor.read_f32_vec(output_len)?;
        let output_bias = cursor.read_f32_vec(label_count)?;

        if cursor.remaining() != 0 {
            return Err(Error::ModelLoad(format!(
                "{} trailing bytes after output layer",
                cursor.remaining()
            )));
        }

        Self::new(
            layout,
            probe_len,
            labels,
            DenseLayer::new(hidden_units, in_width, hidden_weights, hidden_bias)?,
            DenseLayer::new(label_count, hidden_units, output_weights, output_bias)?,
        )
    }

    /// Read and parse a blob from disk.
    ///
    /// A missing or unreadable file is a load failure, not a file error: the
    /// weights are a resource of the classifier, not caller input.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            Error::ModelLoad(format!("cannot read weights from {}: {}", path.display(), e))
        })?;
        Self::from_bytes(&bytes)
    }
}

/// Reject layouts and probe lengths no session could serve.
fn check_dimensions(layout: &FeatureLayout, probe_len: usize) -> Result<()> {
    let windows = [layout.beg_size, layout.mid_size, layout.end_size];
    if windows.iter().any(|&size| size > MAX_LAYOUT_WIDTH) || layout.width() > MAX_LAYOUT_WIDTH {
        return Err(Error::ModelLoad(format!(
            "feature layout {}/{}/{} exceeds maximum width {}",
            layout.beg_size, layout.mid_size, layout.end_size, MAX_LAYOUT_WIDTH
        )));
    }
    if layout.width() == 0 {
        return Err(Error::ModelLoad("feature layout has zero width".to_string()));
    }
    if probe_len > MAX_PROBE_LEN || probe_len > layout.width() {
        return Err(Error::ModelLoad(format!(
            "probe length {} exceeds feature width {} or maximum {}",
            probe_len,
            layout.width(),
            MAX_PROBE_LEN
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> ModelWeights {
        let layout = FeatureLayout::new(2, 0, 2);
        let hidden = DenseLayer::new(
            2,
            input_width(1),
            (0..2 * input_width(1)).map(|i| i as f32 * 0.01).collect(),
            vec![0.5, -0.5],
        )
        .unwrap();
        let output = DenseLayer::new(3, 2, vec![1.0, 0.0, 0.0, 1.0, -1.0, -1.0], vec![0.0; 3]).unwrap();
        ModelWeights::new(
            layout,
            1,
            vec!["png".into(), "txt".into(), "unknown".into()],
            hidden,
            output,
        )
        .unwrap()
    }

    #[test]
    fn test_blob_round_trip() {
        let weights = tiny();
        let blob = weights.to_bytes();
        assert_eq!(&blob[..4], MAGIC);
        assert_eq!(ModelWeights::from_bytes(&blob).unwrap(), weights);
    }

    #[test]
    fn test_truncated_blob_rejected() {
        let blob = tiny().to_bytes();
        for cut in [0, 3, 7, 20, blob.len() - 1] {
            let err = ModelWeights::from_bytes(&blob[..cut]).unwrap_err();
            assert!(matches!(err, Error::ModelLoad(_)), "cut at {cut}: {err:?}");
        }
    }

    #[test]
    fn test_bad_magic_rejected() {
        let mut blob = tiny().to_bytes();
        blob[0] = b'X';
        assert!(matches!(ModelWeights::from_bytes(&blob), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_corrupted_payload_fails_checksum() {
        let mut blob = tiny().to_bytes();
        let mid = blob.len() / 2;
        blob[mid] ^= 0xFF;
        match ModelWeights::from_bytes(&blob) {
            Err(Error::ModelLoad(msg)) => assert!(msg.contains("checksum")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_unsupported_version_rejected() {
        let mut blob = tiny().to_bytes();
        blob[4] = 9;
        let body_len = blob.len() - 4;
        let crc = crc32fast::hash(&blob[..body_len]);
        blob[body_len..].copy_from_slice(&crc.to_le_bytes());
        match ModelWeights::from_bytes(&blob) {
            Err(Error::ModelLoad(msg)) => assert!(msg.contains("version")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    /// Rewrite a header field and fix up the checksum.
    fn patch_u32(blob: &mut [u8], offset: usize, value: u32) {
        blob[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        let body_len = blob.len() - 4;
        let crc = crc32fast::hash(&blob[..body_len]);
        blob[body_len..].copy_from_slice(&crc.to_le_bytes());
    }

    #[test]
    fn test_oversized_layout_rejected() {
        let err = ModelWeights::new(
            FeatureLayout::new(u32::MAX as usize, u32::MAX as usize, u32::MAX as usize),
            0,
            vec!["txt".into()],
            DenseLayer::zeros(1, input_width(0)),
            DenseLayer::zeros(1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));

        // beg_size sits right after magic, version and reserved.
        let mut blob = tiny().to_bytes();
        patch_u32(&mut blob, 8, u32::MAX);
        match ModelWeights::from_bytes(&blob) {
            Err(Error::ModelLoad(msg)) => assert!(msg.contains("maximum width")),
            other => panic!("unexpected: {other:?}"),
        }

        let mut blob = tiny().to_bytes();
        patch_u32(&mut blob, 8, (MAX_LAYOUT_WIDTH + 1) as u32);
        assert!(matches!(ModelWeights::from_bytes(&blob), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_oversized_probe_rejected() {
        let err = ModelWeights::new(
            FeatureLayout::DEFAULT,
            MAX_PROBE_LEN + 1,
            vec!["txt".into()],
            DenseLayer::zeros(1, input_width(MAX_PROBE_LEN + 1)),
            DenseLayer::zeros(1, 1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));

        let mut blob = tiny().to_bytes();
        patch_u32(&mut blob, 20, u32::MAX);
        assert!(matches!(ModelWeights::from_bytes(&blob), Err(Error::ModelLoad(_))));
    }

    #[test]
    fn test_largest_layout_accepted() {
        let weights = ModelWeights::new(
            FeatureLayout::new(MAX_LAYOUT_WIDTH, 0, 0),
            MAX_PROBE_LEN,
            vec!["txt".into()],
            DenseLayer::zeros(1, input_width(MAX_PROBE_LEN)),
            DenseLayer::zeros(1, 1),
        )
        .unwrap();
        assert_eq!(ModelWeights::from_bytes(&weights.to_bytes()).unwrap(), weights);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let hidden = DenseLayer::zeros(2, input_width(1));
        let output = DenseLayer::zeros(2, 3);
        let err = ModelWeights::new(
            FeatureLayout::new(2, 0, 2),
            1,
            vec!["a".into(), "b".into()],
            hidden,
            output,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        let err = ModelWeights::new(
            FeatureLayout::new(2, 0, 2),
            0,
            vec!["txt".into(), "txt".into()],
            DenseLayer::zeros(1, input_width(0)),
            DenseLayer::zeros(2, 1),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_non_finite_weights_rejected() {
        let err = DenseLayer::new(1, 1, vec![f32::NAN], vec![0.0]).unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }

    #[test]
    fn test_missing_file_is_model_load() {
        let err = ModelWeights::from_file("/no/such/model.fkmw").unwrap_err();
        assert!(matches!(err, Error::ModelLoad(_)));
    }
}
