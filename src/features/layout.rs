//! Window geometry for feature extraction.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Sizes of the head, middle and tail windows.
///
/// The feature vector width is the sum of the three sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FeatureLayout {
    pub beg_size: usize,
    pub mid_size: usize,
    pub end_size: usize,
}

impl Default for FeatureLayout {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Byte ranges to sample from an input of a given length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Windows {
    /// The input fits; take all of it and pad.
    Whole(Range<usize>),
    /// The input is longer than the layout width.
    Sampled {
        head: Range<usize>,
        mid: Range<usize>,
        tail: Range<usize>,
    },
}

impl FeatureLayout {
    /// Layout of the built-in model.
    pub const DEFAULT: FeatureLayout = FeatureLayout {
        beg_size: 512,
        mid_size: 512,
        end_size: 512,
    };

    pub const fn new(beg_size: usize, mid_size: usize, end_size: usize) -> Self {
        Self {
            beg_size,
            mid_size,
            end_size,
        }
    }

    /// Length of every feature vector produced with this layout.
    #[inline]
    pub const fn width(&self) -> usize {
        self.beg_size + self.mid_size + self.end_size
    }

    /// Window ranges for an input of `len` bytes.
    ///
    /// The middle window is centered: it starts at `(len - mid_size) / 2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use filekind::features::{FeatureLayout, Windows};
    ///
    /// let layout = FeatureLayout::new(4, 2, 4);
    /// assert_eq!(layout.windows(6), Windows::Whole(0..6));
    /// assert_eq!(
    ///     layout.windows(20),
    ///     Windows::Sampled { head: 0..4, mid: 9..11, tail: 16..20 }
    /// );
    /// ```
    pub fn windows(&self, len: usize) -> Windows {
        if len <= self.width() {
            return Windows::Whole(0..len);
        }
        let mid_start = (len - self.mid_size) / 2;
        Windows::Sampled {
            head: 0..self.beg_size,
            mid: mid_start..mid_start + self.mid_size,
            tail: len - self.end_size..len,
        }
    }
}
