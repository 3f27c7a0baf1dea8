//! Feature vector construction from slices and seekable readers.

use std::io::{self, Read, Seek, SeekFrom};

use super::layout::{FeatureLayout, Windows};
use super::PADDING_TOKEN;

/// Fixed-length token sequence fed to the model.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureVector {
    tokens: Vec<u16>,
}

impl FeatureVector {
    /// Wrap raw tokens without validation.
    ///
    /// The model runtime rejects vectors of the wrong width or with tokens
    /// outside the vocabulary, so hand-built vectors are safe to pass in.
    pub fn from_tokens(tokens: Vec<u16>) -> Self {
        Self { tokens }
    }

    #[inline]
    pub fn tokens(&self) -> &[u16] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of positions holding a content byte.
    pub fn content_len(&self) -> usize {
        self.tokens.iter().filter(|&&t| t != PADDING_TOKEN).count()
    }
}

/// Extract features from an in-memory buffer.
///
/// Pure and deterministic: the same bytes and layout always give the same
/// vector, whose length is always `layout.width()`.
///
/// # Examples
///
/// ```
/// use filekind::features::{FeatureLayout, PADDING_TOKEN, extract};
///
/// let layout = FeatureLayout::new(2, 2, 2);
/// let features = extract(b"abc", &layout);
/// assert_eq!(
///     features.tokens(),
///     &[97, 98, 99, PADDING_TOKEN, PADDING_TOKEN, PADDING_TOKEN]
/// );
/// ```
pub fn extract(bytes: &[u8], layout: &FeatureLayout) -> FeatureVector {
    let width = layout.width();
    let mut tokens = Vec::with_capacity(width);

    match layout.windows(bytes.len()) {
        Windows::Whole(range) => push_bytes(&mut tokens, &bytes[range]),
        Windows::Sampled { head, mid, tail } => {
            push_bytes(&mut tokens, &bytes[head]);
            push_bytes(&mut tokens, &bytes[mid]);
            push_bytes(&mut tokens, &bytes[tail]);
        },
    }

    tokens.resize(width, PADDING_TOKEN);
    FeatureVector { tokens }
}

/// Extract features from a seekable source, reading only the sampled windows.
///
/// Produces the same vector as [`extract`] over the full content. The reader
/// is rewound to the start afterwards.
pub fn extract_from_reader<R: Read + Seek>(
    reader: &mut R,
    layout: &FeatureLayout,
) -> io::Result<FeatureVector> {
    let total = reader.seek(SeekFrom::End(0))?;
    let total = usize::try_from(total).map_err(io::Error::other)?;
    let width = layout.width();
    let mut tokens = Vec::with_capacity(width);
    let mut buf = Vec::new();

    match layout.windows(total) {
        Windows::Whole(range) => read_window(reader, range, &mut buf, &mut tokens)?,
        Windows::Sampled { head, mid, tail } => {
            read_window(reader, head, &mut buf, &mut tokens)?;
            read_window(reader, mid, &mut buf, &mut tokens)?;
            read_window(reader, tail, &mut buf, &mut tokens)?;
        },
    }

    reader.seek(SeekFrom::Start(0))?;
    tokens.resize(width, PADDING_TOKEN);
    Ok(FeatureVector { tokens })
}

#[inline]
fn push_bytes(tokens: &mut Vec<u16>, bytes: &[u8]) {
    tokens.extend(bytes.iter().map(|&b| u16::from(b)));
}

fn read_window<R: Read + Seek>(
    reader: &mut R,
    range: std::ops::Range<usize>,
    buf: &mut Vec<u8>,
    tokens: &mut Vec<u16>,
) -> io::Result<()> {
    if range.is_empty() {
        return Ok(());
    }
    reader.seek(SeekFrom::Start(range.start as u64))?;
    buf.clear();
    buf.resize(range.len(), 0);
    reader.read_exact(buf)?;
    push_bytes(tokens, buf);
    Ok(())
}
