//! Little-endian binary readers used by the model weight format.
//!
//! Reads go through `zerocopy` byte-order wrappers so that unaligned input
//! never needs copying into aligned scratch buffers.

use zerocopy::{F32, FromBytes, LE, U16, U32};

/// Binary parsing error type
#[derive(Debug, Clone, PartialEq)]
pub enum BinaryError {
    /// Not enough data to read the requested type
    InsufficientData { expected: usize, available: usize },
    /// Failed to parse the data
    ParseError(String),
}

impl std::fmt::Display for BinaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryError::InsufficientData {
                expected,
                available,
            } => {
                write!(
                    f,
                    "Insufficient data: expected {}, got {}",
                    expected, available
                )
            },
            BinaryError::ParseError(msg) => write!(f, "Parse error: {}", msg),
        }
    }
}

impl std::error::Error for BinaryError {}

/// Result type for binary operations
pub type BinaryResult<T> = Result<T, BinaryError>;

#[inline]
fn check_bounds(data: &[u8], offset: usize, width: usize) -> BinaryResult<()> {
    let end = offset.checked_add(width).ok_or_else(|| {
        BinaryError::ParseError(format!("offset {} overflows", offset))
    })?;
    if end > data.len() {
        return Err(BinaryError::InsufficientData {
            expected: end,
            available: data.len(),
        });
    }
    Ok(())
}

/// Read a little-endian u16 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use filekind::common::binary::read_u16_le;
/// let data = [0x34, 0x12, 0x78, 0x56];
/// assert_eq!(read_u16_le(&data, 0).unwrap(), 0x1234);
/// assert_eq!(read_u16_le(&data, 2).unwrap(), 0x5678);
/// ```
#[inline]
pub fn read_u16_le(data: &[u8], offset: usize) -> BinaryResult<u16> {
    check_bounds(data, offset, 2)?;
    U16::<LE>::read_from_bytes(&data[offset..offset + 2])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u16".to_string()))
}

/// Read a little-endian u32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use filekind::common::binary::read_u32_le;
/// let data = [0x78, 0x56, 0x34, 0x12];
/// assert_eq!(read_u32_le(&data, 0).unwrap(), 0x12345678);
/// ```
#[inline]
pub fn read_u32_le(data: &[u8], offset: usize) -> BinaryResult<u32> {
    check_bounds(data, offset, 4)?;
    U32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read u32".to_string()))
}

/// Read a little-endian f32 from a byte slice at the given offset.
///
/// # Examples
///
/// ```
/// use filekind::common::binary::read_f32_le;
/// let data = [0x00, 0x00, 0x80, 0x3F];
/// assert_eq!(read_f32_le(&data, 0).unwrap(), 1.0);
/// ```
#[inline]
pub fn read_f32_le(data: &[u8], offset: usize) -> BinaryResult<f32> {
    check_bounds(data, offset, 4)?;
    F32::<LE>::read_from_bytes(&data[offset..offset + 4])
        .map(|v| v.get())
        .map_err(|_| BinaryError::ParseError("Failed to read f32".to_string()))
}

/// Forward-only cursor over a byte slice.
///
/// Every read advances the position past the value it returns; a failed read
/// leaves the position unchanged.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset from the start of the slice.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn read_u16(&mut self) -> BinaryResult<u16> {
        let value = read_u16_le(self.data, self.pos)?;
        self.pos += 2;
        Ok(value)
    }

    pub fn read_u32(&mut self) -> BinaryResult<u32> {
        let value = read_u32_le(self.data, self.pos)?;
        self.pos += 4;
        Ok(value)
    }

    pub fn read_bytes(&mut self, len: usize) -> BinaryResult<&'a [u8]> {
        check_bounds(self.data, self.pos, len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Read `count` consecutive little-endian f32 values.
    pub fn read_f32_vec(&mut self, count: usize) -> BinaryResult<Vec<f32>> {
        let width = count
            .checked_mul(4)
            .ok_or_else(|| BinaryError::ParseError(format!("{} floats overflow", count)))?;
        let bytes = self.read_bytes(width)?;
        bytes
            .chunks_exact(4)
            .map(|chunk| {
                F32::<LE>::read_from_bytes(chunk)
                    .map(|v| v.get())
                    .map_err(|_| BinaryError::ParseError("Failed to read f32".to_string()))
            })
            .collect()
    }
}
