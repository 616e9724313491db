//! Little-endian field access on a raw byte buffer.
//!
//! Every header field read or patched anywhere in the crate goes through these helpers.
use crate::error::{WavEditError, WavEditResult};

#[inline(always)]
fn field<const N: usize>(bytes: &[u8], offset: usize) -> WavEditResult<[u8; N]> {
    let end = offset.checked_add(N).ok_or(WavEditError::OffsetOutOfRange {
        offset,
        limit: bytes.len(),
    })?;
    match bytes.get(offset..end) {
        Some(slice) => {
            let mut buf = [0; N];
            buf.copy_from_slice(slice);
            Ok(buf)
        }
        None => Err(WavEditError::OffsetOutOfRange {
            offset,
            limit: bytes.len(),
        }),
    }
}

/// Reads a four character chunk tag. Tags are compared byte for byte, never as numbers.
#[inline(always)]
pub fn read_tag(bytes: &[u8], offset: usize) -> WavEditResult<[u8; 4]> {
    field::<4>(bytes, offset)
}

#[inline(always)]
pub fn read_u16_le(bytes: &[u8], offset: usize) -> WavEditResult<u16> {
    field::<2>(bytes, offset).map(u16::from_le_bytes)
}

#[inline(always)]
pub fn read_u32_le(bytes: &[u8], offset: usize) -> WavEditResult<u32> {
    field::<4>(bytes, offset).map(u32::from_le_bytes)
}

/// Overwrites the four bytes at `offset` with `value` in little-endian order.
pub fn write_u32_le(bytes: &mut [u8], offset: usize, value: u32) -> WavEditResult<()> {
    let limit = bytes.len();
    match offset
        .checked_add(4)
        .and_then(|end| bytes.get_mut(offset..end))
    {
        Some(slice) => {
            slice.copy_from_slice(&value.to_le_bytes());
            Ok(())
        }
        None => Err(WavEditError::OffsetOutOfRange { offset, limit }),
    }
}
