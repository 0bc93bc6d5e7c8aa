//! Little-endian byte-slice primitives shared by every account decoder.
//!
//! Reads are bounds-checked; a field that runs past the buffer is a
//! [`Error::ParseError`] carrying its offset, never a panic.

use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::error::{Error, Result};

fn read_bytes<const N: usize>(data: &[u8], offset: usize, what: &str) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| data.get(offset..end))
        .and_then(|s| s.try_into().ok())
        .ok_or_else(|| Error::ParseError {
            offset,
            reason: format!("slice too short for {what} ({N} bytes)"),
        })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    Ok(Pubkey::from(read_bytes::<32>(data, offset, "Pubkey")?))
}

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    Ok(read_bytes::<1>(data, offset, "u8")?[0])
}

pub(crate) fn read_bool(data: &[u8], offset: usize) -> Result<bool> {
    Ok(read_u8(data, offset)? != 0)
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(read_bytes(data, offset, "u16")?))
}

pub(crate) fn read_i16(data: &[u8], offset: usize) -> Result<i16> {
    Ok(i16::from_le_bytes(read_bytes(data, offset, "i16")?))
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(read_bytes(data, offset, "u32")?))
}

pub(crate) fn read_i32(data: &[u8], offset: usize) -> Result<i32> {
    Ok(i32::from_le_bytes(read_bytes(data, offset, "i32")?))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    Ok(u64::from_le_bytes(read_bytes(data, offset, "u64")?))
}

pub(crate) fn read_i64(data: &[u8], offset: usize) -> Result<i64> {
    Ok(i64::from_le_bytes(read_bytes(data, offset, "i64")?))
}

pub(crate) fn read_array<const N: usize>(data: &[u8], offset: usize) -> Result<[u8; N]> {
    read_bytes(data, offset, "byte array")
}

/// `count` consecutive pubkeys starting at `offset`.
pub(crate) fn read_pubkeys(data: &[u8], offset: usize, count: usize) -> Result<Vec<Pubkey>> {
    (0..count).map(|i| read_pubkey(data, offset + i * 32)).collect()
}

/// `count` consecutive `u64`s starting at `offset`.
pub(crate) fn read_u64s(data: &[u8], offset: usize, count: usize) -> Result<Vec<u64>> {
    (0..count).map(|i| read_u64(data, offset + i * 8)).collect()
}

// ─── Header check ─────────────────────────────────────────────────────────────

/// Reject a buffer shorter than `expected` bytes or whose first 8 bytes are
/// not `disc`. Runs before any field is decoded, so a rejected account never
/// yields a partially filled snapshot.
pub(crate) fn check_header(
    data:     &[u8],
    kind:     &'static str,
    expected: usize,
    disc:     u64,
) -> Result<()> {
    if data.len() < expected {
        debug!(kind, len = data.len(), expected, "account too short");
        return Err(Error::AccountTooShort { kind, len: data.len(), expected });
    }
    let found = read_u64(data, 0)?;
    if found != disc {
        debug!(kind, expected = disc, found, "discriminator mismatch");
        return Err(Error::DiscriminatorMismatch { kind, expected: disc, found });
    }
    Ok(())
}
