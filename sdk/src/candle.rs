//! Delta-encoded OHLCV candles and the packed TWAP oracle result.
//!
//! A candle is 12 bytes on the wire:
//! ```text
//! open u32  high_delta u16  low_delta u16  close_delta i16  volume u16
//! ```
//! Prices are scaled by 1e6; volume is counted in units of 1e9.

use serde::Serialize;

use crate::constants::{PRICE_SCALE, SLOTS_PER_DAY, SLOTS_PER_HOUR, VOLUME_UNIT};
use crate::error::{Error, Result};
use crate::state::reader::{read_i16, read_u16, read_u32};

/// Encoded size of one candle.
pub const CANDLE_LEN: usize = 12;

// ─── Candle ───────────────────────────────────────────────────────────────────

/// A candle exactly as stored on chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Candle {
    pub open:        u32,
    pub high_delta:  u16,
    pub low_delta:   u16,
    pub close_delta: i16,
    pub volume:      u16,
}

impl Candle {
    /// Decode the first 12 bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < CANDLE_LEN {
            return Err(Error::ParseError {
                offset: 0,
                reason: format!("candle is {} bytes; expected {CANDLE_LEN}", data.len()),
            });
        }
        Ok(Self {
            open:        read_u32(data, 0)?,
            high_delta:  read_u16(data, 4)?,
            low_delta:   read_u16(data, 6)?,
            close_delta: read_i16(data, 8)?,
            volume:      read_u16(data, 10)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; CANDLE_LEN] {
        let mut out = [0u8; CANDLE_LEN];
        out[0..4].copy_from_slice(&self.open.to_le_bytes());
        out[4..6].copy_from_slice(&self.high_delta.to_le_bytes());
        out[6..8].copy_from_slice(&self.low_delta.to_le_bytes());
        out[8..10].copy_from_slice(&self.close_delta.to_le_bytes());
        out[10..12].copy_from_slice(&self.volume.to_le_bytes());
        out
    }

    /// `open + high_delta`, saturating at `u32::MAX`.
    pub fn high(&self) -> u32 {
        self.open.saturating_add(self.high_delta as u32)
    }

    /// `open − low_delta`, clamped to zero.
    pub fn low(&self) -> u32 {
        self.open.saturating_sub(self.low_delta as u32)
    }

    /// `open + close_delta` (signed).
    pub fn close(&self) -> i64 {
        self.open as i64 + self.close_delta as i64
    }

    /// Volume in base units (`volume · 1e9`).
    pub fn actual_volume(&self) -> u64 {
        self.volume as u64 * VOLUME_UNIT
    }

    /// Slots the program has not written yet are all zero.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn decode(&self) -> DecodedCandle {
        DecodedCandle {
            open:   self.open,
            high:   self.high(),
            low:    self.low(),
            close:  self.close(),
            volume: self.actual_volume(),
        }
    }
}

/// Absolute OHLCV values of a [`Candle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DecodedCandle {
    pub open:   u32,
    pub high:   u32,
    pub low:    u32,
    pub close:  i64,
    pub volume: u64,
}

impl DecodedCandle {
    pub fn open_f64(&self) -> f64 {
        self.open as f64 / PRICE_SCALE
    }

    pub fn high_f64(&self) -> f64 {
        self.high as f64 / PRICE_SCALE
    }

    pub fn low_f64(&self) -> f64 {
        self.low as f64 / PRICE_SCALE
    }

    pub fn close_f64(&self) -> f64 {
        self.close as f64 / PRICE_SCALE
    }
}

/// Decode `count` consecutive candles starting at `offset`.
pub(crate) fn read_candles(data: &[u8], offset: usize, count: usize) -> Result<Vec<Candle>> {
    (0..count)
        .map(|i| {
            let start = offset + i * CANDLE_LEN;
            let chunk = data.get(start..).ok_or_else(|| Error::ParseError {
                offset: start,
                reason: "candle past end of account".into(),
            })?;
            Candle::from_bytes(chunk).map_err(|_| Error::ParseError {
                offset: start,
                reason: "slice too short for candle (12 bytes)".into(),
            })
        })
        .collect()
}

// ─── Buckets ──────────────────────────────────────────────────────────────────

/// Hourly candle bucket a slot falls in.
pub fn hour_bucket(slot: u64) -> u64 {
    slot / SLOTS_PER_HOUR
}

/// Daily candle bucket a slot falls in.
pub fn day_bucket(slot: u64) -> u64 {
    slot / SLOTS_PER_DAY
}

// ─── TWAP ─────────────────────────────────────────────────────────────────────

/// Averaging window accepted by the program's TWAP query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum TwapWindow {
    Hour1  = 0,
    Hour4  = 1,
    Hour24 = 2,
    Day7   = 3,
}

impl TwapWindow {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Hour1),
            1 => Some(Self::Hour4),
            2 => Some(Self::Hour24),
            3 => Some(Self::Day7),
            _ => None,
        }
    }

    /// Window length in slots.
    pub fn slots(self) -> u64 {
        match self {
            Self::Hour1  => SLOTS_PER_HOUR,
            Self::Hour4  => 4 * SLOTS_PER_HOUR,
            Self::Hour24 => SLOTS_PER_DAY,
            Self::Day7   => 7 * SLOTS_PER_DAY,
        }
    }
}

/// TWAP oracle result, packed into a `u64`:
/// price in bits 0–31, samples in 32–47, confidence (0–10000) in 48–63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwapResult {
    /// Scaled 1e6.
    pub price:      u32,
    /// Candles that contributed.
    pub samples:    u16,
    /// Basis points of 100%.
    pub confidence: u16,
}

impl TwapResult {
    pub fn decode(encoded: u64) -> Self {
        Self {
            price:      (encoded & 0xFFFF_FFFF) as u32,
            samples:    ((encoded >> 32) & 0xFFFF) as u16,
            confidence: ((encoded >> 48) & 0xFFFF) as u16,
        }
    }

    pub fn encode(&self) -> u64 {
        self.price as u64 | (self.samples as u64) << 32 | (self.confidence as u64) << 48
    }

    pub fn price_f64(&self) -> f64 {
        self.price as f64 / PRICE_SCALE
    }

    pub fn confidence_pct(&self) -> f64 {
        self.confidence as f64 / 100.0
    }
}
