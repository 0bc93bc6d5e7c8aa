//! Concentrated-liquidity pool and positions.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::{CL_MIN_DURATION, CL_TICK_MIN};
use crate::error::Result;

use super::reader::{check_header, read_array, read_bool, read_i16, read_i64, read_pubkey, read_u64};
use super::AccountKind;

const TICK_BITMAP_LEN: usize = 128;

/// Decoded `CLPool` account.
///
/// Layout:
/// ```text
/// disc(8) pool(32) authority(32) tick_lower(i16) tick_upper(i16) current_tick(i16)
/// initialized(1) _pad(1) sqrt_price(8) liquidity(8) fee_growth_0(8) fee_growth_1(8)
/// tick_bitmap(128) reserved(256)                                     = 496 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClPoolState {
    #[serde(with = "pubkey_string")]
    pub pool:         Pubkey,
    #[serde(with = "pubkey_string")]
    pub authority:    Pubkey,
    pub tick_lower:   i16,
    pub tick_upper:   i16,
    pub current_tick: i16,
    pub initialized:  bool,
    /// √price scaled 1e12.
    pub sqrt_price:   u64,
    pub liquidity:    u64,
    pub fee_growth_0: u64,
    pub fee_growth_1: u64,
    /// One bit per tick, counted from `CL_TICK_MIN`.
    #[serde(skip)]
    pub tick_bitmap:  [u8; TICK_BITMAP_LEN],
}

pub fn parse_cl_pool(data: &[u8], config: &ProgramConfig) -> Result<ClPoolState> {
    let kind = AccountKind::ClPool;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.cl_pool)?;

    Ok(ClPoolState {
        pool:         read_pubkey(data, 8)?,
        authority:    read_pubkey(data, 40)?,
        tick_lower:   read_i16(data, 72)?,
        tick_upper:   read_i16(data, 74)?,
        current_tick: read_i16(data, 76)?,
        initialized:  read_bool(data, 78)?,
        sqrt_price:   read_u64(data, 80)?,
        liquidity:    read_u64(data, 88)?,
        fee_growth_0: read_u64(data, 96)?,
        fee_growth_1: read_u64(data, 104)?,
        tick_bitmap:  read_array(data, 112)?,
    })
}

impl ClPoolState {
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether `tick` is marked in the bitmap. Ticks outside the bitmap are not.
    pub fn is_tick_set(&self, tick: i16) -> bool {
        let Ok(index) = usize::try_from(tick as i32 - CL_TICK_MIN as i32) else {
            return false;
        };
        self.tick_bitmap
            .get(index / 8)
            .is_some_and(|byte| byte & (1 << (index % 8)) != 0)
    }
}

/// Decoded `CLPosition` account.
///
/// Layout:
/// ```text
/// disc(8) owner(32) cl_pool(32) tick_lower(i16) tick_upper(i16) _pad(4)
/// liquidity(8) fee_inside_0(8) fee_inside_1(8) tokens_owed_0(8) tokens_owed_1(8)
/// created_at(i64)                                                    = 128 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClPositionState {
    #[serde(with = "pubkey_string")]
    pub owner:         Pubkey,
    #[serde(with = "pubkey_string")]
    pub cl_pool:       Pubkey,
    pub tick_lower:    i16,
    pub tick_upper:    i16,
    pub liquidity:     u64,
    pub fee_inside_0:  u64,
    pub fee_inside_1:  u64,
    pub tokens_owed_0: u64,
    pub tokens_owed_1: u64,
    pub created_at:    i64,
}

pub fn parse_cl_position(data: &[u8], config: &ProgramConfig) -> Result<ClPositionState> {
    let kind = AccountKind::ClPosition;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.cl_position)?;

    Ok(ClPositionState {
        owner:         read_pubkey(data, 8)?,
        cl_pool:       read_pubkey(data, 40)?,
        tick_lower:    read_i16(data, 72)?,
        tick_upper:    read_i16(data, 74)?,
        liquidity:     read_u64(data, 80)?,
        fee_inside_0:  read_u64(data, 88)?,
        fee_inside_1:  read_u64(data, 96)?,
        tokens_owed_0: read_u64(data, 104)?,
        tokens_owed_1: read_u64(data, 112)?,
        created_at:    read_i64(data, 120)?,
    })
}

impl ClPositionState {
    /// Fees unlock `CL_MIN_DURATION` seconds after the position opens.
    pub fn can_collect_fees(&self, now: i64) -> bool {
        now.saturating_sub(self.created_at) >= CL_MIN_DURATION
    }
}
