//! 2-token StableSwap pool.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::candle::{read_candles, Candle, DecodedCandle};
use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::{BLOOM_SIZE, OHLCV_24H, OHLCV_7D};
use crate::error::Result;
use crate::math::{get_current_amp, simulate_swap};
use crate::types::SwapDirection;

use super::reader::{
    check_header, read_array, read_bool, read_i64, read_pubkey, read_u32, read_u64, read_u8,
};
use super::AccountKind;

/// Decoded `Pool` account.
///
/// Layout (after the 8-byte discriminator, 916 bytes used of 1024 allocated):
/// ```text
/// authority(32) mint0(32) mint1(32) vault0(32) vault1(32) lp_mint(32)
/// amp(8) init_amp(8) target_amp(8) ramp_start(i64) ramp_stop(i64)
/// fee_bps(8) admin_fee_pct(8) bal0(8) bal1(8) lp_supply(8)
/// admin_fee0(8) admin_fee1(8) vol0(8) vol1(8)
/// paused(1) bump(1) v0_bump(1) v1_bump(1) lp_bump(1) _pad(3)
/// pending_auth(32) auth_time(i64) pending_amp(8) amp_time(i64)
/// trade_count(8) trade_sum(8) max_price(4) min_price(4) hour_slot(4) day_slot(4)
/// hour_idx(1) day_idx(1) _pad(6) bloom(128) hours(24×12) days(7×12)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolState {
    #[serde(with = "pubkey_string")]
    pub authority:     Pubkey,
    #[serde(with = "pubkey_string")]
    pub mint0:         Pubkey,
    #[serde(with = "pubkey_string")]
    pub mint1:         Pubkey,
    #[serde(with = "pubkey_string")]
    pub vault0:        Pubkey,
    #[serde(with = "pubkey_string")]
    pub vault1:        Pubkey,
    #[serde(with = "pubkey_string")]
    pub lp_mint:       Pubkey,
    pub amp:           u64,
    /// Amplification at the start of the current ramp.
    pub init_amp:      u64,
    pub target_amp:    u64,
    pub ramp_start:    i64,
    pub ramp_stop:     i64,
    pub fee_bps:       u64,
    pub admin_fee_pct: u64,
    pub bal0:          u64,
    pub bal1:          u64,
    pub lp_supply:     u64,
    pub admin_fee0:    u64,
    pub admin_fee1:    u64,
    pub vol0:          u64,
    pub vol1:          u64,
    pub paused:        bool,
    pub bump:          u8,
    pub v0_bump:       u8,
    pub v1_bump:       u8,
    pub lp_bump:       u8,
    /// Authority awaiting the commit delay.
    #[serde(with = "pubkey_string")]
    pub pending_auth:  Pubkey,
    pub auth_time:     i64,
    pub pending_amp:   u64,
    pub amp_time:      i64,
    pub trade_count:   u64,
    pub trade_sum:     u64,
    pub max_price:     u32,
    pub min_price:     u32,
    pub hour_slot:     u32,
    pub day_slot:      u32,
    pub hour_idx:      u8,
    pub day_idx:       u8,
    /// Unique-trader bloom filter.
    #[serde(skip)]
    pub bloom:         [u8; BLOOM_SIZE],
    pub hours:         Vec<Candle>,
    pub days:          Vec<Candle>,
}

/// Deserialize a `Pool` account from raw bytes.
pub fn parse_pool(data: &[u8], config: &ProgramConfig) -> Result<PoolState> {
    let kind = AccountKind::Pool;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.pool)?;

    Ok(PoolState {
        authority:     read_pubkey(data, 8)?,
        mint0:         read_pubkey(data, 40)?,
        mint1:         read_pubkey(data, 72)?,
        vault0:        read_pubkey(data, 104)?,
        vault1:        read_pubkey(data, 136)?,
        lp_mint:       read_pubkey(data, 168)?,
        amp:           read_u64(data, 200)?,
        init_amp:      read_u64(data, 208)?,
        target_amp:    read_u64(data, 216)?,
        ramp_start:    read_i64(data, 224)?,
        ramp_stop:     read_i64(data, 232)?,
        fee_bps:       read_u64(data, 240)?,
        admin_fee_pct: read_u64(data, 248)?,
        bal0:          read_u64(data, 256)?,
        bal1:          read_u64(data, 264)?,
        lp_supply:     read_u64(data, 272)?,
        admin_fee0:    read_u64(data, 280)?,
        admin_fee1:    read_u64(data, 288)?,
        vol0:          read_u64(data, 296)?,
        vol1:          read_u64(data, 304)?,
        paused:        read_bool(data, 312)?,
        bump:          read_u8(data, 313)?,
        v0_bump:       read_u8(data, 314)?,
        v1_bump:       read_u8(data, 315)?,
        lp_bump:       read_u8(data, 316)?,
        pending_auth:  read_pubkey(data, 320)?,
        auth_time:     read_i64(data, 352)?,
        pending_amp:   read_u64(data, 360)?,
        amp_time:      read_i64(data, 368)?,
        trade_count:   read_u64(data, 376)?,
        trade_sum:     read_u64(data, 384)?,
        max_price:     read_u32(data, 392)?,
        min_price:     read_u32(data, 396)?,
        hour_slot:     read_u32(data, 400)?,
        day_slot:      read_u32(data, 404)?,
        hour_idx:      read_u8(data, 408)?,
        day_idx:       read_u8(data, 409)?,
        bloom:         read_array(data, 416)?,
        hours:         read_candles(data, 544, OHLCV_24H)?,
        days:          read_candles(data, 832, OHLCV_7D)?,
    })
}

impl PoolState {
    /// Effective amplification at unix time `now`.
    ///
    /// A pool that has never ramped (`ramp_stop == 0`) uses `amp` as stored.
    pub fn current_amp(&self, now: i64) -> u64 {
        if self.ramp_stop == 0 {
            return self.amp;
        }
        get_current_amp(self.init_amp, self.target_amp, self.ramp_start, self.ramp_stop, now)
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a ramp is in progress at `now`.
    pub fn is_ramping(&self, now: i64) -> bool {
        self.ramp_stop != 0 && now > self.ramp_start && now < self.ramp_stop
    }

    pub fn hourly_candles(&self) -> Vec<DecodedCandle> {
        self.hours.iter().map(Candle::decode).collect()
    }

    pub fn daily_candles(&self) -> Vec<DecodedCandle> {
        self.days.iter().map(Candle::decode).collect()
    }

    /// Expected post-fee output for a swap against this snapshot, using the
    /// amplification in effect at `now`. Does not check the pause flag.
    pub fn simulate_swap(&self, direction: SwapDirection, amount_in: u64, now: i64) -> Result<u64> {
        let (bal_in, bal_out) = match direction {
            SwapDirection::ZeroToOne => (self.bal0, self.bal1),
            SwapDirection::OneToZero => (self.bal1, self.bal0),
        };
        simulate_swap(bal_in, bal_out, amount_in, self.current_amp(now), self.fee_bps)
    }
}
