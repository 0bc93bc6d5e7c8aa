//! Q-learning parameter tuner ("ML brain") and its observation ring.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::{ML_NUM_ACTIONS, ML_NUM_STATES};
use crate::error::Result;

use super::reader::{check_header, read_bool, read_i32, read_pubkey, read_u16, read_u32, read_u64, read_u8};
use super::AccountKind;

/// Offset of the first observation record.
pub const ML_OBSERVATIONS_OFFSET: usize = 1144;
/// Size of one observation record.
pub const ML_OBSERVATION_LEN: usize = 24;

const Q_TABLE_OFFSET: usize = 164;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum MlAction {
    Hold     = 0,
    FeeUp    = 1,
    FeeDown  = 2,
    AmpUp    = 3,
    AmpDown  = 4,
    FarmUp   = 5,
    FarmDown = 6,
    LotUp    = 7,
    LotDown  = 8,
}

impl MlAction {
    pub const ALL: [MlAction; ML_NUM_ACTIONS] = [
        Self::Hold,
        Self::FeeUp,
        Self::FeeDown,
        Self::AmpUp,
        Self::AmpDown,
        Self::FarmUp,
        Self::FarmDown,
        Self::LotUp,
        Self::LotDown,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }
}

/// Decoded `MLBrain` header.
///
/// Layout:
/// ```text
/// disc(8) pool(32) authority(32)
/// enabled(1) auto_apply(1) last_action(1) last_state(1) is_stable(1) _pad(3)
/// obs_count(2) train_count(2) epoch(4) last_train_slot(4) last_action_slot(4)
/// cur_alpha(2) cur_epsilon(2) min_fee(2) max_fee(2) min_amp(2) max_amp(2)
/// fee_step(2) amp_step(2) _pad(4)
/// min_farm_rate(8) max_farm_rate(8) farm_step(8)
/// min_lot_price(8) max_lot_price(8) lot_step(8)
/// q_table(27 × 9 × i32) obs_head(2) obs_tail(2) _pad(4)              = 1144 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MlBrainState {
    #[serde(with = "pubkey_string")]
    pub pool:             Pubkey,
    #[serde(with = "pubkey_string")]
    pub authority:        Pubkey,
    pub enabled:          bool,
    pub auto_apply:       bool,
    pub last_action:      u8,
    pub last_state:       u8,
    pub is_stable:        bool,
    pub obs_count:        u16,
    pub train_count:      u16,
    pub epoch:            u32,
    pub last_train_slot:  u32,
    pub last_action_slot: u32,
    /// Learning rate, scaled 1000.
    pub cur_alpha:        u16,
    /// Exploration rate, scaled 1000.
    pub cur_epsilon:      u16,
    pub min_fee:          u16,
    pub max_fee:          u16,
    pub min_amp:          u16,
    pub max_amp:          u16,
    pub fee_step:         u16,
    pub amp_step:         u16,
    pub min_farm_rate:    u64,
    pub max_farm_rate:    u64,
    pub farm_step:        u64,
    pub min_lot_price:    u64,
    pub max_lot_price:    u64,
    pub lot_step:         u64,
    /// Row per state, column per [`MlAction`].
    pub q_table:          Vec<[i32; ML_NUM_ACTIONS]>,
    pub obs_head:         u16,
    pub obs_tail:         u16,
}

pub fn parse_ml_brain(data: &[u8], config: &ProgramConfig) -> Result<MlBrainState> {
    let kind = AccountKind::MlBrain;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.ml_brain)?;

    let mut q_table = Vec::with_capacity(ML_NUM_STATES);
    for state in 0..ML_NUM_STATES {
        let mut row = [0i32; ML_NUM_ACTIONS];
        for (action, q) in row.iter_mut().enumerate() {
            *q = read_i32(data, Q_TABLE_OFFSET + (state * ML_NUM_ACTIONS + action) * 4)?;
        }
        q_table.push(row);
    }

    Ok(MlBrainState {
        pool:             read_pubkey(data, 8)?,
        authority:        read_pubkey(data, 40)?,
        enabled:          read_bool(data, 72)?,
        auto_apply:       read_bool(data, 73)?,
        last_action:      read_u8(data, 74)?,
        last_state:       read_u8(data, 75)?,
        is_stable:        read_bool(data, 76)?,
        obs_count:        read_u16(data, 80)?,
        train_count:      read_u16(data, 82)?,
        epoch:            read_u32(data, 84)?,
        last_train_slot:  read_u32(data, 88)?,
        last_action_slot: read_u32(data, 92)?,
        cur_alpha:        read_u16(data, 96)?,
        cur_epsilon:      read_u16(data, 98)?,
        min_fee:          read_u16(data, 100)?,
        max_fee:          read_u16(data, 102)?,
        min_amp:          read_u16(data, 104)?,
        max_amp:          read_u16(data, 106)?,
        fee_step:         read_u16(data, 108)?,
        amp_step:         read_u16(data, 110)?,
        min_farm_rate:    read_u64(data, 116)?,
        max_farm_rate:    read_u64(data, 124)?,
        farm_step:        read_u64(data, 132)?,
        min_lot_price:    read_u64(data, 140)?,
        max_lot_price:    read_u64(data, 148)?,
        lot_step:         read_u64(data, 156)?,
        q_table,
        obs_head:         read_u16(data, 1136)?,
        obs_tail:         read_u16(data, 1138)?,
    })
}

impl MlBrainState {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_auto_apply(&self) -> bool {
        self.auto_apply
    }

    /// Highest-valued action for `state`; ties go to the lowest action.
    pub fn best_action(&self, state: usize) -> Option<MlAction> {
        let row = self.q_table.get(state)?;
        let mut best = 0;
        for (action, q) in row.iter().enumerate() {
            if *q > row[best] {
                best = action;
            }
        }
        MlAction::from_u8(best as u8)
    }
}

/// One 24-byte observation record.
///
/// Layout: `price(4) volume(4) tvl(4) slot(4) fee_bps(2) amp(2) is_new(1) direction(1) _pad(2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MlObservation {
    /// Scaled 1e6.
    pub price:     u32,
    /// In units of 1e9.
    pub volume:    u32,
    /// In units of 1e9.
    pub tvl:       u32,
    pub slot:      u32,
    pub fee_bps:   u16,
    pub amp:       u16,
    /// Bloom filter saw a trader for the first time.
    pub is_new:    bool,
    /// 0 = token 0 → 1, 1 = token 1 → 0.
    pub direction: u8,
}

impl MlObservation {
    fn read(data: &[u8], offset: usize) -> Result<Self> {
        Ok(Self {
            price:     read_u32(data, offset)?,
            volume:    read_u32(data, offset + 4)?,
            tvl:       read_u32(data, offset + 8)?,
            slot:      read_u32(data, offset + 12)?,
            fee_bps:   read_u16(data, offset + 16)?,
            amp:       read_u16(data, offset + 18)?,
            is_new:    read_bool(data, offset + 20)?,
            direction: read_u8(data, offset + 21)?,
        })
    }
}

/// Read up to `count` observations following the header.
///
/// Same shortfall policy as the registry tail: stops at whichever runs out
/// first, `count` or the buffer.
pub fn parse_ml_observations(data: &[u8], count: usize) -> Vec<MlObservation> {
    let available = data.len().saturating_sub(ML_OBSERVATIONS_OFFSET) / ML_OBSERVATION_LEN;
    let n = count.min(available);
    if n < count {
        debug!(count, read = n, "observation buffer shorter than count");
    }
    (0..n)
        .filter_map(|i| MlObservation::read(data, ML_OBSERVATIONS_OFFSET + i * ML_OBSERVATION_LEN).ok())
        .collect()
}
