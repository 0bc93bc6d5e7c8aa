//! LP farming: the farm and each staker's position.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, ProgramConfig};
use crate::error::Result;
use crate::math::calc_pending_reward;

use super::reader::{check_header, read_i64, read_pubkey, read_u64};
use super::AccountKind;

// ─── Farm ─────────────────────────────────────────────────────────────────────

/// Decoded `Farm` account.
///
/// Layout:
/// ```text
/// disc(8) pool(32) reward_mint(32) reward_rate(8) start_time(i64) end_time(i64)
/// total_staked(8) acc_reward(8) last_update(i64)                  = 120 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FarmState {
    #[serde(with = "pubkey_string")]
    pub pool:         Pubkey,
    #[serde(with = "pubkey_string")]
    pub reward_mint:  Pubkey,
    /// Reward tokens emitted per second.
    pub reward_rate:  u64,
    pub start_time:   i64,
    pub end_time:     i64,
    pub total_staked: u64,
    /// Accumulated reward per staked unit, scaled 1e12.
    pub acc_reward:   u64,
    pub last_update:  i64,
}

pub fn parse_farm(data: &[u8], config: &ProgramConfig) -> Result<FarmState> {
    let kind = AccountKind::Farm;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.farm)?;

    Ok(FarmState {
        pool:         read_pubkey(data, 8)?,
        reward_mint:  read_pubkey(data, 40)?,
        reward_rate:  read_u64(data, 72)?,
        start_time:   read_i64(data, 80)?,
        end_time:     read_i64(data, 88)?,
        total_staked: read_u64(data, 96)?,
        acc_reward:   read_u64(data, 104)?,
        last_update:  read_i64(data, 112)?,
    })
}

impl FarmState {
    /// Inclusive on both ends.
    pub fn is_active(&self, now: i64) -> bool {
        now >= self.start_time && now <= self.end_time
    }
}

// ─── UserFarm ─────────────────────────────────────────────────────────────────

/// Decoded `UserFarm` account.
///
/// Layout:
/// ```text
/// disc(8) owner(32) farm(32) staked(8) reward_debt(8) lock_end(i64) = 96 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserFarmState {
    #[serde(with = "pubkey_string")]
    pub owner:       Pubkey,
    #[serde(with = "pubkey_string")]
    pub farm:        Pubkey,
    pub staked:      u64,
    pub reward_debt: u64,
    pub lock_end:    i64,
}

pub fn parse_user_farm(data: &[u8], config: &ProgramConfig) -> Result<UserFarmState> {
    let kind = AccountKind::UserFarm;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.user_farm)?;

    Ok(UserFarmState {
        owner:       read_pubkey(data, 8)?,
        farm:        read_pubkey(data, 40)?,
        staked:      read_u64(data, 72)?,
        reward_debt: read_u64(data, 80)?,
        lock_end:    read_i64(data, 88)?,
    })
}

impl UserFarmState {
    pub fn is_locked(&self, now: i64) -> bool {
        now < self.lock_end
    }

    /// Rewards claimable against the farm's current accumulator.
    pub fn pending_reward(&self, farm: &FarmState) -> u64 {
        calc_pending_reward(self.staked, farm.acc_reward, self.reward_debt)
    }
}
