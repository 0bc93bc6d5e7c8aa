//! N-token StableSwap pool (2 to 8 tokens).

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::MAX_TOKENS;
use crate::error::{Error, Result};
use crate::math::simulate_swap_n;

use super::reader::{check_header, read_bool, read_pubkey, read_pubkeys, read_u64, read_u64s, read_u8};
use super::AccountKind;

/// Decoded `NPool` account.
///
/// The on-chain arrays always hold 8 slots; only the first `n_tokens` are
/// kept here, so every vector has exactly `n_tokens` entries.
///
/// Layout:
/// ```text
/// disc(8) authority(32) n_tokens(1) paused(1) bump(1) _pad(5)
/// amp(8) fee_bps(8) admin_fee_pct(8) lp_supply(8)
/// mints(8×32) vaults(8×32) lp_mint(32) balances(8×8) admin_fees(8×8)
/// total_volume(8) trade_count(8) last_trade_slot(8)            = 776 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NPoolState {
    #[serde(with = "pubkey_string")]
    pub authority:       Pubkey,
    pub n_tokens:        u8,
    pub paused:          bool,
    pub bump:            u8,
    pub amp:             u64,
    pub fee_bps:         u64,
    pub admin_fee_pct:   u64,
    pub lp_supply:       u64,
    #[serde(serialize_with = "pubkey_string::serialize_seq")]
    pub mints:           Vec<Pubkey>,
    #[serde(serialize_with = "pubkey_string::serialize_seq")]
    pub vaults:          Vec<Pubkey>,
    #[serde(with = "pubkey_string")]
    pub lp_mint:         Pubkey,
    pub balances:        Vec<u64>,
    pub admin_fees:      Vec<u64>,
    pub total_volume:    u64,
    pub trade_count:     u64,
    pub last_trade_slot: u64,
}

/// Deserialize an `NPool` account from raw bytes.
///
/// Fails with [`Error::InvalidTokenCount`] if `n_tokens` is outside `2..=8`.
pub fn parse_npool(data: &[u8], config: &ProgramConfig) -> Result<NPoolState> {
    let kind = AccountKind::NPool;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.npool)?;

    let n_tokens = read_u8(data, 40)?;
    if !(2..=MAX_TOKENS).contains(&(n_tokens as usize)) {
        debug!(n_tokens, "npool: invalid token count");
        return Err(Error::InvalidTokenCount(n_tokens));
    }
    let n = n_tokens as usize;

    Ok(NPoolState {
        authority:       read_pubkey(data, 8)?,
        n_tokens,
        paused:          read_bool(data, 41)?,
        bump:            read_u8(data, 42)?,
        amp:             read_u64(data, 48)?,
        fee_bps:         read_u64(data, 56)?,
        admin_fee_pct:   read_u64(data, 64)?,
        lp_supply:       read_u64(data, 72)?,
        mints:           read_pubkeys(data, 80, n)?,
        vaults:          read_pubkeys(data, 336, n)?,
        lp_mint:         read_pubkey(data, 592)?,
        balances:        read_u64s(data, 624, n)?,
        admin_fees:      read_u64s(data, 688, n)?,
        total_volume:    read_u64(data, 752)?,
        trade_count:     read_u64(data, 760)?,
        last_trade_slot: read_u64(data, 768)?,
    })
}

impl NPoolState {
    /// Balances of the active tokens.
    pub fn balances(&self) -> &[u64] {
        &self.balances
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Index of `mint` among the pool's tokens.
    pub fn token_index(&self, mint: &Pubkey) -> Option<usize> {
        self.mints.iter().position(|m| m == mint)
    }

    /// Expected post-fee output for swapping `amount_in` of token `from_idx`
    /// into token `to_idx`. Does not check the pause flag.
    pub fn simulate_swap(&self, from_idx: usize, to_idx: usize, amount_in: u64) -> Result<u64> {
        simulate_swap_n(&self.balances, from_idx, to_idx, amount_in, self.amp, self.fee_bps)
    }
}
