//! Pool registry: a fixed header followed by a variable-length list of pool ids.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;
use tracing::debug;

use crate::config::{pubkey_string, ProgramConfig};
use crate::error::Result;

use super::reader::{check_header, read_i64, read_pubkey, read_u32};
use super::AccountKind;

/// Offset of the first pool id.
pub const REGISTRY_POOLS_OFFSET: usize = 88;

/// Decoded `Registry` header.
///
/// Layout:
/// ```text
/// disc(8) authority(32) pending_auth(32) auth_time(i64) count(u32) _pad(4)   = 88 bytes
/// pools(count × 32)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryState {
    #[serde(with = "pubkey_string")]
    pub authority:    Pubkey,
    #[serde(with = "pubkey_string")]
    pub pending_auth: Pubkey,
    pub auth_time:    i64,
    /// Number of registered pools.
    pub count:        u32,
}

pub fn parse_registry(data: &[u8], config: &ProgramConfig) -> Result<RegistryState> {
    let kind = AccountKind::Registry;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.registry)?;

    Ok(RegistryState {
        authority:    read_pubkey(data, 8)?,
        pending_auth: read_pubkey(data, 40)?,
        auth_time:    read_i64(data, 72)?,
        count:        read_u32(data, 80)?,
    })
}

/// Read up to `count` pool ids from the registry tail.
///
/// Stops at whichever runs out first, `count` or the buffer; a truncated
/// tail yields fewer ids rather than an error.
pub fn parse_registry_pools(data: &[u8], count: u32) -> Vec<Pubkey> {
    let pools: Vec<Pubkey> = data
        .get(REGISTRY_POOLS_OFFSET..)
        .unwrap_or_default()
        .chunks_exact(32)
        .take(count as usize)
        .filter_map(|chunk| <[u8; 32]>::try_from(chunk).ok().map(Pubkey::from))
        .collect();

    if pools.len() < count as usize {
        debug!(count, read = pools.len(), "registry tail shorter than count");
    }
    pools
}

impl RegistryState {
    /// Pool ids from the same account buffer this header was decoded from.
    pub fn pools(&self, data: &[u8]) -> Vec<Pubkey> {
        parse_registry_pools(data, self.count)
    }
}
