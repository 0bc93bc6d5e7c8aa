//! Program configuration passed explicitly into every decoder.
//!
//! Nothing in the codec reads a global: a [`ProgramConfig`] names the program
//! id and the account tags to match, so fixtures and alternative deployments
//! can swap them without touching the decoders.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::{account_disc, PROGRAM_ID_BYTES};
use crate::error::{Error, Result};

/// 8-byte tag expected at offset 0 of each account kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDiscriminators {
    pub pool:          u64,
    pub npool:         u64,
    pub farm:          u64,
    pub user_farm:     u64,
    pub lottery:       u64,
    pub lottery_entry: u64,
    pub registry:      u64,
    pub gov_proposal:  u64,
    pub gov_vote:      u64,
    pub cl_pool:       u64,
    pub cl_position:   u64,
    pub orderbook:     u64,
    pub ml_brain:      u64,
}

impl Default for AccountDiscriminators {
    fn default() -> Self {
        Self {
            pool:          account_disc::POOL,
            npool:         account_disc::NPOOL,
            farm:          account_disc::FARM,
            user_farm:     account_disc::UFARM,
            lottery:       account_disc::LOTTERY,
            lottery_entry: account_disc::LOTENTRY,
            registry:      account_disc::REGISTRY,
            gov_proposal:  account_disc::GOVPROP,
            gov_vote:      account_disc::GOVVOTE,
            cl_pool:       account_disc::CLPOOL,
            cl_position:   account_disc::CLPOS,
            orderbook:     account_disc::BOOK,
            ml_brain:      account_disc::MLBRAIN,
        }
    }
}

/// Program id plus account tags.
///
/// ```
/// # use aex402_sdk::ProgramConfig;
/// let cfg = ProgramConfig::from_json(r#"{ "discriminators": { "pool": 42 } }"#).unwrap();
/// assert_eq!(cfg.discriminators.pool, 42);
/// assert_eq!(cfg.program_id, ProgramConfig::default().program_id);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgramConfig {
    #[serde(with = "pubkey_string")]
    pub program_id:     Pubkey,
    pub discriminators: AccountDiscriminators,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id:     Pubkey::new_from_array(PROGRAM_ID_BYTES),
            discriminators: AccountDiscriminators::default(),
        }
    }
}

impl ProgramConfig {
    /// Override the program id (useful for locally deployed programs in tests).
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    pub fn with_discriminators(mut self, discriminators: AccountDiscriminators) -> Self {
        self.discriminators = discriminators;
        self
    }

    /// Load from JSON; absent fields keep their production defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }
}

/// Pubkeys travel as base-58 strings in config files and JSON dumps.
pub(crate) mod pubkey_string {
    use super::*;
    use serde::{de, ser::SerializeSeq, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(key: &Pubkey, s: S) -> std::result::Result<S::Ok, S::Error> {
        s.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<Pubkey, D::Error> {
        let raw = String::deserialize(d)?;
        Pubkey::from_str(&raw).map_err(de::Error::custom)
    }

    pub fn serialize_seq<S: Serializer>(keys: &[Pubkey], s: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = s.serialize_seq(Some(keys.len()))?;
        for key in keys {
            seq.serialize_element(&key.to_string())?;
        }
        seq.end()
    }
}
