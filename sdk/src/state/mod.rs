//! On-chain account deserialization.
//!
//! Every decoder checks the buffer length and the 8-byte discriminator
//! before reading a single field, so a rejected buffer never produces a
//! partially filled snapshot. Offsets mirror the program's packed
//! little-endian layouts exactly; trailing bytes beyond a layout (allocation
//! slack) are ignored.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, AccountDiscriminators, ProgramConfig};
use crate::constants::ML_OBS_MAX;
use crate::error::Result;

pub mod cl;
pub mod farm;
pub mod governance;
pub mod lottery;
pub mod ml;
pub mod npool;
pub mod orderbook;
pub mod pool;
pub(crate) mod reader;
pub mod registry;

pub use cl::{parse_cl_pool, parse_cl_position, ClPoolState, ClPositionState};
pub use farm::{parse_farm, parse_user_farm, FarmState, UserFarmState};
pub use governance::{
    parse_gov_proposal, parse_gov_vote, GovProposalState, GovVoteState, ProposalStatus,
    ProposalType,
};
pub use lottery::{parse_lottery, parse_lottery_entry, LotteryEntryState, LotteryState};
pub use ml::{parse_ml_brain, parse_ml_observations, MlAction, MlBrainState, MlObservation};
pub use npool::{parse_npool, NPoolState};
pub use orderbook::{parse_orderbook, Order, OrderSide, OrderbookState};
pub use pool::{parse_pool, PoolState};
pub use registry::{parse_registry, parse_registry_pools, RegistryState};

// ─── Account kinds ────────────────────────────────────────────────────────────

/// Account kinds owned by the program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AccountKind {
    Pool,
    NPool,
    Farm,
    UserFarm,
    Lottery,
    LotteryEntry,
    Registry,
    GovProposal,
    GovVote,
    ClPool,
    ClPosition,
    Orderbook,
    MlBrain,
    Unknown,
}

impl AccountKind {
    /// Every known kind, in discriminator-table order.
    pub const KNOWN: [AccountKind; 13] = [
        Self::Pool,
        Self::NPool,
        Self::Farm,
        Self::UserFarm,
        Self::Lottery,
        Self::LotteryEntry,
        Self::Registry,
        Self::GovProposal,
        Self::GovVote,
        Self::ClPool,
        Self::ClPosition,
        Self::Orderbook,
        Self::MlBrain,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Pool         => "Pool",
            Self::NPool        => "NPool",
            Self::Farm         => "Farm",
            Self::UserFarm     => "UserFarm",
            Self::Lottery      => "Lottery",
            Self::LotteryEntry => "LotteryEntry",
            Self::Registry     => "Registry",
            Self::GovProposal  => "GovProposal",
            Self::GovVote      => "GovVote",
            Self::ClPool       => "CLPool",
            Self::ClPosition   => "CLPosition",
            Self::Orderbook    => "Orderbook",
            Self::MlBrain      => "MLBrain",
            Self::Unknown      => "Unknown",
        }
    }

    /// Bytes the decoder reads. Registry and MLBrain count the fixed header
    /// only; their tails are parsed separately.
    pub const fn min_len(self) -> usize {
        match self {
            Self::Pool         => 916,
            Self::NPool        => 776,
            Self::Farm         => 120,
            Self::UserFarm     => 96,
            Self::Lottery      => 152,
            Self::LotteryEntry => 88,
            Self::Registry     => 88,
            Self::GovProposal  => 200,
            Self::GovVote      => 88,
            Self::ClPool       => 496,
            Self::ClPosition   => 128,
            Self::Orderbook    => 4176,
            Self::MlBrain      => 1144,
            Self::Unknown      => 8,
        }
    }

    /// Tag this kind carries under `discriminators`; `None` for `Unknown`.
    pub fn discriminator(self, discriminators: &AccountDiscriminators) -> Option<u64> {
        let d = discriminators;
        Some(match self {
            Self::Pool         => d.pool,
            Self::NPool        => d.npool,
            Self::Farm         => d.farm,
            Self::UserFarm     => d.user_farm,
            Self::Lottery      => d.lottery,
            Self::LotteryEntry => d.lottery_entry,
            Self::Registry     => d.registry,
            Self::GovProposal  => d.gov_proposal,
            Self::GovVote      => d.gov_vote,
            Self::ClPool       => d.cl_pool,
            Self::ClPosition   => d.cl_position,
            Self::Orderbook    => d.orderbook,
            Self::MlBrain      => d.ml_brain,
            Self::Unknown      => return None,
        })
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify an account by its first 8 bytes alone.
///
/// Anything shorter than 8 bytes or carrying an unrecognised tag is
/// [`AccountKind::Unknown`]. The rest of the buffer is not inspected, so a
/// recognised kind may still fail to decode.
pub fn detect_account_type(data: &[u8], config: &ProgramConfig) -> AccountKind {
    let Ok(disc) = reader::read_u64(data, 0) else {
        return AccountKind::Unknown;
    };
    AccountKind::KNOWN
        .into_iter()
        .find(|kind| kind.discriminator(&config.discriminators) == Some(disc))
        .unwrap_or(AccountKind::Unknown)
}

// ─── Any account ──────────────────────────────────────────────────────────────

/// A fully decoded account of any known kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum AccountState {
    Pool(PoolState),
    NPool(NPoolState),
    Farm(FarmState),
    UserFarm(UserFarmState),
    Lottery(LotteryState),
    LotteryEntry(LotteryEntryState),
    Registry {
        header: RegistryState,
        #[serde(serialize_with = "pubkey_string::serialize_seq")]
        pools:  Vec<Pubkey>,
    },
    GovProposal(GovProposalState),
    GovVote(GovVoteState),
    #[serde(rename = "CLPool")]
    ClPool(ClPoolState),
    #[serde(rename = "CLPosition")]
    ClPosition(ClPositionState),
    Orderbook(OrderbookState),
    #[serde(rename = "MLBrain")]
    MlBrain {
        brain:        MlBrainState,
        observations: Vec<MlObservation>,
    },
}

impl AccountState {
    pub fn kind(&self) -> AccountKind {
        match self {
            Self::Pool(_)             => AccountKind::Pool,
            Self::NPool(_)            => AccountKind::NPool,
            Self::Farm(_)             => AccountKind::Farm,
            Self::UserFarm(_)         => AccountKind::UserFarm,
            Self::Lottery(_)          => AccountKind::Lottery,
            Self::LotteryEntry(_)     => AccountKind::LotteryEntry,
            Self::Registry { .. }     => AccountKind::Registry,
            Self::GovProposal(_)      => AccountKind::GovProposal,
            Self::GovVote(_)          => AccountKind::GovVote,
            Self::ClPool(_)           => AccountKind::ClPool,
            Self::ClPosition(_)       => AccountKind::ClPosition,
            Self::Orderbook(_)        => AccountKind::Orderbook,
            Self::MlBrain { .. }      => AccountKind::MlBrain,
        }
    }
}

/// Detect the kind of `data` and decode it, including the registry and
/// observation tails. Returns `Ok(None)` for an unrecognised account.
pub fn decode_account(data: &[u8], config: &ProgramConfig) -> Result<Option<AccountState>> {
    let state = match detect_account_type(data, config) {
        AccountKind::Pool         => AccountState::Pool(parse_pool(data, config)?),
        AccountKind::NPool        => AccountState::NPool(parse_npool(data, config)?),
        AccountKind::Farm         => AccountState::Farm(parse_farm(data, config)?),
        AccountKind::UserFarm     => AccountState::UserFarm(parse_user_farm(data, config)?),
        AccountKind::Lottery      => AccountState::Lottery(parse_lottery(data, config)?),
        AccountKind::LotteryEntry => AccountState::LotteryEntry(parse_lottery_entry(data, config)?),
        AccountKind::Registry     => {
            let header = parse_registry(data, config)?;
            let pools = header.pools(data);
            AccountState::Registry { header, pools }
        }
        AccountKind::GovProposal  => AccountState::GovProposal(parse_gov_proposal(data, config)?),
        AccountKind::GovVote      => AccountState::GovVote(parse_gov_vote(data, config)?),
        AccountKind::ClPool       => AccountState::ClPool(parse_cl_pool(data, config)?),
        AccountKind::ClPosition   => AccountState::ClPosition(parse_cl_position(data, config)?),
        AccountKind::Orderbook    => AccountState::Orderbook(parse_orderbook(data, config)?),
        AccountKind::MlBrain      => {
            let brain = parse_ml_brain(data, config)?;
            let count = (brain.obs_count as usize).min(ML_OBS_MAX);
            let observations = parse_ml_observations(data, count);
            AccountState::MlBrain { brain, observations }
        }
        AccountKind::Unknown      => return Ok(None),
    };
    Ok(Some(state))
}
