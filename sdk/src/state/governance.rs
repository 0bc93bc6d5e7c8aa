//! LP-weighted governance: proposals and vote records.
//!
//! A proposal starts in [`ProposalStatus::Voting`]. Only a `Passed` proposal
//! whose timelock has elapsed may be executed; `Rejected`, `Executed` and
//! `Cancelled` are terminal. The program drives every transition; this
//! module only evaluates snapshots.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, ProgramConfig};
use crate::constants::{FEE_DENOMINATOR, GOV_QUORUM_BPS, GOV_THRESHOLD_BPS};
use crate::error::Result;

use super::reader::{check_header, read_array, read_bool, read_i64, read_pubkey, read_u64, read_u8};
use super::AccountKind;

// ─── Enums ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ProposalType {
    FeeChange  = 1,
    AmpChange  = 2,
    AdminFee   = 3,
    Pause      = 4,
    Authority  = 5,
}

impl ProposalType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::FeeChange),
            2 => Some(Self::AmpChange),
            3 => Some(Self::AdminFee),
            4 => Some(Self::Pause),
            5 => Some(Self::Authority),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u8)]
pub enum ProposalStatus {
    Voting    = 0,
    Passed    = 1,
    Rejected  = 2,
    Executed  = 3,
    Cancelled = 4,
}

impl ProposalStatus {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Voting),
            1 => Some(Self::Passed),
            2 => Some(Self::Rejected),
            3 => Some(Self::Executed),
            4 => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// No further transition is possible.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Executed | Self::Cancelled)
    }
}

// ─── Proposal ─────────────────────────────────────────────────────────────────

/// Decoded `GovProposal` account.
///
/// Layout:
/// ```text
/// disc(8) pool(32) proposer(32) prop_type(1) status(1) _pad(6)
/// value(8) votes_for(8) votes_against(8) lp_snapshot(8)
/// start_slot(i64) end_slot(i64) exec_after(i64) description(64)   = 200 bytes
/// ```
///
/// `prop_type` and `status` keep their raw bytes so that an unknown value
/// still decodes; see [`GovProposalState::status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GovProposalState {
    #[serde(with = "pubkey_string")]
    pub pool:          Pubkey,
    #[serde(with = "pubkey_string")]
    pub proposer:      Pubkey,
    pub prop_type:     u8,
    pub status:        u8,
    /// New parameter value (fee bps, amp, ...).
    pub value:         u64,
    pub votes_for:     u64,
    pub votes_against: u64,
    /// LP supply when the proposal was created.
    pub lp_snapshot:   u64,
    pub start_slot:    i64,
    pub end_slot:      i64,
    /// Earliest slot at which a passed proposal may execute.
    pub exec_after:    i64,
    /// NUL-padded UTF-8.
    pub description:   String,
}

pub fn parse_gov_proposal(data: &[u8], config: &ProgramConfig) -> Result<GovProposalState> {
    let kind = AccountKind::GovProposal;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.gov_proposal)?;

    let raw: [u8; 64] = read_array(data, 136)?;
    let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());

    Ok(GovProposalState {
        pool:          read_pubkey(data, 8)?,
        proposer:      read_pubkey(data, 40)?,
        prop_type:     read_u8(data, 72)?,
        status:        read_u8(data, 73)?,
        value:         read_u64(data, 80)?,
        votes_for:     read_u64(data, 88)?,
        votes_against: read_u64(data, 96)?,
        lp_snapshot:   read_u64(data, 104)?,
        start_slot:    read_i64(data, 112)?,
        end_slot:      read_i64(data, 120)?,
        exec_after:    read_i64(data, 128)?,
        description:   String::from_utf8_lossy(&raw[..end]).into_owned(),
    })
}

impl GovProposalState {
    pub fn status(&self) -> Option<ProposalStatus> {
        ProposalStatus::from_u8(self.status)
    }

    pub fn proposal_type(&self) -> Option<ProposalType> {
        ProposalType::from_u8(self.prop_type)
    }

    /// Passed and past the timelock.
    pub fn can_execute(&self, now_slot: i64) -> bool {
        self.status() == Some(ProposalStatus::Passed) && now_slot >= self.exec_after
    }

    fn total_votes(&self) -> u128 {
        self.votes_for as u128 + self.votes_against as u128
    }

    /// Share of cast votes in favour, `0.0` when nobody has voted.
    pub fn approval_rate(&self) -> f64 {
        let total = self.total_votes();
        if total == 0 {
            return 0.0;
        }
        self.votes_for as f64 / total as f64
    }

    /// Cast votes as a share of the LP snapshot, `0.0` for an empty snapshot.
    pub fn quorum_rate(&self) -> f64 {
        if self.lp_snapshot == 0 {
            return 0.0;
        }
        self.total_votes() as f64 / self.lp_snapshot as f64
    }

    /// At least `GOV_QUORUM_BPS` of the snapshot has voted.
    pub fn reached_quorum(&self) -> bool {
        self.lp_snapshot != 0
            && self.total_votes() * FEE_DENOMINATOR as u128
                >= self.lp_snapshot as u128 * GOV_QUORUM_BPS as u128
    }

    /// More than `GOV_THRESHOLD_BPS` of cast votes are in favour.
    pub fn passes_threshold(&self) -> bool {
        let total = self.total_votes();
        total != 0
            && self.votes_for as u128 * FEE_DENOMINATOR as u128 > total * GOV_THRESHOLD_BPS as u128
    }
}

// ─── Vote ─────────────────────────────────────────────────────────────────────

/// Decoded `GovVote` account.
///
/// Layout: `disc(8) proposal(32) voter(32) amount(8) vote_for(1) _pad(7)` = 88 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GovVoteState {
    #[serde(with = "pubkey_string")]
    pub proposal: Pubkey,
    #[serde(with = "pubkey_string")]
    pub voter:    Pubkey,
    /// LP tokens committed.
    pub amount:   u64,
    pub vote_for: bool,
}

pub fn parse_gov_vote(data: &[u8], config: &ProgramConfig) -> Result<GovVoteState> {
    let kind = AccountKind::GovVote;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.gov_vote)?;

    Ok(GovVoteState {
        proposal: read_pubkey(data, 8)?,
        voter:    read_pubkey(data, 40)?,
        amount:   read_u64(data, 72)?,
        vote_for: read_bool(data, 80)?,
    })
}

impl GovVoteState {
    pub fn voted_for(&self) -> bool {
        self.vote_for
    }
}
