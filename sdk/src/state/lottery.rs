//! LP-token lottery and ticket entries.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::config::{pubkey_string, ProgramConfig};
use crate::error::Result;

use super::reader::{check_header, read_bool, read_i64, read_pubkey, read_u64};
use super::AccountKind;

/// Decoded `Lottery` account.
///
/// Layout:
/// ```text
/// disc(8) pool(32) authority(32) lottery_vault(32) ticket_price(8)
/// total_tickets(8) prize_pool(8) end_time(i64) winning_ticket(8)
/// drawn(1) claimed(1) _pad(6)                                      = 152 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotteryState {
    #[serde(with = "pubkey_string")]
    pub pool:           Pubkey,
    #[serde(with = "pubkey_string")]
    pub authority:      Pubkey,
    #[serde(with = "pubkey_string")]
    pub lottery_vault:  Pubkey,
    /// LP tokens per ticket.
    pub ticket_price:   u64,
    pub total_tickets:  u64,
    pub prize_pool:     u64,
    pub end_time:       i64,
    /// Meaningful only once `drawn` is set.
    pub winning_ticket: u64,
    pub drawn:          bool,
    pub claimed:        bool,
}

pub fn parse_lottery(data: &[u8], config: &ProgramConfig) -> Result<LotteryState> {
    let kind = AccountKind::Lottery;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.lottery)?;

    Ok(LotteryState {
        pool:           read_pubkey(data, 8)?,
        authority:      read_pubkey(data, 40)?,
        lottery_vault:  read_pubkey(data, 72)?,
        ticket_price:   read_u64(data, 104)?,
        total_tickets:  read_u64(data, 112)?,
        prize_pool:     read_u64(data, 120)?,
        end_time:       read_i64(data, 128)?,
        winning_ticket: read_u64(data, 136)?,
        drawn:          read_bool(data, 144)?,
        claimed:        read_bool(data, 145)?,
    })
}

impl LotteryState {
    pub fn is_drawn(&self) -> bool {
        self.drawn
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed
    }

    pub fn is_ended(&self, now: i64) -> bool {
        now >= self.end_time
    }
}

/// Decoded `LotteryEntry` account: a contiguous block of tickets.
///
/// Layout: `disc(8) owner(32) lottery(32) ticket_start(8) ticket_count(8)` = 88 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LotteryEntryState {
    #[serde(with = "pubkey_string")]
    pub owner:        Pubkey,
    #[serde(with = "pubkey_string")]
    pub lottery:      Pubkey,
    pub ticket_start: u64,
    pub ticket_count: u64,
}

pub fn parse_lottery_entry(data: &[u8], config: &ProgramConfig) -> Result<LotteryEntryState> {
    let kind = AccountKind::LotteryEntry;
    check_header(data, kind.name(), kind.min_len(), config.discriminators.lottery_entry)?;

    Ok(LotteryEntryState {
        owner:        read_pubkey(data, 8)?,
        lottery:      read_pubkey(data, 40)?,
        ticket_start: read_u64(data, 72)?,
        ticket_count: read_u64(data, 80)?,
    })
}

impl LotteryEntryState {
    /// Whether `ticket` falls in `[ticket_start, ticket_start + ticket_count)`.
    pub fn is_winner(&self, ticket: u64) -> bool {
        ticket >= self.ticket_start && ticket - self.ticket_start < self.ticket_count
    }
}
