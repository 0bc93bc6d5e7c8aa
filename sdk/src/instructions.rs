//! Instruction classification.
//!
//! Every instruction starts with an 8-byte little-endian discriminator
//! followed by fixed-width little-endian arguments. Only the discriminator is
//! interpreted here; building instruction payloads is left to the caller.

use serde::Serialize;

use crate::constants::ix_disc;

/// Program instructions, grouped as in [`ix_disc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InstructionKind {
    CreatePool,
    CreatePoolN,
    InitToken0Vault,
    InitToken1Vault,
    InitLpMint,
    Swap,
    SwapT0T1,
    SwapT1T0,
    SwapN,
    MigrateT0T1,
    MigrateT1T0,
    AddLiquidity,
    AddLiquiditySingle,
    AddLiquidityN,
    RemoveLiquidity,
    RemoveLiquidityN,
    SetPause,
    UpdateFee,
    WithdrawFee,
    CommitAmp,
    RampAmp,
    StopRamp,
    InitAuthorityTransfer,
    CompleteAuthorityTransfer,
    CancelAuthorityTransfer,
    CreateFarm,
    StakeLp,
    UnstakeLp,
    ClaimFarm,
    LockLp,
    ClaimUnlockedLp,
    CreateLottery,
    EnterLottery,
    DrawLottery,
    ClaimLottery,
    InitRegistry,
    RegisterPool,
    UnregisterPool,
    InitRegistryAuthorityTransfer,
    CompleteRegistryAuthorityTransfer,
    CancelRegistryAuthorityTransfer,
    GetTwap,
    SetOracle,
    SetCircuitBreaker,
    ResetCircuitBreaker,
    SetRateLimit,
    GovPropose,
    GovVote,
    GovExecute,
    GovCancel,
    InitOrderbook,
    PlaceOrder,
    CancelOrder,
    FillOrder,
    InitClPool,
    ClMint,
    ClBurn,
    ClCollect,
    ClSwap,
    FlashLoan,
    FlashRepay,
    Multihop,
    InitMlBrain,
    ConfigMlBrain,
    TrainMl,
    ApplyMl,
    LogMlState,
    TransferHookExecute,
    TransferHookInit,
    Unknown,
}

/// Discriminator → kind.
pub const INSTRUCTION_TABLE: [(u64, InstructionKind); 69] = [
    (ix_disc::CREATEPOOL, InstructionKind::CreatePool),
    (ix_disc::CREATEPN,   InstructionKind::CreatePoolN),
    (ix_disc::INITT0V,    InstructionKind::InitToken0Vault),
    (ix_disc::INITT1V,    InstructionKind::InitToken1Vault),
    (ix_disc::INITLPM,    InstructionKind::InitLpMint),
    (ix_disc::SWAP,       InstructionKind::Swap),
    (ix_disc::SWAPT0T1,   InstructionKind::SwapT0T1),
    (ix_disc::SWAPT1T0,   InstructionKind::SwapT1T0),
    (ix_disc::SWAPN,      InstructionKind::SwapN),
    (ix_disc::MIGT0T1,    InstructionKind::MigrateT0T1),
    (ix_disc::MIGT1T0,    InstructionKind::MigrateT1T0),
    (ix_disc::ADDLIQ,     InstructionKind::AddLiquidity),
    (ix_disc::ADDLIQ1,    InstructionKind::AddLiquiditySingle),
    (ix_disc::ADDLIQN,    InstructionKind::AddLiquidityN),
    (ix_disc::REMLIQ,     InstructionKind::RemoveLiquidity),
    (ix_disc::REMLIQN,    InstructionKind::RemoveLiquidityN),
    (ix_disc::SETPAUSE,   InstructionKind::SetPause),
    (ix_disc::UPDFEE,     InstructionKind::UpdateFee),
    (ix_disc::WDRAWFEE,   InstructionKind::WithdrawFee),
    (ix_disc::COMMITAMP,  InstructionKind::CommitAmp),
    (ix_disc::RAMPAMP,    InstructionKind::RampAmp),
    (ix_disc::STOPRAMP,   InstructionKind::StopRamp),
    (ix_disc::INITAUTH,   InstructionKind::InitAuthorityTransfer),
    (ix_disc::COMPLAUTH,  InstructionKind::CompleteAuthorityTransfer),
    (ix_disc::CANCELAUTH, InstructionKind::CancelAuthorityTransfer),
    (ix_disc::CREATEFARM, InstructionKind::CreateFarm),
    (ix_disc::STAKELP,    InstructionKind::StakeLp),
    (ix_disc::UNSTAKELP,  InstructionKind::UnstakeLp),
    (ix_disc::CLAIMFARM,  InstructionKind::ClaimFarm),
    (ix_disc::LOCKLP,     InstructionKind::LockLp),
    (ix_disc::CLAIMULP,   InstructionKind::ClaimUnlockedLp),
    (ix_disc::CREATELOT,  InstructionKind::CreateLottery),
    (ix_disc::ENTERLOT,   InstructionKind::EnterLottery),
    (ix_disc::DRAWLOT,    InstructionKind::DrawLottery),
    (ix_disc::CLAIMLOT,   InstructionKind::ClaimLottery),
    (ix_disc::INITREG,    InstructionKind::InitRegistry),
    (ix_disc::REGPOOL,    InstructionKind::RegisterPool),
    (ix_disc::UNREGPOOL,  InstructionKind::UnregisterPool),
    (ix_disc::INITREGA,   InstructionKind::InitRegistryAuthorityTransfer),
    (ix_disc::COMPLREGA,  InstructionKind::CompleteRegistryAuthorityTransfer),
    (ix_disc::CANCELREGA, InstructionKind::CancelRegistryAuthorityTransfer),
    (ix_disc::GETTWAP,    InstructionKind::GetTwap),
    (ix_disc::SETORACLE,  InstructionKind::SetOracle),
    (ix_disc::SETCB,      InstructionKind::SetCircuitBreaker),
    (ix_disc::RESETCB,    InstructionKind::ResetCircuitBreaker),
    (ix_disc::SETRL,      InstructionKind::SetRateLimit),
    (ix_disc::GOVPROP,    InstructionKind::GovPropose),
    (ix_disc::GOVVOTE,    InstructionKind::GovVote),
    (ix_disc::GOVEXEC,    InstructionKind::GovExecute),
    (ix_disc::GOVCNCL,    InstructionKind::GovCancel),
    (ix_disc::INITBOOK,   InstructionKind::InitOrderbook),
    (ix_disc::PLACEORD,   InstructionKind::PlaceOrder),
    (ix_disc::CANCELORD,  InstructionKind::CancelOrder),
    (ix_disc::FILLORD,    InstructionKind::FillOrder),
    (ix_disc::INITCLPL,   InstructionKind::InitClPool),
    (ix_disc::CLMINT,     InstructionKind::ClMint),
    (ix_disc::CLBURN,     InstructionKind::ClBurn),
    (ix_disc::CLCOLLECT,  InstructionKind::ClCollect),
    (ix_disc::CLSWAP,     InstructionKind::ClSwap),
    (ix_disc::FLASHLOAN,  InstructionKind::FlashLoan),
    (ix_disc::FLASHREPY,  InstructionKind::FlashRepay),
    (ix_disc::MULTIHOP,   InstructionKind::Multihop),
    (ix_disc::INITML,     InstructionKind::InitMlBrain),
    (ix_disc::CFGML,      InstructionKind::ConfigMlBrain),
    (ix_disc::TRAINML,    InstructionKind::TrainMl),
    (ix_disc::APPLYML,    InstructionKind::ApplyMl),
    (ix_disc::LOGML,      InstructionKind::LogMlState),
    (ix_disc::TH_EXEC,    InstructionKind::TransferHookExecute),
    (ix_disc::TH_INIT,    InstructionKind::TransferHookInit),
];

impl InstructionKind {
    /// Snake-case instruction name as used in program logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::CreatePool                        => "create_pool",
            Self::CreatePoolN                       => "create_pool_n",
            Self::InitToken0Vault                   => "init_t0_vault",
            Self::InitToken1Vault                   => "init_t1_vault",
            Self::InitLpMint                        => "init_lp_mint",
            Self::Swap                              => "swap",
            Self::SwapT0T1                          => "swap_t0_t1",
            Self::SwapT1T0                          => "swap_t1_t0",
            Self::SwapN                             => "swap_n",
            Self::MigrateT0T1                       => "migrate_t0_t1",
            Self::MigrateT1T0                       => "migrate_t1_t0",
            Self::AddLiquidity                      => "add_liquidity",
            Self::AddLiquiditySingle                => "add_liquidity_single",
            Self::AddLiquidityN                     => "add_liquidity_n",
            Self::RemoveLiquidity                   => "remove_liquidity",
            Self::RemoveLiquidityN                  => "remove_liquidity_n",
            Self::SetPause                          => "set_pause",
            Self::UpdateFee                         => "update_fee",
            Self::WithdrawFee                       => "withdraw_fee",
            Self::CommitAmp                         => "commit_amp",
            Self::RampAmp                           => "ramp_amp",
            Self::StopRamp                          => "stop_ramp",
            Self::InitAuthorityTransfer             => "init_authority_transfer",
            Self::CompleteAuthorityTransfer         => "complete_authority_transfer",
            Self::CancelAuthorityTransfer           => "cancel_authority_transfer",
            Self::CreateFarm                        => "create_farm",
            Self::StakeLp                           => "stake_lp",
            Self::UnstakeLp                         => "unstake_lp",
            Self::ClaimFarm                         => "claim_farm",
            Self::LockLp                            => "lock_lp",
            Self::ClaimUnlockedLp                   => "claim_unlocked_lp",
            Self::CreateLottery                     => "create_lottery",
            Self::EnterLottery                      => "enter_lottery",
            Self::DrawLottery                       => "draw_lottery",
            Self::ClaimLottery                      => "claim_lottery",
            Self::InitRegistry                      => "init_registry",
            Self::RegisterPool                      => "register_pool",
            Self::UnregisterPool                    => "unregister_pool",
            Self::InitRegistryAuthorityTransfer     => "init_registry_authority_transfer",
            Self::CompleteRegistryAuthorityTransfer => "complete_registry_authority_transfer",
            Self::CancelRegistryAuthorityTransfer   => "cancel_registry_authority_transfer",
            Self::GetTwap                           => "get_twap",
            Self::SetOracle                         => "set_oracle",
            Self::SetCircuitBreaker                 => "set_circuit_breaker",
            Self::ResetCircuitBreaker               => "reset_circuit_breaker",
            Self::SetRateLimit                      => "set_rate_limit",
            Self::GovPropose                        => "gov_propose",
            Self::GovVote                           => "gov_vote",
            Self::GovExecute                        => "gov_execute",
            Self::GovCancel                         => "gov_cancel",
            Self::InitOrderbook                     => "init_orderbook",
            Self::PlaceOrder                        => "place_order",
            Self::CancelOrder                       => "cancel_order",
            Self::FillOrder                         => "fill_order",
            Self::InitClPool                        => "init_cl_pool",
            Self::ClMint                            => "cl_mint",
            Self::ClBurn                            => "cl_burn",
            Self::ClCollect                         => "cl_collect",
            Self::ClSwap                            => "cl_swap",
            Self::FlashLoan                         => "flash_loan",
            Self::FlashRepay                        => "flash_repay",
            Self::Multihop                          => "multihop",
            Self::InitMlBrain                       => "init_ml_brain",
            Self::ConfigMlBrain                     => "config_ml_brain",
            Self::TrainMl                           => "train_ml",
            Self::ApplyMl                           => "apply_ml",
            Self::LogMlState                        => "log_ml_state",
            Self::TransferHookExecute               => "transfer_hook_execute",
            Self::TransferHookInit                  => "transfer_hook_init",
            Self::Unknown                           => "unknown",
        }
    }

    /// Wire discriminator, `None` for `Unknown`.
    pub fn discriminator(self) -> Option<u64> {
        INSTRUCTION_TABLE
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(disc, _)| *disc)
    }

    pub fn from_discriminator(disc: u64) -> Self {
        INSTRUCTION_TABLE
            .iter()
            .find(|(d, _)| *d == disc)
            .map_or(Self::Unknown, |(_, kind)| *kind)
    }
}

impl std::fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify raw instruction data by its first 8 bytes.
///
/// Data shorter than 8 bytes or with an unrecognised discriminator is
/// [`InstructionKind::Unknown`].
pub fn detect_instruction(data: &[u8]) -> InstructionKind {
    data.get(..8)
        .and_then(|b| <[u8; 8]>::try_from(b).ok())
        .map_or(InstructionKind::Unknown, |b| {
            InstructionKind::from_discriminator(u64::from_le_bytes(b))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn discriminators_are_unique() {
        let discs: HashSet<u64> = INSTRUCTION_TABLE.iter().map(|(d, _)| *d).collect();
        assert_eq!(discs.len(), INSTRUCTION_TABLE.len());
        let kinds: HashSet<InstructionKind> = INSTRUCTION_TABLE.iter().map(|(_, k)| *k).collect();
        assert_eq!(kinds.len(), INSTRUCTION_TABLE.len());
    }

    #[test]
    fn detects_swap_with_arguments() {
        let mut data = ix_disc::SWAP.to_le_bytes().to_vec();
        data.extend_from_slice(&1_000_000u64.to_le_bytes());
        data.extend_from_slice(&990_000u64.to_le_bytes());
        assert_eq!(detect_instruction(&data), InstructionKind::Swap);
        assert_eq!(detect_instruction(&data).name(), "swap");
    }

    #[test]
    fn ascii_tags_read_little_endian() {
        // GETTWAP is "\x01tegpawt" on the wire.
        let mut data = ix_disc::GETTWAP.to_le_bytes().to_vec();
        data.push(2);
        assert_eq!(data[0], 0x01);
        assert_eq!(detect_instruction(&data), InstructionKind::GetTwap);
    }

    #[test]
    fn short_or_unknown_data() {
        assert_eq!(detect_instruction(&[]), InstructionKind::Unknown);
        assert_eq!(detect_instruction(&ix_disc::SWAP.to_le_bytes()[..7]), InstructionKind::Unknown);
        assert_eq!(detect_instruction(&[0u8; 8]), InstructionKind::Unknown);
        assert_eq!(InstructionKind::Unknown.discriminator(), None);
    }

    #[test]
    fn discriminator_round_trip() {
        assert_eq!(InstructionKind::RampAmp.discriminator(), Some(ix_disc::RAMPAMP));
        assert_eq!(InstructionKind::from_discriminator(ix_disc::TH_INIT), InstructionKind::TransferHookInit);
    }
}
