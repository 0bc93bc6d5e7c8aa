//! Account decoding against hand-built fixtures.

use aex402_sdk::candle::Candle;
use aex402_sdk::constants::{account_disc, CL_MIN_DURATION, POOL_SIZE};
use aex402_sdk::{
    decode_account, detect_account_type, parse_cl_pool, parse_cl_position, parse_farm,
    parse_gov_proposal, parse_gov_vote, parse_lottery, parse_lottery_entry, parse_ml_brain,
    parse_ml_observations, parse_npool, parse_orderbook, parse_pool, parse_registry,
    parse_registry_pools, parse_user_farm, AccountDiscriminators, AccountKind, AccountState,
    Error, MlAction, OrderSide, ProgramConfig, ProposalStatus, ProposalType, Result,
    SwapDirection,
};
use solana_sdk::pubkey::Pubkey;

// ─── Fixture writer ───────────────────────────────────────────────────────────

struct Fixture(Vec<u8>);

impl Fixture {
    fn new(len: usize, disc: u64) -> Self {
        let mut buf = vec![0u8; len];
        buf[..8].copy_from_slice(&disc.to_le_bytes());
        Self(buf)
    }

    fn bytes(mut self, offset: usize, b: &[u8]) -> Self {
        self.0[offset..offset + b.len()].copy_from_slice(b);
        self
    }

    fn key(self, offset: usize, k: &Pubkey) -> Self {
        self.bytes(offset, k.as_ref())
    }

    fn u8(self, offset: usize, v: u8) -> Self {
        self.bytes(offset, &[v])
    }

    fn u16(self, offset: usize, v: u16) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn i16(self, offset: usize, v: i16) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn u32(self, offset: usize, v: u32) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn i32(self, offset: usize, v: i32) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn u64(self, offset: usize, v: u64) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn i64(self, offset: usize, v: i64) -> Self {
        self.bytes(offset, &v.to_le_bytes())
    }

    fn build(self) -> Vec<u8> {
        self.0
    }
}

fn cfg() -> ProgramConfig {
    ProgramConfig::default()
}

fn pool_fixture(authority: &Pubkey, mint0: &Pubkey) -> Vec<u8> {
    let hour = Candle { open: 1_000_000, high_delta: 500, low_delta: 300, close_delta: -100, volume: 7 };
    Fixture::new(POOL_SIZE, account_disc::POOL)
        .key(8, authority)
        .key(40, mint0)
        .u64(200, 100)            // amp
        .u64(208, 100)            // init_amp
        .u64(216, 200)            // target_amp
        .i64(224, 1_000)          // ramp_start
        .i64(232, 2_000)          // ramp_stop
        .u64(240, 30)             // fee_bps
        .u64(248, 50)             // admin_fee_pct
        .u64(256, 1_000_000_000)  // bal0
        .u64(264, 1_000_000_000)  // bal1
        .u64(272, 2_000_000_000)  // lp_supply
        .u8(312, 1)               // paused
        .u8(313, 254)             // bump
        .i64(352, -5)             // auth_time
        .u32(392, 1_010_000)      // max_price
        .u8(408, 3)               // hour_idx
        .u8(416, 0xff)            // bloom[0]
        .bytes(544 + 3 * 12, &hour.to_bytes())
        .bytes(832, &hour.to_bytes())
        .build()
}

// ─── Pool ─────────────────────────────────────────────────────────────────────

#[test]
fn pool_fields_decode_at_their_offsets() {
    let authority = Pubkey::new_unique();
    let mint0 = Pubkey::new_unique();
    let pool = parse_pool(&pool_fixture(&authority, &mint0), &cfg()).unwrap();

    assert_eq!(pool.authority, authority);
    assert_eq!(pool.mint0, mint0);
    assert_eq!(pool.mint1, Pubkey::default());
    assert_eq!((pool.amp, pool.init_amp, pool.target_amp), (100, 100, 200));
    assert_eq!((pool.ramp_start, pool.ramp_stop), (1_000, 2_000));
    assert_eq!(pool.fee_bps, 30);
    assert_eq!(pool.admin_fee_pct, 50);
    assert_eq!(pool.lp_supply, 2_000_000_000);
    assert!(pool.is_paused());
    assert_eq!(pool.bump, 254);
    assert_eq!(pool.auth_time, -5);
    assert_eq!(pool.max_price, 1_010_000);
    assert_eq!(pool.hour_idx, 3);
    assert_eq!(pool.bloom[0], 0xff);
    assert_eq!(pool.hours.len(), 24);
    assert_eq!(pool.days.len(), 7);
}

#[test]
fn pool_candles_decode() {
    let pool = parse_pool(&pool_fixture(&Pubkey::new_unique(), &Pubkey::new_unique()), &cfg()).unwrap();
    let hourly = pool.hourly_candles();
    assert!(pool.hours[0].is_empty());
    assert_eq!(hourly[3].high, 1_000_500);
    assert_eq!(hourly[3].low, 999_700);
    assert_eq!(hourly[3].close, 999_900);
    assert_eq!(hourly[3].volume, 7_000_000_000);
    assert_eq!(pool.daily_candles()[0], hourly[3]);
}

#[test]
fn pool_amp_ramp_and_swap() {
    let pool = parse_pool(&pool_fixture(&Pubkey::new_unique(), &Pubkey::new_unique()), &cfg()).unwrap();
    assert_eq!(pool.current_amp(1_000), 100);
    assert_eq!(pool.current_amp(1_500), 150);
    assert_eq!(pool.current_amp(9_999), 200);
    assert!(pool.is_ramping(1_500));
    assert!(!pool.is_ramping(2_000));

    let a = pool.simulate_swap(SwapDirection::ZeroToOne, 1_000_000, 1_500).unwrap();
    let b = pool.simulate_swap(SwapDirection::OneToZero, 1_000_000, 1_500).unwrap();
    assert_eq!(a, b);
    assert_eq!(a, aex402_sdk::math::simulate_swap(1_000_000_000, 1_000_000_000, 1_000_000, 150, 30).unwrap());
}

#[test]
fn pool_serializes_keys_as_base58() {
    let authority = Pubkey::new_unique();
    let pool = parse_pool(&pool_fixture(&authority, &Pubkey::new_unique()), &cfg()).unwrap();
    let json = serde_json::to_value(&pool).unwrap();
    assert_eq!(json["authority"], authority.to_string());
    assert_eq!(json["fee_bps"], 30);
    assert!(json.get("bloom").is_none());
}

// ─── NPool ────────────────────────────────────────────────────────────────────

fn npool_fixture(n_tokens: u8, mints: &[Pubkey]) -> Vec<u8> {
    let mut f = Fixture::new(2048, account_disc::NPOOL)
        .u8(40, n_tokens)
        .u64(48, 200)       // amp
        .u64(56, 4)         // fee_bps
        .u64(72, 3_000_000) // lp_supply
        .u64(752, 77)       // total_volume
        .u64(768, 123_456); // last_trade_slot
    for (i, mint) in mints.iter().enumerate() {
        f = f.key(80 + i * 32, mint).u64(624 + i * 8, 1_000_000 * (i as u64 + 1));
    }
    // Slot past n_tokens must not leak into the snapshot.
    f.u64(624 + 7 * 8, 999).build()
}

#[test]
fn npool_keeps_only_active_tokens() {
    let mints = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
    let pool = parse_npool(&npool_fixture(3, &mints), &cfg()).unwrap();
    assert_eq!(pool.n_tokens, 3);
    assert_eq!(pool.mints, mints.to_vec());
    assert_eq!(pool.balances(), &[1_000_000, 2_000_000, 3_000_000]);
    assert_eq!(pool.admin_fees, vec![0, 0, 0]);
    assert_eq!(pool.vaults.len(), 3);
    assert_eq!(pool.total_volume, 77);
    assert_eq!(pool.last_trade_slot, 123_456);
    assert_eq!(pool.token_index(&mints[2]), Some(2));
    assert_eq!(pool.token_index(&Pubkey::new_unique()), None);

    let out = pool.simulate_swap(0, 2, 10_000).unwrap();
    assert!(out > 0 && out < 10_100, "out={out}");
    assert!(pool.simulate_swap(0, 3, 10_000).is_err());
}

#[test]
fn npool_token_count_is_validated() {
    for bad in [0u8, 1, 9, 255] {
        assert_eq!(
            parse_npool(&npool_fixture(bad, &[]), &cfg()),
            Err(Error::InvalidTokenCount(bad))
        );
    }
    let eight = [Pubkey::default(); 8];
    assert_eq!(parse_npool(&npool_fixture(8, &eight), &cfg()).unwrap().balances.len(), 8);
}

// ─── Farming, lottery ─────────────────────────────────────────────────────────

#[test]
fn farm_and_user_position() {
    let farm = parse_farm(
        &Fixture::new(120, account_disc::FARM)
            .u64(72, 10)
            .i64(80, 100)
            .i64(88, 200)
            .u64(96, 5_000)
            .u64(104, 2_000_000_000_000)
            .i64(112, 150)
            .build(),
        &cfg(),
    )
    .unwrap();
    assert_eq!(farm.reward_rate, 10);
    assert!(farm.is_active(100) && farm.is_active(200));
    assert!(!farm.is_active(201));

    let user = parse_user_farm(
        &Fixture::new(96, account_disc::UFARM).u64(72, 1_000).u64(80, 500).i64(88, 300).build(),
        &cfg(),
    )
    .unwrap();
    assert_eq!(user.staked, 1_000);
    assert!(user.is_locked(299));
    assert!(!user.is_locked(300));
    assert_eq!(user.pending_reward(&farm), 1_500);
}

#[test]
fn lottery_and_entries() {
    let lottery = parse_lottery(
        &Fixture::new(152, account_disc::LOTTERY)
            .u64(104, 10)
            .u64(112, 40)
            .u64(120, 400)
            .i64(128, 1_000)
            .u64(136, 17)
            .u8(144, 1)
            .build(),
        &cfg(),
    )
    .unwrap();
    assert!(lottery.is_drawn());
    assert!(!lottery.is_claimed());
    assert!(lottery.is_ended(1_000));
    assert_eq!(lottery.winning_ticket, 17);

    let entry = parse_lottery_entry(
        &Fixture::new(88, account_disc::LOTENTRY).u64(72, 10).u64(80, 8).build(),
        &cfg(),
    )
    .unwrap();
    assert!(entry.is_winner(10));
    assert!(entry.is_winner(lottery.winning_ticket));
    assert!(!entry.is_winner(18));
    assert!(!entry.is_winner(9));
}

// ─── Registry ─────────────────────────────────────────────────────────────────

#[test]
fn registry_tail_truncates_silently() {
    let pools = [Pubkey::new_unique(), Pubkey::new_unique()];
    let data = Fixture::new(88 + 64 + 10, account_disc::REGISTRY)
        .u32(80, 3)
        .key(88, &pools[0])
        .key(120, &pools[1])
        .build();

    let header = parse_registry(&data, &cfg()).unwrap();
    assert_eq!(header.count, 3);
    assert_eq!(header.pools(&data), pools.to_vec());
    assert_eq!(parse_registry_pools(&data, 1), vec![pools[0]]);
    assert!(parse_registry_pools(&data[..40], 3).is_empty());
}

// ─── Governance ───────────────────────────────────────────────────────────────

#[test]
fn governance_proposal_and_vote() {
    let mut desc = [0u8; 64];
    desc[..11].copy_from_slice(b"lower fee 4");
    let data = Fixture::new(200, account_disc::GOVPROP)
        .u8(72, ProposalType::FeeChange as u8)
        .u8(73, ProposalStatus::Passed as u8)
        .u64(80, 4)
        .u64(88, 600)
        .u64(96, 200)
        .u64(104, 5_000)
        .i64(128, 1_000)
        .bytes(136, &desc)
        .build();

    let p = parse_gov_proposal(&data, &cfg()).unwrap();
    assert_eq!(p.proposal_type(), Some(ProposalType::FeeChange));
    assert_eq!(p.status(), Some(ProposalStatus::Passed));
    assert_eq!(p.description, "lower fee 4");
    assert!(!p.can_execute(999));
    assert!(p.can_execute(1_000));
    assert_eq!(p.approval_rate(), 0.75);
    assert_eq!(p.quorum_rate(), 0.16);
    assert!(p.reached_quorum());
    assert!(p.passes_threshold());

    let vote = parse_gov_vote(
        &Fixture::new(88, account_disc::GOVVOTE).u64(72, 600).u8(80, 1).build(),
        &cfg(),
    )
    .unwrap();
    assert!(vote.voted_for());
    assert_eq!(vote.amount, 600);
}

// ─── Concentrated liquidity, orderbook, ML ────────────────────────────────────

#[test]
fn cl_pool_and_position() {
    let pool = parse_cl_pool(
        &Fixture::new(496, account_disc::CLPOOL)
            .i16(72, -10)
            .i16(74, 10)
            .i16(76, -3)
            .u8(78, 1)
            .u64(80, 1_000_000_000_000)
            .u8(112 + 62, 0b0000_0100) // tick -500 + 62*8 + 2 = -2
            .build(),
        &cfg(),
    )
    .unwrap();
    assert!(pool.is_initialized());
    assert_eq!((pool.tick_lower, pool.tick_upper, pool.current_tick), (-10, 10, -3));
    assert!(pool.is_tick_set(-2));
    assert!(!pool.is_tick_set(-3));
    assert!(!pool.is_tick_set(i16::MIN));

    let pos = parse_cl_position(
        &Fixture::new(128, account_disc::CLPOS).i16(72, -5).i16(74, 5).u64(80, 42).i64(120, 1_000).build(),
        &cfg(),
    )
    .unwrap();
    assert_eq!((pos.tick_lower, pos.tick_upper, pos.liquidity), (-5, 5, 42));
    assert!(!pos.can_collect_fees(1_000 + CL_MIN_DURATION - 1));
    assert!(pos.can_collect_fees(1_000 + CL_MIN_DURATION));
}

#[test]
fn orderbook_slots() {
    let owner = Pubkey::new_unique();
    let data = Fixture::new(4176, account_disc::BOOK)
        .u8(72, 2)
        // order 0: active sell
        .key(80, &owner)
        .u64(80 + 32, 1_000_500)
        .u64(80 + 40, 5_000)
        .i64(80 + 48, 900)
        .u8(80 + 56, 1)
        .u8(80 + 57, 1)
        // order 5: active buy
        .u64(80 + 5 * 64 + 40, 7)
        .i64(80 + 5 * 64 + 48, 2_000)
        .u8(80 + 5 * 64 + 57, 1)
        .build();

    let book = parse_orderbook(&data, &cfg()).unwrap();
    assert_eq!(book.order_count, 2);
    assert_eq!(book.orders.len(), 64);
    let active: Vec<_> = book.active_orders().collect();
    assert_eq!(active.len(), 2);
    assert_eq!(active[0].owner, owner);
    assert_eq!(active[0].side(), Some(OrderSide::Sell));
    assert!(active[0].is_expired(900));
    assert_eq!(active[1].side(), Some(OrderSide::Buy));
    assert!(!active[1].is_expired(1_999));
}

#[test]
fn ml_brain_and_observations() {
    let q = |state: usize, action: usize| 164 + (state * 9 + action) * 4;
    let data = Fixture::new(1144 + 2 * 24 + 5, account_disc::MLBRAIN)
        .u8(72, 1)
        .u16(80, 5)
        .u32(84, 12)
        .u16(100, 1)
        .u64(156, 99)
        .i32(q(4, 3), 700)
        .i32(q(4, 6), -20)
        .u16(1136, 1)
        .u16(1138, 2)
        // observation 1
        .u32(1144 + 24, 1_000_100)
        .u16(1144 + 24 + 18, 150)
        .u8(1144 + 24 + 20, 1)
        .u8(1144 + 24 + 21, 1)
        .build();

    let brain = parse_ml_brain(&data, &cfg()).unwrap();
    assert!(brain.is_enabled());
    assert!(!brain.is_auto_apply());
    assert_eq!(brain.epoch, 12);
    assert_eq!(brain.min_fee, 1);
    assert_eq!(brain.lot_step, 99);
    assert_eq!(brain.q_table.len(), 27);
    assert_eq!(brain.q_table[4][3], 700);
    assert_eq!(brain.best_action(4), Some(MlAction::AmpUp));
    assert_eq!(brain.best_action(0), Some(MlAction::Hold));
    assert_eq!(brain.best_action(27), None);
    assert_eq!((brain.obs_head, brain.obs_tail), (1, 2));

    // obs_count says 5 but only two records fit.
    let obs = parse_ml_observations(&data, brain.obs_count as usize);
    assert_eq!(obs.len(), 2);
    assert_eq!(obs[1].price, 1_000_100);
    assert_eq!(obs[1].amp, 150);
    assert!(obs[1].is_new);
    assert_eq!(obs[1].direction, 1);
}

// ─── Rejection and dispatch ───────────────────────────────────────────────────

type Parser = fn(&[u8], &ProgramConfig) -> Result<()>;

macro_rules! parser {
    ($parse:ident) => {
        (|d: &[u8], c: &ProgramConfig| $parse(d, c).map(drop)) as Parser
    };
}

fn parsers() -> Vec<(AccountKind, u64, Parser)> {
    vec![
        (AccountKind::Pool, account_disc::POOL, parser!(parse_pool)),
        (AccountKind::NPool, account_disc::NPOOL, parser!(parse_npool)),
        (AccountKind::Farm, account_disc::FARM, parser!(parse_farm)),
        (AccountKind::UserFarm, account_disc::UFARM, parser!(parse_user_farm)),
        (AccountKind::Lottery, account_disc::LOTTERY, parser!(parse_lottery)),
        (AccountKind::LotteryEntry, account_disc::LOTENTRY, parser!(parse_lottery_entry)),
        (AccountKind::Registry, account_disc::REGISTRY, parser!(parse_registry)),
        (AccountKind::GovProposal, account_disc::GOVPROP, parser!(parse_gov_proposal)),
        (AccountKind::GovVote, account_disc::GOVVOTE, parser!(parse_gov_vote)),
        (AccountKind::ClPool, account_disc::CLPOOL, parser!(parse_cl_pool)),
        (AccountKind::ClPosition, account_disc::CLPOS, parser!(parse_cl_position)),
        (AccountKind::Orderbook, account_disc::BOOK, parser!(parse_orderbook)),
        (AccountKind::MlBrain, account_disc::MLBRAIN, parser!(parse_ml_brain)),
    ]
}

#[test]
fn short_buffers_are_rejected() {
    for (kind, disc, parse) in parsers() {
        let data = Fixture::new(kind.min_len() - 1, disc).build();
        assert_eq!(
            parse(&data, &cfg()),
            Err(Error::AccountTooShort { kind: kind.name(), len: kind.min_len() - 1, expected: kind.min_len() }),
            "{kind}"
        );
        assert!(parse(&[], &cfg()).is_err(), "{kind}");
    }
}

#[test]
fn garbled_discriminators_are_rejected() {
    for (kind, disc, parse) in parsers() {
        let data = Fixture::new(kind.min_len(), disc ^ 1).build();
        assert_eq!(
            parse(&data, &cfg()),
            Err(Error::DiscriminatorMismatch { kind: kind.name(), expected: disc, found: disc ^ 1 }),
            "{kind}"
        );
    }
}

#[test]
fn exact_layout_length_is_enough() {
    for (kind, disc, parse) in parsers() {
        let mut data = Fixture::new(kind.min_len(), disc).build();
        if kind == AccountKind::NPool {
            data[40] = 2;
        }
        assert_eq!(parse(&data, &cfg()), Ok(()), "{kind}");
    }
}

#[test]
fn detection_uses_only_the_discriminator() {
    for (kind, disc, _) in parsers() {
        assert_eq!(detect_account_type(&disc.to_le_bytes(), &cfg()), kind);
    }
    assert_eq!(detect_account_type(&[1, 2, 3], &cfg()), AccountKind::Unknown);
    assert_eq!(detect_account_type(&account_disc::AIFEE.to_le_bytes(), &cfg()), AccountKind::Unknown);
    assert_eq!(AccountKind::ClPool.name(), "CLPool");
    assert_eq!(AccountKind::Unknown.to_string(), "Unknown");
}

#[test]
fn custom_discriminators_are_honoured() {
    let config = ProgramConfig::default().with_discriminators(AccountDiscriminators {
        pool: 0xdead_beef,
        ..Default::default()
    });
    let data = Fixture::new(916, 0xdead_beef).u64(240, 4).build();
    assert_eq!(detect_account_type(&data, &config), AccountKind::Pool);
    assert_eq!(parse_pool(&data, &config).unwrap().fee_bps, 4);
    assert!(parse_pool(&data, &cfg()).is_err());
}

#[test]
fn decode_any_account() {
    let data = pool_fixture(&Pubkey::new_unique(), &Pubkey::new_unique());
    let state = decode_account(&data, &cfg()).unwrap().unwrap();
    assert_eq!(state.kind(), AccountKind::Pool);
    assert!(matches!(state, AccountState::Pool(ref p) if p.fee_bps == 30));
    assert_eq!(serde_json::to_value(&state).unwrap()["kind"], "Pool");

    let registry = Fixture::new(120, account_disc::REGISTRY).u32(80, 1).build();
    let state = decode_account(&registry, &cfg()).unwrap().unwrap();
    assert!(matches!(state, AccountState::Registry { ref pools, .. } if pools.len() == 1));

    assert_eq!(decode_account(&[0u8; 64], &cfg()), Ok(None));
    assert!(decode_account(&Fixture::new(100, account_disc::POOL).build(), &cfg()).is_err());
}
