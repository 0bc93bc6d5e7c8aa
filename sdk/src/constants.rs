//! Protocol constants and discriminator tables.
//!
//! Values mirror the deployed AeX402 program. Discriminators are `u64`
//! values stored little-endian in the first 8 bytes of an account or
//! instruction.

// ─── Program ──────────────────────────────────────────────────────────────────

pub const PROGRAM_ID_STR: &str = "3AMM53MsJZy2Jvf7PeHHga3bsGjWV4TSaYz29WUtcdje";

/// Raw bytes of [`PROGRAM_ID_STR`].
pub const PROGRAM_ID_BYTES: [u8; 32] = [
    0x20, 0x1c, 0x9b, 0x41, 0x1f, 0x04, 0xc4, 0x65,
    0x9b, 0x30, 0xc7, 0xcf, 0xa4, 0x3f, 0x97, 0x83,
    0x48, 0x1e, 0xf0, 0x10, 0xaa, 0xf0, 0x91, 0xb0,
    0x35, 0xcf, 0x3c, 0xe2, 0x12, 0xf2, 0x40, 0x81,
];

pub const TOKEN_PROGRAM_ID: &str      = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
pub const TOKEN_2022_PROGRAM_ID: &str = "TokenzQdBNbLqP5VEhdkAS6EPFLC1PHnBqCXEpPxuEb";

// ─── Pool ─────────────────────────────────────────────────────────────────────

pub const MIN_AMP: u64            = 1;
pub const MAX_AMP: u64            = 100_000;
pub const DEFAULT_FEE_BPS: u64    = 30;
pub const ADMIN_FEE_PCT: u64      = 50;
pub const MIN_SWAP: u64           = 100_000;
pub const MIN_DEPOSIT: u64        = 100_000_000;
/// Iteration cap shared by every Newton solver.
pub const NEWTON_ITERATIONS: usize = 255;
pub const RAMP_MIN_DURATION: i64  = 86_400;
pub const COMMIT_DELAY: i64       = 3_600;
pub const MIGRATION_FEE_BPS: u64  = 1_337;
pub const MAX_TOKENS: usize       = 8;
/// Allocated size of a 2-token pool account.
pub const POOL_SIZE: usize        = 1024;
/// Allocated size of an N-token pool account.
pub const NPOOL_SIZE: usize       = 2048;
pub const BLOOM_SIZE: usize       = 128;
pub const OHLCV_24H: usize        = 24;
pub const OHLCV_7D: usize         = 7;
pub const SLOTS_PER_HOUR: u64     = 9_000;
pub const SLOTS_PER_DAY: u64      = 216_000;

/// Basis-point denominator for fees and slippage.
pub const FEE_DENOMINATOR: u64 = 10_000;
/// Fixed-point scale of farm accumulators (1e12).
pub const REWARD_PRECISION: u64 = 1_000_000_000_000;
/// Scale of the virtual price (1e18).
pub const VIRTUAL_PRICE_PRECISION: u128 = 1_000_000_000_000_000_000;
/// Scale of candle and TWAP prices (1e6).
pub const PRICE_SCALE: f64 = 1e6;
/// Multiplier from the coarse candle volume unit to raw volume (1e9).
pub const VOLUME_UNIT: u64 = 1_000_000_000;

// ─── Circuit breaker / rate limit ─────────────────────────────────────────────

pub const CB_PRICE_DEV_BPS: u64     = 1_000;
pub const CB_VOLUME_MULT: u64       = 10;
pub const CB_COOLDOWN_SLOTS: u64    = 9_000;
pub const CB_AUTO_RESUME_SLOTS: u64 = 54_000;
pub const RL_SLOTS_PER_EPOCH: u64   = 750;

// ─── Governance ───────────────────────────────────────────────────────────────

pub const GOV_VOTE_SLOTS: u64     = 518_400;
pub const GOV_TIMELOCK_SLOTS: u64 = 172_800;
/// Share of the LP snapshot that must vote, in bps.
pub const GOV_QUORUM_BPS: u64     = 1_000;
/// Share of cast votes that must be in favour, in bps.
pub const GOV_THRESHOLD_BPS: u64  = 5_000;

// ─── ML brain ─────────────────────────────────────────────────────────────────

pub const ML_NUM_STATES: usize  = 27;
pub const ML_NUM_ACTIONS: usize = 9;
pub const ML_OBS_MAX: usize     = 200;
pub const ML_GAMMA: f64         = 0.9;
pub const ML_ALPHA: f64         = 0.1;
pub const ML_EPSILON: f64       = 0.1;

// ─── Concentrated liquidity ───────────────────────────────────────────────────

pub const CL_TICK_MIN: i16      = -500;
pub const CL_TICK_MAX: i16      = 500;
pub const CL_MAX_TICKS: i16     = 1001;
pub const CL_MIN_DURATION: i64  = 300;

// ─── Orderbook ────────────────────────────────────────────────────────────────

pub const MAX_ORDERS: usize = 64;

// ─── Account discriminators ───────────────────────────────────────────────────

/// Account tags: 8 ASCII bytes read as a little-endian `u64`.
pub mod account_disc {
    pub const POOL: u64      = 0x504f_4f4c_5357_4150; // "POOLSWAP"
    pub const NPOOL: u64     = 0x4e50_4f4f_4c53_5741; // "NPOOLSWA"
    pub const FARM: u64      = 0x4641_524d_5357_4150; // "FARMSWAP"
    pub const UFARM: u64     = 0x5546_4152_4d53_5741; // "UFARMSWA"
    pub const LOTTERY: u64   = 0x4c4f_5454_4552_5921; // "LOTTERY!"
    pub const LOTENTRY: u64  = 0x4c4f_5445_4e54_5259; // "LOTENTRY"
    pub const REGISTRY: u64  = 0x5245_4749_5354_5259; // "REGISTRY"
    pub const MLBRAIN: u64   = 0x4d4c_4252_4149_4e21; // "MLBRAIN!"
    pub const CLPOOL: u64    = 0x434c_504f_4f4c_2121; // "CLPOOL!!"
    pub const CLPOS: u64     = 0x434c_504f_5349_5421; // "CLPOSIT!"
    pub const BOOK: u64      = 0x4f52_4445_5242_454b; // "ORDERBEK"
    pub const GOVPROP: u64   = 0x474f_5650_524f_5021; // "GOVPROP!"
    pub const GOVVOTE: u64   = 0x474f_5656_4f54_4521; // "GOVVOTE!"
    pub const AIFEE: u64     = 0x4149_4645_4521_2121; // "AIFEE!!!"
    pub const THMETA: u64    = 0x5448_4d45_5441_2121; // "THMETA!!"
    pub const GPOOLS: u64    = 0x4750_564f_4f4c_5321; // "GPVOOLS!"
    pub const VPCLAIM: u64   = 0x5650_434c_4149_4d21; // "VPCLAIM!"
    pub const FARMSTATE: u64 = 0x4641_524d_5354_4154; // "FARMSTAT"
    pub const PCONFIG: u64   = 0x5043_4f4e_4649_4721; // "PCONFIG!"
}

// ─── Instruction discriminators ───────────────────────────────────────────────

pub mod ix_disc {
    // Pool creation
    pub const CREATEPOOL: u64 = 0xf2b9_e4d1_c8a7_e3f9;
    pub const CREATEPN: u64   = 0x27c9_33bc_e5c7_7c1b;
    pub const INITT0V: u64    = 0x5e8c_3b0d_0f3e_4a9f;
    pub const INITT1V: u64    = 0x7a4e_9f1c_3b2d_5e8a;
    pub const INITLPM: u64    = 0xf4d1_e9a3_c5b8_e7f2;

    // Swaps
    pub const SWAP: u64       = 0x82c6_9e91_e175_87c8;
    pub const SWAPT0T1: u64   = 0x642a_f2b7_e0f1_4e2a;
    pub const SWAPT1T0: u64   = 0x3a0e_131b_ac75_c4c8;
    pub const SWAPN: u64      = 0xf1a8_e3c7_b2d9_e5f8;
    pub const MIGT0T1: u64    = 0xd2e4_f1a8_c3b7_e9d5;
    pub const MIGT1T0: u64    = 0x1888_7794_2639_3db8;

    // Liquidity
    pub const ADDLIQ: u64     = 0xa2e7_c4f8_b3d1_e5a9;
    pub const ADDLIQ1: u64    = 0x51c9_8b4e_3c2e_12e6;
    pub const ADDLIQN: u64    = 0xe3f7_a2c8_d1b9_e4f6;
    pub const REMLIQ: u64     = 0x2e54_bc2c_75c9_f902;
    pub const REMLIQN: u64    = 0xb3f8_e2a5_c7d9_e1b4;

    // Admin
    pub const SETPAUSE: u64   = 0xe075_762b_7e0d_6ec9;
    pub const UPDFEE: u64     = 0x8f3a_2e5b_7c9d_1f4a;
    pub const WDRAWFEE: u64   = 0xf9e5_d3a2_c8b1_e7f8;
    pub const COMMITAMP: u64  = 0xc1d9_e3f7_a5b8_e2c4;
    pub const RAMPAMP: u64    = 0x9a1c_5e3f_7b2d_8e6a;
    pub const STOPRAMP: u64   = 0x3c94_27bb_15a2_1053;
    pub const INITAUTH: u64   = 0xf5e2_a7c9_d3b1_e8f4;
    pub const COMPLAUTH: u64  = 0xf6e8_d2a4_c7b9_e1f5;
    pub const CANCELAUTH: u64 = 0xf7e3_a9c1_d5b2_e8f6;

    // Farming
    pub const CREATEFARM: u64 = 0x6d7b_0c8e_2f1a_3d5c;
    pub const STAKELP: u64    = 0xf8d4_e1a7_c3b9_e2f7;
    pub const UNSTAKELP: u64  = 0x4166_bf65_4e34_f8bc;
    pub const CLAIMFARM: u64  = 0x0757_62b7_e0d6_ec9b;
    pub const LOCKLP: u64     = 0xfefb_8301_5f02_8cec;
    pub const CLAIMULP: u64   = 0xca85_93f4_5ce8_8b1e;

    // Lottery
    pub const CREATELOT: u64  = 0x6c6f_7474_6572_793c;
    pub const ENTERLOT: u64   = 0xe795_383a_4eef_48fc;
    pub const DRAWLOT: u64    = 0x1361_225a_4d7c_bc11;
    pub const CLAIMLOT: u64   = 0x7e7b_5e3f_15f9_3cf4;

    // Registry
    pub const INITREG: u64    = 0xa1b2_c3d4_e5f6_0718;
    pub const REGPOOL: u64    = 0xb2c3_d4e5_f607_1829;
    pub const UNREGPOOL: u64  = 0xc3d4_e5f6_0718_2930;
    pub const INITREGA: u64   = 0xd4e5_f607_1829_3041;
    pub const COMPLREGA: u64  = 0xe5f6_0718_2930_4152;
    pub const CANCELREGA: u64 = 0xf607_1829_3041_5263;

    // Oracle
    pub const GETTWAP: u64    = 0x7477_6170_6765_7401;
    pub const SETORACLE: u64  = 0x6f72_636c_0102_0304;

    // Circuit breaker / rate limit
    pub const SETCB: u64      = 0xcb01_cb01_cb01_cb01;
    pub const RESETCB: u64    = 0xcb02_cb02_cb02_cb02;
    pub const SETRL: u64      = 0x726c_0172_6c01_726c;

    // Governance
    pub const GOVPROP: u64    = 0x676f_7670_726f_7000;
    pub const GOVVOTE: u64    = 0x676f_7676_6f74_6500;
    pub const GOVEXEC: u64    = 0x0067_6f76_6578_6563;
    pub const GOVCNCL: u64    = 0x0067_6f76_636e_636c;

    // Orderbook
    pub const INITBOOK: u64   = 0x696e_6974_626f_6f6b;
    pub const PLACEORD: u64   = 0x706c_6163_656f_7264;
    pub const CANCELORD: u64  = 0x6361_6e63_656c_6f72;
    pub const FILLORD: u64    = 0x6669_6c6c_6f72_6465;

    // Concentrated liquidity
    pub const INITCLPL: u64   = 0x636c_706f_6f6c_0101;
    pub const CLMINT: u64     = 0x636c_6d69_6e74_0101;
    pub const CLBURN: u64     = 0x636c_6275_726e_0101;
    pub const CLCOLLECT: u64  = 0x636c_636f_6c6c_6563;
    pub const CLSWAP: u64     = 0x636c_7377_6170_0101;

    // Flash loans / routing
    pub const FLASHLOAN: u64  = 0x666c_6173_686c_6f61;
    pub const FLASHREPY: u64  = 0x666c_6173_6872_6570;
    pub const MULTIHOP: u64   = 0x6d75_6c74_6968_6f70;

    // ML brain
    pub const INITML: u64     = 0x696e_6974_6d6c_6272;
    pub const CFGML: u64      = 0x6366_676d_6c62_7261;
    pub const TRAINML: u64    = 0x7472_6169_6e6d_6c00;
    pub const APPLYML: u64    = 0x6170_706c_796d_6c00;
    pub const LOGML: u64      = 0x6c6f_676d_6c73_7461;

    // Transfer hook
    pub const TH_EXEC: u64    = 0x1a66_fb4b_c565_2569;
    pub const TH_INIT: u64    = 0xebeb_58a7_310d_222b;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_tags_spell_ascii_names() {
        // Stored little-endian, so the tag reads back-to-front in memory.
        assert_eq!(&account_disc::POOL.to_be_bytes(), b"POOLSWAP");
        assert_eq!(&account_disc::LOTTERY.to_be_bytes(), b"LOTTERY!");
        assert_eq!(&account_disc::BOOK.to_be_bytes(), b"ORDERBEK");
    }

    #[test]
    fn bucket_sizes_are_consistent() {
        assert_eq!(SLOTS_PER_DAY, SLOTS_PER_HOUR * 24);
        assert_eq!(OHLCV_24H * 12 + OHLCV_7D * 12, 372);
    }
}
