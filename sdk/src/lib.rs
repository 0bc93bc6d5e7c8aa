//! AeX402 Rust SDK
//!
//! StableSwap math and account decoding for the AeX402 AMM on Solana.
//! Everything here is a pure function over caller-supplied snapshots: no RPC,
//! no signing, no global state. Feed it raw account bytes and it tells you
//! what the program will compute.
//!
//! # Quick Start
//!
//! ```rust
//! use aex402_sdk::{math, parse_pool, ProgramConfig, SwapDirection};
//!
//! # fn fetch_pool_account() -> Vec<u8> { vec![0; 1024] }
//! // Pure math on known balances: 0.3% fee, amp 1000.
//! let out = math::simulate_swap(1_000_000_000, 1_000_000_000, 1_000_000, 1_000, 30)?;
//! assert!(out < 1_000_000);
//!
//! // Or decode a fetched account and simulate against it.
//! let config = ProgramConfig::default();
//! let data = fetch_pool_account();
//! if let Ok(pool) = parse_pool(&data, &config) {
//!     let now = 1_700_000_000;
//!     let out = pool.simulate_swap(SwapDirection::ZeroToOne, 1_000_000, now)?;
//!     println!("amp {} -> {out}", pool.current_amp(now));
//! }
//! # Ok::<(), aex402_sdk::Error>(())
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`math::calc_d`] / [`math::calc_d_n`] | StableSwap invariant, 2 and N tokens |
//! | [`math::calc_y`] / [`math::calc_y_n`] | Output balance for a new input balance |
//! | [`math::simulate_swap`] / [`math::quote_swap`] | Post-fee swap output and full breakdown |
//! | [`math::calc_lp_tokens`] / [`math::calc_withdraw`] | LP issuance and redemption |
//! | [`math::get_current_amp`] | Amplification during a ramp |
//! | [`math::calc_pending_reward`] | Farming rewards |
//! | [`detect_account_type`] / [`decode_account`] | Classify and decode any program account |
//! | [`candle::Candle`] / [`candle::TwapResult`] | OHLCV candles and the packed TWAP result |
//! | [`detect_instruction`] | Classify raw instruction data |
//! | [`ProgramError::from_log`] | Map a program log line back to its error |
//!
//! Set `RUST_LOG=aex402_sdk=debug` under a `tracing` subscriber to see why
//! an account was rejected or a solver gave up.

pub mod candle;
pub mod config;
pub mod constants;
pub mod error;
pub mod instructions;
pub mod math;
pub mod state;
pub mod types;

pub use candle::{Candle, DecodedCandle, TwapResult, TwapWindow};
pub use config::{AccountDiscriminators, ProgramConfig};
pub use error::{Error, ProgramError, Result};
pub use instructions::{detect_instruction, InstructionKind};
pub use state::*;
pub use types::*;
