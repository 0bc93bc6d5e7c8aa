//! SDK error type and the on-chain error-code catalog.

use serde::Serialize;

/// All errors returned by the AeX402 SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ── Account parsing ──────────────────────────────────────────────────────
    /// Buffer is shorter than the fixed layout of the requested account kind.
    #[error("{kind} account is {len} bytes; expected at least {expected}")]
    AccountTooShort {
        kind:     &'static str,
        len:      usize,
        expected: usize,
    },

    /// The first 8 bytes do not carry the tag of the requested account kind.
    #[error("{kind} discriminator mismatch: expected {expected:#018x}, found {found:#018x}")]
    DiscriminatorMismatch {
        kind:     &'static str,
        expected: u64,
        found:    u64,
    },

    /// Raw bytes could not be deserialized.
    #[error("Account parse error at offset {offset}: {reason}")]
    ParseError { offset: usize, reason: String },

    /// N-token pool declares a token count outside `2..=8`.
    #[error("Invalid token count {0}; expected 2..=8")]
    InvalidTokenCount(u8),

    // ── Newton solvers ───────────────────────────────────────────────────────
    /// The iteration cap was exhausted before two successive iterates were within 1.
    #[error("Newton iteration did not converge within {iterations} steps")]
    NoConvergence { iterations: usize },

    /// A Newton step hit a zero denominator.
    #[error("Zero denominator in Newton step")]
    ZeroDenominator,

    /// A balance feeding the invariant is zero.
    #[error("Balance at index {index} is zero")]
    ZeroBalance { index: usize },

    // ── Domain ───────────────────────────────────────────────────────────────
    /// LP supply is zero where a proportional computation needs it.
    #[error("Pool has no liquidity (LP supply is zero)")]
    NoLiquidity,

    #[error("Token index {index} out of range for a {n_tokens}-token pool")]
    InvalidTokenIndex { index: usize, n_tokens: usize },

    #[error("Input and output token are the same (index {0})")]
    SameToken(usize),

    #[error("Amplification coefficient {0} outside the valid range")]
    InvalidAmp(u64),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ── Arithmetic ───────────────────────────────────────────────────────────
    #[error("Integer overflow in StableSwap math")]
    MathOverflow,

    // ── Configuration ────────────────────────────────────────────────────────
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;

// ─── On-chain error catalog ───────────────────────────────────────────────────

/// Error codes raised by the AeX402 program.
///
/// Codes 3–6 are framework errors; 6000 and above are program-specific.
/// The SDK never raises these itself: they exist so callers can map the
/// `custom program error` surfaced in transaction logs back to a meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[repr(u32)]
pub enum ProgramError {
    #[error("Wrong number of accounts")]
    Keys = 3,
    #[error("Missing required signature")]
    Signature = 4,
    #[error("Invalid instruction data")]
    Data = 5,
    #[error("Account not writable")]
    Immutable = 6,

    #[error("Pool is paused")]
    Paused = 6000,
    #[error("Invalid amplification coefficient")]
    InvalidAmp = 6001,
    #[error("Math overflow")]
    MathOverflow = 6002,
    #[error("Zero amount")]
    ZeroAmount = 6003,
    #[error("Slippage exceeded")]
    SlippageExceeded = 6004,
    #[error("Invalid invariant or PDA mismatch")]
    InvalidInvariant = 6005,
    #[error("Insufficient liquidity")]
    InsufficientLiquidity = 6006,
    #[error("Vault mismatch")]
    VaultMismatch = 6007,
    #[error("Expired or ended")]
    Expired = 6008,
    #[error("Already initialized")]
    AlreadyInitialized = 6009,
    #[error("Unauthorized")]
    Unauthorized = 6010,
    #[error("Ramp constraint violated")]
    RampConstraint = 6011,
    #[error("Tokens are locked")]
    Locked = 6012,
    #[error("Farming error")]
    FarmingError = 6013,
    #[error("Invalid account owner")]
    InvalidOwner = 6014,
    #[error("Invalid account discriminator")]
    InvalidDiscriminator = 6015,
    #[error("CPI call failed")]
    CpiFailed = 6016,
    #[error("Orderbook/registry is full")]
    Full = 6017,
    #[error("Circuit breaker triggered")]
    CircuitBreaker = 6018,
    #[error("Oracle price validation failed")]
    OracleError = 6019,
    #[error("Rate limit exceeded")]
    RateLimit = 6020,
    #[error("Governance error")]
    GovernanceError = 6021,
    #[error("Orderbook error")]
    OrderError = 6022,
    #[error("Invalid tick")]
    TickError = 6023,
    #[error("Invalid price range")]
    RangeError = 6024,
    #[error("Flash loan error")]
    FlashError = 6025,
    #[error("Cooldown period not elapsed")]
    Cooldown = 6026,
    #[error("MEV protection triggered")]
    MevProtection = 6027,
    #[error("Stale data")]
    StaleData = 6028,
    #[error("ML bias error")]
    BiasError = 6029,
    #[error("Invalid duration")]
    DurationError = 6030,
}

impl ProgramError {
    /// Every variant in code order.
    pub fn all() -> &'static [ProgramError] {
        use ProgramError::*;
        const ALL: &[ProgramError] = &[
            Keys, Signature, Data, Immutable,
            Paused, InvalidAmp, MathOverflow, ZeroAmount, SlippageExceeded,
            InvalidInvariant, InsufficientLiquidity, VaultMismatch, Expired,
            AlreadyInitialized, Unauthorized, RampConstraint, Locked, FarmingError,
            InvalidOwner, InvalidDiscriminator, CpiFailed, Full, CircuitBreaker,
            OracleError, RateLimit, GovernanceError, OrderError, TickError,
            RangeError, FlashError, Cooldown, MevProtection, StaleData, BiasError,
            DurationError,
        ];
        ALL
    }

    /// Numeric code as surfaced by the program.
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Fixed human-readable message.
    pub fn message(self) -> String {
        self.to_string()
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::all().iter().copied().find(|e| e.code() == code)
    }

    /// Extract the code from a log line such as
    /// `Program 3AMM… failed: custom program error: 0x1770`.
    pub fn from_log(line: &str) -> Option<Self> {
        const MARKER: &str = "custom program error: 0x";
        let start = line.find(MARKER)? + MARKER.len();
        let hex: String = line[start..]
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .collect();
        let code = u32::from_str_radix(&hex, 16).ok()?;
        Self::from_code(code)
    }
}
