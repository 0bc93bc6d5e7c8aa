use std::path::{Path, PathBuf};

use aex402_sdk::constants::{ADMIN_FEE_PCT, DEFAULT_FEE_BPS, FEE_DENOMINATOR, PROGRAM_ID_STR};
use aex402_sdk::math::{check_amp, get_current_amp, quote_swap};
use aex402_sdk::{decode_account, detect_account_type, detect_instruction, ProgramConfig, ProgramError};
use anyhow::{anyhow, Context, Result};
use base64::Engine as _;
use clap::{Args, CommandFactory, Parser, Subcommand};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ─── Version banner ───────────────────────────────────────────────────────────

/// Print the AeX402 banner to stdout.
fn print_banner() {
    let ver = env!("CARGO_PKG_VERSION");
    println!();
    println!("  AeX402  v{ver}  ·  offline StableSwap toolkit");
    println!("  {}", "─".repeat(62));
    println!("  Program   {PROGRAM_ID_STR}");
    println!("  Accounts  Pool, NPool, Farm, Lottery, Registry, Gov, CL, Orderbook, ML");
    println!("  Network   none (reads account dumps from disk)");
    println!();
}

// ─── CLI definition ───────────────────────────────────────────────────────────

/// AeX402: decode program accounts and quote StableSwap trades offline.
///
/// Nothing here talks to a cluster: feed it account data saved with
/// `solana account --output json` (base64), a hex dump or raw bytes.
#[derive(Parser)]
#[command(
    name    = "aex402",
    version = env!("CARGO_PKG_VERSION"),
    about   = "Offline account decoder and StableSwap calculator for the AeX402 AMM.",
    after_help = "\
ENVIRONMENT:
  AEX402_CONFIG  Path to a ProgramConfig JSON file  [default: production ids]
  RUST_LOG       Log filter  [default: warn]

QUICK START:
  aex402 detect pool.bin
  aex402 decode --base64 pool.b64
  aex402 quote  --bal-in 1000000000 --bal-out 1000000000 --amount-in 1000000 --amp 100
  aex402 amp    --amp 100 --target 200 --start 0 --end 86400 --now 43200
  aex402 error  6004"
)]
struct Cli {
    /// ProgramConfig JSON overriding the program id and account tags
    #[arg(long, global = true, value_name = "PATH", env = "AEX402_CONFIG")]
    config: Option<PathBuf>,

    /// Output machine-readable JSON instead of human-readable text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    /// Log SDK decisions (equivalent to RUST_LOG=debug)
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How an input file is encoded.
#[derive(Args)]
#[group(multiple = false)]
struct InputFormat {
    /// File holds hex text (whitespace and a leading 0x are ignored)
    #[arg(long)]
    hex: bool,

    /// File holds base64 text
    #[arg(long)]
    base64: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the kind of a program account from its discriminator
    Detect {
        /// Account data file
        file: PathBuf,

        #[command(flatten)]
        format: InputFormat,
    },

    /// Decode any known program account and print it as JSON
    #[command(
        after_help = "\
EXAMPLES:
  # Raw bytes
  aex402 decode pool.bin

  # Data field of `solana account <ADDR> --output json`
  aex402 decode --base64 pool.b64

NOTES:
  Registry accounts include their pool list; MLBrain accounts include the
  observation ring. Unknown discriminators are reported as an error."
    )]
    Decode {
        /// Account data file
        file: PathBuf,

        #[command(flatten)]
        format: InputFormat,
    },

    /// Classify raw instruction data by its 8-byte discriminator
    Ix {
        /// Instruction data file
        file: PathBuf,

        #[command(flatten)]
        format: InputFormat,
    },

    /// Quote a 2-token StableSwap trade
    #[command(
        after_help = "\
EXAMPLES:
  # 1 unit into a balanced pool at A=100, 0.30% fee, 0.5% slippage
  aex402 quote --bal-in 1000000000 --bal-out 1000000000 --amount-in 1000000 --amp 100

NOTES:
  The fee is taken from the gross output. min_amount_out applies the
  slippage tolerance to the post-fee output."
    )]
    Quote {
        /// Pool balance of the input token
        #[arg(long, value_name = "AMOUNT")]
        bal_in: u64,

        /// Pool balance of the output token
        #[arg(long, value_name = "AMOUNT")]
        bal_out: u64,

        /// Amount sold into the pool
        #[arg(long, value_name = "AMOUNT")]
        amount_in: u64,

        /// Amplification coefficient
        #[arg(long)]
        amp: u64,

        /// Swap fee in basis points
        #[arg(long, value_name = "BPS", default_value_t = DEFAULT_FEE_BPS)]
        fee_bps: u64,

        /// Share of the fee kept by the admin, in percent
        #[arg(long, value_name = "PCT", default_value_t = ADMIN_FEE_PCT)]
        admin_fee_pct: u64,

        /// Slippage tolerance applied to min_amount_out, in basis points
        #[arg(long, value_name = "BPS", default_value_t = 50)]
        slippage_bps: u64,
    },

    /// Effective amplification during a linear ramp
    Amp {
        /// Amplification at the start of the ramp
        #[arg(long)]
        amp: u64,

        /// Amplification at the end of the ramp
        #[arg(long)]
        target: u64,

        /// Ramp start (unix seconds)
        #[arg(long, allow_hyphen_values = true)]
        start: i64,

        /// Ramp end (unix seconds)
        #[arg(long, allow_hyphen_values = true)]
        end: i64,

        /// Time to evaluate at (unix seconds)
        #[arg(long, allow_hyphen_values = true)]
        now: i64,
    },

    /// Explain an on-chain error code or a transaction log line
    #[command(
        after_help = "\
EXAMPLES:
  aex402 error 6004
  aex402 error 0x1774
  aex402 error --log 'Program failed: custom program error: 0x1770'"
    )]
    Error {
        /// Decimal or 0x-prefixed hex error code
        #[arg(required_unless_present = "log")]
        code: Option<String>,

        /// Log line containing `custom program error: 0x…`
        #[arg(long, conflicts_with = "code")]
        log: Option<String>,
    },

    /// Print the effective program configuration as JSON
    Config,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    // When invoked with no arguments, show banner + full help and exit cleanly.
    if std::env::args().len() == 1 {
        print_banner();
        Cli::command().print_long_help().ok();
        println!();
        return Ok(());
    }

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref())?;

    match &cli.command {
        Commands::Detect { file, format } => {
            cmd_detect(&read_input(file, format)?, &config, cli.json);
        }
        Commands::Decode { file, format } => {
            cmd_decode(&read_input(file, format)?, &config)?;
        }
        Commands::Ix { file, format } => {
            cmd_ix(&read_input(file, format)?, cli.json);
        }
        Commands::Quote { bal_in, bal_out, amount_in, amp, fee_bps, admin_fee_pct, slippage_bps } => {
            cmd_quote(*bal_in, *bal_out, *amount_in, *amp, *fee_bps, *admin_fee_pct, *slippage_bps)?;
        }
        Commands::Amp { amp, target, start, end, now } => {
            cmd_amp(*amp, *target, *start, *end, *now, cli.json);
        }
        Commands::Error { code, log } => {
            cmd_error(code.as_deref(), log.as_deref(), cli.json)?;
        }
        Commands::Config => {
            println!("{}", config.to_json()?);
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ProgramConfig> {
    let Some(path) = path else {
        return Ok(ProgramConfig::default());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let config = ProgramConfig::from_json(&raw)
        .with_context(|| format!("parse config {}", path.display()))?;
    debug!(program_id = %config.program_id, "loaded config");
    Ok(config)
}

// ─── Input decoding ───────────────────────────────────────────────────────────

fn read_input(path: &Path, format: &InputFormat) -> Result<Vec<u8>> {
    let raw = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    decode_input(&raw, format).with_context(|| format!("decode {}", path.display()))
}

fn decode_input(raw: &[u8], format: &InputFormat) -> Result<Vec<u8>> {
    if !format.hex && !format.base64 {
        return Ok(raw.to_vec());
    }
    let text: String = std::str::from_utf8(raw)
        .context("input is not UTF-8 text")?
        .split_whitespace()
        .collect();
    if format.hex {
        let digits = text.strip_prefix("0x").unwrap_or(&text);
        Ok(hex::decode(digits)?)
    } else {
        Ok(base64::engine::general_purpose::STANDARD.decode(text)?)
    }
}

fn parse_code(code: &str) -> Result<u32> {
    let parsed = match code.strip_prefix("0x").or_else(|| code.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => code.parse(),
    };
    parsed.map_err(|_| anyhow!("'{code}' is not a decimal or 0x-prefixed hex code"))
}

// ─── detect ───────────────────────────────────────────────────────────────────

fn cmd_detect(data: &[u8], config: &ProgramConfig, json_output: bool) {
    let kind = detect_account_type(data, config);
    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "detect",
            "kind":    kind.name(),
            "len":     data.len(),
            "min_len": kind.min_len(),
        }));
    } else {
        println!("{kind}");
    }
}

// ─── decode ───────────────────────────────────────────────────────────────────

fn cmd_decode(data: &[u8], config: &ProgramConfig) -> Result<()> {
    let state = decode_account(data, config)?.ok_or_else(|| {
        let tag = data.get(..8).map(hex::encode).unwrap_or_else(|| "<short>".into());
        anyhow!("unrecognised account discriminator {tag}")
    })?;
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

// ─── ix ───────────────────────────────────────────────────────────────────────

fn cmd_ix(data: &[u8], json_output: bool) {
    let kind = detect_instruction(data);
    if json_output {
        println!("{}", json!({
            "status":        "ok",
            "command":       "ix",
            "instruction":   kind.name(),
            "discriminator": kind.discriminator().map(|d| format!("{d:#018x}")),
            "payload_len":   data.len().saturating_sub(8),
        }));
    } else {
        println!("{kind}");
    }
}

// ─── quote ────────────────────────────────────────────────────────────────────

fn cmd_quote(
    bal_in: u64,
    bal_out: u64,
    amount_in: u64,
    amp: u64,
    fee_bps: u64,
    admin_fee_pct: u64,
    slippage_bps: u64,
) -> Result<()> {
    if !check_amp(amp) {
        return Err(anyhow!("--amp {amp} is outside the program's accepted range"));
    }
    if slippage_bps > FEE_DENOMINATOR {
        return Err(anyhow!("--slippage-bps must be at most {FEE_DENOMINATOR}"));
    }
    let quote = quote_swap(bal_in, bal_out, amount_in, amp, fee_bps, admin_fee_pct, slippage_bps)
        .context("quote failed")?;
    println!("{}", serde_json::to_string_pretty(&quote)?);
    Ok(())
}

// ─── amp ──────────────────────────────────────────────────────────────────────

fn cmd_amp(amp: u64, target: u64, start: i64, end: i64, now: i64, json_output: bool) {
    let current = get_current_amp(amp, target, start, end, now);
    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "amp",
            "amp":     current,
            "ramping": now > start && now < end,
        }));
    } else {
        println!("{current}");
    }
}

// ─── error ────────────────────────────────────────────────────────────────────

fn cmd_error(code: Option<&str>, log: Option<&str>, json_output: bool) -> Result<()> {
    let err = match (code, log) {
        (_, Some(line)) => ProgramError::from_log(line)
            .ok_or_else(|| anyhow!("no known program error in log line"))?,
        (Some(code), None) => {
            let code = parse_code(code)?;
            ProgramError::from_code(code).ok_or_else(|| anyhow!("unknown error code {code}"))?
        }
        (None, None) => return Err(anyhow!("pass an error code or --log")),
    };
    if json_output {
        println!("{}", json!({
            "status":  "ok",
            "command": "error",
            "code":    err.code(),
            "name":    format!("{err:?}"),
            "message": err.message(),
        }));
    } else {
        println!("{} ({:#x})  {:?}: {}", err.code(), err.code(), err, err.message());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fmt(hex: bool, base64: bool) -> InputFormat {
        InputFormat { hex, base64 }
    }

    #[test]
    fn raw_input_passes_through() {
        assert_eq!(decode_input(&[0, 1, 2], &fmt(false, false)).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn hex_input_ignores_prefix_and_whitespace() {
        let out = decode_input(b"0x5041 5753\n4c4f4f50\n", &fmt(true, false)).unwrap();
        assert_eq!(out, b"PAWSLOOP");
    }

    #[test]
    fn base64_input() {
        assert_eq!(decode_input(b"AAEC\n", &fmt(false, true)).unwrap(), vec![0, 1, 2]);
        assert!(decode_input(b"not base64!", &fmt(false, true)).is_err());
    }

    #[test]
    fn error_codes_parse_in_both_radixes() {
        assert_eq!(parse_code("6004").unwrap(), 6004);
        assert_eq!(parse_code("0x1774").unwrap(), 6004);
        assert!(parse_code("slippage").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
