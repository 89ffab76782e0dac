use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use smyte_id::SmyteId;
use std::num::NonZeroU32;
use std::time::{SystemTime, UNIX_EPOCH};

/// Command-line arguments for the `smyte-id` binary.
///
/// Global options can also be supplied through environment variables (or a
/// `.env` file). Values are validated into a [`CliConfig`] before anything
/// runs.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "smyte-id",
    version,
    about = "Generate, inspect and route 64-bit SmyteIds"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// How ids are printed.
    ///
    /// Environment variable: `SMYTE_ID_OUTPUT`
    #[arg(long, global = true, env = "SMYTE_ID_OUTPUT", value_enum, default_value_t = OutputFormat::Decimal)]
    pub output: OutputFormat,

    /// Log line format on stderr. Verbosity is controlled by `RUST_LOG`.
    ///
    /// Environment variable: `SMYTE_ID_LOG_FORMAT`
    #[arg(long, global = true, env = "SMYTE_ID_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Derive an id from a log offset, timestamp and virtual shard.
    Generate {
        /// Upstream log offset; only `offset mod 1024` is kept.
        #[arg(long, allow_negative_numbers = true)]
        offset: i64,

        /// Event time in Unix milliseconds. Defaults to now.
        #[arg(long, allow_negative_numbers = true)]
        timestamp_ms: Option<i64>,

        /// Virtual shard in [0, 1024).
        #[arg(long)]
        virtual_shard: u16,
    },

    /// Decode an id given as decimal, 0x-prefixed hex or 13-char base32.
    Inspect {
        #[arg(allow_negative_numbers = true)]
        id: String,
    },

    /// Print the physical shard index of an id.
    Shard {
        #[arg(allow_negative_numbers = true)]
        id: String,

        /// Number of physical shards; must be positive. There is no default:
        /// routing against a guessed count would silently misplace ids.
        ///
        /// Environment variable: `SMYTE_ID_SHARD_COUNT`
        #[arg(long, env = "SMYTE_ID_SHARD_COUNT", allow_negative_numbers = true)]
        shard_count: i64,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Decimal,
    Hex,
    Base32,
    Bytes,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// A validated command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Generate {
        offset: i64,
        timestamp_ms: i64,
        virtual_shard: u16,
    },
    Inspect {
        id: SmyteId,
    },
    Shard {
        id: SmyteId,
        shard_count: NonZeroU32,
    },
}

#[derive(Debug, Clone)]
pub struct CliConfig {
    pub action: Action,
    pub output: OutputFormat,
    pub log_format: LogFormat,
}

impl TryFrom<CliArgs> for CliConfig {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        let action = match args.command {
            Command::Generate {
                offset,
                timestamp_ms,
                virtual_shard,
            } => {
                if i64::from(virtual_shard) >= SmyteId::VIRTUAL_SHARD_COUNT {
                    bail!(
                        "--virtual-shard ({}) must be below {}",
                        virtual_shard,
                        SmyteId::VIRTUAL_SHARD_COUNT
                    );
                }
                let timestamp_ms = match timestamp_ms {
                    Some(ts) => ts,
                    None => now_millis()?,
                };
                if !(SmyteId::MIN_TIMESTAMP..=SmyteId::MAX_TIMESTAMP).contains(&timestamp_ms) {
                    bail!(
                        "--timestamp-ms ({}) must be within [{}, {}]",
                        timestamp_ms,
                        SmyteId::MIN_TIMESTAMP,
                        SmyteId::MAX_TIMESTAMP
                    );
                }
                Action::Generate {
                    offset,
                    timestamp_ms,
                    virtual_shard,
                }
            }
            Command::Inspect { id } => Action::Inspect { id: parse_id(&id)? },
            Command::Shard { id, shard_count } => {
                let Some(count) = u32::try_from(shard_count).ok().and_then(NonZeroU32::new) else {
                    bail!("--shard-count ({shard_count}) must be in [1, {}]", u32::MAX);
                };
                Action::Shard {
                    id: parse_id(&id)?,
                    shard_count: count,
                }
            }
        };

        Ok(Self {
            action,
            output: args.output,
            log_format: args.log_format,
        })
    }
}

/// Parses an id from decimal, `0x`-prefixed hex of the raw 64 bits, or the
/// 13-character Crockford base32 form.
pub fn parse_id(input: &str) -> anyhow::Result<SmyteId> {
    let input = input.trim();
    if let Some(hex) = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        let raw = u64::from_str_radix(hex, 16)
            .with_context(|| format!("invalid hex id {input:?}"))?;
        return Ok(SmyteId::from_be_bytes(raw.to_be_bytes()));
    }

    let digits = input.strip_prefix('-').unwrap_or(input);
    if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
        return input
            .parse::<SmyteId>()
            .with_context(|| format!("invalid decimal id {input:?}"));
    }

    if input.len() == SmyteId::BASE32_SIZE {
        return SmyteId::decode(input).with_context(|| format!("invalid base32 id {input:?}"));
    }

    bail!("unrecognized id {input:?}: expected decimal, 0x-prefixed hex or 13-char base32")
}

fn now_millis() -> anyhow::Result<i64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock is before the Unix epoch")?;
    i64::try_from(elapsed.as_millis()).context("system clock overflows i64 milliseconds")
}
