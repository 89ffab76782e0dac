use crate::config::{Action, CliConfig, OutputFormat};
use anyhow::Context;
use smyte_id::SmyteId;

/// Executes the validated action and returns what should be printed.
pub fn run(config: &CliConfig) -> anyhow::Result<String> {
    match config.action {
        Action::Generate {
            offset,
            timestamp_ms,
            virtual_shard,
        } => {
            let id = SmyteId::try_generate_from_offset(offset, timestamp_ms, virtual_shard)
                .with_context(|| format!("failed to generate id for offset {offset}"))?;
            tracing::debug!(%id, offset, timestamp_ms, virtual_shard, "generated id");
            Ok(format_id(id, config.output))
        }
        Action::Inspect { id } => {
            if !id.is_valid() {
                tracing::warn!(%id, "sign bit is set; this id was not generated from an offset");
            }
            Ok(describe(id, config.output))
        }
        Action::Shard { id, shard_count } => {
            let index = id.shard_index(shard_count);
            tracing::debug!(%id, shard_count = shard_count.get(), index, "computed shard index");
            Ok(index.to_string())
        }
    }
}

pub fn format_id(id: SmyteId, output: OutputFormat) -> String {
    match output {
        OutputFormat::Decimal => id.to_string(),
        OutputFormat::Hex => format!("0x{id:016x}"),
        OutputFormat::Base32 => id.encode(),
        OutputFormat::Bytes => hex_bytes(&id.to_bytes()),
    }
}

fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Multi-line field breakdown printed by `inspect`.
///
/// The first line uses the selected output format; the rest are fixed.
pub fn describe(id: SmyteId, output: OutputFormat) -> String {
    let virtual_shard = id
        .virtual_shard()
        .map_or_else(|| "none".to_owned(), |shard| shard.to_string());
    [
        format!("id            : {}", format_id(id, output)),
        format!("hex           : 0x{id:016x}"),
        format!("base32        : {}", id.encode()),
        format!("bytes         : {}", hex_bytes(&id.to_bytes())),
        format!("timestamp_ms  : {}", id.timestamp()),
        format!("unique        : {}", id.unique()),
        format!("machine       : {}", id.machine()),
        format!("virtual_shard : {virtual_shard}"),
        format!("valid         : {}", id.is_valid()),
    ]
    .join("\n")
}
