use crate::SmyteId;
use core::fmt;

struct Field {
    name: &'static str,
    bits: u32,
    value: i64,
}

fn center(s: &str, width: usize) -> String {
    let pad = width.saturating_sub(s.len());
    let left = pad / 2;
    format!("{}{}{}", " ".repeat(left), s, " ".repeat(pad - left))
}

fn write_border(f: &mut fmt::Formatter<'_>, columns: &[usize]) -> fmt::Result {
    write!(f, "        +")?;
    for &w in columns {
        write!(f, "{}+", "-".repeat(w))?;
    }
    writeln!(f)
}

/// Renders the packed fields of `id` as a table, MSB first.
pub(super) fn write_bit_layout(f: &mut fmt::Formatter<'_>, id: &SmyteId) -> fmt::Result {
    let fields = [
        Field {
            name: "sign",
            bits: 1,
            value: i64::from(id.raw() < 0),
        },
        Field {
            name: "timestamp",
            bits: SmyteId::TIMESTAMP_BITS,
            value: id.shifted_timestamp(),
        },
        Field {
            name: "unique",
            bits: SmyteId::UNIQUE_BITS,
            value: i64::from(id.unique()),
        },
        Field {
            name: "machine",
            bits: SmyteId::MACHINE_BITS,
            value: i64::from(id.machine().to_raw()),
        },
    ];

    let rows: Vec<[String; 3]> = fields
        .iter()
        .map(|field| {
            [
                format!("{} ({})", field.name, field.bits),
                field.value.to_string(),
                format!("0x{:x}", field.value),
            ]
        })
        .collect();
    let columns: Vec<usize> = rows
        .iter()
        .map(|row| row.iter().map(String::len).max().unwrap_or(0) + 2)
        .collect();

    writeln!(f, "SmyteId {{")?;
    writeln!(f, "    raw id     : 0x{:016x} ({})", id.raw(), id.raw())?;
    writeln!(f, "    timestamp  : {}", id.timestamp())?;
    match id.virtual_shard() {
        Some(shard) => writeln!(f, "    shard      : {shard}")?,
        None => writeln!(f, "    shard      : none")?,
    }
    writeln!(f, "    layout     :")?;
    write_border(f, &columns)?;
    for line in 0..3 {
        write!(f, "        |")?;
        for (row, &w) in rows.iter().zip(&columns) {
            write!(f, "{}|", center(&row[line], w))?;
        }
        writeln!(f)?;
        if line == 0 {
            write_border(f, &columns)?;
        }
    }
    write_border(f, &columns)?;
    write!(f, "}}")
}
