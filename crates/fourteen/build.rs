use std::{fs, path::PathBuf};

const NUM_CODEPOINTS: usize = 128;
const SEGMENT_BITS: u32 = 14;

type CharacterTable = [Option<u32>; NUM_CODEPOINTS];

/// Generate the character table Rust code that will be included in the crate.
fn generate_rust(table: &CharacterTable) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "static ENCODING: [Option<u32>; {}] = [\n",
        NUM_CODEPOINTS
    ));

    for (codepoint, entry) in table.iter().enumerate() {
        match entry {
            None => out.push_str("    None,\n"),
            Some(mask) => out.push_str(&format!(
                "    Some(0x{:04X}), // {:?}\n",
                mask,
                char::from(codepoint as u8)
            )),
        }
    }

    out.push_str("];\n");

    out
}

/// Parse a single `<char> <hex mask>` line.
fn parse_line(line: &str) -> Result<(char, u32), String> {
    let mut parts = line.split_whitespace();

    let symbol = parts.next().ok_or("missing character")?;
    let mut chars = symbol.chars();
    let character = match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => c,
        _ => return Err(format!("expected a single ASCII character, got {symbol:?}")),
    };

    let mask = parts.next().ok_or("missing segment mask")?;
    let mask = mask.strip_prefix("0x").unwrap_or(mask);
    let mask = u32::from_str_radix(mask, 16).map_err(|e| format!("invalid mask: {e}"))?;

    if mask >> SEGMENT_BITS != 0 {
        return Err(format!("mask 0x{mask:X} uses more than {SEGMENT_BITS} segments"));
    }

    if parts.next().is_some() {
        return Err("trailing data".into());
    }

    Ok((character, mask))
}

/// Load the character table, rejecting duplicate entries.
fn load_table(file: &str) -> CharacterTable {
    let mut table = [None; NUM_CODEPOINTS];

    for (lineno, line) in file.lines().enumerate() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (character, mask) = parse_line(line)
            .unwrap_or_else(|e| panic!("charset.txt line {}: {}", lineno + 1, e));

        let slot = &mut table[character as usize];
        if slot.is_some() {
            panic!("charset.txt line {}: duplicate entry for {:?}", lineno + 1, character);
        }
        *slot = Some(mask);
    }

    table
}

fn main() {
    let charset = fs::read_to_string("data/charset.txt").unwrap();

    let table = load_table(&charset);

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let out_file = out_dir.join("fourteen_segment_table.rs");

    fs::write(out_file, generate_rust(&table)).unwrap();

    println!("cargo:rerun-if-changed=data/charset.txt");
}
