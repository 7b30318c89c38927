/// Bytes per line in [`hex_dump`] output
pub const DUMP_LINE_WIDTH: usize = 16;

/// Render bytes as newline-framed lines of space separated hex, 16 per line.
///
/// The output starts and ends with a newline so it can be embedded between
/// labels in a diagnostic message.
pub fn hex_dump(data: &[u8]) -> String {
    let mut dump = String::from("\n");
    for (line, chunk) in data.chunks(DUMP_LINE_WIDTH).enumerate() {
        let bytes: Vec<String> = chunk.iter().map(|b| format!("{:02x}", b)).collect();
        dump.push_str(&format!(
            "{:04x}: {}\n",
            line * DUMP_LINE_WIDTH,
            bytes.join(" ")
        ));
    }
    dump
}

/// Concatenate multiple byte slices efficiently
pub fn concat_bytes(slices: &[&[u8]]) -> Vec<u8> {
    let total_len = slices.iter().map(|s| s.len()).sum();
    let mut result = Vec::with_capacity(total_len);
    for slice in slices {
        result.extend_from_slice(slice);
    }
    result
}
