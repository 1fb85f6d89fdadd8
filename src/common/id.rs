use rand::RngExt;

const HEX_LOWER: &[u8; 16] = b"0123456789abcdef";

/// Generate a random RFC4122 v4 GUID as raw 16 bytes
pub fn generate_guid_bytes() -> [u8; 16] {
    let mut bytes = [0u8; 16];
    let mut rng = rand::rng();
    rng.fill(&mut bytes);
    // RFC4122 v4
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;
    bytes
}

/// Generate a random identifier in the form xxxxxxxx-xxxx-4xxx-yxxx-xxxxxxxxxxxx
///
/// Used for slide and element ids.
pub fn generate_id() -> String {
    format_guid_hyphenated(&generate_guid_bytes())
}

/// Format raw GUID bytes as a lowercase hyphenated string.
pub fn format_guid_hyphenated(bytes: &[u8; 16]) -> String {
    let mut out = String::with_capacity(36);
    for (i, byte) in bytes.iter().enumerate() {
        if matches!(i, 4 | 6 | 8 | 10) {
            out.push('-');
        }
        out.push(HEX_LOWER[(byte >> 4) as usize] as char);
        out.push(HEX_LOWER[(byte & 0x0f) as usize] as char);
    }
    out
}
