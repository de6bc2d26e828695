use rand::RngExt;

const HEX: &[u8; 16] = b"0123456789abcdef";

/// Generate a random lowercase hex token of `len` characters.
///
/// Used to derive collision-free media file names.
pub fn random_hex_token(len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    let mut rng = rand::rng();
    rng.fill(&mut bytes[..]);

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in &bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0f) as usize] as char);
    }
    out.truncate(len);
    out
}
