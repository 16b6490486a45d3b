// libtappy/src/protocol/checksum.rs

/// Compute the Length Checksum (LCS) over the two length bytes.
/// LCS = 0x100 - (L1 + L2) (mod 256)
pub fn lcs(l1: u8, l2: u8) -> u8 {
    0u8.wrapping_sub(l1.wrapping_add(l2))
}

/// Compute the Data Checksum (DCS) over the payload.
/// DCS = 0x100 - (sum(payload) & 0xff)
pub fn dcs(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
    0u8.wrapping_sub(sum)
}

/// True when the length header sums to zero modulo 256.
pub fn lcs_valid(l1: u8, l2: u8, lcs: u8) -> bool {
    l1.wrapping_add(l2).wrapping_add(lcs) == 0
}

/// True when the payload plus its trailing checksum sums to zero modulo 256.
pub fn dcs_valid(payload: &[u8], dcs: u8) -> bool {
    payload
        .iter()
        .fold(dcs, |acc, &b| acc.wrapping_add(b))
        == 0
}
