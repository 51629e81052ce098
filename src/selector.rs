// Reduces a digest, read as a big-endian unsigned integer, modulo the
// alphabet size. Horner's rule keeps the running residue below the alphabet
// length, so no arbitrary-precision arithmetic is needed. The small modulo
// bias for alphabet sizes that do not evenly divide the digest range is
// accepted behavior.
pub fn select(digest: &[u8], alphabet: &[char]) -> char {
    debug_assert!(!alphabet.is_empty());

    let len = alphabet.len() as u64;
    let mut index: u64 = 0;
    for &byte in digest {
        index = (index * 256 + u64::from(byte)) % len;
    }

    alphabet[index as usize]
}
