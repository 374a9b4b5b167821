//! Bloom filter membership oracle.
//!
//! Probe positions use double hashing over two MurmurHash3 (x86, 32-bit)
//! digests of the lowercase word: probe `i` is `(h1 + i * h2) mod m`.

use super::{looks_playable, MembershipOracle, OracleError, MAX_WORD_LEN, MIN_WORD_LEN};
use serde::{Deserialize, Serialize};

const SEED_PRIMARY: u32 = 0x9747_b28c;
const SEED_SECONDARY: u32 = 0x5bd1_e995;

/// Shape of a filter as published next to its bit array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloomMeta {
    /// Number of bits
    pub m: u32,
    /// Number of probes per word
    pub k: u32,
}

/// Probabilistic word set: no false negatives, bounded false positives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BloomFilter {
    bits: Vec<u8>,
    meta: BloomMeta,
    min_len: usize,
    max_len: usize,
}

impl BloomFilter {
    /// Empty filter of `m` bits and `k` probes.
    pub fn new(m: u32, k: u32) -> Result<Self, OracleError> {
        let meta = BloomMeta { m, k };
        validate(meta)?;
        Ok(Self {
            bits: vec![0; byte_len(m)],
            meta,
            min_len: MIN_WORD_LEN,
            max_len: MAX_WORD_LEN,
        })
    }

    /// Wrap a published bit array.
    pub fn from_parts(bits: Vec<u8>, meta: BloomMeta) -> Result<Self, OracleError> {
        validate(meta)?;
        if bits.len() < byte_len(meta.m) {
            return Err(OracleError::InvalidBloom(format!(
                "{} bytes cannot hold {} bits",
                bits.len(),
                meta.m
            )));
        }
        Ok(Self {
            bits,
            meta,
            min_len: MIN_WORD_LEN,
            max_len: MAX_WORD_LEN,
        })
    }

    /// Wrap a published bit array whose metadata is a JSON `{"m":..,"k":..}`.
    pub fn from_json_meta(bits: Vec<u8>, meta_json: &str) -> Result<Self, OracleError> {
        let meta: BloomMeta = serde_json::from_str(meta_json)?;
        Self::from_parts(bits, meta)
    }

    /// Restrict lookups to words of `min..=max` letters.
    pub fn with_length_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_len = min;
        self.max_len = max;
        self
    }

    pub fn meta(&self) -> BloomMeta {
        self.meta
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn insert(&mut self, word: &str) {
        for pos in probes(self.meta, &word.to_ascii_lowercase()) {
            self.bits[pos / 8] |= 1 << (pos % 8);
        }
    }

    fn contains(&self, word: &str) -> bool {
        probes(self.meta, &word.to_ascii_lowercase())
            .all(|pos| self.bits[pos / 8] & (1 << (pos % 8)) != 0)
    }
}

impl MembershipOracle for BloomFilter {
    fn has(&self, word: &str) -> bool {
        looks_playable(word, self.min_len, self.max_len) && self.contains(word)
    }
}

fn validate(meta: BloomMeta) -> Result<(), OracleError> {
    if meta.m == 0 || meta.k == 0 {
        return Err(OracleError::InvalidBloom(format!(
            "m and k must be positive (m={}, k={})",
            meta.m, meta.k
        )));
    }
    Ok(())
}

fn byte_len(m: u32) -> usize {
    (m as usize).div_ceil(8)
}

fn probes(meta: BloomMeta, word: &str) -> impl Iterator<Item = usize> {
    let h1 = u64::from(murmur3_32(word.as_bytes(), SEED_PRIMARY));
    let h2 = u64::from(murmur3_32(word.as_bytes(), SEED_SECONDARY));
    let m = u64::from(meta.m);
    (0..u64::from(meta.k)).map(move |i| ((h1 + i * h2) % m) as usize)
}

/// MurmurHash3, x86 32-bit variant.
pub(crate) fn murmur3_32(bytes: &[u8], seed: u32) -> u32 {
    const C1: u32 = 0xcc9e_2d51;
    const C2: u32 = 0x1b87_3593;

    let mut h = seed;
    let mut chunks = bytes.chunks_exact(4);
    for chunk in &mut chunks {
        let k = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        h ^= k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
        h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut k = 0u32;
        for (i, &b) in tail.iter().enumerate() {
            k ^= u32::from(b) << (8 * i);
        }
        h ^= k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2);
    }

    h ^= bytes.len() as u32;
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn murmur_matches_reference_vectors() {
        assert_eq!(murmur3_32(b"", 0), 0);
        assert_eq!(murmur3_32(b"", 1), 0x514e_28b7);
        assert_eq!(
            murmur3_32(b"The quick brown fox jumps over the lazy dog", 0x9747_b28c),
            0x2fa8_26cd
        );
    }

    #[test]
    fn inserted_words_are_found() {
        let mut bloom = BloomFilter::new(4096, 4).unwrap();
        for word in ["crane", "slate", "planets", "word"] {
            bloom.insert(word);
        }

        assert!(bloom.has("CRANE"));
        assert!(bloom.has("slate"));
        assert!(bloom.has("Planets"));
        assert!(bloom.has("word"));
    }

    #[test]
    fn empty_filter_rejects_everything() {
        let bloom = BloomFilter::new(1024, 3).unwrap();
        assert!(!bloom.has("crane"));
    }

    #[test]
    fn unplayable_shapes_skip_probing() {
        let mut bloom = BloomFilter::new(1024, 3).unwrap();
        bloom.insert("cat");
        assert!(!bloom.has("cat"));

        let bloom = bloom.with_length_bounds(3, 3);
        assert!(bloom.has("cat"));
    }

    #[test]
    fn published_parts_round_trip() {
        let mut bloom = BloomFilter::new(2048, 5).unwrap();
        bloom.insert("apple");

        let meta_json = serde_json::to_string(&bloom.meta()).unwrap();
        let loaded = BloomFilter::from_json_meta(bloom.as_bytes().to_vec(), &meta_json).unwrap();
        assert!(loaded.has("APPLE"));
        assert_eq!(loaded, bloom);
    }

    #[test]
    fn rejects_inconsistent_parts() {
        assert!(BloomFilter::new(0, 3).is_err());
        assert!(BloomFilter::new(64, 0).is_err());
        assert!(BloomFilter::from_parts(vec![0; 2], BloomMeta { m: 64, k: 2 }).is_err());
        assert!(BloomFilter::from_json_meta(vec![0; 8], "{\"m\": 64}").is_err());
    }
}
