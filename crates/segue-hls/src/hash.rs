use std::fmt;

use sha2::{Digest, Sha256};

/// Digest of raw playlist bytes, used for change detection between refetches.
///
/// Byte-identical inputs always produce the same hash, so replaying the same
/// playlist text never causes a cache replacement.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[must_use]
    pub fn of(data: &[u8]) -> ContentHash {
        let hash = Sha256::digest(data);
        ContentHash(hash.into())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_input_produces_identical_hash() {
        let a = ContentHash::of(b"#EXTM3U\n#EXT-X-TARGETDURATION:6\n");
        let b = ContentHash::of(b"#EXTM3U\n#EXT-X-TARGETDURATION:6\n");
        assert_eq!(a, b);
    }

    #[test]
    fn different_input_produces_different_hash() {
        let a = ContentHash::of(b"#EXTM3U\nseg1.ts\n");
        let b = ContentHash::of(b"#EXTM3U\nseg2.ts\n");
        assert_ne!(a, b);
    }

    #[test]
    fn display_is_fixed_width_lowercase_hex() {
        let rendered = ContentHash::of(b"").to_string();
        assert_eq!(rendered.len(), 64);
        assert!(rendered.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(rendered, rendered.to_lowercase());
    }
}
