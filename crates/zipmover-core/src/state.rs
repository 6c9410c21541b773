//! Integrity state of an archive mover.

use crate::ContentHash;

/// Whether a mover has a pack-time digest to verify against.
///
/// `Packed` is only ever entered by a successful pack; nothing moves a mover
/// back to `Empty` except a pack whose artifact could not be hashed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IntegrityState {
    /// No successful pack yet; unpack is refused.
    #[default]
    Empty,
    /// Archive written and hashed.
    Packed(ContentHash),
}

impl IntegrityState {
    /// Returns the recorded digest, if any.
    #[must_use]
    pub const fn hash(&self) -> Option<&ContentHash> {
        match self {
            Self::Empty => None,
            Self::Packed(hash) => Some(hash),
        }
    }

    /// Returns `true` once a pack has succeeded.
    #[must_use]
    pub const fn is_packed(&self) -> bool {
        matches!(self, Self::Packed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty() {
        let state = IntegrityState::default();
        assert_eq!(state, IntegrityState::Empty);
        assert!(!state.is_packed());
        assert!(state.hash().is_none());
    }

    #[test]
    fn test_packed_exposes_hash() {
        let hash = ContentHash::of_bytes(b"archive");
        let state = IntegrityState::Packed(hash.clone());
        assert!(state.is_packed());
        assert_eq!(state.hash(), Some(&hash));
    }
}
