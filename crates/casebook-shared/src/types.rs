use serde::{Deserialize, Serialize};

use crate::error::IdentityError;

// User identity = Ed25519 public key (32 bytes)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub [u8; 32]);

impl UserId {
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn from_hex(s: &str) -> Result<Self, IdentityError> {
        let bytes = hex::decode(s)?;
        if bytes.len() != 32 {
            return Err(IdentityError::InvalidKeyBytes);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    pub fn short(&self) -> String {
        self.to_hex()[..8].to_string()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Sequential case identifier assigned by the store.  Ids start at 1,
/// increase by one per created case, and are never reused.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CaseId(pub u64);

impl CaseId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for CaseId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CaseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_hex_round_trip() {
        let id = UserId([0x5A; 32]);
        let hex = id.to_hex();
        assert_eq!(hex.len(), 64);
        assert_eq!(UserId::from_hex(&hex).unwrap(), id);
    }

    #[test]
    fn user_id_rejects_wrong_length() {
        assert!(UserId::from_hex("deadbeef").is_err());
        assert!(UserId::from_hex("not hex at all").is_err());
    }

    #[test]
    fn case_id_ordering() {
        assert!(CaseId(1) < CaseId(2));
        assert_eq!(CaseId::from(7).as_u64(), 7);
    }
}
