//! Identifier codec
//!
//! [`ObjectId`] is the store-assigned native identifier. Its external form is
//! 24 lowercase hex characters; [`encode`] and [`decode`] convert between the
//! two at the store boundary.
//!
//! Layout (12 bytes, big-endian):
//!
//! | Bytes | Content |
//! |-------|---------|
//! | 0..4 | UNIX seconds at generation |
//! | 4..9 | Process-unique random value |
//! | 9..12 | Counter, random start, wraps at 2^24 |
//!
//! Byte order therefore follows generation order within a process, which is
//! what gives the store its native scan order.

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{Error, Result};

/// Length of the external (hex) form
pub const ENCODED_LEN: usize = 24;

const COUNTER_MASK: u32 = 0x00FF_FFFF;

static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::thread_rng().gen());

static COUNTER: Lazy<AtomicU32> =
    Lazy::new(|| AtomicU32::new(rand::thread_rng().gen::<u32>() & COUNTER_MASK));

/// Store-assigned document identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Generate a fresh identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use qatrack_core::ObjectId;
    ///
    /// let a = ObjectId::new();
    /// let b = ObjectId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0) as u32;
        let count = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&secs.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..12].copy_from_slice(&count.to_be_bytes()[1..4]);
        ObjectId(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        ObjectId(bytes)
    }

    /// Raw bytes
    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    /// Seconds component
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }

    /// External form (24 lowercase hex chars)
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse the external form
    ///
    /// Fails with [`Error::InvalidIdentifier`] on anything that is not exactly
    /// 24 hex characters.
    pub fn parse_str(s: &str) -> Result<Self> {
        if s.len() != ENCODED_LEN {
            return Err(Error::InvalidIdentifier {
                value: s.to_string(),
                reason: format!("expected {} hex characters, got {}", ENCODED_LEN, s.len()),
            });
        }
        let mut bytes = [0u8; 12];
        hex::decode_to_slice(s, &mut bytes).map_err(|e| Error::InvalidIdentifier {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(ObjectId(bytes))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ObjectId::parse_str(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ObjectId::parse_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Native → external
pub fn encode(id: &ObjectId) -> String {
    id.to_hex()
}

/// External → native
pub fn decode(s: &str) -> Result<ObjectId> {
    ObjectId::parse_str(s)
}
