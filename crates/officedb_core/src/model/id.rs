//! Store-native document identifier and its wire codec.
//!
//! # Responsibility
//! - Represent the 12-byte native id assigned by the store on insert.
//! - Encode ids as 24 lowercase hex digits and decode them back.
//!
//! # Invariants
//! - `ObjectId::parse_str` accepts exactly 24 hex digits, nothing else.
//! - `ObjectId::to_hex` is total and round-trips through `parse_str`.
//! - Ids generated in one process never repeat.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

const OBJECT_ID_LEN: usize = 12;
const COUNTER_MASK: u32 = 0x00ff_ffff;

static HEX_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9a-fA-F]{24}$").expect("valid object id regex"));

// 5 random bytes fixed for the process lifetime, plus a randomly seeded counter.
static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let mut bytes = [0_u8; 5];
    bytes.copy_from_slice(&random.as_bytes()[..5]);
    bytes
});
static COUNTER: Lazy<AtomicU32> = Lazy::new(|| {
    let random = Uuid::new_v4();
    let bytes = random.as_bytes();
    AtomicU32::new(u32::from_be_bytes([0, bytes[0], bytes[1], bytes[2]]))
});

/// Error returned when an id string is not a valid store id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdError {
    input: String,
}

impl IdError {
    /// Returns the rejected input (at most 64 characters).
    pub fn input(&self) -> &str {
        self.input.as_str()
    }
}

impl Display for IdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid id `{}`: expected 24 hexadecimal characters",
            self.input
        )
    }
}

impl Error for IdError {}

/// Store-native document id: 4-byte timestamp, 5 process bytes, 3-byte counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; OBJECT_ID_LEN]);

impl ObjectId {
    /// Generates a fresh id for a new document.
    pub fn new() -> Self {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed) & COUNTER_MASK;

        let mut bytes = [0_u8; OBJECT_ID_LEN];
        // Truncation to 32 bits matches the classic layout (wraps in 2106).
        bytes[..4].copy_from_slice(&(seconds as u32).to_be_bytes());
        bytes[4..9].copy_from_slice(PROCESS_UNIQUE.as_slice());
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Wraps raw id bytes read back from storage.
    pub const fn from_bytes(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self(bytes)
    }

    /// Decodes the wire form of an id.
    ///
    /// # Errors
    /// - Returns `IdError` unless `value` is exactly 24 hex digits.
    pub fn parse_str(value: &str) -> Result<Self, IdError> {
        if !HEX_ID_RE.is_match(value) {
            return Err(IdError {
                input: value.chars().take(64).collect(),
            });
        }

        let mut bytes = [0_u8; OBJECT_ID_LEN];
        for (index, byte) in bytes.iter_mut().enumerate() {
            let pair = &value[index * 2..index * 2 + 2];
            *byte = u8::from_str_radix(pair, 16).map_err(|_| IdError {
                input: value.chars().take(64).collect(),
            })?;
        }
        Ok(Self(bytes))
    }

    /// Encodes the id into its 24-character lowercase hex wire form.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|byte| format!("{byte:02x}")).collect()
    }

    /// Raw bytes, as persisted in the store key column.
    pub fn bytes(&self) -> [u8; OBJECT_ID_LEN] {
        self.0
    }

    /// Creation time embedded in the id, in seconds since the Unix epoch.
    pub fn timestamp_secs(&self) -> u32 {
        u32::from_be_bytes([self.0[0], self.0[1], self.0[2], self.0[3]])
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for ObjectId {
    type Err = IdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse_str(value)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectId;

    #[test]
    fn generated_ids_carry_current_timestamp() {
        let id = ObjectId::new();
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("system time should be after unix epoch")
            .as_secs() as u32;
        assert!(now.abs_diff(id.timestamp_secs()) <= 1);
    }

    #[test]
    fn consecutive_ids_share_process_bytes_and_differ_in_counter() {
        let first = ObjectId::new().bytes();
        let second = ObjectId::new().bytes();
        assert_eq!(first[4..9], second[4..9]);
        assert_ne!(first[9..], second[9..]);
    }
}
