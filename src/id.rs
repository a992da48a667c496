use std::str::FromStr;
use std::fmt;

/// Width of a SHA-1 object identifier, the only hash a packfile here may use.
pub const ID_LEN: usize = 20;

#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id([u8; ID_LEN]);

impl Id {
    pub fn from_bytes(inp: &[u8]) -> Option<Id> {
        if inp.len() != ID_LEN {
            return None
        }

        let mut dst = [0u8; ID_LEN];
        dst.copy_from_slice(inp);
        Some(Id(dst))
    }
}

impl From<[u8; ID_LEN]> for Id {
    fn from(bytes: [u8; ID_LEN]) -> Self {
        Id(bytes)
    }
}

impl AsRef<[u8]> for Id {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Id {
    type Err = hex::FromHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut dst = [0u8; ID_LEN];
        hex::decode_to_slice(s.trim(), &mut dst)?;
        Ok(Id(dst))
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "Id({})", hex::encode(self.0))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(&hex::encode(self.0))
    }
}
