//! Binary layout of new transparent addresses.
//!
//! A raw address is always 21 bytes: a discriminant byte followed by a 20 byte
//! identifier. Built-in protocol addresses carry no data and use an all-zero
//! identifier.

use super::{AddressError, Result};
use std::fmt;

/// Length of the identifier that follows the discriminant.
pub const HASH_LEN: usize = 20;
/// Total length of a raw address.
pub const RAW_ADDRESS_LEN: usize = HASH_LEN + 1;

/// Leading byte of a raw address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Discriminant {
    Implicit = 0,
    Established = 1,
    ProofOfStake = 2,
    PosSlashPool = 3,
    Parameters = 4,
    Governance = 5,
    Ibc = 6,
    EthBridge = 7,
    EthBridgePool = 8,
    Multitoken = 9,
    Pgf = 10,
    Erc20 = 11,
    Nut = 12,
    IbcToken = 13,
}

impl Discriminant {
    pub const ALL: [Discriminant; 14] = [
        Discriminant::Implicit,
        Discriminant::Established,
        Discriminant::ProofOfStake,
        Discriminant::PosSlashPool,
        Discriminant::Parameters,
        Discriminant::Governance,
        Discriminant::Ibc,
        Discriminant::EthBridge,
        Discriminant::EthBridgePool,
        Discriminant::Multitoken,
        Discriminant::Pgf,
        Discriminant::Erc20,
        Discriminant::Nut,
        Discriminant::IbcToken,
    ];

    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Built-in protocol addresses, whose identifier is all zero.
    pub const fn is_dataless(self) -> bool {
        matches!(
            self,
            Discriminant::ProofOfStake
                | Discriminant::PosSlashPool
                | Discriminant::Parameters
                | Discriminant::Governance
                | Discriminant::Ibc
                | Discriminant::EthBridge
                | Discriminant::EthBridgePool
                | Discriminant::Multitoken
                | Discriminant::Pgf
        )
    }
}

impl TryFrom<u8> for Discriminant {
    type Error = AddressError;

    fn try_from(value: u8) -> Result<Self> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| AddressError::InvalidRawAddress(format!("unknown discriminant {}", value)))
    }
}

/// A new-format transparent address in its binary form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawAddress {
    discriminant: Discriminant,
    hash: [u8; HASH_LEN],
}

impl RawAddress {
    pub const fn new(discriminant: Discriminant, hash: [u8; HASH_LEN]) -> Self {
        Self { discriminant, hash }
    }

    /// A built-in address with an all-zero identifier.
    pub const fn dataless(discriminant: Discriminant) -> Self {
        Self::new(discriminant, [0u8; HASH_LEN])
    }

    pub const fn discriminant(&self) -> Discriminant {
        self.discriminant
    }

    pub const fn hash(&self) -> &[u8; HASH_LEN] {
        &self.hash
    }

    pub fn to_bytes(&self) -> [u8; RAW_ADDRESS_LEN] {
        let mut bytes = [0u8; RAW_ADDRESS_LEN];
        bytes[0] = self.discriminant.to_u8();
        bytes[1..].copy_from_slice(&self.hash);
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != RAW_ADDRESS_LEN {
            return Err(AddressError::InvalidRawAddress(format!(
                "expected {} bytes, got {}",
                RAW_ADDRESS_LEN,
                bytes.len()
            )));
        }
        let discriminant = Discriminant::try_from(bytes[0])?;
        let mut hash = [0u8; HASH_LEN];
        hash.copy_from_slice(&bytes[1..]);
        Ok(Self::new(discriminant, hash))
    }
}

impl fmt::Display for RawAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.discriminant, hex::encode(self.hash))
    }
}
