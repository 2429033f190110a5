//! Conversion of legacy Namada addresses and keys to the new address format.
//!
//! Every value is a bech32m string. The conversion depends on the legacy
//! human readable prefix:
//!
//! | Legacy prefix | New prefix | Payload |
//! |---------------|------------|---------|
//! | `atest` | `tnam` | `<kind>::<data>` string → 21 byte [`RawAddress`] |
//! | `patest` | `znam` | flag byte `0` + original payload |
//! | `ppatest` | `znam` | flag byte `1` + original payload |
//! | `xsktest` | `zsknam` | unchanged |
//! | `xfvktest` | `zvknam` | unchanged |
//! | `pktest` | `tpknam` | unchanged |
//! | `dpktest` | `dpknam` | unchanged |
//! | `sigtest` | `signam` | unchanged |
//!
//! # Examples
//!
//! ```rust
//! use wasm_addrconv::{convert_address, decode_address, Discriminant};
//!
//! let new = convert_address(
//!     "atest1v4ehgw36vy6k2drzxpnxyc34v5exvcfhv43nwetrxpjrvc3kvgmkyvnrxuek2drrx4snze3jh95w0w",
//! )?;
//! assert_eq!(new, "tnam1qxj7fv8mkh305lk8asxkk6mm93e7f3dp7gk3leh8");
//! assert_eq!(decode_address(&new)?.discriminant(), Discriminant::Established);
//! # Ok::<(), wasm_addrconv::AddressError>(())
//! ```

pub mod bech32m;
mod legacy;
pub mod prefixes;
mod raw;

pub use legacy::{BuiltinAddress, LegacyAddress};
pub use prefixes::{OldPrefix, HRP_ADDRESS_NEW, HRP_PAYMENT_ADDRESS_NEW, HRP_PUBLIC_KEY_NEW};
pub use raw::{Discriminant, RawAddress, HASH_LEN, RAW_ADDRESS_LEN};

use miniscript::bitcoin::hashes::{sha256, Hash};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    DecodeChecksum(String),
    UnknownPrefix(String),
    MalformedLegacyAddress(String),
    UnknownAddressKind(String),
    InvalidHexPayload(String),
    InvalidRawAddress(String),
    Encode(String),
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressError::DecodeChecksum(msg) => write!(f, "Bech32m decoding failed: {}", msg),
            AddressError::UnknownPrefix(hrp) => write!(f, "Invalid HRP: {}", hrp),
            AddressError::MalformedLegacyAddress(msg) => {
                write!(f, "Unexpected legacy address format: {}", msg)
            }
            AddressError::UnknownAddressKind(msg) => write!(f, "Unknown address kind: {}", msg),
            AddressError::InvalidHexPayload(msg) => write!(f, "Invalid hex payload: {}", msg),
            AddressError::InvalidRawAddress(msg) => write!(f, "Invalid raw address: {}", msg),
            AddressError::Encode(msg) => write!(f, "Bech32m encoding failed: {}", msg),
        }
    }
}

impl std::error::Error for AddressError {}

pub type Result<T> = std::result::Result<T, AddressError>;

/// Convert a legacy address or key to the new format.
pub fn convert_address(old_address: &str) -> Result<String> {
    let (hrp, data) = bech32m::decode(old_address)?;
    let prefix = OldPrefix::from_hrp(&hrp).ok_or(AddressError::UnknownPrefix(hrp))?;

    let new_data = match prefix {
        OldPrefix::Address => {
            let raw = LegacyAddress::parse(&data)?.to_raw()?;
            raw.to_bytes().to_vec()
        }
        OldPrefix::PaymentAddressUnpinned => payment_address_data(false, &data),
        OldPrefix::PaymentAddressPinned => payment_address_data(true, &data),
        OldPrefix::SpendingKey
        | OldPrefix::ViewingKey
        | OldPrefix::PublicKey
        | OldPrefix::ThresholdKey
        | OldPrefix::Signature => data,
    };

    bech32m::encode(prefix.new_hrp(), &new_data)
}

/// Derive the implicit address of a public key given in the new format.
///
/// The identifier is the first 20 bytes of the SHA-256 digest of the encoded
/// key bytes.
pub fn public_key_to_implicit_address(public_key: &str) -> Result<String> {
    let (hrp, key_data) = bech32m::decode(public_key)?;
    if hrp != HRP_PUBLIC_KEY_NEW {
        return Err(AddressError::UnknownPrefix(hrp));
    }

    let digest = sha256::Hash::hash(&key_data).to_byte_array();
    let mut hash = [0u8; HASH_LEN];
    hash.copy_from_slice(&digest[..HASH_LEN]);

    let raw = RawAddress::new(Discriminant::Implicit, hash);
    bech32m::encode(HRP_ADDRESS_NEW, &raw.to_bytes())
}

/// Decode a new-format transparent address into its binary form.
pub fn decode_address(address: &str) -> Result<RawAddress> {
    let (hrp, data) = bech32m::decode(address)?;
    if hrp != HRP_ADDRESS_NEW {
        return Err(AddressError::UnknownPrefix(hrp));
    }
    RawAddress::from_bytes(&data)
}

fn payment_address_data(pinned: bool, data: &[u8]) -> Vec<u8> {
    let mut new_data = Vec::with_capacity(data.len() + 1);
    new_data.push(u8::from(pinned));
    new_data.extend_from_slice(data);
    new_data
}
