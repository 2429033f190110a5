//! Payload of legacy transparent addresses.
//!
//! A legacy address encodes a 45 byte string: a three letter kind tag, `::`,
//! and 40 characters. For most kinds the 40 characters are the hex encoded
//! identifier. Built-in protocol addresses are instead fixed, space padded
//! names which must match byte for byte.

use super::raw::{Discriminant, RawAddress, HASH_LEN};
use super::{AddressError, Result};

const TAG_LEN: usize = 3;
const PAYLOAD_LEN: usize = 2 * HASH_LEN;

const TAG_IMPLICIT: &str = "imp";
const TAG_ESTABLISHED: &str = "est";
const TAG_INTERNAL: &str = "ano";
const TAG_IBC: &str = "ibc";
const TAG_ETH: &str = "eth";
const TAG_NUT: &str = "nut";

/// Built-in protocol addresses of the legacy encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinAddress {
    ProofOfStake,
    PosSlashPool,
    Parameters,
    Governance,
    Ibc,
    EthBridge,
    EthBridgePool,
    ReplayProtection,
    Multitoken,
    Pgf,
}

impl BuiltinAddress {
    pub const ALL: [BuiltinAddress; 10] = [
        BuiltinAddress::ProofOfStake,
        BuiltinAddress::PosSlashPool,
        BuiltinAddress::Parameters,
        BuiltinAddress::Governance,
        BuiltinAddress::Ibc,
        BuiltinAddress::EthBridge,
        BuiltinAddress::EthBridgePool,
        BuiltinAddress::ReplayProtection,
        BuiltinAddress::Multitoken,
        BuiltinAddress::Pgf,
    ];

    /// The exact legacy payload of this address.
    pub const fn legacy_str(self) -> &'static str {
        match self {
            BuiltinAddress::ProofOfStake => "ano::Proof of Stake                          ",
            BuiltinAddress::PosSlashPool => "ano::Proof of Stake Slash Pool               ",
            BuiltinAddress::Parameters => "ano::Protocol Parameters                     ",
            BuiltinAddress::Governance => "ano::Governance                              ",
            BuiltinAddress::Ibc => "ibc::Inter-Blockchain Communication          ",
            BuiltinAddress::EthBridge => "ano::ETH Bridge Address                      ",
            BuiltinAddress::EthBridgePool => "ano::ETH Bridge Pool Address                 ",
            BuiltinAddress::ReplayProtection => "ano::Replay Protection                       ",
            BuiltinAddress::Multitoken => "ano::Multitoken                              ",
            BuiltinAddress::Pgf => "ano::Pgf                                     ",
        }
    }

    pub fn from_legacy_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.legacy_str() == s)
    }

    /// The discriminant of the new encoding. Replay protection was dropped from
    /// the protocol and has no counterpart.
    pub const fn discriminant(self) -> Option<Discriminant> {
        match self {
            BuiltinAddress::ProofOfStake => Some(Discriminant::ProofOfStake),
            BuiltinAddress::PosSlashPool => Some(Discriminant::PosSlashPool),
            BuiltinAddress::Parameters => Some(Discriminant::Parameters),
            BuiltinAddress::Governance => Some(Discriminant::Governance),
            BuiltinAddress::Ibc => Some(Discriminant::Ibc),
            BuiltinAddress::EthBridge => Some(Discriminant::EthBridge),
            BuiltinAddress::EthBridgePool => Some(Discriminant::EthBridgePool),
            BuiltinAddress::ReplayProtection => None,
            BuiltinAddress::Multitoken => Some(Discriminant::Multitoken),
            BuiltinAddress::Pgf => Some(Discriminant::Pgf),
        }
    }
}

/// A parsed legacy transparent address payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegacyAddress<'a> {
    /// Hex encoded identifier with the discriminant it maps to.
    Hashed(Discriminant, &'a str),
    Builtin(BuiltinAddress),
}

impl<'a> LegacyAddress<'a> {
    /// Parse the payload of an `atest` address.
    ///
    /// Built-in names are compared before the `ibc` tag falls back to a hex
    /// identifier, so the IBC built-in never decodes as an IBC token.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let text = std::str::from_utf8(data).map_err(|e| {
            AddressError::MalformedLegacyAddress(format!("payload is not valid utf-8: {}", e))
        })?;

        let (tag, payload) = match text.split_once("::") {
            Some((tag, payload)) if tag.len() == TAG_LEN && payload.len() == PAYLOAD_LEN => {
                (tag, payload)
            }
            _ => {
                return Err(AddressError::MalformedLegacyAddress(format!(
                    "expected <{}-char kind>::<{}-char payload>, got {:?}",
                    TAG_LEN, PAYLOAD_LEN, text
                )))
            }
        };

        match tag {
            TAG_IMPLICIT => Ok(LegacyAddress::Hashed(Discriminant::Implicit, payload)),
            TAG_ESTABLISHED => Ok(LegacyAddress::Hashed(Discriminant::Established, payload)),
            TAG_INTERNAL => match BuiltinAddress::from_legacy_str(text) {
                Some(builtin) => Ok(LegacyAddress::Builtin(builtin)),
                None => Err(AddressError::UnknownAddressKind(format!(
                    "unknown internal address {:?}",
                    text.trim_end()
                ))),
            },
            TAG_IBC => match BuiltinAddress::from_legacy_str(text) {
                Some(builtin) => Ok(LegacyAddress::Builtin(builtin)),
                None => Ok(LegacyAddress::Hashed(Discriminant::IbcToken, payload)),
            },
            TAG_ETH => Ok(LegacyAddress::Hashed(Discriminant::Erc20, payload)),
            TAG_NUT => Ok(LegacyAddress::Hashed(Discriminant::Nut, payload)),
            other => Err(AddressError::UnknownAddressKind(format!(
                "unknown address kind {:?}",
                other
            ))),
        }
    }

    pub fn to_raw(&self) -> Result<RawAddress> {
        match *self {
            LegacyAddress::Hashed(discriminant, payload) => {
                let mut hash = [0u8; HASH_LEN];
                hex::decode_to_slice(payload, &mut hash).map_err(|e| {
                    AddressError::InvalidHexPayload(format!("{:?}: {}", payload, e))
                })?;
                Ok(RawAddress::new(discriminant, hash))
            }
            LegacyAddress::Builtin(builtin) => builtin
                .discriminant()
                .map(RawAddress::dataless)
                .ok_or_else(|| {
                    AddressError::UnknownAddressKind(format!(
                        "{:?} has no counterpart in the new address format",
                        builtin
                    ))
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashSet;

    const TEST_HASH_20: &str = "a5e4b0fbb5e2fa7ec7ec0d6b6b7b2c73e4c5a1f2";

    #[test]
    fn test_builtin_strings_are_fixed_width() {
        for builtin in BuiltinAddress::ALL {
            assert_eq!(builtin.legacy_str().len(), TAG_LEN + 2 + PAYLOAD_LEN);
            assert_eq!(
                BuiltinAddress::from_legacy_str(builtin.legacy_str()),
                Some(builtin)
            );
        }
    }

    #[test]
    fn test_builtin_discriminants_unique() {
        let mapped: Vec<_> = BuiltinAddress::ALL
            .iter()
            .filter_map(|b| b.discriminant())
            .collect();
        let unique: HashSet<_> = mapped.iter().copied().collect();
        assert_eq!(mapped.len(), 9);
        assert_eq!(unique.len(), mapped.len());
        assert!(mapped.iter().all(|d| (2..=10).contains(&d.to_u8())));
    }

    #[rstest]
    #[case::implicit("imp", Discriminant::Implicit)]
    #[case::established("est", Discriminant::Established)]
    #[case::erc20("eth", Discriminant::Erc20)]
    #[case::nut("nut", Discriminant::Nut)]
    #[case::ibc_token("ibc", Discriminant::IbcToken)]
    fn test_hashed_kinds(#[case] tag: &str, #[case] discriminant: Discriminant) {
        let payload = format!("{}::{}", tag, TEST_HASH_20);
        let parsed = LegacyAddress::parse(payload.as_bytes()).unwrap();
        assert_eq!(parsed, LegacyAddress::Hashed(discriminant, TEST_HASH_20));

        let raw = parsed.to_raw().unwrap();
        assert_eq!(raw.discriminant(), discriminant);
        assert_eq!(hex::encode(raw.hash()), TEST_HASH_20);
    }

    #[test]
    fn test_ibc_builtin_before_hex_fallback() {
        let parsed = LegacyAddress::parse(BuiltinAddress::Ibc.legacy_str().as_bytes()).unwrap();
        assert_eq!(parsed, LegacyAddress::Builtin(BuiltinAddress::Ibc));
        assert_eq!(
            parsed.to_raw().unwrap(),
            RawAddress::dataless(Discriminant::Ibc)
        );
    }

    #[test]
    fn test_ibc_non_hex_fails_as_hex() {
        let payload = format!("{:<45}", "ibc::Something Else");
        let parsed = LegacyAddress::parse(payload.as_bytes()).unwrap();
        assert!(matches!(
            parsed.to_raw(),
            Err(AddressError::InvalidHexPayload(_))
        ));
    }

    #[test]
    fn test_builtin_requires_exact_match() {
        // trailing padding replaced, same length
        let almost = format!("{:<44}x", "ano::Proof of Stake");
        assert!(matches!(
            LegacyAddress::parse(almost.as_bytes()),
            Err(AddressError::UnknownAddressKind(_))
        ));
    }

    #[test]
    fn test_replay_protection_has_no_counterpart() {
        let parsed =
            LegacyAddress::parse(BuiltinAddress::ReplayProtection.legacy_str().as_bytes()).unwrap();
        assert!(matches!(
            parsed.to_raw(),
            Err(AddressError::UnknownAddressKind(_))
        ));
    }

    #[rstest]
    #[case::short_payload(format!("est::{}", &TEST_HASH_20[..39]))]
    #[case::long_payload(format!("est::{}0", TEST_HASH_20))]
    #[case::long_tag(format!("estx::{}", &TEST_HASH_20[..39]))]
    #[case::no_separator(format!("est:{}0", TEST_HASH_20))]
    #[case::empty(String::new())]
    fn test_malformed(#[case] payload: String) {
        assert!(matches!(
            LegacyAddress::parse(payload.as_bytes()),
            Err(AddressError::MalformedLegacyAddress(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut payload = format!("est::{}", TEST_HASH_20).into_bytes();
        payload[10] = 0xff;
        assert!(matches!(
            LegacyAddress::parse(&payload),
            Err(AddressError::MalformedLegacyAddress(_))
        ));
    }

    #[test]
    fn test_unknown_tag() {
        let payload = format!("xyz::{}", TEST_HASH_20);
        assert!(matches!(
            LegacyAddress::parse(payload.as_bytes()),
            Err(AddressError::UnknownAddressKind(_))
        ));
    }

    #[test]
    fn test_bad_hex() {
        let payload = format!("est::zz{}", &TEST_HASH_20[2..]);
        let parsed = LegacyAddress::parse(payload.as_bytes()).unwrap();
        assert!(matches!(
            parsed.to_raw(),
            Err(AddressError::InvalidHexPayload(_))
        ));
    }
}
