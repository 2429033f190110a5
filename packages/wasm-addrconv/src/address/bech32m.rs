//! Bech32m encoding/decoding of address payloads.
//!
//! Thin adapter over the `bech32` crate. Payloads are arbitrary byte strings
//! (not witness programs), so the segwit helpers do not apply and the 90
//! character limit of BIP 173 is not enforced: extended spending keys are far
//! longer than that.
//!
//! Decoding is strict:
//! - only the Bech32m checksum is accepted (a valid Bech32 checksum is an error)
//! - the 5-bit to 8-bit regrouping must be canonical, i.e. fewer than 5 padding
//!   bits and all of them zero. This is checked by re-encoding the decoded
//!   bytes and comparing against the input, so padding rules are the same on
//!   both sides.

use super::{AddressError, Result};
use bech32::primitives::decode::CheckedHrpstring;
use bech32::{Bech32m, Hrp};

/// Decode a bech32m string into its lowercase human readable part and payload bytes.
pub fn decode(text: &str) -> Result<(String, Vec<u8>)> {
    let checked = CheckedHrpstring::new::<Bech32m>(text)
        .map_err(|e| AddressError::DecodeChecksum(format!("{}: {}", text, e)))?;

    let hrp = checked.hrp();
    let data: Vec<u8> = checked.byte_iter().collect();

    let canonical = bech32::encode_lower::<Bech32m>(hrp, &data)
        .map_err(|e| AddressError::DecodeChecksum(format!("{}: {}", text, e)))?;
    if !canonical.eq_ignore_ascii_case(text) {
        return Err(AddressError::DecodeChecksum(format!(
            "{}: invalid padding in data part",
            text
        )));
    }

    Ok((hrp.to_string().to_ascii_lowercase(), data))
}

/// Encode payload bytes as a lowercase bech32m string under `hrp`.
pub fn encode(hrp: &str, data: &[u8]) -> Result<String> {
    let parsed = Hrp::parse(hrp)
        .map_err(|e| AddressError::Encode(format!("Invalid HRP '{}': {}", hrp, e)))?;

    bech32::encode_lower::<Bech32m>(parsed, data)
        .map_err(|e| AddressError::Encode(format!("Bech32m encoding failed: {}", e)))
}
