//! Test utilities for wasm-addrconv

use crate::address::bech32m;
use crate::address::OldPrefix;

/// Identifier used by the hashed address fixtures.
pub const TEST_HASH_20: &str = "a5e4b0fbb5e2fa7ec7ec0d6b6b7b2c73e4c5a1f2";

/// Encode a legacy transparent address payload (e.g. `"est::<40 hex chars>"`).
pub fn legacy_address(payload: &str) -> String {
    bech32m::encode(OldPrefix::Address.as_str(), payload.as_bytes())
        .expect("fixture payload encodes")
}

/// A legacy established address for the given identifier.
pub fn legacy_established(hash_hex: &str) -> String {
    legacy_address(&format!("est::{}", hash_hex))
}
