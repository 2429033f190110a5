use crate::address::{convert_address, decode_address, public_key_to_implicit_address};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct AddressNamespace;

#[wasm_bindgen]
impl AddressNamespace {
    /// Convert a legacy address or key to the new format.
    #[wasm_bindgen(js_name = convertAddress)]
    pub fn convert_address(old_address: &str) -> Result<String, JsError> {
        Ok(convert_address(old_address)?)
    }

    /// Derive the implicit address of a new-format public key.
    #[wasm_bindgen(js_name = publicKeyToImplicitAddress)]
    pub fn public_key_to_implicit_address(public_key: &str) -> Result<String, JsError> {
        Ok(public_key_to_implicit_address(public_key)?)
    }

    /// Decode a new-format address into its 21 raw bytes.
    #[wasm_bindgen(js_name = decodeAddress)]
    pub fn decode_address(address: &str) -> Result<Vec<u8>, JsError> {
        Ok(decode_address(address)?.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_delegates() {
        let new = AddressNamespace::convert_address(
            "atest1v4ehgw36vy6k2drzxpnxyc34v5exvcfhv43nwetrxpjrvc3kvgmkyvnrxuek2drrx4snze3jh95w0w",
        )
        .ok()
        .expect("legacy address converts");
        assert_eq!(new, "tnam1qxj7fv8mkh305lk8asxkk6mm93e7f3dp7gk3leh8");

        let raw = AddressNamespace::decode_address(&new)
            .ok()
            .expect("new address decodes");
        assert_eq!(raw.len(), 21);
        assert_eq!(raw[0], 1);

        let implicit = AddressNamespace::public_key_to_implicit_address(
            "tpknam1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v9ccrydpk8qarc0jqhe784v",
        )
        .ok()
        .expect("public key converts");
        assert_eq!(implicit, "tnam1qpwclnl04xhwkuglhrk3ujmatj9fhtaydcfs9xl6");
    }
}
