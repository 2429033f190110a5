use anyhow::{Context, Result};
use wasm_addrconv::{convert_address, public_key_to_implicit_address};

pub fn convert(old_address: &str) -> Result<()> {
    let new_address = convert_address(old_address)
        .with_context(|| format!("Failed to convert address {}", old_address))?;
    println!("{}", new_address);
    Ok(())
}

pub fn implicit_address(public_key: &str) -> Result<()> {
    let address = public_key_to_implicit_address(public_key)
        .with_context(|| format!("Failed to derive implicit address of {}", public_key))?;
    println!("{}", address);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert() {
        assert!(convert(
            "atest1v4ehgw36vy6k2drzxpnxyc34v5exvcfhv43nwetrxpjrvc3kvgmkyvnrxuek2drrx4snze3jh95w0w"
        )
        .is_ok());
    }

    #[test]
    fn test_convert_error_has_context() {
        let err = convert("btest1qqqqqqqq").unwrap_err();
        assert!(err.to_string().contains("btest1qqqqqqqq"));
    }

    #[test]
    fn test_implicit_address_rejects_legacy_key() {
        let err = implicit_address(
            "pktest1qqqsyqcyq5rqwzqfpg9scrgwpugpzysnzs23v9ccrydpk8qarc0jqamnn36",
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("pktest"));
    }
}
