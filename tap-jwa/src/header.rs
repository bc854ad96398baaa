//! JOSE header parameters read and written by the algorithms

use crate::error::{Error, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{Map, Value};

/// A JOSE header: an ordered map of parameter names to JSON values
pub type JoseHeader = Map<String, Value>;

/// Algorithm identifier parameter
pub const ALG: &str = "alg";
/// PBES2 salt input parameter
pub const P2S: &str = "p2s";
/// PBES2 iteration count parameter
pub const P2C: &str = "p2c";

/// Returns the `alg` parameter
pub fn algorithm(headers: &JoseHeader) -> Result<&str> {
    match headers.get(ALG) {
        Some(Value::String(alg)) => Ok(alg),
        Some(_) => Err(Error::InvalidHeader(format!(
            "The header parameter \"{}\" is not valid",
            ALG
        ))),
        None => Err(missing(ALG)),
    }
}

/// Returns the decoded `p2s` parameter
///
/// The value must be a non-empty base64url string that decodes to at least
/// one byte.
pub fn pbes2_salt(headers: &JoseHeader) -> Result<Vec<u8>> {
    let encoded = match headers.get(P2S) {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(_) => return Err(not_valid(P2S)),
        None => return Err(missing(P2S)),
    };

    let salt = URL_SAFE_NO_PAD.decode(encoded).map_err(|_| not_valid(P2S))?;
    if salt.is_empty() {
        return Err(not_valid(P2S));
    }
    Ok(salt)
}

/// Returns the `p2c` parameter as a positive count
///
/// Counts that do not fit in a `u32` are reported as `u32::MAX` so the caller's
/// upper bound rejects them.
pub fn pbes2_count(headers: &JoseHeader) -> Result<u32> {
    let count = match headers.get(P2C) {
        Some(value) => value.as_u64().ok_or_else(|| not_valid(P2C))?,
        None => return Err(missing(P2C)),
    };
    if count == 0 {
        return Err(not_valid(P2C));
    }
    Ok(u32::try_from(count).unwrap_or(u32::MAX))
}

/// Writes the PBES2 parameters into a new header map
pub fn pbes2_parameters(salt: &[u8], count: u32) -> JoseHeader {
    let mut headers = JoseHeader::new();
    headers.insert(P2S.to_string(), Value::from(URL_SAFE_NO_PAD.encode(salt)));
    headers.insert(P2C.to_string(), Value::from(count));
    headers
}

fn missing(name: &str) -> Error {
    Error::InvalidHeader(format!("The header parameter \"{}\" is missing", name))
}

fn not_valid(name: &str) -> Error {
    Error::InvalidHeader(format!("The header parameter \"{}\" is not valid", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn header(value: Value) -> JoseHeader {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_algorithm() {
        assert_eq!(
            algorithm(&header(json!({"alg": "PBES2-HS256+A128KW"}))).unwrap(),
            "PBES2-HS256+A128KW"
        );
        assert!(matches!(
            algorithm(&header(json!({}))),
            Err(Error::InvalidHeader(_))
        ));
        assert!(matches!(
            algorithm(&header(json!({"alg": 1}))),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_pbes2_salt() {
        let headers = header(json!({"p2s": "2WCTcJZ1Rvd_CJuJripQ1w"}));
        assert_eq!(pbes2_salt(&headers).unwrap().len(), 16);

        for bad in [json!({}), json!({"p2s": ""}), json!({"p2s": 5}), json!({"p2s": "***"})] {
            assert!(matches!(
                pbes2_salt(&header(bad)),
                Err(Error::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn test_pbes2_count() {
        assert_eq!(pbes2_count(&header(json!({"p2c": 4096}))).unwrap(), 4096);
        assert_eq!(
            pbes2_count(&header(json!({"p2c": 1u64 << 40}))).unwrap(),
            u32::MAX
        );

        for bad in [
            json!({}),
            json!({"p2c": 0}),
            json!({"p2c": -1}),
            json!({"p2c": 1.5}),
            json!({"p2c": "4096"}),
        ] {
            assert!(matches!(
                pbes2_count(&header(bad)),
                Err(Error::InvalidHeader(_))
            ));
        }
    }

    #[test]
    fn test_pbes2_parameters() {
        let headers = pbes2_parameters(&[0u8; 16], 4096);
        assert_eq!(headers[P2S], "AAAAAAAAAAAAAAAAAAAAAA");
        assert_eq!(headers[P2C], 4096);
    }
}
