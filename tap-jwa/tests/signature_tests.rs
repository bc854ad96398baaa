/// Tests for signing and verifying with the JWS algorithms
use assert_matches::assert_matches;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rstest::rstest;
use serde_json::json;
use tap_jwa::{Error, JwaAlgorithm, JwsAlgorithm, Jwk, SignatureAlgorithm};

fn key_for(alg: JwsAlgorithm) -> Jwk {
    match alg {
        JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => Jwk::generate_oct(64),
        JwsAlgorithm::EdDSA => Jwk::generate_ed25519(),
        JwsAlgorithm::ES256 => Jwk::generate_p256(),
        JwsAlgorithm::ES256K => Jwk::generate_secp256k1(),
    }
}

/// RFC 7515 Appendix A.1: HS256
#[test]
fn test_rfc7515_hs256_vector() {
    let key = Jwk::from_value(json!({
        "kty": "oct",
        "k": "AyM1SysPpbyDfgZld3umj1qzKObwVMkoqQ-EstJQLr_T-1qS0gZH75aKtMN3Yj0iPS4hcgUuTwjAzZr1Z9CAow"
    }))
    .unwrap();
    let input = "eyJ0eXAiOiJKV1QiLA0KICJhbGciOiJIUzI1NiJ9.\
                 eyJpc3MiOiJqb2UiLA0KICJleHAiOjEzMDA4MTkzODAsDQogImh0dHA6Ly9leGFtcGxlLmNvbS9pc19yb290Ijp0cnVlfQ";

    let signature = JwsAlgorithm::HS256.sign(&key, input.as_bytes()).unwrap();
    assert_eq!(
        URL_SAFE_NO_PAD.encode(&signature),
        "dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk"
    );
    assert!(JwsAlgorithm::HS256
        .verify(&key, input.as_bytes(), &signature)
        .unwrap());
}

/// RFC 8037 Appendix A.4: Ed25519
#[test]
fn test_rfc8037_ed25519_vector() {
    let key = Jwk::from_value(json!({
        "kty": "OKP",
        "crv": "Ed25519",
        "d": "nWGxne_9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A",
        "x": "11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo"
    }))
    .unwrap();
    let input = b"eyJhbGciOiJFZERTQSJ9.RXhhbXBsZSBvZiBFZDI1NTE5IHNpZ25pbmc";

    let signature = JwsAlgorithm::EdDSA.sign(&key, input).unwrap();
    assert_eq!(
        URL_SAFE_NO_PAD.encode(&signature),
        "hgyY0il_MGCjP0JzlnLWG1PPOt7-09PGcvMg3AIbQR6dWbhijcNR4ki4iylGjg5BhVsPt9g7sVvpAr_MuM0KAg"
    );
    assert!(JwsAlgorithm::EdDSA
        .verify(&key.to_public(), input, &signature)
        .unwrap());
}

#[rstest]
#[case(JwsAlgorithm::HS256, 32)]
#[case(JwsAlgorithm::HS384, 48)]
#[case(JwsAlgorithm::HS512, 64)]
#[case(JwsAlgorithm::EdDSA, 64)]
#[case(JwsAlgorithm::ES256, 64)]
#[case(JwsAlgorithm::ES256K, 64)]
fn test_sign_verify_roundtrip(#[case] alg: JwsAlgorithm, #[case] signature_len: usize) {
    let key = key_for(alg);
    let input = b"Transaction Authorization Protocol";

    let signature = alg.sign(&key, input).unwrap();
    assert_eq!(signature.len(), signature_len);

    let verification_key = match alg {
        JwsAlgorithm::HS256 | JwsAlgorithm::HS384 | JwsAlgorithm::HS512 => key.clone(),
        _ => key.to_public(),
    };
    assert!(alg.verify(&verification_key, input, &signature).unwrap());
    assert!(!alg
        .verify(&verification_key, b"tampered input", &signature)
        .unwrap());
}

#[rstest]
#[case(JwsAlgorithm::HS256)]
#[case(JwsAlgorithm::EdDSA)]
#[case(JwsAlgorithm::ES256)]
#[case(JwsAlgorithm::ES256K)]
fn test_verify_fails_with_other_key(#[case] alg: JwsAlgorithm) {
    let signer = key_for(alg);
    let other = key_for(alg);
    let input = b"payload";

    let signature = alg.sign(&signer, input).unwrap();
    assert!(!alg.verify(&other, input, &signature).unwrap());
}

#[rstest]
#[case(JwsAlgorithm::HS512)]
#[case(JwsAlgorithm::EdDSA)]
#[case(JwsAlgorithm::ES256)]
fn test_flipped_signature_rejected(#[case] alg: JwsAlgorithm) {
    let key = key_for(alg);
    let mut signature = alg.sign(&key, b"payload").unwrap();
    signature[0] ^= 0x80;
    assert!(!alg.verify(&key, b"payload", &signature).unwrap());
}

#[test]
fn test_sign_requires_private_key() {
    let public = Jwk::generate_p256().to_public();
    assert_matches!(
        JwsAlgorithm::ES256.sign(&public, b"payload"),
        Err(Error::InvalidKey(_))
    );
}

#[test]
fn test_key_type_must_match_algorithm() {
    let oct = Jwk::generate_oct(32);
    for alg in [JwsAlgorithm::EdDSA, JwsAlgorithm::ES256, JwsAlgorithm::ES256K] {
        assert!(!alg.allowed_key_types().contains(&"oct"));
        assert_matches!(alg.sign(&oct, b"payload"), Err(Error::InvalidKey(_)));
        assert_matches!(
            alg.verify(&oct, b"payload", &[0u8; 64]),
            Err(Error::InvalidKey(_))
        );
    }
}

#[test]
fn test_dispatch_through_trait_object() {
    let algorithms: Vec<Box<dyn SignatureAlgorithm>> = JwsAlgorithm::ALL
        .into_iter()
        .map(|alg| Box::new(alg) as Box<dyn SignatureAlgorithm>)
        .collect();

    for algorithm in &algorithms {
        let alg = JwsAlgorithm::from_name(algorithm.name()).unwrap();
        let key = key_for(alg);
        let signature = algorithm.sign(&key, b"payload").unwrap();
        assert!(algorithm.verify(&key, b"payload", &signature).unwrap());
    }
}
