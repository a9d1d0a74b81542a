use ecdh_es_kdf::x25519_dalek::StaticSecret;
use ecdh_es_kdf::{
    derive_key, k256, p256, p384, p521, Algorithm, DeriveError, EcdhEs, InvalidParameter,
    KeyAgreement,
};

fn setup<K: KeyAgreement>() -> (EcdhEs, K, K) {
    (EcdhEs::new(), K::generate(), K::generate())
}

fn both_sides_agree<K: KeyAgreement>() {
    let (ecdh_es, alice, bob) = setup::<K>();
    for alg in Algorithm::ALL {
        let a = ecdh_es
            .derive_for(alg, b"Alice", b"Bob", &alice, &bob.public_key())
            .unwrap();
        let b = ecdh_es
            .derive_for(alg, b"Alice", b"Bob", &bob, &alice.public_key())
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), alg.key_len());
    }
}

#[test]
fn roundtrip_p256() {
    both_sides_agree::<p256::SecretKey>();
}

#[test]
fn roundtrip_p384() {
    both_sides_agree::<p384::SecretKey>();
}

#[test]
fn roundtrip_p521() {
    both_sides_agree::<p521::SecretKey>();
}

#[test]
fn roundtrip_secp256k1() {
    both_sides_agree::<k256::SecretKey>();
}

#[test]
fn roundtrip_x25519() {
    both_sides_agree::<StaticSecret>();
}

#[test]
fn ephemeral_sender_roundtrip() {
    let (ecdh_es, _, recipient) = setup::<p384::SecretKey>();
    let (epk, cek) = ecdh_es
        .derive_ephemeral::<p384::SecretKey>(
            Algorithm::A256CbcHs512,
            b"",
            b"nonce",
            &recipient.public_key(),
        )
        .unwrap();
    let same = ecdh_es
        .derive_for(Algorithm::A256CbcHs512, b"", b"nonce", &recipient, &epk)
        .unwrap();
    assert_eq!(cek, same);
    assert_eq!(cek.len(), 64);
}

#[test]
fn deterministic() {
    let (_, alice, bob) = setup::<p256::SecretKey>();
    let k1 = derive_key("A128GCM", b"a", b"b", &alice, &bob.public_key(), 16).unwrap();
    let k2 = derive_key("A128GCM", b"a", b"b", &alice, &bob.public_key(), 16).unwrap();
    assert_eq!(k1, k2);
}

#[test]
fn wrong_peer_gives_different_key() {
    let (_, alice, bob) = setup::<p256::SecretKey>();
    let carol = p256::SecretKey::generate();
    let k1 = derive_key("A128GCM", b"", b"", &alice, &bob.public_key(), 16).unwrap();
    let k2 = derive_key("A128GCM", b"", b"", &alice, &carol.public_key(), 16).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn swapped_party_info_differs() {
    let (_, alice, bob) = setup::<StaticSecret>();
    let k1 = derive_key("A256GCM", b"Alice", b"Bob", &alice, &bob.public_key(), 32).unwrap();
    let k2 = derive_key("A256GCM", b"Bob", b"Alice", &alice, &bob.public_key(), 32).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn party_info_boundary_is_bound() {
    // Same concatenated bytes, different split between PartyUInfo and PartyVInfo.
    let (_, alice, bob) = setup::<p256::SecretKey>();
    let k1 = derive_key("A128GCM", b"AliceB", b"ob", &alice, &bob.public_key(), 16).unwrap();
    let k2 = derive_key("A128GCM", b"Alice", b"Bob", &alice, &bob.public_key(), 16).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn algorithm_is_bound() {
    let (_, alice, bob) = setup::<p256::SecretKey>();
    let k1 = derive_key("A128GCM", b"", b"", &alice, &bob.public_key(), 16).unwrap();
    let k2 = derive_key("ECDH-ES+A128KW", b"", b"", &alice, &bob.public_key(), 16).unwrap();
    assert_ne!(k1, k2);
}

#[test]
fn zero_size_rejected() {
    let (_, alice, bob) = setup::<p256::SecretKey>();
    let err = derive_key("A128GCM", b"", b"", &alice, &bob.public_key(), 0).unwrap_err();
    assert_eq!(err, DeriveError::InvalidParameter(InvalidParameter::ZeroLength));
    assert_eq!(format!("{}", err), "invalid parameter: requested key length is zero");
}

#[test]
fn invalid_peer_key_is_key_agreement_failure() {
    let mut not_on_curve = vec![0x04u8; 65];
    not_on_curve[64] = 0x05;
    let err = <p256::SecretKey as KeyAgreement>::public_from_bytes(&not_on_curve).unwrap_err();
    assert_eq!(err, DeriveError::KeyAgreementFailure);
}

#[test]
fn low_order_x25519_peer_fails_derivation() {
    let (_, alice, _) = setup::<StaticSecret>();
    let low_order = <StaticSecret as KeyAgreement>::public_from_bytes(&[0u8; 32]).unwrap();
    let err = derive_key("A128GCM", b"", b"", &alice, &low_order, 16).unwrap_err();
    assert_eq!(err, DeriveError::KeyAgreementFailure);
}

#[test]
fn public_key_serialization_roundtrip() {
    let (_, alice, bob) = setup::<k256::SecretKey>();
    let bob_bytes = <k256::SecretKey as KeyAgreement>::public_to_bytes(&bob.public_key());
    let bob_pk = <k256::SecretKey as KeyAgreement>::public_from_bytes(&bob_bytes).unwrap();

    let k1 = derive_key("A192GCM", b"", b"", &alice, &bob.public_key(), 24).unwrap();
    let k2 = derive_key("A192GCM", b"", b"", &alice, &bob_pk, 24).unwrap();
    assert_eq!(k1, k2);
}
