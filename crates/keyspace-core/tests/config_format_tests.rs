//! Integration tests for the config-data byte format

use keyspace_core::{
    ConfigData, Error, Owner, Secp256k1PrivateKey, SignatureScheme, SignerKey,
    WebAuthnPrivateKey, OWNER_SIZE,
};

#[test]
fn test_single_secp256k1_owner_vector() {
    let x = [0x11u8; 32];
    let y = [0x22u8; 32];
    let owner = Owner::from_coordinates(&x, &y).unwrap();
    let config = ConfigData::single(owner);

    let blob = config.encode();
    let mut expected = vec![0x11u8; 32];
    expected.extend_from_slice(&[0x22u8; 32]);
    assert_eq!(blob, expected);

    let decoded = ConfigData::decode(&blob).unwrap();
    assert_eq!(decoded.len(), 1);
    let (dx, dy) = decoded.owners()[0].coordinates();
    assert_eq!(dx, x);
    assert_eq!(dy, y);
}

#[test]
fn test_decode_rejects_off_by_one_lengths() {
    for len in [0, 1, 63, 65, 127, 129] {
        let result = ConfigData::decode(&vec![0u8; len]);
        assert_eq!(result, Err(Error::MalformedConfigData { len }), "length {}", len);
    }
}

#[test]
fn test_schemes_share_layout() {
    // A secp256k1 owner and a WebAuthn owner with the same coordinates are
    // indistinguishable in the blob.
    let k1 = Secp256k1PrivateKey::from_bytes([0x05; 32]).unwrap().owner().unwrap();
    let (x, y) = k1.coordinates();
    let as_webauthn = Owner::from_coordinates(&x, &y).unwrap();
    assert_eq!(
        ConfigData::single(k1).encode(),
        ConfigData::single(as_webauthn).encode()
    );
}

#[test]
fn test_mixed_scheme_config() {
    let k1 = SignerKey::Secp256k1(Secp256k1PrivateKey::from_bytes([0x01; 32]).unwrap());
    let r1 = SignerKey::WebAuthn(WebAuthnPrivateKey::from_bytes([0x02; 32]).unwrap());

    let config = ConfigData::for_signer(&k1)
        .unwrap()
        .with_owner(r1.owner().unwrap());
    let blob = config.encode();
    assert_eq!(blob.len(), 2 * OWNER_SIZE);

    let decoded = ConfigData::decode(&blob).unwrap();
    assert_eq!(decoded.owners()[0], k1.owner().unwrap());
    assert_eq!(decoded.owners()[1], r1.owner().unwrap());
}

#[test]
fn test_signer_owner_matches_sec1() {
    use p256::elliptic_curve::sec1::ToEncodedPoint;

    let secret = p256::SecretKey::from_slice(&[0x09; 32]).unwrap();
    let sec1 = secret.public_key().to_encoded_point(true);

    let from_key = WebAuthnPrivateKey::from_bytes([0x09; 32]).unwrap().owner().unwrap();
    let from_sec1 = Owner::from_sec1_bytes(SignatureScheme::WebAuthn, sec1.as_bytes()).unwrap();
    assert_eq!(from_key, from_sec1);
}

#[test]
fn test_raw_public_key_config() {
    let raw = [0x33u8; 64];
    let owner = Owner::from_slice(&raw).unwrap();
    assert_eq!(ConfigData::single(owner).encode(), raw.to_vec());

    assert_eq!(
        Owner::from_slice(&[0u8; 65]),
        Err(Error::MalformedConfigData { len: 65 })
    );
}

#[test]
fn test_random_keys_match_curve_encoding() {
    use rand::rngs::OsRng;

    for _ in 0..16 {
        let k1 = k256::SecretKey::random(&mut OsRng);
        let mut scalar = [0u8; 32];
        scalar.copy_from_slice(&k1.to_bytes());
        let owner = Secp256k1PrivateKey::from_bytes(scalar).unwrap().owner().unwrap();
        let sec1 = {
            use k256::elliptic_curve::sec1::ToEncodedPoint;
            k1.public_key().to_encoded_point(false)
        };
        assert_eq!(owner.as_bytes()[..], sec1.as_bytes()[1..]);

        let r1 = p256::SecretKey::random(&mut OsRng);
        scalar.copy_from_slice(&r1.to_bytes());
        let owner = WebAuthnPrivateKey::from_bytes(scalar).unwrap().owner().unwrap();
        let sec1 = {
            use p256::elliptic_curve::sec1::ToEncodedPoint;
            r1.public_key().to_encoded_point(false)
        };
        assert_eq!(owner.as_bytes()[..], sec1.as_bytes()[1..]);
    }
}
