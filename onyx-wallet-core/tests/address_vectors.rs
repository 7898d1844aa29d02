//! Address encoding vectors across all three networks
//!
//! Run with: cargo test --package onyx-wallet-core --test address_vectors

use std::str::FromStr;

use onyx_wallet_core::base58;
use onyx_wallet_core::prelude::*;

const SEED_HEX: &str = "482700617ba810f94035d7f4d7ccc1a29878e165b4867872b705204c85406906";
const PUBLIC_SPEND: &str = "4ee576f52b9c6a824a3d5c2832d117177d2bb9992507c2c78788bb8dbaf4b640";
const PUBLIC_VIEW: &str = "e1ef99d66312ec0b16b17c66c591ab59594e21621588b63b62fa69fe615a768e";

const MAINNET: &str = "44cWztNFdAqNnycvZbUoj44vsbAEmKnx9aNgkjHdjtMsBrSeKiY8J4s2raH7EMawA2Fwo9utaRTV7Aw8EcTMNMxhH4YtKdH";
const TESTNET: &str = "9vA4V92WuXwNnycvZbUoj44vsbAEmKnx9aNgkjHdjtMsBrSeKiY8J4s2raH7EMawA2Fwo9utaRTV7Aw8EcTMNMxhH7ksPxE";
const STAGENET: &str = "54pZ5jHDGmwNnycvZbUoj44vsbAEmKnx9aNgkjHdjtMsBrSeKiY8J4s2raH7EMawA2Fwo9utaRTV7Aw8EcTMNMxhH6cuARW";
const INTEGRATED: &str = "4EKC1hBkESMNnycvZbUoj44vsbAEmKnx9aNgkjHdjtMsBrSeKiY8J4s2raH7EMawA2Fwo9utaRTV7Aw8EcTMNMxhQmEBBCp8piiGRTbSqV";

fn key(hex_str: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    hex::decode_to_slice(hex_str, &mut out).unwrap();
    out
}

#[test]
fn test_standard_address_per_network() {
    let cases = [
        (MoneroNetwork::Mainnet, MAINNET),
        (MoneroNetwork::Testnet, TESTNET),
        (MoneroNetwork::Stagenet, STAGENET),
    ];

    for (network, expected) in cases {
        let address = MoneroAddress::standard(network, key(PUBLIC_SPEND), key(PUBLIC_VIEW));
        assert_eq!(address.to_string(), expected, "{network}");

        let parsed = MoneroAddress::from_str(expected).unwrap();
        assert_eq!(parsed, address);
        assert_eq!(parsed.network(), network);
        assert_eq!(parsed.address_type(), AddressType::Standard);
        assert_eq!(parsed.spend_key(), &key(PUBLIC_SPEND));
        assert_eq!(parsed.view_key(), &key(PUBLIC_VIEW));
    }
}

#[test]
fn test_seed_derives_every_network_address() {
    let seed = Seed::from_hex(SEED_HEX).unwrap();
    assert_eq!(seed.public_address(MoneroNetwork::Mainnet).to_string(), MAINNET);
    assert_eq!(seed.public_address(MoneroNetwork::Testnet).to_string(), TESTNET);
    assert_eq!(seed.public_address(MoneroNetwork::Stagenet).to_string(), STAGENET);
}

#[test]
fn test_integrated_address() {
    let payment_id = PaymentId::from_hex("1122334455667788").unwrap();
    let standard = MoneroAddress::from_str(MAINNET).unwrap();
    let integrated = standard.with_payment_id(payment_id).unwrap();

    assert_eq!(integrated.to_string(), INTEGRATED);
    assert_eq!(integrated.to_string().len(), 106);
    assert!(integrated.is_integrated());
    assert_eq!(integrated.payment_id(), Some(payment_id));
    assert_eq!(integrated.base_address(), standard);

    let parsed = MoneroAddress::from_str(INTEGRATED).unwrap();
    assert_eq!(parsed, integrated);
}

#[test]
fn test_single_case_flip_is_rejected() {
    for address in [MAINNET, INTEGRATED] {
        for (i, c) in address.char_indices() {
            let flipped = if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            if flipped == c || !base58::is_base58_char(flipped) {
                continue;
            }

            let mut tampered = address.to_string();
            tampered.replace_range(i..=i, &flipped.to_string());
            assert!(
                MoneroAddress::from_str(&tampered).is_err(),
                "flip at {i} was accepted"
            );
        }
    }
}

#[test]
fn test_decoded_payload_layout() {
    let data = base58::decode(MAINNET).unwrap();
    assert_eq!(data.len(), 69);
    assert_eq!(data[0], 18);
    assert_eq!(&data[1..33], &key(PUBLIC_SPEND));

    let data = base58::decode(INTEGRATED).unwrap();
    assert_eq!(data.len(), 77);
    assert_eq!(data[0], 19);
    assert_eq!(hex::encode(&data[65..73]), "1122334455667788");
}

#[test]
fn test_rejects_wrong_lengths() {
    assert!(matches!(
        MoneroAddress::from_str(&MAINNET[..94]),
        Err(CryptoError::InvalidFormat(_))
    ));
    assert!(matches!(
        MoneroAddress::from_str(""),
        Err(CryptoError::InvalidFormat(_))
    ));
}

#[test]
fn test_unknown_network_byte() {
    let mut payload = vec![0x7f];
    payload.extend_from_slice(&key(PUBLIC_SPEND));
    payload.extend_from_slice(&key(PUBLIC_VIEW));
    let text = base58::encode_check(&payload);

    assert_eq!(
        MoneroAddress::from_str(&text),
        Err(CryptoError::UnknownNetworkByte(0x7f))
    );
}

#[test]
fn test_serde_uses_text_form() {
    let address = MoneroAddress::from_str(STAGENET).unwrap();
    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, format!("\"{STAGENET}\""));
    let back: MoneroAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(back, address);
    assert!(back.is_stagenet());
}
