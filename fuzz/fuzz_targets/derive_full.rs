#![no_main]

use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

use ecdh_es_kdf::{p256, KeyAgreement};

static PRIVATE_KEY: Lazy<p256::SecretKey> = Lazy::new(p256::SecretKey::generate);

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    // data = size[1] || split[1] || peer_sec1 || apu
    let size = data[0] as usize;
    let split = 2 + (data[1] as usize) % (data.len() - 1);
    let (peer, apu) = data[2..].split_at(split - 2);

    let Ok(public_key) = <p256::SecretKey as KeyAgreement>::public_from_bytes(peer) else {
        return;
    };

    let _ = ecdh_es_kdf::derive_key("A128GCM", apu, b"", &*PRIVATE_KEY, &public_key, size);
});
