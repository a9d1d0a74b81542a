#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(fields) = ecdh_es_kdf::other_info::decode_other_info(data) {
        // Anything that parses must re-encode to the same bytes.
        let encoded = ecdh_es_kdf::other_info::encode_other_info(
            fields.algorithm_id,
            fields.party_u_info,
            fields.party_v_info,
            fields.key_len(),
        );
        if fields.key_bits % 8 == 0 && fields.key_bits != 0 {
            assert_eq!(encoded.unwrap(), data);
        }
    }
});
