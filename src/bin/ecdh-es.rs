//! ecdh-es CLI — derive JWE ECDH-ES keys from hex inputs
//!
//! Usage:
//!   ecdh-es keygen     --curve <CRV>
//!   ecdh-es derive     --curve <CRV> --key <HEX> --peer <HEX> --alg <ALG>
//!                      [--apu <HEX>] [--apv <HEX>] [--size <N>] [--encoding minimal|fixed]
//!   ecdh-es other-info --alg <ALG> --size <N> [--apu <HEX>] [--apv <HEX>]

use std::process;

use ecdh_es_kdf::other_info::encode_other_info;
use ecdh_es_kdf::x25519_dalek::StaticSecret;
use ecdh_es_kdf::{
    k256, p256, p384, p521, Algorithm, Curve, DeriveConfig, EcdhEs, KeyAgreement,
    SecretEncoding,
};

fn usage() -> ! {
    eprintln!(
        "ecdh-es — JWE ECDH-ES key derivation (ECDH + Concat KDF, SHA-256)\n\
         \n\
         Generate a keypair (hex on stdout):\n\
         \n\
         ecdh-es keygen --curve <P-256|P-384|P-521|secp256k1|X25519>\n\
         \n\
         Derive a key:\n\
         \n\
         ecdh-es derive --curve <CRV> --key <PRIV_HEX> --peer <PUB_HEX> --alg <ALG>\n\
         [--apu <HEX>] [--apv <HEX>] [--size <BYTES>] [--encoding minimal|fixed]\n\
         --size defaults to the key length of a known JWA <ALG>\n\
         \n\
         Print OtherInfo:\n\
         \n\
         ecdh-es other-info --alg <ALG> --size <BYTES> [--apu <HEX>] [--apv <HEX>]\n\
         \n\
         Logging is controlled with RUST_LOG (e.g. RUST_LOG=ecdh_es_kdf=debug).\n"
    );
    process::exit(1);
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn parse_args() -> (String, Vec<(String, String)>) {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let command = args[1].clone();
    let mut flags: Vec<(String, String)> = Vec::new();

    let mut i = 2;
    while i < args.len() {
        if args[i].starts_with("--") && i + 1 < args.len() {
            flags.push((args[i].clone(), args[i + 1].clone()));
            i += 2;
        } else {
            die(&format!("unexpected argument: {}", args[i]));
        }
    }

    (command, flags)
}

fn get_flag(flags: &[(String, String)], name: &str) -> Option<String> {
    flags.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
}

fn require_flag(flags: &[(String, String)], name: &str) -> String {
    get_flag(flags, name).unwrap_or_else(|| die(&format!("missing required flag: {}", name)))
}

fn hex_flag(flags: &[(String, String)], name: &str) -> Vec<u8> {
    match get_flag(flags, name) {
        Some(v) => hex::decode(&v).unwrap_or_else(|e| die(&format!("{}: {}", name, e))),
        None => Vec::new(),
    }
}

fn parse_curve(flags: &[(String, String)]) -> Curve {
    match require_flag(flags, "--curve").as_str() {
        "P-256" => Curve::P256,
        "P-384" => Curve::P384,
        "P-521" => Curve::P521,
        "secp256k1" => Curve::Secp256k1,
        "X25519" => Curve::X25519,
        other => die(&format!("unsupported curve: {}", other)),
    }
}

fn parse_size(flags: &[(String, String)], alg: &str) -> usize {
    match get_flag(flags, "--size") {
        Some(v) => v.parse().unwrap_or_else(|_| die(&format!("invalid --size: {}", v))),
        None => alg
            .parse::<Algorithm>()
            .map(|a| a.key_len())
            .unwrap_or_else(|_| die("--size is required for an unknown --alg")),
    }
}

fn cmd_keygen(flags: &[(String, String)]) {
    match parse_curve(flags) {
        Curve::P256 => {
            let sk = p256::SecretKey::generate();
            println!("secret: {}", hex::encode(sk.to_bytes()));
            print_public::<p256::SecretKey>(&sk);
        }
        Curve::P384 => {
            let sk = p384::SecretKey::generate();
            println!("secret: {}", hex::encode(sk.to_bytes()));
            print_public::<p384::SecretKey>(&sk);
        }
        Curve::P521 => {
            let sk = p521::SecretKey::generate();
            println!("secret: {}", hex::encode(sk.to_bytes()));
            print_public::<p521::SecretKey>(&sk);
        }
        Curve::Secp256k1 => {
            let sk = k256::SecretKey::generate();
            println!("secret: {}", hex::encode(sk.to_bytes()));
            print_public::<k256::SecretKey>(&sk);
        }
        Curve::X25519 => {
            let sk = StaticSecret::generate();
            println!("secret: {}", hex::encode(sk.to_bytes()));
            print_public::<StaticSecret>(&sk);
        }
        other => die(&format!("unsupported curve: {}", other)),
    }
}

fn print_public<K: KeyAgreement>(sk: &K) {
    println!("public: {}", hex::encode(K::public_to_bytes(&sk.public_key())));
    eprintln!("generated {} keypair; keep the secret safe", K::CURVE);
}

fn derive_on<K: KeyAgreement>(flags: &[(String, String)]) {
    let key = hex_flag(flags, "--key");
    let peer = hex_flag(flags, "--peer");
    let alg = require_flag(flags, "--alg");
    let apu = hex_flag(flags, "--apu");
    let apv = hex_flag(flags, "--apv");
    let size = parse_size(flags, &alg);

    let encoding = match get_flag(flags, "--encoding").as_deref() {
        None | Some("minimal") => SecretEncoding::Minimal,
        Some("fixed") => SecretEncoding::FixedWidth,
        Some(other) => die(&format!("invalid --encoding: {}", other)),
    };

    let sk = K::from_secret_bytes(&key).unwrap_or_else(|e| die(&format!("--key: {}", e)));
    let pk = K::public_from_bytes(&peer).unwrap_or_else(|e| die(&format!("--peer: {}", e)));

    let ecdh_es = EcdhEs::with_config(DeriveConfig::new().with_secret_encoding(encoding));
    let derived = ecdh_es
        .derive_key(&alg, &apu, &apv, &sk, &pk, size)
        .unwrap_or_else(|e| die(&e.to_string()));

    println!("{}", hex::encode(derived.as_bytes()));
}

fn cmd_derive(flags: &[(String, String)]) {
    match parse_curve(flags) {
        Curve::P256 => derive_on::<p256::SecretKey>(flags),
        Curve::P384 => derive_on::<p384::SecretKey>(flags),
        Curve::P521 => derive_on::<p521::SecretKey>(flags),
        Curve::Secp256k1 => derive_on::<k256::SecretKey>(flags),
        Curve::X25519 => derive_on::<StaticSecret>(flags),
        other => die(&format!("unsupported curve: {}", other)),
    }
}

fn cmd_other_info(flags: &[(String, String)]) {
    let alg = require_flag(flags, "--alg");
    let apu = hex_flag(flags, "--apu");
    let apv = hex_flag(flags, "--apv");
    let size = parse_size(flags, &alg);

    let info = encode_other_info(alg.as_bytes(), &apu, &apv, size)
        .unwrap_or_else(|e| die(&e.to_string()));
    println!("{}", hex::encode(info));
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let (command, flags) = parse_args();

    match command.as_str() {
        "keygen" => cmd_keygen(&flags),
        "derive" => cmd_derive(&flags),
        "other-info" => cmd_other_info(&flags),
        "--help" | "-h" => usage(),
        "--version" | "-V" => println!("ecdh-es {}", ecdh_es_kdf::VERSION),
        _ => {
            eprintln!("unknown command: {}", command);
            usage();
        }
    }
}
