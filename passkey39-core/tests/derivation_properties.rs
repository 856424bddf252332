//! Properties of the challenge and key derivation over the public API.

use passkey39_core::{
    build_challenge, derive, derive_key, entropy_to_mnemonic, mnemonic_to_entropy,
    Passkey39Error, PrivateKey, DEFAULT_CHALLENGE,
};
use rand::RngCore;
use test_case::test_case;

const GOLDEN_KEY: &str = "d1aba2b7c6885ece3a4e62ec5e127b7f367086b985e0962938baaafccfc190cf";
const GOLDEN_MNEMONIC: &str = "spider fringe pupil minimum magnet grow truck slush unable vacuum paddle wrist grow drive toward rose normal endorse concert field smooth this drip tomorrow";

fn golden_signature() -> Vec<u8> {
    (0u8..64).collect()
}

fn golden_challenge() -> String {
    build_challenge(None, "alice", "example.com", "https://example.com")
}

fn hamming_distance(a: &[u8], b: &[u8]) -> u32 {
    a.iter().zip(b).map(|(x, y)| (x ^ y).count_ones()).sum()
}

#[test]
fn test_golden_vector() {
    let challenge = golden_challenge();
    assert_eq!(
        challenge,
        format!("{DEFAULT_CHALLENGE}:alice@example.com@https://example.com")
    );

    let key = derive_key(&golden_signature(), &challenge, "example.com").unwrap();
    assert_eq!(key.hex(), GOLDEN_KEY);
    assert_eq!(key.bytes(), hex::decode(GOLDEN_KEY).unwrap());

    assert_eq!(key.mnemonic().unwrap(), GOLDEN_MNEMONIC);
    assert_eq!(mnemonic_to_entropy(GOLDEN_MNEMONIC).unwrap(), key.bytes());
    assert_eq!(PrivateKey::from_mnemonic(GOLDEN_MNEMONIC).unwrap().hex(), GOLDEN_KEY);
}

#[test]
fn test_derivation_is_deterministic() {
    let challenge = golden_challenge();
    let keys: Vec<_> = (0..10)
        .map(|_| derive_key(&golden_signature(), &challenge, "example.com").unwrap())
        .collect();

    for key in &keys {
        assert_eq!(key.bytes(), keys[0].bytes());
        assert_eq!(key.mnemonic().unwrap(), keys[0].mnemonic().unwrap());
    }
}

#[test]
fn test_empty_signature_fails() {
    assert!(matches!(
        derive_key(&[], "c", "rp"),
        Err(Passkey39Error::InvalidInput { .. })
    ));
}

#[test_case("RP-A", "RP-B" ; "distinct names")]
#[test_case("example.com", "example.org" ; "distinct domains")]
#[test_case("example.com", "" ; "empty info")]
fn test_domain_separation(rp_a: &str, rp_b: &str) {
    let challenge = golden_challenge();
    let key_a = derive(&golden_signature(), &challenge, rp_a).unwrap();
    let key_b = derive(&golden_signature(), &challenge, rp_b).unwrap();
    assert_ne!(key_a, key_b);
}

fn assert_avalanche(base: &[u8], mutations: &[Vec<u8>]) {
    let mut total = 0u64;
    for mutated in mutations {
        assert_ne!(mutated.as_slice(), base);
        assert_ne!(mutated[..4], base[..4], "shared prefix");
        assert_ne!(mutated[28..], base[28..], "shared suffix");
        total += u64::from(hamming_distance(base, mutated));
    }

    // A pseudorandom 256-bit output differs from another in ~128 bits.
    #[allow(clippy::cast_precision_loss)]
    let mean = total as f64 / mutations.len() as f64;
    assert!((112.0..144.0).contains(&mean), "mean hamming distance {mean}");
}

#[test]
fn test_signature_avalanche() {
    let signature = golden_signature();
    let challenge = golden_challenge();
    let base = derive(&signature, &challenge, "example.com").unwrap();

    let mutations: Vec<Vec<u8>> = (0..signature.len() * 8)
        .map(|bit| {
            let mut mutated = signature.clone();
            mutated[bit / 8] ^= 1 << (bit % 8);
            derive(&mutated, &challenge, "example.com")
                .unwrap()
                .as_bytes()
                .to_vec()
        })
        .collect();

    assert_avalanche(base.as_bytes(), &mutations);
}

/// Flips one of the low seven bits of each ASCII character, keeping the
/// string valid UTF-8.
fn ascii_bit_flips(input: &str) -> Vec<String> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    for index in 0..bytes.len() {
        for bit in 0..7 {
            let mut mutated = bytes.to_vec();
            mutated[index] ^= 1 << bit;
            if let Ok(mutated) = String::from_utf8(mutated) {
                out.push(mutated);
            }
        }
    }
    out
}

#[test]
fn test_challenge_avalanche() {
    let signature = golden_signature();
    let challenge = golden_challenge();
    let base = derive(&signature, &challenge, "example.com").unwrap();

    // The user-specific suffix is where challenges differ in practice.
    let suffix_start = DEFAULT_CHALLENGE.len();
    let mutations: Vec<Vec<u8>> = ascii_bit_flips(&challenge[suffix_start..])
        .into_iter()
        .map(|suffix| {
            let mutated = format!("{}{suffix}", &challenge[..suffix_start]);
            derive(&signature, &mutated, "example.com")
                .unwrap()
                .as_bytes()
                .to_vec()
        })
        .collect();

    assert!(!mutations.is_empty());
    assert_avalanche(base.as_bytes(), &mutations);
}

#[test]
fn test_rp_name_avalanche() {
    let signature = golden_signature();
    let challenge = golden_challenge();
    let base = derive(&signature, &challenge, "example.com").unwrap();

    let mutations: Vec<Vec<u8>> = ascii_bit_flips("example.com")
        .into_iter()
        .map(|rp_name| {
            derive(&signature, &challenge, &rp_name)
                .unwrap()
                .as_bytes()
                .to_vec()
        })
        .collect();

    assert_avalanche(base.as_bytes(), &mutations);
}

#[test]
fn test_random_round_trips() {
    let mut rng = rand::thread_rng();

    for _ in 0..100 {
        let mut entropy = [0u8; 32];
        rng.fill_bytes(&mut entropy);

        let phrase = entropy_to_mnemonic(&entropy).unwrap();
        assert_eq!(phrase.split_whitespace().count(), 24);
        assert_eq!(mnemonic_to_entropy(&phrase).unwrap(), entropy);

        let key = PrivateKey::from_hex(&hex::encode(entropy)).unwrap();
        assert_eq!(key.bytes(), entropy);
        assert_eq!(hex::decode(key.hex()).unwrap(), entropy);
        assert_eq!(key.mnemonic().unwrap(), phrase);
    }
}
