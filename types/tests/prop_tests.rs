use proptest::prelude::*;

use kyc_types::{Address, Coin, Coins};

proptest! {
    /// Every account key has exactly one accepted encoding, and it decodes back.
    #[test]
    fn address_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let addr = Address::from_bytes(bytes);
        let decoded = Address::decode(&addr.to_string()).unwrap();
        prop_assert_eq!(decoded.as_bytes(), &bytes);
    }

    /// Arbitrary strings never panic the decoder.
    #[test]
    fn address_decode_never_panics(s in "\\PC*") {
        let _ = Address::decode(&s);
    }

    /// Flipping any character of the encoded part yields a rejected or different address.
    #[test]
    fn address_single_char_corruption_detected(
        bytes in prop::array::uniform32(0u8..),
        pos in 4usize..64,
        replacement in prop::sample::select(b"13456789abcdefghijkmnopqrstuwxyz".to_vec()),
    ) {
        let addr = Address::from_bytes(bytes);
        let mut s = addr.to_string().into_bytes();
        prop_assume!(s[pos] != replacement);
        s[pos] = replacement;
        let corrupted = String::from_utf8(s).unwrap();
        if let Ok(other) = Address::decode(&corrupted) {
            prop_assert_ne!(other, addr);
        }
    }

    /// Any non-negative list with one positive quantity is accepted, and the
    /// normalized total per denom matches the input.
    #[test]
    fn coins_accept_non_negative(amounts in prop::collection::vec(0i128..1_000_000, 1..5)) {
        prop_assume!(amounts.iter().any(|a| *a > 0));
        let input: Vec<Coin> = amounts
            .iter()
            .enumerate()
            .map(|(i, a)| Coin::new(format!("token{i}"), *a))
            .collect();
        let coins = Coins::try_from_coins(input).unwrap();
        for (i, a) in amounts.iter().enumerate() {
            prop_assert_eq!(coins.amount_of(&format!("token{i}")), *a as u128);
        }
    }

    /// Addition is commutative.
    #[test]
    fn coins_add_commutative(a in 1u128..1_000_000_000, b in 1u128..1_000_000_000) {
        let x = Coins::single("tokenx", a).unwrap();
        let y = Coins::single("tokeny", b).unwrap()
            .checked_add(&Coins::single("tokenx", b).unwrap()).unwrap();
        prop_assert_eq!(x.checked_add(&y).unwrap(), y.checked_add(&x).unwrap());
    }
}
