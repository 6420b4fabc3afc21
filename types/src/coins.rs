//! Multi-denomination coin amounts.
//!
//! [`Coin`] is the wire form supplied by callers and may carry any signed
//! quantity. [`Coins`] is the validated, normalized form: sorted by denom,
//! no duplicates, no zero entries, every quantity positive.

use crate::error::CoinsError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Largest quantity a single denomination may hold.
///
/// Bounded by the signed wire representation so every [`Coins`] value can be
/// exported back to [`Coin`]s.
pub const MAX_AMOUNT: u128 = i128::MAX as u128;

/// A single denomination quantity as supplied by a caller.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_serde")]
    pub amount: i128,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: i128) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Amounts travel as decimal strings; bare integers are accepted on input.
///
/// Both forms accept the full `i128` range, as far as the input format can
/// carry it.
mod amount_serde {
    use super::*;
    use serde::de::{self, Visitor};

    struct AmountVisitor;

    impl Visitor<'_> for AmountVisitor {
        type Value = i128;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an integer or a decimal string")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<i128, E> {
            v.trim().parse().map_err(E::custom)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i128, E> {
            Ok(v.into())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i128, E> {
            Ok(v.into())
        }

        fn visit_i128<E: de::Error>(self, v: i128) -> Result<i128, E> {
            Ok(v)
        }

        fn visit_u128<E: de::Error>(self, v: u128) -> Result<i128, E> {
            i128::try_from(v).map_err(|_| E::custom(format!("amount {v} out of range")))
        }
    }

    pub fn serialize<S: Serializer>(amount: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        deserializer.deserialize_any(AmountVisitor)
    }
}

/// Whether `denom` is an acceptable denomination name.
///
/// 3–128 characters, starting with an ASCII letter, followed by ASCII
/// alphanumerics or one of `/ : . _ -`.
pub fn is_valid_denom(denom: &str) -> bool {
    let bytes = denom.as_bytes();
    if !(3..=128).contains(&bytes.len()) || !bytes[0].is_ascii_alphabetic() {
        return false;
    }
    bytes[1..]
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'/' | b':' | b'.' | b'_' | b'-'))
}

/// A validated multi-denomination amount.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Coins(BTreeMap<String, u128>);

impl Coins {
    /// The empty amount.
    pub fn zero() -> Self {
        Self(BTreeMap::new())
    }

    /// Validate and normalize caller-supplied coins.
    ///
    /// Every denom must be valid and unique and every quantity non-negative;
    /// at least one quantity must be positive. Zero entries are dropped.
    pub fn try_from_coins(coins: Vec<Coin>) -> Result<Self, CoinsError> {
        let mut map = BTreeMap::new();
        for coin in coins {
            if !is_valid_denom(&coin.denom) {
                return Err(CoinsError::InvalidDenom(coin.denom));
            }
            if map.contains_key(&coin.denom) {
                return Err(CoinsError::DuplicateDenom(coin.denom));
            }
            if coin.amount < 0 {
                return Err(CoinsError::NegativeAmount {
                    denom: coin.denom,
                    amount: coin.amount,
                });
            }
            // Zero entries still claim their denom for the duplicate check.
            map.insert(coin.denom, coin.amount as u128);
        }
        map.retain(|_, amount| *amount > 0);
        if map.is_empty() {
            return Err(CoinsError::Empty);
        }
        Ok(Self(map))
    }

    /// A single-denomination amount. Zero yields the empty amount.
    pub fn single(denom: impl Into<String>, amount: u128) -> Result<Self, CoinsError> {
        let denom = denom.into();
        if !is_valid_denom(&denom) {
            return Err(CoinsError::InvalidDenom(denom));
        }
        if amount > MAX_AMOUNT {
            return Err(CoinsError::Overflow(denom));
        }
        let mut map = BTreeMap::new();
        if amount > 0 {
            map.insert(denom, amount);
        }
        Ok(Self(map))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_empty()
    }

    /// Quantity held for `denom` (zero when absent).
    pub fn amount_of(&self, denom: &str) -> u128 {
        self.0.get(denom).copied().unwrap_or(0)
    }

    /// Iterate `(denom, amount)` pairs in denom order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u128)> {
        self.0.iter().map(|(d, a)| (d.as_str(), *a))
    }

    pub fn denoms(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Denomination-wise sum. Fails if any quantity would exceed [`MAX_AMOUNT`].
    pub fn checked_add(&self, other: &Self) -> Result<Self, CoinsError> {
        let mut map = self.0.clone();
        for (denom, amount) in &other.0 {
            let entry = map.entry(denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(*amount)
                .filter(|sum| *sum <= MAX_AMOUNT)
                .ok_or_else(|| CoinsError::Overflow(denom.clone()))?;
        }
        Ok(Self(map))
    }

    /// Denomination-wise difference, `None` if any quantity would go negative.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        let mut map = self.0.clone();
        for (denom, amount) in &other.0 {
            let have = map.get(denom).copied().unwrap_or(0);
            let left = have.checked_sub(*amount)?;
            if left == 0 {
                map.remove(denom);
            } else {
                map.insert(denom.clone(), left);
            }
        }
        Some(Self(map))
    }

    /// Whether every quantity in `other` is covered by `self`.
    pub fn covers(&self, other: &Self) -> bool {
        other.iter().all(|(denom, amount)| self.amount_of(denom) >= amount)
    }

    /// Export as wire coins.
    pub fn to_coins(&self) -> Vec<Coin> {
        self.0
            .iter()
            .map(|(denom, amount)| Coin::new(denom.clone(), *amount as i128))
            .collect()
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denom, amount) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{amount}{denom}")?;
            first = false;
        }
        Ok(())
    }
}

impl Serialize for Coins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_coins().serialize(serializer)
    }
}

/// Deserialization accepts an empty list (a zero balance) but otherwise
/// applies the same rules as [`Coins::try_from_coins`].
impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let coins = Vec::<Coin>::deserialize(deserializer)?;
        if coins.is_empty() {
            return Ok(Self::zero());
        }
        Self::try_from_coins(coins).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(pairs: &[(&str, i128)]) -> Result<Coins, CoinsError> {
        Coins::try_from_coins(pairs.iter().map(|(d, a)| Coin::new(*d, *a)).collect())
    }

    #[test]
    fn valid_amount_is_normalized() {
        let c = coins(&[("tokeny", 5), ("tokenx", 100), ("tokenz", 0)]).unwrap();
        let denoms: Vec<_> = c.denoms().collect();
        assert_eq!(denoms, vec!["tokenx", "tokeny"]);
        assert_eq!(c.amount_of("tokenx"), 100);
        assert_eq!(c.amount_of("tokenz"), 0);
        assert_eq!(c.to_string(), "100tokenx,5tokeny");
    }

    #[test]
    fn empty_and_all_zero_rejected() {
        assert_eq!(coins(&[]), Err(CoinsError::Empty));
        assert_eq!(coins(&[("tokenx", 0)]), Err(CoinsError::Empty));
    }

    #[test]
    fn negative_rejected() {
        assert!(matches!(
            coins(&[("tokenx", 10), ("tokeny", -1)]),
            Err(CoinsError::NegativeAmount { .. })
        ));
    }

    #[test]
    fn duplicate_rejected_even_when_zero() {
        assert_eq!(
            coins(&[("tokenx", 0), ("tokenx", 5)]),
            Err(CoinsError::DuplicateDenom("tokenx".into()))
        );
    }

    #[test]
    fn denom_rules() {
        assert!(is_valid_denom("ucommercio"));
        assert!(is_valid_denom("ibc/27394FB0"));
        assert!(!is_valid_denom("ab"));
        assert!(!is_valid_denom("1abc"));
        assert!(!is_valid_denom("token x"));
        assert!(matches!(
            coins(&[("x", 1)]),
            Err(CoinsError::InvalidDenom(_))
        ));
    }

    #[test]
    fn checked_add_merges_denoms() {
        let a = coins(&[("tokenx", 100)]).unwrap();
        let b = coins(&[("tokenx", 50), ("tokeny", 1)]).unwrap();
        let sum = a.checked_add(&b).unwrap();
        assert_eq!(sum.amount_of("tokenx"), 150);
        assert_eq!(sum.amount_of("tokeny"), 1);
    }

    #[test]
    fn checked_add_overflow() {
        let a = Coins::single("tokenx", MAX_AMOUNT).unwrap();
        let b = Coins::single("tokenx", 1).unwrap();
        assert_eq!(a.checked_add(&b), Err(CoinsError::Overflow("tokenx".into())));
    }

    #[test]
    fn checked_sub_and_covers() {
        let have = coins(&[("tokenx", 100), ("tokeny", 3)]).unwrap();
        let want = coins(&[("tokenx", 100)]).unwrap();
        assert!(have.covers(&want));
        let left = have.checked_sub(&want).unwrap();
        assert_eq!(left.amount_of("tokenx"), 0);
        assert_eq!(left.denoms().count(), 1);
        assert!(!want.covers(&have));
        assert!(want.checked_sub(&have).is_none());
    }

    #[test]
    fn serde_amount_as_string_and_int() {
        let json = r#"[{"denom":"tokenx","amount":"100"},{"denom":"tokeny","amount":7}]"#;
        let c: Coins = serde_json::from_str(json).unwrap();
        assert_eq!(c.amount_of("tokenx"), 100);
        assert_eq!(c.amount_of("tokeny"), 7);
        let out = serde_json::to_string(&c).unwrap();
        assert_eq!(
            out,
            r#"[{"denom":"tokenx","amount":"100"},{"denom":"tokeny","amount":"7"}]"#
        );
    }

    #[test]
    fn bare_amount_above_i64_accepted() {
        let big = u64::MAX;
        let bare = format!(r#"{{"denom":"tokenx","amount":{big}}}"#);
        let quoted = format!(r#"{{"denom":"tokenx","amount":"{big}"}}"#);
        let from_bare: Coin = serde_json::from_str(&bare).unwrap();
        let from_quoted: Coin = serde_json::from_str(&quoted).unwrap();
        assert_eq!(from_bare.amount, i128::from(big));
        assert_eq!(from_bare, from_quoted);
    }

    #[test]
    fn fractional_amount_rejected() {
        let json = r#"{"denom":"tokenx","amount":1.5}"#;
        assert!(serde_json::from_str::<Coin>(json).is_err());
    }

    #[test]
    fn serde_empty_list_is_zero() {
        let c: Coins = serde_json::from_str("[]").unwrap();
        assert!(c.is_zero());
    }
}
