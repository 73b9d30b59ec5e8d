// crates/matcha-core/src/zone.rs

//! # Geo-Classifier
//!
//! Derives a Paris arrondissement from a free-text address by looking for a
//! `75xyz` postal code. Addresses outside Paris, or without a recognisable
//! code, simply have no zone.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Matches a `75xyz` postal code not embedded in a longer run of ASCII
/// digits and captures `xyz`. Letters may touch it (`75011Paris`).
static PARIS_POSTCODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])75([0-9]{3})(?:[^0-9]|$)").expect("static postcode regex")
});

/// The 16th arrondissement has a second postal code (75116).
const SPLIT_16TH: u16 = 116;

/// A Paris arrondissement, always within `1..=20`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Zone(u8);

impl Zone {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 20;

    pub fn new(n: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&n).then_some(Zone(n))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Zone {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Zone::new(n).ok_or_else(|| format!("zone {n} is outside 1..=20"))
    }
}

impl From<Zone> for u8 {
    fn from(z: Zone) -> u8 {
        z.0
    }
}

/// Accepts `"7"`, `"07"` and full postal codes such as `"75007"`.
impl FromStr for Zone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.len() == 5 {
            return classify(s).ok_or_else(|| format!("not a Paris postal code: {s}"));
        }
        let n: u8 = s.parse().map_err(|_| format!("invalid zone: {s}"))?;
        Zone::try_from(n)
    }
}

/// Classify an address into its arrondissement.
///
/// Only the first `75xyz` code is considered. `75116` maps to zone 16, every
/// other code maps to `xyz % 100`, and the result must land in `1..=20`.
///
/// ```rust
/// use matcha_core::zone::classify;
///
/// assert_eq!(classify("12 Rue de Rivoli, 75001 Paris").map(|z| z.get()), Some(1));
/// assert_eq!(classify("5 Av. Kléber, 75116 Paris").map(|z| z.get()), Some(16));
/// assert_eq!(classify("3 Place Bellecour, 69002 Lyon"), None);
/// ```
pub fn classify(address: &str) -> Option<Zone> {
    let n: u16 = PARIS_POSTCODE
        .captures_iter(address)
        .find_map(|caps| caps.get(1)?.as_str().parse().ok())?;
    let zone = if n == SPLIT_16TH { 16 } else { n % 100 };
    Zone::new(zone as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone_of(address: &str) -> Option<u8> {
        classify(address).map(Zone::get)
    }

    #[test]
    fn classifies_paris_postcodes() {
        assert_eq!(zone_of("… 75001 …"), Some(1));
        assert_eq!(zone_of("… 75116 …"), Some(16));
        assert_eq!(zone_of("… 75016 …"), Some(16));
        assert_eq!(zone_of("8 Rue Oberkampf 75011 Paris"), Some(11));
        assert_eq!(zone_of("75020"), Some(20));
    }

    #[test]
    fn rejects_out_of_range_and_foreign_codes() {
        assert_eq!(zone_of("… 69000 …"), None);
        assert_eq!(zone_of("75000 Paris"), None);
        assert_eq!(zone_of("75021 Paris"), None);
        assert_eq!(zone_of("75200 Paris"), None);
        assert_eq!(zone_of(""), None);
    }

    #[test]
    fn ignores_digits_embedded_in_longer_numbers() {
        assert_eq!(zone_of("Tel 0175012345"), None);
        assert_eq!(zone_of("Tel 0175012345, 10 Rue X 75003"), Some(3));
    }

    #[test]
    fn first_code_wins() {
        assert_eq!(zone_of("75004 (formerly 75005)"), Some(4));
    }

    #[test]
    fn code_may_touch_letters() {
        assert_eq!(zone_of("8 Rue Oberkampf 75011Paris"), Some(11));
        assert_eq!(zone_of("Paris75003"), Some(3));
    }

    #[test]
    fn only_ascii_digits_form_a_code() {
        assert_eq!(zone_of("75٠٠١ then 75003"), Some(3));
        assert_eq!(zone_of("７５００１"), None);
    }

    #[test]
    fn never_panics_on_arbitrary_input() {
        for s in ["75", "75ab1", "🍵 75🍵001", "\u{0}75003\u{0}", "７５００１"] {
            let _ = classify(s);
        }
    }

    #[test]
    fn parses_zone_strings() {
        assert_eq!("7".parse::<Zone>().map(Zone::get), Ok(7));
        assert_eq!("07".parse::<Zone>().map(Zone::get), Ok(7));
        assert_eq!("75116".parse::<Zone>().map(Zone::get), Ok(16));
        assert!("0".parse::<Zone>().is_err());
        assert!("21".parse::<Zone>().is_err());
        assert!("abc".parse::<Zone>().is_err());
    }
}
