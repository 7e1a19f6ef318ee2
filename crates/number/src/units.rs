use {
    alloy::primitives::{
        U256,
        utils::{ParseUnits, format_units, parse_units},
    },
    anyhow::{Context, Result, bail},
    serde::{Deserialize, Deserializer, Serialize, Serializer},
    std::{fmt, str::FromStr},
};

/// An amount of the chain's native currency, stored in wei.
///
/// Parses from a decimal string with an optional unit suffix (`"0.03"`,
/// `"0.03 ether"`, `"30 gwei"`, `"1000 wei"`). A bare number is interpreted
/// as ether, matching how prices are written in deployment parameters.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Ether(U256);

impl Ether {
    pub const ZERO: Self = Self(U256::ZERO);

    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    /// Returns the amount in wei.
    pub fn wei(self) -> U256 {
        self.0
    }

    /// Parses a decimal amount denominated in `unit` (e.g. `"gwei"`).
    pub fn parse(amount: &str, unit: &str) -> Result<Self> {
        match parse_units(amount, unit)
            .with_context(|| format!("invalid amount {amount:?} {unit}"))?
        {
            ParseUnits::U256(wei) => Ok(Self(wei)),
            ParseUnits::I256(_) => bail!("amount {amount:?} must not be negative"),
        }
    }
}

impl From<Ether> for U256 {
    fn from(value: Ether) -> Self {
        value.0
    }
}

impl FromStr for Ether {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (amount, unit) = match s.split_once(char::is_whitespace) {
            Some((amount, unit)) => (amount, unit.trim()),
            None => (s, "ether"),
        };
        Self::parse(amount, unit)
    }
}

impl fmt::Display for Ether {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = format_units(self.0, "ether").map_err(|_| fmt::Error)?;
        let trimmed = match formatted.split_once('.') {
            Some(_) => formatted.trim_end_matches('0').trim_end_matches('.'),
            None => formatted.as_str(),
        };
        f.write_str(trimmed)
    }
}

impl Serialize for Ether {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Ether {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
