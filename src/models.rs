use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Countries offered by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Country {
    #[default]
    India,
    #[serde(rename = "United States")]
    UnitedStates,
    #[serde(rename = "United Kingdom")]
    UnitedKingdom,
    Japan,
}

impl Country {
    /// All selectable countries, in dropdown order.
    pub const ALL: [Country; 4] = [
        Country::India,
        Country::UnitedStates,
        Country::UnitedKingdom,
        Country::Japan,
    ];

    /// Value sent to the endpoint and shown in the dropdown.
    pub fn as_str(&self) -> &'static str {
        match self {
            Country::India => "India",
            Country::UnitedStates => "United States",
            Country::UnitedKingdom => "United Kingdom",
            Country::Japan => "Japan",
        }
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Country {
    type Err = String;

    /// Accepts the display name in any case, with spaces, dashes or underscores
    /// (`"United States"`, `"united-states"`, `"UNITED_STATES"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == '_' { ' ' } else { c })
            .collect::<String>()
            .to_lowercase();
        Country::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == norm)
            .ok_or_else(|| {
                let names: Vec<&str> = Country::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown country '{}', expected one of: {}", s, names.join(", "))
            })
    }
}

/// One institution as delivered by the `/universities` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct University {
    /// Some backends emit numeric ids, others strings; normalized to `String`.
    #[serde(default, deserialize_with = "de_string_from_string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub name: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub website: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub state: String,
    #[serde(default, deserialize_with = "de_string_or_null")]
    pub country: String,
}

/// Serde helper: parse a `String` from a JSON string or number; `null` becomes empty.
fn de_string_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a string, number or null identifier")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v.to_string())
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                Ok((v as i64).to_string())
            } else {
                Ok(v.to_string())
            }
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(String::new())
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(s.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Serde helper: `null` becomes an empty string.
fn de_string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
