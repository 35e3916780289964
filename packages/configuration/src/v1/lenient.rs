//! Deserializers for options that are often set from environment variables.
//!
//! `figment` types environment values by their content, so `PATH_KEY=1234`
//! arrives as an integer and `ALLOWED_INFO_HASHES=a,b` as a single string.
use std::fmt;

use serde::de::{self, SeqAccess, Visitor};
use serde::Deserializer;
use swarm_tracker_primitives::info_hash::InfoHash;

/// Accepts a string, an integer or nothing. Empty strings are `None`.
///
/// # Errors
///
/// Will return an error for any other value type.
pub fn option_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptionStringVisitor;

    impl<'de> Visitor<'de> for OptionStringVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a string")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
            deserializer.deserialize_any(self)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            Ok(if v.is_empty() { None } else { Some(v.to_owned()) })
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(Some(v.to_string()))
        }
    }

    deserializer.deserialize_option(OptionStringVisitor)
}

/// Accepts a list of hex info hashes or a single comma separated string of
/// them. Blank entries are skipped.
///
/// # Errors
///
/// Will return an error if an entry is not a 40 character hex string.
pub fn info_hash_list<'de, D>(deserializer: D) -> Result<Vec<InfoHash>, D::Error>
where
    D: Deserializer<'de>,
{
    struct InfoHashListVisitor;

    impl<'de> Visitor<'de> for InfoHashListVisitor {
        type Value = Vec<InfoHash>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a list of info hashes or a comma separated string of them")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            v.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(|entry| {
                    entry
                        .parse::<InfoHash>()
                        .map_err(|_| E::invalid_value(de::Unexpected::Str(entry), &"a 40 character hex info hash"))
                })
                .collect()
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut info_hashes = Vec::new();
            while let Some(info_hash) = seq.next_element::<InfoHash>()? {
                info_hashes.push(info_hash);
            }
            Ok(info_hashes)
        }
    }

    deserializer.deserialize_any(InfoHashListVisitor)
}
