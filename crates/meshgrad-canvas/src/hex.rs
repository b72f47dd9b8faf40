//! Serde adapter storing `Rgb` as a `"#rrggbb"` string.

use meshgrad_engine::paint::Rgb;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(rgb: &Rgb, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&rgb.to_hex())
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Rgb, D::Error> {
    let s = String::deserialize(deserializer)?;
    Rgb::from_hex(&s).map_err(D::Error::custom)
}
