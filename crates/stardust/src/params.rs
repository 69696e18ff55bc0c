//! Protocol parameters, as reported by a node's info endpoint.

use serde::{Deserialize, Serialize};

use crate::types::ids::network_id_from_name;

/// The rent structure: how much base currency an output must lock per virtual byte it occupies.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentStructure {
    /// Cost of one virtual byte
    pub v_byte_cost: u32,
    /// Weight of a plain data byte
    pub v_byte_factor_data: u8,
    /// Weight of a key byte
    pub v_byte_factor_key: u8,
}

impl RentStructure {
    /// Instantiate a rent structure.
    pub const fn new(v_byte_cost: u32, v_byte_factor_data: u8, v_byte_factor_key: u8) -> Self {
        Self {
            v_byte_cost,
            v_byte_factor_data,
            v_byte_factor_key,
        }
    }
}

/// The parameters a network runs under. Validation is always relative to one of these.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolParameters {
    /// The protocol version blocks must carry
    pub version: u8,
    /// The network name. The network id is derived from it.
    pub network_name: String,
    /// The human readable part of bech32 addresses
    pub bech32_hrp: String,
    /// Minimum proof-of-work score of a block
    pub min_pow_score: u32,
    /// The rent structure
    pub rent_structure: RentStructure,
    /// Total supply of the base currency
    #[serde(with = "decimal_string")]
    pub token_supply: u64,
}

impl ProtocolParameters {
    /// The network id transaction essences must carry.
    pub fn network_id(&self) -> u64 {
        network_id_from_name(&self.network_name)
    }
}

/// Node info reports the token supply as a decimal string.
mod decimal_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        s.parse().map_err(|e: std::num::ParseIntError| D::Error::custom(e.to_string()))
    }
}
