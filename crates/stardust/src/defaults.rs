//! Default protocol parameters of the network selected by feature flag.

use crate::params::{ProtocolParameters, RentStructure};

#[cfg(not(feature = "testnet"))]
/// Shimmer mainnet constants.
pub mod network {
    use super::*;

    /// The default network name, selected by feature flag
    pub const NETWORK_NAME: &str = "shimmer";
    /// The default bech32 hrp, selected by feature flag
    pub const BECH32_HRP: &str = "smr";
    /// The default token supply, selected by feature flag
    pub const TOKEN_SUPPLY: u64 = 1_813_620_509_061_365;
    /// The default rent structure, selected by feature flag
    pub const RENT_STRUCTURE: RentStructure = RentStructure::new(100, 1, 10);
}

#[cfg(feature = "testnet")]
/// Public testnet constants.
pub mod network {
    use super::*;

    /// The default network name, selected by feature flag
    pub const NETWORK_NAME: &str = "testnet";
    /// The default bech32 hrp, selected by feature flag
    pub const BECH32_HRP: &str = "rms";
    /// The default token supply, selected by feature flag
    pub const TOKEN_SUPPLY: u64 = 1_450_896_407_249_092;
    /// The default rent structure, selected by feature flag
    pub const RENT_STRUCTURE: RentStructure = RentStructure::new(100, 1, 10);
}

/// The protocol version this crate encodes.
pub const PROTOCOL_VERSION: u8 = 2;
/// The minimum proof-of-work score of the default network.
pub const MIN_POW_SCORE: u32 = 1500;

/// The protocol parameters of the default network, selected by feature flag. Prefer the
/// parameters reported by a node when one is at hand.
pub fn protocol_parameters() -> ProtocolParameters {
    ProtocolParameters {
        version: PROTOCOL_VERSION,
        network_name: network::NETWORK_NAME.to_owned(),
        bech32_hrp: network::BECH32_HRP.to_owned(),
        min_pow_score: MIN_POW_SCORE,
        rent_structure: network::RENT_STRUCTURE,
        token_supply: network::TOKEN_SUPPLY,
    }
}
