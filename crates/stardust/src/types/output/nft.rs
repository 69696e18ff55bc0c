use stardust_core::ser::{ByteFormat, ReadStream, SerError, SerResult, WriteStream};

use super::NFT_OUTPUT_TYPE;
use crate::types::{
    address::NftAddress,
    feature::{features_length, read_features, write_features, Feature},
    ids::NftId,
    native_token::{native_tokens_length, read_native_tokens, write_native_tokens, NativeToken},
    unlock_condition::{read_unlock_conditions, unlock_conditions_length, write_unlock_conditions, UnlockCondition},
};

/// Minimum serialized length of an NFT output.
pub const MIN_NFT_OUTPUT_LENGTH: usize = 1 // type
    + 8 // amount
    + 1 // native tokens
    + NftId::LENGTH
    + 1 // unlock conditions
    + 1 // features
    + 1; // immutable features

/// A non-fungible token.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct NftOutput {
    /// Base currency held
    pub amount: u64,
    /// Native tokens held
    pub native_tokens: Vec<NativeToken>,
    /// Zero when the NFT is minted
    pub nft_id: NftId,
    /// Spending rules
    pub unlock_conditions: Vec<UnlockCondition>,
    /// Attached metadata
    pub features: Vec<Feature>,
    /// Metadata fixed at minting
    pub immutable_features: Vec<Feature>,
}

impl NftOutput {
    /// The address the NFT controls.
    pub fn nft_address(&self) -> NftAddress {
        NftAddress::new(self.nft_id)
    }
}

impl ByteFormat for NftOutput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 8
            + native_tokens_length(&self.native_tokens)
            + NftId::LENGTH
            + unlock_conditions_length(&self.unlock_conditions)
            + features_length(&self.features)
            + features_length(&self.immutable_features)
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_NFT_OUTPUT_LENGTH, "nftOutput")?;
        stream.read_type_u8("nftOutput", NFT_OUTPUT_TYPE)?;
        let amount = stream.read_u64("nftOutput.amount")?;
        let native_tokens = read_native_tokens(stream)?;
        let nft_id = NftId::read_from(stream)?;
        let unlock_conditions = read_unlock_conditions(stream)?;
        let features = read_features(stream, "features")?;
        let immutable_features = read_features(stream, "immutableFeatures")?;
        Ok(Self {
            amount,
            native_tokens,
            nft_id,
            unlock_conditions,
            features,
            immutable_features,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("nftOutput", NFT_OUTPUT_TYPE)?;
        len += stream.write_u64("nftOutput.amount", self.amount)?;
        len += write_native_tokens(stream, &self.native_tokens)?;
        len += self.nft_id.write_to(stream)?;
        len += write_unlock_conditions(stream, &self.unlock_conditions)?;
        len += write_features(stream, "features", &self.features)?;
        len += write_features(stream, "immutableFeatures", &self.immutable_features)?;
        Ok(len)
    }
}
