//! Features: optional metadata attached to an output. Immutable features use the same encoding
//! and are fixed when the output's alias, foundry or NFT is created.

use stardust_core::ser::{
    list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream,
};

use crate::types::{
    address::{Address, MIN_ADDRESS_LENGTH},
    min_of,
};

/// Discriminant of the sender feature.
pub const SENDER_FEATURE_TYPE: u8 = 0;
/// Discriminant of the issuer feature.
pub const ISSUER_FEATURE_TYPE: u8 = 1;
/// Discriminant of the metadata feature.
pub const METADATA_FEATURE_TYPE: u8 = 2;
/// Discriminant of the tag feature.
pub const TAG_FEATURE_TYPE: u8 = 3;

/// Minimum serialized length of the sender feature.
pub const MIN_SENDER_FEATURE_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH;
/// Minimum serialized length of the issuer feature.
pub const MIN_ISSUER_FEATURE_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH;
/// Minimum serialized length of the metadata feature: type and u16 length.
pub const MIN_METADATA_FEATURE_LENGTH: usize = 1 + 2;
/// Minimum serialized length of the tag feature: type and u8 length.
pub const MIN_TAG_FEATURE_LENGTH: usize = 1 + 1;
/// Minimum serialized length of any feature.
pub const MIN_FEATURE_LENGTH: usize = min_of(&[
    MIN_SENDER_FEATURE_LENGTH,
    MIN_ISSUER_FEATURE_LENGTH,
    MIN_METADATA_FEATURE_LENGTH,
    MIN_TAG_FEATURE_LENGTH,
]);

/// Maximum length of metadata, in a metadata feature or an alias's state metadata.
pub const MAX_METADATA_LENGTH: usize = 8192;
/// Maximum length of a tag, in a tag feature or a tagged data payload.
pub const MAX_TAG_LENGTH: usize = 64;

/// Names the address that sent the output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SenderFeature {
    /// The sender
    pub address: Address,
}

/// Names the address that issued an alias or NFT.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct IssuerFeature {
    /// The issuer
    pub address: Address,
}

/// Arbitrary binary metadata.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MetadataFeature {
    /// The metadata
    pub data: Vec<u8>,
}

/// A tag used to index the output.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TagFeature {
    /// The tag
    pub tag: Vec<u8>,
}

impl ByteFormat for SenderFeature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + self.address.serialized_length()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_SENDER_FEATURE_LENGTH, "senderFeature")?;
        stream.read_type_u8("senderFeature", SENDER_FEATURE_TYPE)?;
        Ok(Self {
            address: Address::read_from(stream)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("senderFeature", SENDER_FEATURE_TYPE)?;
        len += self.address.write_to(stream)?;
        Ok(len)
    }
}

impl ByteFormat for IssuerFeature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + self.address.serialized_length()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_ISSUER_FEATURE_LENGTH, "issuerFeature")?;
        stream.read_type_u8("issuerFeature", ISSUER_FEATURE_TYPE)?;
        Ok(Self {
            address: Address::read_from(stream)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("issuerFeature", ISSUER_FEATURE_TYPE)?;
        len += self.address.write_to(stream)?;
        Ok(len)
    }
}

impl ByteFormat for MetadataFeature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_METADATA_FEATURE_LENGTH + self.data.len()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_METADATA_FEATURE_LENGTH, "metadataFeature")?;
        stream.read_type_u8("metadataFeature", METADATA_FEATURE_TYPE)?;
        Ok(Self {
            data: stream.read_prefixed_bytes("metadataFeature.data", Prefix::U16)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("metadataFeature", METADATA_FEATURE_TYPE)?;
        len += stream.write_prefixed_bytes("metadataFeature.data", Prefix::U16, &self.data)?;
        Ok(len)
    }
}

impl ByteFormat for TagFeature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_TAG_FEATURE_LENGTH + self.tag.len()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TAG_FEATURE_LENGTH, "tagFeature")?;
        stream.read_type_u8("tagFeature", TAG_FEATURE_TYPE)?;
        Ok(Self {
            tag: stream.read_prefixed_bytes("tagFeature.tag", Prefix::U8)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("tagFeature", TAG_FEATURE_TYPE)?;
        len += stream.write_prefixed_bytes("tagFeature.tag", Prefix::U8, &self.tag)?;
        Ok(len)
    }
}

/// A feature of any kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum Feature {
    /// Sender
    Sender(SenderFeature),
    /// Issuer
    Issuer(IssuerFeature),
    /// Metadata
    Metadata(MetadataFeature),
    /// Tag
    Tag(TagFeature),
}

impl Feature {
    /// The discriminant of the feature kind.
    pub fn kind(&self) -> u8 {
        match self {
            Feature::Sender(_) => SENDER_FEATURE_TYPE,
            Feature::Issuer(_) => ISSUER_FEATURE_TYPE,
            Feature::Metadata(_) => METADATA_FEATURE_TYPE,
            Feature::Tag(_) => TAG_FEATURE_TYPE,
        }
    }

    /// Human readable name of a feature kind.
    pub fn kind_name(kind: u8) -> &'static str {
        match kind {
            SENDER_FEATURE_TYPE => "Sender Feature",
            ISSUER_FEATURE_TYPE => "Issuer Feature",
            METADATA_FEATURE_TYPE => "Metadata Feature",
            TAG_FEATURE_TYPE => "Tag Feature",
            _ => "Unknown Feature",
        }
    }

    /// Build a sender feature.
    pub fn sender(address: impl Into<Address>) -> Self {
        Feature::Sender(SenderFeature {
            address: address.into(),
        })
    }

    /// Build an issuer feature.
    pub fn issuer(address: impl Into<Address>) -> Self {
        Feature::Issuer(IssuerFeature {
            address: address.into(),
        })
    }

    /// Build a metadata feature.
    pub fn metadata(data: impl Into<Vec<u8>>) -> Self {
        Feature::Metadata(MetadataFeature { data: data.into() })
    }

    /// Build a tag feature.
    pub fn tag(tag: impl Into<Vec<u8>>) -> Self {
        Feature::Tag(TagFeature { tag: tag.into() })
    }
}

impl ByteFormat for Feature {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            Feature::Sender(f) => f.serialized_length(),
            Feature::Issuer(f) => f.serialized_length(),
            Feature::Metadata(f) => f.serialized_length(),
            Feature::Tag(f) => f.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_FEATURE_LENGTH, "feature")?;
        match stream.peek_u8("feature")? {
            SENDER_FEATURE_TYPE => Ok(Feature::Sender(SenderFeature::read_from(stream)?)),
            ISSUER_FEATURE_TYPE => Ok(Feature::Issuer(IssuerFeature::read_from(stream)?)),
            METADATA_FEATURE_TYPE => Ok(Feature::Metadata(MetadataFeature::read_from(stream)?)),
            TAG_FEATURE_TYPE => Ok(Feature::Tag(TagFeature::read_from(stream)?)),
            found => Err(SerError::UnrecognizedType {
                kind: "feature",
                found: found as u32,
            }),
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            Feature::Sender(f) => f.write_to(stream),
            Feature::Issuer(f) => f.write_to(stream),
            Feature::Metadata(f) => f.write_to(stream),
            Feature::Tag(f) => f.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(Feature);

/// Read a u8-count-prefixed list of features.
pub fn read_features(stream: &mut ReadStream<'_>, field: &'static str) -> SerResult<Vec<Feature>> {
    read_list(stream, field, Prefix::U8)
}

/// Write a u8-count-prefixed list of features.
pub fn write_features(stream: &mut WriteStream, field: &'static str, features: &[Feature]) -> SerResult<usize> {
    write_list(stream, field, Prefix::U8, features)
}

/// Serialized length of a list of features.
pub fn features_length(features: &[Feature]) -> usize {
    list_length(Prefix::U8, features)
}
