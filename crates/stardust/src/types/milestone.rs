//! Milestone payloads, their options, and the treasury transaction a receipt carries.

use stardust_core::{
    hashes::blake2b256,
    impl_fixed_bytes,
    ser::{list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream},
};

use crate::types::{
    address::{Address, MIN_ADDRESS_LENGTH},
    ids::{BlockId, MilestoneId},
    min_of, optional_payload_length,
    output::{TreasuryOutput, MIN_TREASURY_OUTPUT_LENGTH},
    read_sized_payload,
    unlock::Signature,
    write_optional_payload,
};

/// Discriminant of the treasury transaction payload.
pub const TREASURY_TRANSACTION_PAYLOAD_TYPE: u32 = 4;
/// Discriminant of the milestone payload.
pub const MILESTONE_PAYLOAD_TYPE: u32 = 7;
/// Discriminant of a treasury input.
pub const TREASURY_INPUT_TYPE: u8 = 1;
/// Discriminant of the receipt milestone option.
pub const RECEIPT_MILESTONE_OPTION_TYPE: u8 = 0;
/// Discriminant of the protocol parameters milestone option.
pub const PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE: u8 = 1;

/// Serialized length of a treasury input: type and milestone id.
pub const TREASURY_INPUT_LENGTH: usize = 1 + MilestoneId::LENGTH;
/// Serialized length of a treasury transaction payload: type, input and output.
pub const TREASURY_TRANSACTION_PAYLOAD_LENGTH: usize = 4 + TREASURY_INPUT_LENGTH + MIN_TREASURY_OUTPUT_LENGTH;
/// Minimum serialized length of migrated funds: tail transaction hash, address and deposit.
pub const MIN_MIGRATED_FUNDS_LENGTH: usize = TailTransactionHash::LENGTH + MIN_ADDRESS_LENGTH + 8;
/// Minimum serialized length of a receipt option: type, migration index, final flag, empty funds
/// list and the length-prefixed treasury transaction.
pub const MIN_RECEIPT_MILESTONE_OPTION_LENGTH: usize = 1 + 4 + 1 + 2 + 4 + TREASURY_TRANSACTION_PAYLOAD_LENGTH;
/// Minimum serialized length of a protocol parameters option: type, target index, version and
/// empty parameter bytes.
pub const MIN_PROTOCOL_PARAMS_MILESTONE_OPTION_LENGTH: usize = 1 + 4 + 1 + 2;
/// Minimum serialized length of any milestone option.
pub const MIN_MILESTONE_OPTION_LENGTH: usize =
    min_of(&[MIN_RECEIPT_MILESTONE_OPTION_LENGTH, MIN_PROTOCOL_PARAMS_MILESTONE_OPTION_LENGTH]);
/// Minimum serialized length of a milestone payload: a single parent, empty metadata, no options
/// and no signatures.
pub const MIN_MILESTONE_PAYLOAD_LENGTH: usize =
    4 + 4 + 4 + MilestoneId::LENGTH + 1 + BlockId::LENGTH + 2 * MerkleRoot::LENGTH + 2 + 1 + 1;

impl_fixed_bytes!(
    /// A blake2b-256 merkle root over block ids.
    MerkleRoot,
    32
);

impl_fixed_bytes!(
    /// The tail transaction hash of a legacy bundle, in its 49 byte T5B1 encoding.
    TailTransactionHash,
    49
);

/// Spends the treasury left behind by the previous milestone.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreasuryInput {
    /// The milestone that created the consumed treasury output
    pub milestone_id: MilestoneId,
}

impl ByteFormat for TreasuryInput {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        TREASURY_INPUT_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(TREASURY_INPUT_LENGTH, "treasuryInput")?;
        stream.read_type_u8("treasuryInput", TREASURY_INPUT_TYPE)?;
        Ok(Self {
            milestone_id: MilestoneId::read_from(stream)?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("treasuryInput", TREASURY_INPUT_TYPE)?;
        len += self.milestone_id.write_to(stream)?;
        Ok(len)
    }
}

/// Moves the treasury from one milestone to the next, minus the funds a receipt migrates.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TreasuryTransactionPayload {
    /// The consumed treasury
    pub input: TreasuryInput,
    /// The new treasury
    pub output: TreasuryOutput,
}

impl ByteFormat for TreasuryTransactionPayload {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        TREASURY_TRANSACTION_PAYLOAD_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(TREASURY_TRANSACTION_PAYLOAD_LENGTH, "treasuryTransactionPayload")?;
        stream.read_type_u32("treasuryTransactionPayload", TREASURY_TRANSACTION_PAYLOAD_TYPE)?;
        let input = TreasuryInput::read_from(stream)?;
        let output = TreasuryOutput::read_from(stream)?;
        Ok(Self { input, output })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u32("treasuryTransactionPayload", TREASURY_TRANSACTION_PAYLOAD_TYPE)?;
        len += self.input.write_to(stream)?;
        len += self.output.write_to(stream)?;
        Ok(len)
    }
}

/// Funds migrated from the legacy network to an address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct MigratedFunds {
    /// The legacy bundle the funds came from
    pub tail_transaction_hash: TailTransactionHash,
    /// The receiving address
    pub address: Address,
    /// The migrated amount
    pub deposit: u64,
}

impl ByteFormat for MigratedFunds {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        TailTransactionHash::LENGTH + self.address.serialized_length() + 8
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_MIGRATED_FUNDS_LENGTH, "migratedFunds")?;
        let tail_transaction_hash = TailTransactionHash::read_from(stream)?;
        let address = Address::read_from(stream)?;
        let deposit = stream.read_u64("migratedFunds.deposit")?;
        Ok(Self {
            tail_transaction_hash,
            address,
            deposit,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = self.tail_transaction_hash.write_to(stream)?;
        len += self.address.write_to(stream)?;
        len += stream.write_u64("migratedFunds.deposit", self.deposit)?;
        Ok(len)
    }
}

/// Lists funds migrated at a legacy milestone and the treasury transaction that pays for them.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct ReceiptMilestoneOption {
    /// The legacy milestone index the funds were migrated at
    pub migrated_at: u32,
    /// Whether this is the last receipt for `migrated_at`
    pub last: bool,
    /// The migrated funds
    pub funds: Vec<MigratedFunds>,
    /// The treasury transaction funding the migration
    pub transaction: TreasuryTransactionPayload,
}

impl ByteFormat for ReceiptMilestoneOption {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + 4 + 1 + list_length(Prefix::U16, &self.funds) + optional_payload_length(Some(&self.transaction))
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_RECEIPT_MILESTONE_OPTION_LENGTH, "receiptMilestoneOption")?;
        stream.read_type_u8("receiptMilestoneOption", RECEIPT_MILESTONE_OPTION_TYPE)?;
        let migrated_at = stream.read_u32("receiptMilestoneOption.migratedAt")?;
        let last = stream.read_bool("receiptMilestoneOption.final")?;
        let funds = read_list(stream, "receiptMilestoneOption.funds", Prefix::U16)?;
        let transaction = read_sized_payload(stream, "receiptMilestoneOption.transaction")?;
        Ok(Self {
            migrated_at,
            last,
            funds,
            transaction,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("receiptMilestoneOption", RECEIPT_MILESTONE_OPTION_TYPE)?;
        len += stream.write_u32("receiptMilestoneOption.migratedAt", self.migrated_at)?;
        len += stream.write_bool("receiptMilestoneOption.final", self.last)?;
        len += write_list(stream, "receiptMilestoneOption.funds", Prefix::U16, &self.funds)?;
        len += write_optional_payload(stream, "receiptMilestoneOption.transaction", Some(&self.transaction))?;
        Ok(len)
    }
}

/// Announces new protocol parameters that take effect at a target milestone.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct ProtocolParamsMilestoneOption {
    /// The milestone index the parameters take effect at
    pub target_milestone_index: u32,
    /// The protocol version that takes effect
    pub protocol_version: u8,
    /// The serialized parameters
    pub params: Vec<u8>,
}

impl ByteFormat for ProtocolParamsMilestoneOption {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_PROTOCOL_PARAMS_MILESTONE_OPTION_LENGTH + self.params.len()
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_PROTOCOL_PARAMS_MILESTONE_OPTION_LENGTH, "protocolParamsMilestoneOption")?;
        stream.read_type_u8("protocolParamsMilestoneOption", PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE)?;
        let target_milestone_index = stream.read_u32("protocolParamsMilestoneOption.targetMilestoneIndex")?;
        let protocol_version = stream.read_u8("protocolParamsMilestoneOption.protocolVersion")?;
        let params = stream.read_prefixed_bytes("protocolParamsMilestoneOption.params", Prefix::U16)?;
        Ok(Self {
            target_milestone_index,
            protocol_version,
            params,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("protocolParamsMilestoneOption", PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE)?;
        len += stream.write_u32(
            "protocolParamsMilestoneOption.targetMilestoneIndex",
            self.target_milestone_index,
        )?;
        len += stream.write_u8("protocolParamsMilestoneOption.protocolVersion", self.protocol_version)?;
        len += stream.write_prefixed_bytes("protocolParamsMilestoneOption.params", Prefix::U16, &self.params)?;
        Ok(len)
    }
}

/// A milestone option of any kind.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MilestoneOption {
    /// Legacy migration receipt
    Receipt(ReceiptMilestoneOption),
    /// Protocol parameter change
    ProtocolParams(ProtocolParamsMilestoneOption),
}

impl MilestoneOption {
    /// The discriminant of the option kind.
    pub fn kind(&self) -> u8 {
        match self {
            MilestoneOption::Receipt(_) => RECEIPT_MILESTONE_OPTION_TYPE,
            MilestoneOption::ProtocolParams(_) => PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE,
        }
    }
}

impl From<ReceiptMilestoneOption> for MilestoneOption {
    fn from(o: ReceiptMilestoneOption) -> Self {
        MilestoneOption::Receipt(o)
    }
}

impl From<ProtocolParamsMilestoneOption> for MilestoneOption {
    fn from(o: ProtocolParamsMilestoneOption) -> Self {
        MilestoneOption::ProtocolParams(o)
    }
}

impl ByteFormat for MilestoneOption {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            MilestoneOption::Receipt(o) => o.serialized_length(),
            MilestoneOption::ProtocolParams(o) => o.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_MILESTONE_OPTION_LENGTH, "milestoneOption")?;
        match stream.peek_u8("milestoneOption")? {
            RECEIPT_MILESTONE_OPTION_TYPE => Ok(ReceiptMilestoneOption::read_from(stream)?.into()),
            PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE => Ok(ProtocolParamsMilestoneOption::read_from(stream)?.into()),
            found => {
                tracing::trace!(found, "unknown milestone option");
                Err(SerError::UnrecognizedType {
                    kind: "milestoneOption",
                    found: found as u32,
                })
            }
        }
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            MilestoneOption::Receipt(o) => o.write_to(stream),
            MilestoneOption::ProtocolParams(o) => o.write_to(stream),
        }
    }
}

/// A checkpoint issued by the coordinator. It confirms the past cone of its parents and is
/// signed by the coordinator's keys.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct MilestonePayload {
    /// The milestone index
    pub index: u32,
    /// Unix time in seconds
    pub timestamp: u32,
    /// The id of the milestone before this one
    pub previous_milestone_id: MilestoneId,
    /// The blocks this milestone confirms
    pub parents: Vec<BlockId>,
    /// Merkle root of the blocks newly confirmed by this milestone
    pub inclusion_merkle_root: MerkleRoot,
    /// Merkle root of the confirmed blocks that mutated the ledger
    pub applied_merkle_root: MerkleRoot,
    /// Free form data
    pub metadata: Vec<u8>,
    /// Receipt and protocol parameter options
    pub options: Vec<MilestoneOption>,
    /// Coordinator signatures over the milestone id
    pub signatures: Vec<Signature>,
}

impl MilestonePayload {
    fn essence_length(&self) -> usize {
        4 + 4
            + MilestoneId::LENGTH
            + list_length(Prefix::U8, &self.parents)
            + 2 * MerkleRoot::LENGTH
            + 2
            + self.metadata.len()
            + list_length(Prefix::U8, &self.options)
    }

    fn write_essence(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u32("milestonePayload.index", self.index)?;
        len += stream.write_u32("milestonePayload.timestamp", self.timestamp)?;
        len += self.previous_milestone_id.write_to(stream)?;
        len += write_list(stream, "milestonePayload.parents", Prefix::U8, &self.parents)?;
        len += self.inclusion_merkle_root.write_to(stream)?;
        len += self.applied_merkle_root.write_to(stream)?;
        len += stream.write_prefixed_bytes("milestonePayload.metadata", Prefix::U16, &self.metadata)?;
        len += write_list(stream, "milestonePayload.options", Prefix::U8, &self.options)?;
        Ok(len)
    }

    /// The milestone id: the blake2b-256 digest of every field between the type and the
    /// signatures.
    pub fn id(&self) -> SerResult<MilestoneId> {
        let mut stream = WriteStream::with_capacity(self.essence_length());
        self.write_essence(&mut stream)?;
        Ok(blake2b256(stream.as_bytes()).into())
    }

    /// The receipt option, if the milestone carries one.
    pub fn receipt(&self) -> Option<&ReceiptMilestoneOption> {
        self.options.iter().find_map(|o| match o {
            MilestoneOption::Receipt(r) => Some(r),
            _ => None,
        })
    }
}

impl ByteFormat for MilestonePayload {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        4 + self.essence_length() + list_length(Prefix::U8, &self.signatures)
    }

    #[tracing::instrument(skip_all, err)]
    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_MILESTONE_PAYLOAD_LENGTH, "milestonePayload")?;
        stream.read_type_u32("milestonePayload", MILESTONE_PAYLOAD_TYPE)?;
        let index = stream.read_u32("milestonePayload.index")?;
        let timestamp = stream.read_u32("milestonePayload.timestamp")?;
        let previous_milestone_id = MilestoneId::read_from(stream)?;
        let parents = read_list(stream, "milestonePayload.parents", Prefix::U8)?;
        let inclusion_merkle_root = MerkleRoot::read_from(stream)?;
        let applied_merkle_root = MerkleRoot::read_from(stream)?;
        let metadata = stream.read_prefixed_bytes("milestonePayload.metadata", Prefix::U16)?;
        let options = read_list(stream, "milestonePayload.options", Prefix::U8)?;
        let signatures = read_list(stream, "milestonePayload.signatures", Prefix::U8)?;
        Ok(Self {
            index,
            timestamp,
            previous_milestone_id,
            parents,
            inclusion_merkle_root,
            applied_merkle_root,
            metadata,
            options,
            signatures,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u32("milestonePayload", MILESTONE_PAYLOAD_TYPE)?;
        len += self.write_essence(stream)?;
        len += write_list(stream, "milestonePayload.signatures", Prefix::U8, &self.signatures)?;
        Ok(len)
    }
}

stardust_core::impl_hex_serde!(TreasuryTransactionPayload);
stardust_core::impl_hex_serde!(MilestonePayload);

#[cfg(test)]
pub(crate) mod test {
    use super::*;
    use crate::types::{
        address::Ed25519Address,
        unlock::{Ed25519PublicKey, Ed25519Signature, Ed25519SignatureBytes},
    };

    const PREVIOUS: &str = "50cf83f8ee3e316a7f3a4df32082747e8392e59fa724bbd13a9f2efc34cec6e4";
    const PARENT_1: &str = "04ba147c9cc9bebd3b97310a23d385f33d8e67ac42868b69bc06f5468e3c0a02";
    const PARENT_2: &str = "c0ab1d1f6886ba6317634da6b2d957e7c987a9699dd3707d1e2751fcf4b8efe3";
    const INCLUSION: &str = "665de8d34bca02af275a6ccaf2d5f7b1d018f695473f19855d7ad1a54f106ed1";
    const APPLIED: &str = "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8";
    const KEY_1: &str = "d85e5b1590d898d1e0cdebb2e3b5337c8b76270142663d78811683ba47c17c98";
    const SIG_1: &str = "15188080d5ef2f8a8fd08498243a30b2a8eb08e0910573101632bb244c9e27db26121c8af619d90de6cb5e5c407e4edd709e0e06702170e311a1668e0a12480d";
    const KEY_2: &str = "d9922819a39e94ddf3907f4b9c8df93f39f026244fcb609205b9a879022599f2";
    const SIG_2: &str = "48afb8e21fbba0ba473b6798ecad3a33e10d1575fd5e3822e2922db4cc24b0808fd6792ee6eaaade15cdc14e43da16883962d15358dc064ba5bb2726cf07790a";
    const PARAMS: &str = "27d0ca22753f76ef32d1e9e8fcc417aa9fc1c15eae854661e0253287be6ea68f649493fc8fd6ac43e9ca750c6f6d884cc72386ddcb7d";

    fn header() -> String {
        format!(
            "070000003f0400007341ad5f{}02{}{}{}{}08001111111122222222",
            PREVIOUS, PARENT_1, PARENT_2, INCLUSION, APPLIED
        )
    }

    fn signatures_hex() -> String {
        format!("0200{}{}00{}{}", KEY_1, SIG_1, KEY_2, SIG_2)
    }

    fn receipt_hex(deposit: &str, treasury: &str) -> String {
        format!(
            "0040e20100010100{}00{}{}2e0000000400000001{}02{}",
            "aa".repeat(49),
            "bb".repeat(32),
            deposit,
            "aa".repeat(32),
            treasury
        )
    }

    fn signature(key: &str, sig: &str) -> Signature {
        Signature::Ed25519(Ed25519Signature {
            public_key: key.parse::<Ed25519PublicKey>().unwrap(),
            signature: sig.parse::<Ed25519SignatureBytes>().unwrap(),
        })
    }

    pub(crate) fn receipt(deposit: u64, treasury: u64) -> ReceiptMilestoneOption {
        ReceiptMilestoneOption {
            migrated_at: 123456,
            last: true,
            funds: vec![MigratedFunds {
                tail_transaction_hash: TailTransactionHash([0xaa; 49]),
                address: Ed25519Address::new([0xbb; 32]).into(),
                deposit,
            }],
            transaction: TreasuryTransactionPayload {
                input: TreasuryInput {
                    milestone_id: MilestoneId([0xaa; 32]),
                },
                output: TreasuryOutput { amount: treasury },
            },
        }
    }

    pub(crate) fn milestone(options: Vec<MilestoneOption>) -> MilestonePayload {
        MilestonePayload {
            index: 1087,
            timestamp: 1605190003,
            previous_milestone_id: PREVIOUS.parse().unwrap(),
            parents: vec![PARENT_1.parse().unwrap(), PARENT_2.parse().unwrap()],
            inclusion_merkle_root: INCLUSION.parse().unwrap(),
            applied_merkle_root: APPLIED.parse().unwrap(),
            metadata: hex::decode("1111111122222222").unwrap(),
            options,
            signatures: vec![signature(KEY_1, SIG_1), signature(KEY_2, SIG_2)],
        }
    }

    #[test]
    fn it_serializes_and_deserializes_milestones() {
        let cases = [
            (milestone(vec![]), format!("{}00{}", header(), signatures_hex())),
            (
                milestone(vec![receipt(64, 2694).into()]),
                format!(
                    "{}01{}{}",
                    header(),
                    receipt_hex("4000000000000000", "860a000000000000"),
                    signatures_hex()
                ),
            ),
        ];
        for (expected, hex) in cases.iter() {
            assert_eq!(&expected.serialize_hex().unwrap()[2..], hex);
            assert_eq!(expected.serialized_length() * 2, hex.len());
            assert_eq!(&MilestonePayload::deserialize_hex(hex).unwrap(), expected);
        }
    }

    #[test]
    fn it_serializes_and_deserializes_milestone_options() {
        let options: Vec<MilestoneOption> = vec![
            receipt(100, 9876).into(),
            ProtocolParamsMilestoneOption {
                target_milestone_index: 13455,
                protocol_version: 3,
                params: hex::decode(PARAMS).unwrap(),
            }
            .into(),
        ];
        let hex = format!(
            "02{}018f340000033600{}",
            receipt_hex("6400000000000000", "9426000000000000"),
            PARAMS
        );

        let mut w = WriteStream::new();
        write_list(&mut w, "options", Prefix::U8, &options).unwrap();
        assert_eq!(w.final_hex(), format!("0x{}", hex));

        let bytes = hex::decode(&hex).unwrap();
        let mut r = ReadStream::new(&bytes);
        let decoded: Vec<MilestoneOption> = read_list(&mut r, "options", Prefix::U8).unwrap();
        r.ensure_consumed().unwrap();
        assert_eq!(decoded, options);
        assert_eq!(decoded[0].kind(), RECEIPT_MILESTONE_OPTION_TYPE);
        assert_eq!(decoded[1].kind(), PROTOCOL_PARAMS_MILESTONE_OPTION_TYPE);
        assert_eq!(list_length(Prefix::U8, &decoded) * 2, hex.len());
    }

    #[test]
    fn it_serializes_treasury_transactions() {
        let payload = receipt(0, 2694).transaction;
        let hex = format!("0400000001{}02860a000000000000", "aa".repeat(32));
        assert_eq!(&payload.serialize_hex().unwrap()[2..], hex);
        assert_eq!(payload.serialized_length(), TREASURY_TRANSACTION_PAYLOAD_LENGTH);
        assert_eq!(TreasuryTransactionPayload::deserialize_hex(&hex).unwrap(), payload);
    }

    #[test]
    fn it_derives_the_milestone_id_from_the_essence() {
        let unsigned = milestone(vec![]);
        let bytes = unsigned.serialize().unwrap();
        let essence_end = bytes.len() - (1 + 2 * 97);
        let expected: MilestoneId = blake2b256(&bytes[4..essence_end]).into();
        assert_eq!(unsigned.id().unwrap(), expected);

        let mut resigned = unsigned.clone();
        resigned.signatures.truncate(1);
        assert_eq!(resigned.id().unwrap(), expected);
        resigned.index += 1;
        assert_ne!(resigned.id().unwrap(), expected);
    }

    #[test]
    fn it_rejects_unknown_milestone_options() {
        match MilestoneOption::deserialize_hex("02000000000000000000") {
            Err(SerError::UnrecognizedType {
                kind: "milestoneOption",
                found: 2,
            }) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_truncated_milestones() {
        let bytes = milestone(vec![receipt(64, 2694).into()]).serialize().unwrap();
        for cut in 1..=bytes.len() {
            match MilestonePayload::deserialize(&bytes[..bytes.len() - cut]) {
                Err(SerError::TruncatedInput { .. }) => {}
                other => panic!("expected TruncatedInput at cut {}, got {:?}", cut, other),
            }
        }
    }

    #[test]
    fn it_finds_the_receipt() {
        assert!(milestone(vec![]).receipt().is_none());
        let with_receipt = milestone(vec![receipt(64, 2694).into()]);
        assert_eq!(with_receipt.receipt(), Some(&receipt(64, 2694)));
    }
}
