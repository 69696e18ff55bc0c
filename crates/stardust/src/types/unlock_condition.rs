//! Unlock conditions: the rules that must hold for an output to be consumed.

use stardust_core::ser::{
    list_length, read_list, write_list, ByteFormat, Prefix, ReadStream, SerError, SerResult, WriteStream,
};

use crate::types::{
    address::{Address, AliasAddress, ADDRESS_LENGTH, MIN_ADDRESS_LENGTH},
    min_of,
};

/// Discriminant of the address unlock condition.
pub const ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 0;
/// Discriminant of the storage deposit return unlock condition.
pub const STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE: u8 = 1;
/// Discriminant of the timelock unlock condition.
pub const TIMELOCK_UNLOCK_CONDITION_TYPE: u8 = 2;
/// Discriminant of the expiration unlock condition.
pub const EXPIRATION_UNLOCK_CONDITION_TYPE: u8 = 3;
/// Discriminant of the state controller address unlock condition.
pub const STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 4;
/// Discriminant of the governor address unlock condition.
pub const GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 5;
/// Discriminant of the immutable alias address unlock condition.
pub const IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE: u8 = 6;

/// Minimum serialized length of the address unlock condition.
pub const MIN_ADDRESS_UNLOCK_CONDITION_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH;
/// Minimum serialized length of the storage deposit return unlock condition.
pub const MIN_STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH + 8;
/// Serialized length of the timelock unlock condition.
pub const MIN_TIMELOCK_UNLOCK_CONDITION_LENGTH: usize = 1 + 4;
/// Minimum serialized length of the expiration unlock condition.
pub const MIN_EXPIRATION_UNLOCK_CONDITION_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH + 4;
/// Minimum serialized length of the state controller address unlock condition.
pub const MIN_STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH;
/// Minimum serialized length of the governor address unlock condition.
pub const MIN_GOVERNOR_ADDRESS_UNLOCK_CONDITION_LENGTH: usize = 1 + MIN_ADDRESS_LENGTH;
/// Serialized length of the immutable alias address unlock condition.
pub const MIN_IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_LENGTH: usize = 1 + ADDRESS_LENGTH;
/// Minimum serialized length of any unlock condition.
pub const MIN_UNLOCK_CONDITION_LENGTH: usize = min_of(&[
    MIN_ADDRESS_UNLOCK_CONDITION_LENGTH,
    MIN_STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_LENGTH,
    MIN_TIMELOCK_UNLOCK_CONDITION_LENGTH,
    MIN_EXPIRATION_UNLOCK_CONDITION_LENGTH,
    MIN_STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_LENGTH,
    MIN_GOVERNOR_ADDRESS_UNLOCK_CONDITION_LENGTH,
    MIN_IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_LENGTH,
]);

/// Owned by an address.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct AddressUnlockCondition {
    /// The owner
    pub address: Address,
}

/// The consumer must return `amount` to `return_address`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StorageDepositReturnUnlockCondition {
    /// Receives the refund
    pub return_address: Address,
    /// The refund
    pub amount: u64,
}

/// Can't be consumed before `unix_time`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct TimelockUnlockCondition {
    /// Seconds since the epoch
    pub unix_time: u32,
}

/// From `unix_time` on, only `return_address` may consume the output.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ExpirationUnlockCondition {
    /// Owner after expiry
    pub return_address: Address,
    /// Seconds since the epoch
    pub unix_time: u32,
}

/// May transition an alias's state.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct StateControllerAddressUnlockCondition {
    /// The state controller
    pub address: Address,
}

/// May transition an alias's governance.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct GovernorAddressUnlockCondition {
    /// The governor
    pub address: Address,
}

/// Binds a foundry to its alias for its whole life.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ImmutableAliasAddressUnlockCondition {
    /// The controlling alias
    pub address: AliasAddress,
}

macro_rules! impl_address_condition {
    ($name:ident, $kind:expr, $min:expr, $field:literal) => {
        impl ByteFormat for $name {
            type Error = SerError;

            fn serialized_length(&self) -> usize {
                1 + self.address.serialized_length()
            }

            fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
                stream.ensure_remaining($min, $field)?;
                stream.read_type_u8($field, $kind)?;
                Ok(Self {
                    address: ByteFormat::read_from(stream)?,
                })
            }

            fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
                let mut len = stream.write_u8($field, $kind)?;
                len += self.address.write_to(stream)?;
                Ok(len)
            }
        }
    };
}

impl_address_condition!(
    AddressUnlockCondition,
    ADDRESS_UNLOCK_CONDITION_TYPE,
    MIN_ADDRESS_UNLOCK_CONDITION_LENGTH,
    "addressUnlockCondition"
);
impl_address_condition!(
    StateControllerAddressUnlockCondition,
    STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE,
    MIN_STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_LENGTH,
    "stateControllerAddressUnlockCondition"
);
impl_address_condition!(
    GovernorAddressUnlockCondition,
    GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE,
    MIN_GOVERNOR_ADDRESS_UNLOCK_CONDITION_LENGTH,
    "governorAddressUnlockCondition"
);
impl_address_condition!(
    ImmutableAliasAddressUnlockCondition,
    IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE,
    MIN_IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_LENGTH,
    "immutableAliasAddressUnlockCondition"
);

impl ByteFormat for StorageDepositReturnUnlockCondition {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + self.return_address.serialized_length() + 8
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(
            MIN_STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_LENGTH,
            "storageDepositReturnUnlockCondition",
        )?;
        stream.read_type_u8(
            "storageDepositReturnUnlockCondition",
            STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
        )?;
        let return_address = Address::read_from(stream)?;
        let amount = stream.read_u64("storageDepositReturnUnlockCondition.amount")?;
        Ok(Self { return_address, amount })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8(
            "storageDepositReturnUnlockCondition",
            STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
        )?;
        len += self.return_address.write_to(stream)?;
        len += stream.write_u64("storageDepositReturnUnlockCondition.amount", self.amount)?;
        Ok(len)
    }
}

impl ByteFormat for TimelockUnlockCondition {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        MIN_TIMELOCK_UNLOCK_CONDITION_LENGTH
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_TIMELOCK_UNLOCK_CONDITION_LENGTH, "timelockUnlockCondition")?;
        stream.read_type_u8("timelockUnlockCondition", TIMELOCK_UNLOCK_CONDITION_TYPE)?;
        Ok(Self {
            unix_time: stream.read_u32("timelockUnlockCondition.unixTime")?,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("timelockUnlockCondition", TIMELOCK_UNLOCK_CONDITION_TYPE)?;
        len += stream.write_u32("timelockUnlockCondition.unixTime", self.unix_time)?;
        Ok(len)
    }
}

impl ByteFormat for ExpirationUnlockCondition {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        1 + self.return_address.serialized_length() + 4
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_EXPIRATION_UNLOCK_CONDITION_LENGTH, "expirationUnlockCondition")?;
        stream.read_type_u8("expirationUnlockCondition", EXPIRATION_UNLOCK_CONDITION_TYPE)?;
        let return_address = Address::read_from(stream)?;
        let unix_time = stream.read_u32("expirationUnlockCondition.unixTime")?;
        Ok(Self {
            return_address,
            unix_time,
        })
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        let mut len = stream.write_u8("expirationUnlockCondition", EXPIRATION_UNLOCK_CONDITION_TYPE)?;
        len += self.return_address.write_to(stream)?;
        len += stream.write_u32("expirationUnlockCondition.unixTime", self.unix_time)?;
        Ok(len)
    }
}

/// An unlock condition of any kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum UnlockCondition {
    /// Address
    Address(AddressUnlockCondition),
    /// Storage deposit return
    StorageDepositReturn(StorageDepositReturnUnlockCondition),
    /// Timelock
    Timelock(TimelockUnlockCondition),
    /// Expiration
    Expiration(ExpirationUnlockCondition),
    /// State controller address
    StateControllerAddress(StateControllerAddressUnlockCondition),
    /// Governor address
    GovernorAddress(GovernorAddressUnlockCondition),
    /// Immutable alias address
    ImmutableAliasAddress(ImmutableAliasAddressUnlockCondition),
}

impl UnlockCondition {
    /// The discriminant of the unlock condition kind.
    pub fn kind(&self) -> u8 {
        match self {
            UnlockCondition::Address(_) => ADDRESS_UNLOCK_CONDITION_TYPE,
            UnlockCondition::StorageDepositReturn(_) => STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
            UnlockCondition::Timelock(_) => TIMELOCK_UNLOCK_CONDITION_TYPE,
            UnlockCondition::Expiration(_) => EXPIRATION_UNLOCK_CONDITION_TYPE,
            UnlockCondition::StateControllerAddress(_) => STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE,
            UnlockCondition::GovernorAddress(_) => GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE,
            UnlockCondition::ImmutableAliasAddress(_) => IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE,
        }
    }

    /// Human readable name of an unlock condition kind.
    pub fn kind_name(kind: u8) -> &'static str {
        match kind {
            ADDRESS_UNLOCK_CONDITION_TYPE => "Address Unlock Condition",
            STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE => "Storage Deposit Return Unlock Condition",
            TIMELOCK_UNLOCK_CONDITION_TYPE => "Timelock Unlock Condition",
            EXPIRATION_UNLOCK_CONDITION_TYPE => "Expiration Unlock Condition",
            STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE => "State Controller Address Unlock Condition",
            GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE => "Governor Address Unlock Condition",
            IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE => "Immutable Alias Address Unlock Condition",
            _ => "Unknown Unlock Condition",
        }
    }

    /// Build an address unlock condition.
    pub fn address(address: impl Into<Address>) -> Self {
        UnlockCondition::Address(AddressUnlockCondition {
            address: address.into(),
        })
    }

    /// Build a storage deposit return unlock condition.
    pub fn storage_deposit_return(return_address: impl Into<Address>, amount: u64) -> Self {
        UnlockCondition::StorageDepositReturn(StorageDepositReturnUnlockCondition {
            return_address: return_address.into(),
            amount,
        })
    }

    /// Build a timelock unlock condition.
    pub fn timelock(unix_time: u32) -> Self {
        UnlockCondition::Timelock(TimelockUnlockCondition { unix_time })
    }

    /// Build an expiration unlock condition.
    pub fn expiration(return_address: impl Into<Address>, unix_time: u32) -> Self {
        UnlockCondition::Expiration(ExpirationUnlockCondition {
            return_address: return_address.into(),
            unix_time,
        })
    }

    /// Build a state controller address unlock condition.
    pub fn state_controller(address: impl Into<Address>) -> Self {
        UnlockCondition::StateControllerAddress(StateControllerAddressUnlockCondition {
            address: address.into(),
        })
    }

    /// Build a governor address unlock condition.
    pub fn governor(address: impl Into<Address>) -> Self {
        UnlockCondition::GovernorAddress(GovernorAddressUnlockCondition {
            address: address.into(),
        })
    }

    /// Build an immutable alias address unlock condition.
    pub fn immutable_alias(address: AliasAddress) -> Self {
        UnlockCondition::ImmutableAliasAddress(ImmutableAliasAddressUnlockCondition { address })
    }
}

impl ByteFormat for UnlockCondition {
    type Error = SerError;

    fn serialized_length(&self) -> usize {
        match self {
            UnlockCondition::Address(c) => c.serialized_length(),
            UnlockCondition::StorageDepositReturn(c) => c.serialized_length(),
            UnlockCondition::Timelock(c) => c.serialized_length(),
            UnlockCondition::Expiration(c) => c.serialized_length(),
            UnlockCondition::StateControllerAddress(c) => c.serialized_length(),
            UnlockCondition::GovernorAddress(c) => c.serialized_length(),
            UnlockCondition::ImmutableAliasAddress(c) => c.serialized_length(),
        }
    }

    fn read_from(stream: &mut ReadStream<'_>) -> SerResult<Self> {
        stream.ensure_remaining(MIN_UNLOCK_CONDITION_LENGTH, "unlockCondition")?;
        let condition = match stream.peek_u8("unlockCondition")? {
            ADDRESS_UNLOCK_CONDITION_TYPE => UnlockCondition::Address(ByteFormat::read_from(stream)?),
            STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE => {
                UnlockCondition::StorageDepositReturn(ByteFormat::read_from(stream)?)
            }
            TIMELOCK_UNLOCK_CONDITION_TYPE => UnlockCondition::Timelock(ByteFormat::read_from(stream)?),
            EXPIRATION_UNLOCK_CONDITION_TYPE => UnlockCondition::Expiration(ByteFormat::read_from(stream)?),
            STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE => {
                UnlockCondition::StateControllerAddress(ByteFormat::read_from(stream)?)
            }
            GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE => UnlockCondition::GovernorAddress(ByteFormat::read_from(stream)?),
            IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE => {
                UnlockCondition::ImmutableAliasAddress(ByteFormat::read_from(stream)?)
            }
            found => {
                return Err(SerError::UnrecognizedType {
                    kind: "unlock condition",
                    found: found as u32,
                })
            }
        };
        Ok(condition)
    }

    fn write_to(&self, stream: &mut WriteStream) -> SerResult<usize> {
        match self {
            UnlockCondition::Address(c) => c.write_to(stream),
            UnlockCondition::StorageDepositReturn(c) => c.write_to(stream),
            UnlockCondition::Timelock(c) => c.write_to(stream),
            UnlockCondition::Expiration(c) => c.write_to(stream),
            UnlockCondition::StateControllerAddress(c) => c.write_to(stream),
            UnlockCondition::GovernorAddress(c) => c.write_to(stream),
            UnlockCondition::ImmutableAliasAddress(c) => c.write_to(stream),
        }
    }
}

stardust_core::impl_hex_serde!(UnlockCondition);

/// Read a u8-count-prefixed list of unlock conditions.
pub fn read_unlock_conditions(stream: &mut ReadStream<'_>) -> SerResult<Vec<UnlockCondition>> {
    read_list(stream, "unlockConditions", Prefix::U8)
}

/// Write a u8-count-prefixed list of unlock conditions.
pub fn write_unlock_conditions(stream: &mut WriteStream, conditions: &[UnlockCondition]) -> SerResult<usize> {
    write_list(stream, "unlockConditions", Prefix::U8, conditions)
}

/// Serialized length of a list of unlock conditions.
pub fn unlock_conditions_length(conditions: &[UnlockCondition]) -> usize {
    list_length(Prefix::U8, conditions)
}

#[cfg(test)]
mod test {
    use super::*;

    const ED25519: &str = "0052fdfc072182654f163f5f0f9a621d729566c74d10037c4d7bbb0407d1e2c649";
    const ALIAS: &str = "0852fdfc072182654f163f5f0f9a621d729566c74d10037c4d7bbb0407d1e2c649";

    fn cases() -> Vec<(String, u8, usize)> {
        vec![
            (format!("00{}", ED25519), ADDRESS_UNLOCK_CONDITION_TYPE, 34),
            (
                format!("01{}40e2010000000000", ED25519),
                STORAGE_DEPOSIT_RETURN_UNLOCK_CONDITION_TYPE,
                42,
            ),
            ("0200e1f505".to_owned(), TIMELOCK_UNLOCK_CONDITION_TYPE, 5),
            (format!("03{}00e1f505", ED25519), EXPIRATION_UNLOCK_CONDITION_TYPE, 38),
            (format!("04{}", ED25519), STATE_CONTROLLER_ADDRESS_UNLOCK_CONDITION_TYPE, 34),
            (format!("05{}", ALIAS), GOVERNOR_ADDRESS_UNLOCK_CONDITION_TYPE, 34),
            (format!("06{}", ALIAS), IMMUTABLE_ALIAS_ADDRESS_UNLOCK_CONDITION_TYPE, 34),
        ]
    }

    #[test]
    fn it_serializes_and_deserializes_unlock_conditions() {
        for (expected, kind, len) in cases().iter() {
            let condition = UnlockCondition::deserialize_hex(expected).unwrap();
            assert_eq!(condition.kind(), *kind);
            assert_eq!(condition.serialized_length(), *len);
            assert_eq!(condition.serialize_hex().unwrap(), format!("0x{}", expected));
        }
    }

    #[test]
    fn it_reads_condition_fields() {
        match UnlockCondition::deserialize_hex(&format!("01{}40e2010000000000", ED25519)).unwrap() {
            UnlockCondition::StorageDepositReturn(c) => assert_eq!(c.amount, 123456),
            other => panic!("expected storage deposit return, got {:?}", other),
        }
        match UnlockCondition::deserialize_hex("0200e1f505").unwrap() {
            UnlockCondition::Timelock(c) => assert_eq!(c.unix_time, 100_000_000),
            other => panic!("expected timelock, got {:?}", other),
        }
    }

    #[test]
    fn it_requires_an_alias_address_for_immutable_alias_conditions() {
        match UnlockCondition::deserialize_hex(&format!("06{}", ED25519)) {
            Err(SerError::TypeMismatch {
                expected: 8,
                found: 0,
                ..
            }) => {}
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_unknown_unlock_conditions() {
        match UnlockCondition::deserialize_hex(&format!("07{}", ED25519)) {
            Err(SerError::UnrecognizedType {
                kind: "unlock condition",
                found: 7,
            }) => {}
            other => panic!("expected UnrecognizedType, got {:?}", other),
        }
    }

    #[test]
    fn it_rejects_truncated_unlock_conditions() {
        for (expected, _, _) in cases().iter() {
            let bytes = hex::decode(expected).unwrap();
            for cut in 1..=bytes.len() {
                match UnlockCondition::deserialize(&bytes[..bytes.len() - cut]) {
                    Err(SerError::TruncatedInput { .. }) => {}
                    other => panic!("expected TruncatedInput for {} at cut {}, got {:?}", expected, cut, other),
                }
            }
        }
    }

    #[test]
    fn it_counts_condition_lists() {
        let conditions = vec![UnlockCondition::timelock(1), UnlockCondition::timelock(2)];
        let mut w = WriteStream::new();
        write_unlock_conditions(&mut w, &conditions).unwrap();
        assert_eq!(w.final_hex(), "0x0202010000000202000000");
    }
}
