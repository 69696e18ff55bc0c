//! Transaction construction helpers: storage deposits and input commitments.

use stardust_core::{
    hashes::{blake2b256, Blake2b256Writer, MarkedDigestWriter},
    ser::{ByteFormat, SerResult},
};

use crate::{
    params::RentStructure,
    types::{
        address::Address,
        ids::{BlockId, InputsCommitment, OUTPUT_ID_LENGTH},
        output::{BasicOutput, Output},
        unlock_condition::UnlockCondition,
    },
};

/// Bytes an output's metadata occupies in a node's ledger besides the output itself: the block id
/// that booked it, the confirming milestone index and the milestone timestamp.
pub const OUTPUT_METADATA_LENGTH: usize = BlockId::LENGTH + 4 + 4;

/// The amount an output must hold to pay for the storage it occupies.
pub fn min_storage_deposit(output: &Output, rent: &RentStructure) -> u64 {
    storage_deposit_for_length(output.serialized_length(), rent)
}

/// The storage deposit of an output whose serialization is `length` bytes long. The output id is
/// weighted as key bytes, the output and its ledger metadata as data bytes.
pub fn storage_deposit_for_length(length: usize, rent: &RentStructure) -> u64 {
    let data = rent.v_byte_factor_data as u64;
    let key = rent.v_byte_factor_key as u64;
    let v_bytes = data * length as u64 + key * OUTPUT_ID_LENGTH as u64 + data * OUTPUT_METADATA_LENGTH as u64;
    rent.v_byte_cost as u64 * v_bytes
}

/// The storage deposit of the smallest output an address can own: a basic output with a single
/// address unlock condition.
pub fn min_address_storage_deposit(address: &Address, rent: &RentStructure) -> u64 {
    let output: Output = BasicOutput::new(0).with_unlock_condition(UnlockCondition::address(*address)).into();
    min_storage_deposit(&output, rent)
}

/// Commit to the outputs a transaction consumes, in input order. The commitment is the blake2b-256
/// digest of the concatenated blake2b-256 digests of each serialized output.
pub fn inputs_commitment(consumed: &[Output]) -> SerResult<InputsCommitment> {
    let mut w = Blake2b256Writer::default();
    for output in consumed {
        w.update(blake2b256(&output.serialize()?).as_bytes());
    }
    Ok(w.finish_marked())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::address::Ed25519Address;

    const RENT: RentStructure = RentStructure::new(100, 1, 10);

    #[test]
    fn it_prices_storage_by_virtual_bytes() {
        // 46 data bytes, 34 key bytes weighted 10, 40 metadata bytes
        let address: Address = Ed25519Address::new([0x52; 32]).into();
        assert_eq!(min_address_storage_deposit(&address, &RENT), 100 * (46 + 340 + 40));

        let output: Output = BasicOutput::new(0)
            .with_unlock_condition(UnlockCondition::address(address))
            .with_feature(crate::types::feature::Feature::tag(b"tag".to_vec()))
            .into();
        assert_eq!(min_storage_deposit(&output, &RENT), 100 * (51 + 340 + 40));
    }

    #[test]
    fn it_scales_with_the_rent_structure() {
        let address: Address = Ed25519Address::new([0x52; 32]).into();
        let free = RentStructure::new(0, 1, 10);
        assert_eq!(min_address_storage_deposit(&address, &free), 0);
        let heavy_keys = RentStructure::new(1, 1, 100);
        assert_eq!(min_address_storage_deposit(&address, &heavy_keys), 46 + 3400 + 40);
    }

    #[test]
    fn it_commits_to_consumed_outputs_in_order() {
        let a: Output = BasicOutput::new(1).into();
        let b: Output = BasicOutput::new(2).into();

        let mut concatenated = Vec::new();
        concatenated.extend_from_slice(blake2b256(&a.serialize().unwrap()).as_bytes());
        concatenated.extend_from_slice(blake2b256(&b.serialize().unwrap()).as_bytes());
        let expected = InputsCommitment::from(blake2b256(&concatenated));

        let ab = inputs_commitment(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(ab, expected);
        assert_ne!(ab, inputs_commitment(&[b, a]).unwrap());
        assert_eq!(inputs_commitment(&[]).unwrap(), InputsCommitment::from(blake2b256(b"")));
    }
}
