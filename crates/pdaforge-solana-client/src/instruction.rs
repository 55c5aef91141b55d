//! Lowering of `CreationInstruction` into a Solana instruction.

use pdaforge_core::CreationInstruction;
use solana_program::instruction::{AccountMeta, Instruction};

use crate::pda::to_pubkey;

pub fn to_solana_instruction(ix: &CreationInstruction) -> Instruction {
    let accounts = ix
        .accounts()
        .into_iter()
        .map(|role| AccountMeta {
            pubkey: to_pubkey(&role.pubkey),
            is_signer: role.is_signer,
            is_writable: role.is_writable,
        })
        .collect();

    Instruction { program_id: to_pubkey(&ix.program_id), accounts, data: ix.data() }
}

#[cfg(test)]
mod tests {
    use pdaforge_core::config::CreateMode;
    use pdaforge_core::ids::{
        ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID,
    };
    use pdaforge_core::PublicKey;

    use super::*;

    fn ix(mode: CreateMode) -> CreationInstruction {
        CreationInstruction {
            program_id: ASSOCIATED_TOKEN_PROGRAM_ID,
            payer: PublicKey::new_from_array([1; 32]),
            target: PublicKey::new_from_array([2; 32]),
            owner: PublicKey::new_from_array([3; 32]),
            asset_id: PublicKey::new_from_array([4; 32]),
            system_program_id: SYSTEM_PROGRAM_ID,
            holding_program_id: TOKEN_PROGRAM_ID,
            mode,
        }
    }

    #[test]
    fn lowered_instruction_matches_associated_token_layout() {
        let lowered = to_solana_instruction(&ix(CreateMode::Strict));
        assert_eq!(
            lowered.program_id.to_string(),
            "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL"
        );
        assert_eq!(lowered.data, vec![0]);
        assert_eq!(lowered.accounts.len(), 6);
        assert_eq!(lowered.accounts[0], AccountMeta::new(to_pubkey(&PublicKey::new_from_array([1; 32])), true));
        assert_eq!(lowered.accounts[1], AccountMeta::new(to_pubkey(&PublicKey::new_from_array([2; 32])), false));
        assert_eq!(
            lowered.accounts[4],
            AccountMeta::new_readonly(solana_program::system_program::id(), false)
        );
        assert_eq!(
            lowered.accounts[5].pubkey.to_string(),
            "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA"
        );
    }

    #[test]
    fn idempotent_variant_uses_tag_one() {
        assert_eq!(to_solana_instruction(&ix(CreateMode::Idempotent)).data, vec![1]);
    }
}
