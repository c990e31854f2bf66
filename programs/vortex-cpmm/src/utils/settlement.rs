use anchor_lang::prelude::*;

use super::token::{transfer_from_pool_vault_to_user, transfer_from_user_to_pool_vault};
use crate::engine::{Settlement, TransferFlow};

/// Accounts moving one side of the pair
#[derive(Clone)]
pub struct TokenLeg<'info> {
    pub vault: AccountInfo<'info>,
    /// The caller's token account, or the fee recipient's on collection
    pub counterparty: AccountInfo<'info>,
    pub mint: AccountInfo<'info>,
    pub token_program: AccountInfo<'info>,
    pub decimals: u8,
}

/// Carry out the token transfers of a settlement. `legs` is indexed by
/// token side.
pub fn settle_transfers<'info>(
    settlement: &Settlement,
    legs: &[TokenLeg<'info>; 2],
    payer: &AccountInfo<'info>,
    vault_authority: &AccountInfo<'info>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    for transfer in &settlement.transfers {
        let leg = &legs[transfer.side.index()];
        match transfer.flow {
            TransferFlow::UserToVault => transfer_from_user_to_pool_vault(
                payer.clone(),
                leg.counterparty.clone(),
                leg.vault.clone(),
                leg.mint.clone(),
                leg.token_program.clone(),
                transfer.amount,
                leg.decimals,
            )?,
            TransferFlow::VaultToUser | TransferFlow::VaultToRecipient => {
                transfer_from_pool_vault_to_user(
                    vault_authority.clone(),
                    leg.vault.clone(),
                    leg.counterparty.clone(),
                    leg.mint.clone(),
                    leg.token_program.clone(),
                    transfer.amount,
                    leg.decimals,
                    signer_seeds,
                )?
            }
        }
    }
    Ok(())
}
