//! Transfer service
//!
//! Moves funds between two account wallets as a balanced pair of entries:
//! a `TransferOut` on the sender and a `TransferIn` on the recipient.
//!
//! The recipient must already have a saved wallet unless the service was
//! built with `create_missing_recipient(true)`.
//!
//! The sender wallet is owned by the caller and is only mutated in memory;
//! the caller persists it. The recipient wallet is loaded and saved here.
//! There is no transaction across the two saves: if persisting the recipient
//! fails after the sender was debited, `LedgerError::TransferNotDelivered`
//! is returned and the caller decides whether to keep or discard the debit.

use tracing::{error, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Money, Transaction, Wallet};
use crate::storage::WalletRepository;

use super::LedgerService;

/// Both entries written by a successful transfer
#[derive(Debug, Clone)]
pub struct TransferReceipt {
    /// Entry appended to the sender wallet
    pub outgoing: Transaction,
    /// Entry appended to (and persisted with) the recipient wallet
    pub incoming: Transaction,
}

/// Service for transfers between accounts
pub struct TransferService<'a> {
    repository: &'a dyn WalletRepository,
    ledger: LedgerService,
    create_missing_recipient: bool,
}

impl<'a> TransferService<'a> {
    /// Create a new transfer service
    pub fn new(repository: &'a dyn WalletRepository) -> Self {
        Self {
            repository,
            ledger: LedgerService::new(),
            create_missing_recipient: false,
        }
    }

    /// Allow transfers to accounts that have no wallet yet
    pub fn create_missing_recipient(mut self, create: bool) -> Self {
        self.create_missing_recipient = create;
        self
    }

    /// Transfer `amount` from `sender` to `recipient`
    ///
    /// Validation happens before anything is loaded or mutated. An unknown
    /// recipient, or a failure to load it, aborts with both wallets untouched.
    pub fn transfer(
        &self,
        sender: &str,
        sender_wallet: &mut Wallet,
        recipient: &str,
        amount: Money,
        category: &str,
    ) -> LedgerResult<TransferReceipt> {
        let sender = sender.trim();
        let recipient = recipient.trim();

        if !amount.is_positive() {
            return Err(LedgerError::Validation(format!(
                "Transfer amount must be positive, got {}",
                amount
            )));
        }
        if sender.is_empty() || recipient.is_empty() {
            return Err(LedgerError::Validation(
                "Sender and recipient logins are required".into(),
            ));
        }
        if sender.to_lowercase() == recipient.to_lowercase() {
            return Err(LedgerError::SelfTransfer(sender.to_string()));
        }

        if !self.create_missing_recipient && !self.repository.exists(recipient)? {
            return Err(LedgerError::UnknownRecipient(recipient.to_string()));
        }

        let mut recipient_wallet = self.repository.load(recipient)?;

        let outgoing = self
            .ledger
            .register_transfer_out(sender_wallet, category, amount, recipient)?;
        let incoming = self
            .ledger
            .register_transfer_in(&mut recipient_wallet, category, amount, sender)?;

        if let Err(e) = self.repository.save(recipient, &recipient_wallet) {
            error!(
                sender,
                recipient,
                amount = %amount,
                error = %e,
                "transfer debited sender but recipient wallet was not saved"
            );
            return Err(LedgerError::TransferNotDelivered {
                recipient: recipient.to_string(),
                reason: e.to_string(),
            });
        }

        info!(sender, recipient, amount = %amount, category = %outgoing.category, "transfer completed");

        Ok(TransferReceipt { outgoing, incoming })
    }
}
