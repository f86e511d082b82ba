//! Account ledger: apply transactions to one account and keep a history.
//!
//! # Responsibility
//! - Debit an account through a payment channel.
//! - Record every applied transaction in a typed repository.
//! - Summarize count, total amount and final balance.
//!
//! # Invariants
//! - A savings account never debits more than its balance; a refused
//!   transaction leaves the balance and the history untouched.
//! - Only applied transactions enter the history.

use crate::model::entity::{Entity, EntityId};
use crate::model::finance::{Cents, PaymentChannel, Transaction};
use crate::repo::typed_repo::{EntityRepository, InMemoryRepository, RepoError};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type FinanceResult<T> = Result<T, FinanceError>;

#[derive(Debug)]
pub enum FinanceError {
    /// Savings account balance is lower than the requested debit.
    InsufficientFunds {
        account: String,
        requested: Cents,
        balance: Cents,
    },
    /// Amount is zero or negative.
    InvalidAmount { id: EntityId, amount: Cents },
    /// Transaction id already recorded.
    Repo(RepoError),
}

impl Display for FinanceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientFunds {
                account,
                requested,
                balance,
            } => write!(
                f,
                "insufficient funds in {account}: attempted to deduct {requested}, but balance is only {balance}"
            ),
            Self::InvalidAmount { id, amount } => {
                write!(f, "transaction {id} has non-positive amount {amount}")
            }
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FinanceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FinanceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Debits always apply; the balance may go negative.
    Standard,
    /// Debits larger than the balance are refused.
    Savings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    number: String,
    balance: Cents,
    kind: AccountKind,
}

impl Account {
    pub fn standard(number: impl Into<String>, opening_balance: Cents) -> Self {
        Self {
            number: number.into(),
            balance: opening_balance,
            kind: AccountKind::Standard,
        }
    }

    pub fn savings(number: impl Into<String>, opening_balance: Cents) -> Self {
        Self {
            number: number.into(),
            balance: opening_balance,
            kind: AccountKind::Savings,
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn balance(&self) -> Cents {
        self.balance
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    /// Debits `transaction.amount`; returns the new balance.
    pub fn apply(&mut self, transaction: &Transaction) -> FinanceResult<Cents> {
        if self.kind == AccountKind::Savings && transaction.amount > self.balance {
            warn!(
                "event=account_apply module=service status=rejected id={} error_code=insufficient_funds",
                transaction.id
            );
            return Err(FinanceError::InsufficientFunds {
                account: self.number.clone(),
                requested: transaction.amount,
                balance: self.balance,
            });
        }
        self.balance = self.balance - transaction.amount;
        Ok(self.balance)
    }
}

/// Outcome of one applied transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub channel: PaymentChannel,
    pub transaction: Transaction,
    pub balance_after: Cents,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinanceSummary {
    pub count: usize,
    pub total: Cents,
    pub balance: Cents,
}

pub struct FinanceService {
    account: Account,
    history: InMemoryRepository<Transaction>,
}

impl FinanceService {
    pub fn new(account: Account) -> Self {
        Self {
            account,
            history: InMemoryRepository::new(),
        }
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Processes `transaction` through `channel` and debits the account.
    ///
    /// # Errors
    /// - `InvalidAmount` for non-positive amounts.
    /// - `Repo(DuplicateKey)` when the id is already in the history.
    /// - `InsufficientFunds` from a savings account.
    ///
    /// On any error neither the balance nor the history changes.
    pub fn process(
        &mut self,
        channel: PaymentChannel,
        transaction: Transaction,
    ) -> FinanceResult<Receipt> {
        if transaction.amount <= Cents(0) {
            return Err(FinanceError::InvalidAmount {
                id: transaction.id,
                amount: transaction.amount,
            });
        }
        if self.history.contains(transaction.id) {
            return Err(RepoError::DuplicateKey {
                kind: Transaction::KIND,
                id: transaction.id,
            }
            .into());
        }

        let balance_after = self.account.apply(&transaction)?;
        self.history.add(transaction.clone())?;
        debug!(
            "event=finance_process module=service status=ok id={} channel={}",
            transaction.id,
            channel.label()
        );
        Ok(Receipt {
            channel,
            transaction,
            balance_after,
        })
    }

    /// Applied transactions in processing order.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.history.get_all()
    }

    pub fn summary(&self) -> FinanceSummary {
        FinanceSummary {
            count: self.history.len(),
            total: self.history.iter().map(|t| t.amount).sum(),
            balance: self.account.balance,
        }
    }
}
