//! Money amounts, transactions and the channels that carry them.

use crate::model::entity::{Entity, EntityId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Signed amount in minor units (cents).
///
/// Integer cents keep balances exact; `Display` renders `$1234.50`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cents(pub i64);

impl Cents {
    pub fn new(units: i64, cents: i64) -> Self {
        Self(units * 100 + cents)
    }
}

impl Display for Cents {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

impl Add for Cents {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Cents {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Immutable record of one outgoing payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Transaction {
    pub id: EntityId,
    pub date: NaiveDate,
    pub amount: Cents,
    pub category: String,
}

impl Transaction {
    pub fn new(id: EntityId, date: NaiveDate, amount: Cents, category: impl Into<String>) -> Self {
        Self {
            id,
            date,
            amount,
            category: category.into(),
        }
    }
}

impl Entity for Transaction {
    const KIND: &'static str = "transaction";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ID {}: {} ({}) - {}",
            self.id,
            self.amount,
            self.category,
            self.date.format("%Y-%m-%d")
        )
    }
}

/// Payment rail a transaction is processed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentChannel {
    BankTransfer,
    MobileMoney,
    CryptoWallet,
}

impl PaymentChannel {
    pub fn label(self) -> &'static str {
        match self {
            Self::BankTransfer => "BANK TRANSFER",
            Self::MobileMoney => "MOBILE MONEY",
            Self::CryptoWallet => "CRYPTO WALLET",
        }
    }

    /// Confirmation line printed once the channel has moved the money.
    pub fn confirmation(self, transaction: &Transaction) -> String {
        let what = match self {
            Self::BankTransfer => "Bank transfer",
            Self::MobileMoney => "Mobile money transfer",
            Self::CryptoWallet => "Cryptocurrency transaction",
        };
        format!("{what} completed on {}", transaction.date.format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::Cents;

    #[test]
    fn cents_display_pads_minor_units() {
        assert_eq!(Cents::new(150, 50).to_string(), "$150.50");
        assert_eq!(Cents(5).to_string(), "$0.05");
        assert_eq!(Cents(-1025).to_string(), "-$10.25");
    }

    #[test]
    fn cents_sum_and_difference() {
        let total: Cents = [Cents(100), Cents(250)].into_iter().sum();
        assert_eq!(total, Cents(350));
        assert_eq!(Cents(100) - Cents(250), Cents(-150));
    }
}
