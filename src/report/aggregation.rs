//! Totals and the per-category expense breakdown of a set of transactions.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::transaction::{Transaction, TransactionKind};

/// Money in, money out and what is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(super) struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    /// Always `income - expense`.
    pub balance: Decimal,
}

/// Sums income and expense amounts.
///
/// An empty slice gives zero for every total. Amounts are bounded by
/// [max_amount](crate::transaction::max_amount) when recorded and when loaded,
/// so the sums cannot overflow.
pub(super) fn totals(transactions: &[Transaction]) -> Totals {
    let (income, expense) = transactions.iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expense), transaction| match transaction.kind {
            TransactionKind::Income => (income + transaction.amount, expense),
            TransactionKind::Expense => (income, expense + transaction.amount),
        },
    );

    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Sums expense amounts per category.
///
/// Categories with no expenses are absent. Income is ignored.
pub(super) fn expense_by_category(transactions: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut breakdown = BTreeMap::new();

    for transaction in transactions
        .iter()
        .filter(|transaction| transaction.kind == TransactionKind::Expense)
    {
        *breakdown
            .entry(transaction.category.clone())
            .or_insert(Decimal::ZERO) += transaction.amount;
    }

    breakdown
}
