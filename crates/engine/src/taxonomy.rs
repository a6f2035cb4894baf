//! Fixed category taxonomy.
//!
//! Every consumer (validation, query filters, the client-facing enumeration)
//! reads the table below; there is no other copy.

use crate::TransactionKind;

const INCOME_CATEGORIES: &[&str] = &["Salary", "Freelance", "Investments", "Gifts", "Other Income"];

const EXPENSE_CATEGORIES: &[&str] = &[
    "Food",
    "Transportation",
    "Housing",
    "Utilities",
    "Healthcare",
    "Entertainment",
    "Shopping",
    "Education",
    "Other Expenses",
];

/// Categories a transaction of `kind` may use, in display order.
#[must_use]
pub fn allowed_categories(kind: TransactionKind) -> &'static [&'static str] {
    match kind {
        TransactionKind::Income => INCOME_CATEGORIES,
        TransactionKind::Expense => EXPENSE_CATEGORIES,
    }
}

/// Case-sensitive membership test against [`allowed_categories`].
#[must_use]
pub fn is_allowed(kind: TransactionKind, category: &str) -> bool {
    allowed_categories(kind).contains(&category)
}

/// `true` if `category` belongs to any transaction kind.
#[must_use]
pub fn is_known(category: &str) -> bool {
    TransactionKind::ALL
        .iter()
        .any(|kind| is_allowed(*kind, category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_and_expense_sets_are_disjoint() {
        for category in allowed_categories(TransactionKind::Income) {
            assert!(!is_allowed(TransactionKind::Expense, category));
        }
    }

    #[test]
    fn membership_is_case_sensitive() {
        assert!(is_allowed(TransactionKind::Income, "Salary"));
        assert!(!is_allowed(TransactionKind::Income, "salary"));
        assert!(is_allowed(TransactionKind::Expense, "Other Expenses"));
    }

    #[test]
    fn cross_type_categories_are_rejected() {
        assert!(!is_allowed(TransactionKind::Income, "Food"));
        assert!(!is_allowed(TransactionKind::Expense, "Salary"));
    }

    #[test]
    fn known_covers_both_kinds() {
        assert!(is_known("Gifts"));
        assert!(is_known("Healthcare"));
        assert!(!is_known("Crypto"));
        assert_eq!(
            allowed_categories(TransactionKind::Income).len()
                + allowed_categories(TransactionKind::Expense).len(),
            14
        );
    }
}
