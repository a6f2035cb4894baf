//! Input rules for transactions, list filters and accounts.
//!
//! Each `parse` function looks at the whole candidate record and either
//! returns the typed value or every rule it broke, in field order. Inside a
//! single field the checks stop at the first failure, and the category rule
//! is only evaluated once the type is known to be valid.

use std::fmt;

use chrono::{DateTime, Utc};
use email_address::{EmailAddress, Options};

use crate::{
    Amount, AmountError, EngineError, LoginInput, RegistrationInput, ResultEngine,
    TransactionFilterInput, TransactionInput, TransactionKind, taxonomy, util::parse_iso8601,
};

pub const CATEGORY_MAX_CHARS: usize = 50;
pub const PASSWORD_MIN_CHARS: usize = 6;
pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 50;

/// A single broken rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    InvalidType,
    InvalidAmount,
    NonPositiveAmount,
    TooManyDecimals,
    MissingCategory,
    CategoryTooLong,
    CategoryNotAllowed(TransactionKind),
    InvalidDate,
    InvalidTypeFilter,
    CategoryFilterTooLong,
    UnknownCategoryFilter,
    CategoryFilterNotAllowed(TransactionKind),
    InvalidStartDate,
    InvalidEndDate,
    InvertedDateRange,
    InvalidEmail,
    MissingPassword,
    PasswordTooShort,
    InvalidFirstName,
    InvalidLastName,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidType => f.write_str("Transaction type must be either INCOME or EXPENSE"),
            Self::InvalidAmount => f.write_str("Amount must be a positive number"),
            Self::NonPositiveAmount => f.write_str("Amount must be greater than zero"),
            Self::TooManyDecimals => f.write_str("Amount cannot have more than 2 decimal places"),
            Self::MissingCategory => f.write_str("Category is required"),
            Self::CategoryTooLong => write!(f, "Category cannot exceed {CATEGORY_MAX_CHARS} characters"),
            Self::CategoryNotAllowed(kind) => write!(
                f,
                "Invalid category for {kind}. Valid categories are: {}",
                taxonomy::allowed_categories(*kind).join(", ")
            ),
            Self::InvalidDate => f.write_str("Date must be a valid ISO 8601 date string"),
            Self::InvalidTypeFilter => f.write_str("Invalid transaction type filter"),
            Self::CategoryFilterTooLong => write!(
                f,
                "Category filter cannot exceed {CATEGORY_MAX_CHARS} characters"
            ),
            Self::UnknownCategoryFilter => f.write_str("Unknown category filter"),
            Self::CategoryFilterNotAllowed(kind) => write!(
                f,
                "Invalid category filter for {kind}. Valid categories are: {}",
                taxonomy::allowed_categories(*kind).join(", ")
            ),
            Self::InvalidStartDate => f.write_str("Start date must be a valid ISO 8601 date string"),
            Self::InvalidEndDate => f.write_str("End date must be a valid ISO 8601 date string"),
            Self::InvertedDateRange => f.write_str("Start date must not be after end date"),
            Self::InvalidEmail => f.write_str("Invalid email"),
            Self::MissingPassword => f.write_str("Password is required"),
            Self::PasswordTooShort => write!(
                f,
                "Password must be at least {PASSWORD_MIN_CHARS} characters long"
            ),
            Self::InvalidFirstName => write!(
                f,
                "First name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            ),
            Self::InvalidLastName => write!(
                f,
                "Last name must be between {NAME_MIN_CHARS} and {NAME_MAX_CHARS} characters"
            ),
        }
    }
}

/// Ordered, non-empty list of broken rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn contains(&self, violation: &Violation) -> bool {
        self.0.contains(violation)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable messages, one per rule.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    fn into_result<T>(self, value: impl FnOnce() -> Option<T>) -> ResultEngine<T> {
        if !self.is_empty() {
            return Err(EngineError::Validation(self));
        }
        // Every field parsed when no violation was recorded.
        value().ok_or(EngineError::Validation(self))
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages().join(", "))
    }
}

impl From<Violation> for Violations {
    fn from(value: Violation) -> Self {
        Self(vec![value])
    }
}

/// A transaction that passed every creation rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewTransaction {
    pub(crate) kind: TransactionKind,
    pub(crate) category: String,
    pub(crate) amount: Amount,
    pub(crate) occurred_at: DateTime<Utc>,
}

impl NewTransaction {
    /// Applies the creation rules: type, then amount, then category (against
    /// the taxonomy of the submitted type), then date.
    pub fn parse(input: &TransactionInput) -> ResultEngine<Self> {
        let mut violations = Violations::default();

        let kind = match input.kind.as_deref().map(TransactionKind::try_from) {
            Some(Ok(kind)) => Some(kind),
            _ => {
                violations.push(Violation::InvalidType);
                None
            }
        };

        let amount = match input.amount.as_deref().map(str::parse::<Amount>) {
            Some(Ok(amount)) if amount.is_positive() => Some(amount),
            Some(Ok(_)) => {
                violations.push(Violation::NonPositiveAmount);
                None
            }
            Some(Err(AmountError::TooManyDecimals)) => {
                violations.push(Violation::TooManyDecimals);
                None
            }
            Some(Err(_)) | None => {
                violations.push(Violation::InvalidAmount);
                None
            }
        };

        let category = input.category.as_deref().map(str::trim).unwrap_or("");
        let category = if category.is_empty() {
            violations.push(Violation::MissingCategory);
            None
        } else if category.chars().count() > CATEGORY_MAX_CHARS {
            violations.push(Violation::CategoryTooLong);
            None
        } else {
            match kind {
                Some(kind) if taxonomy::is_allowed(kind, category) => Some(category.to_string()),
                Some(kind) => {
                    violations.push(Violation::CategoryNotAllowed(kind));
                    None
                }
                None => None,
            }
        };

        let occurred_at = input.date.as_deref().and_then(parse_iso8601);
        if occurred_at.is_none() {
            violations.push(Violation::InvalidDate);
        }

        violations.into_result(|| {
            Some(Self {
                kind: kind?,
                category: category?,
                amount: amount?,
                occurred_at: occurred_at?,
            })
        })
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// Validated list filter.
///
/// `start` and `end` are both inclusive. The default value matches every
/// transaction of the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub(crate) kind: Option<TransactionKind>,
    pub(crate) category: Option<String>,
    pub(crate) start: Option<DateTime<Utc>>,
    pub(crate) end: Option<DateTime<Utc>>,
}

/// Blank query values (`?type=`) are treated as absent.
fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl TransactionFilter {
    /// Applies the filter rules. The category is checked against the taxonomy
    /// just like on creation: against the given type when there is one,
    /// otherwise against every known category.
    pub fn parse(input: &TransactionFilterInput) -> ResultEngine<Self> {
        let mut violations = Violations::default();
        let mut kind_valid = true;

        let kind = match present(input.kind.as_deref()).map(TransactionKind::try_from) {
            None => None,
            Some(Ok(kind)) => Some(kind),
            Some(Err(_)) => {
                kind_valid = false;
                violations.push(Violation::InvalidTypeFilter);
                None
            }
        };

        let category = match present(input.category.as_deref()) {
            None => None,
            Some(category) if category.chars().count() > CATEGORY_MAX_CHARS => {
                violations.push(Violation::CategoryFilterTooLong);
                None
            }
            Some(category) => match kind {
                Some(kind) if taxonomy::is_allowed(kind, category) => Some(category.to_string()),
                Some(kind) => {
                    violations.push(Violation::CategoryFilterNotAllowed(kind));
                    None
                }
                None if !kind_valid => None,
                None if taxonomy::is_known(category) => Some(category.to_string()),
                None => {
                    violations.push(Violation::UnknownCategoryFilter);
                    None
                }
            },
        };

        let start = parse_bound(input.start_date.as_deref(), Violation::InvalidStartDate, &mut violations);
        let end = parse_bound(input.end_date.as_deref(), Violation::InvalidEndDate, &mut violations);

        if let (Some(Some(start)), Some(Some(end))) = (start, end)
            && start > end
        {
            violations.push(Violation::InvertedDateRange);
        }

        violations.into_result(|| {
            Some(Self {
                kind,
                category,
                start: start.flatten(),
                end: end.flatten(),
            })
        })
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn start(&self) -> Option<DateTime<Utc>> {
        self.start
    }

    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.end
    }
}

/// `None` when absent, `Some(None)` when present but unparseable.
fn parse_bound(
    value: Option<&str>,
    violation: Violation,
    violations: &mut Violations,
) -> Option<Option<DateTime<Utc>>> {
    let value = present(value)?;
    let parsed = parse_iso8601(value);
    if parsed.is_none() {
        violations.push(violation);
    }
    Some(parsed)
}

/// Sign-up data that passed validation. The email is trimmed and lower-cased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registration {
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
}

impl Registration {
    pub fn parse(input: &RegistrationInput) -> ResultEngine<Self> {
        let mut violations = Violations::default();

        let email = normalize_email(&input.email);
        if email.is_none() {
            violations.push(Violation::InvalidEmail);
        }
        if input.password.chars().count() < PASSWORD_MIN_CHARS {
            violations.push(Violation::PasswordTooShort);
        }
        let first_name = normalize_name(&input.first_name);
        if first_name.is_none() {
            violations.push(Violation::InvalidFirstName);
        }
        let last_name = normalize_name(&input.last_name);
        if last_name.is_none() {
            violations.push(Violation::InvalidLastName);
        }

        violations.into_result(|| {
            Some(Self {
                email: email?,
                password: input.password.clone(),
                first_name: first_name?,
                last_name: last_name?,
            })
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Login data that passed validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub(crate) email: String,
    pub(crate) password: String,
}

impl Credentials {
    pub fn parse(input: &LoginInput) -> ResultEngine<Self> {
        let mut violations = Violations::default();

        let email = normalize_email(&input.email);
        if email.is_none() {
            violations.push(Violation::InvalidEmail);
        }
        if input.password.is_empty() {
            violations.push(Violation::MissingPassword);
        }

        violations.into_result(|| {
            Some(Self {
                email: email?,
                password: input.password.clone(),
            })
        })
    }
}

/// Trimmed, lower-cased address. A top-level domain is required and display
/// names (`Ada <ada@example.com>`) or domain literals are not accepted.
fn normalize_email(value: &str) -> Option<String> {
    let email = value.trim().to_lowercase();
    let options = Options::default()
        .with_required_tld()
        .without_display_text()
        .without_domain_literal();
    EmailAddress::parse_with_options(&email, options)
        .ok()
        .map(|address| address.as_str().to_string())
}

fn normalize_name(value: &str) -> Option<String> {
    let name = value.trim();
    let len = name.chars().count();
    (NAME_MIN_CHARS..=NAME_MAX_CHARS)
        .contains(&len)
        .then(|| name.to_string())
}
