//! Transaction service
//!
//! Records income and expenses against a user's categories. A transaction
//! takes its kind from its category, so an expense can never land in an
//! income category.

use chrono::NaiveDate;

use crate::error::{PaydayError, PaydayResult};
use crate::models::{
    Category, CategoryId, Money, Period, Transaction, TransactionKind, UserId,
};
use crate::services::category::CategoryService;
use crate::storage::Storage;

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub period: Option<Period>,
    pub category_id: Option<CategoryId>,
    pub kind: Option<TransactionKind>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    fn matches(&self, txn: &Transaction) -> bool {
        self.period.map_or(true, |p| p.contains(txn.date))
            && self.category_id.map_or(true, |c| txn.category_id == c)
            && self.kind.map_or(true, |k| txn.kind == k)
    }
}

/// Input for recording a transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Category name or id
    pub category: String,
    pub amount: Money,
    pub date: NaiveDate,
    pub description: Option<String>,
    /// When given, must agree with the category's kind
    pub kind: Option<TransactionKind>,
}

/// Changes to an existing transaction; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    /// Category name or id; the transaction takes the new category's kind
    pub category: Option<String>,
    pub amount: Option<Money>,
    pub date: Option<NaiveDate>,
    /// An empty description clears it
    pub description: Option<String>,
    /// When given, must agree with the (possibly new) category's kind
    pub kind: Option<TransactionKind>,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    pub fn create(&self, user: &UserId, input: CreateTransactionInput) -> PaydayResult<Transaction> {
        let category = CategoryService::new(self.storage).require(user, &input.category)?;
        check_kind(&category, input.kind)?;

        let mut txn = Transaction::new(
            user.clone(),
            category.id,
            category.kind,
            input.amount,
            input.date,
        );
        if let Some(description) = input.description {
            txn = txn.with_description(description.trim());
        }
        txn.validate()?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(
            user = %user,
            id = %txn.id,
            kind = %txn.kind,
            amount = txn.amount.cents(),
            date = %txn.date,
            "transaction recorded"
        );
        Ok(txn)
    }

    /// Update a transaction
    pub fn update(
        &self,
        user: &UserId,
        reference: &str,
        input: UpdateTransactionInput,
    ) -> PaydayResult<Transaction> {
        let mut txn = self
            .find(user, reference)?
            .ok_or_else(|| PaydayError::transaction_not_found(reference))?;

        let categories = CategoryService::new(self.storage);
        let category = match &input.category {
            Some(name) => categories.require(user, name)?,
            None => self
                .storage
                .categories
                .get(txn.category_id)?
                .ok_or_else(|| PaydayError::category_not_found(txn.category_id.to_string()))?,
        };
        check_kind(&category, input.kind)?;

        txn.category_id = category.id;
        txn.kind = category.kind;
        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }
        if let Some(description) = input.description {
            txn.description = description.trim().to_string();
        }
        txn.validate()?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(
            user = %user,
            id = %txn.id,
            kind = %txn.kind,
            amount = txn.amount.cents(),
            date = %txn.date,
            "transaction updated"
        );
        Ok(txn)
    }

    /// Find a transaction by id reference
    pub fn find(&self, user: &UserId, reference: &str) -> PaydayResult<Option<Transaction>> {
        self.storage.transactions.find_by_reference(user, reference)
    }

    /// List transactions, newest first
    pub fn list(&self, user: &UserId, filter: &TransactionFilter) -> PaydayResult<Vec<Transaction>> {
        let mut transactions = self
            .storage
            .transactions
            .filter_for_user(user, |t| filter.matches(t))?;

        transactions.sort_by(|a, b| {
            b.date
                .cmp(&a.date)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }
        Ok(transactions)
    }

    /// Delete a transaction
    pub fn delete(&self, user: &UserId, reference: &str) -> PaydayResult<Transaction> {
        let txn = self
            .find(user, reference)?
            .ok_or_else(|| PaydayError::transaction_not_found(reference))?;

        self.storage.transactions.delete(txn.id)?;
        self.storage.transactions.save()?;

        tracing::info!(user = %user, id = %txn.id, "transaction deleted");
        Ok(txn)
    }
}

/// An explicitly requested kind must agree with the category
fn check_kind(category: &Category, kind: Option<TransactionKind>) -> PaydayResult<()> {
    match kind {
        Some(kind) if kind != category.kind => Err(PaydayError::Validation(format!(
            "Category '{}' is an {} category; cannot record an {} in it",
            category.name, category.kind, kind
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PaydayPaths;
    use crate::services::category::NewCategory;
    use crate::services::period::PeriodCalculator;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PaydayPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seed_categories(storage: &Storage, user: &UserId) {
        let categories = CategoryService::new(storage);
        for (name, kind) in [("Salary", TransactionKind::Income), ("Food", TransactionKind::Expense)] {
            categories
                .create(
                    user,
                    NewCategory {
                        name: name.into(),
                        kind,
                        icon: None,
                        color: None,
                    },
                )
                .unwrap();
        }
    }

    fn input(category: &str, cents: i64, on: NaiveDate) -> CreateTransactionInput {
        CreateTransactionInput {
            category: category.into(),
            amount: Money::from_cents(cents),
            date: on,
            description: None,
            kind: None,
        }
    }

    #[test]
    fn test_create_takes_kind_from_category() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        let salary = service.create(&user, input("salary", 500000, date(2024, 1, 25))).unwrap();
        let lunch = service
            .create(
                &user,
                CreateTransactionInput {
                    description: Some("  lunch ".into()),
                    ..input("Food", 1250, date(2024, 1, 26))
                },
            )
            .unwrap();

        assert!(salary.is_income());
        assert!(lunch.is_expense());
        assert_eq!(lunch.description, "lunch");
    }

    #[test]
    fn test_create_rejects_mismatched_kind_and_bad_amounts() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        let err = service
            .create(
                &user,
                CreateTransactionInput {
                    kind: Some(TransactionKind::Expense),
                    ..input("Salary", 100, date(2024, 1, 1))
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service
            .create(&user, input("Food", 0, date(2024, 1, 1)))
            .unwrap_err()
            .is_validation());
        assert!(service
            .create(&user, input("Travel", 100, date(2024, 1, 1)))
            .unwrap_err()
            .is_not_found());
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }

    #[test]
    fn test_list_filters_by_period_newest_first() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        service.create(&user, input("Food", 100, date(2024, 1, 24))).unwrap();
        service.create(&user, input("Food", 200, date(2024, 1, 25))).unwrap();
        service.create(&user, input("Salary", 300, date(2024, 2, 24))).unwrap();
        service.create(&user, input("Food", 400, date(2024, 2, 25))).unwrap();

        let period = PeriodCalculator::for_day(25)
            .unwrap()
            .current_period(date(2024, 2, 1))
            .unwrap();
        let listed = service
            .list(&user, &TransactionFilter::new().period(period))
            .unwrap();
        let amounts: Vec<_> = listed.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![300, 200]);

        let expenses = service
            .list(&user, &TransactionFilter::new().kind(TransactionKind::Expense).limit(2))
            .unwrap();
        let amounts: Vec<_> = expenses.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![400, 200]);
    }

    #[test]
    fn test_update_moves_transaction_between_categories() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        let txn = service
            .create(
                &user,
                CreateTransactionInput {
                    description: Some("refund".into()),
                    ..input("Food", 1250, date(2024, 1, 26))
                },
            )
            .unwrap();
        let reference = txn.id.as_uuid().to_string();

        let updated = service
            .update(
                &user,
                &reference,
                UpdateTransactionInput {
                    category: Some("Salary".into()),
                    amount: Some(Money::from_cents(1500)),
                    date: Some(date(2024, 1, 27)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.id, txn.id);
        assert!(updated.is_income());
        assert_eq!(updated.amount.cents(), 1500);
        assert_eq!(updated.date, date(2024, 1, 27));
        assert_eq!(updated.description, "refund");
        assert_eq!(storage.transactions.get(txn.id).unwrap().unwrap(), updated);

        let cleared = service
            .update(
                &user,
                &reference,
                UpdateTransactionInput {
                    description: Some("  ".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(cleared.description, "");
    }

    #[test]
    fn test_update_revalidates() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        let txn = service.create(&user, input("Food", 1250, date(2024, 1, 26))).unwrap();
        let reference = txn.id.as_uuid().to_string();

        let err = service
            .update(
                &user,
                &reference,
                UpdateTransactionInput {
                    kind: Some(TransactionKind::Income),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        let err = service
            .update(
                &user,
                &reference,
                UpdateTransactionInput {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());

        assert!(service
            .update(&UserId::from("bob"), &reference, UpdateTransactionInput::default())
            .unwrap_err()
            .is_not_found());
        assert_eq!(storage.transactions.get(txn.id).unwrap().unwrap(), txn);
    }

    #[test]
    fn test_delete_by_reference() {
        let (_temp_dir, storage) = create_test_storage();
        let user = UserId::from("alice");
        seed_categories(&storage, &user);
        let service = TransactionService::new(&storage);

        let txn = service.create(&user, input("Food", 100, date(2024, 1, 24))).unwrap();
        let reference = txn.id.as_uuid().to_string()[..8].to_string();

        assert!(service
            .delete(&UserId::from("bob"), &reference)
            .unwrap_err()
            .is_not_found());
        assert_eq!(service.delete(&user, &reference).unwrap().id, txn.id);
        assert_eq!(storage.transactions.count().unwrap(), 0);
    }
}
