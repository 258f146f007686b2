//! Savings and spending target service
//!
//! Target windows run on the calendar (monthly = 1st to month end), not on
//! the user's payday, matching how targets were always reported.

use chrono::{NaiveDate, Weekday};

use crate::error::{PaydayError, PaydayResult};
use crate::models::{Money, PeriodType, Target, TargetKind, TargetProgress, UserId};
use crate::services::period::PeriodCalculator;
use crate::services::source::TransactionSource;
use crate::storage::Storage;

/// Input for creating a target
#[derive(Debug, Clone)]
pub struct CreateTargetInput {
    pub kind: TargetKind,
    pub amount: Money,
    pub period_type: PeriodType,
    pub deadline: NaiveDate,
}

/// Changes to an existing target; `None` leaves a field as it is
#[derive(Debug, Clone, Default)]
pub struct UpdateTargetInput {
    pub kind: Option<TargetKind>,
    pub amount: Option<Money>,
    pub period_type: Option<PeriodType>,
    pub deadline: Option<NaiveDate>,
}

/// Service for savings and spending targets
pub struct TargetService<'a> {
    storage: &'a Storage,
    week_start: Weekday,
}

impl<'a> TargetService<'a> {
    pub fn new(storage: &'a Storage, week_start: Weekday) -> Self {
        Self {
            storage,
            week_start,
        }
    }

    pub fn create(&self, user: &UserId, input: CreateTargetInput) -> PaydayResult<Target> {
        let target = Target::new(
            user.clone(),
            input.kind,
            input.amount,
            input.period_type,
            input.deadline,
        );
        target.validate()?;

        self.storage.targets.upsert(target.clone())?;
        self.storage.targets.save()?;

        tracing::info!(
            user = %user,
            id = %target.id,
            kind = %target.kind,
            amount = target.amount.cents(),
            deadline = %target.deadline,
            "target created"
        );
        Ok(target)
    }

    pub fn update(
        &self,
        user: &UserId,
        reference: &str,
        input: UpdateTargetInput,
    ) -> PaydayResult<Target> {
        let mut target = self.find(user, reference)?;

        if let Some(kind) = input.kind {
            target.kind = kind;
        }
        if let Some(amount) = input.amount {
            target.amount = amount;
        }
        if let Some(period_type) = input.period_type {
            target.period_type = period_type;
        }
        if let Some(deadline) = input.deadline {
            target.deadline = deadline;
        }
        target.validate()?;

        self.storage.targets.upsert(target.clone())?;
        self.storage.targets.save()?;

        tracing::info!(
            user = %user,
            id = %target.id,
            kind = %target.kind,
            amount = target.amount.cents(),
            deadline = %target.deadline,
            "target updated"
        );
        Ok(target)
    }

    /// The user's targets, nearest deadline first
    pub fn list(&self, user: &UserId) -> PaydayResult<Vec<Target>> {
        let mut targets = self.storage.targets.list_for_user(user)?;
        targets.sort_by_key(|t| t.deadline);
        Ok(targets)
    }

    pub fn delete(&self, user: &UserId, reference: &str) -> PaydayResult<Target> {
        let target = self.find(user, reference)?;

        self.storage.targets.delete(target.id)?;
        self.storage.targets.save()?;

        tracing::info!(user = %user, id = %target.id, "target deleted");
        Ok(target)
    }

    fn find(&self, user: &UserId, reference: &str) -> PaydayResult<Target> {
        self.storage
            .targets
            .find_by_reference(user, reference)?
            .ok_or_else(|| PaydayError::target_not_found(reference))
    }

    /// Progress of every target in the window containing `reference`
    pub fn progress(&self, user: &UserId, reference: NaiveDate) -> PaydayResult<Vec<TargetProgress>> {
        self.list(user)?
            .iter()
            .map(|target| {
                progress_for(
                    &self.storage.transactions,
                    user,
                    target,
                    self.week_start,
                    reference,
                )
            })
            .collect()
    }
}

/// Progress of one target, counting the transactions of its kind
pub fn progress_for<S: TransactionSource + ?Sized>(
    source: &S,
    user: &UserId,
    target: &Target,
    week_start: Weekday,
    reference: NaiveDate,
) -> PaydayResult<TargetProgress> {
    let window = PeriodCalculator::calendar_month().window(target.period_type, week_start, reference)?;
    let counted = target.kind.counted_kind();

    let current = Money::total(
        source
            .transactions_in(user, &window)?
            .iter()
            .filter(|txn| txn.kind == counted)
            .map(|txn| txn.amount),
    )?;

    Ok(TargetProgress::new(target, window, current, reference))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PaydayPaths;
    use crate::models::{CategoryId, Period, Transaction, TransactionKind};
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

    fn savings(cents: i64, deadline: NaiveDate) -> CreateTargetInput {
        CreateTargetInput {
            kind: TargetKind::Savings,
            amount: Money::from_cents(cents),
            period_type: PeriodType::Monthly,
            deadline,
        }
    }

    #[test]
    fn test_savings_progress_uses_calendar_month() {
        let user = UserId::default();
        let category = CategoryId::new();
        let ledger = vec![
            Transaction::new(user.clone(), category, TransactionKind::Income, Money::from_cents(30000), date(2024, 2, 29)),
            Transaction::new(user.clone(), category, TransactionKind::Income, Money::from_cents(20000), date(2024, 3, 1)),
            Transaction::new(user.clone(), category, TransactionKind::Expense, Money::from_cents(5000), date(2024, 3, 2)),
        ];
        let target = Target::new(user.clone(), TargetKind::Savings, Money::from_cents(40000), PeriodType::Monthly, date(2024, 3, 31));

        let progress = progress_for(&ledger, &user, &target, Weekday::Sun, date(2024, 3, 20)).unwrap();
        assert_eq!(progress.window, Period::new(date(2024, 3, 1), date(2024, 3, 31)).unwrap());
        assert_eq!(progress.current.cents(), 20000);
        assert_eq!(progress.percentage, 50.0);
        assert!(!progress.is_completed);
    }

    #[test]
    fn test_spending_target_counts_expenses() {
        let user = UserId::default();
        let category = CategoryId::new();
        let ledger = vec![
            Transaction::new(user.clone(), category, TransactionKind::Expense, Money::from_cents(1500), date(2024, 3, 20)),
            Transaction::new(user.clone(), category, TransactionKind::Income, Money::from_cents(9000), date(2024, 3, 20)),
        ];
        let target = Target::new(user.clone(), TargetKind::Spending, Money::from_cents(1000), PeriodType::Daily, date(2024, 3, 19));

        let progress = progress_for(&ledger, &user, &target, Weekday::Sun, date(2024, 3, 20)).unwrap();
        assert_eq!(progress.current.cents(), 1500);
        assert!(progress.is_completed);
        assert!(!progress.is_overdue);
    }

    #[test]
    fn test_create_list_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage, Weekday::Sun);
        let user = UserId::from("alice");

        let later = service.create(&user, savings(100000, date(2024, 12, 31))).unwrap();
        let sooner = service.create(&user, savings(5000, date(2024, 6, 30))).unwrap();
        assert!(service.create(&user, savings(-5, date(2024, 6, 30))).unwrap_err().is_validation());

        let ids: Vec<_> = service.list(&user).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);

        let progress = service.progress(&user, date(2024, 7, 1)).unwrap();
        assert_eq!(progress.len(), 2);
        assert!(progress[0].is_overdue);
        assert!(!progress[1].is_overdue);

        service.delete(&user, &sooner.id.as_uuid().to_string()).unwrap();
        assert_eq!(service.list(&user).unwrap().len(), 1);
        assert!(service.list(&UserId::from("bob")).unwrap().is_empty());
    }

    #[test]
    fn test_update_changes_goal_and_window() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TargetService::new(&storage, Weekday::Sun);
        let user = UserId::from("alice");

        let target = service.create(&user, savings(100000, date(2024, 12, 31))).unwrap();
        let reference = target.id.as_uuid().to_string();

        let updated = service
            .update(
                &user,
                &reference,
                UpdateTargetInput {
                    kind: Some(TargetKind::Spending),
                    amount: Some(Money::from_cents(20000)),
                    period_type: Some(PeriodType::Weekly),
                    deadline: Some(date(2024, 6, 30)),
                },
            )
            .unwrap();
        assert_eq!(updated.id, target.id);
        assert_eq!(updated.kind, TargetKind::Spending);
        assert_eq!(updated.period_type, PeriodType::Weekly);
        assert_eq!(service.list(&user).unwrap(), vec![updated.clone()]);

        let err = service
            .update(
                &user,
                &reference,
                UpdateTargetInput {
                    amount: Some(Money::from_cents(-1)),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.list(&user).unwrap(), vec![updated]);

        assert!(service
            .update(&UserId::from("bob"), &reference, UpdateTargetInput::default())
            .unwrap_err()
            .is_not_found());
    }
}
