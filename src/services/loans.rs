//! Loan management service: loan lists and renewals

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{default_renewal_date, BookInstance, LoanEntry},
    repository::Repository,
};

#[derive(Clone)]
pub struct LoansService {
    repository: Repository,
}

impl LoansService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Outstanding loans of one borrower, due date ascending
    pub async fn borrower_loans(
        &self,
        borrower_id: i32,
        page: i64,
        per_page: i64,
    ) -> AppResult<(Vec<LoanEntry>, i64)> {
        self.repository
            .book_instances
            .loans_for_borrower(borrower_id, page, per_page)
            .await
    }

    /// All outstanding loans across all borrowers, due date ascending
    pub async fn all_loans(&self, page: i64, per_page: i64) -> AppResult<(Vec<LoanEntry>, i64)> {
        self.repository.book_instances.all_on_loan(page, per_page).await
    }

    /// Proposed renewal for a copy: the copy plus the default due date
    /// (three weeks from today). Read-only.
    pub async fn proposed_renewal(&self, id: Uuid) -> AppResult<(BookInstance, NaiveDate)> {
        let instance = self.repository.book_instances.get_by_id(id).await?;
        let proposed = default_renewal_date(chrono::Utc::now().date_naive());
        Ok((instance, proposed))
    }

    /// Renew a loan. When no date is supplied, the default renewal period
    /// applies. No bound is placed on a supplied date; arbitrary past and
    /// future dates are accepted.
    pub async fn renew(&self, id: Uuid, due_back: Option<NaiveDate>) -> AppResult<BookInstance> {
        let due_back =
            due_back.unwrap_or_else(|| default_renewal_date(chrono::Utc::now().date_naive()));
        self.repository.book_instances.set_due_back(id, due_back).await
    }
}
