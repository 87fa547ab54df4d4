//! Book instance (physical copy) model and related types

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Loan status of a physical copy. Persisted as single-char codes
/// ('m', 'o', 'a', 'r').
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Maintenance,
    OnLoan,
    Available,
    Reserved,
}

impl LoanStatus {
    pub fn as_code(&self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }
}

impl Default for LoanStatus {
    fn default() -> Self {
        LoanStatus::Maintenance
    }
}

impl std::fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        };
        write!(f, "{}", label)
    }
}

impl std::str::FromStr for LoanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "m" => Ok(LoanStatus::Maintenance),
            "o" => Ok(LoanStatus::OnLoan),
            "a" => Ok(LoanStatus::Available),
            "r" => Ok(LoanStatus::Reserved),
            _ => Err(format!("Invalid loan status code: {}", s)),
        }
    }
}

// SQLx conversions: stored as VARCHAR(1)
impl sqlx::Type<Postgres> for LoanStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for LoanStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for LoanStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_code().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// A specific physical copy of a book, individually trackable and loanable
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BookInstance {
    /// Unique ID for this particular copy across the whole library
    pub id: Uuid,
    pub book_id: i32,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    /// Computed; true iff `due_back` is set and strictly before today
    #[sqlx(skip)]
    #[serde(default)]
    pub is_overdue: bool,
}

impl BookInstance {
    /// Whether this copy is overdue as of the given date
    pub fn is_overdue_on(&self, today: NaiveDate) -> bool {
        self.due_back.map(|d| d < today).unwrap_or(false)
    }
}

/// Loan-view row: a book instance with its book title and borrower attached
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoanEntry {
    pub id: Uuid,
    pub book_id: i32,
    pub book_title: String,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: LoanStatus,
    pub borrower_id: Option<i32>,
    pub borrower_username: Option<String>,
    pub is_overdue: bool,
}

/// Create book instance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookInstance {
    pub book_id: i32,
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    pub status: Option<LoanStatus>,
    pub borrower_id: Option<i32>,
}

/// Update book instance request; the book reference itself is immutable.
/// Absent fields are left unchanged; an explicit `null` clears `due_back`
/// or `borrower_id`, which is how a returned copy sheds its loan state.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBookInstance {
    #[validate(length(min = 1, max = 200, message = "Imprint must be 1-200 characters"))]
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "super::clearable")]
    #[schema(value_type = Option<NaiveDate>)]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
    #[serde(default, deserialize_with = "super::clearable")]
    #[schema(value_type = Option<i32>)]
    pub borrower_id: Option<Option<i32>>,
}

/// Loan renewal request. When `due_back` is absent the server applies
/// the default renewal period (three weeks from today).
#[derive(Debug, Deserialize, ToSchema)]
pub struct RenewLoan {
    pub due_back: Option<NaiveDate>,
}

/// Default renewal period: three weeks
pub const RENEWAL_PERIOD_DAYS: i64 = 21;

/// Proposed due date for a renewal submitted on `today`
pub fn default_renewal_date(today: NaiveDate) -> NaiveDate {
    today + Duration::days(RENEWAL_PERIOD_DAYS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instance(due_back: Option<NaiveDate>) -> BookInstance {
        BookInstance {
            id: Uuid::new_v4(),
            book_id: 1,
            imprint: "Foo Press, 2016".to_string(),
            due_back,
            status: LoanStatus::OnLoan,
            borrower_id: None,
            is_overdue: false,
        }
    }

    #[test]
    fn overdue_when_due_back_is_past() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let inst = instance(NaiveDate::from_ymd_opt(2025, 6, 14));
        assert!(inst.is_overdue_on(today));
    }

    #[test]
    fn not_overdue_on_due_date_or_later() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(!instance(NaiveDate::from_ymd_opt(2025, 6, 15)).is_overdue_on(today));
        assert!(!instance(NaiveDate::from_ymd_opt(2025, 6, 16)).is_overdue_on(today));
    }

    #[test]
    fn not_overdue_without_due_back() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert!(!instance(None).is_overdue_on(today));
    }

    #[test]
    fn default_renewal_is_three_weeks_out() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(
            default_renewal_date(today),
            NaiveDate::from_ymd_opt(2025, 7, 6).unwrap()
        );
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [
            LoanStatus::Maintenance,
            LoanStatus::OnLoan,
            LoanStatus::Available,
            LoanStatus::Reserved,
        ] {
            assert_eq!(status.as_code().parse::<LoanStatus>().unwrap(), status);
        }
        assert!("x".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn update_distinguishes_null_from_absent_loan_fields() {
        let returned: UpdateBookInstance = serde_json::from_str(
            r#"{"status": "available", "due_back": null, "borrower_id": null}"#,
        )
        .unwrap();
        assert_eq!(returned.due_back, Some(None));
        assert_eq!(returned.borrower_id, Some(None));

        let untouched: UpdateBookInstance = serde_json::from_str(r#"{"status": "onloan"}"#).unwrap();
        assert_eq!(untouched.due_back, None);
        assert_eq!(untouched.borrower_id, None);

        let reassigned: UpdateBookInstance =
            serde_json::from_str(r#"{"borrower_id": 3}"#).unwrap();
        assert_eq!(reassigned.borrower_id, Some(Some(3)));
    }
}
