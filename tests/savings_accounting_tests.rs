//! Savings contribution accounting tests
//!
//! Period uniqueness, additive payment accumulation, and the derived
//! status over the (paid, expected) plane, via the service layer against
//! an in-memory store.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use coopfund_server::models::{
    CreateSavingsRequest, Savings, SavingsPaymentRequest, SavingsStatus, UpdateSavingsRequest,
};
use coopfund_server::repository::memory::MemorySavingsRepository;
use coopfund_server::services::{SavingsError, SavingsService};

fn service() -> SavingsService<MemorySavingsRepository> {
    SavingsService::new(MemorySavingsRepository::new())
}

fn period(user_id: i64, month: &str, expected: Decimal, paid: Decimal) -> CreateSavingsRequest {
    CreateSavingsRequest {
        user_id,
        month: month.to_string(),
        year: 2025,
        expected_amount: expected,
        paid_amount: paid,
    }
}

#[tokio::test]
async fn scenario_pending_to_partial_to_paid() {
    let service = service();

    let savings = service
        .create(period(1, "January", dec!(5000), dec!(0)), None)
        .await
        .unwrap();
    assert_eq!(savings.status, SavingsStatus::Pending);

    let savings = service
        .record_payment(
            savings.id,
            SavingsPaymentRequest {
                amount: dec!(2000),
                payment_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(savings.paid_amount, dec!(2000));
    assert_eq!(savings.status, SavingsStatus::Partial);

    let savings = service
        .record_payment(
            savings.id,
            SavingsPaymentRequest {
                amount: dec!(3000),
                payment_date: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(savings.paid_amount, dec!(5000));
    assert_eq!(savings.status, SavingsStatus::Paid);
}

#[tokio::test]
async fn duplicate_period_fails_and_creates_no_row() {
    let service = service();
    service
        .create(period(1, "January", dec!(5000), dec!(0)), None)
        .await
        .unwrap();

    let result = service
        .create(period(1, "January", dec!(9000), dec!(0)), None)
        .await;
    match result {
        Err(SavingsError::DuplicatePeriod { month, year }) => {
            assert_eq!(month, "January");
            assert_eq!(year, 2025);
        }
        other => panic!("expected DuplicatePeriod, got {:?}", other.map(|s| s.id)),
    }

    let all = service
        .list(coopfund_server::models::Page::all())
        .await
        .unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].expected_amount, dec!(5000));
}

#[tokio::test]
async fn sequential_payments_accumulate_never_overwrite() {
    let service = service();
    let savings = service
        .create(period(1, "March", dec!(10000), dec!(0)), None)
        .await
        .unwrap();

    for _ in 0..4 {
        service
            .record_payment(
                savings.id,
                SavingsPaymentRequest {
                    amount: dec!(1500),
                    payment_date: None,
                },
            )
            .await
            .unwrap();
    }

    let savings = service.get(savings.id).await.unwrap();
    assert_eq!(savings.paid_amount, dec!(6000));
    assert_eq!(savings.status, SavingsStatus::Partial);
}

#[tokio::test]
async fn status_matches_inequalities_across_the_plane() {
    // Property sweep over (paid, expected) including the axes
    for paid_cents in (0..=600_000i64).step_by(50_000) {
        for expected_cents in (0..=600_000i64).step_by(50_000) {
            let paid = Decimal::new(paid_cents, 2);
            let expected = Decimal::new(expected_cents, 2);
            let status = Savings::derive_status(paid, expected);

            let expected_status = if paid >= expected {
                SavingsStatus::Paid
            } else if paid > Decimal::ZERO {
                SavingsStatus::Partial
            } else {
                SavingsStatus::Pending
            };
            assert_eq!(status, expected_status, "paid={} expected={}", paid, expected);
        }
    }
}

#[tokio::test]
async fn admin_update_overwrites_absolute_amounts() {
    let service = service();
    let savings = service
        .create(period(1, "June", dec!(5000), dec!(5000)), None)
        .await
        .unwrap();
    assert_eq!(savings.status, SavingsStatus::Paid);

    // Overwrite (not add) the paid amount
    let savings = service
        .update(
            savings.id,
            UpdateSavingsRequest {
                expected_amount: None,
                paid_amount: Some(dec!(1000)),
            },
        )
        .await
        .unwrap();
    assert_eq!(savings.paid_amount, dec!(1000));
    assert_eq!(savings.status, SavingsStatus::Partial);
}

#[tokio::test]
async fn payment_against_missing_record_is_not_found() {
    let service = service();
    let result = service
        .record_payment(
            12345,
            SavingsPaymentRequest {
                amount: dec!(100),
                payment_date: None,
            },
        )
        .await;
    assert!(matches!(result, Err(SavingsError::NotFound)));
}
