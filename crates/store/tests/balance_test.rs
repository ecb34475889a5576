//! Fund transfer and balance round-trip tests.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use cashdesk_core::transfer::{NewFundTransfer, TransferType};
use cashdesk_shared::types::UserId;
use cashdesk_store::repositories::{
    BalanceRepository, FundTransferRepository, NewUser, UserRepository,
};
use cashdesk_store::Store;

async fn setup() -> (Store, UserId) {
    let store = Store::new(Decimal::ZERO);
    let admin = store.bootstrap_admin("Admin", "admin@example.com").await;
    (store, admin.id)
}

fn cash(amount: Decimal) -> NewFundTransfer {
    NewFundTransfer {
        transfer_type: TransferType::Cash,
        amount,
        currency: None,
        exchange_rate: None,
        bank_name: None,
        account_number: None,
        transaction_ref: None,
        recipient_id: None,
        preserve_timestamp: None,
    }
}

#[tokio::test]
async fn add_and_delete_round_trip_is_net_zero() {
    let (store, admin) = setup().await;
    let funds = FundTransferRepository::new(store.clone());
    let balance = BalanceRepository::new(store.clone());

    let before = balance.get(admin).await.unwrap().current_balance;
    let transfer = funds.add_funds(admin, cash(dec!(1000))).await.unwrap();
    assert_eq!(
        balance.get(admin).await.unwrap().current_balance,
        before + dec!(1000)
    );

    funds.delete(admin, transfer.id).await.unwrap();
    let after = balance.get(admin).await.unwrap();
    assert_eq!(after.current_balance, before);
    assert!(after.is_consistent());
}

#[tokio::test]
async fn bank_transfers_require_bank_details() {
    let (store, admin) = setup().await;
    let funds = FundTransferRepository::new(store.clone());

    let mut input = cash(dec!(1000));
    input.transfer_type = TransferType::Bank;
    let err = funds.add_funds(admin, input.clone()).await.unwrap_err();
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.error_code(), "MISSING_BANK_FIELD");

    input.bank_name = Some("First National".to_string());
    input.account_number = Some("12345678".to_string());
    input.transaction_ref = Some("REF-1".to_string());
    let transfer = funds.add_funds(admin, input).await.unwrap();
    assert!(transfer.bank.is_some());
    assert!(transfer.reference.starts_with("FT-"));
}

#[tokio::test]
async fn employees_cannot_add_funds() {
    let (store, admin) = setup().await;
    let employee = UserRepository::new(store.clone())
        .create(
            admin,
            NewUser {
                name: "Emp".to_string(),
                email: "emp@example.com".to_string(),
                role: "employee".to_string(),
                manager_id: None,
                approval_limit: None,
            },
        )
        .await
        .unwrap()
        .id;

    let err = FundTransferRepository::new(store.clone())
        .add_funds(employee, cash(dec!(100)))
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn preserve_timestamp_backdates_record_and_reference() {
    let (store, admin) = setup().await;
    let funds = FundTransferRepository::new(store.clone());

    let past = chrono::DateTime::parse_from_rfc3339("2025-01-15T09:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let mut input = cash(dec!(500));
    input.preserve_timestamp = Some(past);

    let transfer = funds.add_funds(admin, input).await.unwrap();
    assert_eq!(transfer.created_at, past);
    assert!(transfer.reference.starts_with("FT-20250115-"));
}

#[tokio::test]
async fn clear_history_purges_records_but_not_the_balance() {
    let (store, admin) = setup().await;
    let funds = FundTransferRepository::new(store.clone());
    let balance = BalanceRepository::new(store.clone());

    funds.add_funds(admin, cash(dec!(1000))).await.unwrap();
    funds.add_funds(admin, cash(dec!(2000))).await.unwrap();

    let removed = funds.clear_history(admin).await.unwrap();
    assert_eq!(removed, 2);
    assert!(funds.list(admin).await.unwrap().is_empty());
    assert_eq!(
        balance.get(admin).await.unwrap().current_balance,
        dec!(3000)
    );
}

#[tokio::test]
async fn opening_balance_seeds_the_pool() {
    let store = Store::new(dec!(750));
    let admin = store.bootstrap_admin("Admin", "admin@example.com").await;
    let balance = BalanceRepository::new(store.clone())
        .get(admin.id)
        .await
        .unwrap();
    assert_eq!(balance.current_balance, dec!(750));
    assert_eq!(balance.opening_balance, dec!(750));
    assert!(balance.is_consistent());
}

#[tokio::test]
async fn deleting_a_spent_transfer_can_drive_the_balance_negative() {
    let (store, admin) = setup().await;
    let funds = FundTransferRepository::new(store.clone());
    let balance = BalanceRepository::new(store.clone());
    let txns = cashdesk_store::repositories::TransactionRepository::new(store.clone());

    let transfer = funds.add_funds(admin, cash(dec!(1000))).await.unwrap();
    let tx = txns
        .create(
            admin,
            cashdesk_core::workflow::NewTransaction {
                workflow: cashdesk_core::workflow::WorkflowKind::Simple,
                category: cashdesk_shared::types::CategoryId::new(),
                pre_tax_amount: dec!(800),
                tax_amount: Decimal::ZERO,
                post_tax_amount: dec!(800),
                transaction_date: chrono::Utc::now().date_naive(),
                payment_method: "cash".to_string(),
                payee_client_name: "Vendor".to_string(),
                purpose: "Big spend".to_string(),
                requested_by: None,
            },
        )
        .await
        .unwrap();
    txns.approve_simple(admin, tx.id, None).await.unwrap();

    funds.delete(admin, transfer.id).await.unwrap();
    let after = balance.get(admin).await.unwrap();
    assert_eq!(after.current_balance, dec!(-800));
    assert!(after.is_consistent());
}
