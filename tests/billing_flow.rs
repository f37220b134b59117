//! End-to-end repository flow over an embedded database
//! Run: cargo test --test billing_flow

use cashmemo_server::billing::{CalculationMode, ItemInput, RoundOff, SubProductInput};
use cashmemo_server::db::DbService;
use cashmemo_server::db::models::{
    Bill, CustomerCreate, ExpenseCreate, ExpenseType, LineItem, PaymentMethod, ProductCreate,
    SubProduct, UserCreate, UserId,
};
use cashmemo_server::db::repository::{
    BillRepository, CustomerRepository, ExpenseFilter, ExpenseRepository, ProductRepository,
    UserRepository,
};

async fn setup() -> (tempfile::TempDir, DbService) {
    let tmp = tempfile::tempdir().unwrap();
    let svc = DbService::new(&tmp.path().join("test.db").to_string_lossy())
        .await
        .unwrap();
    (tmp, svc)
}

async fn create_user(svc: &DbService, email: &str) -> UserId {
    let repo = UserRepository::new(svc.db.clone());
    let user = repo
        .create(UserCreate {
            name: "Ravi".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            business_name: "Ravi Traders".to_string(),
        })
        .await
        .unwrap();
    user.id.unwrap()
}

fn weight_line(name: &str, quantity: f64, unit_price: f64) -> LineItem {
    let result = cashmemo_server::billing::calculate_item(&ItemInput {
        mode: CalculationMode::Weight,
        quantity: Some(quantity),
        unit_count: None,
        unit_price: Some(unit_price),
        sub_products: vec![],
    })
    .unwrap();

    LineItem {
        main_product: name.to_string(),
        sub_products: vec![],
        calculation_mode: CalculationMode::Weight,
        unit_count: None,
        per_unit_size: None,
        quantity: result.quantity,
        unit_price: result.unit_price,
        line_total: result.line_total,
    }
}

fn bill_for(user: UserId, items: Vec<LineItem>) -> Bill {
    let line_totals: Vec<f64> = items.iter().map(|i| i.line_total).collect();
    let totals = cashmemo_server::billing::calculate_bill_totals(
        &line_totals,
        Some(50.0),
        Some(25.0),
        RoundOff::Auto,
    );

    Bill {
        id: None,
        user,
        bill_number: String::new(),
        customer_name: "Sharma Traders".to_string(),
        customer_mobile: "9876543210".to_string(),
        ship_to_address: String::new(),
        items,
        subtotal: totals.subtotal,
        loading_charge: totals.loading_charge,
        transport_charge: totals.transport_charge,
        round_off: totals.round_off,
        grand_total: totals.grand_total,
        created_at: 0,
    }
}

#[tokio::test]
async fn signup_rejects_duplicate_email() {
    let (_tmp, svc) = setup().await;
    let repo = UserRepository::new(svc.db.clone());

    create_user(&svc, "ravi@example.com").await;
    let dup = repo
        .create(UserCreate {
            name: "Other".to_string(),
            email: "RAVI@example.com".to_string(), // same email, different case
            password: "secret123".to_string(),
            business_name: "Other Traders".to_string(),
        })
        .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn login_flow_verifies_password() {
    let (_tmp, svc) = setup().await;
    let repo = UserRepository::new(svc.db.clone());

    create_user(&svc, "ravi@example.com").await;
    let user = repo
        .find_by_email("ravi@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(user.verify_password("secret123").unwrap());
    assert!(!user.verify_password("nope").unwrap());
}

#[tokio::test]
async fn products_are_scoped_per_user() {
    let (_tmp, svc) = setup().await;
    let repo = ProductRepository::new(svc.db.clone());

    let ravi = create_user(&svc, "ravi@example.com").await;
    let meena = create_user(&svc, "meena@example.com").await;

    repo.create(
        &ravi,
        ProductCreate {
            main_product: "Steel Sheet".to_string(),
            calculation_mode: CalculationMode::Weight,
            sub_products: vec![],
        },
    )
    .await
    .unwrap();

    repo.create(
        &meena,
        ProductCreate {
            main_product: "Pipe Bundle".to_string(),
            calculation_mode: CalculationMode::Piece,
            sub_products: vec![SubProduct {
                name: "8ft".to_string(),
                price: 130.0,
                size: 8.0,
            }],
        },
    )
    .await
    .unwrap();

    let ravi_products = repo.find_all_for_user(&ravi).await.unwrap();
    assert_eq!(ravi_products.len(), 1);
    assert_eq!(ravi_products[0].main_product, "Steel Sheet");

    // Same name is fine across users, duplicate within one user is not
    repo.create(
        &meena,
        ProductCreate {
            main_product: "Steel Sheet".to_string(),
            calculation_mode: CalculationMode::Weight,
            sub_products: vec![],
        },
    )
    .await
    .unwrap();
    let dup = repo
        .create(
            &ravi,
            ProductCreate {
                main_product: "Steel Sheet".to_string(),
                calculation_mode: CalculationMode::Weight,
                sub_products: vec![],
            },
        )
        .await;
    assert!(dup.is_err());
}

#[tokio::test]
async fn customer_search_is_case_insensitive() {
    let (_tmp, svc) = setup().await;
    let repo = CustomerRepository::new(svc.db.clone());
    let ravi = create_user(&svc, "ravi@example.com").await;

    for name in ["Sharma Traders", "Shah Metals", "Gupta & Sons"] {
        repo.create(
            &ravi,
            CustomerCreate {
                name: name.to_string(),
                mobile: String::new(),
                address: String::new(),
            },
        )
        .await
        .unwrap();
    }

    let hits = repo.search(&ravi, "sha").await.unwrap();
    let names: Vec<&str> = hits.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Shah Metals", "Sharma Traders"]);

    assert!(repo.search(&ravi, "  ").await.unwrap().is_empty());
}

#[tokio::test]
async fn bill_numbers_are_sequential_per_user() {
    let (_tmp, svc) = setup().await;
    let repo = BillRepository::new(svc.db.clone());
    let ravi = create_user(&svc, "ravi@example.com").await;

    let first = repo
        .create(bill_for(ravi.clone(), vec![weight_line("Steel", 10.0, 80.0)]))
        .await
        .unwrap();
    let second = repo
        .create(bill_for(ravi.clone(), vec![weight_line("Steel", 5.0, 80.0)]))
        .await
        .unwrap();

    assert!(first.bill_number.starts_with("BILL-"));
    assert!(first.bill_number.ends_with("-1"));
    assert!(second.bill_number.ends_with("-2"));
    assert!(first.created_at > 0);
}

#[tokio::test]
async fn bill_update_keeps_number_and_created_at() {
    let (_tmp, svc) = setup().await;
    let repo = BillRepository::new(svc.db.clone());
    let ravi = create_user(&svc, "ravi@example.com").await;

    let created = repo
        .create(bill_for(ravi.clone(), vec![weight_line("Steel", 10.0, 80.0)]))
        .await
        .unwrap();
    let id = created.id.as_ref().unwrap().to_string();

    let mut replacement = bill_for(ravi.clone(), vec![weight_line("Steel", 20.0, 80.0)]);
    replacement.customer_name = "New Customer".to_string();
    let updated = repo.update(&id, replacement).await.unwrap();

    assert_eq!(updated.bill_number, created.bill_number);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.customer_name, "New Customer");
    assert_eq!(updated.subtotal, 1600.0);
}

#[tokio::test]
async fn expense_stats_aggregate_by_category() {
    let (_tmp, svc) = setup().await;
    let repo = ExpenseRepository::new(svc.db.clone());
    let ravi = create_user(&svc, "ravi@example.com").await;

    for (expense_type, amount) in [
        (ExpenseType::Transport, 500.0),
        (ExpenseType::Transport, 300.0),
        (ExpenseType::Rent, 5000.0),
    ] {
        repo.create(
            &ravi,
            ExpenseCreate {
                expense_type,
                description: "test expense".to_string(),
                amount,
                date: None,
                notes: String::new(),
                payment_method: PaymentMethod::Cash,
            },
        )
        .await
        .unwrap();
    }

    let stats = repo
        .stats_for_user(&ravi, &ExpenseFilter::default())
        .await
        .unwrap();
    assert_eq!(stats.count, 3);
    assert_eq!(stats.total, 5800.0);

    let transport = stats
        .by_type
        .iter()
        .find(|s| s.expense_type == ExpenseType::Transport)
        .unwrap();
    assert_eq!(transport.total, 800.0);
    assert_eq!(transport.count, 2);

    let filtered = repo
        .find_all_for_user(
            &ravi,
            &ExpenseFilter {
                expense_type: Some(ExpenseType::Rent),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].amount, 5000.0);
}
