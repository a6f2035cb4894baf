use sea_orm::{Database, DatabaseConnection};

use engine::{
    Amount, Credentials, Engine, EngineError, LoginInput, NewTransaction, Registration,
    RegistrationInput, TransactionFilter, TransactionFilterInput, TransactionInput,
    TransactionKind, Violation,
};
use migration::MigratorTrait;
use uuid::Uuid;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .password_cost(4)
        .build()
        .await
        .unwrap();
    (engine, db)
}

fn registration(email: &str) -> Registration {
    Registration::parse(&RegistrationInput {
        email: email.to_string(),
        password: "secret1".to_string(),
        first_name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
    })
    .unwrap()
}

async fn user(engine: &Engine, email: &str) -> Uuid {
    engine.register_user(registration(email)).await.unwrap().id
}

fn new_tx(kind: &str, category: &str, amount: &str, date: &str) -> NewTransaction {
    NewTransaction::parse(&TransactionInput::new(kind, category, amount, date)).unwrap()
}

fn filter(input: TransactionFilterInput) -> TransactionFilter {
    TransactionFilter::parse(&input).unwrap()
}

#[tokio::test]
async fn salary_round_trip() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let created = engine
        .create_transaction(
            new_tx("INCOME", "Salary", "1000", "2024-12-08T12:00:00Z"),
            alice,
        )
        .await
        .unwrap();
    assert_eq!(created.amount.as_f64(), 1000.0);
    assert_eq!(created.user_id, alice);
    assert_eq!(created.kind, TransactionKind::Income);

    let listed = engine
        .list_transactions(&TransactionFilter::default(), alice)
        .await
        .unwrap();
    assert_eq!(listed, vec![created]);
}

#[test]
fn food_is_not_an_income_category() {
    let input = TransactionInput::new("INCOME", "Food", "80", "2024-12-09T12:00:00Z");
    match NewTransaction::parse(&input) {
        Err(EngineError::Validation(violations)) => assert!(
            violations.contains(&Violation::CategoryNotAllowed(TransactionKind::Income))
        ),
        other => panic!("unexpected result {other:?}"),
    }
}

#[tokio::test]
async fn users_only_see_their_own_transactions() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;

    engine
        .create_transaction(new_tx("EXPENSE", "Food", "12.50", "2024-01-01"), alice)
        .await
        .unwrap();
    engine
        .create_transaction(new_tx("EXPENSE", "Housing", "900", "2024-01-01"), bob)
        .await
        .unwrap();

    let alice_txs = engine
        .list_transactions(&TransactionFilter::default(), alice)
        .await
        .unwrap();
    assert_eq!(alice_txs.len(), 1);
    assert!(alice_txs.iter().all(|tx| tx.user_id == alice));
    assert_eq!(alice_txs[0].amount, Amount::new(1250));

    let stranger = engine
        .list_transactions(&TransactionFilter::default(), Uuid::new_v4())
        .await
        .unwrap();
    assert!(stranger.is_empty());
}

#[tokio::test]
async fn newest_first_with_id_tiebreak() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    let older = engine
        .create_transaction(new_tx("EXPENSE", "Food", "1", "2024-01-01"), alice)
        .await
        .unwrap();
    let newer = engine
        .create_transaction(new_tx("EXPENSE", "Food", "2", "2024-01-02"), alice)
        .await
        .unwrap();
    let mut same_day = Vec::new();
    for amount in ["3", "4", "5"] {
        same_day.push(
            engine
                .create_transaction(new_tx("INCOME", "Gifts", amount, "2023-06-01"), alice)
                .await
                .unwrap(),
        );
    }
    same_day.sort_by_key(|tx| tx.id.to_string());

    let listed = engine
        .list_transactions(&TransactionFilter::default(), alice)
        .await
        .unwrap();
    let mut expected = vec![newer, older];
    expected.extend(same_day);
    assert_eq!(listed, expected);

    let again = engine
        .list_transactions(&TransactionFilter::default(), alice)
        .await
        .unwrap();
    assert_eq!(listed, again);
}

#[tokio::test]
async fn filters_return_a_subset() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;

    for (kind, category, date) in [
        ("INCOME", "Salary", "2024-01-31T09:00:00Z"),
        ("INCOME", "Freelance", "2024-02-15T09:00:00Z"),
        ("EXPENSE", "Food", "2024-01-10T09:00:00Z"),
        ("EXPENSE", "Food", "2024-03-01T00:00:00Z"),
        ("EXPENSE", "Utilities", "2024-02-01T00:00:00Z"),
    ] {
        engine
            .create_transaction(new_tx(kind, category, "10", date), alice)
            .await
            .unwrap();
    }

    let all = engine
        .list_transactions(&TransactionFilter::default(), alice)
        .await
        .unwrap();
    assert_eq!(all.len(), 5);

    let expenses = engine
        .list_transactions(&filter(TransactionFilterInput::default().kind("EXPENSE")), alice)
        .await
        .unwrap();
    assert_eq!(expenses.len(), 3);
    assert!(expenses.iter().all(|tx| tx.kind == TransactionKind::Expense));

    let food = engine
        .list_transactions(
            &filter(TransactionFilterInput::default().kind("EXPENSE").category("Food")),
            alice,
        )
        .await
        .unwrap();
    assert_eq!(food.len(), 2);

    // Both bounds are inclusive.
    let window = engine
        .list_transactions(
            &filter(
                TransactionFilterInput::default()
                    .start_date("2024-01-31T09:00:00Z")
                    .end_date("2024-03-01"),
            ),
            alice,
        )
        .await
        .unwrap();
    let categories: Vec<_> = window.iter().map(|tx| tx.category.as_str()).collect();
    assert_eq!(categories, vec!["Food", "Freelance", "Utilities", "Salary"]);

    for tx in expenses.iter().chain(&food).chain(&window) {
        assert!(all.contains(tx));
    }
}

#[tokio::test]
async fn categories_are_distinct_per_user() {
    let (engine, _db) = engine_with_db().await;
    let alice = user(&engine, "alice@example.com").await;
    let bob = user(&engine, "bob@example.com").await;

    assert!(engine.list_user_categories(alice).await.unwrap().is_empty());

    for (kind, category) in [
        ("EXPENSE", "Food"),
        ("EXPENSE", "Food"),
        ("INCOME", "Salary"),
        ("EXPENSE", "Education"),
    ] {
        engine
            .create_transaction(new_tx(kind, category, "1", "2024-05-05"), alice)
            .await
            .unwrap();
    }
    engine
        .create_transaction(new_tx("EXPENSE", "Healthcare", "1", "2024-05-05"), bob)
        .await
        .unwrap();

    let categories: Vec<String> = engine
        .list_user_categories(alice)
        .await
        .unwrap()
        .into_iter()
        .collect();
    assert_eq!(categories, vec!["Education", "Food", "Salary"]);

    let bob_categories = engine.list_user_categories(bob).await.unwrap();
    assert_eq!(bob_categories.len(), 1);
    assert!(bob_categories.contains("Healthcare"));
}

#[tokio::test]
async fn register_then_login() {
    let (engine, _db) = engine_with_db().await;
    let registered = engine
        .register_user(registration("Ada@Example.com"))
        .await
        .unwrap();
    assert_eq!(registered.email, "ada@example.com");

    let logged_in = engine
        .authenticate(
            Credentials::parse(&LoginInput {
                email: "ada@example.com".to_string(),
                password: "secret1".to_string(),
            })
            .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(logged_in, registered);
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (engine, _db) = engine_with_db().await;
    user(&engine, "ada@example.com").await;

    let err = engine
        .register_user(registration("ADA@example.com"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::ExistingKey("Email already registered".to_string())
    );
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let (engine, _db) = engine_with_db().await;
    user(&engine, "ada@example.com").await;

    for (email, password) in [("ada@example.com", "wrong-pw"), ("nobody@example.com", "secret1")] {
        let err = engine
            .authenticate(
                Credentials::parse(&LoginInput {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .unwrap(),
            )
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::InvalidCredentials);
    }
}

#[tokio::test(flavor = "current_thread")]
async fn logins_run_concurrently_on_a_single_worker() {
    let (engine, _db) = engine_with_db().await;
    let ada = engine
        .register_user(registration("ada@example.com"))
        .await
        .unwrap();
    let credentials = || {
        Credentials::parse(&LoginInput {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .unwrap()
    };

    let (first, second, third) = tokio::join!(
        engine.authenticate(credentials()),
        engine.authenticate(credentials()),
        engine.authenticate(credentials()),
    );
    for user in [first, second, third] {
        assert_eq!(user.unwrap(), ada);
    }
}
