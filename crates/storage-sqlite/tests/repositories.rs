use std::sync::Arc;

use tempfile::TempDir;
use wheeltrack_core::portfolios::{NewPortfolio, PortfolioRepositoryTrait};
use wheeltrack_core::trades::{
    NewTrade, NewTradeAdjustment, OptionType, TradeRepositoryTrait,
};
use wheeltrack_core::users::{NewUser, UserRepositoryTrait};
use wheeltrack_storage_sqlite::db::{create_pool, init, run_migrations, spawn_writer, DbPool};
use wheeltrack_storage_sqlite::portfolios::PortfolioRepository;
use wheeltrack_storage_sqlite::trades::TradeRepository;
use wheeltrack_storage_sqlite::users::UserRepository;

struct TestDb {
    pool: Arc<DbPool>,
    writer: wheeltrack_storage_sqlite::db::WriteHandle,
    _tmp: TempDir,
}

async fn setup() -> TestDb {
    let tmp = TempDir::new().unwrap();
    let db_path = init(&tmp.path().join("test.db").to_string_lossy()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    TestDb {
        pool,
        writer,
        _tmp: tmp,
    }
}

fn new_user(email: &str, username: &str) -> NewUser {
    NewUser {
        id: None,
        email: email.to_string(),
        username: username.to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        password_hash: "$argon2id$test".to_string(),
        is_admin: false,
    }
}

fn new_trade(contracts: i32, price: f64) -> NewTrade {
    NewTrade {
        id: None,
        ticker: "tsla".to_string(),
        strike_price: 200.0,
        expiration_date: chrono::NaiveDate::from_ymd_opt(2026, 12, 18).unwrap(),
        option_type: OptionType::Put,
        contracts,
        contract_price: price,
        notes: None,
    }
}

#[tokio::test]
async fn duplicate_email_insert_surfaces_unique_violation() {
    let db = setup().await;
    let repo = UserRepository::new(db.pool.clone(), db.writer.clone());

    repo.insert(new_user("dup@example.com", "one")).await.unwrap();
    let err = repo
        .insert(new_user("dup@example.com", "two"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        wheeltrack_core::Error::Database(
            wheeltrack_core::errors::DatabaseError::UniqueViolation(_)
        )
    ));

    // Lookup works by email or username.
    let by_email = repo.find_by_identifier("dup@example.com").unwrap();
    let by_username = repo.find_by_identifier("one").unwrap();
    assert_eq!(by_email.unwrap().id, by_username.unwrap().id);
    assert!(repo.find_by_identifier("absent").unwrap().is_none());
}

#[tokio::test]
async fn close_credits_portfolio_capital_atomically() {
    let db = setup().await;
    let users = UserRepository::new(db.pool.clone(), db.writer.clone());
    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());
    let trades = TradeRepository::new(db.pool.clone(), db.writer.clone());

    let user = users.insert(new_user("w@example.com", "wheeler")).await.unwrap();
    let portfolio = portfolios
        .insert(
            user.id.clone(),
            NewPortfolio {
                id: None,
                name: "Wheel".to_string(),
                starting_capital: 10_000.0,
            },
        )
        .await
        .unwrap();
    assert_eq!(portfolio.current_capital, 10_000.0);

    let trade = trades
        .insert(portfolio.id.clone(), new_trade(10, 2.0))
        .await
        .unwrap();
    assert_eq!(trade.ticker, "TSLA");
    assert!(!trade.is_closed());

    let closed = trades
        .close(
            trade.id.clone(),
            250.0,
            chrono::Utc::now().naive_utc(),
        )
        .await
        .unwrap();
    assert!(closed.is_closed());
    assert_eq!(closed.premium_captured, Some(250.0));

    let reloaded = portfolios.get_by_id(&portfolio.id).unwrap();
    assert_eq!(reloaded.current_capital, 10_250.0);
    assert_eq!(reloaded.starting_capital, 10_000.0);

    // The closed-check lives in the write transaction itself, so a second
    // close is rejected even when callers race past any earlier check, and
    // capital is credited exactly once.
    let err = trades
        .close(trade.id.clone(), 99.0, chrono::Utc::now().naive_utc())
        .await
        .unwrap_err();
    assert!(matches!(err, wheeltrack_core::Error::ConstraintViolation(_)));
    let after = portfolios.get_by_id(&portfolio.id).unwrap();
    assert_eq!(after.current_capital, 10_250.0);
}

#[tokio::test]
async fn adjustment_against_missing_trade_is_not_found() {
    let db = setup().await;
    let trades = TradeRepository::new(db.pool.clone(), db.writer.clone());

    let err = trades
        .insert_adjustment(
            "missing".to_string(),
            NewTradeAdjustment {
                contracts: 1,
                price: 1.0,
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn deleting_a_portfolio_cascades_to_trades() {
    let db = setup().await;
    let users = UserRepository::new(db.pool.clone(), db.writer.clone());
    let portfolios = PortfolioRepository::new(db.pool.clone(), db.writer.clone());
    let trades = TradeRepository::new(db.pool.clone(), db.writer.clone());

    let user = users.insert(new_user("c@example.com", "cascade")).await.unwrap();
    let portfolio = portfolios
        .insert(
            user.id.clone(),
            NewPortfolio {
                id: None,
                name: "Short lived".to_string(),
                starting_capital: 100.0,
            },
        )
        .await
        .unwrap();
    let trade = trades
        .insert(portfolio.id.clone(), new_trade(1, 1.0))
        .await
        .unwrap();

    let portfolio_id = portfolio.id.clone();
    db.writer
        .exec(move |conn: &mut diesel::SqliteConnection| {
            use diesel::prelude::*;
            use wheeltrack_storage_sqlite::schema::portfolios;
            diesel::delete(portfolios::table.find(portfolio_id.as_str()))
                .execute(conn)
                .map_err(wheeltrack_storage_sqlite::StorageError::from)?;
            Ok(())
        })
        .await
        .unwrap();

    let err = trades.get_by_id(&trade.id).unwrap_err();
    assert!(err.is_not_found());
}
