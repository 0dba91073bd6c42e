use crate::silent_logs;
use flame::{Connection, Driver, Parameters, QueryBuilder, WhereClause};
use std::sync::{LazyLock, Mutex};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn transactions<D: Driver>(connection: &mut Connection<D>) {
    let _lock = MUTEX.lock();

    // Setup
    connection
        .query("DROP TABLE IF EXISTS account", &Parameters::new())
        .expect("Failed to drop the account table");
    connection
        .query(
            "CREATE TABLE account (owner TEXT PRIMARY KEY, balance INTEGER NOT NULL)",
            &Parameters::new(),
        )
        .expect("Failed to create the account table");
    let balance = |connection: &mut Connection<D>, owner: &str| {
        connection
            .select(["balance"])
            .from("account")
            .where_eq("owner", owner)
            .execute(connection)
            .expect("Failed to read the balance")
            .first()
            .map(|row| row.get::<i64>("balance").expect("The balance is an integer"))
    };

    // Commit
    connection
        .begin_transaction()
        .expect("Could not begin a transaction");
    assert!(connection.in_transaction());
    connection
        .insert("account", ["owner", "balance"])
        .values([flame::Value::from("alice"), 100.into()])
        .values([flame::Value::from("bob"), 50.into()])
        .execute(connection)
        .expect("Failed to open the accounts");
    connection.commit().expect("Failed to commit");
    assert!(!connection.in_transaction());
    assert_eq!(balance(connection, "alice"), Some(100));

    // Rollback
    connection
        .begin_transaction()
        .expect("Could not begin a transaction")
        .update("account", [("balance", 0)])
        .where_eq("owner", "alice")
        .execute(connection)
        .expect("Failed to empty the account");
    assert_eq!(balance(connection, "alice"), Some(0));
    connection.rollback().expect("Failed to roll back");
    assert_eq!(balance(connection, "alice"), Some(100));

    // Misuse is reported and does not change the state
    silent_logs! {
        assert!(connection.commit().is_err());
        assert!(connection.rollback().is_err());
        connection
            .begin_transaction()
            .expect("Could not begin a transaction");
        assert!(connection.begin_transaction().is_err());
        assert!(connection.in_transaction());
    }
    connection
        .update("account", [("balance", 75)])
        .where_eq("owner", "bob")
        .execute(connection)
        .expect("Failed to update inside the transaction");
    connection
        .commit()
        .expect("Failed to commit")
        .begin_transaction()
        .expect("Could not begin a transaction")
        .rollback()
        .expect("Failed to roll back an empty transaction");
    assert_eq!(balance(connection, "bob"), Some(75));
}
