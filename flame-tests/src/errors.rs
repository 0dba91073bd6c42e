use crate::silent_logs;
use flame::{BindError, Connection, Driver, ParamType, Parameters, params};
use std::sync::{LazyLock, Mutex};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn errors<D: Driver>(connection: &mut Connection<D>) {
    let _lock = MUTEX.lock();

    // Setup
    connection
        .query("DROP TABLE IF EXISTS guarded", &Parameters::new())
        .expect("Failed to drop the guarded table");
    connection
        .query(
            "CREATE TABLE guarded (name TEXT, amount INTEGER)",
            &Parameters::new(),
        )
        .expect("Failed to create the guarded table");
    let count = |connection: &mut Connection<D>| {
        connection
            .query("SELECT COUNT(*) AS n FROM guarded", &Parameters::new())
            .expect("Failed to count the guarded rows")
            .rows()[0]
            .get::<i64>("n")
            .expect("The count is an integer")
    };

    // Missing parameter, nothing is inserted
    let mut insert = connection
        .prepare("INSERT INTO guarded (name, amount) VALUES (:name, i:amount)")
        .expect("Failed to prepare the insert");
    let error = insert
        .execute(&params! { "name" => "first" })
        .expect_err("The amount is missing");
    assert_eq!(
        error.downcast_ref::<BindError>(),
        Some(&BindError::MissingParameter {
            name: "amount".into(),
            position: 2,
        })
    );

    // Value that does not fit the type of the placeholder
    let error = insert
        .execute(&params! { "name" => "first", "amount" => "many" })
        .expect_err("The amount is not an integer");
    match error.downcast_ref::<BindError>() {
        Some(BindError::TypeCoercion {
            name,
            expected,
            found,
            ..
        }) => {
            assert_eq!(name, "amount");
            assert_eq!(*expected, ParamType::Int);
            assert_eq!(found, "VARCHAR");
        }
        other => panic!("Unexpected error {:?}", other),
    }
    drop(insert);
    assert_eq!(count(connection), 0);

    // The statement is still usable
    connection
        .query(
            "INSERT INTO guarded (name, amount) VALUES (:name, i:amount)",
            &params! { "name" => "first", "amount" => 1.0 },
        )
        .expect("Failed to insert after the errors");
    assert_eq!(count(connection), 1);

    // Errors of the database come back as they are
    silent_logs! {
        let error = connection
            .query("SELECT * FROM missing_table WHERE id = i:id", &params! { "id" => 1 })
            .expect_err("The table does not exist");
        assert!(error.downcast_ref::<BindError>().is_none());
        assert!(
            format!("{:#}", error).contains("missing_table"),
            "Unexpected error: {:#}",
            error
        );
    }
}
