use flame::{Connection, Driver, Parameters, Value, params};
use std::sync::{LazyLock, Mutex};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn placeholders<D: Driver>(connection: &mut Connection<D>) {
    let _lock = MUTEX.lock();

    // Setup
    connection
        .query("DROP TABLE IF EXISTS trade", &Parameters::new())
        .expect("Failed to drop the trade table");
    connection
        .query(
            "CREATE TABLE trade (id INTEGER PRIMARY KEY, symbol TEXT NOT NULL, price REAL, quantity INTEGER, traded TEXT)",
            &Parameters::new(),
        )
        .expect("Failed to create the trade table");

    // One prepared statement, executed many times
    let mut insert = connection
        .prepare(
            "INSERT INTO trade (symbol, price, quantity, traded) VALUES (:symbol, f:price, i:quantity, d:traded)",
        )
        .expect("Failed to prepare the insert");
    assert_eq!(insert.placeholders(), ["symbol", "price", "quantity", "traded"]);
    for (symbol, price, quantity, traded) in [
        ("AAPL", Value::Float64(190.5), 10, "2025-01-02 09:30:00"),
        ("MSFT", Value::Int32(410), 5, "2025-01-02T10:00:00"),
        ("NVDA", Value::Varchar("135.25".into()), 20, "2025-01-03 15:59:59"),
        ("AAPL", Value::Null, 7, "2025-01-03"),
    ] {
        let result = insert
            .execute(&params! {
                "symbol" => symbol,
                "price" => price,
                "quantity" => quantity,
                "traded" => traded,
            })
            .expect("Failed to insert a trade");
        assert_eq!(result.rows_affected, 1);
    }
    drop(insert);

    // Same name in several places, prefix of the first occurrence
    let result = connection
        .query(
            "SELECT symbol, quantity FROM trade WHERE symbol = :symbol OR (quantity > i:min AND symbol <> :symbol) ORDER BY id",
            &params! { "symbol" => "AAPL", "min" => "15", "unused" => true },
        )
        .expect("Failed to query the trades");
    let rows: Vec<(String, i64)> = result
        .rows()
        .iter()
        .map(|row| {
            (
                row.get("symbol").expect("Missing symbol"),
                row.get("quantity").expect("Missing quantity"),
            )
        })
        .collect();
    assert_eq!(
        rows,
        [("AAPL".into(), 10), ("NVDA".into(), 20), ("AAPL".into(), 7)]
    );

    // Values bound with their native types
    let row = connection
        .query(
            "SELECT price, traded FROM trade WHERE symbol = :s ORDER BY id",
            &params! { "s" => "MSFT" },
        )
        .expect("Failed to query MSFT")
        .into_rows()
        .into_iter()
        .next()
        .expect("MSFT was inserted");
    assert_eq!(row.get::<f64>("price").unwrap(), 410.0);
    assert_eq!(
        row.get::<String>("traded").unwrap(),
        "2025-01-02 10:00:00"
    );
    let result = connection
        .query(
            "SELECT traded FROM trade WHERE price IS NULL",
            &Parameters::new(),
        )
        .expect("Failed to query the trade without price");
    assert_eq!(
        result.rows()[0].get_column("traded"),
        Some(&Value::Varchar("2025-01-03 00:00:00".into()))
    );

    // Double colon is left to the database
    let mut statement = connection
        .prepare("SELECT :a || '::' || :b AS joined")
        .expect("Failed to prepare the concatenation");
    assert_eq!(statement.sql(), "SELECT ? || '::' || ? AS joined");
    let result = statement
        .execute(&params! { "a" => "x", "b" => 1 })
        .expect("Failed to concatenate");
    assert_eq!(result.rows()[0].get::<String>("joined").unwrap(), "x::1");

    // Statements prepared later do not change earlier ones
    let mut first = connection
        .prepare("SELECT i:n + 1 AS next")
        .expect("Failed to prepare the first statement");
    let mut second = connection
        .prepare("SELECT :text AS text, i:n AS n")
        .expect("Failed to prepare the second statement");
    let next = first
        .execute(&params! { "n" => 41 })
        .expect("Failed to run the first statement");
    assert_eq!(next.rows()[0].get::<i64>("next").unwrap(), 42);
    let second = second
        .execute(&params! { "text" => "hi", "n" => 2 })
        .expect("Failed to run the second statement");
    assert_eq!(second.rows()[0].get::<String>("text").unwrap(), "hi");
    let next = first
        .execute(&params! { "n" => 1 })
        .expect("Failed to run the first statement again");
    assert_eq!(next.rows()[0].get::<i64>("next").unwrap(), 2);
}
