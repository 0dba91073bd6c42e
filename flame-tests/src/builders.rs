use flame::{Connection, Driver, Order, Parameters, QueryBuilder, Value, WhereClause};
use std::sync::{LazyLock, Mutex};

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn builders<D: Driver>(connection: &mut Connection<D>) {
    let _lock = MUTEX.lock();

    // Setup
    for sql in [
        "DROP TABLE IF EXISTS book",
        "DROP TABLE IF EXISTS author",
        "CREATE TABLE author (id INTEGER PRIMARY KEY, name TEXT NOT NULL, country TEXT)",
        "CREATE TABLE book (id INTEGER PRIMARY KEY, title TEXT NOT NULL, author_id INTEGER, year INTEGER, copies INTEGER NOT NULL DEFAULT 0)",
    ] {
        connection
            .query(sql, &Parameters::new())
            .expect("Failed to set up the book tables");
    }

    // Insert
    let result = connection
        .insert("author", ["id", "name", "country"])
        .values([Value::Int32(1), "Frank Herbert".into(), "US".into()])
        .values([Value::Int32(2), "Ursula K. Le Guin".into(), "US".into()])
        .values([Value::Int32(3), "Italo Calvino".into()])
        .execute(connection)
        .expect("Failed to insert the authors");
    assert_eq!(result.rows_affected, 3);
    let result = connection
        .insert("book", ["title", "author_id", "year"])
        .values([Value::from("Dune"), 1.into(), 1965.into()])
        .values([Value::from("Children of Dune"), 1.into(), 1976.into()])
        .values([Value::from("The Left Hand of Darkness"), 2.into(), 1969.into()])
        .values([Value::from("The Dispossessed"), 2.into(), 1974.into()])
        .values([Value::from("Invisible Cities"), 3.into(), 1972.into()])
        .execute(connection)
        .expect("Failed to insert the books");
    assert_eq!(result.rows_affected, 5);
    let result = connection
        .insert("book", Vec::<String>::new())
        .set("title", "Untitled")
        .execute(connection)
        .expect("Failed to insert a book with a single column");
    assert_eq!(result.rows_affected, 1);
    let untitled = result.last_affected_id;
    assert!(untitled.is_some());

    // Select
    let result = connection
        .select(["b.title", "a.name"])
        .from_as("book", "b")
        .join(("author", "a"), "a.id", "b.author_id")
        .where_ge("b.year", 1969)
        .where_in("a.country", ["US"])
        .order_by("b.year", Order::DESC)
        .execute(connection)
        .expect("Failed to select the books");
    let titles: Vec<String> = result
        .rows()
        .iter()
        .map(|row| row.get("title").expect("Missing title"))
        .collect();
    assert_eq!(
        titles,
        ["Children of Dune", "The Dispossessed", "The Left Hand of Darkness"]
    );

    let result = connection
        .select(["a.name"])
        .column_raw("COUNT(b.id)", Some("books"))
        .from_as("author", "a")
        .left_join(("book", "b"), "b.author_id", "a.id")
        .group_by(["a.name"])
        .having_gt("books", 1)
        .order_by("a.name", Order::ASC)
        .execute(connection)
        .expect("Failed to count the books");
    let counts: Vec<(String, i64)> = result
        .rows()
        .iter()
        .map(|row| (row.get("name").unwrap(), row.get("books").unwrap()))
        .collect();
    assert_eq!(
        counts,
        [("Frank Herbert".into(), 2), ("Ursula K. Le Guin".into(), 2)]
    );

    let result = connection
        .select(["title"])
        .from("book")
        .where_not_null("year")
        .where_group(|filter| filter.lt("year", 1970).or(flame::Predicate::Raw("title LIKE :prefix".into())))
        .bind("prefix", "Invisible%")
        .order_by("year", Order::ASC)
        .limit(2)
        .offset(1)
        .execute(connection)
        .expect("Failed to select a page of books");
    let titles: Vec<String> = result
        .rows()
        .iter()
        .map(|row| row.get("title").unwrap())
        .collect();
    assert_eq!(titles, ["The Left Hand of Darkness", "Invisible Cities"]);

    let result = connection
        .select(["title"])
        .from("book")
        .order_by("id", Order::ASC)
        .offset(5)
        .execute(connection)
        .expect("Failed to select with only an offset");
    assert_eq!(result.rows().len(), 1);
    assert_eq!(result.rows()[0].get::<String>("title").unwrap(), "Untitled");

    let result = connection
        .select(["id"])
        .from("book")
        .where_in("id", Vec::<i32>::new())
        .execute(connection)
        .expect("Failed to select with an empty IN list");
    assert!(result.rows().is_empty());

    // Update
    let result = connection
        .update("book", [("copies", 10)])
        .set_raw("year", "year + 0")
        .where_eq("author_id", 1)
        .execute(connection)
        .expect("Failed to update the books");
    assert_eq!(result.rows_affected, 2);
    let result = connection
        .update("book", [("author_id", Value::Null)])
        .set("year", 2000)
        .where_eq("id", untitled.unwrap_or_default())
        .execute(connection)
        .expect("Failed to update the untitled book");
    assert_eq!(result.rows_affected, 1);
    let result = connection
        .select::<&str>([])
        .column_raw("SUM(copies)", Some("total"))
        .from("book")
        .where_between("year", 1960, 1980)
        .execute(connection)
        .expect("Failed to sum the copies");
    assert_eq!(result.rows()[0].get::<i64>("total").unwrap(), 20);
    let result = connection
        .select(["title"])
        .from("book")
        .where_null("author_id")
        .execute(connection)
        .expect("Failed to select the book without author");
    assert_eq!(
        result.rows()[0].get_column("title"),
        Some(&Value::Varchar("Untitled".into()))
    );

    // Quoting
    let sql = format!(
        "SELECT COUNT(*) AS {} FROM {}",
        connection.quote_id("count"),
        connection.quote_id("book")
    );
    let result = connection
        .query(&sql, &Parameters::new())
        .expect("Failed to count with quoted identifiers");
    assert_eq!(result.rows()[0].get::<i64>("count").unwrap(), 6);
}
