use flame::{AsValue, Connection, Driver, Parameters, QueryBuilder, Value, WhereClause};
use rust_decimal::Decimal;
use std::{
    str::FromStr,
    sync::{LazyLock, Mutex},
};
use time::{Date, Month, PrimitiveDateTime, Time};
use uuid::Uuid;

static MUTEX: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub fn types<D: Driver>(connection: &mut Connection<D>) {
    let _lock = MUTEX.lock();

    // Setup
    connection
        .query("DROP TABLE IF EXISTS typed", &Parameters::new())
        .expect("Failed to drop the typed table");
    connection
        .query(
            "CREATE TABLE typed (id INTEGER PRIMARY KEY, flag INTEGER, amount TEXT, code TEXT, day TEXT, moment TEXT, at TEXT, payload BLOB, note TEXT)",
            &Parameters::new(),
        )
        .expect("Failed to create the typed table");

    let amount = Decimal::from_str("12.50").unwrap();
    let code = Uuid::new_v4();
    let day = Date::from_calendar_date(2025, Month::January, 22).unwrap();
    let moment = Time::from_hms(13, 22, 5).unwrap();
    let at = PrimitiveDateTime::new(day, Time::from_hms_milli(8, 15, 0, 250).unwrap());
    let result = connection
        .insert("typed", ["flag", "amount", "code", "day", "moment", "at", "payload", "note"])
        .values([
            true.as_value(),
            amount.as_value(),
            code.as_value(),
            day.as_value(),
            moment.as_value(),
            at.as_value(),
            vec![0u8, 159, 146, 150].as_value(),
            Option::<String>::None.as_value(),
        ])
        .values([
            Value::Boolean(false),
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Varchar("second".into()),
        ])
        .execute(connection)
        .expect("Failed to insert the typed rows");
    assert_eq!(result.rows_affected, 2);

    let result = connection
        .select::<&str>([])
        .from("typed")
        .where_eq("flag", true)
        .execute(connection)
        .expect("Failed to select the typed row");
    assert_eq!(result.rows().len(), 1);
    let row = &result.rows()[0];
    assert_eq!(row.get::<bool>("flag").unwrap(), true);
    assert_eq!(row.get::<Decimal>("amount").unwrap(), amount);
    assert_eq!(row.get::<Uuid>("code").unwrap(), code);
    assert_eq!(row.get::<Date>("day").unwrap(), day);
    assert_eq!(row.get::<Time>("moment").unwrap(), moment);
    assert_eq!(row.get::<PrimitiveDateTime>("at").unwrap(), at);
    assert_eq!(
        row.get::<Vec<u8>>("payload").unwrap(),
        [0u8, 159, 146, 150]
    );
    assert_eq!(row.get::<Option<String>>("note").unwrap(), None);

    let result = connection
        .select(["note"])
        .from("typed")
        .where_null("amount")
        .execute(connection)
        .expect("Failed to select the second row");
    assert_eq!(
        result.rows()[0].get::<Option<String>>("note").unwrap(),
        Some("second".into())
    );
}
