use crate::{Grammar, Prepared, QueryResult, Result};

/// Database backend: the types it works with and the grammar of its dialect.
pub trait Driver: Default {
    type Connection: DriverConnection<Driver = Self>;
    type Prepared: Prepared;
    type Grammar: Grammar + 'static;

    /// Scheme of the connection URLs accepted (`sqlite` for `sqlite://...`).
    const NAME: &'static str;

    fn grammar(&self) -> Self::Grammar;
}

/// Raw connection of a backend, the primitives the [`Connection`](crate::Connection)
/// facade is built on.
///
/// It only understands positional SQL: named placeholders are compiled away
/// before `prepare` is called.
pub trait DriverConnection {
    type Driver: Driver;

    fn driver(&self) -> &Self::Driver;

    /// Open a connection to `url`.
    fn connect(url: &str) -> Result<Self>
    where
        Self: Sized;

    /// Prepare a single statement written with positional `?` markers.
    fn prepare(&mut self, sql: &str) -> Result<<Self::Driver as Driver>::Prepared>;

    /// Prepare and execute a statement without parameters.
    fn execute_unprepared(&mut self, sql: &str) -> Result<QueryResult> {
        self.prepare(sql)?.execute()
    }

    fn begin_transaction(&mut self) -> Result<()> {
        let mut sql = String::new();
        self.driver().grammar().write_transaction_begin(&mut sql);
        self.execute_unprepared(&sql).map(|_| ())
    }

    fn commit(&mut self) -> Result<()> {
        let mut sql = String::new();
        self.driver().grammar().write_transaction_commit(&mut sql);
        self.execute_unprepared(&sql).map(|_| ())
    }

    fn rollback(&mut self) -> Result<()> {
        let mut sql = String::new();
        self.driver().grammar().write_transaction_rollback(&mut sql);
        self.execute_unprepared(&sql).map(|_| ())
    }
}
