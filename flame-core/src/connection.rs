use crate::{
    Column, Driver, DriverConnection, Error, Grammar, InsertQuery, Parameters, QueryBuilder,
    QueryResult, Result, SelectQuery, Statement, UpdateQuery, Value, compile, truncate_long,
};
use std::sync::Arc;

/// Connection facade: named placeholders, transactions and query builders on
/// top of a driver connection.
///
/// ```rust,ignore
/// let mut connection = Connection::<SqliteDriver>::connect("sqlite://:memory:")?;
/// let result = connection.query(
///     "SELECT name FROM users WHERE age > i:age AND name LIKE :pattern",
///     &params! { "age" => 18, "pattern" => "A%" },
/// )?;
/// ```
pub struct Connection<D: Driver> {
    connection: D::Connection,
    grammar: Arc<dyn Grammar>,
    transaction: bool,
}

impl<D: Driver> Connection<D> {
    /// Wrap an open driver connection, using the grammar of its driver.
    pub fn new(connection: D::Connection) -> Self {
        let grammar = Arc::new(connection.driver().grammar());
        Self::with_grammar(connection, grammar)
    }

    /// Wrap an open driver connection, rendering SQL with `grammar`.
    pub fn with_grammar(connection: D::Connection, grammar: Arc<dyn Grammar>) -> Self {
        Self {
            connection,
            grammar,
            transaction: false,
        }
    }

    /// Open a connection to `url` (`sqlite://path?mode=rwc`).
    pub fn connect(url: &str) -> Result<Self> {
        let prefix = format!("{}://", D::NAME);
        if !url.starts_with(&prefix) {
            let error = Error::msg(format!(
                "Expected the connection URL to start with `{}`, found `{}`",
                prefix, url
            ));
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(Self::new(D::Connection::connect(url)?))
    }

    pub fn grammar(&self) -> &Arc<dyn Grammar> {
        &self.grammar
    }

    pub fn driver_connection(&self) -> &D::Connection {
        &self.connection
    }

    pub fn driver_connection_mut(&mut self) -> &mut D::Connection {
        &mut self.connection
    }

    pub fn into_driver_connection(self) -> D::Connection {
        self.connection
    }

    pub fn in_transaction(&self) -> bool {
        self.transaction
    }

    /// Compile the named placeholders of `sql` and prepare it on the driver.
    ///
    /// The returned statement owns the binding plan, preparing another
    /// statement afterwards does not change it.
    pub fn prepare(&mut self, sql: &str) -> Result<Statement<D::Prepared>> {
        let compiled = compile(sql);
        log::debug!("Preparing query:\n{}", truncate_long!(compiled.sql));
        let prepared = self.connection.prepare(&compiled.sql)?;
        Ok(Statement::new(prepared, compiled, self.grammar.clone()))
    }

    /// Prepare `sql` and execute it with `parameters`.
    pub fn query(&mut self, sql: &str, parameters: &Parameters) -> Result<QueryResult> {
        self.prepare(sql)?.execute(parameters)
    }

    /// Render and run a query builder.
    pub fn execute(&mut self, builder: impl QueryBuilder) -> Result<QueryResult> {
        let (sql, parameters) = builder.build();
        self.query(&sql, &parameters)
    }

    /// Identifier quoted by the grammar of this connection.
    pub fn quote_id(&self, id: &str) -> String {
        self.grammar.quote_identifier(id)
    }

    pub fn begin_transaction(&mut self) -> Result<&mut Self> {
        if self.transaction {
            let error = Error::msg("There is already an active transaction");
            log::error!("{:#}", error);
            return Err(error);
        }
        self.connection.begin_transaction()?;
        self.transaction = true;
        Ok(self)
    }

    pub fn commit(&mut self) -> Result<&mut Self> {
        if !self.transaction {
            let error = Error::msg("There is no active transaction to commit");
            log::error!("{:#}", error);
            return Err(error);
        }
        self.connection.commit()?;
        self.transaction = false;
        Ok(self)
    }

    pub fn rollback(&mut self) -> Result<&mut Self> {
        if !self.transaction {
            let error = Error::msg("There is no active transaction to roll back");
            log::error!("{:#}", error);
            return Err(error);
        }
        self.connection.rollback()?;
        self.transaction = false;
        Ok(self)
    }

    /// SELECT builder, no columns selects `*`.
    pub fn select<C: Into<Column>>(&self, columns: impl IntoIterator<Item = C>) -> SelectQuery {
        SelectQuery::new(self.grammar.clone(), columns)
    }

    pub fn insert<S: Into<String>>(
        &self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = S>,
    ) -> InsertQuery {
        InsertQuery::new(self.grammar.clone(), table, columns)
    }

    /// UPDATE builder starting with the `column = value` assignments in `columns`.
    pub fn update<K: Into<String>, V: Into<Value>>(
        &self,
        table: impl Into<String>,
        columns: impl IntoIterator<Item = (K, V)>,
    ) -> UpdateQuery {
        UpdateQuery::new(self.grammar.clone(), table, columns)
    }
}
