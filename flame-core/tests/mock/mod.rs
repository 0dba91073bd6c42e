#![allow(dead_code)]

use flame_core::{
    Driver, DriverConnection, Error, GenericGrammar, ParamType, Prepared, QueryResult, Result,
    RowLabeled, Value,
};
use std::{
    cell::RefCell,
    fmt::{self, Display},
    rc::Rc,
    sync::Arc,
};

/// Every call received by the mock driver, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Prepare(String),
    ClearBindings,
    Bind(u64, Value, ParamType),
    Execute,
    Begin,
    Commit,
    Rollback,
}

pub type Calls = Rc<RefCell<Vec<Call>>>;

#[derive(Default, Debug)]
pub struct MockDriver;

impl Driver for MockDriver {
    type Connection = MockConnection;
    type Prepared = MockPrepared;
    type Grammar = GenericGrammar;

    const NAME: &'static str = "mock";

    fn grammar(&self) -> GenericGrammar {
        GenericGrammar::new()
    }
}

pub struct MockConnection {
    pub calls: Calls,
}

impl DriverConnection for MockConnection {
    type Driver = MockDriver;

    fn driver(&self) -> &MockDriver {
        &MockDriver
    }

    fn connect(_url: &str) -> Result<Self> {
        Ok(Self {
            calls: Default::default(),
        })
    }

    /// SQL starting with `INVALID` is rejected like a syntax error.
    fn prepare(&mut self, sql: &str) -> Result<MockPrepared> {
        if sql.starts_with("INVALID") {
            return Err(Error::msg("near \"INVALID\": syntax error"));
        }
        self.calls.borrow_mut().push(Call::Prepare(sql.into()));
        Ok(MockPrepared {
            calls: self.calls.clone(),
            bound: Vec::new(),
        })
    }

    fn begin_transaction(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Begin);
        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Commit);
        Ok(())
    }

    fn rollback(&mut self) -> Result<()> {
        self.calls.borrow_mut().push(Call::Rollback);
        Ok(())
    }
}

pub struct MockPrepared {
    calls: Calls,
    bound: Vec<Value>,
}

impl Prepared for MockPrepared {
    fn bind_index(&mut self, value: Value, param_type: ParamType, index: u64) -> Result<&mut Self> {
        self.calls
            .borrow_mut()
            .push(Call::Bind(index, value.clone(), param_type));
        let index = index as usize - 1;
        if self.bound.len() <= index {
            self.bound.resize(index + 1, Value::Null);
        }
        self.bound[index] = value;
        Ok(self)
    }

    fn clear_bindings(&mut self) -> Result<&mut Self> {
        self.calls.borrow_mut().push(Call::ClearBindings);
        self.bound.clear();
        Ok(self)
    }

    /// Returns one row holding the bound values, labeled `1`, `2`, ...
    fn execute(&mut self) -> Result<QueryResult> {
        self.calls.borrow_mut().push(Call::Execute);
        let labels: Arc<[String]> = (1..=self.bound.len()).map(|i| i.to_string()).collect();
        Ok(QueryResult {
            rows: vec![RowLabeled::new(labels, self.bound.clone().into())],
            rows_affected: 1,
            last_affected_id: None,
        })
    }
}

impl Display for MockPrepared {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MockPrepared({} bound)", self.bound.len())
    }
}

pub fn connect() -> (flame_core::Connection<MockDriver>, Calls) {
    let _ = env_logger::builder().is_test(true).try_init();
    let connection = flame_core::Connection::<MockDriver>::connect("mock://")
        .expect("The mock connection never fails");
    let calls = connection.driver_connection().calls.clone();
    (connection, calls)
}
