use crate::{SqliteConnection, SqliteGrammar, SqlitePrepared};
use flame_core::Driver;

#[derive(Default, Debug, Clone, Copy)]
pub struct SqliteDriver {}

impl SqliteDriver {
    pub const fn new() -> Self {
        Self {}
    }
}

impl Driver for SqliteDriver {
    type Connection = SqliteConnection;
    type Prepared = SqlitePrepared;
    type Grammar = SqliteGrammar;

    const NAME: &'static str = "sqlite";

    fn grammar(&self) -> SqliteGrammar {
        SqliteGrammar {}
    }
}
