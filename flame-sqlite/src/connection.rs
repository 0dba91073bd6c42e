use crate::{CBox, SqliteDriver, SqlitePrepared, error_message_from_ptr};
use flame_core::{Driver, DriverConnection, Error, ErrorContext, Result, as_c_string, truncate_long};
use libsqlite3_sys::{
    SQLITE_OK, SQLITE_OPEN_CREATE, SQLITE_OPEN_READWRITE, SQLITE_OPEN_URI, sqlite3,
    sqlite3_close, sqlite3_errmsg, sqlite3_finalize, sqlite3_open_v2, sqlite3_prepare_v2,
};
use std::{
    ffi::{CStr, CString},
    ptr,
};

/// Open SQLite database handle.
///
/// The URL is `sqlite://` followed by a path or by `:memory:`. A path with a
/// query string (`sqlite://data.db?mode=ro`) is opened as a SQLite URI.
pub struct SqliteConnection {
    pub(crate) connection: CBox<*mut sqlite3>,
}

impl SqliteConnection {
    fn location(url: &str) -> Result<CString> {
        let prefix = format!("{}://", SqliteDriver::NAME);
        let Some(location) = url.strip_prefix(&prefix) else {
            return Err(Error::msg(format!(
                "Expected sqlite connection url to start with `{}`",
                &prefix
            )));
        };
        let location = if location.contains('?') && !location.starts_with("file:") {
            format!("file:{}", location)
        } else {
            location.to_string()
        };
        CString::new(location)
            .with_context(|| format!("Error while decoding connection URL: `{}`", url))
    }
}

impl DriverConnection for SqliteConnection {
    type Driver = SqliteDriver;

    fn driver(&self) -> &SqliteDriver {
        &SqliteDriver {}
    }

    fn connect(url: &str) -> Result<SqliteConnection> {
        let location = Self::location(url).inspect_err(|e| log::error!("{:#}", e))?;
        let mut connection = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_close(p);
        });
        unsafe {
            let rc = sqlite3_open_v2(
                location.as_ptr(),
                &mut *connection,
                SQLITE_OPEN_URI | SQLITE_OPEN_READWRITE | SQLITE_OPEN_CREATE,
                ptr::null(),
            );
            if rc != SQLITE_OK {
                let error =
                    Error::msg(error_message_from_ptr(&sqlite3_errmsg(*connection)).to_string())
                        .context(format!("Could not open the database `{}`", url));
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        log::debug!("Connected to `{}`", url);
        Ok(Self { connection })
    }

    fn prepare(&mut self, sql: &str) -> Result<SqlitePrepared> {
        let context = || format!("While preparing the query:\n{}", truncate_long!(sql));
        let query = as_c_string(sql)
            .with_context(context)
            .inspect_err(|e| log::error!("{:#}", e))?;
        let mut statement = CBox::new(ptr::null_mut(), |p| unsafe {
            sqlite3_finalize(p);
        });
        unsafe {
            let mut tail = ptr::null();
            let rc = sqlite3_prepare_v2(
                *self.connection,
                query.as_ptr(),
                -1,
                &mut *statement,
                &mut tail,
            );
            if rc != SQLITE_OK {
                let error = Error::msg(
                    error_message_from_ptr(&sqlite3_errmsg(*self.connection)).to_string(),
                )
                .context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
            if !tail.is_null() && !CStr::from_ptr(tail).to_bytes().trim_ascii().is_empty() {
                let error =
                    Error::msg("Cannot prepare more than one statement at a time").context(context());
                log::error!("{:#}", error);
                return Err(error);
            }
        }
        if statement.is_null() {
            let error = Error::msg("The query does not contain any statement").context(context());
            log::error!("{:#}", error);
            return Err(error);
        }
        Ok(SqlitePrepared::new(statement))
    }
}
