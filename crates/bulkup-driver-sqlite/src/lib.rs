mod value;
pub(crate) use value::Value;

use bulkup_core::{
    async_trait,
    driver::{operation::Sql, Capability, Driver, Operation, Response},
    stmt::{BulkUpdate, ValueRecord},
    Error, Result,
};
use bulkup_sql::{Serializer, Statement};
use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver with an arbitrary connection URL
    ///
    /// `sqlite::memory:` opens an in-memory database, `sqlite:<path>` opens
    /// (or creates) a database file.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else if url.path().is_empty() {
            Err(Error::invalid_connection_url(format!(
                "missing database path in connection URL; url={url_str}"
            )))
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn connect(&self) -> Result<Box<dyn bulkup_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            // Each connection gets its own fresh in-memory database.
            Sqlite::InMemory => Connection::in_memory()?,
        };
        tracing::debug!(url = %self.url(), "opened sqlite connection");
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection = RusqliteConnection::open_in_memory().map_err(Error::driver)?;
        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = RusqliteConnection::open(path).map_err(Error::driver)?;
        Ok(Self { connection })
    }

    fn bulk_update(&mut self, update: BulkUpdate) -> Result<Response> {
        let serializer = Serializer::sqlite();
        let stmt = Statement::from(update);
        serializer.check(&stmt)?;

        let mut params: Vec<bulkup_core::stmt::Value> = Vec::new();
        let sql = serializer.serialize(&stmt, &mut params);

        tracing::trace!(%sql, params = params.len(), "executing bulk update");

        let count = self.execute(&sql, params)?;
        Ok(Response::count(count))
    }

    fn execute(&mut self, sql: &str, params: Vec<bulkup_core::stmt::Value>) -> Result<u64> {
        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut stmt = self.connection.prepare_cached(sql).map_err(Error::driver)?;
        let count = stmt
            .execute(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        Ok(count as u64)
    }

    fn query(&mut self, op: Sql) -> Result<Response> {
        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();

        let mut stmt = self
            .connection
            .prepare_cached(&op.sql)
            .map_err(Error::driver)?;

        let names = stmt
            .column_names()
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();

        let mut rows = stmt
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver)?;

        let mut ret = vec![];

        while let Some(row) = rows.next().map_err(Error::driver)? {
            let mut record = ValueRecord::new();

            for (index, name) in names.iter().enumerate() {
                record.insert(name.as_str(), Value::from_sql(row, index, name)?.into_inner());
            }

            ret.push(record);
        }

        Ok(Response::values(ret))
    }
}

#[async_trait]
impl bulkup_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::BulkUpdate(update) => self.bulk_update(update),
            Operation::ExecSql(op) => {
                tracing::trace!(sql = %op.sql, params = op.params.len(), "executing SQL");
                let count = self.execute(&op.sql, op.params)?;
                Ok(Response::count(count))
            }
            Operation::QuerySql(op) => {
                tracing::trace!(sql = %op.sql, params = op.params.len(), "running query");
                self.query(op)
            }
        }
    }
}
