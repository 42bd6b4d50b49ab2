mod value;
pub(crate) use value::Value;

use bulkup_core::{
    async_trait,
    driver::{operation::Sql, Capability, Driver, Operation, Response},
    stmt::{BulkUpdate, ValueRecord},
    Error, Result,
};
use bulkup_sql::{Serializer, Statement};
use postgres::{tls::MakeTlsConnect, types::ToSql, Socket};
use std::borrow::Cow;
use tokio_postgres::{Client, Config};
use url::Url;

#[derive(Debug)]
pub struct PostgreSQL {
    url: String,
    config: Config,
}

impl PostgreSQL {
    /// Create a PostgreSQL driver from a `postgresql://` connection URL.
    ///
    /// No connection is opened until [`Driver::connect`] is called.
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(|err| {
            Error::invalid_connection_url(format!("{err}; url={url_str}"))
        })?;

        if url.scheme() != "postgresql" {
            return Err(Error::invalid_connection_url(format!(
                "connection URL does not have a `postgresql` scheme; url={url_str}"
            )));
        }

        let host = url.host_str().ok_or_else(|| {
            Error::invalid_connection_url(format!("missing host in connection URL; url={url_str}"))
        })?;

        let dbname = url.path().trim_start_matches('/');
        if dbname.is_empty() {
            return Err(Error::invalid_connection_url(format!(
                "no database specified - missing path in connection URL; url={url_str}"
            )));
        }

        let mut config = Config::new();
        config.host(host);
        config.dbname(dbname);

        if let Some(port) = url.port() {
            config.port(port);
        }

        if !url.username().is_empty() {
            config.user(url.username());
        }

        if let Some(password) = url.password() {
            config.password(password);
        }

        Ok(Self {
            url: url_str,
            config,
        })
    }
}

#[async_trait]
impl Driver for PostgreSQL {
    fn url(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.url)
    }

    fn capability(&self) -> &'static Capability {
        &Capability::POSTGRESQL
    }

    async fn connect(&self) -> Result<Box<dyn bulkup_core::Connection>> {
        let connection =
            Connection::connect_with_config(self.config.clone(), tokio_postgres::NoTls).await?;
        tracing::debug!(
            host = ?self.config.get_hosts(),
            dbname = ?self.config.get_dbname(),
            "opened postgresql connection"
        );
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    client: Client,
}

impl Connection {
    /// Wraps an already established client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connects to a PostgreSQL database using a [`postgres::Config`].
    ///
    /// See [`postgres::Client::configure`] for more information.
    pub async fn connect_with_config<T>(config: Config, tls: T) -> Result<Self>
    where
        T: MakeTlsConnect<Socket> + 'static,
        T::Stream: Send,
    {
        let (client, connection) = config.connect(tls).await.map_err(Error::driver)?;

        tokio::spawn(async move {
            if let Err(e) = connection.await {
                tracing::error!(error = %e, "postgresql connection error");
            }
        });

        Ok(Self::new(client))
    }

    async fn bulk_update(&mut self, update: BulkUpdate) -> Result<Response> {
        let serializer = Serializer::postgresql();
        let stmt = Statement::from(update);
        serializer.check(&stmt)?;

        let mut params: Vec<bulkup_core::stmt::Value> = Vec::new();
        let sql = serializer.serialize(&stmt, &mut params);

        tracing::trace!(%sql, params = params.len(), "executing bulk update");

        let count = self.execute(&sql, params).await?;
        Ok(Response::count(count))
    }

    async fn execute(&mut self, sql: &str, params: Vec<bulkup_core::stmt::Value>) -> Result<u64> {
        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        self.client.execute(sql, &args).await.map_err(Error::driver)
    }

    async fn query(&mut self, op: Sql) -> Result<Response> {
        let params = op.params.into_iter().map(Value::from).collect::<Vec<_>>();
        let args = params
            .iter()
            .map(|param| param as &(dyn ToSql + Sync))
            .collect::<Vec<_>>();

        let rows = self
            .client
            .query(&op.sql, &args)
            .await
            .map_err(Error::driver)?;

        let mut ret = Vec::with_capacity(rows.len());

        for row in &rows {
            let mut record = ValueRecord::new();

            for (index, column) in row.columns().iter().enumerate() {
                record.insert(column.name(), Value::from_sql(row, index, column)?.into_inner());
            }

            ret.push(record);
        }

        Ok(Response::values(ret))
    }
}

impl From<Client> for Connection {
    fn from(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl bulkup_core::driver::Connection for Connection {
    fn capability(&self) -> &'static Capability {
        &Capability::POSTGRESQL
    }

    async fn exec(&mut self, op: Operation) -> Result<Response> {
        match op {
            Operation::BulkUpdate(update) => self.bulk_update(update).await,
            Operation::ExecSql(op) => {
                tracing::trace!(sql = %op.sql, params = op.params.len(), "executing SQL");
                let count = self.execute(&op.sql, op.params).await?;
                Ok(Response::count(count))
            }
            Operation::QuerySql(op) => {
                tracing::trace!(sql = %op.sql, params = op.params.len(), "running query");
                self.query(op).await
            }
        }
    }
}
