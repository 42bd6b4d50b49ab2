use super::{Connect, Db};
use crate::{driver::Driver, stmt::Ident, Error, Result};

use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct Builder {
    table_name_prefix: Option<String>,
}

impl Builder {
    /// Set the table name prefix for all tables
    pub fn table_name_prefix(&mut self, prefix: &str) -> &mut Self {
        self.table_name_prefix = Some(prefix.to_string());
        self
    }

    pub async fn connect(&mut self, url: &str) -> Result<Db> {
        self.build(Connect::new(url)?).await
    }

    /// Connects to the database named by the `DATABASE_URL` environment
    /// variable.
    pub async fn from_env(&mut self) -> Result<Db> {
        let url = std::env::var("DATABASE_URL")
            .map_err(|_| Error::invalid_connection_url("`DATABASE_URL` is not set"))?;
        self.connect(&url).await
    }

    pub async fn build(&mut self, driver: impl Driver) -> Result<Db> {
        let table_name_prefix = match self.table_name_prefix.as_deref() {
            None | Some("") => None,
            Some(prefix) => {
                // A prefix must itself start a valid identifier.
                Ident::new(prefix)?;
                Some(prefix.to_string())
            }
        };

        let connection = driver.connect().await?;

        Ok(Db {
            driver: Box::new(driver),
            connection: Mutex::new(connection),
            table_name_prefix,
        })
    }
}
