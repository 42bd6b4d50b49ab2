//! Apply a batch of partial row updates, each identified by a (possibly
//! compound) key, as one `UPDATE ... SET col = CASE ... END ... WHERE
//! (keys) IN (...)` statement.
//!
//! ```no_run
//! # async fn example() -> bulkup::Result<()> {
//! use bulkup::{Db, UpdateRow};
//!
//! let db = Db::connect("sqlite::memory:").await?;
//!
//! let count = db
//!     .bulk_update(
//!         "User",
//!         [
//!             UpdateRow::new()
//!                 .key("orgId", 1)
//!                 .key("email", "a@x.com")
//!                 .set("status", "ACTIVE"),
//!             UpdateRow::new()
//!                 .key("orgId", 1)
//!                 .key("email", "b@x.com")
//!                 .set("status", "INACTIVE"),
//!         ],
//!     )
//!     .await?;
//! # let _ = count;
//! # Ok(())
//! # }
//! ```

pub mod db;
pub use db::{Builder, Db, Table};

pub mod driver;

pub mod stmt;
pub use stmt::{UpdateRow, Value, ValueRecord};

pub use bulkup_core::{Error, Result};

/// Compile a batch to SQL text without a database.
pub use bulkup_sql::{compile, Compiled, Serializer};
