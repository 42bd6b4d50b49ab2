pub use bulkup_core::driver::{
    operation::{self, Operation, Sql},
    Capability, Connection, Driver, Response, Rows,
};

pub use crate::db::Connect;
