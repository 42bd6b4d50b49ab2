use bulkup::driver::{Capability, Driver};

use crate::Setup;

pub struct SetupSqlite;

impl SetupSqlite {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SetupSqlite {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Setup for SetupSqlite {
    fn driver(&self) -> Box<dyn Driver> {
        // Every test connects to its own in-memory database.
        Box::new(bulkup::driver::Connect::new("sqlite::memory:").expect("valid sqlite URL"))
    }

    fn capability(&self) -> &'static Capability {
        &Capability::SQLITE
    }
}
