use crate::{
    logging_driver::{DriverOp, LoggingDriver},
    ExecLog, Setup,
};
use bulkup::{driver::Capability, Db};
use std::sync::{Arc, Mutex};

/// Per-test state: the backend setup and the log of every operation the
/// test database sent to its connection.
pub struct DbTest {
    setup: Box<dyn Setup>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl DbTest {
    pub fn new(setup: impl Setup) -> Self {
        crate::init_tracing();

        Self {
            setup: Box::new(setup),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Try to setup a database, returns Result for error handling
    pub async fn try_setup_db(&mut self) -> bulkup::Result<Db> {
        let mut builder = Db::builder();

        // Let the setup configure the builder
        self.setup.configure_builder(&mut builder);

        // Always wrap with logging
        let logging_driver = LoggingDriver::new(self.setup.driver());
        self.ops_log = logging_driver.ops_log_handle();

        builder.build(logging_driver).await
    }

    /// Setup a database, always with logging enabled
    pub async fn setup_db(&mut self) -> Db {
        self.try_setup_db().await.unwrap()
    }

    /// The physical name of `table` for this backend, prefix included.
    ///
    /// Raw SQL is not rewritten by the builder, so tests use this when
    /// creating and reading tables.
    pub fn table_name(&self, table: &str) -> String {
        format!("{}{table}", self.setup.table_prefix())
    }

    /// Get the operations log for assertions
    pub fn log(&self) -> ExecLog {
        ExecLog::new(self.ops_log.clone())
    }

    pub fn capability(&self) -> &'static Capability {
        self.setup.capability()
    }

    pub fn native_column_types(&self) -> bool {
        self.setup.native_column_types()
    }

    /// Drop whatever this test created.
    pub async fn cleanup(self) {
        if let Err(err) = self.setup.cleanup_my_tables().await {
            eprintln!("cleanup failed: {err}");
        }
    }
}
