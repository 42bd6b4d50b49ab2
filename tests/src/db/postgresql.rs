use bulkup::{
    driver::{Capability, Driver},
    Db, Value,
};

use crate::{isolation::TestIsolation, Setup};

pub struct SetupPostgreSQL {
    isolation: TestIsolation,
}

impl SetupPostgreSQL {
    pub fn new() -> Self {
        Self {
            isolation: TestIsolation::new(),
        }
    }
}

impl Default for SetupPostgreSQL {
    fn default() -> Self {
        Self::new()
    }
}

fn database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "postgresql://localhost:5432/bulkup_test".to_string())
}

#[async_trait::async_trait]
impl Setup for SetupPostgreSQL {
    fn driver(&self) -> Box<dyn Driver> {
        Box::new(
            bulkup::driver::Connect::new(&database_url())
                .expect("Failed to create PostgreSQL driver"),
        )
    }

    fn configure_builder(&self, builder: &mut bulkup::db::Builder) {
        builder.table_name_prefix(&self.isolation.table_prefix());
    }

    fn table_prefix(&self) -> String {
        self.isolation.table_prefix()
    }

    fn capability(&self) -> &'static Capability {
        &Capability::POSTGRESQL
    }

    fn native_column_types(&self) -> bool {
        true
    }

    async fn cleanup_my_tables(&self) -> bulkup::Result<()> {
        let db = Db::connect(&database_url()).await?;

        let rows = db
            .query_sql(
                "SELECT table_name::text AS table_name FROM information_schema.tables
                 WHERE table_schema = 'public' AND table_name LIKE $1",
                [Value::from(format!("{}%", self.isolation.table_prefix()))],
            )
            .await?;

        for row in rows {
            let Some(table_name) = row.get("table_name").and_then(Value::as_str) else {
                continue;
            };

            if self.isolation.owns_table(table_name) {
                db.exec_sql(format!("DROP TABLE IF EXISTS \"{table_name}\" CASCADE"), [])
                    .await?;
            }
        }

        // Enum types outlive the tables using them
        let types = db
            .query_sql(
                "SELECT typname::text AS typname FROM pg_type
                 WHERE typtype = 'e' AND typname LIKE $1",
                [Value::from(format!("{}%", self.isolation.table_prefix()))],
            )
            .await?;

        for row in types {
            let Some(type_name) = row.get("typname").and_then(Value::as_str) else {
                continue;
            };

            if self.isolation.owns_table(type_name) {
                db.exec_sql(format!("DROP TYPE IF EXISTS \"{type_name}\" CASCADE"), [])
                    .await?;
            }
        }

        db.disconnect().await;
        Ok(())
    }
}
