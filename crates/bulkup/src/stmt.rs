pub use bulkup_core::stmt::*;
