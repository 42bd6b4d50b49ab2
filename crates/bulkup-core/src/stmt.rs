mod batch;
pub use batch::{Batch, KeyedRow, Shape};

mod bulk_update;
pub use bulk_update::{Assignment, BulkUpdate, Plan, Skip, When};

mod ident;
pub use ident::Ident;

mod name;
pub use name::Name;

mod update_row;
pub use update_row::UpdateRow;

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;

#[cfg(feature = "serde")]
mod value_json;
