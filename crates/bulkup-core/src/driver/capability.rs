#[derive(Debug)]
pub struct Capability {
    /// Most bound parameters a single statement may carry.
    pub max_params: usize,

    /// Placeholders are numbered (`?1`, `$1`) and can be referenced more
    /// than once, so a row's key values only need binding once.
    pub numbered_params: bool,

    /// `SET` assignments see the values written by earlier assignments in
    /// the same statement instead of the row's original values.
    pub sequential_assignments: bool,
}

impl Capability {
    /// SQLite capabilities. `SQLITE_MAX_VARIABLE_NUMBER` defaults to 32766
    /// since 3.32.
    pub const SQLITE: Self = Self {
        max_params: 32_766,
        numbered_params: true,
        sequential_assignments: false,
    };

    /// PostgreSQL capabilities. The wire protocol carries the parameter
    /// count as an unsigned 16-bit integer.
    pub const POSTGRESQL: Self = Self {
        max_params: 65_535,
        ..Self::SQLITE
    };

    /// MySQL capabilities
    pub const MYSQL: Self = Self {
        max_params: 65_535,
        numbered_params: false,
        sequential_assignments: true,
    };
}
