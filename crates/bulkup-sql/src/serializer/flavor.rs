use super::Serializer;

use bulkup_core::driver::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Flavor {
    Postgresql,
    Sqlite,
    Mysql,
}

impl Flavor {
    pub(super) fn capability(self) -> &'static Capability {
        match self {
            Flavor::Postgresql => &Capability::POSTGRESQL,
            Flavor::Sqlite => &Capability::SQLITE,
            Flavor::Mysql => &Capability::MYSQL,
        }
    }

    pub(super) fn name(self) -> &'static str {
        match self {
            Flavor::Postgresql => "PostgreSQL",
            Flavor::Sqlite => "SQLite",
            Flavor::Mysql => "MySQL",
        }
    }
}

impl Serializer {
    pub fn sqlite() -> Serializer {
        Serializer {
            flavor: Flavor::Sqlite,
            inline: false,
        }
    }

    pub fn postgresql() -> Serializer {
        Serializer {
            flavor: Flavor::Postgresql,
            inline: false,
        }
    }

    pub fn mysql() -> Serializer {
        Serializer {
            flavor: Flavor::Mysql,
            inline: false,
        }
    }

    pub fn is_sqlite(&self) -> bool {
        self.flavor == Flavor::Sqlite
    }

    pub fn is_mysql(&self) -> bool {
        self.flavor == Flavor::Mysql
    }
}
