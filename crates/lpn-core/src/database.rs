//! Descriptors for the database images a portal stack can be linked to.

use crate::liferay::Portal;

/// Name of the default database created on first start.
pub const DB_NAME: &str = "lportal";

/// Default root credential for the database.
pub const DB_PASSWORD: &str = "my-secret-pw";

/// Network alias the portal container uses to reach its database. The JDBC
/// URL is built against this alias, never against the container name, so the
/// database container can be recreated without touching the portal
/// configuration.
pub const LINK_ALIAS: &str = "db";

const MYSQL_REPOSITORY: &str = "mdelapenya/mysql-utf8";
const MYSQL_DEFAULT_TAG: &str = "5.7";
const MYSQL_PORT: u16 = 3301;

/// JDBC connection parameters injected into the portal container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdbcConnection {
    pub driver_class_name: String,
    pub password: String,
    pub url: String,
    pub user: String,
}

/// The closed set of database backends.
#[derive(Debug, Clone)]
pub enum DatabaseImage {
    Mysql(Mysql),
}

/// A MySQL image serving one portal variant's stack.
#[derive(Debug, Clone)]
pub struct Mysql {
    lpn_type: String,
    tag: Option<String>,
}

impl DatabaseImage {
    /// Builds the MySQL descriptor for a portal variant's stack. An empty or
    /// missing tag falls back to the default.
    pub fn mysql(portal: Portal, tag: Option<String>) -> Self {
        let tag = tag.filter(|t| !t.is_empty());
        DatabaseImage::Mysql(Mysql {
            lpn_type: portal.type_name().to_string(),
            tag,
        })
    }

    /// Value of the `db-type` ownership label.
    pub fn type_name(&self) -> &str {
        match self {
            DatabaseImage::Mysql(_) => "mysql",
        }
    }

    /// Variant of the portal stack this database belongs to.
    pub fn lpn_type(&self) -> &str {
        match self {
            DatabaseImage::Mysql(m) => &m.lpn_type,
        }
    }

    /// Canonical container name, derived from the owning stack's variant.
    pub fn container_name(&self) -> String {
        format!("db-{}", self.lpn_type())
    }

    /// Data directory inside the container, bind-mounted to the host so the
    /// content survives container recreation.
    pub fn data_folder(&self) -> &'static str {
        match self {
            DatabaseImage::Mysql(_) => "/var/lib/mysql",
        }
    }

    pub fn repository(&self) -> &'static str {
        match self {
            DatabaseImage::Mysql(_) => MYSQL_REPOSITORY,
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            DatabaseImage::Mysql(m) => m.tag.as_deref().unwrap_or(MYSQL_DEFAULT_TAG),
        }
    }

    pub fn fully_qualified_name(&self) -> String {
        format!("{}:{}", self.repository(), self.tag())
    }

    /// Docker Hub repository path used when listing available tags.
    pub fn tags_repository(&self) -> &'static str {
        match self {
            DatabaseImage::Mysql(_) => "library/mysql",
        }
    }

    /// Port the database listens on inside the container.
    pub fn port(&self) -> u16 {
        match self {
            DatabaseImage::Mysql(_) => MYSQL_PORT,
        }
    }

    /// Environment pair configuring the database on first start, as
    /// `NAME=value` entries.
    pub fn env_variables(&self) -> Vec<String> {
        match self {
            DatabaseImage::Mysql(_) => vec![
                format!("MYSQL_DATABASE={DB_NAME}"),
                format!("MYSQL_ROOT_PASSWORD={DB_PASSWORD}"),
            ],
        }
    }

    /// JDBC quadruple the portal uses to reach this database. The URL
    /// addresses the [`LINK_ALIAS`], not the container.
    pub fn jdbc_connection(&self) -> JdbcConnection {
        match self {
            DatabaseImage::Mysql(_) => JdbcConnection {
                driver_class_name: "com.mysql.jdbc.Driver".to_string(),
                password: DB_PASSWORD.to_string(),
                url: format!(
                    "jdbc:mysql://{LINK_ALIAS}/{DB_NAME}?characterEncoding=UTF-8&\
                     dontTrackOpenResources=true&holdResultsOpenOverStatementClose=true&\
                     useFastDateParsing=false&useUnicode=true"
                ),
                user: "root".to_string(),
            },
        }
    }
}
