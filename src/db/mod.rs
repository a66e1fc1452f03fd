pub mod connection;
pub mod error_context;
pub mod postgres;

pub use connection::{Connection, DropTableOptions, RecordingConnection};
pub use postgres::PostgresConnection;
