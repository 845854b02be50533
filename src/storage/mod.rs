mod kv;
mod preferences;
mod schema;
mod types;

pub use kv::{KvStore, MemoryStore};
pub use schema::Database;
pub use types::DatabaseError;
