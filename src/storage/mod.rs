use futures::future::BoxFuture;

pub use sqlite::Sqlite;

#[cfg(test)]
pub use memory::Memory;

#[cfg(test)]
mod memory;
mod sqlite;

/// Key-value persistence of serialized collections. The core never sees
/// SQL; it reads and writes whole JSON documents under stable keys.
pub trait Storage {
    /// Fetch the serialized collection stored under `key`, if any.
    fn get(&self, key: &str) -> BoxFuture<anyhow::Result<Option<String>>>;

    /// Persist `value` under `key`, replacing prior contents.
    fn put(&self, key: &str, value: String) -> BoxFuture<anyhow::Result<()>>;
}
