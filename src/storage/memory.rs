use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use futures::future::BoxFuture;

use super::Storage;

/// In-memory adapter for exercising the store without a database file.
/// `fail_writes` simulates an unavailable backend.
#[derive(Clone, Default)]
pub struct Memory {
    map: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: bool,
}

impl Memory {
    pub fn failing_writes() -> Self {
        Self {
            map: Arc::default(),
            fail_writes: true,
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.map.lock().unwrap().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.map
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

impl Storage for Memory {
    fn get(&self, key: &str) -> BoxFuture<anyhow::Result<Option<String>>> {
        let map = self.map.clone();
        let key = key.to_string();

        Box::pin(async move { Ok(map.lock().unwrap().get(&key).cloned()) })
    }

    fn put(&self, key: &str, value: String) -> BoxFuture<anyhow::Result<()>> {
        let map = self.map.clone();
        let key = key.to_string();
        let fail = self.fail_writes;

        Box::pin(async move {
            if fail {
                return Err(anyhow!("storage unavailable"));
            }

            map.lock().unwrap().insert(key, value);

            Ok(())
        })
    }
}
