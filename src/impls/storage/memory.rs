use std::collections::HashMap;
use std::sync::Mutex;

use crate::core::ports::storage::KeyValueStore;
use crate::error::Error;

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    fn with<R>(&self, f: impl FnOnce(&mut HashMap<String, String>) -> R) -> R {
        let mut values = self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut values)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.with(|v| v.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), Error> {
        self.with(|v| v.insert(key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.with(|v| v.remove(key));
        Ok(())
    }
}
