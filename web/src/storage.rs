use gloo::storage::{LocalStorage, Storage};
use matchpairs_core::{Store, StoreError};

/// Browser `localStorage`. Read and write failures, such as an exceeded quota, surface as
/// [`StoreError::Unavailable`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct LocalStore;

impl Store for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|err| StoreError::Unavailable(format!("{:?}", err)))
    }
}
