//! Mock storage implementation for isolating the store in tests.

use mockall::mock;

use crate::repository::SlotStorage;
use crate::repository::errors::RepositoryResult;

mock! {
    pub Storage {}

    impl SlotStorage for Storage {
        fn read_slot(&self, key: &str) -> RepositoryResult<Option<String>>;
        fn write_slot(&self, key: &str, value: &str) -> RepositoryResult<()>;
    }
}
