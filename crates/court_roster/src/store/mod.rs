use std::future::Future;

use crate::CachedRoster;

pub mod file;

pub trait RosterStore {
    /// Returns the last saved snapshot, or `None` when nothing usable is stored
    fn load(&self) -> impl Future<Output = anyhow::Result<Option<CachedRoster>>> + Send;

    fn save(&self, roster: &CachedRoster) -> impl Future<Output = anyhow::Result<()>> + Send;
}

impl<T: RosterStore + Send + Sync> RosterStore for &T {
    async fn load(&self) -> anyhow::Result<Option<CachedRoster>> {
        (**self).load().await
    }

    async fn save(&self, roster: &CachedRoster) -> anyhow::Result<()> {
        (**self).save(roster).await
    }
}
