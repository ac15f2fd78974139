//! Per-zone snapshot of remote records

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::DsRecord;

/// Last observed record list of each zone.
///
/// Deleted records stay in the snapshot with their id reset to 0 and never
/// match again; a snapshot is only replaced wholesale by [`store`](Self::store).
/// Entries never expire.
#[derive(Debug, Default)]
pub(crate) struct RecordCache {
    inner: Mutex<HashMap<String, Vec<DsRecord>>>,
}

impl RecordCache {
    /// Find the cached entry matching `candidate`.
    ///
    /// A non-zero id match anywhere in the snapshot wins; otherwise the first
    /// live entry with the same host and data. Type and TTL are not compared.
    pub async fn lookup(&self, zone: &str, candidate: &DsRecord) -> Option<DsRecord> {
        let inner = self.inner.lock().await;
        let records = inner.get(zone)?;

        if candidate.id != 0
            && let Some(hit) = records.iter().find(|r| r.id == candidate.id)
        {
            return Some(hit.clone());
        }

        records
            .iter()
            .find(|r| r.id != 0 && r.host == candidate.host && r.data == candidate.data)
            .cloned()
    }

    /// Mark the entry with `candidate`'s id as deleted. Returns `false` when
    /// the id is 0 or not in the snapshot.
    pub async fn invalidate(&self, zone: &str, candidate: &DsRecord) -> bool {
        if candidate.id == 0 {
            return false;
        }
        let mut inner = self.inner.lock().await;
        let Some(entry) = inner
            .get_mut(zone)
            .and_then(|records| records.iter_mut().find(|r| r.id == candidate.id))
        else {
            return false;
        };
        entry.id = 0;
        true
    }

    /// Replace the snapshot of `zone`.
    pub async fn store(&self, zone: &str, records: Vec<DsRecord>) {
        self.inner.lock().await.insert(zone.to_string(), records);
    }

    /// Drop the snapshot of `zone`.
    pub async fn forget(&self, zone: &str) -> bool {
        self.inner.lock().await.remove(zone).is_some()
    }
}
