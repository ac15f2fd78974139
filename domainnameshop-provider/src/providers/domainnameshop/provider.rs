//! Domainname.shop record operations and trait implementations

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::traits::{
    ProviderErrorMapper, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
use crate::types::{BatchFailure, BatchResult, DnsRecord};
use crate::utils::ttl::to_secs_u32;

use super::codec::{normalize_record_name, to_dns_record, to_ds_record};
use super::{DomainnameshopProvider, DsRecord};

impl DomainnameshopProvider {
    /// Fetch the zone's records and replace its snapshot.
    async fn refresh(&self, zone: &str) -> Result<Vec<DsRecord>> {
        let domain = self.resolve_zone(zone).await?;
        let records = self.list_remote(domain.id, zone).await?;
        log::debug!(
            "[{}] Refreshed {} records for zone '{zone}'",
            self.provider_name(),
            records.len()
        );
        self.records.store(zone, records.clone()).await;
        Ok(records)
    }

    /// Cached identity lookup, refreshing the snapshot once on a miss.
    async fn find_remote(&self, zone: &str, candidate: &DsRecord) -> Result<Option<DsRecord>> {
        if let Some(hit) = self.records.lookup(zone, candidate).await {
            return Ok(Some(hit));
        }
        self.refresh(zone).await?;
        Ok(self.records.lookup(zone, candidate).await)
    }

    /// Codec plus the normalisation every outgoing record gets.
    fn prepare(&self, zone: &str, record: &DnsRecord) -> Result<DsRecord> {
        let mut ds = to_ds_record(record)?;
        ds.host = normalize_record_name(&ds.host, zone);
        if ds.ttl == 0 {
            ds.ttl = to_secs_u32(self.default_ttl);
        }
        Ok(ds)
    }

    async fn create_one(&self, zone: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let domain = self.resolve_zone(zone).await?;
        let mut ds = self.prepare(zone, record)?;
        ds.id = self.create_remote(domain.id, &ds).await?;
        log::debug!(
            "[{}] Created {} record '{}' with id {}",
            self.provider_name(),
            ds.record_type,
            ds.host,
            ds.id
        );
        to_dns_record(&ds)
    }

    async fn upsert_one(&self, zone: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let ds = self.prepare(zone, record)?;
        if ds.id == 0 {
            return self.create_one(zone, record).await;
        }

        let domain = self.resolve_zone(zone).await?;
        self.update_remote(domain.id, &ds).await?;

        // The update response has no body. Re-list and pick the record by id
        // only: another record may now share its host and data.
        let current = self
            .refresh(zone)
            .await?
            .into_iter()
            .find(|r| r.id == ds.id);
        match current {
            Some(current) => to_dns_record(&current),
            None => {
                log::warn!(
                    "[{}] Record {} not listed after update, returning submitted values",
                    self.provider_name(),
                    ds.id
                );
                to_dns_record(&ds)
            }
        }
    }

    async fn delete_one(&self, zone: &str, record: &DnsRecord) -> Result<DnsRecord> {
        let mut candidate = to_ds_record(record)?;
        candidate.host = normalize_record_name(&candidate.host, zone);

        let domain = self.resolve_zone(zone).await?;
        let Some(existing) = self.find_remote(zone, &candidate).await? else {
            log::debug!(
                "[{}] Record '{}' not found in zone '{zone}', nothing to delete",
                self.provider_name(),
                candidate.host
            );
            return Ok(record.clone());
        };

        self.delete_remote(domain.id, &existing).await?;
        self.records.invalidate(zone, &existing).await;
        log::debug!(
            "[{}] Deleted record {} ('{}')",
            self.provider_name(),
            existing.id,
            existing.host
        );
        Ok(record.clone())
    }

    fn log_snapshot(&self, action: &str, zone: &str, records: &[DnsRecord]) {
        log::info!(
            "[{}] {action} {} records in zone '{zone}'",
            self.provider_name(),
            records.len()
        );
        log::debug!("[{}] {action}: {records:?}", self.provider_name());
    }

    /// Drop the cached zone and record snapshot for `zone`.
    ///
    /// The next operation on the zone resolves and fetches it again.
    pub async fn forget_zone(&self, zone: &str) {
        self.zones.lock().await.remove(zone);
        self.records.forget(zone).await;
    }

    /// Like [`append_records`](RecordAppender::append_records), but keeps
    /// going after a failure and reports each one.
    pub async fn append_records_detailed(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let mut succeeded = Vec::new();
        let mut failures = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.create_one(zone, record).await {
                Ok(created) => succeeded.push(created),
                Err(e) => failures.push(batch_failure(index, record, &e)),
            }
        }
        BatchResult::new(succeeded, failures)
    }

    /// Like [`set_records`](RecordSetter::set_records), but keeps going
    /// after a failure and reports each one.
    pub async fn set_records_detailed(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let mut succeeded = Vec::new();
        let mut failures = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.upsert_one(zone, record).await {
                Ok(current) => succeeded.push(current),
                Err(e) => failures.push(batch_failure(index, record, &e)),
            }
        }
        BatchResult::new(succeeded, failures)
    }

    /// Like [`delete_records`](RecordDeleter::delete_records), but keeps
    /// going after a failure and reports each one.
    pub async fn delete_records_detailed(&self, zone: &str, records: &[DnsRecord]) -> BatchResult {
        let mut succeeded = Vec::new();
        let mut failures = Vec::new();
        for (index, record) in records.iter().enumerate() {
            match self.delete_one(zone, record).await {
                Ok(deleted) => succeeded.push(deleted),
                Err(e) => failures.push(batch_failure(index, record, &e)),
            }
        }
        BatchResult::new(succeeded, failures)
    }
}

fn batch_failure(index: usize, record: &DnsRecord, error: &ProviderError) -> BatchFailure {
    if error.is_expected() {
        log::warn!("record #{index} ('{}') failed: {error}", record.name);
    } else {
        log::error!("record #{index} ('{}') failed: {error}", record.name);
    }
    BatchFailure {
        index,
        record_name: record.name.clone(),
        reason: error.to_string(),
    }
}

fn aborted(index: usize, record: &DnsRecord, source: ProviderError) -> ProviderError {
    ProviderError::BatchAborted {
        index,
        record_name: record.name.clone(),
        source: Box::new(source),
    }
}

#[async_trait]
impl RecordGetter for DomainnameshopProvider {
    async fn get_records(&self, zone: &str) -> Result<Vec<DnsRecord>> {
        let records = self
            .refresh(zone)
            .await?
            .iter()
            .map(to_dns_record)
            .collect::<Result<Vec<_>>>()?;
        self.log_snapshot("Listed", zone, &records);
        Ok(records)
    }
}

#[async_trait]
impl RecordAppender for DomainnameshopProvider {
    async fn append_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        let mut created = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = self
                .create_one(zone, record)
                .await
                .map_err(|e| aborted(index, record, e))?;
            created.push(result);
        }
        self.log_snapshot("Appended", zone, &created);
        Ok(created)
    }
}

#[async_trait]
impl RecordSetter for DomainnameshopProvider {
    async fn set_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        let mut current = Vec::with_capacity(records.len());
        for (index, record) in records.iter().enumerate() {
            let result = self
                .upsert_one(zone, record)
                .await
                .map_err(|e| aborted(index, record, e))?;
            current.push(result);
        }
        self.log_snapshot("Set", zone, &current);
        Ok(current)
    }
}

#[async_trait]
impl RecordDeleter for DomainnameshopProvider {
    async fn delete_records(&self, zone: &str, records: &[DnsRecord]) -> Result<Vec<DnsRecord>> {
        for (index, record) in records.iter().enumerate() {
            self.delete_one(zone, record)
                .await
                .map_err(|e| aborted(index, record, e))?;
        }
        log::info!(
            "[{}] Deleted up to {} records in zone '{zone}'",
            self.provider_name(),
            records.len()
        );
        Ok(records.to_vec())
    }
}
