use super::{ProjectKey, ProjectRecord, ProjectStore};
use crate::utils::{DevEnvError, Result};
use std::collections::BTreeMap;

/// In-process registry with no backing file.
#[derive(Debug, Default, Clone)]
pub struct MemoryProjectStore {
    records: BTreeMap<ProjectKey, ProjectRecord>,
    persist_count: usize,
}

impl MemoryProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(mut self, key: ProjectKey, record: ProjectRecord) -> Self {
        self.records.insert(key, record);
        self
    }

    /// Number of times `persist` has been called.
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }
}

impl ProjectStore for MemoryProjectStore {
    fn exists(&self, key: &ProjectKey) -> Result<bool> {
        Ok(self.records.contains_key(key))
    }

    fn get(&self, key: &ProjectKey) -> Result<Option<ProjectRecord>> {
        match self.records.get(key) {
            Some(record) => {
                record.validate(key)?;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &ProjectKey, record: ProjectRecord) -> Result<()> {
        if self.records.contains_key(key) {
            return Err(DevEnvError::duplicate_project(key));
        }
        self.records.insert(key.clone(), record);
        Ok(())
    }

    fn list(&self) -> Result<Vec<(ProjectKey, ProjectRecord)>> {
        Ok(self
            .records
            .iter()
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }

    fn persist(&mut self) -> Result<()> {
        self.persist_count += 1;
        Ok(())
    }
}
