use crate::domain::{DomainResult, EspWellTestRecord, GlAnalysisWellTestRecord, WellTestStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory well tests keyed by asset id
pub struct InMemoryWellTestStore {
    esp_tests: Arc<RwLock<HashMap<String, Vec<EspWellTestRecord>>>>,
    gl_analysis_tests: Arc<RwLock<HashMap<String, Vec<GlAnalysisWellTestRecord>>>>,
}

impl InMemoryWellTestStore {
    pub fn new() -> Self {
        Self {
            esp_tests: Arc::new(RwLock::new(HashMap::new())),
            gl_analysis_tests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub async fn add_esp_test(&self, asset_id: &str, record: EspWellTestRecord) {
        self.esp_tests
            .write()
            .await
            .entry(asset_id.to_string())
            .or_default()
            .push(record);
    }

    pub async fn add_gl_analysis_test(&self, asset_id: &str, record: GlAnalysisWellTestRecord) {
        self.gl_analysis_tests
            .write()
            .await
            .entry(asset_id.to_string())
            .or_default()
            .push(record);
    }
}

impl Default for InMemoryWellTestStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WellTestStore for InMemoryWellTestStore {
    async fn get_esp_well_tests_data(
        &self,
        asset_id: &str,
        _correlation_id: &str,
    ) -> DomainResult<Vec<EspWellTestRecord>> {
        let esp_tests = self.esp_tests.read().await;
        Ok(esp_tests.get(asset_id).cloned().unwrap_or_default())
    }

    async fn get_gl_analysis_well_tests_data(
        &self,
        asset_id: &str,
        page_index: u32,
        page_size: u32,
        _correlation_id: &str,
    ) -> DomainResult<Vec<GlAnalysisWellTestRecord>> {
        let gl_analysis_tests = self.gl_analysis_tests.read().await;
        let Some(records) = gl_analysis_tests.get(asset_id) else {
            return Ok(Vec::new());
        };

        // newest first, one page at a time
        let mut records = records.clone();
        records.sort_by(|a, b| b.test_date.cmp(&a.test_date));
        let skip = page_index as usize * page_size as usize;
        Ok(records
            .into_iter()
            .skip(skip)
            .take(page_size as usize)
            .collect())
    }
}
