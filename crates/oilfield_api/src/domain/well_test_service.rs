use crate::domain::skip;
use chrono::{DateTime, Utc};
use common::domain::{
    is_blank, require, DispatchResult, DomainError, DomainResult, EspWellTestRecord,
    GlAnalysisWellTestInput, GlAnalysisWellTestRecord, SkipReason, WellTestInput, WellTestStore,
    WithCorrelationId,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

const DATE_LABEL_FORMAT: &str = "%m/%d/%Y";

/// One ESP well test row; `id` is the 1-based position, newest first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WellTestItem {
    pub id: usize,
    pub date: DateTime<Utc>,
    pub date_label: String,
    pub approved: bool,
    pub oil_rate: Option<f32>,
    pub water_rate: Option<f32>,
    pub gas_rate: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WellTestDataOutput {
    pub values: Vec<WellTestItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlAnalysisWellTestItem {
    pub analysis_result_id: i64,
    pub date: DateTime<Utc>,
    pub date_label: String,
    pub analysis_type: String,
    pub approved: bool,
}

impl From<GlAnalysisWellTestRecord> for GlAnalysisWellTestItem {
    fn from(record: GlAnalysisWellTestRecord) -> Self {
        let analysis_type = if is_blank(&record.analysis_type_name) {
            format!("Type {}", record.analysis_type_id)
        } else {
            record.analysis_type_name
        };

        Self {
            analysis_result_id: record.analysis_result_id,
            date: record.test_date,
            date_label: record.test_date.format(DATE_LABEL_FORMAT).to_string(),
            analysis_type,
            approved: record.approved,
        }
    }
}

/// Gas-lift analysis rows in store order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlAnalysisWellTestOutput {
    pub values: Vec<GlAnalysisWellTestItem>,
}

fn shape_esp_tests(mut records: Vec<EspWellTestRecord>) -> WellTestDataOutput {
    records.sort_by(|a, b| b.test_date.cmp(&a.test_date));

    let values = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| WellTestItem {
            id: index + 1,
            date: record.test_date,
            date_label: record.test_date.format(DATE_LABEL_FORMAT).to_string(),
            approved: record.approved,
            oil_rate: record.oil_rate,
            water_rate: record.water_rate,
            gas_rate: record.gas_rate,
        })
        .collect();

    WellTestDataOutput { values }
}

/// Service shaping ESP and gas-lift well test results
pub struct WellTestService {
    well_test_store: Arc<dyn WellTestStore>,
}

#[derive(Default)]
pub struct WellTestServiceBuilder {
    well_test_store: Option<Arc<dyn WellTestStore>>,
}

impl WellTestServiceBuilder {
    pub fn well_test_store(mut self, store: Arc<dyn WellTestStore>) -> Self {
        self.well_test_store = Some(store);
        self
    }

    pub fn build(self) -> DomainResult<WellTestService> {
        Ok(WellTestService {
            well_test_store: require(self.well_test_store, "well_test_store")?,
        })
    }
}

impl WellTestService {
    pub fn builder() -> WellTestServiceBuilder {
        WellTestServiceBuilder::default()
    }

    /// ESP well tests for an asset
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_esp_well_tests(
        &self,
        request: WithCorrelationId<WellTestInput>,
    ) -> DomainResult<DispatchResult<WellTestDataOutput>> {
        const OPERATION: &str = "get_esp_well_tests";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        if is_blank(&input.asset_id) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector("asset id"),
            ));
        }

        let records = self
            .well_test_store
            .get_esp_well_tests_data(&input.asset_id, correlation_id)
            .await?;

        debug!(correlation_id, count = records.len(), "loaded ESP well tests");
        Ok(DispatchResult::Success(shape_esp_tests(records)))
    }

    /// One page of gas-lift analysis well tests for an asset
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn get_gl_analysis_well_tests(
        &self,
        request: WithCorrelationId<GlAnalysisWellTestInput>,
    ) -> DomainResult<DispatchResult<GlAnalysisWellTestOutput>> {
        const OPERATION: &str = "get_gl_analysis_well_tests";
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            return Ok(skip(OPERATION, correlation_id, SkipReason::MissingRequest));
        };

        if is_blank(&input.asset_id) {
            return Ok(skip(
                OPERATION,
                correlation_id,
                SkipReason::MissingSelector("asset id"),
            ));
        }

        if input.page_size == 0 {
            return Err(DomainError::ValidationError(
                "Page size must be greater than zero".to_string(),
            ));
        }

        let records = self
            .well_test_store
            .get_gl_analysis_well_tests_data(
                &input.asset_id,
                input.page_index,
                input.page_size,
                correlation_id,
            )
            .await?;

        debug!(correlation_id, count = records.len(), "loaded gas-lift analysis well tests");
        Ok(DispatchResult::Success(GlAnalysisWellTestOutput {
            values: records.into_iter().map(Into::into).collect(),
        }))
    }
}
