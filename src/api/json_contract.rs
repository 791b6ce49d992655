use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

use super::ChartOption;

pub const CHART_OPTION_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope for options exported to a host-side engine bridge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartOptionJsonContractV1 {
    pub schema_version: u32,
    pub option: ChartOption,
}

impl ChartOption {
    /// Bare option JSON in the engine's schema.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize chart option: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartOptionJsonContractV1 {
            schema_version: CHART_OPTION_JSON_SCHEMA_V1,
            option: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart option contract v1: {e}"))
        })
    }

    /// Accepts either a bare option or a v1 envelope.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(option) = serde_json::from_str::<ChartOption>(input) {
            return Ok(option);
        }
        let payload: ChartOptionJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart option json payload: {e}"))
        })?;
        if payload.schema_version != CHART_OPTION_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported chart option schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.option)
    }
}
