use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::interaction::InteractionConfig;
use crate::layers::{
    AxisStyle, BarStyle, BrushStyle, BucketedLineStyle, HoverLineStyle, LineStyle, PointStyle,
    SpanStyle,
};

pub const CHART_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Styles for every layer kind plus interaction settings.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub line: LineStyle,
    pub bar: BarStyle,
    pub point: PointStyle,
    pub bucketed_line: BucketedLineStyle,
    pub span: SpanStyle,
    pub selection: SpanStyle,
    pub x_axis: AxisStyle,
    pub y_axis: AxisStyle,
    pub hover_line: HoverLineStyle,
    pub brush: BrushStyle,
    pub interaction: InteractionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: ChartConfig,
}

impl ChartConfig {
    /// Rejects values no layer can draw with.
    pub fn validate(&self) -> ChartResult<()> {
        for (name, width) in [
            ("line.line_width", self.line.line_width),
            ("bucketed_line.line_width", self.bucketed_line.line_width),
            ("hover_line.line_width", self.hover_line.line_width),
        ] {
            if !width.is_finite() || width <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        let point = &self.point;
        if !point.radius.is_finite()
            || !point.inner_radius.is_finite()
            || point.inner_radius < 0.0
            || point.radius < point.inner_radius
        {
            return Err(ChartError::InvalidData(
                "point radii must be finite with 0 <= inner_radius <= radius".to_owned(),
            ));
        }

        if !self.interaction.zoom_speed.is_finite() {
            return Err(ChartError::InvalidData(
                "interaction.zoom_speed must be finite".to_owned(),
            ));
        }
        Ok(())
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartConfigJsonContractV1 {
            schema_version: CHART_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize config contract v1: {e}"))
        })
    }

    /// Parses either a bare config object or a versioned envelope, then
    /// validates it.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?;

        let config = if value.get("schema_version").is_some() {
            let payload: ChartConfigJsonContractV1 = serde_json::from_value(value)
                .map_err(|e| {
                    ChartError::InvalidData(format!("failed to parse config contract: {e}"))
                })?;
            if payload.schema_version != CHART_CONFIG_JSON_SCHEMA_V1 {
                return Err(ChartError::InvalidData(format!(
                    "unsupported config schema version: {}",
                    payload.schema_version
                )));
            }
            payload.config
        } else {
            serde_json::from_value(value)
                .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))?
        };

        config.validate()?;
        Ok(config)
    }
}
