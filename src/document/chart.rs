//! Chart data carried by chart elements.

use super::error::{DocumentError, Result};
use serde::{Deserialize, Serialize};

/// Chart families the editor offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Scatter,
}

impl ChartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Pie => "pie",
            Self::Scatter => "scatter",
        }
    }
}

/// Colors of a dataset: one color for the whole series or one per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DatasetColors {
    Single(String),
    PerCategory(Vec<String>),
}

/// One data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// Values parallel to [`ChartData::labels`].
    #[serde(alias = "data")]
    pub values: Vec<f64>,
    #[serde(default, alias = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub colors: Option<DatasetColors>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            label: label.into(),
            values,
            colors: None,
        }
    }

    pub fn with_colors(mut self, colors: DatasetColors) -> Self {
        self.colors = Some(colors);
        self
    }
}

/// Category labels plus one or more datasets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartData {
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            datasets: Vec::new(),
        }
    }

    pub fn with_dataset(mut self, dataset: Dataset) -> Self {
        self.datasets.push(dataset);
        self
    }

    /// Check that there is a dataset and that every dataset has one value per label.
    pub fn validate(&self) -> Result<()> {
        if self.datasets.is_empty() {
            return Err(DocumentError::EmptyChart);
        }
        for (index, dataset) in self.datasets.iter().enumerate() {
            if dataset.values.len() != self.labels.len() {
                return Err(DocumentError::ChartDataMismatch {
                    dataset: index,
                    labels: self.labels.len(),
                    values: dataset.values.len(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quarters() -> Vec<String> {
        ["Q1", "Q2", "Q3"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_validate_matching_lengths() {
        let data = ChartData::new(quarters())
            .with_dataset(Dataset::new("2024", vec![1.0, 2.0, 3.0]))
            .with_dataset(Dataset::new("2025", vec![4.0, 5.0, 6.0]));
        assert_eq!(data.validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_mismatch() {
        let data = ChartData::new(quarters())
            .with_dataset(Dataset::new("ok", vec![1.0, 2.0, 3.0]))
            .with_dataset(Dataset::new("short", vec![1.0]));
        assert_eq!(
            data.validate(),
            Err(DocumentError::ChartDataMismatch {
                dataset: 1,
                labels: 3,
                values: 1
            })
        );
    }

    #[test]
    fn test_validate_requires_dataset() {
        assert_eq!(
            ChartData::new(quarters()).validate(),
            Err(DocumentError::EmptyChart)
        );
    }

    #[test]
    fn test_deserialize_editor_shape() {
        let json = r##"{
            "labels": ["A", "B"],
            "datasets": [
                {"label": "Sales", "data": [1, 2], "backgroundColor": "#38BDF8"},
                {"label": "Cost", "data": [3, 4], "backgroundColor": ["#111111", "#222222"]}
            ]
        }"##;
        let data: ChartData = serde_json::from_str(json).unwrap();
        assert_eq!(data.datasets[0].values, vec![1.0, 2.0]);
        assert_eq!(
            data.datasets[0].colors,
            Some(DatasetColors::Single("#38BDF8".to_string()))
        );
        assert!(matches!(
            data.datasets[1].colors,
            Some(DatasetColors::PerCategory(ref c)) if c.len() == 2
        ));
        assert!(data.validate().is_ok());
    }
}
