//! Defines the `StudyNode` and its associated types, representing a single
//! variable or instrument in a study design.

use serde::{Deserialize, Serialize};

/// Measurement level of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Continuous,
    Ordinal,
    Nominal,
}

impl DataType {
    /// Distribution families a variable of this type may declare.
    pub fn valid_distributions(&self) -> &'static [DistributionKind] {
        match self {
            DataType::Continuous => &[DistributionKind::Normal, DistributionKind::Uniform],
            DataType::Ordinal => &[DistributionKind::Normal, DistributionKind::Categorical],
            DataType::Nominal => &[DistributionKind::Categorical],
        }
    }

    /// The family a freshly created variable of this type defaults to.
    pub fn default_distribution(&self) -> DistributionKind {
        match self {
            DataType::Continuous | DataType::Ordinal => DistributionKind::Normal,
            DataType::Nominal => DistributionKind::Categorical,
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(self, DataType::Ordinal | DataType::Nominal)
    }
}

/// Discriminant of a `Distribution`, used for family-level rules and for the
/// lowercase `type` label in generated configuration records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionKind {
    Normal,
    Uniform,
    Categorical,
}

impl DistributionKind {
    pub fn label(&self) -> &'static str {
        match self {
            DistributionKind::Normal => "normal",
            DistributionKind::Uniform => "uniform",
            DistributionKind::Categorical => "categorical",
        }
    }
}

/// Declared marginal mean/variance of a distribution, before any incoming
/// effect is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Moments {
    pub mean: f64,
    pub variance: f64,
}

/// Marginal distribution of a variable.
///
/// The categorical case carries no parameters: probability mass is implied to
/// be equal over the owner's category labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Distribution {
    Normal {
        mean: f64,
        #[serde(rename = "stdDev")]
        std_dev: f64,
    },
    Uniform {
        min: f64,
        max: f64,
    },
    Categorical,
}

impl Distribution {
    pub fn kind(&self) -> DistributionKind {
        match self {
            Distribution::Normal { .. } => DistributionKind::Normal,
            Distribution::Uniform { .. } => DistributionKind::Uniform,
            Distribution::Categorical => DistributionKind::Categorical,
        }
    }

    /// Declared mean/variance, or `None` for the categorical family.
    pub fn moments(&self) -> Option<Moments> {
        match self {
            Distribution::Normal { mean, std_dev } => Some(Moments {
                mean: *mean,
                variance: std_dev * std_dev,
            }),
            Distribution::Uniform { min, max } => Some(Moments {
                mean: (min + max) / 2.0,
                variance: (max - min) * (max - min) / 12.0,
            }),
            Distribution::Categorical => None,
        }
    }
}

/// A single question of an instrument, e.g. "Q1". Items are addressable graph
/// nodes in their own right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentItem {
    pub id: String,
    pub name: String,
}

/// Membership of an item in a scale, optionally reverse-keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleItem {
    pub item_id: String,
    pub reverse: bool,
}

/// A named aggregate over a subset of an instrument's items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub id: String,
    pub name: String,
    pub items: Vec<ScaleItem>,
}

/// A standalone measured variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub name: String,
    pub data_type: DataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<String>>,
    pub distribution: Distribution,
}

/// A composite node (e.g. a questionnaire) exposing named sub-items that
/// participate in the effect graph like ordinary variables. Items share the
/// instrument's data type, categories and distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instrument {
    pub name: String,
    pub data_type: DataType,
    pub categories: Vec<String>,
    pub distribution: Distribution,
    pub items: Vec<InstrumentItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scales: Option<Vec<Scale>>,
}

/// A node of the study design: a variable or an instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum StudyNode {
    Variable(Variable),
    Instrument(Instrument),
}

impl StudyNode {
    pub fn name(&self) -> &str {
        match self {
            StudyNode::Variable(v) => &v.name,
            StudyNode::Instrument(i) => &i.name,
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            StudyNode::Variable(v) => v.data_type,
            StudyNode::Instrument(i) => i.data_type,
        }
    }

    pub fn distribution(&self) -> &Distribution {
        match self {
            StudyNode::Variable(v) => &v.distribution,
            StudyNode::Instrument(i) => &i.distribution,
        }
    }

    pub fn categories(&self) -> Option<&[String]> {
        match self {
            StudyNode::Variable(v) => v.categories.as_deref(),
            StudyNode::Instrument(i) => Some(&i.categories),
        }
    }
}
