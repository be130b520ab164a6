//! Named joint values.

use flange_common::{FlangeError, Result};
use serde::{Deserialize, Serialize};

/// Joint values keyed by joint name.
///
/// Names and values always have the same length.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "ConfigurationData")]
pub struct Configuration {
    joint_names: Vec<String>,
    joint_values: Vec<f64>,
}

/// Unvalidated serialized form of a [`Configuration`].
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigurationData {
    /// Joint names.
    #[serde(default)]
    pub joint_names: Vec<String>,
    /// Joint values, one per name.
    #[serde(default)]
    pub joint_values: Vec<f64>,
}

impl Configuration {
    /// Pair up names and values; both lists must have the same length.
    pub fn new(joint_names: Vec<String>, joint_values: Vec<f64>) -> Result<Self> {
        if joint_names.len() != joint_values.len() {
            return Err(FlangeError::ConfigurationMismatch {
                names: joint_names.len(),
                values: joint_values.len(),
            });
        }
        Ok(Self {
            joint_names,
            joint_values,
        })
    }

    /// Build from `(name, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (joint_names, joint_values) = pairs
            .into_iter()
            .map(|(name, value)| (name.into(), value))
            .unzip();
        Self {
            joint_names,
            joint_values,
        }
    }

    /// Value of the named joint, if present.
    pub fn get(&self, joint_name: &str) -> Option<f64> {
        self.joint_names
            .iter()
            .position(|name| name == joint_name)
            .and_then(|i| self.joint_values.get(i).copied())
    }

    /// Set the named joint, adding it if absent.
    pub fn set(&mut self, joint_name: impl Into<String>, value: f64) {
        let joint_name = joint_name.into();
        let index = self.joint_names.iter().position(|name| *name == joint_name);
        match index.and_then(|i| self.joint_values.get_mut(i)) {
            Some(slot) => *slot = value,
            None => {
                self.joint_names.push(joint_name);
                self.joint_values.push(value);
            }
        }
    }

    /// Joint names, in insertion order.
    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    /// Joint values, parallel to [`Configuration::joint_names`].
    pub fn joint_values(&self) -> &[f64] {
        &self.joint_values
    }

    /// Number of joints.
    pub fn len(&self) -> usize {
        self.joint_values.len()
    }

    /// Whether no joint has a value.
    pub fn is_empty(&self) -> bool {
        self.joint_values.is_empty()
    }
}

impl TryFrom<ConfigurationData> for Configuration {
    type Error = FlangeError;

    fn try_from(data: ConfigurationData) -> Result<Self> {
        Configuration::new(data.joint_names, data.joint_values)
    }
}
