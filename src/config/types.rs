//! Configuration types for the Shift Hours Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use serde::{Deserialize, Serialize};

/// How a negative net duration is reported.
///
/// Net time goes negative when break time exceeds the login-to-logout
/// span, which only happens with overlapping or out-of-order punches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeNetPolicy {
    /// Report the negative value unchanged.
    #[default]
    Preserve,
    /// Report zero instead.
    Clamp,
}

/// Settings from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// A label for this configuration, shown in logs.
    #[serde(default = "default_name")]
    pub name: String,
    /// Punch ordering settings.
    #[serde(default)]
    pub ordering: OrderingConfig,
    /// Net duration settings.
    #[serde(default)]
    pub net_duration: NetDurationConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            name: default_name(),
            ordering: OrderingConfig::default(),
            net_duration: NetDurationConfig::default(),
        }
    }
}

fn default_name() -> String {
    "default".to_string()
}

/// Punch ordering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Stable-sort each day slice by timestamp before pairing punches.
    #[serde(default = "default_true")]
    pub sort_by_timestamp: bool,
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            sort_by_timestamp: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Net duration settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetDurationConfig {
    /// What to do when break time exceeds gross time.
    #[serde(default)]
    pub negative_policy: NegativeNetPolicy,
}

/// Header names of the punch sheet columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConfig {
    /// The person name column.
    #[serde(default = "default_person_column")]
    pub person: String,
    /// The `DD/MM/YYYY` date column.
    #[serde(default = "default_date_column")]
    pub date: String,
    /// The `HH:MM:SS` time column.
    #[serde(default = "default_punch_time_column")]
    pub punch_time: String,
    /// The IN/OUT column.
    #[serde(default = "default_direction_column")]
    pub direction: String,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            person: default_person_column(),
            date: default_date_column(),
            punch_time: default_punch_time_column(),
            direction: default_direction_column(),
        }
    }
}

impl ColumnConfig {
    /// Returns the header names in a fixed order.
    pub fn names(&self) -> [&str; 4] {
        [
            self.person.as_str(),
            self.date.as_str(),
            self.punch_time.as_str(),
            self.direction.as_str(),
        ]
    }
}

fn default_person_column() -> String {
    "Name".to_string()
}

fn default_date_column() -> String {
    "Date".to_string()
}

fn default_punch_time_column() -> String {
    "Punch Time".to_string()
}

fn default_direction_column() -> String {
    "I/O Type".to_string()
}

/// Structure of `columns.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ColumnsFile {
    /// The column header names.
    #[serde(default)]
    pub columns: ColumnConfig,
}

/// The complete engine configuration.
///
/// # Example
///
/// ```
/// use shift_hours::config::{EngineConfig, NegativeNetPolicy};
///
/// let config = EngineConfig::default();
/// assert!(config.settings.ordering.sort_by_timestamp);
/// assert_eq!(config.settings.net_duration.negative_policy, NegativeNetPolicy::Preserve);
/// assert_eq!(config.columns.punch_time, "Punch Time");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineConfig {
    /// Settings from `engine.yaml`.
    pub settings: EngineSettings,
    /// Column names from `columns.yaml`.
    pub columns: ColumnConfig,
}

impl EngineConfig {
    /// Creates a configuration from its parts.
    pub fn new(settings: EngineSettings, columns: ColumnConfig) -> Self {
        Self { settings, columns }
    }

    /// Whether day slices are sorted by timestamp before the fold.
    pub fn sort_by_timestamp(&self) -> bool {
        self.settings.ordering.sort_by_timestamp
    }

    /// The configured negative net duration policy.
    pub fn negative_net_policy(&self) -> NegativeNetPolicy {
        self.settings.net_duration.negative_policy
    }
}
