use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::InputError;

/// Canonical trade-confirmation fields, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    #[serde(rename = "Party_A")]
    PartyA,
    #[serde(rename = "Party_B")]
    PartyB,
    #[serde(rename = "Trade_Date")]
    TradeDate,
    #[serde(rename = "Initial_Valuation_Date")]
    InitialValuationDate,
    #[serde(rename = "Effective_Date")]
    EffectiveDate,
    #[serde(rename = "Termination_Date")]
    TerminationDate,
    Underlying,
    Exchange,
    Coupon,
    #[serde(rename = "Business_Day")]
    BusinessDay,
    #[serde(rename = "Trade_Time")]
    TradeTime,
    #[serde(rename = "Valuation_Date")]
    ValuationDate,
    #[serde(rename = "Notional_Amount")]
    NotionalAmount,
    #[serde(rename = "Upfront_Payment")]
    UpfrontPayment,
    Barrier,
}

impl Field {
    /// Every field, in catalog order.
    pub const ALL: [Field; 15] = [
        Field::PartyA,
        Field::PartyB,
        Field::TradeDate,
        Field::InitialValuationDate,
        Field::EffectiveDate,
        Field::TerminationDate,
        Field::Underlying,
        Field::Exchange,
        Field::Coupon,
        Field::BusinessDay,
        Field::TradeTime,
        Field::ValuationDate,
        Field::NotionalAmount,
        Field::UpfrontPayment,
        Field::Barrier,
    ];

    pub const COUNT: usize = Field::ALL.len();

    /// Canonical identifier used in serialized records.
    pub fn name(self) -> &'static str {
        match self {
            Field::PartyA => "Party_A",
            Field::PartyB => "Party_B",
            Field::TradeDate => "Trade_Date",
            Field::InitialValuationDate => "Initial_Valuation_Date",
            Field::EffectiveDate => "Effective_Date",
            Field::TerminationDate => "Termination_Date",
            Field::Underlying => "Underlying",
            Field::Exchange => "Exchange",
            Field::Coupon => "Coupon",
            Field::BusinessDay => "Business_Day",
            Field::TradeTime => "Trade_Time",
            Field::ValuationDate => "Valuation_Date",
            Field::NotionalAmount => "Notional_Amount",
            Field::UpfrontPayment => "Upfront_Payment",
            Field::Barrier => "Barrier",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One value slot per catalog field. Absence is explicit (`None`) and the
/// key set never shrinks: a record always carries all `Field::COUNT` slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityRecord {
    values: [Option<String>; Field::COUNT],
}

impl EntityRecord {
    /// A record with every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.values[field.index()].as_deref()
    }

    pub fn is_set(&self, field: Field) -> bool {
        self.values[field.index()].is_some()
    }

    /// Set a field. Empty values are stored as absent.
    pub fn set(&mut self, field: Field, value: String) {
        self.values[field.index()] = if value.is_empty() { None } else { Some(value) };
    }

    /// All fields with their value, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<&str>)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Fields still absent, in catalog order.
    pub fn missing(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL.into_iter().filter(move |f| !self.is_set(*f))
    }

    pub fn resolved_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

impl Serialize for EntityRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), &value)?;
        }
        map.end()
    }
}

/// A key/value pair taken from a table row, both still raw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    pub key: String,
    pub value: String,
}

impl RawRow {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Cell texts of one table row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    pub cells: Vec<String>,
}

impl TableRow {
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Trimmed, non-empty cell texts.
    pub fn usable_cells(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }
}

/// Which strategy filled a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Table,
    Pattern,
}

/// Result of one extraction call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionReport {
    pub processing_method: &'static str,
    pub entities: EntityRecord,
    pub sources: BTreeMap<Field, FieldSource>,
    pub warnings: Vec<InputError>,
}

impl ExtractionReport {
    pub const PROCESSING_METHOD: &'static str = "rule_based";
}
