//! Parts: the in-house / outsourced sum type and its validated input.

use core::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use partsbin_core::{Entity, Field, PartId, Problem, StockLevels, ValidationError};

/// Where a part comes from, with the attribute specific to that origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PartSource {
    /// Made on site, on the given machine.
    InHouse { machine_id: i64 },
    /// Bought from the named company.
    Outsourced { company_name: String },
}

impl PartSource {
    pub fn kind(&self) -> PartKind {
        match self {
            PartSource::InHouse { .. } => PartKind::InHouse,
            PartSource::Outsourced { .. } => PartKind::Outsourced,
        }
    }
}

/// Part variant selector, as picked by a radio button on the part form.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    InHouse,
    Outsourced,
}

impl PartKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartKind::InHouse => "in-house",
            PartKind::Outsourced => "outsourced",
        }
    }

    /// The form field holding the kind-specific attribute.
    pub fn detail_field(&self) -> Field {
        match self {
            PartKind::InHouse => Field::MachineId,
            PartKind::Outsourced => Field::CompanyName,
        }
    }
}

impl core::fmt::Display for PartKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PartKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "in-house" | "inhouse" | "in_house" => Ok(PartKind::InHouse),
            "outsourced" => Ok(PartKind::Outsourced),
            _ => Err(ValidationError::new(Field::Kind, Problem::UnknownKind)),
        }
    }
}

/// Validated attributes of a part, everything except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartInput {
    name: String,
    price: Decimal,
    levels: StockLevels,
    source: PartSource,
}

impl PartInput {
    /// Checks the attributes the other types cannot: non-blank name,
    /// non-negative price, non-blank company name.
    pub fn new(
        name: impl Into<String>,
        price: Decimal,
        levels: StockLevels,
        source: PartSource,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::blank(Field::Name));
        }
        if price < Decimal::ZERO {
            return Err(ValidationError::negative(Field::Price));
        }
        if let PartSource::Outsourced { company_name } = &source {
            if company_name.trim().is_empty() {
                return Err(ValidationError::blank(Field::CompanyName));
            }
        }
        Ok(Self {
            name,
            price,
            levels,
            source,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &PartSource {
        &self.source
    }

    pub fn into_part(self, id: PartId) -> Part {
        Part {
            id,
            name: self.name,
            price: self.price,
            levels: self.levels,
            source: self.source,
        }
    }
}

/// An inventory part.
///
/// Passive record: the store owns the collection, the part knows nothing of
/// the products that use it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PartRecord")]
pub struct Part {
    id: PartId,
    name: String,
    price: Decimal,
    #[serde(flatten)]
    levels: StockLevels,
    #[serde(flatten)]
    source: PartSource,
}

/// Wire shape of a [`Part`]; converted through [`PartInput::new`].
#[derive(Deserialize)]
struct PartRecord {
    id: PartId,
    name: String,
    price: Decimal,
    #[serde(flatten)]
    levels: StockLevels,
    #[serde(flatten)]
    source: PartSource,
}

impl TryFrom<PartRecord> for Part {
    type Error = ValidationError;

    fn try_from(record: PartRecord) -> Result<Self, Self::Error> {
        let input = PartInput::new(record.name, record.price, record.levels, record.source)?;
        Ok(input.into_part(record.id))
    }
}

impl Part {
    pub fn id(&self) -> PartId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock(&self) -> i64 {
        self.levels.stock()
    }

    pub fn min(&self) -> i64 {
        self.levels.min()
    }

    pub fn max(&self) -> i64 {
        self.levels.max()
    }

    pub fn levels(&self) -> StockLevels {
        self.levels
    }

    pub fn source(&self) -> &PartSource {
        &self.source
    }

    pub fn kind(&self) -> PartKind {
        self.source.kind()
    }

    pub fn machine_id(&self) -> Option<i64> {
        match &self.source {
            PartSource::InHouse { machine_id } => Some(*machine_id),
            PartSource::Outsourced { .. } => None,
        }
    }

    pub fn company_name(&self) -> Option<&str> {
        match &self.source {
            PartSource::InHouse { .. } => None,
            PartSource::Outsourced { company_name } => Some(company_name),
        }
    }
}

impl Entity for Part {
    type Id = PartId;

    fn id(&self) -> PartId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
