//! Core data structures for wildlife occurrence exploration.
//!
//! Defines occurrence records, the categorical filter fields, the
//! tagged selection type used by every selector, and the column
//! descriptors shared by the table and export views.

use crate::constants::{ALL_LABEL, LATITUDE_COLUMN, LONGITUDE_COLUMN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grouping of filter fields as presented in the control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldGroup {
    Taxonomy,
    Location,
    Status,
}

/// The nine categorical fields a user can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterField {
    Phylum,
    Class,
    Species,
    Continent,
    CountryCode,
    State,
    County,
    Landcover,
    IucnRedListCategory,
}

impl FilterField {
    /// All fields in control panel order
    pub const ALL: [FilterField; 9] = [
        FilterField::Phylum,
        FilterField::Class,
        FilterField::Species,
        FilterField::Continent,
        FilterField::CountryCode,
        FilterField::State,
        FilterField::County,
        FilterField::Landcover,
        FilterField::IucnRedListCategory,
    ];

    /// Fields scanned by the free-text search. Continent is not searched.
    pub const SEARCHABLE: [FilterField; 8] = [
        FilterField::Species,
        FilterField::Phylum,
        FilterField::Class,
        FilterField::State,
        FilterField::CountryCode,
        FilterField::County,
        FilterField::Landcover,
        FilterField::IucnRedListCategory,
    ];

    /// Column name in the source data
    pub fn column_name(&self) -> &'static str {
        match self {
            FilterField::Phylum => "phylum",
            FilterField::Class => "class",
            FilterField::Species => "species",
            FilterField::Continent => "continent",
            FilterField::CountryCode => "countryCode",
            FilterField::State => "state",
            FilterField::County => "county",
            FilterField::Landcover => "landcover",
            FilterField::IucnRedListCategory => "iucnRedListCategory",
        }
    }

    /// Selector label
    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Phylum => "Phylum",
            FilterField::Class => "Class",
            FilterField::Species => "Species",
            FilterField::Continent => "Continent",
            FilterField::CountryCode => "Country",
            FilterField::State => "State",
            FilterField::County => "County",
            FilterField::Landcover => "Landcover",
            FilterField::IucnRedListCategory => "IUCN Status",
        }
    }

    pub fn group(&self) -> FieldGroup {
        match self {
            FilterField::Phylum | FilterField::Class | FilterField::Species => FieldGroup::Taxonomy,
            FilterField::IucnRedListCategory => FieldGroup::Status,
            _ => FieldGroup::Location,
        }
    }

    /// Position of this field in [`FilterField::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Resolve a field from its column name, its label, or a short alias
    /// (`country`, `iucn`, `status`). Matching ignores case.
    pub fn from_name(name: &str) -> Option<Self> {
        let lowered = name.trim().to_lowercase();
        match lowered.as_str() {
            "country" => return Some(FilterField::CountryCode),
            "iucn" | "status" => return Some(FilterField::IucnRedListCategory),
            _ => {}
        }

        Self::ALL.into_iter().find(|field| {
            field.column_name().to_lowercase() == lowered || field.label().to_lowercase() == lowered
        })
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current choice of one selector.
///
/// `All` leaves the field unrestricted. Keeping it out of the value space
/// means a record whose value is literally "All" can still be selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    pub fn only(value: impl Into<String>) -> Self {
        Selection::Only(value.into())
    }

    /// Parse user input where the label "All" stands for no restriction
    pub fn from_choice(choice: &str) -> Self {
        if choice == ALL_LABEL {
            Selection::All
        } else {
            Selection::Only(choice.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Selection::All => None,
            Selection::Only(value) => Some(value),
        }
    }

    /// Exact, case-sensitive match. A missing field value never matches a
    /// concrete selection.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(selected) => value == Some(selected.as_str()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str(ALL_LABEL),
            Selection::Only(value) => f.write_str(value),
        }
    }
}

/// A column of the loaded record table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordColumn {
    Category(FilterField),
    Latitude,
    Longitude,
}

impl RecordColumn {
    /// Canonical column order used when the source order is unknown
    pub fn canonical_order() -> Vec<RecordColumn> {
        FilterField::ALL
            .into_iter()
            .map(RecordColumn::Category)
            .chain([RecordColumn::Latitude, RecordColumn::Longitude])
            .collect()
    }

    pub fn name(&self) -> &'static str {
        match self {
            RecordColumn::Category(field) => field.column_name(),
            RecordColumn::Latitude => LATITUDE_COLUMN,
            RecordColumn::Longitude => LONGITUDE_COLUMN,
        }
    }
}

/// One occurrence observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    pub phylum: Option<String>,
    pub class: Option<String>,
    pub species: Option<String>,
    pub continent: Option<String>,
    pub country_code: Option<String>,
    pub state: Option<String>,
    pub county: Option<String>,
    pub landcover: Option<String>,
    pub iucn_red_list_category: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Record {
    /// Create a record at the given coordinates with every category missing
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            phylum: None,
            class: None,
            species: None,
            continent: None,
            country_code: None,
            state: None,
            county: None,
            landcover: None,
            iucn_red_list_category: None,
            latitude,
            longitude,
        }
    }

    /// Builder-style setter for a categorical field
    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn field(&self, field: FilterField) -> Option<&str> {
        let slot = match field {
            FilterField::Phylum => &self.phylum,
            FilterField::Class => &self.class,
            FilterField::Species => &self.species,
            FilterField::Continent => &self.continent,
            FilterField::CountryCode => &self.country_code,
            FilterField::State => &self.state,
            FilterField::County => &self.county,
            FilterField::Landcover => &self.landcover,
            FilterField::IucnRedListCategory => &self.iucn_red_list_category,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: FilterField) -> &mut Option<String> {
        match field {
            FilterField::Phylum => &mut self.phylum,
            FilterField::Class => &mut self.class,
            FilterField::Species => &mut self.species,
            FilterField::Continent => &mut self.continent,
            FilterField::CountryCode => &mut self.country_code,
            FilterField::State => &mut self.state,
            FilterField::County => &mut self.county,
            FilterField::Landcover => &mut self.landcover,
            FilterField::IucnRedListCategory => &mut self.iucn_red_list_category,
        }
    }

    /// Text rendering of a cell; missing categories render as an empty string
    pub fn cell(&self, column: RecordColumn) -> String {
        match column {
            RecordColumn::Category(field) => self.field(field).unwrap_or_default().to_string(),
            RecordColumn::Latitude => self.latitude.to_string(),
            RecordColumn::Longitude => self.longitude.to_string(),
        }
    }
}
