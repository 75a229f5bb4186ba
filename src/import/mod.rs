//! Spreadsheet import of the catalog.
//!
//! An upload goes through four stages: the workbook is read ([`workbook`]), each objectives
//! row is decoded and classified ([`row`], [`classify`]), the rows are folded into keyed
//! collections ([`accumulate`]) and the collections are upserted in foreign key order
//! ([`writer`]). The first three stages are pure and run before anything is written.

pub mod accumulate;
pub mod classify;
pub mod error;
pub mod row;
pub mod workbook;
pub mod writer;

use crate::import::accumulate::{CatalogAccumulator, CatalogBatch};
use crate::import::classify::classify;
use crate::import::error::ImportError;
use crate::import::row::ObjectiveRow;
use crate::import::workbook::read_workbook;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::info;
use utoipa::ToSchema;

/// What happens to association rows of entities that are imported again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AssociationPolicy {
    /// Insert only; re-importing an entity adds its associations a second time.
    #[default]
    Append,
    /// Delete the associations of every imported ability and symptom before inserting.
    Replace,
}

impl FromStr for AssociationPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "append" => Ok(AssociationPolicy::Append),
            "replace" => Ok(AssociationPolicy::Replace),
            other => Err(format!(
                "unknown association policy '{other}', expected 'append' or 'replace'"
            )),
        }
    }
}

impl fmt::Display for AssociationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssociationPolicy::Append => write!(f, "append"),
            AssociationPolicy::Replace => write!(f, "replace"),
        }
    }
}

/// Sheet names and cell tokens of the catalog workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportConfig {
    pub sheet_acronyms: String,
    pub sheet_objectives: String,
    pub sheet_ufids: String,
    pub value_true: String,
    pub value_false: String,
    pub association_policy: AssociationPolicy,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            sheet_acronyms: "Abkürzungen gesamt".to_string(),
            sheet_objectives: "Lernziele gesamt_Datenbank".to_string(),
            sheet_ufids: "ufid_IMS_Gesamtliste 2019".to_string(),
            value_true: "ja".to_string(),
            value_false: "nein".to_string(),
            association_policy: AssociationPolicy::Append,
        }
    }
}

/// Rows written per collection by one import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub ufids: usize,
    pub study_fields: usize,
    /// Only competence levels that did not exist before.
    pub competence_levels: usize,
    pub activities: usize,
    pub skills: usize,
    pub abilities: usize,
    pub symptoms: usize,
    pub subjects: usize,
    pub levels: usize,
    pub systems: usize,
    pub associations: usize,
}

/// Reads, classifies and accumulates a workbook without touching the database.
pub fn parse_workbook(bytes: &[u8], config: &ImportConfig) -> Result<CatalogBatch, ImportError> {
    let workbook = read_workbook(bytes, config)?;
    let mut accumulator = CatalogAccumulator::new(&workbook.glossary);
    accumulator.add_ufids(workbook.ufids.iter().cloned());
    let mut skipped = 0;
    for sheet_row in workbook.objective_rows() {
        match classify(ObjectiveRow::decode(&sheet_row), config) {
            Some(classified) => accumulator.add(classified),
            None => skipped += 1,
        }
    }
    let batch = accumulator.finish();
    info!(
        "Parsed workbook: {} abilities, {} skills, {} symptoms, {} rows without id",
        batch.abilities.len(),
        batch.skills.len(),
        batch.symptoms.len(),
        skipped
    );
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_tools::{build_test_workbook, TestRow, TestWorkbook};
    use pretty_assertions::assert_eq;

    #[test]
    fn association_policy_from_str() {
        assert_eq!(
            "append".parse::<AssociationPolicy>(),
            Ok(AssociationPolicy::Append)
        );
        assert_eq!(
            " Replace ".parse::<AssociationPolicy>(),
            Ok(AssociationPolicy::Replace)
        );
        assert!("merge".parse::<AssociationPolicy>().is_err());
    }

    #[test]
    fn symptom_and_skill_rows_yield_no_abilities() {
        let workbook = TestWorkbook {
            glossary: vec![("Observe", "A1")],
            rows: vec![
                TestRow {
                    id: Some(1.0),
                    name: "Chest pain",
                    symptom: "ja",
                    ..Default::default()
                },
                TestRow {
                    id: Some(2.0),
                    name: "Listen to the heart",
                    levels: "A1",
                    activity: "Auscultation",
                    competence: Some(1.0),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let bytes = build_test_workbook(&workbook);
        let batch = parse_workbook(&bytes, &ImportConfig::default()).unwrap();

        assert_eq!(batch.symptoms.len(), 1);
        assert_eq!(batch.symptoms[&1].name, "Chest pain");
        assert_eq!(batch.competence_levels.len(), 1);
        assert_eq!(batch.competence_levels["A1"], "Observe");
        assert_eq!(batch.activities["Auscultation"], "A1");
        assert_eq!(batch.skills.len(), 1);
        assert_eq!(batch.skills[&2].activity, "Auscultation");
        assert!(batch.abilities.is_empty());
    }

    #[test]
    fn custom_sheet_names_and_tokens() {
        let config = ImportConfig {
            sheet_acronyms: "Glossary".to_string(),
            sheet_objectives: "Objectives".to_string(),
            sheet_ufids: "Units".to_string(),
            value_true: "yes".to_string(),
            value_false: "no".to_string(),
            association_policy: AssociationPolicy::Append,
        };
        let workbook = TestWorkbook {
            sheet_acronyms: "Glossary",
            sheet_objectives: "Objectives",
            sheet_ufids: "Units",
            rows: vec![
                TestRow {
                    id: Some(5.0),
                    name: "Fever",
                    symptom: "YES",
                    ..Default::default()
                },
                TestRow {
                    id: Some(6.0),
                    name: "Explain",
                    competence_text: "no",
                    public: "yes",
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let bytes = build_test_workbook(&workbook);
        let batch = parse_workbook(&bytes, &config).unwrap();

        assert_eq!(batch.symptoms.len(), 1);
        assert_eq!(batch.abilities.len(), 1);
        assert!(batch.abilities[&6].public);
    }

    #[test]
    fn rows_without_id_are_skipped() {
        let workbook = TestWorkbook {
            rows: vec![
                TestRow {
                    id: None,
                    name: "Chapter 1",
                    ..Default::default()
                },
                TestRow {
                    id: Some(9.0),
                    name: "Explain",
                    ufids: Some(123.456),
                    ..Default::default()
                },
            ],
            ufids: vec![(123, "Cardiology"), (456, "Neurology")],
            ..Default::default()
        };
        let bytes = build_test_workbook(&workbook);
        let batch = parse_workbook(&bytes, &ImportConfig::default()).unwrap();

        assert_eq!(batch.abilities.len(), 1);
        assert_eq!(batch.ability_ufids, vec![(9, 123), (9, 456)]);
        assert_eq!(batch.ufids.len(), 2);
    }
}
