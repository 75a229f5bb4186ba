//! Turns decoded objective rows into symptoms, skills or abilities.

use crate::import::row::ObjectiveRow;
use crate::import::workbook::CellValue;
use crate::import::ImportConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct SymptomRecord {
    pub id: i32,
    pub name: String,
    pub public: bool,
    pub subjects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillRecord {
    pub id: i32,
    pub name: String,
    pub competence_level: String,
    pub activity: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AbilityRecord {
    pub id: i32,
    pub name: String,
    pub depth: Option<i16>,
    pub subject_related: bool,
    pub public: bool,
    pub study_field: Option<String>,
    pub levels: Vec<String>,
    pub subjects: Vec<String>,
    pub systems: Vec<String>,
    pub ufids: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedRow {
    Symptom(SymptomRecord),
    /// `None` when the row lacks a competence level or an activity name; such rows
    /// contribute nothing.
    Skill(Option<SkillRecord>),
    Ability(AbilityRecord),
}

/// Classifies one row. Rows without a usable id return `None`.
///
/// The symptom flag is checked first, then the competence flag; everything else is an
/// ability.
pub fn classify(row: ObjectiveRow, config: &ImportConfig) -> Option<ClassifiedRow> {
    let id = row.id?;
    if is_true(&row.symptom_flag, &config.value_true) {
        return Some(ClassifiedRow::Symptom(SymptomRecord {
            id,
            name: row.name,
            public: is_true(&row.public, &config.value_true),
            subjects: split_acronyms(&row.subjects),
        }));
    }
    if is_truthy(&row.competence_flag, &config.value_false) {
        let skill = match (row.competence_level(), row.activity.as_text()) {
            (Some(competence_level), Some(activity)) => Some(SkillRecord {
                id,
                name: row.name,
                competence_level,
                activity,
            }),
            _ => None,
        };
        return Some(ClassifiedRow::Skill(skill));
    }
    Some(ClassifiedRow::Ability(AbilityRecord {
        id,
        name: row.name,
        depth: parse_depth(&row.depth),
        subject_related: is_true(&row.subject_related, &config.value_true),
        public: is_true(&row.public, &config.value_true),
        study_field: row.study_field.as_text().map(|acronym| acronym.to_uppercase()),
        levels: split_acronyms(&row.levels),
        subjects: split_acronyms(&row.subjects),
        systems: split_acronyms(&row.systems),
        ufids: parse_ufids(&row.ufids),
    }))
}

/// Case-insensitive match of the trimmed cell text against the configured true token.
pub fn is_true(cell: &CellValue, true_token: &str) -> bool {
    cell.as_text()
        .is_some_and(|text| text.to_lowercase() == true_token.trim().to_lowercase())
}

/// Non-zero numbers and any text other than the configured false token.
pub fn is_truthy(cell: &CellValue, false_token: &str) -> bool {
    match cell {
        CellValue::Number(value) => *value != 0.0,
        CellValue::Text(_) => cell
            .as_text()
            .is_some_and(|text| text.to_lowercase() != false_token.trim().to_lowercase()),
        CellValue::Empty => false,
    }
}

fn parse_depth(cell: &CellValue) -> Option<i16> {
    match cell.as_number() {
        Some(value) if value == 1.0 => Some(1),
        Some(value) if value == 2.0 => Some(2),
        _ => None,
    }
}

/// Comma separated acronyms, trimmed and upper-cased. Empty segments and repeats are dropped;
/// a repeat would only write a second identical association row for the entry.
pub fn split_acronyms(cell: &CellValue) -> Vec<String> {
    let Some(text) = cell.as_text() else {
        return vec![];
    };
    let mut acronyms: Vec<String> = Vec::new();
    for segment in text.split(',') {
        let acronym = segment.trim().to_uppercase();
        if !acronym.is_empty() && !acronyms.contains(&acronym) {
            acronyms.push(acronym);
        }
    }
    acronyms
}

/// UFID cells come as a single number, a float whose integer and fractional digits are two
/// separate UFIDs (`123.456`), or comma separated text.
pub fn parse_ufids(cell: &CellValue) -> Vec<i32> {
    match cell {
        CellValue::Empty => vec![],
        CellValue::Number(value) if value.fract() == 0.0 => cell.as_id().into_iter().collect(),
        CellValue::Number(value) => value
            .to_string()
            .split('.')
            .filter_map(|part| part.parse::<i32>().ok())
            .collect(),
        CellValue::Text(text) => text
            .split(',')
            .filter_map(|part| part.trim().parse::<i32>().ok())
            .collect(),
    }
}
