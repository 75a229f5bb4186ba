//! Folds classified rows into the keyed collections the writer persists.

use crate::import::classify::{AbilityRecord, ClassifiedRow, SkillRecord, SymptomRecord};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Everything one workbook contributes, in document order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CatalogBatch {
    pub levels: IndexMap<String, String>,
    pub subjects: IndexMap<String, String>,
    pub systems: IndexMap<String, String>,
    pub study_fields: IndexMap<String, String>,
    pub competence_levels: IndexMap<String, String>,
    /// Activity name to competence level acronym.
    pub activities: IndexMap<String, String>,
    pub ufids: IndexMap<i32, String>,
    pub skills: IndexMap<i32, SkillRecord>,
    pub abilities: IndexMap<i32, AbilityRecord>,
    pub symptoms: IndexMap<i32, SymptomRecord>,
    pub ability_levels: Vec<(i32, String)>,
    pub ability_subjects: Vec<(i32, String)>,
    pub ability_systems: Vec<(i32, String)>,
    pub ability_ufids: Vec<(i32, i32)>,
    pub symptom_subjects: Vec<(i32, String)>,
}

/// Builds a [`CatalogBatch`]. Reference entities keep the name from their first
/// registration; entities keyed by sheet id keep their last occurrence.
pub struct CatalogAccumulator<'a> {
    glossary: &'a HashMap<String, String>,
    batch: CatalogBatch,
}

impl<'a> CatalogAccumulator<'a> {
    pub fn new(glossary: &'a HashMap<String, String>) -> Self {
        Self {
            glossary,
            batch: CatalogBatch::default(),
        }
    }

    pub fn add_ufids(&mut self, ufids: impl IntoIterator<Item = (i32, String)>) {
        for (id, name) in ufids {
            self.batch.ufids.insert(id, name);
        }
    }

    pub fn add(&mut self, row: ClassifiedRow) {
        match row {
            ClassifiedRow::Symptom(symptom) => {
                for subject in &symptom.subjects {
                    register(&mut self.batch.subjects, self.glossary, subject);
                }
                self.batch.symptoms.insert(symptom.id, symptom);
            }
            ClassifiedRow::Skill(Some(skill)) => {
                register(
                    &mut self.batch.competence_levels,
                    self.glossary,
                    &skill.competence_level,
                );
                self.batch
                    .activities
                    .entry(skill.activity.clone())
                    .or_insert_with(|| skill.competence_level.clone());
                self.batch.skills.insert(skill.id, skill);
            }
            ClassifiedRow::Skill(None) => {}
            ClassifiedRow::Ability(ability) => {
                for level in &ability.levels {
                    register(&mut self.batch.levels, self.glossary, level);
                }
                for subject in &ability.subjects {
                    register(&mut self.batch.subjects, self.glossary, subject);
                }
                for system in &ability.systems {
                    register(&mut self.batch.systems, self.glossary, system);
                }
                if let Some(study_field) = &ability.study_field {
                    register(&mut self.batch.study_fields, self.glossary, study_field);
                }
                self.batch.abilities.insert(ability.id, ability);
            }
        }
    }

    /// Derives the association rows from the final entity records, so a repeated id only
    /// contributes the associations of its last occurrence.
    pub fn finish(mut self) -> CatalogBatch {
        let batch = &mut self.batch;
        for ability in batch.abilities.values() {
            batch
                .ability_levels
                .extend(ability.levels.iter().map(|level| (ability.id, level.clone())));
            batch
                .ability_subjects
                .extend(ability.subjects.iter().map(|subject| (ability.id, subject.clone())));
            batch
                .ability_systems
                .extend(ability.systems.iter().map(|system| (ability.id, system.clone())));
            batch
                .ability_ufids
                .extend(ability.ufids.iter().map(|ufid| (ability.id, *ufid)));
        }
        for symptom in batch.symptoms.values() {
            batch
                .symptom_subjects
                .extend(symptom.subjects.iter().map(|subject| (symptom.id, subject.clone())));
        }
        self.batch
    }
}

fn register(target: &mut IndexMap<String, String>, glossary: &HashMap<String, String>, key: &str) {
    if !target.contains_key(key) {
        let name = glossary.get(key).cloned().unwrap_or_else(|| key.to_string());
        target.insert(key.to_string(), name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ability(id: i32, levels: &[&str]) -> AbilityRecord {
        AbilityRecord {
            id,
            name: format!("Ability {id}"),
            depth: None,
            subject_related: false,
            public: true,
            study_field: None,
            levels: levels.iter().map(|level| level.to_string()).collect(),
            subjects: vec![],
            systems: vec![],
            ufids: vec![],
        }
    }

    #[test]
    fn unresolved_acronym_falls_back_to_itself() {
        let glossary = HashMap::from([("INT".to_string(), "Internal Medicine".to_string())]);
        let mut accumulator = CatalogAccumulator::new(&glossary);
        accumulator.add(ClassifiedRow::Ability(ability(1, &["INT", "SUR"])));
        let batch = accumulator.finish();

        assert_eq!(
            batch.levels.iter().collect::<Vec<_>>(),
            vec![
                (&"INT".to_string(), &"Internal Medicine".to_string()),
                (&"SUR".to_string(), &"SUR".to_string()),
            ]
        );
        assert_eq!(
            batch.ability_levels,
            vec![(1, "INT".to_string()), (1, "SUR".to_string())]
        );
    }

    #[test]
    fn skill_registers_competence_level_and_activity() {
        let glossary = HashMap::from([("A1".to_string(), "Observe".to_string())]);
        let mut accumulator = CatalogAccumulator::new(&glossary);
        accumulator.add(ClassifiedRow::Skill(Some(SkillRecord {
            id: 2,
            name: "Listen".to_string(),
            competence_level: "A1".to_string(),
            activity: "Auscultation".to_string(),
        })));
        accumulator.add(ClassifiedRow::Skill(None));
        let batch = accumulator.finish();

        assert_eq!(batch.competence_levels["A1"], "Observe");
        assert_eq!(batch.activities["Auscultation"], "A1");
        assert_eq!(batch.skills.len(), 1);
        assert!(batch.abilities.is_empty());
    }

    #[test]
    fn activity_keeps_first_competence_level() {
        let glossary = HashMap::new();
        let mut accumulator = CatalogAccumulator::new(&glossary);
        for (id, level) in [(1, "A1"), (2, "B2")] {
            accumulator.add(ClassifiedRow::Skill(Some(SkillRecord {
                id,
                name: "Skill".to_string(),
                competence_level: level.to_string(),
                activity: "Auscultation".to_string(),
            })));
        }
        let batch = accumulator.finish();

        assert_eq!(batch.activities.len(), 1);
        assert_eq!(batch.activities["Auscultation"], "A1");
        assert_eq!(batch.competence_levels.len(), 2);
    }

    #[test]
    fn repeated_id_keeps_last_row_and_its_associations() {
        let glossary = HashMap::new();
        let mut accumulator = CatalogAccumulator::new(&glossary);
        accumulator.add(ClassifiedRow::Ability(ability(7, &["INT"])));
        accumulator.add(ClassifiedRow::Ability(ability(8, &["PED"])));
        let mut replacement = ability(7, &["SUR"]);
        replacement.name = "Renamed".to_string();
        accumulator.add(ClassifiedRow::Ability(replacement));
        let batch = accumulator.finish();

        assert_eq!(batch.abilities.len(), 2);
        assert_eq!(batch.abilities[&7].name, "Renamed");
        assert_eq!(
            batch.ability_levels,
            vec![(7, "SUR".to_string()), (8, "PED".to_string())]
        );
        // the reference entity registered by the replaced row stays in the batch
        assert!(batch.levels.contains_key("INT"));
    }

    #[test]
    fn symptoms_link_to_subjects() {
        let glossary = HashMap::from([("AM".to_string(), "General Medicine".to_string())]);
        let mut accumulator = CatalogAccumulator::new(&glossary);
        accumulator.add(ClassifiedRow::Symptom(SymptomRecord {
            id: 3,
            name: "Fever".to_string(),
            public: true,
            subjects: vec!["AM".to_string()],
        }));
        let batch = accumulator.finish();

        assert_eq!(batch.subjects["AM"], "General Medicine");
        assert_eq!(batch.symptom_subjects, vec![(3, "AM".to_string())]);
        assert!(batch.ability_subjects.is_empty());
    }
}
