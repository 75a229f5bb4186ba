//! Persists a [`CatalogBatch`] in foreign key order.
//!
//! Steps run strictly one after another and the first failing statement aborts the rest.
//! No transaction is opened here: steps that already ran stay committed.

use crate::import::accumulate::CatalogBatch;
use crate::import::error::ImportError;
use crate::import::{AssociationPolicy, ImportSummary};
use crate::repos::catalog_import_repo::{
    AssociationKind, CatalogImportRepo, ReferenceKind, SkillRow,
};
use indexmap::IndexMap;
use tracing::{info, warn};

fn pairs<K: Clone, V: Clone>(map: &IndexMap<K, V>) -> Vec<(K, V)> {
    map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

pub async fn write_batch(
    repo: &dyn CatalogImportRepo,
    batch: &CatalogBatch,
    policy: AssociationPolicy,
) -> Result<ImportSummary, ImportError> {
    let mut summary = ImportSummary::default();

    let ufids = pairs(&batch.ufids);
    repo.upsert_ufids(&ufids).await?;
    summary.ufids = ufids.len();
    info!("Upserted {} UFIDs", summary.ufids);

    let study_fields = pairs(&batch.study_fields);
    repo.upsert_reference(ReferenceKind::StudyField, &study_fields)
        .await?;
    summary.study_fields = study_fields.len();
    info!("Upserted {} study fields", summary.study_fields);

    let competence_levels = pairs(&batch.competence_levels);
    let created = repo
        .insert_missing_competence_levels(&competence_levels)
        .await?;
    summary.competence_levels = created as usize;
    info!(
        "Inserted {} new competence levels of {} referenced",
        created,
        competence_levels.len()
    );

    let activities = pairs(&batch.activities);
    repo.upsert_activities(&activities).await?;
    summary.activities = activities.len();
    info!("Upserted {} activities", summary.activities);
    let activity_ids = repo.activity_ids_by_name().await?;

    let mut skills = Vec::with_capacity(batch.skills.len());
    for skill in batch.skills.values() {
        match activity_ids.get(&skill.activity) {
            Some(activity_id) => skills.push(SkillRow {
                id: skill.id,
                name: skill.name.clone(),
                activity_id: *activity_id,
            }),
            None => warn!(
                "Skipping skill {}: activity '{}' was not found after upsert",
                skill.id, skill.activity
            ),
        }
    }
    repo.upsert_skills(&skills).await?;
    summary.skills = skills.len();
    info!("Upserted {} skills", summary.skills);

    let abilities: Vec<_> = batch.abilities.values().cloned().collect();
    repo.upsert_abilities(&abilities).await?;
    summary.abilities = abilities.len();
    info!("Upserted {} abilities", summary.abilities);

    let symptoms: Vec<_> = batch.symptoms.values().cloned().collect();
    repo.upsert_symptoms(&symptoms).await?;
    summary.symptoms = symptoms.len();
    info!("Upserted {} symptoms", summary.symptoms);

    let subjects = pairs(&batch.subjects);
    repo.upsert_reference(ReferenceKind::Subject, &subjects)
        .await?;
    summary.subjects = subjects.len();
    let levels = pairs(&batch.levels);
    repo.upsert_reference(ReferenceKind::Level, &levels).await?;
    summary.levels = levels.len();
    let systems = pairs(&batch.systems);
    repo.upsert_reference(ReferenceKind::System, &systems).await?;
    summary.systems = systems.len();
    info!(
        "Upserted {} subjects, {} levels and {} systems",
        summary.subjects, summary.levels, summary.systems
    );

    if policy == AssociationPolicy::Replace {
        let ability_ids: Vec<i32> = batch.abilities.keys().copied().collect();
        let symptom_ids: Vec<i32> = batch.symptoms.keys().copied().collect();
        let deleted = repo
            .delete_associations(&ability_ids, &symptom_ids)
            .await?;
        info!("Deleted {} previous association rows", deleted);
    }

    repo.insert_associations(AssociationKind::AbilitySubject, &batch.ability_subjects)
        .await?;
    repo.insert_associations(AssociationKind::SymptomSubject, &batch.symptom_subjects)
        .await?;
    repo.insert_associations(AssociationKind::AbilityLevel, &batch.ability_levels)
        .await?;
    repo.insert_associations(AssociationKind::AbilitySystem, &batch.ability_systems)
        .await?;
    repo.insert_ability_ufids(&batch.ability_ufids).await?;
    summary.associations = batch.ability_subjects.len()
        + batch.symptom_subjects.len()
        + batch.ability_levels.len()
        + batch.ability_systems.len()
        + batch.ability_ufids.len();
    info!("Inserted {} association rows", summary.associations);

    Ok(summary)
}
