//! Test utilities for creating mock implementations and test fixtures.
//! This module provides in-memory implementations of repositories and services
//! to facilitate testing without requiring actual database or external API connections.

use crate::app_factory::{create_app, AppState};
use crate::auth::JWT_KEYS;
use crate::import::classify::{AbilityRecord, SymptomRecord};
use crate::import::ImportConfig;
use crate::models::auth::{JWTClaims, Role};
use crate::models::common::{CommentReview, FeedbackScope, NewFeedback};
use crate::models::request::{
    AbilityPagination, CreateUniversityRequest, FeedbackPagination, SymptomPagination,
};
use crate::models::response::{
    AbilityDetailResponse, AbilityResponse, ActivityResponse, CommentableResponse,
    CompetenceLevelResponse, ContactResponse, FeedbackDetailResponse, ReferenceResponse,
    SymptomDetailResponse, UfidResponse, UniversityResponse,
};
use crate::repos::catalog_import_repo::{
    AssociationKind, CatalogImportRepo, ReferenceKind, SkillRow,
};
use crate::repos::catalog_repo::CatalogRepo;
use crate::repos::emails_repo::EmailsRepo;
use crate::repos::feedback_repo::FeedbackRepo;
use crate::repos::university_repo::UniversityRepo;
use crate::services::catalog_service::CatalogService;
use crate::services::feedback_service::FeedbackService;
use crate::services::import_service::ImportService;
use crate::services::university_service::UniversityService;
use ::entity::sea_orm_active_enums::{CommentStatus, CommentTarget};
use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, NaiveDateTime, Utc};
use entity::ability::Model as AbilityModel;
use entity::catalog_comment::Model as CatalogCommentModel;
use entity::competence_level::Model as CompetenceLevelModel;
use entity::feedback::Model as FeedbackModel;
use entity::skill::Model as SkillModel;
use entity::symptom::Model as SymptomModel;
use jsonwebtoken::{encode, Header};
use reqwest::Error;
use rust_xlsxwriter::Workbook;
use sea_orm::DbErr;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const VALID_FEEDBACK_TOKEN: &str = "valid-token";
pub const MULTIPART_BOUNDARY: &str = "lzk-test-boundary";
const TEST_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Tables written by the workbook import, held in memory.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogStore {
    pub ufids: HashMap<i32, String>,
    pub references: HashMap<(ReferenceKind, String), String>,
    pub competence_levels: HashMap<String, CompetenceLevelModel>,
    /// Activity name to (id, competence level id).
    pub activities: HashMap<String, (i32, String)>,
    pub skills: HashMap<i32, SkillRow>,
    pub abilities: HashMap<i32, AbilityRecord>,
    pub symptoms: HashMap<i32, SymptomRecord>,
    pub ability_levels: Vec<(i32, String)>,
    pub ability_subjects: Vec<(i32, String)>,
    pub ability_systems: Vec<(i32, String)>,
    pub symptom_subjects: Vec<(i32, String)>,
    pub ability_ufids: Vec<(i32, i32)>,
}

/// In-memory implementation of CatalogImportRepo for testing.
/// Enforces the foreign keys of the real schema and records every call in order, so
/// tests can assert on write ordering. `failing_at` makes the named call fail.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogImportRepo {
    store: Arc<Mutex<InMemoryCatalogStore>>,
    calls: Arc<Mutex<Vec<String>>>,
    fail_at: Option<&'static str>,
}

fn reference_label(kind: ReferenceKind) -> &'static str {
    match kind {
        ReferenceKind::Level => "level",
        ReferenceKind::Subject => "subject",
        ReferenceKind::System => "system",
        ReferenceKind::StudyField => "study_field",
    }
}

fn association_label(kind: AssociationKind) -> &'static str {
    match kind {
        AssociationKind::AbilityLevel => "ability_level",
        AssociationKind::AbilitySubject => "ability_subject",
        AssociationKind::AbilitySystem => "ability_system",
        AssociationKind::SymptomSubject => "symptom_subject",
    }
}

fn foreign_key_violation(message: String) -> DbErr {
    DbErr::Custom(format!("foreign key violation: {message}"))
}

impl InMemoryCatalogImportRepo {
    pub fn failing_at(call: &'static str) -> Self {
        Self {
            fail_at: Some(call),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn snapshot(&self) -> InMemoryCatalogStore {
        self.store.lock().unwrap().clone()
    }

    pub fn seed_competence_level(&self, id: &str, name: &str, position: i32) {
        self.store.lock().unwrap().competence_levels.insert(
            id.to_string(),
            CompetenceLevelModel {
                id: id.to_string(),
                name: name.to_string(),
                short: id.to_string(),
                description: String::new(),
                position,
            },
        );
    }

    fn record(&self, call: String) -> Result<(), DbErr> {
        let fails = self.fail_at == Some(call.as_str());
        self.calls.lock().unwrap().push(call);
        if fails {
            return Err(DbErr::Custom("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogImportRepo for InMemoryCatalogImportRepo {
    async fn upsert_ufids(&self, rows: &[(i32, String)]) -> Result<u64, DbErr> {
        self.record("upsert_ufids".to_string())?;
        let mut store = self.store.lock().unwrap();
        for (id, name) in rows {
            store.ufids.insert(*id, name.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn upsert_reference(
        &self,
        kind: ReferenceKind,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr> {
        self.record(format!("upsert_reference:{}", reference_label(kind)))?;
        let mut store = self.store.lock().unwrap();
        for (id, name) in rows {
            store.references.insert((kind, id.clone()), name.clone());
        }
        Ok(rows.len() as u64)
    }

    /// Creates levels missing from the store at the next free positions.
    async fn insert_missing_competence_levels(
        &self,
        rows: &[(String, String)],
    ) -> Result<u64, DbErr> {
        self.record("insert_missing_competence_levels".to_string())?;
        let mut store = self.store.lock().unwrap();
        let mut position = store
            .competence_levels
            .values()
            .map(|level| level.position)
            .max()
            .unwrap_or(0);
        let mut created = 0;
        for (id, name) in rows {
            if store.competence_levels.contains_key(id) {
                continue;
            }
            position += 1;
            created += 1;
            store.competence_levels.insert(
                id.clone(),
                CompetenceLevelModel {
                    id: id.clone(),
                    name: name.clone(),
                    short: id.clone(),
                    description: String::new(),
                    position,
                },
            );
        }
        Ok(created)
    }

    async fn upsert_activities(&self, rows: &[(String, String)]) -> Result<u64, DbErr> {
        self.record("upsert_activities".to_string())?;
        let mut store = self.store.lock().unwrap();
        for (name, competence_level) in rows {
            if !store.competence_levels.contains_key(competence_level) {
                return Err(foreign_key_violation(format!(
                    "competence level {competence_level}"
                )));
            }
            let next_id = store.activities.len() as i32 + 1;
            let entry = store
                .activities
                .entry(name.clone())
                .or_insert((next_id, competence_level.clone()));
            entry.1 = competence_level.clone();
        }
        Ok(rows.len() as u64)
    }

    async fn activity_ids_by_name(&self) -> Result<HashMap<String, i32>, DbErr> {
        self.record("activity_ids_by_name".to_string())?;
        let store = self.store.lock().unwrap();
        Ok(store
            .activities
            .iter()
            .map(|(name, (id, _))| (name.clone(), *id))
            .collect())
    }

    async fn upsert_skills(&self, rows: &[SkillRow]) -> Result<u64, DbErr> {
        self.record("upsert_skills".to_string())?;
        let mut store = self.store.lock().unwrap();
        for row in rows {
            if !store.activities.values().any(|(id, _)| *id == row.activity_id) {
                return Err(foreign_key_violation(format!("activity {}", row.activity_id)));
            }
            store.skills.insert(row.id, row.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn upsert_abilities(&self, rows: &[AbilityRecord]) -> Result<u64, DbErr> {
        self.record("upsert_abilities".to_string())?;
        let mut store = self.store.lock().unwrap();
        for row in rows {
            if let Some(study_field) = &row.study_field {
                if !store
                    .references
                    .contains_key(&(ReferenceKind::StudyField, study_field.clone()))
                {
                    return Err(foreign_key_violation(format!("study field {study_field}")));
                }
            }
            store.abilities.insert(row.id, row.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn upsert_symptoms(&self, rows: &[SymptomRecord]) -> Result<u64, DbErr> {
        self.record("upsert_symptoms".to_string())?;
        let mut store = self.store.lock().unwrap();
        for row in rows {
            store.symptoms.insert(row.id, row.clone());
        }
        Ok(rows.len() as u64)
    }

    async fn delete_associations(
        &self,
        ability_ids: &[i32],
        symptom_ids: &[i32],
    ) -> Result<u64, DbErr> {
        self.record("delete_associations".to_string())?;
        let mut store = self.store.lock().unwrap();
        let before = store.ability_levels.len()
            + store.ability_subjects.len()
            + store.ability_systems.len()
            + store.ability_ufids.len()
            + store.symptom_subjects.len();
        store
            .ability_levels
            .retain(|(owner, _)| !ability_ids.contains(owner));
        store
            .ability_subjects
            .retain(|(owner, _)| !ability_ids.contains(owner));
        store
            .ability_systems
            .retain(|(owner, _)| !ability_ids.contains(owner));
        store
            .ability_ufids
            .retain(|(owner, _)| !ability_ids.contains(owner));
        store
            .symptom_subjects
            .retain(|(owner, _)| !symptom_ids.contains(owner));
        let after = store.ability_levels.len()
            + store.ability_subjects.len()
            + store.ability_systems.len()
            + store.ability_ufids.len()
            + store.symptom_subjects.len();
        Ok((before - after) as u64)
    }

    async fn insert_associations(
        &self,
        kind: AssociationKind,
        rows: &[(i32, String)],
    ) -> Result<u64, DbErr> {
        self.record(format!("insert_associations:{}", association_label(kind)))?;
        let mut store = self.store.lock().unwrap();
        let target_kind = match kind {
            AssociationKind::AbilityLevel => ReferenceKind::Level,
            AssociationKind::AbilitySubject | AssociationKind::SymptomSubject => {
                ReferenceKind::Subject
            }
            AssociationKind::AbilitySystem => ReferenceKind::System,
        };
        for (owner, target) in rows {
            let owner_exists = match kind {
                AssociationKind::SymptomSubject => store.symptoms.contains_key(owner),
                _ => store.abilities.contains_key(owner),
            };
            if !owner_exists {
                return Err(foreign_key_violation(format!("owner {owner}")));
            }
            if !store
                .references
                .contains_key(&(target_kind, target.clone()))
            {
                return Err(foreign_key_violation(format!("target {target}")));
            }
        }
        let table = match kind {
            AssociationKind::AbilityLevel => &mut store.ability_levels,
            AssociationKind::AbilitySubject => &mut store.ability_subjects,
            AssociationKind::AbilitySystem => &mut store.ability_systems,
            AssociationKind::SymptomSubject => &mut store.symptom_subjects,
        };
        table.extend(rows.iter().cloned());
        Ok(rows.len() as u64)
    }

    async fn insert_ability_ufids(&self, rows: &[(i32, i32)]) -> Result<u64, DbErr> {
        self.record("insert_ability_ufids".to_string())?;
        let mut store = self.store.lock().unwrap();
        for (ability, ufid) in rows {
            if !store.abilities.contains_key(ability) || !store.ufids.contains_key(ufid) {
                return Err(foreign_key_violation(format!("ability {ability} ufid {ufid}")));
            }
        }
        store.ability_ufids.extend(rows.iter().copied());
        Ok(rows.len() as u64)
    }
}

/// In-memory implementation of CatalogRepo for testing.
/// Knows ability 1, symptom 1 and activity 1; everything else is missing.
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalogRepo {}

#[async_trait]
impl CatalogRepo for InMemoryCatalogRepo {
    async fn list_abilities(
        &self,
        _params: AbilityPagination,
    ) -> Result<(Vec<AbilityModel>, u64), DbErr> {
        Ok(mock_paginated_abilities())
    }

    async fn get_ability(&self, id: i32) -> Result<Option<AbilityDetailResponse>, DbErr> {
        Ok((id == 1).then(mock_ability_detail))
    }

    async fn list_symptoms(
        &self,
        _params: SymptomPagination,
    ) -> Result<(Vec<SymptomModel>, u64), DbErr> {
        Ok((vec![mock_symptom()], 1))
    }

    async fn get_symptom(&self, id: i32) -> Result<Option<SymptomDetailResponse>, DbErr> {
        Ok((id == 1).then(|| SymptomDetailResponse {
            symptom: mock_symptom().into(),
            subjects: vec![mock_subject()],
        }))
    }

    async fn list_competence_levels(&self) -> Result<Vec<CompetenceLevelResponse>, DbErr> {
        Ok(vec![CompetenceLevelResponse {
            id: "A1".to_string(),
            name: "Observe".to_string(),
            short: "A1".to_string(),
            description: String::new(),
            position: 1,
            activities: vec![mock_activity()],
        }])
    }

    async fn list_skills(
        &self,
        activity_id: i32,
        _page: u64,
        _per_page: u64,
    ) -> Result<Option<(Vec<SkillModel>, u64)>, DbErr> {
        Ok((activity_id == 1).then(|| {
            (
                vec![SkillModel {
                    id: 20,
                    name: "Listen to the heart".to_string(),
                    activity_id,
                }],
                1,
            )
        }))
    }
}

/// In-memory implementation of UniversityRepo for testing.
/// University 1 exists with a single contact.
#[derive(Clone, Debug, Default)]
pub struct InMemoryUniversityRepo {}

#[async_trait]
impl UniversityRepo for InMemoryUniversityRepo {
    /// Echoes the request back with fresh ids.
    async fn write_one(
        &self,
        create_university_request: CreateUniversityRequest,
    ) -> Result<UniversityResponse, DbErr> {
        Ok(UniversityResponse {
            id: 2,
            name: create_university_request.name,
            url: create_university_request.url,
            contacts: create_university_request
                .contacts
                .into_iter()
                .enumerate()
                .map(|(index, contact)| ContactResponse {
                    id: index as i32 + 2,
                    salutation: contact.salutation,
                    email: contact.email,
                })
                .collect(),
        })
    }

    async fn list(&self) -> Result<Vec<UniversityResponse>, DbErr> {
        Ok(vec![mock_university()])
    }

    async fn get_one(&self, id: i32) -> Result<Option<UniversityResponse>, DbErr> {
        Ok((id == 1).then(mock_university))
    }
}

/// In-memory implementation of FeedbackRepo for testing.
///
/// Only subjects `INT` and `SUR` and activity 1 exist. Feedback request 1 covers `INT` and
/// activity 1 and is reachable with [`VALID_FEEDBACK_TOKEN`]. Comment 1 is open, comment 2
/// was already reviewed. Entry 1 of every target is in scope.
#[derive(Clone, Debug, Default)]
pub struct InMemoryFeedbackRepo {}

#[async_trait]
impl FeedbackRepo for InMemoryFeedbackRepo {
    async fn verify_scope_exists(
        &self,
        subject_ids: &[String],
        activity_ids: &[i32],
    ) -> Result<bool, DbErr> {
        let subjects = ["INT", "SUR"]
            .iter()
            .filter(|known| subject_ids.iter().any(|subject| subject == *known))
            .count();
        let activities = activity_ids.iter().filter(|activity| **activity == 1).count().min(1);
        Ok(subjects == subject_ids.len() && activities == activity_ids.len())
    }

    async fn write_one(&self, new_feedback: NewFeedback) -> Result<FeedbackModel, DbErr> {
        Ok(FeedbackModel {
            university_id: new_feedback.university_id,
            secret: new_feedback.secret,
            ..mock_feedback()
        })
    }

    async fn list_paginated(
        &self,
        _params: FeedbackPagination,
    ) -> Result<(Vec<FeedbackModel>, u64), DbErr> {
        Ok((vec![mock_feedback()], 1))
    }

    async fn get_one(&self, id: i32) -> Result<Option<FeedbackDetailResponse>, DbErr> {
        Ok((id == 1).then(|| FeedbackDetailResponse {
            feedback: mock_feedback().into(),
            subjects: vec![mock_subject()],
            activities: vec![mock_activity()],
            comments: vec![mock_comment(CommentTarget::Ability).into()],
        }))
    }

    async fn get_by_secret(&self, secret: &str) -> Result<Option<FeedbackScope>, DbErr> {
        Ok((secret == VALID_FEEDBACK_TOKEN).then(|| FeedbackScope {
            feedback: mock_feedback(),
            subjects: vec![mock_subject()],
            activities: vec![mock_activity()],
        }))
    }

    async fn update_notes(&self, feedback_id: i32, notes: String) -> Result<FeedbackModel, DbErr> {
        Ok(FeedbackModel {
            id: feedback_id,
            notes,
            ..mock_feedback()
        })
    }

    async fn review_comment(
        &self,
        comment_id: i32,
        status: CommentStatus,
    ) -> Result<CommentReview<CatalogCommentModel>, DbErr> {
        Ok(match comment_id {
            1 => CommentReview::Updated(CatalogCommentModel {
                status,
                ..mock_comment(CommentTarget::Ability)
            }),
            2 => CommentReview::AlreadyReviewed,
            _ => CommentReview::NotFound,
        })
    }

    async fn commentable_abilities(
        &self,
        _feedback_id: i32,
        _subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        Ok(vec![CommentableResponse {
            id: 1,
            name: "Explain a diagnosis".to_string(),
            comment: Some(mock_comment(CommentTarget::Ability).into()),
        }])
    }

    async fn commentable_symptoms(
        &self,
        _feedback_id: i32,
        _subject_id: &str,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        Ok(vec![CommentableResponse {
            id: 1,
            name: "Fever".to_string(),
            comment: None,
        }])
    }

    async fn commentable_skills(
        &self,
        _feedback_id: i32,
        _activity_id: i32,
    ) -> Result<Vec<CommentableResponse>, DbErr> {
        Ok(vec![CommentableResponse {
            id: 20,
            name: "Listen to the heart".to_string(),
            comment: None,
        }])
    }

    async fn target_in_scope(
        &self,
        _feedback_id: i32,
        _target: CommentTarget,
        target_id: i32,
    ) -> Result<bool, DbErr> {
        Ok(target_id == 1)
    }

    /// Always answers a freshly opened comment.
    async fn upsert_comment(
        &self,
        feedback_id: i32,
        target: CommentTarget,
        target_id: i32,
        comment: String,
    ) -> Result<CatalogCommentModel, DbErr> {
        Ok(CatalogCommentModel {
            feedback_id,
            target_id,
            comment,
            ..mock_comment(target)
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// In-memory implementation of EmailsRepo for testing. Keeps every email it was asked
/// to send.
#[derive(Clone, Debug, Default)]
pub struct InMemoryEmailsRepo {
    sent: Arc<Mutex<Vec<SentEmail>>>,
}

impl InMemoryEmailsRepo {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailsRepo for InMemoryEmailsRepo {
    async fn send_email(&self, to: String, subject: String, html_body: String) -> Result<(), Error> {
        self.sent.lock().unwrap().push(SentEmail {
            to,
            subject,
            html_body,
        });
        Ok(())
    }
}

pub fn build_test_import_service() -> ImportService {
    ImportService {
        catalog_import_repo: Arc::new(InMemoryCatalogImportRepo::default()),
        import_config: Arc::new(ImportConfig::default()),
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
    }
}

pub fn build_test_catalog_service() -> CatalogService {
    CatalogService {
        catalog_repo: Arc::new(InMemoryCatalogRepo::default()),
    }
}

pub fn build_test_university_service() -> UniversityService {
    UniversityService {
        university_repo: Arc::new(InMemoryUniversityRepo::default()),
    }
}

/// Builds a feedback service mailing into `emails_repo`.
pub fn build_test_feedback_service(emails_repo: InMemoryEmailsRepo) -> FeedbackService {
    FeedbackService {
        feedback_repo: Arc::new(InMemoryFeedbackRepo::default()),
        university_repo: Arc::new(InMemoryUniversityRepo::default()),
        emails_repo: Arc::new(emails_repo),
        public_base_url: "https://lzk.example.org/".to_string(),
    }
}

/// Creates a test application instance with in-memory services.
/// The returned Router can be used with axum test utilities.
pub fn build_test_app() -> Router {
    let app_state = AppState {
        import_service: build_test_import_service(),
        catalog_service: build_test_catalog_service(),
        university_service: build_test_university_service(),
        feedback_service: build_test_feedback_service(InMemoryEmailsRepo::default()),
    };
    create_app(app_state, vec![], true)
}

fn mock_timestamp() -> NaiveDateTime {
    DateTime::from_timestamp(1_700_000_000, 0)
        .unwrap_or_default()
        .naive_utc()
}

fn mock_subject() -> ReferenceResponse {
    ReferenceResponse {
        id: "INT".to_string(),
        name: "Internal Medicine".to_string(),
    }
}

fn mock_activity() -> ActivityResponse {
    ActivityResponse {
        id: 1,
        name: "Auscultation".to_string(),
    }
}

fn mock_symptom() -> SymptomModel {
    SymptomModel {
        id: 1,
        name: "Fever".to_string(),
        public: true,
    }
}

fn mock_ability() -> AbilityModel {
    AbilityModel {
        id: 1,
        name: "Explain a diagnosis".to_string(),
        depth: Some(1),
        subject_related: true,
        public: true,
        study_field_id: Some("HM".to_string()),
    }
}

pub fn mock_paginated_abilities() -> (Vec<AbilityModel>, u64) {
    (vec![mock_ability()], 1)
}

pub fn mock_ability_detail() -> AbilityDetailResponse {
    AbilityDetailResponse {
        ability: AbilityResponse::from(mock_ability()),
        study_field: Some(ReferenceResponse {
            id: "HM".to_string(),
            name: "Human Medicine".to_string(),
        }),
        levels: vec![ReferenceResponse {
            id: "M1".to_string(),
            name: "Master 1".to_string(),
        }],
        subjects: vec![mock_subject()],
        systems: vec![ReferenceResponse {
            id: "CV".to_string(),
            name: "Cardiovascular".to_string(),
        }],
        ufids: vec![UfidResponse {
            id: 101,
            name: "Cardiology".to_string(),
        }],
    }
}

pub fn mock_university() -> UniversityResponse {
    UniversityResponse {
        id: 1,
        name: "Universität Bern".to_string(),
        url: "https://www.unibe.ch".to_string(),
        contacts: vec![ContactResponse {
            id: 1,
            salutation: "Dear Dr. Huber".to_string(),
            email: "huber@example.org".to_string(),
        }],
    }
}

pub fn mock_feedback() -> FeedbackModel {
    FeedbackModel {
        id: 1,
        university_id: 1,
        secret: VALID_FEEDBACK_TOKEN.to_string(),
        notes: String::new(),
        created_at: mock_timestamp(),
    }
}

pub fn mock_comment(target: CommentTarget) -> CatalogCommentModel {
    CatalogCommentModel {
        id: 1,
        feedback_id: 1,
        target,
        target_id: 1,
        comment: "Depth should be 2".to_string(),
        status: CommentStatus::Open,
        created_at: mock_timestamp(),
        modified_at: mock_timestamp(),
    }
}

pub fn get_mock_jwt() -> String {
    get_mock_jwt_with_role(Role::Admin)
}

pub fn get_mock_jwt_with_role(role: Role) -> String {
    let expiry_time: DateTime<Utc> = Utc::now() + chrono::Duration::hours(24);
    let claims = JWTClaims {
        sub: "someuser@example.org".to_string(),
        exp: expiry_time.timestamp() as usize,
        role,
    };
    encode(&Header::default(), &claims, &JWT_KEYS.encoding).expect("Failed to encode JWT")
}

/// Body of a `multipart/form-data` request with one file field, delimited by
/// [`MULTIPART_BOUNDARY`].
pub fn multipart_body(
    field_name: &str,
    file_name: &str,
    content_type: &str,
    contents: &[u8],
) -> Vec<u8> {
    let mut body = format!(
        "--{MULTIPART_BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {content_type}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}

/// One row of the objectives sheet. Empty strings and `None` leave the cell blank.
#[derive(Clone, Debug, Default)]
pub struct TestRow {
    pub id: Option<f64>,
    pub name: &'static str,
    pub depth: Option<f64>,
    pub levels: &'static str,
    pub activity: &'static str,
    pub subjects: &'static str,
    pub subject_related: &'static str,
    pub symptom: &'static str,
    pub competence: Option<f64>,
    pub competence_text: &'static str,
    pub systems: &'static str,
    pub public: &'static str,
    pub ufids: Option<f64>,
    pub ufids_text: &'static str,
    pub study_field: &'static str,
}

/// A catalog workbook to generate: glossary entries are `(name, acronym)`.
#[derive(Clone, Debug)]
pub struct TestWorkbook {
    pub sheet_acronyms: &'static str,
    pub sheet_objectives: &'static str,
    pub sheet_ufids: &'static str,
    pub glossary: Vec<(&'static str, &'static str)>,
    pub ufids: Vec<(i32, &'static str)>,
    pub rows: Vec<TestRow>,
    pub skip_ufid_sheet: bool,
}

impl Default for TestWorkbook {
    fn default() -> Self {
        Self {
            sheet_acronyms: "Abkürzungen gesamt",
            sheet_objectives: "Lernziele gesamt_Datenbank",
            sheet_ufids: "ufid_IMS_Gesamtliste 2019",
            glossary: vec![],
            ufids: vec![],
            rows: vec![],
            skip_ufid_sheet: false,
        }
    }
}

/// Generates an `.xlsx` file from `layout`. Every sheet starts with a header row.
pub fn build_test_workbook(layout: &TestWorkbook) -> Vec<u8> {
    let mut workbook = Workbook::new();

    let glossary = workbook.add_worksheet();
    glossary.set_name(layout.sheet_acronyms).unwrap();
    glossary.write_string(0, 0, "Name").unwrap();
    glossary.write_string(0, 1, "Abkürzung").unwrap();
    for (index, (name, acronym)) in layout.glossary.iter().enumerate() {
        let row = index as u32 + 1;
        write_text(glossary, row, 0, name);
        write_text(glossary, row, 1, acronym);
    }

    let objectives = workbook.add_worksheet();
    objectives.set_name(layout.sheet_objectives).unwrap();
    objectives.write_string(0, 0, "ID").unwrap();
    objectives.write_string(0, 1, "Lernziel").unwrap();
    for (index, test_row) in layout.rows.iter().enumerate() {
        let row = index as u32 + 1;
        write_optional_number(objectives, row, 0, test_row.id);
        write_text(objectives, row, 1, test_row.name);
        write_optional_number(objectives, row, 2, test_row.depth);
        write_text(objectives, row, 3, test_row.levels);
        write_text(objectives, row, 6, test_row.activity);
        write_text(objectives, row, 7, test_row.subjects);
        write_text(objectives, row, 9, test_row.subject_related);
        write_text(objectives, row, 10, test_row.symptom);
        write_optional_number(objectives, row, 11, test_row.competence);
        write_text(objectives, row, 11, test_row.competence_text);
        write_text(objectives, row, 12, test_row.systems);
        write_text(objectives, row, 14, test_row.public);
        write_optional_number(objectives, row, 15, test_row.ufids);
        write_text(objectives, row, 15, test_row.ufids_text);
        write_text(objectives, row, 16, test_row.study_field);
    }

    if !layout.skip_ufid_sheet {
        let ufids = workbook.add_worksheet();
        ufids.set_name(layout.sheet_ufids).unwrap();
        ufids.write_string(0, 2, "ufid").unwrap();
        ufids.write_string(0, 3, "Bezeichnung").unwrap();
        for (index, (id, name)) in layout.ufids.iter().enumerate() {
            let row = index as u32 + 1;
            ufids.write_number(row, 2, *id as f64).unwrap();
            write_text(ufids, row, 3, name);
        }
    }

    workbook.save_to_buffer().unwrap()
}

fn write_text(sheet: &mut rust_xlsxwriter::Worksheet, row: u32, col: u16, value: &str) {
    if !value.is_empty() {
        sheet.write_string(row, col, value).unwrap();
    }
}

fn write_optional_number(
    sheet: &mut rust_xlsxwriter::Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) {
    if let Some(value) = value {
        sheet.write_number(row, col, value).unwrap();
    }
}
