pub use super::ability::Entity as Ability;
pub use super::ability_level::Entity as AbilityLevel;
pub use super::ability_subject::Entity as AbilitySubject;
pub use super::ability_system::Entity as AbilitySystem;
pub use super::ability_ufid::Entity as AbilityUfid;
pub use super::activity::Entity as Activity;
pub use super::catalog_comment::Entity as CatalogComment;
pub use super::competence_level::Entity as CompetenceLevel;
pub use super::contact::Entity as Contact;
pub use super::feedback::Entity as Feedback;
pub use super::feedback_activity::Entity as FeedbackActivity;
pub use super::feedback_subject::Entity as FeedbackSubject;
pub use super::level::Entity as Level;
pub use super::skill::Entity as Skill;
pub use super::study_field::Entity as StudyField;
pub use super::subject::Entity as Subject;
pub use super::symptom::Entity as Symptom;
pub use super::symptom_subject::Entity as SymptomSubject;
pub use super::system::Entity as System;
pub use super::ufid::Entity as Ufid;
pub use super::university::Entity as University;
