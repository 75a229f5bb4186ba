pub mod prelude;

pub mod ability;
pub mod ability_level;
pub mod ability_subject;
pub mod ability_system;
pub mod ability_ufid;
pub mod activity;
pub mod catalog_comment;
pub mod competence_level;
pub mod contact;
pub mod feedback;
pub mod feedback_activity;
pub mod feedback_subject;
pub mod level;
pub mod sea_orm_active_enums;
pub mod skill;
pub mod study_field;
pub mod subject;
pub mod symptom;
pub mod symptom_subject;
pub mod system;
pub mod ufid;
pub mod university;
