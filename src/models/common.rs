//! Domain values shared between services and repositories.

use crate::models::response::{ActivityResponse, ReferenceResponse};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use entity::feedback::Model as FeedbackModel;
use rand::RngCore;

const FEEDBACK_SECRET_BYTES: usize = 32;

/// A feedback request about to be stored. The secret for the emailed link is minted here,
/// once, when the value is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedback {
    pub university_id: i32,
    pub secret: String,
    pub subject_ids: Vec<String>,
    pub activity_ids: Vec<i32>,
}

impl NewFeedback {
    pub fn new(
        university_id: i32,
        mut subject_ids: Vec<String>,
        mut activity_ids: Vec<i32>,
    ) -> Self {
        subject_ids.sort_unstable();
        subject_ids.dedup();
        activity_ids.sort_unstable();
        activity_ids.dedup();
        let mut bytes = [0u8; FEEDBACK_SECRET_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            university_id,
            secret: URL_SAFE_NO_PAD.encode(bytes),
            subject_ids,
            activity_ids,
        }
    }
}

/// A stored feedback request together with the subjects and activities it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackScope {
    pub feedback: FeedbackModel,
    pub subjects: Vec<ReferenceResponse>,
    pub activities: Vec<ActivityResponse>,
}

impl FeedbackScope {
    pub fn covers_subject(&self, subject_id: &str) -> bool {
        self.subjects.iter().any(|subject| subject.id == subject_id)
    }

    pub fn covers_activity(&self, activity_id: i32) -> bool {
        self.activities
            .iter()
            .any(|activity| activity.id == activity_id)
    }
}

/// Outcome of a staff review of a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentReview<T> {
    Updated(T),
    NotFound,
    AlreadyReviewed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_feedback_mints_a_distinct_url_safe_secret() {
        let first = NewFeedback::new(1, vec!["INT".to_string()], vec![]);
        let second = NewFeedback::new(1, vec!["INT".to_string()], vec![]);

        assert_eq!(first.secret.len(), 43);
        assert!(first
            .secret
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(first.secret, second.secret);
    }

    #[test]
    fn new_feedback_drops_repeated_scope_entries() {
        let feedback = NewFeedback::new(
            1,
            vec!["SUR".to_string(), "INT".to_string(), "SUR".to_string()],
            vec![3, 1, 3],
        );

        assert_eq!(feedback.subject_ids, vec!["INT", "SUR"]);
        assert_eq!(feedback.activity_ids, vec![1, 3]);
    }
}
