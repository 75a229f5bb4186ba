use crate::models::auth::Role;
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::sync::LazyLock;

pub static JWT_KEYS: LazyLock<JWTKeys> = LazyLock::new(|| {
    let secret = if cfg!(test) {
        std::env::var("JWT_SECRET").unwrap_or_else(|_| "lernzielkatalog-test-secret".to_string())
    } else {
        std::env::var("JWT_SECRET").expect("Missing JWT_SECRET env var")
    };
    JWTKeys::new(secret.as_bytes())
});
pub struct JWTKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl JWTKeys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

pub fn validate_at_least_curator(role: &Role) -> bool {
    matches!(role, Role::Admin | Role::Curator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_staff_roles_count_as_curator() {
        assert!(validate_at_least_curator(&Role::Admin));
        assert!(validate_at_least_curator(&Role::Curator));
    }
}
