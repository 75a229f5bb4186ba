//! Application settings read once from the environment at startup.

use crate::import::{AssociationPolicy, ImportConfig};
use http::HeaderValue;
use std::env;

const DEFAULT_MAX_IMPORT_UPLOAD_MB: usize = 50;

/// Global application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub cors_urls: Vec<HeaderValue>,
    pub postgres_url: String,
    pub listener_address: String,
    pub postmark_api_base: String,
    pub postmark_api_key: String,
    pub public_base_url: String,
    pub sender_email: String,
    pub import: ImportConfig,
    pub max_import_upload_bytes: usize,
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_cors_urls(value: &str) -> Vec<HeaderValue> {
    value
        .split(',')
        .map(|s| {
            HeaderValue::from_str(s.trim())
                .expect("CORS_URL env var should contain comma separated origins")
        })
        .collect()
}

fn upload_limit_bytes(megabytes: usize) -> usize {
    megabytes * 1024 * 1024
}

fn build_import_config() -> ImportConfig {
    let defaults = ImportConfig::default();
    let association_policy = match env::var("LZK_IMPORT_ASSOCIATION_POLICY") {
        Ok(value) => value
            .parse::<AssociationPolicy>()
            .expect("LZK_IMPORT_ASSOCIATION_POLICY should be append or replace"),
        Err(_) => defaults.association_policy,
    };
    ImportConfig {
        sheet_acronyms: env_or("LZK_IMPORT_SHEET_ACRONYMS", &defaults.sheet_acronyms),
        sheet_objectives: env_or("LZK_IMPORT_SHEET_OBJECTIVES", &defaults.sheet_objectives),
        sheet_ufids: env_or("LZK_IMPORT_SHEET_UFIDS", &defaults.sheet_ufids),
        value_true: env_or("LZK_IMPORT_VALUE_TRUE", &defaults.value_true),
        value_false: env_or("LZK_IMPORT_VALUE_FALSE", &defaults.value_false),
        association_policy,
    }
}

/// Builds application configuration from environment variables
pub fn build_app_config() -> AppConfig {
    let postgres_url = env::var("POSTGRES_URL").expect("Missing POSTGRES_URL env var");
    let listener_address = env::var("LISTENER_ADDRESS").expect("Missing LISTENER_ADDRESS env var");
    let cors_urls_env_var = env::var("CORS_URL").expect("Missing CORS_URL env var");
    let cors_urls = parse_cors_urls(&cors_urls_env_var);
    env::var("JWT_SECRET").expect("Missing JWT_SECRET env var");
    let postmark_api_base =
        env::var("POSTMARK_API_BASE").expect("Missing POSTMARK_API_BASE env var");
    let postmark_api_key = env::var("POSTMARK_API_KEY").expect("Missing POSTMARK_API_KEY env var");
    let public_base_url = env::var("PUBLIC_BASE_URL").expect("Missing PUBLIC_BASE_URL env var");
    let sender_email = env::var("LZK_EMAIL_FROM")
        .ok()
        .filter(|sender| !sender.trim().is_empty())
        .expect("No default sender specified in LZK_EMAIL_FROM");
    let max_import_upload_mb = match env::var("MAX_IMPORT_UPLOAD_MB") {
        Ok(value) => value
            .parse()
            .expect("MAX_IMPORT_UPLOAD_MB should be a number"),
        Err(_) => DEFAULT_MAX_IMPORT_UPLOAD_MB,
    };
    AppConfig {
        cors_urls,
        postgres_url,
        listener_address,
        postmark_api_base,
        postmark_api_key,
        public_base_url,
        sender_email,
        import: build_import_config(),
        max_import_upload_bytes: upload_limit_bytes(max_import_upload_mb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn cors_urls_are_split_and_trimmed() {
        let urls = parse_cors_urls("https://lzk.example.org, http://localhost:3000");

        assert_eq!(
            urls,
            vec![
                HeaderValue::from_static("https://lzk.example.org"),
                HeaderValue::from_static("http://localhost:3000"),
            ]
        );
    }

    #[test]
    fn upload_limit_is_in_mebibytes() {
        assert_eq!(
            upload_limit_bytes(DEFAULT_MAX_IMPORT_UPLOAD_MB),
            52_428_800
        );
    }
}
