/// Healthcheck route for uptime monitoring
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Application is healthy", body = String)
    )
)]
pub async fn healthcheck() -> String {
    "Healthy".to_string()
}

#[cfg(test)]
mod tests {
    use crate::test_tools::build_test_app;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthcheck() {
        let app = build_test_app();
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"Healthy");
    }
}
