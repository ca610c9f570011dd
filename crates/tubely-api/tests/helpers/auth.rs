use chrono::Duration;
use tubely_api::auth::issue_access_token;
use uuid::Uuid;

/// Secret the test apps validate tokens against.
pub const TEST_JWT_SECRET: &str = "test-secret-key-min-32-characters-long-for-testing";

/// `Authorization` header value for `user_id`.
pub fn bearer(user_id: Uuid) -> String {
    let token = issue_access_token(user_id, TEST_JWT_SECRET, Duration::hours(1))
        .expect("Failed to issue access token");
    format!("Bearer {}", token)
}

/// A token signed with a different secret.
pub fn forged_bearer(user_id: Uuid) -> String {
    let token = issue_access_token(user_id, "not-the-server-secret", Duration::hours(1))
        .expect("Failed to issue access token");
    format!("Bearer {}", token)
}
