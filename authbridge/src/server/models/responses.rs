use serde::Serialize;

// POST /auth/logout
#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// Health check
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
