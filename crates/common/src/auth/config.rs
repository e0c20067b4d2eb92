/// Signing configuration for API tokens, fixed at process start
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret: String,
    pub timeout_minutes: u64,
}

impl TokenConfig {
    pub fn new(secret: String, timeout_minutes: u64) -> Self {
        Self {
            secret,
            timeout_minutes,
        }
    }
}
