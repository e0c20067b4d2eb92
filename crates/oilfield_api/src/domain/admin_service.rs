use common::auth::{AuthTokenProvider, PasswordService};
use common::domain::{
    is_blank, require, AuthRepository, CredentialRecord, DomainResult, LoginInput,
    WithCorrelationId,
};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Credential lookup and API token issuance.
///
/// "No such user", "wrong password" and "blank username" all yield `Ok(None)`
/// from [`AdminService::find_by_name`]; only collaborator faults are errors.
pub struct AdminService {
    auth_repository: Arc<dyn AuthRepository>,
    password_service: Arc<dyn PasswordService>,
    token_provider: Arc<dyn AuthTokenProvider>,
}

#[derive(Default)]
pub struct AdminServiceBuilder {
    auth_repository: Option<Arc<dyn AuthRepository>>,
    password_service: Option<Arc<dyn PasswordService>>,
    token_provider: Option<Arc<dyn AuthTokenProvider>>,
}

impl AdminServiceBuilder {
    pub fn auth_repository(mut self, repository: Arc<dyn AuthRepository>) -> Self {
        self.auth_repository = Some(repository);
        self
    }

    pub fn password_service(mut self, service: Arc<dyn PasswordService>) -> Self {
        self.password_service = Some(service);
        self
    }

    pub fn token_provider(mut self, provider: Arc<dyn AuthTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn build(self) -> DomainResult<AdminService> {
        Ok(AdminService {
            auth_repository: require(self.auth_repository, "auth_repository")?,
            password_service: require(self.password_service, "password_service")?,
            token_provider: require(self.token_provider, "token_provider")?,
        })
    }
}

impl AdminService {
    pub fn builder() -> AdminServiceBuilder {
        AdminServiceBuilder::default()
    }

    /// Look up a user and check the supplied password against the stored hash
    #[instrument(skip(self, request), fields(correlation_id = %request.correlation_id))]
    pub async fn find_by_name(
        &self,
        request: WithCorrelationId<LoginInput>,
    ) -> DomainResult<Option<CredentialRecord>> {
        let correlation_id = request.correlation_id.as_str();

        let Some(input) = request.value else {
            info!(correlation_id, "find_by_name cannot proceed: request is missing");
            return Ok(None);
        };

        if is_blank(&input.username) {
            info!(correlation_id, "find_by_name cannot proceed: username is missing");
            return Ok(None);
        }

        let Some(record) = self
            .auth_repository
            .find_by_name(&input.username, &input.password, correlation_id)
            .await?
        else {
            debug!(correlation_id, username = %input.username, "user not found");
            return Ok(None);
        };

        if !self
            .password_service
            .verify_password(&input.password, &record.password_hash)?
        {
            debug!(correlation_id, username = %input.username, "password mismatch");
            return Ok(None);
        }

        debug!(correlation_id, user_id = %record.user_id, "credentials verified");
        Ok(Some(record))
    }

    /// Sign a token for a verified user
    pub fn issue_token(&self, record: &CredentialRecord) -> DomainResult<String> {
        self.token_provider
            .generate_token(&record.user_id, &record.username)
    }

    /// Re-issue a still valid token
    pub fn refresh_token(&self, token: &str) -> DomainResult<String> {
        self.token_provider.refresh_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::auth::{
        Argon2PasswordService, FixedTimeProvider, JwtAuthTokenProvider, MockAuthTokenProvider,
        MockPasswordService, TokenConfig,
    };
    use common::domain::{DomainError, MockAuthRepository};
    use chrono::{TimeZone, Utc};
    use tracing_test::traced_test;

    fn test_record(password_hash: String) -> CredentialRecord {
        CredentialRecord {
            user_id: "user-1".to_string(),
            username: "test".to_string(),
            password_hash,
        }
    }

    fn login(username: &str, password: &str) -> LoginInput {
        LoginInput {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    fn service_with(
        repository: MockAuthRepository,
        passwords: Arc<dyn PasswordService>,
    ) -> AdminService {
        AdminService::builder()
            .auth_repository(Arc::new(repository))
            .password_service(passwords)
            .token_provider(Arc::new(MockAuthTokenProvider::new()))
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_reports_first_missing_collaborator() {
        let result = AdminService::builder().build();
        assert!(matches!(
            result,
            Err(DomainError::MissingArgument("auth_repository"))
        ));

        let result = AdminService::builder()
            .auth_repository(Arc::new(MockAuthRepository::new()))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::MissingArgument("password_service"))
        ));

        let result = AdminService::builder()
            .auth_repository(Arc::new(MockAuthRepository::new()))
            .password_service(Arc::new(MockPasswordService::new()))
            .build();
        assert!(matches!(
            result,
            Err(DomainError::MissingArgument("token_provider"))
        ));
    }

    #[tokio::test]
    async fn test_find_by_name_matching_password() {
        let passwords = Argon2PasswordService::default();
        let hash = passwords.hash_password("test").unwrap();

        let mut repository = MockAuthRepository::new();
        repository
            .expect_find_by_name()
            .withf(|username, password, correlation_id| {
                username == "test" && password == "test" && correlation_id == "corr-1"
            })
            .times(1)
            .returning(move |_, _, _| Ok(Some(test_record(hash.clone()))));

        let service = service_with(repository, Arc::new(passwords));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-1", login("test", "test")))
            .await
            .unwrap();

        assert_eq!(result.map(|r| r.user_id), Some("user-1".to_string()));
    }

    #[tokio::test]
    async fn test_find_by_name_hash_mismatch() {
        let passwords = Argon2PasswordService::default();
        let hash = passwords.hash_password("other").unwrap();

        let mut repository = MockAuthRepository::new();
        repository
            .expect_find_by_name()
            .times(1)
            .returning(move |_, _, _| Ok(Some(test_record(hash.clone()))));

        let service = service_with(repository, Arc::new(passwords));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-2", login("test", "test")))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_unknown_user() {
        let mut repository = MockAuthRepository::new();
        repository
            .expect_find_by_name()
            .returning(|username, _, _| {
                if username == "test" {
                    Ok(Some(test_record("unused".to_string())))
                } else {
                    Ok(None)
                }
            });

        let mut passwords = MockPasswordService::new();
        passwords.expect_verify_password().times(0);

        let service = service_with(repository, Arc::new(passwords));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-3", login("tests", "test")))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    #[traced_test]
    async fn test_find_by_name_missing_request() {
        let mut repository = MockAuthRepository::new();
        repository.expect_find_by_name().times(0);

        let service = service_with(repository, Arc::new(MockPasswordService::new()));
        let result = service
            .find_by_name(WithCorrelationId::empty("corr-4"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(logs_contain("corr-4"));
        assert!(logs_contain("request is missing"));
    }

    #[tokio::test]
    async fn test_find_by_name_blank_username() {
        let mut repository = MockAuthRepository::new();
        repository.expect_find_by_name().times(0);

        let service = service_with(repository, Arc::new(MockPasswordService::new()));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-5", login("  ", "test")))
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_by_name_repository_error_propagates() {
        let mut repository = MockAuthRepository::new();
        repository
            .expect_find_by_name()
            .times(1)
            .returning(|_, _, _| Err(DomainError::RepositoryError(anyhow::anyhow!("db down"))));

        let service = service_with(repository, Arc::new(MockPasswordService::new()));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-6", login("test", "test")))
            .await;

        assert!(matches!(result, Err(DomainError::RepositoryError(_))));
    }

    #[tokio::test]
    async fn test_find_by_name_malformed_hash_is_fault() {
        let mut repository = MockAuthRepository::new();
        repository
            .expect_find_by_name()
            .times(1)
            .returning(|_, _, _| Ok(Some(test_record("not-a-phc-string".to_string()))));

        let service = service_with(repository, Arc::new(Argon2PasswordService::default()));
        let result = service
            .find_by_name(WithCorrelationId::new("corr-7", login("test", "test")))
            .await;

        assert!(matches!(result, Err(DomainError::PasswordHashingError(_))));
    }

    #[test]
    fn test_issue_and_refresh_token_are_deterministic() {
        let clock = Arc::new(FixedTimeProvider::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let provider = Arc::new(JwtAuthTokenProvider::new(
            TokenConfig::new("secret".to_string(), 30),
            clock,
        ));

        let service = AdminService::builder()
            .auth_repository(Arc::new(MockAuthRepository::new()))
            .password_service(Arc::new(MockPasswordService::new()))
            .token_provider(provider.clone())
            .build()
            .unwrap();

        let record = test_record(String::new());
        let first = service.issue_token(&record).unwrap();
        let second = service.issue_token(&record).unwrap();
        assert_eq!(first, second);

        let claims = provider.validate_token(&first).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.name, "test");
        assert_eq!(claims.exp - claims.iat, 30 * 60);

        let refreshed = service.refresh_token(&first).unwrap();
        assert_eq!(provider.validate_token(&refreshed).unwrap().sub, "user-1");
    }

    #[test]
    fn test_refresh_token_rejects_garbage() {
        let mut provider = MockAuthTokenProvider::new();
        provider
            .expect_refresh_token()
            .withf(|token| token == "garbage")
            .times(1)
            .returning(|_| Err(DomainError::InvalidToken("malformed".to_string())));

        let service = AdminService::builder()
            .auth_repository(Arc::new(MockAuthRepository::new()))
            .password_service(Arc::new(MockPasswordService::new()))
            .token_provider(Arc::new(provider))
            .build()
            .unwrap();

        assert!(matches!(
            service.refresh_token("garbage"),
            Err(DomainError::InvalidToken(_))
        ));
    }
}
