use common::domain::{is_blank, require, DomainError, DomainResult, UserDefaultStore};
use std::sync::Arc;
use tracing::{debug, instrument};

const LOGIN_PROPERTY: &str = "HasLoggedIn";
const LOGIN_GROUP: &str = "Login";
const LOGGED_IN_VALUE: &str = "1";

/// First-login tracking over the user-default store
pub struct UserLoginService {
    user_default_store: Arc<dyn UserDefaultStore>,
}

#[derive(Default)]
pub struct UserLoginServiceBuilder {
    user_default_store: Option<Arc<dyn UserDefaultStore>>,
}

impl UserLoginServiceBuilder {
    pub fn user_default_store(mut self, store: Arc<dyn UserDefaultStore>) -> Self {
        self.user_default_store = Some(store);
        self
    }

    pub fn build(self) -> DomainResult<UserLoginService> {
        Ok(UserLoginService {
            user_default_store: require(self.user_default_store, "user_default_store")?,
        })
    }
}

fn require_username(username: &str) -> DomainResult<()> {
    if is_blank(username) {
        return Err(DomainError::MissingArgument("username"));
    }
    Ok(())
}

impl UserLoginService {
    pub fn builder() -> UserLoginServiceBuilder {
        UserLoginServiceBuilder::default()
    }

    /// True until a login flag has been written for the user
    #[instrument(skip(self), fields(correlation_id = %correlation_id))]
    pub async fn is_first_time_login(
        &self,
        username: &str,
        correlation_id: &str,
    ) -> DomainResult<bool> {
        require_username(username)?;

        let flag = self
            .user_default_store
            .get_item(username, LOGIN_PROPERTY, LOGIN_GROUP, correlation_id)
            .await?;

        let first_time = flag.as_deref().map_or(true, is_blank);
        debug!(correlation_id, username, first_time, "checked login flag");
        Ok(first_time)
    }

    /// Record that the user has logged in
    #[instrument(skip(self), fields(correlation_id = %correlation_id))]
    pub async fn set_user_logged_in(
        &self,
        username: &str,
        correlation_id: &str,
    ) -> DomainResult<bool> {
        require_username(username)?;

        self.user_default_store
            .set_item(
                username,
                LOGIN_PROPERTY,
                LOGIN_GROUP,
                LOGGED_IN_VALUE,
                correlation_id,
            )
            .await
    }
}
