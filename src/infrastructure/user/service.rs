//! User service for registration, login and profile management

use std::sync::Arc;

use crate::domain::user::{
    validate_email, validate_name, validate_password, User, UserId, UserRepository,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Request for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Profile fields a user may change about themselves.
///
/// Photo changes go through `update_photo`, and email is not changeable at all.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// User service for registration, login and profile management
#[derive(Debug)]
pub struct UserService<R: UserRepository, H: PasswordHasher> {
    repository: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserRepository, H: PasswordHasher> UserService<R, H> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self { repository, hasher }
    }

    /// Register a new account
    pub async fn register(&self, request: RegisterRequest) -> Result<User, DomainError> {
        validate_name(&request.name).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_email(&request.email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(&request.password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.repository.email_exists(&request.email).await? {
            return Err(DomainError::conflict("Email has already been registered"));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let user = User::new(
            UserId::generate(),
            &request.name,
            &request.email,
            password_hash,
        );

        self.repository.create(user).await
    }

    /// Authenticate with email and password
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::validation("Please add email and password"));
        }

        let user = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found, please signup"))?;

        if !self.hasher.verify(password, user.password_hash()) {
            return Err(DomainError::auth("Invalid email or password"));
        }

        Ok(user)
    }

    /// Fetch a user's own profile
    pub async fn get_profile(&self, id: &UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User Not Found"))
    }

    /// Apply profile changes.
    ///
    /// A field is written only when it arrives present and non-empty after
    /// trimming; absent or blank fields keep the stored value.
    pub async fn update_profile(
        &self,
        id: &UserId,
        request: UpdateProfileRequest,
    ) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        if let Some(name) = provided(request.name) {
            user.set_name(name);
        }
        if let Some(phone) = provided(request.phone) {
            user.set_phone(phone);
        }
        if let Some(address) = provided(request.address) {
            user.set_address(address);
        }

        self.repository.update(&user).await
    }

    /// Overwrite the profile photo
    pub async fn update_photo(&self, id: &UserId, photo: String) -> Result<User, DomainError> {
        let mut user = self
            .repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        user.set_photo(photo);

        self.repository.update(&user).await
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Count users
    pub async fn count(&self) -> Result<usize, DomainError> {
        self.repository.count().await
    }
}

fn provided(field: Option<String>) -> Option<String> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::MockUserRepository;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserRepository;

    fn create_service() -> UserService<InMemoryUserRepository, Argon2Hasher> {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(Argon2Hasher::new());
        UserService::new(repository, hasher)
    }

    fn make_request(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register() {
        let service = create_service();

        let user = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        assert_eq!(user.name(), "Alice");
        assert_eq!(user.email(), "alice@example.com");
        assert!(!user.is_admin());
        assert!(user.cart_items().is_empty());
        assert!(user.wishlist().is_empty());
        // Stored as a hash, never the raw password
        assert_ne!(user.password_hash(), "hunter22");
    }

    #[tokio::test]
    async fn test_register_empty_name() {
        let service = create_service();

        let result = service
            .register(make_request("", "alice@example.com", "hunter22"))
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert_eq!(message, "Please fill in all required fields");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let service = create_service();

        let result = service
            .register(make_request("Alice", "alice@example.com", "short"))
            .await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert_eq!(message, "Password must be at least 6 characters");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let service = create_service();

        service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let result = service
            .register(make_request("Other Alice", "alice@example.com", "different"))
            .await;

        match result {
            Err(DomainError::Conflict { message }) => {
                assert_eq!(message, "Email has already been registered");
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let service = create_service();

        service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let user = service
            .authenticate("alice@example.com", "hunter22")
            .await
            .unwrap();

        assert_eq!(user.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_authenticate_missing_fields() {
        let service = create_service();

        let result = service.authenticate("", "hunter22").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.authenticate("alice@example.com", "").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_email() {
        let service = create_service();

        let result = service.authenticate("nobody@example.com", "hunter22").await;

        match result {
            Err(DomainError::NotFound { message }) => {
                assert_eq!(message, "User not found, please signup");
            }
            other => panic!("expected not-found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let service = create_service();

        service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let result = service.authenticate("alice@example.com", "wrong").await;

        match result {
            Err(DomainError::Auth { message }) => {
                assert_eq!(message, "Invalid email or password");
            }
            other => panic!("expected auth error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_profile() {
        let service = create_service();

        let user = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let profile = service.get_profile(user.id()).await.unwrap();
        assert_eq!(profile.name(), "Alice");

        let missing = service.get_profile(&UserId::generate()).await;
        assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_profile_applies_provided_fields() {
        let service = create_service();

        let user = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let updated = service
            .update_profile(
                user.id(),
                UpdateProfileRequest {
                    name: Some("Alice B".to_string()),
                    phone: Some("+15550123".to_string()),
                    address: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Alice B");
        assert_eq!(updated.phone(), Some("+15550123"));
        assert_eq!(updated.address(), None);
        assert_eq!(updated.email(), "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_profile_ignores_blank_fields() {
        let service = create_service();

        let user = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        service
            .update_profile(
                user.id(),
                UpdateProfileRequest {
                    name: None,
                    phone: Some("+15550123".to_string()),
                    address: Some("1 Main St".to_string()),
                },
            )
            .await
            .unwrap();

        // Empty and whitespace-only values keep the stored data
        let updated = service
            .update_profile(
                user.id(),
                UpdateProfileRequest {
                    name: Some("".to_string()),
                    phone: Some("   ".to_string()),
                    address: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.name(), "Alice");
        assert_eq!(updated.phone(), Some("+15550123"));
        assert_eq!(updated.address(), Some("1 Main St"));
    }

    #[tokio::test]
    async fn test_update_profile_missing_user() {
        let service = create_service();

        let result = service
            .update_profile(&UserId::generate(), UpdateProfileRequest::default())
            .await;

        match result {
            Err(DomainError::NotFound { message }) => {
                assert_eq!(message, "User not found");
            }
            other => panic!("expected not-found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_photo() {
        let service = create_service();

        let user = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();

        let updated = service
            .update_photo(user.id(), "https://cdn.example.com/alice.png".to_string())
            .await
            .unwrap();

        assert_eq!(
            updated.photo(),
            Some("https://cdn.example.com/alice.png")
        );
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let service = create_service();

        service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await
            .unwrap();
        service
            .register(make_request("Bob", "bob@example.com", "hunter22"))
            .await
            .unwrap();

        assert_eq!(service.list().await.unwrap().len(), 2);
        assert_eq!(service.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_register_storage_failure_propagates() {
        let repository = Arc::new(MockUserRepository::new());
        repository.set_should_fail(true).await;
        let service = UserService::new(repository, Arc::new(Argon2Hasher::new()));

        let result = service
            .register(make_request("Alice", "alice@example.com", "hunter22"))
            .await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
