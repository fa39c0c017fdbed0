//! Authentication and role-policy extractors.

use std::future::{Ready, ready};
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use uuid::Uuid;

use inforum_core::domain::Role;
use inforum_core::ports::{AuthError, TokenClaims, TokenService};
use inforum_shared::StatusMessage;

/// Authenticated caller, decoded from the bearer token.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub roles: Vec<Role>,
}

impl Identity {
    /// Check if the user has a specific role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Owners may modify their own rows; admins may modify anyone's.
    pub fn can_modify(&self, owner: Uuid) -> bool {
        self.user_id == owner || self.is_admin()
    }
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            roles: claims.roles,
        }
    }
}

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::InsufficientPermissions => actix_web::http::StatusCode::FORBIDDEN,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let body = match &self.0 {
            AuthError::TokenExpired => StatusMessage::unauthorized(
                "Your authentication token has expired. Please login again.",
            ),
            AuthError::InvalidToken(msg) => StatusMessage::unauthorized(msg.as_str()),
            AuthError::MissingAuth => StatusMessage::unauthorized(
                "Please provide a valid Bearer token in the Authorization header.",
            ),
            AuthError::InsufficientPermissions => StatusMessage::forbidden(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(body)
    }
}

fn authenticate(req: &HttpRequest) -> Result<Identity, AuthError> {
    let token_service = req
        .app_data::<web::Data<Arc<dyn TokenService>>>()
        .ok_or_else(|| {
            tracing::error!("TokenService not found in app data");
            AuthError::InvalidToken("Server configuration error".to_string())
        })?;

    let auth_str = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidToken("Expected Bearer token".to_string()))?;

    token_service.validate_token(token).map(Identity::from)
}

/// Which roles may pass an [`Authorized`] extractor.
pub trait RolePolicy {
    /// Accepted roles. Empty means any authenticated caller.
    const ALLOWED: &'static [Role];

    fn permits(identity: &Identity) -> bool {
        Self::ALLOWED.is_empty() || Self::ALLOWED.iter().any(|r| identity.has_role(*r))
    }
}

/// Any caller holding a valid token.
pub struct AnyRole;

impl RolePolicy for AnyRole {
    const ALLOWED: &'static [Role] = &[];
}

/// Post authors.
pub struct EditorOrAdmin;

impl RolePolicy for EditorOrAdmin {
    const ALLOWED: &'static [Role] = &[Role::Editor, Role::Admin];
}

pub struct AdminOnly;

impl RolePolicy for AdminOnly {
    const ALLOWED: &'static [Role] = &[Role::Admin];
}

/// Identity extractor that also enforces a role policy before the handler runs.
///
/// ```ignore
/// async fn remove(auth: Authorized<AdminOnly>) -> impl Responder { ... }
/// ```
pub struct Authorized<P: RolePolicy> {
    identity: Identity,
    _policy: PhantomData<P>,
}

impl<P: RolePolicy> Deref for Authorized<P> {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.identity
    }
}

impl<P: RolePolicy> FromRequest for Authorized<P> {
    type Error = AuthenticationError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let result = authenticate(req).and_then(|identity| {
            if P::permits(&identity) {
                Ok(Authorized {
                    identity,
                    _policy: PhantomData,
                })
            } else {
                tracing::info!(
                    user_id = %identity.user_id,
                    email = %identity.email,
                    path = req.path(),
                    "Role policy rejected caller"
                );
                Err(AuthError::InsufficientPermissions)
            }
        });

        ready(result.map_err(AuthenticationError))
    }
}
