//! Actix-web authentication middleware and request extractors
//!
//! Provides extractors for authenticated developers with permission-based
//! access checks. Handlers decide which check applies; the extractors only
//! establish who the caller is and what their token grants.

use crate::claims::{Claims, Permission};
use crate::jwt::JwtService;
use actix_web::{dev::Payload, error::ErrorUnauthorized, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use m10n_core::error::AppError;
use std::sync::Arc;
use tracing::{debug, warn};

/// Extract JWT token from request
///
/// Checks for token in the following order:
/// 1. Authorization header (Bearer token)
/// 2. Cookie named "token"
fn extract_token_from_request(req: &HttpRequest) -> Option<String> {
    if let Some(auth_header) = req.headers().get("Authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if auth_str.starts_with("Bearer ") {
                return Some(auth_str[7..].to_string());
            }
        }
    }

    if let Some(cookie) = req.cookie("token") {
        return Some(cookie.value().to_string());
    }

    None
}

/// Authenticated developer extractor
///
/// Extracts and validates the JWT token from the request. The "own" vs
/// "any" distinction of each permission is resolved here, against the
/// developer id a handler is acting on.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Developer id of the authenticated caller
    pub developer_id: String,

    /// Full claims from the JWT token
    pub claims: Claims,
}

impl AuthenticatedUser {
    /// Whether the caller may view `developer_id`'s prepaid balances
    pub fn can_view_balances(&self, developer_id: &str) -> bool {
        self.claims.has(Permission::ViewAnyBalance)
            || (self.claims.has(Permission::ViewOwnBalance) && self.is_self(developer_id))
    }

    /// Whether the caller may force-refresh `developer_id`'s balances
    pub fn can_refresh_balances(&self, developer_id: &str) -> bool {
        self.claims.has(Permission::RefreshAnyBalance)
            || (self.claims.has(Permission::RefreshOwnBalance) && self.is_self(developer_id))
    }

    /// Whether the caller may view `developer_id`'s purchasable rate plans
    pub fn can_view_rate_plans(&self, developer_id: &str) -> bool {
        self.claims.has(Permission::ViewAnyRatePlans)
            || (self.claims.has(Permission::ViewOwnRatePlans) && self.is_self(developer_id))
    }

    /// Whether the caller may view `team`'s prepaid balances
    ///
    /// Team permissions only apply to teams the caller is a member of;
    /// the "any" balance permission covers teams as well.
    pub fn can_view_team_balances(&self, team: &str) -> bool {
        self.claims.has(Permission::ViewAnyBalance)
            || (self.claims.has(Permission::ViewTeamBalance) && self.claims.is_member_of(team))
    }

    /// Whether the caller may force-refresh `team`'s balances
    pub fn can_refresh_team_balances(&self, team: &str) -> bool {
        self.claims.has(Permission::RefreshAnyBalance)
            || (self.claims.has(Permission::RefreshTeamBalance) && self.claims.is_member_of(team))
    }

    /// Whether the caller may view `team`'s purchasable rate plans
    pub fn can_view_team_rate_plans(&self, team: &str) -> bool {
        self.claims.has(Permission::ViewAnyRatePlans)
            || (self.claims.has(Permission::ViewTeamRatePlans) && self.claims.is_member_of(team))
    }

    /// Check if user has portal administration rights
    pub fn is_admin(&self) -> bool {
        self.claims.is_admin()
    }

    fn is_self(&self, developer_id: &str) -> bool {
        self.developer_id.eq_ignore_ascii_case(developer_id)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let jwt_service = match req.app_data::<web::Data<Arc<JwtService>>>() {
            Some(service) => service.get_ref().clone(),
            None => {
                warn!("JwtService not found in app data");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "Authentication service not configured".to_string(),
                ))));
            }
        };

        let token = match extract_token_from_request(req) {
            Some(t) => t,
            None => {
                debug!("No authentication token found in request");
                return ready(Err(ErrorUnauthorized(AppError::Unauthorized(
                    "No authentication token provided".to_string(),
                ))));
            }
        };

        match jwt_service.validate_token(&token) {
            Ok(claims) => {
                debug!(developer_id = %claims.sub, "Developer authenticated successfully");

                ready(Ok(AuthenticatedUser {
                    developer_id: claims.sub.clone(),
                    claims,
                }))
            }
            Err(e) => {
                warn!(error = %e, "Token validation failed");
                ready(Err(ErrorUnauthorized(e)))
            }
        }
    }
}

/// Portal administrator extractor
///
/// Requires the `administer_portal` permission. Returns `Forbidden` if the
/// caller's token does not grant it.
#[derive(Debug, Clone)]
pub struct PortalAdmin(pub AuthenticatedUser);

impl std::ops::Deref for PortalAdmin {
    type Target = AuthenticatedUser;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for PortalAdmin {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth_user = match AuthenticatedUser::from_request(req, payload).into_inner() {
            Ok(user) => user,
            Err(e) => return ready(Err(e)),
        };

        if !auth_user.is_admin() {
            warn!(
                developer_id = %auth_user.developer_id,
                "Caller attempted portal administration without permission"
            );
            return ready(Err(ErrorUnauthorized(AppError::Forbidden)));
        }

        debug!(developer_id = %auth_user.developer_id, "Portal admin access granted");

        ready(Ok(PortalAdmin(auth_user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    fn create_test_jwt_service() -> Arc<JwtService> {
        Arc::new(JwtService::new("test-secret-key-12345", 3600))
    }

    #[actix_web::test]
    async fn test_extract_token_from_authorization_header() {
        let jwt_service = create_test_jwt_service();
        let token = jwt_service
            .create_token_for_developer("dev@example.com", vec![Permission::ViewOwnBalance])
            .unwrap();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|user: AuthenticatedUser| async move {
                assert_eq!(user.developer_id, "dev@example.com");
                "OK"
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_missing_token() {
        let jwt_service = create_test_jwt_service();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|_user: AuthenticatedUser| async { "OK" }),
        ))
        .await;

        let req = test::TestRequest::get().uri("/test").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_invalid_token() {
        let jwt_service = create_test_jwt_service();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/test",
            web::get().to(|_user: AuthenticatedUser| async { "OK" }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/test")
            .insert_header(("Authorization", "Bearer invalid.token.here"))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401);
    }

    #[actix_web::test]
    async fn test_portal_admin_with_permission() {
        let jwt_service = create_test_jwt_service();
        let token = jwt_service
            .create_token_for_developer("admin@example.com", vec![Permission::AdministerPortal])
            .unwrap();

        let app = test::init_service(App::new().app_data(web::Data::new(jwt_service)).route(
            "/admin",
            web::get().to(|admin: PortalAdmin| async move {
                assert_eq!(admin.developer_id, "admin@example.com");
                "OK"
            }),
        ))
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_portal_admin_without_permission() {
        let jwt_service = create_test_jwt_service();
        let token = jwt_service
            .create_token_for_developer("dev@example.com", vec![Permission::ViewOwnBalance])
            .unwrap();

        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(jwt_service))
                .route("/admin", web::get().to(|_admin: PortalAdmin| async { "OK" })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/admin")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 401); // Forbidden
    }
}
