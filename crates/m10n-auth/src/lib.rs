//! Authentication and authorization for m10n-portal
//!
//! This crate provides JWT-based authentication and the permission checks
//! the HTTP surface enforces before touching monetization data. Permissions
//! come in "own", "team", and "any" flavors: a developer views their own
//! prepaid balances, team permissions apply to teams the developer is a
//! member of, and support staff with an "any" permission may act on every
//! developer in the organization.
//!
//! # Examples
//!
//! ## Creating a JWT token
//!
//! ```no_run
//! use m10n_auth::{Claims, JwtService, Permission};
//!
//! let jwt_service = JwtService::new("your-secret-key", 1800);
//! let claims = Claims::new("dev@example.com", vec![Permission::ViewOwnBalance]);
//! let token = jwt_service.create_token(&claims)?;
//! # Ok::<(), m10n_core::error::AppError>(())
//! ```
//!
//! ## Using extractors in Actix-web
//!
//! ```no_run
//! use actix_web::{web, HttpResponse};
//! use m10n_auth::middleware::AuthenticatedUser;
//!
//! async fn balances(user: AuthenticatedUser, path: web::Path<String>) -> HttpResponse {
//!     let developer_id = path.into_inner();
//!     if !user.can_view_balances(&developer_id) {
//!         return HttpResponse::Forbidden().finish();
//!     }
//!     HttpResponse::Ok().finish()
//! }
//! ```

pub mod claims;
pub mod jwt;
pub mod middleware;

pub use claims::{Claims, Permission};
pub use jwt::JwtService;
pub use middleware::{AuthenticatedUser, PortalAdmin};
