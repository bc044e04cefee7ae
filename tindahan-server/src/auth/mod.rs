//! 认证授权模块
//!
//! 提供 JWT 认证、角色检查和中间件：
//! - [`JwtService`] - JWT 令牌服务
//! - [`CurrentUser`] - 当前用户上下文
//! - [`require_auth`] - 认证中间件
//! - [`require_owner`] - 店主角色中间件
//!
//! 令牌签发属于外部认证服务；本模块只做校验与主体提取。

pub mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{CurrentUserExt, require_auth, require_owner};
