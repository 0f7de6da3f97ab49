mod auth_service_fake;
mod auth_service_impl;
mod bcrypt_hasher;
mod bearer;
mod jwt_codec;
mod refresh_manager;

pub use auth_service_fake::*;
pub use auth_service_impl::*;
pub use bcrypt_hasher::*;
pub use bearer::*;
pub use jwt_codec::*;
pub use refresh_manager::*;
