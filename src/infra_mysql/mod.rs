mod credential_store_mysql;
mod refresh_token_store_mysql;

pub use credential_store_mysql::*;
pub use refresh_token_store_mysql::*;

mod util;
