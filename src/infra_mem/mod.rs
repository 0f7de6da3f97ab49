mod credential_store_mem;
mod refresh_token_store_mem;

pub use credential_store_mem::*;
pub use refresh_token_store_mem::*;
