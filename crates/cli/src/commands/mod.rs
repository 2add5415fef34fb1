//! CLI subcommands.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Load the database URL from `BAZAAR_DATABASE_URL`, falling back to
/// the generic `DATABASE_URL`.
pub fn database_url() -> Option<SecretString> {
    std::env::var("BAZAAR_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}
