//! Seed the database with demo users and products.
//!
//! Intended for local development: creates a couple of accounts and a few
//! listings so the feed, cart and checkout flows have something to show.
//! Idempotent - existing users are reused and their listings are not
//! duplicated.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use tracing::info;

use bazaar_core::{Price, Username};
use bazaar_site::db::{ProductRepository, UserRepository};
use bazaar_site::services::auth::hash_password;

/// Demo account credentials.
const DEMO_USERS: &[(&str, &str)] = &[
    ("ada", "bazaar-demo-pass"),
    ("grace", "bazaar-demo-pass"),
];

/// Demo listings per seller: (title, description, price).
const DEMO_PRODUCTS: &[(&str, &[(&str, &str, &str)])] = &[
    (
        "ada",
        &[
            (
                "Walnut desk lamp",
                "Hand-turned walnut base with a warm LED bulb. Cord included.",
                "49.00",
            ),
            (
                "Mechanical keyboard",
                "85% layout, brown switches, barely used.",
                "75.50",
            ),
        ],
    ),
    (
        "grace",
        &[(
            "Vintage compiler manual",
            "A well-loved reference from the stack of a systems programmer.",
            "12.00",
        )],
    ),
];

/// Seed demo users and products.
///
/// # Errors
///
/// Returns an error if the database URL is missing or any database
/// operation fails.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = super::database_url().ok_or("BAZAAR_DATABASE_URL not set")?;

    info!("Connecting to database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let users = UserRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    for (name, password) in DEMO_USERS {
        let username = Username::parse(name)?;

        let user = match users.get_by_username(&username).await? {
            Some(existing) => {
                info!(user = %username, "user already exists, skipping");
                existing
            }
            None => {
                let password_hash = hash_password(password)?;
                let created = users.create(&username, &password_hash).await?;
                info!(user = %username, "created demo user");
                created
            }
        };

        // Only list products for sellers that have none yet
        if !products.list_by_seller(user.id).await?.is_empty() {
            continue;
        }

        let Some((_, listings)) = DEMO_PRODUCTS.iter().find(|(seller, _)| seller == name) else {
            continue;
        };

        for (title, description, price) in *listings {
            let price = Price::parse(price)?;
            let id = products
                .create(user.id, title, description, price, None)
                .await?;
            info!(product = %id, seller = %username, "created demo listing");
        }
    }

    info!("Seed complete!");
    Ok(())
}
