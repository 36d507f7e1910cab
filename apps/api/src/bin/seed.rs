//! # Staff Account Seeder
//!
//! Provisions the staff accounts the public signup never creates.
//! Signup only produces Customer accounts; Admin, Chef, Manager, and
//! Waiter logins come from here.
//!
//! ## Usage
//! ```bash
//! # Seed into the default database path
//! cargo run -p cafe-api --bin seed
//!
//! # Specify database path
//! DATABASE_PATH=./data/cafe.db cargo run -p cafe-api --bin seed
//! ```
//!
//! Default passwords are development-only; rotate them before any
//! real deployment.

use chrono::Utc;
use uuid::Uuid;

use cafe_api::auth::hash_password;
use cafe_api::ApiConfig;
use cafe_core::{Gender, User, UserRole};
use cafe_db::{Database, DbConfig};

/// (username, password, role, first, last, email, gender)
const STAFF: &[(&str, &str, UserRole, &str, &str, &str, Gender)] = &[
    (
        "admin001",
        "Admin1pass",
        UserRole::Admin,
        "Ada",
        "Hassan",
        "admin@cafe.local",
        Gender::Female,
    ),
    (
        "chef0001",
        "Chef1pass!",
        UserRole::Chef,
        "Omar",
        "Farouk",
        "chef@cafe.local",
        Gender::Male,
    ),
    (
        "manager1",
        "Manager1pass",
        UserRole::Manager,
        "Mona",
        "Selim",
        "manager@cafe.local",
        Gender::Female,
    ),
    (
        "waiter01",
        "Waiter1pass",
        UserRole::Waiter,
        "Youssef",
        "Adel",
        "waiter@cafe.local",
        Gender::Male,
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().init();

    let config = ApiConfig::load()?;
    let db = Database::new(DbConfig::new(&config.database_path)).await?;

    let mut created = 0;
    for (username, password, role, first, last, email, gender) in STAFF {
        if db.users().get_by_username(username).await?.is_some() {
            println!("skipping {username}: already exists");
            continue;
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password_hash: hash_password(password).map_err(|e| e.message().to_string())?,
            user_type: *role,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: email.to_string(),
            gender: *gender,
            created_at: Utc::now(),
        };

        db.users().insert(&user).await?;
        println!("created {role} account: {username}");
        created += 1;
    }

    println!("done, {created} account(s) created");
    Ok(())
}
