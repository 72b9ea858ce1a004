use anyhow::{Result, bail};
use clap::{Arg, Command};
use hbnb::constants::GENERATED_PASSWORD_LENGTH;
use hbnb::db::{DatabaseConfig, migrations};
use hbnb::services::NewUser;
use hbnb::{HbnbFacade, get_db_pool, utils};
use rand::{Rng, distr::Alphanumeric};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    utils::init_logging();

    let matches = Command::new("create-admin")
        .about("Seed an administrator account in the HBnB database")
        .arg(
            Arg::new("email")
                .long("email")
                .help("Email address of the admin account")
                .required(true),
        )
        .arg(
            Arg::new("first-name")
                .long("first-name")
                .help("First name of the admin")
                .default_value("Admin"),
        )
        .arg(
            Arg::new("last-name")
                .long("last-name")
                .help("Last name of the admin")
                .default_value("HBnB"),
        )
        .arg(
            Arg::new("password")
                .long("password")
                .help("Password for the account (generated when omitted)"),
        )
        .get_matches();

    let email = matches
        .get_one::<String>("email")
        .cloned()
        .unwrap_or_default();
    let first_name = matches
        .get_one::<String>("first-name")
        .cloned()
        .unwrap_or_default();
    let last_name = matches
        .get_one::<String>("last-name")
        .cloned()
        .unwrap_or_default();
    let (password, generated) = match matches.get_one::<String>("password") {
        Some(password) => (password.clone(), false),
        None => (generate_password(), true),
    };

    let db_config = DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;
    migrations::run_migrations(&pool).await?;

    let facade = HbnbFacade::postgres(pool);
    if facade.get_user_by_email(&email).await?.is_some() {
        bail!("A user with email {} already exists", email);
    }

    let admin = facade
        .create_user(NewUser {
            first_name,
            last_name,
            email: email.clone(),
            password: password.clone(),
            is_admin: true,
        })
        .await?;
    info!(user_id = %admin.id(), "Admin account created");

    println!("Admin account created: {} ({})", email, admin.id());
    if generated {
        println!("Generated password (shown once): {}", password);
    }

    Ok(())
}

fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LENGTH)
        .map(char::from)
        .collect()
}
