use clap::{Arg, ArgAction, Command};
use hbnb::db::{DatabaseConfig, migrations};
use hbnb::{get_db_pool, utils};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    utils::init_logging();

    let matches = Command::new("migrate")
        .about("Apply the HBnB schema migrations to DATABASE_URL")
        .arg(
            Arg::new("list")
                .long("list")
                .help("Print the embedded migrations without touching the database")
                .action(ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("list") {
        for migration in migrations::MIGRATOR.iter() {
            println!("{} {}", migration.version, migration.description);
        }
        return Ok(());
    }

    let db_config = DatabaseConfig::from_env()?;
    let pool = get_db_pool(&db_config).await?;

    migrations::run_migrations(&pool).await?;
    info!("Migrations complete");

    Ok(())
}
