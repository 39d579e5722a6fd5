use std::path::PathBuf;

use colored::Colorize;

use crate::db::{get_connection, init_db};
use crate::error::Result;
use crate::settings::{load_settings, save_settings};

/// Create the data directory and warehouse schema. Precedence for the
/// data directory: --data-dir flag, then PINNACLE_DATA_DIR, then the
/// settings file. Env-driven runs do not rewrite the settings file.
pub fn run(data_dir: Option<String>, company: Option<String>) -> Result<()> {
    let env_dir = std::env::var("PINNACLE_DATA_DIR")
        .ok()
        .filter(|s| !s.is_empty());

    let mut settings = load_settings();
    if let Some(name) = company {
        settings.company_name = name;
    }

    let dir = match (&data_dir, &env_dir) {
        (Some(flag), _) => {
            settings.data_dir = flag.clone();
            PathBuf::from(flag)
        }
        (None, Some(env)) => PathBuf::from(env),
        (None, None) => PathBuf::from(&settings.data_dir),
    };

    std::fs::create_dir_all(&dir)?;
    let db = dir.join("pinnacle.db");
    let conn = get_connection(&db)?;
    init_db(&conn)?;

    if env_dir.is_none() || data_dir.is_some() {
        save_settings(&settings)?;
    }

    println!("{} Warehouse ready at {}", "✓".green(), db.display());
    println!("Run `pinnacle demo` to load sample data, then `pinnacle report --help`.");
    Ok(())
}
