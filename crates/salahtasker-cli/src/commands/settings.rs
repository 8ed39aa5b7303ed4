//! Default location settings commands.

use clap::Subcommand;
use salahtasker_core::{CalculationMethod, Database, UserDefaults};

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Show saved defaults
    Get {
        #[arg(long, default_value = "local")]
        user: String,
    },
    /// Save default city/country/method
    Set {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        country: Option<String>,
        /// Calculation method id (see `salahtasker-cli methods`)
        #[arg(long)]
        method: Option<u16>,
        #[arg(long, default_value = "local")]
        user: String,
    },
}

pub fn run(action: SettingsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    match action {
        SettingsAction::Get { user } => match db.user_defaults(&user)? {
            Some(defaults) => {
                println!("city:    {}", defaults.city.as_deref().unwrap_or("-"));
                println!("country: {}", defaults.country.as_deref().unwrap_or("-"));
                match defaults.method.filter(|m| *m != 0) {
                    Some(m) => println!("method:  {} ({})", m, CalculationMethod::label_for_id(m)),
                    None => println!("method:  -"),
                }
            }
            None => println!("no saved defaults"),
        },
        SettingsAction::Set {
            city,
            country,
            method,
            user,
        } => {
            if let Some(m) = method {
                if CalculationMethod::from_id(m).is_none() {
                    eprintln!("warning: method {m} is not a known calculation method");
                }
            }
            // Unset fields keep their previously saved values.
            let saved = db.user_defaults(&user)?.unwrap_or_default();
            let merged = UserDefaults {
                city: city.or(saved.city),
                country: country.or(saved.country),
                method: method.or(saved.method),
            };
            db.set_user_defaults(&user, &merged)?;
            println!("ok");
        }
    }
    Ok(())
}
