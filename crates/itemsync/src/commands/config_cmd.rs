//! Config subcommand handlers.

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            output::print_output(config::render_toml(&cfg)?.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { service_url, force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            if let Some(raw) = service_url {
                // Reject unusable URLs before they reach disk.
                itemsync_config::parse_service_url(&raw)?;
                cfg.service.url = raw.trim().to_owned();
            }

            let written = config::save_config(&cfg)?;
            output::print_status(
                &format!("Config written to {}", written.display()),
                global.quiet,
                global.color,
            );
            Ok(())
        }
    }
}
