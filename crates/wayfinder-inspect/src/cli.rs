//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Inspect the location context graph built from a world snapshot.
#[derive(Debug, Parser)]
#[command(name = "wayfinder-inspect")]
#[command(about = "Build and query the Wayfinder location context graph")]
#[command(long_about = None)]
pub struct Args {
    /// YAML configuration file (defaults apply when omitted)
    #[arg(long, env = "WAYFINDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// YAML or JSON world snapshot (the sample valley when omitted)
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// What to print (dump when omitted)
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    /// The command to run, defaulting to [`Command::Dump`].
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Dump)
    }
}

/// What to print.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the whole store as pretty JSON
    Dump,

    /// Print one context and its containment chain
    Context {
        /// Location name (generated levels are folded)
        name: String,
    },

    /// Print the building a location sits in
    Ancestor {
        /// Location name
        name: String,
    },

    /// Print the entry tile in FROM that leads toward TO
    Door {
        /// Where the player is
        from: String,
        /// Where the player wants to go
        to: String,
    },

    /// Print consistency violations in the built store
    Audit,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Args, clap::Error> {
        Args::try_parse_from(
            std::iter::once("wayfinder-inspect").chain(line.split_whitespace()),
        )
    }

    #[test]
    fn no_arguments_dumps_sample() {
        let args = parse("");
        assert!(args.is_ok());
        let args = args.ok();
        assert!(args.as_ref().is_some_and(|a| a.world.is_none()));
        assert_eq!(args.as_ref().map(Args::selected_command), Some(Command::Dump));
    }

    #[test]
    fn flags_and_command() {
        let args = parse("--config wayfinder.yaml --world valley.json door Town SaloonBackRoom")
            .ok();
        assert_eq!(
            args.as_ref().and_then(|a| a.config.clone()),
            Some(PathBuf::from("wayfinder.yaml"))
        );
        assert_eq!(
            args.as_ref().and_then(|a| a.world.clone()),
            Some(PathBuf::from("valley.json"))
        );
        assert_eq!(
            args.as_ref().map(Args::selected_command),
            Some(Command::Door {
                from: "Town".to_owned(),
                to: "SaloonBackRoom".to_owned(),
            })
        );
    }

    #[test]
    fn single_argument_commands() {
        assert_eq!(
            parse("context Cellar").ok().as_ref().map(Args::selected_command),
            Some(Command::Context {
                name: "Cellar".to_owned()
            })
        );
        assert_eq!(
            parse("ancestor Cellar").ok().as_ref().map(Args::selected_command),
            Some(Command::Ancestor {
                name: "Cellar".to_owned()
            })
        );
        assert_eq!(parse("audit").ok().as_ref().map(Args::selected_command), Some(Command::Audit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse("--world").is_err());
        assert!(parse("--verbose").is_err());
        assert!(parse("teleport").is_err());
        assert!(parse("door Town").is_err());
        assert!(parse("audit now").is_err());
    }
}
