use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Football data gateway
///
/// Queries league and fixture data from the API-Football provider and prints the
/// canonical records as JSON. League and fixture results are cached for the lifetime
/// of the process; live fixtures are always fetched fresh.
///
/// The provider credential is read from FOOTBALL_API_KEY (a `.env` file in the
/// working directory is honoured).
#[derive(Parser, Debug)]
#[command(about, long_about = None, version)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Pretty-print JSON output
    #[arg(long, global = true, help_heading = "Output")]
    pub pretty: bool,

    /// Also write logs to stderr
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch leagues by id (current season) or every league of a country
    Leagues {
        /// League ids; duplicates are fetched once
        #[arg(
            long = "id",
            value_name = "LEAGUE_ID",
            num_args = 1..,
            conflicts_with = "country",
            required_unless_present = "country"
        )]
        ids: Vec<i32>,

        /// Country name, e.g. "England"
        #[arg(long)]
        country: Option<String>,
    },

    /// Fetch the fixtures of one league season
    Fixtures {
        /// League id
        #[arg(long)]
        league: i32,

        /// Season start year, e.g. 2024
        #[arg(long)]
        season: i32,

        /// Status filter, e.g. FT or NS-PST (case-insensitive)
        #[arg(long)]
        status: Option<String>,
    },

    /// Fetch fixtures currently in play (never cached)
    Live,

    /// Inspect or initialize the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the effective configuration (file and environment)
    Show,
    /// Write a configuration file with default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_leagues_by_ids() {
        let args = Args::try_parse_from(["football_gateway", "leagues", "--id", "39", "71"]).unwrap();
        match args.command {
            Command::Leagues { ids, country } => {
                assert_eq!(ids, vec![39, 71]);
                assert!(country.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_leagues_requires_ids_or_country() {
        assert!(Args::try_parse_from(["football_gateway", "leagues"]).is_err());
        assert!(
            Args::try_parse_from([
                "football_gateway",
                "leagues",
                "--id",
                "39",
                "--country",
                "England"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_parse_fixtures_with_global_flags() {
        let args = Args::try_parse_from([
            "football_gateway",
            "fixtures",
            "--league",
            "39",
            "--season",
            "2024",
            "--status",
            "ft",
            "--pretty",
        ])
        .unwrap();
        assert!(args.pretty);
        match args.command {
            Command::Fixtures {
                league,
                season,
                status,
            } => {
                assert_eq!((league, season), (39, 2024));
                assert_eq!(status.as_deref(), Some("ft"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_init() {
        let args = Args::try_parse_from(["football_gateway", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            args.command,
            Command::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }
}
