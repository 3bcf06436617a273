use anyhow::{anyhow, bail, Result};
use clap::ArgMatches;
use dotenvy::dotenv;
use tracing::Level;

use bookmeta::{config::Config, display, store::Store, Client};

mod command_parser;
mod server;

/// Validate an ISBN argument and return it in plain digits.
pub fn parse_isbn(s: &str) -> Result<String> {
    s.trim()
        .parse::<isbn2::Isbn>()
        .map_err(|_| anyhow!("{s} is not an isbn"))?;
    Ok(s.chars().filter(char::is_ascii_alphanumeric).collect())
}

/// Output of subcommands that don't need the user's configuration.
fn run_without_config(matches: &ArgMatches) -> Option<Result<String>> {
    match matches.subcommand() {
        Some(("config", _)) => Some(Config::default_as_string()),
        _ => None,
    }
}

fn init_tracing(config: &Config) {
    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn lookup(client: &Client, config: &Config, isbn: &str) -> Result<bookmeta::BookRecord> {
    let isbn = parse_isbn(isbn)?;
    match client.fetch_book_metadata(&isbn).await {
        Some(record) => Ok(record),
        None => bail!(config
            .output_error
            .format_str(format!("No metadata found for {isbn}"))),
    }
}

async fn open_store(config: &Config) -> Result<Store> {
    Ok(Store::connect(&config.database_path()?).await?)
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenv();
    let matches = command_parser::arg_parser().get_matches();
    if let Some(output) = run_without_config(&matches) {
        print!("{}", output?);
        return Ok(());
    }

    let config = Config::read_config()?;
    init_tracing(&config);

    match matches.subcommand() {
        Some(("lookup", matches)) => {
            let client = Client::from_config(&config)?;
            let isbn = matches.get_one::<String>("isbn").expect("required");
            let record = lookup(&client, &config, isbn).await?;
            if matches.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print!("{}", display::record_to_string(&record, &config));
            }
        }
        Some(("add", matches)) => {
            let client = Client::from_config(&config)?;
            let isbn = matches.get_one::<String>("isbn").expect("required");
            let record = lookup(&client, &config, isbn).await?;
            let store = open_store(&config).await?;
            let id = store.insert(&record).await?;
            println!("{}", config.output_id.format_str(id));
            print!("{}", display::record_to_string(&record, &config));
        }
        Some(("show", matches)) => {
            let id = *matches.get_one::<i64>("id").expect("required");
            let store = open_store(&config).await?;
            match store.get(id).await? {
                Some(book) => print!("{}", display::stored_to_string(&book, &config)),
                None => bail!(config.output_error.format_str(format!("No book with id {id}"))),
            }
        }
        Some(("list", _)) => {
            let store = open_store(&config).await?;
            for book in store.list().await? {
                println!("{}", display::stored_to_string(&book, &config));
            }
        }
        Some(("serve", _)) => {
            let client = Client::from_config(&config)?;
            server::start(client, &config.server_address).await?;
        }
        Some((name, _)) => unreachable!("unhandled subcommand {name}"),
        None => unreachable!("subcommand required"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isbn_arguments_are_validated() {
        assert!(parse_isbn("not an isbn").is_err());
        assert!(parse_isbn("9780552124752").is_err());
        assert_eq!(parse_isbn("978-0-552-12475-1").unwrap(), "9780552124751");
    }

    #[test]
    fn config_subcommand_ignores_broken_config_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("bookmeta.toml", "timeout_secs = \"soon\"")?;
            assert!(Config::read_config().is_err());

            let matches = command_parser::arg_parser()
                .try_get_matches_from(["bookmeta", "config"])
                .unwrap();
            let output = run_without_config(&matches).unwrap().unwrap();
            assert!(output.contains("api_base_url"));
            Ok(())
        });
    }

    #[test]
    fn other_subcommands_need_config() {
        let matches = command_parser::arg_parser()
            .try_get_matches_from(["bookmeta", "list"])
            .unwrap();
        assert!(run_without_config(&matches).is_none());
    }
}
