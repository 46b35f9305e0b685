use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use futures::{pin_mut, Stream, StreamExt};
use serde::Serialize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twitter_guest_scraper::{ScraperConfig, ScraperError, ScraperOptions, TweetsScraper, UsersScraper};

#[derive(Parser, Debug)]
#[command(author, version, about = "Look up tweets and users with a guest token", long_about = None)]
struct Args {
  #[command(subcommand)]
  command: Command,
  /// passed through to the scraper, single lookups never paginate
  #[arg(long, default_value_t = 0)]
  max_empty_pages: u32,
  /// log at debug level (RUST_LOG overrides)
  #[arg(short, long)]
  verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// tweets by id
  Tweets {
    #[arg(required = true)]
    ids: Vec<String>,
  },
  /// users by screen name
  Users {
    #[arg(required = true)]
    screen_names: Vec<String>,
  },
}

#[tokio::main]
async fn main() -> ExitCode {
  dotenv().ok();
  let args = Args::parse();

  let default_level = match args.verbose {
    true => "debug",
    false => "info",
  };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .init();

  match run(args).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{e}");
      ExitCode::FAILURE
    },
  }
}

async fn run(args: Args) -> Result<(), ScraperError> {
  let options = ScraperOptions::new(ScraperConfig::from_env())
    .max_empty_pages(args.max_empty_pages);

  match args.command {
    Command::Tweets { ids } => {
      let mut scraper = TweetsScraper::new(ids, options)?;
      print_all(scraper.get_items()).await?;
    },
    Command::Users { screen_names } => {
      let mut scraper = UsersScraper::new(screen_names, options)?;
      print_all(scraper.get_entities()).await?;
    },
  }
  Ok(())
}

/// one json object per line on stdout
async fn print_all<T: Serialize>(items: impl Stream<Item = Result<T, ScraperError>>) -> Result<(), ScraperError> {
  pin_mut!(items);
  while let Some(item) = items.next().await {
    println!("{}", serde_json::to_string(&item?)?);
  }
  Ok(())
}
