use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rs_markov_core::config::BotConfig;
use rs_markov_core::io::{read_lines, write_lines};
use rs_markov_core::model::tweet_generator::TweetGenerator;
use rs_markov_core::parser::csv_data_to_training_data;

/// Trains a Markov chain on a CSV file of tweets and generates new ones.
///
/// Values come from the defaults, then the optional JSON config file,
/// then the flags below.
#[derive(Parser, Debug)]
#[command(name = "rs-markov-bot")]
#[command(about = "Generate tweets from a Markov chain trained on a CSV file")]
struct Args {
    #[arg(long, help = "JSON configuration file")]
    config: Option<PathBuf>,
    #[arg(long, help = "CSV file containing the training tweets")]
    data: Option<PathBuf>,
    #[arg(long, help = "Zero-based CSV column holding the tweet text")]
    column: Option<usize>,
    #[arg(long, help = "Number of tweets to generate", allow_negative_numbers = true)]
    tweets: Option<isize>,
    #[arg(long, help = "Maximum number of characters per tweet", allow_negative_numbers = true)]
    max_chars: Option<isize>,
    #[arg(long, help = "Seed for a reproducible run")]
    seed: Option<u64>,
    #[arg(long, help = "Write the tweets to this file instead of stdout")]
    output: Option<PathBuf>,
    #[arg(long, help = "Append to the output file instead of overwriting it", default_value_t = false)]
    append: bool,
}

impl Args {
    /// Merges the flags over the configuration file (or the defaults).
    fn into_config(self) -> Result<BotConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => BotConfig::from_json_file(path)?,
            None => BotConfig::default(),
        };

        if let Some(data) = self.data {
            config.data_path = data;
        }
        if let Some(column) = self.column {
            config.tweet_column = column;
        }
        if let Some(tweets) = self.tweets {
            config.set_num_tweets(tweets)?;
        }
        if let Some(max_chars) = self.max_chars {
            config.set_max_chars(max_chars)?;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if self.output.is_some() {
            config.output_path = self.output;
        }
        config.append |= self.append;

        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Args::parse().into_config()?;
    log::debug!("running with {config:?}");

    // Train on every sentence of the tweet column
    let lines = read_lines(&config.data_path)?;
    let sentences = csv_data_to_training_data(&lines, config.tweet_column);
    if sentences.is_empty() {
        log::warn!("no training sentences found in {}", config.data_path.display());
    }

    let (walk_rng, punctuation_rng) = config.generators();
    let mut bot = TweetGenerator::from_sentences(sentences, walk_rng, punctuation_rng)?;

    let tweets = bot.generate_tweets(config.num_tweets(), config.max_chars())?;
    match &config.output_path {
        Some(path) => {
            write_lines(&tweets, path, config.append)?;
            log::info!("wrote {} tweets to {}", tweets.len(), path.display());
        }
        None => {
            for tweet in &tweets {
                println!("{tweet}");
            }
        }
    }

    Ok(())
}
