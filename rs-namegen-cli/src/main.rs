//! namegen: print pronounceable random names.
//!
//! Usage:
//!   namegen -n 20
//!   namegen --vowels uniform --syllables "cv:3,cvc" --syllable-counts "2:2,3"
//!   namegen --seed 42 --threads

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_namegen_core::model::composer::NameComposer;
use rs_namegen_core::model::config::{ComposerConfig, DEFAULT_SYLLABLES, DEFAULT_SYLLABLE_COUNTS, LetterSource};
use rs_namegen_core::text::title_case;

#[derive(Parser)]
#[command(
    name = "namegen",
    version,
    about = "Generate pronounceable random names from weighted syllables",
    after_help = "\"english\" and \"uniform\" are also valid for --vowels and --consonants.\n\
                  Syllable types accepted by --syllables are strings of 'v' (vowel), 'c' (consonant), and/or 'l' (letter)."
)]
struct Cli {
    /// Number of names to generate
    #[arg(short = 'n', long = "count", default_value_t = 10)]
    count: usize,

    /// Comma-separated list of colon-separated pairs of vowels and their weights
    #[arg(long, default_value = "english")]
    vowels: String,

    /// Comma-separated list of colon-separated pairs of consonants and their weights
    #[arg(long, default_value = "english")]
    consonants: String,

    /// Comma-separated list of colon-separated pairs of types of syllables and their weights
    #[arg(long, default_value = DEFAULT_SYLLABLES)]
    syllables: String,

    /// Comma-separated list of colon-separated pairs of numbers of syllables and their weights
    #[arg(long, default_value = DEFAULT_SYLLABLE_COUNTS)]
    syllable_counts: String,

    /// Random seed, for a reproducible list
    #[arg(long)]
    seed: Option<u64>,

    /// Generate on all CPU cores
    #[arg(long)]
    threads: bool,

    /// Print names as generated, without capitalization
    #[arg(long)]
    raw: bool,
}

impl Cli {
    fn config(&self) -> ComposerConfig {
        ComposerConfig {
            vowels: LetterSource::from(self.vowels.as_str()),
            consonants: LetterSource::from(self.consonants.as_str()),
            syllables: self.syllables.clone(),
            syllable_counts: self.syllable_counts.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = cli.config();
    info!("vowels: {}, consonants: {}", config.vowels, config.consonants);
    let composer = NameComposer::from_config(&config)?;

    let names = if cli.threads {
        composer.generate_parallel(cli.count, cli.seed)?
    } else {
        let mut rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        composer.generate_many(cli.count, &mut rng)?
    };

    for name in names {
        if cli.raw {
            println!("{name}");
        } else {
            println!("{}", title_case(&name));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_core_config() {
        let cli = Cli::parse_from(["namegen"]);
        assert_eq!(cli.count, 10);
        assert_eq!(cli.config(), ComposerConfig::default());
    }

    #[test]
    fn custom_letters_are_passed_through() {
        let cli = Cli::parse_from(["namegen", "-n", "3", "--vowels", "a:2,e", "--consonants", "uniform"]);
        let config = cli.config();
        assert_eq!(cli.count, 3);
        assert_eq!(config.vowels, LetterSource::Custom("a:2,e".to_owned()));
        assert_eq!(config.consonants, LetterSource::from("uniform"));
    }
}
