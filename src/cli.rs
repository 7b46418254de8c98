use clap::Parser;

use crate::servings::ServingsPolicy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the recipe JSON file
    #[arg(short, long)]
    pub recipe_file: String,

    /// Directory holding the reference nutrition CSV files
    #[arg(short, long, default_value = "data")]
    pub data_dir: String,

    /// Treat the recipe file as a JSON array of recipes
    #[arg(short, long)]
    pub batch: bool,

    /// Write results as JSON to this path instead of only printing the report
    #[arg(short, long)]
    pub output: Option<String>,

    /// Which estimate decides the per-serving division
    #[arg(long, value_enum, default_value = "weight-bucket")]
    pub servings_policy: ServingsPolicy,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
