use bson::Bson;
use clap::Parser;
use mongocriteria::{
    criteria_from_json,
    options::{NumericFallback, TranslateOptions},
    schema::Schema,
    translate_criteria,
};
use std::path::PathBuf;

#[derive(Debug)]
struct CliError(String);

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<T> From<T> for CliError
where
    T: std::error::Error,
{
    fn from(e: T) -> Self {
        CliError(e.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Cli {
    #[arg(
        index = 1,
        required_unless_present = "file",
        help = "The criteria to translate, as Extended JSON"
    )]
    criteria: Option<String>,
    #[arg(short, long, help = "Read the criteria from this file instead")]
    file: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "A JSON file mapping field names to {\"type\": ...} descriptors, default = no schema"
    )]
    schema: Option<PathBuf>,
    #[arg(
        long,
        help = "Keep unparsable numeric strings instead of replacing them with NaN"
    )]
    keep_unparsable_numbers: bool,
    #[arg(long, help = "Convert 24-hex identity values into ObjectIds")]
    object_id_identity: bool,
    #[arg(short, long, help = "Print any fallback diagnostics after the translation")]
    diagnostics: bool,
}

mod logger {
    use std::env;
    use tracing::Level;
    use tracing_subscriber::{filter::EnvFilter, fmt::time};

    const DEFAULT_LOG_LEVEL: &str = "info";

    pub(crate) fn log_level_directive(configured: Option<String>) -> String {
        configured.unwrap_or_else(|| DEFAULT_LOG_LEVEL.into())
    }

    pub fn init_logger() {
        let log_level_str = log_level_directive(env::var("LOG_LEVEL").ok());
        let log_level = log_level_str.parse::<Level>().unwrap_or(Level::INFO);
        let env_filter = EnvFilter::new(log_level_str);

        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .with_timer(time::ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
            .init();

        tracing::debug!("Logger initialized with level: {}", log_level);
    }
}

fn main() -> Result<(), CliError> {
    logger::init_logger();
    let args = Cli::parse();

    let criteria = match (args.criteria, args.file) {
        (_, Some(path)) => std::fs::read_to_string(path)?,
        (Some(criteria), None) => criteria,
        (None, None) => return Err(CliError("no criteria given".to_string())),
    };
    let criteria = criteria_from_json(serde_json::from_str(&criteria)?)?;
    let schema = match args.schema {
        Some(path) => Schema::from_json_str(&std::fs::read_to_string(path)?)?,
        None => Schema::default(),
    };
    let numeric_fallback = if args.keep_unparsable_numbers {
        NumericFallback::KeepOriginal
    } else {
        NumericFallback::NaN
    };
    let options = TranslateOptions::new(numeric_fallback, args.object_id_identity);

    let translation = translate_criteria(&criteria, &schema, options);

    let output = Bson::Document(translation.criteria).into_relaxed_extjson();
    println!("{}", serde_json::to_string_pretty(&output)?);
    if args.diagnostics {
        for diagnostic in translation.diagnostics {
            eprintln!("warning: {}", diagnostic);
        }
    }
    Ok(())
}
