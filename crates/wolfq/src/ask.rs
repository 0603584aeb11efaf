use crate::prelude::{println, *};
use colored::Colorize;
use wolfq_core::wolfram::{self, QueryOutput};

/// Text shown when the service has no answer for a query.
const NO_RESULT: &str = "No result found.";

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct AskOptions {
    /// Question to ask (e.g., "What is the speed of light in mph?")
    #[clap(env = "WOLFQ_INPUT")]
    input: String,

    /// Timeout in seconds (default: 30)
    #[arg(short, long, env = "WOLFQ_TIMEOUT", default_value = "30")]
    timeout: u64,

    /// Wolfram|Alpha AppID (overrides the environment)
    #[arg(long)]
    appid: Option<String>,

    /// Query endpoint base URL (overrides the environment)
    #[arg(long)]
    base_url: Option<String>,

    /// Show every section the service returned, not just the answer
    #[arg(long)]
    full: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Wolfram|Alpha configuration from environment variables
#[derive(Debug, Clone)]
pub struct WolframConfig {
    pub base_url: String,
    pub app_id: String,
}

impl WolframConfig {
    /// Default Wolfram|Alpha v2 query endpoint
    pub const DEFAULT_BASE_URL: &'static str = "https://api.wolframalpha.com/v2/query";

    /// Load configuration from environment variables
    /// Uses WOLFRAM_APP_ID if set, otherwise falls back to WOLFRAM_FULL_RESPONSE
    /// Uses WOLFRAM_BASE_URL with default fallback
    pub fn from_env() -> Result<Self, Error> {
        let app_id = std::env::var("WOLFRAM_APP_ID")
            .or_else(|_| std::env::var("WOLFRAM_FULL_RESPONSE"))
            .map_err(|_| {
                Error::Configuration(
                    "Neither WOLFRAM_APP_ID nor WOLFRAM_FULL_RESPONSE environment variable is set"
                        .to_string(),
                )
            })?;

        if app_id.trim().is_empty() {
            return Err(Error::Configuration(
                "Wolfram|Alpha AppID is set but empty".to_string(),
            ));
        }

        Ok(Self {
            base_url: std::env::var("WOLFRAM_BASE_URL")
                .unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string()),
            app_id,
        })
    }

    /// Apply CLI overrides to the configuration
    pub fn with_overrides(mut self, base_url: Option<String>, app_id: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        if let Some(id) = app_id {
            self.app_id = id;
        }
        self
    }
}

pub async fn run(options: AskOptions, global: crate::Global) -> Result<()> {
    let config = WolframConfig::from_env()?
        .with_overrides(options.base_url.clone(), options.appid.clone());

    if global.verbose {
        println!("Query endpoint: {}", config.base_url);
        println!();
    }

    let output = fetch_answer(&config, &options.input, options.timeout).await?;
    let answer = wolfram::select_answer(&output);

    if options.json {
        output_json(&output, answer.as_deref())?;
    } else {
        output_formatted(&output, answer.as_deref(), &options);
    }

    Ok(())
}

/// Perform one query round trip: encode, fetch, decode.
///
/// A single attempt with no retries; connection failures, timeouts,
/// non-2xx statuses, and body read failures surface to the caller as-is.
async fn fetch_answer(
    config: &WolframConfig,
    input: &str,
    timeout: u64,
) -> Result<QueryOutput, Error> {
    let url = wolfram::query_url(&config.base_url, input, &config.app_id);

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout))
        .build()
        .map_err(|e| Error::Network(e.to_string()))?;

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Network(f!("HTTP {}", response.status())));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Read(e.to_string()))?;

    wolfram::decode_response(&body)
}

fn output_formatted(output: &QueryOutput, answer: Option<&str>, options: &AskOptions) {
    match answer {
        Some(answer) => std::println!("{}", answer.bright_white().bold()),
        None => std::println!("{}", NO_RESULT.bright_black()),
    }

    if options.full {
        for section in &output.sections {
            std::println!("\n{}", section.title.bold().cyan());
            for fragment in &section.fragments {
                if fragment.is_empty() {
                    continue;
                }
                for line in fragment.lines() {
                    std::println!("  {}", line);
                }
            }
        }
    }
}

fn output_json(output: &QueryOutput, answer: Option<&str>) -> Result<()> {
    #[derive(serde::Serialize)]
    struct AskOutput<'a> {
        answer: Option<&'a str>,
        #[serde(flatten)]
        result: &'a QueryOutput,
    }

    let json = serde_json::to_string_pretty(&AskOutput {
        answer,
        result: output,
    })?;
    println!("{}", json);

    Ok(())
}
