//! Interactive `.cursorrules` generator.
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --features rules --bin rules-cli -- generate
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tiny_livekit::rules::prompts::{RAG_LIVEKIT_CONTEXT, RAG_LIVEKIT_DESCRIPTION};
use tiny_livekit::rules::static_rules::{STATIC_RULES_PREAMBLE, STATIC_RULES_TITLE};
use tiny_livekit::rules::storage::{
    save_raw, save_rules_md, DEFAULT_RULES_PATH, RAG_LIVEKIT_RULES_PATH, RAG_LIVEKIT_STATIC_PATH,
    RAW_RULES_PATH,
};
use tiny_livekit::rules::{
    pair_answers, static_rag_livekit_rules, OpenAiClient, OpenAiConfig, RulesGenerator,
};
use tiny_livekit::utils;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(name = "rules-cli", about = "Generate .cursorrules files with an LLM")]
struct Cli {
    /// Env file to load before reading OPENAI_* variables.
    #[arg(long, global = true, default_value = ".env")]
    env_file: String,

    /// Override OPENAI_MODEL.
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Describe a project, answer clarifying questions, get rules.
    Generate {
        #[arg(long, default_value = DEFAULT_RULES_PATH)]
        output: PathBuf,
    },
    /// Rules for a RAG voice agent on LiveKit, generated by the LLM.
    RagLivekit {
        #[arg(long, default_value = RAG_LIVEKIT_RULES_PATH)]
        output: PathBuf,
    },
    /// Built-in RAG + LiveKit rules, no API call.
    RagLivekitStatic {
        #[arg(long, default_value = RAG_LIVEKIT_STATIC_PATH)]
        output: PathBuf,
        /// Also write the bare rules here.
        #[arg(long, default_value = RAW_RULES_PATH)]
        raw: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let env_file = utils::load_dotenv_once(cli.env_file.clone());
    utils::init_tracing();
    debug!(path = %env_file, "environment loaded");

    match cli.command {
        Command::Generate { output } => generate(cli.model, output).await,
        Command::RagLivekit { output } => rag_livekit(cli.model, output).await,
        Command::RagLivekitStatic { output, raw } => rag_livekit_static(output, raw),
    }
}

fn generator(model: Option<String>) -> Result<RulesGenerator<OpenAiClient>> {
    let mut config = OpenAiConfig::load().context("make sure OPENAI_API_KEY is set")?;
    if let Some(model) = model {
        config = config.with_model(model);
    }
    Ok(RulesGenerator::new(OpenAiClient::new(config)?))
}

async fn generate(model: Option<String>, output: PathBuf) -> Result<()> {
    let generator = generator(model)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let query = prompt_line(&mut input, "Describe your project or what you want: ")?;

    let clarifications = match generator.clarifying_questions(&query).await {
        Ok(questions) if !questions.is_empty() => {
            println!("\nClarifying questions:");
            for (i, q) in questions.iter().enumerate() {
                println!("{}. {}", i + 1, q);
            }
            println!("\nEnter one answer per line, then press Enter on an empty line:");
            let answers = read_until_blank(&mut input)?;
            pair_answers(&questions, &answers)
        }
        Ok(_) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "could not get clarifying questions, continuing without them");
            println!("\nCould not get clarifying questions: {e}");
            Vec::new()
        }
    };

    let rules = generator.generate_cursorrules(&query, &clarifications).await?;
    println!("\nGenerated rules:\n\n{rules}");

    if confirm(&mut input, &format!("\nSave to {}? (y/n): ", output.display()))? {
        save_rules_md(&rules, &output, "Cursor Rules", None)?;
        println!("Saved to {}", output.display());
    } else {
        println!("File not saved.");
    }
    Ok(())
}

async fn rag_livekit(model: Option<String>, output: PathBuf) -> Result<()> {
    let generator = generator(model)?;
    println!("Generating .cursorrules for a RAG project on LiveKit...");
    let rules = generator
        .generate_rag_livekit_rules(RAG_LIVEKIT_DESCRIPTION, RAG_LIVEKIT_CONTEXT)
        .await?;
    println!("\nGenerated rules for the RAG + LiveKit project:\n\n{rules}");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if confirm(&mut input, &format!("\nSave to {}? (y/n): ", output.display()))? {
        save_rules_md(&rules, &output, STATIC_RULES_TITLE, None)?;
        println!("Saved to {}", output.display());
    } else {
        println!("File not saved.");
    }
    Ok(())
}

fn rag_livekit_static(output: PathBuf, raw: PathBuf) -> Result<()> {
    let rules = static_rag_livekit_rules();
    println!("Built-in rules for the RAG + LiveKit project:\n\n{rules}");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    if confirm(&mut input, &format!("\nSave to {}? (y/n): ", output.display()))? {
        save_rules_md(rules, &output, STATIC_RULES_TITLE, Some(STATIC_RULES_PREAMBLE))?;
        println!("Saved to {}", output.display());
        save_raw(rules, &raw)?;
        println!("Also saved to {} for direct use in Cursor", raw.display());
    } else {
        println!("File not saved.");
    }
    Ok(())
}

fn prompt_line(input: &mut impl BufRead, label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        anyhow::bail!("unexpected end of input");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_until_blank(input: &mut impl BufRead) -> Result<Vec<String>> {
    let mut answers = Vec::new();
    for line in input.lines() {
        let line = line?;
        if line.is_empty() {
            break;
        }
        answers.push(line);
    }
    Ok(answers)
}

fn confirm(input: &mut impl BufRead, label: &str) -> Result<bool> {
    loop {
        match prompt_line(input, label)?.trim().to_lowercase().as_str() {
            "y" => return Ok(true),
            "n" => return Ok(false),
            _ => println!("Please enter 'y' to save or 'n' to cancel."),
        }
    }
}
