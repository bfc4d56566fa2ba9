use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::ArgMatches;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::chat::format_message;
use super::chat::help_text;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Language;
use crate::domain::models::RequestType;
use crate::domain::models::TranslationDirection;
use crate::domain::services::AppState;
use crate::domain::services::LanguageStore;
use crate::domain::services::Outcome;
use crate::infrastructure::backends::BackendManager;
use crate::infrastructure::storage::Preferences;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

async fn print_history() -> Result<()> {
    let language = LanguageStore::load(Preferences::default()).await;
    let app_state = AppState::new(
        BackendManager::get(),
        &language,
        Config::get_i64(ConfigKey::UserID),
    )?;

    let messages = app_state.history.fetch(app_state.user_id).await?;
    if messages.is_empty() {
        println!(
            "{}",
            language.translate(
                "There's no chat history yet. Start your first conversation!",
                "এখনো কোনো কথোপকথন নেই। প্রথম কথোপকথন শুরু করো!",
            )
        );
        return Ok(());
    }

    let formatted = messages
        .iter()
        .map(|message| {
            return format_message(message, language.language());
        })
        .collect::<Vec<String>>()
        .join("\n\n");
    println!("{formatted}");

    return Ok(());
}

async fn ask(matches: &ArgMatches) -> Result<()> {
    let language = LanguageStore::load(Preferences::default()).await;
    let app_state = AppState::new(
        BackendManager::get(),
        &language,
        Config::get_i64(ConfigKey::UserID),
    )?;

    let text = matches
        .get_many::<String>("text")
        .map(|values| return values.cloned().collect::<Vec<String>>().join(" "))
        .unwrap_or_default();

    let request_type = matches
        .get_one::<String>("type")
        .and_then(|val| return RequestType::parse(val));

    let translation_direction = matches
        .get_one::<String>("direction")
        .and_then(|val| return TranslationDirection::from_target(val));

    let bilingual = matches.get_flag("bilingual");

    let outcome = app_state
        .submit(&text, request_type, translation_direction, bilingual)
        .await?;

    match outcome {
        Outcome::Answered(message) => {
            println!("{}", format_message(&message, language.language()));
        }
        Outcome::Apologized(message) => {
            bail!(message.text);
        }
    }

    return Ok(());
}

async fn language(matches: &ArgMatches) -> Result<()> {
    let mut store = LanguageStore::load(Preferences::default()).await;
    if matches.get_flag("toggle") {
        store.toggle().await;
    }

    println!("{}", store.language());
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_debug() -> Command {
    return Command::new("debug")
        .about("Debug helpers for Curio")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running Curio with environment variable RUST_LOG=curio")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );
}

fn subcommand_ask() -> Command {
    return Command::new("ask")
        .about("Ask Curio a single question and print the reply.")
        .arg(
            Arg::new("text")
                .help("The question or text to send.")
                .num_args(1..)
                .required(true),
        )
        .arg(
            Arg::new("type")
                .long("type")
                .help("How Curio should treat the text.")
                .num_args(1)
                .value_parser(PossibleValuesParser::new([
                    "simplify",
                    "analyze",
                    "translate",
                    "research",
                ])),
        )
        .arg(
            Arg::new("direction")
                .long("to")
                .help("Target language when translating. [default: bn]")
                .num_args(1)
                .value_parser(PossibleValuesParser::new(["bn", "en"])),
        )
        .arg(
            Arg::new("bilingual")
                .long("bilingual")
                .help("Also ask for a Bengali translation of the reply.")
                .action(ArgAction::SetTrue),
        );
}

fn subcommand_lang() -> Command {
    return Command::new("lang")
        .about(format!(
            "Print the display language, one of: {}",
            Language::VARIANTS.join(", ")
        ))
        .arg(
            Arg::new("toggle")
                .long("toggle")
                .help("Switch to the other language and remember it.")
                .action(ArgAction::SetTrue),
        );
}

fn arg_api_url() -> Arg {
    return Arg::new(ConfigKey::ApiURL.to_string())
        .long(ConfigKey::ApiURL.to_string())
        .env("CURIO_API_URL")
        .num_args(1)
        .help(format!(
            "Curio API URL the assistant requests are sent to. [default: {}]",
            Config::default(ConfigKey::ApiURL)
        ))
        .global(true);
}

fn arg_user_id() -> Arg {
    return Arg::new(ConfigKey::UserID.to_string())
        .short('u')
        .long(ConfigKey::UserID.to_string())
        .env("CURIO_USER_ID")
        .num_args(1)
        .help(format!(
            "User ID sent with every request and used to load chat history. [default: {}]",
            Config::default(ConfigKey::UserID)
        ))
        .global(true);
}

fn arg_request_timeout() -> Arg {
    return Arg::new(ConfigKey::RequestTimeout.to_string())
        .long(ConfigKey::RequestTimeout.to_string())
        .env("CURIO_REQUEST_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds for the assistant to reply before giving up. [default: {}]",
            Config::default(ConfigKey::RequestTimeout)
        ))
        .global(true);
}

fn arg_backend_health_check_timeout() -> Arg {
    return Arg::new(ConfigKey::BackendHealthCheckTimeout.to_string())
        .long(ConfigKey::BackendHealthCheckTimeout.to_string())
        .env("CURIO_BACKEND_HEALTH_CHECK_TIMEOUT")
        .num_args(1)
        .help(format!(
            "Time to wait in milliseconds before timing out when checking the Curio API is reachable. [default: {}]",
            Config::default(ConfigKey::BackendHealthCheckTimeout)
        ))
        .global(true);
}

fn arg_state_dir() -> Arg {
    return Arg::new(ConfigKey::StateDir.to_string())
        .long(ConfigKey::StateDir.to_string())
        .env("CURIO_STATE_DIR")
        .num_args(1)
        .help(format!(
            "Directory where preferences such as the display language are kept. [default: {}]",
            Config::default(ConfigKey::StateDir)
        ))
        .global(true);
}

pub fn build() -> Command {
    let commands_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("COMMANDS:") {
                return Paint::new(format!("CHAT {line}"))
                    .underline()
                    .bold()
                    .to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}\nCommit: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    );

    return Command::new("curio")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(commands_text)
        .arg_required_else_help(false)
        .subcommand(Command::new("chat").about("Start a new chat with Curio."))
        .subcommand(subcommand_ask())
        .subcommand(Command::new("history").about("Print your stored chat history."))
        .subcommand(subcommand_lang())
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .arg(arg_api_url())
        .arg(arg_user_id())
        .arg(arg_request_timeout())
        .arg(arg_backend_health_check_timeout())
        .arg(arg_state_dir())
        .arg(
            Arg::new(ConfigKey::ConfigFile.to_string())
                .short('c')
                .long(ConfigKey::ConfigFile.to_string())
                .env("CURIO_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true)
        );
}

pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = dirs::cache_dir()
                        .unwrap_or_else(std::env::temp_dir)
                        .join("curio/debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("chat", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
        }
        Some(("ask", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            ask(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("history", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            print_history().await?;
            return Ok(false);
        }
        Some(("lang", subcmd_matches)) => {
            Config::load(build(), vec![&matches, subcmd_matches]).await?;
            language(subcmd_matches).await?;
            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        _ => {
            Config::load(build(), vec![&matches]).await?;
        }
    }

    return Ok(true);
}
