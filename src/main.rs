use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use model_chat::args::CommonArgs;
use model_chat::clipboard::SystemClipboard;
use model_chat::config::{ConfigStore, ModelConfig};
use model_chat::controller::{Controller, NoticeLevel};
use model_chat::validation::{self, START_RULES};
use model_chat::{logging, providers, theme};

#[derive(Debug, Parser)]
#[command(name = "model-chat", version, about = "Pick an AI model provider, API key and model")]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the interactive terminal UI (default)
    #[command(alias = "ui")]
    Tui,
    /// Print the saved configuration with the API key masked
    Show(ShowArgs),
    /// List the platforms and the models each one offers
    Models(ModelsArgs),
    /// Validate and save a configuration without the UI
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct ModelsArgs {
    /// Only list this platform's models
    #[arg(value_name = "PLATFORM")]
    platform: Option<String>,
}

#[derive(Debug, Args)]
struct SetArgs {
    #[arg(long, value_name = "NAME")]
    platform: String,
    #[arg(long = "api-key", value_name = "KEY", env = "MODEL_CHAT_API_KEY")]
    api_key: String,
    #[arg(long, value_name = "NAME")]
    model: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = logging::init(&cli.common.log_dir());

    let store = ConfigStore::new(cli.common.config_path());

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => run_tui(store).await,
        Commands::Show(args) => show(&store, args.json),
        Commands::Models(args) => {
            list_models(args.platform.as_deref());
            Ok(())
        }
        Commands::Set(args) => set(store, args),
    }
}

#[cfg(feature = "tui")]
async fn run_tui(store: ConfigStore) -> Result<()> {
    let mut app = model_chat::app::App::new(store, Box::new(SystemClipboard::new()));
    app.run().await
}

#[cfg(not(feature = "tui"))]
async fn run_tui(_store: ConfigStore) -> Result<()> {
    bail!("This build has no terminal UI; rebuild with the \"tui\" feature.")
}

fn show(store: &ConfigStore, json: bool) -> Result<()> {
    let saved = store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))?;

    let Some(mut config) = saved else {
        println!("{}", theme::muted("No configuration saved."));
        return Ok(());
    };
    config.api_key = config.masked_api_key();

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    theme::print_header("Model configuration");
    println!("  {:<10}{}", "platform", theme::accent(&config.platform));
    println!("  {:<10}{}", "api_key", config.api_key);
    println!("  {:<10}{}", "model", theme::accent(&config.model));
    println!("  {}", theme::muted(&store.path().display().to_string()));
    Ok(())
}

fn list_models(platform: Option<&str>) {
    for provider in providers::PROVIDERS {
        if platform.is_some_and(|p| p != provider.name) {
            continue;
        }
        println!("{}  {}", theme::accent_bright(provider.name), theme::muted(provider.base_url));
        for model in provider.models {
            println!("    {model}");
        }
    }
}

fn set(store: ConfigStore, args: SetArgs) -> Result<()> {
    let mut controller = Controller::new(store, Box::new(SystemClipboard::new()));
    let message = apply_set(&mut controller, &args)?;
    println!("{}", theme::icon_ok(&message));
    Ok(())
}

/// Fill the form from `args`, then check and save it the way Start and
/// Confirm do.  Returns the success message.
fn apply_set(controller: &mut Controller, args: &SetArgs) -> Result<String> {
    // Check what was asked for, before the form fills in a default model.
    let requested = ModelConfig::new(&args.platform, args.api_key.trim(), &args.model);
    validation::validate(&requested, START_RULES)?;

    controller.select_platform(&args.platform);
    controller.set_api_key(args.api_key.as_str());
    if !controller.select_model(&args.model) {
        bail!(
            "\"{}\" is not a model offered by \"{}\"",
            args.model,
            args.platform
        );
    }

    if let Some(notice) = controller.start() {
        bail!(notice.message);
    }
    let notice = controller.confirm();
    if notice.level == NoticeLevel::Error {
        bail!(notice.message);
    }
    Ok(notice.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn controller(dir: &TempDir) -> Controller {
        let store = ConfigStore::new(dir.path().join("config.ini"));
        Controller::new(store, Box::new(SystemClipboard::new()))
    }

    fn args(platform: &str, api_key: &str, model: &str) -> SetArgs {
        SetArgs {
            platform: platform.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    #[test]
    fn test_set_saves_valid_config() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let message = apply_set(&mut c, &args("OpenAI", "sk-1", "gpt-4")).unwrap();
        assert_eq!(message, "Configuration saved.");
        assert_eq!(
            c.store().load().unwrap(),
            Some(ModelConfig::new("OpenAI", "sk-1", "gpt-4"))
        );
    }

    #[test]
    fn test_set_requires_model() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let err = apply_set(&mut c, &args("DeepSeek", "sk-1", "")).unwrap_err();
        assert_eq!(err.to_string(), "Please select a model.");
        assert!(!c.store().path().exists());
    }

    #[test]
    fn test_set_checks_fields_in_order() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let err = apply_set(&mut c, &args("", "  ", "")).unwrap_err();
        assert_eq!(err.to_string(), "Please select a model platform.");

        let err = apply_set(&mut c, &args("DeepSeek", "  ", "deepseek-model-1")).unwrap_err();
        assert_eq!(err.to_string(), "Please enter an API key.");
        assert!(!c.store().path().exists());
    }

    #[test]
    fn test_set_rejects_model_from_other_platform() {
        let dir = TempDir::new().unwrap();
        let mut c = controller(&dir);
        let err = apply_set(&mut c, &args("DeepSeek", "sk-1", "gpt-4")).unwrap_err();
        assert!(err.to_string().contains("not a model offered"));
        assert!(!c.store().path().exists());
    }
}
