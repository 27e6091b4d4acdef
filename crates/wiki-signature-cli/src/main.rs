use anyhow::{Context, Result, bail};
use chrono::{DateTime, FixedOffset, Utc};
use clap::{Parser, Subcommand};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use wiki_signature_config::Config;
use wiki_signature_engine::{
    ExtensionRegistry, Href, RenderContext, Request, StaticPages, WikiPage, parse_date,
};

/// Sign wiki pages with ~~~~ and render the resulting Signature macros.
#[derive(Debug, Parser)]
#[command(name = "wiki-signature", version, about)]
struct Cli {
    /// Config file to use instead of ~/.config/wiki-signature/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replace ~~~, ~~~~ and ~~~~~ in a page with Signature macro calls
    Rewrite {
        /// Page to sign; reads stdin when omitted or `-`
        file: Option<PathBuf>,
        /// Login of the editor
        #[arg(long, env = "WIKI_SIGNATURE_USER", default_value = "anonymous")]
        user: String,
        /// Display name of the editor
        #[arg(long)]
        name: Option<String>,
        /// E-mail of the editor, used for anonymous edits
        #[arg(long)]
        email: Option<String>,
        /// Time of the edit (ISO-8601); defaults to now
        #[arg(long)]
        at: Option<String>,
        /// Write the signed page back to FILE instead of stdout
        #[arg(long, requires = "file")]
        in_place: bool,
    },
    /// Render the arguments of a Signature macro call to HTML
    Render {
        /// Macro arguments, e.g. "joro, 2019-10-19T14:56, John de Rooij"
        params: String,
        /// Moment to measure "time ago" from (ISO-8601); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Resolve one namespaced link, e.g. `user joro "John de Rooij"`
    Link {
        namespace: String,
        target: String,
        label: Option<String>,
        /// Moment used by time-based links (ISO-8601); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    let registry = ExtensionRegistry::with_defaults(config.extension_options());
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Rewrite {
            file,
            user,
            name,
            email,
            at,
            in_place,
        } => {
            let request = Request {
                authname: user,
                session_name: name,
                session_email: email,
                now: moment(&config, at.as_deref())?,
            };
            let file = file.filter(|f| f.as_os_str() != "-");
            let signed = sign_page(&registry, &request, file.as_deref())?;
            match file {
                Some(path) if in_place => std::fs::write(&path, signed)
                    .with_context(|| format!("Failed to write {}", path.display()))?,
                _ => stdout.write_all(signed.as_bytes())?,
            }
        }
        Command::Render { params, now } => {
            let pages = known_pages(&config);
            let ctx = render_context(&config, now.as_deref(), &pages)?;
            let html = registry
                .expand_macro(&ctx, "Signature", Some(params.as_str()))
                .unwrap_or_default();
            writeln!(stdout, "{html}")?;
        }
        Command::Link {
            namespace,
            target,
            label,
            now,
        } => {
            let pages = known_pages(&config);
            let ctx = render_context(&config, now.as_deref(), &pages)?;
            let label = label.as_deref().unwrap_or(&target);
            let Some(html) = registry.links().resolve(&ctx, &namespace, &target, label) else {
                bail!(
                    "Unknown link namespace '{namespace}', known: {}",
                    registry.links().namespaces().collect::<Vec<_>>().join(", ")
                );
            };
            writeln!(stdout, "{html}")?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let loaded = match path {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => Config::load().context("Failed to load config file")?,
    };
    match loaded {
        Some(config) => {
            log::debug!("loaded config: {config:?}");
            Ok(config)
        }
        None => {
            if let Some(path) = path {
                log::warn!("config file {} not found, using defaults", path.display());
            }
            Ok(Config::default())
        }
    }
}

/// `at` parsed in the configured timezone, or the current time there.
fn moment(config: &Config, at: Option<&str>) -> Result<DateTime<FixedOffset>> {
    let tz = config.timezone()?;
    match at {
        Some(at) => Ok(parse_date(at, tz)?),
        None => Ok(Utc::now().with_timezone(&tz)),
    }
}

fn known_pages(config: &Config) -> StaticPages {
    StaticPages::new(config.known_pages.iter().cloned())
}

fn render_context<'a>(
    config: &Config,
    now: Option<&str>,
    pages: &'a StaticPages,
) -> Result<RenderContext<'a>> {
    let now = moment(config, now)?;
    Ok(RenderContext::new(now, Href::new(config.base_url.as_str()), pages))
}

fn sign_page(
    registry: &ExtensionRegistry,
    request: &Request,
    file: Option<&Path>,
) -> Result<String> {
    let (name, text) = match file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read page from stdin")?;
            ("<stdin>".to_string(), text)
        }
    };

    let mut page = WikiPage { name, text };
    let warnings = registry.validate_page(request, &mut page);
    for warning in &warnings {
        log::warn!("{}: {}", page.name, warning.message);
    }
    Ok(page.text)
}
