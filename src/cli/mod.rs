use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(ValueEnum, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[value(alias = "google")]
    Gemini,
    #[value(name = "openai", alias = "open-ai")]
    OpenAI,
}

impl ProviderKind {
    pub fn default_model(&self) -> &'static str {
        match self {
            ProviderKind::Gemini => "gemini-2.5-flash",
            ProviderKind::OpenAI => "gpt-4.1-mini",
        }
    }

    /// Environment variables holding the API key, first match wins.
    pub fn key_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderKind::Gemini => &["API_KEY", "GEMINI_API_KEY"],
            ProviderKind::OpenAI => &["OPENAI_API_KEY"],
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "underdog", version, about = "Describe a website, let the model build it, preview it and ship it")]
pub struct Args {
    /// TOML config file (defaults to ./underdog.toml when present)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, value_enum, global = true)]
    pub provider: Option<ProviderKind>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Write request/response artifacts under <root>/.underdog/tx/<id>/
    #[arg(long, default_value_t = false, global = true)]
    pub save_artifacts: bool,

    #[arg(long, default_value_t = false, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the browser UI (default)
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Generate a site from the terminal
    Generate {
        #[arg(long)]
        prompt: String,
        #[arg(long, default_value = "index.html")]
        out: String,
        /// Publish the result right after generating it
        #[arg(long, default_value_t = false)]
        deploy: bool,
    },
    /// Publish an existing HTML file
    Deploy {
        #[arg(long, default_value = "index.html")]
        file: String,
        /// Text the project name is derived from
        #[arg(long)]
        prompt: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let args = Args::try_parse_from(["underdog"]).unwrap();
        assert!(args.command.is_none());
        assert!(args.provider.is_none());
    }

    #[test]
    fn generate_with_provider_alias() {
        let args = Args::try_parse_from([
            "underdog", "generate", "--prompt", "a bakery", "--provider", "open-ai", "--deploy",
        ])
        .unwrap();
        assert_eq!(args.provider, Some(ProviderKind::OpenAI));
        assert_eq!(
            args.command,
            Some(Command::Generate { prompt: "a bakery".into(), out: "index.html".into(), deploy: true })
        );
    }

    #[test]
    fn deploy_requires_a_prompt() {
        assert!(Args::try_parse_from(["underdog", "deploy", "--file", "x.html"]).is_err());
    }
}
