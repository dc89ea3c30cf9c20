use crate::domain::model::ServiceIntent;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "contact-relay")]
#[command(about = "Contact form relay for the medical white-coat laundry landing page")]
pub struct CliConfig {
    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve POST /api/contact
    Serve {
        #[arg(long, help = "TOML configuration file")]
        config: Option<String>,

        #[arg(long, help = "Listen address, overrides BIND_ADDRESS and the config file")]
        bind: Option<String>,
    },

    /// Submit one inquiry to a running endpoint, as the web form does
    Submit {
        #[arg(long, default_value = "http://127.0.0.1:3000/api/contact")]
        endpoint: String,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Print the mail that would be sent for an inquiry
    Preview {
        #[arg(long, help = "TOML configuration file")]
        config: Option<String>,

        #[command(flatten)]
        form: FormArgs,
    },
}

#[derive(Debug, Clone, Args)]
pub struct FormArgs {
    #[arg(long, help = "ご担当者名")]
    pub name: String,

    #[arg(long, help = "施設名")]
    pub facility: String,

    #[arg(long, help = "電話番号")]
    pub phone: String,

    #[arg(long, help = "メールアドレス")]
    pub email: String,

    #[arg(long, value_enum, help = "希望内容")]
    pub service: Option<ServiceIntent>,

    #[arg(long, help = "ご質問・ご要望")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let cli = CliConfig::try_parse_from([
            "contact-relay",
            "submit",
            "--name",
            "田中",
            "--facility",
            "○○病院",
            "--phone",
            "045-000-0000",
            "--email",
            "a@b.com",
            "--service",
            "estimate",
        ])
        .unwrap();

        match cli.command {
            Command::Submit { endpoint, form } => {
                assert_eq!(endpoint, "http://127.0.0.1:3000/api/contact");
                assert_eq!(form.name, "田中");
                assert_eq!(form.service, Some(ServiceIntent::Estimate));
                assert_eq!(form.message, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_serve_with_verbose() {
        let cli = CliConfig::try_parse_from([
            "contact-relay",
            "serve",
            "--bind",
            "127.0.0.1:8080",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Command::Serve { bind: Some(ref bind), config: None } if bind == "127.0.0.1:8080"
        ));
    }

    #[test]
    fn test_unknown_service_is_rejected() {
        let result = CliConfig::try_parse_from([
            "contact-relay",
            "preview",
            "--name",
            "田中",
            "--facility",
            "○○病院",
            "--phone",
            "045-000-0000",
            "--email",
            "a@b.com",
            "--service",
            "laundry",
        ]);
        assert!(result.is_err());
    }
}
