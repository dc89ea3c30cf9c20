use clap::Parser;
use contact_relay::config::{CliConfig, Command, RelayConfig, TomlConfig};
use contact_relay::core::template::{render_body, render_subject};
use contact_relay::utils::{logger, validation::Validate};
use contact_relay::{ContactError, FormCollector, InquiryDraft, ResendClient, SubmissionHandler};

fn load_config(path: Option<&str>) -> contact_relay::Result<RelayConfig> {
    let file = match path {
        Some(path) => {
            tracing::info!("📄 Loading config from {}", path);
            Some(TomlConfig::from_file(path)?)
        }
        None => None,
    };
    Ok(RelayConfig::from_env_and_file(file.as_ref()))
}

fn exit_with(e: &ContactError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    match cli.command {
        Command::Serve { config, bind } => {
            let mut relay_config = load_config(config.as_deref()).unwrap_or_else(|e| exit_with(&e));
            if let Some(bind) = bind {
                relay_config.bind_address = bind;
            }

            // 驗證配置
            if let Err(e) = relay_config.validate() {
                exit_with(&e);
            }

            let sender = ResendClient::new(&relay_config.api_base_url, relay_config.api_key()?)?;
            let handler = SubmissionHandler::new(sender, &relay_config);
            contact_relay::api::serve(handler, &relay_config.bind_address).await?;
        }
        Command::Submit { endpoint, form } => {
            let collector = FormCollector::new(endpoint);
            collector.fill(InquiryDraft::from(form)).await;

            let notification = collector.submit().await.unwrap_or_else(|e| exit_with(&e));
            println!("{}", notification);
            if !notification.is_success() {
                std::process::exit(2);
            }
        }
        Command::Preview { config, form } => {
            let relay_config = load_config(config.as_deref()).unwrap_or_else(|e| exit_with(&e));
            let service = form.service;
            let request = InquiryDraft::from(form).to_request();

            println!("From: {}", relay_config.from_email);
            println!("To: {}", relay_config.to_email);
            println!("Subject: {}", render_subject(request.facility.as_deref().unwrap_or_default()));
            if let Some(intent) = service {
                println!("Service: {} ({})", intent.label(), intent.code());
            }
            println!();
            print!("{}", render_body(&request));
        }
    }

    Ok(())
}
