use calc_client::core::{ApiClient, OutputSink};
use calc_client::utils::{logger, validation::Validate};
use calc_client::{AddHandler, CliConfig, ConsoleSink, HttpApiClient};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting calc-client CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 解析並驗證設定
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration loading failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    // 建立客戶端、輸出與處理器，只接線一次
    let client = HttpApiClient::from_config(&settings)?;
    let sink = ConsoleSink::new();
    let handler = AddHandler::new(client, sink, &settings.base_url)?;

    match cli.operands() {
        Ok(Some((a, b))) => {
            handler.handle_click(&a, &b).await?;
        }
        Ok(None) => {
            run_interactive(&handler).await?;
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// 互動模式：每一行輸入等於一次按鈕點擊
async fn run_interactive<C, S>(handler: &AddHandler<C, S>) -> anyhow::Result<()>
where
    C: ApiClient,
    S: OutputSink,
{
    println!("🧮 Interactive mode: enter two operands per line (quit to exit)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
            break;
        }

        let mut fields = trimmed.split_whitespace();
        let raw_a = fields.next().unwrap_or("");
        let raw_b = fields.next().unwrap_or("");
        handler.handle_click(raw_a, raw_b).await?;
    }

    tracing::info!("Interactive session closed");
    Ok(())
}
