use ai_tool_catalog::app::render;
use ai_tool_catalog::core::rating::Stars;
use ai_tool_catalog::utils::error::ErrorSeverity;
use ai_tool_catalog::utils::logger;
use ai_tool_catalog::{Catalog, CatalogError, CatalogView, CliConfig, Command, RestStore};
use anyhow::Context;
use clap::Parser;
use std::io::Write;

fn exit_code(e: &CatalogError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,      // 警告，但成功
        ErrorSeverity::Medium => 2,   // 可重試
        ErrorSeverity::High => 1,     // 輸入錯誤
        ErrorSeverity::Critical => 3, // 設定或系統錯誤
    }
}

fn fail(e: &CatalogError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(exit_code(e));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config.command);

    // 缺少資料庫設定時不可開始顯示任何內容
    let file = config.load_file().unwrap_or_else(|e| fail(&e));
    let settings = config
        .resolve_store(file.as_ref())
        .unwrap_or_else(|e| fail(&e));
    let store = RestStore::new(&settings).unwrap_or_else(|e| fail(&e));

    let catalog = Catalog::new(store);
    if let Err(e) = catalog.refresh().await {
        eprint!("{}", render::render_connection_error(&e.to_string()));
        std::process::exit(exit_code(&e));
    }

    let mut out = std::io::stdout().lock();
    match config.command() {
        Command::List { phase, sort } => {
            let display = file.map(|f| f.display).unwrap_or_default();
            let view = CatalogView::new(
                phase.or(display.default_phase),
                sort.or(display.default_sort).unwrap_or_default(),
            );
            tracing::debug!("Applying view: {:?}", view);

            let tools = catalog.tools();
            write!(out, "{}", render::render_list(&view.apply(&tools), tools.len()))
                .context("writing tool list")?;
        }
        Command::Show { tool } => match catalog.find_tool(&tool) {
            Some(found) => {
                write!(out, "{}", render::render_detail(&found)).context("writing tool details")?
            }
            None => {
                eprintln!("❌ No tool matches '{}'", tool);
                std::process::exit(1);
            }
        },
        Command::Rate { tool, stars } => {
            // 星等超出範圍時直接顯示原因，不送出
            let stars = Stars::try_from(stars).unwrap_or_else(|e| fail(&e));
            let Some(found) = catalog.find_tool(&tool) else {
                eprintln!("❌ No tool matches '{}'", tool);
                std::process::exit(1);
            };

            writeln!(out, "Submitting rating...")?;
            if catalog.submit_rating(&found.id, i64::from(stars.value())).await {
                writeln!(out, "🎉 Thanks for your rating!")?;
                if let Some(updated) = catalog.find_tool(&found.id) {
                    writeln!(
                        out,
                        "{}: {}",
                        updated.name,
                        render::render_stars(updated.rating_or_zero())
                    )?;
                }
            } else {
                eprintln!("❌ Could not save your rating. Please try again.");
                std::process::exit(2);
            }
        }
    }

    out.flush().context("flushing output")?;
    Ok(())
}
