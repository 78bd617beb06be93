use anyhow::Result;
use api::config::AppConfig;
use api::AppState;
use kb_assist::{BedrockKnowledgeBase, KnowledgeBase, QueryService, TextExtractor};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    if let Err(e) = run().await {
        log::error!("Server failed: {:#}", e);
        eprintln!("Failed to start server: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = AppConfig::from_env()?;

    let knowledge_base: Arc<dyn KnowledgeBase> = Arc::new(BedrockKnowledgeBase::new().await);
    let extractor = build_extractor(&config)?;
    let query_service = QueryService::new(knowledge_base, extractor);
    log::info!("Query service ready (OCR enabled: {})", query_service.ocr_enabled());

    let app = api::app(AppState::new(query_service));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(feature = "ocr")]
fn build_extractor(config: &AppConfig) -> Result<Option<Arc<dyn TextExtractor>>> {
    if !config.enable_ocr {
        return Ok(None);
    }

    let extractor = kb_assist::ocr::TesseractExtractor::new(
        config.tessdata_prefix.clone(),
        config.ocr_language.clone(),
    )?;
    Ok(Some(Arc::new(extractor)))
}

#[cfg(not(feature = "ocr"))]
fn build_extractor(config: &AppConfig) -> Result<Option<Arc<dyn TextExtractor>>> {
    if config.enable_ocr {
        log::warn!("ENABLE_OCR is set but this build has no OCR engine; rebuild with `--features ocr`");
    }
    Ok(None)
}
