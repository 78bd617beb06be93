use anyhow::Result;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::retry::RetryConfig;
use aws_config::BehaviorVersion;
use aws_sdk_bedrockagentruntime::error::DisplayErrorContext;
use aws_sdk_bedrockagentruntime::types::{
    Citation as BedrockCitation, KnowledgeBaseRetrieveAndGenerateConfiguration,
    RetrievalResultLocation, RetrieveAndGenerateConfiguration, RetrieveAndGenerateInput,
    RetrieveAndGenerateOutput as GeneratedOutput, RetrieveAndGenerateType,
};
use aws_sdk_bedrockagentruntime::Client;

use crate::models::*;

pub const DEFAULT_REGION: &str = "us-east-1";

/// The retrieve-and-generate collaborator: one request in, one answer out.
#[async_trait]
pub trait KnowledgeBase: Send + Sync {
    async fn retrieve_and_generate(&self, request: &RetrievalRequest) -> Result<RetrievalResult>;
}

pub struct BedrockKnowledgeBase {
    client: Client,
}

impl BedrockKnowledgeBase {
    /// Credentials and region come from the usual AWS provider chain.
    /// Retries are off: a failed call is reported, not repeated.
    pub async fn new() -> Self {
        let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(region)
            .retry_config(RetryConfig::disabled())
            .load()
            .await;

        log::info!("Bedrock agent runtime client configured (region: {:?})", config.region());

        Self {
            client: Client::new(&config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl KnowledgeBase for BedrockKnowledgeBase {
    async fn retrieve_and_generate(&self, request: &RetrievalRequest) -> Result<RetrievalResult> {
        let input = RetrieveAndGenerateInput::builder()
            .text(&request.query_text)
            .build()?;

        let knowledge_base = KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(&request.knowledge_base_id)
            .model_arn(&request.model_identifier)
            .build()?;

        let configuration = RetrieveAndGenerateConfiguration::builder()
            .r#type(RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base)
            .build()?;

        let response = self
            .client
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Bedrock API error: {}", DisplayErrorContext(&e)))?;

        Ok(convert_response(response.output(), response.citations()))
    }
}

fn convert_response(output: Option<&GeneratedOutput>, citations: &[BedrockCitation]) -> RetrievalResult {
    let answer = output
        .map(|output| output.text().to_string())
        .unwrap_or_else(|| "No response generated".to_string());

    RetrievalResult {
        answer,
        citations: citations.iter().map(convert_citation).collect(),
    }
}

fn convert_citation(citation: &BedrockCitation) -> Citation {
    let generated_text = citation
        .generated_response_part()
        .and_then(|part| part.text_response_part())
        .and_then(|part| part.text())
        .map(str::to_string);

    let references = citation
        .retrieved_references()
        .iter()
        .map(|reference| Reference {
            content: reference.content().map(|content| content.text().to_string()),
            location: reference.location().and_then(location_uri),
        })
        .collect();

    Citation {
        generated_text,
        references,
    }
}

fn location_uri(location: &RetrievalResultLocation) -> Option<String> {
    location
        .s3_location()
        .and_then(|s3| s3.uri())
        .or_else(|| location.web_location().and_then(|web| web.url()))
        .map(str::to_string)
}
