//! Ask Assistant use case.
//!
//! Answers one question end to end:
//!
//! 1. Web search, when the question contains a trigger keyword
//! 2. Background video selection
//! 3. Prompt composition and the generation call
//! 4. Word-by-word relay to the surface, with narration
//! 5. Completion signal (stops the video)
//!
//! Failures inside a question never abort it. Search failures are logged
//! and leave the web context empty, a missing video becomes a warning, and
//! a failed generation call is shown as the answer error.

use crate::config::AssistantSettings;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{GenerationRequest, LlmGateway, StreamHandle};
use crate::ports::surface::{AnswerSurface, StatusLevel};
use crate::ports::video_library::VideoLibrary;
use crate::ports::web_search::WebSearchPort;
use crate::services::narrator::Narrator;
use crate::services::relay::ResponseRelay;
use nico_domain::util::truncate_str;
use nico_domain::{AnswerBuffer, ParamError, Question};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Shown while the search request is in flight.
pub const SEARCHING_MESSAGE: &str = "Searching the web...";
/// Shown when the search produced a snippet.
pub const SEARCH_FOUND_MESSAGE: &str = "Additional information was retrieved from the web.";
/// Shown when the video directory has no clips.
pub const NO_VIDEOS_MESSAGE: &str =
    "No videos found in the video directory. Add .mp4/.webm/.ogg files.";

/// Errors that prevent a question from being attempted at all.
#[derive(Error, Debug)]
pub enum AskError {
    #[error("Invalid generation parameters: {}", format_param_errors(.0))]
    InvalidParameters(Vec<ParamError>),
}

fn format_param_errors(errors: &[ParamError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Input for the [`AskAssistantUseCase`].
#[derive(Debug, Clone)]
pub struct AskInput {
    pub question: Question,
    pub settings: AssistantSettings,
}

impl AskInput {
    pub fn new(question: Question, settings: AssistantSettings) -> Self {
        Self { question, settings }
    }
}

/// What happened while answering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AskOutcome {
    /// The relayed answer (fragments joined).
    pub answer: String,
    /// Snippet added to the prompt; empty when no search ran or nothing was found.
    pub web_context: String,
    /// File name of the background clip, if one was shown.
    pub video: Option<String>,
    /// Visible error message when the generation failed.
    pub error: Option<String>,
}

impl AskOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Use case for answering a question.
#[derive(Clone)]
pub struct AskAssistantUseCase {
    gateway: Arc<dyn LlmGateway>,
    search: Option<Arc<dyn WebSearchPort>>,
    videos: Option<Arc<dyn VideoLibrary>>,
    narrator: Option<Arc<Narrator>>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl AskAssistantUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            search: None,
            videos: None,
            narrator: None,
            conversation_logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_search(mut self, search: Arc<dyn WebSearchPort>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_videos(mut self, videos: Arc<dyn VideoLibrary>) -> Self {
        self.videos = Some(videos);
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<Narrator>) -> Self {
        self.narrator = Some(narrator);
        self
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn narrator(&self) -> Option<&Arc<Narrator>> {
        self.narrator.as_ref()
    }

    pub fn videos(&self) -> Option<&Arc<dyn VideoLibrary>> {
        self.videos.as_ref()
    }

    /// Answer `input.question`, reporting progress to `surface`.
    pub async fn execute(
        &self,
        input: AskInput,
        surface: &dyn AnswerSurface,
    ) -> Result<AskOutcome, AskError> {
        let AskInput { question, settings } = input;

        let param_errors = settings.params.validate();
        if !param_errors.is_empty() {
            return Err(AskError::InvalidParameters(param_errors));
        }

        info!(
            "Answering question with {}: {}",
            settings.model,
            truncate_str(question.content(), 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "question",
            serde_json::json!({
                "question": question.content(),
                "model": settings.model.as_str(),
            }),
        ));

        let web_context = self.lookup_web_context(&question, &settings, surface).await;
        let video = self.show_video(surface).await;

        surface.on_question(&question);

        let prompt = settings.template.compose(question.content(), &web_context);
        debug!("Prompt ({} bytes): {}", prompt.len(), truncate_str(&prompt, 200));
        self.conversation_logger.log(ConversationEvent::new(
            "prompt",
            serde_json::json!({
                "prompt": prompt,
                "temperature": settings.params.temperature,
                "top_p": settings.params.top_p,
                "max_output_tokens": settings.params.max_output_tokens,
            }),
        ));

        let request = GenerationRequest::new(settings.model.clone(), prompt, settings.params);
        surface.on_generation_start(&settings.model);
        let handle = match self.gateway.generate_streaming(&request).await {
            Ok(handle) => handle,
            Err(e) => {
                warn!("Generation failed: {}", e);
                StreamHandle::failed(e.user_message())
            }
        };

        let relay = ResponseRelay::new(settings.word_delay);
        let mut buffer = AnswerBuffer::new();
        let relayed = relay
            .relay(handle, surface, self.narrator.as_deref(), &mut buffer)
            .await;

        surface.on_answer_complete(&buffer);

        match &relayed.error {
            Some(message) => self.conversation_logger.log(ConversationEvent::new(
                "error",
                serde_json::json!({ "message": message, "partial_answer": buffer.as_str() }),
            )),
            None => self.conversation_logger.log(ConversationEvent::new(
                "answer",
                serde_json::json!({
                    "answer": buffer.as_str(),
                    "fragments": relayed.fragments,
                }),
            )),
        }
        info!(
            "Answer finished: {} fragments, {} bytes",
            relayed.fragments,
            buffer.len()
        );

        Ok(AskOutcome {
            answer: buffer.into_string(),
            web_context,
            video,
            error: relayed.error,
        })
    }

    async fn lookup_web_context(
        &self,
        question: &Question,
        settings: &AssistantSettings,
        surface: &dyn AnswerSurface,
    ) -> String {
        let Some(search) = &self.search else {
            return String::new();
        };
        if !settings.web_search {
            return String::new();
        }
        let Some(keyword) = settings.trigger.matched_keyword(question.content()) else {
            return String::new();
        };

        debug!("Web search triggered by keyword '{}'", keyword);
        surface.on_status(StatusLevel::Info, SEARCHING_MESSAGE);

        let snippet = match search.lookup(question.content()).await {
            Ok(snippet) => snippet,
            Err(e) => {
                warn!("Web search failed: {}", e);
                String::new()
            }
        };

        if !snippet.is_empty() {
            surface.on_status(StatusLevel::Success, SEARCH_FOUND_MESSAGE);
            self.conversation_logger.log(ConversationEvent::new(
                "web_context",
                serde_json::json!({ "keyword": keyword, "snippet": snippet }),
            ));
        }
        snippet
    }

    async fn show_video(&self, surface: &dyn AnswerSurface) -> Option<String> {
        let videos = Arc::clone(self.videos.as_ref()?);
        let picked = match tokio::task::spawn_blocking(move || videos.pick()).await {
            Ok(picked) => picked,
            Err(e) => {
                warn!("Video selection task failed: {}", e);
                return None;
            }
        };

        match picked {
            Ok(Some(embed)) => {
                debug!("Background video: {} ({})", embed.name, embed.mime);
                surface.on_video(&embed);
                Some(embed.name)
            }
            Ok(None) => {
                surface.on_status(StatusLevel::Warning, NO_VIDEOS_MESSAGE);
                None
            }
            Err(e) => {
                warn!("Could not load background video: {}", e);
                surface.on_status(
                    StatusLevel::Warning,
                    &format!("Could not load background video: {}", e),
                );
                None
            }
        }
    }
}
