//! services/juma/src/adapters/sermon_llm.rs
//!
//! This module contains the adapter for the sermon-generating LLM.
//! It implements the `SermonGenerationService` port from the `core` crate,
//! talking to Gemini through its OpenAI-compatible endpoint.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use async_trait::async_trait;
use juma_core::{
    domain::{GeneratedSermonContent, GenerationRequest},
    ports::{GenerationError, SermonGenerationService},
    reference::surah_name,
    validation::parse_generated_content,
};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{info, warn};

const SYSTEM_INSTRUCTION: &str = "أنت عالم متمكن في العلوم الشرعية وخطيب جمعة متمرس. \
تكتب باللغة العربية الفصحى محتوى دقيقًا موثقًا من المصادر المعتبرة، \
وتلتزم بالبنية المطلوبة للخطبة التزامًا تامًا.";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `SermonGenerationService` using Gemini.
///
/// The credential is supplied per request, so a client is built for each call.
#[derive(Clone, Debug)]
pub struct GeminiSermonAdapter {
    base_url: String,
    model: String,
    timeout: Duration,
}

impl GeminiSermonAdapter {
    /// Creates a new `GeminiSermonAdapter`.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Self {
        Self {
            base_url,
            model,
            timeout,
        }
    }

    fn client(&self, credential: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_base(&self.base_url)
            .with_api_key(credential);
        Client::with_config(config)
    }
}

//=========================================================================================
// Prompt and Schema
//=========================================================================================

/// The user prompt for one request.
pub fn build_user_prompt(request: &GenerationRequest) -> String {
    let name = surah_name(request.surah_number);
    let focus = match &request.topic {
        Some(topic) => format!("التركيز الخاص: \"{topic}\"."),
        None => "التركيز العام: أبرز مقاصد السورة.".to_string(),
    };
    format!(
        "اكتب خطبة جمعة كاملة ومفصلة (بين 2500 و3000 كلمة تقريبًا) مبنية على مصادر إسلامية موثوقة.\n\
         السورة: \"{name}\".\n\
         {focus}\n\n\
         تتكون الخطبة الأولى من الآيات بتشكيل كامل، وتفسير معتمد، وتأملات عملية موسعة، \
         وثلاث رسائل إيمانية على الأقل مع شرح تطبيقها، ثم دعوة قصيرة إلى التوبة. \
         وتتكون الخطبة الثانية من حديث صحيح مع درجته، وتأمل يربطه بالآيات، ودعاء ختامي جامع."
    )
}

/// The JSON schema the provider must answer with. Mirrors `GeneratedSermonContent`.
pub fn sermon_schema(surah_number: u16) -> Value {
    let string = |description: &str| json!({ "type": "string", "description": description });
    json!({
        "type": "object",
        "properties": {
            "title": string("عنوان جامع للخطبة كلها."),
            "verses": string(&format!(
                "مرجع الآيات المعتمدة، مثل '{}: ١-٥'.",
                surah_name(surah_number)
            )),
            "khutbah1": {
                "type": "object",
                "properties": {
                    "title": string("عنوان الخطبة الأولى."),
                    "verses": string("نص الآيات كاملًا مع التشكيل."),
                    "tafsir": string("تفسير الآيات من كتب التفسير المعتمدة."),
                    "reflections": string("تأملات إيمانية وعملية موسعة."),
                    "messages": {
                        "type": "array",
                        "description": "ثلاث رسائل على الأقل.",
                        "items": {
                            "type": "object",
                            "properties": {
                                "message": string("رسالة موجزة."),
                                "explanation": string("كيف تطبق الرسالة في الحياة اليومية."),
                            },
                            "required": ["message", "explanation"]
                        }
                    },
                    "repentance": string("دعوة قصيرة إلى التوبة والاستغفار."),
                },
                "required": ["title", "verses", "tafsir", "reflections", "messages", "repentance"]
            },
            "khutbah2": {
                "type": "object",
                "properties": {
                    "hadith": {
                        "type": "object",
                        "properties": {
                            "text": string("نص الحديث كاملًا مع التشكيل."),
                            "authenticity": string("درجة الحديث، مثل 'متفق عليه'."),
                        },
                        "required": ["text", "authenticity"]
                    },
                    "hadithReflection": string("تأمل في الحديث وصلته بالآيات."),
                    "dua": string("دعاء ختامي جامع."),
                },
                "required": ["hadith", "hadithReflection", "dua"]
            }
        },
        "required": ["title", "verses", "khutbah1", "khutbah2"]
    })
}

//=========================================================================================
// Error Classification
//=========================================================================================

/// Classifies a provider error message.
pub fn classify_provider_message(message: &str) -> GenerationError {
    let lower = message.to_lowercase();
    let credential_markers = [
        "api key",
        "api_key",
        "permission_denied",
        "unauthenticated",
        "unauthorized",
    ];
    if credential_markers.iter().any(|m| lower.contains(m)) {
        GenerationError::CredentialInvalid(message.to_string())
    } else {
        GenerationError::Transport(message.to_string())
    }
}

/// Gemini wraps its error bodies in an array, which the client cannot read
/// as an API error, so undecodable bodies are classified by their text too.
fn classify_openai_error(e: OpenAIError) -> GenerationError {
    match &e {
        OpenAIError::ApiError(api) => classify_provider_message(&api.to_string()),
        OpenAIError::JSONDeserialize(_, content) => match classify_provider_message(content) {
            GenerationError::Transport(_) => GenerationError::MalformedResponse(e.to_string()),
            classified => classified,
        },
        _ => GenerationError::Transport(e.to_string()),
    }
}

//=========================================================================================
// `SermonGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl SermonGenerationService for GeminiSermonAdapter {
    async fn generate_sermon(
        &self,
        credential: &str,
        request: &GenerationRequest,
    ) -> Result<GeneratedSermonContent, GenerationError> {
        if credential.trim().is_empty() {
            return Err(GenerationError::CredentialMissing);
        }

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTION)
                .build()
                .map_err(|e| GenerationError::Transport(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(build_user_prompt(request))
                .build()
                .map_err(|e| GenerationError::Transport(e.to_string()))?
                .into(),
        ];

        let response_format = ResponseFormat::JsonSchema {
            json_schema: ResponseFormatJsonSchema {
                description: None,
                name: "juma_sermon".to_string(),
                schema: Some(sermon_schema(request.surah_number)),
                strict: None,
            },
        };

        let chat_request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .response_format(response_format)
            .n(1)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        info!(
            surah = request.surah_number,
            model = %self.model,
            "Requesting sermon generation"
        );

        let client = self.client(credential);
        let response = tokio::time::timeout(self.timeout, client.chat().create(chat_request))
            .await
            .map_err(|_| {
                warn!(timeout = ?self.timeout, "Sermon generation timed out");
                GenerationError::Transport(format!(
                    "no response within {} seconds",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(classify_openai_error)?;

        // Extract the text content from the first choice in the response.
        let Some(choice) = response.choices.into_iter().next() else {
            return Err(GenerationError::MalformedResponse(
                "Sermon generation LLM returned no choices in its response.".to_string(),
            ));
        };
        let Some(content) = choice.message.content else {
            return Err(GenerationError::MalformedResponse(
                "Sermon generation LLM response contained no text content.".to_string(),
            ));
        };

        parse_generated_content(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use juma_core::ports::GenerationErrorKind;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn prompt_names_the_surah_and_topic() {
        let prompt = build_user_prompt(&GenerationRequest::new(18, Some("أصحاب الكهف")));
        assert!(prompt.contains("\"الكهف\""));
        assert!(prompt.contains("أصحاب الكهف"));

        let general = build_user_prompt(&GenerationRequest::new(18, None));
        assert!(general.contains("التركيز العام"));
    }

    #[test]
    fn schema_requires_every_section() {
        let schema = sermon_schema(2);
        assert_eq!(schema["required"], json!(["title", "verses", "khutbah1", "khutbah2"]));
        assert!(schema["properties"]["verses"]["description"]
            .as_str()
            .unwrap()
            .contains("البقرة"));
        assert_eq!(
            schema["properties"]["khutbah2"]["required"],
            json!(["hadith", "hadithReflection", "dua"])
        );
    }

    #[test]
    fn provider_messages_are_classified() {
        let invalid = classify_provider_message("API key not valid. Please pass a valid API key.");
        assert_eq!(invalid.kind(), GenerationErrorKind::CredentialInvalid);

        let denied = classify_provider_message("PERMISSION_DENIED: caller lacks access");
        assert_eq!(denied.kind(), GenerationErrorKind::CredentialInvalid);

        let overloaded =
            classify_provider_message("The model is overloaded. Please try again later.");
        assert_eq!(overloaded.kind(), GenerationErrorKind::Transport);
    }

    #[test]
    fn non_api_errors_are_transport() {
        let err = classify_openai_error(OpenAIError::InvalidArgument("bad".into()));
        assert_eq!(err.kind(), GenerationErrorKind::Transport);
    }

    fn adapter_for(server: &MockServer, timeout: Duration) -> GeminiSermonAdapter {
        GeminiSermonAdapter::new(server.uri(), "gemini-2.5-flash".to_string(), timeout)
    }

    fn sermon_payload() -> Value {
        json!({
            "title": "الكهف عصمة من الفتن",
            "verses": "الكهف: ٩-١٣",
            "khutbah1": {
                "title": "فتية آمنوا بربهم",
                "verses": "إِنَّهُمْ فِتْيَةٌ آمَنُوا بِرَبِّهِمْ",
                "tafsir": "tafsir",
                "reflections": "reflections",
                "messages": [
                    { "message": "m1", "explanation": "e1" },
                    { "message": "m2", "explanation": "e2" },
                    { "message": "m3", "explanation": "e3" }
                ],
                "repentance": "repentance"
            },
            "khutbah2": {
                "hadith": { "text": "hadith", "authenticity": "رواه مسلم" },
                "hadithReflection": "reflection",
                "dua": "dua"
            }
        })
    }

    fn completion_body(content: &str) -> Value {
        json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gemini-2.5-flash",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn valid_completion_yields_typed_content() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer good-key"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(&sermon_payload().to_string())),
            )
            .expect(1)
            .mount(&server)
            .await;

        let content = adapter_for(&server, Duration::from_secs(5))
            .generate_sermon("good-key", &GenerationRequest::new(18, Some("أصحاب الكهف")))
            .await
            .unwrap();

        assert_eq!(content.title, "الكهف عصمة من الفتن");
        assert_eq!(content.primary.messages.len(), 3);
        assert_eq!(content.secondary.hadith.authenticity, "رواه مسلم");
    }

    #[tokio::test]
    async fn incomplete_completion_is_malformed() {
        let server = MockServer::start().await;
        let mut payload = sermon_payload();
        payload.as_object_mut().unwrap().remove("khutbah2");
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion_body(&payload.to_string())),
            )
            .mount(&server)
            .await;

        let err = adapter_for(&server, Duration::from_secs(5))
            .generate_sermon("key", &GenerationRequest::new(18, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::MalformedResponse);
    }

    #[tokio::test]
    async fn array_wrapped_key_rejection_is_credential_invalid() {
        let server = MockServer::start().await;
        let body = json!([{
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }]);
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(body))
            .mount(&server)
            .await;

        let err = adapter_for(&server, Duration::from_secs(5))
            .generate_sermon("bad-key", &GenerationRequest::new(1, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::CredentialInvalid, "{err}");
    }

    #[tokio::test]
    async fn unanswered_request_times_out_as_transport() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body(&sermon_payload().to_string()))
                    .set_delay(Duration::from_secs(5)),
            )
            .mount(&server)
            .await;

        let err = adapter_for(&server, Duration::from_secs(1))
            .generate_sermon("key", &GenerationRequest::new(1, None))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), GenerationErrorKind::Transport);
        assert!(err.to_string().contains("1 seconds"), "{err}");
    }

    #[tokio::test]
    async fn blank_credential_never_reaches_the_network() {
        // The base URL is unroutable; reaching it would fail as Transport.
        let adapter = GeminiSermonAdapter::new(
            "http://127.0.0.1:9".to_string(),
            "model".to_string(),
            Duration::from_secs(1),
        );
        let err = adapter
            .generate_sermon("  ", &GenerationRequest::new(1, None))
            .await
            .unwrap_err();
        assert_eq!(err, GenerationError::CredentialMissing);
    }
}
