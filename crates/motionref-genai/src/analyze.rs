//! Motion analysis of sampled reference frames.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::client::{GeminiClient, ANALYSIS_MODEL};
use crate::error::{GenAiError, GenAiResult};
use motionref_models::{FrameSample, MotionCommand};

/// Instruction given to the analysis model. It must describe camera
/// motion and effects only, never the content of the frames, and answer
/// in a single sentence with no creative interpretation.
const ANALYSIS_INSTRUCTION: &str = "You are an expert motion analyst. Your task is to analyze the following sequence of video frames and generate a highly specific, technical prompt for a text-to-video AI. The goal is to replicate the animation *exactly* as seen in the frames, without any creative interpretation.
Describe the camera's motion path, speed, easing (e.g., ease-in, ease-out, linear), and any effects like shake, blur, or glitch. Be precise.
For example, instead of 'a fast zoom', describe it as 'a rapid dolly zoom-in, starting from a medium shot and ending on a close-up, with a sharp ease-out to a sudden stop.'
Another example: 'A smooth, slow, linear pan from left to right across the entire frame.'
Do not describe the content of the images, only the motion and effects applied to the camera. Output only the final, single-sentence prompt.";

/// Sampling temperature for analysis. Kept low so repeated runs over
/// the same frames describe the same motion.
const ANALYSIS_TEMPERATURE: f32 = 0.1;

/// `generateContent` request.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

/// `generateContent` response.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: String,
}

impl GeminiClient {
    /// Derive a motion command from ordered reference samples.
    ///
    /// Sends one instruction part followed by every sample payload in
    /// capture order, then normalizes the model's reply. The reply may
    /// normalize to an empty command; the orchestrator decides whether
    /// that aborts the run.
    pub async fn analyze_motion(&self, samples: &[FrameSample]) -> GenAiResult<MotionCommand> {
        if samples.is_empty() {
            return Err(GenAiError::request_failed("no frame samples to analyze"));
        }

        let mut parts = Vec::with_capacity(samples.len() + 1);
        parts.push(Part::Text {
            text: ANALYSIS_INSTRUCTION.to_string(),
        });
        parts.extend(samples.iter().map(|sample| Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".to_string(),
                data: sample.data.clone(),
            },
        }));

        let request = GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig {
                temperature: ANALYSIS_TEMPERATURE,
            },
        };

        let url = self.url(&format!("v1beta/models/{}:generateContent", ANALYSIS_MODEL));
        debug!(
            model = ANALYSIS_MODEL,
            samples = samples.len(),
            "requesting motion analysis"
        );

        let response = self
            .http()
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenAiError::request_failed(format!("analysis request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenAiError::Api { status, body });
        }

        let reply: GenerateContentResponse = response.json().await.map_err(|e| {
            GenAiError::request_failed(format!("failed to parse analysis response: {}", e))
        })?;

        let text = reply
            .candidates
            .first()
            .and_then(|candidate| candidate.content.parts.first())
            .map(|part| part.text.as_str())
            .ok_or(GenAiError::EmptyResponse)?;

        let command = MotionCommand::from_raw(text);
        info!(command = %command, "derived motion command");
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_wire_format() {
        let text = serde_json::to_value(Part::Text {
            text: "instruction".into(),
        })
        .unwrap();
        assert_eq!(text, serde_json::json!({"text": "instruction"}));

        let inline = serde_json::to_value(Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg".into(),
                data: "AAAA".into(),
            },
        })
        .unwrap();
        assert_eq!(
            inline,
            serde_json::json!({"inlineData": {"mimeType": "image/jpeg", "data": "AAAA"}})
        );
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "\"A slow linear pan left to right.\""}]}}
            ]
        }"#;
        let reply: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = reply
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .unwrap();
        assert_eq!(
            MotionCommand::from_raw(text).as_str(),
            "A slow linear pan left to right."
        );
    }

    #[test]
    fn test_empty_candidates_have_no_text() {
        let reply: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(reply.candidates.is_empty());
    }
}
