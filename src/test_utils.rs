#[cfg(test)]
pub mod fixtures {
    use base64::{engine::general_purpose::STANDARD, Engine as _};

    use crate::{
        config::ModelConfig,
        models::conversation::{Conversation, Turn},
    };

    /// A one-turn conversation asking a simple question
    pub fn sample_conversation() -> Conversation {
        Conversation::single(Turn::user("Explain photosynthesis in one sentence."))
    }

    /// Default model settings with a custom fallback list
    pub fn model_config(fallback: &[&str]) -> ModelConfig {
        ModelConfig {
            fallback_models: fallback.iter().map(|m| m.to_string()).collect(),
            ..ModelConfig::default()
        }
    }

    /// Base64 of `text`, as a client would upload it
    pub fn encoded(text: &str) -> String {
        STANDARD.encode(text.as_bytes())
    }

    /// A single-page PDF whose text layer is `text`
    pub fn sample_pdf(text: &str) -> Vec<u8> {
        use lopdf::{
            content::{Content, Operation},
            dictionary, Document, Object, Stream,
        };

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_model_config_keeps_defaults() {
        let config = model_config(&["a", "b"]);
        assert_eq!(config.fallback_models, vec!["a", "b"]);
        assert_eq!(config.text_model, crate::config::DEFAULT_TEXT_MODEL);
    }

    #[test]
    fn test_fixtures_sample_conversation() {
        let conversation = sample_conversation();
        assert_eq!(conversation.len(), 1);
        assert!(!conversation.has_images());
    }
}
