use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::{
    errors::{AppError, AppResult},
    models::conversation::ContentPart,
};

const TEXT_MEDIA_TYPE: &str = "text/plain";
const PDF_MEDIA_TYPE: &str = "application/pdf";
const IMAGE_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// A decoded upload. Bytes live only for the request that carried them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Decodes a base64 payload, with or without a `data:<type>;base64,` prefix.
    pub fn decode(raw: &str, media_type: &str) -> AppResult<Self> {
        let payload = match raw.split_once(',') {
            Some((_, payload)) => payload,
            None => raw,
        };
        let bytes = STANDARD.decode(payload.trim()).map_err(|e| {
            AppError::ValidationError(format!("attachment is not valid base64: {}", e))
        })?;

        Ok(Self::from_bytes(media_type, bytes))
    }

    pub fn from_bytes(media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            media_type: normalize_media_type(media_type),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        IMAGE_MEDIA_TYPES.contains(&self.media_type.as_str())
    }

    pub fn is_text(&self) -> bool {
        self.media_type == TEXT_MEDIA_TYPE
    }

    pub fn is_pdf(&self) -> bool {
        self.media_type == PDF_MEDIA_TYPE
    }

    pub fn extract_text(&self) -> AppResult<String> {
        if self.is_pdf() {
            return extract_pdf_text(&self.bytes);
        }
        if !self.is_text() {
            return Err(AppError::UnsupportedFileType(format!(
                "cannot extract text from {}",
                self.media_type
            )));
        }
        let text = std::str::from_utf8(&self.bytes).map_err(|e| {
            AppError::ValidationError(format!("text attachment is not valid UTF-8: {}", e))
        })?;
        Ok(text.trim().to_string())
    }

    pub fn to_image_part(&self) -> AppResult<ContentPart> {
        if !self.is_image() {
            return Err(AppError::UnsupportedFileType(format!(
                "cannot send {} as an image",
                self.media_type
            )));
        }
        Ok(ContentPart::inline_image(
            &self.media_type,
            &STANDARD.encode(&self.bytes),
        ))
    }
}

/// Text layer of every page, in page order. Scanned PDFs without text are rejected.
fn extract_pdf_text(bytes: &[u8]) -> AppResult<String> {
    let document = lopdf::Document::load_mem(bytes)
        .map_err(|e| AppError::ValidationError(format!("PDF attachment could not be read: {}", e)))?;

    let pages: Vec<String> = document
        .get_pages()
        .keys()
        .filter_map(|page_number| match document.extract_text(&[*page_number]) {
            Ok(text) => Some(text.trim().to_string()),
            Err(e) => {
                log::warn!("Skipping PDF page {}: {}", page_number, e);
                None
            }
        })
        .filter(|text| !text.is_empty())
        .collect();

    if pages.is_empty() {
        return Err(AppError::ValidationError(
            "PDF attachment has no extractable text".to_string(),
        ));
    }
    Ok(pages.join("\n\n"))
}

fn normalize_media_type(media_type: &str) -> String {
    match media_type.trim().to_lowercase().as_str() {
        "image/jpg" => "image/jpeg".to_string(),
        other => other.to_string(),
    }
}

/// Media type of an uploaded file. Falls back to the filename extension when the
/// client sent none or a generic binary type.
pub fn upload_media_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() && declared != "application/octet-stream" => {
            declared.to_string()
        }
        _ => {
            let extension = filename
                .rsplit_once('.')
                .map(|(_, ext)| ext.to_lowercase())
                .unwrap_or_default();
            match extension.as_str() {
                "pdf" => PDF_MEDIA_TYPE,
                "txt" | "md" => TEXT_MEDIA_TYPE,
                "jpg" | "jpeg" => "image/jpeg",
                "png" => "image/png",
                "webp" => "image/webp",
                _ => "application/octet-stream",
            }
            .to_string()
        }
    }
}

/// Pairs each payload with its declared media type.
pub fn decode_attachments(files_data: &[String], file_types: &[String]) -> AppResult<Vec<Attachment>> {
    if files_data.len() != file_types.len() {
        return Err(AppError::ValidationError(format!(
            "files_data has {} entries but file_types has {}",
            files_data.len(),
            file_types.len()
        )));
    }

    files_data
        .iter()
        .zip(file_types)
        .map(|(data, media_type)| Attachment::decode(data, media_type))
        .collect()
}

/// Text of every attachment that yields any, each under a header naming its type.
/// Attachments that cannot be read are logged and skipped.
pub fn attachment_text(attachments: &[Attachment]) -> String {
    let mut text = String::new();
    for attachment in attachments {
        match attachment.extract_text() {
            Ok(extracted) => {
                text.push_str(&format!(
                    "\n\n--- FILE CONTENT ({}) ---\n{}\n",
                    attachment.media_type, extracted
                ));
            }
            Err(e) => log::warn!("Skipping attachment: {}", e),
        }
    }
    text
}

/// Image parts for every attachment that can be sent to a vision model.
pub fn image_parts(attachments: &[Attachment]) -> AppResult<Vec<ContentPart>> {
    let mut parts = Vec::with_capacity(attachments.len());
    for attachment in attachments {
        match attachment.to_image_part() {
            Ok(part) => parts.push(part),
            Err(e) => log::warn!("Skipping attachment: {}", e),
        }
    }

    if parts.is_empty() && !attachments.is_empty() {
        return Err(AppError::UnsupportedFileType(
            "no attachment could be sent as an image".to_string(),
        ));
    }
    Ok(parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::sample_pdf;

    fn encoded(text: &str) -> String {
        STANDARD.encode(text.as_bytes())
    }

    #[test]
    fn decode_strips_data_url_prefix() {
        let raw = format!("data:text/plain;base64,{}", encoded("hello"));
        let attachment = Attachment::decode(&raw, "text/plain").unwrap();
        assert_eq!(attachment.bytes, b"hello");
    }

    #[test]
    fn decode_rejects_invalid_base64() {
        let err = Attachment::decode("%%%not base64", "text/plain").unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn jpg_media_type_is_normalized() {
        let attachment = Attachment::decode(&encoded("x"), " IMAGE/JPG ").unwrap();
        assert_eq!(attachment.media_type, "image/jpeg");
        assert!(attachment.is_image());
    }

    #[test]
    fn extract_text_trims_plain_text() {
        let attachment = Attachment::decode(&encoded("  notes \n"), "text/plain").unwrap();
        assert_eq!(attachment.extract_text().unwrap(), "notes");
    }

    #[test]
    fn extract_text_reads_pdf_text_layer() {
        let attachment = Attachment {
            media_type: "application/pdf".to_string(),
            bytes: sample_pdf("Define osmosis"),
        };
        assert!(attachment.is_pdf());
        assert!(attachment.extract_text().unwrap().contains("Define osmosis"));
    }

    #[test]
    fn extract_text_rejects_corrupt_pdf() {
        let attachment = Attachment::decode(&encoded("%PDF-1.4"), "application/pdf").unwrap();
        assert!(matches!(
            attachment.extract_text(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn extract_text_rejects_images() {
        let attachment = Attachment::decode(&encoded("png"), "image/png").unwrap();
        assert!(matches!(
            attachment.extract_text(),
            Err(AppError::UnsupportedFileType(_))
        ));
    }

    #[test]
    fn image_part_carries_declared_media_type() {
        let attachment = Attachment::decode(&encoded("png-bytes"), "image/png").unwrap();
        let part = attachment.to_image_part().unwrap();
        assert_eq!(
            part,
            ContentPart::inline_image("image/png", &encoded("png-bytes"))
        );
    }

    #[test]
    fn upload_media_type_prefers_declared_type() {
        assert_eq!(upload_media_type(Some("text/plain"), "hw.pdf"), "text/plain");
        assert_eq!(
            upload_media_type(Some("application/octet-stream"), "HW.PDF"),
            "application/pdf"
        );
        assert_eq!(upload_media_type(None, "notes.txt"), "text/plain");
        assert_eq!(upload_media_type(None, "archive"), "application/octet-stream");
    }

    #[test]
    fn decode_attachments_requires_matching_lengths() {
        let err = decode_attachments(&[encoded("a")], &[]).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }

    #[test]
    fn attachment_text_skips_unreadable_files() {
        let attachments = decode_attachments(
            &[encoded("first"), encoded("img"), encoded("second")],
            &[
                "text/plain".to_string(),
                "image/png".to_string(),
                "text/plain".to_string(),
            ],
        )
        .unwrap();

        let text = attachment_text(&attachments);
        assert_eq!(
            text,
            "\n\n--- FILE CONTENT (text/plain) ---\nfirst\n\n\n--- FILE CONTENT (text/plain) ---\nsecond\n"
        );
    }

    #[test]
    fn image_parts_fails_when_nothing_is_an_image() {
        let attachments =
            decode_attachments(&[encoded("%PDF")], &["application/pdf".to_string()]).unwrap();
        assert!(matches!(
            image_parts(&attachments),
            Err(AppError::UnsupportedFileType(_))
        ));
        assert!(image_parts(&[]).unwrap().is_empty());
    }
}
