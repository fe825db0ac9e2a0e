//! Lumen paged-document decoder.
//!
//! Implements [`pipeline::PagedDocumentDecoder`] for PDF bytes using `lopdf`.
//! Each page is extracted on its own so one unreadable page never costs the
//! text of the others.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Parsing is CPU-bound and synchronous; callers on an
//! async runtime move it onto a blocking thread.

use lopdf::Document;
use pipeline::{DocumentDecodeError, PageDecodeError, PagedDocumentDecoder};

/// PDF text extraction, one result per page in page order.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfDecoder;

impl PagedDocumentDecoder for PdfDecoder {
    fn decode_pages(
        &self,
        bytes: &[u8],
    ) -> Result<Vec<Result<String, PageDecodeError>>, DocumentDecodeError> {
        let document =
            Document::load_mem(bytes).map_err(|e| DocumentDecodeError(e.to_string()))?;

        let pages: Vec<_> = document
            .get_pages()
            .into_keys()
            .map(|page| {
                document
                    .extract_text(&[page])
                    .map_err(|e| PageDecodeError {
                        page,
                        reason: e.to_string(),
                    })
            })
            .collect();

        tracing::debug!(
            pages = pages.len(),
            failed = pages.iter().filter(|p| p.is_err()).count(),
            "Extracted PDF pages"
        );
        Ok(pages)
    }
}

#[cfg(test)]
mod tests {
    use lopdf::{dictionary, Object, Stream};

    use super::*;

    /// Builds a PDF with one Helvetica text line per page.
    fn make_test_pdf(page_texts: &[&str]) -> Vec<u8> {
        let mut doc = Document::with_version("1.4");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let kids: Vec<Object> = page_texts
            .iter()
            .map(|text| {
                let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
                let content_id = doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                    "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                    "Contents" => content_id,
                    "Resources" => dictionary! {
                        "Font" => dictionary! { "F1" => font_id },
                    },
                })
                .into()
            })
            .collect();

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }

    #[test]
    fn pages_come_back_in_order() {
        let bytes = make_test_pdf(&["Landlord keeps deposit", "Tenant pays fees", "Auto renewal"]);

        let pages = PdfDecoder.decode_pages(&bytes).unwrap();

        assert_eq!(pages.len(), 3);
        let texts: Vec<String> = pages.into_iter().map(|p| p.unwrap()).collect();
        assert!(texts[0].contains("Landlord keeps deposit"));
        assert!(texts[1].contains("Tenant pays fees"));
        assert!(texts[2].contains("Auto renewal"));
    }

    #[test]
    fn non_pdf_bytes_fail_the_whole_document() {
        assert!(PdfDecoder.decode_pages(b"not a pdf").is_err());
    }
}
