//! Server-rendered pages.
//!
//! Every piece of user or model text goes through [`escape`] before it is
//! written into markup.

use nodes::{DiagramReport, DocumentReport};

/// Labels offered in the document-type select.
pub const DOCUMENT_TYPES: [&str; 7] = [
    "Terms of Service",
    "Rental Agreement",
    "Medical Form",
    "Employment Contract",
    "Service Agreement",
    "Privacy Policy",
    "Other Legal Document",
];

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; color: #1f2933; }
nav a { margin-right: 1rem; }
form { display: grid; gap: 0.75rem; padding: 1rem; border: 1px solid #d9e2ec; border-radius: 8px; }
label { font-weight: 600; }
textarea { min-height: 10rem; }
details { margin: 1rem 0; border: 1px solid #d9e2ec; border-radius: 8px; padding: 0.5rem 1rem; }
summary { font-weight: 600; cursor: pointer; }
.output { white-space: pre-wrap; }
.error { background: #ffe3e3; border: 1px solid #e66a6a; border-radius: 8px; padding: 0.75rem 1rem; }
.hint { color: #627d98; font-size: 0.9rem; }
";

/// Escapes the five HTML-significant characters.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"utf-8\">
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">
<title>{title} · Lumen</title>
<style>{STYLE}</style>
</head>
<body>
<nav><a href=\"/\">Lumen</a><a href=\"/diagram\">Diagram Decoder</a><a href=\"/fine-print\">Fine-Print Translator</a></nav>
<h1>{title}</h1>
{body}
</body>
</html>
"
    )
}

fn panel(summary: &str, text: &str, open: bool) -> String {
    let open = if open { " open" } else { "" };
    format!(
        "<details{open}><summary>{summary}</summary><div class=\"output\">{}</div></details>\n",
        escape(text)
    )
}

fn error_box(error: Option<&str>) -> String {
    error
        .map(|e| format!("<div class=\"error\" role=\"alert\">❌ {}</div>\n", escape(e)))
        .unwrap_or_default()
}

fn api_key_field(has_server_key: bool) -> String {
    let hint = if has_server_key {
        "Optional: the server already has a key configured."
    } else {
        "Required: get a key from Google AI Studio."
    };
    format!(
        "<label for=\"api_key\">Gemini API key</label>
<input type=\"password\" id=\"api_key\" name=\"api_key\" autocomplete=\"off\">
<span class=\"hint\">{hint}</span>
"
    )
}

pub fn landing_page() -> String {
    layout(
        "Lumen",
        "<p>Two step-by-step AI agents built on Gemini.</p>
<ul>
<li><a href=\"/diagram\">🔬 Diagram Decoder</a>: upload a complex diagram and get a description, a causal step-by-step explanation, and a short quiz.</li>
<li><a href=\"/fine-print\">📋 Fine-Print Translator</a>: upload a contract or policy and get a clause-by-clause risk audit with a red/yellow/green summary.</li>
</ul>
",
    )
}

/// The diagram form, followed by either an error or the report.
pub fn diagram_page(
    has_server_key: bool,
    error: Option<&str>,
    report: Option<&DiagramReport>,
) -> String {
    let mut body = format!(
        "<p>Upload an educational diagram (PNG, JPEG, WebP or GIF).</p>
<form method=\"post\" action=\"/diagram\" enctype=\"multipart/form-data\">
<label for=\"image\">Diagram image</label>
<input type=\"file\" id=\"image\" name=\"image\" accept=\"image/*\" required>
{}<button type=\"submit\">🚀 Decode Diagram</button>
</form>
{}",
        api_key_field(has_server_key),
        error_box(error),
    );

    if let Some(report) = report {
        body.push_str("<h2>Results</h2>\n");
        body.push_str(&panel("🔍 Image Description", &report.image_description, true));
        body.push_str(&panel(
            "🧠 Step-by-Step Explanation",
            &report.logical_explanation,
            true,
        ));
        body.push_str(&panel("📝 Quiz Questions", &report.quiz_questions, false));
    }

    layout("🔬 Diagram Decoder", &body)
}

/// The fine-print form, followed by either an error or the report.
pub fn fine_print_page(
    has_server_key: bool,
    selected_type: &str,
    error: Option<&str>,
    report: Option<&DocumentReport>,
) -> String {
    let options: String = DOCUMENT_TYPES
        .iter()
        .map(|label| {
            let selected = if *label == selected_type { " selected" } else { "" };
            format!("<option{selected}>{}</option>", escape(label))
        })
        .collect();

    let mut body = format!(
        "<p>Provide the document one way: paste the text, upload a photo, or upload a PDF. \
Pasted text is used first, then the image, then the PDF.</p>
<form method=\"post\" action=\"/fine-print\" enctype=\"multipart/form-data\">
<label for=\"document_type\">Document type</label>
<select id=\"document_type\" name=\"document_type\">{options}</select>
<label for=\"text\">Paste text</label>
<textarea id=\"text\" name=\"text\"></textarea>
<label for=\"image\">Or upload a photo</label>
<input type=\"file\" id=\"image\" name=\"image\" accept=\"image/*\">
<label for=\"pdf\">Or upload a PDF</label>
<input type=\"file\" id=\"pdf\" name=\"pdf\" accept=\"application/pdf\">
{}<button type=\"submit\">🔍 Analyze Document</button>
</form>
{}",
        api_key_field(has_server_key),
        error_box(error),
    );

    if let Some(report) = report {
        body.push_str(&format!(
            "<h2>Results for {}</h2>\n",
            escape(report.document_type.as_str())
        ));
        body.push_str(&panel("📊 Risk Summary", &report.risk_summary, true));
        body.push_str(&panel("🔎 Detailed Risk Audit", &report.risk_audit, false));
        body.push_str(&panel("📄 Document Preview", &report.document_preview, false));
    }

    layout("📋 Fine-Print Translator", &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            escape(r#"<script>alert("x & 'y'")</script>"#),
            "&lt;script&gt;alert(&quot;x &amp; &#39;y&#39;&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn selected_document_type_is_marked() {
        let page = fine_print_page(true, "Privacy Policy", None, None);
        assert!(page.contains("<option selected>Privacy Policy</option>"));
        assert!(page.contains("<option>Rental Agreement</option>"));
    }

    #[test]
    fn errors_are_escaped_inline() {
        let page = diagram_page(false, Some("bad <input>"), None);
        assert!(page.contains("❌ bad &lt;input&gt;"));
        assert!(page.contains("Required: get a key"));
    }
}
