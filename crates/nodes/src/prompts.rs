//! Prompt builders for every model call.
//!
//! Each builder is a pure function of the record fields its step depends on.
//! An empty upstream field yields a prompt that simply references empty
//! content; builders never fail.

/// Vision pass over the diagram image.
pub const DESCRIBE_DIAGRAM: &str = "\
You are an expert diagram analyzer. Study this educational diagram carefully.

Your task:
1. Identify EVERY visible label, component, part and element in the diagram
2. Describe what each part is and what it is for
3. Note any arrows, connections or relationships between parts
4. Name the subject area (biology, physics, engineering, chemistry, ...)
5. Describe the overall structure and layout

Be thorough and detailed. List everything you can see: your answer will be used \
to explain the diagram to a student.";

/// Transcription of a photographed or scanned document.
pub const EXTRACT_DOCUMENT_TEXT: &str = "\
Extract ALL text from this document image. Preserve the structure, formatting and \
order of the text. Include everything: headers, paragraphs, fine print, footnotes \
and any text in the margins. Be thorough and accurate.";

/// Causal, step-by-step explanation built on the diagram description.
pub fn explain_diagram(description: &str) -> String {
    format!(
        "\
You are an expert educator. Using the diagram analysis below, write a step-by-step \
explanation of the process, mechanism or concept the diagram shows.

Diagram Analysis:
{description}

Your task:
1. Tell the diagram as a step-by-step story
2. Reason causally: explain how one part affects another (e.g. \"When Part A moves, \
it causes Part B to rotate because...\")
3. Break complex processes into clear, numbered steps
4. Use simple language a student can follow
5. Highlight the key relationships and cause-effect chains
6. Explain WHY things happen, not only WHAT happens

Format your response as:
- Step 1: [Description]
- Step 2: [Description]
- etc.

Be thorough and educational. Help the student understand how everything works together."
    )
}

/// Three multiple-choice questions grounded in the description and explanation.
pub fn quiz(description: &str, explanation: &str) -> String {
    format!(
        "\
You are an expert educator writing assessment questions. Using the diagram analysis \
and explanation below, write 3 high-quality quiz questions that test the student's \
understanding.

Diagram Analysis:
{description}

Step-by-Step Explanation:
{explanation}

Write exactly 3 questions that:
1. Test understanding of the key concepts in the diagram
2. Make the student apply the causal relationships explained above
3. Range from basic recall to application-level thinking
4. Are clear, unambiguous and educational

Format each question as:
Question 1: [Question text]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Correct Answer: [Letter] - [Brief explanation]

Question 2: [Question text]
...

Keep every question directly tied to the diagram and explanation provided."
    )
}

/// Clause-by-clause risk audit of the document text.
pub fn audit(document_text: &str, document_type: &str) -> String {
    format!(
        "\
You are an expert legal analyst who specialises in spotting predatory clauses and \
hidden risks in {document_type}s.

Document Text:
{document_text}

Your task:
Analyse this document thoroughly and identify ALL potential risks, predatory clauses \
and \"gotchas\", including:

1. **Hidden Fees & Charges**: fees not clearly disclosed upfront
2. **Auto-Renewal Clauses**: automatic renewal without a clear opt-out
3. **Privacy Risks**: data sharing, selling or usage rights users might not expect
4. **Liability Limitations**: clauses limiting the company's liability or shifting risk to the user
5. **Binding Arbitration**: forced arbitration that prevents lawsuits
6. **Cancellation Penalties**: fees or penalties for cancelling
7. **Data Retention**: how long data is kept and what happens to it
8. **Jurisdiction Issues**: unfavourable legal jurisdictions
9. **Modification Rights**: the right to change terms without notice
10. **Waiver of Rights**: any rights the user gives up

For each risk found:
- Quote the exact clause or section
- Explain why it is problematic
- Rate the severity (High/Medium/Low)
- Note whether it contradicts anything elsewhere in the document

Be thorough. Check for contradictions between sections and look for subtle risks \
that are not obvious at first reading."
    )
}

/// Red/yellow/green summary of the audit.
pub fn risk_summary(risk_audit: &str) -> String {
    format!(
        "\
You are a risk assessment expert. Using the audit results below, write a clear, \
actionable risk summary report.

Risk Audit Results:
{risk_audit}

Your summary must contain:

1. **Overall Risk Level**:
   - 🔴 RED (High Risk) - multiple serious concerns, proceed with extreme caution
   - 🟡 YELLOW (Medium Risk) - some concerns, review carefully before signing
   - 🟢 GREEN (Low Risk) - generally safe, minor concerns only

2. **Executive Summary**: a 2-3 sentence overview of the main risks

3. **Critical Issues** (if any): the most serious problems that could significantly affect the user

4. **Moderate Concerns**: issues worth noting that are not deal-breakers

5. **Minor Notes**: small concerns or things to be aware of

6. **Recommendations**:
   - Should the user sign this? (Yes/No/With Modifications)
   - What should they do? (e.g. negotiate terms, seek legal advice, walk away)

Format the output clearly with emojis and sections so a non-lawyer can follow it."
    )
}
