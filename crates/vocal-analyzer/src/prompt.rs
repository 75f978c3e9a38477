/// Instruction asking the model for one JSON object describing `word`
pub fn build_prompt(word: &str) -> String {
    format!(
        r#"
Analyze the English word: "{word}"

Identify its single most common meaning and provide the analysis STRICTLY in JSON format. The JSON object must have the following structure:
{{
"word": "{word}",
"phonetic": "(IPA phonetic transcription if available, otherwise 'N/A')",
"partOfSpeech": "(The single most common part of speech, e.g., 'noun', 'verb')",
"definition_en": "(Clear English definition for this primary meaning)",
"translation_vi": "(Accurate Vietnamese translation of this primary English definition)",
"example_en": "(An English example sentence using the word with this primary meaning, or 'N/A')"
}}

Constraints:
- Only output the raw JSON object. Do NOT include any introductory text, concluding remarks, explanations, or markdown formatting like ```json.
- Ensure all strings within the JSON are correctly escaped for valid JSON.
- If the word is not found or invalid, return a JSON object: {{"error": "Word not found or invalid."}}
"#
    )
}
