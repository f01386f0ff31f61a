//! Provider response cleanup
//!
//! Models frequently wrap the requested JSON array in markdown code fences
//! despite being told not to. Contract: remove the literal fence markers
//! (the json-tagged opener and the bare closer), then trim surrounding
//! whitespace, before JSON parsing.

/// Strip markdown code-fence markers from provider output
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}
