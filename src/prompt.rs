//! Prompt rendering.
//!
//! [`build`] substitutes a validated request into a fixed instruction
//! template. The topic is inserted verbatim: no escaping, no quoting, and no
//! defence against instructions smuggled inside it.

use crate::types::GenerationRequest;

/// Render the exact instruction text sent to the model.
///
/// Deterministic: the same request always yields the same prompt.
pub fn build(request: &GenerationRequest) -> String {
    format!(
        "Write a {style} style blog post about {topic} within {words} words. \
         Stay on the topic of {topic} throughout. \
         Focus on providing valuable insights and maintaining a consistent {style} tone \
         throughout the content.",
        style = request.style(),
        topic = request.topic(),
        words = request.word_count(),
    )
}
