//! Public types for the Penwright API.

mod request;
mod result;
mod style;

pub use request::{
    DEFAULT_WORD_COUNT, GenerationRequest, MAX_WORD_COUNT, MIN_WORD_COUNT, WORD_COUNT_STEP, validate,
};
pub use result::GenerationResult;
pub use style::Style;
