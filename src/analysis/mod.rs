//! Text features shown alongside a prediction.
//!
//! None of these depend on the classifier; they describe the submitted text
//! itself:
//! - `top_words`: most frequent non-stop-word tokens
//! - `summarize_text`: whitespace-normalized copy of the input
//! - `digit_frequency`: occurrences of each decimal digit

mod features;

pub use features::{
    digit_frequency, summarize_text, top_words, DigitCount, WordCount, DEFAULT_TOP_WORDS,
    STOP_WORDS,
};
