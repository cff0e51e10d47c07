// Topic discovery — LDA over the normalized headline corpus.

pub mod lda;
pub mod traits;
