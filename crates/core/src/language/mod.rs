pub mod classifier;
pub mod collector;
pub mod tokenizer;

pub use classifier::{LineClass, LineClassifier, classify_line};
pub use collector::{LineCollector, LineKind};
pub use tokenizer::{Token, Tokenizer};
