pub mod article_generator;
pub mod prompt;
pub mod tone;
