pub mod openai_article_generator;
pub mod tiktoken_tokenizer;
