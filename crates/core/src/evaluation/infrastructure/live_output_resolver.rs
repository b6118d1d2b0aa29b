use crate::evaluation::domain::output_resolver::{OutputResolver, ResolveError, ResolveRequest};
use crate::generation::domain::article_generator::{ArticleGenerator, GenerationOutcome};

/// Produces the article for each sample by calling a generator.
pub struct LiveOutputResolver {
    generator: Box<dyn ArticleGenerator>,
}

impl LiveOutputResolver {
    pub fn new(generator: Box<dyn ArticleGenerator>) -> Self {
        Self { generator }
    }
}

impl OutputResolver for LiveOutputResolver {
    fn resolve(&self, request: &ResolveRequest<'_>) -> Result<String, ResolveError> {
        let generation_error = |message: String| ResolveError::Generation {
            sample_id: request.sample_id.to_string(),
            message,
        };

        match self.generator.generate(request.transcript, request.tone) {
            GenerationOutcome::Success(article) => {
                if article.truncated {
                    log::info!("Transcript for {} was truncated before generation", request.sample_id);
                }
                let text = article.blog_post.trim();
                if text.is_empty() {
                    return Err(generation_error("model returned an empty article".to_string()));
                }
                Ok(text.to_string())
            }
            GenerationOutcome::Error { message } => Err(generation_error(message)),
        }
    }
}
