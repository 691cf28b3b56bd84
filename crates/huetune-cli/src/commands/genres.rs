use std::sync::Arc;

use anyhow::{Context, Result};
use huetune_catalog::Config;
use huetune_search::{GenreIndex, OllamaEmbedder, SimilaritySearch};

/// Rank the genre vocabulary against free text and print the matches.
pub async fn rank_genres(config: &Config, text: &str, top: usize) -> Result<()> {
    let embedder = OllamaEmbedder::new(&config.embedding_url, &config.embedding_model)
        .context("Failed to create embedding client")?;
    let search = SimilaritySearch::new(Arc::new(GenreIndex::new(Arc::new(embedder))));

    let results = search
        .rank(text, top)
        .await
        .with_context(|| format!("Failed to rank genres for '{text}'"))?;

    if results.is_empty() {
        println!("No genres matched");
        return Ok(());
    }

    for (position, result) in results.iter().enumerate() {
        println!(
            "{:>3}. {:<28} {:>5.1}%",
            position + 1,
            result.genre,
            result.similarity * 100.0
        );
    }

    Ok(())
}
