//! Imports the newest Zoomit articles as draft records.
//!
//! Articles whose normalized title-slug already exists are skipped, so the
//! importer can run repeatedly without duplicating content. Imported drafts
//! are attributed to the account named by `IMPORT_AUTHOR` (default
//! `newsbot`), which must already be registered.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use newsdesk::application::ports::util::SlugGenerator;
use newsdesk::config::AppConfig;
use newsdesk::domain::article::{
    ArticleBody, ArticleStatus, ArticleTitle, ArticleWriteRepository, NewArticle,
};
use newsdesk::domain::slug::{SlugAssigner, SlugLookup};
use newsdesk::domain::user::{UserRepository, Username};
use newsdesk::infrastructure::{
    database,
    repositories::{
        PostgresArticleReadRepository, PostgresArticleWriteRepository, PostgresUserRepository,
    },
    scrape::zoomit,
    util::DefaultSlugGenerator,
};

const SOURCE_NAME: &str = "Zoomit";

/// Politeness delay between article fetches.
const FETCH_DELAY: Duration = Duration::from_secs(2);

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!(error = %err, "import failed");
        eprintln!("import failed: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,sqlx=warn".to_string()),
        )
        .init();

    let config = AppConfig::from_env()?;
    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo = PostgresUserRepository::new(pool.clone());
    let read_repo = PostgresArticleReadRepository::new(pool.clone());
    let write_repo = PostgresArticleWriteRepository::new(pool.clone());

    let import_author =
        std::env::var("IMPORT_AUTHOR").unwrap_or_else(|_| "newsbot".to_string());
    let username = Username::new(import_author.clone())?;
    let Some(author) = user_repo.find_by_username(&username).await? else {
        bail!("import author '{import_author}' is not registered");
    };

    let slugger = DefaultSlugGenerator;
    let assigner = SlugAssigner::new(Arc::new(slugger.clone()));

    let client = reqwest::Client::builder()
        .user_agent(zoomit::USER_AGENT)
        .build()
        .context("building http client")?;

    let urls = zoomit::index_articles(&client).await?;

    let mut imported = 0usize;
    let mut skipped = 0usize;
    for url in urls {
        tokio::time::sleep(FETCH_DELAY).await;

        let scraped = match zoomit::fetch_article(&client, &url).await {
            Ok(Some(article)) => article,
            Ok(None) => {
                skipped += 1;
                continue;
            }
            Err(err) => {
                tracing::error!(error = %err, %url, "fetch failed");
                skipped += 1;
                continue;
            }
        };

        let base = slugger.slugify(&scraped.title);
        if base.is_empty() {
            tracing::warn!(%url, "title normalizes to nothing, skipping");
            skipped += 1;
            continue;
        }
        // Same-title articles were imported by an earlier run; a fresh
        // article never collides on its base slug.
        if read_repo.slug_exists(&base).await? {
            tracing::debug!(slug = %base, "already imported");
            skipped += 1;
            continue;
        }

        let slug = assigner.assign(&scraped.title, &read_repo).await?;
        let now = chrono::Utc::now();
        let new_article = NewArticle {
            title: ArticleTitle::new(scraped.title)?,
            slug,
            summary: scraped.summary,
            body: ArticleBody::new(scraped.body)?,
            source: Some(SOURCE_NAME.to_string()),
            source_url: Some(scraped.source_url),
            image_url: None,
            author_id: author.id,
            status: ArticleStatus::Draft,
            is_featured: false,
            published_at: None,
            created_at: now,
            updated_at: now,
            tag_ids: vec![],
            category_ids: vec![],
        };

        let created = write_repo.insert(new_article).await?;
        tracing::info!(slug = %created.slug, "imported draft");
        imported += 1;
    }

    tracing::info!(imported, skipped, "import finished");
    Ok(())
}
