use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use match_posts::{
    blogger::BloggerClient,
    chrono_util::now_in,
    scrape::PageFetcher,
    settings::Settings,
    tasks::{
        clean_mappings::clean_mappings, delete_old::delete_old, lookup::lookup_post,
        match_bot::match_bot, update_posts::update_posts, TaskContext,
    },
};
use match_posts_utils::{credentials::Credentials, fs_json_util::read_toml};

#[derive(Parser)]
#[command(about = "Maintains match posts on a Blogger blog")]
struct Opts {
    /// Optional TOML file overriding the built-in settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log what would change without writing to the blog or the mappings file.
    #[arg(long, global = true)]
    dry_run: bool,
    #[command(subcommand)]
    sub: Sub,
}

#[derive(Clone, Subcommand)]
enum Sub {
    /// Turn finished live match posts into static reports.
    UpdatePosts,
    /// Delete match posts whose match is over.
    DeleteOld,
    /// Drop URL mappings whose post is gone or old. Needs no access token.
    CleanMappings,
    /// Fill yesterday's match posts with scraped final reports.
    MatchBot,
    /// Print the id of the post published at a URL.
    LookupPost(LookupPost),
}

#[derive(Clone, Args)]
struct LookupPost {
    url: String,
}

impl Sub {
    fn needs_token(&self) -> bool {
        !matches!(self, Sub::CleanMappings | Sub::LookupPost(_))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let settings: Settings = match &opts.config {
        Some(path) => read_toml(path)?,
        None => Settings::default(),
    };
    let credentials = Credentials::from_env(opts.sub.needs_token())?;
    info!("Blog ID: {}", credentials.blog_id);
    let blogger = BloggerClient::new(credentials, &settings)?;
    if opts.dry_run {
        info!("Dry run: nothing will be written");
    }

    let ctx = TaskContext {
        blogger: &blogger,
        settings: &settings,
        now: now_in(settings.utc_offset_minutes)?,
        dry_run: opts.dry_run,
    };
    match opts.sub {
        Sub::UpdatePosts => {
            update_posts(&ctx).await?;
        }
        Sub::DeleteOld => {
            delete_old(&ctx).await?;
        }
        Sub::CleanMappings => {
            clean_mappings(&ctx).await?;
        }
        Sub::MatchBot => {
            let fetcher = PageFetcher::new(&settings.scrape)?;
            match_bot(&ctx, &fetcher).await?;
        }
        Sub::LookupPost(sub) => match lookup_post(&blogger, &sub.url).await? {
            Some(id) => println!("{id}"),
            None => anyhow::bail!("No post found for {}", sub.url),
        },
    }
    Ok(())
}
