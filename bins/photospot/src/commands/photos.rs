//! Store-backed lookups: list, photo and profile

use super::{header, print_json, report};
use crate::commands::query::decode;
use crate::{demo, Format, RequesterArgs, Source};
use anyhow::Result;
use owo_colors::OwoColorize;
use photospot_core::config::Config;
use photospot_core::Error as CoreError;
use photospot_policy::{PhotoListItem, PhotoView, ProfileView, Requester};
use photospot_query::{Paginated, RawPhotoQuery};
use photospot_service::{PhotoService, ServiceResult};
use photospot_store::{PhotoStore, SupabaseStore};
use tracing::debug;

enum Action {
    List(RawPhotoQuery),
    Photo(String, Option<Requester>),
    Profile(String, Option<Requester>),
}

/// `GET /photos`
pub async fn list(config: &Config, source: &Source, query: &str, format: Format) -> Result<()> {
    execute(config, source, Action::List(decode(query)?), format).await
}

/// `GET /photos/{id}`
pub async fn photo(config: &Config, source: &Source, id: &str, requester: &RequesterArgs, format: Format) -> Result<()> {
    execute(config, source, Action::Photo(id.to_string(), identity(requester)), format).await
}

/// `GET /profiles/{id}`
pub async fn profile(
    config: &Config,
    source: &Source,
    id: &str,
    requester: &RequesterArgs,
    format: Format,
) -> Result<()> {
    execute(config, source, Action::Profile(id.to_string(), identity(requester)), format).await
}

fn identity(args: &RequesterArgs) -> Option<Requester> {
    args.id.map(|id| Requester::new(id, args.role))
}

async fn execute(config: &Config, source: &Source, action: Action, format: Format) -> Result<()> {
    let query = config.schema.query.clone();
    if source.memory {
        debug!("Using seeded in-memory store");
        run(&PhotoService::new(demo::seeded_store().await?, query), action, format).await
    } else {
        let store = SupabaseStore::new(config.schema.store.clone())
            .map_err(|e| CoreError::from(e).with_suggestion("Check PHOTOSPOT_REST_URL and the API keys, or pass --memory"))?;
        debug!(rest_url = %store.settings().rest_url, "Using Supabase store");
        run(&PhotoService::new(store, query), action, format).await
    }
}

async fn run<S: PhotoStore>(service: &PhotoService<S>, action: Action, format: Format) -> Result<()> {
    match action {
        Action::List(raw) => render(service.list_photos(&raw).await, format, print_page),
        Action::Photo(id, requester) => render(service.get_photo(&id, requester.as_ref()).await, format, print_photo),
        Action::Profile(id, viewer) => render(service.get_profile(&id, viewer.as_ref()).await, format, print_profile),
    }
}

fn render<T: serde::Serialize>(result: ServiceResult<T>, format: Format, text: fn(&T)) -> Result<()> {
    match result {
        Ok(value) if format == Format::Json => print_json(&value),
        Ok(value) => {
            text(&value);
            Ok(())
        }
        Err(err) => report(&err, format),
    }
}

fn print_page(page: &Paginated<PhotoListItem>) {
    let meta = &page.meta;
    header(&format!("Photos {}-{} of {}", meta.offset + 1, meta.offset + page.data.len() as u64, meta.total));
    if page.data.is_empty() {
        println!("  {}", "No photos match".dimmed());
    }
    for item in &page.data {
        println!(
            "  {}  {:<34} {:<16} {}",
            item.id.to_string().dimmed(),
            item.title,
            item.category.to_string().cyan(),
            item.location
        );
    }
    if meta.has_more {
        println!();
        println!("  {} offset={}", "more:".yellow(), meta.offset + u64::from(meta.limit));
    }
    println!();
}

fn print_photo(view: &PhotoView) {
    header(&view.title);
    println!("  id:        {}", view.id.to_string().dimmed());
    println!("  owner:     {}", view.owner_id.to_string().dimmed());
    println!("  category:  {}", view.category.to_string().cyan());
    if let Some(season) = view.season {
        println!("  season:    {season}");
    }
    if let Some(time_of_day) = view.time_of_day {
        println!("  time:      {time_of_day}");
    }
    let blurred = if view.location_blurred { "blurred".yellow().to_string() } else { "exact".green().to_string() };
    println!("  location:  {} ({blurred})", view.location);
    if let Some(exact) = view.location_exact {
        println!("  exact:     {}", exact.to_string().red());
    }
    if let Some(radius) = view.blur_radius.flatten() {
        println!("  radius:    {radius} m");
    }
    if let Some(status) = view.status {
        println!("  status:    {status}");
    }
    if let Some(exif) = view.exif.as_ref().and_then(Option::as_ref) {
        println!("  exif:      {}", exif.to_string().dimmed());
    }
    println!();
}

fn print_profile(view: &ProfileView) {
    header(&format!("@{}", view.username));
    if let Some(name) = &view.display_name {
        println!("  name:      {name}");
    }
    println!("  role:      {}", view.role.as_str().cyan());
    if let Some(bio) = &view.bio {
        println!("  bio:       {bio}");
    }
    match (&view.company_name, &view.website_url) {
        (None, None) => println!("  business:  {}", "hidden".dimmed()),
        (company, website) => {
            if let Some(company) = company.as_ref().and_then(Option::as_ref) {
                println!("  company:   {company}");
            }
            if let Some(website) = website.as_ref().and_then(Option::as_ref) {
                println!("  website:   {website}");
            }
        }
    }
    for (network, url) in view.social_links.iter().flatten().flatten() {
        println!("  {network:<10} {url}");
    }
    println!();
}
