#![allow(dead_code)]
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]
mod band;
mod community;
mod config;
mod http_handler;
mod keychain;
mod logger;
mod scheduling;
mod studio_search;

use crate::community::{PostCategory, time_ago};
use crate::config::AppConfig;
use crate::keychain::Keychain;
use crate::scheduling::{AvailabilityMap, HeatLevel, ScheduleSession, SessionConfig};
use crate::studio_search::SearchState;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use std::{env, path::Path};

const USAGE: &str = "\
usage:
  bandroom search <YYYY-MM-DD> <room>[,<room>...]
  bandroom schedule <session.json>
  bandroom bands <email> <password>
  bandroom board [free|recruit|gear|gig|question]";

/// Session document accepted by the `schedule` command.
#[derive(Deserialize)]
struct SessionDocument {
    session: SessionConfig,
    #[serde(default)]
    participants: Vec<ParticipantDocument>,
}

#[derive(Deserialize)]
struct ParticipantDocument {
    name: String,
    availability: AvailabilityMap,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let context = init(AppConfig::from_env());
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["search", date, rooms] => run_search(&context, date, rooms).await,
        ["schedule", path] => run_schedule(Path::new(path)).await,
        ["bands", email, password] => run_bands(&context, email, password).await,
        ["board"] => run_board(&context, None).await,
        ["board", category] => run_board(&context, Some(*category)).await,
        _ => println!("{USAGE}"),
    }
    context.reset().await;
}

fn init(config: AppConfig) -> Keychain {
    info!(
        "Using backend {} (connect timeout {}ms)",
        config.base_url(),
        config.connect_timeout().as_millis()
    );
    Keychain::new(config).unwrap_or_else(|e| fatal!("Could not build HTTP client: {e}"))
}

async fn run_search(context: &Keychain, date: &str, rooms: &str) {
    let Ok(date) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        error!("Invalid date {date}, expected YYYY-MM-DD");
        return;
    };
    let rooms: Vec<String> = rooms.split(',').map(str::trim).filter(|r| !r.is_empty()).map(String::from).collect();
    let search = context.search();
    let mut state = search.subscribe();
    if let Err(e) = search.start_search(date, rooms) {
        error!("Could not start search: {e}");
        return;
    }
    let Ok(final_state) = state.wait_for(SearchState::is_terminal).await.map(|s| s.clone()) else {
        error!("Search state channel closed");
        return;
    };
    for studio in search.studios() {
        info!("{studio}");
    }
    match final_state {
        SearchState::Failed(msg) => error!("{msg}"),
        _ => info!("{} room(s) found", search.studios().len()),
    }
}

async fn run_schedule(path: &Path) {
    let doc: SessionDocument = match tokio::fs::read(path).await.map(|raw| serde_json::from_slice(&raw)) {
        Ok(Ok(doc)) => doc,
        Ok(Err(e)) => return error!("Invalid session document {}: {e}", path.display()),
        Err(e) => return error!("Could not read {}: {e}", path.display()),
    };
    let mut session = match ScheduleSession::new(doc.session) {
        Ok(session) => session,
        Err(e) => return error!("Invalid session: {e}"),
    };
    for p in &doc.participants {
        if let Err(e) = session.join(&p.name, &p.availability) {
            warn!("Skipping participant {:?}: {e}", p.name);
        }
    }
    info!(
        "{} ({} - {}), {} participant(s)",
        session.title(),
        session.start_date(),
        session.end_date(),
        session.participants().len()
    );
    let header: String = session.dates().map(|d| d.format(" %m/%d").to_string()).collect();
    println!("      {header}");
    for row in session.heatmap() {
        let Some(hour) = row.first().map(|c| c.key.hour()) else { continue };
        let cells: String = row.iter().map(|c| format!("   {} ", heat_glyph(c.level))).collect();
        println!("{hour:>2}:00 {cells}");
    }
    let agg = session.aggregate();
    for key in agg.common_slots() {
        info!("Everyone is available at {key}");
    }
}

fn heat_glyph(level: HeatLevel) -> char {
    match level {
        HeatLevel::None => '·',
        HeatLevel::Low => '░',
        HeatLevel::Medium => '▒',
        HeatLevel::High => '▓',
        HeatLevel::Full => '█',
    }
}

async fn run_bands(context: &Keychain, email: &str, password: &str) {
    let user = match context.auth().login(email, password).await {
        Ok(user) => user,
        Err(e) => return error!("Login failed: {e}"),
    };
    info!("Signed in as {}", user.nickname);
    match context.config().data_file() {
        Some(path) => log!("Band data stored in {}", path.display()),
        None => warn!("BANDROOM_DATA_FILE is not set, bands are kept in memory only"),
    }
    let bands = match context.bands().bands().await {
        Ok(bands) => bands,
        Err(e) => return error!("Could not load bands: {e}"),
    };
    for band in bands {
        info!("{} ({} member(s), invite code {})", band.name, band.size(), band.invite_code);
        match context.bands().schedules_for(&band.id).await {
            Ok(schedules) => {
                for s in schedules {
                    log!("  {} {}-{} {} @ {}", s.date, s.start_time.format("%H:%M"), s.end_time.format("%H:%M"), s.title, s.location);
                }
            }
            Err(e) => warn!("Could not load schedules of {}: {e}", band.name),
        }
    }
}

async fn run_board(context: &Keychain, category: Option<&str>) {
    let filter = match category.map(str::parse::<PostCategory>).transpose() {
        Ok(filter) => filter,
        Err(_) => return error!("Unknown post category {:?}", category.unwrap_or_default()),
    };
    let notices = context.notices();
    for notice in notices.read().await.listing() {
        let pin = if notice.pinned { "*" } else { " " };
        log!(
            "{pin} [{}] {} ({}, {})",
            notice.category.label(),
            notice.title,
            notice.author,
            notice.display_date()
        );
    }
    let now = Utc::now();
    let posts = context.posts();
    for post in posts.read().await.filter_by(filter) {
        info!(
            "[{}] {} - {} ({}, {} like(s), {} comment(s))",
            post.category.label(),
            post.title,
            post.author,
            time_ago(post.created_at, now),
            post.likes,
            post.comments
        );
    }
}
