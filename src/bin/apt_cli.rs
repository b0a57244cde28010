use std::sync::Arc;

use anyhow::{Context, Result};
use apt_explorer_api::{
    config::{self, AppConfig},
    db,
    favorites::{FavoriteStore, JsonFileFavoriteStore},
    format::{format_area_range, format_price, with_commas},
    handlers::AppServices,
    models::{Period, RentType, SearchFilters},
    services::{compare::parse_compare_ids, QuerySettings},
};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::load_config().context("failed to load application config")?;
    config::init_tracing(config.log_level(), config.log_json);

    let json = cli.json;
    match cli.command {
        Commands::Favorites(command) => handle_favorites_command(&config, command, json).await,
        Commands::Search(args) => {
            handle_search(&CliContext::initialize(config).await?, args, json).await
        }
        Commands::Show(args) => {
            handle_show(&CliContext::initialize(config).await?, args, json).await
        }
        Commands::AreaTypes(args) => {
            handle_area_types(&CliContext::initialize(config).await?, args, json).await
        }
        Commands::Trend(args) => {
            handle_trend(&CliContext::initialize(config).await?, args, json).await
        }
        Commands::Compare(args) => {
            handle_compare(&CliContext::initialize(config).await?, args, json).await
        }
    }
}

#[derive(Parser)]
#[command(name = "apt-cli", about = "Browse apartment complexes and their transactions", version)]
struct Cli {
    #[arg(
        long,
        global = true,
        action = ArgAction::SetTrue,
        help = "Render command output as pretty JSON"
    )]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search complexes by name or address
    Search(SearchArgs),
    /// Show one complex with its K-apt details
    Show(IdArgs),
    /// List pyeong bands with latest prices
    AreaTypes(IdArgs),
    /// Monthly average prices
    Trend(TrendArgs),
    /// Compare up to four complexes side by side
    Compare(CompareArgs),
    #[command(subcommand)]
    Favorites(FavoritesCommands),
}

#[derive(Subcommand)]
enum FavoritesCommands {
    List,
    Add(IdArgs),
    Remove(IdArgs),
    Toggle(IdArgs),
}

#[derive(Args)]
struct IdArgs {
    #[arg(help = "Apartment id")]
    id: i32,
}

#[derive(Args)]
struct SearchArgs {
    #[arg(help = "Search term, at least 2 characters")]
    query: String,
    #[arg(long, default_value_t = 1)]
    page: u64,
    #[arg(long)]
    limit: Option<u64>,
    #[arg(long, help = "~1990, 1990s, 2000s, 2010s or 2020~")]
    year_built: Option<String>,
    #[arg(long, help = "~100, 100~300, 300~500, 500~1000, 1000~2000 or 2000~")]
    units: Option<String>,
    #[arg(long, help = "계단식, 복도식 or 혼합식")]
    hallway_type: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TrendKind {
    Sale,
    Jeonse,
    Monthly,
}

#[derive(Args)]
struct TrendArgs {
    #[arg(help = "Apartment id")]
    id: i32,
    #[arg(long, value_enum, default_value_t = TrendKind::Sale)]
    kind: TrendKind,
    #[arg(long, help = "1y, 3y, 5y or all")]
    period: Option<String>,
    #[arg(long, help = "Exclusive area in m²")]
    area: Option<f64>,
}

#[derive(Args)]
struct CompareArgs {
    #[arg(help = "Comma separated apartment ids")]
    ids: String,
    #[arg(long, help = "1y, 3y, 5y or all")]
    period: Option<String>,
}

struct CliContext {
    config: AppConfig,
    services: AppServices,
}

impl CliContext {
    async fn initialize(config: AppConfig) -> Result<Self> {
        let db_pool = db::establish_connection_from_app_config(&config)
            .await
            .context("failed to connect to database")?;
        let services = AppServices::new(Arc::new(db_pool), QuerySettings::from(&config));

        Ok(Self { config, services })
    }
}

async fn handle_search(context: &CliContext, args: SearchArgs, json: bool) -> Result<()> {
    let services = &context.services;
    let filters = SearchFilters::parse(
        args.year_built.as_deref(),
        args.units.as_deref(),
        args.hallway_type.as_deref(),
    )?;
    let page = db::PageRequest::normalize(
        Some(args.page),
        args.limit,
        context.config.api_default_page_size,
        context.config.api_max_page_size,
    );
    let (items, total) = services
        .apartments
        .search(&args.query, filters, page)
        .await
        .context("search failed")?;

    if json {
        print_json(&serde_json::json!({
            "items": items,
            "total": total,
            "page": page.page,
            "limit": page.limit,
            "total_pages": page.total_pages(total),
        }))?;
    } else if items.is_empty() {
        println!("No apartments match \"{}\"", args.query);
    } else {
        println!(
            "{} apartments (page {}/{}):",
            with_commas(total as i64),
            page.page,
            page.total_pages(total)
        );
        for apt in &items {
            println!(
                "- [{}] {} • {} • {}세대 • {}년",
                apt.id,
                apt.apt_name,
                apt.address,
                with_commas(apt.total_units as i64),
                apt.constructed_year
            );
        }
    }

    Ok(())
}

async fn handle_show(context: &CliContext, args: IdArgs, json: bool) -> Result<()> {
    let services = &context.services;
    let detail = services.apartments.get_detail(args.id).await?;
    if json {
        print_json(&detail)?;
    } else {
        let apt = &detail.apartment;
        println!("{} ({})", apt.apt_name, apt.address);
        println!(
            "  {}세대 / {}개동 / {}년 {}월 준공",
            with_commas(apt.total_units as i64),
            apt.total_buildings,
            apt.constructed_year,
            apt.constructed_month
        );
        if let Some(info) = &detail.building_info {
            if let Some(hallway) = &info.hallway_type {
                println!("  복도유형: {}", hallway);
            }
            if let Some(heat) = &info.heat_type {
                println!("  난방: {}", heat);
            }
            if let Some(company) = &info.build_company {
                println!("  시공사: {}", company);
            }
        }
        if let Some(parking) = detail.facility_info.as_ref().and_then(|f| f.parking_total) {
            println!("  주차: {}대", with_commas(parking as i64));
        }
    }

    Ok(())
}

async fn handle_area_types(context: &CliContext, args: IdArgs, json: bool) -> Result<()> {
    let services = &context.services;
    let views = services.area_types.list_area_types(args.id).await?;
    if json {
        print_json(&views)?;
    } else if views.is_empty() {
        println!("Apartment {} has no residential area types", args.id);
    } else {
        for view in &views {
            let trade = view.trade_price.map(format_price).unwrap_or_else(|| "-".into());
            let jeonse = view.jeonse_price.map(format_price).unwrap_or_else(|| "-".into());
            println!(
                "- {}평 • 전용 {} • {}세대 • 매매 {} • 전세 {}",
                view.pyeong,
                format_area_range(
                    view.exclusive_area_min,
                    view.exclusive_area_max,
                    view.exclusive_area as f64
                ),
                with_commas(view.units),
                trade,
                jeonse
            );
        }
    }

    Ok(())
}

async fn handle_trend(context: &CliContext, args: TrendArgs, json: bool) -> Result<()> {
    let services = &context.services;
    let period = Period::parse_lenient(args.period.as_deref());
    match args.kind {
        TrendKind::Sale => {
            let points = services.trends.sale_trend(args.id, period, args.area).await?;
            if json {
                print_json(&points)?;
            } else {
                for point in &points {
                    println!(
                        "{}  {}  ({}건)",
                        point.date,
                        format_price(point.avg_price),
                        point.transaction_count
                    );
                }
            }
        }
        TrendKind::Jeonse | TrendKind::Monthly => {
            let rent_type = match args.kind {
                TrendKind::Monthly => RentType::Monthly,
                _ => RentType::Jeonse,
            };
            let points = services
                .trends
                .rent_trend(args.id, period, rent_type, args.area)
                .await?;
            if json {
                print_json(&points)?;
            } else {
                for point in &points {
                    println!(
                        "{}  보증금 {} / 월 {}  ({}건)",
                        point.date,
                        format_price(point.avg_deposit),
                        format_price(point.avg_monthly_rent),
                        point.transaction_count
                    );
                }
            }
        }
    }

    Ok(())
}

async fn handle_compare(context: &CliContext, args: CompareArgs, json: bool) -> Result<()> {
    let services = &context.services;
    let ids = parse_compare_ids(&args.ids)?;
    let period = Period::parse_lenient(args.period.as_deref());
    let entries = services.compare.compare(&ids, period).await?;
    if json {
        print_json(&entries)?;
    } else {
        for entry in &entries {
            let apt = &entry.apartment.apartment;
            let latest = entry
                .price_trend
                .last()
                .map(|p| format!("{} ({})", format_price(p.avg_price), p.date))
                .unwrap_or_else(|| "-".into());
            let station = entry
                .station
                .as_ref()
                .map(|s| format!("{} 도보 {}분", s.station_name, s.walking_minutes))
                .unwrap_or_else(|| "-".into());
            println!(
                "- [{}] {} • {}년 • {}세대 • 최근 {} • {}",
                apt.id,
                apt.apt_name,
                apt.constructed_year,
                with_commas(apt.total_units as i64),
                latest,
                station
            );
        }
    }

    Ok(())
}

async fn handle_favorites_command(
    config: &AppConfig,
    command: FavoritesCommands,
    json: bool,
) -> Result<()> {
    let store = JsonFileFavoriteStore::new(&config.favorites_path);
    let mut favorites = store
        .load()
        .await
        .with_context(|| format!("failed to read {}", store.path().display()))?;

    let changed = match command {
        FavoritesCommands::List => None,
        FavoritesCommands::Add(args) => {
            favorites.add(args.id);
            Some(format!("Apartment {} added to favorites", args.id))
        }
        FavoritesCommands::Remove(args) => {
            favorites.remove(args.id);
            Some(format!("Apartment {} removed from favorites", args.id))
        }
        FavoritesCommands::Toggle(args) => {
            let message = if favorites.toggle(args.id) {
                format!("Apartment {} added to favorites", args.id)
            } else {
                format!("Apartment {} removed from favorites", args.id)
            };
            Some(message)
        }
    };

    if let Some(message) = &changed {
        store
            .save(&favorites)
            .await
            .with_context(|| format!("failed to write {}", store.path().display()))?;
        if !json {
            println!("{}", message);
        }
    }

    if json {
        print_json(&favorites)?;
    } else if changed.is_none() {
        if favorites.is_empty() {
            println!("No favorites yet");
        } else {
            for id in favorites.ids() {
                println!("- {}", id);
            }
        }
    }

    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
