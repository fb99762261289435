use clap::Parser;
use green_commute::config::cli::{ActivityArgs, Command, PreviewAction, SnapshotArgs};
use green_commute::config::TomlConfig;
use green_commute::core::summary::equivalent_lines;
use green_commute::domain::model::{ActivityTotals, TrophyStatus};
use green_commute::utils::error::{ErrorSeverity, GreenError};
use green_commute::utils::logger;
use green_commute::{
    compute, CliConfig, GreenImpactApp, ImpactSnapshot, Outcome, Settings,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!(
                "❌ {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run(cli: CliConfig) -> Result<i32, GreenError> {
    let file = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Some(TomlConfig::from_file(path)?)
        }
        None => None,
    };
    let settings = Settings::resolve(file.as_ref(), &cli.overrides())?;
    tracing::debug!("Resolved settings: {:?}", settings);

    match &cli.command {
        Command::Regions => {
            for profile in settings.profiles.iter() {
                let marker = if profile.region() == settings.region { "*" } else { " " };
                println!(
                    "{} {:<14} home-day {:>6.2} kg   car {:>5.3} kg/km   tree {:>5.1} kg/yr",
                    marker,
                    profile.region().slug(),
                    profile.home_day_kg(),
                    profile.car_kg_per_km(),
                    profile.tree_kg_per_year()
                );
            }
            Ok(0)
        }
        Command::Equivalents { co2, json } => {
            let snapshot = ImpactSnapshot::new("", *co2)?;
            let equivalents = compute(
                snapshot.co2_saved_kg(),
                settings.profiles.get(settings.region),
            );
            if *json {
                println!("{}", serde_json::to_string_pretty(&equivalents)?);
            } else {
                for line in equivalent_lines(&equivalents) {
                    println!("{}", line);
                }
            }
            Ok(0)
        }
        Command::Summary {
            snapshot,
            activity,
            json,
        } => {
            let app = GreenImpactApp::new(settings)?;
            print_summary(&app, snapshot, activity, *json)?;
            Ok(0)
        }
        Command::Save { snapshot } => {
            let app = GreenImpactApp::new(settings)?;
            let snapshot = to_snapshot(snapshot)?;
            Ok(report(app.pipeline().save_card(&snapshot).await))
        }
        Command::Share { snapshot } => {
            let app = GreenImpactApp::new(settings)?;
            let snapshot = to_snapshot(snapshot)?;
            Ok(report(app.pipeline().share_native(&snapshot).await))
        }
        Command::Intent { platform, snapshot } => {
            let app = GreenImpactApp::new(settings)?;
            let snapshot = to_snapshot(snapshot)?;
            Ok(report(app.pipeline().open_intent(*platform, &snapshot)))
        }
        Command::Preview { snapshot, then } => {
            let app = GreenImpactApp::new(settings)?;
            let snapshot = to_snapshot(snapshot)?;
            let pipeline = app.pipeline();

            let outcome = pipeline.preview(&snapshot).await;
            if !matches!(outcome, Outcome::Previewing { .. }) {
                return Ok(report(outcome));
            }
            report(outcome);

            let outcome = match then {
                PreviewAction::Share => pipeline.preview_share().await,
                PreviewAction::Download => pipeline.preview_download().await,
                PreviewAction::Dismiss => pipeline.close_preview(),
            };
            Ok(report(outcome))
        }
    }
}

fn to_snapshot(args: &SnapshotArgs) -> Result<ImpactSnapshot, GreenError> {
    ImpactSnapshot::new(args.name.clone(), args.co2)
}

fn print_summary(
    app: &GreenImpactApp,
    args: &SnapshotArgs,
    activity: &ActivityArgs,
    json: bool,
) -> Result<(), GreenError> {
    let snapshot = to_snapshot(args)?;
    let totals: ActivityTotals = activity.totals(snapshot.co2_saved_kg());
    let summary = app.summary(&snapshot, &totals);

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Your Green Impact ({})", summary.region);
    println!("{}", summary.headline);
    println!("You're making the Earth smile! 🌍");
    if summary.milestone_reached {
        println!("🍃 Milestone reached!");
    }
    println!();
    for line in &summary.lines {
        println!("  {}", line);
    }
    println!();
    println!("Trophy Wall");
    for trophy in &summary.trophies {
        let badge = match trophy.status {
            TrophyStatus::Unlocked => "Unlocked",
            TrophyStatus::Next => "Next",
        };
        println!("  [{:<8}] {}", badge, trophy.title);
    }
    Ok(())
}

/// 印出結果並回傳結束碼
fn report(outcome: Outcome) -> i32 {
    match &outcome {
        Outcome::Downloaded { location } => {
            println!("📁 {}", location);
            0
        }
        Outcome::Shared { tier } => {
            tracing::info!("✅ Shared via {:?}", tier);
            0
        }
        Outcome::Previewing { url } => {
            println!("🖼️  Preview: {}", url);
            0
        }
        Outcome::Opened { url } => {
            tracing::debug!("Opened {}", url);
            0
        }
        Outcome::Dismissed => 0,
        Outcome::Busy | Outcome::Discarded | Outcome::NoPreview => {
            tracing::warn!("Nothing to do: {:?}", outcome);
            0
        }
        Outcome::Failed { reason } => {
            tracing::debug!("Operation failed: {}", reason);
            2
        }
    }
}
