use crate::config::SettingsOverrides;
use crate::domain::model::{ActivityTotals, IntentPlatform, Region};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Debug, Clone, Parser)]
#[command(name = "green-commute")]
#[command(about = "Show your green commute impact and share it")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Page URL included in share texts and links
    #[arg(long, global = true)]
    pub page_url: Option<String>,

    /// Directory that receives downloaded share cards
    #[arg(long, global = true)]
    pub output_path: Option<String>,

    /// Share card pixel ratio (1-4)
    #[arg(long, global = true)]
    pub pixel_ratio: Option<f32>,

    /// Region used for the impact equivalents
    #[arg(long, global = true)]
    pub region: Option<Region>,

    /// External command used as the native share sheet (whitespace separated)
    #[arg(long, global = true)]
    pub share_command: Option<String>,

    /// Open share links in the system browser instead of printing them
    #[arg(long, global = true)]
    pub open: bool,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List regions and their conversion factors
    Regions,
    /// Convert a CO₂ amount into everyday equivalents
    Equivalents {
        #[arg(long)]
        co2: f64,
        #[arg(long)]
        json: bool,
    },
    /// Show the full impact summary with trophies
    Summary {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[command(flatten)]
        activity: ActivityArgs,
        #[arg(long)]
        json: bool,
    },
    /// Generate the share card and save it
    Save {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Share through the native share sheet, falling back to a download
    Share {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Open a platform's pre-filled post link
    Intent {
        platform: IntentPlatform,
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Generate a preview, then share, download or dismiss it
    Preview {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[arg(long, value_enum, default_value = "dismiss")]
        then: PreviewAction,
    },
}

#[derive(Debug, Clone, Args)]
pub struct SnapshotArgs {
    /// Display name shown on the share card
    #[arg(long, default_value = "Alex")]
    pub name: String,

    /// Kilograms of CO₂ saved
    #[arg(long, default_value_t = 123.4)]
    pub co2: f64,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ActivityArgs {
    #[arg(long, default_value_t = 0)]
    pub bike_trips: u32,
    #[arg(long, default_value_t = 0)]
    pub bus_rides: u32,
    #[arg(long, default_value_t = 0.0)]
    pub km_walked: f64,
    #[arg(long, default_value_t = 0)]
    pub streak_days: u32,
}

impl ActivityArgs {
    pub fn totals(&self, co2_saved_kg: f64) -> ActivityTotals {
        ActivityTotals {
            co2_saved_kg,
            bike_trips: self.bike_trips,
            bus_rides: self.bus_rides,
            km_walked: self.km_walked,
            streak_days: self.streak_days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PreviewAction {
    Share,
    Download,
    Dismiss,
}

impl CliConfig {
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            page_url: self.page_url.clone(),
            output_path: self.output_path.clone(),
            pixel_ratio: self.pixel_ratio,
            region: self.region,
            share_command: self
                .share_command
                .as_ref()
                .map(|command| command.split_whitespace().map(str::to_string).collect()),
            open_links: self.open.then_some(true),
        }
    }
}
