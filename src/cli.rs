use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::types::WorkoutKind;

const DEFAULT_STORE_FILE: &str = "redadeg.json";

#[derive(Parser, Debug)]
#[command(
    name = "redadeg",
    about = "Log running and cycling workouts with computed pace/speed and map markers"
)]
pub struct Cli {
    /// JSON file the workouts are persisted in.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_STORE_FILE, global = true)]
    pub store: PathBuf,

    /// Your latitude, used to center the map (needs --lon). Without a
    /// position the map features stay disabled.
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Your longitude, used to center the map (needs --lat).
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Show row number, id and raw fields for every workout.
    #[arg(long)]
    pub details: bool,

    /// Increase log verbosity (-v, -vv). Defaults to INFO.
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Decrease log verbosity (-q, -qq). Defaults to INFO.
    #[arg(short = 'q', long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Record a workout at a picked map point.
    Add {
        #[arg(value_enum)]
        kind: KindArg,

        /// Latitude of the picked point.
        #[arg(value_name = "LAT", allow_negative_numbers = true)]
        at_lat: f64,

        /// Longitude of the picked point.
        #[arg(value_name = "LON", allow_negative_numbers = true)]
        at_lon: f64,

        /// Distance covered, in km.
        #[arg(long)]
        distance: f64,

        /// Duration, in minutes.
        #[arg(long)]
        duration: f64,

        /// Cadence in steps/min (running).
        #[arg(long)]
        cadence: Option<f64>,

        /// Elevation gain in metres, may be negative (cycling).
        #[arg(long, allow_negative_numbers = true)]
        elevation: Option<f64>,
    },

    /// Select a workout again, bumping its interaction counter.
    Activate {
        /// Workout id, as shown by the list with --details.
        id: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum KindArg {
    Running,
    Cycling,
}

impl From<KindArg> for WorkoutKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Running => Self::Running,
            KindArg::Cycling => Self::Cycling,
        }
    }
}
