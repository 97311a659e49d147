#![deny(
    warnings,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo
)]
#![allow(clippy::multiple_crate_versions)]

use anyhow::Result;
use clap::Parser;
use redadeg::session::{SessionController, WorkoutForm};
use redadeg::storage::JsonFileStore;
use redadeg::term::{CliPosition, TermList, TermMap};
use redadeg::types::Coordinates;
use redadeg::{cli, utils};

#[macro_use]
extern crate redadeg;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    utils::init_logging(cli.verbose, cli.quiet);

    let position = match (cli.lat, cli.lon) {
        (Some(lat), Some(lon)) => Some(Coordinates { lat, lon }),
        _ => None,
    };

    let kv = JsonFileStore::open(&cli.store)?;
    let mut session = SessionController::new(
        CliPosition(position),
        TermMap,
        TermList::new(cli.details),
        kv,
    );

    match cli.cmd {
        Some(cli::Cmd::Add {
            kind,
            at_lat,
            at_lon,
            distance,
            duration,
            cadence,
            elevation,
        }) => {
            dlog!("mode=add kind={kind:?} at={at_lat},{at_lon}");
            session.start()?;

            let form = WorkoutForm {
                kind: kind.into(),
                coordinates: Coordinates {
                    lat: at_lat,
                    lon: at_lon,
                },
                distance_km: distance,
                duration_min: duration,
                cadence_spm: cadence,
                elevation_gain_m: elevation,
            };
            let record = session.submit(&form)?;

            println!(
                "recorded {} ({:.1} {})",
                record.description,
                record.metric,
                record.kind().metric_unit()
            );
            Ok(())
        }
        Some(cli::Cmd::Activate { id }) => {
            dlog!("mode=activate id={id}");
            session.start()?;
            session.activate(&id)?;
            Ok(())
        }
        None => {
            dlog!("mode=list store={}", cli.store.display());
            session.start()?;
            if session.store().is_empty() {
                println!("No workouts logged yet. Use `redadeg add` to record one.");
            }
            Ok(())
        }
    }
}
