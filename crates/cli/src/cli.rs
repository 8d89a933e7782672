//! CLI definition using clap

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, Subcommand};
use warehouse_core::{BoxId, PalletId};

#[derive(Debug, Parser)]
#[command(name = "warehouse")]
#[command(version)]
#[command(about = "Track pallets, the boxes on them and when they expire")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Data file path. Uses WAREHOUSE_DATA_FILE or ./warehouse.txt if not specified.
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every pallet ordered by expiry, then weight
    List,

    /// List pallets grouped by expiry date
    Groups,

    /// Pallets holding the latest-expiring boxes, smallest volume first
    Top {
        /// How many pallets to show. Uses WAREHOUSE_TOP_COUNT if not specified.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },

    /// Show one pallet and its boxes
    Show {
        pallet_id: PalletId,
    },

    /// Add an empty pallet
    AddPallet {
        width: f64,
        height: f64,
        depth: f64,
    },

    /// Remove a pallet and everything on it
    RemovePallet {
        pallet_id: PalletId,
    },

    /// Put a new box on a pallet
    #[command(group(ArgGroup::new("date").required(true).args(["produced", "expires"])))]
    AddBox {
        pallet_id: PalletId,
        width: f64,
        height: f64,
        depth: f64,
        weight: f64,

        /// Production date (YYYY-MM-DD); expiry is derived from it
        #[arg(long)]
        produced: Option<NaiveDate>,

        /// Explicit expiry date (YYYY-MM-DD)
        #[arg(long)]
        expires: Option<NaiveDate>,
    },

    /// Take a box off a pallet
    RemoveBox {
        pallet_id: PalletId,
        box_id: BoxId,
    },
}

impl Command {
    /// Whether the command changes the warehouse and must be saved afterwards.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::AddPallet { .. }
                | Command::RemovePallet { .. }
                | Command::AddBox { .. }
                | Command::RemoveBox { .. }
        )
    }
}
