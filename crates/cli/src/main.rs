//! `warehouse` command-line front end.

mod cli;
mod output;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::debug;

use warehouse_infra::{FileWarehouseRepository, WarehouseConfig};
use warehouse_inventory::{BoxSpec, WarehouseRepository, WarehouseService};

use crate::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = WarehouseConfig::from_env().context("invalid configuration")?;
    if let Some(path) = cli.data_file.clone() {
        config.data_file = path;
    }
    warehouse_observability::init(config.log_format);
    debug!(data_file = %config.data_file.display(), "starting");

    let repository = FileWarehouseRepository::new(&config.data_file);
    let mut service = WarehouseService::new(repository)
        .with_context(|| format!("failed to load {}", config.data_file.display()))?;

    let mutates = cli.command.mutates();
    let report = run(&mut service, cli.command, &config, cli.json)?;
    if mutates {
        service
            .save()
            .with_context(|| format!("failed to save {}", config.data_file.display()))?;
    }

    print!("{report}");
    Ok(())
}

/// Execute one command against the service and render its result.
fn run<R: WarehouseRepository>(
    service: &mut WarehouseService<R>,
    command: Command,
    config: &WarehouseConfig,
    json: bool,
) -> Result<String> {
    let report = match command {
        Command::List => {
            let pallets = service.all_pallets_sorted();
            render(json, &output::pallet_views(&pallets), || output::pallets_text(&pallets))?
        }
        Command::Groups => {
            let groups = service.pallets_grouped_by_expiry();
            render(json, &output::group_views(&groups), || output::groups_text(&groups))?
        }
        Command::Top { count } => {
            let count = count.unwrap_or(config.top_count);
            let pallets = service.top_pallets_by_box_expiry(count);
            render(json, &output::pallet_views(&pallets), || output::pallets_text(&pallets))?
        }
        Command::Show { pallet_id } => {
            let Some(pallet) = service.pallet_by_id(pallet_id) else {
                bail!("pallet {pallet_id} not found");
            };
            render(json, &output::PalletView::from(pallet), || output::pallet_text(pallet))?
        }
        Command::AddPallet { width, height, depth } => {
            let pallet = service.add_pallet(width, height, depth)?;
            render(json, &output::PalletView::from(pallet), || {
                format!("Added pallet {}.\n", pallet.id())
            })?
        }
        Command::RemovePallet { pallet_id } => {
            if !service.remove_pallet(pallet_id) {
                bail!("pallet {pallet_id} not found");
            }
            format!("Removed pallet {pallet_id}.\n")
        }
        Command::AddBox {
            pallet_id,
            width,
            height,
            depth,
            weight,
            produced,
            expires,
        } => {
            let spec = match (produced, expires) {
                (Some(date), None) => BoxSpec::produced_on(width, height, depth, weight, date),
                (None, Some(date)) => BoxSpec::expiring_on(width, height, depth, weight, date),
                _ => bail!("give exactly one of --produced or --expires"),
            };
            let carton = service.add_box_to_pallet(pallet_id, spec)?;
            render(json, &output::BoxView::from(&carton), || {
                format!("Added box {} to pallet {pallet_id}.\n", carton.id())
            })?
        }
        Command::RemoveBox { pallet_id, box_id } => {
            if !service.remove_box_from_pallet(pallet_id, box_id) {
                bail!("box {box_id} not found on pallet {pallet_id}");
            }
            format!("Removed box {box_id} from pallet {pallet_id}.\n")
        }
    };
    Ok(report)
}

fn render<T, F>(json: bool, view: &T, text: F) -> Result<String>
where
    T: serde::Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        let mut rendered = output::to_json(view).context("failed to encode JSON output")?;
        rendered.push('\n');
        Ok(rendered)
    } else {
        Ok(text())
    }
}
