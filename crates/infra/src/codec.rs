//! Line codec for the flat-file pallet format.
//!
//! One record per line, pipe-delimited:
//!
//! ```text
//! P|id|width|height|depth|boxCount
//! B|id|width|height|depth|weight|productionDate-or-empty|expiryDate
//! ```
//!
//! Box lines attach to the most recent pallet line. Dates are `YYYY-MM-DD`.

use std::fmt::Write as _;

use chrono::NaiveDate;
use tracing::warn;

use warehouse_core::{DomainError, IdAllocator};
use warehouse_inventory::{BoxSpec, InventoryBox, Pallet, RepositoryError};

const DATE_FORMAT: &str = "%Y-%m-%d";
const PALLET_TAG: &str = "P";
const BOX_TAG: &str = "B";
const PALLET_FIELDS: usize = 6;
const BOX_FIELDS: usize = 8;

/// Render `pallets` with every line newline-terminated.
pub fn encode(pallets: &[Pallet]) -> String {
    let mut out = String::new();
    for pallet in pallets {
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            "{PALLET_TAG}|{}|{}|{}|{}|{}",
            pallet.id(),
            pallet.width(),
            pallet.height(),
            pallet.depth(),
            pallet.boxes().len()
        );
        for carton in pallet.boxes() {
            let produced = carton
                .production_date()
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "{BOX_TAG}|{}|{}|{}|{}|{}|{}|{}",
                carton.id(),
                carton.width(),
                carton.height(),
                carton.depth(),
                carton.weight(),
                produced,
                carton.expiry_date().format(DATE_FORMAT)
            );
        }
    }
    out
}

/// Parse the flat-file format back into pallets, in file order.
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn decode(input: &str) -> Result<Vec<Pallet>, RepositoryError> {
    let mut ids = IdAllocator::new();
    let mut pallets: Vec<Pallet> = Vec::new();
    let mut declared: Option<(usize, usize)> = None;

    for (index, raw) in input.lines().enumerate() {
        let line = index + 1;
        let record = raw.trim_end_matches('\r');
        if record.trim().is_empty() {
            continue;
        }

        let fields: Vec<&str> = record.split('|').collect();
        match fields[0] {
            PALLET_TAG => {
                check_box_count(&pallets, declared);
                let (pallet, count) = decode_pallet(&mut ids, line, &fields)?;
                declared = Some((line, count));
                pallets.push(pallet);
            }
            BOX_TAG => {
                let pallet = pallets.last_mut().ok_or_else(|| {
                    RepositoryError::malformed(line, "box record before any pallet record")
                })?;
                let carton = decode_box(&mut ids, line, &fields)?;
                pallet.add_box(carton).map_err(|source| domain(line, source))?;
            }
            other => {
                return Err(RepositoryError::malformed(
                    line,
                    format!("unknown record tag {other:?}"),
                ));
            }
        }
    }
    check_box_count(&pallets, declared);

    Ok(pallets)
}

fn decode_pallet(
    ids: &mut IdAllocator,
    line: usize,
    fields: &[&str],
) -> Result<(Pallet, usize), RepositoryError> {
    expect_fields(line, fields, PALLET_FIELDS)?;
    let id = parse_id(line, "pallet id", fields[1])?;
    let width = parse_number(line, "width", fields[2])?;
    let height = parse_number(line, "height", fields[3])?;
    let depth = parse_number(line, "depth", fields[4])?;
    let count = fields[5]
        .trim()
        .parse::<usize>()
        .map_err(|e| RepositoryError::malformed(line, format!("box count {:?}: {e}", fields[5])))?;

    let pallet =
        Pallet::with_id(ids, id, width, height, depth).map_err(|source| domain(line, source))?;
    Ok((pallet, count))
}

fn decode_box(
    ids: &mut IdAllocator,
    line: usize,
    fields: &[&str],
) -> Result<InventoryBox, RepositoryError> {
    expect_fields(line, fields, BOX_FIELDS)?;
    let id = parse_id(line, "box id", fields[1])?;
    let width = parse_number(line, "width", fields[2])?;
    let height = parse_number(line, "height", fields[3])?;
    let depth = parse_number(line, "depth", fields[4])?;
    let weight = parse_number(line, "weight", fields[5])?;
    let expiry = parse_date(line, "expiry date", fields[7])?;

    let spec = if fields[6].trim().is_empty() {
        BoxSpec::expiring_on(width, height, depth, weight, expiry)
    } else {
        let produced = parse_date(line, "production date", fields[6])?;
        BoxSpec::produced_on(width, height, depth, weight, produced)
    };

    let carton = InventoryBox::with_id(ids, id, spec).map_err(|source| domain(line, source))?;
    if carton.expiry_date() != expiry {
        warn!(
            line,
            box_id = %carton.id(),
            stored = %expiry,
            derived = %carton.expiry_date(),
            "stored expiry disagrees with production date; using derived expiry"
        );
    }
    Ok(carton)
}

fn check_box_count(pallets: &[Pallet], declared: Option<(usize, usize)>) {
    if let (Some(pallet), Some((line, count))) = (pallets.last(), declared) {
        if pallet.boxes().len() != count {
            warn!(
                line,
                pallet_id = %pallet.id(),
                declared = count,
                actual = pallet.boxes().len(),
                "pallet box count does not match its box records"
            );
        }
    }
}

fn expect_fields(line: usize, fields: &[&str], expected: usize) -> Result<(), RepositoryError> {
    if fields.len() != expected {
        return Err(RepositoryError::malformed(
            line,
            format!("expected {expected} fields, found {}", fields.len()),
        ));
    }
    Ok(())
}

fn parse_id(line: usize, what: &str, field: &str) -> Result<i64, RepositoryError> {
    field
        .trim()
        .parse::<i64>()
        .map_err(|e| RepositoryError::malformed(line, format!("{what} {field:?}: {e}")))
}

fn parse_number(line: usize, what: &str, field: &str) -> Result<f64, RepositoryError> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| RepositoryError::malformed(line, format!("{what} {field:?}: {e}")))
}

fn parse_date(line: usize, what: &str, field: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(field.trim(), DATE_FORMAT)
        .map_err(|e| RepositoryError::malformed(line, format!("{what} {field:?}: {e}")))
}

fn domain(line: usize, source: DomainError) -> RepositoryError {
    RepositoryError::Domain { line, source }
}
