//! Pick-path planning.
//!
//! Takes newline-separated bin-location identifiers, parses each line,
//! sorts them by the composite warehouse key (aisle, facing bay pair,
//! position, level) and applies the serpentine walking convention: the
//! picker traverses every other aisle in reverse so consecutive aisles are
//! walked in alternating directions.

use crate::models::BinLocation;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// A malformed input line, reported but never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseWarning {
    /// 1-based line number in the input
    pub line: usize,
    /// The offending line content
    pub content: String,
    /// Why it was rejected
    pub reason: String,
}

/// One stop in the ordered pick sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickStop {
    /// 1-based walking order
    pub sequence: usize,
    /// The bin being visited
    #[serde(flatten)]
    pub location: BinLocation,
}

/// Result of planning a pick path over a batch of identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickPlan {
    /// Stops in walking order
    pub stops: Vec<PickStop>,
    /// Lines that failed to parse
    pub warnings: Vec<ParseWarning>,
}

impl PickPlan {
    /// Number of distinct aisles visited.
    #[must_use]
    pub fn aisle_count(&self) -> usize {
        let mut aisles: Vec<u32> = self.stops.iter().map(|s| s.location.aisle).collect();
        aisles.sort_unstable();
        aisles.dedup();
        aisles.len()
    }

    /// Formats the plan as an aligned text table.
    #[must_use]
    pub fn format_table(&self) -> String {
        let mut out = String::new();
        out.push_str("  Seq  Location      Aisle  Position  Level\n");
        out.push_str("  ---  ------------  -----  --------  -----\n");
        for stop in &self.stops {
            out.push_str(&format!(
                "  {:>3}  {:<12}  {:>5}  {:>8}  {:>5}\n",
                stop.sequence,
                stop.location.raw,
                stop.location.aisle,
                stop.location.position,
                stop.location.level
            ));
        }
        out
    }

    /// Writes the plan as CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns an error if serializing a record fails.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["sequence", "location", "aisle", "position", "level"])?;
        for stop in &self.stops {
            csv_writer.write_record([
                stop.sequence.to_string(),
                stop.location.raw.clone(),
                stop.location.aisle.to_string(),
                stop.location.position.to_string(),
                stop.location.level.to_string(),
            ])?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Plans a pick path over newline-separated bin-location identifiers.
///
/// Blank lines are skipped; malformed lines are collected as warnings with
/// their 1-based line number. With `serpentine` enabled, every other visited
/// aisle is walked in descending position order.
#[must_use]
pub fn plan_pick_path(input: &str, serpentine: bool) -> PickPlan {
    let mut locations = Vec::new();
    let mut warnings = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        match BinLocation::parse(trimmed) {
            Ok(location) => locations.push(location),
            Err(error) => warnings.push(ParseWarning {
                line: index + 1,
                content: trimmed.to_string(),
                reason: error.to_string(),
            }),
        }
    }

    locations.sort_by_key(BinLocation::sort_key);

    if serpentine {
        reverse_alternating_aisles(&mut locations);
    }

    let stops = locations
        .into_iter()
        .enumerate()
        .map(|(index, location)| PickStop {
            sequence: index + 1,
            location,
        })
        .collect();

    PickPlan { stops, warnings }
}

/// Reverses every other aisle group in a list already sorted by aisle.
///
/// The first visited aisle keeps ascending order; the second is reversed,
/// and so on. Purely a presentation convention: which aisles flip depends
/// only on visit order, not on aisle numbering.
fn reverse_alternating_aisles(locations: &mut [BinLocation]) {
    let mut start = 0;
    let mut group_index = 0;
    while start < locations.len() {
        let aisle = locations[start].aisle;
        let end = locations[start..]
            .iter()
            .position(|loc| loc.aisle != aisle)
            .map_or(locations.len(), |offset| start + offset);

        if group_index % 2 == 1 {
            locations[start..end].reverse();
        }
        start = end;
        group_index += 1;
    }
}
