use std::io;
use std::io::Write;

use crate::engine::DistanceTable;
use crate::engine::Goal;

/// Writes the distances a run produced for `goal`.
///
/// All distances: one `v:d` line per vertex, `v:*` when unreachable.
/// One distance: a single sentence about the destination.
pub fn report<W: Write>(out: &mut W, table: &DistanceTable, goal: Goal) -> io::Result<()> {
    match goal {
        Goal::AllDistances => {
            for (v, d) in table.iter() {
                match d {
                    Some(d) => writeln!(out, "{v}:{d}")?,
                    None => writeln!(out, "{v}:*")?,
                }
            }
        }
        Goal::OneDistance(destination) => match table.get(destination) {
            Some(d) => writeln!(out, "distance from 0 to {destination} is {d}")?,
            None => writeln!(out, "no path to vertex {destination}")?,
        },
    }
    Ok(())
}
