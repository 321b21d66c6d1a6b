//! Human readable dumps of a grid, for interactive inspection.

use super::*;
use crate::partition::BlockRange;
use crossterm::style::{Color, Stylize};
use std::io::prelude::*;

const BLOCK_COLORS: [Color; 6] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
];

/// Tab separated table with ten decimal places.
pub fn write_table<W: Write, G: GridView>(
    output: &mut W,
    grid: &G,
) -> std::io::Result<()> {
    let size = grid.size();
    for row in 0..size {
        for column in 0..size {
            let r = grid.value_linear(row * size + column);
            write!(output, "{r:.10}\t")?;
        }
        writeln!(output)?;
    }
    writeln!(output)
}

pub fn print_grid<G: GridView>(grid: &G) {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    // Nothing useful to do if stdout is gone.
    let _ = write_table(&mut lock, grid);
}

/// Start and end index of every block.
pub fn write_block_listing<W: Write>(
    output: &mut W,
    blocks: &[BlockRange],
) -> std::io::Result<()> {
    for (i, block) in blocks.iter().enumerate() {
        writeln!(output, "Block {i}:")?;
        writeln!(output, "    {} {}", "Start index:".green(), block.start)?;
        writeln!(output, "    {} {}", "End index:".red(), block.end)?;
        writeln!(output, "    {} {}", "Cells:".dark_grey(), block.len())?;
    }
    Ok(())
}

/// Grid values colored by the block that owns them.
/// Cells outside every block are left plain.
pub fn write_block_highlight<W: Write, G: GridView>(
    output: &mut W,
    grid: &G,
    blocks: &[BlockRange],
) -> std::io::Result<()> {
    let size = grid.size();
    for row in 0..size {
        for column in 0..size {
            let linear_index = row * size + column;
            let text = format!("{:.6}", grid.value_linear(linear_index));
            match blocks.iter().position(|b| b.contains(linear_index)) {
                Some(b) => {
                    let color = BLOCK_COLORS[b % BLOCK_COLORS.len()];
                    write!(output, "{}, ", text.with(color))?
                }
                None => write!(output, "{text}, ")?,
            }
        }
        writeln!(output)?;
    }
    writeln!(output)
}

/// Block listing followed by the grid colored by block.
pub fn write_blocks<W: Write, G: GridView>(
    output: &mut W,
    grid: &G,
    blocks: &[BlockRange],
) -> std::io::Result<()> {
    write_block_listing(output, blocks)?;
    write_block_highlight(output, grid, blocks)
}

pub fn print_blocks<G: GridView>(
    grid: &G,
    blocks: &[BlockRange],
) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    write_blocks(&mut lock, grid, blocks)?;
    lock.flush()
}
