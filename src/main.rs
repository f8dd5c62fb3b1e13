/* main.rs
 *
 * Copyright 2026 emviolet
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 *
 * SPDX-License-Identifier: GPL-3.0-or-later
 */

use std::io::{stdout, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::cursor::MoveTo;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType};

use cellthropic::engine::auto_foundation::{auto_foundation_all, FoundationLimit, ScanMethod};
use cellthropic::engine::cursor::{move_cursor, Direction};
use cellthropic::engine::{interaction, session};
use cellthropic::game::{Board, BoardConfig};
use cellthropic::sweep;

#[derive(Parser)]
#[command(name = "cellthropic", version, about = "FreeCell in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play interactively (the default).
    Play {
        /// Deal number; random when omitted.
        #[arg(long)]
        seed: Option<u32>,
        #[arg(long, default_value_t = 4)]
        cells: usize,
        #[arg(long, default_value_t = 8)]
        cascades: usize,
        /// Auto-foundation aggressiveness: "none", "current rank",
        /// "current rank + 1" or "current rank + 1.5".
        #[arg(long, default_value = "current rank + 1")]
        auto_limit: String,
        /// Auto-foundation scan order: "cell,cascade" or "foundation".
        #[arg(long, default_value = "cell,cascade")]
        scan: String,
    },
    /// Print the dealt board for a seed and exit.
    Show {
        #[arg(long)]
        seed: u32,
    },
    /// Survey a seed range for flourishes and check the catalog.
    Sweep {
        #[arg(long, default_value_t = 1)]
        from: u32,
        #[arg(long, default_value_t = 32000)]
        to: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command.unwrap_or(Command::Play {
        seed: None,
        cells: 4,
        cascades: 8,
        auto_limit: "current rank + 1".to_string(),
        scan: "cell,cascade".to_string(),
    }) {
        Command::Play {
            seed,
            cells,
            cascades,
            auto_limit,
            scan,
        } => {
            let limit = FoundationLimit::from_id(&auto_limit)
                .ok_or_else(|| anyhow::anyhow!("unknown auto-foundation limit {auto_limit:?}"))?;
            let method = ScanMethod::from_id(&scan)
                .ok_or_else(|| anyhow::anyhow!("unknown scan method {scan:?}"))?;
            play(seed, BoardConfig { cells, cascades }, limit, method)
        }
        Command::Show { seed } => show(seed),
        Command::Sweep { from, to } => run_sweep(from, to),
    }
}

fn show(seed: u32) -> Result<()> {
    let board = Board::new().shuffle(seed)?.deal_all();
    print!("{}", session::print(&board));
    Ok(())
}

fn run_sweep(from: u32, to: u32) -> Result<()> {
    let summary = sweep::run_sweep(from, to);
    println!("{}", sweep::msg_sweep_summary(&summary));
    for (seed, computed, catalogued) in &summary.mismatches {
        println!("{}", sweep::msg_sweep_mismatch(*seed, *computed, *catalogued));
    }
    Ok(())
}

fn play(
    seed: Option<u32>,
    config: BoardConfig,
    limit: FoundationLimit,
    method: ScanMethod,
) -> Result<()> {
    let fresh = Board::with_config(config)?;
    let board = match seed {
        Some(seed) => fresh.shuffle(seed)?,
        None => fresh.shuffle_random()?,
    }
    .deal_all();

    terminal::enable_raw_mode()?;
    let outcome = play_loop(board, limit, method);
    terminal::disable_raw_mode()?;
    outcome
}

fn play_loop(mut board: Board, limit: FoundationLimit, method: ScanMethod) -> Result<()> {
    let mut out = stdout();
    loop {
        render(&mut out, &board)?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind == KeyEventKind::Release {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            break;
        }

        board = match key.code {
            KeyCode::Up => move_cursor(&board, Direction::Up),
            KeyCode::Down => move_cursor(&board, Direction::Down),
            KeyCode::Left => move_cursor(&board, Direction::Left),
            KeyCode::Right => move_cursor(&board, Direction::Right),
            KeyCode::Esc => interaction::clear_selection(&board),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if board.deck().is_empty() {
                    interaction::touch(&board)
                } else {
                    board.deal_all()
                }
            }
            KeyCode::Char('q') => break,
            KeyCode::Char('z') => interaction::undo(&board),
            KeyCode::Char('n') => Board::with_config(board.config())?
                .shuffle_random()?
                .deal_all(),
            KeyCode::Char('m') => auto_foundation_all(&board, limit, method),
            KeyCode::Char(code) => interaction::touch_by_position(&board, code),
            _ => board,
        };
    }
    Ok(())
}

fn render(out: &mut impl Write, board: &Board) -> Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    for line in session::print(board).lines() {
        queue!(out, Print(line), Print("\r\n"))?;
    }
    queue!(
        out,
        Print("\r\n"),
        Print("arrows move · space touches · a-f/h/1-0 jump · m auto · z undo · n new · q quits\r\n")
    )?;
    out.flush()?;
    Ok(())
}
