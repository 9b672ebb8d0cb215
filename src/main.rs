// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Panelroute-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Panelroute and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Panelroute CLI entrypoint.
//!
//! Loads a panel snapshot (or the built-in demo board), routes every wire and prints the result,
//! either as a text listing or as a standalone SVG. Set `RUST_LOG=panelroute=debug` to trace
//! cache and fallback behaviour.

use std::error::Error;
use std::path::Path;

use panelroute::model::{ConnectionId, ConnectorRef, PartId, Port};
use panelroute::ops::PanelOp;
use panelroute::store::PanelSnapshot;
use panelroute::{Config, PanelSession};
use tracing_subscriber::EnvFilter;

const DEMO_PANEL_WIDTH: f64 = 1100.0;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--config <file>] [--svg] [--save <file>] <snapshot.json>\n  {program} [--config <file>] [--svg] [--save <file>] --demo\n\nPrints one line per wire (`id[*] x,y x,y ...`, `*` marks manual wires).\n--svg prints a standalone SVG document instead.\n--save writes the loaded panel back out as a snapshot.\n--config overrides panel geometry and router tunables from a JSON file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    svg: bool,
    config_path: Option<String>,
    save_path: Option<String>,
    snapshot_path: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--svg" => {
                if options.svg {
                    return Err(());
                }
                options.svg = true;
            }
            "--config" => {
                if options.config_path.is_some() {
                    return Err(());
                }
                options.config_path = Some(args.next().ok_or(())?);
            }
            "--save" => {
                if options.save_path.is_some() {
                    return Err(());
                }
                options.save_path = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.snapshot_path.is_some() {
                    return Err(());
                }
                options.snapshot_path = Some(arg);
            }
        }
    }

    if options.demo == options.snapshot_path.is_some() {
        return Err(());
    }

    Ok(options)
}

fn connector(part_id: &str, port: Port) -> Result<ConnectorRef, Box<dyn Error>> {
    Ok(ConnectorRef::new(PartId::new(part_id)?, port))
}

fn place(part_id: &str, label: &str, rail_index: usize, x: f64) -> Result<PanelOp, Box<dyn Error>> {
    Ok(PanelOp::PlacePart {
        part_id: PartId::new(part_id)?,
        label: label.to_owned(),
        rail_index,
        x,
        width: 70.0,
        height: 120.0,
    })
}

fn connect(
    connection_id: &str,
    from: ConnectorRef,
    to: ConnectorRef,
    color: &str,
) -> Result<PanelOp, Box<dyn Error>> {
    Ok(PanelOp::AddConnection {
        connection_id: ConnectionId::new(connection_id)?,
        from,
        to,
        color: color.to_owned(),
    })
}

/// A main switch feeding three breakers on a second rail, plus one bridge between breakers.
fn demo_session(config: &Config) -> Result<PanelSession, Box<dyn Error>> {
    let mut session = PanelSession::new(config, DEMO_PANEL_WIDTH);
    let ops = vec![
        PanelOp::SetRailCount { rail_count: 2 },
        place("main", "Main switch", 0, 0.0)?,
        place("rcd", "RCD", 0, 250.0)?,
        place("b1", "B16 Lights", 1, 100.0)?,
        place("b2", "B16 Sockets", 1, 400.0)?,
        place("b3", "B20 Oven", 1, 600.0)?,
        connect("w1", connector("main", Port::Bottom)?, connector("b1", Port::Top)?, "#D32F2F")?,
        connect("w2", connector("main", Port::Bottom)?, connector("b2", Port::Top)?, "#D32F2F")?,
        connect("w3", connector("rcd", Port::Top)?, connector("b3", Port::Top)?, "#1976D2")?,
        connect("w4", connector("b1", Port::Bottom)?, connector("b3", Port::Bottom)?, "#388E3C")?,
    ];
    session.apply(&ops)?;
    Ok(session)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "panelroute".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_tracing();

        let config = match options.config_path.as_deref() {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        let mut session = match options.snapshot_path.as_deref() {
            Some(path) => {
                let panel = panelroute::store::load_panel(Path::new(path), config.panel)?;
                PanelSession::from_panel(panel, &config)
            }
            None => demo_session(&config)?,
        };

        if let Some(path) = options.save_path.as_deref() {
            panelroute::store::save_snapshot(Path::new(path), &PanelSnapshot::capture(session.panel()))?;
        }

        let wires = session.render_wires();
        let output = if options.svg {
            panelroute::render::svg_document(session.panel(), &wires)
        } else {
            panelroute::render::text_listing(&wires)
        };
        print!("{output}");

        tracing::debug!(wires = wires.len(), rev = session.panel().rev(), "rendered panel");
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("panelroute: {err}");
        std::process::exit(1);
    }
}
