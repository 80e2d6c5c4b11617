// Copyright 2025. Replay CLI for lasso-trace gestures.
//
// Usage:
//   trace-replay line <x1> <y1> <x2> <y2>
//   trace-replay close <x,y>... [--min-vertices N] [--size WxH] [-o <output.bmp|raw>]
//
// Add -v for debug output or -vv for trace output on stderr.

use lasso_trace::{rasterize, PathStorage, PointI, TraceConfig};
use std::path::Path;
use std::process;
use trace_replay::{parse_point, parse_size, render_loop, save_image, LoopReport};

// ============================================================================
// Logging
// ============================================================================

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbosity: usize) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER)
        .map(|()| log::set_max_level(level))
        .is_err()
    {
        eprintln!("Logger already installed");
    }
}

// ============================================================================
// Commands
// ============================================================================

fn main() {
    let mut verbosity = 0;
    let args: Vec<String> = std::env::args()
        .filter(|a| match a.as_str() {
            "-v" => {
                verbosity += 1;
                false
            }
            "-vv" => {
                verbosity += 2;
                false
            }
            _ => true,
        })
        .collect();
    init_logging(verbosity);

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "line" => cmd_line(&args[2..]),
        "close" => cmd_close(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("trace-replay - Replay free-hand gestures through lasso-trace");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  line <x1> <y1> <x2> <y2>");
    eprintln!("      Print the rasterized run between two grid points.");
    eprintln!();
    eprintln!("  close <x,y>... [--min-vertices N] [--size WxH] [-o <output.bmp|raw>]");
    eprintln!("      Trace the anchors, close the path and report the extracted loop.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, -vv    Debug or trace logging on stderr.");
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn cmd_line(args: &[String]) {
    if args.len() != 4 {
        fail("Usage: trace-replay line <x1> <y1> <x2> <y2>");
    }
    let mut coords = [0i32; 4];
    for (slot, arg) in coords.iter_mut().zip(args) {
        *slot = arg
            .parse()
            .unwrap_or_else(|_| fail(format!("Invalid coordinate: {}", arg)));
    }
    let run = rasterize(
        PointI::new(coords[0], coords[1]),
        PointI::new(coords[2], coords[3]),
    )
    .unwrap_or_else(|e| fail(e));

    println!("{} points", run.len());
    for p in &run {
        println!("  ({}, {})", p.x, p.y);
    }
}

fn cmd_close(args: &[String]) {
    let mut anchors = Vec::new();
    let mut config = TraceConfig::new();
    let mut size: Option<(u32, u32)> = None;
    let mut output_path: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--min-vertices" if i + 1 < args.len() => {
                let n = args[i + 1]
                    .parse()
                    .unwrap_or_else(|_| fail(format!("Invalid vertex count: {}", args[i + 1])));
                config = config.with_min_vertices(n);
                i += 2;
            }
            "--size" if i + 1 < args.len() => {
                size = Some(
                    parse_size(&args[i + 1])
                        .unwrap_or_else(|| fail(format!("Invalid size: {}", args[i + 1]))),
                );
                i += 2;
            }
            "-o" if i + 1 < args.len() => {
                output_path = Some(args[i + 1].clone());
                i += 2;
            }
            arg => {
                anchors.push(
                    parse_point(arg).unwrap_or_else(|| fail(format!("Invalid anchor: {}", arg))),
                );
                i += 1;
            }
        }
    }

    if let Some((w, h)) = size {
        config = config.with_surface(w, h);
    }

    let path = PathStorage::from_anchors(anchors, &config).unwrap_or_else(|e| fail(e));
    let trace = path.points().to_vec();
    println!("path: {} points, {} vertices", path.len(), path.vertex_count());

    let lasso = path.close(&config).unwrap_or_else(|e| {
        fail(format!("Error {}: {}", e.code(), e));
    });
    println!("{}", LoopReport(&lasso));

    if let Some(output) = output_path {
        let (w, h) = size.unwrap_or_else(|| {
            let (x2, y2) = lasso.bounding_rect().map_or((0, 0), |r| (r.x2, r.y2));
            ((x2.max(0) + 1) as u32, (y2.max(0) + 1) as u32)
        });
        let buf = render_loop(w, h, &trace, &lasso);
        if let Err(e) = save_image(Path::new(&output), &buf) {
            fail(format!("Failed to save image: {}", e));
        }
        println!("Saved: {}", output);
    }
}
