extern crate clap;
#[macro_use] extern crate log;
extern crate fern;
extern crate chrono;
extern crate term_grid;

pub mod assembler;

use clap::{Arg, ArgMatches, App, ErrorKind};
use term_grid::{Grid, GridOptions, Direction, Filling, Cell};

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn main() {
    let args = process_arguments();
    initialize_logging(args.occurrences_of("verbose"));

    debug!("Arguments:\n\tVerbosity: {}\n\tPrint Debug: {}\n\tInfile: {}\n\tOutfile: {}",
        level_filter(args.occurrences_of("verbose")),
        args.is_present("print-debug"),
        args.value_of("INPUT").unwrap_or("None"),
        args.value_of("OUTPUT").unwrap_or("None")
    );

    // Both are required, clap has already rejected a missing one.
    let ipath = Path::new(args.value_of("INPUT").unwrap_or_default());
    let opath = Path::new(args.value_of("OUTPUT").unwrap_or_default());

    let ifile = match File::open(&ipath) {
        Err(err) => {
            debug!("unable to open `{}`: {:?}", ipath.display(), err.kind());
            eprintln!("{}", file_error(&ipath, &err));
            std::process::exit(1);
        },
        Ok(file) => file,
    };

    let mut ofile = match File::create(&opath) {
        Err(err) => {
            debug!("unable to open `{}`: {:?}", opath.display(), err.kind());
            eprintln!("{}", file_error(&opath, &err));
            std::process::exit(1);
        },
        Ok(file) => BufWriter::new(file),
    };

    let mut grid = if args.is_present("print-debug") {
        Some(Grid::new(GridOptions {
            filling:     Filling::Spaces(1),
            direction:   Direction::LeftToRight,
        }))
    } else {
        None
    };

    let parser = assembler::parser::Parser::new(ifile);
    let mut count: usize = 0;

    for ins in parser {
        let ins = match ins {
            Ok(ins) => ins,
            Err(err) => {
                // Keep whatever was translated before the error.
                if let Err(e) = ofile.flush() {
                    warn!("unable to flush output file `{}`: {}", opath.display(), e);
                }
                debug!("stopped on {:?} error at {}", err.kind(), err.position());
                eprintln!("{}", err);
                std::process::exit(1);
            },
        };

        if let Err(err) = ins.assemble(&mut ofile) {
            error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
            std::process::exit(1);
        }

        if let Some(grid) = grid.as_mut() {
            let mut line = Vec::new();
            // Writing into a Vec cannot fail.
            ins.assemble(&mut line).ok();
            grid.add(Cell::from(format!("0x{:04X}:", count)));
            grid.add(Cell::from(format!("{}", ins)));
            grid.add(Cell::from("=>".to_string()));
            grid.add(Cell::from(String::from_utf8_lossy(&line).trim_end().to_string()));
        }
        count += 1;
    }

    if let Err(err) = ofile.flush() {
        error!("fatal: unable to write to output file `{}`: {}", opath.display(), err);
        std::process::exit(1);
    }

    if let Some(grid) = grid {
        println!("{}", grid.fit_into_columns(4));
    }

    info!("translated {} instruction(s) from `{}` into `{}`", count, ipath.display(), opath.display());
}

fn process_arguments() -> ArgMatches<'static> {
    let app = App::new(option_env!("CARGO_PKG_NAME").unwrap_or("hyasm"))
        .version(option_env!("CARGO_PKG_VERSION").unwrap_or("0.1.0"))
        .author(option_env!("CARGO_PKG_AUTHORS").unwrap_or(""))
        .about(option_env!("CARGO_PKG_DESCRIPTION").unwrap_or(""))
        .arg(Arg::with_name("INPUT")
            .help("Sets the source file to translate")
            .required(true)
            .multiple(false)
            .index(1))
        .arg(Arg::with_name("OUTPUT")
            .help("Sets the destination file for the hyeong code")
            .required(true)
            .multiple(false)
            .index(2))
        .arg(Arg::with_name("verbose")
            .short("v")
            .multiple(true)
            .takes_value(false)
            .help("Sets the level of verbosity"))
        .arg(Arg::with_name("print-debug")
            .short("d")
            .long("print-debug")
            .takes_value(false)
            .help("prints every instruction alongside its hyeong code to STDOUT"));

    match app.get_matches_safe() {
        Ok(matches) => matches,
        Err(err) => match err.kind {
            ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
            _ => {
                // Usage goes to STDOUT, not clap's default STDERR.
                println!("{}", err.message);
                std::process::exit(1);
            },
        },
    }
}

fn initialize_logging(verbosity: u64) {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(level_filter(verbosity))
        .chain(std::io::stderr())
        .apply().ok();
}

fn level_filter(verbosity: u64) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Warn,
        2 => log::LevelFilter::Info,
        3 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}

/// `path: reason`, the way perror reports a failed open.
fn file_error(path: &Path, err: &io::Error) -> String {
    format!("{}: {}", path.display(), err)
}
