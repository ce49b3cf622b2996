use std::env;
use std::process;

use passpanel::cli::{self, CliFlags};
use passpanel::pass::RandomGenerator;
use passpanel::panel::{self, Panel};
use passpanel::terminal::print_error;
use passpanel::{Error, Result, exits, rand, tui};

fn main() {
    exits::reset_terminal();
    exits::install_handlers();
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0) };

    if let Err(e) = run() {
        print_error(&e.to_string());
        if matches!(e, Error::Args(_)) {
            eprintln!("Try 'passpanel --help' for more information.");
        }
        process::exit(e.exit_code());
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let flags = cli::parse(&args)?;

    if flags.help {
        tui::print_help();
        return Ok(());
    }
    if flags.version {
        println!("passpanel {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    cli::init_logging(flags.log_level.as_deref());
    start(&flags)
}

fn start(flags: &CliFlags) -> Result<()> {
    if flags.urandom && !rand::enable_urandom() {
        print_error("/dev/urandom not available, using hardware entropy");
    }

    let config = flags.config();
    tracing::info!(
        length = config.length,
        passwords = config.number_of_passwords,
        classes = config.classes.len(),
        "starting panel"
    );

    let (doc, layout) = panel::build(&config);
    let mut panel = Panel::new(doc, layout, RandomGenerator, config.number_of_passwords)?;

    tui::run(&mut panel);
    Ok(())
}
