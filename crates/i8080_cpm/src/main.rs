use anyhow::{bail, Context, Result};
use i8080::UndocumentedOpcodes;
use i8080_cpm::{read_rom, RunConfig, StopReason};

const USAGE: &str = "Usage: i8080_cpm <program.com> [--debug] [--strict] [--max-cycles N]";

fn main() -> Result<()> {
    env_logger::init();

    let mut rom_path = None;
    let mut debug = false;
    let mut strict = false;
    let mut max_cycles = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--debug" => debug = true,
            "--strict" => strict = true,
            "--max-cycles" => {
                let value = args.next().context("--max-cycles needs a value")?;
                let limit: u64 = value
                    .parse()
                    .with_context(|| format!("invalid --max-cycles value '{}'", value))?;
                max_cycles = Some(limit);
            }
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            flag if flag.starts_with("--") => bail!("unknown option '{}'\n{}", flag, USAGE),
            path => rom_path = Some(path.to_string()),
        }
    }

    let Some(rom_path) = rom_path else {
        eprintln!(
            "No program provided.\n{}\n\
             For example: i8080_cpm assets/roms/8080_tests/TST8080.COM",
            USAGE
        );
        std::process::exit(1);
    };

    log::info!("Running program: '{}'", rom_path);
    let rom = read_rom(&rom_path)?;

    let undocumented = if strict {
        UndocumentedOpcodes::Fault
    } else {
        UndocumentedOpcodes::Emulate
    };
    let config = RunConfig::builder()
        .rom(rom)
        .debug(debug)
        .max_cycles(max_cycles)
        .undocumented(undocumented)
        .echo(true)
        .build();

    let report = i8080_cpm::run(config)?;
    println!();
    println!(
        "{} instructions, {} cycles ({:?})",
        report.instructions, report.cycles, report.stop
    );

    match report.stop {
        StopReason::Finished => Ok(()),
        StopReason::Halted => {
            eprintln!("CPU halted before the program finished");
            std::process::exit(2);
        }
        StopReason::CycleLimit => {
            eprintln!("cycle budget exhausted before the program finished");
            std::process::exit(3);
        }
    }
}
