//! `mnistbin` command line

use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use mnistbin_codec::ByteOrder;
use mnistbin_convert::{init_logging, ConvertConfig, Converter};

fn config_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .value_parser(value_parser!(PathBuf))
            .help("TOML configuration file"),
    )
    .arg(
        Arg::new("output-dir")
            .long("output-dir")
            .value_parser(value_parser!(PathBuf))
            .help("Directory of the .bin files"),
    )
    .arg(
        Arg::new("byte-order")
            .long("byte-order")
            .value_parser(value_parser!(ByteOrder))
            .help("Label byte order: native, little or big"),
    )
    .arg(
        Arg::new("datasets")
            .num_args(0..)
            .help("Dataset names (default: train test)"),
    )
}

fn build_config(args: &ArgMatches) -> anyhow::Result<ConvertConfig> {
    let mut config = match args.get_one::<PathBuf>("config") {
        Some(path) => ConvertConfig::load_from(path)?,
        None => ConvertConfig::new(),
    };

    if let Ok(Some(dir)) = args.try_get_one::<PathBuf>("input-dir") {
        config = config.with_input_dir(dir);
    }
    if let Some(dir) = args.get_one::<PathBuf>("output-dir") {
        config = config.with_output_dir(dir);
    }
    if let Some(order) = args.get_one::<ByteOrder>("byte-order") {
        config = config.with_byte_order(*order);
    }
    if let Some(names) = args.get_many::<String>("datasets") {
        config = config.with_datasets(names.cloned());
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Command::new("mnistbin")
        .version(mnistbin_convert::VERSION)
        .about("Convert labeled 28x28 image text datasets into fixed-width binary records")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
        .subcommand(
            config_args(Command::new("convert").about("Convert <name>.txt into <name>.bin"))
                .arg(
                    Arg::new("input-dir")
                        .long("input-dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Directory of the .txt files"),
                ),
        )
        .subcommand(
            config_args(
                Command::new("inspect").about("Report record counts and labels of .bin files"),
            )
            .arg(
                Arg::new("json")
                    .long("json")
                    .action(ArgAction::SetTrue)
                    .help("Output as JSON"),
            ),
        );

    let matches = cli.get_matches();
    init_logging(matches.get_count("verbose"));

    match matches.subcommand() {
        Some(("convert", args)) => {
            let converter = Converter::new(build_config(args)?)?;
            for name in &converter.config().datasets {
                let report = converter
                    .convert_dataset(name)
                    .with_context(|| format!("converting dataset '{name}'"))?;
                println!("{report}");
            }
        }
        Some(("inspect", args)) => {
            let converter = Converter::new(build_config(args)?)?;
            let summaries = converter.inspect_all()?;
            if args.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&summaries)?);
            } else {
                for summary in &summaries {
                    print!("{summary}");
                }
            }
        }
        _ => unreachable!("subcommand_required"),
    }
    Ok(())
}
