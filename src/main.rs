use clap::{
    crate_authors, crate_description, crate_name, crate_version, value_t, App, AppSettings, Arg,
    ArgMatches, SubCommand,
};
use pasigram::{
    data::read_sqlite3, evaluator::SupportMeasure, generator::BackwardExtension, task::Pasigram,
};
use std::{
    error::Error,
    io::{BufWriter, Write},
};

fn handle_dbinfo(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    println!(
        "{}",
        read_sqlite3(matches.value_of("SQLITE3").unwrap())?.info()
    );
    Ok(())
}

fn handle_mine(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let start_time = std::time::Instant::now();
    let data_graph = read_sqlite3(matches.value_of("SQLITE3").unwrap())?;
    eprintln!(
        "load_time: {}",
        (std::time::Instant::now() - start_time).as_millis()
    );
    let min_support = value_t!(matches, "min-support", usize).unwrap_or_else(|e| e.exit());
    let time_now = std::time::Instant::now();
    let frequent_subgraphs = Pasigram::new(&data_graph, min_support)
        .backward_extension(parse_backward(matches.value_of("backward").unwrap()))
        .support_measure(parse_support(matches.value_of("support").unwrap()))
        .parallel(!matches.is_present("single-core"))
        .execute()?;
    eprintln!(
        "mine_time: {}",
        (std::time::Instant::now() - time_now).as_millis()
    );
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for pattern in frequent_subgraphs.iter() {
        writeln!(out, "{}", pattern)?;
    }
    out.flush()?;
    eprintln!("num_patterns: {}", frequent_subgraphs.len());
    eprintln!("max_size: {}", frequent_subgraphs.max_size());
    eprintln!(
        "total_time: {}",
        (std::time::Instant::now() - start_time).as_millis()
    );
    Ok(())
}

fn parse_backward(backward: &str) -> BackwardExtension {
    match backward {
        "all" => BackwardExtension::AllMatches,
        "nearest" => BackwardExtension::NearestMatch,
        _ => unreachable!(),
    }
}

fn parse_support(support: &str) -> SupportMeasure {
    match support {
        "embeddings" => SupportMeasure::Embeddings,
        "mni" => SupportMeasure::MinimumImage,
        _ => unreachable!(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let matches = App::new(crate_name!())
        .about(crate_description!())
        .author(crate_authors!())
        .version(crate_version!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("dbinfo")
                .about("Displays information about the input graph")
                .arg(Arg::with_name("SQLITE3").required(true)),
        )
        .subcommand(
            SubCommand::with_name("mine")
                .about("Mines the frequent subgraphs of the input graph")
                .after_help(
                    r"The SQLite3 file must contain the following schema:

  CREATE TABLE vertices (vid INT, vlabel INT);
  CREATE TABLE edges (src INT, dst INT, elabel INT);
",
                )
                .arg(Arg::with_name("SQLITE3").required(true))
                .arg(
                    Arg::with_name("min-support")
                        .help("Minimum frequency of a reported pattern")
                        .long("min-support")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("backward")
                        .help("Right-most path nodes a backward edge may point to")
                        .long("backward")
                        .takes_value(true)
                        .default_value("all")
                        .possible_values(&["all", "nearest"]),
                )
                .arg(
                    Arg::with_name("support")
                        .help("Counts embeddings or minimum images")
                        .long("support")
                        .takes_value(true)
                        .default_value("embeddings")
                        .possible_values(&["embeddings", "mni"]),
                )
                .arg(
                    Arg::with_name("single-core")
                        .help("Generates and evaluates candidates on one thread")
                        .long("single-core")
                        .takes_value(false),
                ),
        )
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("dbinfo") {
        handle_dbinfo(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("mine") {
        handle_mine(matches)?;
    }
    Ok(())
}
