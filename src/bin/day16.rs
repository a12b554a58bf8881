use std::error::Error;
use std::io::Read;

use volcano::{max_pressure, max_pressure_with_helper, SearchConfig, Volcano};

const MAX_EVALUATIONS_VAR: &str = "DAY16_MAX_EVALUATIONS";

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .format_module_path(false)
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let (part, config) = match args[..] {
        [part] => (part, SearchConfig::default()),
        [part, start] => (part, SearchConfig::default().with_start(start)),
        _ => return Err("usage: day16 part1|part2 [START]".into()),
    };
    let config = config.with_max_evaluations(max_evaluations()?);
    match part {
        "part1" => println!("{}", part1(std::io::stdin().lock(), &config)?),
        "part2" => println!("{}", part2(std::io::stdin().lock(), &config)?),
        _ => return Err("must specify part1|part2".into()),
    }
    Ok(())
}

fn max_evaluations() -> Result<Option<usize>, Box<dyn Error>> {
    match std::env::var(MAX_EVALUATIONS_VAR) {
        Ok(v) => {
            let max: usize = v.parse().map_err(|e| format!("{MAX_EVALUATIONS_VAR}={v}: {e}"))?;
            Ok(Some(max))
        },
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(format!("{MAX_EVALUATIONS_VAR}: {e}").into()),
    }
}

fn part1(r: impl Read, config: &SearchConfig) -> Result<u64, Box<dyn Error>> {
    let input = std::io::read_to_string(r)?;
    let volcano: Volcano = input.parse()?;
    Ok(max_pressure(&volcano, config)?)
}

fn part2(r: impl Read, config: &SearchConfig) -> Result<u64, Box<dyn Error>> {
    let input = std::io::read_to_string(r)?;
    let volcano: Volcano = input.parse()?;
    Ok(max_pressure_with_helper(&volcano, config)?)
}
