use super::CliFlags;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArgError {
    #[error("Invalid number: {0}")]
    InvalidNumber(String),
    #[error("Missing value for {0}")]
    MissingValue(String),
    #[error("Unknown argument: {0}")]
    UnknownArg(String),
}

pub fn parse(args: &[String]) -> Result<CliFlags, ArgError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-u" | "--urandom" => flags.urandom = true,
            "--no-special" => flags.no_special = true,
            "-l" | "--length" => flags.length = Some(number(args, &mut i)?),
            "-n" | "--number" => flags.number = Some(number(args, &mut i)?),
            "--special" => flags.special = Some(value(args, &mut i)?.to_string()),
            "--log" => flags.log_level = Some(value(args, &mut i)?.to_string()),
            _ => return Err(ArgError::UnknownArg(arg.to_string())),
        }
        i += 1;
    }

    Ok(flags)
}

fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, ArgError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| ArgError::MissingValue(flag.clone()))
}

fn number(args: &[String], i: &mut usize) -> Result<usize, ArgError> {
    let raw = value(args, i)?;
    raw.parse()
        .map_err(|_| ArgError::InvalidNumber(raw.to_string()))
}
