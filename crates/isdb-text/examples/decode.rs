use std::io::{Read, Write};
use std::path::PathBuf;

use isdb_text::{Profile, Session};

#[derive(Debug)]
struct AppArgs {
    hex: bool,
    profile: Profile,
    capacity: Option<usize>,
    path: Option<PathBuf>,
}

impl AppArgs {
    const HELP: &str = "\
8単位符号の文字列をUTF-8に変換して表示するコマンド

USAGE:
  decode [OPTIONS] [PATH]

FLAGS:
  -h, --help          このヘルプを表示する
  --hex               入力を16進数の文字列として読む
  --abnt              ABNT NBR 15606-1の符号列として読む

OPTIONS:
  --capacity [BYTES]  出力先の容量。
                      未指定の場合は容量を制限しない。

ARGS:
  <PATH>              変換するファイルのパス。
                      未指定の場合は標準入力から読む。
";

    pub fn parse() -> Result<AppArgs, Box<dyn std::error::Error>> {
        let mut args = pico_args::Arguments::from_env();

        if args.contains(["-h", "--help"]) {
            println!("{}", Self::HELP);
            std::process::exit(0);
        }

        let hex = args.contains("--hex");
        let profile = if args.contains("--abnt") {
            Profile::Abnt
        } else {
            Profile::Arib
        };
        let capacity = args.opt_value_from_str("--capacity")?;

        Ok(AppArgs {
            hex,
            profile,
            capacity,
            path: args.opt_free_from_str()?,
        })
    }
}

fn parse_hex(text: &[u8]) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let digits: Vec<u8> = text
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return Err("odd number of hex digits".into());
    }

    digits
        .chunks_exact(2)
        .map(|pair| -> Result<u8, Box<dyn std::error::Error>> {
            Ok(u8::from_str_radix(std::str::from_utf8(pair)?, 16)?)
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = AppArgs::parse()?;

    env_logger::init();

    let mut input = Vec::new();
    match &args.path {
        Some(path) => std::fs::File::open(path)?.read_to_end(&mut input)?,
        None => std::io::stdin().lock().read_to_end(&mut input)?,
    };
    if args.hex {
        input = parse_hex(&input)?;
    }

    let mut session = Session::open(args.profile)?;
    let mut stdout = std::io::stdout().lock();
    match args.capacity {
        Some(capacity) => {
            let mut buf = vec![0; capacity];
            let decoded = session.decode(&input, &mut buf);
            stdout.write_all(&buf[..decoded.written])?;
            writeln!(stdout)?;
            if decoded.is_truncated() {
                eprintln!("truncated at {} bytes", decoded.written);
            }
            if decoded.skipped_runs > 0 {
                eprintln!("{} kanji runs skipped", decoded.skipped_runs);
            }
        }
        None => writeln!(stdout, "{}", session.decode_to_string(&input))?,
    }
    session.close();

    Ok(())
}
