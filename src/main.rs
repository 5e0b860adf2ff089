use dbf_reader::dbf::codepage;
use dbf_reader::Dbf;
use encoding_rs::Encoding;
use std::env;
use std::process;

/// Rows printed by `show` before stopping, unless `--no-limit` is given.
const SHOW_LIMIT: usize = 15;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!(
            "Usage: {} <describe|show> <path-to-dbf-file> [--encoding <LABEL>] [--no-limit]",
            args.first().map(String::as_str).unwrap_or("dbf-reader")
        );
        process::exit(1);
    }

    let command = args[1].as_str();
    let dbf_path = &args[2];

    let mut encoding: Option<&'static Encoding> = None;
    let mut no_limit = false;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--encoding" => {
                let Some(label) = args.get(i + 1) else {
                    eprintln!("ERROR: --encoding flag requires an argument.");
                    process::exit(1);
                };
                match codepage::encoding_for_label(label) {
                    Some(e) => encoding = Some(e),
                    None => {
                        eprintln!("ERROR: Unknown encoding label: {}", label);
                        process::exit(1);
                    }
                }
                i += 2;
            }
            "--no-limit" => {
                no_limit = true;
                i += 1;
            }
            other => {
                eprintln!("ERROR: Unknown option: {}", other);
                process::exit(1);
            }
        }
    }

    let result = match command {
        "describe" => describe(dbf_path, encoding),
        "show" => show(dbf_path, encoding, no_limit),
        other => {
            eprintln!("ERROR: Unknown command: {}. Expected describe or show.", other);
            process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("ERROR: Failed to read dbf file");
        eprintln!("  {}", e);
        process::exit(1);
    }
}

/// Prints the record count and the field table, one `type: name` line
/// per field.
fn describe(path: &str, encoding: Option<&'static Encoding>) -> dbf_reader::Result<()> {
    let dbf = Dbf::open(path, encoding, true)?;

    println!("Rows count: {}", dbf.prolog().records_count);
    println!("Fields:");
    for field in dbf.fields() {
        println!("  {}: {}", field.field_type, field.name());
    }
    Ok(())
}

/// Prints every row as a blank-line-separated block of `name: value`
/// lines, stopping at [`SHOW_LIMIT`] unless told otherwise.
fn show(path: &str, encoding: Option<&'static Encoding>, no_limit: bool) -> dbf_reader::Result<()> {
    let mut dbf = Dbf::open(path, encoding, true)?;

    let mut shown = 0usize;
    for result in dbf.rows() {
        let row = result?;
        println!();
        for (name, value) in row.iter() {
            println!("  {}: {}", name, value);
        }

        shown += 1;
        if !no_limit && shown == SHOW_LIMIT {
            println!(
                "Note: Output is limited to {} rows. Use --no-limit option to bypass.",
                SHOW_LIMIT
            );
            break;
        }
    }
    Ok(())
}
