use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::process;

/// Evaluate the program given on the command line, or each line of the
/// standard input when there are no arguments.
fn main() {
    pretty_env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let query = args.join(" ");
        debug!("query from arguments: {:?}", query);
        match calcbot::answer(&query) {
            Ok(answer) => println!("{}", answer),
            Err(error) => {
                println!("{}", error);
                process::exit(1);
            }
        }
        return;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(error) = answer_lines(stdin.lock(), stdout.lock()) {
        eprintln!("Error: {}", error);
        process::exit(1);
    }
}

/// Reply to every non blank line of `input`, one line each
fn answer_lines<R: BufRead, W: Write>(input: R, mut output: W) -> io::Result<()> {
    let mut count = 0;
    for line in input.lines() {
        let line = line?;
        let query = line.trim();
        if query.is_empty() {
            continue;
        }
        writeln!(output, "{}", calcbot::reply(query))?;
        output.flush()?;
        count += 1;
    }
    info!("answered {} queries", count);
    Ok(())
}
