use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use derive_new::new;
use serde::Serialize;
use structopt::StructOpt;

use speller::text::words;
use speller::{Dictionary, LoadReport};

/// Report the words in a text file that are missing from a dictionary.
#[derive(StructOpt)]
struct Cli {
    /// Word list, one word per line
    #[structopt(short, long, parse(from_os_str), env = "SPELLER_DICTIONARY",
                default_value = "dictionaries/large")]
    dictionary: PathBuf,
    /// Print the report as JSON
    #[structopt(long)]
    json: bool,
    /// The text to spell-check
    #[structopt(parse(from_os_str))]
    text: PathBuf,
}

#[derive(Serialize, Default)]
struct Timings {
    load: f64,
    check: f64,
    size: f64,
    unload: f64,
    total: f64,
}

#[derive(new, Serialize)]
struct SpellReport {
    misspelled: Vec<String>,
    words_in_dictionary: usize,
    words_in_text: usize,
    load: LoadReport,
    timings: Timings,
}

fn seconds(d: Duration) -> f64 {
    d.as_secs_f64()
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Cli::from_args();
    let mut timings = Timings::default();

    let mut dictionary = Dictionary::default();
    let start = Instant::now();
    let load = match dictionary.try_load(&args.dictionary) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e);
            eprintln!("Could not load {}.", args.dictionary.display());
            process::exit(1);
        }
    };
    timings.load = seconds(start.elapsed());

    let text = match std::fs::read(&args.text) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::error!(error = %e);
            eprintln!("Could not open {}.", args.text.display());
            dictionary.unload();
            process::exit(1);
        }
    };

    let mut misspelled = vec![];
    let mut words_in_text = 0;
    let start = Instant::now();
    for word in words(&text, dictionary.options().max_word_length) {
        words_in_text += 1;
        if !dictionary.check(word) {
            misspelled.push(word.to_string());
        }
    }
    timings.check = seconds(start.elapsed());

    let start = Instant::now();
    let words_in_dictionary = dictionary.size();
    timings.size = seconds(start.elapsed());

    let start = Instant::now();
    dictionary.unload();
    timings.unload = seconds(start.elapsed());

    timings.total = timings.load + timings.check + timings.size + timings.unload;

    let report = SpellReport::new(misspelled, words_in_dictionary, words_in_text, load, timings);
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = if args.json {
        serde_json::to_writer_pretty(&mut out, &report)
            .map_err(io::Error::from)
            .and_then(|_| writeln!(out))
    } else {
        print_report(&mut out, &report)
    };
    if let Err(e) = written.and_then(|_| out.flush()) {
        tracing::error!(error = %e, "failed writing report");
        process::exit(1);
    }
}

fn print_report<W: Write>(out: &mut W, report: &SpellReport) -> io::Result<()> {
    writeln!(out, "\nMISSPELLED WORDS\n")?;
    for word in &report.misspelled {
        writeln!(out, "{}", word)?;
    }
    writeln!(out)?;
    writeln!(out, "WORDS MISSPELLED:     {}", report.misspelled.len())?;
    writeln!(out, "WORDS IN DICTIONARY:  {}", report.words_in_dictionary)?;
    writeln!(out, "WORDS IN TEXT:        {}", report.words_in_text)?;
    writeln!(out, "TIME IN load:         {:.2}", report.timings.load)?;
    writeln!(out, "TIME IN check:        {:.2}", report.timings.check)?;
    writeln!(out, "TIME IN size:         {:.2}", report.timings.size)?;
    writeln!(out, "TIME IN unload:       {:.2}", report.timings.unload)?;
    writeln!(out, "TIME IN TOTAL:        {:.2}", report.timings.total)?;
    Ok(())
}
