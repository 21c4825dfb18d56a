use std::path::PathBuf;

use labfit::{display, experiment::Experiment};
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: labfit [<path>] [out=<png>] [accuracy=<n>] [origin=true|false] [worst=true|false]";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    //
    // First argument is the path to a CSV or JSON experiment; without one we use the built-in data.
    let mut path = None;
    let mut out = None;
    let mut accuracy = None;
    let mut origin = None;
    let mut worst = None;
    for arg in std::env::args().skip(1) {
        if arg == "help" || arg == "--help" || arg == "-h" {
            eprintln!("{USAGE}");
            std::process::exit(0);
        }

        if let Some(option) = arg.strip_prefix("out=") {
            out = Some(PathBuf::from(option));
        } else if let Some(option) = arg.strip_prefix("accuracy=") {
            accuracy = Some(parse_option::<i32>("accuracy", option));
        } else if let Some(option) = arg.strip_prefix("origin=") {
            origin = Some(parse_option::<bool>("origin", option));
        } else if let Some(option) = arg.strip_prefix("worst=") {
            worst = Some(parse_option::<bool>("worst", option));
        } else if path.is_none() {
            path = Some(PathBuf::from(arg));
        } else {
            eprintln!("Unexpected argument: {arg}\n{USAGE}");
            std::process::exit(1);
        }
    }

    let experiment = match &path {
        Some(path) => Experiment::load(path).unwrap_or_else(|err| {
            eprintln!("Failed to load {}: {err}", path.display());
            std::process::exit(1);
        }),
        None => Experiment::young_double_slit(),
    };

    let mut graph = experiment.into_graph();
    let options = graph.options_mut();
    options.accuracy = accuracy.unwrap_or(options.accuracy);
    options.force_origin = origin.unwrap_or(options.force_origin);
    options.show_worst_fit = worst.unwrap_or(options.show_worst_fit);
    let figures = options.accuracy;

    let analysis = graph.analyse().unwrap_or_else(|err| {
        eprintln!("Failed to fit a line: {err}");
        std::process::exit(1);
    });

    let fit = &analysis.fit;
    let summary = (|| -> labfit::Result<String> {
        Ok(format!(
            "{}\n  gradient:        {}\n  intercept:       {}\n  worst gradient:  {}\n  worst intercept: {}",
            graph.options().title,
            display::format_with_error(fit.slope(), fit.slope_error(), figures)?,
            display::format_with_error(fit.intercept(), fit.intercept_error(), figures)?,
            display::significant(analysis.worst.slope, figures)?,
            display::significant(analysis.worst.intercept, figures)?,
        ))
    })();
    match summary {
        Ok(summary) => println!("{summary}"),
        Err(err) => {
            eprintln!("Failed to format results: {err}");
            std::process::exit(1);
        }
    }

    render(&graph, out);
}

#[cfg(feature = "plotting")]
fn render(graph: &labfit::Graph, out: Option<PathBuf>) {
    let path = match out {
        Some(path) => path,
        None => labfit::plotting::output_path("labfit").unwrap_or_else(|err| {
            eprintln!("Failed to create output directory: {err}");
            std::process::exit(1);
        }),
    };

    if let Err(err) = graph.render(&path) {
        eprintln!("Failed to draw graph: {err}");
        std::process::exit(1);
    }
    println!("Wrote graph to {}", path.display());
}

#[cfg(not(feature = "plotting"))]
fn render(_: &labfit::Graph, out: Option<PathBuf>) {
    if out.is_some() {
        eprintln!("Built without the `plotting` feature; no graph was written");
    }
}

fn parse_option<T: std::str::FromStr>(name: &str, value: &str) -> T {
    value.parse().unwrap_or_else(|_| {
        eprintln!("Invalid {name} value: {value}\n{USAGE}");
        std::process::exit(1);
    })
}
