use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slidedeck-pdf", about = "Render a report request as a slide-style PDF")]
struct Args {
    /// Input request (JSON)
    input: PathBuf,
    /// Output PDF file (defaults to input with .pdf extension)
    output: Option<PathBuf>,
    /// Logo image for the cover page, overriding the request's logoPath
    #[arg(long)]
    logo: Option<PathBuf>,
    /// Print the number of pages written
    #[arg(long)]
    print_pages: bool,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if !args.input.exists() {
        eprintln!("Error: file not found: {}", args.input.display());
        std::process::exit(1);
    }
    if !args.input.is_file() {
        eprintln!("Error: not a file: {}", args.input.display());
        std::process::exit(1);
    }

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    match slidedeck_pdf::convert_request_to_pdf(&args.input, &output, args.logo.as_deref()) {
        Ok(pages) => {
            if args.print_pages {
                println!("{pages}");
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
